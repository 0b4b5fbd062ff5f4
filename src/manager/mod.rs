//! The manager's space: the form for recording transactions and the history.

mod create_endpoint;
mod page;
mod submission;

pub use create_endpoint::create_transaction_endpoint;
pub use page::{get_manager_page, get_transaction_types};
