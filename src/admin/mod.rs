//! The admin space: a password form and, once unlocked, the dashboard.

mod dashboard;
mod endpoint;
mod page;

pub use endpoint::post_admin_password;
pub use page::get_admin_page;
