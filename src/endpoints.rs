//! The endpoint URIs.

/// The root route which redirects to the manager page.
pub const ROOT: &str = "/";
/// The page where the manager records transactions.
pub const MANAGER_VIEW: &str = "/manager";
/// The password-gated admin space.
pub const ADMIN_VIEW: &str = "/admin";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for recording a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for the transaction types offered by a service.
pub const TRANSACTION_TYPES_API: &str = "/api/transaction_types";
/// The route for unlocking the admin dashboard.
pub const ADMIN_API: &str = "/api/admin";
