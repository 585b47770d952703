pub mod error;
pub mod flow;
pub mod session;
pub mod user_interface;
pub mod validation;

// Re-export the main types and functions
pub use error::AuthError;
pub use flow::{AuthFlow, AuthStep, RoleCopy, RoleFieldSpec};
pub use session::{AuthSessionManager, ExternalIdentity, SimulatedLatency};
pub use validation::{is_valid_email, is_valid_password};
