pub mod model;
pub mod settings;

// Re-export the main types
pub use model::{Account, AuthProvider, ProfileVisibility, Role, RoleProfile};
pub use settings::PersonalInfo;
