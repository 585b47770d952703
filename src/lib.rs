// First, declare the modules folder itself
mod modules;

// Re-export everything from modules for easier access
pub use modules::{account, auth, jobs, storage, utils};

// Re-export commonly used types
pub use modules::account::{Account, PersonalInfo, ProfileVisibility, Role, RoleProfile};
pub use modules::auth::{AuthError, AuthSessionManager, AuthStep, ExternalIdentity, SimulatedLatency};
pub use modules::jobs::{Application, ApplicationStatus, JobListing, SavedJob};
pub use modules::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

// Constants
pub const STORE_FILE: &str = "jobconnect_store.json";
pub const LOG_FILE: &str = "jobconnect.log";
pub const MIN_PASSWORD_LEN: usize = 6;

// Simulated round-trip timings (milliseconds)
pub const ROLE_SELECT_DELAY_MS: u64 = 300;
pub const LOGIN_LATENCY_MS: u64 = 1500;
pub const REGISTER_LATENCY_MS: u64 = 2000;
pub const APPLY_LATENCY_MS: u64 = 1500;
