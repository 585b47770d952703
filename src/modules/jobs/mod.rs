pub mod catalog;
pub mod model;
pub mod tracker;
pub mod user_interface;

// Re-export the main types and functions
pub use catalog::{find_job, search_jobs, JobListing, JOB_CATALOG};
pub use model::{Application, ApplicationStatus, SavedJob};
pub use tracker::SaveToggle;
