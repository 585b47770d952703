//! Key patterns for the persistence store.
//!
//! | Key | Value |
//! |---|---|
//! | `user_<email>` | serialized Account |
//! | `current_user` | serialized current session Account |
//! | `<email>_applications` | serialized list of Applications |
//! | `<email>_saved_jobs` | serialized list of SavedJobs |

/// Key holding the currently signed-in account.
pub const CURRENT_USER_KEY: &str = "current_user";

/// Key holding the durable account record for an email.
pub fn account_key(email: &str) -> String {
    format!("user_{}", email)
}

/// Key holding the ordered application list for an email.
pub fn applications_key(email: &str) -> String {
    format!("{}_applications", email)
}

/// Key holding the ordered saved-job list for an email.
pub fn saved_jobs_key(email: &str) -> String {
    format!("{}_saved_jobs", email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_patterns() {
        assert_eq!(account_key("ana@x.com"), "user_ana@x.com");
        assert_eq!(applications_key("ana@x.com"), "ana@x.com_applications");
        assert_eq!(saved_jobs_key("ana@x.com"), "ana@x.com_saved_jobs");
        assert_eq!(CURRENT_USER_KEY, "current_user");
    }
}
