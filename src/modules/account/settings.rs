use super::model::{Account, ProfileVisibility};
use crate::modules::auth::{AuthError, AuthSessionManager};
use crate::modules::storage::keys::account_key;
use crate::modules::storage::{set_json, KeyValueStore};
use crate::modules::utils::logging::log_data_operation;

/// Editable personal-info fields. Name is required; everything else may be
/// cleared by submitting an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalInfo {
    pub name: String,
    pub phone: String,
    pub location: String,
    pub bio: String,
    pub linkedin: String,
    pub github: String,
}

/// Profile settings for the signed-in account. Each update writes the full
/// account back under both its durable key and the session key; there is no
/// transactional grouping between the two writes.
impl<S: KeyValueStore> AuthSessionManager<S> {
    fn persist_account(&mut self, account: Account) -> Result<Account, AuthError> {
        set_json(self.store_mut(), &account_key(&account.email), &account)?;
        self.set_session(account.clone())?;
        Ok(account)
    }

    /// Update name and contact fields.
    pub fn update_personal_info(&mut self, info: PersonalInfo) -> Result<Account, AuthError> {
        let mut account = self.session_account()?;
        let name = info.name.trim();
        if name.is_empty() {
            return Err(AuthError::Validation("Name is required".to_string()));
        }

        account.name = name.to_string();
        account.phone = info.phone.trim().to_string();
        account.location = info.location.trim().to_string();
        account.bio = info.bio.trim().to_string();
        account.linkedin = info.linkedin.trim().to_string();
        account.github = info.github.trim().to_string();

        let account = self.persist_account(account)?;
        log_data_operation("update_personal", &account.email, "account", true, None);
        Ok(account)
    }

    /// Update profile visibility and search-indexing consent.
    pub fn update_privacy_settings(
        &mut self,
        visibility: ProfileVisibility,
        search_indexing: bool,
    ) -> Result<Account, AuthError> {
        let mut account = self.session_account()?;
        account.profile_visibility = visibility;
        account.search_indexing = search_indexing;

        let account = self.persist_account(account)?;
        log_data_operation("update_privacy", &account.email, "account", true, None);
        Ok(account)
    }

    /// Update the three notification channels. The master `notifications`
    /// flag is on whenever any channel is.
    pub fn update_notification_settings(
        &mut self,
        notify_applications: bool,
        notify_job_matches: bool,
        push_notifications: bool,
    ) -> Result<Account, AuthError> {
        let mut account = self.session_account()?;
        account.notify_applications = notify_applications;
        account.notify_job_matches = notify_job_matches;
        account.push_notifications = push_notifications;
        account.notifications = notify_applications || notify_job_matches || push_notifications;

        let account = self.persist_account(account)?;
        log_data_operation("update_notifications", &account.email, "account", true, None);
        Ok(account)
    }
}
