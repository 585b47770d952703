use super::catalog::find_job;
use super::model::{Application, ApplicationStatus, SavedJob};
use crate::modules::auth::{AuthError, AuthSessionManager};
use crate::modules::storage::keys::{applications_key, saved_jobs_key};
use crate::modules::storage::{get_json, set_json, KeyValueStore};
use crate::modules::utils::logging::log_data_operation;
use crate::modules::utils::time::{current_millis, iso_timestamp};

/// Millisecond record id, bumped past the newest existing id so two records
/// created within the same millisecond never collide.
fn next_record_id(latest: Option<i64>) -> i64 {
    let now = current_millis();
    match latest {
        Some(id) if id >= now => id + 1,
        _ => now,
    }
}

/// Outcome of a save toggle.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveToggle {
    Saved(SavedJob),
    Removed,
}

/// Application and saved-job tracking for the signed-in account. Every
/// operation requires a session and writes the full list back to its
/// per-email key.
impl<S: KeyValueStore> AuthSessionManager<S> {
    /// The current account's applications, most recent first.
    pub fn applications(&self) -> Result<Vec<Application>, AuthError> {
        let account = self.session_account()?;
        let apps = get_json(self.store(), &applications_key(&account.email))?.unwrap_or_default();
        Ok(apps)
    }

    /// The current account's saved jobs, most recent first.
    pub fn saved_jobs(&self) -> Result<Vec<SavedJob>, AuthError> {
        let account = self.session_account()?;
        let saved = get_json(self.store(), &saved_jobs_key(&account.email))?.unwrap_or_default();
        Ok(saved)
    }

    /// Apply to a catalog job. Appends exactly one pending application at the
    /// front of the account's list, behind simulated submission latency.
    pub async fn apply_to_job(&mut self, job_id: u32) -> Result<Application, AuthError> {
        let account = self.session_account()?;
        let job = find_job(job_id)
            .ok_or_else(|| AuthError::NotFound(format!("No job with id {}", job_id)))?;

        self.simulate_apply_latency().await;

        let key = applications_key(&account.email);
        let mut applications: Vec<Application> =
            get_json(self.store(), &key)?.unwrap_or_default();

        let application = Application {
            id: next_record_id(applications.iter().map(|app| app.id).max()),
            job_id: job.id,
            job_title: job.title.to_string(),
            company: job.company.to_string(),
            salary: job.salary.to_string(),
            applied_at: iso_timestamp(),
            status: ApplicationStatus::Pending,
        };
        applications.insert(0, application.clone());
        set_json(self.store_mut(), &key, &applications)?;

        log_data_operation("apply", &account.email, "applications", true, Some(job.title));
        Ok(application)
    }

    /// Toggle a job's saved status: saving an unsaved job adds it once,
    /// saving it again removes it.
    pub fn toggle_saved_job(&mut self, job_id: u32) -> Result<SaveToggle, AuthError> {
        let account = self.session_account()?;
        let job = find_job(job_id)
            .ok_or_else(|| AuthError::NotFound(format!("No job with id {}", job_id)))?;

        let key = saved_jobs_key(&account.email);
        let mut saved: Vec<SavedJob> = get_json(self.store(), &key)?.unwrap_or_default();

        let outcome = if saved.iter().any(|entry| entry.job_id == job_id) {
            saved.retain(|entry| entry.job_id != job_id);
            SaveToggle::Removed
        } else {
            let entry = SavedJob {
                id: next_record_id(saved.iter().map(|entry| entry.id).max()),
                job_id: job.id,
                title: job.title.to_string(),
                company: job.company.to_string(),
                salary: job.salary.to_string(),
                location: job.location.to_string(),
                saved_at: iso_timestamp(),
            };
            saved.insert(0, entry.clone());
            SaveToggle::Saved(entry)
        };

        set_json(self.store_mut(), &key, &saved)?;
        log_data_operation("toggle_save", &account.email, "saved_jobs", true, Some(job.title));
        Ok(outcome)
    }

    /// Withdraw an application by its record id.
    pub fn withdraw_application(&mut self, application_id: i64) -> Result<(), AuthError> {
        let account = self.session_account()?;
        let key = applications_key(&account.email);
        let mut applications: Vec<Application> =
            get_json(self.store(), &key)?.unwrap_or_default();

        let before = applications.len();
        applications.retain(|app| app.id != application_id);
        if applications.len() == before {
            return Err(AuthError::NotFound(format!(
                "No application with id {}",
                application_id
            )));
        }

        set_json(self.store_mut(), &key, &applications)?;
        log_data_operation("withdraw", &account.email, "applications", true, None);
        Ok(())
    }

    /// Remove a saved job by its record id.
    pub fn remove_saved_job(&mut self, saved_id: i64) -> Result<(), AuthError> {
        let account = self.session_account()?;
        let key = saved_jobs_key(&account.email);
        let mut saved: Vec<SavedJob> = get_json(self.store(), &key)?.unwrap_or_default();

        let before = saved.len();
        saved.retain(|entry| entry.id != saved_id);
        if saved.len() == before {
            return Err(AuthError::NotFound(format!(
                "No saved job with id {}",
                saved_id
            )));
        }

        set_json(self.store_mut(), &key, &saved)?;
        log_data_operation("remove_saved", &account.email, "saved_jobs", true, None);
        Ok(())
    }

    /// Counts shown as profile badges: (applications, saved jobs).
    pub fn activity_counts(&self) -> Result<(usize, usize), AuthError> {
        Ok((self.applications()?.len(), self.saved_jobs()?.len()))
    }
}
