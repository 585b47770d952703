use serde::{Deserialize, Serialize};

/// Lifecycle of a submitted application. New applications always start as
/// `Pending`; the other states model employer responses.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Accepted,
    Rejected,
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

/// One submitted application, persisted per-account under
/// `<email>_applications`, most recent first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    pub job_id: u32,
    pub job_title: String,
    pub company: String,
    pub salary: String,
    pub applied_at: String,
    pub status: ApplicationStatus,
}

/// One bookmarked job, persisted per-account under `<email>_saved_jobs`,
/// most recent first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedJob {
    pub id: i64,
    pub job_id: u32,
    pub title: String,
    pub company: String,
    pub salary: String,
    pub location: String,
    pub saved_at: String,
}
