use serde::{Deserialize, Serialize};

use crate::modules::utils::time::iso_timestamp;

/// The three account roles. A role is chosen during the auth flow and is
/// immutable after registration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Employee,
    Admin,
}

impl Role {
    pub fn all() -> [Role; 3] {
        [Role::Student, Role::Employee, Role::Admin]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Employee => "Employee",
            Role::Admin => "Administrator",
        }
    }

    /// Hex color used for generated placeholder avatars.
    pub fn color(&self) -> &'static str {
        match self {
            Role::Student => "a77bfd",
            Role::Employee => "10b981",
            Role::Admin => "f59e0b",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "employee" => Ok(Role::Employee),
            "admin" | "administrator" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How the account was authenticated.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Email,
    Google,
}

/// Role-specific profile attribute: exactly one of university, job title, or
/// company, selected by role.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoleProfile {
    Student {
        university: String,
    },
    Employee {
        #[serde(rename = "jobTitle")]
        job_title: String,
    },
    Admin {
        company: String,
    },
}

impl RoleProfile {
    /// Build the variant matching a role from the single role-specific field
    /// collected during registration.
    pub fn new(role: Role, value: String) -> Self {
        match role {
            Role::Student => RoleProfile::Student { university: value },
            Role::Employee => RoleProfile::Employee { job_title: value },
            Role::Admin => RoleProfile::Admin { company: value },
        }
    }

    pub fn role(&self) -> Role {
        match self {
            RoleProfile::Student { .. } => Role::Student,
            RoleProfile::Employee { .. } => Role::Employee,
            RoleProfile::Admin { .. } => Role::Admin,
        }
    }

    pub fn field_value(&self) -> &str {
        match self {
            RoleProfile::Student { university } => university,
            RoleProfile::Employee { job_title } => job_title,
            RoleProfile::Admin { company } => company,
        }
    }

    /// Human-readable "label: value" line for profile display.
    pub fn describe(&self) -> String {
        let value = match self.field_value() {
            "" => "Not specified",
            v => v,
        };
        match self {
            RoleProfile::Student { .. } => format!("University: {}", value),
            RoleProfile::Employee { .. } => format!("Job Title: {}", value),
            RoleProfile::Admin { .. } => format!("Company: {}", value),
        }
    }
}

/// Who can see the profile.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProfileVisibility {
    Public,
    Connections,
    Private,
}

impl std::str::FromStr for ProfileVisibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(ProfileVisibility::Public),
            "connections" => Ok(ProfileVisibility::Connections),
            "private" => Ok(ProfileVisibility::Private),
            other => Err(format!("Unknown visibility: {}", other)),
        }
    }
}

/// A durable, email-keyed user record. Applications and saved jobs live under
/// their own per-email keys, not on the account.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: Option<String>, // Plaintext by design; local demo store only
    pub auth_provider: AuthProvider,
    pub profile: RoleProfile,
    pub created_at: String,
    pub avatar: Option<String>,
    pub notifications: bool,
    pub email_verified: bool,
    pub phone: String,
    pub location: String,
    pub bio: String,
    pub linkedin: String,
    pub github: String,
    pub profile_visibility: ProfileVisibility,
    pub search_indexing: bool,
    pub notify_applications: bool,
    pub notify_job_matches: bool,
    pub push_notifications: bool,
}

impl Account {
    /// Create a freshly registered email-provider account with default
    /// profile fields.
    pub fn new_registration(
        name: String,
        email: String,
        password: String,
        profile: RoleProfile,
    ) -> Self {
        Account {
            id: format!("user_{}", crate::modules::utils::time::current_millis()),
            name,
            email,
            password: Some(password),
            auth_provider: AuthProvider::Email,
            profile,
            created_at: iso_timestamp(),
            avatar: None,
            notifications: true,
            email_verified: false,
            phone: String::new(),
            location: String::new(),
            bio: String::new(),
            linkedin: String::new(),
            github: String::new(),
            profile_visibility: ProfileVisibility::Public,
            search_indexing: false,
            notify_applications: true,
            notify_job_matches: true,
            push_notifications: false,
        }
    }

    /// Create an account from an already-authenticated external identity.
    /// External accounts carry no password.
    pub fn new_external(
        provider_id: &str,
        name: String,
        email: String,
        avatar: Option<String>,
        profile: RoleProfile,
    ) -> Self {
        Account {
            id: format!("google_{}", provider_id),
            name,
            email,
            password: None,
            auth_provider: AuthProvider::Google,
            profile,
            created_at: iso_timestamp(),
            avatar,
            notifications: true,
            email_verified: true,
            phone: String::new(),
            location: String::new(),
            bio: String::new(),
            linkedin: String::new(),
            github: String::new(),
            profile_visibility: ProfileVisibility::Public,
            search_indexing: false,
            notify_applications: true,
            notify_job_matches: true,
            push_notifications: false,
        }
    }

    pub fn role(&self) -> Role {
        self.profile.role()
    }

    /// Avatar URL, falling back to a role-colored placeholder with the
    /// account's first initial.
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(url) => url.clone(),
            None => {
                let initial = self
                    .name
                    .chars()
                    .next()
                    .map(|c| c.to_uppercase().to_string())
                    .unwrap_or_default();
                format!(
                    "https://via.placeholder.com/32x32/{}/ffffff?text={}",
                    self.role().color(),
                    initial
                )
            }
        }
    }
}
