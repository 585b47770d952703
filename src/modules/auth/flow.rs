use crate::modules::account::Role;

/// Steps of the authentication flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStep {
    RoleSelection,
    CredentialEntry,
    Success,
}

/// The role-specific input field shown during credential entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleFieldSpec {
    pub label: &'static str,
    pub placeholder: &'static str,
}

/// Form heading copy per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleCopy {
    pub title: &'static str,
    pub subtitle: &'static str,
}

impl Role {
    /// Definition of the single role-specific field collected at registration.
    pub fn field_spec(&self) -> RoleFieldSpec {
        match self {
            Role::Student => RoleFieldSpec {
                label: "University/Institution",
                placeholder: "e.g., Stanford University",
            },
            Role::Employee => RoleFieldSpec {
                label: "Current Job Title",
                placeholder: "e.g., Software Engineer",
            },
            Role::Admin => RoleFieldSpec {
                label: "Company Name",
                placeholder: "e.g., TechCorp Inc.",
            },
        }
    }

    pub fn form_copy(&self) -> RoleCopy {
        match self {
            Role::Student => RoleCopy {
                title: "Login as Student",
                subtitle: "Access internships and entry-level opportunities",
            },
            Role::Employee => RoleCopy {
                title: "Login as Employee",
                subtitle: "Find premium full-time career opportunities",
            },
            Role::Admin => RoleCopy {
                title: "Login as Administrator",
                subtitle: "Manage opportunities and connect with talent",
            },
        }
    }
}

/// The authentication step state machine:
/// `RoleSelection -> CredentialEntry -> Success`, with `back` from
/// `CredentialEntry` to `RoleSelection`. Resets to `RoleSelection` whenever
/// the flow is opened or closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthFlow {
    step: AuthStep,
    selected_role: Role,
}

impl Default for AuthFlow {
    fn default() -> Self {
        AuthFlow {
            step: AuthStep::RoleSelection,
            selected_role: Role::Student,
        }
    }
}

impl AuthFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> AuthStep {
        self.step
    }

    pub fn selected_role(&self) -> Role {
        self.selected_role
    }

    /// Role-specific field for the currently selected role.
    pub fn role_field(&self) -> RoleFieldSpec {
        self.selected_role.field_spec()
    }

    /// Record the chosen role and advance to credential entry.
    pub fn select_role(&mut self, role: Role) {
        self.selected_role = role;
        self.step = AuthStep::CredentialEntry;
    }

    /// Return from credential entry to role selection. A no-op elsewhere.
    pub fn back(&mut self) {
        if self.step == AuthStep::CredentialEntry {
            self.step = AuthStep::RoleSelection;
        }
    }

    /// Mark the flow complete after successful login/registration.
    pub(crate) fn complete(&mut self) {
        self.step = AuthStep::Success;
    }

    /// Reset to role selection, keeping the last selected role.
    pub fn reset(&mut self) {
        self.step = AuthStep::RoleSelection;
    }

    /// Progress through the flow as a percentage, for UI display.
    pub fn progress_percent(&self) -> u8 {
        match self.step {
            AuthStep::RoleSelection => 33,
            AuthStep::CredentialEntry => 66,
            AuthStep::Success => 100,
        }
    }
}
