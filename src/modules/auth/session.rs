use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

use super::error::AuthError;
use super::flow::AuthFlow;
use super::validation::{is_valid_email, is_valid_password};
use crate::modules::account::{Account, Role, RoleProfile};
use crate::modules::storage::keys::{account_key, CURRENT_USER_KEY};
use crate::modules::storage::{get_json, set_json, KeyValueStore};
use crate::modules::utils::logging::log_auth_event;
use crate::{APPLY_LATENCY_MS, LOGIN_LATENCY_MS, REGISTER_LATENCY_MS, ROLE_SELECT_DELAY_MS};

/// Simulated network latency for operations that model a round trip. Purely
/// cosmetic; correctness never depends on these durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub role_select: Duration,
    pub login: Duration,
    pub register: Duration,
    pub apply: Duration,
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        SimulatedLatency {
            role_select: Duration::from_millis(ROLE_SELECT_DELAY_MS),
            login: Duration::from_millis(LOGIN_LATENCY_MS),
            register: Duration::from_millis(REGISTER_LATENCY_MS),
            apply: Duration::from_millis(APPLY_LATENCY_MS),
        }
    }
}

impl SimulatedLatency {
    /// No delays at all, for tests.
    pub fn none() -> Self {
        SimulatedLatency {
            role_select: Duration::ZERO,
            login: Duration::ZERO,
            register: Duration::ZERO,
            apply: Duration::ZERO,
        }
    }

    /// Add up to 250ms of random jitter to each delay, so repeated
    /// operations feel like real round trips.
    pub fn jittered(self) -> Self {
        let mut rng = rand::thread_rng();
        let mut jitter = |base: Duration| {
            if base.is_zero() {
                base
            } else {
                base + Duration::from_millis(rng.gen_range(0..=250))
            }
        };
        SimulatedLatency {
            role_select: jitter(self.role_select),
            login: jitter(self.login),
            register: jitter(self.register),
            apply: jitter(self.apply),
        }
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        sleep(duration).await;
    }
}

/// An already-authenticated identity handed over by an external provider.
/// Trusted as-is; no independent verification happens here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

/// Owns the authentication step state machine, credential validation,
/// account storage/lookup, and current-session persistence. UI handlers hold
/// a reference to one instance; there is no ambient global state.
pub struct AuthSessionManager<S: KeyValueStore> {
    store: S,
    flow: AuthFlow,
    session: Option<Account>,
    latency: SimulatedLatency,
}

impl<S: KeyValueStore> AuthSessionManager<S> {
    pub fn new(store: S) -> Self {
        Self::with_latency(store, SimulatedLatency::default())
    }

    pub fn with_latency(store: S, latency: SimulatedLatency) -> Self {
        AuthSessionManager {
            store,
            flow: AuthFlow::new(),
            session: None,
            latency,
        }
    }

    pub fn flow(&self) -> &AuthFlow {
        &self.flow
    }

    pub fn current_user(&self) -> Option<&Account> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub(crate) fn session_account(&self) -> Result<Account, AuthError> {
        self.session.clone().ok_or(AuthError::NotAuthenticated)
    }

    /// Simulated submission latency, shared with the job-tracking operations.
    pub(crate) async fn simulate_apply_latency(&self) {
        pause(self.latency.apply).await;
    }

    /// Replace the in-memory session and mirror it to the session key.
    pub(crate) fn set_session(&mut self, account: Account) -> Result<(), AuthError> {
        set_json(&mut self.store, CURRENT_USER_KEY, &account)?;
        self.session = Some(account);
        Ok(())
    }

    /// Reset the flow to role selection, e.g. when the auth UI is opened or
    /// dismissed.
    pub fn reset_flow(&mut self) {
        self.flow.reset();
    }

    /// Record the chosen role and advance to credential entry after a short
    /// cosmetic delay.
    pub async fn select_role(&mut self, role: Role) {
        pause(self.latency.role_select).await;
        self.flow.select_role(role);
    }

    /// Return from credential entry to role selection.
    pub fn go_back(&mut self) {
        self.flow.back();
    }

    /// Log in with email and password against the selected role. Validation
    /// happens up front; the lookup itself sits behind simulated latency.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Account, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }
        if !is_valid_email(email) {
            return Err(AuthError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }

        pause(self.latency.login).await;

        let stored: Option<Account> = get_json(&self.store, &account_key(email))?;
        let account = match stored {
            Some(account) => account,
            None => {
                log_auth_event("login", email, false, Some("unknown account"));
                return Err(AuthError::NotFound(
                    "No account found. Please register first.".to_string(),
                ));
            }
        };

        let password_matches = account.password.as_deref() == Some(password);
        let role_matches = account.role() == self.flow.selected_role();
        if !password_matches || !role_matches {
            log_auth_event("login", email, false, Some("credential or role mismatch"));
            return Err(AuthError::InvalidCredentials(
                "Invalid email or password".to_string(),
            ));
        }

        self.set_session(account.clone())?;
        self.flow.complete();
        log_auth_event("login", email, true, None);
        Ok(account)
    }

    /// Register a new account under the selected role. All validation and
    /// the duplicate check happen before the simulated latency; nothing is
    /// written when any check fails.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role_field_value: &str,
    ) -> Result<Account, AuthError> {
        let name = name.trim();
        let email = email.trim();
        let role_field_value = role_field_value.trim();

        if name.is_empty() || email.is_empty() || password.is_empty() || role_field_value.is_empty()
        {
            return Err(AuthError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }
        if !is_valid_email(email) {
            return Err(AuthError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }
        if !is_valid_password(password) {
            return Err(AuthError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        if self.store.contains(&account_key(email)) {
            log_auth_event("register", email, false, Some("duplicate email"));
            return Err(AuthError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        pause(self.latency.register).await;

        let profile = RoleProfile::new(self.flow.selected_role(), role_field_value.to_string());
        let account = Account::new_registration(
            name.to_string(),
            email.to_string(),
            password.to_string(),
            profile,
        );

        set_json(&mut self.store, &account_key(email), &account)?;
        self.set_session(account.clone())?;
        self.flow.complete();
        log_auth_event("register", email, true, None);
        Ok(account)
    }

    /// Sign in with an identity already authenticated by an external
    /// provider, under the currently selected role. If no durable account
    /// exists for the email, one is created and persisted so the session can
    /// always be restored later.
    pub fn sign_in_with_google(
        &mut self,
        identity: ExternalIdentity,
    ) -> Result<Account, AuthError> {
        let existing: Option<Account> = get_json(&self.store, &account_key(&identity.email))?;
        let account = match existing {
            Some(account) => account,
            None => {
                let profile =
                    RoleProfile::new(self.flow.selected_role(), String::new());
                let account = Account::new_external(
                    &identity.id,
                    identity.name.clone(),
                    identity.email.clone(),
                    identity.avatar_url.clone(),
                    profile,
                );
                set_json(&mut self.store, &account_key(&identity.email), &account)?;
                account
            }
        };

        self.set_session(account.clone())?;
        self.flow.complete();
        log_auth_event("google_sign_in", &identity.email, true, None);
        Ok(account)
    }

    /// Restore the session from the persistence store at startup. An absent
    /// key yields no session; a malformed value is dropped from the store
    /// and also yields no session.
    pub fn restore_session(&mut self) -> Option<Account> {
        match get_json::<S, Account>(&self.store, CURRENT_USER_KEY) {
            Ok(Some(account)) => {
                self.session = Some(account.clone());
                Some(account)
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("Dropping malformed session record: {}", e);
                if let Err(e) = self.store.remove(CURRENT_USER_KEY) {
                    log::warn!("Failed to remove malformed session record: {}", e);
                }
                None
            }
        }
    }

    /// Clear the current session and its persistence key. Idempotent; the
    /// user confirmation lives in the UI, not here.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        if let Some(account) = self.session.take() {
            log_auth_event("logout", &account.email, true, None);
        }
        self.store.remove(CURRENT_USER_KEY)?;
        self.flow.reset();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::account::AuthProvider;
    use crate::modules::auth::flow::AuthStep;
    use crate::modules::storage::MemoryStore;

    fn test_manager() -> AuthSessionManager<MemoryStore> {
        AuthSessionManager::with_latency(MemoryStore::new(), SimulatedLatency::none())
    }

    async fn register_ana(manager: &mut AuthSessionManager<MemoryStore>) -> Account {
        manager.select_role(Role::Student).await;
        manager
            .register("Ana", "ana@x.com", "secret1", "Stanford")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_then_login_roundtrip() {
        let mut manager = test_manager();
        let registered = register_ana(&mut manager).await;

        assert_eq!(manager.flow().step(), AuthStep::Success);
        assert_eq!(
            registered.profile,
            RoleProfile::Student {
                university: "Stanford".to_string()
            }
        );
        // Stored under the per-email key
        assert!(manager.store().contains("user_ana@x.com"));

        // Fresh flow, same credentials
        manager.logout().unwrap();
        manager.select_role(Role::Student).await;
        let logged_in = manager.login("ana@x.com", "secret1").await.unwrap();

        assert_eq!(logged_in, registered);
        assert_eq!(manager.current_user(), Some(&registered));
        assert_eq!(manager.flow().step(), AuthStep::Success);
        assert!(manager.store().contains(CURRENT_USER_KEY));
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts_without_overwrite() {
        let mut manager = test_manager();
        register_ana(&mut manager).await;
        let original = manager.store().get("user_ana@x.com").unwrap();

        manager.reset_flow();
        manager.select_role(Role::Employee).await;
        let result = manager
            .register("Other Ana", "ana@x.com", "different", "BigCorp")
            .await;

        assert!(matches!(result, Err(AuthError::Conflict(_))));
        // Stored record untouched
        assert_eq!(manager.store().get("user_ana@x.com").unwrap(), original);
    }

    #[tokio::test]
    async fn test_login_with_wrong_role_fails() {
        let mut manager = test_manager();
        register_ana(&mut manager).await;
        manager.logout().unwrap();

        manager.select_role(Role::Employee).await;
        let result = manager.login("ana@x.com", "secret1").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_fails() {
        let mut manager = test_manager();
        register_ana(&mut manager).await;
        manager.logout().unwrap();

        manager.select_role(Role::Student).await;
        let result = manager.login("ana@x.com", "wrong!!").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_not_found() {
        let mut manager = test_manager();
        manager.select_role(Role::Student).await;
        let result = manager.login("nobody@x.com", "secret1").await;
        assert!(matches!(result, Err(AuthError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_login_validation_failures() {
        let mut manager = test_manager();
        manager.select_role(Role::Student).await;

        let result = manager.login("", "secret1").await;
        assert!(matches!(result, Err(AuthError::Validation(_))));

        let result = manager.login("ana@x.com", "").await;
        assert!(matches!(result, Err(AuthError::Validation(_))));

        let result = manager.login("a b@c.com", "secret1").await;
        assert!(matches!(result, Err(AuthError::Validation(_))));

        let result = manager.login("a@b", "secret1").await;
        assert!(matches!(result, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_validation_failures() {
        let mut manager = test_manager();
        manager.select_role(Role::Student).await;

        // Empty name
        let result = manager.register("", "ana@x.com", "secret1", "Stanford").await;
        assert!(matches!(result, Err(AuthError::Validation(_))));

        // Malformed email
        let result = manager.register("Ana", "a b@c.com", "secret1", "Stanford").await;
        assert!(matches!(result, Err(AuthError::Validation(_))));

        // Password shorter than 6 characters
        let result = manager.register("Ana", "ana@x.com", "short", "Stanford").await;
        assert!(matches!(result, Err(AuthError::Validation(_))));

        // Missing role-specific field
        let result = manager.register("Ana", "ana@x.com", "secret1", "").await;
        assert!(matches!(result, Err(AuthError::Validation(_))));

        // Nothing persisted along the way
        assert!(!manager.store().contains("user_ana@x.com"));
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_restore_yields_none() {
        let mut manager = test_manager();
        register_ana(&mut manager).await;
        assert!(manager.store().contains(CURRENT_USER_KEY));

        manager.logout().unwrap();
        assert!(!manager.is_authenticated());
        assert!(!manager.store().contains(CURRENT_USER_KEY));
        assert_eq!(manager.flow().step(), AuthStep::RoleSelection);
        assert!(manager.restore_session().is_none());

        // Idempotent
        assert!(manager.logout().is_ok());
    }

    #[tokio::test]
    async fn test_restore_session_roundtrip() {
        let mut manager = test_manager();
        let registered = register_ana(&mut manager).await;

        // A new manager over the same store picks the session back up
        let store = std::mem::take(manager.store_mut());
        let mut restored_manager =
            AuthSessionManager::with_latency(store, SimulatedLatency::none());
        let restored = restored_manager.restore_session().unwrap();

        assert_eq!(restored, registered);
        assert!(restored_manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_restore_session_drops_malformed_record() {
        let mut manager = test_manager();
        manager
            .store_mut()
            .set(CURRENT_USER_KEY, "{not valid json".to_string())
            .unwrap();

        assert!(manager.restore_session().is_none());
        assert!(!manager.is_authenticated());
        // The malformed record is gone
        assert!(!manager.store().contains(CURRENT_USER_KEY));
    }

    #[tokio::test]
    async fn test_google_sign_in_creates_durable_account() {
        let mut manager = test_manager();
        manager.select_role(Role::Employee).await;

        let identity = ExternalIdentity {
            id: "10923".to_string(),
            name: "Greta".to_string(),
            email: "greta@g.com".to_string(),
            avatar_url: Some("https://example.com/pic.jpg".to_string()),
        };
        let account = manager.sign_in_with_google(identity).unwrap();
        assert_eq!(account.id, "google_10923");
        assert_eq!(account.auth_provider, AuthProvider::Google);
        assert_eq!(account.role(), Role::Employee);
        assert!(account.password.is_none());
        assert_eq!(manager.flow().step(), AuthStep::Success);

        // Durable record exists, so the session survives a restart
        assert!(manager.store().contains("user_greta@g.com"));
        let store = std::mem::take(manager.store_mut());
        let mut restarted = AuthSessionManager::with_latency(store, SimulatedLatency::none());
        assert_eq!(restarted.restore_session().unwrap(), account);
    }

    #[tokio::test]
    async fn test_google_sign_in_reuses_existing_account() {
        let mut manager = test_manager();
        let registered = register_ana(&mut manager).await;
        manager.logout().unwrap();

        manager.select_role(Role::Student).await;
        let identity = ExternalIdentity {
            id: "777".to_string(),
            name: "Ana G".to_string(),
            email: "ana@x.com".to_string(),
            avatar_url: None,
        };
        let account = manager.sign_in_with_google(identity).unwrap();

        // The durable account wins over the synthesized one
        assert_eq!(account, registered);
        assert_eq!(manager.current_user(), Some(&registered));
    }
}
