use std::io;

use super::flow::AuthStep;
use super::session::{AuthSessionManager, ExternalIdentity};
use crate::modules::account::{Account, Role};
use crate::modules::storage::KeyValueStore;
use crate::modules::utils::io::read_line;

/// Result of one pass through the credential-entry menu.
enum CredentialChoice {
    Login,
    Register,
    GoogleSignIn,
    Back,
    Exit,
}

/// Function to show the role selection step
fn show_role_options() {
    println!("\n=== Welcome to JobConnect ===");
    println!("Step 1 of 3: choose how you want to sign in");
    println!("1. Student        (internships and entry-level roles)");
    println!("2. Employee       (full-time opportunities)");
    println!("3. Administrator  (manage opportunities)");
    println!("4. Exit");
    println!("\nEnter your choice (1-4):");
}

fn show_credential_options(manager_role: Role) {
    let copy = manager_role.form_copy();
    println!("\n=== {} ===", copy.title);
    println!("{}", copy.subtitle);
    println!("Step 2 of 3: enter your credentials");
    println!("1. Sign in                (or type 'login')");
    println!("2. Create account         (or type 'register')");
    println!("3. Sign in with Google    (or type 'google')");
    println!("4. Back to role selection (or type 'back')");
    println!("5. Exit");
    println!("\nEnter your choice (1-5 or command):");
}

fn read_credential_choice() -> io::Result<Option<CredentialChoice>> {
    let choice = read_line()?;
    let choice = match choice.to_lowercase().as_str() {
        "1" | "login" => CredentialChoice::Login,
        "2" | "register" => CredentialChoice::Register,
        "3" | "google" => CredentialChoice::GoogleSignIn,
        "4" | "back" => CredentialChoice::Back,
        "5" | "exit" | "quit" => CredentialChoice::Exit,
        _ => {
            println!("Invalid choice. Please enter a number (1-5) or command.");
            return Ok(None);
        }
    };
    Ok(Some(choice))
}

/// Main authentication flow: role selection, credential entry, success.
/// Returns the authenticated account, or None when the user exits.
pub async fn main_auth_flow<S: KeyValueStore>(
    manager: &mut AuthSessionManager<S>,
) -> io::Result<Option<Account>> {
    // Opening the flow always starts from role selection
    manager.reset_flow();

    loop {
        match manager.flow().step() {
            AuthStep::RoleSelection => {
                show_role_options();
                let choice = read_line()?;
                let role = match choice.as_str() {
                    "1" => Role::Student,
                    "2" => Role::Employee,
                    "3" => Role::Admin,
                    "4" | "exit" | "quit" => return Ok(None),
                    _ => {
                        println!("Invalid choice. Please enter a number (1-4).");
                        continue;
                    }
                };
                manager.select_role(role).await;
            }
            AuthStep::CredentialEntry => {
                show_credential_options(manager.flow().selected_role());
                let choice = match read_credential_choice()? {
                    Some(choice) => choice,
                    None => continue,
                };
                match choice {
                    CredentialChoice::Login => handle_login(manager).await?,
                    CredentialChoice::Register => handle_registration(manager).await?,
                    CredentialChoice::GoogleSignIn => handle_google_sign_in(manager)?,
                    CredentialChoice::Back => manager.go_back(),
                    CredentialChoice::Exit => return Ok(None),
                }
            }
            AuthStep::Success => {
                // Step 3 of 3: the session is set
                return Ok(manager.current_user().cloned());
            }
        }
    }
}

async fn handle_login<S: KeyValueStore>(manager: &mut AuthSessionManager<S>) -> io::Result<()> {
    println!("\nEmail:");
    let email = read_line()?;
    println!("Password:");
    let password = rpassword::read_password()?;

    println!("Signing in...");
    match manager.login(&email, &password).await {
        Ok(account) => {
            println!("\nWelcome back, {}! We're glad to see you.", account.name);
        }
        Err(e) => {
            println!("\n{}", e);
        }
    }
    Ok(())
}

async fn handle_registration<S: KeyValueStore>(
    manager: &mut AuthSessionManager<S>,
) -> io::Result<()> {
    let field = manager.flow().role_field();

    println!("\nFull name:");
    let name = read_line()?;
    println!("Email:");
    let email = read_line()?;
    println!("Password (min 6 characters):");
    let password = rpassword::read_password()?;
    println!("{} ({}):", field.label, field.placeholder);
    let role_field_value = read_line()?;

    println!("Creating account...");
    match manager
        .register(&name, &email, &password, &role_field_value)
        .await
    {
        Ok(account) => {
            println!(
                "\nWelcome, {}! Your account has been created successfully.",
                account.name
            );
        }
        Err(e) => {
            println!("\n{}", e);
        }
    }
    Ok(())
}

/// There is no real provider in the CLI; the identity is entered by hand and
/// trusted as-is, exactly like a provider callback would be.
fn handle_google_sign_in<S: KeyValueStore>(manager: &mut AuthSessionManager<S>) -> io::Result<()> {
    println!("\nGoogle account id:");
    let id = read_line()?;
    println!("Full name:");
    let name = read_line()?;
    println!("Email:");
    let email = read_line()?;

    let identity = ExternalIdentity {
        id,
        name,
        email,
        avatar_url: None,
    };
    match manager.sign_in_with_google(identity) {
        Ok(account) => {
            println!("\nGoogle Sign-In successful. Welcome, {}!", account.name);
        }
        Err(e) => {
            println!("\n{}", e);
        }
    }
    Ok(())
}
