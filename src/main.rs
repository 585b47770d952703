use clap::{Arg, Command};
use log::info;

use jobconnect::auth::user_interface::main_auth_flow;
use jobconnect::auth::{AuthSessionManager, SimulatedLatency};
use jobconnect::jobs::user_interface::{handle_authenticated_session, SessionOutcome};
use jobconnect::storage::FileStore;
use jobconnect::utils::logging::initialize_logging;
use jobconnect::STORE_FILE;

#[tokio::main]
async fn main() {
    // Define the command-line interface using clap
    let matches = Command::new("jobconnect")
        .about("A local-first job board with accounts, saved jobs, and applications")
        .arg(
            Arg::new("store")
                .long("store")
                .help("Path of the persistence store file")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("fast")
                .long("fast")
                .help("Skip the simulated network delays")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    if let Err(e) = initialize_logging() {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    let store_path = matches
        .get_one::<String>("store")
        .map(String::as_str)
        .unwrap_or(STORE_FILE);
    let store = match FileStore::open(store_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open store {}: {}", store_path, e);
            std::process::exit(1);
        }
    };

    let latency = if matches.get_flag("fast") {
        SimulatedLatency::none()
    } else {
        SimulatedLatency::default().jittered()
    };
    let mut manager = AuthSessionManager::with_latency(store, latency);

    // Pick up the previous session, if any
    if let Some(account) = manager.restore_session() {
        info!("Session restored for {}", account.email);
        println!("Session restored. Welcome back, {}!", account.name);
    }

    loop {
        if !manager.is_authenticated() {
            match main_auth_flow(&mut manager).await {
                Ok(Some(_)) => {}
                Ok(None) => break,
                Err(e) => {
                    eprintln!("Input error: {}", e);
                    break;
                }
            }
        }

        match handle_authenticated_session(&mut manager).await {
            Ok(SessionOutcome::LoggedOut) => continue,
            Ok(SessionOutcome::Exit) => break,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    println!("Goodbye!");
}
