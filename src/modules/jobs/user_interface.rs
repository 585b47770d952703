use std::io;

use clap::{Arg, Command};

use super::catalog::{find_job, search_jobs, JobListing, JOB_CATALOG};
use super::tracker::SaveToggle;
use crate::modules::account::{PersonalInfo, ProfileVisibility};
use crate::modules::auth::AuthSessionManager;
use crate::modules::storage::KeyValueStore;
use crate::modules::utils::io::{prompt, prompt_with_confirmation, read_line};
use crate::modules::utils::time::format_date;

/// How the authenticated session ended.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    LoggedOut,
    Exit,
}

fn show_help_information() {
    println!("\nAvailable commands:");
    println!("  jobs                 List all job listings");
    println!("  search <query>       Search listings by title, company, or skill");
    println!("  apply <job-id>       Apply to a job");
    println!("  save <job-id>        Save a job (or remove it if already saved)");
    println!("  saved                Show your saved jobs");
    println!("  unsave <id>          Remove a saved-job entry by its record id");
    println!("  applications         Show your applications");
    println!("  withdraw <id>        Withdraw an application by its record id");
    println!("  profile              Show your profile overview");
    println!("  settings [tab]       Edit personal/privacy/notifications settings");
    println!("  logout               Sign out");
    println!("  exit                 Quit without signing out");
}

fn print_listing(job: &JobListing) {
    println!("\n[{}] {} - {}", job.id, job.title, job.company);
    println!("    {} | {} | {} | posted {}", job.location, job.job_type, job.salary, job.posted);
    println!("    {}", job.description);
    println!("    Skills: {}", job.skills.join(", "));
}

/// Command loop for a signed-in account. Stays here until logout or exit.
pub async fn handle_authenticated_session<S: KeyValueStore>(
    manager: &mut AuthSessionManager<S>,
) -> io::Result<SessionOutcome> {
    if let Some(account) = manager.current_user() {
        println!(
            "\nWelcome, {}! Type 'help' to see available commands.",
            account.name
        );
    }

    loop {
        println!("\nEnter command (or 'help' for available commands):");
        let input = read_line()?;
        let args = input.split_whitespace().collect::<Vec<_>>();
        if args.is_empty() {
            continue;
        }

        // Handle help before handing over to clap
        if args[0].to_lowercase() == "help" {
            show_help_information();
            continue;
        }

        // Create clap command matcher
        let matcher = Command::new("jobconnect")
            .about("Job board commands")
            .no_binary_name(true)
            .subcommand_required(true)
            .subcommand(Command::new("jobs").about("List all job listings"))
            .subcommand(
                Command::new("search").about("Search job listings").arg(
                    Arg::new("query")
                        .help("Search terms matched against title, company, and skills")
                        .num_args(0..),
                ),
            )
            .subcommand(
                Command::new("apply").about("Apply to a job").arg(
                    Arg::new("job-id")
                        .help("The job listing id")
                        .required(true)
                        .value_parser(clap::value_parser!(u32)),
                ),
            )
            .subcommand(
                Command::new("save").about("Toggle a job's saved status").arg(
                    Arg::new("job-id")
                        .help("The job listing id")
                        .required(true)
                        .value_parser(clap::value_parser!(u32)),
                ),
            )
            .subcommand(Command::new("saved").about("Show saved jobs"))
            .subcommand(
                Command::new("unsave").about("Remove a saved-job entry").arg(
                    Arg::new("id")
                        .help("The saved-job record id")
                        .required(true)
                        .value_parser(clap::value_parser!(i64)),
                ),
            )
            .subcommand(Command::new("applications").about("Show applications"))
            .subcommand(
                Command::new("withdraw").about("Withdraw an application").arg(
                    Arg::new("id")
                        .help("The application record id")
                        .required(true)
                        .value_parser(clap::value_parser!(i64)),
                ),
            )
            .subcommand(Command::new("profile").about("Show profile overview"))
            .subcommand(
                Command::new("settings").about("Edit profile settings").arg(
                    Arg::new("tab")
                        .help("Which settings tab to open")
                        .value_parser(["personal", "privacy", "notifications"]),
                ),
            )
            .subcommand(Command::new("logout").about("Sign out"))
            .subcommand(Command::new("exit").about("Quit without signing out"));

        let matches = match matcher.try_get_matches_from(&args) {
            Ok(matches) => matches,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match matches.subcommand() {
            Some(("jobs", _)) => {
                for job in JOB_CATALOG.iter() {
                    print_listing(job);
                }
            }
            Some(("search", sub)) => {
                let query = sub
                    .get_many::<String>("query")
                    .map(|values| values.cloned().collect::<Vec<_>>().join(" "))
                    .unwrap_or_default();
                let results = search_jobs(&query);
                if results.is_empty() {
                    println!("\nNo jobs found. Try different keywords.");
                } else {
                    for job in results {
                        print_listing(job);
                    }
                }
            }
            Some(("apply", sub)) => {
                let job_id = *sub.get_one::<u32>("job-id").unwrap_or(&0);
                println!("Applying...");
                match manager.apply_to_job(job_id).await {
                    Ok(application) => println!(
                        "Application submitted for \"{}\"! We'll contact you soon.",
                        application.job_title
                    ),
                    Err(e) => println!("{}", e),
                }
            }
            Some(("save", sub)) => {
                let job_id = *sub.get_one::<u32>("job-id").unwrap_or(&0);
                match manager.toggle_saved_job(job_id) {
                    Ok(SaveToggle::Saved(entry)) => {
                        println!("{} saved successfully", entry.title)
                    }
                    Ok(SaveToggle::Removed) => {
                        let title = find_job(job_id).map(|j| j.title).unwrap_or("Job");
                        println!("{} removed from saved jobs", title)
                    }
                    Err(e) => println!("{}", e),
                }
            }
            Some(("saved", _)) => show_saved_jobs(manager),
            Some(("unsave", sub)) => {
                let id = *sub.get_one::<i64>("id").unwrap_or(&0);
                match manager.remove_saved_job(id) {
                    Ok(()) => println!("Job removed from saved list"),
                    Err(e) => println!("{}", e),
                }
            }
            Some(("applications", _)) => show_applications(manager),
            Some(("withdraw", sub)) => {
                let id = *sub.get_one::<i64>("id").unwrap_or(&0);
                if prompt_with_confirmation(
                    "This removes the application from your list.",
                    "Withdraw this application?",
                )? {
                    match manager.withdraw_application(id) {
                        Ok(()) => println!("Application withdrawn successfully"),
                        Err(e) => println!("{}", e),
                    }
                }
            }
            Some(("profile", _)) => show_profile(manager),
            Some(("settings", sub)) => {
                let tab = sub
                    .get_one::<String>("tab")
                    .map(|s| s.as_str())
                    .unwrap_or("personal");
                handle_settings(manager, tab)?;
            }
            Some(("logout", _)) => {
                if prompt_with_confirmation("", "Are you sure you want to logout?")? {
                    if let Err(e) = manager.logout() {
                        println!("{}", e);
                        continue;
                    }
                    println!("Logged out successfully");
                    return Ok(SessionOutcome::LoggedOut);
                }
            }
            Some(("exit", _)) => return Ok(SessionOutcome::Exit),
            _ => show_help_information(),
        }
    }
}

fn show_applications<S: KeyValueStore>(manager: &AuthSessionManager<S>) {
    match manager.applications() {
        Ok(applications) if applications.is_empty() => {
            println!("\nNo applications yet. Start applying to track your progress!");
        }
        Ok(applications) => {
            println!("\nMy Applications ({})", applications.len());
            for app in applications {
                println!(
                    "  [{}] {} at {} - {} - applied {} - {}",
                    app.id,
                    app.job_title,
                    app.company,
                    app.salary,
                    format_date(&app.applied_at),
                    app.status
                );
            }
        }
        Err(e) => println!("{}", e),
    }
}

fn show_saved_jobs<S: KeyValueStore>(manager: &AuthSessionManager<S>) {
    match manager.saved_jobs() {
        Ok(saved) if saved.is_empty() => {
            println!("\nNo saved jobs yet. Use 'save <job-id>' to bookmark listings!");
        }
        Ok(saved) => {
            println!("\nSaved Jobs ({})", saved.len());
            for entry in saved {
                println!(
                    "  [{}] {} at {} - {} - {} - saved {}",
                    entry.id,
                    entry.title,
                    entry.company,
                    entry.salary,
                    entry.location,
                    format_date(&entry.saved_at)
                );
            }
        }
        Err(e) => println!("{}", e),
    }
}

fn show_profile<S: KeyValueStore>(manager: &AuthSessionManager<S>) {
    let account = match manager.current_user() {
        Some(account) => account,
        None => return,
    };
    let (applications, saved_jobs) = manager.activity_counts().unwrap_or((0, 0));

    let or_missing = |value: &str| {
        if value.is_empty() {
            "Not specified".to_string()
        } else {
            value.to_string()
        }
    };

    println!("\n=== Profile Overview ===");
    println!("Name: {}", account.name);
    println!("Email: {}", account.email);
    println!("Role: {}", account.role());
    println!("{}", account.profile.describe());
    println!("Avatar: {}", account.avatar_url());
    println!("\nActivity");
    println!("  Applications: {}", applications);
    println!("  Saved jobs: {}", saved_jobs);
    println!(
        "  Notifications: {}",
        if account.notifications { "Enabled" } else { "Disabled" }
    );
    println!("\nContact Info");
    println!("  Location: {}", or_missing(&account.location));
    println!("  Phone: {}", or_missing(&account.phone));
    println!("  LinkedIn: {}", or_missing(&account.linkedin));
    println!("  GitHub: {}", or_missing(&account.github));
    println!("\nAbout");
    if account.bio.is_empty() {
        println!("  Add a bio to showcase your story!");
    } else {
        println!("  \"{}\"", account.bio);
    }
}

fn handle_settings<S: KeyValueStore>(
    manager: &mut AuthSessionManager<S>,
    tab: &str,
) -> io::Result<()> {
    match tab {
        "privacy" => handle_privacy_settings(manager),
        "notifications" => handle_notification_settings(manager),
        _ => handle_personal_settings(manager),
    }
}

// Prompt for a field, keeping the current value when the input is empty
fn prompt_or_keep(label: &str, current: &str) -> io::Result<String> {
    let input = prompt(&format!("{} [{}]", label, current))?;
    if input.is_empty() {
        Ok(current.to_string())
    } else {
        Ok(input)
    }
}

fn handle_personal_settings<S: KeyValueStore>(
    manager: &mut AuthSessionManager<S>,
) -> io::Result<()> {
    let account = match manager.current_user() {
        Some(account) => account.clone(),
        None => return Ok(()),
    };

    println!("\n=== Personal Info ===");
    println!("Press Enter to keep the current value.");
    let info = PersonalInfo {
        name: prompt_or_keep("Full Name", &account.name)?,
        phone: prompt_or_keep("Phone", &account.phone)?,
        location: prompt_or_keep("Location", &account.location)?,
        bio: prompt_or_keep("Bio", &account.bio)?,
        linkedin: prompt_or_keep("LinkedIn", &account.linkedin)?,
        github: prompt_or_keep("GitHub", &account.github)?,
    };

    match manager.update_personal_info(info) {
        Ok(_) => println!("Profile updated successfully!"),
        Err(e) => println!("{}", e),
    }
    Ok(())
}

fn handle_privacy_settings<S: KeyValueStore>(
    manager: &mut AuthSessionManager<S>,
) -> io::Result<()> {
    println!("\n=== Privacy ===");
    let visibility = loop {
        let input = prompt("Profile visibility (public/connections/private)")?;
        match input.parse::<ProfileVisibility>() {
            Ok(visibility) => break visibility,
            Err(e) => println!("{}", e),
        }
    };
    let search_indexing =
        prompt_with_confirmation("", "Allow search engines to index your profile?")?;

    match manager.update_privacy_settings(visibility, search_indexing) {
        Ok(_) => println!("Privacy settings updated!"),
        Err(e) => println!("{}", e),
    }
    Ok(())
}

fn handle_notification_settings<S: KeyValueStore>(
    manager: &mut AuthSessionManager<S>,
) -> io::Result<()> {
    println!("\n=== Notifications ===");
    let notify_applications =
        prompt_with_confirmation("", "Get notified about application updates?")?;
    let notify_job_matches = prompt_with_confirmation("", "Receive alerts for new job matches?")?;
    let push_notifications = prompt_with_confirmation("", "Enable push notifications?")?;

    match manager.update_notification_settings(
        notify_applications,
        notify_job_matches,
        push_notifications,
    ) {
        Ok(_) => println!("Notification settings updated!"),
        Err(e) => println!("{}", e),
    }
    Ok(())
}
