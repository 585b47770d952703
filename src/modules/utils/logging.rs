use env_logger::{Builder, WriteStyle};
use log::{error, info, warn, LevelFilter};
use std::fs::OpenOptions;

use crate::LOG_FILE;

/// Initialize the logging system with file output
pub fn initialize_logging() -> Result<(), Box<dyn std::error::Error>> {
    // Create or append to log file with proper permissions
    let file = OpenOptions::new().create(true).append(true).open(LOG_FILE)?;

    // Configure the logging system
    Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp_secs()
        .format_module_path(true)
        .write_style(WriteStyle::Auto)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    info!("Logging system initialized");
    Ok(())
}

/// Helper function to format sensitive data for logging
fn format_sensitive(text: &str) -> String {
    // Count characters, not bytes, so multibyte input stays on char boundaries
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Structured logging for authentication events
pub fn log_auth_event(event_type: &str, email: &str, success: bool, details: Option<&str>) {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    if success {
        info!(
            "Auth event: type={}, user={}, success=true, timestamp={}, details={:?}",
            event_type,
            format_sensitive(email),
            timestamp,
            details
        );
    } else {
        warn!(
            "Auth event: type={}, user={}, success=false, timestamp={}, details={:?}",
            event_type,
            format_sensitive(email),
            timestamp,
            details
        );
    }
}

/// Structured logging for persistence operations
pub fn log_data_operation(
    operation: &str,
    user: &str,
    resource: &str,
    success: bool,
    details: Option<&str>,
) {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    if success {
        info!(
            "Data operation: op={}, user={}, resource={}, success=true, timestamp={}, details={:?}",
            operation,
            format_sensitive(user),
            resource,
            timestamp,
            details
        );
    } else {
        error!(
            "Data operation: op={}, user={}, resource={}, success=false, timestamp={}, details={:?}",
            operation,
            format_sensitive(user),
            resource,
            timestamp,
            details
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_sensitive_data_formatting() {
        assert_eq!(format_sensitive("password"), "pa***rd");
        assert_eq!(format_sensitive("key"), "***");
        assert_eq!(format_sensitive("ana@x.com"), "an***om");
        assert_eq!(format_sensitive(""), "");
    }

    #[test]
    fn test_sensitive_data_formatting_multibyte() {
        assert_eq!(format_sensitive("añ@b.cd"), "añ***cd");
        assert_eq!(format_sensitive("añ@b"), "****");
        assert_eq!(format_sensitive("ñéü"), "***");
    }

    #[test]
    fn test_logging_initialization() {
        // Create temporary log file
        let log_file = NamedTempFile::new().unwrap();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file.path())
            .unwrap();

        let result = Builder::new()
            .filter_level(LevelFilter::Info)
            .format_timestamp_secs()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .try_init();

        // Verify initialization succeeded or logger was already initialized
        assert!(
            result.is_ok()
                || result
                    .unwrap_err()
                    .to_string()
                    .contains("already initialized")
        );
    }
}
