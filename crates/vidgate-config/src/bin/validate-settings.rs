//! Settings validation CLI tool
//!
//! Validates a vidgate settings file and reports any errors.

use std::path::PathBuf;
use std::process::ExitCode;
use vidgate_util::default_settings_path;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let settings_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_settings_path();
            eprintln!("Usage: validate-settings [settings-file]");
            eprintln!();
            eprintln!("Validates a vidgate settings file.");
            eprintln!();
            eprintln!("If no path is provided, uses: {}", default_path.display());
            return ExitCode::from(2);
        }
    };

    if !settings_path.exists() {
        eprintln!(
            "Error: Settings file not found: {}",
            settings_path.display()
        );
        return ExitCode::from(1);
    }

    match vidgate_config::load_settings(&settings_path) {
        Ok(settings) => {
            println!("✓ Settings are valid");
            println!();
            println!("Summary:");
            println!(
                "  Settings version: {}",
                vidgate_config::CURRENT_SETTINGS_VERSION
            );
            println!("  Daily limit: {} minutes", settings.daily_limit_minutes);
            println!("  Grid size: {}", settings.grid_size);
            println!("  Data dir: {}", settings.service.data_dir.display());

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Settings validation failed");
            eprintln!();
            match &e {
                vidgate_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                vidgate_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                vidgate_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                vidgate_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported settings version: {} (expected {})",
                        ver,
                        vidgate_config::CURRENT_SETTINGS_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
