//! Configuration display command.

use crate::cli::icons::{dim_arrow, success, warn};
use crate::config::Settings;

/// Print the effective settings with secrets masked.
pub fn cmd_config(settings: &Settings) -> anyhow::Result<()> {
    match &settings.source_path {
        Some(path) => eprintln!("{} Config file: {}", dim_arrow(), path.display()),
        None => eprintln!("{} No config file found, using defaults", dim_arrow()),
    }

    println!("{}", settings.to_masked_toml()?);

    let missing = settings.missing_secrets();
    if missing.is_empty() {
        eprintln!("{} All required settings present", success());
    } else {
        for name in missing {
            eprintln!("{} {} is not set", warn(), name);
        }
    }
    Ok(())
}
