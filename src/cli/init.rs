//! `declsynth init`

use declsynth::config::CONFIG_FILE;
use declsynth::{Config, Error, Result};
use std::process::ExitCode;

pub fn cmd_init() -> Result<ExitCode> {
    let path = std::env::current_dir()?.join(CONFIG_FILE);
    if path.exists() {
        return Err(Error::Config(format!(
            "{} already exists, not overwriting",
            path.display()
        )));
    }

    std::fs::write(&path, Config::default().to_yaml()?)?;
    println!("Created {}", path.display());
    Ok(ExitCode::SUCCESS)
}
