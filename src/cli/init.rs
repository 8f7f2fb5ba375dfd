use std::path::Path;

use crate::error::{Result, YearendError};
use crate::settings::{save_settings, Settings};

pub fn run(config: &Path) -> Result<()> {
    if config.exists() {
        return Err(YearendError::Settings(format!(
            "{} already exists; remove it first to start over",
            config.display()
        )));
    }
    save_settings(&Settings::default(), config)?;
    println!("Wrote {}", config.display());
    println!("Edit the file names, date formats and category_mapping, then run `yearend import`.");
    Ok(())
}
