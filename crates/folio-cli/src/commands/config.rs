use anyhow::{bail, Result};

use folio_core::AppConfig;

/// Write a config file holding the default values
pub fn init(force: bool) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() && !force {
        bail!(
            "Config file already exists at {}\nUse --force to overwrite it.",
            path.display()
        );
    }

    AppConfig::default().save()?;

    println!("Wrote {}", path.display());
    println!("Set FOLIO_EMAILJS_TEMPLATE_ID and FOLIO_EMAILJS_PUBLIC_KEY (or [contact] in the file) to enable the contact form.");
    Ok(())
}

pub fn path() -> Result<()> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}
