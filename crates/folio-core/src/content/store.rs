use std::collections::HashSet;
use std::path::Path;

use crate::config::AppConfig;
use crate::{Error, Result};

use super::models::Portfolio;

const BUILTIN_PORTFOLIO: &str = include_str!("../../assets/portfolio.toml");

/// Read-only access to the portfolio content
pub struct ContentStore;

impl ContentStore {
    /// The portfolio shipped with the binary
    pub fn builtin() -> Result<Portfolio> {
        Self::parse(BUILTIN_PORTFOLIO)
    }

    /// Load the configured content file, falling back to the built-in portfolio
    pub fn load(config: &AppConfig) -> Result<Portfolio> {
        match config.content_path() {
            Some(path) => Self::from_file(&path),
            None => Self::builtin(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Portfolio> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Content(format!("cannot read {}: {}", path.display(), e))
        })?;
        tracing::info!("Loading portfolio content from {}", path.display());
        Self::parse(&content)
    }

    /// Parse and validate portfolio TOML
    pub fn parse(content: &str) -> Result<Portfolio> {
        let portfolio: Portfolio = toml::from_str(content)?;
        validate(&portfolio)?;
        Ok(portfolio)
    }
}

fn validate(portfolio: &Portfolio) -> Result<()> {
    if portfolio.personal.name.trim().is_empty() {
        return Err(Error::Content("personal.name must not be empty".to_string()));
    }

    let mut seen = HashSet::new();
    for project in &portfolio.projects {
        if !seen.insert(project.id.as_str()) {
            return Err(Error::Content(format!("duplicate project id '{}'", project.id)));
        }
    }

    for link in &portfolio.social {
        url::Url::parse(&link.url).map_err(|e| {
            Error::Content(format!("social link '{}' has invalid url: {}", link.platform, e))
        })?;
    }

    Ok(())
}
