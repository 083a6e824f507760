use anyhow::Result;

use folio_core::{AppConfig, ContentStore};

pub fn run(config: &AppConfig) -> Result<()> {
    let portfolio = ContentStore::load(config)?;

    for (category, skills) in portfolio.skills_by_category() {
        println!("{} ({} technologies)", category, skills.len());
        let names: Vec<&str> = skills.iter().map(|s| s.name.as_str()).collect();
        println!("  {}\n", names.join(", "));
    }

    Ok(())
}
