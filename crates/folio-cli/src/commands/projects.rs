use anyhow::Result;

use folio_core::{AppConfig, ContentStore};

pub fn run(config: &AppConfig, featured_only: bool) -> Result<()> {
    let portfolio = ContentStore::load(config)?;

    let mut projects = portfolio.featured_projects();
    if !featured_only {
        projects.extend(portfolio.other_projects());
    }

    if projects.is_empty() {
        println!("No projects yet.");
        return Ok(());
    }

    println!("Projects ({}):\n", projects.len());

    for project in &projects {
        let star = if project.featured { " ★" } else { "" };
        println!("  {}{}", project.title, star);
        println!("    {}", project.description);
        if !project.tags.is_empty() {
            println!("    Tags: {}", project.tags.join(", "));
        }
        if let Some(url) = project.github_link() {
            println!("    Code: {}", url);
        }
        if let Some(url) = project.live_link() {
            println!("    Live: {}", url);
        }
        println!();
    }

    Ok(())
}
