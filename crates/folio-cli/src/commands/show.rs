use anyhow::{anyhow, Result};
use chrono::Datelike;

use folio_core::{content::NAV_ITEMS, AppConfig, ContentStore};
use folio_tui::page::PageLayout;

/// Plain-text rendering is capped so long paragraphs stay readable
const MAX_WIDTH: u16 = 100;

pub fn run(config: &AppConfig, section: Option<&str>) -> Result<()> {
    let portfolio = ContentStore::load(config)?;

    let filter = match section {
        Some(id) => Some(
            NAV_ITEMS
                .iter()
                .position(|(item, _)| *item == id)
                .ok_or_else(|| {
                    let known: Vec<&str> = NAV_ITEMS.iter().map(|(item, _)| *item).collect();
                    anyhow!("Unknown section '{}'. Expected one of: {}", id, known.join(", "))
                })?,
        ),
        None => None,
    };

    let width = crossterm::terminal::size()
        .map(|(w, _)| w)
        .unwrap_or(80)
        .min(MAX_WIDTH);
    // No screen to fill, so the hero takes only its content rows
    let layout = PageLayout::build(&portfolio, width, 0, chrono::Local::now().year());

    let mut last_blank = true;
    for line in layout.lines() {
        if filter.is_some() && line.section != filter {
            continue;
        }
        if line.is_blank() {
            if !last_blank {
                println!();
            }
            last_blank = true;
            continue;
        }
        println!("{}{}", " ".repeat(line.indent as usize), line.text());
        last_blank = false;
    }

    Ok(())
}
