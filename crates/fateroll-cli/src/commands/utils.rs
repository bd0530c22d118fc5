//! Lookup and formatting helpers shared by the commands.

use anyhow::{Result, bail};
use colored::Colorize;
use fateroll_core::decision_set::DecisionSet;
use fateroll_core::{DecisionEngine, HistoryRecord, Mode};

/// Resolves an option by 1-based list number, id, or case-insensitive name.
pub fn resolve_option(engine: &DecisionEngine, selector: &str) -> Result<String> {
    let options = engine.options();

    if let Ok(number) = selector.parse::<usize>() {
        if let Some(option) = number.checked_sub(1).and_then(|i| options.get(i)) {
            return Ok(option.id.clone());
        }
    }

    let found = options
        .iter()
        .find(|o| o.id == selector)
        .or_else(|| options.iter().find(|o| o.name.eq_ignore_ascii_case(selector)));
    match found {
        Some(option) => Ok(option.id.clone()),
        None => bail!("No option matches '{}'", selector),
    }
}

/// Resolves a decision set by id or fingerprint, returning its fingerprint.
pub fn resolve_decision_set(engine: &DecisionEngine, selector: &str) -> Result<String> {
    let sets = engine.registry().sets();
    let by_id = selector
        .parse::<u64>()
        .ok()
        .and_then(|id| sets.iter().find(|s| s.id == id));

    match by_id.or_else(|| engine.registry().get(selector)) {
        Some(set) => Ok(set.fingerprint.clone()),
        None => bail!("No decision set matches '{}'", selector),
    }
}

pub fn mode_label(mode: Mode) -> String {
    format!("{} {}", mode.symbol(), mode)
}

pub fn print_record(record: &HistoryRecord, favorite: bool) {
    let star = if favorite { "★".yellow().to_string() } else { " ".to_string() };
    println!(
        "{} {}  {}  {}",
        star,
        record.id.to_string().dimmed(),
        record.title().bold(),
        record.timestamp.format("%Y-%m-%d %H:%M UTC").to_string().dimmed()
    );
    println!(
        "    {} → {}  ({} options)",
        mode_label(record.mode),
        record.result.label().green(),
        record.options.len()
    );
}

pub fn print_decision_set(set: &DecisionSet) {
    let star = if set.is_favorite { "★".yellow().to_string() } else { " ".to_string() };
    let names: Vec<&str> = set.options.iter().map(|o| o.name.as_str()).collect();
    println!(
        "{} {}  used {}×  {}",
        star,
        set.id.to_string().dimmed(),
        set.use_count.to_string().bold(),
        mode_label(set.mode)
    );
    println!("    {}", names.join(", "));
}
