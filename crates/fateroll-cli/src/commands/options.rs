//! Option and weight commands.

use anyhow::Result;
use colored::Colorize;
use fateroll_core::Mode;

use super::Session;
use super::utils::{mode_label, resolve_option};

pub fn list(session: &Session) {
    let engine = &session.engine;
    println!("{}", format!("=== {} ===", mode_label(engine.mode())).bold());

    if engine.options().is_empty() {
        println!("{}", "No options yet. Add one with `fateroll add <name>`.".dimmed());
        return;
    }

    let suffix = if engine.mode() == Mode::Preference { "" } else { "%" };
    for (index, (option, shown)) in engine
        .options()
        .iter()
        .zip(engine.display_weights())
        .enumerate()
    {
        println!(
            "{:>3}. {:<24} {:>5}{}  {}",
            index + 1,
            option.label(),
            shown,
            suffix,
            option.id.dimmed()
        );
    }
}

pub fn add(session: &mut Session, name: &str, emoji: &str) -> Result<()> {
    let option = session.engine.add_option(name, emoji)?;
    println!("{} {}", "Added".green(), option.label());
    Ok(())
}

pub fn remove(session: &mut Session, selector: &str) -> Result<()> {
    let id = resolve_option(&session.engine, selector)?;
    let removed = session.engine.remove_option(&id)?;
    println!("{} {}", "Removed".yellow(), removed.label());
    Ok(())
}

pub fn rename(session: &mut Session, selector: &str, name: &str) -> Result<()> {
    let id = resolve_option(&session.engine, selector)?;
    session.engine.rename_option(&id, name)?;
    println!("{} {}", "Renamed to".green(), name.trim());
    Ok(())
}

pub fn emoji(session: &mut Session, selector: &str, emoji: &str) -> Result<()> {
    let id = resolve_option(&session.engine, selector)?;
    session.engine.set_emoji(&id, emoji)?;
    list(session);
    Ok(())
}

pub fn weight(session: &mut Session, selector: &str, weight: f64) -> Result<()> {
    let id = resolve_option(&session.engine, selector)?;
    let stored = session.engine.update_weight(&id, weight)?;
    if stored != weight {
        println!("{}", format!("Weight clamped to {}", stored).yellow());
    }
    list(session);
    Ok(())
}

pub fn mode(session: &mut Session, mode: Mode) -> Result<()> {
    session.engine.set_mode(mode)?;
    list(session);
    Ok(())
}

pub fn reroll(session: &mut Session) -> Result<()> {
    session.engine.regenerate_fate_weights()?;
    list(session);
    Ok(())
}
