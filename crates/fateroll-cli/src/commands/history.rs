//! History, decision set and reset commands.

use anyhow::{Result, bail};
use colored::Colorize;
use fateroll_core::{HistoryListing, HistoryView};

use super::Session;
use super::options;
use super::utils::{print_decision_set, print_record, resolve_decision_set};

pub fn show(session: &Session, view: HistoryView) {
    let engine = &session.engine;
    println!("{}", format!("=== History: {} ===", view).bold());

    let listing = engine.listing(view);
    if listing.is_empty() {
        println!("{}", "Nothing here yet.".dimmed());
        return;
    }

    match listing {
        HistoryListing::Records(records) => {
            for record in records {
                print_record(record, engine.history().is_favorite(record.id));
            }
        }
        HistoryListing::DecisionSets(sets) => {
            for set in sets {
                print_decision_set(set);
            }
        }
    }
}

pub fn title(session: &mut Session, record: u64, title: &str) -> Result<()> {
    if !session.engine.set_title(record, title)? {
        bail!("No history record with id {}", record);
    }
    println!("{} {}", "Titled".green(), title);
    Ok(())
}

pub fn favorite(session: &mut Session, record: u64) -> Result<()> {
    if session.engine.history().get(record).is_none() {
        bail!("No history record with id {}", record);
    }
    if session.engine.toggle_favorite(record)? {
        println!("{} {}", "★ Favorited".yellow(), record);
    } else {
        println!("{} {}", "Unfavorited".dimmed(), record);
    }
    Ok(())
}

pub fn favorite_set(session: &mut Session, selector: &str) -> Result<()> {
    let fingerprint = resolve_decision_set(&session.engine, selector)?;
    if session.engine.toggle_decision_set_favorite(&fingerprint)? {
        println!("{} decision set {}", "★ Favorited".yellow(), selector);
    } else {
        println!("{} decision set {}", "Unfavorited".dimmed(), selector);
    }
    Ok(())
}

pub fn forget(session: &mut Session, record: u64) -> Result<()> {
    let removed = session.engine.remove_record(record)?;
    println!("{} {}", "Deleted".yellow(), removed.title());
    Ok(())
}

pub fn forget_set(session: &mut Session, selector: &str) -> Result<()> {
    let fingerprint = resolve_decision_set(&session.engine, selector)?;
    let removed = session.engine.remove_decision_set(&fingerprint)?;
    println!(
        "{} decision set {} and its history",
        "Deleted".yellow(),
        removed.id
    );
    Ok(())
}

pub fn reuse(session: &mut Session, record: u64) -> Result<()> {
    session.engine.reuse_record(record)?;
    options::list(session);
    Ok(())
}

pub fn reuse_set(session: &mut Session, selector: &str) -> Result<()> {
    let fingerprint = resolve_decision_set(&session.engine, selector)?;
    session.engine.reuse_decision_set(&fingerprint)?;
    options::list(session);
    Ok(())
}

pub fn clear(session: &mut Session, yes: bool) -> Result<()> {
    if !yes {
        bail!("This deletes all history and decision sets; pass --yes to confirm");
    }
    session.engine.clear_history()?;
    println!("{}", "History cleared".yellow());
    Ok(())
}

pub fn reset(session: &mut Session, yes: bool) -> Result<()> {
    if !yes {
        bail!("This deletes all data including options; pass --yes to confirm");
    }
    session.engine.reset_all()?;
    println!("{}", "All data reset".yellow());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::draw;
    use fateroll_core::AppConfig;
    use tempfile::TempDir;

    async fn session_with_draws(draws: usize) -> Session {
        let mut session = Session::in_memory(AppConfig::default());
        session.engine.add_option("Pizza", "🍕").unwrap();
        session.engine.add_option("Salad", "🥗").unwrap();
        for _ in 0..draws {
            draw::roll(&mut session, true).await.unwrap();
        }
        session
    }

    #[tokio::test]
    async fn test_title_and_favorite() {
        let mut session = session_with_draws(1).await;
        let id = session.engine.history().records()[0].id;

        title(&mut session, id, "Lunch").unwrap();
        favorite(&mut session, id).unwrap();
        assert!(title(&mut session, id + 1, "nope").is_err());
        assert!(favorite(&mut session, id + 1).is_err());

        assert_eq!(session.engine.history().records()[0].title(), "Lunch");
        assert_eq!(session.engine.listing(HistoryView::Favorite).len(), 1);
    }

    #[tokio::test]
    async fn test_forget_set_by_id() {
        let mut session = session_with_draws(2).await;
        let set_id = session.engine.registry().sets()[0].id;

        forget_set(&mut session, &set_id.to_string()).unwrap();

        assert!(session.engine.registry().is_empty());
        assert!(session.engine.history().is_empty());
    }

    #[tokio::test]
    async fn test_clear_and_reset_need_confirmation() {
        let mut session = session_with_draws(1).await;

        assert!(clear(&mut session, false).is_err());
        assert_eq!(session.engine.history().len(), 1);
        clear(&mut session, true).unwrap();
        assert!(session.engine.history().is_empty());

        assert!(reset(&mut session, false).is_err());
        reset(&mut session, true).unwrap();
        assert!(session.engine.options().is_empty());
    }

    #[tokio::test]
    async fn test_reuse_set_restores_options() {
        let mut session = session_with_draws(1).await;
        let fingerprint = session.engine.registry().sets()[0].fingerprint.clone();
        let id = session.engine.options()[0].id.clone();
        session.engine.remove_option(&id).unwrap();

        reuse_set(&mut session, &fingerprint).unwrap();
        assert_eq!(session.engine.options().len(), 2);
    }

    #[tokio::test]
    async fn test_favorite_set_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let open = || {
            Session::open_with(Some(temp_dir.path().to_path_buf()), AppConfig::default()).unwrap()
        };
        let mut session = open();
        session.engine.add_option("Pizza", "🍕").unwrap();
        draw::roll(&mut session, true).await.unwrap();
        let set_id = session.engine.registry().sets()[0].id;

        favorite_set(&mut session, &set_id.to_string()).unwrap();
        assert!(favorite_set(&mut session, "no-such-set").is_err());

        let mut session = open();
        assert!(session.engine.registry().sets()[0].is_favorite);

        favorite_set(&mut session, &set_id.to_string()).unwrap();
        assert!(!session.engine.registry().sets()[0].is_favorite);
    }
}
