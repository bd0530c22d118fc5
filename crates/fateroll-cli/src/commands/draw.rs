use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use fateroll_core::{DrawOutcome, FixedDelay, NoDelay, PresentationDelay};

use super::Session;

pub async fn roll(session: &mut Session, no_delay: bool) -> Result<()> {
    let delay: Box<dyn PresentationDelay> = if no_delay {
        Box::new(NoDelay)
    } else {
        Box::new(FixedDelay::new(session.config.presentation_delay()))
    };

    print!("{}", "🎲 Rolling... ".bright_magenta());
    std::io::stdout().flush()?;

    let outcome = session.engine.roll(delay.as_ref()).await?;
    println!();
    print_outcome(session, &outcome);
    Ok(())
}

fn print_outcome(session: &Session, outcome: &DrawOutcome) {
    println!("{}", outcome.message.bold().green());

    let Some(record) = session.engine.history().records().first() else {
        return;
    };
    let total: f64 = outcome.weights.iter().sum();
    for (index, (option, weight)) in record.options.iter().zip(&outcome.weights).enumerate() {
        let share = if total > 0.0 { weight / total * 100.0 } else { 0.0 };
        let line = format!("  {:<24} {:>5.1}%", option.label(), share);
        if index == outcome.winner_index {
            println!("{}", line.green());
        } else {
            println!("{}", line.dimmed());
        }
    }
}
