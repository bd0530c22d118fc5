use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fateroll_core::{HistoryView, Mode};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "fateroll")]
#[command(about = "Fateroll - weighted decision dice", long_about = None)]
struct Cli {
    /// Directory holding persisted state (defaults to the platform data directory)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the options, their weights and the active mode
    List,
    /// Add an option
    Add {
        name: String,
        #[arg(long, default_value = "")]
        emoji: String,
    },
    /// Remove an option (by list number, id or name)
    Remove { option: String },
    /// Rename an option
    Rename { option: String, name: String },
    /// Change an option's emoji
    Emoji { option: String, emoji: String },
    /// Set an option's weight (clamped to 1..=100)
    Weight { option: String, weight: f64 },
    /// Switch between fair, preference and fate
    Mode { mode: Mode },
    /// Draw new fate weights (fate mode only)
    Reroll,
    /// Roll the dice
    Roll {
        /// Reveal the result immediately
        #[arg(long)]
        no_delay: bool,
    },
    /// Show past draws
    History {
        #[arg(long, default_value_t = HistoryView::Recent)]
        view: HistoryView,
    },
    /// Give a history record a title
    Title { record: u64, title: String },
    /// Toggle a history record as favorite
    Favorite { record: u64 },
    /// Delete a history record
    Forget { record: u64 },
    /// Toggle a decision set as favorite (by set id or fingerprint)
    FavoriteSet { set: String },
    /// Delete a decision set and all its records (by set id or fingerprint)
    ForgetSet { set: String },
    /// Load the options and mode of a past draw
    Reuse { record: u64 },
    /// Load the options and mode of a decision set
    ReuseSet { set: String },
    /// Clear history, favorites and decision sets
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Delete all data, including options
    Reset {
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();
    let mut session = commands::Session::open(cli.data_dir)?;

    match cli.command {
        Commands::List => commands::options::list(&session),
        Commands::Add { name, emoji } => commands::options::add(&mut session, &name, &emoji)?,
        Commands::Remove { option } => commands::options::remove(&mut session, &option)?,
        Commands::Rename { option, name } => {
            commands::options::rename(&mut session, &option, &name)?
        }
        Commands::Emoji { option, emoji } => {
            commands::options::emoji(&mut session, &option, &emoji)?
        }
        Commands::Weight { option, weight } => {
            commands::options::weight(&mut session, &option, weight)?
        }
        Commands::Mode { mode } => commands::options::mode(&mut session, mode)?,
        Commands::Reroll => commands::options::reroll(&mut session)?,
        Commands::Roll { no_delay } => commands::draw::roll(&mut session, no_delay).await?,
        Commands::History { view } => commands::history::show(&session, view),
        Commands::Title { record, title } => {
            commands::history::title(&mut session, record, &title)?
        }
        Commands::Favorite { record } => commands::history::favorite(&mut session, record)?,
        Commands::Forget { record } => commands::history::forget(&mut session, record)?,
        Commands::FavoriteSet { set } => commands::history::favorite_set(&mut session, &set)?,
        Commands::ForgetSet { set } => commands::history::forget_set(&mut session, &set)?,
        Commands::Reuse { record } => commands::history::reuse(&mut session, record)?,
        Commands::ReuseSet { set } => commands::history::reuse_set(&mut session, &set)?,
        Commands::Clear { yes } => commands::history::clear(&mut session, yes)?,
        Commands::Reset { yes } => commands::history::reset(&mut session, yes)?,
    }

    Ok(())
}
