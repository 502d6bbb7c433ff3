//! Kaomo CLI - search, copy and manage kaomoji from the terminal.
//!
//! Usage:
//!     kaomo search happy
//!     kaomo search cat:joy tag:blush --columns 4
//!     kaomo copy tableflip --index 0
//!     kaomo add "(^._.^)ﾉ" --tag cat --tag wave --category Cat
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kaomo::bundled::bundled_catalog;
use kaomo::clipboard::{ArboardClipboard, ClipboardRsClipboard};
use kaomo::{Config, CopyEvent, CopyPath, Entry, EntryStoreApi, JsonFileStore, Session, SessionOptions};

#[derive(Parser, Debug)]
#[command(name = "kaomo", version, about = "Find and copy kaomoji")]
struct Cli {
    /// Config file (defaults to $KAOMO_CONFIG, then the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List results for a query; `cat:` and `tag:` tokens filter exactly
    Search {
        query: Vec<String>,
        /// Grid width used to show row/column positions
        #[arg(long)]
        columns: Option<usize>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Copy one result of a query to the clipboard
    Copy {
        query: Vec<String>,
        /// Result index to copy (clamped to the result count)
        #[arg(long, default_value_t = 0)]
        index: usize,
    },
    /// Save a custom kaomoji (overwrites tags and category of an existing one)
    Add {
        glyph: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Show the persisted copy history
    Recent,
    /// Add or remove a favorite
    Favorite { glyph: String },
    /// Print the config file path in use
    ConfigPath,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::resolve_path()?,
    };

    if let Commands::ConfigPath = cli.command {
        println!("{}", config_path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let store = Arc::new(JsonFileStore::with_history_capacity(
        config.data_dir()?,
        config.session.history_capacity,
    ));

    let mut session = Session::new(
        bundled_catalog(),
        store.clone(),
        // Exits right after copying, so the primary waits for a hand-off
        Arc::new(ArboardClipboard::handing_off()),
        Arc::new(ClipboardRsClipboard::new()),
        SessionOptions::from(&config),
    );
    session.merge_user_entries().await;

    match cli.command {
        Commands::Search { query, columns, limit } => {
            if let Some(columns) = columns {
                session.set_columns(columns);
            }
            session.load_favorites().await;
            session.set_query(query.join(" "));
            print_results(&session, limit);
        }
        Commands::Copy { query, index } => {
            session.set_query(query.join(" "));
            session.select(index);
            match session.commit_selected().await? {
                CopyEvent::Copied { glyph, result_index, via } => {
                    let note = match via {
                        CopyPath::Primary => "",
                        CopyPath::Fallback => " (fallback clipboard)",
                    };
                    println!("Copied #{} {glyph}{note}", result_index.unwrap_or_default());
                    if via == CopyPath::Fallback {
                        hold_fallback_selection().await;
                    }
                }
                CopyEvent::Failed { glyph, reason, .. } => {
                    eprintln!("Could not copy {glyph}: {reason}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Add { glyph, tags, category } => {
            let position = session.save_entry(Entry::new(glyph, tags, category)).await?;
            if let Some(entry) = session.catalog().entries().get(position) {
                println!("Saved {} [{}] {}", entry.glyph, entry.category, entry.tags.join(", "));
            }
        }
        Commands::Recent => {
            for (i, entry) in store.load_recents().await?.iter().enumerate() {
                println!("{i:>3}  {}", entry.glyph);
            }
        }
        Commands::Favorite { glyph } => {
            let glyph = glyph.trim();
            let entry = session
                .catalog()
                .get(glyph)
                .cloned()
                .unwrap_or_else(|| Entry::new(glyph, Vec::<String>::new(), ""));
            let now = session.toggle_favorite(&entry).await?;
            println!("{} {}", if now { "Added favorite" } else { "Removed favorite" }, entry.glyph);
        }
        // Printed before the session is built
        Commands::ConfigPath => {}
    }

    Ok(ExitCode::SUCCESS)
}

/// The fallback writer cannot hand its selection off on X11 and Wayland, so
/// the process keeps serving it until interrupted.
#[cfg(all(unix, not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))))]
async fn hold_fallback_selection() {
    eprintln!("Keeping the clipboard contents available; press Ctrl-C after pasting");
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to wait for Ctrl-C");
    }
}

#[cfg(not(all(unix, not(any(target_os = "macos", target_os = "android", target_os = "emscripten")))))]
async fn hold_fallback_selection() {}

fn print_results(session: &Session, limit: Option<usize>) {
    let columns = session.selection().columns();
    let results = session.results();
    let shown = limit.unwrap_or(results.len()).min(results.len());

    for (i, entry) in results.iter().take(shown).enumerate() {
        let star = if session.is_favorite(&entry.glyph) { "*" } else { " " };
        println!(
            "{i:>4} {star} ({},{})  {}  [{}]  {}",
            i / columns,
            i % columns,
            entry.glyph,
            entry.category,
            entry.tags.join(", ")
        );
    }
    if shown < results.len() {
        println!("... {} more", results.len() - shown);
    }
}
