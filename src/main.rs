use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use card_services::cli::{handle_card_command, handle_history_command, CardCommands};
use card_services::config::paths::DATA_DIR_ENV;
use card_services::config::{CardPaths, Settings};
use card_services::logging::init_logging;
use card_services::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "cards",
    version,
    about = "Manage payment card records",
    long_about = "Create, inspect, edit, delete, activate and deactivate payment cards \
                  owned by users. Cards are stored as JSON in the data directory and \
                  every change is recorded in an audit log."
)]
struct Cli {
    /// Base directory for settings, data and the audit log
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Card management commands
    #[command(subcommand)]
    Card(CardCommands),

    /// Show the audit trail
    History {
        /// Only entries for this card
        #[arg(short, long)]
        card: Option<String>,
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => CardPaths::with_base_dir(dir),
        None => CardPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings.log_level)?;

    match cli.command {
        Some(Commands::Card(cmd)) => {
            let storage = Storage::open(&paths, &settings)?;
            handle_card_command(&storage, &settings, cmd)?;
        }
        Some(Commands::History { card, limit }) => {
            let storage = Storage::open(&paths, &settings)?;
            handle_history_command(&storage, card, limit)?;
        }
        Some(Commands::Init) => {
            println!("Initializing card services at: {}", paths.base_dir().display());
            initialize_storage(&paths, &settings)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'cards card create --help' to add your first card.");
        }
        Some(Commands::Config) => {
            println!("Card Services Configuration");
            println!("===========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Cards file:      {}", paths.cards_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Storage backend:   {:?}", settings.storage);
            println!("  Default card type: {}", settings.default_card_type);
            println!("  Audit enabled:     {}", settings.audit_enabled);
            println!("  Log level:         {}", settings.log_level);
        }
        None => {
            println!("Card Services - manage payment card records");
            println!();
            println!("Run 'cards --help' for usage information.");
        }
    }

    Ok(())
}
