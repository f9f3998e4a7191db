//! Card CLI commands
//!
//! Bridges clap argument parsing with the card service.

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::card::{format_card_details, format_card_list};
use crate::error::{CardError, CardResult};
use crate::models::{CardId, CardRequest, UserId};
use crate::services::CardService;
use crate::storage::Storage;

/// Card subcommands
#[derive(Subcommand)]
pub enum CardCommands {
    /// Create a new card (starts inactive)
    Create {
        /// Card number
        number: String,
        /// Expiry date (MM/YY)
        #[arg(short, long)]
        expiry: String,
        /// Card holder name
        #[arg(long)]
        holder: String,
        /// Owning user ID
        #[arg(short, long)]
        user: String,
        /// Card type (e.g. Credit, Debit)
        #[arg(short = 't', long = "type")]
        card_type: Option<String>,
    },
    /// List cards
    List {
        /// Only cards owned by this user
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Show card details
    Show {
        /// Card ID
        card: String,
    },
    /// Edit a card's number, expiry or holder name
    Edit {
        /// Card ID
        card: String,
        /// New card number
        #[arg(short, long)]
        number: Option<String>,
        /// New expiry date (MM/YY)
        #[arg(short, long)]
        expiry: Option<String>,
        /// New holder name
        #[arg(long)]
        holder: Option<String>,
    },
    /// Delete a card
    Delete {
        /// Card ID
        card: String,
    },
    /// Activate a card
    Activate {
        /// Card ID
        card: String,
    },
    /// Deactivate a card
    Deactivate {
        /// Card ID
        card: String,
    },
}

fn parse_card_id(s: &str) -> CardResult<CardId> {
    s.parse()
        .map_err(|_| CardError::Validation(format!("Invalid card ID: '{}'", s)))
}

fn parse_user_id(s: &str) -> CardResult<UserId> {
    s.parse()
        .map_err(|_| CardError::Validation(format!("Invalid user ID: '{}'", s)))
}

/// Handle a card command
pub fn handle_card_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CardCommands,
) -> CardResult<()> {
    let service = CardService::new(storage).with_default_card_type(&settings.default_card_type);
    let currency = settings.currency_symbol.as_str();
    let today = Local::now().date_naive();

    match cmd {
        CardCommands::Create {
            number,
            expiry,
            holder,
            user,
            card_type,
        } => {
            let mut request = CardRequest::new(number, expiry, holder, parse_user_id(&user)?);
            request.card_type = card_type;

            let card = service.create(Some(&request))?;

            println!("Created card: {}", card);
            println!("  Expiry: {}", card.expiry_date);
            println!("  Status: Inactive");
            println!("  ID: {}", card.id);
        }

        CardCommands::List { user } => {
            let cards = match user {
                Some(user) => service.list_for_user(parse_user_id(&user)?)?,
                None => service.list_all()?,
            };
            print!("{}", format_card_list(&cards, currency, today));
        }

        CardCommands::Show { card } => {
            let found = service.get(parse_card_id(&card)?)?;
            print!("{}", format_card_details(&found, currency, today));
        }

        CardCommands::Edit {
            card,
            number,
            expiry,
            holder,
        } => {
            if number.is_none() && expiry.is_none() && holder.is_none() {
                println!("No changes specified. Use --number, --expiry or --holder.");
                return Ok(());
            }

            let existing = service.get(parse_card_id(&card)?)?;
            let request = CardRequest::new(
                number.unwrap_or_else(|| existing.card_number.clone()),
                expiry.unwrap_or_else(|| existing.expiry_date.to_string()),
                holder.unwrap_or_else(|| existing.card_holder_name.clone()),
                existing.user_id,
            );

            let updated = service.update(existing.id, Some(&request))?;
            println!("Updated card: {}", updated);
        }

        CardCommands::Delete { card } => {
            let id = parse_card_id(&card)?;
            service.delete(id)?;
            println!("Deleted card: {}", id);
        }

        CardCommands::Activate { card } => {
            let activated = service.activate(parse_card_id(&card)?)?;
            println!("Activated card: {}", activated);
        }

        CardCommands::Deactivate { card } => {
            let deactivated = service.deactivate(parse_card_id(&card)?)?;
            println!("Deactivated card: {}", deactivated);
        }
    }

    Ok(())
}

/// Print the audit trail, optionally for a single card
pub fn handle_history_command(
    storage: &Storage,
    card: Option<String>,
    limit: usize,
) -> CardResult<()> {
    let Some(logger) = storage.audit() else {
        println!("Audit logging is disabled in settings.");
        return Ok(());
    };

    let card_id = card
        .map(|card| parse_card_id(&card).map(|id| id.to_string()))
        .transpose()?;
    let entries = logger.read_recent(limit, card_id.as_deref())?;

    if entries.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
