//! Card display formatting
//!
//! Formats cards for terminal output in table and detail views. Card numbers
//! are always masked.

use chrono::NaiveDate;

use crate::models::{Card, Money};

fn status_label(card: &Card, today: NaiveDate) -> &'static str {
    if card.is_expired_on(today) {
        "Expired"
    } else if card.is_active {
        "Active"
    } else {
        "Inactive"
    }
}

/// Format a list of cards as a table
pub fn format_card_list(cards: &[Card], currency_symbol: &str, today: NaiveDate) -> String {
    if cards.is_empty() {
        return "No cards found.".to_string();
    }

    let type_width = cards
        .iter()
        .map(|c| c.card_type.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let holder_width = cards
        .iter()
        .map(|c| c.card_holder_name.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let number_width = cards
        .iter()
        .map(|c| c.card_number.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<13}  {:<type_width$}  {:<number_width$}  {:<holder_width$}  {:<6}  {:>12}  {}\n",
        "ID",
        "Type",
        "Number",
        "Holder",
        "Expiry",
        "Balance",
        "Status",
    ));

    output.push_str(&format!(
        "{:-<13}  {:-<type_width$}  {:-<number_width$}  {:-<holder_width$}  {:-<6}  {:->12}  {:-<8}\n",
        "", "", "", "", "", "", "",
    ));

    for card in cards {
        output.push_str(&format!(
            "{:<13}  {:<type_width$}  {:<number_width$}  {:<holder_width$}  {:<6}  {:>12}  {}\n",
            card.id.short(),
            card.card_type,
            card.masked_number(),
            card.card_holder_name,
            card.expiry_date.to_string(),
            card.balance.format_with_symbol(currency_symbol),
            status_label(card, today),
        ));
    }

    let total: Money = cards.iter().map(|c| c.balance).sum();
    output.push_str(&format!(
        "{} card(s), total balance {}\n",
        cards.len(),
        total.format_with_symbol(currency_symbol)
    ));

    output
}

/// Format a single card's details
pub fn format_card_details(card: &Card, currency_symbol: &str, today: NaiveDate) -> String {
    let mut output = String::new();

    output.push_str(&format!("Card: {}\n", card.masked_number()));
    output.push_str(&format!("  ID:        {}\n", card.id));
    output.push_str(&format!("  Owner:     {}\n", card.user_id));
    output.push_str(&format!("  Holder:    {}\n", card.card_holder_name));
    output.push_str(&format!("  Type:      {}\n", card.card_type));
    output.push_str(&format!("  Expiry:    {}\n", card.expiry_date));
    output.push_str(&format!(
        "  Balance:   {}\n",
        card.balance.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!("  Status:    {}\n", status_label(card, today)));
    output.push_str(&format!(
        "  Created:   {}\n",
        card.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!(
        "  Updated:   {}\n",
        card.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
