//! Output renderers for console commands

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use anyhow::anyhow;
use loyalty_core::{Coupon, Rgb, Tier, ValidationErrors};
use loyalty_engine::{TierCard, TierOption, TiersView, ViewAction};
use loyalty_persistence::CachedList;
use serde::Serialize;

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

/// Wrap `text` in 24-bit ANSI colour codes when `enabled`
pub fn paint(text: &str, fg: Rgb, bg: Option<Rgb>, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    let mut out = format!("\x1b[38;2;{};{};{}m", fg.r, fg.g, fg.b);
    if let Some(bg) = bg {
        out.push_str(&format!("\x1b[48;2;{};{};{}m", bg.r, bg.g, bg.b));
    }
    out.push_str(text);
    out.push_str("\x1b[0m");
    out
}

fn action_hint(action: ViewAction) -> &'static str {
    match action {
        ViewAction::CreateFreeTier => "tiers add --free",
        ViewAction::AddTier => "tiers add",
    }
}

pub(crate) fn render_tiers_view(view: &TiersView, format: OutputFormat, colour: bool) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(view),
        OutputFormat::Table => {
            match view {
                TiersView::Empty { message, action } => {
                    println!("{message}");
                    println!("[{}]  ({})", action.label(), action_hint(*action));
                }
                TiersView::Timeline { add_action, cards } => {
                    println!("[{}]  ({})", add_action.label(), action_hint(*add_action));
                    println!();
                    for card in cards {
                        print_card(card, colour);
                    }
                }
            }
            Ok(())
        }
    }
}

fn print_card(card: &TierCard, colour: bool) {
    let dot = paint("●", card.style.colour, None, colour);
    let header = paint(
        &format!(" {} ", card.tier_name),
        card.style.header_text,
        Some(card.style.header_start),
        colour,
    );
    println!("{dot} {header}  id {}", card.tier_id);

    let rail = if card.connector { "│" } else { " " };
    for row in &card.details {
        println!("{rail}   {:<20} {}", row.label, row.value);
    }
    if card.deletable {
        println!("{rail}   delete: tiers delete {}", card.tier_id);
    } else {
        println!("{rail}   free tier, cannot be deleted");
    }
    if card.connector {
        println!("{rail}");
    }
}

pub(crate) fn render_tier(tier: &Tier, format: OutputFormat, colour: bool) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(tier),
        OutputFormat::Table => {
            let swatch = paint("■", tier.colour().rgb(), None, colour);
            println!("id: {}", tier.tier_id);
            println!("name: {}", tier.tier_name);
            println!("free: {}", tier.is_free());
            println!("trigger amount: {}", tier.trigger_amount);
            match tier.trigger_duration {
                Some(months) => println!("trigger duration: {months} months"),
                None => println!("trigger duration: -"),
            }
            println!("accrual multiplier: {}", tier.accrual_multiplier);
            println!("redemption limit: {}", tier.redemption_limit_of_purchase);
            println!("conversion rate: {}", tier.conversion);
            println!("coupon probability: {}", tier.coupon_probability);
            println!("colour: {swatch} {}", tier.colour);
            println!("description: {}", tier.description);
            Ok(())
        }
    }
}

pub(crate) fn render_coupon(coupon: &Coupon, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(coupon),
        OutputFormat::Table => {
            if let Some(id) = &coupon.coupon_id {
                println!("id: {id}");
            }
            println!("title: {}", coupon.coupon_title);
            println!("description: {}", coupon.coupon_description);
            if let Some(program_id) = &coupon.program_id {
                println!("program: {program_id}");
            }
            if let Some(tier_id) = &coupon.tier_id {
                println!("tier: {tier_id}");
            }
            println!("validity: {} days", coupon.validity);
            println!("max limit: {}", coupon.max_limit);
            println!("percentage: {}%", coupon.percentage);
            println!("active: {}", coupon.status);
            Ok(())
        }
    }
}

/// Field errors shown under the form title
pub(crate) fn render_form_errors(
    title: &str,
    errors: &ValidationErrors,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(errors),
        OutputFormat::Table => {
            println!("{title}");
            for error in errors.iter() {
                println!("  {}: {}", error.field, error.message);
            }
            Ok(())
        }
    }
}

/// The tier dropdown of the coupon form; table output only
pub(crate) fn render_tier_options(options: &[TierOption], format: OutputFormat) {
    if format == OutputFormat::Json {
        return;
    }
    println!("Tier options:");
    for option in options {
        match (&option.value, option.disabled) {
            (Some(id), false) => println!("  {:<12} {}", id.to_string(), option.label),
            _ => println!("  {:<12} {} (disabled)", "-", option.label),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CacheReport<'a> {
    tiers: Option<&'a CachedList<Tier>>,
    coupons: Option<&'a CachedList<Coupon>>,
}

pub(crate) fn render_cache(
    tiers: Option<&CachedList<Tier>>,
    coupons: Option<&CachedList<Coupon>>,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&CacheReport { tiers, coupons }),
        OutputFormat::Table => {
            match tiers {
                Some(list) => {
                    println!("tiers ({}, stored {}):", list.items.len(), list.stored_at);
                    for tier in &list.items {
                        println!("  {:<12} {}", tier.tier_id.to_string(), tier.tier_name);
                    }
                }
                None => println!("tiers: <empty>"),
            }
            match coupons {
                Some(list) => {
                    println!("coupons ({}, stored {}):", list.items.len(), list.stored_at);
                    for coupon in &list.items {
                        let id = coupon
                            .coupon_id
                            .as_ref()
                            .map_or_else(|| "-".to_string(), ToString::to_string);
                        println!("  {:<12} {}", id, coupon.coupon_title);
                    }
                }
                None => println!("coupons: <empty>"),
            }
            Ok(())
        }
    }
}
