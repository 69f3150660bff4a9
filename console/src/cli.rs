//! Command-line definitions and dispatch

use crate::commands;
use crate::error::CliResult;
use crate::state::AppState;
use clap::{Args, Parser, Subcommand, ValueEnum};
use loyalty_core::{ProgramId, TierId};
use loyalty_engine::{FormPolicies, SubmitFailurePolicy};
use loyalty_networking::DEFAULT_API_BASE;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "loyalty-console",
    version,
    about = "Manage loyalty tiers and coupons for a partner"
)]
pub struct Cli {
    /// Base URL of the loyalty API
    #[arg(long, global = true, env = "LOYALTY_API_URL", default_value = DEFAULT_API_BASE)]
    pub api_url: String,

    /// Directory holding the client store (defaults to the local data dir)
    #[arg(long, global = true, env = "LOYALTY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// What the tier form does when the create request fails
    #[arg(long, global = true, value_enum, default_value_t = FailureMode::Stay)]
    pub on_tier_failure: FailureMode,

    /// What the coupon form does when the create request fails
    #[arg(long, global = true, value_enum, default_value_t = FailureMode::Back)]
    pub on_coupon_failure: FailureMode,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn policies(&self) -> FormPolicies {
        FormPolicies {
            tier: self.on_tier_failure.into(),
            coupon: self.on_coupon_failure.into(),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FailureMode {
    /// Keep the form and its input
    Stay,
    /// Return to the previous screen
    Back,
}

impl From<FailureMode> for SubmitFailurePolicy {
    fn from(mode: FailureMode) -> Self {
        match mode {
            FailureMode::Stay => SubmitFailurePolicy::Stay,
            FailureMode::Back => SubmitFailurePolicy::NavigateBack,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage the active partner
    #[command(subcommand)]
    Partner(PartnerCommand),
    /// List, inspect, add and delete tiers
    #[command(subcommand)]
    Tiers(TiersCommand),
    /// Create coupons
    #[command(subcommand)]
    Coupons(CouponsCommand),
    /// Inspect the local mirrors
    #[command(subcommand)]
    Cache(CacheCommand),
}

#[derive(Subcommand, Debug)]
pub enum PartnerCommand {
    /// Set the partner whose tiers are managed
    Set { partner_id: String },
    Show,
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum TiersCommand {
    /// Show the tier timeline
    List,
    /// Show one tier
    Show { tier_id: TierId },
    /// Add a tier
    Add(TierArgs),
    /// Open the edit screen for a tier
    Edit { tier_id: TierId },
    /// Delete a tier after confirmation
    Delete {
        tier_id: TierId,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct TierArgs {
    /// Create the free entry tier
    #[arg(long, conflicts_with_all = ["trigger_amount", "trigger_duration"])]
    pub free: bool,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub trigger_amount: Option<f64>,
    /// Months
    #[arg(long, allow_negative_numbers = true)]
    pub trigger_duration: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub accrual_multiplier: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub redemption_limit: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub conversion: Option<f64>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub coupon_probability: Option<f64>,
    /// Hex colour such as #FFD700
    #[arg(long)]
    pub colour: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CouponsCommand {
    /// Add a coupon to a program
    Add(CouponArgs),
}

#[derive(Args, Debug)]
pub struct CouponArgs {
    #[arg(long)]
    pub program_id: ProgramId,
    #[arg(long)]
    pub tier_id: Option<TierId>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Days until expiry
    #[arg(long, allow_negative_numbers = true)]
    pub validity: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub max_limit: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub percentage: Option<f64>,
    /// Create the coupon as active
    #[arg(long)]
    pub active: bool,
}

#[derive(Subcommand, Debug)]
pub enum CacheCommand {
    /// Print the mirrored tiers and coupons
    Show,
}

/// Parse arguments, run the command and return the process exit code
pub async fn run() -> i32 {
    let cli = Cli::parse();

    let state = match AppState::init(&cli).await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("error: {e:#}");
            return 3;
        }
    };

    match dispatch(cli.command, &state).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

pub async fn dispatch(command: Command, state: &AppState) -> CliResult<()> {
    match command {
        Command::Partner(cmd) => match cmd {
            PartnerCommand::Set { partner_id } => commands::partner::set(state, &partner_id).await,
            PartnerCommand::Show => commands::partner::show(state).await,
            PartnerCommand::Clear => commands::partner::clear(state).await,
        },
        Command::Tiers(cmd) => match cmd {
            TiersCommand::List => commands::tiers::list(state).await,
            TiersCommand::Show { tier_id } => commands::tiers::show(state, &tier_id).await,
            TiersCommand::Add(args) => commands::tiers::add(state, args).await,
            TiersCommand::Edit { tier_id } => commands::tiers::edit(state, &tier_id).await,
            TiersCommand::Delete { tier_id, yes } => {
                commands::tiers::delete(state, &tier_id, yes).await
            }
        },
        Command::Coupons(CouponsCommand::Add(args)) => commands::coupons::add(state, args).await,
        Command::Cache(CacheCommand::Show) => commands::cache::show(state).await,
    }
}
