//! Tiers list page: timeline of tier cards with add, edit and delete actions

use crate::navigation::{Navigator, Route};
use crate::prompt::Confirm;
use loyalty_core::{lighten, text_colour, Error, Result, Rgb, Tier, TierId};
use loyalty_networking::{api::tiers, LoyaltyClient};
use loyalty_persistence::ClientStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const WELCOME_MESSAGE: &str = "Welcome! Create your Free Tier to get started.";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this tier?";

/// Tiers as of the last fetch; cheap to clone and never mutated in place
#[derive(Debug, Clone, Default)]
pub(crate) struct TierSnapshot {
    tiers: Arc<[Tier]>,
}

impl TierSnapshot {
    pub(crate) fn fetched(tiers: Vec<Tier>) -> Self {
        Self {
            tiers: tiers.into(),
        }
    }

    pub(crate) fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub(crate) fn find(&self, tier_id: &TierId) -> Option<&Tier> {
        self.tiers.iter().find(|t| &t.tier_id == tier_id)
    }
}

/// Button offered by the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewAction {
    CreateFreeTier,
    AddTier,
}

impl ViewAction {
    pub fn label(&self) -> &'static str {
        match self {
            ViewAction::CreateFreeTier => "Create Free Tier",
            ViewAction::AddTier => "Add Tier",
        }
    }
}

/// Colours of one card, derived from the tier colour
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStyle {
    pub colour: Rgb,
    pub dot_gradient: String,
    pub header_gradient: String,
    pub header_start: Rgb,
    pub header_end: Rgb,
    pub header_text: Rgb,
}

impl CardStyle {
    pub fn for_tier(tier: &Tier) -> Self {
        let colour = tier.colour();
        let dot_end = lighten(&colour, 40.0);
        let header_start = lighten(&colour, 10.0);
        let header_end = lighten(&colour, 20.0);
        Self {
            colour: colour.rgb(),
            dot_gradient: format!("linear-gradient(to bottom right, {}, {})", colour, dot_end),
            header_gradient: format!("linear-gradient(45deg, {}, {})", header_start, header_end),
            header_start,
            header_end,
            header_text: text_colour(&colour).rgb(),
        }
    }
}

/// Read-only label/value pair shown in an expanded card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierCard {
    pub tier_id: TierId,
    pub tier_name: String,
    pub style: CardStyle,
    pub details: Vec<DetailRow>,
    /// Free tiers cannot be deleted from the list
    pub deletable: bool,
    /// Draw the line down to the next card
    pub connector: bool,
}

impl TierCard {
    fn new(tier: &Tier, connector: bool) -> Self {
        let duration = match tier.trigger_duration {
            Some(months) => format!("{} months", months),
            None => "-".to_string(),
        };
        Self {
            tier_id: tier.tier_id.clone(),
            tier_name: tier.tier_name.clone(),
            style: CardStyle::for_tier(tier),
            details: vec![
                DetailRow {
                    label: "Trigger Amount",
                    value: format!("${}", number(tier.trigger_amount)),
                },
                DetailRow {
                    label: "Trigger Duration",
                    value: duration,
                },
                DetailRow {
                    label: "Accrual Multiplier",
                    value: number(tier.accrual_multiplier),
                },
                DetailRow {
                    label: "Redemption Limit",
                    value: number(tier.redemption_limit_of_purchase),
                },
                DetailRow {
                    label: "Conversion Rate",
                    value: number(tier.conversion),
                },
                DetailRow {
                    label: "Description",
                    value: tier.description.clone(),
                },
            ],
            deletable: !tier.is_free(),
            connector,
        }
    }
}

/// Whole numbers print without a fraction
fn number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// What the list renders
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum TiersView {
    /// No tiers yet: only the free-tier call to action
    Empty {
        message: &'static str,
        action: ViewAction,
    },
    #[serde(rename_all = "camelCase")]
    Timeline {
        add_action: ViewAction,
        cards: Vec<TierCard>,
    },
}

/// Result of the delete flow
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The user said no; nothing was sent
    Declined,
    Deleted,
    Failed(Error),
    /// Free tiers have no delete action
    Protected,
    /// Not part of the current list
    NotListed,
}

/// The tiers list screen
#[derive(Debug, Default)]
pub struct TiersPage {
    snapshot: TierSnapshot,
}

impl TiersPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the partner's tiers and mirror them into the store.
    ///
    /// Without a partner the list is empty. A failed fetch keeps the previous
    /// snapshot and is returned to the caller.
    pub async fn load(&mut self, client: &LoyaltyClient, store: &ClientStore) -> Result<()> {
        let Some(partner_id) = store.partner_id().await? else {
            warn!("No partner id set; showing an empty tier list");
            self.snapshot = TierSnapshot::fetched(Vec::new());
            return Ok(());
        };

        let list = tiers::list(client, &partner_id).await.map_err(|e| {
            error!("Error fetching tiers: {}", e);
            e
        })?;
        info!("Fetched {} tiers for partner {}", list.len(), partner_id);

        if let Err(e) = store.mirror_tiers(&list).await {
            warn!("Could not mirror tiers: {}", e);
        }
        self.snapshot = TierSnapshot::fetched(list);
        Ok(())
    }

    pub fn view(&self) -> TiersView {
        let tiers = self.snapshot.tiers();
        if tiers.is_empty() {
            return TiersView::Empty {
                message: WELCOME_MESSAGE,
                action: ViewAction::CreateFreeTier,
            };
        }
        let last = tiers.len() - 1;
        TiersView::Timeline {
            add_action: ViewAction::AddTier,
            cards: tiers
                .iter()
                .enumerate()
                .map(|(i, tier)| TierCard::new(tier, i < last))
                .collect(),
        }
    }

    pub fn add_free_tier(&self, nav: &mut Navigator) {
        nav.navigate(Route::AddTier { free: true });
    }

    pub fn add_tier(&self, nav: &mut Navigator) {
        nav.navigate(Route::AddTier { free: false });
    }

    pub fn edit(&self, tier_id: &TierId, nav: &mut Navigator) {
        nav.navigate(Route::EditTier {
            tier_id: tier_id.clone(),
        });
    }

    /// Confirm, then delete. On success the user goes back one step; the list
    /// itself is not refreshed.
    pub async fn delete(
        &self,
        tier_id: &TierId,
        confirm: &mut dyn Confirm,
        client: &LoyaltyClient,
        nav: &mut Navigator,
    ) -> DeleteOutcome {
        match self.snapshot.find(tier_id) {
            None => return DeleteOutcome::NotListed,
            Some(tier) if tier.is_free() => return DeleteOutcome::Protected,
            Some(_) => {}
        }

        if !confirm.confirm(DELETE_PROMPT) {
            info!("Delete of tier {} declined", tier_id);
            return DeleteOutcome::Declined;
        }

        match tiers::delete(client, tier_id).await {
            Ok(()) => {
                nav.back();
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!("Error deleting tier: {}", e);
                DeleteOutcome::Failed(e)
            }
        }
    }
}
