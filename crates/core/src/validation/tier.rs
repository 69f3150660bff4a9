//! Tier form rules, one entry point per tier variant

use super::{required_number, required_text, ValidationErrors};
use crate::models::{TierDraft, TierTerms, ValidTier};
use crate::types::HexColour;

/// Validate a draft as a free tier: no trigger duration, zero trigger amount
pub fn validate_free_tier(draft: &TierDraft) -> Result<ValidTier, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let tier_name = required_text(&mut errors, "tierName", &draft.tier_name, "Tier Name is required");

    if let Some(amount) = trigger_amount(&mut errors, draft.trigger_amount) {
        if amount != 0.0 {
            errors.add("triggerAmount", "Free tiers cannot have a trigger amount");
        }
    }
    // Duration is nullable for free tiers; anything supplied is ignored.

    let shared = shared_fields(&mut errors, draft);
    finish(errors, tier_name, TierTerms::Free, shared)
}

/// Validate a draft as a paid tier: both triggers required
pub fn validate_paid_tier(draft: &TierDraft) -> Result<ValidTier, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let tier_name = required_text(&mut errors, "tierName", &draft.tier_name, "Tier Name is required");

    let amount = trigger_amount(&mut errors, draft.trigger_amount);

    let duration = required_number(
        &mut errors,
        "triggerDuration",
        draft.trigger_duration,
        "Trigger Duration is required",
    )
    .and_then(|months| {
        if months < 1.0 {
            errors.add(
                "triggerDuration",
                "Duration must be at least 1 month for non-free tiers",
            );
            None
        } else if months.fract() != 0.0 || months > f64::from(u32::MAX) {
            errors.add("triggerDuration", "Duration must be a whole number of months");
            None
        } else {
            Some(months as u32)
        }
    });

    let shared = shared_fields(&mut errors, draft);
    let terms = match (amount, duration) {
        (Some(trigger_amount), Some(trigger_duration)) => TierTerms::Paid {
            trigger_amount,
            trigger_duration,
        },
        // Errors were recorded; the placeholder is never returned
        _ => TierTerms::Free,
    };
    finish(errors, tier_name, terms, shared)
}

struct SharedFields {
    accrual_multiplier: Option<f64>,
    redemption_limit_of_purchase: Option<f64>,
    conversion: Option<f64>,
    description: Option<String>,
    coupon_probability: Option<f64>,
    colour: Option<HexColour>,
}

fn trigger_amount(errors: &mut ValidationErrors, value: Option<f64>) -> Option<f64> {
    let amount = required_number(errors, "triggerAmount", value, "Trigger Amount is required")?;
    if amount < 0.0 {
        errors.add("triggerAmount", "Trigger Amount cannot be negative");
        return None;
    }
    Some(amount)
}

fn non_negative(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<f64>,
    required_message: &str,
    negative_message: &str,
) -> Option<f64> {
    let v = required_number(errors, field, value, required_message)?;
    if v < 0.0 {
        errors.add(field, negative_message);
        return None;
    }
    Some(v)
}

fn shared_fields(errors: &mut ValidationErrors, draft: &TierDraft) -> SharedFields {
    let accrual_multiplier = non_negative(
        errors,
        "accrualMultiplier",
        draft.accrual_multiplier,
        "Accrual Multiplier is required",
        "Multiplier cannot be negative",
    );
    let redemption_limit_of_purchase = non_negative(
        errors,
        "redemptionLimitOfPurchase",
        draft.redemption_limit_of_purchase,
        "Redemption Limit is required",
        "Limit cannot be negative",
    );
    let conversion = non_negative(
        errors,
        "conversion",
        draft.conversion,
        "Conversion Rate is required",
        "Conversion Rate cannot be negative",
    );
    let description = required_text(errors, "description", &draft.description, "Description is required");

    let coupon_probability = non_negative(
        errors,
        "couponProbability",
        draft.coupon_probability,
        "Coupon Probability is required",
        "Probability cannot be negative",
    )
    .and_then(|p| {
        if p > 1.0 {
            errors.add("couponProbability", "Probability must be 1 or less");
            None
        } else {
            Some(p)
        }
    });

    let colour = if draft.colour.trim().is_empty() {
        errors.add("colour", "Colour is required");
        None
    } else {
        match HexColour::parse(draft.colour.trim()) {
            Ok(colour) => Some(colour),
            Err(_) => {
                errors.add("colour", "Enter a valid hex color");
                None
            }
        }
    };

    SharedFields {
        accrual_multiplier,
        redemption_limit_of_purchase,
        conversion,
        description,
        coupon_probability,
        colour,
    }
}

fn finish(
    errors: ValidationErrors,
    tier_name: Option<String>,
    terms: TierTerms,
    shared: SharedFields,
) -> Result<ValidTier, ValidationErrors> {
    if !errors.is_empty() {
        return Err(errors);
    }
    match (
        tier_name,
        shared.accrual_multiplier,
        shared.redemption_limit_of_purchase,
        shared.conversion,
        shared.description,
        shared.coupon_probability,
        shared.colour,
    ) {
        (
            Some(tier_name),
            Some(accrual_multiplier),
            Some(redemption_limit_of_purchase),
            Some(conversion),
            Some(description),
            Some(coupon_probability),
            Some(colour),
        ) => Ok(ValidTier {
            tier_name,
            terms,
            accrual_multiplier,
            redemption_limit_of_purchase,
            conversion,
            description,
            coupon_probability,
            colour,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gold() -> TierDraft {
        TierDraft {
            tier_name: "Gold".to_string(),
            trigger_amount: Some(500.0),
            trigger_duration: Some(6.0),
            accrual_multiplier: Some(2.0),
            redemption_limit_of_purchase: Some(10.0),
            conversion: Some(1.5),
            description: "Gold tier".to_string(),
            coupon_probability: Some(0.2),
            colour: "#FFD700".to_string(),
            is_free_tier: false,
        }
    }

    #[test]
    fn test_paid_tier_accepts_complete_draft() {
        let tier = validate_paid_tier(&gold()).unwrap();
        assert_eq!(
            tier.terms,
            TierTerms::Paid {
                trigger_amount: 500.0,
                trigger_duration: 6
            }
        );
        assert_eq!(tier.colour.as_str(), "#FFD700");
    }

    #[test]
    fn test_free_tier_allows_missing_duration() {
        let draft = TierDraft {
            trigger_amount: Some(0.0),
            trigger_duration: None,
            is_free_tier: true,
            ..gold()
        };
        let tier = draft.validate().unwrap();
        assert_eq!(tier.terms, TierTerms::Free);
    }

    #[test]
    fn test_same_draft_as_paid_requires_duration() {
        let draft = TierDraft {
            trigger_amount: Some(0.0),
            trigger_duration: None,
            is_free_tier: false,
            ..gold()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.get("triggerDuration"), Some("Trigger Duration is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_paid_duration_must_be_at_least_one_whole_month() {
        let zero = TierDraft {
            trigger_duration: Some(0.0),
            ..gold()
        };
        assert_eq!(
            validate_paid_tier(&zero).unwrap_err().get("triggerDuration"),
            Some("Duration must be at least 1 month for non-free tiers")
        );

        let fractional = TierDraft {
            trigger_duration: Some(1.5),
            ..gold()
        };
        assert!(validate_paid_tier(&fractional)
            .unwrap_err()
            .contains("triggerDuration"));
    }

    #[test]
    fn test_free_tier_rejects_trigger_amount() {
        let draft = TierDraft {
            trigger_amount: Some(100.0),
            is_free_tier: true,
            ..gold()
        };
        assert!(validate_free_tier(&draft).unwrap_err().contains("triggerAmount"));
    }

    #[test]
    fn test_collects_every_failing_field() {
        let draft = TierDraft {
            tier_name: "  ".to_string(),
            trigger_amount: Some(-1.0),
            accrual_multiplier: None,
            redemption_limit_of_purchase: Some(-3.0),
            conversion: Some(f64::NAN),
            description: String::new(),
            coupon_probability: Some(1.2),
            colour: "gold".to_string(),
            ..gold()
        };
        let errors = validate_paid_tier(&draft).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "tierName",
                "triggerAmount",
                "accrualMultiplier",
                "redemptionLimitOfPurchase",
                "conversion",
                "description",
                "couponProbability",
                "colour",
            ]
        );
        assert_eq!(errors.get("triggerAmount"), Some("Trigger Amount cannot be negative"));
        assert_eq!(errors.get("couponProbability"), Some("Probability must be 1 or less"));
        assert_eq!(errors.get("colour"), Some("Enter a valid hex color"));
    }

    #[test]
    fn test_probability_bounds_are_inclusive() {
        for p in [0.0, 1.0] {
            let draft = TierDraft {
                coupon_probability: Some(p),
                ..gold()
            };
            assert!(validate_paid_tier(&draft).is_ok());
        }
    }
}
