//! Coupon form rules

use super::{required_number, required_text, ValidationErrors};
use crate::models::{CouponDraft, ValidCoupon};

/// Every field is required; `maxLimit` is a positive integer and `percentage` sits in [0, 100]
pub fn validate_coupon(draft: &CouponDraft) -> Result<ValidCoupon, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let coupon_title = required_text(
        &mut errors,
        "couponTitle",
        &draft.coupon_title,
        "Coupon title is required",
    );
    let coupon_description = required_text(
        &mut errors,
        "couponDescription",
        &draft.coupon_description,
        "Coupon description is required",
    );

    let tier_id = draft.tier_id.clone();
    if tier_id.is_none() {
        errors.add("tierId", "Tier is required");
    }

    let validity = required_number(&mut errors, "validity", draft.validity, "Validity is required");

    let max_limit = required_number(&mut errors, "maxLimit", draft.max_limit, "Max limit is required")
        .and_then(|limit| {
            if limit <= 0.0 {
                errors.add("maxLimit", "maxLimit must be a positive number");
                None
            } else if limit.fract() != 0.0 || limit > f64::from(u32::MAX) {
                errors.add("maxLimit", "maxLimit must be an integer");
                None
            } else {
                Some(limit as u32)
            }
        });

    let percentage = required_number(
        &mut errors,
        "percentage",
        draft.percentage,
        "Percentage is required",
    )
    .and_then(|pct| {
        if pct < 0.0 {
            errors.add("percentage", "percentage must be greater than or equal to 0");
            None
        } else if pct > 100.0 {
            errors.add("percentage", "percentage must be less than or equal to 100");
            None
        } else {
            Some(pct)
        }
    });

    match (coupon_title, coupon_description, tier_id, validity, max_limit, percentage) {
        (
            Some(coupon_title),
            Some(coupon_description),
            Some(tier_id),
            Some(validity),
            Some(max_limit),
            Some(percentage),
        ) if errors.is_empty() => Ok(ValidCoupon {
            coupon_title,
            coupon_description,
            tier_id,
            validity,
            max_limit,
            percentage,
            status: draft.status,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Id, TierId};

    fn draft() -> CouponDraft {
        CouponDraft {
            coupon_title: "10% Off".to_string(),
            coupon_description: "Ten percent off any purchase".to_string(),
            tier_id: Some(TierId(Id::Numeric(3))),
            validity: Some(30.0),
            max_limit: Some(1.0),
            percentage: Some(10.0),
            status: true,
        }
    }

    #[test]
    fn test_percentage_bounds() {
        for (pct, ok) in [(101.0, false), (100.0, true), (0.0, true), (-1.0, false)] {
            let d = CouponDraft {
                percentage: Some(pct),
                ..draft()
            };
            assert_eq!(validate_coupon(&d).is_ok(), ok, "percentage {}", pct);
        }
    }

    #[test]
    fn test_max_limit_must_be_positive_integer() {
        let zero = CouponDraft {
            max_limit: Some(0.0),
            ..draft()
        };
        assert_eq!(
            validate_coupon(&zero).unwrap_err().get("maxLimit"),
            Some("maxLimit must be a positive number")
        );

        let one = CouponDraft {
            max_limit: Some(1.0),
            ..draft()
        };
        assert_eq!(validate_coupon(&one).unwrap().max_limit, 1);

        let fractional = CouponDraft {
            max_limit: Some(2.5),
            ..draft()
        };
        assert_eq!(
            validate_coupon(&fractional).unwrap_err().get("maxLimit"),
            Some("maxLimit must be an integer")
        );
    }

    #[test]
    fn test_tier_selection_required() {
        let d = CouponDraft {
            tier_id: None,
            ..draft()
        };
        let errors = validate_coupon(&d).unwrap_err();
        assert_eq!(errors.get("tierId"), Some("Tier is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_default_draft_reports_every_missing_field() {
        let errors = validate_coupon(&CouponDraft::default()).unwrap_err();
        assert!(errors.contains("couponTitle"));
        assert!(errors.contains("couponDescription"));
        assert!(errors.contains("tierId"));
        assert!(errors.contains("maxLimit"));
        // validity and percentage default to 0, which is allowed
        assert!(!errors.contains("validity"));
        assert!(!errors.contains("percentage"));
    }
}
