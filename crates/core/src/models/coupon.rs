//! Coupon models

use super::de;
use crate::types::{CouponId, ProgramId, TierId};
use serde::{Deserialize, Serialize};

/// Coupon as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(default)]
    pub coupon_id: Option<CouponId>,
    #[serde(default)]
    pub program_id: Option<ProgramId>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub coupon_title: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub coupon_description: String,
    #[serde(default)]
    pub tier_id: Option<TierId>,
    /// Days until expiry
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub validity: f64,
    #[serde(default, deserialize_with = "de::count_or_default")]
    pub max_limit: u32,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub percentage: f64,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub status: bool,
}

/// Raw values of the add-coupon form
#[derive(Debug, Clone, PartialEq)]
pub struct CouponDraft {
    pub coupon_title: String,
    pub coupon_description: String,
    /// Dropdown selection; `None` until a tier is picked
    pub tier_id: Option<TierId>,
    pub validity: Option<f64>,
    pub max_limit: Option<f64>,
    pub percentage: Option<f64>,
    pub status: bool,
}

impl Default for CouponDraft {
    fn default() -> Self {
        Self {
            coupon_title: String::new(),
            coupon_description: String::new(),
            tier_id: None,
            validity: Some(0.0),
            max_limit: Some(0.0),
            percentage: Some(0.0),
            status: false,
        }
    }
}

/// A coupon draft that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCoupon {
    pub coupon_title: String,
    pub coupon_description: String,
    pub tier_id: TierId,
    pub validity: f64,
    pub max_limit: u32,
    pub percentage: f64,
    pub status: bool,
}

impl ValidCoupon {
    /// Merge in the program the coupon is attached to
    pub fn into_payload(self, program_id: ProgramId) -> NewCoupon {
        NewCoupon {
            coupon_title: self.coupon_title,
            coupon_description: self.coupon_description,
            tier_id: self.tier_id,
            validity: self.validity,
            max_limit: self.max_limit,
            percentage: self.percentage,
            status: self.status,
            program_id,
        }
    }
}

/// Body of the create-coupon request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCoupon {
    pub coupon_title: String,
    pub coupon_description: String,
    pub tier_id: TierId,
    pub validity: f64,
    pub max_limit: u32,
    pub percentage: f64,
    pub status: bool,
    pub program_id: ProgramId,
}

impl From<NewCoupon> for Coupon {
    fn from(new: NewCoupon) -> Self {
        Coupon {
            coupon_id: None,
            program_id: Some(new.program_id),
            coupon_title: new.coupon_title,
            coupon_description: new.coupon_description,
            tier_id: Some(new.tier_id),
            validity: new.validity,
            max_limit: new.max_limit,
            percentage: new.percentage,
            status: new.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Id;
    use crate::validation::validate_coupon;
    use serde_json::json;

    #[test]
    fn test_payload_merges_program_id() {
        let draft = CouponDraft {
            coupon_title: "10% Off".to_string(),
            coupon_description: "Ten percent".to_string(),
            tier_id: Some(TierId(Id::Numeric(4))),
            validity: Some(30.0),
            max_limit: Some(100.0),
            percentage: Some(10.0),
            status: true,
        };
        let payload = validate_coupon(&draft)
            .unwrap()
            .into_payload(ProgramId(Id::Text("spring".to_string())));

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "couponTitle": "10% Off",
                "couponDescription": "Ten percent",
                "tierId": 4,
                "validity": 30.0,
                "maxLimit": 100,
                "percentage": 10.0,
                "status": true,
                "programId": "spring"
            })
        );
    }

    #[test]
    fn test_coupon_record_tolerates_nulls_and_float_counts() {
        let coupon: Coupon = serde_json::from_value(json!({
            "couponId": 3,
            "couponTitle": "10% Off",
            "couponDescription": null,
            "maxLimit": 5.0,
            "percentage": null,
            "status": null
        }))
        .unwrap();

        assert_eq!(coupon.coupon_description, "");
        assert_eq!(coupon.max_limit, 5);
        assert_eq!(coupon.percentage, 0.0);
        assert!(!coupon.status);
    }
}
