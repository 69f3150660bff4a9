//! Lenient field decoders for backend records

use serde::{Deserialize, Deserializer};

/// Deserialize a field that the backend may send as `null`, using the type's default
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A count sent either as an integer or as a float such as `6.0`
#[derive(Deserialize)]
#[serde(untagged)]
enum CountValue {
    Integer(u64),
    Float(f64),
}

impl CountValue {
    /// Fractional, negative or oversized values have no count
    fn to_u32(&self) -> Option<u32> {
        match *self {
            CountValue::Integer(n) => u32::try_from(n).ok(),
            CountValue::Float(f) if f.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&f) => {
                Some(f as u32)
            }
            CountValue::Float(_) => None,
        }
    }
}

/// Deserialize an optional count that can be null, an integer or a whole-number float
pub(crate) fn count_option<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<CountValue>::deserialize(deserializer)?.and_then(|v| v.to_u32()))
}

/// Like [`count_option`], with zero for null or unusable values
pub(crate) fn count_or_default<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(count_option(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Months {
        #[serde(default, deserialize_with = "count_option")]
        months: Option<u32>,
    }

    fn months(value: serde_json::Value) -> Option<u32> {
        serde_json::from_value::<Months>(json!({ "months": value }))
            .unwrap()
            .months
    }

    #[test]
    fn test_count_shapes() {
        assert_eq!(months(json!(6)), Some(6));
        assert_eq!(months(json!(6.0)), Some(6));
        assert_eq!(months(json!(null)), None);
        assert_eq!(months(json!(2.5)), None);
        assert_eq!(months(json!(-1)), None);
    }
}
