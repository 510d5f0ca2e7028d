use bigdecimal::{BigDecimal, ToPrimitive};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// Normalize a store-native decimal into a plain JSON number.
///
/// Whole values become integers, everything else becomes a float. Values that
/// do not fit either representation serialize as `null`.
pub fn decimal_to_json(value: &BigDecimal) -> Value {
    if value.is_integer() {
        if let Some(n) = value.to_i64() {
            return Value::Number(n.into());
        }
        if let Some(n) = value.to_u64() {
            return Value::Number(n.into());
        }
    }

    value
        .to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// `serialize_with` helper for decimal fields on wire models
pub fn serialize_decimal<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    decimal_to_json(value).serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn whole_decimals_become_integers() {
        let value = BigDecimal::from_str("1700000000.000").unwrap();
        assert_eq!(decimal_to_json(&value), json!(1700000000));
        assert!(decimal_to_json(&value).is_i64());
    }

    #[test]
    fn fractional_decimals_become_floats() {
        let value = BigDecimal::from_str("12.5").unwrap();
        assert_eq!(decimal_to_json(&value), json!(12.5));
    }

    #[test]
    fn negative_whole_values_stay_integers() {
        let value = BigDecimal::from(-42);
        assert_eq!(decimal_to_json(&value), json!(-42));
    }

    #[test]
    fn serializer_helper_emits_plain_numbers() {
        #[derive(serde::Serialize)]
        struct Wrapper {
            #[serde(serialize_with = "serialize_decimal")]
            at: BigDecimal,
        }

        let out = serde_json::to_string(&Wrapper { at: BigDecimal::from(7) }).unwrap();
        assert_eq!(out, r#"{"at":7}"#);
    }
}
