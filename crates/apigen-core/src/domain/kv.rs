//! Key:value argument parsing with primitive type inference.
//!
//! Turns a flat list of `key:value` tokens into a typed mapping. The parser
//! never fails: tokens it cannot make sense of are silently skipped, which
//! keeps the CLI forgiving about stray arguments.

use std::collections::BTreeMap;

use super::fields::FieldValue;

/// Parse raw `key:value` tokens into a map of typed values.
///
/// Rules:
/// - split on the *first* colon only, so values may contain colons;
/// - tokens without a colon are skipped;
/// - one layer of matching single or double quotes is stripped;
/// - `true`/`false` become booleans, finite numeric literals become numbers,
///   everything else stays a string;
/// - later duplicate keys overwrite earlier ones.
pub fn parse_kv_args<S: AsRef<str>>(pairs: &[S]) -> BTreeMap<String, FieldValue> {
    let mut out = BTreeMap::new();

    for raw in pairs {
        let raw = raw.as_ref();
        let Some((key, val)) = raw.split_once(':') else {
            continue;
        };
        let key = key.trim().to_string();
        let val = strip_quotes(val.trim());

        out.insert(key, infer_value(val));
    }

    out
}

/// Strip one layer of matching single or double quotes, if present.
fn strip_quotes(val: &str) -> &str {
    let quoted = val.len() >= 2
        && ((val.starts_with('"') && val.ends_with('"'))
            || (val.starts_with('\'') && val.ends_with('\'')));
    if quoted { &val[1..val.len() - 1] } else { val }
}

fn infer_value(val: &str) -> FieldValue {
    match val {
        "true" => FieldValue::Bool(true),
        "false" => FieldValue::Bool(false),
        "" => FieldValue::Str(String::new()),
        other => match other.parse::<f64>() {
            Ok(n) if n.is_finite() => FieldValue::Num(n),
            _ => FieldValue::Str(other.to_string()),
        },
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_mixed_types() {
        let parsed = parse_kv_args(&[
            "name:\"Worcestershire\"",
            "country:UK",
            "rating:5",
            "active:true",
        ]);
        assert_eq!(
            parsed.get("name"),
            Some(&FieldValue::Str("Worcestershire".into()))
        );
        assert_eq!(parsed.get("country"), Some(&FieldValue::Str("UK".into())));
        assert_eq!(parsed.get("rating"), Some(&FieldValue::Num(5.0)));
        assert_eq!(parsed.get("active"), Some(&FieldValue::Bool(true)));
    }

    #[test]
    fn splits_on_first_colon_only() {
        let parsed = parse_kv_args(&["url:http://localhost:3000"]);
        assert_eq!(
            parsed.get("url"),
            Some(&FieldValue::Str("http://localhost:3000".into()))
        );
    }

    #[test]
    fn tokens_without_colon_are_skipped() {
        let parsed = parse_kv_args(&["garbage", "name:ok"]);
        assert_eq!(parsed.len(), 1);
        assert!(parsed.contains_key("name"));
    }

    #[test]
    fn single_quotes_are_stripped() {
        let parsed = parse_kv_args(&["name:'Tom Hardy'"]);
        assert_eq!(parsed.get("name"), Some(&FieldValue::Str("Tom Hardy".into())));
    }

    #[test]
    fn lone_quote_is_not_stripped() {
        // Only *matching* pairs are stripped; a single quote character stays.
        let parsed = parse_kv_args(&["mark:\""]);
        assert_eq!(parsed.get("mark"), Some(&FieldValue::Str("\"".into())));
    }

    #[test]
    fn empty_value_stays_string() {
        let parsed = parse_kv_args(&["note:"]);
        assert_eq!(parsed.get("note"), Some(&FieldValue::Str(String::new())));
    }

    #[test]
    fn false_literal_is_boolean() {
        let parsed = parse_kv_args(&["active:false"]);
        assert_eq!(parsed.get("active"), Some(&FieldValue::Bool(false)));
    }

    #[test]
    fn negative_and_float_literals_are_numbers() {
        let parsed = parse_kv_args(&["delta:-3", "pi:3.14"]);
        assert_eq!(parsed.get("delta"), Some(&FieldValue::Num(-3.0)));
        assert_eq!(parsed.get("pi"), Some(&FieldValue::Num(3.14)));
    }

    #[test]
    fn non_finite_literal_stays_string() {
        let parsed = parse_kv_args(&["x:inf", "y:NaN"]);
        assert_eq!(parsed.get("x"), Some(&FieldValue::Str("inf".into())));
        assert_eq!(parsed.get("y"), Some(&FieldValue::Str("NaN".into())));
    }

    #[test]
    fn later_duplicates_overwrite() {
        let parsed = parse_kv_args(&["n:1", "n:2"]);
        assert_eq!(parsed.get("n"), Some(&FieldValue::Num(2.0)));
    }
}
