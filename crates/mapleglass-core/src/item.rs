//! Renders the interesting fields of a remote item record into display
//! text. The record is a loosely-typed document whose `metaInfo` bag varies
//! by item kind, so fields are resolved by key lookup with "absent if
//! missing, empty or zero" semantics; absent fields produce no line at all.

use serde_json::Value;

/// Requirement fields in display order.
const REQ_FIELDS: &[(&str, &str)] = &[
    ("reqLevel", "LEV"),
    ("reqSTR", "STR"),
    ("reqDEX", "DEX"),
    ("reqINT", "INT"),
    ("reqLUK", "LUK"),
    ("reqPOP", "POP"),
];

/// Stat bonus fields in display order.
const STAT_FIELDS: &[(&str, &str)] = &[
    ("incSTR", "STR"),
    ("incDEX", "DEX"),
    ("incINT", "INT"),
    ("incLUK", "LUK"),
    ("incMHP", "MaxHP"),
    ("incMMP", "MaxMP"),
    ("incPAD", "ATT"),
    ("incMAD", "M.ATT"),
    ("incPDD", "DEF"),
    ("incMDD", "M.DEF"),
    ("incACC", "ACC"),
    ("incEVA", "EVA"),
    ("incSpeed", "Speed"),
    ("incJump", "Jump"),
];

/// One `REQ <label> : <value>` line per present requirement.
pub fn requirements(item: &Value) -> String {
    let mut out = String::new();
    for (key, label) in REQ_FIELDS {
        if let Some(value) = meta_field(item, key) {
            out.push_str(&format!("REQ {label} : {value}\n"));
        }
    }
    out.trim_end().to_string()
}

/// One `<label> : +<value>` line per present stat bonus.
pub fn stat_bonuses(item: &Value) -> String {
    let mut out = String::new();
    for (key, label) in STAT_FIELDS {
        if let Some(value) = meta_field(item, key) {
            out.push_str(&format!("{label} : +{value}\n"));
        }
    }
    out.trim_end().to_string()
}

/// Shop price, preferring the top-level meta field over the nested shop
/// record. Zero or missing means the item has no price to show.
pub fn price(item: &Value) -> Option<u64> {
    let meta = item.get("metaInfo")?;
    let primary = meta.get("price").and_then(as_number).filter(|&p| p > 0);
    let secondary = meta
        .get("shop")
        .and_then(|s| s.get("price"))
        .and_then(as_number)
        .filter(|&p| p > 0);
    primary.or(secondary)
}

/// Display name: `name` at the record root, else the name nested inside the
/// description object some API versions return.
pub fn display_name(item: &Value) -> Option<String> {
    non_empty_str(item.get("name")?)
        .or_else(|| non_empty_str(item.get("description")?.get("name")?))
}

/// Flavor text: `description` as a plain string, or its `description` field
/// when the API nests it.
pub fn description_text(item: &Value) -> Option<String> {
    let desc = item.get("description")?;
    match desc {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(_) => non_empty_str(desc.get("description")?),
        _ => None,
    }
}

/// Resolves `metaInfo.<key>` as display text. Missing keys, empty strings
/// and the literal zero all count as absent.
fn meta_field(item: &Value, key: &str) -> Option<String> {
    let value = item.get("metaInfo")?.get(key)?;
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if text.is_empty() || text == "0" {
        None
    } else {
        Some(text)
    }
}

fn non_empty_str(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_requirement_is_suppressed() {
        let item = json!({ "metaInfo": { "reqLevel": 0, "reqSTR": 35 } });
        let req = requirements(&item);
        assert!(!req.contains("LEV"));
        assert_eq!(req, "REQ STR : 35");
    }

    #[test]
    fn single_stat_line() {
        let item = json!({ "metaInfo": { "incSTR": 5 } });
        assert_eq!(stat_bonuses(&item), "STR : +5");
    }

    #[test]
    fn fields_follow_display_order() {
        let item = json!({ "metaInfo": {
            "incJump": 7, "incSTR": 2, "incPAD": 30, "incACC": "12"
        }});
        assert_eq!(
            stat_bonuses(&item),
            "STR : +2\nATT : +30\nACC : +12\nJump : +7"
        );
    }

    #[test]
    fn string_zero_and_empty_are_absent() {
        let item = json!({ "metaInfo": { "reqDEX": "0", "reqINT": "", "reqLUK": 4 } });
        assert_eq!(requirements(&item), "REQ LUK : 4");
    }

    #[test]
    fn missing_meta_info_yields_empty_blocks() {
        let item = json!({ "name": "Red Potion" });
        assert_eq!(requirements(&item), "");
        assert_eq!(stat_bonuses(&item), "");
    }

    #[test]
    fn price_prefers_primary_location() {
        let item = json!({ "metaInfo": { "price": 1200, "shop": { "price": 900 } } });
        assert_eq!(price(&item), Some(1200));
    }

    #[test]
    fn price_falls_back_to_shop_record() {
        let item = json!({ "metaInfo": { "shop": { "price": 900 } } });
        assert_eq!(price(&item), Some(900));
    }

    #[test]
    fn zero_primary_price_falls_through_to_shop() {
        // A literal zero counts as absent, so it must not mask the nested
        // shop record.
        let item = json!({ "metaInfo": { "price": 0, "shop": { "price": 900 } } });
        assert_eq!(price(&item), Some(900));
    }

    #[test]
    fn zero_or_missing_price_is_absent() {
        assert_eq!(price(&json!({ "metaInfo": { "price": 0 } })), None);
        assert_eq!(price(&json!({ "metaInfo": { "shop": { "price": 0 } } })), None);
        assert_eq!(price(&json!({ "metaInfo": {} })), None);
        assert_eq!(price(&json!({})), None);
    }

    #[test]
    fn name_and_description_fallbacks() {
        let nested = json!({
            "name": "",
            "description": { "name": "Blue Bandana", "description": "A bandana." }
        });
        assert_eq!(display_name(&nested).as_deref(), Some("Blue Bandana"));
        assert_eq!(description_text(&nested).as_deref(), Some("A bandana."));

        let flat = json!({ "name": "Work Gloves", "description": "Plain gloves." });
        assert_eq!(display_name(&flat).as_deref(), Some("Work Gloves"));
        assert_eq!(description_text(&flat).as_deref(), Some("Plain gloves."));
    }
}
