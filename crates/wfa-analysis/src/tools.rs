//! Tool recommendation records parsed from the JSON block.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One recommended tool with its estimated return.
///
/// Every field is optional. Numbers and booleans are kept as their JSON text,
/// blank strings count as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRecommendation {
    #[serde(default, deserialize_with = "lenient_text")]
    pub tool: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub helps: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub time_saved: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cost: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub payback: Option<String>,
}

/// Error parsing a tool recommendation block.
#[derive(Debug, thiserror::Error)]
#[error("expected a JSON array of objects: {0}")]
pub struct ToolSetError(#[from] serde_json::Error);

/// Parse the inner text of a JSON block into recommendations.
///
/// The block must be an array whose elements are all objects.
pub fn parse_tool_set(json: &str) -> Result<Vec<ToolRecommendation>, ToolSetError> {
    let records: Vec<Map<String, Value>> = serde_json::from_str(json)?;
    records
        .into_iter()
        .map(|record| serde_json::from_value(Value::Object(record)).map_err(ToolSetError))
        .collect()
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(coerce_text))
}

fn coerce_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_record() {
        let tools = parse_tool_set(
            r#"[{"tool": "Zapier", "helps": "Automates intake", "timeSaved": "10 hrs/week", "cost": "$50/mo", "payback": "1 month"}]"#,
        )
        .unwrap();
        assert_eq!(
            tools,
            vec![ToolRecommendation {
                tool: Some("Zapier".to_owned()),
                helps: Some("Automates intake".to_owned()),
                time_saved: Some("10 hrs/week".to_owned()),
                cost: Some("$50/mo".to_owned()),
                payback: Some("1 month".to_owned()),
            }]
        );
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let tools = parse_tool_set(r#"[{"tool": "X"}]"#).unwrap();
        assert_eq!(tools[0].tool.as_deref(), Some("X"));
        assert_eq!(tools[0].time_saved, None);
        assert_eq!(tools[0].cost, None);
    }

    #[test]
    fn test_non_string_values_are_coerced() {
        let tools =
            parse_tool_set(r#"[{"tool": 42, "cost": null, "payback": true, "helps": ["a", 1]}]"#)
                .unwrap();
        assert_eq!(tools[0].tool.as_deref(), Some("42"));
        assert_eq!(tools[0].cost, None);
        assert_eq!(tools[0].payback.as_deref(), Some("true"));
        assert_eq!(tools[0].helps.as_deref(), Some(r#"["a",1]"#));
    }

    #[test]
    fn test_blank_string_is_absent() {
        let tools = parse_tool_set(r#"[{"tool": "X", "timeSaved": "  "}]"#).unwrap();
        assert_eq!(tools[0].time_saved, None);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let tools = parse_tool_set(r#"[{"tool": "X", "vendor": "Acme"}]"#).unwrap();
        assert_eq!(tools.len(), 1);
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_tool_set("[]").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_fails() {
        assert!(parse_tool_set("[bad json\n").is_err());
    }

    #[test]
    fn test_non_array_fails() {
        assert!(parse_tool_set(r#"{"tool": "X"}"#).is_err());
        assert!(parse_tool_set(r#"[["X", "Y"]]"#).is_err());
        assert!(parse_tool_set("[1, 2]").is_err());
    }
}
