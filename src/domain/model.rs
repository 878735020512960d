use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A course plan as served in `plans.json`.
///
/// Records are taken as-is: ids are not checked for uniqueness, the
/// availability window is not parsed and tags may repeat. Missing or `null`
/// fields come through empty; numeric ids are kept as their decimal text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Plan {
    #[serde(deserialize_with = "id_text")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnail: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub available_from: String,
    #[serde(deserialize_with = "null_as_default")]
    pub available_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn id_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(String::new()),
        Some(Value::String(id)) => Ok(id),
        Some(Value::Number(id)) => Ok(id.to_string()),
        Some(other) => Err(D::Error::custom(format!(
            "invalid plan id {}, expected a string or number",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_record() {
        let json = r#"{"id":"1","thumbnail":"t.png","title":"T","summary":"S",
            "availableFrom":"2024-01-01","availableTo":"2024-02-01","tags":["a","b"]}"#;
        let plan: Plan = serde_json::from_str(json).unwrap();

        assert_eq!(plan.id, "1");
        assert_eq!(plan.available_from, "2024-01-01");
        assert_eq!(plan.available_to, "2024-02-01");
        assert_eq!(plan.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_partial_record_is_accepted_unvalidated() {
        let json = r#"{"id":"x","availableFrom":"later","availableTo":"earlier","tags":["a","a"],"extra":1}"#;
        let plan: Plan = serde_json::from_str(json).unwrap();

        assert_eq!(plan.title, "");
        assert_eq!(plan.available_from, "later");
        assert_eq!(plan.tags.len(), 2);
    }

    #[test]
    fn test_null_fields_come_through_empty() {
        let json = r#"[{"id":"1","title":"T","summary":null,"thumbnail":null,"availableTo":null,"tags":null}]"#;
        let plans: Vec<Plan> = serde_json::from_str(json).unwrap();

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].title, "T");
        assert_eq!(plans[0].summary, "");
        assert_eq!(plans[0].available_to, "");
        assert!(plans[0].tags.is_empty());
    }

    #[test]
    fn test_numeric_id_is_kept_as_text() {
        let plans: Vec<Plan> = serde_json::from_str(r#"[{"id":7},{"id":null},{"id":"x"}]"#).unwrap();

        let ids: Vec<&str> = plans.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["7", "", "x"]);
    }

    #[test]
    fn test_structured_id_is_rejected() {
        let err = serde_json::from_str::<Plan>(r#"{"id":{"nested":1}}"#).unwrap_err();
        assert!(err.to_string().contains("expected a string or number"));
    }

    #[test]
    fn test_serializes_wire_names() {
        let plan = Plan {
            id: "2".to_string(),
            available_from: "2024-03-01".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(value["availableFrom"], "2024-03-01");
        assert!(value.get("available_from").is_none());
    }
}
