//! Current conditions at a forecast site, flattened into label / value / unit rows.

use crate::directory::site_list::DirectorySite;
use crate::stations::error::FetchError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;

/// Fetches current conditions for a site identified as `"<province>/<code>"`.
pub trait ConditionsFetcher {
    fn fetch_conditions(
        &self,
        site_id: &str,
    ) -> impl Future<Output = Result<BTreeMap<String, Condition>, FetchError>> + Send;
}

/// A single reported condition, e.g. `{"label": "Temperature", "value": -3.2, "unit": "C"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Condition {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionRow {
    pub key: String,
    pub label: String,
    pub value: String,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ConditionsTable {
    pub rows: Vec<ConditionRow>,
}

impl ConditionsTable {
    /// Flattens conditions into rows ordered by key. Entries without a label are dropped.
    pub fn from_map(conditions: BTreeMap<String, Condition>) -> Self {
        let rows = conditions
            .into_iter()
            .filter_map(|(key, condition)| {
                let label = condition.label?;
                Some(ConditionRow {
                    key,
                    label,
                    value: display_value(&condition.value),
                    unit: condition.unit,
                })
            })
            .collect();
        Self { rows }
    }

    pub fn get(&self, key: &str) -> Option<&ConditionRow> {
        self.rows.iter().find(|r| r.key == key)
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Fetches and flattens the current conditions for a site.
pub async fn current_conditions<C>(
    fetcher: &C,
    site: &DirectorySite,
) -> Result<ConditionsTable, FetchError>
where
    C: ConditionsFetcher + ?Sized,
{
    let conditions = fetcher.fetch_conditions(&site.conditions_id()).await?;
    Ok(ConditionsTable::from_map(conditions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::province::Province;
    use serde_json::json;
    use std::sync::Mutex;

    struct FakeConditions {
        requested: Mutex<Vec<String>>,
    }

    impl ConditionsFetcher for FakeConditions {
        async fn fetch_conditions(
            &self,
            site_id: &str,
        ) -> Result<BTreeMap<String, Condition>, FetchError> {
            self.requested.lock().unwrap().push(site_id.to_string());
            Ok(serde_json::from_value(json!({
                "temperature": {"label": "Temperature", "value": -3.2, "unit": "C"},
                "condition": {"label": "Condition", "value": "Light Snow"},
                "wind_bearing": {"label": "Wind Bearing", "value": null, "unit": "degrees"},
                "icon_code": {"value": "16"}
            }))?)
        }
    }

    #[tokio::test]
    async fn test_current_conditions() -> Result<(), FetchError> {
        let fetcher = FakeConditions {
            requested: Mutex::new(Vec::new()),
        };
        let site = DirectorySite {
            code: "s0000583".to_string(),
            english_name: "Charlottetown".to_string(),
            province: Province::PE,
            latitude: 46.24,
            longitude: -63.13,
        };

        let table = current_conditions(&fetcher, &site).await?;

        assert_eq!(*fetcher.requested.lock().unwrap(), ["PE/s0000583"]);
        let keys: Vec<_> = table.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["condition", "temperature", "wind_bearing"]);

        let temperature = table.get("temperature").unwrap();
        assert_eq!(temperature.value, "-3.2");
        assert_eq!(temperature.unit.as_deref(), Some("C"));
        assert_eq!(table.get("condition").unwrap().value, "Light Snow");
        assert_eq!(table.get("wind_bearing").unwrap().value, "");
        assert!(table.get("icon_code").is_none());
        Ok(())
    }
}
