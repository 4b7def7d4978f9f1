use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Filter configuration as supplied by the host, before validation.
///
/// `verb`, `body_format` and `target` are checked when the filter is
/// constructed; an invalid value prevents the filter from running at all.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RestConfig {
    pub url: String,

    #[serde(default = "default_verb", alias = "method")]
    pub verb: String,

    #[serde(default)]
    pub headers: Map<String, Value>,

    #[serde(default)]
    pub query: Map<String, Value>,

    #[serde(default)]
    pub body: Option<Value>,

    #[serde(default, alias = "bodyFormat")]
    pub body_format: Option<String>,

    #[serde(alias = "target_body", alias = "targetBody")]
    pub target: String,

    #[serde(default)]
    pub fallback: Option<Map<String, Value>>,
}

fn default_verb() -> String {
    "get".to_string()
}

impl RestConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RestConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self> {
        let config_path = std::env::var("CONFIGURATION_PATH")
            .unwrap_or_else(|_| "config/config.json".to_string());
        Self::from_file(&config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_config_defaults_verb_to_get() {
        let config: RestConfig = serde_json::from_value(json!({
            "url": "http://host/",
            "target": "rest"
        }))
        .unwrap();
        assert_eq!(config.verb, "get");
        assert!(config.headers.is_empty());
        assert!(config.body.is_none());
        assert!(config.fallback.is_none());
    }

    #[test]
    fn method_alias_is_accepted() {
        let config: RestConfig = serde_json::from_value(json!({
            "url": "http://host/",
            "method": "POST",
            "target": "rest"
        }))
        .unwrap();
        assert_eq!(config.verb, "POST");
    }

    #[test]
    fn target_body_alias_is_accepted() {
        let config: RestConfig = serde_json::from_value(json!({
            "url": "http://host/",
            "target_body": "rest"
        }))
        .unwrap();
        assert_eq!(config.target, "rest");
    }

    #[test]
    fn full_config_round_trips() {
        let config: RestConfig = serde_json::from_value(json!({
            "url": "http://host/%{id}",
            "verb": "post",
            "headers": {"x-api-key": "%{key}"},
            "query": {"q": "%{message}"},
            "body": {"hey": "you"},
            "body_format": "json",
            "target": "rest",
            "fallback": {"error": true}
        }))
        .unwrap();
        assert_eq!(config.verb, "post");
        assert_eq!(config.body, Some(json!({"hey": "you"})));
        assert_eq!(config.body_format.as_deref(), Some("json"));
        assert_eq!(config.fallback, Some(json!({"error": true}).as_object().cloned().unwrap()));
    }
}
