//! Typed option descriptors exposed to the host UI.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{EnumString, IntoStaticStr};

use crate::error::GeneratorError;

pub const MODEL_OPTION: &str = "Model";
pub const SYSTEM_MESSAGE_OPTION: &str = "System Message";
pub const API_KEY_OPTION: &str = "API Key";
pub const URL_OPTION: &str = "URL";

/// The editable value of an option, tagged by how the UI renders it.
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum InputField {
    Dropdown { selected: String, options: Vec<String> },
    TextArea(String),
    Password(String),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
enum InputKind {
    Dropdown,
    TextArea,
    Password,
    Text,
}

impl InputField {
    /// UI type tag (`dropdown`, `textarea`, `password`, `text`).
    pub fn type_tag(&self) -> &'static str {
        self.into()
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Dropdown { selected, .. } => selected,
            Self::TextArea(v) | Self::Password(v) | Self::Text(v) => v,
        }
    }

    /// Enumerated choices; empty for anything but a dropdown.
    pub fn values(&self) -> &[String] {
        match self {
            Self::Dropdown { options, .. } => options,
            _ => &[],
        }
    }

    fn set_value(&mut self, value: String) {
        match self {
            Self::Dropdown { selected, .. } => *selected = value,
            Self::TextArea(v) | Self::Password(v) | Self::Text(v) => *v = value,
        }
    }
}

/// A single named option: its field plus a human-readable description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RawInputConfig", try_from = "RawInputConfig")]
pub struct InputConfig {
    pub field: InputField,
    pub description: String,
}

impl InputConfig {
    pub fn dropdown(
        selected: impl Into<String>,
        options: Vec<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            field: InputField::Dropdown {
                selected: selected.into(),
                options,
            },
            description: description.into(),
        }
    }

    pub fn textarea(value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            field: InputField::TextArea(value.into()),
            description: description.into(),
        }
    }

    pub fn password(value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            field: InputField::Password(value.into()),
            description: description.into(),
        }
    }

    pub fn text(value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            field: InputField::Text(value.into()),
            description: description.into(),
        }
    }

    pub fn value(&self) -> &str {
        self.field.value()
    }
}

/// Wire shape consumed by the UI: `{type, value, description, values}`.
#[derive(Serialize, Deserialize)]
struct RawInputConfig {
    #[serde(rename = "type")]
    kind: String,
    value: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    values: Vec<String>,
}

impl From<InputConfig> for RawInputConfig {
    fn from(config: InputConfig) -> Self {
        let kind = config.field.type_tag().to_string();
        let (value, values) = match config.field {
            InputField::Dropdown { selected, options } => (selected, options),
            InputField::TextArea(v) | InputField::Password(v) | InputField::Text(v) => {
                (v, Vec::new())
            }
        };
        Self {
            kind,
            value,
            description: config.description,
            values,
        }
    }
}

impl TryFrom<RawInputConfig> for InputConfig {
    type Error = GeneratorError;

    fn try_from(raw: RawInputConfig) -> Result<Self, Self::Error> {
        let kind: InputKind = raw.kind.parse().map_err(|_| {
            GeneratorError::Configuration(format!("Unknown option type '{}'", raw.kind))
        })?;
        let field = match kind {
            InputKind::Dropdown => InputField::Dropdown {
                selected: raw.value,
                options: raw.values,
            },
            InputKind::TextArea => InputField::TextArea(raw.value),
            InputKind::Password => InputField::Password(raw.value),
            InputKind::Text => InputField::Text(raw.value),
        };
        Ok(Self {
            field,
            description: raw.description,
        })
    }
}

/// Insertion-ordered mapping from option name to descriptor.
///
/// Deserializing keeps the order of the source document, including from a
/// `serde_json::Value` (the crate enables `preserve_order`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    entries: Vec<(String, InputConfig)>,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an option. Replacing an existing name keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, config: InputConfig) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = config,
            None => self.entries.push((name, config)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&InputConfig> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Current value of an option.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(InputConfig::value)
    }

    /// Current value of an option, treating an empty string as unset.
    pub fn non_empty_value(&self, name: &str) -> Option<&str> {
        self.value(name).filter(|v| !v.trim().is_empty())
    }

    /// Overwrite the value of an existing option, keeping its kind.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> crate::error::Result<()> {
        let (_, config) = self
            .entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .ok_or_else(|| GeneratorError::Configuration(format!("Unknown option '{name}'")))?;
        config.field.set_value(value.into());
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InputConfig)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for GeneratorConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, config) in &self.entries {
            map.serialize_entry(name, config)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for GeneratorConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ConfigVisitor;

        impl<'de> Visitor<'de> for ConfigVisitor {
            type Value = GeneratorConfig;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of option name to option descriptor")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut config = GeneratorConfig::new();
                while let Some((name, input)) = access.next_entry::<String, InputConfig>()? {
                    config.insert(name, input);
                }
                Ok(config)
            }
        }

        deserializer.deserialize_map(ConfigVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> GeneratorConfig {
        let mut config = GeneratorConfig::new();
        config.insert(
            "Model",
            InputConfig::dropdown(
                "gpt-4o",
                vec!["gpt-4o".into(), "gpt-3.5-turbo".into()],
                "Select an OpenAI Model",
            ),
        );
        config.insert("System Message", InputConfig::textarea("Be brief.", "Prompt"));
        config.insert("API Key", InputConfig::password("", "Key"));
        config.insert("URL", InputConfig::text("http://x/v1", "Base URL"));
        config
    }

    #[test]
    fn serializes_to_ui_schema_in_insertion_order() {
        let value = serde_json::to_string(&sample()).unwrap();
        let names: Vec<_> = ["\"Model\"", "\"System Message\"", "\"API Key\"", "\"URL\""]
            .iter()
            .map(|n| value.find(n).unwrap())
            .collect();
        assert!(names.windows(2).all(|w| w[0] < w[1]), "order lost: {value}");

        let parsed: serde_json::Value = serde_json::from_str(&value).unwrap();
        assert_eq!(
            parsed["Model"],
            json!({
                "type": "dropdown",
                "value": "gpt-4o",
                "description": "Select an OpenAI Model",
                "values": ["gpt-4o", "gpt-3.5-turbo"],
            })
        );
        assert_eq!(parsed["System Message"]["type"], "textarea");
        assert_eq!(parsed["API Key"]["type"], "password");
        assert_eq!(parsed["URL"]["values"], json!([]));
    }

    #[test]
    fn deserializes_host_payload_in_document_order() {
        let payload = r#"{
            "System Message": {"type": "textarea", "value": "Hi", "description": "", "values": []},
            "Model": {"type": "dropdown", "value": "gpt-4o", "values": ["gpt-4o"]}
        }"#;

        let from_text: GeneratorConfig = serde_json::from_str(payload).unwrap();
        assert_eq!(from_text.names().collect::<Vec<_>>(), vec!["System Message", "Model"]);
        assert_eq!(from_text.value("Model"), Some("gpt-4o"));
        assert_eq!(from_text.get("Model").unwrap().field.values(), ["gpt-4o".to_string()]);

        // hosts that hand over an already parsed value keep their order too
        let value: serde_json::Value = serde_json::from_str(payload).unwrap();
        let from_value: GeneratorConfig = serde_json::from_value(value).unwrap();
        assert_eq!(from_value, from_text);
    }

    #[test]
    fn rejects_unknown_option_type() {
        let err = serde_json::from_value::<GeneratorConfig>(json!({
            "Model": {"type": "slider", "value": "1"},
        }))
        .unwrap_err();
        assert!(err.to_string().contains("slider"), "unexpected error: {err}");
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut config = sample();
        config.insert("Model", InputConfig::dropdown("o1", vec!["o1".into()], "m"));

        assert_eq!(config.len(), 4);
        assert_eq!(config.names().next(), Some("Model"));
        assert_eq!(config.value("Model"), Some("o1"));
    }

    #[test]
    fn set_value_keeps_kind_and_rejects_unknown_names() {
        let mut config = sample();
        config.set_value("API Key", "sk-live").unwrap();

        assert_eq!(config.get("API Key").unwrap().field.type_tag(), "password");
        assert_eq!(config.non_empty_value("API Key"), Some("sk-live"));
        assert!(config.set_value("Temperature", "0.5").is_err());
    }

    #[test]
    fn non_empty_value_skips_blank_strings() {
        let config = sample();
        assert_eq!(config.value("API Key"), Some(""));
        assert_eq!(config.non_empty_value("API Key"), None);
        assert_eq!(config.non_empty_value("Missing"), None);
    }
}
