//! Declared field sets of the provider, its resources and data sources.
//!
//! The orchestrating host reads these to validate configuration and plan
//! changes; the adapters themselves work on typed configs.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Int,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Required,
    Optional,
    Computed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    String(&'static str),
    Int(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub presence: Presence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<(i64, i64)>,
    pub sensitive: bool,
    pub force_new: bool,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub description: &'static str,
}

impl Attribute {
    fn new(name: &'static str, kind: AttributeType, presence: Presence) -> Self {
        Self {
            name,
            kind,
            presence,
            default: None,
            env: None,
            range: None,
            sensitive: false,
            force_new: false,
            description: "",
        }
    }

    pub fn required(name: &'static str, kind: AttributeType) -> Self {
        Self::new(name, kind, Presence::Required)
    }

    pub fn optional(name: &'static str, kind: AttributeType, default: DefaultValue) -> Self {
        Self {
            default: Some(default),
            ..Self::new(name, kind, Presence::Optional)
        }
    }

    pub fn computed(name: &'static str, kind: AttributeType) -> Self {
        Self::new(name, kind, Presence::Computed)
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn env(mut self, var: &'static str) -> Self {
        self.env = Some(var);
        self
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.range = Some((min, max));
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceSchema {
    pub attributes: Vec<Attribute>,
    pub importable: bool,
}

impl ResourceSchema {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self {
            attributes,
            importable: false,
        }
    }

    pub fn importable(mut self) -> Self {
        self.importable = true;
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSchema {
    pub provider: Vec<Attribute>,
    pub resources: BTreeMap<&'static str, ResourceSchema>,
    pub data_sources: BTreeMap<&'static str, ResourceSchema>,
}
