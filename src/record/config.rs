use snafu::prelude::*;

use crate::common::{InvalidFieldSnafu, Result};

use super::RecordId;

pub const MAX_PRIORITY: i64 = 65535;

/// Record types the remote accepts a priority for.
pub fn takes_priority(kind: &str) -> bool {
    matches!(kind, "MX" | "SRV")
}

/// Desired state of a record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct RecordConfig {
    pub domain_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: String,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub comment: String,
}

impl RecordConfig {
    pub fn new(
        domain_id: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            domain_id: domain_id.into(),
            name: name.into(),
            kind: kind.into(),
            data: data.into(),
            ttl: 0,
            priority: 0,
            comment: String::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("domain_id", &self.domain_id),
            ("name", &self.name),
            ("type", &self.kind),
            ("data", &self.data),
        ] {
            ensure!(
                !value.is_empty(),
                InvalidFieldSnafu {
                    field,
                    message: "must not be empty",
                }
            );
        }
        self.priority()?;
        Ok(())
    }

    pub fn priority(&self) -> Result<u16> {
        u16::try_from(self.priority).ok().context(InvalidFieldSnafu {
            field: "priority",
            message: format!("expected 0 to {MAX_PRIORITY}, got {}", self.priority),
        })
    }

    /// The priority to send for a record of the given type, if any.
    pub(crate) fn outgoing_priority(&self, kind: &str) -> Result<Option<u16>> {
        match takes_priority(kind) {
            true => Ok(Some(self.priority()?)),
            false => Ok(None),
        }
    }

    /// Whether applying this config to the record requires deleting it and
    /// creating a new one.
    pub fn forces_replacement(&self, id: &RecordId) -> bool {
        self.domain_id != id.domain_id()
    }
}
