use snafu::prelude::*;

use crate::common::{InvalidFieldSnafu, Result};

pub const DEFAULT_DOMAIN_TTL: u32 = 3600;

fn default_ttl() -> u32 {
    DEFAULT_DOMAIN_TTL
}

/// Desired state of a domain.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct DomainConfig {
    pub name: String,
    pub email: String,
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    #[serde(default)]
    pub comment: String,
}

impl DomainConfig {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ttl: DEFAULT_DOMAIN_TTL,
            comment: String::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.name.is_empty(),
            InvalidFieldSnafu {
                field: "name",
                message: "must not be empty",
            }
        );
        ensure!(
            !self.email.is_empty(),
            InvalidFieldSnafu {
                field: "email",
                message: "must not be empty",
            }
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;

    #[test]
    fn defaults_apply_when_omitted() {
        let config: DomainConfig =
            serde_json::from_str(r#"{"name": "example.com", "email": "admin@example.com"}"#)
                .unwrap();
        assert_eq!(config, DomainConfig::new("example.com", "admin@example.com"));
        assert_eq!(config.ttl, 3600);
        assert_eq!(config.comment, "");
    }

    #[test]
    fn required_fields_are_checked() {
        assert!(DomainConfig::new("example.com", "admin@example.com")
            .validate()
            .is_ok());

        let err = DomainConfig::new("", "admin@example.com")
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("'name'"));

        let err = DomainConfig::new("example.com", "").validate().unwrap_err();
        assert!(err.to_string().contains("'email'"));
    }
}
