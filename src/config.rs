use std::fmt;

pub const DEFAULT_AUTH_URL: &str = "https://identity.api.rackspacecloud.com/v2.0/";

fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}

/// Provider-level settings supplied by the orchestrating host.
#[derive(Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default, alias = "username")]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
}

impl ProviderConfig {
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            auth_url: default_auth_url(),
            user_name: user_name.into(),
            password: password.into(),
        }
    }

    /// Reads `OS_AUTH_URL`, `OS_USERNAME` and `OS_PASSWORD`, with any given
    /// overrides taking precedence.
    #[cfg(feature = "cli")]
    pub fn from_env(
        auth_url: Option<String>,
        user_name: Option<String>,
        password: Option<String>,
    ) -> crate::common::Result<Self> {
        let build = || -> Result<Self, ::config::ConfigError> {
            ::config::Config::builder()
                .add_source(::config::Environment::with_prefix("OS"))
                .set_override_option("auth_url", auth_url)?
                .set_override_option("username", user_name)?
                .set_override_option("password", password)?
                .build()?
                .try_deserialize()
        };

        build().map_err(|err| {
            crate::common::ConfigSnafu {
                message: err.to_string(),
                prefix: "provider",
            }
            .build()
        })
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("auth_url", &self.auth_url)
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_url_defaults_to_rackspace_identity() {
        let config: ProviderConfig =
            serde_json::from_str(r#"{"user_name": "dnsadmin", "password": "secret"}"#).unwrap();
        assert_eq!(config.auth_url, DEFAULT_AUTH_URL);
        assert_eq!(config, ProviderConfig::new("dnsadmin", "secret"));
    }

    #[test]
    fn username_alias_is_accepted() {
        let config: ProviderConfig =
            serde_json::from_str(r#"{"username": "dnsadmin"}"#).unwrap();
        assert_eq!(config.user_name, "dnsadmin");
        assert_eq!(config.password, "");
    }

    #[test]
    fn password_is_redacted() {
        let config = ProviderConfig::new("dnsadmin", "hunter2");
        let shown = format!("{config:?}");
        assert!(shown.contains("dnsadmin"));
        assert!(!shown.contains("hunter2"));
    }

    // Both cases share one test since the OS_* variables are process-wide.
    #[cfg(feature = "cli")]
    #[test]
    fn environment_with_overrides() {
        std::env::set_var("OS_USERNAME", "envuser");
        std::env::set_var("OS_PASSWORD", "envpw");

        let from_env = ProviderConfig::from_env(None, None, None);
        let overridden = ProviderConfig::from_env(
            Some("https://identity.test/v2.0/".to_string()),
            Some("cliuser".to_string()),
            None,
        );

        std::env::remove_var("OS_USERNAME");
        std::env::remove_var("OS_PASSWORD");

        let from_env = from_env.unwrap();
        assert_eq!(from_env.user_name, "envuser");
        assert_eq!(from_env.password, "envpw");

        let overridden = overridden.unwrap();
        assert_eq!(overridden.auth_url, "https://identity.test/v2.0/");
        assert_eq!(overridden.user_name, "cliuser");
        assert_eq!(overridden.password, "envpw");
    }
}
