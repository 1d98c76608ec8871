use std::collections::BTreeMap;
use std::sync::Arc;

use crate::common::{key_file_or_string, DataSource, Resource, Result, Transport, UreqTransport};
use crate::config::{ProviderConfig, DEFAULT_AUTH_URL};
use crate::domain::{DomainDataSource, DomainResource};
use crate::record::RecordResource;
use crate::schema::{Attribute, AttributeType, DefaultValue, ProviderSchema};
use crate::session::{ClientVersions, Session};

/// Entry point for the orchestrating host: declares what can be configured
/// and managed, and turns provider settings into a [`Session`].
#[derive(Debug, Clone)]
pub struct Provider {
    versions: ClientVersions,
}

impl Provider {
    pub fn new(versions: ClientVersions) -> Self {
        Self { versions }
    }

    pub fn schema() -> ProviderSchema {
        ProviderSchema {
            provider: vec![
                Attribute::optional(
                    "auth_url",
                    AttributeType::String,
                    DefaultValue::String(DEFAULT_AUTH_URL),
                )
                .env("OS_AUTH_URL")
                .describe("The Identity authentication URL."),
                Attribute::required("user_name", AttributeType::String)
                    .env("OS_USERNAME")
                    .describe("Username to login with."),
                Attribute::required("password", AttributeType::String)
                    .env("OS_PASSWORD")
                    .sensitive()
                    .describe("Password to login with."),
            ],
            resources: BTreeMap::from([
                (DomainResource::NAME, DomainResource::schema()),
                (RecordResource::NAME, RecordResource::schema()),
            ]),
            data_sources: BTreeMap::from([(DomainDataSource::NAME, DomainDataSource::schema())]),
        }
    }

    pub fn configure(&self, config: ProviderConfig) -> Result<Session> {
        self.configure_with(Arc::new(UreqTransport::new()), config)
    }

    pub fn configure_with(
        &self,
        transport: Arc<dyn Transport>,
        config: ProviderConfig,
    ) -> Result<Session> {
        let password = key_file_or_string(config.password, "password")?;

        let session = Session::authenticate_with(
            transport,
            &config.auth_url,
            &config.user_name,
            &password,
            &self.versions,
        )?;

        tracing::info!(dns_url = session.dns_url().as_str(), "Initialized raxclouddns client");
        Ok(session)
    }
}
