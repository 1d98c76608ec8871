use snafu::prelude::*;

use crate::common::{
    operation_span, rename_not_found, MalformedIdSnafu, Method, MissingResultSnafu, Resource,
    Result,
};
use crate::schema::{Attribute, AttributeType, DefaultValue, ResourceSchema};
use crate::session::{to_value, Session};

use super::models::{ApiDomain, DomainCreate, DomainCreateList, DomainList, DomainUpdate};
use super::{Domain, DomainConfig, DEFAULT_DOMAIN_TTL};

pub const DOMAIN_RESOURCE: &str = "raxclouddns_domain";

/// Attributes of a domain that only the remote sets.
pub(super) fn computed_attributes() -> Vec<Attribute> {
    vec![
        Attribute::computed("id", AttributeType::String),
        Attribute::computed("account_id", AttributeType::String),
        Attribute::computed("created", AttributeType::String),
        Attribute::computed("updated", AttributeType::String),
    ]
}

pub struct DomainResource;

impl DomainResource {
    fn get(session: &Session, id: &str) -> Result<ApiDomain> {
        let mut url = session.url(&["domains", id]);
        url.query_pairs_mut()
            .append_pair("showRecords", "false")
            .append_pair("showSubdomains", "false");
        session
            .get(url)
            .map_err(|err| rename_not_found(err, "Domain", id))
    }
}

impl Resource for DomainResource {
    type Config = DomainConfig;
    type Id = String;
    type State = Domain;

    const NAME: &'static str = DOMAIN_RESOURCE;

    fn schema() -> ResourceSchema {
        let mut attributes = vec![
            Attribute::required("name", AttributeType::String)
                .describe("Domain name you want to create"),
            Attribute::required("email", AttributeType::String).describe("Email address"),
            Attribute::optional(
                "ttl",
                AttributeType::Int,
                DefaultValue::Int(DEFAULT_DOMAIN_TTL.into()),
            )
            .describe("Time-To-Live (TTL) for the domain"),
            Attribute::optional("comment", AttributeType::String, DefaultValue::String(""))
                .describe("User specified comment"),
        ];
        attributes.extend(computed_attributes());
        ResourceSchema::new(attributes).importable()
    }

    fn create(session: &Session, config: &DomainConfig) -> Result<Domain> {
        let _span = operation_span(Self::NAME, "create").entered();
        config.validate()?;

        let body = to_value(&DomainCreateList {
            domains: vec![DomainCreate {
                name: &config.name,
                email_address: &config.email,
                ttl: config.ttl,
                comment: &config.comment,
            }],
        })?;

        let created: DomainList = session.submit_for(Method::Post, session.url(&["domains"]), body)?;
        let Some(created) = created.domains.into_iter().next() else {
            return MissingResultSnafu {
                what: format!("domain {}", config.name),
            }
            .fail();
        };

        tracing::info!(
            resource = Self::NAME,
            id = created.id.as_str(),
            name = config.name.as_str(),
            "Created domain"
        );

        Self::read(session, &created.id)
    }

    fn read(session: &Session, id: &String) -> Result<Domain> {
        let _span = operation_span(Self::NAME, "read").entered();
        ensure!(!id.is_empty(), MalformedIdSnafu { id });

        Ok(Self::get(session, id)?.into())
    }

    fn update(session: &Session, id: &String, config: &DomainConfig) -> Result<Domain> {
        let _span = operation_span(Self::NAME, "update").entered();
        ensure!(!id.is_empty(), MalformedIdSnafu { id });
        config.validate()?;

        let current = Self::get(session, id)?;
        if current.name != config.name {
            tracing::warn!(
                resource = Self::NAME,
                id = id.as_str(),
                current = current.name.as_str(),
                desired = config.name.as_str(),
                "Domain names cannot be changed in place, keeping the current name"
            );
        }

        let body = to_value(&DomainUpdate {
            email_address: &config.email,
            ttl: config.ttl,
            comment: &config.comment,
        })?;
        session
            .submit(Method::Put, session.url(&["domains", current.id.as_str()]), Some(body))
            .map_err(|err| rename_not_found(err, "Domain", id))?;

        tracing::info!(resource = Self::NAME, id = id.as_str(), "Updated domain");

        Self::read(session, id)
    }

    fn delete(session: &Session, id: &String) -> Result<()> {
        let _span = operation_span(Self::NAME, "delete").entered();
        ensure!(!id.is_empty(), MalformedIdSnafu { id });

        session
            .submit(Method::Delete, session.url(&["domains", id.as_str()]), None)
            .map_err(|err| rename_not_found(err, "Domain", id))?;

        tracing::info!(resource = Self::NAME, id = id.as_str(), "Deleted domain");
        Ok(())
    }

    fn import(session: &Session, id: &str) -> Result<Domain> {
        Self::read(session, &id.to_string())
    }
}
