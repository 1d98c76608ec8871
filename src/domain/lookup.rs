use snafu::prelude::*;

use crate::common::{
    operation_span, AmbiguousSnafu, DataSource, EmptyQuerySnafu, NoResultsSnafu, Resource, Result,
};
use crate::schema::{Attribute, AttributeType, ResourceSchema};
use crate::session::Session;

use super::models::DomainList;
use super::resource::computed_attributes;
use super::{Domain, DomainResource};

pub const DOMAIN_DATA_SOURCE: &str = "raxclouddns_domain";

const PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct DomainLookup {
    pub name: String,
}

impl DomainLookup {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Finds exactly one existing domain by name.
pub struct DomainDataSource;

impl DataSource for DomainDataSource {
    type Query = DomainLookup;
    type State = Domain;

    const NAME: &'static str = DOMAIN_DATA_SOURCE;

    fn schema() -> ResourceSchema {
        let mut attributes = vec![
            Attribute::required("name", AttributeType::String)
                .describe("Domain you want to access"),
            Attribute::computed("ttl", AttributeType::Int),
            Attribute::computed("email", AttributeType::String),
            Attribute::computed("comment", AttributeType::String),
        ];
        attributes.extend(computed_attributes());
        ResourceSchema::new(attributes)
    }

    fn read(session: &Session, query: &DomainLookup) -> Result<Domain> {
        let _span = operation_span(Self::NAME, "lookup").entered();
        let name = query.name.as_str();
        ensure!(!name.is_empty(), EmptyQuerySnafu);

        let mut url = session.url(&["domains"]);
        url.query_pairs_mut().append_pair("name", name);

        let matches = session.get_paginated::<DomainList>(&url, PAGE_SIZE)?;
        tracing::debug!(name, matches = matches.len(), "Listed domains");

        match matches.as_slice() {
            [] => NoResultsSnafu { name }.fail(),
            [only] => DomainResource::read(session, &only.id),
            _ => AmbiguousSnafu {
                name,
                count: matches.len(),
            }
            .fail(),
        }
    }
}
