use snafu::prelude::*;

use crate::common::{
    operation_span, rename_not_found, InvalidFieldSnafu, Method, MissingResultSnafu, Resource,
    Result,
};
use crate::schema::{Attribute, AttributeType, DefaultValue, ResourceSchema};
use crate::session::{to_value, Session};

use super::models::{ApiRecord, RecordCreate, RecordCreateList, RecordList, RecordUpdate};
use super::{Record, RecordConfig, RecordId, MAX_PRIORITY};

pub const RECORD_RESOURCE: &str = "raxclouddns_record";

pub struct RecordResource;

impl RecordResource {
    fn url(session: &Session, id: &RecordId) -> url::Url {
        session.url(&["domains", id.domain_id(), "records", id.record_id()])
    }

    fn get(session: &Session, id: &RecordId) -> Result<ApiRecord> {
        session
            .get(Self::url(session, id))
            .map_err(|err| rename_not_found(err, "Record", &id.to_string()))
    }
}

impl Resource for RecordResource {
    type Config = RecordConfig;
    type Id = RecordId;
    type State = Record;

    const NAME: &'static str = RECORD_RESOURCE;

    fn schema() -> ResourceSchema {
        ResourceSchema::new(vec![
            Attribute::required("domain_id", AttributeType::String)
                .force_new()
                .describe("DNS domain where this record will be created"),
            Attribute::required("name", AttributeType::String)
                .describe("DNS record name you want to create"),
            Attribute::required("type", AttributeType::String).describe("DNS record type"),
            Attribute::required("data", AttributeType::String).describe("DNS record data"),
            Attribute::optional("ttl", AttributeType::Int, DefaultValue::Int(0))
                .describe("Time-To-Live (TTL) for the record"),
            Attribute::optional("priority", AttributeType::Int, DefaultValue::Int(0))
                .range(0, MAX_PRIORITY)
                .describe("DNS record priority (MX and SRV only)"),
            Attribute::optional("comment", AttributeType::String, DefaultValue::String(""))
                .describe("User specified comment"),
            Attribute::computed("id", AttributeType::String),
        ])
        .importable()
    }

    fn create(session: &Session, config: &RecordConfig) -> Result<Record> {
        let _span = operation_span(Self::NAME, "create").entered();
        config.validate()?;

        let body = to_value(&RecordCreateList {
            records: vec![RecordCreate {
                name: &config.name,
                kind: &config.kind,
                data: &config.data,
                ttl: config.ttl,
                priority: config.outgoing_priority(&config.kind)?,
                comment: &config.comment,
            }],
        })?;

        let url = session.url(&["domains", config.domain_id.as_str(), "records"]);
        let created: RecordList = session
            .submit_for(Method::Post, url, body)
            .map_err(|err| rename_not_found(err, "Domain", &config.domain_id))?;
        let Some(created) = created.records.into_iter().next() else {
            return MissingResultSnafu {
                what: format!("record {}", config.name),
            }
            .fail();
        };

        let id = RecordId::new(config.domain_id.as_str(), created.id);
        tracing::info!(
            resource = Self::NAME,
            id = %id,
            name = config.name.as_str(),
            kind = config.kind.as_str(),
            "Created record"
        );

        Self::read(session, &id)
    }

    fn read(session: &Session, id: &RecordId) -> Result<Record> {
        let _span = operation_span(Self::NAME, "read").entered();

        let record = Self::get(session, id)?;
        Ok(Record::from_api(id.domain_id(), record))
    }

    fn update(session: &Session, id: &RecordId, config: &RecordConfig) -> Result<Record> {
        let _span = operation_span(Self::NAME, "update").entered();
        config.validate()?;
        ensure!(
            !config.forces_replacement(id),
            InvalidFieldSnafu {
                field: "domain_id",
                message: format!(
                    "moving from '{}' to '{}' requires replacing the record",
                    id.domain_id(),
                    config.domain_id
                ),
            }
        );

        let current = Self::get(session, id)?;
        if current.kind != config.kind {
            tracing::warn!(
                resource = Self::NAME,
                id = %id,
                current = current.kind.as_str(),
                desired = config.kind.as_str(),
                "Record types cannot be changed in place, keeping the current type"
            );
        }

        let body = to_value(&RecordUpdate {
            name: &config.name,
            data: &config.data,
            ttl: config.ttl,
            priority: config.outgoing_priority(&current.kind)?,
            comment: &config.comment,
        })?;
        session
            .submit(Method::Put, Self::url(session, id), Some(body))
            .map_err(|err| rename_not_found(err, "Record", &id.to_string()))?;

        tracing::info!(resource = Self::NAME, id = %id, "Updated record");

        Self::read(session, id)
    }

    fn delete(session: &Session, id: &RecordId) -> Result<()> {
        let _span = operation_span(Self::NAME, "delete").entered();

        session
            .submit(Method::Delete, Self::url(session, id), None)
            .map_err(|err| rename_not_found(err, "Record", &id.to_string()))?;

        tracing::info!(resource = Self::NAME, id = %id, "Deleted record");
        Ok(())
    }

    fn import(session: &Session, id: &str) -> Result<Record> {
        let id: RecordId = id.parse()?;
        Self::read(session, &id)
    }
}
