use serde::{Deserialize, Deserializer};

use crate::schema::ResourceSchema;
use crate::session::Session;

use super::{Error, Result};

/// A manageable remote entity with the create/read/update/delete lifecycle
/// the orchestrating host drives.
pub trait Resource {
    type Config;
    type Id;
    type State;

    const NAME: &'static str;

    fn schema() -> ResourceSchema;

    fn create(session: &Session, config: &Self::Config) -> Result<Self::State>;
    fn read(session: &Session, id: &Self::Id) -> Result<Self::State>;
    fn update(session: &Session, id: &Self::Id, config: &Self::Config) -> Result<Self::State>;
    fn delete(session: &Session, id: &Self::Id) -> Result<()>;

    /// Populates state from an identifier supplied outside the normal lifecycle.
    fn import(session: &Session, id: &str) -> Result<Self::State>;
}

/// A read-only lookup.
pub trait DataSource {
    type Query;
    type State;

    const NAME: &'static str;

    fn schema() -> ResourceSchema;

    fn read(session: &Session, query: &Self::Query) -> Result<Self::State>;
}

/// Opens a span that ties together every log line of one adapter operation.
pub(crate) fn operation_span(resource: &str, operation: &str) -> tracing::Span {
    tracing::info_span!(
        "operation",
        resource = resource,
        operation = operation,
        operation_id = %uuid::Uuid::new_v4(),
    )
}

/// Replaces the generic not-found raised by the client with one naming the entity.
pub(crate) fn rename_not_found(err: Error, kind: &str, id: &str) -> Error {
    match err {
        Error::NotFound { .. } => Error::NotFound {
            kind: kind.to_string(),
            id: id.to_string(),
        },
        other => other,
    }
}

/// The remote reports some identifiers as JSON numbers and others as strings.
pub(crate) fn string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}

pub(crate) fn is_zero(value: &u32) -> bool {
    *value == 0
}
