use std::fmt;
use std::str::FromStr;

use crate::common::{Error, MalformedIdSnafu};

pub const ID_SEPARATOR: char = ':';

/// Identifies a record together with the domain it lives in.
///
/// Records have no identifier outside their domain, so the pair is carried
/// around as `domain_id:record_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId {
    domain_id: String,
    record_id: String,
}

impl RecordId {
    pub fn new(domain_id: impl Into<String>, record_id: impl Into<String>) -> Self {
        Self {
            domain_id: domain_id.into(),
            record_id: record_id.into(),
        }
    }

    pub fn domain_id(&self) -> &str {
        &self.domain_id
    }

    pub fn record_id(&self) -> &str {
        &self.record_id
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.domain_id, ID_SEPARATOR, self.record_id)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(ID_SEPARATOR) {
            Some((domain_id, record_id)) if !domain_id.is_empty() && !record_id.is_empty() => {
                Ok(Self::new(domain_id, record_id))
            }
            _ => MalformedIdSnafu { id: s }.fail(),
        }
    }
}

impl TryFrom<String> for RecordId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.to_string()
    }
}
