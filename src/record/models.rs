use crate::common::{is_zero, string_or_number};

use super::RecordId;

/// A record as the remote reports it.
#[derive(serde::Deserialize)]
pub(crate) struct ApiRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: String,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default)]
    pub priority: Option<u16>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(serde::Deserialize)]
pub(crate) struct RecordList {
    #[serde(default)]
    pub records: Vec<ApiRecord>,
}

/// A ttl or priority left out lets the remote apply its own default.
#[derive(serde::Serialize)]
pub(crate) struct RecordCreate<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub data: &'a str,
    #[serde(skip_serializing_if = "is_zero")]
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    pub comment: &'a str,
}

#[derive(serde::Serialize)]
pub(crate) struct RecordCreateList<'a> {
    pub records: Vec<RecordCreate<'a>>,
}

#[derive(serde::Serialize)]
pub(crate) struct RecordUpdate<'a> {
    pub name: &'a str,
    pub data: &'a str,
    #[serde(skip_serializing_if = "is_zero")]
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    pub comment: &'a str,
}

/// Observed state of a record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Record {
    pub id: RecordId,
    pub domain_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: String,
    pub ttl: u32,
    pub priority: u16,
    pub comment: String,
}

impl Record {
    pub(crate) fn from_api(domain_id: &str, value: ApiRecord) -> Self {
        Self {
            id: RecordId::new(domain_id, value.id),
            domain_id: domain_id.to_string(),
            name: value.name,
            kind: value.kind,
            data: value.data,
            ttl: value.ttl,
            priority: value.priority.unwrap_or_default(),
            comment: value.comment.unwrap_or_default(),
        }
    }
}
