use crate::common::string_or_number;
use crate::session::Page;

/// A domain as the remote reports it.
#[derive(serde::Deserialize)]
pub(crate) struct ApiDomain {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ttl: u32,
    #[serde(rename = "accountId", default, deserialize_with = "string_or_number")]
    pub account_id: String,
    #[serde(rename = "emailAddress", default)]
    pub email_address: String,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(serde::Deserialize)]
pub(crate) struct DomainList {
    #[serde(default)]
    pub domains: Vec<ApiDomain>,
    #[serde(rename = "totalEntries", default)]
    pub total_entries: Option<usize>,
}

impl Page for DomainList {
    type Item = ApiDomain;

    fn into_parts(self) -> (Vec<ApiDomain>, Option<usize>) {
        (self.domains, self.total_entries)
    }
}

#[derive(serde::Serialize)]
pub(crate) struct DomainCreate<'a> {
    pub name: &'a str,
    #[serde(rename = "emailAddress")]
    pub email_address: &'a str,
    pub ttl: u32,
    pub comment: &'a str,
}

#[derive(serde::Serialize)]
pub(crate) struct DomainCreateList<'a> {
    pub domains: Vec<DomainCreate<'a>>,
}

#[derive(serde::Serialize)]
pub(crate) struct DomainUpdate<'a> {
    #[serde(rename = "emailAddress")]
    pub email_address: &'a str,
    pub ttl: u32,
    pub comment: &'a str,
}

/// Observed state of a domain.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Domain {
    pub id: String,
    pub name: String,
    pub ttl: u32,
    pub account_id: String,
    pub email: String,
    pub created: String,
    pub updated: String,
    pub comment: String,
}

impl From<ApiDomain> for Domain {
    fn from(value: ApiDomain) -> Self {
        Self {
            id: value.id,
            name: value.name,
            ttl: value.ttl,
            account_id: value.account_id,
            email: value.email_address,
            created: value.created.unwrap_or_default(),
            updated: value.updated.unwrap_or_default(),
            comment: value.comment.unwrap_or_default(),
        }
    }
}
