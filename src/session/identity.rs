use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::common::{ConfigSnafu, Method, Request, Result, ServiceNotFoundSnafu, Transport};

use super::client::{check_status, parse_json};

#[derive(Serialize)]
struct AuthRequest<'a> {
    auth: Auth<'a>,
}

#[derive(Serialize)]
struct Auth<'a> {
    #[serde(rename = "passwordCredentials")]
    password_credentials: PasswordCredentials<'a>,
}

#[derive(Serialize)]
struct PasswordCredentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    access: Access,
}

#[derive(Deserialize)]
pub(super) struct Access {
    pub token: Token,
    #[serde(rename = "serviceCatalog", default)]
    pub service_catalog: Vec<CatalogEntry>,
}

#[derive(Deserialize)]
pub(super) struct Token {
    pub id: String,
    #[serde(default)]
    pub expires: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct CatalogEntry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

#[derive(Deserialize)]
pub(super) struct Endpoint {
    #[serde(rename = "publicURL")]
    pub public_url: url::Url,
}

impl Access {
    /// Public URL of the first endpoint registered for the service type.
    pub fn endpoint_for(&self, service_type: &str) -> Result<url::Url> {
        self.service_catalog
            .iter()
            .filter(|entry| entry.kind == service_type)
            .flat_map(|entry| entry.endpoints.iter())
            .map(|endpoint| endpoint.public_url.clone())
            .find(|url| !url.cannot_be_a_base())
            .context(ServiceNotFoundSnafu { service_type })
    }
}

/// Resolves the token endpoint below the identity URL, tolerating a missing
/// trailing slash.
pub(super) fn tokens_url(endpoint: &str) -> Result<url::Url> {
    let mut base = url::Url::parse(endpoint).map_err(|err| {
        ConfigSnafu {
            message: format!("Invalid URL {endpoint}: {err}"),
            prefix: "auth_url",
        }
        .build()
    })?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("tokens").map_err(|err| {
        ConfigSnafu {
            message: format!("Invalid URL {endpoint}: {err}"),
            prefix: "auth_url",
        }
        .build()
    })
}

pub(super) fn request_token(
    transport: &dyn Transport,
    url: &url::Url,
    user_agent: &str,
    username: &str,
    password: &str,
) -> Result<Access> {
    let body = AuthRequest {
        auth: Auth {
            password_credentials: PasswordCredentials { username, password },
        },
    };
    let body = serde_json::to_value(body)
        .boxed()
        .context(crate::common::ResponseSnafu {
            message: "Failed to serialize credentials",
        })?;

    let request = Request::new(Method::Post, url.clone())
        .header("User-Agent", user_agent)
        .header("Accept", "application/json")
        .json(body);

    let response = transport.send(request)?;
    check_status(Method::Post, url, &response)?;

    let parsed: AuthResponse = parse_json(&response.body)?;
    Ok(parsed.access)
}
