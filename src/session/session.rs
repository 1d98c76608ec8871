use std::fmt;
use std::sync::Arc;

use snafu::prelude::*;

use crate::common::{
    AuthRejectedSnafu, MissingEndpointSnafu, MissingPasswordSnafu, MissingUsernameSnafu, Result,
    Transport, UreqTransport,
};

use super::identity;
use super::JobPolicy;

/// Service catalog type of the Cloud DNS API.
pub const DNS_SERVICE_TYPE: &str = "rax:dns";

/// Reported when the host does not announce its own version.
pub const DEFAULT_HOST_VERSION: &str = "0.11+compatible";

/// Identifies the calling tool in the user-agent of every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientVersions {
    pub host_name: String,
    pub host_version: String,
}

impl ClientVersions {
    pub fn new(host_name: impl Into<String>, host_version: impl Into<String>) -> Self {
        Self {
            host_name: host_name.into(),
            host_version: host_version.into(),
        }
    }

    pub fn user_agent(&self) -> String {
        let host_version = match self.host_version.is_empty() {
            true => DEFAULT_HOST_VERSION,
            false => self.host_version.as_str(),
        };
        format!(
            "{}/{} {}/{}",
            self.host_name,
            host_version,
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )
    }
}

/// An authenticated handle to the DNS API.
///
/// Created once per process and shared read-only by every adapter call. The
/// token is never refreshed; once it expires, calls fail with the remote's
/// error.
pub struct Session {
    pub(super) transport: Arc<dyn Transport>,
    pub(super) token: String,
    pub(super) dns_url: url::Url,
    pub(super) user_agent: String,
    pub(super) jobs: JobPolicy,
}

impl Session {
    pub fn authenticate(
        endpoint: &str,
        username: &str,
        password: &str,
        versions: &ClientVersions,
    ) -> Result<Self> {
        Self::authenticate_with(
            Arc::new(UreqTransport::new()),
            endpoint,
            username,
            password,
            versions,
        )
    }

    /// Authenticates over the given transport. Credentials are checked for
    /// emptiness before anything is sent.
    pub fn authenticate_with(
        transport: Arc<dyn Transport>,
        endpoint: &str,
        username: &str,
        password: &str,
        versions: &ClientVersions,
    ) -> Result<Self> {
        ensure!(!endpoint.is_empty(), MissingEndpointSnafu);
        ensure!(!username.is_empty(), MissingUsernameSnafu);
        ensure!(!password.is_empty(), MissingPasswordSnafu);

        let tokens_url = identity::tokens_url(endpoint)?;
        let user_agent = versions.user_agent();

        tracing::debug!(
            url = tokens_url.as_str(),
            user = username,
            user_agent = user_agent.as_str(),
            "Authenticating"
        );

        let access = identity::request_token(
            transport.as_ref(),
            &tokens_url,
            &user_agent,
            username,
            password,
        )
        .context(AuthRejectedSnafu {
            url: tokens_url.as_str(),
        })?;

        let dns_url = access.endpoint_for(DNS_SERVICE_TYPE)?;

        tracing::debug!(
            dns_url = dns_url.as_str(),
            expires = access.token.expires.as_deref().unwrap_or("unknown"),
            "Authenticated"
        );

        Ok(Self {
            transport,
            token: access.token.id,
            dns_url,
            user_agent,
            jobs: JobPolicy::default(),
        })
    }

    pub fn with_job_policy(mut self, jobs: JobPolicy) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn dns_url(&self) -> &url::Url {
        &self.dns_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("dns_url", &self.dns_url.as_str())
            .field("user_agent", &self.user_agent)
            .field("jobs", &self.jobs)
            .finish_non_exhaustive()
    }
}
