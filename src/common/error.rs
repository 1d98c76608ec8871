use snafu::prelude::*;

/// Broad classes of failure, as reported to the orchestrating host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Validation,
    NotFound,
    Ambiguous,
    Remote,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("'auth_url' must be left as the default or specified"))]
    MissingEndpoint,
    #[snafu(display("No username supplied via 'user_name' or OS_USERNAME env"))]
    MissingUsername,
    #[snafu(display("No password supplied via 'password' or OS_PASSWORD env"))]
    MissingPassword,
    #[snafu(display("{prefix}: {message}"))]
    ConfigError { message: String, prefix: String },
    #[snafu(display("No '{service_type}' endpoint in the service catalog"))]
    ServiceNotFound { service_type: String },
    #[snafu(display("Authentication against {url} failed: {source}"))]
    AuthRejected {
        url: String,
        #[snafu(source(from(Error, Box::new)))]
        source: Box<Error>,
    },

    #[snafu(display("Cannot supply an empty domain name"))]
    EmptyQuery,
    #[snafu(display("Invalid resource ID '{id}'"))]
    MalformedId { id: String },
    #[snafu(display("Invalid value for '{field}': {message}"))]
    InvalidField { field: String, message: String },

    #[snafu(display("{kind} '{id}' not found"))]
    NotFound { kind: String, id: String },
    #[snafu(display("No results found for '{name}'"))]
    NoResults { name: String },
    #[snafu(display("Too many results found for '{name}'"))]
    Ambiguous { name: String, count: usize },

    #[snafu(display("{method} {url} failed: {source}"))]
    RequestError {
        url: String,
        method: String,
        source: ureq::Error,
    },
    #[snafu(display("{method} {url} returned {status}: {message}"))]
    ApiError {
        url: String,
        method: String,
        status: u16,
        message: String,
    },
    #[snafu(display("{message}: {source}"))]
    ResponseError {
        message: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[snafu(display("Remote returned no result for {what}"))]
    MissingResult { what: String },
    #[snafu(display("Job {job_id} failed: {message}"))]
    JobFailed { job_id: String, message: String },
    #[snafu(display("Job {job_id} did not finish after {polls} polls"))]
    JobTimeout { job_id: String, polls: u32 },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingEndpoint
            | Error::MissingUsername
            | Error::MissingPassword
            | Error::ConfigError { .. }
            | Error::ServiceNotFound { .. } => ErrorKind::Configuration,
            Error::EmptyQuery | Error::MalformedId { .. } | Error::InvalidField { .. } => {
                ErrorKind::Validation
            }
            Error::NotFound { .. } | Error::NoResults { .. } => ErrorKind::NotFound,
            Error::Ambiguous { .. } => ErrorKind::Ambiguous,
            Error::AuthRejected { .. }
            | Error::RequestError { .. }
            | Error::ApiError { .. }
            | Error::ResponseError { .. }
            | Error::MissingResult { .. }
            | Error::JobFailed { .. }
            | Error::JobTimeout { .. } => ErrorKind::Remote,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
