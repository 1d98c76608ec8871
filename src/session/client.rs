use serde::de::DeserializeOwned;
use serde_json::Value;
use snafu::ResultExt;

use crate::common::{
    ApiSnafu, Method, MissingResultSnafu, NotFoundSnafu, Request, Response, ResponseSnafu, Result,
};

use super::Session;

/// One page of a collection listing.
pub(crate) trait Page: DeserializeOwned {
    type Item;

    /// The page's items and, when reported, the size of the whole collection.
    fn into_parts(self) -> (Vec<Self::Item>, Option<usize>);
}

pub(crate) fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body)
        .boxed()
        .context(ResponseSnafu {
            message: "Failed to deserialize response",
        })
}

pub(crate) fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .boxed()
        .context(ResponseSnafu {
            message: "Failed to deserialize response",
        })
}

pub(crate) fn to_value<T: serde::Serialize>(body: &T) -> Result<Value> {
    serde_json::to_value(body).boxed().context(ResponseSnafu {
        message: "Failed to serialize request",
    })
}

pub(crate) fn check_status(method: Method, url: &url::Url, response: &Response) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }

    match response.status {
        404 => NotFoundSnafu {
            kind: "Object",
            id: url.path(),
        }
        .fail(),
        status => ApiSnafu {
            url: url.as_str(),
            method: method.as_str(),
            status,
            message: remote_message(&response.body),
        }
        .fail(),
    }
}

/// Pulls a human readable message out of an error body. Identity faults nest
/// it one level down, under the fault name.
pub(crate) fn remote_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };

    if let Some(message) = message_of(&value) {
        return message;
    }
    if let Value::Object(map) = &value {
        if let Some(message) = map.values().find_map(message_of) {
            return message;
        }
    }

    body.trim().to_string()
}

fn message_of(value: &Value) -> Option<String> {
    let message = value.get("message")?.as_str()?;
    Some(match value.get("details").and_then(Value::as_str) {
        Some(details) if !details.is_empty() => format!("{message} ({details})"),
        _ => message.to_string(),
    })
}

impl Session {
    /// Builds a URL below the DNS endpoint from raw path segments.
    pub(crate) fn url(&self, segments: &[&str]) -> url::Url {
        let mut url = self.dns_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn send(&self, method: Method, url: url::Url, body: Option<Value>) -> Result<Response> {
        tracing::debug!(url = url.as_str(), method = method.as_str(), "Sending request");

        let mut request = Request::new(method, url.clone())
            .header("X-Auth-Token", &self.token)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = self.transport.send(request)?;
        tracing::debug!(
            url = url.as_str(),
            method = method.as_str(),
            status = response.status,
            "Received response"
        );

        check_status(method, &url, &response)?;
        Ok(response)
    }

    pub(crate) fn get<T: DeserializeOwned>(&self, url: url::Url) -> Result<T> {
        let response = self.send(Method::Get, url, None)?;
        parse_json(&response.body)
    }

    pub(crate) fn get_paginated<P: Page>(
        &self,
        url: &url::Url,
        per_page: usize,
    ) -> Result<Vec<P::Item>> {
        let mut items: Vec<P::Item> = Vec::new();
        loop {
            let mut page_url = url.clone();
            page_url
                .query_pairs_mut()
                .append_pair("limit", &per_page.to_string())
                .append_pair("offset", &items.len().to_string());

            let page: P = self.get(page_url)?;
            let (mut batch, total) = page.into_parts();
            let fetched = batch.len();
            items.append(&mut batch);

            if let Some(total) = total {
                if fetched > 0 && items.len() < total {
                    continue;
                }
            }

            return Ok(items);
        }
    }

    /// Issues a mutating call and follows the job it starts to completion,
    /// returning the job's result document, if any.
    pub(crate) fn submit(
        &self,
        method: Method,
        url: url::Url,
        body: Option<Value>,
    ) -> Result<Option<Value>> {
        let response = self.send(method, url, body)?;
        if response.body.trim().is_empty() {
            return Ok(None);
        }

        let job = parse_json(&response.body)?;
        self.wait_for_job(job)
    }

    /// Like [`Session::submit`] for calls whose job must produce a result.
    pub(crate) fn submit_for<T: DeserializeOwned>(
        &self,
        method: Method,
        url: url::Url,
        body: Value,
    ) -> Result<T> {
        let what = url.path().to_string();
        match self.submit(method, url, Some(body))? {
            Some(value) => from_value(value),
            None => MissingResultSnafu { what }.fail(),
        }
    }
}
