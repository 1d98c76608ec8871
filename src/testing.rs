//! In-memory stand-in for the identity and Cloud DNS endpoints.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};

use crate::common::{Method, Request, Response, Result, Transport};
use crate::session::{ClientVersions, JobPolicy, Session};

pub(crate) const IDENTITY_URL: &str = "https://identity.test/v2.0/";
pub(crate) const DNS_URL: &str = "https://dns.test/v1.0/123456";
pub(crate) const USERNAME: &str = "dnsadmin";
pub(crate) const PASSWORD: &str = "secret";
pub(crate) const TOKEN: &str = "tok-4f1c2e";

const DNS_PREFIX: &str = "/v1.0/123456/";
const ACCOUNT_ID: u64 = 123456;
const CREATED: &str = "2026-10-18T08:35:10.000+0000";
const UPDATED: &str = "2026-10-18T09:12:44.000+0000";
const REMOTE_DEFAULT_TTL: u64 = 3600;

fn respond(status: u16, body: Value) -> Response {
    Response {
        status,
        body: body.to_string(),
    }
}

fn fault(status: u16, message: &str, details: &str) -> Response {
    respond(
        status,
        json!({"code": status, "message": message, "details": details}),
    )
}

fn not_found() -> Response {
    fault(404, "Object not Found.", "")
}

#[derive(Default)]
struct State {
    next_id: u64,
    domains: BTreeMap<u64, Value>,
    records: BTreeMap<(u64, String), Value>,
    jobs: BTreeMap<String, Value>,
    page_cap: Option<usize>,
    fail_next_job: Option<(String, String)>,
}

pub(crate) struct FakeCloudDns {
    state: Mutex<State>,
    requests: Mutex<Vec<Request>>,
}

impl FakeCloudDns {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State {
                next_id: 2725233,
                ..Default::default()
            }),
            requests: Mutex::default(),
        })
    }

    pub fn dns_url(&self) -> url::Url {
        DNS_URL.parse().unwrap()
    }

    pub fn session(self: &Arc<Self>) -> Session {
        Session::authenticate_with(
            self.clone(),
            IDENTITY_URL,
            USERNAME,
            PASSWORD,
            &ClientVersions::new("test", "1.0"),
        )
        .unwrap()
        .with_job_policy(JobPolicy {
            interval: Duration::ZERO,
            max_polls: 5,
        })
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn seed_domain(&self, name: &str, email: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let domain = state.insert_domain(&json!({"name": name, "emailAddress": email}));
        domain["id"].to_string()
    }

    pub fn cap_page_size(&self, cap: usize) {
        self.state.lock().unwrap().page_cap = Some(cap);
    }

    /// The next mutating call starts a job that ends in error and changes nothing.
    pub fn fail_next_job(&self, message: &str, details: &str) {
        self.state.lock().unwrap().fail_next_job = Some((message.into(), details.into()));
    }
}

impl Transport for FakeCloudDns {
    fn send(&self, request: Request) -> Result<Response> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.state.lock().unwrap().route(&request))
    }
}

impl State {
    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn route(&mut self, request: &Request) -> Response {
        if request.url.host_str() == Some("identity.test") {
            return self.identity(request);
        }
        if request.header_value("X-Auth-Token") != Some(TOKEN) {
            return fault(401, "Unauthorized", "Invalid token");
        }

        let Some(rest) = request.url.path().strip_prefix(DNS_PREFIX) else {
            return not_found();
        };
        let segments: Vec<&str> = rest.split('/').collect();
        let query: BTreeMap<String, String> = request.url.query_pairs().into_owned().collect();
        let body = request.body.clone().unwrap_or(Value::Null);

        if request.method != Method::Get {
            if let Some((message, details)) = self.fail_next_job.take() {
                let job_id = format!("job-{}", self.next());
                let failed = json!({
                    "jobId": job_id,
                    "status": "ERROR",
                    "error": {"code": 409, "message": message, "details": details},
                });
                return self.start_job(job_id, failed);
            }
        }

        match (request.method, segments.as_slice()) {
            (Method::Get, ["domains"]) => self.list_domains(&query),
            (Method::Post, ["domains"]) => self.create_domains(&body),
            (Method::Get, ["domains", id]) => match self.domain_key(id) {
                Some(key) => respond(200, self.domains[&key].clone()),
                None => not_found(),
            },
            (Method::Put, ["domains", id]) => self.update_domain(id, &body),
            (Method::Delete, ["domains", id]) => self.delete_domain(id),
            (Method::Post, ["domains", id, "records"]) => self.create_records(id, &body),
            (Method::Get, ["domains", id, "records", record_id]) => {
                match self.record_key(id, record_id) {
                    Some(key) => respond(200, self.records[&key].clone()),
                    None => not_found(),
                }
            }
            (Method::Put, ["domains", id, "records", record_id]) => {
                self.update_record(id, record_id, &body)
            }
            (Method::Delete, ["domains", id, "records", record_id]) => {
                match self.record_key(id, record_id) {
                    Some(key) => {
                        self.records.remove(&key);
                        self.finish(None)
                    }
                    None => not_found(),
                }
            }
            (Method::Get, ["status", job_id]) => self.job_status(job_id, &query),
            _ => not_found(),
        }
    }

    fn identity(&mut self, request: &Request) -> Response {
        if request.method != Method::Post || request.url.path() != "/v2.0/tokens" {
            return not_found();
        }

        let body = request.body.clone().unwrap_or(Value::Null);
        let credentials = &body["auth"]["passwordCredentials"];
        if credentials["username"] != USERNAME || credentials["password"] != PASSWORD {
            return respond(
                401,
                json!({"unauthorized": {
                    "code": 401,
                    "message": "Unable to authenticate user with credentials provided."
                }}),
            );
        }

        respond(
            200,
            json!({"access": {
                "token": {
                    "id": TOKEN,
                    "expires": "2026-10-19T08:35:10.000Z",
                    "tenant": {"id": "123456", "name": "123456"}
                },
                "serviceCatalog": [
                    {"name": "cloudFiles", "type": "object-store",
                     "endpoints": [{"publicURL": "https://files.test/v1/123456"}]},
                    {"name": "cloudDNS", "type": "rax:dns",
                     "endpoints": [{"publicURL": DNS_URL, "tenantId": "123456"}]}
                ],
                "user": {"id": "1", "name": USERNAME}
            }}),
        )
    }

    fn start_job(&mut self, job_id: String, finished: Value) -> Response {
        self.jobs.insert(job_id.clone(), finished);
        respond(
            202,
            json!({
                "jobId": job_id,
                "status": "RUNNING",
                "callbackUrl": format!("{DNS_URL}/status/{job_id}"),
            }),
        )
    }

    fn finish(&mut self, response: Option<Value>) -> Response {
        let job_id = format!("job-{}", self.next());
        let mut finished = json!({"jobId": job_id, "status": "COMPLETED"});
        if let Some(response) = response {
            finished["response"] = response;
        }
        self.start_job(job_id, finished)
    }

    fn job_status(&self, job_id: &str, query: &BTreeMap<String, String>) -> Response {
        let Some(job) = self.jobs.get(job_id) else {
            return not_found();
        };
        let mut job = job.clone();
        if query.get("showDetails").map(String::as_str) != Some("true") {
            if let Some(job) = job.as_object_mut() {
                job.remove("response");
            }
        }
        respond(200, job)
    }

    fn domain_key(&self, id: &str) -> Option<u64> {
        id.parse().ok().filter(|key| self.domains.contains_key(key))
    }

    fn record_key(&self, domain_id: &str, record_id: &str) -> Option<(u64, String)> {
        let key = (self.domain_key(domain_id)?, record_id.to_string());
        self.records.contains_key(&key).then_some(key)
    }

    fn insert_domain(&mut self, input: &Value) -> Value {
        let id = self.next();
        let mut domain = json!({
            "id": id,
            "accountId": ACCOUNT_ID,
            "name": input["name"],
            "emailAddress": input["emailAddress"],
            "ttl": input.get("ttl").cloned().unwrap_or(json!(3600)),
            "created": CREATED,
            "updated": CREATED,
        });
        if let Some(comment) = input["comment"].as_str().filter(|c| !c.is_empty()) {
            domain["comment"] = json!(comment);
        }
        self.domains.insert(id, domain.clone());
        domain
    }

    fn list_domains(&self, query: &BTreeMap<String, String>) -> Response {
        let matching: Vec<Value> = self
            .domains
            .values()
            .filter(|d| query.get("name").map_or(true, |name| d["name"] == name.as_str()))
            .map(|d| {
                json!({
                    "id": d["id"],
                    "name": d["name"],
                    "accountId": d["accountId"],
                    "created": d["created"],
                    "updated": d["updated"],
                })
            })
            .collect();

        let offset: usize = query.get("offset").and_then(|o| o.parse().ok()).unwrap_or(0);
        let mut limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
        if let Some(cap) = self.page_cap {
            limit = limit.min(cap);
        }

        let page: Vec<Value> = matching.iter().skip(offset).take(limit).cloned().collect();
        respond(
            200,
            json!({"domains": page, "totalEntries": matching.len()}),
        )
    }

    fn create_domains(&mut self, body: &Value) -> Response {
        let Some(inputs) = body["domains"].as_array() else {
            return fault(400, "Bad Request", "missing domains");
        };
        if inputs.iter().any(|d| d["name"].as_str().unwrap_or("").is_empty()) {
            return fault(400, "Bad Request", "Domain name is required");
        }

        let created: Vec<Value> = inputs.iter().map(|d| self.insert_domain(d)).collect();
        self.finish(Some(json!({"domains": created})))
    }

    fn update_domain(&mut self, id: &str, body: &Value) -> Response {
        let Some(key) = self.domain_key(id) else {
            return not_found();
        };
        if let Some(domain) = self.domains.get_mut(&key) {
            for field in ["emailAddress", "ttl", "comment"] {
                if let Some(value) = body.get(field) {
                    domain[field] = value.clone();
                }
            }
            domain["updated"] = json!(UPDATED);
        }
        self.finish(None)
    }

    fn delete_domain(&mut self, id: &str) -> Response {
        let Some(key) = self.domain_key(id) else {
            return not_found();
        };
        self.domains.remove(&key);
        self.records.retain(|(domain, _), _| *domain != key);
        self.finish(None)
    }

    fn create_records(&mut self, domain_id: &str, body: &Value) -> Response {
        let Some(domain) = self.domain_key(domain_id) else {
            return not_found();
        };
        let Some(inputs) = body["records"].as_array() else {
            return fault(400, "Bad Request", "missing records");
        };

        let mut created = Vec::new();
        for input in inputs {
            let kind = input["type"].as_str().unwrap_or("").to_string();
            let id = format!("{}-{}", kind, self.next());
            let mut record = json!({
                "id": id,
                "name": input["name"],
                "type": kind,
                "data": input["data"],
                "ttl": input.get("ttl").cloned().unwrap_or(json!(REMOTE_DEFAULT_TTL)),
                "created": CREATED,
                "updated": CREATED,
            });
            if matches!(kind.as_str(), "MX" | "SRV") {
                if let Some(priority) = input.get("priority") {
                    record["priority"] = priority.clone();
                }
            }
            if let Some(comment) = input["comment"].as_str().filter(|c| !c.is_empty()) {
                record["comment"] = json!(comment);
            }
            self.records.insert((domain, id), record.clone());
            created.push(record);
        }

        self.finish(Some(json!({"records": created})))
    }

    fn update_record(&mut self, domain_id: &str, record_id: &str, body: &Value) -> Response {
        let Some(key) = self.record_key(domain_id, record_id) else {
            return not_found();
        };
        if let Some(record) = self.records.get_mut(&key) {
            for field in ["name", "data", "ttl", "priority", "comment"] {
                if let Some(value) = body.get(field) {
                    record[field] = value.clone();
                }
            }
            record["updated"] = json!(UPDATED);
        }
        self.finish(None)
    }
}
