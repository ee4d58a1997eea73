use std::fmt::{Display, Formatter};

use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(JsonValue),
    Form(Vec<(String, String)>),
}

/// Declarative description of one HTTP request against a backend.
///
/// Adapters build these; `HttpExecutor` is the only code that turns them
/// into real requests.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub label: &'static str,
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl RequestSpec {
    pub fn get(label: &'static str, url: String) -> Self {
        Self {
            label,
            method: HttpMethod::Get,
            url,
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn post(label: &'static str, url: String) -> Self {
        Self {
            method: HttpMethod::Post,
            ..Self::get(label, url)
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", &format!("Bearer {}", token))
    }

    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = RequestBody::Json(body);
        self.header("Content-Type", "application/json")
    }

    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        self.body = RequestBody::Form(pairs(fields));
        self
    }

    pub fn query(mut self, params: &[(&str, &str)]) -> Self {
        self.query = pairs(params);
        self
    }
}

fn pairs(fields: &[(&str, &str)]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
