use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Debug)]
pub struct TransportRequest<'a> {
    pub method: Method,
    pub url: &'a str,
    pub auth: Option<&'a str>,
    pub body: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// One wire exchange against one URL. Implementations must not retry.
pub trait Transport {
    fn execute(&self, req: &TransportRequest<'_>) -> anyhow::Result<TransportResponse>;
}

/// Response body after the speculative JSON parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Text(String),
}

impl Body {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            Body::Text(_) => None,
        }
    }
}

/// Parse failure degrades to the raw text; never an error.
pub fn decode_body(raw: &str) -> Body {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Body::Text(String::new());
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => Body::Json(value),
        Err(_) => Body::Text(raw.to_string()),
    }
}

#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub ok: bool,
    pub status: Option<u16>,
    pub body: Option<Body>,
    pub error: Option<String>,
    pub url: String,
}

impl FetchOutcome {
    fn from_response(url: &str, resp: TransportResponse) -> Self {
        Self {
            ok: (200..300).contains(&resp.status),
            status: Some(resp.status),
            body: Some(decode_body(&resp.body)),
            error: None,
            url: url.to_string(),
        }
    }

    fn from_error(url: &str, err: anyhow::Error) -> Self {
        Self {
            ok: false,
            status: None,
            body: None,
            error: Some(format!("{err:#}")),
            url: url.to_string(),
        }
    }

    fn exhausted() -> Self {
        Self {
            ok: false,
            status: None,
            body: None,
            error: Some("no endpoints configured".to_string()),
            url: String::new(),
        }
    }

    pub fn failure_summary(&self) -> String {
        if let Some(status) = self.status {
            format!("http {status}")
        } else if let Some(error) = &self.error {
            error.clone()
        } else {
            "unknown failure".to_string()
        }
    }
}

/// Try each candidate URL in order, one attempt per candidate, and stop at
/// the first success. On exhaustion the last recorded outcome is returned.
pub fn attempt(
    transport: &dyn Transport,
    method: Method,
    urls: &[String],
    auth: Option<&str>,
    body: Option<&str>,
    log: &mut dyn FnMut(String),
) -> FetchOutcome {
    let mut last = FetchOutcome::exhausted();
    for url in urls {
        log(format!("[INFO] {} {}", method.as_str(), url));
        let request = TransportRequest {
            method,
            url,
            auth,
            body,
        };
        let outcome = match transport.execute(&request) {
            Ok(resp) => FetchOutcome::from_response(url, resp),
            Err(err) => FetchOutcome::from_error(url, err),
        };
        if outcome.ok {
            return outcome;
        }
        log(format!(
            "[WARN] {} {} failed: {}",
            method.as_str(),
            url,
            outcome.failure_summary()
        ));
        last = outcome;
    }
    last
}
