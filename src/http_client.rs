use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::fallback::{Method, Transport, TransportRequest, TransportResponse};

const REQUEST_TIMEOUT_SECS: u64 = 10;

static CLIENT: OnceCell<Client> = OnceCell::new();

pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

pub struct HttpTransport;

impl Transport for HttpTransport {
    fn execute(&self, req: &TransportRequest<'_>) -> Result<TransportResponse> {
        let client = http_client()?;
        let mut builder = match req.method {
            Method::Get => client.get(req.url),
            Method::Post => client.post(req.url),
        };
        builder = builder.header(CONTENT_TYPE, "application/json");
        if let Some(auth) = req.auth {
            builder = builder.header(AUTHORIZATION, auth);
        }
        if let Some(body) = req.body {
            builder = builder.body(body.to_string());
        }

        let resp = builder.send().context("request failed")?;
        let status = resp.status().as_u16();
        let body = resp.text().context("failed reading body")?;
        Ok(TransportResponse { status, body })
    }
}
