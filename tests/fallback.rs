use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::anyhow;
use serde_json::json;

use cricket_terminal::fallback::{
    attempt, decode_body, Body, Method, Transport, TransportRequest, TransportResponse,
};

#[derive(Default)]
struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<TransportResponse, String>>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedTransport {
    fn push_ok(&self, status: u16, body: &str) {
        self.replies.borrow_mut().push_back(Ok(TransportResponse {
            status,
            body: body.to_string(),
        }));
    }

    fn push_err(&self, message: &str) {
        self.replies.borrow_mut().push_back(Err(message.to_string()));
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, req: &TransportRequest<'_>) -> anyhow::Result<TransportResponse> {
        self.calls.borrow_mut().push(req.url.to_string());
        match self.replies.borrow_mut().pop_front() {
            Some(Ok(resp)) => Ok(resp),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("script exhausted")),
        }
    }
}

fn urls() -> Vec<String> {
    vec![
        "http://a.test/getAllPlayer".to_string(),
        "http://b.test/getAllPlayer".to_string(),
        "http://c.test/getAllPlayer".to_string(),
    ]
}

#[test]
fn falls_back_until_first_success() {
    let transport = ScriptedTransport::default();
    transport.push_err("connection refused");
    transport.push_ok(500, "server error");
    transport.push_ok(200, r#"[{"playerName":"Rahul"}]"#);

    let mut logged = Vec::new();
    let outcome = attempt(
        &transport,
        Method::Get,
        &urls(),
        None,
        None,
        &mut |line| logged.push(line),
    );

    assert!(outcome.ok);
    assert_eq!(outcome.status, Some(200));
    assert_eq!(
        outcome.body,
        Some(Body::Json(json!([{"playerName": "Rahul"}])))
    );
    assert_eq!(outcome.url, "http://c.test/getAllPlayer");
    assert_eq!(transport.calls(), urls());
    assert_eq!(
        logged.iter().filter(|l| l.starts_with("[WARN]")).count(),
        2
    );
}

#[test]
fn exhaustion_returns_last_outcome() {
    let transport = ScriptedTransport::default();
    transport.push_err("connection refused");
    transport.push_ok(500, "bad");
    transport.push_ok(503, "down");

    let outcome = attempt(&transport, Method::Post, &urls(), None, None, &mut |_| {});

    assert!(!outcome.ok);
    assert_eq!(outcome.status, Some(503));
    assert_eq!(outcome.body, Some(Body::Text("down".to_string())));
    assert_eq!(outcome.url, "http://c.test/getAllPlayer");
    assert_eq!(transport.calls(), urls());
}

#[test]
fn stops_at_first_success() {
    let transport = ScriptedTransport::default();
    transport.push_ok(200, "{}");

    let outcome = attempt(&transport, Method::Get, &urls(), None, None, &mut |_| {});

    assert!(outcome.ok);
    assert_eq!(transport.calls().len(), 1);
}

#[test]
fn empty_candidate_list_fails_without_calls() {
    let transport = ScriptedTransport::default();
    let outcome = attempt(&transport, Method::Get, &[], None, None, &mut |_| {});

    assert!(!outcome.ok);
    assert_eq!(outcome.error.as_deref(), Some("no endpoints configured"));
    assert!(transport.calls().is_empty());
}

#[test]
fn non_success_json_body_is_preserved() {
    let transport = ScriptedTransport::default();
    transport.push_err("refused");
    transport.push_err("refused");
    transport.push_ok(500, r#"{"error":"boom"}"#);

    let outcome = attempt(&transport, Method::Post, &urls(), None, None, &mut |_| {});

    assert!(!outcome.ok);
    assert_eq!(outcome.body, Some(Body::Json(json!({"error": "boom"}))));
}

#[test]
fn transport_error_carries_no_status() {
    let transport = ScriptedTransport::default();
    transport.push_err("dns failure");

    let single = vec!["http://a.test/addPlayer".to_string()];
    let outcome = attempt(&transport, Method::Post, &single, None, None, &mut |_| {});

    assert!(!outcome.ok);
    assert_eq!(outcome.status, None);
    assert!(outcome.error.as_deref().is_some_and(|e| e.contains("dns failure")));
}

#[test]
fn decode_body_speculatively_parses_json() {
    assert_eq!(decode_body("[1,2]"), Body::Json(json!([1, 2])));
    assert_eq!(decode_body(" {\"a\":1} "), Body::Json(json!({"a": 1})));
    assert_eq!(decode_body("not json"), Body::Text("not json".to_string()));
    assert_eq!(decode_body(""), Body::Text(String::new()));
}
