use serde_json::Value;

use crate::config::{AuthMode, ROSTER_PATH};
use crate::fallback::{attempt, Body, Method};
use crate::player::{roster_row_from_value, RosterRow};
use crate::submit::FlowContext;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterOutcome {
    pub players: Vec<RosterRow>,
    pub error: Option<String>,
}

/// GET the roster through the candidate chain and normalize the body.
/// A read never prompts; with auth required and nothing cached it shows
/// an empty roster instead of erroring.
pub fn fetch_roster(ctx: &FlowContext<'_>, log: &mut dyn FnMut(String)) -> RosterOutcome {
    let auth = match ctx.config.auth {
        AuthMode::Required => {
            let token = ctx.auth.stored_token();
            if token.is_none() {
                log("[INFO] No stored credentials; register once to sign in".to_string());
                return RosterOutcome::default();
            }
            token
        }
        AuthMode::Disabled => None,
    };

    let urls = ctx.config.candidate_urls(ROSTER_PATH);
    let outcome = attempt(ctx.transport, Method::Get, &urls, auth.as_deref(), None, log);

    if !outcome.ok {
        let error = match outcome.status {
            Some(status) => format!("Failed to fetch players (status {status})"),
            None => "Network or parsing error. Check the console log.".to_string(),
        };
        return RosterOutcome {
            players: Vec::new(),
            error: Some(error),
        };
    }

    match outcome.body {
        Some(Body::Json(value)) => normalize_roster(&value),
        _ => RosterOutcome {
            players: Vec::new(),
            error: Some("Response was not valid JSON.".to_string()),
        },
    }
}

/// Accept a bare array, an object carrying a `data` array, or a single
/// object wrapped as a one-element roster. Anything else is an error.
pub fn normalize_roster(body: &Value) -> RosterOutcome {
    let rows: Vec<&Value> = if let Some(list) = body.as_array() {
        list.iter().collect()
    } else if let Some(list) = body.get("data").and_then(Value::as_array) {
        list.iter().collect()
    } else if body.is_object() {
        vec![body]
    } else {
        return RosterOutcome {
            players: Vec::new(),
            error: Some(format!("Unexpected roster payload: {body}")),
        };
    };

    RosterOutcome {
        players: rows.into_iter().map(roster_row_from_value).collect(),
        error: None,
    }
}
