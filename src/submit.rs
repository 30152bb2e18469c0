use std::collections::BTreeMap;

use crate::auth::{token_preview, AuthContext, CredentialPrompt};
use crate::config::{AppConfig, AuthMode, REGISTER_PATH};
use crate::fallback::{attempt, Body, FetchOutcome, Method, Transport};
use crate::player::{Field, FormValues};
use crate::validate::validate_form;

/// Everything a flow needs, injected so tests can script each piece.
pub struct FlowContext<'a> {
    pub config: &'a AppConfig,
    pub transport: &'a dyn Transport,
    pub auth: &'a AuthContext,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Invalid(BTreeMap<Field, String>),
    AuthRequired,
    Failed { message: String },
    Registered,
}

/// Validate, authenticate, then POST through the candidate chain.
pub fn submit_player(
    ctx: &FlowContext<'_>,
    form: &FormValues,
    prompt: &dyn CredentialPrompt,
    log: &mut dyn FnMut(String),
) -> SubmitOutcome {
    let errors = validate_form(form);
    if !errors.is_empty() {
        return SubmitOutcome::Invalid(errors);
    }

    // validate_form checks the selections, so to_record cannot miss here.
    let Some(record) = form.to_record() else {
        return SubmitOutcome::Failed {
            message: "Form state is not submittable.".to_string(),
        };
    };

    let auth = match ctx.config.auth {
        AuthMode::Required => match ctx.auth.token(prompt, log) {
            Some(token) => {
                log(format!(
                    "[INFO] Authorization header: {}",
                    token_preview(&token)
                ));
                Some(token)
            }
            None => return SubmitOutcome::AuthRequired,
        },
        AuthMode::Disabled => None,
    };

    let payload = match serde_json::to_string(&record) {
        Ok(payload) => payload,
        Err(err) => {
            return SubmitOutcome::Failed {
                message: format!("Could not encode player: {err}"),
            }
        }
    };

    let urls = ctx.config.candidate_urls(REGISTER_PATH);
    let outcome = attempt(
        ctx.transport,
        Method::Post,
        &urls,
        auth.as_deref(),
        Some(&payload),
        log,
    );

    if outcome.ok {
        SubmitOutcome::Registered
    } else {
        SubmitOutcome::Failed {
            message: failure_message(&outcome),
        }
    }
}

/// Surface the last failure's detail: body if any, else the bare status.
pub fn failure_message(outcome: &FetchOutcome) -> String {
    let Some(status) = outcome.status else {
        return "Network error. Check the console log for details.".to_string();
    };
    let detail = match &outcome.body {
        Some(Body::Json(value)) => value.to_string(),
        Some(Body::Text(text)) if !text.trim().is_empty() => text.clone(),
        _ => format!("status {status}"),
    };
    format!("Failed to register player. Server response: {detail}")
}
