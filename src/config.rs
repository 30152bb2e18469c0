use std::env;

pub const REGISTER_PATH: &str = "/addPlayer";
pub const ROSTER_PATH: &str = "/getAllPlayer";

const LOCAL_BASE: &str = "http://127.0.0.1:8080";
const DEFAULT_BACKEND: &str = "http://localhost:8080";
// Last-resort hosted deployment, kept reachable when neither local base works.
const HOSTED_FALLBACK: &str =
    "https://8080-bbadebbcfeeedcbfddebbacbbcefccfc.premiumproject.examly.io";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Required,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Candidate base URLs, tried in order until one answers.
    pub endpoints: Vec<String>,
    pub auth: AuthMode,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let endpoints = match opt_env("CRICKET_ENDPOINTS") {
            Some(raw) => split_list(&raw),
            None => {
                let backend =
                    opt_env("CRICKET_BACKEND").unwrap_or_else(|| DEFAULT_BACKEND.to_string());
                vec![LOCAL_BASE.to_string(), backend, HOSTED_FALLBACK.to_string()]
            }
        };
        let auth = match opt_env("CRICKET_AUTH").as_deref() {
            Some("off") | Some("0") | Some("false") => AuthMode::Disabled,
            _ => AuthMode::Required,
        };
        Self { endpoints, auth }
    }

    pub fn candidate_urls(&self, path: &str) -> Vec<String> {
        self.endpoints
            .iter()
            .map(|base| format!("{}{}", base.trim_end_matches('/'), path))
            .collect()
    }
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|val| {
        let trimmed = val.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split([',', ';', ' '])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
