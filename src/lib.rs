pub mod auth;
pub mod config;
pub mod fallback;
pub mod http_client;
pub mod player;
pub mod provider;
pub mod roster;
pub mod state;
pub mod submit;
pub mod validate;
