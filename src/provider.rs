use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::auth::{AuthContext, CredentialPrompt, Credentials, FileStore};
use crate::config::AppConfig;
use crate::http_client::HttpTransport;
use crate::roster::fetch_roster;
use crate::state::{Delta, ProviderCommand};
use crate::submit::{submit_player, FlowContext};

/// Resolvable credential request: asks the UI to open its modal and blocks
/// until the user answers or cancels.
pub struct ChannelPrompt {
    tx: Sender<Delta>,
    reply_rx: Receiver<Option<Credentials>>,
}

impl ChannelPrompt {
    pub fn new(tx: Sender<Delta>, reply_rx: Receiver<Option<Credentials>>) -> Self {
        Self { tx, reply_rx }
    }
}

impl CredentialPrompt for ChannelPrompt {
    fn request(&self) -> Option<Credentials> {
        if self.tx.send(Delta::PromptCredentials).is_err() {
            return None;
        }
        self.reply_rx.recv().ok().flatten()
    }
}

/// One command at a time; network activity is strictly sequential.
pub fn spawn_provider(
    config: AppConfig,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
    prompt_rx: Receiver<Option<Credentials>>,
) {
    thread::spawn(move || {
        let transport = HttpTransport;
        let auth = AuthContext::new(Box::new(FileStore::new()));
        let prompt = ChannelPrompt::new(tx.clone(), prompt_rx);

        while let Ok(cmd) = cmd_rx.recv() {
            let ctx = FlowContext {
                config: &config,
                transport: &transport,
                auth: &auth,
            };
            let mut log = |line: String| {
                let _ = tx.send(Delta::Log(line));
            };

            match cmd {
                ProviderCommand::SubmitPlayer { form } => {
                    let outcome = submit_player(&ctx, &form, &prompt, &mut log);
                    let _ = tx.send(Delta::SubmitFinished(outcome));
                }
                ProviderCommand::FetchRoster => {
                    let outcome = fetch_roster(&ctx, &mut log);
                    let _ = tx.send(Delta::RosterFinished(outcome));
                }
                ProviderCommand::ClearCredentials => {
                    auth.clear();
                    let _ = tx.send(Delta::Log("[INFO] Stored credentials cleared".to_string()));
                }
            }
        }
    });
}
