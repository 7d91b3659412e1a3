use async_trait::async_trait;
use ftags_viewer::{Confirmation, Notifier, UntagPrompt};
use std::io::{BufRead, Write};

/// Answers yes without asking (`--yes`).
pub struct AssumeYes;

#[async_trait]
impl Confirmation for AssumeYes {
    async fn confirm(&self, _prompt: &UntagPrompt) -> bool {
        true
    }
}

/// Asks on stderr and reads the answer from stdin.
pub struct StdinConfirmation;

#[async_trait]
impl Confirmation for StdinConfirmation {
    async fn confirm(&self, prompt: &UntagPrompt) -> bool {
        let question = format!("{} {} [y/N] ", prompt.title, prompt.message);
        let answer = tokio::task::spawn_blocking(move || {
            let mut stderr = std::io::stderr();
            let _ = write!(stderr, "{question}");
            let _ = stderr.flush();
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line).map(|_| line)
        })
        .await;
        match answer {
            Ok(Ok(line)) => is_yes(&line),
            Ok(Err(err)) => {
                log::warn!("failed to read the answer: {err}");
                false
            }
            Err(err) => {
                log::warn!("confirmation task failed: {err}");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Notices go to the log, so `--quiet` still shows them.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notice(&self, message: &str) {
        log::warn!("{message}");
    }
}
