use std::io::{self, BufRead, Write};

use storedash_client::Confirmer;

/// y/N question on the controlling terminal. Anything but an explicit yes
/// declines, as does a closed stdin.
pub struct StdinConfirm;

#[async_trait::async_trait]
impl Confirmer for StdinConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        let prompt = format!("{prompt} [y/N] ");
        tokio::task::spawn_blocking(move || ask(&prompt))
            .await
            .unwrap_or(false)
    }
}

fn ask(prompt: &str) -> bool {
    let mut stderr = io::stderr();
    let _ = write!(stderr, "{prompt}");
    let _ = stderr.flush();

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y" | "yes" | "Yes")
}
