use crossterm::style::Stylize;
use pb_loader::{Notifier, Page, ViewState};
use std::io::{self, BufRead, IsTerminal, Write};

use crate::render;

/// Prints failures to stderr the way the site shows a toast.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify_error(&self, message: &str) {
        tracing::error!("{}", message);
        eprintln!("{}", format!("✖ {}", message).red());
    }
}

fn confirm_retry() -> bool {
    let _ = io::stdout().flush();
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

/// Loads `page`, offering a manual retry after each failure when attached
/// to a terminal.
pub async fn drive<T>(mut page: Page<T>) -> ViewState<T> {
    let interactive = io::stdin().is_terminal();
    page.load().await;
    loop {
        let message = match page.state() {
            ViewState::Failed(message) => message.clone(),
            _ => break,
        };
        print!("{}", render::load_error(&message, interactive));
        if !interactive {
            println!();
            break;
        }
        if !confirm_retry() {
            break;
        }
        page.retry().await;
    }
    page.into_state()
}
