use futures::future::BoxFuture;
use pb_core::{Error, Result};
use std::sync::Arc;
use tracing::{error, info};

/// Lifecycle of one page's data.
///
/// `Failed` is the only state a manual retry can leave; `NotFound` is final.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
    NotFound(String),
}

impl<T> ViewState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    pub fn can_retry(&self) -> bool {
        matches!(self, ViewState::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => ViewState::Ready(value),
            Err(Error::NotFound(slug)) => ViewState::NotFound(slug),
            Err(e) => ViewState::Failed(e.to_string()),
        }
    }
}

/// Transient, user-facing notification of a failed load.
pub trait Notifier: Send + Sync {
    fn notify_error(&self, message: &str);
}

/// Notifier that only logs.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_error(&self, message: &str) {
        error!("🔔 {}", message);
    }
}

type Fetch<T> = Box<dyn Fn() -> BoxFuture<'static, Result<T>> + Send + Sync>;

/// A page that fetches its data on load and can be reloaded after a failure.
pub struct Page<T> {
    name: String,
    fetch: Fetch<T>,
    notifier: Arc<dyn Notifier>,
    state: ViewState<T>,
    attempts: u32,
}

impl<T> Page<T> {
    pub fn new<F>(name: impl Into<String>, notifier: Arc<dyn Notifier>, fetch: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, Result<T>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            fetch: Box::new(fetch),
            notifier,
            state: ViewState::Idle,
            attempts: 0,
        }
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn into_state(self) -> ViewState<T> {
        self.state
    }

    pub async fn load(&mut self) -> &ViewState<T> {
        self.state = ViewState::Loading;
        self.attempts += 1;
        let result = (self.fetch)().await;
        self.state = ViewState::from_result(result);
        match &self.state {
            ViewState::Failed(message) => {
                error!("{} failed to load: {}", self.name, message);
                self.notifier.notify_error(&format!("Failed to load {}", self.name));
            }
            ViewState::NotFound(slug) => {
                error!("{}: no article with slug {}", self.name, slug);
                self.notifier.notify_error(&format!("Blog not found: {}", slug));
            }
            _ => {}
        }
        &self.state
    }

    /// Reloads after a failure. Returns `None` when there is nothing to retry.
    pub async fn retry(&mut self) -> Option<&ViewState<T>> {
        if !self.state.can_retry() {
            return None;
        }
        info!("🔁 Retrying {} (attempt {})", self.name, self.attempts + 1);
        Some(self.load().await)
    }
}
