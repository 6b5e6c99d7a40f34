use async_trait::async_trait;
use pb_core::{Error, Result};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use url::Url;

/// Where the content index and animation documents are fetched from.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetches the document at `path` and parses it as JSON.
    async fn fetch_json(&self, path: &str) -> Result<serde_json::Value>;

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}

fn parse_body(path: &str, body: &str) -> Result<serde_json::Value> {
    serde_json::from_str(body).map_err(|e| Error::Format(format!("{}: {}", path, e)))
}

pub struct HttpSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base: &str) -> Result<Self> {
        let mut base = Url::parse(base).map_err(|e| Error::InvalidUrl(format!("{}: {}", base, e)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base,
        })
    }

    pub fn resolve(&self, path: &str) -> Result<Url> {
        if let Ok(url) = Url::parse(path) {
            return Ok(url);
        }
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch_json(&self, path: &str) -> Result<serde_json::Value> {
        let url = self.resolve(path)?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        parse_body(path, &body)
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

/// Serves content from a local directory laid out like the site's public root.
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || relative.as_os_str().is_empty() {
            return Err(Error::InvalidUrl(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ContentSource for FileSource {
    async fn fetch_json(&self, path: &str) -> Result<serde_json::Value> {
        let file = self.resolve(path)?;
        tracing::debug!("reading {}", file.display());
        let body = match tokio::fs::read_to_string(&file).await {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::Status {
                    path: path.to_string(),
                    status: 404,
                });
            }
            Err(e) => return Err(e.into()),
        };
        parse_body(path, &body)
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Picks an HTTP source for `http(s)://` locations and a directory otherwise.
pub fn create_source(location: &str) -> Result<Arc<dyn ContentSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Arc::new(HttpSource::new(location)?))
    } else {
        Ok(Arc::new(FileSource::new(location)))
    }
}
