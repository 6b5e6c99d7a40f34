pub mod loader;
pub mod logging;
pub mod source;
pub mod view;

pub use loader::{ContentLoader, DetailView, LandingView, LoaderConfig};
pub use logging::{init_logging, Logger};
pub use source::{create_source, ContentSource, FileSource, HttpSource};
pub use view::{LogNotifier, Notifier, Page, ViewState};

pub mod prelude {
    pub use super::{ContentLoader, ContentSource, Page, ViewState};
    pub use pb_core::{Article, Error, Result};
}
