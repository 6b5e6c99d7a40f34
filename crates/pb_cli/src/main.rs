use anyhow::{bail, Result};
use clap::Parser;
use futures::FutureExt;
use pb_core::reading_time::DEFAULT_WORDS_PER_MINUTE;
use pb_core::site::{self, NewsletterForm};
use pb_core::{BookmarkSet, SiteConfig};
use pb_loader::{init_logging, ContentLoader, Logger, Notifier, Page, ViewState};
use pb_storage::{create_storage, BookmarkManager};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;

mod render;
mod ui;

use ui::TerminalNotifier;

#[derive(Parser, Debug)]
#[command(author, version, about = "Read the publication from your terminal", long_about = None)]
pub struct Cli {
    /// Base URL or directory serving data.json and the animation files
    #[arg(long, default_value = "public")]
    source: String,
    /// Where bookmarks are kept: memory or file
    #[arg(long, default_value = "file")]
    storage: String,
    #[arg(long)]
    storage_path: Option<PathBuf>,
    /// Reading speed used when an article has no published reading time
    #[arg(long, default_value_t = DEFAULT_WORDS_PER_MINUTE)]
    wpm: u32,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show the landing page
    List {
        /// Newest articles first
        #[arg(long)]
        latest: bool,
    },
    /// Show one article
    Show { slug: String },
    /// Search headings, subheadings and tags
    Search { query: String },
    /// Toggle the bookmark on an article
    Bookmark { slug: String },
    /// List bookmarked articles
    Bookmarks,
    /// Show the site navigation
    Nav,
    /// Sign up for the newsletter
    Subscribe {
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        job_title: String,
        #[arg(long, default_value = "")]
        job_level: String,
        #[arg(long, default_value = "")]
        company: String,
        /// Agree to receive newsletters and other communications
        #[arg(long)]
        consent: bool,
    },
}

struct App {
    loader: Arc<ContentLoader>,
    bookmarks: BookmarkManager,
    notifier: Arc<dyn Notifier>,
    log: Logger,
}

impl App {
    async fn new(config: &SiteConfig, log: Logger) -> Result<Self> {
        let loader = Arc::new(ContentLoader::from_site_config(config)?);
        let storage = create_storage(&config.storage, &config.storage_path).await?;
        log.debug(&format!("content from {}, bookmarks in {} storage", config.source, config.storage));
        Ok(Self {
            loader,
            bookmarks: BookmarkManager::with_key(storage, config.bookmark_key.clone()),
            notifier: Arc::new(TerminalNotifier),
            log,
        })
    }

    async fn landing(&self, latest: bool) -> Result<()> {
        let loader = self.loader.clone();
        let page = Page::new("blogs", self.notifier.clone(), move || {
            let loader = loader.clone();
            async move { loader.load_landing().await }.boxed()
        });
        match ui::drive(page).await {
            ViewState::Ready(view) => {
                let bookmarks = self.load_bookmarks().await;
                print!("{}", render::landing(&view, &bookmarks, latest));
                Ok(())
            }
            _ => bail!("landing page failed to load"),
        }
    }

    async fn detail(&self, slug: String) -> Result<()> {
        let loader = self.loader.clone();
        let wanted = slug.clone();
        let page = Page::new("blog content", self.notifier.clone(), move || {
            let loader = loader.clone();
            let slug = wanted.clone();
            async move { loader.load_detail(&slug).await }.boxed()
        });
        match ui::drive(page).await {
            ViewState::Ready(view) => {
                let bookmarked = self.load_bookmarks().await.contains(&view.article.id);
                print!("{}", render::detail(&view, bookmarked));
                Ok(())
            }
            ViewState::NotFound(slug) => {
                print!("{}", render::not_found(&slug));
                bail!("no article with slug {}", slug)
            }
            _ => bail!("article {} failed to load", slug),
        }
    }

    async fn search(&self, query: &str) -> Result<()> {
        let Some(path) = site::search_path(query) else {
            bail!("search query is empty");
        };
        print!("{}", render::search_notice(query, &path));
        match self.loader.search(query).await {
            Ok(hits) => {
                print!("{}", render::search_results(&hits.unwrap_or_default()));
                Ok(())
            }
            Err(e) => {
                self.notifier.notify_error(&format!("Search failed: {}", e));
                Err(e.into())
            }
        }
    }

    async fn toggle_bookmark(&self, slug: &str) -> Result<()> {
        let article = match self.loader.find_by_slug(slug).await {
            Ok(article) => article,
            Err(e) if e.is_not_found() => {
                print!("{}", render::not_found(slug));
                bail!("no article with slug {}", slug)
            }
            Err(e) => {
                self.notifier.notify_error(&format!("Failed to load blog content: {}", e));
                return Err(e.into());
            }
        };
        if self.bookmarks.toggle(&article.id).await? {
            println!("🔖 Bookmarked \"{}\"", article.heading);
        } else {
            println!("Removed bookmark for \"{}\"", article.heading);
        }
        Ok(())
    }

    async fn list_bookmarks(&self) -> Result<()> {
        let bookmarks = self.bookmarks.load().await?;
        let articles = if bookmarks.is_empty() {
            Vec::new()
        } else {
            match self.loader.load_index().await {
                Ok(index) => index.variations,
                Err(e) => {
                    self.log.warn(&format!("Showing bookmark ids only: {}", e));
                    Vec::new()
                }
            }
        };
        print!("{}", render::bookmark_list(&bookmarks, &articles));
        Ok(())
    }

    /// Bookmarks are decoration on the reading views; a broken store should
    /// not keep an article from rendering.
    async fn load_bookmarks(&self) -> BookmarkSet {
        match self.bookmarks.load().await {
            Ok(set) => set,
            Err(e) => {
                self.log.warn(&format!("Ignoring unreadable bookmarks: {}", e));
                BookmarkSet::new()
            }
        }
    }
}

fn subscribe(mut form: NewsletterForm) -> Result<()> {
    match form.submit() {
        Ok(message) => {
            println!("✔ {}", message);
            Ok(())
        }
        Err(errors) => {
            for error in &errors {
                eprintln!("✖ {}", error);
            }
            bail!("newsletter signup rejected")
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log = init_logging(if cli.verbose { Level::DEBUG } else { Level::WARN }).with_prefix("[pb]");

    let config = SiteConfig::default()
        .with_source(cli.source)
        .with_words_per_minute(cli.wpm)
        .with_storage(cli.storage, cli.storage_path);

    match cli.command {
        Commands::Nav => {
            print!("{}", render::navigation(&site::navigation()));
            Ok(())
        }
        Commands::Subscribe {
            email,
            first_name,
            last_name,
            job_title,
            job_level,
            company,
            consent,
        } => subscribe(NewsletterForm {
            email,
            first_name,
            last_name,
            job_title,
            job_level,
            company,
            consent,
        }),
        command => {
            let app = App::new(&config, log).await?;
            match command {
                Commands::List { latest } => app.landing(latest).await,
                Commands::Show { slug } => app.detail(slug).await,
                Commands::Search { query } => app.search(&query).await,
                Commands::Bookmark { slug } => app.toggle_bookmark(&slug).await,
                Commands::Bookmarks => app.list_bookmarks().await,
                Commands::Nav | Commands::Subscribe { .. } => Ok(()),
            }
        }
    }
}
