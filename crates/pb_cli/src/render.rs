use crossterm::style::Stylize;
use pb_core::site::NavItem;
use pb_core::{Article, BookmarkSet, Enrichment};
use pb_loader::{DetailView, LandingView};
use std::fmt::Write;

const ANIMATION_PLACEHOLDER: &str = "▒▒ animation unavailable ▒▒";

fn animation_label(name: Option<&str>) -> String {
    format!("▶ {}", name.unwrap_or("untitled animation"))
}

fn read_time(article: &Article) -> &str {
    article.read_time.as_deref().unwrap_or("")
}

fn card(out: &mut String, article: &Article, animation: Option<String>, bookmarked: bool) {
    let marker = if bookmarked { " 🔖" } else { "" };
    let _ = writeln!(out, "{}{}", article.heading.as_str().bold(), marker);
    if !article.sub_heading.is_empty() {
        let _ = writeln!(out, "  {}", article.sub_heading);
    }
    let _ = writeln!(
        out,
        "  {} • {} • /blog/{}",
        article.published_date.as_str().dark_grey(),
        read_time(article).dark_grey(),
        article.slug
    );
    let visual = animation.unwrap_or_else(|| ANIMATION_PLACEHOLDER.to_string());
    let _ = writeln!(out, "  {}", visual.as_str().dark_grey());
    let _ = writeln!(out, "  Read more →");
}

/// Landing page: one card per article, newest first when `latest` is set.
pub fn landing(view: &LandingView, bookmarks: &BookmarkSet, latest: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Latest Articles".bold().underlined());
    let _ = writeln!(out, "Discover our collection of insightful articles and tutorials\n");

    let mut cards: Vec<_> = view.cards().collect();
    if latest {
        cards.sort_by(|(a, _), (b, _)| b.published_on().cmp(&a.published_on()));
    }
    if cards.is_empty() {
        let _ = writeln!(out, "No articles yet.");
    }
    for (article, animation) in cards {
        let animation = animation.map(|a| animation_label(a.name()));
        card(&mut out, article, animation, bookmarks.contains(&article.id));
        out.push('\n');
    }
    out
}

fn enrichment(out: &mut String, block: Enrichment<'_>) {
    let _ = match block {
        Enrichment::Quote(q) => match &q.author {
            Some(author) => writeln!(out, "  “{}” — {}", q.text.as_str().italic(), author),
            None => writeln!(out, "  “{}”", q.text.as_str().italic()),
        },
        Enrichment::Statistic(s) => {
            let source = s.source.as_deref().map(|src| format!(" ({})", src)).unwrap_or_default();
            writeln!(out, "  {} {}{}", s.value.as_str().bold(), s.label, source)
        }
        Enrichment::Warning(c) => writeln!(
            out,
            "  {} {}",
            format!("⚠ {}", c.title.as_deref().unwrap_or("Warning")).yellow(),
            c.text
        ),
        Enrichment::Alert(c) => writeln!(
            out,
            "  {} {}",
            format!("! {}", c.title.as_deref().unwrap_or("Alert")).red(),
            c.text
        ),
        Enrichment::CaseStudy(s) | Enrichment::SuccessStory(s) => {
            let kind = if matches!(block, Enrichment::CaseStudy(_)) { "Case study" } else { "Success story" };
            let _ = writeln!(out, "  {}: {}", kind.bold(), s.title);
            let _ = writeln!(out, "    {}", s.description);
            match &s.outcome {
                Some(outcome) => writeln!(out, "    → {}", outcome),
                None => Ok(()),
            }
        }
    };
}

fn section(out: &mut String, heading: &str, body: &str, items: &[String]) {
    if heading.is_empty() && body.is_empty() && items.is_empty() {
        return;
    }
    if !heading.is_empty() {
        let _ = writeln!(out, "\n{}", heading.bold());
    }
    if !body.is_empty() {
        let _ = writeln!(out, "{}", body);
    }
    for item in items {
        let _ = writeln!(out, "  • {}", item);
    }
}

pub fn detail(view: &DetailView, bookmarked: bool) -> String {
    let article = &view.article;
    let mut out = String::new();
    if !article.tags.is_empty() {
        let tags: Vec<String> = article.tags.iter().map(|t| format!("[{}]", t)).collect();
        let _ = writeln!(out, "{}", tags.join(" ").cyan());
    }
    let _ = writeln!(out, "{}", article.heading.as_str().bold());
    if !article.sub_heading.is_empty() {
        let _ = writeln!(out, "{}", article.sub_heading);
    }
    let _ = writeln!(out, "{} • {}", article.published_date, read_time(article));
    let _ = writeln!(out, "\n  {}\n", animation_label(view.animation.name()).dark_grey());

    if !article.description.is_empty() {
        let _ = writeln!(out, "{}", article.description);
    }
    section(&mut out, &article.sub_heading2, &article.description2, &article.list);
    section(&mut out, &article.sub_heading3, &article.description3, &article.list2);

    let blocks = article.enrichments();
    if !blocks.is_empty() {
        out.push('\n');
        for block in blocks {
            enrichment(&mut out, block);
        }
    }

    let marker = if bookmarked { "🔖 bookmarked" } else { "bookmark: pb bookmark <slug>" };
    let _ = writeln!(out, "\n← Back to Blogs    {}", marker.dark_grey());
    out
}

pub fn not_found(slug: &str) -> String {
    format!(
        "{}\nNo article is published at /blog/{}.\n← Back to Blogs\n",
        "404 | Not Found".bold(),
        slug
    )
}

pub fn load_error(message: &str, can_retry: bool) -> String {
    let mut out = format!("{}\n{}\n", "Error Loading Blog".red().bold(), message);
    if can_retry {
        out.push_str("Try again? [y/N] ");
    }
    out
}

pub fn navigation(items: &[NavItem]) -> String {
    let mut out = String::new();
    for item in items {
        let _ = writeln!(out, "{} {}", format!("{:<16}", item.name).bold(), item.path);
        for link in &item.dropdown {
            let _ = writeln!(out, "  {:<18} {}", link.name, link.path);
        }
    }
    out
}

/// Shown as soon as a search is submitted, before any results arrive.
pub fn search_notice(query: &str, path: &str) -> String {
    format!("{} Searching for \"{}\" ({})\n", "✔".green(), query.trim(), path)
}

pub fn search_results(hits: &[Article]) -> String {
    let mut out = String::from("\n");
    if hits.is_empty() {
        out.push_str("No articles matched.\n");
    }
    for article in hits {
        let _ = writeln!(out, "{} — /blog/{}", article.heading.as_str().bold(), article.slug);
    }
    out
}

pub fn bookmark_list(bookmarks: &BookmarkSet, articles: &[Article]) -> String {
    if bookmarks.is_empty() {
        return "No bookmarks yet.\n".to_string();
    }
    let mut out = String::new();
    for id in bookmarks.iter() {
        match articles.iter().find(|a| &a.id == id) {
            Some(article) => {
                let _ = writeln!(out, "🔖 {} — /blog/{}", article.heading.as_str().bold(), article.slug);
            }
            None => {
                let _ = writeln!(out, "🔖 {} (no longer published)", id);
            }
        }
    }
    out
}
