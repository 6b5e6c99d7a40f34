//! Header navigation, search routing and the footer newsletter form.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub name: &'static str,
    pub path: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub path: &'static str,
    pub dropdown: Vec<NavLink>,
}

impl NavItem {
    fn link(name: &'static str, path: &'static str) -> Self {
        Self { name, path, dropdown: Vec::new() }
    }

    fn menu(name: &'static str, path: &'static str, dropdown: &[(&'static str, &'static str)]) -> Self {
        Self {
            name,
            path,
            dropdown: dropdown.iter().map(|&(name, path)| NavLink { name, path }).collect(),
        }
    }
}

/// Top-level header navigation, in display order.
pub fn navigation() -> Vec<NavItem> {
    vec![
        NavItem::link("LATEST", "/latest"),
        NavItem::menu(
            "TOPICS",
            "/topics",
            &[
                ("Data Science", "/topics/data-science"),
                ("Machine Learning", "/topics/ml"),
                ("AI", "/topics/ai"),
                ("Data Engineering", "/topics/data-engineering"),
            ],
        ),
        NavItem::link("EDITORS' PICKS", "/picks"),
        NavItem::menu(
            "RESOURCES",
            "/resources",
            &[
                ("Tutorials", "/resources/tutorials"),
                ("Courses", "/resources/courses"),
                ("Books", "/resources/books"),
                ("Cheat Sheets", "/resources/cheatsheets"),
            ],
        ),
        NavItem::link("NEWSLETTER", "/newsletter"),
    ]
}

/// Path the header search form navigates to, or `None` for a blank query.
pub fn search_path(query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    Some(format!("/search?q={}", encoded))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("A valid email address is required")]
    InvalidEmail,
    #[error("First name is required")]
    MissingFirstName,
    #[error("Consent is required to subscribe")]
    MissingConsent,
}

pub const SUBSCRIBED_MESSAGE: &str = "Thank you for subscribing!";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub job_level: String,
    pub company: String,
    pub consent: bool,
}

impl NewsletterForm {
    pub fn validate(&self) -> Vec<FormError> {
        let mut errors = Vec::new();
        if !is_plausible_email(self.email.trim()) {
            errors.push(FormError::InvalidEmail);
        }
        if self.first_name.trim().is_empty() {
            errors.push(FormError::MissingFirstName);
        }
        if !self.consent {
            errors.push(FormError::MissingConsent);
        }
        errors
    }

    /// Accepts the signup and clears the form.
    ///
    /// There is no subscription backend; a valid submission only yields the
    /// acknowledgement shown to the reader.
    pub fn submit(&mut self) -> std::result::Result<&'static str, Vec<FormError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        tracing::info!("newsletter signup accepted for {}", self.email.trim());
        *self = Self::default();
        Ok(SUBSCRIBED_MESSAGE)
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !email.contains(char::is_whitespace)
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
        }
        None => false,
    }
}
