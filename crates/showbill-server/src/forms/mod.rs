//! Submission validation. Each form turns raw fields into the repository's
//! input record or a list of field errors; nothing reaches the database
//! until validation passes.

pub mod artist;
pub mod show;
pub mod venue;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::LazyLock;

use showbill_db::choices::{is_state_code, Genre};

pub use artist::ArtistForm;
pub use show::ShowForm;
pub use venue::VenueForm;

const PHONE_PATTERN: &str = r"^\(?([0-9]{3})\)?[-.●\s]?([0-9]{3})[-.●\s]?([0-9]{4})$";
const PHONE_MESSAGE: &str = "Invalid phone number format. Use xxx-xxx-xxxx or similar.";
const SEEKING_DESCRIPTION_MAX: usize = 500;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Names of the fields that failed, in the order they were checked.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.field).collect()
    }

    fn into_result<T>(self, build: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(build())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Trimmed value of a required text field, or an error when blank.
fn required(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    message: &str,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, message);
    }
    trimmed.to_string()
}

/// Blank optional fields are stored as NULL.
fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn check_state(errors: &mut ValidationErrors, value: &str, required_message: &str) -> String {
    let state = value.trim();
    if state.is_empty() {
        errors.push("state", required_message);
    } else if !is_state_code(state) {
        errors.push("state", "Invalid state selected.");
    }
    state.to_string()
}

fn check_genres(errors: &mut ValidationErrors, values: &[String]) -> Vec<Genre> {
    let mut genres = Vec::with_capacity(values.len());
    for raw in values {
        match raw.parse::<Genre>() {
            Ok(g) => genres.push(g),
            Err(_) => errors.push(
                "genres",
                format!("'{raw}' is not a valid choice for this field."),
            ),
        }
    }
    if values.is_empty() {
        errors.push("genres", "At least one genre must be selected.");
    }
    genres
}

fn check_phone(errors: &mut ValidationErrors, value: &str) -> Option<String> {
    let phone = optional(value)?;
    if !PHONE_RE.is_match(&phone) {
        errors.push("phone", PHONE_MESSAGE);
    }
    Some(phone)
}

/// Absolute http(s) URL with a host that is an IP address or carries a top-level domain.
fn is_valid_url(value: &str) -> bool {
    let Ok(parsed) = url::Url::parse(value) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    match parsed.host() {
        Some(url::Host::Domain(domain)) => {
            let mut labels = domain.rsplit('.');
            let tld = labels.next().unwrap_or_default();
            labels.next().is_some()
                && tld.len() >= 2
                && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        Some(url::Host::Ipv4(_)) | Some(url::Host::Ipv6(_)) => true,
        None => false,
    }
}

fn check_url(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    message: &str,
) -> Option<String> {
    let link = optional(value)?;
    if !is_valid_url(&link) {
        errors.push(field, message);
    }
    Some(link)
}

fn check_seeking_description(errors: &mut ValidationErrors, value: &str) -> Option<String> {
    let description = optional(value)?;
    if description.chars().count() > SEEKING_DESCRIPTION_MAX {
        errors.push(
            "seeking_description",
            format!("Field cannot be longer than {SEEKING_DESCRIPTION_MAX} characters."),
        );
    }
    Some(description)
}

/// HTML checkbox semantics: absent, `""` and `"false"` are false, anything else true.
pub(crate) fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.is_some_and(|v| !matches!(v.as_str(), "" | "false")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_pattern_accepts_common_formats() {
        for ok in [
            "(415) 555-1234",
            "415-555-1234",
            "415.555.1234",
            "415 555 1234",
            "4155551234",
        ] {
            assert!(PHONE_RE.is_match(ok), "{ok}");
        }
        for bad in ["555-1234", "415-555-12345", "phone", "(415)-555-123a"] {
            assert!(!PHONE_RE.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn test_url_validation() {
        assert!(is_valid_url("https://www.facebook.com/TheMusicalHop"));
        assert!(is_valid_url("http://example.com"));
        assert!(is_valid_url("http://127.0.0.1:8080/x"));
        assert!(!is_valid_url("www.example.com"));
        assert!(!is_valid_url("http://localhost"));
        assert!(!is_valid_url("javascript:alert(1)"));
        assert!(!is_valid_url("ftp://example.com/file"));
        assert!(is_valid_url("HTTPS://Example.com"));
        assert!(!is_valid_url("not a url"));
    }

    #[test]
    fn test_required_trims() {
        let mut errors = ValidationErrors::default();
        assert_eq!(required(&mut errors, "name", "  Hop  ", "Name is required"), "Hop");
        assert!(errors.is_empty());
        required(&mut errors, "name", "   ", "Name is required");
        assert_eq!(errors.fields(), vec!["name"]);
    }

    #[test]
    fn test_state_messages() {
        let mut errors = ValidationErrors::default();
        check_state(&mut errors, "", "State is required");
        check_state(&mut errors, "ZZ", "State is required");
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["State is required", "Invalid state selected."]);
    }

    #[test]
    fn test_genres_must_be_known_and_non_empty() {
        let mut errors = ValidationErrors::default();
        assert!(check_genres(&mut errors, &[]).is_empty());
        assert_eq!(errors.fields(), vec!["genres"]);

        let mut errors = ValidationErrors::default();
        let got = check_genres(&mut errors, &["Jazz".into(), "Polka".into()]);
        assert_eq!(got, vec![Genre::Jazz]);
        assert_eq!(errors.fields(), vec!["genres"]);
    }

    #[test]
    fn test_seeking_description_length() {
        let mut errors = ValidationErrors::default();
        check_seeking_description(&mut errors, &"x".repeat(500));
        assert!(errors.is_empty());
        check_seeking_description(&mut errors, &"x".repeat(501));
        assert_eq!(errors.fields(), vec!["seeking_description"]);
    }

    #[test]
    fn test_display_joins_errors() {
        let mut errors = ValidationErrors::single("name", "Name is required");
        errors.push("city", "City is required");
        assert_eq!(errors.to_string(), "name: Name is required; city: City is required");
    }
}
