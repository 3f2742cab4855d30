//! Waitlist signups
//!
//! Shared between the browser and the server:
//! - request/response payloads for `POST /api/waitlist`
//! - the email check both sides apply
//! - the form status machine the waitlist form renders
//!
//! The server half (store and router) is only compiled with `ssr`.

#[cfg(feature = "ssr")]
pub mod api;
#[cfg(feature = "ssr")]
pub mod store;

use serde::{Deserialize, Serialize};

/// Longest email address accepted (RFC 5321 path limit)
pub const MAX_EMAIL_LENGTH: usize = 254;

/// How long a success or error badge stays before the form resets (ms)
pub const STATUS_RESET_MS: u32 = 3_000;

/// Message shown for any failed submission
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

pub const JOIN_PATH: &str = "/api/waitlist";
pub const STATS_PATH: &str = "/api/waitlist/stats";

/// Body of `POST /api/waitlist`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub email: String,
}

/// Successful join, new or repeated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinResponse {
    /// 1-based place in line
    pub position: u64,
    /// Displayed size of the waitlist
    pub total: u64,
    /// False when the email was already on the list
    pub created: bool,
}

/// Body of `GET /api/waitlist/stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistStats {
    pub total: u64,
}

/// Waitlist failures, shared by the API and the form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WaitlistError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("The waitlist is full")]
    Full,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// API error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

impl WaitlistError {
    /// Rebuild the error from a non-success HTTP response
    pub fn from_api(status: u16, body: Option<ApiError>) -> Self {
        match body {
            Some(body) if body.code == "INVALID_EMAIL" => WaitlistError::InvalidEmail,
            Some(body) if body.code == "WAITLIST_FULL" => WaitlistError::Full,
            Some(body) => WaitlistError::Server {
                status,
                message: body.error,
            },
            None => WaitlistError::Server {
                status,
                message: String::from("unexpected response"),
            },
        }
    }

    /// Stable machine-readable code used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            WaitlistError::InvalidEmail => "INVALID_EMAIL",
            WaitlistError::Full => "WAITLIST_FULL",
            WaitlistError::Network(_) => "NETWORK_ERROR",
            WaitlistError::Server { .. } => "INTERNAL_ERROR",
        }
    }
}

/// Trim and check an email address.
///
/// Deliberately loose: non-empty, has an `@` with something on both sides,
/// no whitespace, and not longer than [`MAX_EMAIL_LENGTH`]. Real
/// verification happens when the launch email is delivered.
pub fn validate_email(input: &str) -> Result<String, WaitlistError> {
    let email = input.trim();
    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
        return Err(WaitlistError::InvalidEmail);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(WaitlistError::InvalidEmail);
    }
    match email.rsplit_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email.to_string()),
        _ => Err(WaitlistError::InvalidEmail),
    }
}

/// Key used to detect repeated signups
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// What the waitlist form is currently showing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Loading,
    Success(JoinResponse),
    Error(String),
}

impl FormStatus {
    /// Input and button are locked while a request runs or right after success
    pub fn is_locked(&self) -> bool {
        matches!(self, FormStatus::Loading | FormStatus::Success(_))
    }

    /// Begin a submission. Returns the cleaned email to send, or `None` when
    /// the form is busy or the input is not an email (no request is made).
    pub fn begin(&mut self, input: &str) -> Option<String> {
        if self.is_locked() {
            return None;
        }
        let email = validate_email(input).ok()?;
        *self = FormStatus::Loading;
        Some(email)
    }

    /// Record the outcome of the request started by [`FormStatus::begin`]
    pub fn finish(&mut self, result: Result<JoinResponse, WaitlistError>) {
        if *self != FormStatus::Loading {
            return;
        }
        *self = match result {
            Ok(response) => FormStatus::Success(response),
            Err(_) => FormStatus::Error(GENERIC_ERROR_MESSAGE.to_string()),
        };
    }

    /// Return to idle after the success/error badge has been shown
    pub fn reset(&mut self) {
        if matches!(self, FormStatus::Success(_) | FormStatus::Error(_)) {
            *self = FormStatus::Idle;
        }
    }
}

/// [`FormStatus`] tagged with the submission it belongs to.
///
/// Each accepted submit gets a new number, and late completions or reset
/// timers from an earlier submission are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    status: FormStatus,
    submission: u64,
}

impl FormState {
    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Number of the latest accepted submission (0 before the first)
    pub fn submission(&self) -> u64 {
        self.submission
    }

    pub fn is_locked(&self) -> bool {
        self.status.is_locked()
    }

    /// Start a submission; returns its number and the cleaned email
    pub fn begin(&mut self, input: &str) -> Option<(u64, String)> {
        let email = self.status.begin(input)?;
        self.submission += 1;
        Some((self.submission, email))
    }

    pub fn finish(&mut self, submission: u64, result: Result<JoinResponse, WaitlistError>) {
        if submission == self.submission {
            self.status.finish(result);
        }
    }

    pub fn reset(&mut self, submission: u64) {
        if submission == self.submission {
            self.status.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined() -> JoinResponse {
        JoinResponse {
            position: 851,
            total: 851,
            created: true,
        }
    }

    #[test]
    fn test_validate_email_accepts_and_trims() {
        assert_eq!(
            validate_email("  dev@example.com \n").unwrap(),
            "dev@example.com"
        );
        assert_eq!(validate_email("a@b").unwrap(), "a@b");
    }

    #[test]
    fn test_validate_email_rejects() {
        for input in ["", "   ", "no-at-sign", "@example.com", "dev@", "de v@example.com"] {
            assert_eq!(validate_email(input), Err(WaitlistError::InvalidEmail), "{input}");
        }
    }

    #[test]
    fn test_validate_email_splits_at_last_at() {
        assert_eq!(validate_email("a@b@c.io").unwrap(), "a@b@c.io");
        assert!(validate_email("dev@example.com@").is_err());
        assert!(validate_email("dev\t@example.com").is_err());
    }

    #[test]
    fn test_validate_email_length_limit() {
        let local = "a".repeat(MAX_EMAIL_LENGTH - "@x.io".len());
        assert!(validate_email(&format!("{local}@x.io")).is_ok());
        assert!(validate_email(&format!("a{local}@x.io")).is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email(" Dev@Example.COM "), "dev@example.com");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(WaitlistError::InvalidEmail.code(), "INVALID_EMAIL");
        assert_eq!(WaitlistError::Full.code(), "WAITLIST_FULL");
        assert_eq!(
            WaitlistError::Server {
                status: 500,
                message: "boom".into()
            }
            .to_string(),
            "Server error (500): boom"
        );
    }

    #[test]
    fn test_error_from_api_body() {
        let body = |code: &str| Some(ApiError::new("msg", code));

        assert_eq!(WaitlistError::from_api(400, body("INVALID_EMAIL")), WaitlistError::InvalidEmail);
        assert_eq!(WaitlistError::from_api(503, body("WAITLIST_FULL")), WaitlistError::Full);
        assert_eq!(
            WaitlistError::from_api(500, body("INTERNAL_ERROR")),
            WaitlistError::Server {
                status: 500,
                message: "msg".into()
            }
        );
        assert!(matches!(
            WaitlistError::from_api(502, None),
            WaitlistError::Server { status: 502, .. }
        ));
    }

    #[test]
    fn test_api_error_roundtrips_through_json() {
        let json = r#"{"error":"The waitlist is full","code":"WAITLIST_FULL"}"#;
        let body: ApiError = serde_json::from_str(json).unwrap();
        assert_eq!(body, ApiError::new("The waitlist is full", "WAITLIST_FULL"));
    }

    #[test]
    fn test_form_happy_path() {
        let mut status = FormStatus::default();
        assert_eq!(status.begin("dev@example.com"), Some("dev@example.com".into()));
        assert_eq!(status, FormStatus::Loading);
        assert!(status.is_locked());

        status.finish(Ok(joined()));
        assert_eq!(status, FormStatus::Success(joined()));
        assert!(status.is_locked());

        status.reset();
        assert_eq!(status, FormStatus::Idle);
    }

    #[test]
    fn test_form_invalid_email_is_not_submitted() {
        let mut status = FormStatus::Idle;
        assert_eq!(status.begin("not an email"), None);
        assert_eq!(status, FormStatus::Idle);
    }

    #[test]
    fn test_form_busy_ignores_second_submit() {
        let mut status = FormStatus::Idle;
        status.begin("dev@example.com");
        assert_eq!(status.begin("other@example.com"), None);

        status.finish(Ok(joined()));
        assert_eq!(status.begin("other@example.com"), None);
    }

    #[test]
    fn test_form_failure_shows_generic_message_and_unlocks() {
        let mut status = FormStatus::Idle;
        status.begin("dev@example.com");
        status.finish(Err(WaitlistError::Network("offline".into())));
        assert_eq!(status, FormStatus::Error(GENERIC_ERROR_MESSAGE.to_string()));
        assert!(!status.is_locked());

        // Retrying straight from the error state is allowed
        assert!(status.begin("dev@example.com").is_some());
    }

    #[test]
    fn test_form_finish_without_begin_is_ignored() {
        let mut status = FormStatus::Idle;
        status.finish(Ok(joined()));
        assert_eq!(status, FormStatus::Idle);
    }

    #[test]
    fn test_form_reset_does_not_cancel_loading() {
        let mut status = FormStatus::Idle;
        status.begin("dev@example.com");
        status.reset();
        assert_eq!(status, FormStatus::Loading);
    }

    #[test]
    fn test_stale_reset_keeps_newer_error() {
        let mut state = FormState::default();
        let (first, _) = state.begin("dev@example.com").unwrap();
        state.finish(first, Err(WaitlistError::Network("offline".into())));

        // Resubmit from the error state before the first reset timer fires
        let (second, _) = state.begin("dev@example.com").unwrap();
        assert_ne!(first, second);
        state.finish(second, Err(WaitlistError::Full));

        state.reset(first);
        assert_eq!(
            state.status(),
            &FormStatus::Error(GENERIC_ERROR_MESSAGE.to_string())
        );

        state.reset(second);
        assert_eq!(state.status(), &FormStatus::Idle);
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut state = FormState::default();
        assert_eq!(state.submission(), 0);
        let (first, _) = state.begin("dev@example.com").unwrap();
        state.finish(first - 1, Ok(joined()));
        assert_eq!(state.status(), &FormStatus::Loading);

        state.finish(first, Ok(joined()));
        assert_eq!(state.status(), &FormStatus::Success(joined()));
        assert!(state.is_locked());
        assert_eq!(state.begin("other@example.com"), None);
    }
}
