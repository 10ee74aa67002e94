//! Error types for the `domain` layer.
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Failures are modeled as a root `Error` struct holding a closed
/// `DomainErrorKind` enum plus an optional `source` with the original error
/// that caused it. Business logic raises a kind as close as possible to the
/// point of detection and lets it propagate unmodified; the `web` layer
/// pattern-matches on the kind exactly once to produce the HTTP response.
/// Kinds are never used for expected, high-frequency control flow.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// The closed set of failure signals raised by tournament business logic and
/// the auth components. Each variant carries exactly the data a caller needs
/// to report the failure.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    /// A referenced entity does not exist.
    NotFound(Option<String>),
    /// A precondition for the requested operation does not hold.
    PreconditionFailed(String),
    /// The operation is invalid because the tournament has already
    /// transitioned into its started state.
    TournamentAlreadyStarted(Option<String>),
    /// A uniqueness constraint is violated.
    AlreadyExists(String),
    /// A team tried to pick up drinks for a match a second time.
    DrinksAlreadyPickedUp { match_id: i64, team_id: i64 },
    /// The public access token of a tournament is missing or incorrect.
    BadPublicAccessToken,
    /// Auth token verification failed. Deliberately carries no detail: the
    /// caller must not learn whether the token was expired, tampered with or
    /// malformed.
    Unauthenticated,
    Internal(InternalErrorKind),
}

/// Errors that indicate a server-side problem rather than a domain signal.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    /// Invalid or missing process configuration; fatal at startup.
    Config(String),
    Other(String),
}

impl Error {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            source: None,
            error_kind: DomainErrorKind::NotFound(Some(message.into())),
        }
    }

    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self {
            source: None,
            error_kind: DomainErrorKind::PreconditionFailed(message.into()),
        }
    }

    pub fn tournament_already_started() -> Self {
        Self {
            source: None,
            error_kind: DomainErrorKind::TournamentAlreadyStarted(None),
        }
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self {
            source: None,
            error_kind: DomainErrorKind::AlreadyExists(message.into()),
        }
    }

    pub fn drinks_already_picked_up(match_id: i64, team_id: i64) -> Self {
        Self {
            source: None,
            error_kind: DomainErrorKind::DrinksAlreadyPickedUp { match_id, team_id },
        }
    }

    pub fn bad_public_access_token() -> Self {
        Self {
            source: None,
            error_kind: DomainErrorKind::BadPublicAccessToken,
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            source: None,
            error_kind: DomainErrorKind::Unauthenticated,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config(message.into())),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(message.into())),
        }
    }

    /// Attaches the original error that caused this one. The kind is left
    /// untouched.
    pub fn with_source(mut self, source: Box<dyn StdError + Send + Sync>) -> Self {
        self.source = Some(source);
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// Token encoding itself failing is a server-side problem, not a domain
// signal. Verification failures are mapped to Unauthenticated explicitly in
// the jwt module and never go through this conversion.
impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                "JWT encoding related error".to_string(),
            )),
        }
    }
}
