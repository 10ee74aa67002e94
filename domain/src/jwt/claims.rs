//! This module defines the claim layout shared by auth token issuance and
//! verification. The two halves must agree on it exactly; a token minted by
//! `Tokenizer::issue` always decodes into this struct and carries nothing
//! else.

use serde::{Deserialize, Serialize};

/// Payload of a BeerBrawl auth token.
///
/// `exp` is a NumericDate (whole seconds since the epoch) per RFC 7519.
/// `rol` carries the principal's role labels; it has set semantics, the
/// insertion order is irrelevant to every consumer.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AuthTokenClaims {
    pub(crate) sub: String,
    pub(crate) iss: String,
    pub(crate) aud: String,
    pub(crate) exp: usize,
    pub(crate) rol: Vec<String>,
}
