//! Stateless authentication tokens for the BeerBrawl API.
//!
//! A successful login mints a signed, time-bounded credential carrying the
//! principal's username and role labels; every later request presents it on
//! the Authorization header and is verified against the same process-wide
//! signing material. No session state is kept server side - rotating the
//! secret is the only way to invalidate outstanding tokens.

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::*;
use service::config::Config;

use crate::error::Error;
use crate::time;

pub(crate) mod claims;

use claims::AuthTokenClaims;

/// Minimum signing secret length in bytes. HS512 keys shorter than the
/// SHA-512 block size weaken the HMAC, so anything shorter fails startup.
const MIN_SECRET_BYTES: usize = 64;

/// Identity established by a successfully verified token, exposed to
/// downstream authorization checks.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal {
    pub username: String,
    pub roles: Vec<String>,
}

impl AuthenticatedPrincipal {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Issues and verifies auth tokens.
///
/// Constructed exactly once at startup and shared immutably afterwards; both
/// halves of the contract live here so they can never disagree on algorithm,
/// key or claim layout.
#[derive(Debug)]
pub struct Tokenizer {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    lifetime: Duration,
    prefix: String,
}

impl Tokenizer {
    /// Builds a tokenizer from the process configuration.
    ///
    /// The signing secret is validated here, not per call: a missing or
    /// too-short secret is a fatal configuration error and must abort
    /// startup before any request is accepted.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let secret = config
            .jwt_secret()
            .ok_or_else(|| Error::config("JWT_SECRET is not set"))?;
        if secret.len() < MIN_SECRET_BYTES {
            return Err(Error::config(format!(
                "JWT_SECRET must be at least {MIN_SECRET_BYTES} bytes for HS512, got {}",
                secret.len()
            )));
        }

        let mut header = Header::new(Algorithm::HS512);
        header.typ = Some(config.jwt_type().to_string());

        // Verification is pinned to the one algorithm issuance uses.
        // Accepting a caller-chosen algorithm here would open the classic
        // downgrade hole.
        let mut validation = Validation::new(Algorithm::HS512);
        validation.set_issuer(&[config.jwt_issuer()]);
        validation.set_audience(&[config.jwt_audience()]);
        validation.leeway = 0;

        Ok(Self {
            header,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer: config.jwt_issuer().to_string(),
            audience: config.jwt_audience().to_string(),
            lifetime: Duration::milliseconds(config.jwt_expiration_ms() as i64),
            prefix: config.auth_token_prefix().to_string(),
        })
    }

    /// Mints a signed credential for `principal` carrying `roles`.
    ///
    /// The result is the compact serialized token prefixed with the
    /// configured scheme label, ready to be placed into an Authorization
    /// header. Expiry is the issuance instant plus the configured lifetime.
    /// Pure computation apart from one clock read.
    pub fn issue(&self, principal: &str, roles: &[String]) -> Result<String, Error> {
        if principal.is_empty() {
            return Err(Error::precondition_failed("principal must not be empty"));
        }

        let expires_at = time::now_utc() + self.lifetime;
        let claims = AuthTokenClaims {
            sub: principal.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: expires_at.timestamp() as usize,
            rol: roles.to_vec(),
        };

        let token = encode(&self.header, &claims, &self.encoding_key)?;
        Ok(format!("{}{}", self.prefix, token))
    }

    /// Verifies a presented Authorization header value and returns the
    /// principal it asserts.
    ///
    /// Every failure mode - missing scheme prefix, malformed token, bad
    /// signature, expired, issuer or audience mismatch - collapses into the
    /// same `Unauthenticated` kind so a caller cannot probe which check
    /// failed. The actual reason is logged at debug level only.
    pub fn verify(&self, header_value: &str) -> Result<AuthenticatedPrincipal, Error> {
        let token = header_value
            .strip_prefix(self.prefix.as_str())
            .ok_or_else(Error::unauthenticated)?;

        let token_data = decode::<AuthTokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|err| {
                debug!("auth token rejected: {err}");
                Error::unauthenticated()
            })?;

        Ok(AuthenticatedPrincipal {
            username: token_data.claims.sub,
            roles: token_data.claims.rol,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, InternalErrorKind};

    fn test_secret() -> String {
        "x".repeat(MIN_SECRET_BYTES)
    }

    fn test_config() -> Config {
        Config::default().set_jwt_secret(test_secret())
    }

    fn roles(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|label| label.to_string()).collect()
    }

    #[test]
    fn issue_then_verify_round_trips_principal_and_roles() {
        let tokenizer = Tokenizer::new(&test_config()).unwrap();

        let token = tokenizer.issue("alice", &roles(&["ADMIN"])).unwrap();
        let principal = tokenizer.verify(&token).unwrap();

        assert_eq!(principal.username, "alice");
        assert_eq!(principal.roles, roles(&["ADMIN"]));
        assert!(principal.has_role("ADMIN"));
        assert!(!principal.has_role("PLAYER"));
    }

    #[test]
    fn role_set_is_preserved_regardless_of_order() {
        let tokenizer = Tokenizer::new(&test_config()).unwrap();

        let token = tokenizer
            .issue("bob", &roles(&["REFEREE", "PLAYER", "ADMIN"]))
            .unwrap();
        let mut verified = tokenizer.verify(&token).unwrap().roles;
        verified.sort();

        let mut expected = roles(&["REFEREE", "PLAYER", "ADMIN"]);
        expected.sort();
        assert_eq!(verified, expected);
    }

    #[test]
    fn empty_role_list_is_allowed() {
        let tokenizer = Tokenizer::new(&test_config()).unwrap();

        let token = tokenizer.issue("carol", &[]).unwrap();
        let principal = tokenizer.verify(&token).unwrap();

        assert!(principal.roles.is_empty());
    }

    #[test]
    fn issued_tokens_carry_the_scheme_prefix() {
        let tokenizer = Tokenizer::new(&test_config()).unwrap();

        let token = tokenizer.issue("alice", &[]).unwrap();
        assert!(token.starts_with("Bearer "));
    }

    #[test]
    fn empty_principal_is_rejected_at_issuance() {
        let tokenizer = Tokenizer::new(&test_config()).unwrap();

        let err = tokenizer.issue("", &[]).unwrap_err();
        assert!(matches!(
            err.error_kind,
            DomainErrorKind::PreconditionFailed(_)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let tokenizer = Tokenizer::new(&config).unwrap();

        // Same key, same layout, but an expiry one hour in the past.
        let expired = AuthTokenClaims {
            sub: "alice".to_string(),
            iss: config.jwt_issuer().to_string(),
            aud: config.jwt_audience().to_string(),
            exp: (time::now_utc().timestamp() - 3600) as usize,
            rol: vec![],
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &expired,
            &EncodingKey::from_secret(test_secret().as_bytes()),
        )
        .unwrap();

        let err = tokenizer.verify(&format!("Bearer {token}")).unwrap_err();
        assert_eq!(err.error_kind, DomainErrorKind::Unauthenticated);
    }

    #[test]
    fn token_signed_with_a_different_secret_is_rejected() {
        let tokenizer = Tokenizer::new(&test_config()).unwrap();
        let other =
            Tokenizer::new(&Config::default().set_jwt_secret("y".repeat(MIN_SECRET_BYTES)))
                .unwrap();

        let token = other.issue("alice", &roles(&["ADMIN"])).unwrap();

        let err = tokenizer.verify(&token).unwrap_err();
        assert_eq!(err.error_kind, DomainErrorKind::Unauthenticated);
    }

    #[test]
    fn token_from_a_different_issuer_is_rejected() {
        let tokenizer = Tokenizer::new(&test_config()).unwrap();
        let other = Tokenizer::new(
            &test_config().set_jwt_issuer("some-other-backend".to_string()),
        )
        .unwrap();

        let token = other.issue("alice", &[]).unwrap();

        let err = tokenizer.verify(&token).unwrap_err();
        assert_eq!(err.error_kind, DomainErrorKind::Unauthenticated);
    }

    #[test]
    fn header_without_scheme_prefix_is_rejected() {
        let tokenizer = Tokenizer::new(&test_config()).unwrap();

        let token = tokenizer.issue("alice", &[]).unwrap();
        let bare = token.strip_prefix("Bearer ").unwrap();

        let err = tokenizer.verify(bare).unwrap_err();
        assert_eq!(err.error_kind, DomainErrorKind::Unauthenticated);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let tokenizer = Tokenizer::new(&test_config()).unwrap();

        let err = tokenizer.verify("Bearer not-a-token").unwrap_err();
        assert_eq!(err.error_kind, DomainErrorKind::Unauthenticated);
    }

    #[test]
    fn missing_secret_fails_construction() {
        let err = Tokenizer::new(&Config::default()).unwrap_err();
        assert!(matches!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Config(_))
        ));
    }

    #[test]
    fn short_secret_fails_construction() {
        let config = Config::default().set_jwt_secret("too-short".to_string());

        let err = Tokenizer::new(&config).unwrap_err();
        assert!(matches!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Config(_))
        ));
    }
}
