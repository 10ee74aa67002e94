//! Domain layer of the BeerBrawl tournament platform.
//!
//! Holds the cross-cutting pieces that tournament business logic and the web
//! boundary both depend on: the closed taxonomy of domain error kinds, the
//! stateless auth token issuance/verification contract, and the canonical UTC
//! clock. None of this performs I/O; everything is safe for unrestricted
//! concurrent use once constructed.

pub mod error;
pub mod jwt;
pub mod time;
