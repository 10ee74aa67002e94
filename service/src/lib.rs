//! Infrastructure services shared across the BeerBrawl backend: process
//! configuration and logging setup. Everything in here is constructed once
//! during startup and read-only afterwards.

pub mod config;
pub mod logging;
