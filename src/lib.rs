//! pairswitch — spread-quantile switching backtester for paired instruments.
//!
//! Replays the daily price history of two related instruments (e.g. common and
//! preferred share classes of one issuer) and simulates a strategy that switches
//! between them whenever the price-spread ratio leaves the rolling quartile band
//! of its own trailing history.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
