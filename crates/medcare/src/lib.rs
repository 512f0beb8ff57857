//! Diabetes risk scoring and clinical decision support.
//!
//! The [`risk`] module holds the deterministic engine and the service facade that wraps it;
//! [`config`], [`error`], and [`telemetry`] carry the process-level concerns shared with the
//! HTTP service.

pub mod config;
pub mod error;
pub mod risk;
pub mod telemetry;
