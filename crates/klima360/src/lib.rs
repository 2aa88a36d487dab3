//! Farmer enrollment and climate-resilience scoring.
//!
//! The scoring engine lives in [`workflows::assessment`]; enrollment, roster queries, and the
//! HTTP router built on top of it live in [`workflows::enrollment`].

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
