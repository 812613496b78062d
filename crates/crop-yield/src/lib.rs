//! Crop yield estimation for the agricultural assistant.
//!
//! [`estimation`] holds the heuristic yield model and the service that wraps
//! it; [`config`], [`telemetry`] and [`error`] carry the application plumbing
//! shared with the HTTP service.

pub mod config;
pub mod error;
pub mod estimation;
pub mod telemetry;
