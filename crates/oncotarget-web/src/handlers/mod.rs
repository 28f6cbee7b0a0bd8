//! HTTP handlers for all web routes.

pub mod targets;
pub mod api;
pub mod health;
