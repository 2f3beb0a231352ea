//! # Middleware
//!
//! Tower middleware layered around the API routes.

pub mod metrics;
