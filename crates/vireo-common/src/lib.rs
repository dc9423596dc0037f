//! Common utilities for the Vireo renderer.
//!
//! This crate provides shared infrastructure used by all rendering components:
//! - **Warning System** - deduplicated colored terminal output for degraded input
//! - **Fetch Helpers** - blocking HTTP GET wrappers for documents and stylesheets

pub mod net;
pub mod warning;
