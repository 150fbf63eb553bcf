//! Module for the shelter directory API.
//!
//! This module defines the public interface and structure for managing
//! shelter records through HTTP endpoints.

pub mod handlers;
pub mod routes;
