//! Module for the adoption application API.
//!
//! This module defines the public interface and structure for managing
//! adoption applications through HTTP endpoints.

pub mod handlers;
pub mod routes;
