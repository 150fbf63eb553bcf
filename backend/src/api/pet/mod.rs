//! Module for the pet listing API.
//!
//! This module defines the public interface and structure for managing
//! adoptable pet records, including their image uploads, through HTTP
//! endpoints.

pub mod handlers;
pub mod routes;
