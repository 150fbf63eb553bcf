//! Module for core business logic services.
//!
//! This module encapsulates services that sit between the API handlers
//! and the database, such as validating and resolving the id references
//! that link entities together.

pub mod references;
