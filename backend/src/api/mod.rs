//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the different API
//! domains, such as shelters, pets, and adoption applications, excluding
//! core authentication routes which are handled separately.

pub mod application;
pub mod extract;
pub mod pet;
pub mod shelter;
