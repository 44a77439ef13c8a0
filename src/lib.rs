//! Library exports for the website, shared between the binary and tests.

pub mod config;
pub mod content;
pub mod providers;
pub mod routes;
pub mod startup;
pub mod state;
pub mod utils;
