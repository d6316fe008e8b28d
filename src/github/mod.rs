//! Thin client for the two GitHub REST endpoints the application reads.

mod client;

pub use client::{GitHubClient, API_VERSION};
