//! API Client
//!
//! HTTP transport for the analytics REST API.

pub mod client;

pub use client::*;
