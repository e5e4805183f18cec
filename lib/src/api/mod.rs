// lib/src/api/mod.rs

pub mod client;
pub mod paths;

pub use client::ApiClient;
