//! Backoffice infrastructure - reqwest client for the REST API

mod client;

pub use client::{BackofficeApi, HttpBackofficeApi};
