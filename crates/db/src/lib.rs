//! REST client for the hosted database.
//!
//! The datastore is a managed PostgreSQL service exposed through a
//! PostgREST-style HTTP interface (`/rest/v1/{table}?{filters}`). This crate
//! owns the wire concerns: auth headers, query-parameter construction, row
//! decoding, and the typed per-table fetchers the engine calls.

pub mod catalog;
pub mod client;
pub mod query;

pub use client::{DbError, PostgrestClient};
pub use query::TableQuery;
