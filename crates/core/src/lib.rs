//! Domain crate for the dynamic UX backend.
//!
//! Holds everything that does not talk to the network: catalog row types,
//! the typed query plan the LLM is asked to produce, request-profile
//! heuristics, search relevance scoring, and the HTML fragment renderers.
//! Zero internal deps so both the API server and any future CLI tooling
//! can use it.

pub mod catalog;
pub mod component;
pub mod error;
pub mod page;
pub mod plan;
pub mod profile;
pub mod render;
pub mod scoring;
