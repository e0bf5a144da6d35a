//! The generation engine: data collection, LLM-backed layout generation,
//! query-plan execution, and unified search.

pub mod collector;
pub mod generator;
pub mod planner;
pub mod search;
