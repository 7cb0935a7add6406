//! timeslice-ingest: text ingestion for task lists and saved dispatch logs.

pub mod parsers;

pub use parsers::{load_registry, parse_task_list, parse_trace_log};
