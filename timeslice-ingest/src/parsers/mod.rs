pub mod task_list;
pub mod trace_log;

pub use task_list::{load_registry, parse_task_list};
pub use trace_log::parse_trace_log;
