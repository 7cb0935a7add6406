//! timeslice-core: task model, registry, and the dispatch engine.

pub mod engine;
pub mod registry;
pub mod task;

pub use engine::{DispatchRecord, Engine, simulate};
pub use registry::{MalformedInput, Registry};
pub use task::{Task, TaskState};
