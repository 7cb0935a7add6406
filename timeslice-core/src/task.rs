//! Task model for the dispatch simulator.

use serde::{Deserialize, Serialize};

/// Immutable description of one task, fixed before the simulation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,

    /// Simulated-time instant at which the scheduler first sees the task.
    pub arrival_time: u64,

    /// Total CPU time the task needs, in simulated-time units.
    pub total_cost: u64,

    /// Lower value = dispatched earlier.
    pub initial_priority: i64,

    /// Longest a single dispatch may run before the task is preempted.
    pub quantum: u64,
}

impl Task {
    pub fn new(
        id: u32,
        arrival_time: u64,
        total_cost: u64,
        initial_priority: i64,
        quantum: u64,
    ) -> Self {
        Self {
            id,
            arrival_time,
            total_cost,
            initial_priority,
            quantum,
        }
    }
}

/// Mutable run state, one instance per task, alive for exactly one
/// simulation run. The engine holds the only copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskState {
    /// Starts at `total_cost` and reaches 0 exactly once.
    pub remaining_cost: u64,

    /// Floored at 0 on every decrement; the dispatch penalty is unbounded above.
    pub current_priority: i64,

    /// Once set, the task is permanently excluded from selection.
    pub completed: bool,
}

impl TaskState {
    pub fn initial(task: &Task) -> Self {
        Self {
            remaining_cost: task.total_cost,
            current_priority: task.initial_priority,
            completed: false,
        }
    }
}
