//! Scheduling engine: the dynamic-priority feedback dispatch loop.
//!
//! Each step selects the arrived, unfinished task with the lowest priority
//! value, runs it for at most one quantum, then penalizes it (+3) while
//! every other ready task ages toward preference (-1, floored at 0). Tasks
//! that arrived strictly between the previous dispatch and the current
//! instant age once more on top of that. The whole run is a closed-form
//! computation: same input, same trace, byte for byte.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::registry::Registry;
use crate::task::{Task, TaskState};

/// One dispatch step of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// 1-based, strictly increasing.
    pub sequence_index: u32,

    pub task_id: u32,

    pub start_time: u64,

    /// `start_time` + run duration; the duration never exceeds the task's
    /// quantum or its remaining cost.
    pub end_time: u64,

    /// The selected task's priority after this step's feedback update.
    pub priority_at_dispatch: i64,
}

impl fmt::Display for DispatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}",
            self.sequence_index, self.task_id, self.start_time, self.end_time,
            self.priority_at_dispatch
        )
    }
}

/// Runs one simulation to completion.
///
/// Holds the only copy of the per-task run state; nothing outside the engine
/// reads or writes it while a run is in flight.
#[derive(Debug)]
pub struct Engine<'a> {
    tasks: &'a [Task],
    states: Vec<TaskState>,
}

impl<'a> Engine<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            tasks: registry.tasks(),
            states: registry.initial_states(),
        }
    }

    /// Run the simulation to completion and return the dispatch log.
    ///
    /// Infallible on a loaded registry: validation already happened, and
    /// every step either consumes remaining cost or jumps the clock past an
    /// arrival, so the loop terminates.
    pub fn run(mut self) -> Vec<DispatchRecord> {
        let total = self.tasks.len();
        let mut log: Vec<DispatchRecord> = Vec::new();
        let mut clock: u64 = 0;
        let mut last_dispatch: u64 = 0;
        let mut done = 0;

        while done < total {
            // Arrived prefix. A task that arrived strictly inside the window
            // since the previous dispatch ages by one; arrivals exactly on
            // either bound do not.
            let mut arrived = 0;
            while arrived < total && self.tasks[arrived].arrival_time <= clock {
                let at = self.tasks[arrived].arrival_time;
                if last_dispatch < at && at < clock {
                    let state = &mut self.states[arrived];
                    state.current_priority = (state.current_priority - 1).max(0);
                }
                arrived += 1;
            }

            // Minimum priority among arrived, unfinished tasks. Only a
            // strictly smaller candidate replaces the current one, so equal
            // priorities resolve to the earliest task in arrival order.
            let mut selected: Option<usize> = None;
            for i in 0..arrived {
                if self.states[i].completed {
                    continue;
                }
                let better = match selected {
                    Some(s) => self.states[i].current_priority < self.states[s].current_priority,
                    None => true,
                };
                if better {
                    selected = Some(i);
                }
            }

            let Some(chosen) = selected else {
                // Nothing runnable: jump to the next arrival and rescan
                // without emitting a record. With positive costs the ready
                // set can only be empty while a future arrival exists.
                assert!(arrived < total, "no runnable task and no future arrival");
                clock = self.tasks[arrived].arrival_time;
                continue;
            };
            last_dispatch = clock;

            // Feedback update: penalize the dispatched task, age the rest of
            // the ready set.
            for i in 0..arrived {
                if self.states[i].completed {
                    continue;
                }
                let state = &mut self.states[i];
                if i == chosen {
                    state.current_priority += 3;
                } else {
                    state.current_priority = (state.current_priority - 1).max(0);
                }
            }

            let state = &mut self.states[chosen];
            let duration = state.remaining_cost.min(self.tasks[chosen].quantum);
            log.push(DispatchRecord {
                sequence_index: log.len() as u32 + 1,
                task_id: self.tasks[chosen].id,
                start_time: clock,
                end_time: clock + duration,
                priority_at_dispatch: state.current_priority,
            });

            clock += duration;
            state.remaining_cost -= duration;
            if state.remaining_cost == 0 {
                state.completed = true;
                done += 1;
            }
        }

        log
    }
}

/// Fresh engine, full run.
pub fn simulate(registry: &Registry) -> Vec<DispatchRecord> {
    Engine::new(registry).run()
}
