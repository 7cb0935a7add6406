//! Task registry: validated, arrival-ordered storage for the simulation input.

use std::str::FromStr;

use thiserror::Error;

use crate::task::{Task, TaskState};

/// A task record that does not decompose into the five required integers.
///
/// Raised at load time, before any simulation step runs; fatal to the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInput {
    #[error("task record `{0}` does not split into five `/`-separated fields")]
    FieldCount(String),

    #[error("task record `{record}`: `{field}` is not an integer")]
    NonInteger { record: String, field: String },

    #[error("task record `{0}`: total cost and quantum must be positive")]
    NonPositive(String),
}

fn parse_int<T: FromStr>(record: &str, field: &str) -> Result<T, MalformedInput> {
    field.trim().parse().map_err(|_| MalformedInput::NonInteger {
        record: record.to_owned(),
        field: field.trim().to_owned(),
    })
}

impl FromStr for Task {
    type Err = MalformedInput;

    /// Parse one raw record: `id/arrival_time/total_cost/initial_priority/quantum`.
    fn from_str(s: &str) -> Result<Self, MalformedInput> {
        let record = s.trim();
        let fields: Vec<&str> = record.split('/').collect();

        let task = match fields.as_slice() {
            [id, arrival, cost, priority, quantum] => Task {
                id: parse_int(record, id)?,
                arrival_time: parse_int(record, arrival)?,
                total_cost: parse_int(record, cost)?,
                initial_priority: parse_int(record, priority)?,
                quantum: parse_int(record, quantum)?,
            },
            _ => return Err(MalformedInput::FieldCount(record.to_owned())),
        };

        // A zero cost or quantum would stall the engine; the registry is the
        // validation boundary, so reject here.
        if task.total_cost == 0 || task.quantum == 0 {
            return Err(MalformedInput::NonPositive(record.to_owned()));
        }

        Ok(task)
    }
}

/// Passive storage for the task set. Sorting happens once, at construction,
/// with a stable sort on `arrival_time` alone: tasks arriving at the same
/// instant keep their input order, which the engine's tie-break relies on.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    tasks: Vec<Task>,
}

impl Registry {
    /// Parse raw records and build the registry.
    pub fn load<I, S>(records: I) -> Result<Self, MalformedInput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tasks = records
            .into_iter()
            .map(|record| record.as_ref().parse())
            .collect::<Result<Vec<Task>, _>>()?;
        Ok(Self::from_tasks(tasks))
    }

    /// Build from already-parsed tasks (embedding callers, tests).
    pub fn from_tasks(mut tasks: Vec<Task>) -> Self {
        tasks.sort_by_key(|t| t.arrival_time);
        Self { tasks }
    }

    /// Tasks in arrival order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Fresh run-state table, indexed by sort position.
    pub fn initial_states(&self) -> Vec<TaskState> {
        self.tasks.iter().map(TaskState::initial).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let task: Task = "3/10/4/2/1".parse().unwrap();
        assert_eq!(task, Task::new(3, 10, 4, 2, 1));
    }

    #[test]
    fn test_parse_record_trims_whitespace() {
        let task: Task = "  1/0/2/0/2 \n".parse().unwrap();
        assert_eq!(task.id, 1);
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        let err = "1/2/3/4".parse::<Task>().unwrap_err();
        assert_eq!(err, MalformedInput::FieldCount("1/2/3/4".to_owned()));

        assert!("1/2/3/4/5/6".parse::<Task>().is_err());
    }

    #[test]
    fn test_parse_rejects_non_integer_field() {
        let err = "1/2/x/4/5".parse::<Task>().unwrap_err();
        assert_eq!(
            err,
            MalformedInput::NonInteger {
                record: "1/2/x/4/5".to_owned(),
                field: "x".to_owned(),
            }
        );
    }

    #[test]
    fn test_parse_rejects_zero_cost_or_quantum() {
        assert_eq!(
            "1/0/0/0/2".parse::<Task>().unwrap_err(),
            MalformedInput::NonPositive("1/0/0/0/2".to_owned())
        );
        assert!("1/0/3/0/0".parse::<Task>().is_err());
    }

    #[test]
    fn test_load_sorts_by_arrival_keeping_input_order_on_ties() {
        let registry =
            Registry::load(["2/5/1/0/1", "9/0/1/0/1", "4/5/1/0/1", "1/3/1/0/1"]).unwrap();
        let ids: Vec<u32> = registry.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, [9, 1, 2, 4]);
    }

    #[test]
    fn test_lookup_by_id() {
        let registry = Registry::load(["2/5/1/0/1", "9/0/1/0/1"]).unwrap();
        assert_eq!(registry.get(9).unwrap().arrival_time, 0);
        assert!(registry.get(7).is_none());
    }

    #[test]
    fn test_initial_states_mirror_tasks() {
        let registry = Registry::load(["1/0/4/2/2"]).unwrap();
        let states = registry.initial_states();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].remaining_cost, 4);
        assert_eq!(states[0].current_priority, 2);
        assert!(!states[0].completed);
    }
}
