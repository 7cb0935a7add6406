//! Mermaid gantt markup for a task set and its dispatch log.
//!
//! One section per task, holding a milestone at the arrival instant
//! (labelled with the initial priority) and one bar per dispatch record
//! (labelled with the priority at dispatch). Paste the output into
//! https://mermaid.live/ to see the timeline.

use timeslice_core::{DispatchRecord, Task};

/// Simulated-time units render as zero-padded milliseconds.
fn format_time(t: u64) -> String {
    format!("{t:03}")
}

enum Row {
    Milestone { label: i64, at: u64 },
    Bar { label: i64, start_at: u64, end_at: u64 },
}

impl Row {
    fn to_md(&self) -> String {
        match self {
            Row::Milestone { label, at } => {
                format!("{}: milestone, {}, 0", label, format_time(*at))
            }
            Row::Bar {
                label,
                start_at,
                end_at,
            } => format!(
                "{}: {}, {}",
                label,
                format_time(*start_at),
                format_time(*end_at)
            ),
        }
    }
}

struct Section {
    name: String,
    rows: Vec<Row>,
}

/// Gantt builder. Sections keep insertion order.
pub struct Gantt {
    sections: Vec<Section>,
}

impl Gantt {
    pub fn new() -> Gantt {
        Gantt {
            sections: Vec::new(),
        }
    }

    fn section(&mut self, name: &str) -> &mut Section {
        if let Some(i) = self.sections.iter().position(|s| s.name == name) {
            return &mut self.sections[i];
        }
        self.sections.push(Section {
            name: name.to_owned(),
            rows: Vec::new(),
        });
        self.sections.last_mut().unwrap()
    }

    pub fn push_milestone(&mut self, section: &str, label: i64, at: u64) {
        self.section(section).rows.push(Row::Milestone { label, at });
    }

    pub fn push_bar(&mut self, section: &str, label: i64, start_at: u64, end_at: u64) {
        self.section(section).rows.push(Row::Bar {
            label,
            start_at,
            end_at,
        });
    }

    /// Export as mermaid markup rows.
    pub fn to_md(&self) -> Vec<String> {
        let mut rows = vec![
            "gantt".to_string(),
            "dateFormat SSS".to_string(),
            "axisFormat %L ms".to_string(),
            String::new(),
        ];

        for section in &self.sections {
            rows.push(format!("section {}", section.name));
            rows.extend(section.rows.iter().map(Row::to_md));
            rows.push(String::new());
        }

        rows
    }
}

impl Default for Gantt {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a task set and its dispatch log, one section per task in input
/// order, records in chronological order within each section. Records whose
/// id matches no task are dropped.
pub fn render_gantt(tasks: &[Task], records: &[DispatchRecord]) -> String {
    let mut gantt = Gantt::new();

    for task in tasks {
        let name = task.id.to_string();
        gantt.push_milestone(&name, task.initial_priority, task.arrival_time);
        for record in records.iter().filter(|r| r.task_id == task.id) {
            gantt.push_bar(
                &name,
                record.priority_at_dispatch,
                record.start_time,
                record.end_time,
            );
        }
    }

    gantt.to_md().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeslice_core::{Registry, simulate};

    #[test]
    fn test_drawing_gantt() {
        let mut gantt = Gantt::new();
        gantt.push_bar("1", 3, 0, 2);
        gantt.push_milestone("2", 0, 1);

        assert_eq!(
            gantt.to_md(),
            [
                "gantt",
                "dateFormat SSS",
                "axisFormat %L ms",
                "",
                "section 1",
                "3: 000, 002",
                "",
                "section 2",
                "0: milestone, 001, 0",
                "",
            ]
        );
    }

    #[test]
    fn test_time_formatting() {
        assert_eq!(format_time(4), "004");
        assert_eq!(format_time(1234), "1234");
    }

    #[test]
    fn test_render_groups_records_per_task_in_input_order() {
        let registry = Registry::load(["1/0/4/0/2", "2/1/2/0/2"]).unwrap();
        let markup = render_gantt(registry.tasks(), &simulate(&registry));

        assert_eq!(
            markup,
            concat!(
                "gantt\n",
                "dateFormat SSS\n",
                "axisFormat %L ms\n",
                "\n",
                "section 1\n",
                "0: milestone, 000, 0\n",
                "3: 000, 002\n",
                "5: 004, 006\n",
                "\n",
                "section 2\n",
                "0: milestone, 001, 0\n",
                "3: 002, 004\n",
                "",
            )
        );
    }

    #[test]
    fn test_unknown_task_ids_are_dropped() {
        let registry = Registry::load(["1/0/2/0/2"]).unwrap();
        let stray = DispatchRecord {
            sequence_index: 9,
            task_id: 42,
            start_time: 0,
            end_time: 1,
            priority_at_dispatch: 0,
        };
        let markup = render_gantt(registry.tasks(), &[stray]);
        assert!(!markup.contains("42"));
    }
}
