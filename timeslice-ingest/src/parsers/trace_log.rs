//! Saved dispatch logs, as printed by the simulator.
//!
//! Expected line shape:
//!   1/1/0/2/3
//!   2/2/2/4/3
//! in the order: sequence index, task id, start, end, priority.

use anyhow::{bail, Result};
use regex::Regex;
use timeslice_core::DispatchRecord;

/// Parse a saved dispatch log back into records. Blank lines are skipped.
pub fn parse_trace_log(text: &str) -> Result<Vec<DispatchRecord>> {
    let line_re = Regex::new(concat!(
        r"^(?P<seq>\d+)/(?P<id>\d+)/",
        r"(?P<start>\d+)/(?P<end>\d+)/(?P<priority>-?\d+)$"
    ))?;

    let mut records = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let caps = match line_re.captures(line) {
            Some(caps) => caps,
            None => bail!("line {}: malformed dispatch record `{line}`", lineno + 1),
        };

        records.push(DispatchRecord {
            sequence_index: caps["seq"].parse()?,
            task_id: caps["id"].parse()?,
            start_time: caps["start"].parse()?,
            end_time: caps["end"].parse()?,
            priority_at_dispatch: caps["priority"].parse()?,
        });
    }

    Ok(records)
}
