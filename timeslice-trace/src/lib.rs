//! timeslice-trace: renders dispatch logs into mermaid gantt markup.

pub mod gantt;

pub use gantt::{Gantt, render_gantt};
