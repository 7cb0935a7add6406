//! End-to-end: ingest a task list, simulate, and render the gantt markup.

use timeslice_core::simulate;
use timeslice_ingest::{load_registry, parse_trace_log};
use timeslice_trace::render_gantt;

const TASKS: &str = "1/0/4/0/2\n2/1/2/0/2\n3/9/3/1/2\n";

#[test]
fn test_pipeline_from_text_to_markup() {
    let registry = load_registry(TASKS).unwrap();
    let records = simulate(&registry);

    // Every task's bars add up to its cost before anything is rendered.
    for task in registry.tasks() {
        let run_time: u64 = records
            .iter()
            .filter(|r| r.task_id == task.id)
            .map(|r| r.end_time - r.start_time)
            .sum();
        assert_eq!(run_time, task.total_cost);
    }

    let markup = render_gantt(registry.tasks(), &records);
    assert!(markup.starts_with("gantt\ndateFormat SSS\naxisFormat %L ms\n"));
    for task in registry.tasks() {
        assert!(markup.contains(&format!("section {}", task.id)));
    }
}

#[test]
fn test_saved_trace_renders_like_a_live_run() {
    let registry = load_registry(TASKS).unwrap();
    let records = simulate(&registry);

    let printed: String = records
        .iter()
        .map(|r| r.to_string() + "\n")
        .collect();
    let reloaded = parse_trace_log(&printed).unwrap();

    assert_eq!(
        render_gantt(registry.tasks(), &reloaded),
        render_gantt(registry.tasks(), &records)
    );
}
