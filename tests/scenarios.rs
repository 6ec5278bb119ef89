use rr_model::{
    InvalidInput, Process, SimulationResult, analyze, core::GanttEntry, metrics::compare,
    simulate,
};

fn procs(spec: &[(&str, u64, u64)]) -> Vec<Process> {
    spec.iter()
        .map(|&(id, arrival, burst)| Process::new(id, arrival, burst))
        .collect()
}

fn gantt(result: &SimulationResult) -> Vec<(&str, u64, u64)> {
    result
        .gantt
        .iter()
        .map(|GanttEntry { process_id, start, end }| (process_id.as_str(), *start, *end))
        .collect()
}

fn completion(result: &SimulationResult, id: &str) -> u64 {
    result.get(id).unwrap().completion
}

/// Three staggered arrivals, quantum 2.
#[test]
fn staggered_arrivals_interleave() {
    let result = simulate(&procs(&[("P1", 0, 4), ("P2", 1, 3), ("P3", 2, 1)]), 2).unwrap();

    assert_eq!(
        gantt(&result),
        [("P1", 0, 2), ("P2", 2, 4), ("P3", 4, 5), ("P1", 5, 7), ("P2", 7, 8)]
    );
    assert_eq!(completion(&result, "P1"), 7);
    assert_eq!(completion(&result, "P2"), 8);
    assert_eq!(completion(&result, "P3"), 5);
    assert_eq!(result.context_switches, 4);
}

/// Same arrivals with a five-tick P1: P1 needs a third slice at the end.
#[test]
fn long_first_process_finishes_last() {
    let result = simulate(&procs(&[("P1", 0, 5), ("P2", 1, 3), ("P3", 2, 1)]), 2).unwrap();

    assert_eq!(
        gantt(&result),
        [
            ("P1", 0, 2),
            ("P2", 2, 4),
            ("P3", 4, 5),
            ("P1", 5, 7),
            ("P2", 7, 8),
            ("P1", 8, 9)
        ]
    );
    assert_eq!(completion(&result, "P1"), 9);
    assert_eq!(result.context_switches, 5);
    let p3 = result.get("P3").unwrap();
    assert_eq!((p3.turnaround, p3.waiting, p3.response), (3, 2, 2));
}

#[test]
fn single_process_never_switches() {
    let result = simulate(&procs(&[("P1", 0, 4)]), 2).unwrap();

    assert_eq!(gantt(&result), [("P1", 0, 2), ("P1", 2, 4)]);
    let row = result.get("P1").unwrap();
    assert_eq!(row.completion, 4);
    assert_eq!(row.waiting, 0);
    assert_eq!(row.response, 0);
    assert_eq!(result.context_switches, 0);
}

#[test]
fn clock_starts_at_first_arrival() {
    let result = simulate(&procs(&[("P1", 3, 2)]), 5).unwrap();

    assert_eq!(gantt(&result), [("P1", 3, 5)]);
    assert_eq!(result.get("P1").unwrap().response, 0);
}

#[test]
fn empty_result_metrics_are_zero() {
    let metrics = analyze(&SimulationResult::default());

    assert_eq!(metrics.total_time, 0);
    assert_eq!(metrics.cpu_utilization, 0.0);
    assert_eq!(metrics.throughput, 0.0);
}

#[test]
fn empty_workload_is_rejected() {
    assert_eq!(simulate(&[], 2), Err(InvalidInput::EmptyWorkload));
}

/// A process arriving exactly when another's slice ends goes first.
#[test]
fn arrival_on_slice_boundary_beats_requeue() {
    let result = simulate(&procs(&[("A", 0, 3), ("B", 2, 2)]), 2).unwrap();
    assert_eq!(gantt(&result), [("A", 0, 2), ("B", 2, 4), ("A", 4, 5)]);
}

/// Processes sharing an arrival keep their input order.
#[test]
fn equal_arrivals_keep_input_order() {
    let result = simulate(&procs(&[("Z", 1, 1), ("Y", 0, 1), ("X", 1, 1)]), 1).unwrap();
    let ids: Vec<_> = result.processes.iter().map(|r| r.process.id.as_str()).collect();
    assert_eq!(ids, ["Y", "Z", "X"]);
    assert_eq!(gantt(&result), [("Y", 0, 1), ("Z", 1, 2), ("X", 2, 3)]);
}

/// The CPU idles between bursts and the clock jumps to the next arrival.
#[test]
fn idle_gap_mid_run() {
    let result = simulate(&procs(&[("A", 0, 2), ("B", 10, 3), ("C", 10, 1)]), 2).unwrap();

    assert_eq!(
        gantt(&result),
        [("A", 0, 2), ("B", 10, 12), ("C", 12, 13), ("B", 13, 14)]
    );
    let metrics = analyze(&result);
    assert_eq!(metrics.total_time, 14);
    assert!((metrics.cpu_utilization - 6.0 / 14.0 * 100.0).abs() < 1e-9);
}

#[test]
fn comparison_reports_both_quanta() {
    let workload = procs(&[("P1", 0, 5), ("P2", 1, 3), ("P3", 2, 1)]);
    let cmp = compare(&workload, 1, 5).unwrap();

    assert_eq!(cmp.left.result.quantum, 1);
    assert_eq!(
        gantt(&cmp.right.result),
        [("P1", 0, 5), ("P2", 5, 8), ("P3", 8, 9)]
    );
    assert!(cmp.left.metrics.context_switches > cmp.right.metrics.context_switches);
}
