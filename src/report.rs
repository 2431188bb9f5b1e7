//! Rendering of run results.
//!
//! Delimited-text export for spreadsheets and fixed-width text for the
//! terminal. Nothing here feeds back into the simulator.

use std::fmt;

use crate::models::{PriorityClass, RunResult};

/// Column names of the per-job export.
pub const JOB_COLUMNS: [&str; 6] = [
    "Algorithm",
    "Process ID",
    "Response Time",
    "Turnaround Time",
    "Completion Time",
    "Waiting Time",
];

/// Column names of the per-run summary export.
pub const SUMMARY_COLUMNS: [&str; 7] = [
    "Algorithm",
    "Avg Turnaround Time",
    "Avg Waiting Time",
    "Avg Response Time",
    "Throughput",
    "CPU Burst",
    "CPU Utilization (%)",
];

/// Per-job CSV view of one or more runs.
///
/// One row per job, in completion order within each run.
#[derive(Debug, Clone, Copy)]
pub struct JobsCsv<'a>(pub &'a [RunResult]);

impl fmt::Display for JobsCsv<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", JOB_COLUMNS.join(","))?;
        for run in self.0 {
            for o in &run.outcomes {
                writeln!(
                    f,
                    "{},P{},{},{},{},{}",
                    run.policy,
                    o.job_id,
                    o.response_time,
                    o.turnaround_time,
                    o.completion_time,
                    o.waiting_time
                )?;
            }
        }
        Ok(())
    }
}

/// Run-level metrics CSV view of one or more runs.
#[derive(Debug, Clone, Copy)]
pub struct SummaryCsv<'a>(pub &'a [RunResult]);

impl fmt::Display for SummaryCsv<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", SUMMARY_COLUMNS.join(","))?;
        for run in self.0 {
            let m = &run.metrics;
            writeln!(
                f,
                "{},{:.2},{:.2},{:.2},{:.4},{},{:.2}",
                run.policy,
                m.average_turnaround,
                m.average_waiting,
                m.average_response,
                m.throughput,
                m.total_burst_consumed,
                m.cpu_utilization_percent()
            )?;
        }
        Ok(())
    }
}

/// Fixed-width table of one run followed by its metrics.
#[derive(Debug, Clone, Copy)]
pub struct RunTable<'a>(pub &'a RunResult);

impl fmt::Display for RunTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let run = self.0;
        writeln!(f, "== {} ==", run.policy)?;
        writeln!(
            f,
            "{:<8} {:>8} {:>6} {:>8} {:<6} {:>9} {:>10} {:>11} {:>8}",
            "Process",
            "Arrival",
            "Burst",
            "Priority",
            "Class",
            "Response",
            "Turnaround",
            "Completion",
            "Waiting"
        )?;
        for o in &run.outcomes {
            writeln!(
                f,
                "{:<8} {:>8} {:>6} {:>8} {:<6} {:>9} {:>10} {:>11} {:>8}",
                format!("P{}", o.job_id),
                o.arrival_time,
                o.burst_time,
                o.priority,
                PriorityClass::from_priority(o.priority).name(),
                o.response_time,
                o.turnaround_time,
                o.completion_time,
                o.waiting_time
            )?;
        }

        let m = &run.metrics;
        writeln!(f, "Avg. Turnaround Time: {:.2}", m.average_turnaround)?;
        writeln!(f, "Avg. Waiting Time:    {:.2}", m.average_waiting)?;
        writeln!(f, "Avg. Response Time:   {:.2}", m.average_response)?;
        writeln!(f, "Throughput:           {:.4}", m.throughput)?;
        writeln!(f, "CPU Burst:            {}", m.total_burst_consumed)?;
        writeln!(f, "CPU Utilization:      {:.2}%", m.cpu_utilization_percent())
    }
}

/// One-line chart of a run's execution timeline.
///
/// Idle gaps appear as `idle` segments.
#[derive(Debug, Clone, Copy)]
pub struct TimelineChart<'a>(pub &'a RunResult);

impl fmt::Display for TimelineChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("|")?;
        let mut cursor = 0;
        for slice in &self.0.timeline {
            if slice.start > cursor {
                write!(f, " idle {cursor}-{} |", slice.start)?;
            }
            write!(f, " P{} {}-{} |", slice.job_id, slice.start, slice.end)?;
            cursor = slice.end;
        }
        Ok(())
    }
}

/// Exports per-job outcomes of one or more runs as CSV.
pub fn jobs_to_csv(runs: &[RunResult]) -> String {
    JobsCsv(runs).to_string()
}

/// Exports run-level metrics of one or more runs as CSV.
pub fn summary_to_csv(runs: &[RunResult]) -> String {
    SummaryCsv(runs).to_string()
}

/// Renders one run as a fixed-width table followed by its metrics.
pub fn render_table(run: &RunResult) -> String {
    RunTable(run).to_string()
}

/// Renders the execution timeline as a one-line chart.
pub fn render_timeline(run: &RunResult) -> String {
    TimelineChart(run).to_string()
}
