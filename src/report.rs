//! Output writers for a [`Comparison`].

use std::io::{self, Write};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::metrics::Comparison;

const JOB_COLUMNS: [&str; 3] = ["Job No", "Arrival Time", "Job Size"];
const RUN_COLUMNS: [&str; 7] = [
    "Start Time",
    "Time Left",
    "Status",
    "Context Switches",
    "End Time",
    "Response Time",
    "Turnaround Time",
];
// Leading blank separator + per-run columns
const RUN_WIDTH: usize = RUN_COLUMNS.len() + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Csv,
    Json,
    Table,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Table => "txt",
        }
    }
}

pub fn write_report<W: Write>(
    writer: W,
    format: Format,
    comparison: &Comparison,
    labels: &[&str],
) -> io::Result<()> {
    match format {
        Format::Csv => write_csv(writer, comparison, labels),
        Format::Json => write_json(writer, comparison),
        Format::Table => write_table(writer, comparison),
    }
}

/// Wide CSV: job columns once, then one column group per policy run.
pub fn write_csv<W: Write>(mut w: W, comparison: &Comparison, labels: &[&str]) -> io::Result<()> {
    for label in labels {
        writeln!(w, "{label}")?;
    }

    let mut title = vec![String::new(); JOB_COLUMNS.len()];
    title[0] = "Job Details".to_string();
    let mut summary = vec![String::new(); JOB_COLUMNS.len()];
    let mut header: Vec<String> = JOB_COLUMNS.iter().map(ToString::to_string).collect();

    for run in &comparison.runs {
        let mut group = vec![String::new(); RUN_WIDTH];
        group[1] = run.policy.to_string();
        title.extend(group);

        summary.extend([
            String::new(),
            "Avg Response:".to_string(),
            format!("{:.2}", run.summary.avg_response),
            "Avg Turnaround:".to_string(),
            format!("{:.2}", run.summary.avg_turnaround),
            "Total Context Switches:".to_string(),
            run.summary.total_context_switches.to_string(),
            String::new(),
        ]);

        header.push(String::new());
        header.extend(RUN_COLUMNS.iter().map(ToString::to_string));
    }

    writeln!(w, "{}", title.join(","))?;
    writeln!(w, "{}", summary.join(","))?;
    writeln!(w, "{}", header.join(","))?;

    let Some(first) = comparison.runs.first() else {
        return w.flush();
    };
    for (idx, job) in first.records.iter().enumerate() {
        let mut row = vec![
            job.job_no.to_string(),
            format!("{:.2}", job.arrival_time),
            format!("{:.2}", job.size),
        ];
        for run in &comparison.runs {
            let r = &run.records[idx];
            row.extend([
                String::new(),
                r.start_time.to_string(),
                format!("{:.2}", r.time_left),
                r.status.to_string(),
                r.context_switches.to_string(),
                r.end_time.to_string(),
                format!("{:.2}", r.response_time),
                format!("{:.2}", r.turnaround),
            ]);
        }
        writeln!(w, "{}", row.join(","))?;
    }
    w.flush()
}

pub fn write_json<W: Write>(mut w: W, comparison: &Comparison) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut w, comparison)?;
    writeln!(w)?;
    w.flush()
}

/// Summary table for the terminal.
pub fn write_table<W: Write>(mut w: W, comparison: &Comparison) -> io::Result<()> {
    writeln!(w, "{} ({} jobs)", comparison.label, comparison.jobs)?;
    writeln!(
        w,
        "{:<10} {:>14} {:>16} {:>18} {:>10} {:>10}",
        "Policy", "Avg Response", "Avg Turnaround", "Context Switches", "Makespan", "Idle"
    )?;
    for run in &comparison.runs {
        writeln!(
            w,
            "{:<10} {:>14.2} {:>16.2} {:>18} {:>10} {:>10}",
            run.policy.to_string(),
            run.summary.avg_response,
            run.summary.avg_turnaround,
            run.summary.total_context_switches,
            run.summary.makespan,
            run.idle_ticks,
        )?;
    }
    w.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metrics::compare,
        sim::{JobSpec, Policy},
    };

    fn comparison() -> Comparison {
        let jobs = vec![JobSpec::new(5.0, 0.0), JobSpec::new(3.0, 1.0)];
        compare("pair", &jobs, &[Policy::Fifo, Policy::Rr { quantum: 2 }], false)
    }

    fn render(format: Format, labels: &[&str]) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, format, &comparison(), labels).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn csv_has_one_column_group_per_run() {
        let text = render(Format::Csv, &["Gaussian,Mean: 150, SD: 20"]);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Gaussian,Mean: 150, SD: 20");
        assert_eq!(lines[1], "Job Details,,,,FIFO,,,,,,,,RR(2),,,,,,");
        assert_eq!(
            lines[2],
            ",,,,Avg Response:,2.00,Avg Turnaround:,6.00,Total Context Switches:,2,,,Avg Response:,0.50,Avg Turnaround:,7.00,Total Context Switches:,8,"
        );
        assert!(lines[3].starts_with("Job No,Arrival Time,Job Size,,Start Time,Time Left,Status"));
        assert_eq!(lines[4], "0,0.00,5.00,,0,0.00,2,1,5,0.00,5.00,,0,0.00,2,4,8,0.00,8.00");
        assert_eq!(lines.len(), 6);

        let width = lines[3].split(',').count();
        assert!(lines[1..].iter().all(|l| l.split(',').count() == width));
    }

    #[test]
    fn json_round_trips_through_serde() {
        let text = render(Format::Json, &[]);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["label"], "pair");
        assert_eq!(value["runs"][1]["policy"]["kind"], "rr");
        assert_eq!(value["runs"][0]["records"][1]["end_time"], 8);
    }

    #[test]
    fn table_lists_every_run() {
        let text = render(Format::Table, &[]);
        assert!(text.starts_with("pair (2 jobs)"));
        assert!(text.contains("FIFO"));
        assert!(text.contains("RR(2)"));
    }
}
