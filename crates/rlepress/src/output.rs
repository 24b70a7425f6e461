use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::metrics::FileReport;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

const REPORT_HEADER: [&str; 7] = [
    "FILE",
    "ORIG",
    "ENC",
    "RATIO",
    "ENC s",
    "DEC s",
    "AVG LEN",
];

/// Print a single per-file report on stdout.
pub fn print_report(report: &FileReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => {
            let mut table = new_table();
            table.add_row(report_row(report));
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{}", pretty_line(report)),
    }
}

/// Print one row per processed file, JSON as a line-delimited stream.
pub fn print_summary(reports: &[FileReport], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            for report in reports {
                print_json(report);
            }
        }
        OutputFormat::Table => {
            let mut table = new_table();
            for report in reports {
                table.add_row(report_row(report));
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for report in reports {
                println!("{}", pretty_line(report));
            }
        }
    }
}

/// Result of restoring one compressed file (the `decode` command).
#[derive(Serialize)]
pub struct RestoreOutput {
    pub file: String,
    pub enc_size: u64,
    pub orig_size: u64,
    pub decode_time_s: f64,
}

pub fn print_restored(restored: &RestoreOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(restored),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FILE", "ENC", "ORIG", "DEC s"])
                .add_row(vec![
                    restored.file.clone(),
                    restored.enc_size.to_string(),
                    restored.orig_size.to_string(),
                    format!("{:.6}", restored.decode_time_s),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "file={} enc={} orig={} decode_s={:.6}",
                restored.file, restored.enc_size, restored.orig_size, restored.decode_time_s
            );
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(REPORT_HEADER.to_vec());
    table
}

fn report_row(report: &FileReport) -> Vec<String> {
    vec![
        report.file.clone(),
        report.orig_size.to_string(),
        report.enc_size.to_string(),
        format!("{:.4}", report.compression_ratio),
        format!("{:.6}", report.encode_time_s),
        format!("{:.6}", report.decode_time_s),
        format!("{:.6}", report.avg_code_len),
    ]
}

fn pretty_line(report: &FileReport) -> String {
    format!(
        "file={} orig={} enc={} ratio={:.4} encode_s={:.6} decode_s={:.6}",
        report.file,
        report.orig_size,
        report.enc_size,
        report.compression_ratio,
        report.encode_time_s,
        report.decode_time_s
    )
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}
