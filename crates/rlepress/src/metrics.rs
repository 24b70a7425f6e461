//! Per-file compression metrics and their CSV persistence.
//!
//! Ratios are original/encoded, so values above 1.0 mean the codec paid
//! off. An empty encoding (possible only for empty input) reports +inf.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use serde::Serialize;

/// Metrics gathered for one processed file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    pub orig_size: u64,
    pub enc_size: u64,
    pub compression_ratio: f64,
    pub encode_time_s: f64,
    pub decode_time_s: f64,
    pub avg_code_len: f64,
}

/// `original_len / encoded_len`; +inf when the encoding is empty.
pub fn compression_ratio(original_len: usize, encoded_len: usize) -> f64 {
    if encoded_len == 0 {
        f64::INFINITY
    } else {
        original_len as f64 / encoded_len as f64
    }
}

/// Encoded bytes per original byte (below 1.0 means compression).
pub fn avg_code_len(encoded_len: usize, original_len: usize) -> f64 {
    if original_len == 0 {
        0.0
    } else {
        encoded_len as f64 / original_len as f64
    }
}

/// Run `f` and return its result with the elapsed wall time in seconds.
pub fn time_call<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed().as_secs_f64())
}

pub const CSV_HEADER: &str =
    "file,orig_size,enc_size,compression_ratio,encode_time_s,decode_time_s,avg_code_len";

/// Write all reports to `path` as CSV, creating parent directories.
pub fn write_metrics_csv(reports: &[FileReport], path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = fs::File::create(path)?;
    writeln!(out, "{CSV_HEADER}")?;
    for report in reports {
        writeln!(out, "{}", csv_row(report))?;
    }
    Ok(())
}

fn csv_row(report: &FileReport) -> String {
    format!(
        "{},{},{},{:.4},{:.6},{:.6},{:.6}",
        report.file,
        report.orig_size,
        report.enc_size,
        report.compression_ratio,
        report.encode_time_s,
        report.decode_time_s,
        report.avg_code_len
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> FileReport {
        FileReport {
            file: "dickens".into(),
            orig_size: 8,
            enc_size: 3,
            compression_ratio: compression_ratio(8, 3),
            encode_time_s: 0.001234,
            decode_time_s: 0.000567,
            avg_code_len: avg_code_len(3, 8),
        }
    }

    #[test]
    fn ratio_of_run_heavy_input() {
        assert!((compression_ratio(8, 3) - 8.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn ratio_of_empty_encoding_is_infinite() {
        assert_eq!(compression_ratio(0, 0), f64::INFINITY);
        assert_eq!(compression_ratio(10, 0), f64::INFINITY);
    }

    #[test]
    fn avg_code_len_handles_empty_input() {
        assert_eq!(avg_code_len(0, 0), 0.0);
        assert_eq!(avg_code_len(3, 8), 0.375);
    }

    #[test]
    fn csv_row_formats_fixed_precision() {
        let row = csv_row(&sample_report());
        assert_eq!(row, "dickens,8,3,2.6667,0.001234,0.000567,0.375000");
    }

    #[test]
    fn csv_file_has_header_and_rows() {
        let dir = std::env::temp_dir().join(format!(
            "rlepress-metrics-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        let path = dir.join("results").join("metrics.csv");
        write_metrics_csv(&[sample_report()], &path).expect("csv should be writable");

        let contents = fs::read_to_string(&path).expect("csv should be readable");
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(lines.next().map(|l| l.starts_with("dickens,8,3,")), Some(true));
        assert_eq!(lines.next(), None);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn time_call_returns_result_and_elapsed() {
        let (value, elapsed) = time_call(|| 21 * 2);
        assert_eq!(value, 42);
        assert!(elapsed >= 0.0);
    }
}
