use std::fs;
use std::path::{Path, PathBuf};

use crate::cmd::encode::file_name;
use crate::cmd::CorpusArgs;
use crate::exit::{codec_error, io_error, CliError, CliResult, FAILURE, INTERNAL, SUCCESS};
use crate::metrics::{avg_code_len, compression_ratio, time_call, write_metrics_csv, FileReport};
use crate::output::{print_summary, OutputFormat};

pub fn run(args: CorpusArgs, format: OutputFormat) -> CliResult<i32> {
    let dirs = OutputDirs::create(&args.output)?;

    let mut inputs = list_regular_files(&args.input)?;
    if inputs.is_empty() {
        return Err(CliError::new(
            FAILURE,
            format!("no regular files in {}", args.input.display()),
        ));
    }
    inputs.sort();

    let mut reports = Vec::with_capacity(inputs.len());
    for path in &inputs {
        reports.push(process_file(path, &dirs)?);
    }

    let csv_path = dirs.results.join("metrics.csv");
    write_metrics_csv(&reports, &csv_path)
        .map_err(|err| io_error(&format!("failed writing {}", csv_path.display()), err))?;
    tracing::info!(
        files = reports.len(),
        csv = %csv_path.display(),
        "corpus run complete"
    );

    print_summary(&reports, format);
    Ok(SUCCESS)
}

struct OutputDirs {
    compressed: PathBuf,
    decompressed: PathBuf,
    results: PathBuf,
}

impl OutputDirs {
    fn create(base: &Path) -> CliResult<Self> {
        let dirs = Self {
            compressed: base.join("compressed"),
            decompressed: base.join("decompressed"),
            results: base.join("results"),
        };
        for dir in [&dirs.compressed, &dirs.decompressed, &dirs.results] {
            fs::create_dir_all(dir)
                .map_err(|err| io_error(&format!("failed creating {}", dir.display()), err))?;
        }
        Ok(dirs)
    }
}

fn list_regular_files(dir: &Path) -> CliResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|err| io_error(&format!("failed reading {}", dir.display()), err))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|err| io_error(&format!("failed reading {}", dir.display()), err))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

fn process_file(path: &Path, dirs: &OutputDirs) -> CliResult<FileReport> {
    let name = file_name(path);
    tracing::info!(file = %name, "processing");

    let data = fs::read(path)
        .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;

    let (encoded, encode_time_s) = time_call(|| rlepress_codec::encode(&data));
    let (result, decode_time_s) = time_call(|| rlepress_codec::decode(&encoded));
    let decoded =
        result.map_err(|err| codec_error(&format!("self-check decode failed for {name}"), err))?;
    if decoded != data {
        return Err(CliError::new(
            INTERNAL,
            format!("round-trip mismatch for {name}"),
        ));
    }

    let ratio = compression_ratio(data.len(), encoded.len());
    let enc_path = dirs.compressed.join(format!("{name}.rle"));
    let dec_path = dirs.decompressed.join(&name);

    // When RLE expands the file, store the original on both sides and clamp
    // the reported ratio to 1.0.
    let (stored_size, reported_ratio) = if ratio < 1.0 {
        tracing::debug!(file = %name, ratio, "storing uncompressed");
        write_output(&enc_path, &data)?;
        write_output(&dec_path, &data)?;
        (data.len() as u64, 1.0)
    } else {
        write_output(&enc_path, &encoded)?;
        write_output(&dec_path, &decoded)?;
        (encoded.len() as u64, ratio)
    };

    Ok(FileReport {
        file: name,
        orig_size: data.len() as u64,
        enc_size: stored_size,
        compression_ratio: reported_ratio,
        encode_time_s,
        decode_time_s,
        avg_code_len: avg_code_len(encoded.len(), data.len()),
    })
}

fn write_output(path: &Path, data: &[u8]) -> CliResult<()> {
    fs::write(path, data)
        .map_err(|err| io_error(&format!("failed writing {}", path.display()), err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "rlepress-corpus-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        fs::create_dir_all(&dir).expect("temp dir should be creatable");
        dir
    }

    #[test]
    fn process_file_stores_compressible_file_encoded() {
        let dir = unique_temp_dir("enc");
        let input = dir.join("runs.bin");
        fs::write(&input, [0x41u8; 300]).expect("input should be writable");
        let dirs = OutputDirs::create(&dir.join("out")).expect("dirs should be creatable");

        let report = process_file(&input, &dirs).expect("file should process");
        assert_eq!(report.orig_size, 300);
        assert_eq!(report.enc_size, 6);
        assert!(report.compression_ratio > 1.0);

        let stored = fs::read(dirs.compressed.join("runs.bin.rle")).expect("rle output");
        assert_eq!(stored.len(), 6);
        let restored = fs::read(dirs.decompressed.join("runs.bin")).expect("restored output");
        assert_eq!(restored, vec![0x41u8; 300]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn process_file_falls_back_to_raw_when_expanding() {
        let dir = unique_temp_dir("raw");
        let input = dir.join("zeros.bin");
        // Two isolated escape bytes expand to six, so RLE loses.
        fs::write(&input, [0x00u8, 0x01, 0x00]).expect("input should be writable");
        let dirs = OutputDirs::create(&dir.join("out")).expect("dirs should be creatable");

        let report = process_file(&input, &dirs).expect("file should process");
        assert_eq!(report.compression_ratio, 1.0);
        assert_eq!(report.enc_size, report.orig_size);
        assert!(report.avg_code_len > 1.0);

        let stored = fs::read(dirs.compressed.join("zeros.bin.rle")).expect("stored output");
        assert_eq!(stored, vec![0x00u8, 0x01, 0x00]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn list_regular_files_skips_directories() {
        let dir = unique_temp_dir("list");
        fs::write(dir.join("a.bin"), b"data").expect("file should be writable");
        fs::create_dir_all(dir.join("nested")).expect("dir should be creatable");

        let files = list_regular_files(&dir).expect("dir should list");
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.bin"));

        let _ = fs::remove_dir_all(&dir);
    }
}
