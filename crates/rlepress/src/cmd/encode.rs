use std::fs;
use std::path::{Path, PathBuf};

use crate::cmd::EncodeArgs;
use crate::exit::{codec_error, io_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::metrics::{avg_code_len, compression_ratio, time_call, FileReport};
use crate::output::{print_report, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let data = fs::read(&args.input)
        .map_err(|err| io_error(&format!("failed reading {}", args.input.display()), err))?;

    let (encoded, encode_time_s) = time_call(|| rlepress_codec::encode(&data));

    let mut decode_time_s = 0.0;
    if !args.no_verify {
        let (result, elapsed) = time_call(|| rlepress_codec::decode(&encoded));
        decode_time_s = elapsed;
        let decoded = result.map_err(|err| codec_error("self-check decode failed", err))?;
        if decoded != data {
            return Err(CliError::new(
                INTERNAL,
                format!("round-trip mismatch for {}", args.input.display()),
            ));
        }
    }

    let out_path = args
        .output
        .unwrap_or_else(|| default_encoded_path(&args.input));
    fs::write(&out_path, &encoded)
        .map_err(|err| io_error(&format!("failed writing {}", out_path.display()), err))?;

    let ratio = compression_ratio(data.len(), encoded.len());
    if ratio < 1.0 {
        tracing::warn!(
            file = %args.input.display(),
            ratio,
            "encoding expanded the input"
        );
    }
    tracing::info!(
        file = %args.input.display(),
        out = %out_path.display(),
        "encoded"
    );

    let report = FileReport {
        file: file_name(&args.input),
        orig_size: data.len() as u64,
        enc_size: encoded.len() as u64,
        compression_ratio: ratio,
        encode_time_s,
        decode_time_s,
        avg_code_len: avg_code_len(encoded.len(), data.len()),
    };
    print_report(&report, format);

    Ok(SUCCESS)
}

/// `<INPUT>.rle`, keeping any existing extension.
pub fn default_encoded_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".rle");
    PathBuf::from(name)
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
