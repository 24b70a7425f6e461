use std::fs;
use std::path::{Path, PathBuf};

use crate::cmd::encode::file_name;
use crate::cmd::DecodeArgs;
use crate::exit::{codec_error, io_error, CliResult, SUCCESS};
use crate::metrics::time_call;
use crate::output::{print_restored, OutputFormat, RestoreOutput};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let encoded = fs::read(&args.input)
        .map_err(|err| io_error(&format!("failed reading {}", args.input.display()), err))?;

    let (result, decode_time_s) = time_call(|| rlepress_codec::decode(&encoded));
    let decoded = result
        .map_err(|err| codec_error(&format!("failed decoding {}", args.input.display()), err))?;

    let out_path = args
        .output
        .unwrap_or_else(|| default_decoded_path(&args.input));
    fs::write(&out_path, &decoded)
        .map_err(|err| io_error(&format!("failed writing {}", out_path.display()), err))?;

    tracing::info!(
        file = %args.input.display(),
        out = %out_path.display(),
        "restored"
    );

    print_restored(
        &RestoreOutput {
            file: file_name(&args.input),
            enc_size: encoded.len() as u64,
            orig_size: decoded.len() as u64,
            decode_time_s,
        },
        format,
    );

    Ok(SUCCESS)
}

/// Strip a trailing `.rle`; otherwise append `.out` to avoid clobbering the
/// input file.
pub fn default_decoded_path(input: &Path) -> PathBuf {
    let name = input.as_os_str().to_string_lossy();
    match name.strip_suffix(".rle") {
        Some(stripped) if !stripped.is_empty() => PathBuf::from(stripped),
        _ => {
            let mut name = input.as_os_str().to_os_string();
            name.push(".out");
            PathBuf::from(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_decoded_path_strips_rle_suffix() {
        assert_eq!(
            default_decoded_path(Path::new("out/dickens.txt.rle")),
            PathBuf::from("out/dickens.txt")
        );
    }

    #[test]
    fn default_decoded_path_appends_out_otherwise() {
        assert_eq!(
            default_decoded_path(Path::new("dickens.bin")),
            PathBuf::from("dickens.bin.out")
        );
        assert_eq!(
            default_decoded_path(Path::new(".rle")),
            PathBuf::from(".rle.out")
        );
    }
}
