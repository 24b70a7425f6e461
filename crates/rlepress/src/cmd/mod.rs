use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod corpus;
pub mod decode;
pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress a single file.
    Encode(EncodeArgs),
    /// Restore a single compressed file.
    Decode(DecodeArgs),
    /// Compress every file in a directory and collect metrics.
    Corpus(CorpusArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Corpus(args) => corpus::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// File to compress.
    pub input: PathBuf,
    /// Destination path. Default: `<INPUT>.rle`.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
    /// Skip the decode-back self check.
    #[arg(long)]
    pub no_verify: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Compressed file to restore.
    pub input: PathBuf,
    /// Destination path. Default: strip a `.rle` suffix, else append `.out`.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CorpusArgs {
    /// Directory whose regular files are compressed (non-recursive).
    pub input: PathBuf,
    /// Base directory for compressed/, decompressed/ and results/ output.
    #[arg(long, short = 'o')]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
