/// Errors that can occur while decoding an RLE byte stream.
///
/// Encoding is total and has no error type.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// An escape byte starts a token that runs past the end of the input.
    ///
    /// Every escape must be followed by a count byte and a value byte. A
    /// truncated token has no well-defined decoding, so the whole call fails.
    #[error("malformed encoding: truncated escape sequence at byte {offset}")]
    MalformedEncoding { offset: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;
