//! Thresholded run-length byte codec with escape-sequence framing.
//!
//! Every encoded stream is a concatenation of three token kinds:
//! - a literal byte (any value except the escape),
//! - an escaped literal `[ESCAPE, 0, ESCAPE]` standing for one real escape
//!   byte in the data,
//! - a run token `[ESCAPE, count, value]` standing for `count` consecutive
//!   copies of `value`, where `count` is 4..=255.
//!
//! The count byte directly after an escape disambiguates the two 3-byte
//! forms, so the escape value may freely occur in input data. For every
//! input `decode(encode(data)) == data`, and encoding never grows the
//! output beyond three bytes per input byte.
//!
//! The codec is stateless: both operations are pure functions from a
//! borrowed input to a freshly allocated output, safe to call from any
//! number of threads at once.

pub mod codec;
pub mod error;

pub use codec::{
    decode, decode_into, encode, encode_into, max_encoded_len, ESCAPE, MAX_RUN, RUN_THRESHOLD,
    TOKEN_LEN,
};
pub use error::{CodecError, Result};
