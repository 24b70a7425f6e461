use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{CodecError, Result};

/// Byte value reserved to introduce a 3-byte token in the encoded stream.
pub const ESCAPE: u8 = 0x00;

/// Minimum run length worth a run token. Shorter runs stay literal: a run
/// token costs 3 bytes, so runs of 1-3 are never cheaper encoded.
pub const RUN_THRESHOLD: usize = 4;

/// Maximum run length a single token can carry. The count is an 8-bit wire
/// field; longer runs are split into multiple tokens.
pub const MAX_RUN: usize = u8::MAX as usize;

/// Size of every escape-introduced token: escape (1) + count (1) + value (1).
pub const TOKEN_LEN: usize = 3;

/// Upper bound on encoded size for an input of `input_len` bytes.
///
/// Worst case is input consisting entirely of isolated escape bytes, each
/// encoded as a 3-byte escaped literal.
pub fn max_encoded_len(input_len: usize) -> usize {
    input_len * TOKEN_LEN
}

/// Encode `data` with thresholded run-length encoding.
///
/// Token format:
/// ```text
/// ┌────────────────────────┬─────────────────────────────────────────┐
/// │ byte != ESCAPE         │ literal, passed through unchanged        │
/// │ [ESCAPE, 0, ESCAPE]    │ one literal occurrence of ESCAPE         │
/// │ [ESCAPE, count, value] │ `value` repeated `count` (4..=255) times │
/// └────────────────────────┴─────────────────────────────────────────┘
/// ```
///
/// Encoding is total: every input, including the empty one, has an encoding,
/// and `decode` inverts it exactly.
pub fn encode(data: &[u8]) -> Bytes {
    let mut dst = BytesMut::with_capacity(data.len());
    encode_into(data, &mut dst);
    dst.freeze()
}

/// Encode `data`, appending to `dst`. Buffer-reusing form of [`encode`].
pub fn encode_into(data: &[u8], dst: &mut BytesMut) {
    let mut i = 0;
    while i < data.len() {
        let value = data[i];
        let mut run = 1;
        while i + run < data.len() && data[i + run] == value && run < MAX_RUN {
            run += 1;
        }

        if run >= RUN_THRESHOLD {
            dst.reserve(TOKEN_LEN);
            dst.put_u8(ESCAPE);
            dst.put_u8(run as u8);
            dst.put_u8(value);
        } else if value == ESCAPE {
            // Below-threshold escapes must stay distinguishable from token
            // headers, so each one becomes an escaped literal.
            for _ in 0..run {
                dst.put_slice(&[ESCAPE, 0, ESCAPE]);
            }
        } else {
            dst.put_bytes(value, run);
        }
        i += run;
    }
}

/// Decode a buffer produced by [`encode`].
///
/// Fails with [`CodecError::MalformedEncoding`] when an escape byte starts a
/// token with fewer than two bytes left in the input.
pub fn decode(encoded: &[u8]) -> Result<Bytes> {
    let mut dst = BytesMut::with_capacity(encoded.len());
    decode_into(encoded, &mut dst)?;
    Ok(dst.freeze())
}

/// Decode `encoded`, appending to `dst`. Buffer-reusing form of [`decode`].
pub fn decode_into(encoded: &[u8], dst: &mut BytesMut) -> Result<()> {
    let mut i = 0;
    while i < encoded.len() {
        let byte = encoded[i];
        if byte != ESCAPE {
            dst.put_u8(byte);
            i += 1;
            continue;
        }

        if i + TOKEN_LEN > encoded.len() {
            return Err(CodecError::MalformedEncoding { offset: i });
        }
        let count = encoded[i + 1];
        let value = encoded[i + 2];
        if count == 0 && value == ESCAPE {
            dst.put_u8(ESCAPE);
        } else {
            dst.put_bytes(value, count as usize);
        }
        i += TOKEN_LEN;
    }
    Ok(())
}
