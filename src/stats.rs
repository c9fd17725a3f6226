//! Compression diagnostics (SPEC_FULL §4.6). Pure, informational only; no
//! effect on round-trip correctness.

use crate::metadata::Metadata;

/// Diagnostic figures for a single compression run.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub original_bytes: usize,
    pub framed_bytes: usize,
    pub compression_ratio: f64,
    pub bits_per_base: f64,
    pub input_entropy: f64,
    pub code_stream_entropy: f64,
    pub theoretical_min_bytes: f64,
    pub shannon_efficiency: f64,
}

/// Shannon entropy, in bits per symbol, of a byte histogram.
fn shannon_entropy(bytes: &[u8]) -> f64 {
    if bytes.is_empty() {
        return 0.0;
    }
    let mut counts = [0u64; 256];
    for &b in bytes {
        counts[b as usize] += 1;
    }
    let total = bytes.len() as f64;
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Little-endian octet expansion of a code stream (each `u32` code becomes
/// 4 bytes), matching the reference "32-bit little-endian on disk"
/// convention (SPEC_FULL §6).
fn codes_to_le_bytes(codes: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(codes.len() * 4);
    for &c in codes {
        bytes.extend_from_slice(&c.to_le_bytes());
    }
    bytes
}

/// Compute diagnostics for one compression run. `original` is the input
/// bytes, `framed_codes` is the encoder's output, `metadata` is its paired
/// metadata record (used for `byte_count`).
pub fn stats(original: &[u8], framed_codes: &[u32], metadata: &Metadata) -> Stats {
    let framed_bytes_vec = codes_to_le_bytes(framed_codes);
    let framed_bytes = framed_bytes_vec.len();
    let n = metadata.byte_count.max(1) as f64;

    let compression_ratio = framed_bytes as f64 / n;
    let input_entropy = shannon_entropy(original);
    let code_stream_entropy = shannon_entropy(&framed_bytes_vec);
    let theoretical_min_bytes = input_entropy * n / 8.0;
    let shannon_efficiency = if framed_bytes == 0 {
        0.0
    } else {
        (theoretical_min_bytes / framed_bytes as f64).min(1.0)
    };

    Stats {
        original_bytes: original.len(),
        framed_bytes,
        compression_ratio,
        bits_per_base: 2.0,
        input_entropy,
        code_stream_entropy,
        theoretical_min_bytes,
        shannon_efficiency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Codec, Options};

    #[test]
    fn all_zero_input_has_zero_entropy() {
        assert_eq!(shannon_entropy(&[0u8; 100]), 0.0);
    }

    #[test]
    fn uniform_byte_histogram_has_entropy_near_eight_bits() {
        let data: Vec<u8> = (0..=255u8).collect();
        let e = shannon_entropy(&data);
        assert!((e - 8.0).abs() < 1e-9);
    }

    #[test]
    fn stats_are_well_formed_for_real_input() {
        let codec = Codec::new(Options::default()).unwrap();
        let data = b"the quick brown fox jumps over the lazy dog".repeat(20);
        let (framed, meta) = codec.compress(&data);
        let s = stats(&data, &framed, &meta);
        assert!(s.shannon_efficiency <= 1.0);
        assert!(s.input_entropy >= 0.0 && s.input_entropy <= 8.0);
        assert_eq!(s.bits_per_base, 2.0);
        assert_eq!(s.original_bytes, data.len());
    }

    #[test]
    fn empty_input_does_not_divide_by_zero() {
        let codec = Codec::new(Options::default()).unwrap();
        let (framed, meta) = codec.compress(&[]);
        let s = stats(&[], &framed, &meta);
        assert!(s.shannon_efficiency.is_finite());
        assert!(s.compression_ratio.is_finite());
    }
}
