//! End-to-end orchestration (SPEC_FULL §4.5, §6).

use crate::bitbase;
use crate::frame;
use crate::lzw;
use crate::metadata::Metadata;
use crate::ring;
use crate::Error;

/// Options controlling compression and decompression, mirroring the
/// teacher's `Options`/`STD_OPTIONS` pattern.
#[derive(Clone, Debug)]
pub struct Options {
    /// distance between framing markers in the output stream
    pub chunk_size: usize,
    /// accepted for API compatibility, unused by the LZW state machine
    /// (SPEC_FULL §4.2, §9(c))
    pub min_pattern_length: usize,
    /// if true, anomalies raise typed errors; if false, best-effort recovery
    pub strict: bool,
    /// if true, emit trace-level diagnostic logging
    pub verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { chunk_size: 1000, min_pattern_length: 4, strict: true, verbose: false }
    }
}

pub const STD_OPTIONS: Options =
    Options { chunk_size: 1000, min_pattern_length: 4, strict: true, verbose: false };

/// Outcome of [`Codec::decompress`]: the recovered bytes, and, in lenient
/// mode, how far decoding got before an anomaly truncated it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decompressed {
    pub bytes: Vec<u8>,
    pub truncated_at: Option<usize>,
}

/// The DNA-ring codec.
#[derive(Debug)]
pub struct Codec {
    opt: Options,
}

impl Codec {
    /// Construct a codec, validating configuration (SPEC_FULL §7:
    /// `ConfigError` is always fatal).
    pub fn new(opt: Options) -> Result<Self, Error> {
        if opt.chunk_size == 0 {
            return Err(Error::ConfigError("chunk_size must be positive".to_string()));
        }
        Ok(Self { opt })
    }

    pub fn options(&self) -> &Options {
        &self.opt
    }

    /// Run the full encoder chain: pack -> encode bases -> LZW -> ring ->
    /// frame.
    pub fn compress(&self, bytes: &[u8]) -> (Vec<u32>, Metadata) {
        log::debug!("compressing {} bytes", bytes.len());
        let (bases, bit_count) = bitbase::encode_bases(bytes);
        let codes = lzw::encode(&bases);
        let code_count = codes.len() as u64;
        let built = ring::build_ring(&codes);
        let marker = frame::choose_marker(&built.codes);
        let digest = frame::digest(&built.codes);
        let framed = frame::insert_frames(&built.codes, marker, self.opt.chunk_size);

        let metadata = Metadata {
            byte_count: bytes.len() as u64,
            bit_count,
            base_count: bases.len() as u64,
            code_count,
            ring_len: built.ring_len,
            bridge_len: built.bridge_len,
            chunk_size: self.opt.chunk_size,
            marker,
            digest,
        };
        log::debug!(
            "compressed to {} framed codes (ring {}, bridge {}, marker {})",
            framed.len(),
            metadata.ring_len,
            metadata.bridge_len,
            metadata.marker
        );
        (framed, metadata)
    }

    /// Run the full decoder chain: de-frame -> de-ring -> LZW decode ->
    /// decode bases -> unpack.
    pub fn decompress(&self, framed: &[u32], metadata: &Metadata) -> Result<Decompressed, Error> {
        log::debug!("decompressing {} framed codes", framed.len());
        let ring_pre = frame::remove_frames(
            framed,
            metadata.marker,
            metadata.ring_len + metadata.bridge_len,
            &metadata.digest,
            self.opt.strict,
        )?;
        let codes = ring::strip_ring(&ring_pre, metadata.ring_len, metadata.code_count);

        let decoded = lzw::decode(&codes, self.opt.strict)?;
        if let Some(at) = decoded.truncated_at {
            log::warn!("lzw decode truncated at code position {at}");
        }
        let bytes = bitbase::decode_bases(&decoded.bases, metadata.bit_count)?;

        let truncated_at = decoded.truncated_at;
        let bytes = if truncated_at.is_some() {
            // a partial base string cannot be trusted to carry the recorded
            // bit count; only the bytes actually decoded are returned.
            let whole_bytes = decoded.bases.len() / 4;
            bytes[0..whole_bytes.min(bytes.len())].to_vec()
        } else {
            bytes
        };

        Ok(Decompressed { bytes, truncated_at })
    }
}
