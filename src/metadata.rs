//! Metadata record carried alongside the framed code stream (SPEC_FULL §3,
//! §6). Serializable so a CLI driver can persist `(codes, metadata)` as a
//! side-channel between separate `compress`/`expand` invocations.

use serde::{Deserialize, Serialize};

/// Everything the decoder needs to invert the pipeline without consulting
/// the compressed stream's contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// `N`: original byte count.
    pub byte_count: u64,
    /// `B`: original bit count (`8 * byte_count`, recorded independently).
    pub bit_count: u64,
    /// `L`: base-string length.
    pub base_count: u64,
    /// `ℓ`: pre-ring LZW code count.
    pub code_count: u64,
    /// `P`: prime ring length.
    pub ring_len: u64,
    /// `K`: bridge length.
    pub bridge_len: u64,
    /// `C`: chunk size used for framing.
    pub chunk_size: usize,
    /// `M`: framing marker, guaranteed disjoint from the ring.
    pub marker: u32,
    /// digest over the pre-framed ring (ring + bridge, pre-marker).
    pub digest: String,
}
