//! Trans-splicing frame inserter/remover plus digest (SPEC_FULL §4.4).

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use crate::Error;

/// Choose a framing marker disjoint from every code in `ring`: `max(ring)+1`,
/// bumped until provably absent (the bump is a no-op by construction, but is
/// kept explicit to match the spec's stated procedure).
pub fn choose_marker(ring: &[u32]) -> u32 {
    let mut marker = ring.iter().copied().max().unwrap_or(0) + 1;
    let present: HashSet<u32> = ring.iter().copied().collect();
    while present.contains(&marker) {
        marker += 1;
    }
    marker
}

/// Deterministic fingerprint of the ring, used only for integrity
/// verification (SPEC_FULL §9 open question (b)): a `SipHash`-backed 64-bit
/// hash over the little-endian byte expansion of the codes, hex-rendered.
pub fn digest(ring: &[u32]) -> String {
    let mut bytes = Vec::with_capacity(ring.len() * 4);
    for &code in ring {
        bytes.extend_from_slice(&code.to_le_bytes());
    }
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hex::encode(hasher.finish().to_be_bytes())
}

/// Interleave `marker` before every chunk of `chunk_size` ring codes.
pub fn insert_frames(ring: &[u32], marker: u32, chunk_size: usize) -> Vec<u32> {
    let mut framed = Vec::with_capacity(ring.len() + ring.len() / chunk_size.max(1) + 1);
    let mut i = 0;
    while i < ring.len() {
        framed.push(marker);
        let end = std::cmp::min(i + chunk_size, ring.len());
        framed.extend_from_slice(&ring[i..end]);
        i = end;
    }
    framed
}

/// Drop every occurrence of `marker`, verify the digest over the full
/// pre-framed ring (length `ring_len + bridge_len`, i.e. including the
/// bridge suffix — the digest is computed over that same span on the
/// encoder side, see [`digest`]'s caller in `codec::Codec::compress`), and
/// return the surviving pre-framed ring. In lenient mode a survivor stream
/// shorter than `pre_framed_len` is zero-padded out to length rather than
/// rejected, matching the best-effort recovery this stage otherwise gives
/// the digest check below.
pub fn remove_frames(
    framed: &[u32],
    marker: u32,
    pre_framed_len: u64,
    expected_digest: &str,
    strict: bool,
) -> Result<Vec<u32>, Error> {
    let mut surviving: Vec<u32> = framed.iter().copied().filter(|&c| c != marker).collect();
    if (surviving.len() as u64) < pre_framed_len {
        let detail = format!(
            "surviving stream has {} codes, fewer than the recorded pre-framed ring length {pre_framed_len}",
            surviving.len()
        );
        if strict {
            return Err(Error::FormatError { stage: "frame remover", detail });
        }
        log::warn!("{detail}; zero-padding to proceed (lenient mode)");
        surviving.resize(pre_framed_len as usize, 0);
    }
    let actual = digest(&surviving[0..pre_framed_len as usize]);
    if actual != expected_digest {
        if strict {
            return Err(Error::IntegrityError {
                expected: expected_digest.to_string(),
                actual,
            });
        }
        log::warn!("digest mismatch: expected {expected_digest}, computed {actual}; proceeding (lenient mode)");
    }
    Ok(surviving)
}
