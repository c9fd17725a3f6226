//! Circular encapsulation: prime-sized padding plus bridge suffix
//! (SPEC_FULL §4.3).

/// Smallest prime `>= n`, treating `n <= 2` as `2` per the spec.
pub fn next_prime(n: u64) -> u64 {
    if n <= 2 {
        return 2;
    }
    let mut candidate = if n % 2 == 0 { n + 1 } else { n };
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut i = 3u64;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Result of building the pre-framed ring: the codes themselves plus the
/// two length parameters the decoder needs to invert the construction.
pub struct Ring {
    pub codes: Vec<u32>,
    /// prime-padded length, before the bridge suffix
    pub ring_len: u64,
    /// bridge length, `min(floor(sqrt(ring_len)), 10)`
    pub bridge_len: u64,
}

/// Pad `codes` to the next prime length with zeros, then append a bridge
/// suffix repeating the first `bridge_len` codes.
pub fn build_ring(codes: &[u32]) -> Ring {
    let ring_len = next_prime(codes.len() as u64);
    let mut padded = codes.to_vec();
    padded.resize(ring_len as usize, 0);
    let bridge_len = std::cmp::min((ring_len as f64).sqrt() as u64, 10);
    let bridge = padded[0..bridge_len as usize].to_vec();
    padded.extend(bridge);
    log::debug!("built ring: {} codes padded to {ring_len}, bridge {bridge_len}", codes.len());
    Ring { codes: padded, ring_len, bridge_len }
}

/// Inverse of [`build_ring`]: given the ring-proper length `ring_len` and the
/// original (pre-padding) code-stream length, strip the bridge and the zero
/// padding to recover the original codes.
pub fn strip_ring(ring_pre: &[u32], ring_len: u64, original_len: u64) -> Vec<u32> {
    ring_pre[0..ring_len as usize][0..original_len as usize].to_vec()
}
