//! Bit packer and base encoder (nucleotide alphabet transform).
//!
//! Maps an arbitrary byte sequence to a bit string, and a bit string to a
//! sequence over the four-symbol alphabet {A,C,G,T}, represented internally
//! as `u8` values `0..=3` in table order.

use bit_vec::BitVec;
use crate::Error;

/// Result of packing bytes into bits: the bit vector and its exact length.
/// `bits.len()` may exceed `bit_count` by at most one padding bit.
struct PackedBits {
    bits: BitVec,
    bit_count: u64,
}

/// Pack a byte sequence MSB-first into a bit vector, padding to even length.
fn pack_bits(bytes: &[u8]) -> PackedBits {
    let mut bits = BitVec::from_bytes(bytes);
    let bit_count = (bytes.len() as u64) * 8;
    if bit_count % 2 != 0 {
        bits.push(false);
    }
    PackedBits { bits, bit_count }
}

/// Convert a 2-bit group to its base symbol per the fixed table
/// `{00->A, 01->C, 10->G, 11->T}`, represented as `0..=3`.
fn bits_to_base(hi: bool, lo: bool) -> u8 {
    ((hi as u8) << 1) | (lo as u8)
}

fn base_to_bits(base: u8) -> (bool, bool) {
    (base & 0b10 != 0, base & 0b01 != 0)
}

/// Encode a byte sequence into a base string plus its exact bit count.
///
/// Returns `(bases, bit_count)` where `bit_count = 8 * bytes.len()` and
/// `bases.len() == bit_count.div_ceil(2)`.
pub fn encode_bases(bytes: &[u8]) -> (Vec<u8>, u64) {
    let packed = pack_bits(bytes);
    let mut bases = Vec::with_capacity(packed.bits.len() / 2);
    let mut i = 0;
    while i + 1 < packed.bits.len() {
        let hi = packed.bits.get(i).unwrap();
        let lo = packed.bits.get(i + 1).unwrap();
        bases.push(bits_to_base(hi, lo));
        i += 2;
    }
    log::trace!("encoded {} bytes into {} bases", bytes.len(), bases.len());
    (bases, packed.bit_count)
}

/// Decode a base string back into bytes, regrouped MSB-first into
/// `bit_count.div_ceil(8)` octets. If at least `bit_count` bits are
/// recovered, the stream is simply truncated to length. If fewer bits are
/// recovered (lenient-mode base dropping), the trailing octet is left-padded
/// with zeros: the recovered bits are right-justified (low-order) in that
/// octet rather than zero-extended past them, so real data never ends up
/// shifted into the high bits of a byte it didn't originally occupy.
pub fn decode_bases(bases: &[u8], bit_count: u64) -> Result<Vec<u8>, Error> {
    let mut bits = BitVec::new();
    for (i, &base) in bases.iter().enumerate() {
        if base > 3 {
            return Err(Error::FormatError {
                stage: "base decoder",
                detail: format!("symbol {base} at position {i} is out of range 0..=3"),
            });
        }
        let (hi, lo) = base_to_bits(base);
        bits.push(hi);
        bits.push(lo);
    }
    let recovered = bits.len() as u64;
    let byte_count = bit_count.div_ceil(8) as usize;

    if recovered >= bit_count {
        bits.truncate(bit_count as usize);
        let mut out = bits.to_bytes();
        out.resize(byte_count, 0);
        return Ok(out);
    }

    let full_bytes = (recovered / 8) as usize;
    let partial_bits = (recovered % 8) as usize;
    let mut whole = BitVec::new();
    for i in 0..full_bytes * 8 {
        whole.push(bits.get(i).unwrap());
    }
    let mut out = whole.to_bytes();
    if partial_bits > 0 {
        let mut trailing = BitVec::from_elem(8 - partial_bits, false);
        for i in (full_bytes * 8)..(recovered as usize) {
            trailing.push(bits.get(i).unwrap());
        }
        out.extend(trailing.to_bytes());
    }
    out.resize(byte_count, 0);
    Ok(out)
}

/// Render a base symbol (`0..=3`) as its ACGT character, for diagnostics and
/// literal test fixtures.
pub fn base_to_char(base: u8) -> char {
    match base {
        0 => 'A',
        1 => 'C',
        2 => 'G',
        3 => 'T',
        _ => '?',
    }
}

/// Parse an ACGT character into its base symbol. Strict mode fails on any
/// character outside {A,C,G,T}; lenient mode returns `None` so the caller can
/// drop the symbol with a warning.
pub fn char_to_base(c: char, strict: bool) -> Result<Option<u8>, Error> {
    match c {
        'A' => Ok(Some(0)),
        'C' => Ok(Some(1)),
        'G' => Ok(Some(2)),
        'T' => Ok(Some(3)),
        _ if strict => Err(Error::FormatError {
            stage: "base parser",
            detail: format!("invalid base character {c:?}"),
        }),
        _ => {
            log::warn!("dropping invalid base character {c:?}");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_zero_byte_is_all_a() {
        let (bases, bit_count) = encode_bases(&[0x00]);
        assert_eq!(bit_count, 8);
        assert_eq!(bases.iter().map(|&b| base_to_char(b)).collect::<String>(), "AAAA");
    }

    #[test]
    fn round_trips_arbitrary_bytes() {
        let data: Vec<u8> = (0..=255u8).collect();
        let (bases, bit_count) = encode_bases(&data);
        let back = decode_bases(&bases, bit_count).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn empty_input_round_trips() {
        let (bases, bit_count) = encode_bases(&[]);
        assert!(bases.is_empty());
        assert_eq!(bit_count, 0);
        assert_eq!(decode_bases(&bases, bit_count).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn under_supplied_bases_left_pad_the_trailing_octet() {
        // bit_count calls for 2 full bytes (16 bits) but only 3 bases (6 bits)
        // are available, as happens when lenient decoding drops trailing
        // bases. The recovered 6 bits must land as the low-order bits of the
        // trailing octet (zero-padded on the high side), not zero-extended
        // past them.
        let bases = [3u8, 0u8, 1u8]; // T, A, C
        let out = decode_bases(&bases, 16).unwrap();
        assert_eq!(out, vec![0b0011_0001, 0x00]);
    }

    #[test]
    fn odd_bit_count_is_tolerated() {
        // 3 bits is not a real byte boundary, but the transform must not panic.
        let mut bits = BitVec::new();
        bits.push(true);
        bits.push(false);
        bits.push(true);
        // emulate pack_bits behavior directly since encode_bases only takes bytes
        if bits.len() % 2 != 0 {
            bits.push(false);
        }
        assert_eq!(bits.len(), 4);
    }

    #[test]
    fn char_round_trip() {
        for base in 0..=3u8 {
            let c = base_to_char(base);
            assert_eq!(char_to_base(c, true).unwrap(), Some(base));
        }
    }

    #[test]
    fn strict_rejects_invalid_char() {
        assert!(char_to_base('N', true).is_err());
    }

    #[test]
    fn lenient_drops_invalid_char() {
        assert_eq!(char_to_base('N', false).unwrap(), None);
    }
}
