//! LZW coder with dynamic dictionary reset (SPEC_FULL §4.2).
//!
//! The dictionary is bounded at `MAX_DICT` entries; on saturation the coder
//! emits `RESET_CODE`, a value numerically outside the 16-bit code range so
//! it can never alias a learned code (the historical bug this supersedes
//! used `65535`, which a large dictionary could legitimately allocate).
//!
//! Each entry stores `(parent_code, symbol)` rather than a materialized
//! string, following the teacher's `Link { code, sym }` dictionary design;
//! strings are only built on demand, in the decoder's output path.

use std::collections::HashMap;

use crate::Error;

/// One past the highest valid 16-bit code; chosen to make aliasing with a
/// saturated dictionary structurally impossible.
pub const RESET_CODE: u32 = 65536;
/// Maximum number of entries (including the four seeded base entries).
pub const MAX_DICT: u32 = 65536;
const BASE_SYMBOLS: u32 = 4;

/// Encode a base string (symbols `0..=3`) into LZW codes, inserting
/// `RESET_CODE` whenever the dictionary saturates.
pub fn encode(bases: &[u8]) -> Vec<u32> {
    let mut dict: HashMap<(u32, u8), u32> = HashMap::new();
    let mut next_code = BASE_SYMBOLS;
    let mut codes = Vec::new();
    // `w` holds the code of the currently matched prefix string, or `None`
    // for the empty prefix.
    let mut w: Option<u32> = None;

    for &c in bases {
        let extended = match w {
            None => Some(c as u32),
            Some(w_code) => dict.get(&(w_code, c)).copied(),
        };
        match extended {
            Some(code) => w = Some(code),
            None => {
                let w_code = w.expect("w is only None when the base-symbol branch matches");
                codes.push(w_code);
                if next_code < MAX_DICT {
                    dict.insert((w_code, c), next_code);
                    next_code += 1;
                } else {
                    log::debug!("dictionary saturated at {MAX_DICT} entries, emitting reset");
                    codes.push(RESET_CODE);
                    dict.clear();
                    next_code = BASE_SYMBOLS;
                }
                w = Some(c as u32);
            }
        }
    }
    if let Some(w_code) = w {
        codes.push(w_code);
    }
    codes
}

/// Outcome of a (possibly lenient) decode: the recovered bases, and, in
/// lenient mode, the position at which decoding was truncated due to an
/// invalid code (SPEC_FULL §7, §9 open question (a)).
#[derive(Debug)]
pub struct Decoded {
    pub bases: Vec<u8>,
    pub truncated_at: Option<usize>,
}

/// Walk the parent chain of `code` back to a base symbol, without
/// materializing the intervening string.
fn first_symbol(dict: &[(u32, u8)], mut code: u32) -> u8 {
    while code >= BASE_SYMBOLS {
        code = dict[(code - BASE_SYMBOLS) as usize].0;
    }
    code as u8
}

/// Materialize the full string represented by `code`.
fn materialize(dict: &[(u32, u8)], code: u32) -> Vec<u8> {
    let mut rev = Vec::new();
    let mut c = code;
    while c >= BASE_SYMBOLS {
        let (parent, sym) = dict[(c - BASE_SYMBOLS) as usize];
        rev.push(sym);
        c = parent;
    }
    rev.push(c as u8);
    rev.reverse();
    rev
}

/// Decode a code stream back into a base string. `strict` controls whether
/// an invalid code aborts with [`Error::InvalidCode`] or truncates output.
pub fn decode(codes: &[u32], strict: bool) -> Result<Decoded, Error> {
    let mut dict: Vec<(u32, u8)> = Vec::new();
    let mut next_code = BASE_SYMBOLS;
    let mut prev_code: Option<u32> = None;
    let mut out = Vec::new();
    let mut seen_any = false;

    for (position, &k) in codes.iter().enumerate() {
        if k == RESET_CODE {
            if !seen_any {
                return Err(Error::FormatError {
                    stage: "lzw decoder",
                    detail: "first code in stream must not be the reset marker".to_string(),
                });
            }
            log::trace!("reset at position {position}");
            dict.clear();
            next_code = BASE_SYMBOLS;
            prev_code = None;
            continue;
        }
        seen_any = true;

        let is_known = k < BASE_SYMBOLS || (k - BASE_SYMBOLS) < dict.len() as u32;
        let is_kwkwk = !is_known && prev_code.is_some() && k == next_code;

        if !is_known && !is_kwkwk {
            if strict {
                return Err(Error::InvalidCode { code: k, position, next_code });
            }
            log::warn!("invalid code {k} at position {position}, truncating lenient decode");
            return Ok(Decoded { bases: out, truncated_at: Some(position) });
        }

        let (entry, entry_first) = if is_known {
            let first = first_symbol(&dict, k);
            (materialize(&dict, k), first)
        } else {
            // KwKwK: entry = p ++ p[0]
            let p_code = prev_code.expect("is_kwkwk implies prev_code is Some");
            let first = first_symbol(&dict, p_code);
            let mut s = materialize(&dict, p_code);
            s.push(first);
            (s, first)
        };

        if let Some(p_code) = prev_code {
            if next_code < MAX_DICT {
                dict.push((p_code, entry_first));
                next_code += 1;
            }
        }
        out.extend_from_slice(&entry);
        prev_code = Some(k);
    }

    Ok(Decoded { bases: out, truncated_at: None })
}
