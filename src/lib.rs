//! # DNA Ring Codec
//!
//! A lossless byte-stream codec whose compressed form is modeled after a
//! circular DNA chromosome. Input bytes are mapped to a four-symbol
//! ("nucleotide") alphabet, compressed with an LZW-style dictionary coder
//! that resets its dictionary on saturation, embedded in a circular "ring"
//! padded to a prime length with a short bridge suffix, and finally framed
//! with periodic markers and an integrity digest.
//!
//! ## Buffer Example
//!
//! ```
//! use dna_ring_codec::{Codec, Options};
//! let codec = Codec::new(Options::default()).expect("valid options");
//! let data = b"ATCG or any other bytes";
//! let (framed, metadata) = codec.compress(data);
//! let recovered = codec.decompress(&framed, &metadata).expect("round trip");
//! assert_eq!(recovered.bytes, data.to_vec());
//! ```

pub mod bitbase;
pub mod codec;
pub mod error;
pub mod frame;
pub mod lzw;
pub mod metadata;
pub mod ring;
pub mod stats;

pub use codec::{Codec, Decompressed, Options, STD_OPTIONS};
pub use error::Error;
pub use metadata::Metadata;
pub use stats::Stats;
