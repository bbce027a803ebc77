//! # canonical_huffman
//!
//! Canonical Huffman coding over the byte alphabet. The tree is never stored:
//! the encoder writes the symbol frequencies as a header, and the decoder rebuilds
//! the identical tree from them because construction breaks every tie the same way.
//!
//! ```rust
//! use canonical_huffman::{decode, encode};
//!
//! let encoded = encode(b"abracadabra");
//! assert_eq!(encoded.header, "97 5 98 2 99 1 100 1 114 2");
//! assert_eq!(decode(&encoded.header, &encoded.bits)?, b"abracadabra");
//! # Ok::<(), canonical_huffman::HuffmanError>(())
//! ```

pub mod artifact;
pub mod codes;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod header;
pub mod logger;
pub mod tree;

pub use artifact::{decode_artifact, encode_artifact};
pub use codes::CodeTable;
pub use config::{ArtifactFormat, CodecConfig, OutOfRange};
pub use decoder::{Decoder, decode};
pub use encoder::{Encoded, Encoder, encode};
pub use error::{DecodeError, EncodeError, HuffmanError, ParseError};
pub use frequency::FrequencyTable;
pub use tree::{HuffmanTree, Node, NodeId};
