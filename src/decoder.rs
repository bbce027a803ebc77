use tracing::debug;

use crate::error::{DecodeError, Result};
use crate::frequency::FrequencyTable;
use crate::header;
use crate::tree::{HuffmanTree, Node, NodeId};

/// Decodes a header and its '0'/'1' bitstream back into the original bytes.
pub fn decode(header: &str, bits: &str) -> Result<Vec<u8>> {
    let mut decoder = Decoder::from_header(header)?;
    decoder.feed(bits)?;
    Ok(decoder.finish()?)
}

/// Bit-at-a-time decoder. The tree is rebuilt from the header with the same
/// construction the encoder used, so it never has to be transmitted.
#[derive(Debug, Clone)]
pub struct Decoder {
    tree: Option<HuffmanTree>,
    expected: u64,
    verify_counts: bool,
    position: Option<NodeId>,
    consumed: usize,
    output: Vec<u8>,
}

impl Decoder {
    pub fn new(freq: &FrequencyTable) -> Self {
        let tree = HuffmanTree::build(freq);
        let position = tree.as_ref().map(HuffmanTree::root);
        Self {
            tree,
            expected: freq.total(),
            verify_counts: false,
            position,
            consumed: 0,
            output: Vec::new(),
        }
    }

    pub fn from_header(header: &str) -> Result<Self> {
        Ok(Self::new(&header::deserialize(header)?))
    }

    /// Makes [`Decoder::finish`] check the output length against the header total.
    pub fn verify_counts(mut self, verify: bool) -> Self {
        self.verify_counts = verify;
        self
    }

    /// Consumes one bit, returning the symbol when it completes a code.
    pub fn push_bit(&mut self, bit: bool) -> Result<Option<u8>, DecodeError> {
        let (Some(tree), Some(position)) = (self.tree.as_ref(), self.position) else {
            return Err(DecodeError::UnexpectedBits);
        };
        let offset = self.consumed;
        self.consumed += 1;

        // A lone leaf has the one-bit code "0".
        let next = match tree.child(position, bit) {
            Some(child) => child,
            None if !bit => position,
            None => return Err(DecodeError::InvalidPath { offset }),
        };

        match *tree.node(next) {
            Node::Leaf { symbol, .. } => {
                self.output.push(symbol);
                self.position = Some(tree.root());
                Ok(Some(symbol))
            }
            Node::Internal { .. } => {
                self.position = Some(next);
                Ok(None)
            }
        }
    }

    /// Consumes one '0' or '1' character.
    pub fn push_char(&mut self, c: char) -> Result<Option<u8>, DecodeError> {
        match c {
            '0' => self.push_bit(false),
            '1' => self.push_bit(true),
            found => Err(DecodeError::InvalidBit {
                offset: self.consumed,
                found,
            }),
        }
    }

    pub fn feed(&mut self, bits: &str) -> Result<(), DecodeError> {
        for c in bits.chars() {
            self.push_char(c)?;
        }
        Ok(())
    }

    /// Bits consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// `true` when no code is partially read.
    pub fn at_boundary(&self) -> bool {
        match (&self.tree, self.position) {
            (Some(tree), Some(position)) => position == tree.root(),
            _ => true,
        }
    }

    pub fn finish(self) -> Result<Vec<u8>, DecodeError> {
        if !self.at_boundary() {
            return Err(DecodeError::Truncated {
                consumed: self.consumed,
            });
        }
        let decoded = self.output.len() as u64;
        if self.verify_counts && decoded != self.expected {
            return Err(DecodeError::LengthMismatch {
                expected: self.expected,
                decoded,
            });
        }
        debug!(bits = self.consumed, bytes = decoded, "decoded bitstream");
        Ok(self.output)
    }
}
