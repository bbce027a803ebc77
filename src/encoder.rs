use tracing::{debug, warn};

use crate::codes::CodeTable;
use crate::config::OutOfRange;
use crate::error::EncodeError;
use crate::frequency::FrequencyTable;
use crate::header;

/// Header text plus the '0'/'1' bitstream for one input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Encoded {
    pub header: String,
    pub bits: String,
}

/// Encodes `input` with a code table derived from its own byte counts.
///
/// Empty input yields an empty header and an empty bitstream.
pub fn encode(input: &[u8]) -> Encoded {
    let freq = FrequencyTable::count(input);
    let codes = CodeTable::from_frequencies(&freq);

    let mut bits = String::with_capacity(codes.encoded_len(&freq) as usize);
    for &byte in input {
        // Every byte of `input` was counted, so it has a code.
        bits.push_str(codes.get(byte).unwrap_or_default());
    }
    debug!(bytes = input.len(), bits = bits.len(), "encoded input");

    Encoded {
        header: header::serialize(&freq),
        bits,
    }
}

/// Encoder bound to a preset frequency table, e.g. one read back from an earlier header.
#[derive(Debug, Clone)]
pub struct Encoder {
    freq: FrequencyTable,
    codes: CodeTable,
    on_out_of_range: OutOfRange,
}

impl Encoder {
    pub fn new(freq: FrequencyTable) -> Self {
        let codes = CodeTable::from_frequencies(&freq);
        Self {
            freq,
            codes,
            on_out_of_range: OutOfRange::default(),
        }
    }

    pub fn with_policy(mut self, on_out_of_range: OutOfRange) -> Self {
        self.on_out_of_range = on_out_of_range;
        self
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.freq
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Encodes `input` against the preset table. The header is always the preset
    /// table's, not the counts of `input`.
    pub fn encode(&self, input: &[u8]) -> Result<Encoded, EncodeError> {
        let mut bits = String::new();
        let mut skipped = 0usize;
        for (offset, &byte) in input.iter().enumerate() {
            match (self.codes.get(byte), self.on_out_of_range) {
                (Some(code), _) => bits.push_str(code),
                (None, OutOfRange::Skip) => {
                    warn!(symbol = byte, offset, "skipping byte with no code");
                    skipped += 1;
                }
                (None, OutOfRange::Fail) => {
                    return Err(EncodeError::UnknownSymbol {
                        symbol: byte,
                        offset,
                    });
                }
            }
        }
        debug!(bytes = input.len(), skipped, bits = bits.len(), "encoded against preset table");

        Ok(Encoded {
            header: header::serialize(&self.freq),
            bits,
        })
    }
}
