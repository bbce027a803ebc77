//! Framing of a header and bitstream into one artifact.
//!
//! Text: `header '\n' bits`, one '0'/'1' character per bit.
//!
//! Packed: `[header length (u32 LE)][bincode PackedHeader][bits, MSB first, zero padded]`.

use std::io::{self, Cursor};

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ArtifactFormat, CodecConfig};
use crate::decoder::Decoder;
use crate::encoder::{self, Encoded, Encoder};
use crate::error::{DecodeError, HuffmanError, ParseError, Result};
use crate::frequency::FrequencyTable;
use crate::header;

#[derive(Debug, Serialize, Deserialize)]
struct PackedHeader {
    pairs: Vec<(u8, u64)>,
    bit_len: u64,
}

impl Encoded {
    pub fn to_text(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.header.len() + 1 + self.bits.len());
        out.extend_from_slice(self.header.as_bytes());
        out.push(b'\n');
        out.extend_from_slice(self.bits.as_bytes());
        out
    }

    /// Splits a text artifact at its first newline. Content without a newline is
    /// a header with an empty bitstream.
    pub fn from_text(data: &[u8]) -> Result<Self> {
        let (header_line, bits) = match data.iter().position(|&b| b == b'\n') {
            Some(split) => (&data[..split], &data[split + 1..]),
            None => (data, &[][..]),
        };
        let header_line = header_line.strip_suffix(b"\r").unwrap_or(header_line);
        let header = std::str::from_utf8(header_line).map_err(|_| ParseError::NotUtf8)?;

        let mut text = String::with_capacity(bits.len());
        for (offset, &byte) in bits.iter().enumerate() {
            match byte {
                b'0' | b'1' => text.push(byte as char),
                other => {
                    return Err(DecodeError::InvalidBit {
                        offset,
                        found: other as char,
                    }
                    .into());
                }
            }
        }

        Ok(Self {
            header: header.to_string(),
            bits: text,
        })
    }

    pub fn to_packed(&self) -> Result<Vec<u8>> {
        let freq = header::deserialize(&self.header)?;
        let packed_header = PackedHeader {
            pairs: freq.nonzero().collect(),
            bit_len: self.bits.len() as u64,
        };
        let header_bytes = bincode::serialize(&packed_header)
            .map_err(|e| HuffmanError::Container(e.to_string()))?;

        let mut out = Vec::with_capacity(4 + header_bytes.len() + self.bits.len() / 8 + 1);
        out.extend_from_slice(&(header_bytes.len() as u32).to_le_bytes());
        out.extend_from_slice(&header_bytes);

        let mut writer = BitWriter::endian(&mut out, BigEndian);
        for (offset, c) in self.bits.chars().enumerate() {
            match c {
                '0' => writer.write_bit(false)?,
                '1' => writer.write_bit(true)?,
                found => return Err(DecodeError::InvalidBit { offset, found }.into()),
            }
        }
        writer.byte_align()?;
        drop(writer);

        debug!(bits = self.bits.len(), bytes = out.len(), "packed artifact");
        Ok(out)
    }

    pub fn from_packed(data: &[u8]) -> Result<Self> {
        let (freq, bit_len, payload) = split_packed(data)?;

        let mut bits = String::with_capacity(bit_len.min(payload.len() * 8));
        read_packed_bits(payload, bit_len, |bit| {
            bits.push(if bit { '1' } else { '0' });
            Ok(())
        })?;

        Ok(Self {
            header: header::serialize(&freq),
            bits,
        })
    }
}

fn split_packed(data: &[u8]) -> Result<(FrequencyTable, usize, &[u8])> {
    let Some((len_bytes, rest)) = data.split_first_chunk::<4>() else {
        return Err(HuffmanError::Container("missing header length".to_string()));
    };
    let header_len = u32::from_le_bytes(*len_bytes) as usize;
    if rest.len() < header_len {
        return Err(HuffmanError::Container(format!(
            "header length {header_len} exceeds the {} bytes available",
            rest.len()
        )));
    }
    let (header_bytes, payload) = rest.split_at(header_len);

    let packed: PackedHeader =
        bincode::deserialize(header_bytes).map_err(|e| HuffmanError::Container(e.to_string()))?;
    let freq = header::from_pairs(&packed.pairs)?;
    let bit_len = usize::try_from(packed.bit_len).map_err(|_| {
        HuffmanError::Container(format!("bit length {} is too large", packed.bit_len))
    })?;
    Ok((freq, bit_len, payload))
}

fn read_packed_bits(
    payload: &[u8],
    bit_len: usize,
    mut visit: impl FnMut(bool) -> Result<()>,
) -> Result<()> {
    if payload.len().saturating_mul(8) < bit_len {
        return Err(HuffmanError::Container(format!(
            "payload holds {} bits but {bit_len} were declared",
            payload.len() * 8
        )));
    }
    let mut reader = BitReader::endian(Cursor::new(payload), BigEndian);
    for _ in 0..bit_len {
        let bit = reader.read_bit().map_err(|e: io::Error| HuffmanError::Container(e.to_string()))?;
        visit(bit)?;
    }
    Ok(())
}

/// Encodes `input` into an artifact of the configured format. With a `preset`
/// table, bytes are coded against it and `config.on_out_of_range` applies.
pub fn encode_artifact(
    input: &[u8],
    preset: Option<&FrequencyTable>,
    config: &CodecConfig,
) -> Result<Vec<u8>> {
    let encoded = match preset {
        Some(freq) => Encoder::new(freq.clone())
            .with_policy(config.on_out_of_range)
            .encode(input)?,
        None => encoder::encode(input),
    };
    match config.format {
        ArtifactFormat::Text => Ok(encoded.to_text()),
        ArtifactFormat::Packed => encoded.to_packed(),
    }
}

/// Decodes an artifact of the configured format back into bytes.
pub fn decode_artifact(data: &[u8], config: &CodecConfig) -> Result<Vec<u8>> {
    match config.format {
        ArtifactFormat::Text => {
            let encoded = Encoded::from_text(data)?;
            let mut decoder = Decoder::from_header(&encoded.header)?.verify_counts(config.verify_counts);
            decoder.feed(&encoded.bits)?;
            Ok(decoder.finish()?)
        }
        ArtifactFormat::Packed => {
            let (freq, bit_len, payload) = split_packed(data)?;
            let mut decoder = Decoder::new(&freq).verify_counts(config.verify_counts);
            read_packed_bits(payload, bit_len, |bit| {
                decoder.push_bit(bit)?;
                Ok(())
            })?;
            Ok(decoder.finish()?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutOfRange;

    const PACKED: CodecConfig = CodecConfig {
        on_out_of_range: OutOfRange::Fail,
        format: ArtifactFormat::Packed,
        verify_counts: true,
    };

    #[test]
    fn text_layout() {
        let encoded = encoder::encode(b"dcbaf");
        assert_eq!(encoded.to_text(), b"97 1 98 1 99 1 100 1 102 1\n010011111010".to_vec());
    }

    #[test]
    fn empty_input_text_artifact() {
        let artifact = encode_artifact(b"", None, &CodecConfig::default()).unwrap();
        assert_eq!(artifact, b"\n");
        assert_eq!(decode_artifact(&artifact, &CodecConfig::default()).unwrap(), b"");
        assert_eq!(decode_artifact(b"", &CodecConfig::default()).unwrap(), b"");
    }

    #[test]
    fn text_header_line_may_end_in_crlf() {
        let encoded = Encoded::from_text(b"97 4\r\n0000").unwrap();
        assert_eq!(encoded.header, "97 4");
        assert_eq!(encoded.bits, "0000");
    }

    #[test]
    fn text_rejects_stray_bytes() {
        assert!(matches!(
            Encoded::from_text(b"97 4\n00 00"),
            Err(HuffmanError::Decode(DecodeError::InvalidBit { offset: 2, found: ' ' }))
        ));
        assert!(matches!(
            Encoded::from_text(b"\xff\n"),
            Err(HuffmanError::Parse(ParseError::NotUtf8))
        ));
    }

    #[test]
    fn packed_is_smaller_and_decodes() {
        let input = b"it was the best of times, it was the worst of times".repeat(20);
        let text = encode_artifact(&input, None, &CodecConfig::default()).unwrap();
        let packed = encode_artifact(&input, None, &PACKED).unwrap();
        assert!(packed.len() * 4 < text.len());
        assert!(packed.len() < input.len());
        assert_eq!(decode_artifact(&packed, &PACKED).unwrap(), input);
    }

    #[test]
    fn packed_to_encoded_matches_text() {
        let encoded = encoder::encode(b"mississippi");
        let packed = encoded.to_packed().unwrap();
        assert_eq!(Encoded::from_packed(&packed).unwrap(), encoded);
    }

    #[test]
    fn packed_single_symbol_and_empty() {
        for input in [&b""[..], b"a", b"aaaaaaaaa"] {
            let packed = encode_artifact(input, None, &PACKED).unwrap();
            assert_eq!(decode_artifact(&packed, &PACKED).unwrap(), input);
        }
    }

    #[test]
    fn packed_rejects_short_payload() {
        let mut packed = encode_artifact(&b"abcdefgh".repeat(4), None, &PACKED).unwrap();
        packed.truncate(packed.len() - 2);
        assert!(matches!(decode_artifact(&packed, &PACKED), Err(HuffmanError::Container(_))));
        assert!(matches!(decode_artifact(&[1, 0], &PACKED), Err(HuffmanError::Container(_))));
        assert!(matches!(
            decode_artifact(&[9, 0, 0, 0, 1], &PACKED),
            Err(HuffmanError::Container(_))
        ));
    }

    #[test]
    fn preset_table_applies_policy() {
        let preset = FrequencyTable::count(b"ab");
        let config = CodecConfig::default();
        assert!(matches!(
            encode_artifact(b"abc", Some(&preset), &config),
            Err(HuffmanError::Encode(_))
        ));

        let skip = CodecConfig {
            on_out_of_range: OutOfRange::Skip,
            ..config
        };
        let artifact = encode_artifact(b"abc", Some(&preset), &skip).unwrap();
        assert_eq!(artifact, b"97 1 98 1\n01");
        assert_eq!(decode_artifact(&artifact, &skip).unwrap(), b"ab");
    }
}
