//! Text header: the non-zero `(symbol, frequency)` pairs of a frequency table,
//! written as space-separated decimal integers in ascending symbol order.
//!
//! `"aaabbbbcc"` has the header `"97 3 98 4 99 2"`.

use crate::error::ParseError;
use crate::frequency::FrequencyTable;

pub fn serialize(freq: &FrequencyTable) -> String {
    freq.nonzero()
        .map(|(symbol, frequency)| format!("{symbol} {frequency}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a header back into a frequency table.
///
/// Fails without producing a partial table on an odd field count, a field that is
/// not a non-negative integer, a symbol above 255, a repeated symbol or a zero
/// frequency.
pub fn deserialize(header: &str) -> Result<FrequencyTable, ParseError> {
    let fields: Vec<&str> = header.split_ascii_whitespace().collect();
    if fields.len() % 2 != 0 {
        return Err(ParseError::OddFieldCount(fields.len()));
    }

    let mut table = FrequencyTable::new();
    for (pair, chunk) in fields.chunks_exact(2).enumerate() {
        let symbol = parse_field(chunk[0], 2 * pair)?;
        let frequency = parse_field(chunk[1], 2 * pair + 1)?;

        let symbol = u8::try_from(symbol).map_err(|_| ParseError::SymbolOutOfRange(symbol))?;
        insert_pair(&mut table, symbol, frequency)?;
    }
    Ok(table)
}

/// Builds a table from already-typed pairs, applying the same checks as [`deserialize`].
pub fn from_pairs(pairs: &[(u8, u64)]) -> Result<FrequencyTable, ParseError> {
    let mut table = FrequencyTable::new();
    for &(symbol, frequency) in pairs {
        insert_pair(&mut table, symbol, frequency)?;
    }
    Ok(table)
}

fn insert_pair(table: &mut FrequencyTable, symbol: u8, frequency: u64) -> Result<(), ParseError> {
    if frequency == 0 {
        return Err(ParseError::ZeroFrequency(symbol));
    }
    if table.get(symbol) != 0 {
        return Err(ParseError::DuplicateSymbol(symbol));
    }
    table.set(symbol, frequency);
    Ok(())
}

fn parse_field(field: &str, index: usize) -> Result<u64, ParseError> {
    // `u64::from_str` accepts a leading '+'; a header never carries one.
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::NotAnInteger {
            index,
            field: field.to_string(),
        });
    }
    field.parse().map_err(|_| ParseError::NotAnInteger {
        index,
        field: field.to_string(),
    })
}
