// src/commands.rs

use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
    thread,
};

use anyhow::{Context, Result, bail};
use canonical_huffman::{
    CodeTable, CodecConfig, FrequencyTable, HuffmanTree, decode_artifact, encode_artifact, header,
};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

const TEMP_EXT: &str = "tmp"; // For atomic writes
const PARALLEL_COUNT_THRESHOLD: usize = 1 << 20;

fn read_source(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("cannot read {}", path.display()))
}

// Writes next to the destination first so a failed run never leaves half a file behind.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);
    fs::write(&temp_path, data)
        .with_context(|| format!("cannot write {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("cannot move output into place at {}", path.display()))?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(TEMP_EXT);
    path.with_file_name(name)
}

/// Counts byte frequencies, splitting inputs of 1 MiB or more across the available cores.
fn count_bytes(data: &[u8]) -> FrequencyTable {
    if data.len() < PARALLEL_COUNT_THRESHOLD {
        return FrequencyTable::count(data);
    }
    let parts = thread::available_parallelism().map_or(1, |n| n.get());
    debug!(bytes = data.len(), parts, "counting in parallel");
    FrequencyTable::count_partitioned(data, parts)
}

fn file_hash(data: &[u8]) -> Vec<u8> {
    Sha256::digest(data).to_vec()
}

/// Reads a preset frequency table from the first line of `path`.
fn load_table(path: &Path) -> Result<FrequencyTable> {
    let data = read_source(path)?;
    let line = data.split(|&b| b == b'\n').next().unwrap_or_default();
    let line = std::str::from_utf8(line)
        .with_context(|| format!("table in {} is not text", path.display()))?;
    header::deserialize(line).with_context(|| format!("bad table in {}", path.display()))
}

pub fn encode_file(
    input: &Path,
    output: &Path,
    table: Option<&Path>,
    config: &CodecConfig,
) -> Result<()> {
    let data = read_source(input)?;
    let preset = table.map(load_table).transpose()?;

    let artifact = encode_artifact(&data, preset.as_ref(), config)
        .with_context(|| format!("cannot encode {}", input.display()))?;
    write_atomic(output, &artifact)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        bytes_in = data.len(),
        bytes_out = artifact.len(),
        format = ?config.format,
        "encoded"
    );
    Ok(())
}

pub fn decode_file(input: &Path, output: &Path, config: &CodecConfig) -> Result<()> {
    let data = read_source(input)?;
    let decoded = decode_artifact(&data, config)
        .with_context(|| format!("cannot decode {}", input.display()))?;
    write_atomic(output, &decoded)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        bytes_out = decoded.len(),
        "decoded"
    );
    Ok(())
}

/// Prints the frequency and code of every symbol present in `input`.
pub fn show_codes(input: &Path) -> Result<()> {
    let data = read_source(input)?;
    print!("{}", code_listing(input, &data));
    Ok(())
}

fn code_listing(input: &Path, data: &[u8]) -> String {
    let freq = count_bytes(data);
    let tree = HuffmanTree::build(&freq);
    let codes = CodeTable::generate(tree.as_ref());

    let mut out = String::new();
    if codes.is_empty() {
        let _ = writeln!(out, "{} is empty; no codes assigned.", input.display());
        return out;
    }
    if let Some(tree) = &tree {
        debug!("tree structure:\n{}", tree.render());
    }

    let _ = writeln!(out, "{:>6}  {:>5}  {:>10}  code", "symbol", "char", "count");
    for (symbol, code) in codes.iter() {
        let shown = if symbol.is_ascii_graphic() {
            (symbol as char).to_string()
        } else {
            format!("{:#04x}", symbol)
        };
        let _ = writeln!(out, "{:>6}  {:>5}  {:>10}  {}", symbol, shown, freq.get(symbol), code);
    }
    let bits = codes.encoded_len(&freq);
    let _ = writeln!(
        out,
        "{} bytes -> {} bits ({:.3} bits/byte)",
        data.len(),
        bits,
        bits as f64 / data.len() as f64
    );
    out
}

/// Encodes and decodes `input` in memory and compares SHA-256 digests.
pub fn check_file(input: &Path, config: &CodecConfig) -> Result<()> {
    let data = read_source(input)?;
    let artifact = encode_artifact(&data, None, config)?;
    let decoded = decode_artifact(&artifact, config)?;

    let expected = file_hash(&data);
    let actual = file_hash(&decoded);
    if expected != actual {
        bail!(
            "round trip of {} changed its contents ({} bytes in, {} bytes out)",
            input.display(),
            data.len(),
            decoded.len()
        );
    }

    println!(
        "OK {}: {} bytes, {} byte artifact, sha256 {}",
        input.display(),
        data.len(),
        artifact.len(),
        hex(&expected)
    );
    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
