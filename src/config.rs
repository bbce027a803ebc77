/// What to do with a byte that has no code in a preset frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfRange {
    /// Drop the byte and log a warning.
    Skip,
    #[default]
    Fail,
}

/// On-disk layout of an encoded artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtifactFormat {
    /// Header line followed by one '0'/'1' character per bit.
    #[default]
    Text,
    /// Length-prefixed bincode header followed by packed bits.
    Packed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecConfig {
    pub on_out_of_range: OutOfRange,
    pub format: ArtifactFormat,
    /// Require the decoded length to equal the header's total count.
    pub verify_counts: bool,
}
