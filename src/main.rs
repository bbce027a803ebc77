// src/main.rs
mod commands;

use anyhow::Result;
use canonical_huffman::{ArtifactFormat, CodecConfig, OutOfRange, logger};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "huff", version = "0.1.0")]
#[command(about = "Canonical Huffman encoder and decoder.", long_about = None)]
struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum FormatArg {
    #[clap(help = "Header line followed by one '0'/'1' character per bit (Default).")]
    Text,
    #[clap(help = "Binary header followed by packed bits.")]
    Packed,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum OutOfRangeArg {
    #[clap(help = "Drop bytes the table has no code for, with a warning.")]
    Skip,
    #[clap(help = "Stop with an error on the first such byte (Default).")]
    Fail,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a file
    Encode {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
        /// Code against the header on the first line of this file instead of the input's own counts
        #[arg(long)]
        table: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutOfRangeArg::Fail)]
        on_out_of_range: OutOfRangeArg,
    },
    /// Decode a file
    Decode {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
        /// Require the decoded length to match the header
        #[arg(long)]
        verify_counts: bool,
    },
    /// Print the code assigned to every byte of a file
    Codes { input: PathBuf },
    /// Check that a file survives an encode/decode round trip
    Check {
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
    },
}

impl From<FormatArg> for ArtifactFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => ArtifactFormat::Text,
            FormatArg::Packed => ArtifactFormat::Packed,
        }
    }
}

impl From<OutOfRangeArg> for OutOfRange {
    fn from(arg: OutOfRangeArg) -> Self {
        match arg {
            OutOfRangeArg::Skip => OutOfRange::Skip,
            OutOfRangeArg::Fail => OutOfRange::Fail,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let span = tracing::info_span!("command_execution", command = ?std::env::args().collect::<Vec<_>>());
    let _enter = span.enter();

    match cli.command {
        Commands::Encode { input, output, format, table, on_out_of_range } => {
            let config = CodecConfig {
                format: format.into(),
                on_out_of_range: on_out_of_range.into(),
                ..CodecConfig::default()
            };
            commands::encode_file(&input, &output, table.as_deref(), &config)
        }
        Commands::Decode { input, output, format, verify_counts } => {
            let config = CodecConfig {
                format: format.into(),
                verify_counts,
                ..CodecConfig::default()
            };
            commands::decode_file(&input, &output, &config)
        }
        Commands::Codes { input } => commands::show_codes(&input),
        Commands::Check { input, format } => {
            let config = CodecConfig {
                format: format.into(),
                verify_counts: true,
                ..CodecConfig::default()
            };
            commands::check_file(&input, &config)
        }
    }
}
