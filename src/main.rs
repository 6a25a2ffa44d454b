use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use chromaconv::{pear, scale, sixtysix};

#[derive(Parser)]
#[command(name = "chromaconv")]
#[command(about = "Convert proprietary chromatography instrument output files to CSV", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase diagnostic output (-v: debug, -vv: trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a paired sixtysix scan index and observation stream
    Sixtysix {
        /// Scan index file (the .A half)
        #[arg(value_name = "FILE.A")]
        scan_index: PathBuf,

        /// Observation pair stream file (the .B half)
        #[arg(value_name = "FILE.B")]
        pair_stream: PathBuf,

        /// Output CSV file
        #[arg(short = 'o', long, value_name = "OUT.CSV")]
        output: PathBuf,
    },

    /// Decode a pear time/intensity trace
    Pear {
        /// Input pear file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output CSV file (default: FILE.csv)
        #[arg(short = 'o', long, value_name = "OUT.CSV")]
        output: Option<PathBuf>,
    },

    /// Decode a scale absorbance table
    Scale {
        /// Input scale file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output CSV file (default: FILE.csv)
        #[arg(short = 'o', long, value_name = "OUT.CSV")]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    let result = match cli.command {
        Commands::Sixtysix {
            scan_index,
            pair_stream,
            output,
        } => sixtysix::convert_to_csv(&scan_index, &pair_stream, &output),
        Commands::Pear { input, output } => pear::convert_to_csv(&input, output.as_deref()),
        Commands::Scale { input, output } => scale::convert_to_csv(&input, output.as_deref()),
    };

    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
