//! Command line front end for converting and inspecting matrix files
//!
//! # Usage
//!
//! ```bash
//! # Convert a Matrix Market file to METIS
//! csr-io convert --from mm --to metis graph.mtx graph.metis
//!
//! # Print dimensions and flags of a SNAP edge list
//! csr-io info --format snap web-Google.txt
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use csr_io::{load_path_with, save_path, CsrMatrix, Format, IoConfig};

#[derive(Parser)]
#[command(name = "csr-io")]
#[command(about = "Convert sparse matrices and graphs between text formats", long_about = None)]
struct Cli {
    /// Log loader and saver progress (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a matrix in one format and save it in another
    Convert {
        /// Input format (cluto, dimacs, metis, mm, snap, ugraph, ugraph-edges)
        #[arg(long)]
        from: Format,

        /// Output format
        #[arg(long)]
        to: Format,

        /// Replay the input from memory instead of re-reading the file
        #[arg(long)]
        buffer: bool,

        input: PathBuf,
        output: PathBuf,
    },

    /// Print dimensions, entry count and flags of a matrix file
    Info {
        #[arg(short, long)]
        format: Format,

        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(kind = %err.kind(), "{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> csr_io::Result<()> {
    match command {
        Commands::Convert {
            from,
            to,
            buffer,
            input,
            output,
        } => {
            let config = if buffer {
                IoConfig::buffered()
            } else {
                IoConfig::default()
            };
            let matrix: CsrMatrix<f64> = load_path_with(from, &input, &config)?;
            save_path(to, &output, &matrix)?;
            println!(
                "{} ({}) -> {} ({}): {} x {}, {} entries",
                input.display(),
                from,
                output.display(),
                to,
                matrix.n_rows,
                matrix.n_cols,
                matrix.nnz()
            );
        }
        Commands::Info { format, input } => {
            let matrix: CsrMatrix<f64> = load_path_with(format, &input, &IoConfig::default())?;
            println!("file:      {}", input.display());
            println!("format:    {}", format);
            println!("rows:      {}", matrix.n_rows);
            println!("columns:   {}", matrix.n_cols);
            println!("entries:   {}", matrix.nnz());
            println!("symmetric: {}", matrix.symmetric);
            println!("flags:     {:?}", matrix.flags());
            if matrix.ncon() > 0 {
                println!("ncon:      {}", matrix.ncon());
            }
        }
    }
    Ok(())
}
