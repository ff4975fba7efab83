use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use rust_sqlsplit::{split_scripts, KeywordSet, SplitOptions, SplitScript, SqlSplitError};

#[derive(Parser)]
#[command(name = "rust-sqlsplit")]
#[command(author, version, about = "Split T-SQL scripts into individually executable statements")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split SQL scripts and print each statement with its source offsets
    Split {
        /// SQL files, directories or glob patterns (reads stdin when omitted)
        inputs: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Expand SQLCMD `:r` includes and `:setvar` variables first
        #[arg(long)]
        expand_includes: bool,

        /// Additional keyword whose clause is skipped (repeatable)
        #[arg(long = "skip-keyword", value_name = "KEYWORD")]
        skip_keywords: Vec<String>,

        /// Additional statement keyword that starts a new statement (repeatable)
        #[arg(long = "boundary-keyword", value_name = "KEYWORD")]
        boundary_keywords: Vec<String>,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Statement text preceded by a location comment
    Text,
    /// JSON array of scripts with their statements
    Json,
    /// One tab-separated line per statement: path, start, end, line
    Ranges,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn read_stdin(options: &SplitOptions) -> Result<Vec<SplitScript>> {
    let mut bytes = Vec::new();
    io::stdin()
        .read_to_end(&mut bytes)
        .map_err(|e| SqlSplitError::StdinReadError { source: e })?;
    let text = rust_sqlsplit::script::decode_sql_bytes(&bytes).ok_or_else(|| {
        SqlSplitError::InvalidEncoding {
            path: PathBuf::from("<stdin>"),
        }
    })?;
    let script = SplitScript::from_text(PathBuf::from("<stdin>"), text, options)?;
    Ok(vec![script])
}

fn write_output(scripts: &[SplitScript], format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Text => {
            for script in scripts {
                for statement in &script.statements {
                    writeln!(
                        out,
                        "-- {}:{} [{}..{}]",
                        script.path.display(),
                        statement.start_line,
                        statement.start_position,
                        statement.end_position
                    )?;
                    writeln!(out, "{}", statement.query)?;
                }
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, scripts)?;
            writeln!(out)?;
        }
        OutputFormat::Ranges => {
            for script in scripts {
                for statement in &script.statements {
                    writeln!(
                        out,
                        "{}\t{}\t{}\t{}",
                        script.path.display(),
                        statement.start_position,
                        statement.end_position,
                        statement.start_line
                    )?;
                }
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            inputs,
            format,
            expand_includes,
            skip_keywords,
            boundary_keywords,
            verbose,
        } => {
            init_tracing(verbose);

            let options = SplitOptions {
                keywords: KeywordSet::tsql()
                    .with_skip_keywords(&skip_keywords)
                    .with_boundary_keywords(&boundary_keywords),
                expand_includes,
            };

            let scripts = if inputs.is_empty() {
                read_stdin(&options)?
            } else {
                split_scripts(&inputs, &options)?
            };

            if verbose {
                let total: usize = scripts.iter().map(|s| s.statements.len()).sum();
                eprintln!("Split {} scripts into {} statements", scripts.len(), total);
            }

            write_output(&scripts, format)?;
        }
    }

    Ok(())
}
