//! hourbar CLI - Hourly OHLC candles from tick records.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

mod args;
mod commands;
mod display;
mod logging;

use args::SourceArgs;
use hourbar_lib::OutputFormat;

#[derive(Parser)]
#[command(name = "hourbar")]
#[command(about = "Hourly OHLC candles from tick records", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve candle queries over HTTP
    Serve {
        #[command(flatten)]
        source: SourceArgs,

        /// Address to listen on
        #[arg(short, long, env = "HOURBAR_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,

        /// Seconds after which the candle table is rebuilt
        #[arg(long, env = "HOURBAR_REFRESH_SECS", default_value = "300")]
        refresh_secs: u64,

        /// Seconds a single rebuild may take (0 disables the limit)
        #[arg(long, default_value = "60")]
        rebuild_timeout_secs: u64,

        /// Also rebuild on a timer instead of only on lookup
        #[arg(long)]
        periodic: bool,
    },

    /// Look up one candle and print it as JSON
    Query {
        #[command(flatten)]
        source: SourceArgs,

        /// Instrument code
        #[arg(short, long)]
        code: String,

        /// Year in the reference zone
        #[arg(long)]
        year: String,

        /// Month (1-12)
        #[arg(long)]
        month: String,

        /// Day of month
        #[arg(long)]
        day: String,

        /// Hour of day (0-23)
        #[arg(long)]
        hour: String,
    },

    /// Write the complete candle table
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file path. Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Serve {
            source,
            bind,
            refresh_secs,
            rebuild_timeout_secs,
            periodic,
        } => {
            commands::serve::serve(&source, bind, refresh_secs, rebuild_timeout_secs, periodic)
                .await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Query {
            source,
            code,
            year,
            month,
            day,
            hour,
        } => {
            let params = hourbar_lib::QueryParams::new(code, year, month, day, hour);
            commands::query::query(&source, &params).await
        }
        Commands::Export {
            source,
            output,
            format,
            pretty,
        } => {
            commands::export::export(&source, output.as_deref(), format, pretty).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
