use clap::Parser;
use metar_ingest::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let cancellation_token = CancellationToken::new();

        // Ctrl+C cancels the token; commands stop at their next await point
        let shutdown = {
            let token = cancellation_token.clone();
            tokio::spawn(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                        token.cancel();
                    }
                    Err(e) => eprintln!("Failed to install CTRL+C signal handler: {}", e),
                }
            })
        };

        let result = commands::run(args, cancellation_token).await;
        shutdown.abort();
        result
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("METAR Ingest - aviationweather.gov METAR cache reader");
    println!("=====================================================");
    println!();
    println!("Download the gzip-compressed METAR cache snapshot, inflate it, and parse");
    println!("the CSV into surface weather observations.");
    println!();
    println!("USAGE:");
    println!("    metar-ingest <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    fetch       Run one fetch cycle and print the result");
    println!("    watch       Fetch periodically until interrupted");
    println!("    parse       Parse a local snapshot file (gzip or plain CSV)");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Increase logging verbosity");
    println!("    -q, --quiet      Suppress output except errors");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Summary of the current US snapshot:");
    println!("    metar-ingest fetch");
    println!();
    println!("    # One station as JSON, all prefixes:");
    println!("    metar-ingest fetch --prefix '' --station EGLL --format json");
    println!();
    println!("    # Refresh every five minutes:");
    println!("    metar-ingest watch --interval 300");
    println!();
    println!("    # Parse a previously downloaded file:");
    println!("    metar-ingest parse metars.cache.csv.gz --format table");
    println!();
    println!("For detailed help on any command, use:");
    println!("    metar-ingest <COMMAND> --help");
}
