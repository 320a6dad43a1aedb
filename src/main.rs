use clap::{Parser, Subcommand};
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use iperfkit::{invocation, loader};

/// Schema-driven configuration and invocation layer for iperf3 benchmarks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the iperf3 client workload against a target host
    Client {
        /// Path to the client parameter YAML file
        #[arg(short, long)]
        params: PathBuf,
    },
    /// Run the passive iperf3 server until the configured duration elapses
    Server {
        /// Path to the server parameter YAML file
        #[arg(short, long)]
        params: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match args.command {
        Command::Client { params } => {
            info!("Client parameter file: {:?}", params);
            let raw = loader::load_client_params(&params)?;
            let outcome = invocation::run_client(raw)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Command::Server { params } => {
            info!("Server parameter file: {:?}", params);
            let raw = loader::load_server_params(&params)?;
            let outcome = invocation::run_server(raw)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(["iperfkit", "client", "--params", "client.yaml"]);
        match args.command {
            Command::Client { params } => assert_eq!(params, PathBuf::from("client.yaml")),
            Command::Server { .. } => panic!("expected client subcommand"),
        }
    }

    #[test]
    fn test_server_subcommand() {
        let args = Args::parse_from(["iperfkit", "server", "-p", "server.yaml"]);
        match args.command {
            Command::Server { params } => assert_eq!(params, PathBuf::from("server.yaml")),
            Command::Client { .. } => panic!("expected server subcommand"),
        }
    }
}
