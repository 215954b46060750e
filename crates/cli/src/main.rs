use clap::{Parser, Subcommand};
use iterdns_domain::{CliOverrides, RecordType};
use std::net::SocketAddr;
use tracing::info;

mod bootstrap;
mod di;
mod output;

#[derive(Parser)]
#[command(name = "iterdns")]
#[command(version = "0.1.0")]
#[command(about = "iterdns - Iterative DNS resolver that walks down from the root servers")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a hostname to IPv4 addresses, starting at the root
    Resolve {
        hostname: String,

        /// Root server to start from
        #[arg(long, value_name = "ADDR")]
        root: Option<SocketAddr>,

        /// Per-exchange timeout in milliseconds
        #[arg(long, value_name = "N")]
        timeout_ms: Option<u64>,
    },

    /// Ask one server a single recursive question and print the response
    Lookup {
        name: String,

        #[arg(long, value_name = "ADDR", default_value = "8.8.8.8:53")]
        server: SocketAddr,

        /// A, NS, CNAME or AAAA
        #[arg(long = "type", value_name = "TYPE", default_value = "A")]
        record_type: RecordType,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (root_server, query_timeout_ms) = match &cli.command {
        Command::Resolve {
            root, timeout_ms, ..
        } => (*root, *timeout_ms),
        Command::Lookup { .. } => (None, None),
    };
    let cli_overrides = CliOverrides {
        root_server,
        query_timeout_ms,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    // stderr only: stdout carries results
    bootstrap::init_logging(&config.logging);

    let use_cases = di::UseCases::new(&config);

    match cli.command {
        Command::Resolve { hostname, .. } => {
            let deadline = bootstrap::overall_timeout(&config.resolver);
            info!(
                hostname = %hostname,
                root = %config.resolver.root_server,
                deadline_ms = deadline.as_millis() as u64,
                "Starting iterative resolution"
            );

            let addresses = tokio::time::timeout(deadline, use_cases.resolve.resolve(&hostname))
                .await
                .map_err(|_| {
                    anyhow::anyhow!(
                        "Resolution of {} did not finish within {:?}",
                        hostname,
                        deadline
                    )
                })??;

            for ip in addresses {
                println!("{}", ip);
            }
        }
        Command::Lookup {
            name,
            server,
            record_type,
        } => {
            let message = use_cases.lookup.execute(server, &name, record_type).await?;
            print!("{}", output::render_message(&message)?);
        }
    }

    Ok(())
}
