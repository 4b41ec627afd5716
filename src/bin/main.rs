use anyhow::Result;
use clap::{Parser, Subcommand};
use lunchmoney_mcp::{Config, create_server};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// rmcp imports for MCP stdio server mode
use rmcp::service::ServiceExt;
use rmcp::transport::stdio;

#[derive(Parser)]
#[command(name = "lunchmoney-mcp")]
#[command(about = "MCP server for the Lunch Money personal finance API")]
struct Cli {
    /// Lunch Money API access token
    #[arg(long, env = "LUNCHMONEY_API_TOKEN", hide_env_values = true, global = true)]
    api_token: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as an MCP stdio server (default, for use in mcp.json)
    Stdio,
    /// Run as an MCP streamable HTTP server
    Http {
        /// Bind address, e.g. 0.0.0.0:3942
        #[arg(long, default_value = "127.0.0.1:3942")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the stdio transport, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("lunchmoney_mcp=info".parse()?)
                .add_directive("rmcp=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let config = Config::new(cli.api_token)
        .inspect_err(|e| error!("{}", e))?;
    info!(base_url = config.base_url(), "Lunch Money API configured");

    let server = create_server(config);

    match cli.command.unwrap_or(Commands::Stdio) {
        Commands::Stdio => {
            info!("Starting MCP stdio server");

            let service = server
                .serve(stdio())
                .await
                .inspect_err(|e| error!("serving error: {:?}", e))?;

            // Block until the MCP session ends.
            service.waiting().await?;
            info!("MCP stdio server session ended");
        }
        Commands::Http { bind } => {
            info!("Starting MCP HTTP server on {}", bind);
            lunchmoney_mcp::server::start_mcp_http(server, &bind).await?;
        }
    }

    Ok(())
}
