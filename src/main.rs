//! # orderdesk CLI
//!
//! Command-line interface for the order API relay.
//!
//! ## Usage
//!
//! ```bash
//! # Run the relay server with the UI on port 3000
//! orderdesk serve --api-url https://acme.test.qbiltrade.com --api-token $TOKEN
//!
//! # Same, deriving the URL from a tenant
//! orderdesk serve --tenant acme --environment staging --api-token $TOKEN
//!
//! # Convert a saved response to XML
//! orderdesk convert orders.json --output orders.xml
//!
//! # Fetch orders directly
//! orderdesk orders --tenant acme --environment test --api-token $TOKEN search --display-number SO-1 --format cards
//! ```

use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{Level, info};

use orderdesk::{
    DocumentValue, OrderDeskError,
    client::{DEFAULT_TIMEOUT_SECS, OrderClient, OrderSearch, extract_documents},
    config::{ApiConfig, Environment},
    render::{self, OutputFormat},
    server::{self, ServerConfig},
    xml::{DEFAULT_ROOT, TagNamePolicy, XmlSerializer},
};

/// orderdesk - order API relay and JSON to XML converter
#[derive(Parser, Debug)]
#[command(name = "orderdesk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output (to stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Upstream API settings shared by `serve` and `orders`.
#[derive(Args, Debug)]
struct ApiArgs {
    /// API base URL
    #[arg(long, env = "ORDERDESK_API_URL", conflicts_with = "tenant")]
    api_url: Option<String>,

    /// Bearer token
    #[arg(long, env = "ORDERDESK_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Tenant name, used with --environment instead of --api-url
    #[arg(long, requires = "environment")]
    tenant: Option<String>,

    /// Tenant environment
    #[arg(long, value_enum)]
    environment: Option<Environment>,

    /// Port for localhost tenants
    #[arg(long)]
    port: Option<u16>,

    /// Upstream request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

impl ApiArgs {
    /// The configured API, if any settings were given.
    fn resolve(&self) -> Result<Option<ApiConfig>, OrderDeskError> {
        let token = self.api_token.as_deref().unwrap_or_default();
        match (&self.api_url, &self.tenant, self.environment) {
            (Some(url), _, _) => ApiConfig::new(url, token).map(Some),
            (None, Some(tenant), Some(env)) => {
                ApiConfig::for_tenant(tenant, env, self.port, token).map(Some)
            }
            _ => Ok(None),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the relay server and web UI
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:3000")]
        listen: String,

        #[command(flatten)]
        api: ApiArgs,
    },

    /// Convert a JSON payload (file or stdin) to XML, JSON or cards
    Convert {
        /// JSON file to read (stdin when omitted)
        input: Option<PathBuf>,

        /// Root element name
        #[arg(long, default_value = DEFAULT_ROOT)]
        root: String,

        /// Rewrite keys that are not legal XML names
        #[arg(long)]
        sanitize_tags: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Xml)]
        format: OutputFormat,

        /// Write to FILE instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Query the order API
    Orders {
        #[command(flatten)]
        api: ApiArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
        format: OutputFormat,

        /// Write to FILE instead of stdout ("-" saves under the default name:
        /// orders_response.<ext>, or the document's own name for downloads)
        #[arg(long, value_name = "FILE", global = true)]
        output: Option<PathBuf>,

        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand, Debug)]
enum OrdersAction {
    /// List all orders
    List,
    /// Search by display number and/or subsidiary
    Search {
        #[arg(long)]
        display_number: Option<String>,
        #[arg(long)]
        subsidiary: Option<String>,
    },
    /// Fetch one order
    Get { id: String },
    /// Fetch an order's lines of the given type
    Lines { id: String, line_type: String },
    /// List the documents attached to an order
    Documents { id: String },
    /// Download a document by link
    Download { link: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), OrderDeskError> {
    match cli.command {
        Commands::Serve { listen, api } => {
            let config = ServerConfig {
                listen_addr: listen,
                api_config: api.resolve()?,
                request_timeout: Duration::from_secs(api.timeout),
            };
            server::serve(config).await
        }

        Commands::Convert {
            input,
            root,
            sanitize_tags,
            format,
            output,
        } => {
            let doc = DocumentValue::from(read_json(input.as_deref())?);
            let policy = if sanitize_tags {
                TagNamePolicy::Sanitize
            } else {
                TagNamePolicy::Verbatim
            };

            let body = match format {
                OutputFormat::Xml => XmlSerializer::with_policy(policy).serialize(&doc, &root),
                OutputFormat::Cards => render::cards::render_text(&doc),
                OutputFormat::Json => render::render(&doc, format)?.body,
            };
            emit(&body, output.as_deref(), format)
        }

        Commands::Orders {
            api,
            format,
            output,
            action,
        } => {
            let config = api
                .resolve()?
                .ok_or_else(|| OrderDeskError::Config("API config not set".to_string()))?;
            let client = OrderClient::new(config, Duration::from_secs(api.timeout))?;

            let value = match action {
                OrdersAction::List => client.list_orders().await?,
                OrdersAction::Search {
                    display_number,
                    subsidiary,
                } => {
                    let search = OrderSearch {
                        display_number,
                        subsidiary,
                    };
                    client.search_orders(&search).await?
                }
                OrdersAction::Get { id } => client.get_order(&id).await?,
                OrdersAction::Lines { id, line_type } => {
                    client.order_lines(&id, &line_type).await?
                }
                OrdersAction::Documents { id } => {
                    let order = DocumentValue::from(client.get_order(&id).await?);
                    for doc in extract_documents(&order) {
                        println!("{}\t{}", doc.label(), doc.link);
                    }
                    return Ok(());
                }
                OrdersAction::Download { link } => {
                    let doc = client.download_document(&link).await?;
                    let path = output_path(output.as_deref(), &doc.filename);
                    std::fs::write(&path, &doc.bytes)?;
                    println!("Saved to {}", path.display());
                    return Ok(());
                }
            };

            let doc = DocumentValue::from(value);
            info!("Found {} orders", doc.collection_len());
            let body = match format {
                OutputFormat::Cards => render::cards::render_text(&doc),
                _ => render::render(&doc, format)?.body,
            };
            emit(&body, output.as_deref(), format)
        }
    }
}

/// Read JSON from a file, or stdin when no path is given.
fn read_json(path: Option<&Path>) -> Result<serde_json::Value, OrderDeskError> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&text)?)
}

/// Where to save: `output`, with `-` (or no output) meaning `default_name`.
fn output_path(output: Option<&Path>, default_name: &str) -> PathBuf {
    match output {
        Some(path) if path != Path::new("-") => path.to_path_buf(),
        _ => PathBuf::from(default_name),
    }
}

/// Print `body`, or save it. `-` saves under the default download name.
fn emit(body: &str, output: Option<&Path>, format: OutputFormat) -> Result<(), OrderDeskError> {
    match output {
        None => {
            println!("{}", body);
            Ok(())
        }
        Some(path) => {
            let path = output_path(Some(path), &format.filename());
            std::fs::write(&path, body)?;
            println!("Saved to {}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_output_uses_default_name() {
        assert_eq!(output_path(Some(Path::new("-")), "invoice.pdf"), PathBuf::from("invoice.pdf"));
        assert_eq!(output_path(None, "invoice.pdf"), PathBuf::from("invoice.pdf"));
        assert_eq!(
            output_path(Some(Path::new("out/a.pdf")), "invoice.pdf"),
            PathBuf::from("out/a.pdf")
        );
        assert_eq!(
            output_path(Some(Path::new("-")), &OutputFormat::Xml.filename()),
            PathBuf::from("orders_response.xml")
        );
    }
}
