//! LLM Models API CLI binary.
//!
//! # Commands
//!
//! - `serve` - Start the HTTP API server
//! - `list` - Fetch the upstream catalogue once and print the filtered list

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use llm_models::{
    config::Config,
    filter::{self, keys, FilterParams},
    models::ModelList,
    server::Server,
    upstream::UpstreamClient,
    VERSION,
};

#[derive(Parser)]
#[command(name = "llm-models")]
#[command(version = VERSION)]
#[command(about = "Filtering proxy for the OpenRouter model catalogue", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Config file path (default: <config dir>/llm-models/config.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Listen host
        #[arg(long)]
        host: Option<String>,

        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,

        /// Upstream model list URL
        #[arg(short, long)]
        upstream: Option<String>,

        /// Seconds to cache the upstream list (0 disables)
        #[arg(long)]
        cache_ttl: Option<u64>,

        /// Upstream request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Disable CORS headers
        #[arg(long)]
        no_cors: bool,

        /// Emit logs as JSON lines
        #[arg(long)]
        json_logs: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Fetch the catalogue once and print the filtered list
    List {
        /// Upstream model list URL
        #[arg(short, long)]
        upstream: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Print one id per line instead of JSON
        #[arg(long)]
        ids_only: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Same knobs as the `/models` query string
#[derive(Args)]
struct FilterArgs {
    /// Drop `:free` variants
    #[arg(long)]
    ignore_free: bool,

    /// Comma-separated providers to keep
    #[arg(long)]
    provider: Option<String>,

    /// Comma-separated model names to keep
    #[arg(long)]
    model: Option<String>,

    /// Minimum context length in tokens
    #[arg(long)]
    min_context: Option<String>,

    /// Modality substring, e.g. `image`
    #[arg(long)]
    modality: Option<String>,

    /// Strip `:variant` suffixes from ids
    #[arg(long)]
    strip_suffix: bool,
}

impl FilterArgs {
    /// Route through the query parser so the CLI and HTTP agree exactly
    fn to_params(&self) -> FilterParams {
        let mut pairs: Vec<(&str, &str)> = Vec::new();
        if self.ignore_free {
            pairs.push((keys::IGNORE_FREE, "true"));
        }
        if let Some(ref provider) = self.provider {
            pairs.push((keys::PROVIDER, provider.as_str()));
        }
        if let Some(ref model) = self.model {
            pairs.push((keys::MODEL, model.as_str()));
        }
        if let Some(ref min_context) = self.min_context {
            pairs.push((keys::MIN_CONTEXT, min_context.as_str()));
        }
        if let Some(ref modality) = self.modality {
            pairs.push((keys::MODALITY, modality.as_str()));
        }
        if self.strip_suffix {
            pairs.push((keys::STRIP_SUFFIX, "true"));
        }
        FilterParams::from_query_pairs(pairs)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            host,
            port,
            upstream,
            cache_ttl,
            timeout,
            no_cors,
            json_logs,
            verbose,
        } => cmd_serve(
            config, host, port, upstream, cache_ttl, timeout, no_cors, json_logs, verbose,
        ),

        Commands::List {
            upstream,
            filters,
            ids_only,
            pretty,
            verbose,
        } => cmd_list(upstream, &filters, ids_only, pretty, verbose),
    }
}

fn init_logging(verbose: bool, json: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Defaults < file < environment < CLI flags
fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let file_config = match path {
        Some(path) => Config::from_file(path)?,
        None => match Config::default_path().filter(|p| p.exists()) {
            Some(path) => {
                tracing::info!("Loading config from {}", path.display());
                Config::from_file(path)?
            },
            None => Config::default(),
        },
    };

    Ok(file_config.apply_env())
}

#[allow(clippy::too_many_arguments)]
fn cmd_serve(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    upstream: Option<String>,
    cache_ttl: Option<u64>,
    timeout: Option<u64>,
    no_cors: bool,
    json_logs: bool,
    verbose: bool,
) -> anyhow::Result<()> {
    init_logging(verbose, json_logs);

    let mut config = load_config(config_path)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(url) = upstream {
        config.upstream.url = url;
    }
    if let Some(ttl) = cache_ttl {
        config.cache.ttl_secs = ttl;
    }
    if let Some(timeout) = timeout {
        config.upstream.timeout_secs = timeout;
    }
    if no_cors {
        config.server.cors = false;
    }

    let server = Server::new(config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async { server.run().await.map_err(|e| anyhow::anyhow!("{}", e)) })
}

fn cmd_list(
    upstream: Option<String>,
    filters: &FilterArgs,
    ids_only: bool,
    pretty: bool,
    verbose: bool,
) -> anyhow::Result<()> {
    init_logging(verbose, false);

    let mut config = Config::from_env();
    if let Some(url) = upstream {
        config.upstream.url = url;
    }

    let client = UpstreamClient::new(&config.upstream)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let models = runtime.block_on(client.fetch_models())?;

    let params = filters.to_params();
    let filtered = filter::apply(&models, &params);
    tracing::debug!("{} of {} models matched", filtered.len(), models.len());

    if ids_only {
        for model in &filtered {
            println!("{}", model.id);
        }
    } else {
        let list = ModelList::new(filtered);
        let output = if pretty {
            serde_json::to_string_pretty(&list)?
        } else {
            serde_json::to_string(&list)?
        };
        println!("{output}");
    }

    Ok(())
}
