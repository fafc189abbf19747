use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;

use akashic_core::config::{load_config, SdkConfig};
use akashic_core::currency::{from_smallest_unit, ConversionPolicy, CurrencyConverter};
use akashic_core::health::NodeSelector;
use akashic_core::ledger::umid::{prefix_with_as, remove_as_prefix};
use akashic_core::ledger::Otk;
use akashic_core::network::{Environment, NetworkRegistry, NetworkSymbol, TokenSymbol};
use akashic_core::observability::init_logging;

#[derive(Parser)]
#[command(name = "akashic-cli")]
#[command(about = "Tools for the AkashicChain SDK core", long_about = None)]
struct Cli {
    /// TOML config file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured environment
    #[arg(short, long)]
    env: Option<Environment>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Race the candidate nodes and print the first healthy one
    Node,
    /// Convert a decimal amount to smallest units
    Convert {
        amount: String,
        #[arg(short, long)]
        network: NetworkSymbol,
        #[arg(short, long)]
        token: Option<TokenSymbol>,
        /// Drop excess precision instead of failing
        #[arg(long)]
        truncate: bool,
        /// Treat AMOUNT as smallest units and print the decimal form
        #[arg(long)]
        reverse: bool,
    },
    /// Print the public key of the key in AKASHIC_PRIVATE_KEY
    Identity {
        /// L2 identity the key signs for
        identity: String,
    },
    /// Normalize a transaction id
    Umid {
        id: String,
        /// Strip the AS prefix instead of adding it
        #[arg(long)]
        strip: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SdkConfig::default(),
    };
    if let Some(env) = cli.env {
        config.environment = env;
    }
    init_logging(&config.observability);

    match cli.command {
        Commands::Node => {
            let selector = NodeSelector::new(config.node_selection.clone())?;
            let node = selector.choose_healthy_node(&config.candidate_nodes()).await?;
            println!("{}", serde_json::to_string_pretty(&node)?);
        }
        Commands::Convert {
            amount,
            network,
            token,
            truncate,
            reverse,
        } => {
            let registry = NetworkRegistry::builtin();
            if reverse {
                let places = registry.decimal_places(network, token)?;
                println!("{}", from_smallest_unit(&amount, places)?);
            } else {
                let policy = if truncate {
                    ConversionPolicy::Truncate
                } else {
                    config.transactions.conversion_policy
                };
                let converter = CurrencyConverter::new(registry, policy);
                println!("{}", converter.to_smallest_unit(&amount, network, token)?);
            }
        }
        Commands::Identity { identity } => {
            let otk = Otk::from_env(&identity)?;
            let out = json!({ "identity": otk.identity(), "publicKey": otk.public_key() });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Umid { id, strip } => {
            let normalized = if strip {
                remove_as_prefix(&id)?
            } else {
                prefix_with_as(&id)?
            };
            println!("{}", normalized);
        }
    }

    Ok(())
}
