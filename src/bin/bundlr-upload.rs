//! Upload the token's metadata file (or logo) to Arweave via Bundlr.
//!
//! ```bash
//! bundlr-upload <KEYPAIR_JSON> <FILE> [--dry-run]
//! ```
//!
//! With `--dry-run` the command only reports the account balance and the
//! price to store the file. Without it, the full workflow runs: fund any
//! shortfall, sign, submit, and print the file's public address.
//!
//! `BUNDLR_NODE_URL`, `ARWEAVE_GATEWAY_URL`, and `SOLANA_RPC_URL` override
//! the default endpoints.

use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

use token_maintainer::prelude::*;

struct Args {
    keypair_path: PathBuf,
    file_path: PathBuf,
    dry_run: bool,
}

fn parse_args() -> Option<Args> {
    let mut positional = Vec::new();
    let mut dry_run = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--dry-run" => dry_run = true,
            _ => positional.push(arg),
        }
    }

    let [keypair, file] = positional.try_into().ok()?;
    Some(Args {
        keypair_path: PathBuf::from(keypair),
        file_path: PathBuf::from(file),
        dry_run,
    })
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(args) = parse_args() else {
        eprintln!("Usage: bundlr-upload <KEYPAIR_JSON> <FILE> [--dry-run]");
        process::exit(2);
    };

    if let Err(e) = run(args).await {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), MaintainerError> {
    let keypair = read_keypair_file(&args.keypair_path)?;
    let data = tokio::fs::read(&args.file_path).await?;

    let client = MaintainerClient::builder()
        .node_url(&env_or("BUNDLR_NODE_URL", DEFAULT_NODE_URL))
        .gateway_url(&env_or("ARWEAVE_GATEWAY_URL", DEFAULT_GATEWAY_URL))
        .rpc_url(&env_or("SOLANA_RPC_URL", DEFAULT_RPC_URL))
        .build()?;

    let tags = Tag::content_type_for_path(&args.file_path)
        .into_iter()
        .collect();
    let item = DataItem::new(keypair.pubkey(), data, tags);

    if args.dry_run {
        let balance = client.storage().balance(&keypair.pubkey()).await?;
        let cost = client.storage().price(item.size()).await?;
        println!("Current balance: {balance}");
        println!("Cost to upload: {cost}");
        return Ok(());
    }

    let outcome = client.upload(&keypair, item).await?;

    println!("Current balance: {}", outcome.balance);
    println!("Cost to upload: {}", outcome.price);
    if let Some(funded) = outcome.funded {
        println!("Not enough funds, funded {funded} lamports");
    }
    println!("Result: {:?}", outcome.receipt);
    println!("File address: {}", outcome.url);
    Ok(())
}
