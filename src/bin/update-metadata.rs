//! Point the token's on-chain metadata URI at an uploaded file.
//!
//! ```bash
//! update-metadata <KEYPAIR_JSON> <MINT> <URI>
//! ```
//!
//! Connects at `confirmed` commitment, resolves the token by mint address
//! (failing if it does not exist), and submits an update that rewrites
//! only the URI field. `SOLANA_RPC_URL` overrides the default endpoint.

use std::process;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use token_maintainer::prelude::*;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Ok([keypair_path, mint, uri]) = <[String; 3]>::try_from(args) else {
        eprintln!("Usage: update-metadata <KEYPAIR_JSON> <MINT> <URI>");
        process::exit(2);
    };

    if let Err(e) = run(&keypair_path, &mint, &uri).await {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

async fn run(keypair_path: &str, mint: &str, uri: &str) -> Result<(), MaintainerError> {
    let keypair = read_keypair_file(keypair_path)?;
    let mint = Pubkey::from_str(mint)
        .map_err(|e| MaintainerError::Other(format!("invalid mint address {mint}: {e}")))?;

    let client = MaintainerClient::builder()
        .rpc_url(&std::env::var("SOLANA_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string()))
        .commitment(CommitmentConfig::confirmed())
        .build()?;

    let outcome = client.update_token_uri(&keypair, &mint, uri).await?;

    println!("Updated metadata for mint {}", outcome.mint);
    println!("  previous uri: {}", outcome.previous_uri);
    println!("  new uri:      {}", outcome.new_uri);
    println!("  signature:    {}", outcome.signature);
    Ok(())
}
