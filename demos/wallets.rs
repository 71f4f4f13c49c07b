//! Example: Listing wallets and balances.
//!
//! Reads ITBIT_CLIENT_KEY, ITBIT_CLIENT_SECRET and ITBIT_USER_ID.
//!
//! Run with: cargo run --example wallets

use std::env;
use std::sync::Arc;

use itbit_api_client::auth::{EnvCredentials, IncreasingNonce};
use itbit_api_client::rest::ItbitClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (credentials, user_id) = match (EnvCredentials::from_env(), env::var("ITBIT_USER_ID")) {
        (Ok(creds), Ok(user_id)) => (Arc::new(creds), user_id),
        _ => {
            println!(
                "Set ITBIT_CLIENT_KEY, ITBIT_CLIENT_SECRET and ITBIT_USER_ID to run this example."
            );
            return Ok(());
        }
    };

    let client = ItbitClient::builder()
        .credentials(credentials)
        .nonce_provider(Arc::new(IncreasingNonce::new()))
        .user_id(user_id)
        .user_agent("itbit-api-client-examples/wallets")
        .build();

    println!("=== Wallets ===");
    let wallets = client.get_all_wallets().await?;
    for wallet in &wallets {
        println!("{} ({})", wallet.name, wallet.id);
        for balance in &wallet.balances {
            println!(
                "  {}: available={} total={}",
                balance.currency, balance.available, balance.total
            );
        }
    }

    if let Some(first) = wallets.first() {
        println!("\n=== Wallet {} ===", first.id);
        let wallet = client.get_wallet(&first.id).await?;
        println!("{} balances", wallet.balances.len());
    }

    Ok(())
}
