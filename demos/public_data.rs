//! Example: Fetching public market data from itBit.
//!
//! No credentials are needed for the ticker and the order book.
//!
//! Run with: cargo run --example public_data

use itbit_api_client::rest::ItbitClient;
use itbit_api_client::types::Symbol;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = ItbitClient::new();

    for symbol in [Symbol::xbt_usd(), Symbol::xbt_eur()] {
        println!("=== Ticker ({symbol}) ===");
        let ticker = client.get_ticker(&symbol).await?;
        println!("{ticker}");
        println!("Last: {} ({} traded)", ticker.last_price, ticker.last_amt);
        println!("24h: high={} low={} vwap={}", ticker.high_24h, ticker.low_24h, ticker.vwap_24h);
        println!("Server time: {}", ticker.server_time_utc);
    }

    println!("\n=== Order Book (XBTUSD) ===");
    let book = client.get_order_book(&Symbol::xbt_usd()).await?;
    println!("{} asks, {} bids", book.asks.len(), book.bids.len());
    if let (Some(ask), Some(bid)) = (book.best_ask(), book.best_bid()) {
        println!("Best ask: {} @ {}", ask.amount(), ask.price());
        println!("Best bid: {} @ {}", bid.amount(), bid.price());
        println!("Spread: {}", ask.price() - bid.price());
    }

    Ok(())
}
