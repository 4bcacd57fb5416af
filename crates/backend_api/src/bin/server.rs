use backend_api::{run_server, FileTradeRepository};
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment variables with sane defaults
    let store_path = env::var("STORE_PATH").unwrap_or_else(|_| "store/trades.json".to_string());
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);

    println!("Trade Journal API Server");
    println!("========================");
    println!("Trade store: {}", store_path);
    println!("Listening on: {}:{}", host, port);
    println!();

    // Create the repository. The store file is created lazily on the
    // first import, so a missing file is fine here.
    let repo = Arc::new(FileTradeRepository::new(&store_path));

    // Start the server
    run_server(repo, &host, port).await?;

    Ok(())
}
