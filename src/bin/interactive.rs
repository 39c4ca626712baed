//! Interactive CLI for the USDT SDK
//!
//! Run with: cargo run --bin interactive
//!
//! Requires PRIVATE_KEY and ETH_RPC_URL environment variables

use std::io::{self, Write};

use usdt_sdk::{LocalSigner, NetworkConfig, TokenGateway, TransferApp, UsdtClient};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    // Get private key from env
    let private_key = std::env::var("PRIVATE_KEY").expect("PRIVATE_KEY must be set");

    // Initialize client
    let config = NetworkConfig::default();
    let signer = LocalSigner::from_private_key(&private_key, &config.rpc_url).await?;
    let client = UsdtClient::new(signer, config).await?;
    let connected = client.address();

    println!("\n========================================");
    println!("         USDT Transfer CLI");
    println!("========================================");

    let mut app = TransferApp::new(client, connected);
    app.connect().await;
    render(&app);

    // Main loop
    loop {
        println!("\n----------------------------------------");
        println!("Select an option:");
        println!("  1. Check balance");
        println!("  2. Check allowance");
        println!("  3. Transfer USDT");
        println!("  q. Quit");
        println!("----------------------------------------");

        print!("Enter choice: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let choice = input.trim();

        match choice {
            "1" => app.check_balance().await,
            "2" => check_allowance_flow(&mut app).await?,
            "3" => transfer_flow(&mut app).await?,
            "q" | "Q" => {
                println!("\nGoodbye!");
                break;
            }
            _ => {
                println!("\nInvalid choice. Please try again.");
                continue;
            }
        }
        render(&app);
    }

    Ok(())
}

/// Prompt for the owner address, then query its allowance for the connected
/// account.
async fn check_allowance_flow<G: TokenGateway>(app: &mut TransferApp<G>) -> eyre::Result<()> {
    println!("\n=== Check Allowance ===");

    app.from_address = prompt("From address (owner)", &app.from_address)?;
    app.check_allowance().await;

    Ok(())
}

/// Collect the transfer form fields, then run the delegated transfer.
async fn transfer_flow<G: TokenGateway>(app: &mut TransferApp<G>) -> eyre::Result<()> {
    println!("\n=== Transfer USDT ===");
    println!("The 'From' address must have approved the connected account to spend its USDT.");

    app.from_address = prompt("From address (sender)", &app.from_address)?;
    app.to_address = prompt("To address (recipient)", &app.to_address)?;
    app.amount = prompt("Amount (USDT)", &app.amount)?;

    println!("\nTransferring...");
    app.transfer().await;

    Ok(())
}

/// Read a line, keeping the current value when the input is empty.
fn prompt(label: &str, current: &str) -> eyre::Result<String> {
    if current.is_empty() {
        print!("{label}: ");
    } else {
        print!("{label} [{current}]: ");
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let value = input.trim();

    Ok(if value.is_empty() {
        current.to_string()
    } else {
        value.to_string()
    })
}

/// Print the current app state.
fn render<G: TokenGateway>(app: &TransferApp<G>) {
    println!("\nConnected Account: {}", app.connected_summary());

    match app.balance_display() {
        Some(balance) => println!("Your USDT Balance: {balance} USDT"),
        None => println!("Your USDT Balance: (not fetched)"),
    }

    if let Some(allowance) = app.allowance_display() {
        println!("Current Allowance: {allowance} USDT");
    }

    if let Some(error) = &app.error {
        println!("Error: {error}");
    }
}
