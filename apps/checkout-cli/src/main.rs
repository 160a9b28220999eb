//! Checkout shell entry point.

#[tokio::main]
async fn main() {
    if let Err(e) = checkout_cli::run(std::env::args().skip(1)).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
