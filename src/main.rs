#[tokio::main]
async fn main() {
    if let Err(e) = healthbuddy_lib::run().await {
        eprintln!("healthbuddy: {e}");
        std::process::exit(1);
    }
}
