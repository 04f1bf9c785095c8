#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Delegate to the client framework entry point.
    battle_city_client::run_with_config().await
}
