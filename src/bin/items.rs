#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = fastlms_rust::run_items().await {
        eprintln!("items fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
