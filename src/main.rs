#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = fastlms_rust::run().await {
        eprintln!("fastlms-rust fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
