#[tokio::main]
async fn main() -> anyhow::Result<()> {
    uptime_status_proxy::run().await
}
