#[tokio::main]
async fn main() -> anyhow::Result<()> {
    polyglotpal_backend::run().await
}
