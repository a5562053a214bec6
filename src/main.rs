use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    changelist_gateway::cli::run().await
}
