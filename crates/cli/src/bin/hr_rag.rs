use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    hr_cli::main_entry().await
}
