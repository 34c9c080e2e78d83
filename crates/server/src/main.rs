#[tokio::main]
async fn main() -> anyhow::Result<()> {
    recipe_lens_server::start().await
}
