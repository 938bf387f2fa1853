/*
 * Echo server for manual proxy integration testing.
 * Accepts any method and path, logs the full request, answers 200. Never denies.
 */
mod app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
