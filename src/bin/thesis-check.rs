#[path = "thesis-check/app/mod.rs"]
mod app;
#[path = "thesis-check/args.rs"]
mod args;
#[path = "thesis-check/config/mod.rs"]
mod config;
#[path = "thesis-check/logging.rs"]
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
