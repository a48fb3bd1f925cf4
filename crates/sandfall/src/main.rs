//! Sandfall - falling-sand sandbox

use sandfall::{App, SandfallConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Sandfall");

    pollster::block_on(run())
}

async fn run() -> anyhow::Result<()> {
    let config = SandfallConfig::load();
    let (app, event_loop) = App::new(config).await?;
    App::run(event_loop, app)?;
    log::info!("Sandfall shut down");
    Ok(())
}
