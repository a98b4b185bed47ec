use anyhow::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use questfall::app::App;

pub fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish()
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber)?;

    let mut app = App::new()?;
    tracing::info!("Starting game loop");
    while app.run() {}

    Ok(())
}
