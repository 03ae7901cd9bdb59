pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod image;
pub mod page;
pub mod render;
pub mod state;
pub mod store;
pub mod view;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use config::Config;
use error::Result;
use image::SanityImageBuilder;
use state::AppState;
use store::SanityClient;
use view::ViewModelBuilder;

pub async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("PRESSROOM_LOG"))
        .init();

    let config = Config::load()?;

    let app = AppState::new(
        SanityClient::new(&config.sanity)?,
        ViewModelBuilder::new(
            SanityImageBuilder::from_config(&config.sanity),
            config.assets.clone(),
        ),
        &config.site_url,
    );

    api::run_server(app, &config.public_dir, &config.listen).await
}
