//! Kapi.run server
//!
//! Configuration is read from the YAML file named by `KAPI_CONFIG`, falling
//! back to the built-in defaults. Set `KAPI_MENU_FIXTURE` to a JSON file to
//! serve that payload instead of calling the live upstream.
//!
//! ```text
//! RUST_LOG=kapi=debug KAPI_MENU_FIXTURE=menu.json cargo run --example server
//! ```

use kapi::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("kapi=info,tower_http=info")),
        )
        .init();

    let config = match std::env::var("KAPI_CONFIG") {
        Ok(path) => KapiConfig::from_yaml_file(&path)?,
        Err(_) => KapiConfig::default_config(),
    };

    println!("🍽  Kapi.run");
    println!("   - {} restaurants in catalogue", config.restaurants.len());
    println!("   - listening on http://{}\n", config.server.bind_addr);

    let mut builder = ServerBuilder::new().with_config(config);
    if let Ok(path) = std::env::var("KAPI_MENU_FIXTURE") {
        tracing::info!("Serving menus from fixture {}", path);
        builder = builder.with_menu_source(FixtureMenuSource::from_file(&path)?);
    }

    builder.serve().await
}
