use anyhow::Result;
use tokio::signal;
use tracing::{error, info};

use monza::api::news_api_loop;
use monza::logging::configure_logging;
use monza::store::NewsStore;

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();

    let store = NewsStore::instance().await;
    info!("Serving {} trending stories", store.story_count());

    tokio::select! {
        result = news_api_loop() => {
            if let Err(e) = result {
                error!("API server exited with error: {:#?}", e);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Ctrl-C received, shutting down.");
        }
    }

    Ok(())
}
