use crate::{api::AppState, config, error, info, server};

use super::connect_catalog;

pub async fn serve(addr: Option<String>) {
    let addr = addr.unwrap_or_else(config::server_addr);
    let data_dir = config::data_dir();

    let client = connect_catalog().await;
    let state = match AppState::load(client, &data_dir).await {
        Ok(state) => state,
        Err(e) => error!("Failed to load data from {}. Err: {}", data_dir.display(), e),
    };

    info!("Serving on http://{}", addr);
    if let Err(e) = server::start_api_server(state, &addr).await {
        error!("Server stopped. Err: {}", e);
    }
}
