use crate::render_bridge::model::RenderModel;
use anyhow::{anyhow, Result};
use log::error;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::Filter;

/// Holds the latest render model and serves it to an external renderer.
pub struct RenderBridge {
    state: Arc<RwLock<RenderModel>>,
}

impl RenderBridge {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(RenderModel::default())),
        }
    }

    /// Starts `GET /directives` on `address` in a background thread.
    pub fn serve(&self, address: SocketAddr) {
        let state = self.state.clone();
        let state_filter = warp::any().map(move || state.clone());

        let directives_route = warp::path("directives")
            .and(warp::get())
            .and(state_filter)
            .map(|state: Arc<RwLock<RenderModel>>| {
                let model = state
                    .read()
                    .map(|guard| guard.clone())
                    .unwrap_or_default();
                warp::reply::json(&model)
            });

        thread::spawn(move || {
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("render bridge runtime: {}", err);
                    return;
                }
            };
            runtime.block_on(async move {
                warp::serve(directives_route).run(address).await;
            });
        });
    }

    pub fn publish(&self, model: &RenderModel) -> Result<()> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| anyhow!("render state lock poisoned"))?;
        *guard = model.clone();
        println!(
            "[bridge] directives: {}, warnings: {}",
            guard.directives.len(),
            guard.warnings.len()
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[bridge] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> RenderModel {
        self.state.read().unwrap().clone()
    }
}

impl Default for RenderBridge {
    fn default() -> Self {
        Self::new()
    }
}
