use std::sync::Arc;

use hostel_core::{HostelConfig, Result};
use hostel_store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: Arc<HostelConfig>,
}

impl AppState {
    pub fn new(config: Arc<HostelConfig>) -> Result<Self> {
        let store = if config.database.path == ":memory:" {
            Store::open_in_memory()?
        } else {
            Store::open(&config.database.path)?
        };
        if config.database.seed {
            store.seed()?;
        }

        Ok(Self {
            store: Arc::new(store),
            config,
        })
    }
}
