use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::domains::event::ChatEvent;
use crate::error::Result;
use crate::interfaces::store::RecordStore;
use crate::interfaces::transport::ChatTransport;
use crate::providers::memory::InMemoryRecordStore;
use crate::services::router::RouterService;

/// Facade over the whole core: wires the record store and router together
/// and exposes the one entry point the transport collaborator calls.
pub struct CampusBot {
    router: RouterService,
}

impl CampusBot {
    pub fn new(
        config: Config,
        store: Arc<dyn RecordStore>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        Self {
            router: RouterService::new(store, transport, config),
        }
    }

    /// Standard setup: volatile in-memory storage, empty on startup.
    pub fn with_in_memory_store(config: Config, transport: Arc<dyn ChatTransport>) -> Self {
        Self::new(config, Arc::new(InMemoryRecordStore::new()), transport)
    }

    pub fn from_config_path<P: AsRef<Path>>(
        path: P,
        transport: Arc<dyn ChatTransport>,
    ) -> Result<Self> {
        let config = Config::from_file(path)?;
        Ok(Self::with_in_memory_store(config, transport))
    }

    /// Processes one inbound event to completion.
    pub async fn handle_event(&self, event: ChatEvent) -> Result<()> {
        self.router.handle_event(event).await
    }
}
