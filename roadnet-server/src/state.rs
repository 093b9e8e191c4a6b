use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use roadnet_core::prelude::*;
use tokio::sync::Semaphore;

use crate::config::LimitsConfig;
use crate::error::ApiError;

/// Shared application state. The network is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub network: Arc<RoadNetwork>,
    pub index: Arc<RoadIndex>,
    pub limits: Arc<LimitsConfig>,
    /// Slots for searches running on the blocking pool
    workers: Arc<Semaphore>,
    /// Clean search tables left behind by finished queries
    tables: Arc<Mutex<Vec<SearchState>>>,
    articulation: Arc<OnceLock<ArticulationPoints>>,
}

impl AppState {
    pub fn new(network: RoadNetwork, limits: LimitsConfig) -> Self {
        let index = RoadIndex::new(&network);
        Self {
            network: Arc::new(network),
            index: Arc::new(index),
            workers: Arc::new(Semaphore::new(limits.max_concurrent_requests)),
            limits: Arc::new(limits),
            tables: Arc::default(),
            articulation: Arc::default(),
        }
    }

    /// Runs `query` on the blocking pool once a worker slot is free.
    ///
    /// The slot is owned by the blocking task, not by the request, so a
    /// request that times out keeps it until the computation finishes.
    pub async fn run_blocking<T, F>(&self, query: F) -> Result<T, ApiError>
    where
        F: FnOnce(&AppState) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .workers
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        let state = self.clone();
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            query(&state)
        })
        .await?
    }

    /// Lends a clean search table from the pool, allocating one if the pool
    /// is empty
    pub fn with_search_table<T>(&self, search: impl FnOnce(&mut SearchState) -> T) -> T {
        let pooled = self.lock_tables().pop();
        let mut table = pooled.unwrap_or_else(|| SearchState::for_network(&self.network));
        let result = search(&mut table);
        if table.is_clean() {
            self.lock_tables().push(table);
        }
        result
    }

    /// Articulation points of the whole network, computed on first use
    pub fn articulation_points(&self) -> &ArticulationPoints {
        self.articulation
            .get_or_init(|| find_articulation_points(&self.network))
    }

    fn lock_tables(&self) -> std::sync::MutexGuard<'_, Vec<SearchState>> {
        // Tables are only pushed when clean, so a poisoned pool is still valid
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
