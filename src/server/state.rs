use std::sync::Arc;
use std::time::Instant;

use axum::extract::FromRef;

use crate::models::ServerConfig;
use crate::storage::RecordSource;

pub type SharedSource = Arc<dyn RecordSource>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub source: SharedSource,
}

impl ServerState {
    pub fn new(source: SharedSource, config: ServerConfig) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            source,
        }
    }
}

impl FromRef<ServerState> for SharedSource {
    fn from_ref(input: &ServerState) -> Self {
        input.source.clone()
    }
}
