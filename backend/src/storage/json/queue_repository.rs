//! JSON-backed repository for the queued (unopened) collection, stored as
//! one JSON array under the `angpao_queue` key. Same fallback behavior as
//! the entry repository: missing or corrupt values load as empty.

use anyhow::Result;
use log::{debug, warn};
use shared::QueuedAngpao;

use super::connection::JsonConnection;
use super::QUEUE_KEY;
use crate::storage::traits::QueueStorage;

#[derive(Clone)]
pub struct QueueRepository {
    connection: JsonConnection,
}

impl QueueRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl QueueStorage for QueueRepository {
    fn load_queue(&self) -> Result<Vec<QueuedAngpao>> {
        let Some(raw) = self.connection.read_key(QUEUE_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!("Failed to parse persisted queue, falling back to empty: {e}");
                Ok(Vec::new())
            }
        }
    }

    fn save_queue(&self, items: &[QueuedAngpao]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        self.connection.write_key(QUEUE_KEY, &raw)?;
        debug!("Persisted {} queued items", items.len());
        Ok(())
    }
}
