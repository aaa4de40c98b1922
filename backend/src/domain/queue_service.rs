//! Queued-angpao domain logic: placeholders for gifts received but not
//! yet opened, carrying only a photo and the giver's name.
//!
//! The queue has the same ownership and persistence contract as the entry
//! collection — in-memory state is authoritative, writes are best-effort —
//! but no statistics are ever derived from it.

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::{info, warn};
use std::sync::{Arc, Mutex};

use shared::QueuedAngpao;

use crate::storage::traits::{Connection, QueueStorage};

#[derive(Clone)]
pub struct QueueService<C: Connection> {
    queue_repository: Arc<C::QueueRepository>,
    items: Arc<Mutex<Vec<QueuedAngpao>>>,
}

impl<C: Connection> QueueService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let queue_repository = connection.create_queue_repository();
        let items = match queue_repository.load_queue() {
            Ok(items) => items,
            Err(e) => {
                warn!("Failed to load persisted queue, starting empty: {e}");
                Vec::new()
            }
        };

        Self {
            queue_repository: Arc::new(queue_repository),
            items: Arc::new(Mutex::new(items)),
        }
    }

    /// Queue an unopened angpao. The photo is stored opaquely; only the
    /// giver name is validated.
    pub fn add_to_queue(&self, photo: String, from: &str) -> Result<QueuedAngpao> {
        let from = from.trim();
        if from.is_empty() {
            return Err(anyhow!("Giver name must not be empty"));
        }

        let created_at = Utc::now().timestamp_millis();
        let item = QueuedAngpao {
            id: QueuedAngpao::generate_id(created_at),
            photo,
            from: from.to_string(),
            created_at,
        };

        let mut items = self.items.lock().unwrap();
        items.insert(0, item.clone());
        self.persist(&items);

        info!("Queued unopened angpao {} from {}", item.id, item.from);
        Ok(item)
    }

    /// Remove a queued item, returning it so the caller can convert it
    /// into a recorded entry. `None` on a miss.
    pub fn remove_from_queue(&self, id: &str) -> Option<QueuedAngpao> {
        let mut items = self.items.lock().unwrap();
        let idx = items.iter().position(|q| q.id == id)?;
        let removed = items.remove(idx);
        self.persist(&items);
        info!("Removed queued angpao {id}");
        Some(removed)
    }

    /// Put a previously removed item back at the front of the queue,
    /// keeping its id and timestamp. Used when converting a queued item
    /// fails after it has already been taken out.
    pub(crate) fn requeue(&self, item: QueuedAngpao) {
        let mut items = self.items.lock().unwrap();
        items.insert(0, item);
        self.persist(&items);
    }

    /// Snapshot of the queue, most-recent-first.
    pub fn queued_items(&self) -> Vec<QueuedAngpao> {
        self.items.lock().unwrap().clone()
    }

    fn persist(&self, items: &[QueuedAngpao]) {
        if let Err(e) = self.queue_repository.save_queue(items) {
            warn!("Failed to persist queue (continuing in-memory): {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::JsonConnection;
    use tempfile::TempDir;

    fn setup() -> (QueueService<JsonConnection>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        (QueueService::new(connection), temp_dir)
    }

    #[test]
    fn test_add_to_queue() {
        let (service, _temp_dir) = setup();

        let item = service
            .add_to_queue("data:image/jpeg;base64,abcd".to_string(), "  Grandma ")
            .unwrap();
        assert!(item.id.starts_with("queued-"));
        assert_eq!(item.from, "Grandma");
        assert_eq!(service.queued_items().len(), 1);
    }

    #[test]
    fn test_add_to_queue_rejects_empty_giver() {
        let (service, _temp_dir) = setup();
        assert!(service.add_to_queue("photo".to_string(), "   ").is_err());
        assert!(service.queued_items().is_empty());
    }

    #[test]
    fn test_remove_returns_item_for_conversion() {
        let (service, _temp_dir) = setup();
        let item = service.add_to_queue("photo".to_string(), "Grandma").unwrap();

        let removed = service.remove_from_queue(&item.id).unwrap();
        assert_eq!(removed.from, "Grandma");
        assert!(service.queued_items().is_empty());

        // Second removal is a miss
        assert!(service.remove_from_queue(&item.id).is_none());
    }

    #[test]
    fn test_queue_persists_across_restart() {
        let temp_dir = TempDir::new().unwrap();
        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        let service = QueueService::new(connection);
        service.add_to_queue("photo".to_string(), "Grandma").unwrap();
        drop(service);

        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        let service = QueueService::<JsonConnection>::new(connection);
        assert_eq!(service.queued_items().len(), 1);
    }
}
