//! # Record manager
//!
//! [`ClientManager`] mediates between an in-memory cache and a
//! [`RecordStore`]. It is the single entry point for all record operations:
//! UI clients call it and present its results or errors, nothing more.
//!
//! The cache is an explicit field owned by one manager instance, not
//! process-wide state. One cache entry and one stored record exist per
//! normalized name; every mutation persists before it updates the cache.

use std::collections::HashMap;

use tracing::warn;

use crate::error::{ClienteleError, Result};
use crate::model::Client;
use crate::normalize::normalize_name;
use crate::store::RecordStore;

/// Aggregate counts over all stored records.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub total_clients: usize,
    pub total_services: usize,
    pub average_services: f64,
}

/// Orchestrates CRUD over a cache plus a [`RecordStore`], enforcing
/// uniqueness and existence invariants.
///
/// Generic over the store so tests can run against
/// [`InMemoryStore`](crate::store::memory::InMemoryStore).
pub struct ClientManager<S: RecordStore> {
    store: S,
    cache: HashMap<String, Client>,
}

impl<S: RecordStore> ClientManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cache: HashMap::new(),
        }
    }

    /// Create, persist, and cache a new client with its first service.
    ///
    /// Uniqueness is keyed by the normalized name; the backing-store check
    /// is authoritative even when the cache is cold.
    pub fn create(
        &mut self,
        name: &str,
        phone: &str,
        email: &str,
        first_service: &str,
    ) -> Result<Client> {
        let mut client = Client::new(name, phone, email)?;
        let key = client.normalized_name();

        if self.cache.contains_key(&key) || self.store.exists(&key) {
            return Err(ClienteleError::AlreadyExists {
                name: client.name,
            });
        }

        client.client_id = client.generate_client_id();
        client.add_service(first_service)?;
        self.store.write(&client)?;
        self.cache.insert(key, client.clone());
        Ok(client)
    }

    /// Look a client up by display name: cache first, then the store
    /// (filling the cache on a hit). A miss reports the name exactly as the
    /// caller supplied it, not the normalized key.
    pub fn get(&mut self, name: &str) -> Result<Client> {
        let key = normalize_name(name);
        if let Some(client) = self.cache.get(&key) {
            return Ok(client.clone());
        }
        match self.store.read(&key) {
            Ok(client) => {
                self.cache.insert(key, client.clone());
                Ok(client)
            }
            Err(ClienteleError::NotFound { .. }) => Err(ClienteleError::NotFound {
                name: name.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    /// All clients, sorted by display name. Warms the cache from every
    /// stored record first.
    pub fn list_all(&mut self) -> Result<Vec<Client>> {
        self.warm_cache()?;
        let mut clients: Vec<Client> = self.cache.values().cloned().collect();
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clients)
    }

    /// Append a service to an existing client and persist the change.
    pub fn add_service(&mut self, name: &str, description: &str) -> Result<Client> {
        let mut client = self.get(name)?;
        client.add_service(description)?;
        self.store.write(&client)?;
        self.cache.insert(client.normalized_name(), client.clone());
        Ok(client)
    }

    /// Remove a client's backing record and cache entry. Fails with
    /// [`ClienteleError::NotFound`] when no such client exists.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let client = self.get(name)?;
        let key = client.normalized_name();
        self.store.delete(&key)?;
        self.cache.remove(&key);
        Ok(())
    }

    /// Aggregate counts over every stored record.
    pub fn stats(&mut self) -> Result<Stats> {
        self.warm_cache()?;
        let total_clients = self.cache.len();
        let total_services: usize = self.cache.values().map(|c| c.services.len()).sum();
        let average_services = if total_clients == 0 {
            0.0
        } else {
            total_services as f64 / total_clients as f64
        };
        Ok(Stats {
            total_clients,
            total_services,
            average_services,
        })
    }

    /// Number of records currently cached.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Load every stored record not already cached. Best-effort: a record
    /// that fails to load is skipped with a warning so the rest of a bulk
    /// operation still succeeds.
    fn warm_cache(&mut self) -> Result<()> {
        for key in self.store.list_keys()? {
            if self.cache.contains_key(&key) {
                continue;
            }
            match self.store.read(&key) {
                Ok(client) => {
                    self.cache.insert(key, client);
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "skipping record that failed to load");
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn manager() -> ClientManager<InMemoryStore> {
        ClientManager::new(InMemoryStore::new())
    }

    #[test]
    fn create_then_get_preserves_fields() {
        let mut mgr = manager();
        mgr.create("Ana López", "555-123-4567", "ana@example.com", "router setup")
            .unwrap();

        let client = mgr.get("Ana López").unwrap();
        assert_eq!(client.name, "Ana López");
        assert_eq!(client.phone, "5551234567");
        assert_eq!(client.email, "ana@example.com");
        assert_eq!(client.services.len(), 1);
        assert_eq!(client.services[0].description, "router setup");
        assert!(!client.client_id.is_empty());
    }

    #[test]
    fn duplicate_create_fails_even_with_accents() {
        let mut mgr = manager();
        mgr.create("Ana López", "5551234567", "ana@example.com", "setup")
            .unwrap();
        let err = mgr
            .create("ana lopez", "5559876543", "other@example.com", "setup")
            .unwrap_err();
        assert!(matches!(err, ClienteleError::AlreadyExists { .. }));
    }

    #[test]
    fn duplicate_create_detected_on_cold_cache() {
        let mut store = InMemoryStore::new();
        let mut client = Client::new("Ana López", "5551234567", "ana@example.com").unwrap();
        client.client_id = "AL_20240101120000".to_string();
        store.write(&client).unwrap();

        // Fresh manager, empty cache: the store check must still fire.
        let mut mgr = ClientManager::new(store);
        let err = mgr
            .create("Ana López", "5551234567", "ana@example.com", "setup")
            .unwrap_err();
        assert!(matches!(err, ClienteleError::AlreadyExists { .. }));
    }

    #[test]
    fn get_miss_reports_supplied_name() {
        let mut mgr = manager();
        let err = mgr.get("Señor Nadie").unwrap_err();
        // The message carries the name as supplied, not the normalized key.
        assert!(err.to_string().contains("Señor Nadie"));
        match err {
            ClienteleError::NotFound { name } => assert_eq!(name, "Señor Nadie"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn get_falls_back_to_store() {
        let mut store = InMemoryStore::new();
        let mut client = Client::new("Ana López", "5551234567", "ana@example.com").unwrap();
        client.client_id = "AL_20240101120000".to_string();
        store.write(&client).unwrap();

        let mut mgr = ClientManager::new(store);
        assert_eq!(mgr.cached_len(), 0);
        let loaded = mgr.get("ana lopez").unwrap();
        assert_eq!(loaded.name, "Ana López");
        assert_eq!(mgr.cached_len(), 1);
    }

    #[test]
    fn add_service_appends_and_persists() {
        let mut mgr = manager();
        mgr.create("Ana López", "5551234567", "ana@example.com", "setup")
            .unwrap();
        let client = mgr.add_service("ana lopez", "fiber upgrade").unwrap();
        assert_eq!(client.services.len(), 2);
        assert_eq!(client.services[1].description, "fiber upgrade");

        // The persisted copy, not just the cached one, must have both.
        let stored = mgr.store.read("ana_lopez").unwrap();
        assert_eq!(stored.services.len(), 2);
    }

    #[test]
    fn add_service_on_missing_client_fails() {
        let mut mgr = manager();
        let err = mgr.add_service("Nadie Aquí", "anything").unwrap_err();
        assert!(matches!(err, ClienteleError::NotFound { .. }));
    }

    #[test]
    fn delete_then_get_fails_and_recreate_gets_fresh_id() {
        let mut mgr = manager();
        let original = mgr
            .create("Ana López", "5551234567", "ana@example.com", "setup")
            .unwrap();

        mgr.delete("Ana López").unwrap();
        assert!(matches!(
            mgr.get("Ana López"),
            Err(ClienteleError::NotFound { .. })
        ));
        assert!(!mgr.store.exists("ana_lopez"));

        // Ids embed a second-resolution timestamp; force a distinct one.
        std::thread::sleep(std::time::Duration::from_millis(1100));
        let recreated = mgr
            .create("Ana López", "5551234567", "ana@example.com", "fresh start")
            .unwrap();
        assert_ne!(recreated.client_id, original.client_id);
    }

    #[test]
    fn delete_missing_client_fails() {
        let mut mgr = manager();
        let err = mgr.delete("Nadie").unwrap_err();
        assert!(matches!(err, ClienteleError::NotFound { .. }));
    }

    #[test]
    fn list_all_sorts_by_display_name() {
        let mut mgr = manager();
        mgr.create("Zoe Vega", "5551111111", "zoe@example.com", "a")
            .unwrap();
        mgr.create("Ana López", "5552222222", "ana@example.com", "b")
            .unwrap();
        mgr.create("Mar Ruiz", "5553333333", "mar@example.com", "c")
            .unwrap();

        let names: Vec<String> = mgr.list_all().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Ana López", "Mar Ruiz", "Zoe Vega"]);
    }

    #[test]
    fn list_all_skips_corrupt_records() {
        let mut store = InMemoryStore::new();
        store.seed("broken", "this is not a record");
        let mut client = Client::new("Ana López", "5551234567", "ana@example.com").unwrap();
        client.client_id = "AL_20240101120000".to_string();
        store.write(&client).unwrap();

        let mut mgr = ClientManager::new(store);
        let clients = mgr.list_all().unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].name, "Ana López");
    }

    #[test]
    fn stats_on_empty_store() {
        let mut mgr = manager();
        let stats = mgr.stats().unwrap();
        assert_eq!(
            stats,
            Stats {
                total_clients: 0,
                total_services: 0,
                average_services: 0.0,
            }
        );
    }

    #[test]
    fn stats_averages_services() {
        let mut mgr = manager();
        mgr.create("Ana López", "5551111111", "ana@example.com", "s1")
            .unwrap();
        mgr.create("Mar Ruiz", "5552222222", "mar@example.com", "s1")
            .unwrap();
        mgr.add_service("Mar Ruiz", "s2").unwrap();
        mgr.create("Zoe Vega", "5553333333", "zoe@example.com", "s1")
            .unwrap();
        mgr.add_service("Zoe Vega", "s2").unwrap();
        mgr.add_service("Zoe Vega", "s3").unwrap();

        let stats = mgr.stats().unwrap();
        assert_eq!(stats.total_clients, 3);
        assert_eq!(stats.total_services, 6);
        assert!((stats.average_services - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_input_is_rejected_before_any_write() {
        let mut mgr = manager();
        let err = mgr
            .create("Ana López", "555-123-456", "ana@example.com", "setup")
            .unwrap_err();
        assert!(matches!(
            err,
            ClienteleError::Validation { field: "phone", .. }
        ));
        assert!(!mgr.store.exists("ana_lopez"));
        assert_eq!(mgr.cached_len(), 0);
    }
}
