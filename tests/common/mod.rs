//! In-memory document store shared by the integration tests
//!
//! Understands the query shapes the tests use:
//! `SELECT * FROM root r [WHERE r.a = @p [AND r.b.c = 'lit' ...]]` and
//! `SELECT VALUE r.field FROM root r [WHERE ...]`.

#![allow(dead_code)]

use async_trait::async_trait;
use cosmos_gateway::adapters::database::DocumentStore;
use cosmos_gateway::domain::{
    ContainerDescriptor, CosmosDbError, DatabaseDescriptor, GatewayError, Offer, PartitionKeySpec,
    PartitionKeyValue, QuerySpec, Result,
};
use regex::Regex;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

struct Container {
    rid: String,
    partition_key: PartitionKeySpec,
    // Keyed by (id, serialized partition-key value)
    items: BTreeMap<(String, String), Value>,
}

struct Database {
    rid: String,
    containers: HashMap<String, Container>,
}

#[derive(Default)]
struct State {
    databases: HashMap<String, Database>,
    offers: Vec<Offer>,
    next_rid: usize,
}

impl State {
    fn rid(&mut self) -> String {
        self.next_rid += 1;
        format!("rid-{}", self.next_rid)
    }

    fn container(&self, database_id: &str, container_id: &str) -> Result<&Container> {
        self.databases
            .get(database_id)
            .ok_or_else(|| not_found(database_id))?
            .containers
            .get(container_id)
            .ok_or_else(|| not_found(container_id))
    }

    fn container_mut(&mut self, database_id: &str, container_id: &str) -> Result<&mut Container> {
        self.databases
            .get_mut(database_id)
            .ok_or_else(|| not_found(database_id))?
            .containers
            .get_mut(container_id)
            .ok_or_else(|| not_found(container_id))
    }
}

fn status_error(status: u16, message: impl Into<String>) -> GatewayError {
    CosmosDbError::from_status(status, message.into()).into()
}

fn not_found(resource: &str) -> GatewayError {
    status_error(404, format!("{resource} does not exist"))
}

fn key_of(partition_key: &PartitionKeyValue) -> String {
    partition_key.to_json().to_string()
}

/// Document store keeping everything in process memory
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    provision_offers: bool,
    offer_replace_failure: Mutex<Option<u16>>,
    container_read_failure: Mutex<Option<u16>>,
    failing_deletes: Mutex<HashSet<String>>,
    delete_calls: AtomicUsize,
    offer_replacements: AtomicUsize,
}

impl InMemoryStore {
    /// Store whose new containers get a dedicated 400 RU/s offer
    pub fn new() -> Self {
        Self {
            provision_offers: true,
            ..Default::default()
        }
    }

    /// Store whose containers have no offer of their own
    pub fn serverless() -> Self {
        Self::default()
    }

    /// Adds an offer unrelated to any container
    pub fn add_offer(&self, offer: Offer) {
        self.state.lock().unwrap().offers.push(offer);
    }

    /// Makes every offer replacement fail with `status`
    pub fn fail_offer_replace_with(&self, status: u16) {
        *self.offer_replace_failure.lock().unwrap() = Some(status);
    }

    /// Makes every container read fail with `status`
    pub fn fail_container_read_with(&self, status: u16) {
        *self.container_read_failure.lock().unwrap() = Some(status);
    }

    /// Makes deletes of `item_id` fail with 503
    pub fn fail_delete_of(&self, item_id: &str) {
        self.failing_deletes
            .lock()
            .unwrap()
            .insert(item_id.to_string());
    }

    /// Number of delete calls received, failed ones included
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    /// Number of successful offer replacements
    pub fn offer_replacements(&self) -> usize {
        self.offer_replacements.load(Ordering::SeqCst)
    }

    /// Snapshot of every offer
    pub fn offers(&self) -> Vec<Offer> {
        self.state.lock().unwrap().offers.clone()
    }

    /// Number of items stored in a container
    pub fn item_count(&self, database_id: &str, container_id: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .container(database_id, container_id)
            .map(|c| c.items.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    fn endpoint(&self) -> &str {
        "memory://"
    }

    async fn create_database_if_not_exists(&self, database_id: &str) -> Result<DatabaseDescriptor> {
        let mut state = self.state.lock().unwrap();
        if !state.databases.contains_key(database_id) {
            let rid = state.rid();
            state.databases.insert(
                database_id.to_string(),
                Database {
                    rid,
                    containers: HashMap::new(),
                },
            );
        }
        let database = &state.databases[database_id];
        Ok(DatabaseDescriptor {
            id: database_id.to_string(),
            resource_id: Some(database.rid.clone()),
        })
    }

    async fn read_database(&self, database_id: &str) -> Result<DatabaseDescriptor> {
        let state = self.state.lock().unwrap();
        let database = state
            .databases
            .get(database_id)
            .ok_or_else(|| not_found(database_id))?;
        Ok(DatabaseDescriptor {
            id: database_id.to_string(),
            resource_id: Some(database.rid.clone()),
        })
    }

    async fn create_container_if_not_exists(
        &self,
        database_id: &str,
        container_id: &str,
        partition_key: &PartitionKeySpec,
    ) -> Result<ContainerDescriptor> {
        let mut state = self.state.lock().unwrap();
        if !state.databases.contains_key(database_id) {
            return Err(not_found(database_id));
        }

        let exists = state.databases[database_id]
            .containers
            .contains_key(container_id);
        if !exists {
            let rid = state.rid();
            if self.provision_offers {
                let offer_id = state.rid();
                state.offers.push(Offer {
                    id: offer_id,
                    offer_resource_id: rid.clone(),
                    throughput: Some(400),
                });
            }
            state
                .databases
                .get_mut(database_id)
                .ok_or_else(|| not_found(database_id))?
                .containers
                .insert(
                    container_id.to_string(),
                    Container {
                        rid,
                        partition_key: partition_key.clone(),
                        items: BTreeMap::new(),
                    },
                );
        }

        let container = state.container(database_id, container_id)?;
        Ok(ContainerDescriptor {
            id: container_id.to_string(),
            partition_key: container.partition_key.clone(),
            resource_id: Some(container.rid.clone()),
        })
    }

    async fn read_container(
        &self,
        database_id: &str,
        container_id: &str,
    ) -> Result<ContainerDescriptor> {
        if let Some(status) = *self.container_read_failure.lock().unwrap() {
            return Err(status_error(status, "container read refused"));
        }

        let state = self.state.lock().unwrap();
        let container = state.container(database_id, container_id)?;
        Ok(ContainerDescriptor {
            id: container_id.to_string(),
            partition_key: container.partition_key.clone(),
            resource_id: Some(container.rid.clone()),
        })
    }

    async fn read_offers(&self, _database_id: &str, _container_id: &str) -> Result<Vec<Offer>> {
        Ok(self.state.lock().unwrap().offers.clone())
    }

    async fn replace_offer(
        &self,
        _database_id: &str,
        _container_id: &str,
        offer: &Offer,
    ) -> Result<Offer> {
        if let Some(status) = *self.offer_replace_failure.lock().unwrap() {
            return Err(status_error(status, "offer replacement refused"));
        }

        let mut state = self.state.lock().unwrap();
        let existing = state
            .offers
            .iter_mut()
            .find(|o| o.id == offer.id)
            .ok_or_else(|| not_found(&offer.id))?;
        *existing = offer.clone();
        self.offer_replacements.fetch_add(1, Ordering::SeqCst);
        Ok(offer.clone())
    }

    async fn upsert_item(
        &self,
        database_id: &str,
        container_id: &str,
        partition_key: &PartitionKeyValue,
        item: &Value,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let container = state.container_mut(database_id, container_id)?;
        let id = item
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| status_error(400, "item has no id"))?
            .to_string();

        if let Some(path) = container.partition_key.primary_path() {
            let stored_key = item.pointer(path).map(PartitionKeyValue::from_json);
            if !matches!(stored_key, Some(Ok(ref key)) if key == partition_key) {
                return Err(status_error(
                    400,
                    "partition key supplied does not match the document",
                ));
            }
        }

        container
            .items
            .insert((id, key_of(partition_key)), item.clone());
        Ok(())
    }

    async fn read_item(
        &self,
        database_id: &str,
        container_id: &str,
        item_id: &str,
        partition_key: &PartitionKeyValue,
    ) -> Result<Value> {
        let state = self.state.lock().unwrap();
        let container = state.container(database_id, container_id)?;
        container
            .items
            .get(&(item_id.to_string(), key_of(partition_key)))
            .cloned()
            .ok_or_else(|| not_found(item_id))
    }

    async fn replace_item(
        &self,
        database_id: &str,
        container_id: &str,
        item_id: &str,
        partition_key: &PartitionKeyValue,
        item: &Value,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let container = state.container_mut(database_id, container_id)?;
        let slot = container
            .items
            .get_mut(&(item_id.to_string(), key_of(partition_key)))
            .ok_or_else(|| not_found(item_id))?;
        *slot = item.clone();
        Ok(())
    }

    async fn delete_item(
        &self,
        database_id: &str,
        container_id: &str,
        item_id: &str,
        partition_key: &PartitionKeyValue,
    ) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_deletes.lock().unwrap().contains(item_id) {
            return Err(status_error(503, "service unavailable"));
        }

        let mut state = self.state.lock().unwrap();
        let container = state.container_mut(database_id, container_id)?;
        container
            .items
            .remove(&(item_id.to_string(), key_of(partition_key)))
            .map(|_| ())
            .ok_or_else(|| not_found(item_id))
    }

    async fn query_items(
        &self,
        database_id: &str,
        container_id: &str,
        query: &QuerySpec,
    ) -> Result<Vec<Value>> {
        let parsed = ParsedQuery::parse(query)?;
        let state = self.state.lock().unwrap();
        let container = state.container(database_id, container_id)?;
        let scope = query.partition_key.as_ref().map(key_of);

        Ok(container
            .items
            .iter()
            .filter(|((_, key), _)| scope.as_ref().map_or(true, |s| s == key))
            .map(|(_, item)| item)
            .filter(|item| parsed.matches(item))
            .filter_map(|item| parsed.project(item))
            .collect())
    }
}

struct ParsedQuery {
    projection: Option<String>,
    conditions: Vec<(String, Value)>,
}

impl ParsedQuery {
    fn parse(query: &QuerySpec) -> Result<Self> {
        let shape = Regex::new(
            r"(?i)^\s*SELECT\s+(?:(\*)|VALUE\s+(\w+)\.([\w.]+))\s+FROM\s+(\w+)(?:\s+(\w+))?(?:\s+WHERE\s+(.+?))?\s*$",
        )
        .unwrap();
        let condition = Regex::new(r"^\s*(\w+)\.([\w.]+)\s*=\s*(.+?)\s*$").unwrap();
        let and = Regex::new(r"(?i)\s+AND\s+").unwrap();

        let unsupported = || status_error(400, format!("unsupported query: {}", query.query));
        let caps = shape.captures(&query.query).ok_or_else(unsupported)?;

        let projection = caps.get(3).map(|m| m.as_str().to_string());
        let mut conditions = Vec::new();
        if let Some(filter) = caps.get(6) {
            for clause in and.split(filter.as_str()) {
                let c = condition.captures(clause).ok_or_else(unsupported)?;
                let path = c[2].to_string();
                let operand = &c[3];
                let value = if operand.starts_with('@') {
                    query
                        .parameter(operand)
                        .cloned()
                        .ok_or_else(|| status_error(400, format!("unbound parameter {operand}")))?
                } else if let Some(literal) = operand
                    .strip_prefix('\'')
                    .and_then(|s| s.strip_suffix('\''))
                {
                    Value::String(literal.to_string())
                } else {
                    serde_json::from_str(operand).map_err(|_| unsupported())?
                };
                conditions.push((path, value));
            }
        }

        Ok(Self {
            projection,
            conditions,
        })
    }

    fn lookup<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
        path.split('.').try_fold(item, |value, key| value.get(key))
    }

    fn matches(&self, item: &Value) -> bool {
        self.conditions
            .iter()
            .all(|(path, expected)| Self::lookup(item, path) == Some(expected))
    }

    fn project(&self, item: &Value) -> Option<Value> {
        match &self.projection {
            None => Some(item.clone()),
            Some(path) => Self::lookup(item, path).cloned(),
        }
    }
}
