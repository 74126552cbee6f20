//! In-memory PocketBase client for tests and local development.
//!
//! Implements the full [`PocketBase`] trait against process-local state so
//! the tool layer can be exercised without a running backend. Collection and
//! record semantics follow the real API where the tool layer can observe
//! them: unique collection names, sequential ids, merge-style record updates,
//! page/perPage listing, and sort expressions (`field` ascending, `-field`
//! descending, comma-separated). `filter` and `expand` are accepted and
//! ignored; filtering is a backend concern this double does not model.
//!
//! Auth flows return canned payloads that echo the collection they were
//! scoped to, so tests can assert default substitution and forwarding.

use crate::client::{ClientError, PocketBase};
use crate::model::{CollectionModel, CollectionUpdate, FieldSchema, ListOptions, RecordPage};
use serde_json::{Value, json};
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct State {
    collections: Vec<StoredCollection>,
    next_collection_id: u64,
    next_record_id: u64,
    record_create_failure: Option<CreateFailure>,
}

struct StoredCollection {
    model: CollectionModel,
    records: Vec<Value>,
}

struct CreateFailure {
    collection_prefix: String,
    remaining: usize,
}

/// Thread-safe in-memory backend double.
#[derive(Clone, Default)]
pub struct InMemoryPocketBase {
    state: Arc<RwLock<State>>,
}

impl InMemoryPocketBase {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arrange for record creation into collections whose name starts with
    /// `collection_prefix` to fail after `after` successful creates.
    pub async fn fail_record_creates(&self, collection_prefix: &str, after: usize) {
        let mut state = self.state.write().await;
        state.record_create_failure = Some(CreateFailure {
            collection_prefix: collection_prefix.to_string(),
            remaining: after,
        });
    }

    /// Names of all collections, in creation order.
    pub async fn collection_names(&self) -> Vec<String> {
        let state = self.state.read().await;
        state
            .collections
            .iter()
            .map(|c| c.model.name.clone())
            .collect()
    }

    /// Number of records in a collection, if it exists.
    pub async fn record_count(&self, collection: &str) -> Option<usize> {
        let state = self.state.read().await;
        state
            .collections
            .iter()
            .find(|c| c.model.name == collection)
            .map(|c| c.records.len())
    }
}

impl State {
    fn find(&self, id_or_name: &str) -> Result<&StoredCollection, ClientError> {
        self.collections
            .iter()
            .find(|c| c.model.name == id_or_name || c.model.id == id_or_name)
            .ok_or_else(|| ClientError::not_found(format!("collection '{id_or_name}'")))
    }

    fn find_mut(&mut self, id_or_name: &str) -> Result<&mut StoredCollection, ClientError> {
        self.collections
            .iter_mut()
            .find(|c| c.model.name == id_or_name || c.model.id == id_or_name)
            .ok_or_else(|| ClientError::not_found(format!("collection '{id_or_name}'")))
    }
}

fn sorted_records(records: &[Value], sort: Option<&str>) -> Vec<Value> {
    let mut items: Vec<Value> = records.to_vec();
    let Some(sort) = sort else {
        return items;
    };

    // Apply sort keys right to left so the first key has highest priority.
    for key in sort.split(',').rev() {
        let key = key.trim();
        let (field, descending) = match key.strip_prefix('-') {
            Some(field) => (field, true),
            None => (key, false),
        };
        if field.is_empty() {
            continue;
        }
        items.sort_by(|a, b| {
            let ordering = compare_field(a.get(field), b.get(field));
            if descending { ordering.reverse() } else { ordering }
        });
    }
    items
}

fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

impl PocketBase for InMemoryPocketBase {
    type Error = ClientError;

    async fn create_collection(
        &self,
        name: &str,
        schema: Vec<FieldSchema>,
    ) -> Result<CollectionModel, ClientError> {
        let mut state = self.state.write().await;
        if state.collections.iter().any(|c| c.model.name == name) {
            return Err(ClientError::Api {
                status: 400,
                message: format!("collection name '{name}' must be unique"),
            });
        }

        state.next_collection_id += 1;
        let model = CollectionModel {
            id: format!("col{:04}", state.next_collection_id),
            name: name.to_string(),
            schema,
            indexes: Vec::new(),
        };
        state.collections.push(StoredCollection {
            model: model.clone(),
            records: Vec::new(),
        });
        Ok(model)
    }

    async fn get_collection(&self, id_or_name: &str) -> Result<CollectionModel, ClientError> {
        let state = self.state.read().await;
        Ok(state.find(id_or_name)?.model.clone())
    }

    async fn list_collections(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<CollectionModel>, ClientError> {
        let state = self.state.read().await;
        let offset = (page.max(1) as usize - 1) * per_page as usize;
        Ok(state
            .collections
            .iter()
            .skip(offset)
            .take(per_page as usize)
            .map(|c| c.model.clone())
            .collect())
    }

    async fn update_collection(
        &self,
        id_or_name: &str,
        changes: CollectionUpdate,
    ) -> Result<CollectionModel, ClientError> {
        let mut state = self.state.write().await;
        let collection = state.find_mut(id_or_name)?;
        if let Some(name) = changes.name {
            collection.model.name = name;
        }
        if let Some(schema) = changes.schema {
            collection.model.schema = schema;
        }
        if let Some(indexes) = changes.indexes {
            collection.model.indexes = indexes;
        }
        Ok(collection.model.clone())
    }

    async fn delete_collection(&self, id_or_name: &str) -> Result<(), ClientError> {
        let mut state = self.state.write().await;
        let before = state.collections.len();
        state
            .collections
            .retain(|c| c.model.name != id_or_name && c.model.id != id_or_name);
        if state.collections.len() == before {
            return Err(ClientError::not_found(format!("collection '{id_or_name}'")));
        }
        Ok(())
    }

    async fn create_record(&self, collection: &str, data: Value) -> Result<Value, ClientError> {
        let mut state = self.state.write().await;

        if let Some(failure) = &mut state.record_create_failure {
            if collection.starts_with(&failure.collection_prefix) {
                if failure.remaining == 0 {
                    return Err(ClientError::Api {
                        status: 400,
                        message: format!("record create rejected in '{collection}'"),
                    });
                }
                failure.remaining -= 1;
            }
        }

        let mut record = match data {
            Value::Object(map) => map,
            _ => {
                return Err(ClientError::Api {
                    status: 400,
                    message: "record data must be an object".to_string(),
                });
            }
        };

        state.next_record_id += 1;
        if !record.contains_key("id") {
            record.insert("id".to_string(), json!(format!("rec{:05}", state.next_record_id)));
        }
        let record = Value::Object(record);

        let stored = state.find_mut(collection)?;
        stored.records.push(record.clone());
        Ok(record)
    }

    async fn list_records(
        &self,
        collection: &str,
        page: u32,
        per_page: u32,
        options: &ListOptions,
    ) -> Result<RecordPage, ClientError> {
        let state = self.state.read().await;
        let stored = state.find(collection)?;

        let sorted = sorted_records(&stored.records, options.sort.as_deref());
        let total_items = sorted.len() as u64;
        let page = page.max(1);
        let per_page = per_page.max(1);
        let offset = (page as usize - 1) * per_page as usize;
        let items: Vec<Value> = sorted
            .into_iter()
            .skip(offset)
            .take(per_page as usize)
            .collect();

        Ok(RecordPage {
            page,
            per_page,
            total_items,
            total_pages: total_items.div_ceil(per_page as u64) as u32,
            items,
        })
    }

    async fn full_record_list(&self, collection: &str) -> Result<Vec<Value>, ClientError> {
        let state = self.state.read().await;
        Ok(state.find(collection)?.records.clone())
    }

    async fn update_record(
        &self,
        collection: &str,
        id: &str,
        data: Value,
    ) -> Result<Value, ClientError> {
        let mut state = self.state.write().await;
        let stored = state.find_mut(collection)?;
        let record = stored
            .records
            .iter_mut()
            .find(|r| r.get("id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| ClientError::not_found(format!("record '{id}'")))?;

        if let (Value::Object(existing), Value::Object(changes)) = (&mut *record, data) {
            for (key, value) in changes {
                if key != "id" {
                    existing.insert(key, value);
                }
            }
        }
        Ok(record.clone())
    }

    async fn delete_record(&self, collection: &str, id: &str) -> Result<(), ClientError> {
        let mut state = self.state.write().await;
        let stored = state.find_mut(collection)?;
        let before = stored.records.len();
        stored
            .records
            .retain(|r| r.get("id").and_then(Value::as_str) != Some(id));
        if stored.records.len() == before {
            return Err(ClientError::not_found(format!("record '{id}'")));
        }
        Ok(())
    }

    async fn list_auth_methods(&self, collection: &str) -> Result<Value, ClientError> {
        let state = self.state.read().await;
        state.find(collection)?;
        Ok(json!({
            "collection": collection,
            "password": {"enabled": true, "identityFields": ["email"]},
            "oauth2": {"enabled": false, "providers": []},
            "otp": {"enabled": false},
            "mfa": {"enabled": false},
        }))
    }

    async fn auth_with_password(
        &self,
        collection: &str,
        identity: &str,
        password: &str,
    ) -> Result<Value, ClientError> {
        let state = self.state.read().await;
        let stored = state.find(collection)?;
        let record = stored.records.iter().find(|r| {
            r.get("email").and_then(Value::as_str) == Some(identity)
                && r.get("password").and_then(Value::as_str) == Some(password)
        });
        match record {
            Some(record) => Ok(json!({
                "token": format!("inmem-token-{identity}"),
                "record": record,
                "collection": collection,
            })),
            None => Err(ClientError::Api {
                status: 400,
                message: "Failed to authenticate.".to_string(),
            }),
        }
    }

    async fn auth_with_oauth2(
        &self,
        collection: &str,
        provider: &str,
        _code: &str,
        _code_verifier: &str,
        _redirect_url: &str,
    ) -> Result<Value, ClientError> {
        let state = self.state.read().await;
        state.find(collection)?;
        Ok(json!({
            "token": format!("inmem-oauth2-{provider}"),
            "meta": {"provider": provider},
            "collection": collection,
        }))
    }

    async fn auth_with_otp(&self, collection: &str, email: &str) -> Result<Value, ClientError> {
        let state = self.state.read().await;
        state.find(collection)?;
        Ok(json!({"otpId": format!("otp-{email}"), "collection": collection}))
    }

    async fn auth_refresh(&self, collection: &str) -> Result<Value, ClientError> {
        let state = self.state.read().await;
        state.find(collection)?;
        Ok(json!({"token": "inmem-refreshed-token", "collection": collection}))
    }

    async fn request_verification(&self, collection: &str, _email: &str) -> Result<bool, ClientError> {
        let state = self.state.read().await;
        state.find(collection)?;
        Ok(true)
    }

    async fn confirm_verification(&self, collection: &str, _token: &str) -> Result<bool, ClientError> {
        let state = self.state.read().await;
        state.find(collection)?;
        Ok(true)
    }

    async fn request_password_reset(
        &self,
        collection: &str,
        _email: &str,
    ) -> Result<bool, ClientError> {
        let state = self.state.read().await;
        state.find(collection)?;
        Ok(true)
    }

    async fn confirm_password_reset(
        &self,
        collection: &str,
        _token: &str,
        _password: &str,
        _password_confirm: &str,
    ) -> Result<bool, ClientError> {
        let state = self.state.read().await;
        state.find(collection)?;
        Ok(true)
    }

    async fn request_email_change(
        &self,
        collection: &str,
        _new_email: &str,
    ) -> Result<bool, ClientError> {
        let state = self.state.read().await;
        state.find(collection)?;
        Ok(true)
    }

    async fn confirm_email_change(
        &self,
        collection: &str,
        _token: &str,
        _password: &str,
    ) -> Result<Value, ClientError> {
        let state = self.state.read().await;
        state.find(collection)?;
        Ok(json!({"token": "inmem-token", "collection": collection}))
    }

    async fn impersonate(&self, collection: &str, user_id: &str) -> Result<Value, ClientError> {
        let state = self.state.read().await;
        let stored = state.find(collection)?;
        let record = stored
            .records
            .iter()
            .find(|r| r.get("id").and_then(Value::as_str) == Some(user_id))
            .ok_or_else(|| ClientError::not_found(format!("record '{user_id}'")))?;
        Ok(json!({
            "token": format!("inmem-impersonate-{user_id}"),
            "record": record,
            "collection": collection,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn collection_names_are_unique() {
        let backend = InMemoryPocketBase::new();
        backend.create_collection("posts", Vec::new()).await.unwrap();
        let err = backend
            .create_collection("posts", Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 400, .. }));
    }

    #[tokio::test]
    async fn record_crud_round_trip() {
        let backend = InMemoryPocketBase::new();
        backend.create_collection("posts", Vec::new()).await.unwrap();

        let created = backend
            .create_record("posts", json!({"title": "first"}))
            .await
            .unwrap();
        let id = created.get("id").and_then(Value::as_str).unwrap().to_string();

        let updated = backend
            .update_record("posts", &id, json!({"title": "second"}))
            .await
            .unwrap();
        assert_eq!(updated["title"], json!("second"));
        assert_eq!(updated["id"], json!(id.clone()));

        backend.delete_record("posts", &id).await.unwrap();
        assert_eq!(backend.record_count("posts").await, Some(0));

        let err = backend.delete_record("posts", &id).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn listing_applies_sort_and_pagination() {
        let backend = InMemoryPocketBase::new();
        backend.create_collection("nums", Vec::new()).await.unwrap();
        for n in [3, 1, 2] {
            backend
                .create_record("nums", json!({"n": n}))
                .await
                .unwrap();
        }

        let options = ListOptions {
            sort: Some("-n".to_string()),
            ..ListOptions::default()
        };
        let page = backend.list_records("nums", 1, 2, &options).await.unwrap();
        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items[0]["n"], json!(3));
        assert_eq!(page.items[1]["n"], json!(2));

        let page2 = backend.list_records("nums", 2, 2, &options).await.unwrap();
        assert_eq!(page2.items.len(), 1);
        assert_eq!(page2.items[0]["n"], json!(1));
    }

    #[tokio::test]
    async fn rename_keeps_records() {
        let backend = InMemoryPocketBase::new();
        backend.create_collection("old", Vec::new()).await.unwrap();
        backend
            .create_record("old", json!({"x": 1}))
            .await
            .unwrap();

        let renamed = backend
            .update_collection("old", CollectionUpdate::rename("new"))
            .await
            .unwrap();
        assert_eq!(renamed.name, "new");
        assert_eq!(backend.record_count("new").await, Some(1));
        assert!(backend.get_collection("old").await.is_err());
    }

    #[tokio::test]
    async fn create_failure_injection_counts_successes() {
        let backend = InMemoryPocketBase::new();
        backend.create_collection("items", Vec::new()).await.unwrap();
        backend.fail_record_creates("items", 1).await;

        backend
            .create_record("items", json!({"n": 1}))
            .await
            .unwrap();
        let err = backend
            .create_record("items", json!({"n": 2}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("record create rejected"));
        assert_eq!(backend.record_count("items").await, Some(1));
    }
}
