//! reqwest-based client for a live PocketBase instance.

use crate::client::{ClientError, PocketBase};
use crate::model::{CollectionModel, CollectionUpdate, FieldSchema, ListOptions, RecordPage};
use log::debug;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::RwLock;

/// Page size used when reading a full record list.
const FULL_LIST_PAGE_SIZE: u32 = 200;

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct CollectionPage {
    items: Vec<CollectionModel>,
}

/// HTTP client for the PocketBase REST API.
///
/// Holds the session token produced by the auth flows and attaches it as the
/// `Authorization` header on every request. The token is process-scoped
/// mutable state: auth-flow methods replace it, everything else reads it.
pub struct HttpPocketBase {
    http: reqwest::Client,
    base_url: String,
    auth_token: RwLock<Option<String>>,
}

impl HttpPocketBase {
    /// Create a client for the PocketBase instance at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: RwLock::new(None),
        })
    }

    /// The session token currently held, if any.
    pub async fn auth_token(&self) -> Option<String> {
        self.auth_token.read().await.clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<Value, ClientError> {
        let token = self.auth_token.read().await.clone();
        let builder = match token {
            Some(token) => builder.header("Authorization", token),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or(body);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let value = self.send(builder).await?;
        serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Retain the session token from an auth response, when present.
    async fn store_token(&self, auth_data: &Value) {
        if let Some(token) = auth_data.get("token").and_then(Value::as_str) {
            debug!("retaining new session token");
            *self.auth_token.write().await = Some(token.to_string());
        }
    }

    fn record_list_request(
        &self,
        collection: &str,
        page: u32,
        per_page: u32,
        options: &ListOptions,
    ) -> reqwest::RequestBuilder {
        let mut query: Vec<(&str, String)> = vec![
            ("page", page.to_string()),
            ("perPage", per_page.to_string()),
        ];
        if let Some(filter) = &options.filter {
            query.push(("filter", filter.clone()));
        }
        if let Some(sort) = &options.sort {
            query.push(("sort", sort.clone()));
        }
        if let Some(expand) = &options.expand {
            query.push(("expand", expand.clone()));
        }

        self.http
            .get(self.url(&format!("/api/collections/{collection}/records")))
            .query(&query)
    }
}

impl PocketBase for HttpPocketBase {
    type Error = ClientError;

    async fn create_collection(
        &self,
        name: &str,
        schema: Vec<FieldSchema>,
    ) -> Result<CollectionModel, ClientError> {
        self.decode(
            self.http
                .post(self.url("/api/collections"))
                .json(&json!({"name": name, "schema": schema})),
        )
        .await
    }

    async fn get_collection(&self, id_or_name: &str) -> Result<CollectionModel, ClientError> {
        self.decode(
            self.http
                .get(self.url(&format!("/api/collections/{id_or_name}"))),
        )
        .await
    }

    async fn list_collections(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<CollectionModel>, ClientError> {
        let page: CollectionPage = self
            .decode(self.http.get(self.url("/api/collections")).query(&[
                ("page", page.to_string()),
                ("perPage", per_page.to_string()),
            ]))
            .await?;
        Ok(page.items)
    }

    async fn update_collection(
        &self,
        id_or_name: &str,
        changes: CollectionUpdate,
    ) -> Result<CollectionModel, ClientError> {
        self.decode(
            self.http
                .patch(self.url(&format!("/api/collections/{id_or_name}")))
                .json(&changes),
        )
        .await
    }

    async fn delete_collection(&self, id_or_name: &str) -> Result<(), ClientError> {
        self.send(
            self.http
                .delete(self.url(&format!("/api/collections/{id_or_name}"))),
        )
        .await?;
        Ok(())
    }

    async fn create_record(&self, collection: &str, data: Value) -> Result<Value, ClientError> {
        self.send(
            self.http
                .post(self.url(&format!("/api/collections/{collection}/records")))
                .json(&data),
        )
        .await
    }

    async fn list_records(
        &self,
        collection: &str,
        page: u32,
        per_page: u32,
        options: &ListOptions,
    ) -> Result<RecordPage, ClientError> {
        let value = self
            .send(self.record_list_request(collection, page, per_page, options))
            .await?;
        serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn full_record_list(&self, collection: &str) -> Result<Vec<Value>, ClientError> {
        let mut records = Vec::new();
        let mut page = 1;
        loop {
            let result = self
                .list_records(collection, page, FULL_LIST_PAGE_SIZE, &ListOptions::default())
                .await?;
            let fetched = result.items.len();
            records.extend(result.items);
            if fetched < FULL_LIST_PAGE_SIZE as usize || records.len() as u64 >= result.total_items
            {
                break;
            }
            page += 1;
        }
        Ok(records)
    }

    async fn update_record(
        &self,
        collection: &str,
        id: &str,
        data: Value,
    ) -> Result<Value, ClientError> {
        self.send(
            self.http
                .patch(self.url(&format!("/api/collections/{collection}/records/{id}")))
                .json(&data),
        )
        .await
    }

    async fn delete_record(&self, collection: &str, id: &str) -> Result<(), ClientError> {
        self.send(
            self.http
                .delete(self.url(&format!("/api/collections/{collection}/records/{id}"))),
        )
        .await?;
        Ok(())
    }

    async fn list_auth_methods(&self, collection: &str) -> Result<Value, ClientError> {
        self.send(
            self.http
                .get(self.url(&format!("/api/collections/{collection}/auth-methods"))),
        )
        .await
    }

    async fn auth_with_password(
        &self,
        collection: &str,
        identity: &str,
        password: &str,
    ) -> Result<Value, ClientError> {
        let auth_data = self
            .send(
                self.http
                    .post(self.url(&format!(
                        "/api/collections/{collection}/auth-with-password"
                    )))
                    .json(&json!({"identity": identity, "password": password})),
            )
            .await?;
        self.store_token(&auth_data).await;
        Ok(auth_data)
    }

    async fn auth_with_oauth2(
        &self,
        collection: &str,
        provider: &str,
        code: &str,
        code_verifier: &str,
        redirect_url: &str,
    ) -> Result<Value, ClientError> {
        let auth_data = self
            .send(
                self.http
                    .post(self.url(&format!("/api/collections/{collection}/auth-with-oauth2")))
                    .json(&json!({
                        "provider": provider,
                        "code": code,
                        "codeVerifier": code_verifier,
                        "redirectUrl": redirect_url,
                    })),
            )
            .await?;
        self.store_token(&auth_data).await;
        Ok(auth_data)
    }

    async fn auth_with_otp(&self, collection: &str, email: &str) -> Result<Value, ClientError> {
        self.send(
            self.http
                .post(self.url(&format!("/api/collections/{collection}/request-otp")))
                .json(&json!({"email": email})),
        )
        .await
    }

    async fn auth_refresh(&self, collection: &str) -> Result<Value, ClientError> {
        let auth_data = self
            .send(
                self.http
                    .post(self.url(&format!("/api/collections/{collection}/auth-refresh"))),
            )
            .await?;
        self.store_token(&auth_data).await;
        Ok(auth_data)
    }

    async fn request_verification(&self, collection: &str, email: &str) -> Result<bool, ClientError> {
        self.send(
            self.http
                .post(self.url(&format!(
                    "/api/collections/{collection}/request-verification"
                )))
                .json(&json!({"email": email})),
        )
        .await?;
        Ok(true)
    }

    async fn confirm_verification(&self, collection: &str, token: &str) -> Result<bool, ClientError> {
        self.send(
            self.http
                .post(self.url(&format!(
                    "/api/collections/{collection}/confirm-verification"
                )))
                .json(&json!({"token": token})),
        )
        .await?;
        Ok(true)
    }

    async fn request_password_reset(
        &self,
        collection: &str,
        email: &str,
    ) -> Result<bool, ClientError> {
        self.send(
            self.http
                .post(self.url(&format!(
                    "/api/collections/{collection}/request-password-reset"
                )))
                .json(&json!({"email": email})),
        )
        .await?;
        Ok(true)
    }

    async fn confirm_password_reset(
        &self,
        collection: &str,
        token: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<bool, ClientError> {
        self.send(
            self.http
                .post(self.url(&format!(
                    "/api/collections/{collection}/confirm-password-reset"
                )))
                .json(&json!({
                    "token": token,
                    "password": password,
                    "passwordConfirm": password_confirm,
                })),
        )
        .await?;
        Ok(true)
    }

    async fn request_email_change(
        &self,
        collection: &str,
        new_email: &str,
    ) -> Result<bool, ClientError> {
        self.send(
            self.http
                .post(self.url(&format!(
                    "/api/collections/{collection}/request-email-change"
                )))
                .json(&json!({"newEmail": new_email})),
        )
        .await?;
        Ok(true)
    }

    async fn confirm_email_change(
        &self,
        collection: &str,
        token: &str,
        password: &str,
    ) -> Result<Value, ClientError> {
        self.send(
            self.http
                .post(self.url(&format!(
                    "/api/collections/{collection}/confirm-email-change"
                )))
                .json(&json!({"token": token, "password": password})),
        )
        .await
    }

    async fn impersonate(&self, collection: &str, user_id: &str) -> Result<Value, ClientError> {
        // The impersonated session is returned to the caller but deliberately
        // not retained; the admin session stays active.
        self.send(
            self.http
                .post(self.url(&format!(
                    "/api/collections/{collection}/impersonate/{user_id}"
                )))
                .json(&json!({})),
        )
        .await
    }
}
