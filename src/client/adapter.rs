//! The backend adapter trait.

use crate::model::{CollectionModel, CollectionUpdate, FieldSchema, ListOptions, RecordPage};
use serde_json::Value;
use std::future::Future;

/// Client interface to a PocketBase backend.
///
/// Implementations own all network and session state. Every method maps to a
/// single backend endpoint except [`full_record_list`](Self::full_record_list),
/// which pages internally until the collection is exhausted.
///
/// Auth-flow methods mutate the implementation's session token as the backend
/// dictates; all other methods only read it. Callers must not issue two auth
/// operations concurrently and expect a particular final session state;
/// serializing auth calls is the caller's responsibility.
pub trait PocketBase {
    /// Error type returned by all client operations.
    type Error: std::error::Error + Send + Sync + 'static;

    // --- collection administration ---

    /// Create a collection with the given name and field schema.
    fn create_collection(
        &self,
        name: &str,
        schema: Vec<FieldSchema>,
    ) -> impl Future<Output = Result<CollectionModel, Self::Error>> + Send;

    /// Fetch one collection by id or name.
    fn get_collection(
        &self,
        id_or_name: &str,
    ) -> impl Future<Output = Result<CollectionModel, Self::Error>> + Send;

    /// List collections, one page at a time.
    fn list_collections(
        &self,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<Vec<CollectionModel>, Self::Error>> + Send;

    /// Apply a partial update to a collection (rename, schema or index set
    /// replacement). Returns the updated descriptor.
    fn update_collection(
        &self,
        id_or_name: &str,
        changes: CollectionUpdate,
    ) -> impl Future<Output = Result<CollectionModel, Self::Error>> + Send;

    /// Delete a collection by id or name.
    fn delete_collection(
        &self,
        id_or_name: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    // --- record operations ---

    /// Create a record in a collection.
    fn create_record(
        &self,
        collection: &str,
        data: Value,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;

    /// List one page of records, with optional filter/sort/expand shaping
    /// applied server-side.
    fn list_records(
        &self,
        collection: &str,
        page: u32,
        per_page: u32,
        options: &ListOptions,
    ) -> impl Future<Output = Result<RecordPage, Self::Error>> + Send;

    /// Read every record of a collection, paginating internally.
    fn full_record_list(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<Vec<Value>, Self::Error>> + Send;

    /// Update a record by id.
    fn update_record(
        &self,
        collection: &str,
        id: &str,
        data: Value,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;

    /// Delete a record by id.
    fn delete_record(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    // --- authentication flows ---

    /// List the authentication methods enabled for an auth collection.
    fn list_auth_methods(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;

    /// Authenticate with identity (email) and password. On success the
    /// session token is retained for subsequent calls.
    fn auth_with_password(
        &self,
        collection: &str,
        identity: &str,
        password: &str,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;

    /// Exchange an OAuth2 authorization code for a session.
    fn auth_with_oauth2(
        &self,
        collection: &str,
        provider: &str,
        code: &str,
        code_verifier: &str,
        redirect_url: &str,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;

    /// Request a one-time password for the given email.
    fn auth_with_otp(
        &self,
        collection: &str,
        email: &str,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;

    /// Refresh the current session token.
    fn auth_refresh(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;

    /// Send an email-verification message.
    fn request_verification(
        &self,
        collection: &str,
        email: &str,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Confirm email verification with a token.
    fn confirm_verification(
        &self,
        collection: &str,
        token: &str,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Send a password-reset message.
    fn request_password_reset(
        &self,
        collection: &str,
        email: &str,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Confirm a password reset with a token and new password.
    fn confirm_password_reset(
        &self,
        collection: &str,
        token: &str,
        password: &str,
        password_confirm: &str,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Request an email change for the authenticated record.
    fn request_email_change(
        &self,
        collection: &str,
        new_email: &str,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Confirm an email change with a token and the current password.
    fn confirm_email_change(
        &self,
        collection: &str,
        token: &str,
        password: &str,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;

    /// Issue an auth session for another user (admin only). The returned
    /// session is not retained; the caller's own session stays active.
    fn impersonate(
        &self,
        collection: &str,
        user_id: &str,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;
}
