//! Authentication flow handlers.
//!
//! All of these are single-call forwarders scoped to an auth collection
//! (default `users`). `authenticate_user` is the one with extra shaping: an
//! `isAdmin` call targets the `_superusers` collection and may fall back to
//! the process-configured admin credentials.

use crate::client::PocketBase;
use crate::error::ToolError;
use crate::mcp::core::{PocketBaseMcpServer, ToolResult};
use serde_json::{Value, json};

use super::{auth_collection, optional_str, require_str};

/// Collection used for elevated authentication.
const SUPERUSERS_COLLECTION: &str = "_superusers";

/// Handle auth method listing.
pub async fn handle_list_auth_methods<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let collection = auth_collection(&arguments);

    let methods = server
        .client
        .list_auth_methods(collection)
        .await
        .map_err(|e| ToolError::backend("Failed to list auth methods", e))?;
    ToolResult::json(&methods)
}

/// Handle password authentication, including the elevated `isAdmin` path.
pub async fn handle_authenticate_user<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let is_admin = arguments
        .get("isAdmin")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let collection = if is_admin {
        SUPERUSERS_COLLECTION
    } else {
        auth_collection(&arguments)
    };

    // Elevated calls without explicit credentials fall back to the
    // process-configured admin account.
    let fallback = if is_admin {
        server.admin_credentials.as_ref()
    } else {
        None
    };
    let email = optional_str(&arguments, "email")
        .map(str::to_string)
        .or_else(|| fallback.map(|c| c.email.clone()));
    let password = optional_str(&arguments, "password")
        .map(str::to_string)
        .or_else(|| fallback.map(|c| c.password.clone()));

    let (Some(email), Some(password)) = (email, password) else {
        return Err(ToolError::InvalidParams(
            "Email and password are required for authentication".into(),
        ));
    };

    let auth_data = server
        .client
        .auth_with_password(collection, &email, &password)
        .await
        .map_err(|e| ToolError::backend("Authentication failed", e))?;
    ToolResult::json(&auth_data)
}

/// Handle OAuth2 code exchange.
pub async fn handle_authenticate_with_oauth2<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let provider = require_str(&arguments, "provider")?;
    let code = require_str(&arguments, "code")?;
    let code_verifier = require_str(&arguments, "codeVerifier")?;
    let redirect_url = require_str(&arguments, "redirectUrl")?;
    let collection = auth_collection(&arguments);

    let auth_data = server
        .client
        .auth_with_oauth2(collection, provider, code, code_verifier, redirect_url)
        .await
        .map_err(|e| ToolError::backend("OAuth2 authentication failed", e))?;
    ToolResult::json(&auth_data)
}

/// Handle one-time-password authentication.
pub async fn handle_authenticate_with_otp<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let email = require_str(&arguments, "email")?;
    let collection = auth_collection(&arguments);

    let result = server
        .client
        .auth_with_otp(collection, email)
        .await
        .map_err(|e| ToolError::backend("OTP authentication failed", e))?;
    ToolResult::json(&json!({"success": result}))
}

/// Handle session token refresh.
pub async fn handle_auth_refresh<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let collection = auth_collection(&arguments);

    let auth_data = server
        .client
        .auth_refresh(collection)
        .await
        .map_err(|e| ToolError::backend("Auth refresh failed", e))?;
    ToolResult::json(&auth_data)
}

/// Handle email verification request.
pub async fn handle_request_verification<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let email = require_str(&arguments, "email")?;
    let collection = auth_collection(&arguments);

    let result = server
        .client
        .request_verification(collection, email)
        .await
        .map_err(|e| ToolError::backend("Verification request failed", e))?;
    ToolResult::json(&json!({"success": result}))
}

/// Handle email verification confirmation.
pub async fn handle_confirm_verification<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let token = require_str(&arguments, "token")?;
    let collection = auth_collection(&arguments);

    let result = server
        .client
        .confirm_verification(collection, token)
        .await
        .map_err(|e| ToolError::backend("Verification confirmation failed", e))?;
    ToolResult::json(&json!({"success": result}))
}

/// Handle password reset request.
pub async fn handle_request_password_reset<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let email = require_str(&arguments, "email")?;
    let collection = auth_collection(&arguments);

    let result = server
        .client
        .request_password_reset(collection, email)
        .await
        .map_err(|e| ToolError::backend("Password reset request failed", e))?;
    ToolResult::json(&json!({"success": result}))
}

/// Handle password reset confirmation.
pub async fn handle_confirm_password_reset<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let token = require_str(&arguments, "token")?;
    let password = require_str(&arguments, "password")?;
    let password_confirm = require_str(&arguments, "passwordConfirm")?;
    let collection = auth_collection(&arguments);

    let result = server
        .client
        .confirm_password_reset(collection, token, password, password_confirm)
        .await
        .map_err(|e| ToolError::backend("Password reset confirmation failed", e))?;
    ToolResult::json(&json!({"success": result}))
}

/// Handle email change request.
pub async fn handle_request_email_change<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let new_email = require_str(&arguments, "newEmail")?;
    let collection = auth_collection(&arguments);

    let result = server
        .client
        .request_email_change(collection, new_email)
        .await
        .map_err(|e| ToolError::backend("Email change request failed", e))?;
    ToolResult::json(&json!({"success": result}))
}

/// Handle email change confirmation.
pub async fn handle_confirm_email_change<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let token = require_str(&arguments, "token")?;
    let password = require_str(&arguments, "password")?;
    let collection = auth_collection(&arguments);

    let auth_data = server
        .client
        .confirm_email_change(collection, token, password)
        .await
        .map_err(|e| ToolError::backend("Email change confirmation failed", e))?;
    ToolResult::json(&auth_data)
}

/// Handle user impersonation (admin only).
pub async fn handle_impersonate_user<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let user_id = require_str(&arguments, "userId")?;
    let collection = auth_collection(&arguments);

    let auth_data = server
        .client
        .impersonate(collection, user_id)
        .await
        .map_err(|e| ToolError::backend("User impersonation failed", e))?;
    ToolResult::json(&auth_data)
}

/// Handle user account creation.
pub async fn handle_create_user<C: PocketBase + Send + Sync>(
    server: &PocketBaseMcpServer<C>,
    arguments: Value,
) -> Result<ToolResult, ToolError> {
    let email = require_str(&arguments, "email")?;
    let password = require_str(&arguments, "password")?;
    let password_confirm = require_str(&arguments, "passwordConfirm")?;
    let name = optional_str(&arguments, "name");
    let collection = auth_collection(&arguments);

    let mut data = json!({
        "email": email,
        "password": password,
        "passwordConfirm": password_confirm,
    });
    if let (Some(obj), Some(name)) = (data.as_object_mut(), name) {
        obj.insert("name".to_string(), json!(name));
    }

    let record = server
        .client
        .create_record(collection, data)
        .await
        .map_err(|e| ToolError::backend("Failed to create user", e))?;
    ToolResult::json(&record)
}
