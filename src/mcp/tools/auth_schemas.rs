//! Authentication flow tool schemas.
//!
//! Every auth tool is scoped to an auth collection, defaulting to `users`.
//! `authenticate_user` additionally supports elevated authentication against
//! the `_superusers` collection, falling back to configured admin
//! credentials when none are supplied.

use serde_json::{Value, json};

/// Schema definition for the auth method listing tool.
pub fn list_auth_methods_tool() -> Value {
    json!({
        "name": "list_auth_methods",
        "description": "List all available authentication methods",
        "inputSchema": {
            "type": "object",
            "properties": {
                "collection": {
                    "type": "string",
                    "description": "Collection name (default: users)",
                    "default": "users"
                }
            }
        }
    })
}

/// Schema definition for the password authentication tool.
pub fn authenticate_user_tool() -> Value {
    json!({
        "name": "authenticate_user",
        "description": "Authenticate a user with email and password",
        "inputSchema": {
            "type": "object",
            "properties": {
                "email": {
                    "type": "string",
                    "description": "User email"
                },
                "password": {
                    "type": "string",
                    "description": "User password"
                },
                "collection": {
                    "type": "string",
                    "description": "Collection name (default: users)",
                    "default": "users"
                },
                "isAdmin": {
                    "type": "boolean",
                    "description": "Whether to authenticate as an admin (uses _superusers collection)",
                    "default": false
                }
            },
            "required": ["email", "password"]
        }
    })
}

/// Schema definition for the OAuth2 authentication tool.
pub fn authenticate_with_oauth2_tool() -> Value {
    json!({
        "name": "authenticate_with_oauth2",
        "description": "Authenticate a user with OAuth2",
        "inputSchema": {
            "type": "object",
            "properties": {
                "provider": {
                    "type": "string",
                    "description": "OAuth2 provider name (e.g., google, facebook, github)"
                },
                "code": {
                    "type": "string",
                    "description": "The authorization code returned from the OAuth2 provider"
                },
                "codeVerifier": {
                    "type": "string",
                    "description": "PKCE code verifier"
                },
                "redirectUrl": {
                    "type": "string",
                    "description": "The redirect URL used in the OAuth2 flow"
                },
                "collection": {
                    "type": "string",
                    "description": "Collection name (default: users)",
                    "default": "users"
                }
            },
            "required": ["provider", "code", "codeVerifier", "redirectUrl"]
        }
    })
}

/// Schema definition for the one-time-password authentication tool.
pub fn authenticate_with_otp_tool() -> Value {
    json!({
        "name": "authenticate_with_otp",
        "description": "Authenticate a user with one-time password",
        "inputSchema": {
            "type": "object",
            "properties": {
                "email": {
                    "type": "string",
                    "description": "User email"
                },
                "collection": {
                    "type": "string",
                    "description": "Collection name (default: users)",
                    "default": "users"
                }
            },
            "required": ["email"]
        }
    })
}

/// Schema definition for the token refresh tool.
pub fn auth_refresh_tool() -> Value {
    json!({
        "name": "auth_refresh",
        "description": "Refresh authentication token",
        "inputSchema": {
            "type": "object",
            "properties": {
                "collection": {
                    "type": "string",
                    "description": "Collection name (default: users)",
                    "default": "users"
                }
            }
        }
    })
}

/// Schema definition for the verification request tool.
pub fn request_verification_tool() -> Value {
    json!({
        "name": "request_verification",
        "description": "Request email verification",
        "inputSchema": {
            "type": "object",
            "properties": {
                "email": {
                    "type": "string",
                    "description": "User email"
                },
                "collection": {
                    "type": "string",
                    "description": "Collection name (default: users)",
                    "default": "users"
                }
            },
            "required": ["email"]
        }
    })
}

/// Schema definition for the verification confirmation tool.
pub fn confirm_verification_tool() -> Value {
    json!({
        "name": "confirm_verification",
        "description": "Confirm email verification with token",
        "inputSchema": {
            "type": "object",
            "properties": {
                "token": {
                    "type": "string",
                    "description": "Verification token"
                },
                "collection": {
                    "type": "string",
                    "description": "Collection name (default: users)",
                    "default": "users"
                }
            },
            "required": ["token"]
        }
    })
}

/// Schema definition for the password reset request tool.
pub fn request_password_reset_tool() -> Value {
    json!({
        "name": "request_password_reset",
        "description": "Request password reset",
        "inputSchema": {
            "type": "object",
            "properties": {
                "email": {
                    "type": "string",
                    "description": "User email"
                },
                "collection": {
                    "type": "string",
                    "description": "Collection name (default: users)",
                    "default": "users"
                }
            },
            "required": ["email"]
        }
    })
}

/// Schema definition for the password reset confirmation tool.
pub fn confirm_password_reset_tool() -> Value {
    json!({
        "name": "confirm_password_reset",
        "description": "Confirm password reset with token",
        "inputSchema": {
            "type": "object",
            "properties": {
                "token": {
                    "type": "string",
                    "description": "Reset token"
                },
                "password": {
                    "type": "string",
                    "description": "New password"
                },
                "passwordConfirm": {
                    "type": "string",
                    "description": "Confirm new password"
                },
                "collection": {
                    "type": "string",
                    "description": "Collection name (default: users)",
                    "default": "users"
                }
            },
            "required": ["token", "password", "passwordConfirm"]
        }
    })
}

/// Schema definition for the email change request tool.
pub fn request_email_change_tool() -> Value {
    json!({
        "name": "request_email_change",
        "description": "Request email change",
        "inputSchema": {
            "type": "object",
            "properties": {
                "newEmail": {
                    "type": "string",
                    "description": "New email address"
                },
                "collection": {
                    "type": "string",
                    "description": "Collection name (default: users)",
                    "default": "users"
                }
            },
            "required": ["newEmail"]
        }
    })
}

/// Schema definition for the email change confirmation tool.
pub fn confirm_email_change_tool() -> Value {
    json!({
        "name": "confirm_email_change",
        "description": "Confirm email change with token",
        "inputSchema": {
            "type": "object",
            "properties": {
                "token": {
                    "type": "string",
                    "description": "Email change token"
                },
                "password": {
                    "type": "string",
                    "description": "Current password for confirmation"
                },
                "collection": {
                    "type": "string",
                    "description": "Collection name (default: users)",
                    "default": "users"
                }
            },
            "required": ["token", "password"]
        }
    })
}

/// Schema definition for the impersonation tool.
pub fn impersonate_user_tool() -> Value {
    json!({
        "name": "impersonate_user",
        "description": "Impersonate another user (admin only)",
        "inputSchema": {
            "type": "object",
            "properties": {
                "userId": {
                    "type": "string",
                    "description": "ID of the user to impersonate"
                },
                "collection": {
                    "type": "string",
                    "description": "Collection name (default: users)",
                    "default": "users"
                }
            },
            "required": ["userId"]
        }
    })
}

/// Schema definition for the user creation tool.
pub fn create_user_tool() -> Value {
    json!({
        "name": "create_user",
        "description": "Create a new user account",
        "inputSchema": {
            "type": "object",
            "properties": {
                "email": {
                    "type": "string",
                    "description": "User email"
                },
                "password": {
                    "type": "string",
                    "description": "User password"
                },
                "passwordConfirm": {
                    "type": "string",
                    "description": "Password confirmation"
                },
                "name": {
                    "type": "string",
                    "description": "User name"
                },
                "collection": {
                    "type": "string",
                    "description": "Collection name (default: users)",
                    "default": "users"
                }
            },
            "required": ["email", "password", "passwordConfirm"]
        }
    })
}
