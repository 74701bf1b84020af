//! HTTP handlers passing user lookups through to the Bitrix24 portal.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::adapters::http::error::PortalApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::ports::{PortalDirectory, PortalError};

#[derive(Clone)]
pub struct PortalHandlers {
    directory: Arc<dyn PortalDirectory>,
}

impl PortalHandlers {
    pub fn new(directory: Arc<dyn PortalDirectory>) -> Self {
        Self { directory }
    }
}

/// GET /api/bitrix/users - Portal user list
pub async fn list_users(
    State(handlers): State<PortalHandlers>,
    RequireAuth(_user): RequireAuth,
) -> Result<impl IntoResponse, PortalApiError> {
    Ok(Json(handlers.directory.list_users().await?))
}

/// GET /api/current-user and /api/users/current - The caller's portal record
pub async fn current_user(
    State(handlers): State<PortalHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, PortalApiError> {
    match handlers.directory.find_user(&user.id).await {
        Ok(record) => Ok(Json(record)),
        Err(PortalError::NotConfigured) => {
            // Without a webhook the token identity is all we know.
            let fallback: Value = json!([{
                "ID": user.id.as_str(),
                "NAME": user.display_name,
                "EMAIL": user.email,
            }]);
            Ok(Json(fallback))
        }
        Err(err) => Err(err.into()),
    }
}
