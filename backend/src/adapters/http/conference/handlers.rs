//! HTTP handlers for conference endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ConferenceApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::conference::{
    CreateConferenceCommand, CreateConferenceHandler, DeleteConferenceCommand,
    DeleteConferenceHandler, GetConferenceHandler, GetConferenceQuery, ListConferencesHandler,
    ListConferencesQuery, UpdateConferenceCommand, UpdateConferenceHandler,
};
use crate::domain::conference::ConferenceError;
use crate::domain::foundation::{ConferenceId, ValidationError};
use crate::ports::{ConferenceProvider, ConferenceRepository};

use super::dto::{
    ConferenceResponse, CreateConferenceRequest, ListConferencesParams, UpdateConferenceRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ConferenceHandlers {
    create_handler: Arc<CreateConferenceHandler>,
    update_handler: Arc<UpdateConferenceHandler>,
    delete_handler: Arc<DeleteConferenceHandler>,
    get_handler: Arc<GetConferenceHandler>,
    list_handler: Arc<ListConferencesHandler>,
}

impl ConferenceHandlers {
    pub fn new(
        repository: Arc<dyn ConferenceRepository>,
        provider: Arc<dyn ConferenceProvider>,
    ) -> Self {
        Self {
            create_handler: Arc::new(CreateConferenceHandler::new(
                repository.clone(),
                provider.clone(),
            )),
            update_handler: Arc::new(UpdateConferenceHandler::new(
                repository.clone(),
                provider.clone(),
            )),
            delete_handler: Arc::new(DeleteConferenceHandler::new(repository.clone(), provider)),
            get_handler: Arc::new(GetConferenceHandler::new(repository.clone())),
            list_handler: Arc::new(ListConferencesHandler::new(repository)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/conferences - List the caller's conferences
pub async fn list_conferences(
    State(handlers): State<ConferenceHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListConferencesParams>,
) -> Result<impl IntoResponse, ConferenceApiError> {
    let query = ListConferencesQuery {
        owner: user.id,
        filter: params.validate().map_err(ConferenceError::from)?,
    };

    let conferences = handlers.list_handler.handle(query).await?;
    let response: Vec<ConferenceResponse> =
        conferences.into_iter().map(ConferenceResponse::from).collect();
    Ok(Json(response))
}

/// POST /api/conferences - Create a conference for the caller
pub async fn create_conference(
    State(handlers): State<ConferenceHandlers>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<CreateConferenceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ConferenceApiError> {
    let Json(req) = body.map_err(malformed_body)?;
    let cmd = CreateConferenceCommand {
        owner: user,
        details: req.validate().map_err(ConferenceError::from)?,
    };

    let conference = handlers.create_handler.handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(ConferenceResponse::from(conference))))
}

/// GET /api/conferences/:id - Get one of the caller's conferences
pub async fn get_conference(
    State(handlers): State<ConferenceHandlers>,
    RequireAuth(user): RequireAuth,
    Path(conference_id): Path<String>,
) -> Result<impl IntoResponse, ConferenceApiError> {
    let query = GetConferenceQuery {
        owner: user.id,
        conference_id: parse_id(&conference_id)?,
    };

    let conference = handlers.get_handler.handle(query).await?;
    Ok(Json(ConferenceResponse::from(conference)))
}

/// PUT /api/conferences/:id - Patch one of the caller's conferences
pub async fn update_conference(
    State(handlers): State<ConferenceHandlers>,
    RequireAuth(user): RequireAuth,
    Path(conference_id): Path<String>,
    body: Result<Json<UpdateConferenceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ConferenceApiError> {
    let conference_id = parse_id(&conference_id)?;
    let Json(req) = body.map_err(malformed_body)?;
    let cmd = UpdateConferenceCommand {
        owner: user.id,
        conference_id,
        patch: req.validate().map_err(ConferenceError::from)?,
    };

    let conference = handlers.update_handler.handle(cmd).await?;
    Ok(Json(ConferenceResponse::from(conference)))
}

/// DELETE /api/conferences/:id - Delete one of the caller's conferences
pub async fn delete_conference(
    State(handlers): State<ConferenceHandlers>,
    RequireAuth(user): RequireAuth,
    Path(conference_id): Path<String>,
) -> Result<impl IntoResponse, ConferenceApiError> {
    let cmd = DeleteConferenceCommand {
        owner: user.id,
        conference_id: parse_id(&conference_id)?,
    };

    handlers.delete_handler.handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════
// Input helpers
// ════════════════════════════════════════════════════════════════════════════

fn parse_id(raw: &str) -> Result<ConferenceId, ConferenceApiError> {
    raw.parse::<ConferenceId>().map_err(|_| {
        ConferenceError::Validation(ValidationError::invalid_format(
            "id",
            "must be a positive integer",
        ))
        .into()
    })
}

fn malformed_body(rejection: JsonRejection) -> ConferenceApiError {
    ConferenceError::Validation(ValidationError::invalid_format(
        "body",
        rejection.body_text(),
    ))
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{connect_in_memory, SqliteConferenceRepository};
    use crate::adapters::telemost::MockConferenceProvider;
    use crate::domain::foundation::{AuthenticatedUser, UserId};

    async fn handlers() -> ConferenceHandlers {
        let repo = Arc::new(SqliteConferenceRepository::new(
            connect_in_memory().await.unwrap(),
        ));
        ConferenceHandlers::new(repo, Arc::new(MockConferenceProvider::new()))
    }

    fn caller() -> RequireAuth {
        RequireAuth(AuthenticatedUser::new(
            UserId::new("17").unwrap(),
            "Ivan",
            None,
        ))
    }

    #[test]
    fn parse_id_rejects_non_numeric() {
        let err = parse_id("abc").unwrap_err();
        assert!(matches!(err.0, ConferenceError::Validation(_)));
        assert!(parse_id("0").is_err());
        assert_eq!(parse_id("42").unwrap(), ConferenceId::from_i64(42));
    }

    #[tokio::test]
    async fn create_then_get_returns_record() {
        let handlers = handlers().await;

        let created = create_conference(
            State(handlers.clone()),
            caller(),
            Ok(Json(CreateConferenceRequest {
                name: Some("Standup".to_string()),
                kind: Some("conference".to_string()),
                ..Default::default()
            })),
        )
        .await
        .unwrap()
        .into_response();
        assert_eq!(created.status(), StatusCode::CREATED);

        let fetched = get_conference(State(handlers), caller(), Path("1".to_string()))
            .await
            .unwrap()
            .into_response();
        assert_eq!(fetched.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn get_missing_conference_is_not_found() {
        let err = get_conference(State(handlers().await), caller(), Path("99".to_string()))
            .await
            .err()
            .unwrap();

        assert_eq!(
            err.0,
            ConferenceError::not_found(ConferenceId::from_i64(99))
        );
    }
}
