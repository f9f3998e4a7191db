//! Request/response boundary
//!
//! Turns raw path segments and JSON bodies into service calls and maps the
//! outcome onto a status code and a JSON body. There is no network listener
//! here; a web framework (or a test) drives these handlers directly.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::error::{CardError, ErrorKind};
use crate::models::{CardId, CardRequest, UserId};
use crate::services::CardService;

/// Status of a handled request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Created,
    NoContent,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl Status {
    pub fn code(&self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::NoContent => 204,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::InternalServerError => 500,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code() < 300
    }
}

impl From<ErrorKind> for Status {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Validation => Self::BadRequest,
            ErrorKind::NotFound => Self::NotFound,
            ErrorKind::Unexpected => Self::InternalServerError,
        }
    }
}

/// Status plus optional JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: Status,
    pub body: Option<Value>,
}

impl ApiResponse {
    fn with_body<T: Serialize>(status: Status, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => Self {
                status,
                body: Some(value),
            },
            Err(e) => Self::from_error(&CardError::from(e)),
        }
    }

    fn no_content() -> Self {
        Self {
            status: Status::NoContent,
            body: None,
        }
    }

    fn from_error(err: &CardError) -> Self {
        let status = Status::from(err.kind());
        let message = match status {
            Status::InternalServerError => {
                warn!(error = %err, "Request failed unexpectedly");
                format!("Internal server error: {}", err)
            }
            _ => err.to_string(),
        };

        Self {
            status,
            body: Some(json!({ "error": message })),
        }
    }

    /// The `error` message of a failed response
    pub fn error_message(&self) -> Option<&str> {
        self.body.as_ref()?.get("error")?.as_str()
    }
}

/// Handlers for the card endpoints
pub struct CardApi<'a> {
    service: CardService<'a>,
}

impl<'a> CardApi<'a> {
    pub fn new(service: CardService<'a>) -> Self {
        Self { service }
    }

    /// `POST /api/card/create`
    pub fn create_card(&self, body: Option<&str>) -> ApiResponse {
        let result = parse_body(body).and_then(|request| self.service.create(request.as_ref()));
        respond(result, |card| ApiResponse::with_body(Status::Created, &card))
    }

    /// `GET /api/card/{id}`
    pub fn get_card(&self, id: &str) -> ApiResponse {
        let result = parse_card_id(id).and_then(|id| self.service.get(id));
        respond(result, |card| ApiResponse::with_body(Status::Ok, &card))
    }

    /// `GET /api/card/user/{userId}`
    pub fn get_all_cards(&self, user_id: &str) -> ApiResponse {
        let result = parse_user_id(user_id).and_then(|id| self.service.list_for_user(id));
        respond(result, |cards| ApiResponse::with_body(Status::Ok, &cards))
    }

    /// `PUT /api/card/{id}`
    pub fn update_card(&self, id: &str, body: Option<&str>) -> ApiResponse {
        let result = parse_card_id(id).and_then(|id| {
            let request = parse_body(body)?;
            self.service.update(id, request.as_ref())
        });
        respond(result, |card| ApiResponse::with_body(Status::Ok, &card))
    }

    /// `DELETE /api/card/{id}`
    pub fn delete_card(&self, id: &str) -> ApiResponse {
        let result = parse_card_id(id).and_then(|id| self.service.delete(id));
        respond(result, |_| ApiResponse::no_content())
    }

    /// `PATCH /api/card/{id}/activate`
    pub fn activate_card(&self, id: &str) -> ApiResponse {
        let result = parse_card_id(id).and_then(|id| self.service.activate(id));
        respond(result, |card| ApiResponse::with_body(Status::Ok, &card))
    }

    /// `PATCH /api/card/{id}/deactivate`
    pub fn deactivate_card(&self, id: &str) -> ApiResponse {
        let result = parse_card_id(id).and_then(|id| self.service.deactivate(id));
        respond(result, |card| ApiResponse::with_body(Status::Ok, &card))
    }
}

fn respond<T>(result: Result<T, CardError>, ok: impl FnOnce(T) -> ApiResponse) -> ApiResponse {
    match result {
        Ok(value) => ok(value),
        Err(err) => ApiResponse::from_error(&err),
    }
}

/// A missing, blank or `null` body is an absent request
fn parse_body(body: Option<&str>) -> Result<Option<CardRequest>, CardError> {
    let Some(text) = body.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    serde_json::from_str::<Option<CardRequest>>(text)
        .map_err(|e| CardError::Validation(format!("Malformed card request: {}", e)))
}

fn parse_card_id(s: &str) -> Result<CardId, CardError> {
    s.parse()
        .map_err(|_| CardError::Validation(format!("Invalid card ID: '{}'", s)))
}

fn parse_user_id(s: &str) -> Result<UserId, CardError> {
    s.parse()
        .map_err(|_| CardError::Validation(format!("Invalid user ID: '{}'", s)))
}
