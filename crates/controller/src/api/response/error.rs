// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Error response type of the REST API
use actix_web::error::JsonPayloadError;
use actix_web::http::header::{self, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::HttpRequest;
use actix_web::{body::BoxBody, HttpResponse, ResponseError};
use invitations::{AttendanceError, RsvpError, StoreError};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use validator::ValidationErrors;

/// Error handler for the actix JSON extractor
///
/// Gets called when a incoming request results in an [`JsonPayloadError`].
/// Returns a `Bad Request` [`ApiError`] error with an appropriate error code and message.
pub fn json_error_handler(err: JsonPayloadError, _: &HttpRequest) -> actix_web::error::Error {
    let error_code = match err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "payload_overflow"
        }
        JsonPayloadError::ContentType => "invalid_content_type",
        JsonPayloadError::Deserialize(_) | JsonPayloadError::Serialize(_) => "invalid_json",
        _ => "invalid_payload",
    };
    ApiError::bad_request()
        .with_code(error_code)
        .with_message(err.to_string())
        .into()
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    // Machine readable error code
    code: Cow<'static, str>,
    // Human readable message
    message: Cow<'static, str>,
}

/// The REST API error
///
/// Can be build via the associated functions to represent various HTTP errors. Each
/// HTTP error has their default error code and message that get send in a JSON body.
/// The error code and message can be overwritten when creating an error.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new<T>(status: StatusCode, code: T, message: T) -> Self
    where
        T: Into<Cow<'static, str>>,
    {
        Self {
            status,
            body: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    /// Override the default code for an error
    pub fn with_code<T>(mut self, code: T) -> Self
    where
        T: Into<Cow<'static, str>>,
    {
        self.body.code = code.into();
        self
    }

    /// Override the default message for an error
    pub fn with_message<T>(mut self, message: T) -> Self
    where
        T: Into<Cow<'static, str>>,
    {
        self.body.message = message.into();
        self
    }

    /// Create a new 400 Bad Request error
    pub fn bad_request() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "bad_request",
            "Invalid request due to malformed syntax",
        )
    }

    /// Create a new 404 Not Found error
    pub fn not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "not_found",
            "A requested resource could not be found",
        )
    }

    /// Create a new 422 Unprocessable Entity error
    pub fn unprocessable_entity() -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "unprocessable_entity",
            "The requested resource could not be processed",
        )
    }

    /// Create a new 500 Internal Server Error
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_server_error",
            "An internal server error occurred",
        )
    }

    /// Create a new 502 Bad Gateway error
    pub fn bad_gateway() -> Self {
        Self::new(
            StatusCode::BAD_GATEWAY,
            "bad_gateway",
            "An upstream service failed",
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "status={}, code={}, message={}",
            self.status, self.body.code, self.body.message
        )
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let mut response = HttpResponse::new(self.status_code());

        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );

        let body = serde_json::to_string(&self.body).unwrap_or_else(|_| {
            r#"{"code":"internal_server_error","message":"unserializable error"}"#.into()
        });

        response.set_body(BoxBody::new(body))
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        log::error!("REST API failed to reach the remote store: {}", e);

        let message = match e {
            StoreError::Timeout => "The guest list did not respond in time",
            _ => "The guest list is currently unavailable",
        };

        Self::bad_gateway()
            .with_code("remote_store_error")
            .with_message(message)
    }
}

impl From<AttendanceError> for ApiError {
    fn from(e: AttendanceError) -> Self {
        match e {
            AttendanceError::Store(e) => e.into(),
            e => {
                log::error!("REST API threw internal error from attendance error: {}", e);
                Self::internal()
            }
        }
    }
}

impl From<RsvpError> for ApiError {
    fn from(e: RsvpError) -> Self {
        match e {
            RsvpError::InvitationNotFound(_) => Self::not_found()
                .with_code("invitation_not_found")
                .with_message("No invitation with this code exists"),
            RsvpError::GuestNotFound { .. } => Self::not_found()
                .with_code("guest_not_found")
                .with_message("The guest is not part of this invitation"),
            RsvpError::Store(e) => e.into(),
            RsvpError::Attendance(e) => e.into(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    /// Creates a 400 Bad Request response from the [`ValidationErrors`]
    ///
    /// Validations carry the API error code and message themselves. When several fields are
    /// invalid, the first one by field name is reported.
    fn from(validation_errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<_> = validation_errors.field_errors().into_iter().collect();
        field_errors.sort_by_key(|(field, _)| *field);

        let error = field_errors
            .into_iter()
            .find_map(|(_, errors)| errors.first());

        match error {
            Some(error) => {
                let api_error = Self::bad_request().with_code(error.code.clone());

                match &error.message {
                    Some(message) => api_error.with_message(message.clone()),
                    None => api_error,
                }
            }
            None => Self::bad_request(),
        }
    }
}
