// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Invitation lookup and RSVP endpoints
use super::response::{ApiError, NoContent};
use actix_web::http::header::ContentType;
use actix_web::web::{Data, Json, Path};
use actix_web::{get, post, HttpResponse};
use invitations::{Event, InvitationStore, Recorded};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::str::FromStr;
use validator::{Validate, ValidationError};

lazy_static! {
    static ref INVITATION_CODE: Regex = Regex::new("^[A-Za-z0-9-]+$").unwrap();
}

/// Path of the invitation lookup
#[derive(Debug, Deserialize, Validate)]
pub struct InvitationPath {
    #[validate(regex(
        path = "INVITATION_CODE",
        code = "invalid_code",
        message = "The invitation code may only contain letters, digits and dashes"
    ))]
    code: String,
}

/// API Endpoint *GET /rsvp/{code}*
///
/// Returns the invitation with all guests and their current answers.
#[get("/rsvp/{code}")]
pub async fn get_invitation(
    invitations: Data<InvitationStore>,
    path: Path<InvitationPath>,
) -> Result<HttpResponse, ApiError> {
    let path = path.into_inner();

    path.validate()?;

    let invitation = invitations.find_invitation(&path.code).await?;

    let body = serde_json::to_string(&invitation).map_err(|e| {
        log::error!("Failed to render invitation {}, {}", invitation.code, e);
        ApiError::unprocessable_entity()
            .with_code("rendering_failed")
            .with_message("The invitation could not be rendered")
    })?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

/// Answer of a guest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Accept,
    Decline,
}

impl Action {
    fn is_attending(self) -> bool {
        matches!(self, Action::Accept)
    }
}

impl FromStr for Action {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accept" => Ok(Action::Accept),
            "decline" => Ok(Action::Decline),
            _ => Err(ApiError::bad_request()
                .with_code("invalid_action")
                .with_message("The action must be either accept or decline")),
        }
    }
}

/// Path of an RSVP update
#[derive(Debug, Deserialize, Validate)]
pub struct AttendancePath {
    action: String,
    event: String,
    #[validate(regex(
        path = "INVITATION_CODE",
        code = "invalid_code",
        message = "The invitation code may only contain letters, digits and dashes"
    ))]
    code: String,
}

/// Name of the guest an answer is given for
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "require_name"))]
pub struct GuestName {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
}

fn require_name(guest: &GuestName) -> Result<(), ValidationError> {
    if guest.first_name.is_empty() && guest.last_name.is_empty() {
        let mut error = ValidationError::new("invalid_guest");
        error.message = Some("A guest name is required".into());

        Err(error)
    } else {
        Ok(())
    }
}

/// API Endpoint *POST /rsvp/{action}/{event}/{code}*
///
/// Records the answer of a single guest for a single event. Responds with 204 No Content.
///
/// The path is checked before the body, so a request with a bad path and a bad body reports
/// the path.
#[post("/rsvp/{action}/{event}/{code}")]
pub async fn update_attendance(
    invitations: Data<InvitationStore>,
    path: Path<AttendancePath>,
    body: Result<Json<GuestName>, actix_web::Error>,
) -> Result<NoContent, actix_web::Error> {
    let path = path.into_inner();

    path.validate().map_err(ApiError::from)?;

    let action = Action::from_str(&path.action)?;
    let event = Event::from_str(&path.event).map_err(|_| {
        ApiError::bad_request()
            .with_code("invalid_event")
            .with_message("The event must be either ceremony or reception")
    })?;

    // Rejections of the JSON extractor are already rendered by `json_error_handler`
    let guest = body?.into_inner();

    guest.validate().map_err(ApiError::from)?;

    let recorded = invitations
        .set_attendance(
            &path.code,
            &guest.first_name,
            &guest.last_name,
            event,
            action.is_attending(),
        )
        .await
        .map_err(ApiError::from)?;

    if let Recorded::Written(address) = recorded {
        log::info!("Recorded {:?} for {} at {}", action, event, address);
    }

    Ok(NoContent)
}
