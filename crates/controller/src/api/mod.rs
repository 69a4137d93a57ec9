// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! REST API
//!
//! Current Endpoints. See their respective function:
//! - `/` ([GET](health::index))
//! - `/ping` ([GET](health::ping))
//! - `/rsvp/{code}` ([GET](rsvp::get_invitation))
//! - `/rsvp/{action}/{event}/{code}` ([POST](rsvp::update_attendance))
use actix_web::web;

pub mod health;
pub mod response;
pub mod rsvp;

/// Register all endpoints
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::index)
        .service(health::ping)
        .service(rsvp::get_invitation)
        .service(rsvp::update_attendance);
}
