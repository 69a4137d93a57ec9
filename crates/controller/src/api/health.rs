// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use actix_web::get;

/// API Endpoint *GET /*
#[get("/")]
pub async fn index() -> &'static str {
    "Hitched API"
}

/// API Endpoint *GET /ping*
///
/// Liveness check, does not touch the guest list.
#[get("/ping")]
pub async fn ping() -> &'static str {
    "pong"
}
