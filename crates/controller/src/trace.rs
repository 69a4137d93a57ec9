// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::settings::Logging;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpRequest};
use anyhow::Result;
use tracing::field::Empty;
use tracing::Span;
use tracing_actix_web::RootSpanBuilder;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

pub fn init(settings: &Logging) -> Result<()> {
    // Layer which acts as filter of traces and spans.
    // The filter is created from enviroment (RUST_LOG) and config file
    let mut filter = EnvFilter::from_default_env();

    for directive in &settings.default_directives {
        filter = filter.add_directive(directive.parse()?);
    }

    // FMT layer prints the trace events into stdout
    let fmt = tracing_subscriber::fmt::Layer::default();

    // Install the global logger, `log` records are forwarded by the subscriber
    Registry::default().with(filter).with(fmt).try_init()?;

    Ok(())
}

/// Root span of every request
///
/// Once routed, the span also carries the invitation code and the answer of RSVP requests.
pub struct RsvpSpanBuilder;

impl RootSpanBuilder for RsvpSpanBuilder {
    fn on_request_start(request: &ServiceRequest) -> Span {
        tracing::info_span!(
            "HTTP request",
            http.method = %request.method(),
            http.target = %request.uri(),
            http.route = Empty,
            http.status_code = Empty,
            invitation.code = Empty,
            rsvp.action = Empty,
            rsvp.event = Empty,
            exception.message = Empty,
        )
    }

    fn on_request_end<B>(span: Span, outcome: &Result<ServiceResponse<B>, Error>) {
        match outcome {
            Ok(response) => {
                for (field, value) in route_fields(response.request()) {
                    span.record(field, value.as_str());
                }

                match response.response().error() {
                    Some(error) => record_error(&span, error),
                    None => {
                        span.record("http.status_code", response.response().status().as_u16());
                    }
                }
            }
            Err(error) => record_error(&span, error),
        }
    }
}

/// Span fields taken from the matched route
fn route_fields(request: &HttpRequest) -> Vec<(&'static str, String)> {
    let mut fields = Vec::new();

    if let Some(route) = request.match_pattern() {
        fields.push(("http.route", route));
    }

    let params = request.match_info();

    for (param, field) in [
        ("code", "invitation.code"),
        ("action", "rsvp.action"),
        ("event", "rsvp.event"),
    ] {
        if let Some(value) = params.get(param) {
            fields.push((field, value.to_owned()));
        }
    }

    fields
}

fn record_error(span: &Span, error: &Error) {
    let response_error = error.as_response_error();

    span.record("exception.message", tracing::field::display(response_error));
    span.record("http.status_code", response_error.status_code().as_u16());
}
