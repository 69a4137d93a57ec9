// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Core library of the *Hitched* RSVP API
//!
//! # Example
//!
//! ```no_run
//! use hitched_controller_core::Controller;
//! use anyhow::Result;
//!
//! #[actix_web::main]
//! async fn main()  {
//!     hitched_controller_core::try_or_exit(run()).await;
//! }
//!
//! async fn run() -> Result<()> {
//!    if let Some(controller) = Controller::create("Hitched RSVP API").await? {
//!         controller.run().await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

use crate::api::response::json_error_handler;
use crate::settings::Settings;
use crate::trace::RsvpSpanBuilder;
use actix_cors::Cors;
use actix_web::http::{header, Method};
use actix_web::middleware::{Compress, NormalizePath, TrailingSlash};
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use invitations::InvitationStore;
use std::net::Ipv6Addr;
use std::sync::Arc;
use tokio::signal::ctrl_c;
use tracing_actix_web::TracingLogger;

pub mod api;
mod cli;
pub mod settings;
mod store;
mod trace;

/// Wrapper of the main function. Correctly outputs the error to the logging utility or stderr.
pub async fn try_or_exit<T, F>(f: F) -> T
where
    F: std::future::Future<Output = Result<T>>,
{
    match f.await {
        Ok(ok) => ok,
        Err(err) => {
            if log::log_enabled!(log::Level::Error) {
                log::error!("Crashed with error: {:?}", err);
            } else {
                eprintln!("Crashed with error: {err:?}");
            }

            std::process::exit(-1);
        }
    }
}

/// Controller struct representation containing all fields required to drive the controller
pub struct Controller {
    /// Settings loaded on [Controller::create]
    pub startup_settings: Arc<Settings>,

    /// Invitation store shared by all http workers
    pub invitations: InvitationStore,
}

impl Controller {
    /// Tries to create a controller from CLI arguments and then the settings.
    ///
    /// This can return Ok(None) which would indicate that the controller executed a CLI
    /// subprogram (e.g. `invitations list`) and must now exit.
    ///
    /// Otherwise it will return itself which can be modified and then run using [`Controller::run`]
    pub async fn create(program_name: &str) -> Result<Option<Self>> {
        let args = cli::parse_args().await?;

        // Some args run commands by them self and thus should exit here
        if !args.controller_should_start() {
            return Ok(None);
        }

        let settings = Settings::load(&args.config)
            .with_context(|| format!("Failed to load settings from {:?}", args.config))?;

        trace::init(&settings.logging)?;

        log::info!("Starting {}", program_name);

        let controller = Self::init(settings).await?;

        Ok(Some(controller))
    }

    #[tracing::instrument(err, skip(settings))]
    async fn init(settings: Settings) -> Result<Self> {
        let invitations = store::connect(&settings)
            .await
            .context("Failed to connect to the guest list")?;

        Ok(Self {
            startup_settings: Arc::new(settings),
            invitations,
        })
    }

    /// Runs the controller until a fatal error occurred or a shutdown is requested (e.g. SIGTERM).
    pub async fn run(self) -> Result<()> {
        let cors = self.startup_settings.http.cors.clone();
        let invitations = Data::new(self.invitations);

        let http_server = HttpServer::new(move || {
            let cors = setup_cors(&cors);

            App::new()
                .wrap(Compress::default())
                .wrap(cors)
                .wrap(TracingLogger::<RsvpSpanBuilder>::new())
                .wrap(NormalizePath::new(TrailingSlash::Trim))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(invitations.clone())
                .configure(api::configure)
        });

        let address = (Ipv6Addr::UNSPECIFIED, self.startup_settings.http.port);

        let http_server = http_server.bind(address).with_context(|| {
            format!("Failed to bind http server to {}:{}", address.0, address.1)
        })?;

        log::info!("Startup finished");

        let http_server = http_server.disable_signals().run();
        let http_server_handle = http_server.handle();

        actix_rt::spawn(http_server);

        ctrl_c()
            .await
            .context("Failed to register termination signal handler")?;

        log::info!("Got termination signal, exiting");

        http_server_handle.stop(true).await;

        log::info!("Stopped, goodbye!");

        Ok(())
    }
}

fn setup_cors(settings: &settings::HttpCors) -> Cors {
    let mut cors = Cors::default();

    for origin in &settings.allowed_origin {
        cors = cors.allowed_origin(origin)
    }

    cors.allowed_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-csrf-token"),
        ])
        .supports_credentials()
        .max_age(300)
}
