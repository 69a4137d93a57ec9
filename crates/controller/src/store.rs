// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::settings::Settings;
use anyhow::{Context, Result};
use invitations::{ColumnSchema, InvitationStore, SheetsStore};
use sheets_client::SheetsClient;
use std::sync::Arc;

/// Validate the column schema
pub(crate) fn column_schema(settings: &Settings) -> Result<ColumnSchema> {
    ColumnSchema::new(settings.schema.clone()).context("Invalid column schema")
}

/// Build the invitation store on top of the configured spreadsheet
///
/// Acquires the first access token right away, so invalid credentials are reported on startup.
pub(crate) async fn connect(settings: &Settings) -> Result<InvitationStore> {
    let schema = column_schema(settings)?;

    let mut key = settings
        .sheets
        .credentials
        .load()
        .context("Failed to load service account credentials")?;

    if let Some(token_uri) = &settings.sheets.token_uri {
        key.token_uri = Some(token_uri.to_string());
    }

    let http_client = reqwest::Client::builder()
        .timeout(settings.sheets.timeout)
        .build()
        .context("Failed to build http client")?;

    let base_url = settings
        .sheets
        .base_url()
        .context("Invalid sheets base url")?;

    let client = SheetsClient::new(
        http_client,
        key,
        base_url,
        settings.sheets.spreadsheet_id.clone(),
    )
    .context("Failed to create sheets client")?;

    client
        .authorize()
        .await
        .context("Failed to authorize at the sheets api")?;

    log::info!(
        "Using range {} of spreadsheet {}",
        settings.sheets.range,
        client.spreadsheet_id()
    );

    let store = SheetsStore::new(client, settings.sheets.range.clone());

    Ok(InvitationStore::new(Arc::new(store), schema)
        .with_demo_invitations(settings.rsvp.demo_invitations))
}
