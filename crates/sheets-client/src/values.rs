// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::{error_for_status, Result};
use crate::SheetsClient;
use serde::{Deserialize, Serialize};

/// A single, loosely typed cell as returned with `valueRenderOption=UNFORMATTED_VALUE`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl CellValue {
    /// Returns the text content, `None` for any non-text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Blank cells are either explicitly empty or contain an empty string
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

pub type Row = Vec<CellValue>;

/// Request and response body of the `spreadsheets.values` endpoints
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange {
    #[serde(default)]
    range: Option<String>,
    #[serde(default)]
    major_dimension: Option<String>,
    /// Omitted by the API when the range holds no values
    #[serde(default)]
    values: Vec<Row>,
}

/// Returns the sheet title of an A1 range (`Guests!A2:H` -> `Guests`)
///
/// Quotes around titles containing spaces are kept as they are valid in written ranges too.
pub fn sheet_title(range: &str) -> Option<&str> {
    range
        .rsplit_once('!')
        .map(|(title, _)| title)
        .filter(|title| !title.is_empty())
}

impl SheetsClient {
    /// Fetch all rows of the given A1 range
    ///
    /// Trailing empty cells of a row and trailing empty rows are not returned by the API, so rows
    /// may have different lengths.
    pub async fn fetch_range(&self, range: &str) -> Result<Vec<Row>> {
        let url = self.url(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", range])?;

        log::debug!("Fetching range {} of spreadsheet {}", range, self.spreadsheet_id);

        let response = self
            .send_authorized(move |c| {
                c.get(url.clone()).query(&[
                    ("majorDimension", "ROWS"),
                    ("valueRenderOption", "UNFORMATTED_VALUE"),
                ])
            })
            .await?;

        let value_range: ValueRange = error_for_status(response).await?.json().await?;

        Ok(value_range.values)
    }

    /// Overwrite a single cell with a raw value, the value is not parsed as a formula
    pub async fn write_cell(&self, range: &str, value: CellValue) -> Result<()> {
        let url = self.url(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", range])?;

        let body = ValueRange {
            range: Some(range.to_owned()),
            major_dimension: Some("ROWS".into()),
            values: vec![vec![value]],
        };

        log::debug!("Writing cell {} of spreadsheet {}", range, self.spreadsheet_id);

        let response = self
            .send_authorized(move |c| {
                c.put(url.clone())
                    .query(&[("valueInputOption", "RAW")])
                    .json(&body)
            })
            .await?;

        error_for_status(response).await?;

        Ok(())
    }
}
