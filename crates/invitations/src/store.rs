// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Access to the remote table holding the guest list
use crate::address::CellAddress;
use async_trait::async_trait;
use sheets_client::{sheet_title, CellValue, Row, SheetsClient};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("remote store did not respond in time")]
    Timeout,
    #[error(transparent)]
    Sheets(sheets_client::Error),
    #[error("remote store unavailable: {0}")]
    Unavailable(String),
}

impl From<sheets_client::Error> for StoreError {
    fn from(e: sheets_client::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Sheets(e)
        }
    }
}

/// The table the invitations are read from and attendance is written to
///
/// Implementations must not cache, every call reflects the current remote state.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// All rows of the configured range, in sheet order
    async fn fetch_rows(&self) -> Result<Vec<Row>, StoreError>;

    /// Overwrite a single cell with a raw text value
    async fn write_cell(&self, address: &CellAddress, value: &str) -> Result<(), StoreError>;
}

/// [`RemoteStore`] backed by a range of a Google spreadsheet
pub struct SheetsStore {
    client: SheetsClient,
    range: String,
}

impl SheetsStore {
    pub fn new(client: SheetsClient, range: String) -> Self {
        Self { client, range }
    }

    pub fn range(&self) -> &str {
        &self.range
    }
}

/// Prefix the address with the sheet of the fetched range so writes land on the same sheet
fn qualified_address(range: &str, address: &CellAddress) -> String {
    match sheet_title(range) {
        Some(title) => format!("{title}!{address}"),
        None => address.to_string(),
    }
}

#[async_trait]
impl RemoteStore for SheetsStore {
    async fn fetch_rows(&self) -> Result<Vec<Row>, StoreError> {
        let rows = self.client.fetch_range(&self.range).await?;

        log::debug!("Fetched {} rows from {}", rows.len(), self.range);

        Ok(rows)
    }

    async fn write_cell(&self, address: &CellAddress, value: &str) -> Result<(), StoreError> {
        let range = qualified_address(&self.range, address);

        self.client
            .write_cell(&range, CellValue::from(value))
            .await?;

        log::info!("Wrote {:?} to {}", value, range);

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn writes_target_the_sheet_of_the_range() {
        let address = CellAddress::new("D", 7);

        assert_eq!(qualified_address("Guests!A2:H", &address), "Guests!D7");
        assert_eq!(
            qualified_address("'Guest List'!A2:H", &address),
            "'Guest List'!D7"
        );
        assert_eq!(qualified_address("A2:H", &address), "D7");
    }

    #[test]
    fn other_sheets_errors_are_kept() {
        let e = StoreError::from(sheets_client::Error::InvalidCredentials);

        assert!(matches!(e, StoreError::Sheets(_)));
    }
}
