// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Writing attendance answers back to the sheet
use crate::address::CellAddress;
use crate::attendance::{Event, TriState};
use crate::ingest::RowRef;
use crate::invitation::Guest;
use crate::schema::{ColumnSchema, SchemaError};
use crate::store::{RemoteStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    #[error("event has no writable column")]
    InvalidEvent(#[from] SchemaError),
    #[error("guest {0} was not read from the sheet and cannot be updated")]
    MissingSourceRow(String),
    #[error("failed to write attendance")]
    Store(#[from] StoreError),
}

/// Cell holding the answer of the guest in `row` for `event`
pub fn attendance_address(
    schema: &ColumnSchema,
    row: RowRef,
    event: Event,
) -> Result<CellAddress, AttendanceError> {
    let letter = schema.letter_of(event.confirmation_field())?;

    Ok(CellAddress::new(
        letter,
        row.row_number(schema.header_offset()),
    ))
}

/// Record the guest's answer for an event
///
/// Issues exactly one cell write and updates the guest only once it succeeded. The write is
/// neither verified nor retried.
pub async fn set_attendance(
    store: &dyn RemoteStore,
    schema: &ColumnSchema,
    guest: &mut Guest,
    event: Event,
    attending: bool,
) -> Result<CellAddress, AttendanceError> {
    let row = guest.source_row.ok_or_else(|| {
        AttendanceError::MissingSourceRow(format!("{} {}", guest.first_name, guest.last_name))
    })?;

    let address = attendance_address(schema, row, event)?;
    let state = TriState::from(attending);

    if let Err(e) = store
        .write_cell(&address, schema.markers().encode(state))
        .await
    {
        log::error!("Failed to write {} attendance to {}, {}", event, address, e);
        return Err(e.into());
    }

    guest.set_attendance(event, state);

    Ok(address)
}
