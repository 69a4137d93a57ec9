// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Wedding invitations stored in a spreadsheet
//!
//! Rows of the guest sheet are parsed by the [`ingest`] step according to a [`ColumnSchema`],
//! grouped into an [`InvitationList`] by invitation code and written back one attendance cell at
//! a time. The sheet is only reached through the [`RemoteStore`] trait.
mod address;
mod attendance;
mod invitation;
mod mutator;
mod service;
mod store;

pub mod demo;
pub mod ingest;
pub mod memory;
pub mod schema;

pub use address::CellAddress;
pub use attendance::{Event, Markers, TriState, UnknownEvent};
pub use ingest::{GuestDraft, RowRef};
pub use invitation::{Guest, Invitation, InvitationList};
pub use mutator::{attendance_address, set_attendance, AttendanceError};
pub use schema::{ColumnSchema, Field, SchemaConfig, SchemaError};
pub use service::{InvitationStore, Recorded, RsvpError};
pub use store::{RemoteStore, SheetsStore, StoreError};

pub use sheets_client::{CellValue, Row};
