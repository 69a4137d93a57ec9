// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::attendance::{Event, TriState};
use crate::ingest::{ingest, GuestDraft, RowRef};
use crate::schema::ColumnSchema;
use serde::Serialize;
use sheets_client::Row;
use std::collections::BTreeMap;

/// A guest listed on an invitation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub first_name: String,
    pub last_name: String,
    pub contact: String,
    pub attending_ceremony: TriState,
    pub attending_reception: TriState,
    /// Row the guest was read from, guests without one cannot be written back
    #[serde(skip)]
    pub source_row: Option<RowRef>,
}

impl Guest {
    pub fn attendance(&self, event: Event) -> TriState {
        match event {
            Event::Ceremony => self.attending_ceremony,
            Event::Reception => self.attending_reception,
        }
    }

    pub(crate) fn set_attendance(&mut self, event: Event, state: TriState) {
        match event {
            Event::Ceremony => self.attending_ceremony = state,
            Event::Reception => self.attending_reception = state,
        }
    }

    fn is_named(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }
}

impl From<GuestDraft> for Guest {
    fn from(draft: GuestDraft) -> Self {
        Self {
            first_name: draft.first_name,
            last_name: draft.last_name,
            contact: draft.contact,
            attending_ceremony: draft.attending_ceremony,
            attending_reception: draft.attending_reception,
            source_row: Some(draft.source_row),
        }
    }
}

/// All guests sharing an invitation code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub code: String,
    pub has_ceremony_invite: bool,
    pub has_reception_invite: bool,
    /// Guests in sheet row order
    pub guests: Vec<Guest>,
}

impl Invitation {
    /// Find a guest by exact, case-sensitive name
    ///
    /// Guests are not deduplicated. If two guests share a name, only the first one in row order
    /// can be found.
    pub fn find_guest(&self, first_name: &str, last_name: &str) -> Option<&Guest> {
        self.guests
            .iter()
            .find(|guest| guest.is_named(first_name, last_name))
    }

    /// Mutable version of [`Invitation::find_guest`]
    pub fn find_guest_mut(&mut self, first_name: &str, last_name: &str) -> Option<&mut Guest> {
        self.guests
            .iter_mut()
            .find(|guest| guest.is_named(first_name, last_name))
    }

    fn new(draft: &GuestDraft) -> Self {
        Self {
            code: draft.code.clone(),
            has_ceremony_invite: draft.has_ceremony_invite,
            has_reception_invite: draft.has_reception_invite,
            guests: Vec::new(),
        }
    }

    fn push(&mut self, draft: GuestDraft) {
        if self.has_ceremony_invite != draft.has_ceremony_invite
            || self.has_reception_invite != draft.has_reception_invite
        {
            log::debug!(
                "Rows of invitation {} disagree on invited events, combining them",
                self.code
            );
        }

        // A guest invited to an event puts the event on the shared invitation
        self.has_ceremony_invite |= draft.has_ceremony_invite;
        self.has_reception_invite |= draft.has_reception_invite;

        self.guests.push(Guest::from(draft));
    }
}

/// All invitations of the sheet, keyed by upper-cased code
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvitationList {
    invitations: BTreeMap<String, Invitation>,
}

impl InvitationList {
    /// Ingest rows in order and group the resulting guests by code
    pub fn aggregate<'r, I>(rows: I, schema: &ColumnSchema) -> Self
    where
        I: IntoIterator<Item = &'r Row>,
    {
        let mut list = Self::default();
        let mut skipped = 0usize;

        for (row_index, row) in rows.into_iter().enumerate() {
            match ingest(row, RowRef::new(row_index), schema) {
                Some(draft) => list.insert(draft),
                None => skipped += 1,
            }
        }

        log::debug!(
            "Aggregated {} invitations, skipped {} rows",
            list.len(),
            skipped
        );

        list
    }

    /// Case-insensitive lookup by invitation code
    pub fn find_by_code(&self, code: &str) -> Option<&Invitation> {
        self.invitations.get(&code.to_ascii_uppercase())
    }

    /// Take an invitation out of the list
    pub fn take(&mut self, code: &str) -> Option<Invitation> {
        self.invitations.remove(&code.to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.invitations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invitations.is_empty()
    }

    /// Invitations ordered by code
    pub fn iter(&self) -> impl Iterator<Item = &Invitation> {
        self.invitations.values()
    }

    fn insert(&mut self, draft: GuestDraft) {
        self.invitations
            .entry(draft.code.clone())
            .or_insert_with(|| Invitation::new(&draft))
            .push(draft);
    }
}
