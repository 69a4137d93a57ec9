// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::address::CellAddress;
use crate::attendance::Event;
use crate::demo;
use crate::invitation::{Invitation, InvitationList};
use crate::mutator::{self, AttendanceError};
use crate::schema::ColumnSchema;
use crate::store::{RemoteStore, StoreError};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum RsvpError {
    #[error("no invitation with code {0:?}")]
    InvitationNotFound(String),
    #[error("no guest named {first_name:?} {last_name:?} on the invitation")]
    GuestNotFound {
        first_name: String,
        last_name: String,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Attendance(#[from] AttendanceError),
}

/// Outcome of an attendance update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    /// The answer was written to the given cell
    Written(CellAddress),
    /// The invitation is a demo invitation, nothing was written
    Demo,
}

/// Entry point for invitation lookups and RSVP updates
///
/// Every call fetches the whole range again, no state is kept between calls.
#[derive(Clone)]
pub struct InvitationStore {
    store: Arc<dyn RemoteStore>,
    schema: Arc<ColumnSchema>,
    demo_invitations: bool,
}

impl InvitationStore {
    pub fn new(store: Arc<dyn RemoteStore>, schema: ColumnSchema) -> Self {
        Self {
            store,
            schema: Arc::new(schema),
            demo_invitations: false,
        }
    }

    /// Resolve the fixed demo codes without touching the remote store
    pub fn with_demo_invitations(mut self, enabled: bool) -> Self {
        self.demo_invitations = enabled;
        self
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Fetch and aggregate all invitations
    pub async fn invitations(&self) -> Result<InvitationList, StoreError> {
        let rows = self.store.fetch_rows().await?;

        Ok(InvitationList::aggregate(&rows, &self.schema))
    }

    pub async fn find_invitation(&self, code: &str) -> Result<Invitation, RsvpError> {
        if let Some(invitation) = self.demo(code) {
            return Ok(invitation);
        }

        self.invitations()
            .await?
            .take(code)
            .ok_or_else(|| RsvpError::InvitationNotFound(code.to_owned()))
    }

    /// Record a guest's answer for an event
    ///
    /// Nothing is written if the invitation or the guest cannot be found.
    pub async fn set_attendance(
        &self,
        code: &str,
        first_name: &str,
        last_name: &str,
        event: Event,
        attending: bool,
    ) -> Result<Recorded, RsvpError> {
        let demo = self.demo(code).is_some();
        let mut invitation = self.find_invitation(code).await?;

        let guest = invitation
            .find_guest_mut(first_name, last_name)
            .ok_or_else(|| RsvpError::GuestNotFound {
                first_name: first_name.to_owned(),
                last_name: last_name.to_owned(),
            })?;

        if demo {
            log::debug!("Ignoring {} update for demo invitation {}", event, code);
            return Ok(Recorded::Demo);
        }

        let address =
            mutator::set_attendance(&*self.store, &self.schema, guest, event, attending).await?;

        Ok(Recorded::Written(address))
    }

    fn demo(&self, code: &str) -> Option<Invitation> {
        if self.demo_invitations {
            demo::invitation(code)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::attendance::TriState;
    use crate::memory::{MemoryStore, Write};
    use pretty_assertions::assert_eq;
    use sheets_client::{CellValue, Row};

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|cell| CellValue::from(*cell)).collect()
    }

    fn setup() -> (Arc<MemoryStore>, InvitationStore) {
        let schema = ColumnSchema::default();
        let store = Arc::new(MemoryStore::new(
            vec![
                row(&["Jayne", "Mandat", "✓", "✓", "", "", "AB12", "jayne@x.com"]),
                row(&["Frank", "Amankrah", "✓", "", "", "", "AB12", "frank@x.com"]),
            ],
            schema.header_offset(),
        ));

        let invitations = InvitationStore::new(store.clone(), schema);

        (store, invitations)
    }

    #[tokio::test]
    async fn finds_invitations_case_insensitively() {
        let (_, invitations) = setup();

        let invitation = invitations.find_invitation("ab12").await.unwrap();

        assert_eq!(invitation.code, "AB12");
        assert_eq!(invitation.guests.len(), 2);
    }

    #[tokio::test]
    async fn unknown_code() {
        let (_, invitations) = setup();

        assert!(matches!(
            invitations.find_invitation("ZZ99").await,
            Err(RsvpError::InvitationNotFound(code)) if code == "ZZ99"
        ));
    }

    #[tokio::test]
    async fn updates_reach_the_next_lookup() {
        let (store, invitations) = setup();

        let recorded = invitations
            .set_attendance("AB12", "Frank", "Amankrah", Event::Ceremony, true)
            .await
            .unwrap();

        assert_eq!(recorded, Recorded::Written(CellAddress::new("D", 3)));
        assert_eq!(
            store.writes(),
            vec![Write {
                address: "D3".into(),
                value: "✓".into()
            }]
        );

        let invitation = invitations.find_invitation("AB12").await.unwrap();
        assert_eq!(invitation.guests[1].attending_ceremony, TriState::Attending);
    }

    #[tokio::test]
    async fn missing_guest_issues_no_write() {
        let (store, invitations) = setup();

        let result = invitations
            .set_attendance("AB12", "Judith", "Mandat", Event::Reception, true)
            .await;

        assert!(matches!(result, Err(RsvpError::GuestNotFound { .. })));
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn guest_names_are_case_sensitive() {
        let (store, invitations) = setup();

        let result = invitations
            .set_attendance("AB12", "frank", "amankrah", Event::Ceremony, false)
            .await;

        assert!(matches!(result, Err(RsvpError::GuestNotFound { .. })));
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn remote_failures_surface() {
        let (store, invitations) = setup();
        store.set_failing(true);

        assert!(matches!(
            invitations.find_invitation("AB12").await,
            Err(RsvpError::Store(StoreError::Unavailable(_)))
        ));
    }

    #[tokio::test]
    async fn demo_invitations_are_opt_in() {
        let (store, invitations) = setup();

        assert!(matches!(
            invitations.find_invitation(demo::CEREMONY).await,
            Err(RsvpError::InvitationNotFound(_))
        ));

        let invitations = invitations.with_demo_invitations(true);
        store.set_failing(true);

        let invitation = invitations.find_invitation(demo::LARGE).await.unwrap();
        assert_eq!(invitation.guests.len(), 4);

        let recorded = invitations
            .set_attendance(demo::CEREMONY, "Frank", "Amankrah", Event::Ceremony, true)
            .await
            .unwrap();
        assert_eq!(recorded, Recorded::Demo);
        assert!(store.writes().is_empty());
    }
}
