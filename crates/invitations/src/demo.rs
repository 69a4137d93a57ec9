// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Fixed invitations for trying out a frontend without a prepared sheet
use crate::attendance::TriState::{self, Attending, Unknown};
use crate::invitation::{Guest, Invitation};

pub const CEREMONY: &str = "test-ceremony";
pub const RECEPTION: &str = "test-reception";
pub const LARGE: &str = "test-large";

/// Returns the demo invitation for `code`, if there is one
pub fn invitation(code: &str) -> Option<Invitation> {
    let code = code.to_ascii_lowercase();

    let invitation = match code.as_str() {
        CEREMONY => Invitation {
            code,
            has_ceremony_invite: true,
            has_reception_invite: false,
            guests: vec![
                guest("Jayne", "Mandat", "jayne.mandat@gmail.com", Attending, Unknown),
                guest("Frank", "Amankrah", "frank@frnk.ca", Unknown, Unknown),
            ],
        },
        RECEPTION => Invitation {
            code,
            has_ceremony_invite: true,
            has_reception_invite: true,
            guests: vec![
                guest("Jayne", "Mandat", "jayne.mandat@gmail.com", Attending, Attending),
                guest("Frank", "Amankrah", "frank@frnk.ca", Unknown, Unknown),
            ],
        },
        LARGE => Invitation {
            code,
            has_ceremony_invite: true,
            has_reception_invite: true,
            guests: vec![
                guest("Jayne", "Mandat", "jayne.mandat@gmail.com", Attending, Unknown),
                guest("Jasmine", "Mandat", "jasmine.mandat@gmail.com", Unknown, Unknown),
                guest("Judith", "Mandat", "judith.mandat@gmail.com", Unknown, Unknown),
                guest("Frank", "Amankrah", "frank@frnk.ca", Unknown, Unknown),
            ],
        },
        _ => return None,
    };

    Some(invitation)
}

fn guest(
    first_name: &str,
    last_name: &str,
    contact: &str,
    attending_ceremony: TriState,
    attending_reception: TriState,
) -> Guest {
    Guest {
        first_name: first_name.into(),
        last_name: last_name.into(),
        contact: contact.into(),
        attending_ceremony,
        attending_reception,
        source_row: None,
    }
}
