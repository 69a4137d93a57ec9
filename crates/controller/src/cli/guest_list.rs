// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::settings::Settings;
use anyhow::Result;
use clap::Subcommand;
use invitations::{Guest, Invitation, TriState};
use tabled::{Style, Table, Tabled};

#[derive(Subcommand, Debug, Clone)]
#[clap(rename_all = "kebab_case")]
pub enum Command {
    /// List all invitations found in the guest sheet
    List,
    /// Show the guests of a single invitation
    Show {
        /// Invitation code, case-insensitive
        code: String,
    },
}

pub async fn handle_command(settings: Settings, command: Command) -> Result<()> {
    let invitations = crate::store::connect(&settings).await?;

    match command {
        Command::List => {
            let list = invitations.invitations().await?;
            let rows: Vec<InvitationTableRow> =
                list.iter().map(InvitationTableRow::from_invitation).collect();

            println!("{}", Table::new(rows).with(Style::ascii()));
            println!("{} invitations", list.len());
        }
        Command::Show { code } => {
            let invitation = invitations.find_invitation(&code).await?;
            let rows: Vec<GuestTableRow> =
                invitation.guests.iter().map(GuestTableRow::from_guest).collect();

            println!("{}", Table::new(rows).with(Style::psql()));
        }
    }

    Ok(())
}

#[derive(Tabled)]
struct InvitationTableRow {
    code: String,
    ceremony: &'static str,
    reception: &'static str,
    guests: String,
}

impl InvitationTableRow {
    fn from_invitation(invitation: &Invitation) -> Self {
        Self {
            code: invitation.code.clone(),
            ceremony: yes_no(invitation.has_ceremony_invite),
            reception: yes_no(invitation.has_reception_invite),
            guests: invitation
                .guests
                .iter()
                .map(full_name)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Tabled)]
struct GuestTableRow {
    name: String,
    contact: String,
    ceremony: &'static str,
    reception: &'static str,
}

impl GuestTableRow {
    fn from_guest(guest: &Guest) -> Self {
        Self {
            name: full_name(guest),
            contact: guest.contact.clone(),
            ceremony: answer(guest.attending_ceremony),
            reception: answer(guest.attending_reception),
        }
    }
}

fn full_name(guest: &Guest) -> String {
    format!("{} {}", guest.first_name, guest.last_name)
        .trim()
        .to_owned()
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn answer(state: TriState) -> &'static str {
    match state {
        TriState::Unknown => "-",
        TriState::Attending => "attending",
        TriState::NotAttending => "not attending",
    }
}
