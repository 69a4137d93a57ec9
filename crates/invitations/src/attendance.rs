// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::schema::Field;
use serde::{Deserialize, Serialize};
use sheets_client::CellValue;
use std::fmt;
use std::str::FromStr;

/// Attendance answer of a guest for a single event
///
/// "No answer yet" and "declined" are different answers and must both survive a round trip
/// through the sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriState {
    #[default]
    Unknown,
    Attending,
    NotAttending,
}

impl From<bool> for TriState {
    fn from(attending: bool) -> Self {
        if attending {
            Self::Attending
        } else {
            Self::NotAttending
        }
    }
}

/// The sheet's vocabulary for attendance cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    attending: String,
    declined: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            attending: "✓".into(),
            declined: "✗".into(),
        }
    }
}

impl Markers {
    /// Returns `None` if a marker is empty or both markers are equal
    pub fn new(attending: String, declined: String) -> Option<Self> {
        if attending.is_empty() || declined.is_empty() || attending == declined {
            return None;
        }

        Some(Self {
            attending,
            declined,
        })
    }

    pub fn attending(&self) -> &str {
        &self.attending
    }

    pub fn declined(&self) -> &str {
        &self.declined
    }

    /// Exact match on the markers, anything else (including absent cells) is [`TriState::Unknown`]
    pub fn decode(&self, cell: Option<&CellValue>) -> TriState {
        match cell.and_then(CellValue::as_text) {
            Some(text) if text == self.attending => TriState::Attending,
            Some(text) if text == self.declined => TriState::NotAttending,
            _ => TriState::Unknown,
        }
    }

    /// Cell content for the given state, unknown is written as a blank cell
    pub fn encode(&self, state: TriState) -> &str {
        match state {
            TriState::Unknown => "",
            TriState::Attending => &self.attending,
            TriState::NotAttending => &self.declined,
        }
    }

    /// Invitation cells count as set when they hold the attending marker
    pub fn is_marked(&self, cell: Option<&CellValue>) -> bool {
        self.decode(cell) == TriState::Attending
    }
}

/// The events a guest can be invited to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Event {
    Ceremony,
    Reception,
}

impl Event {
    /// Column holding the guest's answer for this event
    pub fn confirmation_field(self) -> Field {
        match self {
            Event::Ceremony => Field::CeremonyConfirmed,
            Event::Reception => Field::ReceptionConfirmed,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Ceremony => f.write_str("ceremony"),
            Event::Reception => f.write_str("reception"),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown event {0:?}")]
pub struct UnknownEvent(String);

impl FromStr for Event {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ceremony" => Ok(Event::Ceremony),
            "reception" => Ok(Event::Reception),
            other => Err(UnknownEvent(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn markers_round_trip() {
        let markers = Markers::default();

        for state in [TriState::Attending, TriState::NotAttending] {
            let encoded = CellValue::from(markers.encode(state));
            assert_eq!(markers.decode(Some(&encoded)), state);
        }
    }

    #[test]
    fn unrecognized_content_is_unknown() {
        let markers = Markers::default();

        assert_eq!(markers.decode(None), TriState::Unknown);
        assert_eq!(markers.decode(Some(&CellValue::Empty)), TriState::Unknown);
        assert_eq!(markers.decode(Some(&"".into())), TriState::Unknown);
        assert_eq!(markers.decode(Some(&"yes".into())), TriState::Unknown);
        assert_eq!(markers.decode(Some(&" ✓".into())), TriState::Unknown);
        assert_eq!(
            markers.decode(Some(&CellValue::Bool(true))),
            TriState::Unknown
        );
        assert_eq!(markers.encode(TriState::Unknown), "");
    }

    #[test]
    fn custom_markers() {
        let markers = Markers::new("y".into(), "n".into()).unwrap();

        assert_eq!(markers.decode(Some(&"y".into())), TriState::Attending);
        assert_eq!(markers.decode(Some(&"n".into())), TriState::NotAttending);
        assert_eq!(markers.decode(Some(&"✓".into())), TriState::Unknown);

        assert!(Markers::new("x".into(), "x".into()).is_none());
        assert!(Markers::new("".into(), "n".into()).is_none());
    }

    #[test]
    fn events_from_path() {
        assert_eq!("ceremony".parse(), Ok(Event::Ceremony));
        assert_eq!("reception".parse(), Ok(Event::Reception));
        assert_eq!(
            "Reception".parse::<Event>(),
            Err(UnknownEvent("Reception".into()))
        );
        assert_eq!(Event::Ceremony.confirmation_field(), Field::CeremonyConfirmed);
        assert_eq!(
            Event::Reception.confirmation_field(),
            Field::ReceptionConfirmed
        );
    }

    #[test]
    fn tri_state_serializes_camel_case() {
        assert_eq!(
            serde_json::to_value(TriState::NotAttending).unwrap(),
            serde_json::json!("notAttending")
        );
        assert_eq!(TriState::from(true), TriState::Attending);
        assert_eq!(TriState::from(false), TriState::NotAttending);
    }
}
