// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Conversion of raw sheet rows into guest records
//!
//! The sheet is edited by hand, so malformed rows are expected at any time. They are skipped
//! instead of failing the whole import.
use crate::attendance::TriState;
use crate::schema::{ColumnSchema, Field};
use sheets_client::CellValue;

/// Invitation codes have exactly this many characters
pub const CODE_LEN: usize = 4;

/// Position of a row inside the fetched range
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowRef {
    /// 0-based index inside the fetched range
    pub row_index: usize,
}

impl RowRef {
    pub fn new(row_index: usize) -> Self {
        Self { row_index }
    }

    /// 1-based row number inside the sheet
    pub fn row_number(self, header_offset: u32) -> u64 {
        self.row_index as u64 + u64::from(header_offset)
    }
}

/// A guest parsed from a single row, not yet attached to an invitation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestDraft {
    /// Upper-cased invitation code
    pub code: String,
    pub first_name: String,
    pub last_name: String,
    pub contact: String,
    pub has_ceremony_invite: bool,
    pub has_reception_invite: bool,
    pub attending_ceremony: TriState,
    pub attending_reception: TriState,
    pub source_row: RowRef,
}

/// Parse a single row
///
/// Returns `None` if the row is too short, lacks a first name or ceremony invitation, or
/// has no text code of exactly [`CODE_LEN`] characters.
///
/// Any content in the ceremony invitation cell invites the guest to the ceremony. The reception
/// invitation only counts if its cell holds the attending marker.
pub fn ingest(
    row: &[CellValue],
    source_row: RowRef,
    schema: &ColumnSchema,
) -> Option<GuestDraft> {
    let cell = |field: Field| row.get(schema.index_of(field));
    let text = |field: Field| {
        cell(field)
            .and_then(CellValue::as_text)
            .unwrap_or_default()
            .to_owned()
    };

    if row.len() < schema.min_row_len() {
        log::trace!("Skipping {:?}, row is too short", source_row);
        return None;
    }

    if is_blank(cell(Field::FirstName)) || is_blank(cell(Field::CeremonyInvited)) {
        log::trace!("Skipping {:?}, no name or ceremony invite", source_row);
        return None;
    }

    let code = match cell(Field::Code).and_then(CellValue::as_text) {
        Some(code) if code.chars().count() == CODE_LEN => code.to_ascii_uppercase(),
        code => {
            log::debug!("Skipping {:?}, invalid invitation code {:?}", source_row, code);
            return None;
        }
    };

    let markers = schema.markers();

    Some(GuestDraft {
        code,
        first_name: text(Field::FirstName),
        last_name: text(Field::LastName),
        contact: text(Field::Contact),
        has_ceremony_invite: true,
        has_reception_invite: markers.is_marked(cell(Field::ReceptionInvited)),
        attending_ceremony: markers.decode(cell(Field::CeremonyConfirmed)),
        attending_reception: markers.decode(cell(Field::ReceptionConfirmed)),
        source_row,
    })
}

fn is_blank(cell: Option<&CellValue>) -> bool {
    cell.map_or(true, CellValue::is_blank)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::schema::{Column, SchemaConfig};
    use pretty_assertions::assert_eq;

    fn row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|cell| CellValue::from(*cell)).collect()
    }

    #[test]
    fn complete_row() {
        let schema = ColumnSchema::default();
        let draft = ingest(
            &row(&["Jayne", "Mandat", "✓", "✓", "✓", "✗", "ab12", "jayne@x.com"]),
            RowRef::new(5),
            &schema,
        )
        .unwrap();

        assert_eq!(
            draft,
            GuestDraft {
                code: "AB12".into(),
                first_name: "Jayne".into(),
                last_name: "Mandat".into(),
                contact: "jayne@x.com".into(),
                has_ceremony_invite: true,
                has_reception_invite: true,
                attending_ceremony: TriState::Attending,
                attending_reception: TriState::NotAttending,
                source_row: RowRef::new(5),
            }
        );
    }

    #[test]
    fn skips_rows_without_first_name_or_ceremony_invite() {
        let schema = ColumnSchema::default();

        let rows = [
            row(&["", "Mandat", "✓", "", "", "", "AB12"]),
            row(&["Jayne", "Mandat", "", "", "", "", "AB12"]),
            vec![
                CellValue::Empty,
                "Mandat".into(),
                "✓".into(),
                CellValue::Empty,
                CellValue::Empty,
                CellValue::Empty,
                "AB12".into(),
            ],
        ];

        for (index, cells) in rows.iter().enumerate() {
            assert_eq!(ingest(cells, RowRef::new(index), &schema), None);
        }
    }

    #[test]
    fn skips_short_and_empty_rows() {
        let schema = ColumnSchema::default();

        assert_eq!(ingest(&[], RowRef::new(0), &schema), None);
        assert_eq!(
            ingest(
                &row(&["Jayne", "Mandat", "✓", "✓", "", ""]),
                RowRef::new(0),
                &schema
            ),
            None
        );
    }

    #[test]
    fn skips_invalid_codes() {
        let schema = ColumnSchema::default();

        for code in ["", "AB1", "AB123", "AB 12 "] {
            assert_eq!(
                ingest(
                    &row(&["Jayne", "", "✓", "", "", "", code]),
                    RowRef::new(0),
                    &schema
                ),
                None,
                "code {code:?} should be rejected"
            );
        }
    }

    #[test]
    fn skips_non_text_codes() {
        let schema = ColumnSchema::default();
        let mut cells = row(&["Jayne", "Mandat", "✓", "✓", "", "", "", "jayne@x.com"]);
        cells[6] = CellValue::Number(1234.0);

        assert_eq!(ingest(&cells, RowRef::new(0), &schema), None);
    }

    #[test]
    fn code_length_counts_characters() {
        let schema = ColumnSchema::default();
        let draft = ingest(
            &row(&["Jayne", "", "✓", "", "", "", "ÄB12"]),
            RowRef::new(0),
            &schema,
        )
        .unwrap();

        assert_eq!(draft.code, "ÄB12");
    }

    #[test]
    fn upper_casing_keeps_the_code_length() {
        let schema = ColumnSchema::default();
        let draft = ingest(
            &row(&["Jayne", "", "✓", "", "", "", "ßb12"]),
            RowRef::new(0),
            &schema,
        )
        .unwrap();

        assert_eq!(draft.code, "ßB12");
        assert_eq!(draft.code.chars().count(), CODE_LEN);
    }

    #[test]
    fn any_ceremony_invite_content_invites_to_the_ceremony() {
        let schema = ColumnSchema::default();

        for invite in [CellValue::Bool(true), "x".into(), "yes".into(), "✓".into()] {
            let cells = vec![
                "Jayne".into(),
                "Mandat".into(),
                invite.clone(),
                CellValue::Empty,
                "x".into(),
                CellValue::Empty,
                "AB12".into(),
            ];

            let draft = ingest(&cells, RowRef::new(0), &schema).unwrap();

            assert!(draft.has_ceremony_invite, "{invite:?}");
            assert!(!draft.has_reception_invite, "{invite:?}");
        }
    }

    #[test]
    fn optional_cells_degrade_to_empty_strings() {
        let schema = ColumnSchema::default();
        let cells = vec![
            "Frank".into(),
            CellValue::Number(7.0),
            "✓".into(),
            CellValue::Bool(true),
            CellValue::Empty,
            CellValue::Empty,
            "AB12".into(),
            CellValue::Bool(false),
        ];

        let draft = ingest(&cells, RowRef::new(1), &schema).unwrap();

        assert_eq!(draft.last_name, "");
        assert_eq!(draft.contact, "");
        assert_eq!(draft.attending_ceremony, TriState::Unknown);
        assert!(!draft.has_reception_invite);
    }

    #[test]
    fn missing_trailing_cells_are_tolerated() {
        let schema = ColumnSchema::default();
        let draft = ingest(
            &row(&["Frank", "Amankrah", "✓", "", "", "", "AB12"]),
            RowRef::new(1),
            &schema,
        )
        .unwrap();

        assert_eq!(draft.contact, "");
        assert_eq!(draft.attending_reception, TriState::Unknown);
    }

    #[test]
    fn non_text_first_name_keeps_the_guest() {
        let schema = ColumnSchema::default();
        let mut cells = row(&["", "Mandat", "✓", "", "", "", "AB12"]);
        cells[0] = CellValue::Number(42.0);

        let draft = ingest(&cells, RowRef::new(0), &schema).unwrap();

        assert_eq!(draft.first_name, "");
        assert_eq!(draft.last_name, "Mandat");
    }

    #[test]
    fn follows_the_configured_layout() {
        let mut config = SchemaConfig::default();
        config.columns.code = Column::read_only(0);
        config.columns.first_name = Column::read_only(6);

        let schema = ColumnSchema::new(config).unwrap();
        let draft = ingest(
            &row(&["ab12", "Mandat", "✓", "", "", "", "Jayne"]),
            RowRef::new(0),
            &schema,
        )
        .unwrap();

        assert_eq!(draft.code, "AB12");
        assert_eq!(draft.first_name, "Jayne");
    }

    #[test]
    fn row_numbers_include_the_header_offset() {
        assert_eq!(RowRef::new(5).row_number(3), 8);
        assert_eq!(RowRef::new(0).row_number(2), 2);
    }
}
