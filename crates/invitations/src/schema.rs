// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Column layout of the guest sheet
//!
//! Column order is part of the deployment, not something discovered at runtime. The whole layout
//! is described by a [`SchemaConfig`] which is validated once into a [`ColumnSchema`] at startup.
use crate::attendance::Markers;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Semantic columns of the guest sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    CeremonyInvited,
    CeremonyConfirmed,
    ReceptionInvited,
    ReceptionConfirmed,
    Code,
    Contact,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::FirstName,
        Field::LastName,
        Field::CeremonyInvited,
        Field::CeremonyConfirmed,
        Field::ReceptionInvited,
        Field::ReceptionConfirmed,
        Field::Code,
        Field::Contact,
    ];

    /// Fields that receive attendance writes and therefore need a column letter
    pub fn is_writable(self) -> bool {
        matches!(self, Field::CeremonyConfirmed | Field::ReceptionConfirmed)
    }

    /// Fields that must be present for a row to be ingested at all
    pub fn is_required(self) -> bool {
        matches!(self, Field::FirstName | Field::CeremonyInvited | Field::Code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::CeremonyInvited => "ceremony_invited",
            Field::CeremonyConfirmed => "ceremony_confirmed",
            Field::ReceptionInvited => "reception_invited",
            Field::ReceptionConfirmed => "reception_confirmed",
            Field::Code => "code",
            Field::Contact => "contact",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a field inside a fetched row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// 0-based index inside the fetched range
    pub index: usize,
    /// Spreadsheet column letter, only set for writable fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter: Option<String>,
}

impl Column {
    pub fn read_only(index: usize) -> Self {
        Self {
            index,
            letter: None,
        }
    }

    pub fn writable(index: usize, letter: &str) -> Self {
        Self {
            index,
            letter: Some(letter.to_owned()),
        }
    }
}

/// Per-field column configuration
///
/// Missing fields fall back to the default sheet layout, so a single column can be moved without
/// restating the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Columns {
    pub first_name: Column,
    pub last_name: Column,
    pub ceremony_invited: Column,
    pub ceremony_confirmed: Column,
    pub reception_invited: Column,
    pub reception_confirmed: Column,
    pub code: Column,
    pub contact: Column,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            first_name: Column::read_only(0),
            last_name: Column::read_only(1),
            ceremony_invited: Column::read_only(2),
            ceremony_confirmed: Column::writable(3, "D"),
            reception_invited: Column::read_only(4),
            reception_confirmed: Column::writable(5, "F"),
            code: Column::read_only(6),
            contact: Column::read_only(7),
        }
    }
}

impl Columns {
    fn get(&self, field: Field) -> &Column {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::CeremonyInvited => &self.ceremony_invited,
            Field::CeremonyConfirmed => &self.ceremony_confirmed,
            Field::ReceptionInvited => &self.reception_invited,
            Field::ReceptionConfirmed => &self.reception_confirmed,
            Field::Code => &self.code,
            Field::Contact => &self.contact,
        }
    }
}

/// Unvalidated schema settings, as read from the config file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SchemaConfig {
    /// Added to the 0-based row index of a fetched row to get its 1-based sheet row number
    #[serde(default = "default_header_offset")]
    pub header_offset: u32,
    #[serde(default = "default_attending_marker")]
    pub attending_marker: String,
    #[serde(default = "default_declined_marker")]
    pub declined_marker: String,
    #[serde(default)]
    pub columns: Columns,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            header_offset: default_header_offset(),
            attending_marker: default_attending_marker(),
            declined_marker: default_declined_marker(),
            columns: Columns::default(),
        }
    }
}

fn default_header_offset() -> u32 {
    2
}

fn default_attending_marker() -> String {
    "✓".into()
}

fn default_declined_marker() -> String {
    "✗".into()
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("columns {first} and {second} share the index {index}")]
    DuplicateIndex {
        first: Field,
        second: Field,
        index: usize,
    },
    #[error("writable column {0} requires a column letter")]
    MissingLetter(Field),
    #[error("column letter {letter:?} of {field} is not a valid column")]
    InvalidLetter { field: Field, letter: String },
    #[error("column {0} is read-only and must not have a column letter")]
    UnexpectedLetter(Field),
    #[error("column {0} is not writable")]
    NotWritable(Field),
    #[error("attendance markers must be non-empty and distinct")]
    InvalidMarkers,
    #[error("the header offset must be at least 1")]
    InvalidHeaderOffset,
}

/// Validated, read-only column layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: BTreeMap<Field, Column>,
    header_offset: u32,
    markers: Markers,
}

impl ColumnSchema {
    pub fn new(config: SchemaConfig) -> Result<Self, SchemaError> {
        if config.header_offset == 0 {
            return Err(SchemaError::InvalidHeaderOffset);
        }

        let markers = Markers::new(config.attending_marker, config.declined_marker)
            .ok_or(SchemaError::InvalidMarkers)?;

        let mut columns = BTreeMap::new();
        let mut by_index: BTreeMap<usize, Field> = BTreeMap::new();

        for field in Field::ALL {
            let mut column = config.columns.get(field).clone();

            if let Some(&first) = by_index.get(&column.index) {
                return Err(SchemaError::DuplicateIndex {
                    first,
                    second: field,
                    index: column.index,
                });
            }
            by_index.insert(column.index, field);

            column.letter = match (field.is_writable(), column.letter.take()) {
                (true, None) => return Err(SchemaError::MissingLetter(field)),
                (true, Some(letter)) => Some(normalize_letter(field, &letter)?),
                (false, Some(_)) => return Err(SchemaError::UnexpectedLetter(field)),
                (false, None) => None,
            };

            columns.insert(field, column);
        }

        Ok(Self {
            columns,
            header_offset: config.header_offset,
            markers,
        })
    }

    /// 0-based index of the field inside a fetched row
    pub fn index_of(&self, field: Field) -> usize {
        self.column(field).index
    }

    /// Column letter used to address writes to the field
    pub fn letter_of(&self, field: Field) -> Result<&str, SchemaError> {
        self.column(field)
            .letter
            .as_deref()
            .ok_or(SchemaError::NotWritable(field))
    }

    pub fn header_offset(&self) -> u32 {
        self.header_offset
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Rows shorter than this cannot hold all required fields
    pub fn min_row_len(&self) -> usize {
        Field::ALL
            .into_iter()
            .filter(|field| field.is_required())
            .map(|field| self.index_of(field) + 1)
            .max()
            .unwrap_or_default()
    }

    /// All columns ordered by field
    pub fn columns(&self) -> impl Iterator<Item = (Field, &Column)> {
        self.columns.iter().map(|(field, column)| (*field, column))
    }

    fn column(&self, field: Field) -> &Column {
        // Every field is inserted by the constructor
        &self.columns[&field]
    }
}

impl Default for ColumnSchema {
    fn default() -> Self {
        let columns = Columns::default();

        Self {
            columns: Field::ALL
                .into_iter()
                .map(|field| (field, columns.get(field).clone()))
                .collect(),
            header_offset: default_header_offset(),
            markers: Markers::default(),
        }
    }
}

fn normalize_letter(field: Field, letter: &str) -> Result<String, SchemaError> {
    let letter = letter.trim();

    if letter.is_empty() || !letter.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(SchemaError::InvalidLetter {
            field,
            letter: letter.to_owned(),
        });
    }

    Ok(letter.to_ascii_uppercase())
}
