// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! In-memory [`RemoteStore`] used in tests and local development
use crate::address::CellAddress;
use crate::store::{RemoteStore, StoreError};
use async_trait::async_trait;
use parking_lot::Mutex;
use sheets_client::{CellValue, Row};

/// A single recorded cell write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Write {
    pub address: String,
    pub value: String,
}

/// Keeps rows in memory and applies writes to them
///
/// Row numbers of written addresses are mapped back to row indices with the given header offset,
/// so reads after writes behave like the real sheet.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    header_offset: u32,
}

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<Row>,
    writes: Vec<Write>,
    failing: bool,
}

impl MemoryStore {
    pub fn new(rows: Vec<Row>, header_offset: u32) -> Self {
        Self {
            inner: Mutex::new(Inner {
                rows,
                writes: Vec::new(),
                failing: false,
            }),
            header_offset,
        }
    }

    /// Make every following call fail with [`StoreError::Unavailable`]
    pub fn set_failing(&self, failing: bool) {
        self.inner.lock().failing = failing;
    }

    /// All writes in the order they were issued
    pub fn writes(&self) -> Vec<Write> {
        self.inner.lock().writes.clone()
    }

    pub fn rows(&self) -> Vec<Row> {
        self.inner.lock().rows.clone()
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn fetch_rows(&self) -> Result<Vec<Row>, StoreError> {
        let inner = self.inner.lock();

        if inner.failing {
            return Err(StoreError::Unavailable("memory store is failing".into()));
        }

        Ok(inner.rows.clone())
    }

    async fn write_cell(&self, address: &CellAddress, value: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();

        if inner.failing {
            return Err(StoreError::Unavailable("memory store is failing".into()));
        }

        inner.writes.push(Write {
            address: address.to_string(),
            value: value.to_owned(),
        });

        let column = column_index(&address.column);
        let row_index = address.row.checked_sub(u64::from(self.header_offset));

        if let (Some(column), Some(row_index)) = (column, row_index) {
            let Ok(row_index) = usize::try_from(row_index) else {
                return Ok(());
            };

            if inner.rows.len() <= row_index {
                inner.rows.resize_with(row_index + 1, Vec::new);
            }

            let row = &mut inner.rows[row_index];
            if row.len() <= column {
                row.resize(column + 1, CellValue::Empty);
            }
            row[column] = CellValue::from(value);
        }

        Ok(())
    }
}

/// 0-based index of an A1 column name (`A` -> 0, `AA` -> 26)
fn column_index(column: &str) -> Option<usize> {
    column
        .chars()
        .try_fold(0usize, |index, c| {
            let digit = c.to_ascii_uppercase();
            digit
                .is_ascii_uppercase()
                .then(|| index * 26 + (digit as usize - 'A' as usize + 1))
        })
        .and_then(|index| index.checked_sub(1))
}
