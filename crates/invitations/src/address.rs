// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use std::fmt;

/// A1-style reference to a single cell, e.g. `D7`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellAddress {
    /// Upper-case column letter(s)
    pub column: String,
    /// 1-based row number
    pub row: u64,
}

impl CellAddress {
    pub fn new(column: impl Into<String>, row: u64) -> Self {
        Self {
            column: column.into(),
            row,
        }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}
