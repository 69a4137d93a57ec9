// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Test utility functions for use with the invitation store and the controller
pub use ::serde_json;
pub use invitations::memory::{MemoryStore, Write};
pub use pretty_assertions::assert_eq;

use invitations::{CellValue, ColumnSchema, InvitationStore, Row};
use std::sync::Arc;

/// Helper macro to compare a `[Serialize]` implementor with a JSON literal
///
/// Asserts that the left expression equals the right JSON literal when serialized.
///
/// # Examples
///
/// ```
/// use serde::Serialize;
///
/// #[derive(Debug, Serialize)]
/// struct Guest {
///     name: String,
///     plus_ones: u64,
/// }
///
/// #[test]
/// fn test_guest() {
///     let jayne = Guest {
///         name: "jayne".into(),
///         plus_ones: 1,
///     };
///
///     assert_eq_json!(
///         jayne,
///         {
///             "name": "jayne",
///             "plus_ones": 1,
///         }
///     );
/// }
/// ```
#[macro_export]
macro_rules! assert_eq_json {
    ($val:expr,$($json:tt)+) => {
        let val: $crate::serde_json::Value = $crate::serde_json::to_value(&$val)
            .expect("Expected value to be serializable");

        $crate::assert_eq!(val, $crate::serde_json::json!($($json)+));
    };
}

/// Build a row of text cells, empty strings become blank text cells
pub fn row(cells: &[&str]) -> Row {
    cells.iter().map(|cell| CellValue::from(*cell)).collect()
}

/// A small guest sheet in the default column layout
///
/// | row | code | guests |
/// |-----|------|--------|
/// | 2-3 | AB12 | Jayne Mandat (ceremony ✓), Frank Amankrah |
/// | 4 | - | blank row |
/// | 5 | CD34 | Judith Mandat, invited to both events, declined the reception |
pub fn guest_sheet() -> Vec<Row> {
    vec![
        row(&["Jayne", "Mandat", "✓", "✓", "", "", "AB12", "jayne@x.com"]),
        row(&["Frank", "Amankrah", "✓", "", "", "", "AB12", "frank@x.com"]),
        vec![],
        row(&["Judith", "Mandat", "✓", "", "✓", "✗", "cd34", "judith@x.com"]),
    ]
}

/// Invitation store over a [`MemoryStore`] holding [`guest_sheet`]
pub fn memory_invitations() -> (Arc<MemoryStore>, InvitationStore) {
    let schema = ColumnSchema::default();
    let store = Arc::new(MemoryStore::new(guest_sheet(), schema.header_offset()));

    (store.clone(), InvitationStore::new(store, schema))
}
