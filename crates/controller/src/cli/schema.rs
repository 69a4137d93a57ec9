// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use crate::settings::Settings;
use anyhow::Result;
use invitations::ColumnSchema;
use tabled::{Style, Table, Tabled};

#[derive(Tabled)]
struct ColumnTableRow {
    field: &'static str,
    index: usize,
    letter: String,
}

/// Implementation of the `hitched-controller schema` command
pub fn print_schema(settings: &Settings) -> Result<()> {
    let schema = crate::store::column_schema(settings)?;

    println!("{}", Table::new(rows(&schema)).with(Style::ascii()));
    println!("header offset: {}", schema.header_offset());
    println!(
        "markers: attending {:?}, declined {:?}",
        schema.markers().attending(),
        schema.markers().declined()
    );

    Ok(())
}

fn rows(schema: &ColumnSchema) -> Vec<ColumnTableRow> {
    schema
        .columns()
        .map(|(field, column)| ColumnTableRow {
            field: field.as_str(),
            index: column.index,
            letter: column.letter.clone().unwrap_or_else(|| "-".into()),
        })
        .collect()
}
