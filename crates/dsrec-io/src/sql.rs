//! Statement builders.
//!
//! This is the only module that assembles SQL text. The only interpolated
//! pieces are a sanitized `DatasetName` (always quoted), column names taken
//! from `Schema`, and the fixed literals of `SortField`/`SortOrder`. Data values
//! are always bound as numbered parameters.

use dsrec_core::ident::DatasetName;
use dsrec_core::query::{SortField, SortOrder};
use dsrec_core::schema::{DataType, Field, Schema};

/// Count of tables named `?1`. Table names compare case-insensitively, as they
/// do in SQL statements.
pub const TABLE_EXISTS: &str =
    "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE";

/// Quote a dataset name for identifier position.
///
/// `DatasetName` cannot contain `"`, so wrapping is enough; quoting lets names
/// such as `2024` or `order` work as table names.
pub fn table_ident(table: &DatasetName) -> String {
    format!("\"{}\"", table.as_str())
}

/// `CREATE TABLE IF NOT EXISTS` for `schema`. Bounded text columns carry a
/// length check, so oversize values fail as ordinary constraint violations.
pub fn create_table(table: &DatasetName, schema: &Schema) -> String {
    let columns = schema
        .fields
        .iter()
        .map(column_def)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        table_ident(table),
        columns
    )
}

fn column_def(field: &Field) -> String {
    let mut def = format!("{} {}", field.name, sql_type(field));
    if !field.nullable {
        def.push_str(" NOT NULL");
    }
    if field.primary_key {
        def.push_str(" PRIMARY KEY");
    }
    if let (DataType::Utf8, Some(max)) = (field.data_type, field.max_len) {
        def.push_str(&format!(" CHECK (length({}) <= {})", field.name, max));
    }
    def
}

fn sql_type(field: &Field) -> String {
    match (field.data_type, field.max_len) {
        (DataType::Boolean, _) => "BOOLEAN".into(),
        (DataType::Int32, _) => "INT".into(),
        (DataType::Int64, _) => "BIGINT".into(),
        (DataType::Float64, _) => "DOUBLE".into(),
        (DataType::Utf8, Some(max)) => format!("VARCHAR({max})"),
        (DataType::Utf8, None) => "TEXT".into(),
        (DataType::Binary, _) => "BLOB".into(),
    }
}

pub fn insert(table: &DatasetName, schema: &Schema) -> String {
    let placeholders = (1..=schema.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table_ident(table),
        schema.column_list(),
        placeholders
    )
}

pub fn select_all(table: &DatasetName, schema: &Schema) -> String {
    format!(
        "SELECT {} FROM {}",
        schema.column_list(),
        table_ident(table)
    )
}

pub fn select_ordered(
    table: &DatasetName,
    schema: &Schema,
    field: SortField,
    order: SortOrder,
) -> String {
    format!(
        "{} ORDER BY {} {}",
        select_all(table, schema),
        field.column(),
        order.keyword()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emp() -> DatasetName {
        DatasetName::parse("employees").unwrap()
    }

    #[test]
    fn create_table_text() {
        assert_eq!(
            create_table(&emp(), &Schema::record()),
            "CREATE TABLE IF NOT EXISTS \"employees\" (\
             id BIGINT NOT NULL PRIMARY KEY, \
             name VARCHAR(100) NOT NULL CHECK (length(name) <= 100), \
             age INT NOT NULL, \
             department VARCHAR(50) NOT NULL CHECK (length(department) <= 50))"
        );
    }

    #[test]
    fn insert_binds_every_column() {
        assert_eq!(
            insert(&emp(), &Schema::record()),
            "INSERT INTO \"employees\" (id, name, age, department) VALUES (?1, ?2, ?3, ?4)"
        );
    }

    #[test]
    fn select_statements() {
        let schema = Schema::record();
        assert_eq!(
            select_all(&emp(), &schema),
            "SELECT id, name, age, department FROM \"employees\""
        );
        assert_eq!(
            select_ordered(&emp(), &schema, SortField::Age, SortOrder::Desc),
            "SELECT id, name, age, department FROM \"employees\" ORDER BY age DESC"
        );
        assert_eq!(
            select_ordered(&emp(), &schema, SortField::Name, SortOrder::Asc),
            "SELECT id, name, age, department FROM \"employees\" ORDER BY name ASC"
        );
    }
}
