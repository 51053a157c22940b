//! DDL generation on Spanner.

mod common;
use common::*;

use dialect_sql_core::schema::{Column, ColumnDescriptor, ForeignKey, Table, UniqueDelegate};
use dialect_sql_core::types::Size;
use dialect_sql_core::{Dialect, DialectError, SqlTypeCode};
use dialect_sql_spanner::{ensure_primary_key, row_id_column, ROW_ID_COLUMN};

fn events() -> Table {
    Table::new("events")
        .column(Column::new("name", SqlTypeCode::Varchar).size(Size::length(80)))
        .column(Column::new("payload", SqlTypeCode::Json))
}

fn users() -> Table {
    Table::new("users")
        .column(Column::new("id", SqlTypeCode::Integer))
        .column(
            Column::new("email", SqlTypeCode::Varchar)
                .size(Size::length(120))
                .not_null()
                .unique(Some("uk_email")),
        )
        .column(Column::new("nick", SqlTypeCode::Char).size(Size::length(8)).unique(None))
        .column(Column::new("city", SqlTypeCode::Varchar).size(Size::length(40)))
        .column(Column::new("country", SqlTypeCode::Varchar).size(Size::length(2)))
        .primary_key(&["id"])
        .index("idx_city", &["city"])
        .unique_key("uk_city_country", &["city", "country"])
}

// ===================================================================
// Schemas
// ===================================================================

#[test]
fn schema_commands_are_refused() {
    let dialect = spanner();
    assert!(matches!(
        dialect.create_schema_command("app"),
        Err(DialectError::UnsupportedCapability { .. })
    ));
    assert!(matches!(
        dialect.drop_schema_command("app"),
        Err(DialectError::UnsupportedCapability { .. })
    ));
    assert_eq!(dialect.current_schema_command(), "");
    assert_eq!(dialect.truncate_table_statement("users"), "delete from users");
    assert_eq!(dialect.row_id(), None);
    assert_eq!(dialect.before_drop_statement(), None);
}

// ===================================================================
// Create
// ===================================================================

#[test]
fn table_without_primary_key_gets_hidden_row_id() {
    let dialect = spanner();
    let table = events();
    let sql = dialect
        .table_exporter()
        .sql_create_strings(&table, &dialect)
        .unwrap();
    assert_eq!(
        sql,
        vec![
            "create table events (name varchar(80), payload jsonb, \
             rowid bigint generated by default as identity (bit_reversed_positive) not null hidden, \
             primary key (rowid))"
                .to_string()
        ]
    );
    // The caller's table is left alone.
    assert!(!table.has_primary_key());
    assert_eq!(table.columns.len(), 2);
}

#[test]
fn ensure_primary_key_adds_one_column() {
    let mut table = events();
    assert!(ensure_primary_key(&mut table));
    assert!(!ensure_primary_key(&mut table));
    assert_eq!(table.columns.len(), 3);
    assert_eq!(
        table.primary_key.as_ref().map(|pk| pk.columns.clone()),
        Some(vec![ROW_ID_COLUMN.to_string()])
    );

    let column = row_id_column();
    assert_eq!(column.column_span(), 1);
    assert_eq!(column.selectables(), vec!["rowid"]);
    assert_eq!(column.type_code(), SqlTypeCode::BigInt);
    assert!(!column.is_nullable());
    assert!(column.identity);
    assert_eq!(column.options.as_deref(), Some("hidden"));
}

#[test]
fn table_with_primary_key_and_unique_indexes() {
    let dialect = spanner();
    let sql = dialect
        .table_exporter()
        .sql_create_strings(&users(), &dialect)
        .unwrap();
    assert_eq!(
        sql,
        vec![
            "create table users (id bigint not null, email varchar(120) not null, \
             nick varchar(8), city varchar(40), country varchar(2), primary key (id))"
                .to_string(),
            "create unique index uk_email on users (email)".to_string(),
            "create unique index uk_users_nick on users (nick)".to_string(),
            "create unique index uk_city_country on users (city, country)".to_string(),
            "create index idx_city on users (city)".to_string(),
        ]
    );
    assert_eq!(dialect.unique_delegate(), UniqueDelegate::CreateUniqueIndex);
}

#[test]
fn table_without_columns_is_rejected() {
    let dialect = spanner();
    let err = dialect
        .table_exporter()
        .sql_create_strings(&Table::new("empty").primary_key(&["id"]), &dialect)
        .unwrap_err();
    assert_eq!(err, DialectError::Mapping("Table [empty] has no columns".to_string()));
}

// ===================================================================
// Drop and foreign keys
// ===================================================================

#[test]
fn indexes_are_dropped_before_the_table() {
    let dialect = spanner();
    assert_eq!(
        dialect
            .table_exporter()
            .sql_drop_strings(&users(), &dialect)
            .unwrap(),
        vec![
            "drop index if exists idx_city".to_string(),
            "drop index if exists uk_city_country".to_string(),
            "drop index if exists uk_email".to_string(),
            "drop index if exists uk_users_nick".to_string(),
            "drop table if exists users".to_string(),
        ]
    );
    assert_eq!(
        dialect
            .table_exporter()
            .sql_drop_strings(&events(), &dialect)
            .unwrap(),
        vec!["drop table if exists events".to_string()]
    );
}

#[test]
fn foreign_keys_always_name_referenced_columns() {
    let dialect = spanner();
    let orders = Table::new("orders")
        .column(Column::new("id", SqlTypeCode::BigInt))
        .column(Column::new("user_id", SqlTypeCode::BigInt))
        .primary_key(&["id"])
        .foreign_key(ForeignKey {
            name: "fk_orders_users".to_string(),
            columns: vec!["user_id".to_string()],
            referenced_table: "users".to_string(),
            referenced_columns: vec!["id".to_string()],
        });
    let exporter = dialect.table_exporter();
    assert_eq!(
        exporter.sql_foreign_key_strings(&orders, &dialect),
        vec![
            "alter table orders add constraint \"fk_orders_users\" foreign key (user_id) \
             references users (id)"
                .to_string()
        ]
    );
    assert_eq!(
        exporter.sql_drop_foreign_key_strings(&orders, &dialect),
        vec!["alter table orders drop constraint fk_orders_users".to_string()]
    );
}

// ===================================================================
// Sequences
// ===================================================================

#[test]
fn sequences_are_bit_reversed() {
    let dialect = spanner();
    let sequences = dialect.sequence_support();
    assert_eq!(
        sequences.create_sequence_string_with("seq_users", 1, 1).unwrap(),
        "create sequence seq_users bit_reversed_positive start counter with 1"
    );
    assert_eq!(
        sequences.restart_sequence_string("seq_users", 1000),
        "alter sequence seq_users restart counter with 1000"
    );
    assert!(matches!(
        sequences.create_sequence_string_with("seq_users", 1, 0),
        Err(DialectError::Mapping(_))
    ));
}
