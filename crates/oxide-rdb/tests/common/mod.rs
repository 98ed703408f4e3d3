#![allow(dead_code)]

use oxide_rdb::prelude::*;

/// `users(id integer pk #0, name varchar(<name_length>) #1)` in a database of
/// the given dialect, optionally schema-qualified.
pub fn users_db(dialect: &str, schema: Option<&str>, name_length: u32) -> DatabaseMetadata {
    let mut db = DatabaseMetadata::for_dialect("app", dialect)
        .unwrap_or_else(|e| panic!("Failed to create {dialect} database: {e}"));
    if let Some(schema) = schema {
        db = db.with_schema(schema);
    }
    let mut users = TableMetadata::new("users", db.dialect().clone());
    users
        .add_column(
            ColumnMetadata::new("id")
                .with_sql_type(SqlType::Integer)
                .primary_key(),
        )
        .unwrap();
    users
        .add_column(
            ColumnMetadata::new("name")
                .with_sql_type(SqlType::Varchar)
                .with_length(name_length)
                .with_sort_index(1),
        )
        .unwrap();
    db.add_table(users).unwrap();
    db
}

/// Mutable access to the `users` table of a fixture database.
pub fn users_mut(db: &mut DatabaseMetadata) -> &mut TableMetadata {
    db.get_table_mut("users").expect("fixture has a users table")
}

/// Renders `request` with the database's own registry.
pub fn render(db: &DatabaseMetadata, request: &RenderRequest<'_>) -> Vec<String> {
    db.render(request.kind(), request)
        .unwrap_or_else(|e| panic!("Failed to render: {e}"))
        .sql()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Renders CREATE TABLE for `users`.
pub fn create_users(db: &DatabaseMetadata) -> Vec<String> {
    let users = db.require_table("users").unwrap();
    render(db, &RenderRequest::create_table(users))
}

/// Renders ALTER TABLE migrating `before.users` into `after.users`.
pub fn alter_users(before: &DatabaseMetadata, after: &DatabaseMetadata) -> Vec<String> {
    let request = RenderRequest::alter_table(
        before.require_table("users").unwrap(),
        after.require_table("users").unwrap(),
    );
    render(after, &request)
}
