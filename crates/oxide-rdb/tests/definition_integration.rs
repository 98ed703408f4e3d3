//! Loading databases from JSON schema definitions.

mod common;

use common::{alter_users, create_users};
use oxide_rdb::metadata::{ObjectKind, SchemaDefinition};
use oxide_rdb::prelude::*;

const SCHEMA: &str = r#"{
  "name": "shop",
  "schema": "sales",
  "tables": [
    {
      "name": "users",
      "comment": "Customers",
      "columns": [
        { "name": "id", "sql_type": "bigint", "primary_key": true },
        { "name": "email", "sql_type": "varchar", "length": 128, "not_null": true, "sort_index": 1 },
        {
          "name": "active",
          "sql_type": "boolean",
          "default_value": { "kind": "bool", "value": true },
          "sort_index": 2
        }
      ]
    },
    {
      "name": "active_users",
      "kind": "view",
      "columns": [{ "name": "id", "sql_type": "bigint" }]
    }
  ]
}"#;

fn load(dialect: &str, json: &str) -> DatabaseMetadata {
    let definition = SchemaDefinition::from_json(json).unwrap();
    DatabaseMetadata::from_definition(dialect, definition).unwrap()
}

#[test]
fn test_definition_renders_create() {
    let db = load("postgresql", SCHEMA);
    assert_eq!(
        create_users(&db),
        vec![
            "CREATE TABLE \"sales\".\"users\" (\n    \"id\" bigint NOT NULL,\n    \"email\" varchar(128) NOT NULL,\n    \"active\" boolean DEFAULT TRUE,\n    PRIMARY KEY (\"id\")\n)",
            "COMMENT ON TABLE \"sales\".\"users\" IS 'Customers'",
        ]
    );
}

#[test]
fn test_definition_keeps_views() {
    let db = load("generic", SCHEMA);
    let view = db.require_table("active_users").unwrap();
    assert_eq!(view.metadata().kind(), ObjectKind::View);

    let err = db
        .render(OperationKind::CreateTable, &RenderRequest::create_table(view))
        .unwrap_err();
    assert!(matches!(err, RenderError::Render { object, .. } if object == "active_users"));
}

#[test]
fn test_previous_name_in_definition_renders_rename() {
    let before = load("mssql", SCHEMA);
    let renamed = SCHEMA.replace(
        r#""name": "email","#,
        r#""name": "contact", "previous_name": "email","#,
    );
    let after = load("mssql", &renamed);
    assert_eq!(
        alter_users(&before, &after),
        vec!["EXEC sp_rename 'sales.users.email', 'contact', 'COLUMN'"]
    );
}

#[test]
fn test_capture_round_trips() {
    let db = load("mysql", SCHEMA);
    let captured = SchemaDefinition::from_database(&db);
    let json = serde_json::to_string(&captured).unwrap();
    let reloaded = load("mysql", &json);
    assert_eq!(create_users(&db), create_users(&reloaded));
}

#[test]
fn test_unknown_dialect_and_bad_json() {
    let definition = SchemaDefinition::from_json(SCHEMA).unwrap();
    assert!(matches!(
        DatabaseMetadata::from_definition("oracle", definition),
        Err(RenderError::UnknownDialect(_))
    ));
    assert!(matches!(
        SchemaDefinition::from_json("{\"name\": 1}"),
        Err(RenderError::InvalidDefinition(_))
    ));
}
