//! PostgreSQL record store.
//!
//! Every collection shares one `records` table; a record's fields live in a
//! JSONB `data` column. Equality filters compile to `data ->> $n = $m` with
//! both the field name and the value bound as parameters.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{Filter, Record, RecordStore, Sort, SortOrder};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS records (
        collection TEXT NOT NULL,
        id TEXT NOT NULL,
        data JSONB NOT NULL,
        created TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated TIMESTAMPTZ NOT NULL DEFAULT now(),
        PRIMARY KEY (collection, id)
    )
"#;

const CREATE_DATA_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS records_data_idx ON records USING GIN (data)";

/// PostgreSQL implementation of the RecordStore port.
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    /// Creates a new PostgresRecordStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `records` table and its index if they do not exist.
    pub async fn migrate(&self) -> Result<(), DomainError> {
        for statement in [CREATE_TABLE, CREATE_DATA_INDEX] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("migrate records table", e))?;
        }
        Ok(())
    }
}

/// Database row representation of a record.
#[derive(Debug, sqlx::FromRow)]
struct RecordRow {
    id: String,
    data: Json<Map<String, Value>>,
}

impl RecordRow {
    fn into_record(self, collection: &str) -> Record {
        Record::from_fields(collection, self.id, self.data.0)
    }
}

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

/// Text form of a JSON value as `->>` renders it. `None` for JSON null.
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Builds the WHERE clause for `filter`, numbering parameters after `$1`
/// (the collection). Returns the SQL and the values to bind, in order.
fn where_clause(filter: &Filter) -> (String, Vec<String>) {
    let mut sql = String::from("WHERE collection = $1");
    let mut binds = Vec::new();

    for (field, value) in filter.conditions() {
        binds.push(field.clone());
        let field_param = binds.len() + 1;
        match text_value(value) {
            Some(text) => {
                binds.push(text);
                sql.push_str(&format!(
                    " AND data ->> ${} = ${}",
                    field_param,
                    binds.len() + 1
                ));
            }
            None => sql.push_str(&format!(" AND data ->> ${} IS NULL", field_param)),
        }
    }
    (sql, binds)
}

fn bind_all<'q>(
    mut query: QueryAs<'q, Postgres, RecordRow, PgArguments>,
    binds: Vec<String>,
) -> QueryAs<'q, Postgres, RecordRow, PgArguments> {
    for value in binds {
        query = query.bind(value);
    }
    query
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Record>, DomainError> {
        let row: Option<RecordRow> =
            sqlx::query_as("SELECT id, data FROM records WHERE collection = $1 AND id = $2")
                .bind(collection)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find record", e))?;

        Ok(row.map(|r| r.into_record(collection)))
    }

    async fn find_first_by_filter(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Record>, DomainError> {
        let (clause, binds) = where_clause(filter);
        let sql = format!("SELECT id, data FROM records {} ORDER BY created LIMIT 1", clause);

        let query = sqlx::query_as::<_, RecordRow>(&sql).bind(collection);
        let row = bind_all(query, binds)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("query records", e))?;

        Ok(row.map(|r| r.into_record(collection)))
    }

    async fn find_by_filter(
        &self,
        collection: &str,
        filter: &Filter,
        sort: Option<&Sort>,
        limit: usize,
    ) -> Result<Vec<Record>, DomainError> {
        let (clause, mut binds) = where_clause(filter);
        let mut sql = format!("SELECT id, data FROM records {}", clause);

        if let Some(sort) = sort {
            binds.push(sort.field.clone());
            let direction = match sort.order {
                SortOrder::Ascending => "ASC",
                SortOrder::Descending => "DESC",
            };
            sql.push_str(&format!(" ORDER BY data -> ${} {}", binds.len() + 1, direction));
        }
        sql.push_str(&format!(" LIMIT {}", limit));

        let query = sqlx::query_as::<_, RecordRow>(&sql).bind(collection);
        let rows = bind_all(query, binds)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("query records", e))?;

        Ok(rows.into_iter().map(|r| r.into_record(collection)).collect())
    }

    async fn create(&self, record: &Record) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO records (collection, id, data) VALUES ($1, $2, $3)")
            .bind(record.collection())
            .bind(record.id())
            .bind(Json(record.fields()))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return DomainError::new(
                            ErrorCode::Conflict,
                            format!("Record '{}' already exists", record.id()),
                        )
                        .with_detail("collection", record.collection());
                    }
                }
                db_error("create record", e)
            })?;

        Ok(())
    }

    async fn save(&self, record: &Record) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO records (collection, id, data) VALUES ($1, $2, $3)
            ON CONFLICT (collection, id)
            DO UPDATE SET data = EXCLUDED.data, updated = now()
            "#,
        )
        .bind(record.collection())
        .bind(record.id())
        .bind(Json(record.fields()))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("save record", e))?;

        Ok(())
    }

    async fn save_if(
        &self,
        record: &Record,
        field: &str,
        expected: &Value,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE records SET data = $3, updated = now()
            WHERE collection = $1 AND id = $2 AND data -> $4 = $5
            "#,
        )
        .bind(record.collection())
        .bind(record.id())
        .bind(Json(record.fields()))
        .bind(field)
        .bind(Json(expected))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("conditionally update record", e))?;

        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn where_clause_numbers_parameters_after_collection() {
        let filter = Filter::new().eq("application", "T1").eq("enabled", true);

        let (sql, binds) = where_clause(&filter);

        assert_eq!(
            sql,
            "WHERE collection = $1 AND data ->> $2 = $3 AND data ->> $4 = $5"
        );
        assert_eq!(binds, vec!["application", "T1", "enabled", "true"]);
    }

    #[test]
    fn null_condition_compiles_to_is_null() {
        let filter = Filter::new().eq("deleted", Value::Null);

        let (sql, binds) = where_clause(&filter);

        assert_eq!(sql, "WHERE collection = $1 AND data ->> $2 IS NULL");
        assert_eq!(binds, vec!["deleted"]);
    }

    #[test]
    fn text_value_matches_jsonb_text_rendering() {
        assert_eq!(text_value(&Value::from("abc")), Some("abc".to_string()));
        assert_eq!(text_value(&Value::from(130.43)), Some("130.43".to_string()));
        assert_eq!(text_value(&Value::from(false)), Some("false".to_string()));
        assert_eq!(text_value(&Value::Null), None);
    }
}
