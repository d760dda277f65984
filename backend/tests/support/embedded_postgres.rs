//! Temporary databases on the shared embedded PostgreSQL cluster.
//!
//! Every database is migrated through the crate's own embedded migrations,
//! so the suites run against exactly the schema the server applies at
//! startup.

use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::sql_types::BigInt;
use diesel::{Connection, QueryableByName, RunQueryDsl};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use recipe_notebook::outbound::persistence::run_pending_migrations;
use tokio::runtime::Runtime;

const CLUSTER_RETRIES: usize = 5;
const CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Create a fresh database on the shared cluster and apply every migration.
///
/// The returned handle drops the database when it goes out of scope.
pub fn migrated_database(runtime: &Runtime) -> Result<TemporaryDatabase, String> {
    let mut attempt = 1;
    let cluster = loop {
        match shared_cluster_handle() {
            Ok(handle) => break handle,
            Err(error) if attempt < CLUSTER_RETRIES => {
                eprintln!("pg-embed: cluster attempt {attempt}/{CLUSTER_RETRIES} failed: {error:?}");
                std::thread::sleep(CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
            Err(error) => return Err(format!("shared cluster: {error:?}")),
        }
    };
    let name = format!("test_{}", uuid::Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(name.as_str())
        .map_err(|err| format!("create database: {err:?}"))?;
    let url = database.url().to_string();
    runtime
        .block_on(run_pending_migrations(&url))
        .map_err(|err| format!("migrate: {err}"))?;
    Ok(database)
}

/// Run raw SQL outside any repository, for seeding or sabotage.
pub fn execute_sql(url: &str, sql: &str) -> Result<usize, String> {
    let mut conn = PgConnection::establish(url).map_err(|err| err.to_string())?;
    diesel::sql_query(sql)
        .execute(&mut conn)
        .map_err(|err| err.to_string())
}

#[derive(QueryableByName)]
struct Count {
    #[diesel(sql_type = BigInt)]
    total: i64,
}

/// Count rows in `table` whose `recipe_id` is `recipe_id`.
pub fn row_count(url: &str, table: &str, recipe_id: i64) -> Result<i64, String> {
    let mut conn = PgConnection::establish(url).map_err(|err| err.to_string())?;
    let sql = format!("SELECT COUNT(*) AS total FROM {table} WHERE recipe_id = $1");
    diesel::sql_query(sql)
        .bind::<BigInt, _>(recipe_id)
        .get_result::<Count>(&mut conn)
        .map(|row| row.total)
        .map_err(|err| err.to_string())
}
