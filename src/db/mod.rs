pub mod models;

use async_trait::async_trait;
use sqlx::{
    postgres::{PgConnectOptions, PgConnection},
    ConnectOptions, Connection,
};
use tracing::warn;

use models::Reading;

/// Latest reading by `tijdstip`. Rows sharing the greatest timestamp come
/// back in whatever order the planner picks; there is no secondary key.
///
/// Columns are cast to `int4` so `SMALLINT` and `BOOLEAN` stores decode the
/// same way. Rows without a timestamp sort after every dated row.
const LATEST_READING_SQL: &str = r#"
    SELECT vochtigheid::int4 AS vochtigheid,
           waterniveau::int4 AS waterniveau,
           pomp_status::int4 AS pomp_status
    FROM metingen
    ORDER BY tijdstip DESC NULLS LAST
    LIMIT 1
"#;

/// Read access to stored sensor readings.
#[async_trait]
pub trait ReadingStore: Send + Sync + 'static {
    /// The most recent reading, or `None` when the table is empty.
    async fn latest(&self) -> Result<Option<Reading>, sqlx::Error>;
}

/// Postgres-backed store that opens a fresh connection for every call and
/// closes it again before returning.
#[derive(Debug, Clone)]
pub struct PgReadingStore {
    options: PgConnectOptions,
}

impl PgReadingStore {
    pub fn new(options: PgConnectOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl ReadingStore for PgReadingStore {
    async fn latest(&self) -> Result<Option<Reading>, sqlx::Error> {
        let mut conn: PgConnection = self.options.connect().await?;

        let row = sqlx::query_as::<_, Reading>(LATEST_READING_SQL)
            .fetch_optional(&mut conn)
            .await?;

        if let Err(e) = conn.close().await {
            warn!(error = %e, "Failed to close database connection cleanly");
        }

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use sqlx::{postgres::PgPoolOptions, PgPool};

    use super::*;

    async fn insert_reading(pool: &PgPool, secs: Option<i64>, v: i32, w: i32, p: i32) {
        sqlx::query(
            "INSERT INTO metingen (vochtigheid, waterniveau, pomp_status, tijdstip) \
             VALUES ($1, $2, $3, to_timestamp($4::float8))",
        )
        .bind(v)
        .bind(w)
        .bind(p)
        .bind(secs.map(|s| s as f64))
        .execute(pool)
        .await
        .unwrap();
    }

    async fn execute(pool: &PgPool, sql: &str) {
        sqlx::query(sql).execute(pool).await.unwrap();
    }

    fn reading(vochtigheid: i32, waterniveau: i32, pomp_status: i32) -> Reading {
        Reading {
            vochtigheid,
            waterniveau,
            pomp_status,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn latest_is_none_for_empty_table(_pool_options: PgPoolOptions, options: PgConnectOptions) {
        let store = PgReadingStore::new(options);
        assert_eq!(store.latest().await.unwrap(), None);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn latest_picks_greatest_timestamp(pool_options: PgPoolOptions, options: PgConnectOptions) {
        let pool = pool_options.connect_with(options.clone()).await.unwrap();
        // Inserted out of order so the id sequence can't stand in for tijdstip.
        insert_reading(&pool, Some(2), 42, 68, 1).await;
        insert_reading(&pool, Some(1), 40, 70, 0).await;
        pool.close().await;

        let store = PgReadingStore::new(options);
        assert_eq!(store.latest().await.unwrap(), Some(reading(42, 68, 1)));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn latest_is_repeatable_without_writes(pool_options: PgPoolOptions, options: PgConnectOptions) {
        let pool = pool_options.connect_with(options.clone()).await.unwrap();
        insert_reading(&pool, Some(10), 55, 20, 0).await;
        pool.close().await;

        let store = PgReadingStore::new(options);
        let first = store.latest().await.unwrap();
        let second = store.latest().await.unwrap();
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[sqlx::test(migrations = false)]
    async fn latest_skips_rows_without_timestamp(pool_options: PgPoolOptions, options: PgConnectOptions) {
        let pool = pool_options.connect_with(options.clone()).await.unwrap();
        execute(
            &pool,
            "CREATE TABLE metingen (
                vochtigheid INTEGER NOT NULL,
                waterniveau INTEGER NOT NULL,
                pomp_status INTEGER NOT NULL,
                tijdstip    TIMESTAMPTZ
            )",
        )
        .await;
        insert_reading(&pool, Some(1_735_776_000), 42, 68, 1).await;
        insert_reading(&pool, None, 1, 2, 0).await;
        pool.close().await;

        let store = PgReadingStore::new(options);
        assert_eq!(store.latest().await.unwrap(), Some(reading(42, 68, 1)));
    }

    #[sqlx::test(migrations = false)]
    async fn latest_reads_timestamp_without_time_zone(
        pool_options: PgPoolOptions,
        options: PgConnectOptions,
    ) {
        let pool = pool_options.connect_with(options.clone()).await.unwrap();
        execute(
            &pool,
            "CREATE TABLE metingen (
                vochtigheid INTEGER NOT NULL,
                waterniveau INTEGER NOT NULL,
                pomp_status INTEGER NOT NULL,
                tijdstip    TIMESTAMP NOT NULL
            )",
        )
        .await;
        execute(
            &pool,
            "INSERT INTO metingen VALUES
                (40, 70, 0, '2025-01-01 10:00:00'),
                (42, 68, 1, '2025-01-02 10:00:00')",
        )
        .await;
        pool.close().await;

        let store = PgReadingStore::new(options);
        assert_eq!(store.latest().await.unwrap(), Some(reading(42, 68, 1)));
    }

    #[sqlx::test(migrations = false)]
    async fn latest_reads_boolean_and_smallint_columns(
        pool_options: PgPoolOptions,
        options: PgConnectOptions,
    ) {
        let pool = pool_options.connect_with(options.clone()).await.unwrap();
        execute(
            &pool,
            "CREATE TABLE metingen (
                vochtigheid SMALLINT  NOT NULL,
                waterniveau SMALLINT  NOT NULL,
                pomp_status BOOLEAN   NOT NULL,
                tijdstip    TIMESTAMP NOT NULL DEFAULT now()
            )",
        )
        .await;
        execute(
            &pool,
            "INSERT INTO metingen VALUES
                (40, 70, false, '2025-01-01 10:00:00'),
                (42, 68, true,  '2025-01-02 10:00:00')",
        )
        .await;
        pool.close().await;

        let store = PgReadingStore::new(options);
        assert_eq!(store.latest().await.unwrap(), Some(reading(42, 68, 1)));
    }

    #[tokio::test]
    async fn latest_fails_when_server_is_unreachable() {
        // Port 1 on loopback has nothing listening.
        let options = PgConnectOptions::new()
            .host("127.0.0.1")
            .port(1)
            .username("irrigo")
            .database("irrigo_db");
        let store = PgReadingStore::new(options);
        assert!(store.latest().await.is_err());
    }
}
