use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::storage;
use aeromov_core::error::RepoError;
use aeromov_core::repository::AirportRepository;
use aeromov_shared::models::reports::{AirlineFlights, MovementDescriptionCount};
use aeromov_shared::models::{Airport, NewAirport};

pub struct PostgresAirportRepository {
    pool: PgPool,
}

impl PostgresAirportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AirportRow {
    id: i32,
    name: String,
}

impl From<AirportRow> for Airport {
    fn from(row: AirportRow) -> Self {
        Airport {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DescriptionCountRow {
    description: String,
    total: i64,
}

#[derive(sqlx::FromRow)]
struct AirlineCountRow {
    airline_id: i32,
    airline_name: String,
    total: i64,
}

#[async_trait]
impl AirportRepository for PostgresAirportRepository {
    async fn list(&self) -> Result<Vec<Airport>, RepoError> {
        let rows: Vec<AirportRow> = sqlx::query_as("SELECT id, name FROM airports ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: i32) -> Result<Airport, RepoError> {
        let row: Option<AirportRow> =
            sqlx::query_as("SELECT id, name FROM airports WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(storage)?;
        row.map(Into::into).ok_or(RepoError::NotFound)
    }

    async fn create(&self, new: &NewAirport) -> Result<Airport, RepoError> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let row: AirportRow =
            sqlx::query_as("INSERT INTO airports (name) VALUES ($1) RETURNING id, name")
                .bind(&new.name)
                .fetch_one(&mut *tx)
                .await
                .map_err(storage)?;

        tx.commit().await.map_err(storage)?;
        Ok(row.into())
    }

    async fn update(&self, airport: &Airport) -> Result<(), RepoError> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let result = sqlx::query("UPDATE airports SET name = $1 WHERE id = $2")
            .bind(&airport.name)
            .bind(airport.id)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        tx.commit().await.map_err(storage)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let result = sqlx::query("DELETE FROM airports WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        tx.commit().await.map_err(storage)?;
        Ok(())
    }

    async fn movement_counts(&self, id: i32) -> Result<Vec<MovementDescriptionCount>, RepoError> {
        let rows: Vec<DescriptionCountRow> = sqlx::query_as(
            r#"
            SELECT m.description, COUNT(*) AS total
            FROM flights f
            JOIN movement_types m ON m.id = f.movement_type_id
            WHERE f.airport_id = $1
            GROUP BY m.description
            ORDER BY m.description
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(rows
            .into_iter()
            .map(|r| MovementDescriptionCount {
                description: r.description,
                total_flights: r.total,
            })
            .collect())
    }

    async fn airline_counts(&self, id: i32) -> Result<Vec<AirlineFlights>, RepoError> {
        let rows: Vec<AirlineCountRow> = sqlx::query_as(
            r#"
            SELECT f.airline_id, a.name AS airline_name, COUNT(*) AS total
            FROM flights f
            JOIN airlines a ON a.id = f.airline_id
            WHERE f.airport_id = $1
            GROUP BY f.airline_id, a.name
            ORDER BY COUNT(*) DESC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(rows
            .into_iter()
            .map(|r| AirlineFlights {
                airline_id: r.airline_id,
                airline_name: r.airline_name,
                total_flights: r.total,
            })
            .collect())
    }
}
