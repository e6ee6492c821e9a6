use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::storage;
use aeromov_core::error::RepoError;
use aeromov_core::repository::AirlineRepository;
use aeromov_shared::models::reports::{AirportFlights, MovementFlightCount};
use aeromov_shared::models::{Airline, NewAirline};

pub struct PostgresAirlineRepository {
    pool: PgPool,
}

impl PostgresAirlineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AirlineRow {
    id: i32,
    name: String,
}

impl From<AirlineRow> for Airline {
    fn from(row: AirlineRow) -> Self {
        Airline {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MovementCountRow {
    movement_type_id: i32,
    total: i64,
}

#[derive(sqlx::FromRow)]
struct AirportCountRow {
    airport_id: i32,
    airport_name: String,
    total: i64,
}

#[async_trait]
impl AirlineRepository for PostgresAirlineRepository {
    async fn list(&self) -> Result<Vec<Airline>, RepoError> {
        let rows: Vec<AirlineRow> = sqlx::query_as("SELECT id, name FROM airlines ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: i32) -> Result<Airline, RepoError> {
        let row: Option<AirlineRow> =
            sqlx::query_as("SELECT id, name FROM airlines WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(storage)?;
        row.map(Into::into).ok_or(RepoError::NotFound)
    }

    async fn create(&self, new: &NewAirline) -> Result<Airline, RepoError> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let row: AirlineRow =
            sqlx::query_as("INSERT INTO airlines (name) VALUES ($1) RETURNING id, name")
                .bind(&new.name)
                .fetch_one(&mut *tx)
                .await
                .map_err(storage)?;

        tx.commit().await.map_err(storage)?;
        Ok(row.into())
    }

    async fn update(&self, airline: &Airline) -> Result<(), RepoError> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let result = sqlx::query("UPDATE airlines SET name = $1 WHERE id = $2")
            .bind(&airline.name)
            .bind(airline.id)
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

        let result = sqlx::query("DELETE FROM airlines WHERE id = $1")
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

    async fn flight_count(&self, id: i32) -> Result<i64, RepoError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM flights WHERE airline_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(storage)?;
        Ok(count)
    }

    async fn movement_counts(&self, id: i32) -> Result<Vec<MovementFlightCount>, RepoError> {
        let rows: Vec<MovementCountRow> = sqlx::query_as(
            r#"
            SELECT movement_type_id, COUNT(*) AS total
            FROM flights
            WHERE airline_id = $1
            GROUP BY movement_type_id
            ORDER BY movement_type_id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(rows
            .into_iter()
            .map(|r| MovementFlightCount {
                movement_type_id: r.movement_type_id,
                total_flights: r.total,
            })
            .collect())
    }

    async fn airport_counts(&self, id: i32) -> Result<Vec<AirportFlights>, RepoError> {
        let rows: Vec<AirportCountRow> = sqlx::query_as(
            r#"
            SELECT f.airport_id, a.name AS airport_name, COUNT(*) AS total
            FROM flights f
            JOIN airports a ON a.id = f.airport_id
            WHERE f.airline_id = $1
            GROUP BY f.airport_id, a.name
            ORDER BY COUNT(*) DESC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(rows
            .into_iter()
            .map(|r| AirportFlights {
                airport_id: r.airport_id,
                airport_name: r.airport_name,
                total_flights: r.total,
            })
            .collect())
    }
}
