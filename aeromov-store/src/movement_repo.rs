use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::database::storage;
use aeromov_core::error::RepoError;
use aeromov_core::repository::MovementTypeRepository;
use aeromov_shared::models::reports::{
    AirlineFlights, AirportFlights, FlightWithNames, MovementTotals,
};
use aeromov_shared::models::{MovementType, NewMovementType};

pub struct PostgresMovementTypeRepository {
    pool: PgPool,
}

impl PostgresMovementTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MovementTypeRow {
    id: i32,
    description: String,
}

impl From<MovementTypeRow> for MovementType {
    fn from(row: MovementTypeRow) -> Self {
        MovementType {
            id: row.id,
            description: row.description,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TotalsRow {
    movement_type_id: i32,
    description: String,
    total: i64,
}

#[derive(sqlx::FromRow)]
struct AirlineCountRow {
    airline_id: i32,
    airline_name: String,
    total: i64,
}

#[derive(sqlx::FromRow)]
struct AirportCountRow {
    airport_id: i32,
    airport_name: String,
    total: i64,
}

#[derive(sqlx::FromRow)]
struct FlightWithNamesRow {
    id: i32,
    airline_id: i32,
    airline_name: String,
    airport_id: i32,
    airport_name: String,
    movement_type_id: i32,
    flight_date: NaiveDate,
}

#[async_trait]
impl MovementTypeRepository for PostgresMovementTypeRepository {
    async fn list(&self) -> Result<Vec<MovementType>, RepoError> {
        let rows: Vec<MovementTypeRow> =
            sqlx::query_as("SELECT id, description FROM movement_types ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(storage)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: i32) -> Result<MovementType, RepoError> {
        let row: Option<MovementTypeRow> =
            sqlx::query_as("SELECT id, description FROM movement_types WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(storage)?;
        row.map(Into::into).ok_or(RepoError::NotFound)
    }

    async fn create(&self, new: &NewMovementType) -> Result<MovementType, RepoError> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let row: MovementTypeRow = sqlx::query_as(
            "INSERT INTO movement_types (description) VALUES ($1) RETURNING id, description",
        )
        .bind(&new.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(storage)?;

        tx.commit().await.map_err(storage)?;
        Ok(row.into())
    }

    async fn update(&self, movement_type: &MovementType) -> Result<(), RepoError> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let result = sqlx::query("UPDATE movement_types SET description = $1 WHERE id = $2")
            .bind(&movement_type.description)
            .bind(movement_type.id)
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

        let result = sqlx::query("DELETE FROM movement_types WHERE id = $1")
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

    async fn totals(&self) -> Result<Vec<MovementTotals>, RepoError> {
        let rows: Vec<TotalsRow> = sqlx::query_as(
            r#"
            SELECT m.id AS movement_type_id, m.description, COUNT(f.id) AS total
            FROM movement_types m
            JOIN flights f ON f.movement_type_id = m.id
            GROUP BY m.id, m.description
            ORDER BY m.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(rows
            .into_iter()
            .map(|r| MovementTotals {
                movement_type_id: r.movement_type_id,
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
            WHERE f.movement_type_id = $1
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

    async fn airport_counts(&self, id: i32) -> Result<Vec<AirportFlights>, RepoError> {
        let rows: Vec<AirportCountRow> = sqlx::query_as(
            r#"
            SELECT f.airport_id, a.name AS airport_name, COUNT(*) AS total
            FROM flights f
            JOIN airports a ON a.id = f.airport_id
            WHERE f.movement_type_id = $1
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

    async fn flights(&self, id: i32) -> Result<Vec<FlightWithNames>, RepoError> {
        let rows: Vec<FlightWithNamesRow> = sqlx::query_as(
            r#"
            SELECT f.id, f.airline_id, al.name AS airline_name,
                   f.airport_id, ap.name AS airport_name,
                   f.movement_type_id, f.flight_date
            FROM flights f
            JOIN airlines al ON al.id = f.airline_id
            JOIN airports ap ON ap.id = f.airport_id
            WHERE f.movement_type_id = $1
            ORDER BY f.flight_date DESC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(rows
            .into_iter()
            .map(|r| FlightWithNames {
                id: r.id,
                airline_id: r.airline_id,
                airline_name: r.airline_name,
                airport_id: r.airport_id,
                airport_name: r.airport_name,
                movement_type_id: r.movement_type_id,
                flight_date: r.flight_date,
            })
            .collect())
    }
}
