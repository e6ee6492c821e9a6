use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::database::storage;
use aeromov_core::error::RepoError;
use aeromov_core::repository::FlightRepository;
use aeromov_shared::models::reports::{
    AirlineDayFlights, AirlineFlights, AirportMovements, DayFlights,
};
use aeromov_shared::models::{Flight, NewFlight};

pub struct PostgresFlightRepository {
    pool: PgPool,
}

impl PostgresFlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    id: i32,
    airline_id: i32,
    airport_id: i32,
    movement_type_id: i32,
    flight_date: NaiveDate,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            id: row.id,
            airline_id: row.airline_id,
            airport_id: row.airport_id,
            movement_type_id: row.movement_type_id,
            flight_date: row.flight_date,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AirportCountRow {
    airport_id: i32,
    airport_name: String,
    total: i64,
}

#[derive(sqlx::FromRow)]
struct AirlineCountRow {
    airline_id: i32,
    airline_name: String,
    total: i64,
}

#[derive(sqlx::FromRow)]
struct DayCountRow {
    flight_date: NaiveDate,
    total: i64,
}

#[derive(sqlx::FromRow)]
struct AirlineDayCountRow {
    airline_id: i32,
    airline_name: String,
    flight_date: NaiveDate,
    total: i64,
}

#[async_trait]
impl FlightRepository for PostgresFlightRepository {
    async fn list(&self) -> Result<Vec<Flight>, RepoError> {
        let rows: Vec<FlightRow> = sqlx::query_as(
            "SELECT id, airline_id, airport_id, movement_type_id, flight_date FROM flights ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: i32) -> Result<Flight, RepoError> {
        let row: Option<FlightRow> = sqlx::query_as(
            "SELECT id, airline_id, airport_id, movement_type_id, flight_date FROM flights WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;
        row.map(Into::into).ok_or(RepoError::NotFound)
    }

    async fn create(&self, new: &NewFlight) -> Result<Flight, RepoError> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let row: FlightRow = sqlx::query_as(
            r#"
            INSERT INTO flights (airline_id, airport_id, movement_type_id, flight_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, airline_id, airport_id, movement_type_id, flight_date
            "#,
        )
        .bind(new.airline_id)
        .bind(new.airport_id)
        .bind(new.movement_type_id)
        .bind(new.flight_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(storage)?;

        tx.commit().await.map_err(storage)?;
        Ok(row.into())
    }

    async fn update(&self, flight: &Flight) -> Result<(), RepoError> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let result = sqlx::query(
            r#"
            UPDATE flights
            SET airline_id = $1, airport_id = $2, movement_type_id = $3, flight_date = $4
            WHERE id = $5
            "#,
        )
        .bind(flight.airline_id)
        .bind(flight.airport_id)
        .bind(flight.movement_type_id)
        .bind(flight.flight_date)
        .bind(flight.id)
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

        let result = sqlx::query("DELETE FROM flights WHERE id = $1")
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

    async fn airport_counts(&self) -> Result<Vec<AirportMovements>, RepoError> {
        let rows: Vec<AirportCountRow> = sqlx::query_as(
            r#"
            SELECT f.airport_id, a.name AS airport_name, COUNT(*) AS total
            FROM flights f
            JOIN airports a ON a.id = f.airport_id
            GROUP BY f.airport_id, a.name
            ORDER BY f.airport_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(rows
            .into_iter()
            .map(|r| AirportMovements {
                airport_id: r.airport_id,
                airport_name: r.airport_name,
                total_movements: r.total,
            })
            .collect())
    }

    async fn airline_counts(&self) -> Result<Vec<AirlineFlights>, RepoError> {
        let rows: Vec<AirlineCountRow> = sqlx::query_as(
            r#"
            SELECT f.airline_id, a.name AS airline_name, COUNT(*) AS total
            FROM flights f
            JOIN airlines a ON a.id = f.airline_id
            GROUP BY f.airline_id, a.name
            ORDER BY f.airline_id
            "#,
        )
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

    async fn day_counts(&self) -> Result<Vec<DayFlights>, RepoError> {
        let rows: Vec<DayCountRow> = sqlx::query_as(
            r#"
            SELECT flight_date, COUNT(*) AS total
            FROM flights
            GROUP BY flight_date
            ORDER BY flight_date
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(rows
            .into_iter()
            .map(|r| DayFlights {
                flight_date: r.flight_date,
                total_flights: r.total,
            })
            .collect())
    }

    async fn airline_day_counts(&self) -> Result<Vec<AirlineDayFlights>, RepoError> {
        let rows: Vec<AirlineDayCountRow> = sqlx::query_as(
            r#"
            SELECT f.airline_id, a.name AS airline_name, f.flight_date, COUNT(*) AS total
            FROM flights f
            JOIN airlines a ON a.id = f.airline_id
            GROUP BY f.airline_id, a.name, f.flight_date
            ORDER BY f.airline_id, f.flight_date
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(rows
            .into_iter()
            .map(|r| AirlineDayFlights {
                airline_id: r.airline_id,
                airline_name: r.airline_name,
                flight_date: r.flight_date,
                total_flights: r.total,
            })
            .collect())
    }
}
