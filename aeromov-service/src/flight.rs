use std::sync::Arc;

use tracing::{error, warn};

use crate::cache::ReadCache;
use aeromov_core::error::{RepoError, ServiceError};
use aeromov_core::repository::FlightRepository;
use aeromov_core::{reports, validate};
use aeromov_shared::models::reports::{AirlineDayFlights, FlightMetrics};
use aeromov_shared::models::{Flight, FlightPayload};

const LIST_KEY: &str = "flights:list";
const METRICS_KEY: &str = "flights:metrics";

/// An (airline, date) pair must exceed this count to show up in the
/// over-daily report.
const DAILY_FLIGHT_LIMIT: i64 = 2;

pub struct FlightService {
    repo: Arc<dyn FlightRepository>,
    cache: Arc<ReadCache>,
}

impl FlightService {
    pub fn new(repo: Arc<dyn FlightRepository>, cache: Arc<ReadCache>) -> Self {
        Self { repo, cache }
    }

    fn repo_err(op: &str, err: RepoError) -> ServiceError {
        if let RepoError::Storage(msg) = &err {
            error!("failed to {op}: {msg}");
        }
        ServiceError::from_repo("flight", err)
    }

    pub async fn list(&self) -> Result<Vec<Flight>, ServiceError> {
        if let Some(hit) = self.cache.get(LIST_KEY).await {
            return Ok(hit);
        }
        let flights = self
            .repo
            .list()
            .await
            .map_err(|e| Self::repo_err("list flights", e))?;
        self.cache.put(LIST_KEY, &flights).await;
        Ok(flights)
    }

    pub async fn get(&self, id: i32) -> Result<Flight, ServiceError> {
        self.repo
            .get(id)
            .await
            .map_err(|e| Self::repo_err("get flight", e))
    }

    pub async fn create(&self, payload: &FlightPayload) -> Result<Flight, ServiceError> {
        let new = validate::flight_create(payload).map_err(|errors| {
            warn!("validation failed creating flight: {:?}", errors);
            ServiceError::Validation(errors)
        })?;
        self.repo
            .create(&new)
            .await
            .map_err(|e| Self::repo_err("create flight", e))
    }

    pub async fn update(&self, id: i32, payload: &FlightPayload) -> Result<Flight, ServiceError> {
        validate::flight_patch(payload).map_err(|errors| {
            warn!("validation failed updating flight {id}: {:?}", errors);
            ServiceError::Validation(errors)
        })?;

        let mut flight = self
            .repo
            .get(id)
            .await
            .map_err(|e| Self::repo_err("update flight", e))?;
        flight.apply(payload);

        self.repo
            .update(&flight)
            .await
            .map_err(|e| Self::repo_err("update flight", e))?;
        Ok(flight)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.repo
            .delete(id)
            .await
            .map_err(|e| Self::repo_err("delete flight", e))
    }

    /// The consolidated reporting bundle: busiest airport(s), airline(s)
    /// and day(s) -- ties included -- plus the over-daily pairs.
    pub async fn metrics(&self) -> Result<FlightMetrics, ServiceError> {
        if let Some(hit) = self.cache.get(METRICS_KEY).await {
            return Ok(hit);
        }

        let busiest_airport = reports::max_tied(
            self.repo
                .airport_counts()
                .await
                .map_err(|e| Self::repo_err("rank airports", e))?,
            |r| r.total_movements,
        );
        let busiest_airline = reports::max_tied(
            self.repo
                .airline_counts()
                .await
                .map_err(|e| Self::repo_err("rank airlines", e))?,
            |r| r.total_flights,
        );
        let busiest_day = reports::max_tied(
            self.repo
                .day_counts()
                .await
                .map_err(|e| Self::repo_err("rank days", e))?,
            |r| r.total_flights,
        );
        let airlines_over_two_daily = self.over_daily_pairs().await?;

        let metrics = FlightMetrics {
            busiest_airport,
            busiest_airline,
            busiest_day,
            airlines_over_two_daily,
        };
        self.cache.put(METRICS_KEY, &metrics).await;
        Ok(metrics)
    }

    /// (airline, date) pairs with strictly more than two flights.
    pub async fn over_two_daily(&self) -> Result<Vec<AirlineDayFlights>, ServiceError> {
        self.over_daily_pairs().await
    }

    async fn over_daily_pairs(&self) -> Result<Vec<AirlineDayFlights>, ServiceError> {
        let pairs = self
            .repo
            .airline_day_counts()
            .await
            .map_err(|e| Self::repo_err("group flights per day", e))?;
        Ok(reports::over_daily_limit(pairs, DAILY_FLIGHT_LIMIT))
    }
}
