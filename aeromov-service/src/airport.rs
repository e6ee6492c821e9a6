use std::sync::Arc;

use tracing::{error, warn};

use crate::cache::ReadCache;
use aeromov_core::error::{RepoError, ServiceError};
use aeromov_core::repository::{AirportRepository, FlightRepository};
use aeromov_core::{reports, validate};
use aeromov_shared::models::reports::{AirportStats, BusiestAirports};
use aeromov_shared::models::{Airport, AirportPayload};

const LIST_KEY: &str = "airports:list";
const BUSIEST_KEY: &str = "airports:busiest";

pub struct AirportService {
    repo: Arc<dyn AirportRepository>,
    flights: Arc<dyn FlightRepository>,
    cache: Arc<ReadCache>,
}

impl AirportService {
    pub fn new(
        repo: Arc<dyn AirportRepository>,
        flights: Arc<dyn FlightRepository>,
        cache: Arc<ReadCache>,
    ) -> Self {
        Self {
            repo,
            flights,
            cache,
        }
    }

    fn repo_err(op: &str, err: RepoError) -> ServiceError {
        if let RepoError::Storage(msg) = &err {
            error!("failed to {op}: {msg}");
        }
        ServiceError::from_repo("airport", err)
    }

    pub async fn list(&self) -> Result<Vec<Airport>, ServiceError> {
        if let Some(hit) = self.cache.get(LIST_KEY).await {
            return Ok(hit);
        }
        let airports = self
            .repo
            .list()
            .await
            .map_err(|e| Self::repo_err("list airports", e))?;
        self.cache.put(LIST_KEY, &airports).await;
        Ok(airports)
    }

    pub async fn get(&self, id: i32) -> Result<Airport, ServiceError> {
        self.repo
            .get(id)
            .await
            .map_err(|e| Self::repo_err("get airport", e))
    }

    pub async fn create(&self, payload: &AirportPayload) -> Result<Airport, ServiceError> {
        let new = validate::airport_create(payload).map_err(|errors| {
            warn!("validation failed creating airport: {:?}", errors);
            ServiceError::Validation(errors)
        })?;
        self.repo
            .create(&new)
            .await
            .map_err(|e| Self::repo_err("create airport", e))
    }

    pub async fn update(&self, id: i32, payload: &AirportPayload) -> Result<Airport, ServiceError> {
        validate::airport_patch(payload).map_err(|errors| {
            warn!("validation failed updating airport {id}: {:?}", errors);
            ServiceError::Validation(errors)
        })?;

        let mut airport = self
            .repo
            .get(id)
            .await
            .map_err(|e| Self::repo_err("update airport", e))?;
        airport.apply(payload);

        self.repo
            .update(&airport)
            .await
            .map_err(|e| Self::repo_err("update airport", e))?;
        Ok(airport)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.repo
            .delete(id)
            .await
            .map_err(|e| Self::repo_err("delete airport", e))
    }

    /// Every airport tied at the maximum movement count.
    pub async fn busiest(&self) -> Result<BusiestAirports, ServiceError> {
        if let Some(hit) = self.cache.get(BUSIEST_KEY).await {
            return Ok(hit);
        }

        let counts = self
            .flights
            .airport_counts()
            .await
            .map_err(|e| Self::repo_err("rank airports", e))?;
        let airports = reports::max_tied(counts, |r| r.total_movements);
        let total_movements = airports.first().map(|r| r.total_movements).unwrap_or(0);

        let busiest = BusiestAirports {
            airports,
            total_movements,
        };
        self.cache.put(BUSIEST_KEY, &busiest).await;
        Ok(busiest)
    }

    pub async fn statistics(&self, id: i32) -> Result<AirportStats, ServiceError> {
        let key = format!("airports:{id}:statistics");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let airport = self
            .repo
            .get(id)
            .await
            .map_err(|e| Self::repo_err("get airport statistics", e))?;
        let movements = self
            .repo
            .movement_counts(id)
            .await
            .map_err(|e| Self::repo_err("group airport movements", e))?;
        let airlines = self
            .repo
            .airline_counts(id)
            .await
            .map_err(|e| Self::repo_err("rank airport airlines", e))?;

        let stats = AirportStats {
            airport,
            movements,
            airlines,
        };
        self.cache.put(&key, &stats).await;
        Ok(stats)
    }
}
