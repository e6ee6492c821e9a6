use std::sync::Arc;

use tracing::{error, warn};

use crate::cache::ReadCache;
use aeromov_core::error::{RepoError, ServiceError};
use aeromov_core::repository::MovementTypeRepository;
use aeromov_core::{reports, validate};
use aeromov_shared::models::reports::{
    MovementFlightsReport, MovementStatsReport, MovementTypeStats,
};
use aeromov_shared::models::{MovementType, MovementTypePayload};

const LIST_KEY: &str = "movement-types:list";
const STATS_KEY: &str = "movement-types:statistics";
const TOP_N: usize = 5;

pub struct MovementTypeService {
    repo: Arc<dyn MovementTypeRepository>,
    cache: Arc<ReadCache>,
}

impl MovementTypeService {
    pub fn new(repo: Arc<dyn MovementTypeRepository>, cache: Arc<ReadCache>) -> Self {
        Self { repo, cache }
    }

    fn repo_err(op: &str, err: RepoError) -> ServiceError {
        if let RepoError::Storage(msg) = &err {
            error!("failed to {op}: {msg}");
        }
        ServiceError::from_repo("movement type", err)
    }

    pub async fn list(&self) -> Result<Vec<MovementType>, ServiceError> {
        if let Some(hit) = self.cache.get(LIST_KEY).await {
            return Ok(hit);
        }
        let movement_types = self
            .repo
            .list()
            .await
            .map_err(|e| Self::repo_err("list movement types", e))?;
        self.cache.put(LIST_KEY, &movement_types).await;
        Ok(movement_types)
    }

    pub async fn get(&self, id: i32) -> Result<MovementType, ServiceError> {
        self.repo
            .get(id)
            .await
            .map_err(|e| Self::repo_err("get movement type", e))
    }

    pub async fn create(&self, payload: &MovementTypePayload) -> Result<MovementType, ServiceError> {
        let new = validate::movement_type_create(payload).map_err(|errors| {
            warn!("validation failed creating movement type: {:?}", errors);
            ServiceError::Validation(errors)
        })?;
        self.repo
            .create(&new)
            .await
            .map_err(|e| Self::repo_err("create movement type", e))
    }

    pub async fn update(
        &self,
        id: i32,
        payload: &MovementTypePayload,
    ) -> Result<MovementType, ServiceError> {
        validate::movement_type_patch(payload).map_err(|errors| {
            warn!("validation failed updating movement type {id}: {:?}", errors);
            ServiceError::Validation(errors)
        })?;

        let mut movement_type = self
            .repo
            .get(id)
            .await
            .map_err(|e| Self::repo_err("update movement type", e))?;
        movement_type.apply(payload);

        self.repo
            .update(&movement_type)
            .await
            .map_err(|e| Self::repo_err("update movement type", e))?;
        Ok(movement_type)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.repo
            .delete(id)
            .await
            .map_err(|e| Self::repo_err("delete movement type", e))
    }

    /// Per-movement-type totals with the top airlines and airports, plus
    /// the grand total across movements.
    pub async fn statistics(&self) -> Result<MovementStatsReport, ServiceError> {
        if let Some(hit) = self.cache.get(STATS_KEY).await {
            return Ok(hit);
        }

        let totals = self
            .repo
            .totals()
            .await
            .map_err(|e| Self::repo_err("total movement flights", e))?;

        let mut statistics = Vec::with_capacity(totals.len());
        for row in totals {
            let top_airlines = reports::top_n(
                self.repo
                    .airline_counts(row.movement_type_id)
                    .await
                    .map_err(|e| Self::repo_err("rank movement airlines", e))?,
                TOP_N,
                |r| r.total_flights,
            );
            let top_airports = reports::top_n(
                self.repo
                    .airport_counts(row.movement_type_id)
                    .await
                    .map_err(|e| Self::repo_err("rank movement airports", e))?,
                TOP_N,
                |r| r.total_flights,
            );
            statistics.push(MovementTypeStats {
                movement_type_id: row.movement_type_id,
                description: row.description,
                total_flights: row.total_flights,
                top_airlines,
                top_airports,
            });
        }

        let total_flights = statistics.iter().map(|s| s.total_flights).sum();
        let report = MovementStatsReport {
            statistics,
            total_flights,
        };
        self.cache.put(STATS_KEY, &report).await;
        Ok(report)
    }

    /// Flights recorded for one movement type, newest date first, with
    /// airline and airport names.
    pub async fn flights(&self, id: i32) -> Result<MovementFlightsReport, ServiceError> {
        let movement_type = self
            .repo
            .get(id)
            .await
            .map_err(|e| Self::repo_err("get movement flights", e))?;
        let flights = self
            .repo
            .flights(id)
            .await
            .map_err(|e| Self::repo_err("list movement flights", e))?;

        Ok(MovementFlightsReport {
            movement_type,
            total_flights: flights.len() as i64,
            flights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;

    use aeromov_shared::models::reports::{
        AirlineFlights, AirportFlights, FlightWithNames, MovementTotals,
    };
    use aeromov_shared::models::NewMovementType;

    struct StatsFixture;

    #[async_trait]
    impl MovementTypeRepository for StatsFixture {
        async fn list(&self) -> Result<Vec<MovementType>, RepoError> {
            Ok(vec![
                MovementType {
                    id: 1,
                    description: "Salida".to_string(),
                },
                MovementType {
                    id: 2,
                    description: "Llegada".to_string(),
                },
            ])
        }

        async fn get(&self, id: i32) -> Result<MovementType, RepoError> {
            self.list()
                .await?
                .into_iter()
                .find(|m| m.id == id)
                .ok_or(RepoError::NotFound)
        }

        async fn create(&self, _new: &NewMovementType) -> Result<MovementType, RepoError> {
            Err(RepoError::Storage("read-only fixture".to_string()))
        }

        async fn update(&self, _movement_type: &MovementType) -> Result<(), RepoError> {
            Err(RepoError::Storage("read-only fixture".to_string()))
        }

        async fn delete(&self, _id: i32) -> Result<(), RepoError> {
            Err(RepoError::Storage("read-only fixture".to_string()))
        }

        async fn totals(&self) -> Result<Vec<MovementTotals>, RepoError> {
            Ok(vec![
                MovementTotals {
                    movement_type_id: 1,
                    description: "Salida".to_string(),
                    total_flights: 6,
                },
                MovementTotals {
                    movement_type_id: 2,
                    description: "Llegada".to_string(),
                    total_flights: 3,
                },
            ])
        }

        async fn airline_counts(&self, id: i32) -> Result<Vec<AirlineFlights>, RepoError> {
            // More airlines than the cut for departures, fewer for arrivals.
            let n = if id == 1 { 7 } else { 2 };
            Ok((1..=n)
                .map(|i| AirlineFlights {
                    airline_id: i,
                    airline_name: format!("Airline {i}"),
                    total_flights: i64::from(n - i + 1),
                })
                .collect())
        }

        async fn airport_counts(&self, _id: i32) -> Result<Vec<AirportFlights>, RepoError> {
            Ok(Vec::new())
        }

        async fn flights(&self, _id: i32) -> Result<Vec<FlightWithNames>, RepoError> {
            Ok(Vec::new())
        }
    }

    fn service() -> MovementTypeService {
        MovementTypeService::new(
            Arc::new(StatsFixture),
            Arc::new(ReadCache::new(Duration::from_secs(60))),
        )
    }

    #[tokio::test]
    async fn statistics_sums_totals_and_caps_rankings() {
        let report = service().statistics().await.unwrap();
        assert_eq!(report.total_flights, 9);
        assert_eq!(report.statistics.len(), 2);

        let departures = &report.statistics[0];
        assert_eq!(departures.description, "Salida");
        assert_eq!(departures.top_airlines.len(), 5);
        assert_eq!(departures.top_airlines[0].total_flights, 7);

        let arrivals = &report.statistics[1];
        assert_eq!(arrivals.top_airlines.len(), 2);
    }

    #[tokio::test]
    async fn flights_report_counts_the_listing() {
        let report = service().flights(1).await.unwrap();
        assert_eq!(report.movement_type.description, "Salida");
        assert_eq!(report.total_flights, 0);
    }

    #[tokio::test]
    async fn flights_for_missing_movement_is_not_found() {
        match service().flights(9).await.unwrap_err() {
            ServiceError::NotFound(entity) => assert_eq!(entity, "movement type"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
