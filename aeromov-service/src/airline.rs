use std::sync::Arc;

use tracing::{error, warn};

use crate::cache::ReadCache;
use aeromov_core::error::{RepoError, ServiceError};
use aeromov_core::repository::AirlineRepository;
use aeromov_core::{reports, validate};
use aeromov_shared::models::reports::AirlineStats;
use aeromov_shared::models::{Airline, AirlinePayload};

const LIST_KEY: &str = "airlines:list";
const TOP_AIRPORTS: usize = 5;

pub struct AirlineService {
    repo: Arc<dyn AirlineRepository>,
    cache: Arc<ReadCache>,
}

impl AirlineService {
    pub fn new(repo: Arc<dyn AirlineRepository>, cache: Arc<ReadCache>) -> Self {
        Self { repo, cache }
    }

    fn repo_err(op: &str, err: RepoError) -> ServiceError {
        if let RepoError::Storage(msg) = &err {
            error!("failed to {op}: {msg}");
        }
        ServiceError::from_repo("airline", err)
    }

    pub async fn list(&self) -> Result<Vec<Airline>, ServiceError> {
        if let Some(hit) = self.cache.get(LIST_KEY).await {
            return Ok(hit);
        }
        let airlines = self
            .repo
            .list()
            .await
            .map_err(|e| Self::repo_err("list airlines", e))?;
        self.cache.put(LIST_KEY, &airlines).await;
        Ok(airlines)
    }

    pub async fn get(&self, id: i32) -> Result<Airline, ServiceError> {
        self.repo
            .get(id)
            .await
            .map_err(|e| Self::repo_err("get airline", e))
    }

    pub async fn create(&self, payload: &AirlinePayload) -> Result<Airline, ServiceError> {
        let new = validate::airline_create(payload).map_err(|errors| {
            warn!("validation failed creating airline: {:?}", errors);
            ServiceError::Validation(errors)
        })?;
        self.repo
            .create(&new)
            .await
            .map_err(|e| Self::repo_err("create airline", e))
    }

    pub async fn update(&self, id: i32, payload: &AirlinePayload) -> Result<Airline, ServiceError> {
        validate::airline_patch(payload).map_err(|errors| {
            warn!("validation failed updating airline {id}: {:?}", errors);
            ServiceError::Validation(errors)
        })?;

        let mut airline = self
            .repo
            .get(id)
            .await
            .map_err(|e| Self::repo_err("update airline", e))?;
        airline.apply(payload);

        self.repo
            .update(&airline)
            .await
            .map_err(|e| Self::repo_err("update airline", e))?;
        Ok(airline)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.repo
            .delete(id)
            .await
            .map_err(|e| Self::repo_err("delete airline", e))
    }

    pub async fn statistics(&self, id: i32) -> Result<AirlineStats, ServiceError> {
        let key = format!("airlines:{id}:statistics");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let airline = self
            .repo
            .get(id)
            .await
            .map_err(|e| Self::repo_err("get airline statistics", e))?;
        let total_flights = self
            .repo
            .flight_count(id)
            .await
            .map_err(|e| Self::repo_err("count airline flights", e))?;
        let flights_by_movement = self
            .repo
            .movement_counts(id)
            .await
            .map_err(|e| Self::repo_err("group airline flights", e))?;
        let top_airports = reports::top_n(
            self.repo
                .airport_counts(id)
                .await
                .map_err(|e| Self::repo_err("rank airline airports", e))?,
            TOP_AIRPORTS,
            |r| r.total_flights,
        );

        let stats = AirlineStats {
            airline,
            total_flights,
            flights_by_movement,
            top_airports,
        };
        self.cache.put(&key, &stats).await;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    use aeromov_shared::models::reports::{AirportFlights, MovementFlightCount};
    use aeromov_shared::models::NewAirline;

    struct MemoryAirlines {
        rows: Mutex<Vec<Airline>>,
        airport_rows: Vec<AirportFlights>,
    }

    impl MemoryAirlines {
        fn new(rows: Vec<Airline>) -> Self {
            Self {
                rows: Mutex::new(rows),
                airport_rows: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl AirlineRepository for MemoryAirlines {
        async fn list(&self) -> Result<Vec<Airline>, RepoError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn get(&self, id: i32) -> Result<Airline, RepoError> {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .ok_or(RepoError::NotFound)
        }

        async fn create(&self, new: &NewAirline) -> Result<Airline, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            let id = rows.iter().map(|a| a.id).max().unwrap_or(0) + 1;
            let airline = Airline {
                id,
                name: new.name.clone(),
            };
            rows.push(airline.clone());
            Ok(airline)
        }

        async fn update(&self, airline: &Airline) -> Result<(), RepoError> {
            let mut rows = self.rows.lock().unwrap();
            let slot = rows
                .iter_mut()
                .find(|a| a.id == airline.id)
                .ok_or(RepoError::NotFound)?;
            *slot = airline.clone();
            Ok(())
        }

        async fn delete(&self, id: i32) -> Result<(), RepoError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|a| a.id != id);
            if rows.len() == before {
                return Err(RepoError::NotFound);
            }
            Ok(())
        }

        async fn flight_count(&self, _id: i32) -> Result<i64, RepoError> {
            Ok(self.airport_rows.iter().map(|r| r.total_flights).sum())
        }

        async fn movement_counts(&self, _id: i32) -> Result<Vec<MovementFlightCount>, RepoError> {
            Ok(Vec::new())
        }

        async fn airport_counts(&self, _id: i32) -> Result<Vec<AirportFlights>, RepoError> {
            Ok(self.airport_rows.clone())
        }
    }

    fn service(repo: MemoryAirlines) -> AirlineService {
        AirlineService::new(Arc::new(repo), Arc::new(ReadCache::new(Duration::from_secs(60))))
    }

    #[tokio::test]
    async fn create_then_get_returns_the_stored_record() {
        let svc = service(MemoryAirlines::new(Vec::new()));
        let created = svc
            .create(&AirlinePayload {
                name: Some("Volaris".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(created.name, "Volaris");

        let fetched = svc.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_rejects_invalid_payload_before_the_repository() {
        let svc = service(MemoryAirlines::new(Vec::new()));
        let err = svc.create(&AirlinePayload { name: None }).await.unwrap_err();
        match err {
            ServiceError::Validation(fields) => assert!(fields.contains_key("name")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_merges_and_persists() {
        let svc = service(MemoryAirlines::new(vec![Airline {
            id: 1,
            name: "Volaris".to_string(),
        }]));
        let updated = svc
            .update(
                1,
                &AirlinePayload {
                    name: Some("Aeromar".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Aeromar");
        assert_eq!(svc.get(1).await.unwrap().name, "Aeromar");
    }

    #[tokio::test]
    async fn delete_of_missing_id_is_not_found() {
        let svc = service(MemoryAirlines::new(Vec::new()));
        match svc.delete(99).await.unwrap_err() {
            ServiceError::NotFound(entity) => assert_eq!(entity, "airline"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn statistics_keeps_only_the_top_five_airports() {
        let mut repo = MemoryAirlines::new(vec![Airline {
            id: 1,
            name: "Volaris".to_string(),
        }]);
        repo.airport_rows = (1..=7)
            .map(|i| AirportFlights {
                airport_id: i,
                airport_name: format!("Airport {i}"),
                total_flights: i64::from(i),
            })
            .collect();

        let stats = service(repo).statistics(1).await.unwrap();
        assert_eq!(stats.top_airports.len(), 5);
        assert_eq!(stats.top_airports[0].total_flights, 7);
        assert_eq!(stats.top_airports[4].total_flights, 3);
    }
}
