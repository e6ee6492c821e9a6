//! Boundary selection over grouped-count rows.
//!
//! The repositories return one row per group straight from SQL; these
//! functions apply the reporting semantics: keep every row tied at the
//! maximum, keep the N highest, keep the pairs strictly over a daily
//! threshold.

use aeromov_shared::models::reports::AirlineDayFlights;

/// All rows tied at the maximum count. Empty input yields empty output.
pub fn max_tied<T, F>(rows: Vec<T>, count: F) -> Vec<T>
where
    F: Fn(&T) -> i64,
{
    let Some(max) = rows.iter().map(&count).max() else {
        return Vec::new();
    };
    rows.into_iter().filter(|row| count(row) == max).collect()
}

/// The `n` rows with the highest counts, descending. Order among rows tied
/// at the cut is whatever the input order was.
pub fn top_n<T, F>(mut rows: Vec<T>, n: usize, count: F) -> Vec<T>
where
    F: Fn(&T) -> i64,
{
    rows.sort_by_key(|row| std::cmp::Reverse(count(row)));
    rows.truncate(n);
    rows
}

/// (airline, date) pairs with strictly more than `limit` flights.
pub fn over_daily_limit(rows: Vec<AirlineDayFlights>, limit: i64) -> Vec<AirlineDayFlights> {
    rows.into_iter()
        .filter(|row| row.total_flights > limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeromov_shared::models::reports::{AirportMovements, DayFlights};
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 5, day).unwrap()
    }

    fn airport(id: i32, name: &str, total: i64) -> AirportMovements {
        AirportMovements {
            airport_id: id,
            airport_name: name.to_string(),
            total_movements: total,
        }
    }

    fn pair(airline_id: i32, name: &str, day: u32, total: i64) -> AirlineDayFlights {
        AirlineDayFlights {
            airline_id,
            airline_name: name.to_string(),
            flight_date: date(day),
            total_flights: total,
        }
    }

    // Grouped counts for the canonical 9-flight data set: airports 1 and 3
    // both see 3 movements, airport 4 sees 2, airport 2 sees 1.
    fn airport_fixture() -> Vec<AirportMovements> {
        vec![
            airport(1, "Benito Juarez", 3),
            airport(2, "Guanajuato", 1),
            airport(3, "La paz", 3),
            airport(4, "Oaxaca", 2),
        ]
    }

    #[test]
    fn max_tied_returns_every_airport_at_the_maximum() {
        let busiest = max_tied(airport_fixture(), |r| r.total_movements);
        let ids: Vec<i32> = busiest.iter().map(|r| r.airport_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(busiest.iter().all(|r| r.total_movements == 3));
    }

    #[test]
    fn max_tied_on_no_rows_is_empty() {
        let busiest = max_tied(Vec::<DayFlights>::new(), |r| r.total_flights);
        assert!(busiest.is_empty());
    }

    #[test]
    fn top_n_orders_descending_and_truncates() {
        let top = top_n(airport_fixture(), 2, |r| r.total_movements);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].total_movements, 3);
        assert_eq!(top[1].total_movements, 3);

        let all = top_n(airport_fixture(), 5, |r| r.total_movements);
        assert_eq!(all.len(), 4);
        assert_eq!(all[3].airport_id, 2);
    }

    // (airline, date) counts for the 9-flight data set: airline 3 flies
    // twice on 2021-05-04, airlines 1 and 2 twice on 2021-05-02. The
    // threshold is strict, so none of them qualifies until a third flight
    // lands on the same pair.
    #[test]
    fn over_daily_limit_is_strictly_greater() {
        let rows = vec![
            pair(1, "Volaris", 2, 2),
            pair(2, "Aeromar", 2, 2),
            pair(3, "Interjet", 2, 1),
            pair(4, "Aeromexico", 2, 1),
            pair(2, "Aeromar", 4, 1),
            pair(3, "Interjet", 4, 2),
        ];
        assert!(over_daily_limit(rows.clone(), 2).is_empty());

        let mut rows = rows;
        rows[5].total_flights = 3;
        let qualifying = over_daily_limit(rows, 2);
        assert_eq!(qualifying.len(), 1);
        assert_eq!(qualifying[0].airline_id, 3);
        assert_eq!(qualifying[0].flight_date, date(4));
        assert_eq!(qualifying[0].total_flights, 3);
    }
}
