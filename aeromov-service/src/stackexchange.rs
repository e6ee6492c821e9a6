//! Proxy over the Stack Exchange question-search API.
//!
//! One timeout-bounded request, no retry. A non-empty result is reduced to
//! answered/unanswered counts plus four extremal questions; ties are broken
//! deterministically by the lowest question id.

use std::time::Duration;

use tracing::error;

use aeromov_core::error::ServiceError;
use aeromov_shared::models::stackexchange::{
    Question, QuestionSummary, SearchResponse, SearchStats, SearchTotals,
};

/// Response-shaping filter token: trims the search payload to the fields
/// the reduction needs.
const RESPONSE_FILTER: &str = "!9Z(-wzu0T";

pub struct StackExchangeService {
    http: reqwest::Client,
    base_url: String,
    default_tag: String,
}

impl StackExchangeService {
    pub fn new(
        base_url: String,
        default_tag: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            default_tag,
        })
    }

    pub fn default_tag(&self) -> &str {
        &self.default_tag
    }

    pub async fn stats(&self, tag: &str) -> Result<SearchStats, ServiceError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("order", "desc"),
                ("sort", "activity"),
                ("intitle", tag),
                ("site", "stackoverflow"),
                ("filter", RESPONSE_FILTER),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|err| {
                error!("Stack Exchange request for tag {tag} failed: {err}");
                ServiceError::Unavailable(err.to_string())
            })?;

        let body: SearchResponse = response.json().await.map_err(|err| {
            error!("Stack Exchange response for tag {tag} unreadable: {err}");
            ServiceError::Unavailable(err.to_string())
        })?;

        summarize(&body.items).ok_or(ServiceError::NoResults)
    }
}

/// Reduce a question list to the proxy statistics. `None` on an empty list.
pub fn summarize(items: &[Question]) -> Option<SearchStats> {
    if items.is_empty() {
        return None;
    }

    let answered = items.iter().filter(|q| q.is_answered).count();

    let top_scored = extremal(items, |q, best| q.score > best.score);
    let least_viewed = extremal(items, |q, best| q.view_count < best.view_count);
    let oldest = extremal(items, |q, best| q.creation_date < best.creation_date);
    let newest = extremal(items, |q, best| q.creation_date > best.creation_date);

    Some(SearchStats {
        stats: SearchTotals {
            total: items.len(),
            answered,
            unanswered: items.len() - answered,
        },
        top_scored: shape(top_scored),
        least_viewed: shape(least_viewed),
        oldest: shape(oldest),
        newest: shape(newest),
    })
}

/// First question winning the strict comparison; ties fall to the lowest
/// question id regardless of input order.
fn extremal<'a, F>(items: &'a [Question], beats: F) -> &'a Question
where
    F: Fn(&Question, &Question) -> bool,
{
    let mut best = &items[0];
    for q in &items[1..] {
        if beats(q, best) || (!beats(best, q) && q.question_id < best.question_id) {
            best = q;
        }
    }
    best
}

fn shape(q: &Question) -> QuestionSummary {
    QuestionSummary {
        title: q.title.clone(),
        score: q.score,
        views: q.view_count,
        link: q.link.clone(),
        date: chrono::DateTime::from_timestamp(q.creation_date, 0)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn question(id: u64, score: i64, views: i64, created: i64, answered: bool) -> Question {
        Question {
            question_id: id,
            title: format!("question {id}"),
            score,
            view_count: views,
            link: format!("https://stackoverflow.com/q/{id}"),
            creation_date: created,
            is_answered: answered,
        }
    }

    #[test]
    fn summarize_counts_and_selects_extremes() {
        let items = vec![
            question(1, 10, 500, 1_600_000_000, true),
            question(2, 3, 20, 1_500_000_000, false),
            question(3, 25, 900, 1_700_000_000, true),
        ];

        let stats = summarize(&items).unwrap();
        assert_eq!(stats.stats.total, 3);
        assert_eq!(stats.stats.answered, 2);
        assert_eq!(stats.stats.unanswered, 1);
        assert_eq!(stats.top_scored.title, "question 3");
        assert_eq!(stats.least_viewed.title, "question 2");
        assert_eq!(stats.oldest.title, "question 2");
        assert_eq!(stats.newest.title, "question 3");
        assert_eq!(stats.newest.date, "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn summarize_breaks_ties_by_lowest_question_id() {
        // Same score and views everywhere, ids deliberately out of order.
        let items = vec![
            question(9, 5, 100, 1_600_000_000, false),
            question(2, 5, 100, 1_600_000_000, false),
            question(5, 5, 100, 1_600_000_000, false),
        ];

        let stats = summarize(&items).unwrap();
        assert_eq!(stats.top_scored.title, "question 2");
        assert_eq!(stats.least_viewed.title, "question 2");
        assert_eq!(stats.oldest.title, "question 2");
        assert_eq!(stats.newest.title, "question 2");
    }

    #[test]
    fn summarize_of_nothing_is_none() {
        assert!(summarize(&[]).is_none());
    }

    /// Serve one canned HTTP response per connection.
    async fn spawn_server(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let (mut socket, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => break,
                };
                let mut buf = [0u8; 2048];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len(),
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });
        format!("http://{addr}/search")
    }

    fn service(base_url: String, timeout_ms: u64) -> StackExchangeService {
        StackExchangeService::new(
            base_url,
            "perl".to_string(),
            Duration::from_millis(timeout_ms),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn zero_items_is_a_no_results_error() {
        let base_url = spawn_server("200 OK", r#"{"items":[]}"#).await;
        match service(base_url, 1000).stats("perl").await.unwrap_err() {
            ServiceError::NoResults => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn upstream_error_status_is_unavailable() {
        let base_url = spawn_server("500 Internal Server Error", "{}").await;
        match service(base_url, 1000).stats("perl").await.unwrap_err() {
            ServiceError::Unavailable(_) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn timeout_is_unavailable() {
        // Accept the connection, never answer.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let (mut socket, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => break,
                };
                let mut buf = [0u8; 2048];
                let _ = socket.read(&mut buf).await;
                tokio::time::sleep(Duration::from_secs(30)).await;
            }
        });

        let svc = service(format!("http://{addr}/search"), 200);
        match svc.stats("perl").await.unwrap_err() {
            ServiceError::Unavailable(_) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_empty_result_is_summarized() {
        let body = r#"{"items":[
            {"question_id":1,"title":"a","score":4,"view_count":10,"link":"l1","creation_date":1600000000,"is_answered":true},
            {"question_id":2,"title":"b","score":9,"view_count":3,"link":"l2","creation_date":1700000000,"is_answered":false}
        ]}"#;
        let base_url = spawn_server("200 OK", body).await;

        let stats = service(base_url, 1000).stats("rust").await.unwrap();
        assert_eq!(stats.stats.total, 2);
        assert_eq!(stats.stats.answered, 1);
        assert_eq!(stats.top_scored.title, "b");
        assert_eq!(stats.least_viewed.title, "b");
        assert_eq!(stats.oldest.title, "a");
    }
}
