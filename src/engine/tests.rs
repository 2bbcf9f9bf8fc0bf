//! Tests for engine module

use super::*;
use crate::error::{Error, ErrorKind};
use crate::query::QueryOptions;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Serves canned pages and records every request it receives
struct ScriptedSource {
    pages: Mutex<VecDeque<Result<Vec<Record>>>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl ScriptedSource {
    fn new(pages: Vec<Result<Vec<Record>>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Pages of the given sizes with sequential `ID` fields
    fn with_sizes(sizes: &[usize]) -> Self {
        let mut next_id = 0;
        let pages = sizes
            .iter()
            .map(|&n| {
                let page = (next_id..next_id + n).map(record).collect();
                next_id += n;
                Ok(page)
            })
            .collect();
        Self::new(pages)
    }

    fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn windows(&self) -> Vec<(u32, Option<u32>)> {
        self.requests()
            .iter()
            .map(|r| (r.skip(), r.top()))
            .collect()
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Record>> {
        self.requests.lock().unwrap().push(request.clone());
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn record(id: usize) -> Record {
    let mut record = Record::new();
    record.insert("ID".into(), json!(id.to_string()));
    record
}

fn ids(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r["ID"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// FetchRequest / FetchStats Tests
// ============================================================================

#[test]
fn test_fetch_request_defaults() {
    let request = FetchRequest::new("LOCATION");
    assert_eq!(request.resource, "LOCATION");
    assert_eq!(request.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(request.total_records, None);
    assert_eq!(request.options, QueryOptions::default());
}

#[test]
fn test_fetch_request_builder() {
    let request = FetchRequest::new("LOCATION")
        .with_options(QueryOptions::new().select("LOCID"))
        .with_page_size(100)
        .with_total_records(Some(250));

    assert_eq!(request.page_size, 100);
    assert_eq!(request.total_records, Some(250));
    assert_eq!(request.options.select.as_deref(), Some("LOCID"));
}

#[test]
fn test_fetch_stats() {
    let mut stats = FetchStats::new();
    stats.add_page(10);
    stats.add_page(3);
    assert_eq!(stats.pages_fetched, 2);
    assert_eq!(stats.records_fetched, 13);

    stats.duration = std::time::Duration::from_millis(1500);
    assert_eq!(stats.duration_ms(), 1500);
}

// ============================================================================
// PagedFetcher Tests
// ============================================================================

#[tokio::test]
async fn test_bounded_fetch() {
    let source = ScriptedSource::with_sizes(&[2, 2, 1]);
    let fetcher = PagedFetcher::new(&source);

    let request = FetchRequest::new("LOCATION")
        .with_page_size(2)
        .with_total_records(Some(5));
    let result = fetcher.fetch_all(&request).await.unwrap();

    assert_eq!(result.len(), 5);
    assert_eq!(ids(&result.records), vec!["0", "1", "2", "3", "4"]);
    assert_eq!(
        source.windows(),
        vec![(0, Some(2)), (2, Some(2)), (4, Some(1))]
    );
    assert_eq!(result.stats.pages_fetched, 3);
    assert_eq!(result.resource, "LOCATION");
}

#[tokio::test]
async fn test_unbounded_fetch_until_short_page() {
    let source = ScriptedSource::with_sizes(&[2, 2, 2, 1]);
    let fetcher = PagedFetcher::new(&source);

    let request = FetchRequest::new("PRODUCT").with_page_size(2);
    let result = fetcher.fetch_all(&request).await.unwrap();

    assert_eq!(result.len(), 7);
    assert_eq!(source.requests().len(), 4);
    assert_eq!(source.windows()[3], (6, Some(2)));
}

#[tokio::test]
async fn test_total_zero_issues_no_requests() {
    let source = ScriptedSource::with_sizes(&[]);
    let fetcher = PagedFetcher::new(&source);

    let request = FetchRequest::new("LOCATION")
        .with_page_size(10)
        .with_total_records(Some(0));
    let result = fetcher.fetch_all(&request).await.unwrap();

    assert!(result.is_empty());
    assert!(source.requests().is_empty());
    assert_eq!(result.stats.pages_fetched, 0);
}

#[tokio::test]
async fn test_empty_first_page() {
    let source = ScriptedSource::with_sizes(&[0]);
    let fetcher = PagedFetcher::new(&source);

    let result = fetcher.fetch_all(&FetchRequest::new("LOCATION")).await.unwrap();

    assert!(result.is_empty());
    assert_eq!(source.windows(), vec![(0, Some(DEFAULT_PAGE_SIZE))]);
}

#[tokio::test]
async fn test_zero_page_size_is_config_error() {
    let source = ScriptedSource::with_sizes(&[1]);
    let fetcher = PagedFetcher::new(&source);

    let err = fetcher
        .fetch_all(&FetchRequest::new("LOCATION").with_page_size(0))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(source.requests().is_empty());
}

#[tokio::test]
async fn test_failure_midway_discards_partial_result() {
    let source = ScriptedSource::new(vec![
        Ok(vec![record(0), record(1)]),
        Err(Error::xml("unexpected end of document")),
        Ok(vec![record(4)]),
    ]);
    let fetcher = PagedFetcher::new(&source);

    let request = FetchRequest::new("LOCATION")
        .with_page_size(2)
        .with_total_records(Some(5));
    let err = fetcher.fetch_all(&request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(matches!(err.root(), Error::XmlParse { .. }));
    let message = err.to_string();
    assert!(message.contains("LOCATION"), "{message}");
    assert!(message.contains("page 2"), "{message}");
    // Page 3 was never requested
    assert_eq!(source.requests().len(), 2);
}

#[tokio::test]
async fn test_transport_error_keeps_kind() {
    let source = ScriptedSource::new(vec![Err(Error::http_status(503, "busy"))]);
    let fetcher = PagedFetcher::new(&source);

    let err = fetcher
        .fetch_all(&FetchRequest::new("LOCATION"))
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(err.root(), Error::HttpStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_options_carried_to_every_page() {
    let source = ScriptedSource::with_sizes(&[3, 3, 0]);
    let fetcher = PagedFetcher::new(&source);

    let options = QueryOptions::new()
        .select("PRDID,LOCID")
        .filter("LOCID eq 'DE01'")
        .top(999)
        .skip(999);
    let request = FetchRequest::new("LOCATIONPRODUCT")
        .with_options(options)
        .with_page_size(3);
    fetcher.fetch_all(&request).await.unwrap();

    for (i, page) in source.requests().iter().enumerate() {
        assert_eq!(page.resource, "LOCATIONPRODUCT");
        assert_eq!(page.options.select.as_deref(), Some("PRDID,LOCID"));
        assert_eq!(page.options.filter.as_deref(), Some("LOCID eq 'DE01'"));
        // The window always replaces caller-supplied $skip/$top
        assert_eq!(page.skip(), i as u32 * 3);
        assert_eq!(page.top(), Some(3));
    }
}

#[tokio::test]
async fn test_fetch_once() {
    let source = ScriptedSource::with_sizes(&[4]);
    let fetcher = PagedFetcher::new(&source);

    let request = PageRequest::new("JobInfoSet", QueryOptions::new().top(50));
    let records = fetcher.fetch_once(&request).await.unwrap();

    assert_eq!(records.len(), 4);
    assert_eq!(source.windows(), vec![(0, Some(50))]);
}

#[tokio::test]
async fn test_fetch_once_error_names_resource() {
    let source = ScriptedSource::new(vec![Err(Error::Unauthorized)]);
    let fetcher = PagedFetcher::new(&source);

    let err = fetcher
        .fetch_once(&PageRequest::new("JobInfoSet", QueryOptions::new()))
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("JobInfoSet: "));
    assert!(matches!(err.root(), Error::Unauthorized));
}

#[tokio::test]
async fn test_fetcher_over_shared_source() {
    let source = Arc::new(ScriptedSource::with_sizes(&[1]));
    let fetcher = PagedFetcher::new(Arc::clone(&source));

    let result = fetcher.fetch_all(&FetchRequest::new("X")).await.unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(source.requests().len(), 1);
}

#[tokio::test]
async fn test_fetch_result_to_table() {
    let source = ScriptedSource::with_sizes(&[2]);
    let fetcher = PagedFetcher::new(&source);

    let result = fetcher.fetch_all(&FetchRequest::new("X")).await.unwrap();
    let table = result.to_table(true).unwrap();

    assert_eq!(table.columns(), ["ID"]);
    assert_eq!(table.len(), 2);
}
