//! End-to-end crawl against a mock catalog server.

use books_crawler::{Config, CrawlCommand, CsvSink, StopReason};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CATALOGUE_FIXTURE: &str = include_str!("fixtures/catalogue_page.html");

fn make_config(server: &MockServer, dir: &TempDir) -> Config {
    let mut config = Config::new();
    config.set_base_url(server.uri());
    config.output = dir.path().join("books_data.csv");
    config.delay_ms = 0;
    config.timeout_secs = 2;
    config
}

fn listing_page() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(CATALOGUE_FIXTURE)
}

async fn serve(server: &MockServer, page_path: &str, template: ResponseTemplate) {
    Mock::given(method("GET")).and(path(page_path)).respond_with(template).mount(server).await;
}

#[tokio::test]
async fn test_crawl_until_404() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    serve(&server, "/catalogue/page-1.html", listing_page()).await;
    serve(&server, "/catalogue/page-2.html", listing_page()).await;
    serve(&server, "/catalogue/page-3.html", ResponseTemplate::new(404)).await;

    let config = make_config(&server, &dir);
    let output = config.output.clone();
    let report = CrawlCommand::new(config).execute().await.unwrap();

    assert_eq!(report.stop, StopReason::FetchFailed { page: 3 });
    assert_eq!(report.pages_processed, 2);
    assert_eq!(report.records_written, 6);

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "title,price,availability,link");
    assert_eq!(
        lines[1],
        format!(
            "A Light in the Attic,£51.77,In stock,{}/a-light-in-the-attic_1000/index.html",
            server.uri()
        )
    );

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_crawl_stops_at_end_marker() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    serve(&server, "/catalogue/page-1.html", listing_page()).await;
    serve(
        &server,
        "/catalogue/page-2.html",
        ResponseTemplate::new(200).set_body_string("<html><body>No books available!</body></html>"),
    )
    .await;

    let config = make_config(&server, &dir);
    let sink = CsvSink::new(&config.output);
    let client = books_crawler::catalog::CatalogClient::new(&config).unwrap();
    let report = CrawlCommand::new(config).execute_with(&client, &sink).await.unwrap();

    assert_eq!(report.stop, StopReason::EndMarker { page: 2 });
    assert!(report.stop.is_clean());
    assert_eq!(report.records_written, 3);
}

#[tokio::test]
async fn test_crawl_first_page_unreachable() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    serve(&server, "/catalogue/page-1.html", ResponseTemplate::new(503)).await;

    let config = make_config(&server, &dir);
    let output = config.output.clone();
    let report = CrawlCommand::new(config).execute().await.unwrap();

    assert_eq!(report.stop, StopReason::FetchFailed { page: 1 });
    assert_eq!(report.pages_processed, 0);
    assert!(!output.exists());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
