//! Integration tests for the crawler
//!
//! These tests use wiremock to serve review pages and run the full crawl
//! cycle end-to-end over real HTTP.

use review_ripple::config::{parse_config, Config};
use review_ripple::crawler::{crawl, DelayRange, HttpFetcher, ReviewCrawler};
use review_ripple::output::{filter_verified, write_csv};
use review_ripple::StopReason;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REVIEWS_PATH: &str = "/acme-phone/product-reviews/itm0a1b2c";

/// Creates a test configuration pointed at the mock server's host
fn create_test_config(server: &MockServer) -> Config {
    let host = url::Url::parse(&server.uri())
        .expect("Failed to parse base URL")
        .host_str()
        .expect("Failed to extract host")
        .to_string();

    let mut config = Config::default();
    config.site.domain = host;
    config.crawler.min_delay_ms = 0;
    config.crawler.max_delay_ms = 0;
    config.fetch.timeout_secs = 5;
    config
}

fn reviews_url(server: &MockServer, page: u32) -> String {
    format!(
        "{}{}?pid=MOBABC123&lid=LSTMOBABC&marketplace=FLIPKART&page={}",
        server.uri(),
        REVIEWS_PATH,
        page
    )
}

/// Renders a review page with `count` reviews and a page counter
fn review_page(page: u32, total: u32, count: usize) -> String {
    let fragments: String = (0..count)
        .map(|i| {
            format!(
                r#"<div class="EKFha-">{}Very Good Review {} of page {} READ MOREAsha RaoCertified Buyer, Pune</div>"#,
                5 - (i % 5),
                i,
                page
            )
        })
        .collect();

    format!(
        r#"<html><head><title>Reviews</title></head><body>{}<div><span>Page {} of {}</span></div></body></html>"#,
        fragments, page, total
    )
}

async fn mount_page(server: &MockServer, page: u32, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(REVIEWS_PATH))
        .and(query_param("page", page.to_string()))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_follows_page_counter() {
    let mock_server = MockServer::start().await;
    for page in 1..=3 {
        mount_page(&mock_server, page, 200, review_page(page, 3, 4)).await;
    }

    let config = create_test_config(&mock_server);
    let report = crawl(&config, &reviews_url(&mock_server, 1), CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(report.stop_reason, StopReason::NoNextPage);
    assert_eq!(report.pages_fetched, 3);
    assert_eq!(report.records.len(), 12);

    // Records keep page order
    assert!(report.records[0].body.ends_with("of page 1"));
    assert!(report.records[11].body.ends_with("of page 3"));
    assert_eq!(report.records[0].title.as_deref(), Some("Very Good"));
    assert_eq!(report.records[0].reviewer_name.as_deref(), Some("Asha Rao"));
}

#[tokio::test]
async fn test_max_pages_from_config_file() {
    let mock_server = MockServer::start().await;
    for page in 1..=5 {
        mount_page(&mock_server, page, 200, review_page(page, 5, 2)).await;
    }

    let host = url::Url::parse(&mock_server.uri())
        .expect("Failed to parse base URL")
        .host_str()
        .expect("Failed to extract host")
        .to_string();
    let config = parse_config(&format!(
        r#"
        [site]
        domain = "{}"

        [crawler]
        max-pages = 2
        min-delay-ms = 0
        max-delay-ms = 0
        "#,
        host
    ))
    .expect("Failed to parse config");

    let report = crawl(&config, &reviews_url(&mock_server, 1), CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(report.stop_reason, StopReason::MaxPagesReached);
    assert_eq!(report.records.len(), 4);
}

#[tokio::test]
async fn test_blocked_status_is_classified() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, 200, review_page(1, 4, 3)).await;
    mount_page(
        &mock_server,
        2,
        403,
        "<html><body><h1>Access Denied</h1></body></html>".to_string(),
    )
    .await;

    let config = create_test_config(&mock_server);
    let report = crawl(&config, &reviews_url(&mock_server, 1), CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(report.stop_reason, StopReason::Blocked);
    assert_eq!(report.records.len(), 3);
}

#[tokio::test]
async fn test_not_found_status_is_classified() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        1,
        404,
        "<html><body>Page Not Found</body></html>".to_string(),
    )
    .await;

    let config = create_test_config(&mock_server);
    let report = crawl(&config, &reviews_url(&mock_server, 1), CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(report.stop_reason, StopReason::PageNotFound);
    assert!(report.records.is_empty());
}

#[tokio::test]
async fn test_server_error_stops_with_partial_results() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, 200, review_page(1, 4, 3)).await;
    mount_page(&mock_server, 2, 500, "oops".to_string()).await;

    let config = create_test_config(&mock_server);
    let report = crawl(&config, &reviews_url(&mock_server, 1), CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(report.stop_reason, StopReason::FetchError);
    assert_eq!(report.records.len(), 3);
    assert!(report.error.expect("error detail").contains("500"));
    assert!(report.last_url.as_str().ends_with("page=2"));
}

#[tokio::test]
async fn test_product_url_is_rewritten_to_reviews() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REVIEWS_PATH))
        .and(query_param("pid", "MOBABC123"))
        .and(query_param("lid", "LSTMOBABC"))
        .and(query_param("marketplace", "FLIPKART"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(review_page(1, 1, 2))
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let product_url = format!(
        "{}/acme-phone/p/itm0a1b2c?pid=MOBABC123&lid=LSTMOBABC",
        mock_server.uri()
    );
    let report = crawl(&config, &product_url, CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.stop_reason, StopReason::NoNextPage);
}

#[tokio::test]
async fn test_next_link_is_followed() {
    let mock_server = MockServer::start().await;
    let next_href = format!(
        "{}?pid=MOBABC123&lid=LSTMOBABC&marketplace=FLIPKART&page=2",
        REVIEWS_PATH
    );
    mount_page(
        &mock_server,
        1,
        200,
        format!(
            r#"<html><body><div class="EKFha-">4Good sturdy build READ MOREVikram SethCertified Buyer</div><a class="_1LKTO3" href="{}">Next</a></body></html>"#,
            next_href
        ),
    )
    .await;
    mount_page(
        &mock_server,
        2,
        200,
        r#"<html><body><div class="EKFha-">2Fair flimsy case READ MORE</div></body></html>"#.to_string(),
    )
    .await;

    let config = create_test_config(&mock_server);
    let report = crawl(&config, &reviews_url(&mock_server, 1), CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(report.stop_reason, StopReason::NoNextPage);
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[1].rating, Some(2));
    assert_eq!(report.records[1].title.as_deref(), Some("Fair"));
    assert!(!report.records[1].verified_purchase);
}

#[tokio::test]
async fn test_loose_container_fallback() {
    let mock_server = MockServer::start().await;
    let long_text = "x".repeat(300);
    mount_page(
        &mock_server,
        1,
        200,
        format!(
            r#"<html><body>
            <div class="cPHDOP col-12-12">5{} Certified Buyer</div>
            <div class="cPHDOP col-12-12">Ratings and reviews header</div>
            </body></html>"#,
            long_text
        ),
    )
    .await;

    let config = create_test_config(&mock_server);
    let report = crawl(&config, &reviews_url(&mock_server, 1), CancellationToken::new())
        .await
        .expect("Crawl failed");

    assert_eq!(report.records.len(), 1);
    let record = &report.records[0];
    assert_eq!(record.rating, Some(5));
    assert!(record.verified_purchase);
    assert!(record.body.ends_with("..."));
    assert_eq!(record.body.chars().count(), 203);
}

#[tokio::test]
async fn test_wrong_site_is_rejected_before_fetching() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = Config::default();
    let result = crawl(&config, &reviews_url(&mock_server, 1), CancellationToken::new()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_crawl_then_export_verified_csv() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        1,
        200,
        r#"<html><body>
        <div class="EKFha-">5Wonderful Loved it READ MOREAsha RaoCertified Buyer</div>
        <div class="EKFha-">1Not recommended Died in a week READ MORERahul Mehta</div>
        </body></html>"#
            .to_string(),
    )
    .await;

    let config = create_test_config(&mock_server);
    let fetcher = HttpFetcher::new(&config.fetch).expect("Failed to build fetcher");
    let crawler = ReviewCrawler::new(fetcher, &config)
        .expect("Failed to create crawler")
        .with_delay(DelayRange::none());
    let report = crawler
        .crawl(&reviews_url(&mock_server, 1), None, 1)
        .await
        .expect("Crawl failed");
    assert_eq!(report.records.len(), 2);

    let (verified, applied) = filter_verified(&report.records);
    assert!(applied);
    assert_eq!(verified.len(), 1);

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = dir.path().join("reviews_MOBABC123.csv");
    write_csv(&csv_path, &verified).expect("Failed to write CSV");

    let content = std::fs::read_to_string(&csv_path).expect("Failed to read CSV");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "rating,title,body,reviewer_name,verified_purchase,date,helpful_votes"
    );
    assert_eq!(lines[1], "5,Wonderful,Loved it,Asha Rao,true,Unknown Date,0");
    assert_eq!(lines.len(), 2);
}
