//! End-to-end pipeline tests against mock HTTP servers
//!
//! These drive the real session flows (fetch → extract → paginate → build →
//! emit) against wiremock fixtures shaped like the scraped sites' pages.

use camsweep::config::{DirectoryConfig, HostingConfig, HttpConfig};
use camsweep::output::read_links;
use camsweep::playback::PlaybackStart;
use camsweep::scrape::{Fetcher, NetworkError};
use camsweep::session::{self, Liveness};
use camsweep::ScrapeError;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COUNTRY_JSON: &str = r#"{
    "status": "success",
    "countries": {
        "RS": {"country": "Serbia", "count": 4},
        "US": {"country": "United States", "count": 2}
    }
}"#;

fn fetcher() -> Fetcher {
    Fetcher::new(&HttpConfig::default()).unwrap()
}

fn directory_config(base: &str) -> DirectoryConfig {
    DirectoryConfig {
        base_url: base.to_string(),
        ..DirectoryConfig::default()
    }
}

fn hosting_config(base: &str) -> HostingConfig {
    HostingConfig {
        base_url: base.to_string(),
        ..HostingConfig::default()
    }
}

async fn mount_countries(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/en/jsoncountries/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(COUNTRY_JSON))
        .mount(server)
        .await;
}

#[tokio::test]
async fn directory_flow_collects_links_across_pages_in_order() {
    let server = MockServer::start().await;
    mount_countries(&server).await;

    let listing = r#"<script>pagenavigator("?page=", 2, 0);</script>"#;
    let page_bodies = [
        r#"<img src="http://93.87.72.254:8090/1"> <img src="http://93.87.72.255:8090/2">"#,
        r#"<img src="http://191.6.2.133:84/1"> <img src="http://191.6.2.134:84/2">"#,
    ];

    // First hit derives the page count; paginated hits carry ?page=N
    Mock::given(method("GET"))
        .and(path("/en/bycountry/RS/"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_bodies[0]))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/en/bycountry/RS/"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_bodies[1]))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/en/bycountry/RS/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing))
        .mount(&server)
        .await;

    let out_dir = tempfile::tempdir().unwrap();
    let report = session::directory::run(
        &fetcher(),
        &directory_config(&server.uri()),
        "serbia",
        out_dir.path(),
        false,
        false,
    )
    .await
    .unwrap();

    assert_eq!(report.country.code, "RS");
    assert_eq!(report.pages, 2);
    assert_eq!(
        report.links,
        vec![
            "http://93.87.72.254:8090",
            "http://93.87.72.255:8090",
            "http://191.6.2.133:84",
            "http://191.6.2.134:84",
        ]
    );

    // Round trip: listing file holds the same links in the same order
    let path = report.output_path.unwrap();
    assert!(path.ends_with("Serbia_ips.txt"));
    assert_eq!(read_links(&path).unwrap(), report.links);
}

#[tokio::test]
async fn directory_flow_without_pagination_marker_writes_nothing() {
    let server = MockServer::start().await;
    mount_countries(&server).await;

    Mock::given(method("GET"))
        .and(path("/en/bycountry/US/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>no results</html>"))
        .mount(&server)
        .await;

    let out_dir = tempfile::tempdir().unwrap();
    let report = session::directory::run(
        &fetcher(),
        &directory_config(&server.uri()),
        "US",
        out_dir.path(),
        false,
        false,
    )
    .await
    .unwrap();

    assert_eq!(report.pages, 0);
    assert!(report.links.is_empty());
    assert!(report.output_path.is_none());
    assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn directory_flow_fails_fast_and_leaves_no_file() {
    let server = MockServer::start().await;
    mount_countries(&server).await;

    let listing = r#"pagenavigator("?page=", 3, 0);"#;
    Mock::given(method("GET"))
        .and(path("/en/bycountry/RS/"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("http://10.0.0.1:80"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/en/bycountry/RS/"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/en/bycountry/RS/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/en/bycountry/RS/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing))
        .mount(&server)
        .await;

    let out_dir = tempfile::tempdir().unwrap();
    let err = session::directory::run(
        &fetcher(),
        &directory_config(&server.uri()),
        "RS",
        out_dir.path(),
        false,
        false,
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        ScrapeError::Network(NetworkError::Status { status: 500, .. })
    ));
    // The whole batch failed, so no listing file was produced
    assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn directory_flow_rejects_unknown_selection() {
    let server = MockServer::start().await;
    mount_countries(&server).await;

    let out_dir = tempfile::tempdir().unwrap();
    let err = session::directory::run(
        &fetcher(),
        &directory_config(&server.uri()),
        "Atlantis",
        out_dir.path(),
        false,
        false,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ScrapeError::UnknownCountry { .. }));
}

fn search_results_page() -> String {
    r#"
    <html><body>
    <ul class="dropdown-menu-catagory">
        <li class="catagorylist-item"><a href="?catagory=1">Traffic</a></li>
        <li class="catagorylist-item"><a href="?catagory=2">Weather</a></li>
    </ul>
    <select class="droppage">
        <option value="1">1</option>
        <option value="2">2</option>
    </select>
    <ul>
        <li class="camItem" title="Harbor North"><a href="/share/parentID123/shareID456">Harbor North</a></li>
        <li class="camItem" title="Broken"><a href="/share/parentID123">Broken</a></li>
        <li class="camItem" title="Harbor South"><a href="/share/parentID124/shareID457">Harbor South</a></li>
    </ul>
    </body></html>
    "#
    .to_string()
}

#[tokio::test]
async fn hosting_flow_builds_urls_and_skips_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cameraftp/publish/publishedcameras.aspx"))
        .and(body_string_contains("tbSearchbox=harbor"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_results_page()))
        .expect(1)
        .mount(&server)
        .await;

    let start = PlaybackStart::parse("2024-03-01", "10:30:00").unwrap();
    let outcome = session::hosting::run(
        &fetcher(),
        &hosting_config(&server.uri()),
        "harbor",
        None,
        None,
        &start,
    )
    .await
    .unwrap();

    assert_eq!(outcome.categories.len(), 2);
    assert_eq!(outcome.available_pages, vec![1, 2]);
    assert_eq!(outcome.records.len(), 3);

    // Malformed middle record is skipped, the batch continues
    assert_eq!(outcome.batch.urls.len(), 2);
    assert_eq!(outcome.batch.skipped.len(), 1);
    assert_eq!(outcome.batch.skipped[0].link, "/share/parentID123");

    let first = outcome.batch.urls[0].to_string();
    assert!(first.contains("cameraID=123"));
    assert!(first.contains("shareID=456"));
    assert!(first.contains("name=Harbor+North"));
    assert!(first.contains("start=2024-03-01+10%3A30%3A00"));
}

#[tokio::test]
async fn hosting_flow_navigates_category_and_page() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cameraftp/publish/publishedcameras.aspx"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_results_page()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cameraftp/publish/publishedcameras.aspx"))
        .and(query_param("catagory", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_results_page()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cameraftp/publish/publishedcameras.aspx"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<li class="camItem" title="Only"><a href="/share/parentID9/shareID8">Only</a></li>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let start = PlaybackStart::parse("2024-03-01", "00:00:00").unwrap();
    let outcome = session::hosting::run(
        &fetcher(),
        &hosting_config(&server.uri()),
        "harbor",
        Some(1),
        Some(2),
        &start,
    )
    .await
    .unwrap();

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.batch.urls.len(), 1);
    assert!(outcome.batch.urls[0].to_string().contains("cameraID=9"));
}

#[tokio::test]
async fn hosting_flow_rejects_out_of_range_category() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_results_page()))
        .mount(&server)
        .await;

    let start = PlaybackStart::parse("2024-03-01", "00:00:00").unwrap();
    let err = session::hosting::run(
        &fetcher(),
        &hosting_config(&server.uri()),
        "harbor",
        Some(7),
        None,
        &start,
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        ScrapeError::UnknownCategory {
            index: 7,
            available: 2
        }
    ));
}

#[tokio::test]
async fn invalid_timestamp_is_rejected_before_any_request() {
    // Validation happens while constructing the PlaybackStart, so a bad
    // date never reaches the network or the filesystem.
    let result = PlaybackStart::parse("2024-02-30", "10:00:00");
    assert!(result.is_err());
}

#[tokio::test]
async fn directory_flow_annotates_liveness_when_requested() {
    let server = MockServer::start().await;
    mount_countries(&server).await;

    // The fixture stream points back at the mock server, so the liveness
    // check has something real to answer it
    let listing = r#"<script>pagenavigator("?page=", 1, 0);</script>"#;
    let page_body = format!(r#"<img src="{}/stream">"#, server.uri());

    Mock::given(method("GET"))
        .and(path("/en/bycountry/RS/"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_body))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/en/bycountry/RS/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("stream up"))
        .mount(&server)
        .await;

    let out_dir = tempfile::tempdir().unwrap();
    let report = session::directory::run(
        &fetcher(),
        &directory_config(&server.uri()),
        "RS",
        out_dir.path(),
        true,
        false,
    )
    .await
    .unwrap();

    assert_eq!(report.links, vec![server.uri()]);
    assert_eq!(report.liveness, vec![Liveness::Alive]);
    // Annotation never changes what gets written
    assert_eq!(read_links(&report.output_path.unwrap()).unwrap(), report.links);
}

fn menuless_results_page() -> &'static str {
    r#"
    <html><body>
    <ul>
        <li class="camItem" title="Lone"><a href="/share/parentID5/shareID6">Lone</a></li>
    </ul>
    </body></html>
    "#
}

#[tokio::test]
async fn hosting_flow_tolerates_missing_category_menu() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cameraftp/publish/publishedcameras.aspx"))
        .respond_with(ResponseTemplate::new(200).set_body_string(menuless_results_page()))
        .expect(1)
        .mount(&server)
        .await;

    let start = PlaybackStart::parse("2024-03-01", "10:30:00").unwrap();
    let outcome = session::hosting::run(
        &fetcher(),
        &hosting_config(&server.uri()),
        "lone",
        None,
        None,
        &start,
    )
    .await
    .unwrap();

    // No menu just means no categories; the entry still becomes a URL
    assert!(outcome.categories.is_empty());
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.batch.urls.len(), 1);
    assert!(outcome.batch.urls[0].to_string().contains("cameraID=5"));
}

#[tokio::test]
async fn hosting_flow_still_requires_menu_for_category_selection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(menuless_results_page()))
        .mount(&server)
        .await;

    let start = PlaybackStart::parse("2024-03-01", "10:30:00").unwrap();
    let err = session::hosting::run(
        &fetcher(),
        &hosting_config(&server.uri()),
        "lone",
        Some(0),
        None,
        &start,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ScrapeError::Parse(_)));
}
