//! End-to-end extraction tests: wiremock-served ICS feeds through the real
//! fetcher, decoder and extraction service.

use std::sync::Arc;
use std::time::Duration;

use hourglass_core::{aggregate, ExtractionService};
use hourglass_domain::{CalendarSource, DateRange, Granularity, HourglassError};
use hourglass_infra::{HttpClient, HttpFeedFetcher, IcsFeedDecoder};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ics_document(events: &str) -> String {
    format!(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//hourglass//test//EN\r\n{events}END:VCALENDAR\r\n"
    )
}

fn vevent(summary: &str, dtstart: &str, dtend: &str) -> String {
    format!(
        "BEGIN:VEVENT\r\nUID:{summary}\r\nSUMMARY:{summary}\r\nDTSTART:{dtstart}\r\nDTEND:{dtend}\r\nEND:VEVENT\r\n"
    )
}

fn service() -> ExtractionService {
    let client = HttpClient::builder()
        .max_attempts(2)
        .base_backoff(Duration::from_millis(10))
        .build()
        .expect("http client");
    ExtractionService::new(
        Arc::new(HttpFeedFetcher::new(client)),
        Arc::new(IcsFeedDecoder::new()),
    )
}

async fn mount_feed(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn one_failing_source_does_not_abort_the_batch() {
    let server = MockServer::start().await;

    mount_feed(
        &server,
        "/a.ics",
        ics_document(&vevent("Standup", "20240304T090000Z", "20240304T110000Z")),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/b.ics"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_feed(
        &server,
        "/c.ics",
        ics_document(&vevent("Lecture", "20240305T130000Z", "20240305T140000Z")),
    )
    .await;

    let sources = vec![
        CalendarSource::new("A", format!("{}/a.ics", server.uri())),
        CalendarSource::new("B", format!("{}/b.ics", server.uri())),
        CalendarSource::new("C", format!("{}/c.ics", server.uri())),
    ];
    let range = DateRange::from_ymd((2024, 3, 1), (2024, 3, 31)).expect("range");

    let report = service().extract(&sources, range).await.expect("extraction");

    assert_eq!(report.occurrences.len(), 2);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].calendar_name, "B");
    assert!(matches!(report.warnings[0].error, HourglassError::Fetch(_)));
}

#[tokio::test]
async fn non_calendar_body_degrades_to_a_decode_warning() {
    let server = MockServer::start().await;
    mount_feed(&server, "/feed.ics", "<html>sign in required</html>".to_string()).await;

    let sources =
        vec![CalendarSource::new("Broken", format!("{}/feed.ics", server.uri()))];
    let range = DateRange::from_ymd((2024, 3, 1), (2024, 3, 31)).expect("range");

    let report = service().extract(&sources, range).await.expect("extraction");

    assert!(report.occurrences.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(report.warnings[0].error, HourglassError::Decode(_)));
}

#[tokio::test]
async fn boundary_events_survive_the_full_pipeline() {
    let server = MockServer::start().await;
    let events = [
        vevent("before", "20240229T235959Z", "20240301T010000Z"),
        vevent("first", "20240301T000000Z", "20240301T010000Z"),
        vevent("last", "20240331T235959Z", "20240401T020000Z"),
        vevent("after", "20240401T000000Z", "20240401T010000Z"),
    ]
    .concat();
    mount_feed(&server, "/edge.ics", ics_document(&events)).await;

    let sources = vec![CalendarSource::new("Edge", format!("{}/edge.ics", server.uri()))];
    let range = DateRange::from_ymd((2024, 3, 1), (2024, 3, 31)).expect("range");

    let report = service().extract(&sources, range).await.expect("extraction");

    let names: Vec<_> = report
        .occurrences
        .iter()
        .map(|o| o.event_name.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["first", "last"]);
}

#[tokio::test]
async fn recurring_feed_aggregates_end_to_end() {
    let server = MockServer::start().await;

    // Weekly 3h lecture, three instances in March.
    let recurring = "BEGIN:VEVENT\r\nUID:lecture\r\nSUMMARY:Lecture\r\n\
                     DTSTART:20240304T130000Z\r\nDTEND:20240304T160000Z\r\n\
                     RRULE:FREQ=WEEKLY;COUNT=3\r\nEND:VEVENT\r\n";
    mount_feed(&server, "/teaching.ics", ics_document(recurring)).await;
    mount_feed(
        &server,
        "/research.ics",
        ics_document(&vevent("Reading", "20240305T090000Z", "20240305T110000Z")),
    )
    .await;

    let sources = vec![
        CalendarSource::new("Teaching", format!("{}/teaching.ics", server.uri())),
        CalendarSource::new("Research", format!("{}/research.ics", server.uri())),
    ];
    let range = DateRange::from_ymd((2024, 3, 1), (2024, 3, 31)).expect("range");

    let report = service().extract(&sources, range).await.expect("extraction");
    assert!(report.warnings.is_empty());
    assert_eq!(report.occurrences.len(), 4);

    let result = aggregate(&report.occurrences, Granularity::Week);

    // Teaching appears in three ISO weeks, Research in one.
    assert_eq!(result.buckets.len(), 4);
    assert_eq!(result.rollups[0].calendar_name, "Teaching");
    assert_eq!(result.rollups[0].total_duration_hours, 9.0);
    assert_eq!(result.rollups[0].bucket_count, 3);
    assert_eq!(result.rollups[1].calendar_name, "Research");
    assert_eq!(result.rollups[1].total_duration_hours, 2.0);
}
