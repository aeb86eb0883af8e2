use std::time::Duration;

use popcorn_engine::{FailureKind, LookupSettings, MovieLookup, OmdbLookup};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> LookupSettings {
    LookupSettings {
        endpoint: format!("{}/", server.uri()),
        api_key: "test-key".to_string(),
        ..LookupSettings::default()
    }
}

#[tokio::test]
async fn search_sends_query_and_maps_hits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("apikey", "test-key"))
        .and(query_param("s", "the matrix"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "Search": [
                    {"Title": "The Matrix", "Year": "1999", "imdbID": "tt0133093", "Type": "movie", "Poster": "https://img/matrix.jpg"},
                    {"Title": "The Matrix Reloaded", "Year": "2003", "imdbID": "tt0234215", "Type": "movie", "Poster": "N/A"}
                ],
                "totalResults": "2",
                "Response": "True"
            }"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = OmdbLookup::new(settings_for(&server)).unwrap();
    let hits = lookup.search("the matrix").await.expect("search ok");

    let ids: Vec<_> = hits.iter().map(|hit| hit.imdb_id.as_str()).collect();
    assert_eq!(ids, vec!["tt0133093", "tt0234215"]);
    assert_eq!(hits[0].title, "The Matrix");
    assert_eq!(hits[0].year, "1999");
    assert_eq!(hits[0].poster, "https://img/matrix.jpg");
}

#[tokio::test]
async fn negative_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"Response":"False","Error":"Movie not found!"}"#),
        )
        .mount(&server)
        .await;

    let lookup = OmdbLookup::new(settings_for(&server)).unwrap();
    let err = lookup.search("zzzzzz").await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::Rejected {
            reason: "Movie not found!".to_string()
        }
    );
}

#[tokio::test]
async fn details_maps_full_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("i", "tt0816692"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "Title": "Interstellar", "Year": "2014", "Released": "07 Nov 2014",
                "Runtime": "169 min", "Genre": "Adventure, Drama, Sci-Fi",
                "Director": "Christopher Nolan", "Actors": "Matthew McConaughey, Anne Hathaway",
                "Plot": "A team of explorers travel through a wormhole in space.",
                "Poster": "https://img/interstellar.jpg", "imdbRating": "8.7",
                "imdbID": "tt0816692", "Response": "True"
            }"#,
        ))
        .mount(&server)
        .await;

    let lookup = OmdbLookup::new(settings_for(&server)).unwrap();
    let record = lookup.details("tt0816692").await.expect("details ok");

    assert_eq!(record.imdb_id, "tt0816692");
    assert_eq!(record.title, "Interstellar");
    assert_eq!(record.runtime, "169 min");
    assert_eq!(record.imdb_rating, "8.7");
    assert_eq!(record.director, "Christopher Nolan");
}

#[tokio::test]
async fn http_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let lookup = OmdbLookup::new(settings_for(&server)).unwrap();
    let err = lookup.details("tt1").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(401));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string(r#"{"Response":"True"}"#),
        )
        .mount(&server)
        .await;

    let settings = LookupSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let lookup = OmdbLookup::new(settings).unwrap();
    let err = lookup.search("slow movie").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn invalid_endpoint_fails_before_sending() {
    let settings = LookupSettings {
        endpoint: "not a url".to_string(),
        ..LookupSettings::default()
    };
    let lookup = OmdbLookup::new(settings).unwrap();
    let err = lookup.search("alien").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}
