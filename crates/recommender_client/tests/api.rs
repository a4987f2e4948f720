use std::time::Duration;

use recommender_client::{ApiError, ApiSettings, RecommendationApi, ReqwestApi};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestApi {
    let settings = ApiSettings::new(&server.uri()).expect("valid base url");
    ReqwestApi::new(settings).expect("client builds")
}

#[tokio::test]
async fn posts_trimmed_query_as_json_and_returns_rows_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/recommend"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "query": "Java developer" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recommendations": [
                {
                    "assessment_name": "Core Java (Advanced)",
                    "description": "Tests advanced Java concepts",
                    "relevance_score": 0.873,
                    "assessment_url": "https://catalog.example.com/core-java"
                },
                {
                    "assessment_name": "Teamwork",
                    "description": null,
                    "relevance_score": 0.41,
                    "assessment_url": "https://catalog.example.com/teamwork"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let recs = api.recommend("Java developer").await.expect("request ok");

    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].assessment_name, "Core Java (Advanced)");
    assert_eq!(
        recs[0].description.as_deref(),
        Some("Tests advanced Java concepts")
    );
    assert!((recs[0].relevance_score - 0.873).abs() < f64::EPSILON);
    assert_eq!(recs[1].assessment_name, "Teamwork");
    assert_eq!(recs[1].description, None);
}

#[tokio::test]
async fn missing_recommendations_field_is_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/recommend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let recs = api_for(&server).recommend("python").await.expect("request ok");
    assert!(recs.is_empty());
}

#[tokio::test]
async fn non_success_status_is_reported_with_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/recommend"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "recommendations": [
                {
                    "assessment_name": "ignored",
                    "relevance_score": 1.0,
                    "assessment_url": "https://catalog.example.com/ignored"
                }
            ]
        })))
        .mount(&server)
        .await;

    let err = api_for(&server).recommend("python").await.unwrap_err();
    assert_eq!(err, ApiError::HttpStatus(500));
    assert_eq!(err.to_string(), "API Error: 500");
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/recommend"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
        .mount(&server)
        .await;

    let err = api_for(&server).recommend("python").await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)), "unexpected error {err:?}");
}

#[tokio::test]
async fn base_url_with_trailing_slash_hits_same_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/recommend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "recommendations": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = ApiSettings::new(&format!("{}/", server.uri())).expect("valid base url");
    let api = ReqwestApi::new(settings).expect("client builds");
    assert_eq!(api.endpoint().path(), "/recommend");
    assert!(api.recommend("sql").await.expect("request ok").is_empty());
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/recommend"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "recommendations": [] })),
        )
        .mount(&server)
        .await;

    let settings = ApiSettings {
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::new(&server.uri()).expect("valid base url")
    };
    let api = ReqwestApi::new(settings).expect("client builds");

    let err = api.recommend("sql").await.unwrap_err();
    assert_eq!(err, ApiError::Timeout);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/recommend"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"recommendations\": []}"))
        .mount(&server)
        .await;

    let settings = ApiSettings {
        max_bytes: 8,
        ..ApiSettings::new(&server.uri()).expect("valid base url")
    };
    let api = ReqwestApi::new(settings).expect("client builds");

    let err = api.recommend("sql").await.unwrap_err();
    assert_eq!(err, ApiError::TooLarge { max_bytes: 8 });
}

#[tokio::test]
async fn connection_refused_is_network_error() {
    // Bind and immediately release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let uri = format!("http://{}", listener.local_addr().expect("local addr"));
    drop(listener);

    let api = ReqwestApi::new(ApiSettings::new(&uri).expect("valid base url")).expect("client builds");
    let err = api.recommend("sql").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "unexpected error {err:?}");
}
