use serde_json::json;
use std::time::Duration;
use verifika::*;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server_uri: &str) -> AppConfig {
    AppConfig {
        api_url: format!("{}/api/predict", server_uri),
        request_timeout_secs: Some(5),
        ..AppConfig::default()
    }
}

fn service_for(config: &AppConfig) -> AnalysisService {
    AnalysisService::new(
        SessionHolder::new(config.preview_chars()),
        AnalysisRequester::new(config).unwrap(),
    )
}

#[tokio::test]
async fn test_successful_analysis_sends_options() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "text": "Breaking: Scientists discover...",
            "analysis_options": {
                "sentiment": true,
                "political_bias": false,
                "clickbait": true
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "prediction": "Fake News", "confidence": 87.5 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&config_for(&server.uri()));
    service.set_text("Breaking: Scientists discover...".to_string()).await.unwrap();
    service.toggle_option(AnalysisOption::PoliticalBias).await.unwrap();

    let result = service.submit().await.unwrap();
    assert_eq!(result.prediction(), "Fake News");
    assert_eq!(service.result_view().await.unwrap().confidence, "87.5");

    let snapshot = service.snapshot().await.unwrap();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.error, None);
    assert_eq!(snapshot.result, Some(result));
    assert_eq!(snapshot.history.len(), 1);
    assert_eq!(snapshot.history[0].preview, "Breaking: Scientists discover......");

    assert_eq!(
        service.copy_result().await.unwrap(),
        "Analysis Result:\nFake News\nConfidence: 87.50%"
    );
}

#[tokio::test]
async fn test_server_error_is_stored_without_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let service = service_for(&config_for(&server.uri()));
    service.set_text("Some article".to_string()).await.unwrap();

    let err = service.submit().await.unwrap_err();
    assert_eq!(err.failure_kind(), Some(FailureKind::HttpStatus));

    let snapshot = service.snapshot().await.unwrap();
    assert_eq!(snapshot.error.as_deref(), Some("Failed to analyze text"));
    assert_eq!(snapshot.result, None);
    assert!(snapshot.history.is_empty());
    assert!(matches!(service.copy_result().await, Err(AnalysisError::NoResult)));
}

#[tokio::test]
async fn test_malformed_body_is_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let requester = AnalysisRequester::new(&config_for(&server.uri())).unwrap();
    let request = AnalysisRequest::new("text", AnalysisOptions::default()).unwrap();
    let err = requester.analyze(&request).await.unwrap_err();
    assert_eq!(err.failure_kind(), Some(FailureKind::Decode));
    assert!(!requester.is_busy());
}

#[tokio::test]
async fn test_missing_prediction_is_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "confidence": 50 } })))
        .mount(&server)
        .await;

    let requester = AnalysisRequester::new(&config_for(&server.uri())).unwrap();
    let request = AnalysisRequest::new("text", AnalysisOptions::default()).unwrap();
    let err = requester.analyze(&request).await.unwrap_err();
    assert_eq!(err.failure_kind(), Some(FailureKind::Decode));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_failure() {
    // Порт освобождается сразу после bind, соединение будет отклонено
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service = service_for(&config_for(&format!("http://{}", addr)));
    service.set_text("Some article".to_string()).await.unwrap();

    let err = service.submit().await.unwrap_err();
    assert_eq!(err.failure_kind(), Some(FailureKind::Network));
    assert!(service.history().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_requester_rejects_concurrent_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "prediction": "Real News", "confidence": 70.0 } }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let requester = AnalysisRequester::new(&config_for(&server.uri())).unwrap();
    let request = AnalysisRequest::new("text", AnalysisOptions::default()).unwrap();

    let first = {
        let requester = requester.clone();
        let request = request.clone();
        tokio::spawn(async move { requester.analyze(&request).await })
    };
    while !requester.is_busy() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    assert!(matches!(
        requester.analyze(&request).await,
        Err(AnalysisError::RequestInFlight)
    ));
    assert!(first.await.unwrap().is_ok());
    assert!(!requester.is_busy());
}

#[tokio::test]
async fn test_service_discards_response_after_clear() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "prediction": "Fake News", "confidence": 99.0 } }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let service = service_for(&config_for(&server.uri()));
    service.set_text("Text that will be cleared".to_string()).await.unwrap();

    let pending = {
        let service = service.clone();
        tokio::spawn(async move { service.submit().await })
    };
    while !service.snapshot().await.unwrap().loading {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    assert!(matches!(service.submit().await, Err(AnalysisError::RequestInFlight)));
    service.clear_input().await.unwrap();

    assert!(matches!(pending.await.unwrap(), Err(AnalysisError::Superseded)));
    let snapshot = service.snapshot().await.unwrap();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.result, None);
    assert!(snapshot.history.is_empty());
}

#[tokio::test]
async fn test_dropped_submit_still_finishes_cycle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "prediction": "Real News", "confidence": 64.0 } }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let service = service_for(&config_for(&server.uri()));
    service.set_text("Slow cold start".to_string()).await.unwrap();

    // Вызывающий сдаётся раньше, чем приходит ответ
    let abandoned = tokio::time::timeout(Duration::from_millis(50), service.submit()).await;
    assert!(abandoned.is_err());

    for _ in 0..100 {
        if !service.snapshot().await.unwrap().loading {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let snapshot = service.snapshot().await.unwrap();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.result.as_ref().map(|r| r.prediction()), Some("Real News"));
    assert_eq!(snapshot.history.len(), 1);

    let result = service.submit().await.unwrap();
    assert_eq!(result.prediction(), "Real News");
    assert_eq!(service.history().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_partial_sentiment_block_keeps_prediction() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "prediction": "Fake News",
                "confidence": 87.5,
                "additional_analysis": { "sentiment": { "sentiment": "positive" } }
            }
        })))
        .mount(&server)
        .await;

    let service = service_for(&config_for(&server.uri()));
    service.set_text("Some article".to_string()).await.unwrap();

    let result = service.submit().await.unwrap();
    assert_eq!(result.prediction(), "Fake News");

    let view = service.result_view().await.unwrap();
    let sentiment = view.sentiment.unwrap();
    assert_eq!(sentiment.label.as_deref(), Some("positive"));
    assert_eq!(sentiment.score, None);
    assert_eq!(service.history().await.unwrap().len(), 1);
}
