use std::time::{Duration, Instant};

use anyhow::Result;
use serde_json::{Value, json};
use wa_gateway::{
    clients::{memory::MemoryDeliveryLog, providers::MpwaClient},
    models::{
        integration::IntegrationConfig,
        probe::{HttpMethod, RequestBody},
    },
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, header, method, path},
};

use crate::common::{API_KEY, gateway, gateway_with, settings};

const HTML_PAGE: &str = "<!DOCTYPE html><html><head><title>Login</title></head></html>";

fn mpwa(server: &MockServer) -> IntegrationConfig {
    IntegrationConfig::new("mpwa", &server.uri(), API_KEY)
}

/// Test: Markup replies are skipped until a variant is accepted
#[tokio::test]
async fn test_probe_stops_at_first_accepted_variant() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string(HTML_PAGE))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true, "msg": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let log = MemoryDeliveryLog::new();
    let gateway = gateway(Some(mpwa(&server).with_sender("6281111111111")), &log)?;

    let result = gateway.send("081234567890", "Halo").await;

    assert!(result.success());
    assert_eq!(result.provider_message(), Some("ok"));

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 3, "Should stop after the third variant");

    assert_eq!(requests[0].method.as_str(), "POST");
    assert_eq!(requests[1].method.as_str(), "GET");
    assert_eq!(requests[2].method.as_str(), "POST");

    let accepted: Value = requests[2].body_json()?;
    assert_eq!(
        accepted,
        json!({"api_key": API_KEY, "number": "6281234567890", "message": "Halo"})
    );

    Ok(())
}

/// Test: Exhausting every variant aggregates the rejection reasons
#[tokio::test]
async fn test_probe_exhaustion_aggregates_rejections() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": false, "message": "invalid key"})),
        )
        .expect(4)
        .mount(&server)
        .await;

    let log = MemoryDeliveryLog::new();
    let gateway = gateway(Some(mpwa(&server)), &log)?;

    let result = gateway.send("081234567890", "Halo").await;

    assert!(!result.success());
    assert_eq!(
        result.error_detail(),
        Some(
            "All 4 request variants were rejected (0 transport errors, 0 markup pages, 4 negative responses, 0 unexpected responses)"
        )
    );
    assert_eq!(
        result.raw_response(),
        Some(&json!({"status": false, "message": "invalid key"}))
    );

    Ok(())
}

/// Test: A flag says no even when the text mentions success
#[tokio::test]
async fn test_probe_flag_outranks_text() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": false, "message": "unsuccessful"})),
        )
        .mount(&server)
        .await;

    let log = MemoryDeliveryLog::new();
    let gateway = gateway(Some(mpwa(&server)), &log)?;

    assert!(!gateway.send("081234567890", "Halo").await.success());

    Ok(())
}

/// Test: Text is consulted when the reply carries no flag
#[tokio::test]
async fn test_probe_accepts_success_text_without_flag() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"msg": "Message sent successfully!"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let log = MemoryDeliveryLog::new();
    let gateway = gateway(Some(mpwa(&server)), &log)?;

    let result = gateway.send("081234567890", "Halo").await;

    assert!(result.success());
    assert_eq!(result.provider_message(), Some("Message sent successfully!"));

    Ok(())
}

/// Test: Timeouts on every variant fail within the summed request timeouts
#[tokio::test]
async fn test_probe_all_variants_time_out() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": true}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let mut settings = settings();
    settings.request_timeout = Duration::from_millis(100);

    let log = MemoryDeliveryLog::new();
    let gateway = gateway_with(Some(mpwa(&server)), &log, settings)?;

    let started = Instant::now();
    let result = gateway.send("081234567890", "Halo").await;
    let elapsed = started.elapsed();

    assert!(!result.success());
    assert!(
        result
            .error_detail()
            .unwrap_or_default()
            .contains("4 transport errors"),
        "got: {:?}",
        result.error_detail()
    );
    assert!(
        elapsed < Duration::from_millis(1500),
        "Probe took {:?}, expected about 4 x 100ms",
        elapsed
    );

    Ok(())
}

/// Test: Send variants follow the documented order
#[test]
fn test_send_variant_order_with_sender() {
    let config = IntegrationConfig::new("mpwa", "https://wa.example.id/", API_KEY).with_sender("628111");

    let variants = MpwaClient::send_variants(&config, "628123", "Halo");
    let labels: Vec<&str> = variants.iter().map(|v| v.label).collect();

    assert_eq!(
        labels,
        vec![
            "json-with-sender",
            "query-with-sender",
            "json-without-sender",
            "query-without-sender",
            "form-with-sender",
            "legacy-bearer",
            "legacy-apikey",
        ]
    );

    assert_eq!(variants[0].url, "https://wa.example.id/send-message");
    assert_eq!(variants[5].url, "https://wa.example.id/send");
    assert_eq!(variants[6].url, "https://wa.example.id/api/send-message");
    assert!(
        variants[5]
            .headers
            .contains(&("Authorization".to_string(), format!("Bearer {}", API_KEY)))
    );
    assert!(
        variants[6]
            .headers
            .contains(&("apikey".to_string(), API_KEY.to_string()))
    );
    assert_eq!(
        variants[5].body,
        RequestBody::Json(json!({"phone": "628123", "message": "Halo"}))
    );
}

/// Test: Without a sender the sender-carrying variants are left out
#[test]
fn test_send_variants_without_sender() {
    let config = IntegrationConfig::new("mpwa", "https://wa.example.id", API_KEY).with_sender("  ");

    let labels: Vec<&str> = MpwaClient::send_variants(&config, "628123", "Halo")
        .iter()
        .map(|v| v.label)
        .collect();

    assert_eq!(
        labels,
        vec![
            "json-without-sender",
            "query-without-sender",
            "legacy-bearer",
            "legacy-apikey",
        ]
    );
}

/// Test: A base URL that is already the send endpoint is used as is
#[test]
fn test_direct_send_endpoint() {
    let config = IntegrationConfig::new("mpwa", "https://wa.example.id/send-message", API_KEY)
        .with_sender("628111");

    let variants = MpwaClient::send_variants(&config, "628123", "Halo");

    assert_eq!(variants.len(), 3);
    assert!(
        variants
            .iter()
            .all(|v| v.url == "https://wa.example.id/send-message")
    );
    assert_eq!(variants[0].method, HttpMethod::Post);
    assert!(matches!(variants[0].body, RequestBody::Json(_)));
    assert_eq!(variants[1].method, HttpMethod::Get);
    assert!(
        variants[1]
            .query
            .contains(&("sender".to_string(), "628111".to_string()))
    );
    assert!(matches!(variants[2].body, RequestBody::Form(_)));
}

/// Test: Status probing takes the first well-formed reply, even a negative one
#[tokio::test]
async fn test_status_probe_first_json_wins() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .and(header("Authorization", format!("Bearer {}", API_KEY).as_str()))
        .respond_with(ResponseTemplate::new(404).set_body_string(HTML_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/status"))
        .and(header("Authorization", format!("Bearer {}", API_KEY).as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "disconnected", "message": "Scan QR first"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/device/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"connected": true})))
        .expect(0)
        .mount(&server)
        .await;

    let log = MemoryDeliveryLog::new();
    let gateway = gateway(Some(mpwa(&server)), &log)?;

    let report = gateway.check_status().await;

    assert!(!report.connected);
    assert_eq!(report.message.as_deref(), Some("Scan QR first"));

    Ok(())
}

/// Test: Status probing reports a fixed message when nothing answers
#[tokio::test]
async fn test_status_probe_exhaustion() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string(HTML_PAGE))
        .expect(5)
        .mount(&server)
        .await;

    let log = MemoryDeliveryLog::new();
    let gateway = gateway(Some(mpwa(&server)), &log)?;

    let report = gateway.check_status().await;

    assert!(!report.connected);
    assert_eq!(
        report.message.as_deref(),
        Some("Unable to check MPWA status. Please verify API URL and credentials.")
    );

    Ok(())
}
