use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};
use rflux::{
    FluxConfig, FluxError, GenerationRequest, ImageBackend, ImageClient, InferenceClient,
    ResponseEncoding,
};
use serde_json::json;
use std::io::Cursor;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "hf_test_token";
const MODEL_PATH: &str = "/models/black-forest-labs/FLUX.1-schnell";

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = DynamicImage::new_rgb8(width, height);
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, ImageFormat::Png).unwrap();
    cursor.into_inner()
}

fn config_for(server: &MockServer) -> FluxConfig {
    FluxConfig::new()
        .with_token(TOKEN)
        .with_api_url(format!("{}{}", server.uri(), MODEL_PATH))
}

#[tokio::test]
async fn test_posts_documented_body_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("authorization", "Bearer hf_test_token"))
        .and(body_json(json!({
            "inputs": "Портрет кота в костюме астронавта",
            "parameters": {
                "width": 768,
                "height": 512,
                "num_inference_steps": 2,
                "guidance_scale": 0.0
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png_bytes(768, 512), "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ImageClient::new(&config_for(&server)).unwrap();
    let request = GenerationRequest::new("Портрет кота в костюме астронавта").with_size(768, 512);
    let result = client.generate(&request).await.unwrap();

    assert_eq!(result.dimensions(), (768, 512));
    assert_eq!(result.encoded, png_bytes(768, 512));
    assert_eq!(result.seed, None);
    assert!(!result.request_id.is_empty());
}

#[tokio::test]
async fn test_pasted_token_with_newline_still_authenticates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer hf_test_token"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png_bytes(768, 768), "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let api_url = format!("{}{}", server.uri(), MODEL_PATH);
    let config = FluxConfig::from_lookup(|key| match key {
        "HF_TOKEN" => Some("hf_test_token\n".to_string()),
        "FLUX_API_URL" => Some(api_url.clone()),
        _ => None,
    })
    .unwrap();

    let client = ImageClient::new(&config).unwrap();
    let result = client.generate(&GenerationRequest::default()).await.unwrap();
    assert_eq!(result.dimensions(), (768, 768));
}

#[tokio::test]
async fn test_seed_is_sent_and_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({
            "inputs": "a lighthouse",
            "parameters": {
                "width": 512,
                "height": 512,
                "num_inference_steps": 1,
                "guidance_scale": 0.0,
                "seed": 42
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png_bytes(512, 512), "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ImageClient::new(&config_for(&server)).unwrap();
    let request = GenerationRequest::new("a lighthouse")
        .with_size(512, 512)
        .with_steps(1)
        .with_seed(42);
    let result = client.generate(&request).await.unwrap();

    assert_eq!(result.seed, Some(42));
}

#[tokio::test]
async fn test_base64_json_response() {
    let server = MockServer::start().await;
    let png = png_bytes(640, 576);
    let encoded = STANDARD.encode(&png);
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "image_base64": encoded, "seed": 777 }])),
        )
        .mount(&server)
        .await;

    let config = config_for(&server).with_response_encoding(ResponseEncoding::Base64Json);
    let client = InferenceClient::new(config).unwrap();
    let request = GenerationRequest::new("a lighthouse").with_size(640, 576);
    let result = client.generate(&request).await.unwrap();

    assert_eq!(result.encoded, STANDARD.decode(&encoded).unwrap());
    assert_eq!(result.dimensions(), (640, 576));
    assert_eq!(result.seed, Some(777));
}

#[tokio::test]
async fn test_error_statuses_take_connectivity_path() {
    for status in [400u16, 401, 429, 500, 503] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_string("Model is currently loading"))
            .mount(&server)
            .await;

        let client = ImageClient::new(&config_for(&server)).unwrap();
        let err = client
            .generate(&GenerationRequest::default())
            .await
            .unwrap_err();

        match &err {
            FluxError::HttpStatus { status: got, body } => {
                assert_eq!(*got, status);
                assert_eq!(body, "Model is currently loading");
            }
            other => panic!("expected HttpStatus, got {:?}", other),
        }
        assert!(err.is_connectivity());
    }
}

#[tokio::test]
async fn test_undecodable_body_is_generic_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"not an image".to_vec(), "image/png"))
        .mount(&server)
        .await;

    let client = ImageClient::new(&config_for(&server)).unwrap();
    let err = client
        .generate(&GenerationRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, FluxError::ImageError(_)));
    assert!(!err.is_connectivity());
    assert!(err.user_message().starts_with("❌ Произошла ошибка: "));
}

#[tokio::test]
async fn test_timeout_is_connectivity_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(png_bytes(512, 512), "image/png")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = config_for(&server).with_timeout(Duration::from_millis(50));
    let client = ImageClient::new(&config).unwrap();
    let err = client
        .generate(&GenerationRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, FluxError::ConnectionError(_)));
    assert!(err.is_connectivity());
}

#[tokio::test]
async fn test_unreachable_endpoint_is_connectivity_failure() {
    let server = MockServer::start().await;
    let config = config_for(&server);
    drop(server);

    let client = ImageClient::new(&config).unwrap();
    let err = client
        .generate(&GenerationRequest::default())
        .await
        .unwrap_err();

    assert!(err.is_connectivity());
}

#[tokio::test]
async fn test_invalid_request_never_reaches_the_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ImageClient::new(&config_for(&server)).unwrap();
    for request in [
        GenerationRequest::new(""),
        GenerationRequest::new("x").with_size(1100, 512),
        GenerationRequest::new("x").with_steps(8),
    ] {
        let err = client.generate(&request).await.unwrap_err();
        assert!(matches!(err, FluxError::InvalidRequest(_)));
    }
}
