use async_trait::async_trait;
use image::DynamicImage;
use rflux::error::CONNECTIVITY_MESSAGE;
use rflux::ui::{render, Session};
use rflux::{FluxError, GenerationRequest, GenerationResult, ImageBackend, Result};
use std::io::Cursor;
use std::sync::Mutex;
use std::time::Duration;

enum Reply {
    Image,
    Unavailable,
    Broken,
}

struct FakeBackend {
    reply: Reply,
    seen: Mutex<Vec<GenerationRequest>>,
}

impl FakeBackend {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<GenerationRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageBackend for FakeBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        self.seen.lock().unwrap().push(request.clone());
        match self.reply {
            Reply::Image => Ok(GenerationResult {
                image: DynamicImage::new_rgb8(request.width, request.height),
                encoded: Vec::new(),
                seed: request.seed,
                request_id: "0123456789abcdef".into(),
                elapsed: Duration::from_millis(5),
            }),
            Reply::Unavailable => Err(FluxError::HttpStatus {
                status: 503,
                body: "Service Unavailable".into(),
            }),
            Reply::Broken => Err(FluxError::ResponseError("no images in response".into())),
        }
    }
}

async fn run_session(
    backend: &FakeBackend,
    dir: &std::path::Path,
    script: impl AsRef<[u8]>,
) -> String {
    colored::control::set_override(false);
    let mut input = Cursor::new(script.as_ref().to_vec());
    let mut output = Vec::new();
    Session::new(backend, dir)
        .run(&mut input, &mut output)
        .await
        .unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn test_generate_saves_image_and_prints_summary() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeBackend::new(Reply::Image);

    let output = run_session(&backend, dir.path(), "w 1000\nh 512\ns 3\nseed 42\ng\nq\n").await;

    assert!(output.contains(render::TITLE));
    assert!(output.contains(render::BUSY));
    assert!(output.contains(render::SUCCESS));
    assert!(output.contains("- 📐 Размер: 1024×512"));
    assert!(output.contains("- 🔄 Шагов: 3"));
    assert!(output.contains("- 🎲 Seed: 42"));
    assert!(output.contains(render::FOOTER));

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].width, 1024);
    assert_eq!(requests[0].seed, Some(42));

    let saved: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(saved.len(), 1);
    let saved = image::open(saved[0].as_ref().unwrap().path()).unwrap();
    assert_eq!((saved.width(), saved.height()), (1024, 512));
}

#[tokio::test]
async fn test_example_prompt_fills_the_form() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeBackend::new(Reply::Image);

    let output = run_session(&backend, dir.path(), "x\nx 4\n\n").await;

    assert!(output.contains("5. 📋 Космический корабль в далекой галактике"));
    assert_eq!(
        backend.requests()[0].prompt,
        "Волшебный лес с светящимися грибами"
    );
}

#[tokio::test]
async fn test_empty_prompt_is_refused_locally() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeBackend::new(Reply::Image);

    let output = run_session(&backend, dir.path(), "p\ng\nq\n").await;

    assert!(output.contains(render::EMPTY_PROMPT));
    assert!(!output.contains(render::BUSY));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_status_failure_shows_connectivity_message() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeBackend::new(Reply::Unavailable);

    let output = run_session(&backend, dir.path(), "g\nq\n").await;

    assert!(output.contains(render::BUSY));
    assert!(output.contains(CONNECTIVITY_MESSAGE));
    assert!(!output.contains("Произошла ошибка"));
}

#[tokio::test]
async fn test_other_failure_shows_error_text() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeBackend::new(Reply::Broken);

    let output = run_session(&backend, dir.path(), "g\nq\n").await;

    assert!(output.contains("❌ Произошла ошибка: Response error: no images in response"));
    assert!(!output.contains(CONNECTIVITY_MESSAGE));
}

#[tokio::test]
async fn test_bad_input_keeps_the_session_going() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeBackend::new(Reply::Image);

    let output = run_session(
        &backend,
        dir.path(),
        b"w wide\ndraw\n\xff\xfe\np \xff\xfe\nx\nq\n",
    )
    .await;

    assert!(output.contains("Не удалось разобрать число: 'wide'"));
    assert!(output.contains("Неизвестная команда: draw"));
    assert!(output.contains("Неизвестная команда: \u{fffd}\u{fffd}"));
    assert!(output.contains("📝 Описание изображения на русском: \u{fffd}\u{fffd}"));
    assert!(output.contains("5. 📋 Космический корабль в далекой галактике"));
    assert!(output.contains(render::FOOTER));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_summary_without_seed_omits_seed_line() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeBackend::new(Reply::Image);

    let output = run_session(&backend, dir.path(), "g\nq\n").await;

    assert!(output.contains(render::SUCCESS));
    assert!(output.contains("- 📝 Промпт: Красивый закат над морем в стиле импрессионизма"));
    assert!(output.contains("- 📐 Размер: 768×768"));
    assert!(output.contains("- 🔄 Шагов: 2"));
    assert!(!output.contains("- 🎲 Seed"));
    assert_eq!(backend.requests()[0].seed, None);
}
