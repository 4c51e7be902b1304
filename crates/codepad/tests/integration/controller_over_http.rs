use std::sync::Mutex;

use codepad::{
    BusyIndicator, Config, DirectoryDownloader, ExecutionController, ExecutionResult,
    ExecutionStatus, HttpExecutionService, Language,
};

use super::{closed_url, serve_once};

/// Counts shows and dismissals
#[derive(Default)]
struct CountingIndicator {
    counts: Mutex<(usize, usize)>,
}

impl BusyIndicator for CountingIndicator {
    fn show(&self, _message: &str) {
        self.counts.lock().unwrap().0 += 1;
    }

    fn dismiss(&self) {
        self.counts.lock().unwrap().1 += 1;
    }
}

fn controller(
    url: &str,
    save_dir: &std::path::Path,
) -> ExecutionController<HttpExecutionService, CountingIndicator, DirectoryDownloader> {
    let mut config = Config::default();
    config.service.url = url.to_owned();
    config.service.timeout_secs = 5;

    let service = HttpExecutionService::from_config(&config.service).expect("client");
    ExecutionController::new(
        &config,
        service,
        CountingIndicator::default(),
        DirectoryDownloader::new(save_dir),
    )
}

#[tokio::test]
async fn test_run_and_save_python() {
    let server = serve_once(200, r#"{"output":"4\n","error":""}"#).await;
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller(&server.url, dir.path());

    controller.set_language(Language::Python);
    controller.set_source_text("print(2 + 2)");
    controller.run().await;

    assert_eq!(controller.status(), &ExecutionStatus::Completed);
    assert_eq!(
        controller.current_result(),
        Some(&ExecutionResult::Output("4\n".to_owned()))
    );
    assert_eq!(*controller.indicator().counts.lock().unwrap(), (1, 1));

    let raw = server.request.await.unwrap();
    assert!(raw.contains("language=py"));

    controller.save();
    let saved = std::fs::read_to_string(dir.path().join("saved-code.py")).unwrap();
    assert_eq!(saved, "print(2 + 2)");
}

#[tokio::test]
async fn test_compile_error_is_surfaced() {
    let server = serve_once(
        200,
        r#"{"output":"","error":"Main.java:1: error: ';' expected"}"#,
    )
    .await;
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller(&server.url, dir.path());

    controller.set_source_text("class Main { }}");
    controller.run().await;

    let result = controller.current_result().unwrap();
    assert!(result.is_failure());
    assert!(result.text().contains("';' expected"));
}

#[tokio::test]
async fn test_unreachable_service_dismisses_indicator() {
    let url = closed_url().await;
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller(&url, dir.path());

    controller.set_language(Language::Javascript);
    controller.set_source_text("console.log(1)");
    controller.run().await;

    assert!(matches!(controller.status(), ExecutionStatus::Unreachable(_)));
    assert!(controller.current_result().is_none());
    assert_eq!(*controller.indicator().counts.lock().unwrap(), (1, 1));
    assert_eq!(controller.source_text(), "console.log(1)");
}
