//! Integration tests for the resume relevance checker

use resume_relevance::input::InputManager;
use resume_relevance::output::formatter::export_csv;
use resume_relevance::processing::evaluator::{EvaluationSession, Evaluator};
use resume_relevance::{evaluate, Document, EvaluationConfig, ExtractionMode, KeywordWeights, RelevanceError, Verdict};
use std::path::Path;

const JD: &str = "tests/fixtures/sample_jd.txt";
const RESUME_TXT: &str = "tests/fixtures/sample_resume.txt";
const RESUME_MD: &str = "tests/fixtures/sample_resume.md";

fn words_config() -> EvaluationConfig {
    EvaluationConfig::new(ExtractionMode::Words, 20, KeywordWeights::default()).unwrap()
}

async fn load_session(manager: &mut InputManager) -> EvaluationSession {
    let mut session = EvaluationSession::new();
    session.set_job(manager.load_document(Path::new(JD)).await.unwrap());
    session.add_resume(manager.load_resume(Path::new(RESUME_TXT)).await.unwrap());
    session.add_resume(manager.load_resume(Path::new(RESUME_MD)).await.unwrap());
    session
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let text = manager.extract_text(Path::new(RESUME_TXT)).await.unwrap();

    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    // Whitespace runs are collapsed
    assert!(!text.contains('\n'));
    assert!(!text.contains("  "));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let text = manager.extract_text(Path::new(RESUME_MD)).await.unwrap();

    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new(RESUME_TXT);

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(matches!(result, Err(RelevanceError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await;
    assert!(matches!(result, Err(RelevanceError::InvalidInput(_))));
}

#[tokio::test]
async fn test_unreadable_pdf_resume_scores_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.pdf");
    std::fs::write(&path, b"%PDF-garbage").unwrap();

    let mut manager = InputManager::new();
    let resume = manager.load_resume(&path).await.unwrap();
    assert_eq!(resume.name, "scan.pdf");
    assert!(resume.text.is_empty());

    let jd = manager.load_document(Path::new(JD)).await.unwrap();
    let report = evaluate(&jd.text, &[resume], &words_config()).unwrap();
    assert_eq!(report.records[0].score, 0.0);
    assert_eq!(report.records[0].verdict, Verdict::Low);
}

#[tokio::test]
async fn test_end_to_end_words_mode() {
    let mut manager = InputManager::new();
    let session = load_session(&mut manager).await;

    let evaluator = Evaluator::new(&words_config());
    let report = session.evaluate(&evaluator).unwrap();

    assert_eq!(
        report.job.keywords,
        vec!["backend", "engineer", "required", "skills", "python", "django", "postgresql", "docker", "kubernetes"]
    );

    let txt = &report.records[0];
    assert_eq!(txt.resume, "sample_resume.txt");
    assert_eq!(txt.score, 77.78);
    assert_eq!(txt.verdict, Verdict::High);
    assert_eq!(txt.missing, vec!["required", "kubernetes"]);

    let md = &report.records[1];
    assert_eq!(md.resume, "sample_resume.md");
    assert_eq!(md.score, 33.33);
    assert_eq!(md.verdict, Verdict::Low);
    assert_eq!(md.matched, vec!["engineer", "skills", "python"]);
}

#[tokio::test]
async fn test_weights_shift_the_score() {
    let mut manager = InputManager::new();
    let session = load_session(&mut manager).await;

    let weights = KeywordWeights::new([("Python", 5.0)]).unwrap();
    let config = EvaluationConfig::new(ExtractionMode::Words, 20, weights).unwrap();
    let report = session.evaluate(&Evaluator::new(&config)).unwrap();

    // 11 of 13 weight units matched
    assert_eq!(report.records[0].score, 84.62);
    assert!(report.metadata.weighted);
}

#[tokio::test]
async fn test_token_mode_picks_up_skill_names() {
    let mut manager = InputManager::new();
    let jd = manager.load_document(Path::new(JD)).await.unwrap();

    let config = EvaluationConfig::new(ExtractionMode::Token, 20, KeywordWeights::default()).unwrap();
    let keywords = Evaluator::new(&config).extract_keywords(&jd.text);

    assert!(keywords.iter().any(|k| k == "Python"));
    assert!(keywords.iter().any(|k| k == "Kubernetes"));
    assert!(keywords.len() <= 20);
}

#[tokio::test]
async fn test_csv_export_from_fixtures() {
    let mut manager = InputManager::new();
    let session = load_session(&mut manager).await;
    let report = session.evaluate(&Evaluator::new(&words_config())).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume_scores.csv");
    export_csv(&report, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "Resume,Score (%),Verdict,Matched Skills,Missing Skills");
    assert_eq!(lines[2], "sample_resume.md,33.33,Low,\"engineer, skills, python\",\"backend, required, django, postgresql, docker, kubernetes\"");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_missing_inputs_are_reported() {
    let err = evaluate("Python developer", &[], &EvaluationConfig::default()).unwrap_err();
    assert!(matches!(err, RelevanceError::MissingInput(_)));

    let mut session = EvaluationSession::new();
    session.add_resume(Document::new("cv.txt", "Python"));
    let err = session.evaluate(&Evaluator::new(&EvaluationConfig::default())).unwrap_err();
    assert!(matches!(err, RelevanceError::MissingInput(_)));
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let err = EvaluationConfig::new(ExtractionMode::Token, -1, KeywordWeights::default()).unwrap_err();
    assert!(matches!(err, RelevanceError::Configuration(_)));

    let err = KeywordWeights::new([("Python", -1.0)]).unwrap_err();
    assert!(matches!(err, RelevanceError::Configuration(_)));
}
