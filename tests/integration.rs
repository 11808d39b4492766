use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn vsearch_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_vsearch"))
}

const RECORDS: &str = r#"[
  {"id": "m1", "kind": "mention", "title": "Acme", "body": "leading widget maker",
   "platform": "reddit", "sentiment": "positive", "date": "2024-05-02T09:00:00Z", "score": 72},
  {"id": "m2", "kind": "mention", "title": "Acme Corp", "body": "widget",
   "platform": "x", "sentiment": "negative", "date": "2024-05-10T09:00:00Z", "score": 40},
  {"id": "c1", "kind": "competitor", "title": "Globex pricing change", "body": "Globex undercuts Acme",
   "platform": "news", "date": "2024-04-20T09:00:00Z", "score": 60},
  {"id": "k1", "kind": "keyword", "title": "best widget", "body": "search volume rising",
   "score": 55},
  {"id": "i1", "kind": "insight", "title": "Share of voice", "body": "Acme share of voice grew",
   "sentiment": "neutral", "date": "2024-03-15T09:00:00Z"},
  {"id": "r1", "kind": "report", "title": "April report", "body": "monthly visibility summary",
   "date": "2024-04-30T09:00:00Z", "score": 90}
]"#;

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();

    fs::write(data_dir.join("records.json"), RECORDS).unwrap();

    let config_content = format!(
        r#"[records]
path = "{root}/data/records.json"

[results]
page_size = 2
max_results = 50

[presets]
path = "{root}/data/presets.json"
"#,
        root = root.display()
    );

    let config_path = config_dir.join("vsearch.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_vsearch(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = vsearch_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run vsearch binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn json_ids(stdout: &str) -> Vec<String> {
    let page: serde_json::Value = serde_json::from_str(stdout).unwrap();
    page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_search_without_constraints_shows_nothing() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, stderr, success) = run_vsearch(&config_path, &["search"]);
    assert!(success, "search failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_search_ranks_exact_title_first() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, stderr, success) =
        run_vsearch(&config_path, &["search", "Acme", "--page-size", "10", "--json"]);
    assert!(success, "search failed: stderr={}", stderr);

    let ids = json_ids(&stdout);
    assert_eq!(ids[0], "m1");
    assert_eq!(ids[1], "m2");
    // body-only matches keep input order after the title matches
    assert_eq!(&ids[2..], &["c1", "i1"]);
}

#[test]
fn test_search_text_output() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, _, success) = run_vsearch(&config_path, &["search", "acme", "--explain"]);
    assert!(success);
    assert!(stdout.contains("Showing 1-2 of 4 matches (page 1/2)"));
    assert!(stdout.contains("1. [100.00] mention / Acme"));
    assert!(stdout.contains("relevance: title=exact(+100)"));
    assert!(stdout.contains("id: m1"));
}

#[test]
fn test_pagination_and_past_last_page() {
    let (_tmp, config_path) = setup_test_env();

    let mut all = Vec::new();
    for page in ["1", "2"] {
        let (stdout, _, success) =
            run_vsearch(&config_path, &["search", "acme", "--page", page, "--json"]);
        assert!(success);
        all.extend(json_ids(&stdout));
    }
    assert_eq!(all, vec!["m1", "m2", "c1", "i1"]);

    let (stdout, _, success) = run_vsearch(&config_path, &["search", "acme", "--page", "3"]);
    assert!(success);
    assert!(stdout.contains("No results on page 3 (of 2)."));
}

#[test]
fn test_sentiment_filter_keeps_records_without_sentiment() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, _, success) = run_vsearch(
        &config_path,
        &["search", "--sentiment", "negative", "--page-size", "10", "--json"],
    );
    assert!(success);
    let ids = json_ids(&stdout);
    assert_eq!(ids, vec!["m2", "c1", "k1", "r1"]);
}

#[test]
fn test_score_filter() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, _, success) = run_vsearch(
        &config_path,
        &["search", "--kind", "mention", "--min-score", "50", "--json"],
    );
    assert!(success);
    assert_eq!(json_ids(&stdout), vec!["m1"]);
}

#[test]
fn test_date_filter_is_inclusive() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, _, success) = run_vsearch(
        &config_path,
        &[
            "search", "--since", "2024-04-30", "--until", "2024-05-02", "--kind", "mention",
            "--kind", "report", "--json",
        ],
    );
    assert!(success);
    assert_eq!(json_ids(&stdout), vec!["m1", "r1"]);
}

#[test]
fn test_inverted_date_range_matches_nothing() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, _, success) = run_vsearch(
        &config_path,
        &["search", "acme", "--since", "2024-06-01", "--until", "2024-01-01"],
    );
    assert!(success);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_inverted_score_range_matches_nothing() {
    let (_tmp, config_path) = setup_test_env();
    // i1 has no score and would pass a plain score check
    let (stdout, stderr, success) = run_vsearch(
        &config_path,
        &["search", "--min-score", "80", "--max-score", "20", "--json"],
    );
    assert!(success);
    assert!(json_ids(&stdout).is_empty());
    assert!(stderr.contains("No records can match"));
}

#[test]
fn test_non_finite_score_is_rejected() {
    let (_tmp, config_path) = setup_test_env();
    let (_, stderr, success) = run_vsearch(&config_path, &["search", "--min-score=nan"]);
    assert!(!success);
    assert!(stderr.contains("--min-score"));
}

#[test]
fn test_stats_warns_when_filters_cannot_match() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, stderr, success) = run_vsearch(
        &config_path,
        &["stats", "acme", "--since", "2024-06-01", "--until", "2024-01-01", "--json"],
    );
    assert!(success);
    assert!(stderr.contains("No records can match"));
    let counts: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(counts["total"], 0);
}

#[test]
fn test_unknown_kind_is_rejected() {
    let (_tmp, config_path) = setup_test_env();
    let (_, stderr, success) = run_vsearch(&config_path, &["search", "--kind", "tweet"]);
    assert!(!success);
    assert!(stderr.contains("tweet"));
}

#[test]
fn test_preset_lifecycle() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_vsearch(
        &config_path,
        &["preset", "save", "complaints", "acme", "--sentiment", "negative"],
    );
    assert!(success);
    assert!(stdout.contains("Saved preset 'complaints'."));

    let (stdout, _, success) = run_vsearch(&config_path, &["preset", "show", "complaints"]);
    assert!(success);
    assert!(stdout.contains("query:      acme"));
    assert!(stdout.contains("sentiments: negative"));

    let (stdout, _, success) = run_vsearch(
        &config_path,
        &["search", "--preset", "complaints", "--page-size", "10", "--json"],
    );
    assert!(success);
    assert_eq!(json_ids(&stdout), vec!["m2", "c1"]);

    let (_, _, success) = run_vsearch(&config_path, &["preset", "delete", "complaints"]);
    assert!(success);
    let (stdout, _, _) = run_vsearch(&config_path, &["preset", "list"]);
    assert!(stdout.contains("No presets available."));

    // deleting again is a no-op
    let (_, _, success) = run_vsearch(&config_path, &["preset", "delete", "complaints"]);
    assert!(success);
}

#[test]
fn test_preset_save_replaces_by_name() {
    let (_tmp, config_path) = setup_test_env();
    run_vsearch(&config_path, &["preset", "save", "p", "acme"]);
    run_vsearch(&config_path, &["preset", "save", "other", "widget"]);
    run_vsearch(&config_path, &["preset", "save", "p", "globex"]);

    let (stdout, _, success) = run_vsearch(&config_path, &["preset", "list"]);
    assert!(success);
    assert_eq!(stdout.matches("--- Preset:").count(), 2);
    let p = stdout.find("--- Preset: p ---").unwrap();
    let other = stdout.find("--- Preset: other ---").unwrap();
    assert!(p < other, "replaced preset keeps its position");
    assert!(stdout.contains("query:      globex"));
}

#[test]
fn test_missing_preset_degrades_to_empty() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, stderr, success) = run_vsearch(&config_path, &["search", "--preset", "nope"]);
    assert!(success);
    assert!(stderr.contains("not found"));
    assert!(stdout.contains("No results."));

    let (stdout, _, success) = run_vsearch(&config_path, &["preset", "show", "nope"]);
    assert!(success);
    assert!(stdout.contains("Preset 'nope' not found."));
}

#[test]
fn test_corrupt_preset_store_is_recoverable() {
    let (tmp, config_path) = setup_test_env();
    fs::write(
        tmp.path().join("data/presets.json"),
        r#"{"search_presets": "[{broken"}"#,
    )
    .unwrap();

    let (stdout, _, success) = run_vsearch(&config_path, &["preset", "list"]);
    assert!(success);
    assert!(stdout.contains("No presets available."));

    let (stdout, _, success) = run_vsearch(&config_path, &["preset", "save", "fresh", "acme"]);
    assert!(success, "save after corruption failed: {}", stdout);
    let (stdout, _, _) = run_vsearch(&config_path, &["preset", "list"]);
    assert!(stdout.contains("--- Preset: fresh ---"));
}

#[test]
fn test_stats_counts_facets() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, _, success) = run_vsearch(&config_path, &["stats", "acme", "--json"]);
    assert!(success);
    let counts: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(counts["total"], 4);
    assert_eq!(counts["kinds"]["mention"], 2);
    assert_eq!(counts["platforms"]["news"], 1);
    assert_eq!(counts["without_platform"], 1);
    assert_eq!(counts["without_sentiment"], 1);
}

#[test]
fn test_missing_records_file_fails() {
    let (tmp, config_path) = setup_test_env();
    fs::remove_file(tmp.path().join("data/records.json")).unwrap();
    let (_, stderr, success) = run_vsearch(&config_path, &["search", "acme"]);
    assert!(!success);
    assert!(stderr.contains("records"));
}
