use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn lookc_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("lookc");
    path
}

const TEST_CATALOG: &str = r#"{
  "body_shapes": {
    "Pear": {
      "recommendations": {
        "tops": {
          "do": [
            "Boat neck tops",
            {"item": "Statement sleeves", "style_tags": ["trendy"]},
            {"item": "Structured blazers", "style_tags": ["classic"]},
            {"item": "Deconstructed jackets", "style_tags": ["adventurous"]}
          ],
          "dont": ["Skinny tops with narrow shoulders"]
        }
      }
    }
  }
}"#;

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("catalog.json"), TEST_CATALOG).unwrap();

    let config_content = format!(
        r#"[db]
path = "{root}/data/lookcircuit.sqlite"

[catalog]
path = "{root}/data/catalog.json"

[scrape]
sites = ["myntra"]
per_site_cap = 5

[recommend]
top_n = 5

[server]
bind = "127.0.0.1:7311"
"#,
        root = root.display()
    );

    let config_path = config_dir.join("lookcircuit.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_lookc(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = lookc_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run lookc binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_init_creates_database() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_lookc(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("initialized"));
    assert!(tmp.path().join("data/lookcircuit.sqlite").exists());
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success1) = run_lookc(&config_path, &["init"]);
    assert!(success1, "First init failed");

    let (_, _, success2) = run_lookc(&config_path, &["init"]);
    assert!(success2, "Second init failed (not idempotent)");
}

#[test]
fn test_sites_lists_all_adapters_with_status() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_lookc(&config_path, &["sites"]);
    assert!(success, "sites failed: stderr={}", stderr);
    for site in ["myntra", "snitch", "souledstore", "ajio"] {
        assert!(stdout.contains(site), "missing {site} in: {stdout}");
    }
    // Deliberately disabled sites stay listed.
    assert!(stdout.contains("comicsense"));
    assert!(stdout.contains("xenpachi"));
    assert!(stdout.contains("disabled"));
}

#[test]
fn test_search_rejects_unknown_site() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) =
        run_lookc(&config_path, &["search", "jeans", "--site", "not-a-site"]);
    assert!(!success);
    assert!(stderr.contains("Unknown site id"), "stderr: {}", stderr);
}

#[test]
fn test_search_on_disabled_site_yields_empty_products() {
    let (_tmp, config_path) = setup_test_env();

    // comicsense is a registered null adapter: valid id, no network, no
    // results.
    let (stdout, stderr, success) =
        run_lookc(&config_path, &["search", "jeans", "--site", "comicsense"]);
    assert!(success, "search failed: stderr={}", stderr);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["query"], "jeans");
    assert_eq!(json["products"].as_array().unwrap().len(), 0);
}

#[test]
fn test_personalize_conservative_filters_and_annotates() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_lookc(
        &config_path,
        &[
            "personalize",
            "--body-shape",
            "Pear",
            "--risk",
            "conservative",
            "--colors",
            "olive, rust",
        ],
    );
    assert!(success, "personalize failed: {}", stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let dos = json["recommendations"]["tops"]["do"].as_array().unwrap();
    assert_eq!(dos.len(), 2);
    assert_eq!(dos[0], "Boat neck tops (consider in olive)");
    assert_eq!(dos[1], "Structured blazers (consider in olive)");
    let donts = json["recommendations"]["tops"]["dont"].as_array().unwrap();
    assert_eq!(donts[0], "Skinny tops with narrow shoulders");
}

#[test]
fn test_personalize_unknown_shape_errors_with_payload() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) =
        run_lookc(&config_path, &["personalize", "--body-shape", "Oval"]);
    assert!(!success, "expected nonzero exit");
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(json["error"].as_str().unwrap().contains("Oval"));
}

#[test]
fn test_personalize_missing_catalog_errors_with_payload() {
    let (tmp, config_path) = setup_test_env();
    fs::remove_file(tmp.path().join("data/catalog.json")).unwrap();

    let (stdout, _, success) =
        run_lookc(&config_path, &["personalize", "--body-shape", "Pear"]);
    assert!(!success);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("missing or corrupt"));
}

#[test]
fn test_interact_and_recommend_end_to_end() {
    let (_tmp, config_path) = setup_test_env();
    run_lookc(&config_path, &["init"]);

    // Users 2 and 3 both saved items 20 and 30; user 1 saved only 20, so
    // 30 should come back first. Item 40 has no overlap with 20.
    for (user, item) in [
        ("2", "20"),
        ("2", "30"),
        ("3", "20"),
        ("3", "30"),
        ("4", "40"),
        ("1", "20"),
    ] {
        let (_, stderr, success) = run_lookc(&config_path, &["interact", user, item]);
        assert!(success, "interact failed: {}", stderr);
    }

    let (stdout, _, success) = run_lookc(&config_path, &["recommend", "1"]);
    assert!(success);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let items = json["items"].as_array().unwrap();
    assert_eq!(items[0], 30);
    assert!(!items.iter().any(|i| i == 20));
}

#[test]
fn test_recommend_unknown_user_is_empty() {
    let (_tmp, config_path) = setup_test_env();
    run_lookc(&config_path, &["init"]);

    let (stdout, _, success) = run_lookc(&config_path, &["recommend", "99"]);
    assert!(success);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["items"].as_array().unwrap().len(), 0);
}

#[test]
fn test_recommend_respects_top_n() {
    let (_tmp, config_path) = setup_test_env();
    run_lookc(&config_path, &["init"]);

    for item in ["1", "2", "3", "4"] {
        run_lookc(&config_path, &["interact", "2", item]);
    }
    run_lookc(&config_path, &["interact", "1", "1"]);

    let (stdout, _, _) = run_lookc(&config_path, &["recommend", "1", "--top-n", "2"]);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
}

#[test]
fn test_only_saves_feed_recommendations() {
    let (_tmp, config_path) = setup_test_env();
    run_lookc(&config_path, &["init"]);

    run_lookc(&config_path, &["interact", "2", "10"]);
    run_lookc(&config_path, &["interact", "2", "11", "--kind", "like"]);
    run_lookc(&config_path, &["interact", "1", "10"]);

    let (stdout, _, _) = run_lookc(&config_path, &["recommend", "1"]);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    // Item 11 was only liked, never saved, so nothing is recommendable.
    assert_eq!(json["items"].as_array().unwrap().len(), 0);
}

#[test]
fn test_interact_rejects_unknown_kind() {
    let (_tmp, config_path) = setup_test_env();
    run_lookc(&config_path, &["init"]);

    let (_, stderr, success) =
        run_lookc(&config_path, &["interact", "1", "10", "--kind", "meh"]);
    assert!(!success);
    assert!(stderr.contains("Unknown interaction kind"));
}
