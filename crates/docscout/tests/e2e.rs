//! End-to-end tests for docscout
//!
//! Builds project folders under a temp dir and scans them against number
//! logs given as rows.

use docscout::{
    CatalogStore, DocFile, DocscoutConfig, LogRow, NumberLog, ScanOptions, ScanReport, ScanWarning,
    Scanner, ScoutError, CASE_MISMATCH_COMMENT,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A project folder in a temp directory
struct TestEnv {
    _temp: TempDir,
    pub root: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path().join("project");
        fs::create_dir_all(&root).expect("Failed to create project dir");
        Self { _temp: temp, root }
    }

    fn write_file(&self, rel: &str) -> PathBuf {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok();
        }
        fs::write(&path, rel).expect("Failed to write file");
        path
    }

    fn scan(&self, project_number: &str, rows: Vec<LogRow>) -> ScanReport {
        self.scanner().scan_with_log(number_log(project_number, rows)).unwrap()
    }

    fn scanner(&self) -> Scanner {
        Scanner::new(ScanOptions::new(&self.root, self.root.join("number_log.xlsx"))).unwrap()
    }
}

fn number_log(project_number: &str, rows: Vec<LogRow>) -> NumberLog {
    NumberLog {
        project_number: project_number.to_string(),
        project_title: "Pump station".to_string(),
        rows,
    }
}

fn rel_paths(files: &[DocFile]) -> Vec<String> {
    files
        .iter()
        .map(|f| f.rel_path.to_string_lossy().replace('\\', "/"))
        .collect()
}

fn standard_rows() -> Vec<LogRow> {
    vec![
        LogRow::new(5, "P1234-1235", "Layout"),
        LogRow::new(6, "", ""),
        LogRow::new(7, "P1234-M1230-AA", "General arrangement"),
        LogRow::new(8, "P1234-E0001_AB", "Wiring"),
    ]
}

fn standard_tree(env: &TestEnv) {
    env.write_file("drawings/P1234-M1230-AA_plan.pdf");
    env.write_file("drawings/P1234-M1230-AB.dwg");
    env.write_file("drawings/p1234-1235_AA.pdf");
    env.write_file("electrical/P1234-E0001_AB.pdf");
    env.write_file("electrical/P1234-E0099.pdf");
    env.write_file("misc/readme.txt");
    env.write_file(".git/P1234-1235_HEAD");
    env.write_file("drawings/.git/refs/P1234-M1230-ZZ.pdf");
}

// ============================================================================
// Registry + classification
// ============================================================================

#[test]
fn test_full_scan_classifies_every_file() {
    let env = TestEnv::new();
    standard_tree(&env);

    let report = env.scan("P1234", standard_rows());
    let catalog = &report.catalog;

    assert_eq!(catalog.len(), 3);
    assert!(report.warnings.is_empty(), "unexpected warnings: {:?}", report.warnings);

    let ga = catalog.get("P1234-M1230").unwrap();
    assert_eq!(ga.rev, "AA");
    assert_eq!(
        rel_paths(&ga.files),
        vec!["drawings/P1234-M1230-AA_plan.pdf", "drawings/P1234-M1230-AB.dwg"]
    );
    assert_eq!(ga.files[0].nr, "P1234-M1230");
    assert_eq!(ga.files[0].rev, "AA");
    assert_eq!(ga.files[1].rev, "AB");
    assert!(ga.files.iter().all(|f| f.file_path.is_absolute()));

    let wiring = catalog.get("P1234-E0001").unwrap();
    assert_eq!(rel_paths(&wiring.files), vec!["electrical/P1234-E0001_AB.pdf"]);

    assert_eq!(rel_paths(catalog.orphan_files()), vec!["electrical/P1234-E0099.pdf"]);

    assert_eq!(report.stats.files_seen, 6);
    assert_eq!(report.stats.files_matched, 3);
    assert_eq!(report.stats.files_case_mismatch, 1);
    assert_eq!(report.stats.files_orphaned, 1);
    assert_eq!(report.stats.files_ignored, 1);
}

#[test]
fn test_case_mismatch_attached_with_comment() {
    let env = TestEnv::new();
    env.write_file("p1234-1235_AA.pdf");

    let report = env.scan("P1234", vec![LogRow::new(5, "P1234-1235", "Layout")]);

    let doc = report.catalog.get("P1234-1235").unwrap();
    assert_eq!(doc.files.len(), 1);
    assert_eq!(doc.files[0].comment, CASE_MISMATCH_COMMENT);
    assert!(report.catalog.orphan_files().is_empty());
}

#[test]
fn test_orphan_has_no_document_fields() {
    let env = TestEnv::new();
    env.write_file("P9999-unknown.txt");

    let report = env.scan("P9999", vec![LogRow::new(5, "P1234-1235", "Layout")]);

    let orphans = report.catalog.orphan_files();
    assert_eq!(rel_paths(orphans), vec!["P9999-unknown.txt"]);
    assert!(orphans[0].nr.is_empty());
    assert!(orphans[0].rev.is_empty());
    assert!(orphans[0].comment.is_empty());
    assert!(report.catalog.get("P1234-1235").unwrap().files.is_empty());
}

#[test]
fn test_skip_list_excludes_whole_subtrees() {
    let env = TestEnv::new();
    env.write_file("archive/P1234-1235_AA.pdf");
    env.write_file("deep/nested/archive/P1234-0001.pdf");
    env.write_file("deep/P1234-1235_AB.pdf");

    let mut options = ScanOptions::new(&env.root, "unused.xlsx");
    options.skip_dir_names = vec!["archive".to_string()];
    let report = Scanner::new(options)
        .unwrap()
        .scan_with_log(number_log("P1234", vec![LogRow::new(5, "P1234-1235", "Layout")]))
        .unwrap();

    let doc = report.catalog.get("P1234-1235").unwrap();
    assert_eq!(rel_paths(&doc.files), vec!["deep/P1234-1235_AB.pdf"]);
    assert!(report.catalog.orphan_files().is_empty());
    assert_eq!(report.stats.files_seen, 1);
}

#[test]
fn test_row_warnings_do_not_stop_scan() {
    let env = TestEnv::new();
    env.write_file("P1234-1235.pdf");

    let report = env.scan(
        "P1234",
        vec![
            LogRow::new(5, "Drawings", "section"),
            LogRow::new(6, "P1234-1235-AA", "Layout"),
            LogRow::new(7, "", ""),
            LogRow::new(8, "P1234-1235_AB", "Layout again"),
        ],
    );

    assert_eq!(
        report.warnings,
        vec![
            ScanWarning::InvalidRow {
                row: 5,
                raw: "Drawings".to_string()
            },
            ScanWarning::DuplicateNumber {
                nr: "P1234-1235".to_string(),
                first_row: 6,
                row: 8
            },
        ]
    );
    let doc = report.catalog.get("P1234-1235").unwrap();
    assert_eq!(doc.title, "Layout again");
    assert_eq!(doc.files.len(), 1);
}

#[test]
fn test_two_scans_are_identical() {
    let env = TestEnv::new();
    standard_tree(&env);
    for i in 0..20 {
        env.write_file(&format!("bulk/{:02}/P1234-M1230-{:02}.pdf", i % 4, i));
    }

    let first = env.scan("P1234", standard_rows());
    let second = env.scan("P1234", standard_rows());

    assert_eq!(first.catalog, second.catalog);
    assert_eq!(
        first.catalog.keys().collect::<Vec<_>>(),
        second.catalog.keys().collect::<Vec<_>>()
    );
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_skipped_with_warning() {
    use std::os::unix::fs::PermissionsExt;

    let env = TestEnv::new();
    env.write_file("P1234-1235.pdf");
    env.write_file("locked/P1234-M1230-AA.pdf");
    let locked = env.root.join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // permission bits do not stop root
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let report = env.scan("P1234", standard_rows());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(
        rel_paths(&report.catalog.get("P1234-1235").unwrap().files),
        vec!["P1234-1235.pdf"]
    );
    assert!(report.catalog.get("P1234-M1230").unwrap().files.is_empty());
    assert_eq!(report.stats.walk_errors, 1);
    assert_eq!(report.warnings.len(), 1);
    match &report.warnings[0] {
        ScanWarning::WalkAccess { path, .. } => {
            assert!(path.as_deref().is_some_and(|p| p.ends_with("locked")));
        }
        other => panic!("expected a walk warning, got {:?}", other),
    }
}

// ============================================================================
// Fatal errors
// ============================================================================

#[test]
fn test_missing_number_log_is_fatal() {
    let env = TestEnv::new();
    let result = env.scanner().scan();
    assert!(matches!(result, Err(ScoutError::Spreadsheet { .. })));
}

#[test]
fn test_missing_root_is_fatal() {
    let scanner = Scanner::new(ScanOptions::new("/nonexistent/project", "unused.xlsx")).unwrap();
    let result = scanner.scan_with_log(number_log("P1", Vec::new()));
    assert!(matches!(result, Err(ScoutError::RootTraversal { .. })));
}

// ============================================================================
// Config + rescan
// ============================================================================

#[test]
fn test_config_file_drives_scan_options() {
    let env = TestEnv::new();
    env.write_file("vendor/P1234-1235.pdf");
    env.write_file("P1234-1235.pdf");
    let config_path = env.root.join("config.toml");
    let toml = concat!(
        "project_number = \"P1234\"\n",
        "subdirs_to_skip = [\"vendor\"]\n",
        "number_log = \"admin/log.xlsx\"\n",
    );
    fs::write(&config_path, toml).unwrap();

    let config = DocscoutConfig::load(&config_path).unwrap();
    let options = config.scan_options(config_path.parent().unwrap());
    assert_eq!(options.number_log, env.root.join("admin/log.xlsx"));

    let report = Scanner::new(options)
        .unwrap()
        .scan_with_log(number_log("", vec![LogRow::new(5, "P1234-1235", "Layout")]))
        .unwrap();
    assert_eq!(report.catalog.project().number, "P1234");
    assert_eq!(
        rel_paths(&report.catalog.get("P1234-1235").unwrap().files),
        vec!["P1234-1235.pdf"]
    );
}

#[test]
fn test_rescan_publishes_new_catalog() {
    let env = TestEnv::new();
    env.write_file("P1234-1235.pdf");

    let store = CatalogStore::new(env.scan("P1234", standard_rows()).catalog);
    let before = store.snapshot();

    env.write_file("P1234-1235_AB.pdf");
    store.publish(env.scan("P1234", standard_rows()).catalog);

    assert_eq!(before.get("P1234-1235").unwrap().files.len(), 1);
    assert_eq!(store.snapshot().get("P1234-1235").unwrap().files.len(), 2);
}

#[test]
fn test_file_paths_stay_under_root() {
    let env = TestEnv::new();
    standard_tree(&env);

    let report = env.scan("P1234", standard_rows());
    let root: &Path = &report.root_dir;
    for doc in report.catalog.docs() {
        for file in &doc.files {
            assert!(file.file_path.starts_with(root));
            assert_eq!(root.join(&file.rel_path), file.file_path);
        }
    }
}
