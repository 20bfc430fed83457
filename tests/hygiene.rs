//! Hygiene — source-level standards checked at test time.
//!
//! Scans the production sources under `src/` for constructs that either crash
//! the editor mid-gesture or swallow errors. Every rule has a budget of zero;
//! a new exception means removing an old one first.

use std::fs;
use std::path::{Path, PathBuf};

struct Rule {
    pattern: &'static str,
    budget: usize,
    reason: &'static str,
}

/// Crash paths. Input handlers run on every pointer event.
const PANIC_RULES: &[Rule] = &[
    Rule { pattern: ".unwrap()", budget: 0, reason: "propagate or handle the error" },
    Rule { pattern: ".expect(", budget: 0, reason: "propagate or handle the error" },
    Rule { pattern: "panic!(", budget: 0, reason: "return an error instead" },
    Rule { pattern: "unreachable!(", budget: 0, reason: "make the state unrepresentable" },
    Rule { pattern: "todo!(", budget: 0, reason: "finish the stub" },
    Rule { pattern: "unimplemented!(", budget: 0, reason: "finish the stub" },
];

/// Silent loss. Refusals must surface as `Rejected` actions or log lines.
const DISCARD_RULES: &[Rule] = &[
    Rule { pattern: "let _ =", budget: 0, reason: "inspect the result" },
    Rule { pattern: ".ok()", budget: 0, reason: "match on the error" },
];

const STYLE_RULES: &[Rule] = &[
    Rule { pattern: "#[allow(dead_code)]", budget: 0, reason: "delete the unused item" },
    Rule { pattern: "println!(", budget: 0, reason: "log through tracing" },
    Rule { pattern: "eprintln!(", budget: 0, reason: "log through tracing" },
];

struct SourceFile {
    path: PathBuf,
    content: String,
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

fn is_test_file(path: &Path) -> bool {
    path.file_stem()
        .is_some_and(|stem| stem.to_string_lossy().ends_with("_test"))
        || path.components().any(|c| c.as_os_str() == "tests")
}

/// Production `.rs` files under `src/`, sorted for stable reports.
fn production_sources() -> Vec<SourceFile> {
    let mut paths = Vec::new();
    walk(Path::new("src"), &mut paths);
    paths.sort();
    paths
        .into_iter()
        .filter(|path| !is_test_file(path))
        .filter_map(|path| fs::read_to_string(&path).map(|content| SourceFile { path, content }).ok())
        .collect()
}

fn violations(files: &[SourceFile], rule: &Rule) -> Vec<String> {
    let mut out = Vec::new();
    for file in files {
        for (n, line) in file.content.lines().enumerate() {
            let code = line.trim_start();
            if code.starts_with("//") {
                continue;
            }
            if code.contains(rule.pattern) {
                out.push(format!("  {}:{}: {}", file.path.display(), n + 1, code));
            }
        }
    }
    out
}

fn check(rules: &[Rule]) {
    let files = production_sources();
    assert!(!files.is_empty(), "no sources found; run from the crate root");

    let mut report = Vec::new();
    for rule in rules {
        let hits = violations(&files, rule);
        if hits.len() > rule.budget {
            report.push(format!(
                "`{}` budget exceeded: found {}, max {} ({})\n{}",
                rule.pattern,
                hits.len(),
                rule.budget,
                rule.reason,
                hits.join("\n")
            ));
        }
    }
    assert!(report.is_empty(), "{}", report.join("\n\n"));
}

#[test]
fn no_panic_paths() {
    check(PANIC_RULES);
}

#[test]
fn no_silent_discards() {
    check(DISCARD_RULES);
}

#[test]
fn style_budgets() {
    check(STYLE_RULES);
}

#[test]
fn every_test_file_is_wired() {
    let mut paths = Vec::new();
    walk(Path::new("src"), &mut paths);

    let mut orphans = Vec::new();
    for path in paths.iter().filter(|p| is_test_file(p)) {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        let owner = path.with_file_name(name.replace("_test.rs", ".rs"));
        let wired = fs::read_to_string(&owner)
            .is_ok_and(|content| content.contains(&format!("#[path = \"{name}\"]")));
        if !wired {
            orphans.push(format!("  {}", path.display()));
        }
    }
    assert!(orphans.is_empty(), "test files never compiled:\n{}", orphans.join("\n"));
}
