//! Autofix roundtrip tests.
//!
//! For each fixture under `tests/fixtures/autofix`:
//! 1. Build rules from the fixture's rblint.toml
//! 2. Fix a copy of input.rb (must parse cleanly before and after)
//! 3. Lint the fixed file (must report zero violations)
//! 4. Compare the fixed output with expected.rb (byte-level match)

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use common::{fix_source, lint_source, parses_cleanly};
use rblint_config::RblintConfig;
use rblint_linter::{Rule, RuleRegistry};
use tempfile::TempDir;
use walkdir::WalkDir;

/// A test fixture consisting of an rblint.toml config and input.rb file.
struct Fixture {
    /// Human-readable name (path relative to fixtures dir)
    name: String,
    /// Path to the input.rb file
    input: PathBuf,
    /// Path to the rblint.toml config
    config: PathBuf,
    /// Path to the expected.rb file
    expected: PathBuf,
}

/// Discover all fixture directories under the given base path.
/// A fixture directory must contain `rblint.toml`, `input.rb` and `expected.rb`.
fn discover_fixtures(base: &Path) -> Vec<Fixture> {
    let mut fixtures = Vec::new();

    for entry in WalkDir::new(base).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_dir() {
            continue;
        }
        let dir = entry.path();
        let config = dir.join("rblint.toml");
        let input = dir.join("input.rb");
        let expected = dir.join("expected.rb");

        if config.exists() && input.exists() && expected.exists() {
            let name = dir.strip_prefix(base).unwrap_or(dir).display().to_string();
            fixtures.push(Fixture {
                name,
                input,
                config,
                expected,
            });
        }
    }

    fixtures.sort_by(|a, b| a.name.cmp(&b.name));
    fixtures
}

/// Build the enabled, fixable rules named in a config file.
fn rules_from_config(path: &Path) -> Result<Vec<Box<dyn Rule>>, String> {
    let config = RblintConfig::from_file(path).map_err(|e| format!("Bad config: {e}"))?;
    let registry = RuleRegistry::builtin();

    let mut rules = Vec::new();
    for configured in config.configured_rules() {
        if !configured.should_fix() {
            continue;
        }
        let props = configured.properties_ref();
        let rule = registry
            .create_rule(&configured.name, &props)
            .ok_or_else(|| format!("Unknown rule {}", configured.name))?;
        rules.push(rule);
    }
    Ok(rules)
}

/// Run the roundtrip test for a single fixture.
fn test_fixture(fixture: &Fixture) -> Result<(), String> {
    let rules = rules_from_config(&fixture.config)?;
    if rules.is_empty() {
        return Err("rblint.toml enables no fixable rules".to_string());
    }

    let input_content = fs::read_to_string(&fixture.input)
        .map_err(|e| format!("Failed to read input.rb: {}", e))?;
    let expected_content = fs::read_to_string(&fixture.expected)
        .map_err(|e| format!("Failed to read expected.rb: {}", e))?;

    // An identical pair would not exercise any fix
    if input_content == expected_content {
        return Err(
            "input.rb and expected.rb are identical - fixture has no violations to fix".to_string(),
        );
    }

    if !parses_cleanly(&input_content) {
        return Err("input.rb has syntax errors".to_string());
    }

    // Fix a copy so the fixture stays untouched
    let temp_dir = TempDir::new().map_err(|e| format!("Failed to create temp dir: {}", e))?;
    let test_file = temp_dir.path().join("input.rb");
    fs::copy(&fixture.input, &test_file)
        .map_err(|e| format!("Failed to copy input file: {}", e))?;

    let source =
        fs::read_to_string(&test_file).map_err(|e| format!("Failed to read copy: {}", e))?;
    let outcome = fix_source(&source, &rules);
    if !outcome.changed() {
        return Err("No fixes were applied".to_string());
    }
    fs::write(&test_file, &outcome.source)
        .map_err(|e| format!("Failed to write fixed file: {}", e))?;

    let fixed_content =
        fs::read_to_string(&test_file).map_err(|e| format!("Failed to read fixed file: {}", e))?;

    if !parses_cleanly(&fixed_content) {
        return Err(format!(
            "Fixed file has syntax errors\n\nFixed content:\n{}",
            fixed_content
        ));
    }

    let remaining = lint_source(&fixed_content, &rules);
    if !remaining.is_empty() {
        let listed: Vec<String> = remaining
            .iter()
            .map(|f| format!("{} at {:?}", f.rule, f.diagnostic.range))
            .collect();
        return Err(format!(
            "Violations remain after fix:\n{}\n\nFixed content:\n{}",
            listed.join("\n"),
            fixed_content
        ));
    }

    if fixed_content != expected_content {
        let fixed_lines: Vec<&str> = fixed_content.lines().collect();
        let expected_lines: Vec<&str> = expected_content.lines().collect();

        let mut diff_info = String::new();
        for (i, (fixed, expected)) in fixed_lines.iter().zip(expected_lines.iter()).enumerate() {
            if fixed != expected {
                diff_info = format!(
                    "First difference at line {}:\n  Expected: {:?}\n  Got:      {:?}",
                    i + 1,
                    expected,
                    fixed
                );
                break;
            }
        }

        if diff_info.is_empty() && fixed_lines.len() != expected_lines.len() {
            diff_info = format!(
                "Line count mismatch: expected {} lines, got {} lines",
                expected_lines.len(),
                fixed_lines.len()
            );
        }

        return Err(format!(
            "Fixed content does not match expected.rb\n{}\n\n--- Expected ---\n{}\n\n--- Got ---\n{}",
            diff_info, expected_content, fixed_content
        ));
    }

    Ok(())
}

#[test]
fn test_autofix_roundtrip() {
    let fixtures_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/autofix");
    let fixtures = discover_fixtures(&fixtures_dir);

    assert!(
        !fixtures.is_empty(),
        "No fixtures found in {:?}",
        fixtures_dir
    );
    println!("Found {} fixtures", fixtures.len());

    let mut failures = Vec::new();

    for fixture in &fixtures {
        print!("Testing {}... ", fixture.name);
        match test_fixture(fixture) {
            Ok(()) => println!("OK"),
            Err(e) => {
                println!("FAILED");
                failures.push((fixture.name.clone(), e));
            }
        }
    }

    if !failures.is_empty() {
        eprintln!("\n{} fixture(s) failed:", failures.len());
        for (name, error) in &failures {
            eprintln!("\n=== {} ===\n{}", name, error);
        }
        panic!("{} fixture(s) failed", failures.len());
    }
}
