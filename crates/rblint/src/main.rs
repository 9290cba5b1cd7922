//! rblint - A fast Ruby linter with auto-fix support.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use rblint_config::{ConfigLoader, ConfiguredRule, RblintConfig};
use rblint_diagnostics::Applicability;
use rblint_linter::rules::SpaceAroundEqualsInParameterDefault;
use rblint_linter::{
    CheckContext, DetectedStyles, EnforcedStyle, FixOutcome, FromConfig, LintResult, Rule,
    RuleRegistry, SpaceStyle, StyleDetector, SuppressionContext, apply_fixes, lint,
};
use rblint_ruby_cst::CstNode;
use rblint_ruby_parser::RubyParser;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "rblint")]
#[command(about = "A fast Ruby linter with auto-fix support", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check files for violations
    Check {
        /// Paths to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Path to rblint.toml config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Fix violations in files
    Fix {
        /// Paths to fix
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Path to rblint.toml config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show diff without applying fixes
        #[arg(long)]
        diff: bool,

        /// Apply unsafe fixes
        #[arg(long)]
        r#unsafe: bool,
    },
    /// Infer the default value spacing style used by existing code
    Detect {
        /// Paths to inspect
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { paths, config } => run_check(&paths, config.as_deref()),
        Commands::Fix {
            paths,
            config,
            diff,
            r#unsafe: allow_unsafe,
        } => run_fix(&paths, config.as_deref(), diff, allow_unsafe),
        Commands::Detect { paths } => run_detect(&paths),
    }
}

/// Install a stderr subscriber when RUST_LOG is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

/// Rules built from configuration, ready to run.
struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
    /// Names of rules whose fixes may be applied.
    fixable: HashSet<&'static str>,
    /// Spacing rule configured with `EnforcedStyle = "detect"`.
    detect: Option<ConfiguredRule>,
    unsafe_fixes: bool,
}

impl RuleSet {
    fn push(&mut self, rule: Box<dyn Rule>, fix: bool) {
        if fix {
            self.fixable.insert(rule.name());
        }
        self.rules.push(rule);
    }

    fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Replace a pending `detect` rule with one enforcing the dominant style of `files`.
    fn resolve_detected_style(&mut self, files: &[PathBuf]) -> Result<()> {
        let Some(configured) = self.detect.take() else {
            return Ok(());
        };

        let summary = detect_spacing_style(files)?;
        let style = summary.dominant();
        eprintln!(
            "Detected EnforcedStyle {} for {} ({} space, {} no_space, {} unrecognized)",
            style.as_str().cyan(),
            configured.name,
            summary.space,
            summary.no_space,
            summary.unrecognized
        );

        self.push(
            Box::new(SpaceAroundEqualsInParameterDefault::new(style)),
            configured.should_fix(),
        );
        Ok(())
    }
}

/// Run the check command.
fn run_check(paths: &[PathBuf], config_path: Option<&Path>) -> Result<()> {
    let mut rule_set = load_rules(config_path)?;
    let files = collect_ruby_files(paths);
    rule_set.resolve_detected_style(&files)?;

    if rule_set.rules.is_empty() {
        eprintln!("{}", "Warning: No rules configured".yellow());
    } else {
        let rule_names = rule_set.names();
        eprintln!(
            "Checking with {} rule(s): {}",
            rule_names.len(),
            rule_names.join(", ")
        );
    }

    let reports: Vec<Result<Option<FileReport>>> = files
        .par_iter()
        .map(|path| lint_file(path, &rule_set.rules))
        .collect();

    let mut total_violations = 0;
    let mut total_fixable = 0;

    for report in reports {
        let Some(report) = report? else {
            continue;
        };
        total_violations += report.result.findings.len();
        total_fixable += report
            .result
            .findings
            .iter()
            .filter(|f| f.diagnostic.fix.is_some() && rule_set.fixable.contains(f.rule))
            .count();
        report.print();
    }

    if total_violations > 0 {
        println!(
            "\nFound {} violations ({} fixable)",
            total_violations.to_string().red(),
            total_fixable.to_string().yellow()
        );
        std::process::exit(1);
    } else {
        println!("{}", "No violations found".green());
    }

    Ok(())
}

/// Run the fix command.
fn run_fix(
    paths: &[PathBuf],
    config_path: Option<&Path>,
    diff_only: bool,
    allow_unsafe: bool,
) -> Result<()> {
    let mut rule_set = load_rules(config_path)?;
    let files = collect_ruby_files(paths);
    rule_set.resolve_detected_style(&files)?;

    if rule_set.rules.is_empty() {
        eprintln!("{}", "Warning: No rules configured".yellow());
        return Ok(());
    }

    let rule_names = rule_set.names();
    eprintln!(
        "Fixing with {} rule(s): {}",
        rule_names.len(),
        rule_names.join(", ")
    );

    let applicability = if allow_unsafe || rule_set.unsafe_fixes {
        Applicability::Unsafe
    } else {
        Applicability::Safe
    };

    let outcomes: Vec<Result<Option<(PathBuf, FixOutcome, usize)>>> = files
        .par_iter()
        .map(|path| fix_file(path, &rule_set, applicability))
        .collect();

    let mut total_fixed = 0;
    let mut total_unfixable = 0;
    let mut files_changed = 0;

    for outcome in outcomes {
        let Some((path, outcome, skipped)) = outcome? else {
            continue;
        };
        total_unfixable += outcome.unfixable + skipped;
        if !outcome.changed() {
            continue;
        }
        total_fixed += outcome.fixed;
        files_changed += 1;

        if diff_only {
            let original = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            print_diff(&path, &original, &outcome.source);
        } else {
            std::fs::write(&path, &outcome.source)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{}: {} fix(es) applied", path.display(), outcome.fixed);
        }
    }

    if diff_only {
        println!(
            "\n{} fix(es) available in {} file(s)",
            total_fixed.to_string().green(),
            files_changed
        );
    } else if total_fixed > 0 {
        println!(
            "\n{} fix(es) applied in {} file(s)",
            total_fixed.to_string().green(),
            files_changed
        );
    } else {
        println!("{}", "No fixes to apply".green());
    }

    if total_unfixable > 0 {
        eprintln!(
            "{} violation(s) could not be fixed automatically",
            total_unfixable.to_string().yellow()
        );
    }

    Ok(())
}

/// Run the detect command.
fn run_detect(paths: &[PathBuf]) -> Result<()> {
    let files = collect_ruby_files(paths);
    let summary = detect_spacing_style(&files)?;

    if summary.total() == 0 {
        println!("No default value assignments found");
        return Ok(());
    }

    println!(
        "{}: {} space, {} no_space, {} unrecognized",
        SpaceAroundEqualsInParameterDefault::MODULE_NAME.blue(),
        summary.space,
        summary.no_space,
        summary.unrecognized
    );

    let style = summary.dominant().as_str();
    if summary.is_consistent() {
        println!("EnforcedStyle = \"{}\"", style.green());
    } else {
        println!(
            "EnforcedStyle = \"{}\" {}",
            style.yellow(),
            "(inconsistent usage)".yellow()
        );
    }

    Ok(())
}

/// Lint `files` with a detecting spacing rule and return the counts.
fn detect_spacing_style(files: &[PathBuf]) -> Result<DetectedStyles> {
    let detector = Arc::new(StyleDetector::new(SpaceStyle::default()));
    let rules: Vec<Box<dyn Rule>> = vec![Box::new(
        SpaceAroundEqualsInParameterDefault::with_style_state(detector.clone()),
    )];

    files
        .par_iter()
        .map(|path| lint_file(path, &rules).map(drop))
        .collect::<Result<()>>()?;

    Ok(detector.summary())
}

/// Findings for one file, with its source for location lookup.
struct FileReport {
    path: PathBuf,
    source: String,
    result: LintResult,
}

impl FileReport {
    fn print(&self) {
        let line_index = rblint_source_file::LineIndex::from_source_text(&self.source);
        let source_code = rblint_source_file::SourceCode::new(&self.source, &line_index);

        for finding in &self.result.findings {
            let loc = source_code.line_column(finding.diagnostic.start());
            println!(
                "{}:{}:{}: {} {}",
                self.path.display(),
                loc.line.get(),
                loc.column.get(),
                format!("[{}]", finding.rule).blue(),
                finding.diagnostic.kind.body
            );
        }
    }
}

/// Parse and lint a single file. Files with syntax errors are skipped.
fn lint_file(path: &Path, rules: &[Box<dyn Rule>]) -> Result<Option<FileReport>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut parser = RubyParser::new()?;
    let parsed = parser
        .parse(&source)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    if parsed.has_errors() {
        eprintln!("{}: Syntax errors, skipping", path.display());
        return Ok(None);
    }

    tracing::debug!(path = %path.display(), "linting");

    let result = {
        let root = CstNode::new(parsed.tree.root_node(), &source);
        let ctx = CheckContext::new(&source, &root);
        let suppressions = SuppressionContext::from_tree(&source, &root);
        lint(&ctx, &root, rules, &suppressions)
    };

    Ok(Some(FileReport {
        path: path.to_path_buf(),
        source,
        result,
    }))
}

/// Compute the fixed source of a single file.
///
/// Returns the outcome and the number of findings from rules not allowed to fix.
fn fix_file(
    path: &Path,
    rule_set: &RuleSet,
    applicability: Applicability,
) -> Result<Option<(PathBuf, FixOutcome, usize)>> {
    let Some(report) = lint_file(path, &rule_set.rules)? else {
        return Ok(None);
    };
    if report.result.is_empty() {
        return Ok(None);
    }

    let (fixable, skipped): (Vec<_>, Vec<_>) = report
        .result
        .findings
        .iter()
        .partition(|f| rule_set.fixable.contains(f.rule));

    let outcome = apply_fixes(
        &report.source,
        fixable.iter().map(|f| &f.diagnostic),
        applicability,
    );

    Ok(Some((report.path, outcome, skipped.len())))
}

/// Print a unified diff between original and fixed source.
fn print_diff(path: &Path, original: &str, fixed: &str) {
    use std::fmt::Write;

    let mut output = String::new();
    let _ = writeln!(output, "--- a/{}", path.display());
    let _ = writeln!(output, "+++ b/{}", path.display());

    let original_lines: Vec<&str> = original.lines().collect();
    let fixed_lines: Vec<&str> = fixed.lines().collect();

    // Simple line-by-line diff
    let mut i = 0;
    let mut j = 0;
    let mut in_hunk = false;
    let mut hunk_start_orig = 0;
    let mut hunk_start_fixed = 0;
    let mut hunk_lines: Vec<String> = Vec::new();

    while i < original_lines.len() || j < fixed_lines.len() {
        match (original_lines.get(i), fixed_lines.get(j)) {
            (Some(o), Some(f)) if o == f => {
                if in_hunk {
                    hunk_lines.push(format!(" {}", o));
                }
                i += 1;
                j += 1;
            }
            (Some(o), Some(f)) => {
                if !in_hunk {
                    in_hunk = true;
                    hunk_start_orig = i + 1;
                    hunk_start_fixed = j + 1;
                }
                hunk_lines.push(format!("{}{}", "-".red(), o));
                hunk_lines.push(format!("{}{}", "+".green(), f));
                i += 1;
                j += 1;
            }
            (Some(o), None) => {
                if !in_hunk {
                    in_hunk = true;
                    hunk_start_orig = i + 1;
                    hunk_start_fixed = j + 1;
                }
                hunk_lines.push(format!("{}{}", "-".red(), o));
                i += 1;
            }
            (None, Some(f)) => {
                if !in_hunk {
                    in_hunk = true;
                    hunk_start_orig = i + 1;
                    hunk_start_fixed = j + 1;
                }
                hunk_lines.push(format!("{}{}", "+".green(), f));
                j += 1;
            }
            (None, None) => break,
        }

        // Flush once three context lines follow the changes
        if in_hunk && hunk_lines.len() > 6 {
            let context_count = hunk_lines
                .iter()
                .rev()
                .take_while(|l| l.starts_with(' '))
                .count();
            if context_count >= 3 {
                write_hunk(&mut output, hunk_start_orig, hunk_start_fixed, &hunk_lines);
                hunk_lines.clear();
                in_hunk = false;
            }
        }
    }

    if !hunk_lines.is_empty() {
        write_hunk(&mut output, hunk_start_orig, hunk_start_fixed, &hunk_lines);
    }

    print!("{}", output);
}

fn write_hunk(output: &mut String, start_orig: usize, start_fixed: usize, lines: &[String]) {
    use std::fmt::Write;

    let removed = "-".red().to_string();
    let added = "+".green().to_string();
    let _ = writeln!(
        output,
        "@@ -{},{} +{},{} @@",
        start_orig,
        lines.iter().filter(|l| !l.starts_with(&added)).count(),
        start_fixed,
        lines.iter().filter(|l| !l.starts_with(&removed)).count()
    );
    for line in lines {
        let _ = writeln!(output, "{}", line);
    }
}

/// Load rules from configuration or use defaults.
fn load_rules(config_path: Option<&Path>) -> Result<RuleSet> {
    let registry = RuleRegistry::builtin();
    let config = load_config(config_path)?;

    let mut rule_set = RuleSet {
        rules: Vec::new(),
        fixable: HashSet::new(),
        detect: None,
        unsafe_fixes: config.as_ref().is_some_and(|c| c.fix.unsafe_fixes),
    };

    let Some(config) = config else {
        eprintln!("{}", "No rblint.toml found, using default rules".yellow());
        for rule in registry.default_rules() {
            rule_set.push(rule, true);
        }
        return Ok(rule_set);
    };

    for configured_rule in config.configured_rules() {
        if !configured_rule.is_enabled() {
            continue;
        }
        if detects_spacing_style(&configured_rule) {
            rule_set.detect = Some(configured_rule);
            continue;
        }
        if let Some(rule) = create_rule_from_config(&registry, &configured_rule) {
            rule_set.push(rule, configured_rule.should_fix());
        }
    }

    // Registered rules without a table run with their defaults
    let mut unlisted: Vec<_> = registry
        .module_names()
        .filter(|name| !config.rules.contains_key(*name))
        .collect();
    unlisted.sort_unstable();
    for name in unlisted {
        if let Some(rule) = registry.create_rule(name, &Default::default()) {
            rule_set.push(rule, true);
        }
    }

    Ok(rule_set)
}

/// Load rblint.toml from `config_path` or the usual locations.
fn load_config(config_path: Option<&Path>) -> Result<Option<RblintConfig>> {
    let loader = match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config not found: {}", path.display());
            }
            ConfigLoader::new().path(path)
        }
        None => ConfigLoader::new().find_in("."),
    };

    let config = loader.load().with_context(|| {
        format!(
            "Failed to parse {}",
            loader
                .resolved_path()
                .map_or_else(|| "rblint.toml".to_string(), |p| p.display().to_string())
        )
    })?;

    if config.is_some()
        && let Some(path) = loader.resolved_path()
    {
        eprintln!("Loaded config from: {}", path.display());
    }

    Ok(config)
}

/// Whether a configured rule asks for the spacing style to be inferred.
fn detects_spacing_style(configured_rule: &ConfiguredRule) -> bool {
    configured_rule.name == SpaceAroundEqualsInParameterDefault::MODULE_NAME
        && configured_rule
            .property("EnforcedStyle")
            .is_some_and(|s| matches!(s.parse(), Ok(EnforcedStyle::Detect)))
}

/// Create a rule from configuration using the registry.
fn create_rule_from_config(
    registry: &RuleRegistry,
    configured_rule: &ConfiguredRule,
) -> Option<Box<dyn Rule>> {
    let props = configured_rule.properties_ref();

    if let Some(rule) = registry.create_rule(&configured_rule.name, &props) {
        Some(rule)
    } else {
        eprintln!(
            "{}: Unknown rule '{}', skipping",
            "Warning".yellow(),
            configured_rule.name
        );
        None
    }
}

/// Whether `path` names a Ruby source file.
fn is_ruby_file(path: &Path) -> bool {
    const EXTENSIONS: &[&str] = &["rb", "rake", "gemspec"];
    const FILE_NAMES: &[&str] = &["Gemfile", "Rakefile"];

    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| EXTENSIONS.contains(&e))
        || path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| FILE_NAMES.contains(&n))
}

fn collect_ruby_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() && is_ruby_file(path) {
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && is_ruby_file(e.path()))
            {
                files.push(entry.path().to_path_buf());
            }
        }
    }
    files.sort();
    files.dedup();
    files
}
