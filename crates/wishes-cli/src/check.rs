//! The `check` command.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use wishes::loader::{Loader, Suite, TestCase};
use wishes::registry::StepRegistry;
use wishes::tags::TagExpression;

/// Expand directories into their `.feature` files, sorted by name.
fn feature_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let mut found = Vec::new();
        for entry in fs::read_dir(path).wrap_err_with(|| format!("failed to read {}", path.display()))? {
            let entry = entry.wrap_err_with(|| format!("failed to read {}", path.display()))?;
            let candidate = entry.path();
            if candidate.extension().is_some_and(|ext| ext == "feature") {
                found.push(candidate);
            }
        }
        found.sort();
        files.extend(found);
    }
    Ok(files)
}

fn load(loader: &Loader<'_, ()>, path: &Path) -> Result<Suite<()>> {
    let suite = loader
        .load_path(path)
        .wrap_err_with(|| format!("failed to load {}", path.display()))?;
    tracing::info!(path = %path.display(), cases = suite.count_test_cases(), "loaded feature");
    Ok(suite)
}

fn write_case(out: &mut dyn Write, case: &TestCase<()>) -> Result<()> {
    let info = case.info();
    let tags = if info.tags.is_empty() {
        "-".to_string()
    } else {
        info.tags.to_string()
    };
    let steps = case.scenario().map_or(0, |scenario| scenario.step_count());
    writeln!(out, "{}  {tags}  {steps} step(s)", info.id())
        .wrap_err_with(|| format!("failed to write test case {}", info.id()))
}

/// Load every feature under `paths` and list the cases matching `tags`.
///
/// # Errors
///
/// Returns the first unreadable path, invalid tag expression or load
/// failure.
pub(crate) fn run(out: &mut dyn Write, paths: &[PathBuf], tags: &[String]) -> Result<()> {
    let expression = TagExpression::all(tags).wrap_err("invalid --tags expression")?;
    let registry = StepRegistry::<()>::new();
    let loader = Loader::new(&registry);
    let mut suite = Suite::new();
    for path in feature_files(paths)? {
        suite.extend(load(&loader, &path)?);
    }
    for case in &suite.filter_tags(&expression) {
        write_case(out, case)?;
    }
    Ok(())
}
