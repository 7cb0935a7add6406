//! Golden-file checks: simulate each `<case>.in` and compare the printed
//! dispatch log against the sibling `<case>.out`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use timeslice_core::simulate;
use timeslice_ingest::load_registry;

#[derive(Debug, PartialEq, Eq)]
enum Verdict {
    Pass,
    Fail { expected: String, actual: String },
}

/// Fold CRLF and trailing whitespace so saved files compare cleanly across
/// platforms.
fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").trim_end().to_string()
}

fn run_case(input: &str, expected: &str) -> Result<Verdict> {
    let registry = load_registry(input)?;
    let actual = simulate(&registry)
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join("\n");

    let expected = normalize(expected);
    if actual == expected {
        Ok(Verdict::Pass)
    } else {
        Ok(Verdict::Fail { expected, actual })
    }
}

/// Check every `.in` case under `cases_dir`. Fails if any case mismatches,
/// after reporting them all.
pub fn run(cases_dir: &Path) -> Result<()> {
    let mut case_files: Vec<PathBuf> = fs::read_dir(cases_dir)
        .with_context(|| format!("reading {}", cases_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "in"))
        .collect();
    case_files.sort();

    if case_files.is_empty() {
        bail!("no `.in` cases under {}", cases_dir.display());
    }

    let total = case_files.len();
    let mut failures = 0;

    for case in &case_files {
        let name = case
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("case");

        let input =
            fs::read_to_string(case).with_context(|| format!("reading {}", case.display()))?;
        let expected_path = case.with_extension("out");
        let expected = fs::read_to_string(&expected_path)
            .with_context(|| format!("reading {}", expected_path.display()))?;

        match run_case(&input, &expected).with_context(|| format!("case {name}"))? {
            Verdict::Pass => println!("{name}: ok"),
            Verdict::Fail { expected, actual } => {
                failures += 1;
                println!("{name}: FAILED");
                println!("--- expected\n{expected}");
                println!("--- actual\n{actual}");
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {total} cases failed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_crlf_and_trailing_whitespace() {
        assert_eq!(normalize(" a\r\nb\r\n"), " a\nb");
    }

    #[test]
    fn test_case_passes_on_exact_trace() {
        let verdict = run_case("1/0/4/0/2\n2/1/2/0/2\n", "1/1/0/2/3\n2/2/2/4/3\n3/1/4/6/5\n")
            .unwrap();
        assert_eq!(verdict, Verdict::Pass);
    }

    #[test]
    fn test_case_fails_with_both_outputs() {
        let verdict = run_case("1/0/2/0/2\n", "1/1/0/2/9\n").unwrap();
        match verdict {
            Verdict::Fail { expected, actual } => {
                assert_eq!(expected, "1/1/0/2/9");
                assert_eq!(actual, "1/1/0/2/3");
            }
            Verdict::Pass => panic!("expected a mismatch"),
        }
    }

    #[test]
    fn test_malformed_case_input_is_an_error() {
        assert!(run_case("nope\n", "").is_err());
    }
}
