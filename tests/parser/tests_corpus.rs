//! Every `.m` file under `tests/corpus` parses without errors and
//! round-trips to its own text.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use objc_syntax::parse_many;
use objc_syntax::parser::SyntaxKind;

use crate::helpers::parse_helpers::describe_errors;

fn corpus_files() -> Vec<PathBuf> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("corpus");
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "m"))
        .collect();
    files.sort();
    files
}

#[test]
fn test_corpus_is_not_empty() {
    assert!(corpus_files().len() >= 3);
}

#[test]
fn test_corpus_parses_cleanly() {
    let files = corpus_files();
    let sources: Vec<String> = files
        .iter()
        .map(|path| fs::read_to_string(path).unwrap_or_else(|e| panic!("{}: {e}", path.display())))
        .collect();
    let inputs: Vec<&str> = sources.iter().map(String::as_str).collect();

    let mut failures = Vec::new();
    for ((path, source), result) in files.iter().zip(&sources).zip(parse_many(&inputs)) {
        assert_eq!(
            result.syntax().text().to_string(),
            *source,
            "{} is not lossless",
            path.display()
        );
        if !result.ok() {
            failures.push(format!("{}:\n{}", path.display(), describe_errors(source, &result)));
        }
        let root = result.syntax();
        assert_eq!(root.kind(), SyntaxKind::TRANSLATION_UNIT);
        assert!(root.first_child().is_some(), "{} parsed to nothing", path.display());
    }
    assert!(failures.is_empty(), "Corpus files with errors:\n{}", failures.join("\n"));
}
