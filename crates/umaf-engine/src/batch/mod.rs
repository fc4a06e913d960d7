//! Parallel batch transform: one task per input file, failures recorded
//! per file, outputs written atomically.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rayon::prelude::*;
use relative_path::RelativePathBuf;

use crate::cache::IncrementalCache;
use crate::engine::{Engine, OutputFormat, Transformed};
use crate::error::{Result, UmafError};
use crate::io::{read_source, write_atomic};

pub use crate::io::scan_inputs;

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub failures: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

enum Outcome {
    Processed,
    Skipped,
    Failed(PathBuf, String),
}

/// Transforms `inputs` (all under `options.input_dir`) on the current rayon
/// pool. The cache, when given, is consulted per file and saved once at the end.
pub fn run(
    engine: &Engine,
    inputs: &[PathBuf],
    options: &BatchOptions,
    cache: Option<&IncrementalCache>,
) -> BatchReport {
    let outcomes: Vec<Outcome> = inputs
        .par_iter()
        .map(|input| process_one(engine, input, options, cache))
        .collect();

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Processed => report.processed += 1,
            Outcome::Skipped => report.skipped += 1,
            Outcome::Failed(path, message) => report.failures.push((path, message)),
        }
    }

    if let Some(cache) = cache
        && let Err(err) = cache.save()
    {
        warn!(
            "failed to save cache index {}: {err}",
            cache.index_path().display()
        );
    }

    info!(
        "batch finished: {} processed, {} skipped, {} failed",
        report.processed,
        report.skipped,
        report.failures.len()
    );
    report
}

fn process_one(
    engine: &Engine,
    input: &Path,
    options: &BatchOptions,
    cache: Option<&IncrementalCache>,
) -> Outcome {
    let key = match relative_key(input, &options.input_dir) {
        Ok(key) => key,
        Err(err) => return Outcome::Failed(input.to_path_buf(), err.to_string()),
    };
    let metadata = std::fs::metadata(input).ok();

    if let (Some(cache), Some(metadata)) = (cache, &metadata)
        && !cache.should_process(&key, metadata)
    {
        debug!("{key}: unchanged, skipping");
        return Outcome::Skipped;
    }

    let result = transform_to_output(engine, input, &key, options);
    if let (Some(cache), Some(metadata)) = (cache, &metadata) {
        cache.did_process(&key, metadata, result.is_ok());
    }

    match result {
        Ok(output) => {
            debug!("{key} -> {}", output.display());
            Outcome::Processed
        }
        Err(err) => {
            warn!("{}: {err}", input.display());
            Outcome::Failed(input.to_path_buf(), err.to_string())
        }
    }
}

fn transform_to_output(
    engine: &Engine,
    input: &Path,
    key: &RelativePathBuf,
    options: &BatchOptions,
) -> Result<PathBuf> {
    let bytes = read_source(input)?;
    let content = match engine.transform(input, &bytes, options.format)? {
        Transformed::Envelope(envelope) => envelope.to_json_pretty()?,
        Transformed::Normalized(text) => text,
    };

    let output = output_path(&options.output_dir, key, options.format);
    write_atomic(&output, with_trailing_newline(content).as_bytes())?;
    Ok(output)
}

fn relative_key(input: &Path, input_dir: &Path) -> Result<RelativePathBuf> {
    let relative = input.strip_prefix(input_dir).map_err(|_| {
        UmafError::InvalidInputDir(format!(
            "{} is not inside {}",
            input.display(),
            input_dir.display()
        ))
    })?;
    RelativePathBuf::from_path(relative)
        .map_err(|err| UmafError::InvalidInputDir(format!("{}: {err}", relative.display())))
}

/// `<output_dir>/<relative input path>.<json|md>`
pub fn output_path(output_dir: &Path, key: &RelativePathBuf, format: OutputFormat) -> PathBuf {
    let suffix = match format {
        OutputFormat::Envelope => "json",
        OutputFormat::Normalized => "md",
    };
    let mut path = key.to_path(output_dir).into_os_string();
    path.push(".");
    path.push(suffix);
    PathBuf::from(path)
}

pub fn with_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Envelope;
    use crate::tests::{create_test_dir, create_test_file, test_engine};
    use pretty_assertions::assert_eq;
    use std::fs;

    fn options(input: &Path, output: &Path, format: OutputFormat) -> BatchOptions {
        BatchOptions {
            input_dir: input.to_path_buf(),
            output_dir: output.to_path_buf(),
            format,
        }
    }

    #[test]
    fn test_output_path_appends_format_suffix() {
        let key = relative_path::RelativePath::new("docs/readme.md").to_relative_path_buf();
        assert_eq!(
            output_path(Path::new("/out"), &key, OutputFormat::Envelope),
            PathBuf::from("/out/docs/readme.md.json")
        );
        assert_eq!(
            output_path(Path::new("/out"), &key, OutputFormat::Normalized),
            PathBuf::from("/out/docs/readme.md.md")
        );
    }

    #[test]
    fn test_batch_writes_envelopes_and_records_failures() {
        // Given two good documents and one that cannot be extracted
        let input = create_test_dir();
        let output = create_test_dir();
        let a = create_test_file(&input, "a.md", "# A\n\nbody");
        let b = create_test_file(&input, "nested/b.txt", "plain");
        let bad = create_test_file(&input, "memo.docx", "PK");

        // When the batch runs
        let report = run(
            &test_engine(),
            &[a, b, bad.clone()],
            &options(input.path(), output.path(), OutputFormat::Envelope),
            None,
        );

        // Then the good ones are written and the bad one is reported
        assert_eq!(report.processed, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, bad);

        let json = fs::read_to_string(output.path().join("a.md.json")).unwrap();
        let envelope = Envelope::from_json(&json).unwrap();
        assert_eq!(envelope.doc_title, "A");
        assert!(output.path().join("nested/b.txt.json").exists());
    }

    #[test]
    fn test_incremental_batch_skips_unchanged_files() {
        let input = create_test_dir();
        let output = create_test_dir();
        let a = create_test_file(&input, "a.md", "# A");
        let opts = options(input.path(), output.path(), OutputFormat::Normalized);
        let inputs = vec![a];

        let cache = IncrementalCache::in_output_dir(output.path());
        let first = run(&test_engine(), &inputs, &opts, Some(&cache));

        let reloaded = IncrementalCache::in_output_dir(output.path());
        let second = run(&test_engine(), &inputs, &opts, Some(&reloaded));

        assert_eq!((first.processed, first.skipped), (1, 0));
        assert_eq!((second.processed, second.skipped), (0, 1));
        assert_eq!(
            fs::read_to_string(output.path().join("a.md.md")).unwrap(),
            "# A\n"
        );
    }
}
