//! Document discovery.
//!
//! A [`Corpus`] is a lazy sequence of document paths. Directory and file
//! inputs are resolved up front, so their length is known; a path list read
//! from stdin is streamed and has no known length.
//!
//! Directories are walked with the `ignore` crate with standard filters off
//! (no `.gitignore` handling) and the include globs applied as whitelist
//! overrides. Explicitly listed files are never filtered.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;

use crate::error::PipelineError;

/// One input argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A file or a directory to scan.
    Path(PathBuf),
    /// Newline-separated paths read from stdin.
    Stdin,
}

impl Input {
    /// Parse a command-line argument; `-` means stdin.
    #[must_use]
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::Path(PathBuf::from(arg))
        }
    }
}

/// Directory-walk settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    pub include: Vec<String>,
    pub max_depth: Option<usize>,
    pub hidden: bool,
    pub follow_links: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            include: vec!["*.html".to_string(), "*.htm".to_string()],
            max_depth: None,
            hidden: false,
            follow_links: false,
        }
    }
}

type PathIter = Box<dyn Iterator<Item = Result<PathBuf, PipelineError>> + Send>;

/// A lazy sequence of documents to process.
pub struct Corpus {
    paths: PathIter,
    len: Option<usize>,
}

impl std::fmt::Debug for Corpus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Corpus").field("len", &self.len).finish_non_exhaustive()
    }
}

impl Corpus {
    /// A corpus of exactly these files.
    #[must_use]
    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        let len = paths.len();
        Self {
            paths: Box::new(paths.into_iter().map(Ok)),
            len: Some(len),
        }
    }

    /// A streaming corpus of one path per non-blank line of `reader`.
    pub fn from_reader<R: BufRead + Send + 'static>(reader: R) -> Self {
        let paths = reader.lines().filter_map(|line| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(Ok(PathBuf::from(line.trim()))),
            Err(source) => Some(Err(PipelineError::Io {
                path: PathBuf::from("-"),
                source,
            })),
        });
        Self {
            paths: Box::new(paths),
            len: None,
        }
    }

    /// Resolve command-line inputs.
    ///
    /// Files are taken as-is, directories are walked, and `-` streams paths
    /// from stdin after all other inputs.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingInput`] for a path that does not
    /// exist and [`PipelineError::Glob`] for a bad include pattern. Both are
    /// raised before any document is read.
    pub fn discover(inputs: &[Input], options: &WalkOptions) -> Result<Self, PipelineError> {
        let mut resolved = Vec::new();
        let mut stdin = false;

        for input in inputs {
            match input {
                Input::Stdin => stdin = true,
                Input::Path(path) if path.is_file() => resolved.push(Ok(path.clone())),
                Input::Path(path) if path.is_dir() => {
                    resolved.extend(walk_directory(path, options)?);
                }
                Input::Path(path) => return Err(PipelineError::MissingInput(path.clone())),
            }
        }

        tracing::debug!(documents = resolved.len(), stdin, "corpus resolved");

        if stdin {
            let streamed = Self::from_reader(std::io::BufReader::new(std::io::stdin()));
            Ok(Self {
                paths: Box::new(resolved.into_iter().chain(streamed.paths)),
                len: None,
            })
        } else {
            let len = resolved.len();
            Ok(Self {
                paths: Box::new(resolved.into_iter()),
                len: Some(len),
            })
        }
    }

    /// Number of documents, when known before iterating.
    #[must_use]
    pub const fn len(&self) -> Option<usize> {
        self.len
    }

    /// Whether the corpus is known to be empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.len, Some(0))
    }

    /// Keep at most `limit` documents.
    #[must_use]
    pub fn limit(self, limit: usize) -> Self {
        Self {
            paths: Box::new(self.paths.take(limit)),
            len: self.len.map(|len| len.min(limit)),
        }
    }
}

impl Iterator for Corpus {
    type Item = Result<PathBuf, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.paths.next()
    }
}

fn walk_directory(
    root: &Path,
    options: &WalkOptions,
) -> Result<Vec<Result<PathBuf, PipelineError>>, PipelineError> {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(!options.hidden)
        .follow_links(options.follow_links)
        .max_depth(options.max_depth)
        .sort_by_file_name(|a, b| a.cmp(b));

    if !options.include.is_empty() {
        let mut overrides = OverrideBuilder::new(root);
        for glob in &options.include {
            overrides.add(glob)?;
        }
        builder.overrides(overrides.build()?);
    }

    let mut paths = Vec::new();
    for entry in builder.build() {
        match entry {
            Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_file()) => {
                paths.push(Ok(entry.into_path()));
            }
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(%error, "skipping unreadable corpus entry");
                paths.push(Err(PipelineError::Walk(error.to_string())));
            }
        }
    }
    Ok(paths)
}
