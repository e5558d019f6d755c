//! Layer boundary lint for the Postbook backend.
//!
//! The backend keeps its domain, inbound adapters and outbound adapters in
//! separate top-level modules. This crate parses every source file under
//! `backend/src/{domain,inbound,outbound}` and reports imports that cross a
//! boundary:
//!
//! - `domain` may not reach adapter modules, the web framework, the ORM, the
//!   OpenAPI tooling or the configuration loader
//! - `inbound` may not reach `outbound` or any database crate
//! - `outbound` may not reach `inbound`, the web framework or OpenAPI tooling
//!
//! Test-only files (`tests.rs`, `*_tests.rs`, `test_utils.rs`) may wire real
//! adapters together and are skipped.
//!
//! Run it with `cargo run -p architecture-lint` from anywhere in the workspace.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use syn::visit::Visit;

/// Name under which integration code refers to the backend library.
const LIBRARY_CRATE: &str = "postbook";

const WEB_CRATES: &[&str] = &["actix", "actix_http", "actix_rt", "actix_web", "awc"];
const DATABASE_CRATES: &[&str] = &["diesel", "diesel_async", "diesel_migrations", "bb8"];
const DOCUMENTATION_CRATES: &[&str] = &["utoipa", "utoipa_swagger_ui"];
const CONFIGURATION_CRATES: &[&str] = &["ortho_config", "clap"];

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `backend/src`.
    pub file: Utf8PathBuf,
    /// Human-readable description of the violated rule.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.message)
    }
}

/// Failure modes returned by the architecture lint.
#[derive(Debug, thiserror::Error)]
pub enum ArchitectureLintError {
    /// Filesystem traversal or reading failed.
    #[error("I/O error while linting architecture: {0}")]
    Io(#[from] io::Error),
    /// A path under `backend/src` is not valid UTF-8.
    #[error("source path is not UTF-8: {0}")]
    NonUtf8Path(String),
    /// Rust source parsing failed.
    #[error("failed to parse Rust source while linting architecture ({file}): {message}")]
    Parse { file: Utf8PathBuf, message: String },
    /// One or more boundary violations were found.
    #[error("{}", render_violations(.0))]
    Violations(Vec<Violation>),
}

fn render_violations(violations: &[Violation]) -> String {
    let mut rendered = String::from("Architecture boundary violations:");
    for violation in violations {
        rendered.push_str("\n- ");
        rendered.push_str(&violation.to_string());
    }
    rendered
}

/// Lint the backend crate sources on disk.
///
/// `backend_dir` must be the `backend/` directory at the repository root.
pub fn lint_backend_sources(backend_dir: &Utf8Path) -> Result<(), ArchitectureLintError> {
    let src_dir = backend_dir.join("src");
    let sources = collect_lint_sources(&src_dir)?;
    lint_sources(&sources)
}

/// Lint the provided Rust sources. Intended for unit and behaviour tests.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();

    for source in sources {
        if is_test_file(&source.file) {
            continue;
        }
        let Some(layer) = Layer::of(&source.file) else {
            continue;
        };
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(layer.check(&source.file, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `backend/src`.
    pub file: Utf8PathBuf,
    pub contents: String,
}

fn is_test_file(path: &Utf8Path) -> bool {
    path.file_stem().is_some_and(|stem| {
        stem == "tests" || stem == "test_utils" || stem.ends_with("_tests")
    })
}

/// The top-level module a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Inbound,
    Outbound,
}

impl Layer {
    const ALL: [Self; 3] = [Self::Domain, Self::Inbound, Self::Outbound];

    fn of(relative_path: &Utf8Path) -> Option<Self> {
        let first = relative_path.components().next()?.as_str();
        Self::ALL.into_iter().find(|layer| layer.name() == first)
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    fn forbidden_modules(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &["inbound", "outbound", "settings"],
            Self::Inbound => &["outbound"],
            Self::Outbound => &["inbound"],
        }
    }

    fn forbidden_crates(self) -> BTreeSet<&'static str> {
        let groups: &[&[&str]] = match self {
            Self::Domain => &[
                WEB_CRATES,
                DATABASE_CRATES,
                DOCUMENTATION_CRATES,
                CONFIGURATION_CRATES,
            ],
            Self::Inbound => &[DATABASE_CRATES],
            Self::Outbound => &[WEB_CRATES, DOCUMENTATION_CRATES],
        };
        groups.iter().flat_map(|group| group.iter().copied()).collect()
    }

    fn check(self, file: &Utf8Path, parsed: &syn::File) -> Vec<Violation> {
        let forbidden_crates = self.forbidden_crates();
        let mut collector = PathCollector::default();
        collector.visit_file(parsed);

        let mut messages = BTreeSet::new();
        for segments in &collector.paths {
            match classify(segments) {
                Some(Target::Module(root)) if self.forbidden_modules().contains(&root) => {
                    messages.insert(format!(
                        "{} module must not depend on crate::{root}",
                        self.name()
                    ));
                }
                Some(Target::Crate(root)) if forbidden_crates.contains(root) => {
                    messages.insert(format!(
                        "{} module must not depend on external crate `{root}`",
                        self.name()
                    ));
                }
                _ => {}
            }
        }

        messages
            .into_iter()
            .map(|message| Violation {
                file: file.to_owned(),
                message,
            })
            .collect()
    }
}

/// What the first meaningful segment of a path refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target<'a> {
    Module(&'a str),
    Crate(&'a str),
}

fn is_relative_segment(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

fn classify(segments: &[String]) -> Option<Target<'_>> {
    let first = segments.first()?.as_str();
    if Layer::ALL.iter().any(|layer| layer.name() == first) {
        return Some(Target::Module(first));
    }
    if first == LIBRARY_CRATE {
        return segments.get(1).map(|segment| Target::Module(segment.as_str()));
    }
    if is_relative_segment(first) {
        return segments
            .iter()
            .find(|segment| !is_relative_segment(segment.as_str()))
            .map(|segment| Target::Module(segment.as_str()));
    }
    Some(Target::Crate(first))
}

#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, prefix: &[String]) {
        let extend = |ident: String| {
            let mut segments = prefix.to_vec();
            segments.push(ident);
            segments
        };
        match tree {
            syn::UseTree::Path(path) => {
                let next = extend(path.ident.to_string());
                self.record_use_tree(&path.tree, &next);
            }
            syn::UseTree::Name(name) => {
                self.paths.insert(extend(name.ident.to_string()));
            }
            syn::UseTree::Rename(rename) => {
                self.paths.insert(extend(rename.ident.to_string()));
            }
            syn::UseTree::Glob(_) => {
                self.paths.insert(extend("*".to_owned()));
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix);
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, &[]);
    }
}

fn collect_lint_sources(src_dir: &Utf8Path) -> Result<Vec<LintSource>, ArchitectureLintError> {
    let mut sources = Vec::new();
    for layer in Layer::ALL {
        let dir = src_dir.join(layer.name());
        if dir.is_dir() {
            collect_sources_under(src_dir, &dir, &mut sources)?;
        }
    }
    Ok(sources)
}

fn collect_sources_under(
    src_root: &Utf8Path,
    current: &Utf8Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    for entry in fs::read_dir(current)? {
        let path = Utf8PathBuf::from_path_buf(entry?.path())
            .map_err(|path| ArchitectureLintError::NonUtf8Path(path.display().to_string()))?;
        if path.is_dir() {
            collect_sources_under(src_root, &path, sources)?;
            continue;
        }
        if path.extension() != Some("rs") {
            continue;
        }

        let relative = path
            .strip_prefix(src_root)
            .map_err(|err| ArchitectureLintError::Parse {
                file: path.clone(),
                message: err.to_string(),
            })?
            .to_owned();
        let contents = fs::read_to_string(&path)?;
        sources.push(LintSource {
            file: relative,
            contents,
        });
    }
    Ok(())
}
