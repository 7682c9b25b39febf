//! Repo-local lint enforcing the backend's hexagonal boundaries.
//!
//! `backend/src` is split into `domain` (model, ports, services), `inbound`
//! (HTTP adapter) and `outbound` (persistence and in-memory adapters). The
//! lint parses every file in those trees with `syn` and rejects:
//!
//! - `domain` paths into `inbound`/`outbound` or into web, OpenAPI and
//!   database crates
//! - `inbound` paths into `outbound` or into database crates
//! - `outbound` paths into `inbound` or into web and OpenAPI crates
//!
//! Run it with `cargo run -p architecture-lint`.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

/// Name of the backend library crate, as seen from its binaries and tests.
const BACKEND_CRATE: &str = "chirp";

const WEB_CRATES: &[&str] = &["actix", "actix_service", "actix_web", "actix_rt"];
const OPENAPI_CRATES: &[&str] = &["utoipa", "utoipa_swagger_ui"];
const DATABASE_CRATES: &[&str] = &[
    "bb8",
    "diesel",
    "diesel_async",
    "diesel_migrations",
    "pg_embedded_setup_unpriv",
    "postgres",
];

/// A single boundary violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `backend/src`.
    pub file: PathBuf,
    /// Which rule was broken.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes returned by the architecture lint.
#[derive(Debug, thiserror::Error)]
pub enum ArchitectureLintError {
    #[error("I/O error while linting architecture: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse {}: {message}", file.display())]
    Parse { file: PathBuf, message: String },
    #[error("architecture boundary violations:\n{}", render_violations(.0))]
    Violations(Vec<Violation>),
}

fn render_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("- {violation}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `backend/src`.
    pub file: PathBuf,
    pub contents: String,
}

impl LintSource {
    pub fn new(file: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            contents: contents.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Inbound,
    Outbound,
}

/// What a layer may not reach.
struct LayerRule {
    modules: &'static [&'static str],
    crate_groups: &'static [&'static [&'static str]],
}

impl Layer {
    const ALL: [Self; 3] = [Self::Domain, Self::Inbound, Self::Outbound];

    fn dir(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    fn from_path(relative_path: &Path) -> Option<Self> {
        let first = relative_path.components().next()?.as_os_str().to_str()?;
        Self::ALL.into_iter().find(|layer| layer.dir() == first)
    }

    fn rule(self) -> LayerRule {
        match self {
            Self::Domain => LayerRule {
                modules: &["inbound", "outbound"],
                crate_groups: &[WEB_CRATES, OPENAPI_CRATES, DATABASE_CRATES],
            },
            Self::Inbound => LayerRule {
                modules: &["outbound"],
                crate_groups: &[DATABASE_CRATES],
            },
            Self::Outbound => LayerRule {
                modules: &["inbound"],
                crate_groups: &[WEB_CRATES, OPENAPI_CRATES],
            },
        }
    }
}

impl LayerRule {
    fn forbids_module(&self, root: &str) -> bool {
        self.modules.contains(&root)
    }

    fn forbids_crate(&self, root: &str) -> bool {
        self.crate_groups.iter().any(|group| group.contains(&root))
    }
}

/// Lint the backend crate sources on disk.
///
/// `backend_dir` must be the `backend/` directory at the repository root.
///
/// # Errors
///
/// Returns [`ArchitectureLintError`] when reading or parsing fails or a
/// violation is found.
pub fn lint_backend_sources(backend_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src_dir = backend_dir.join("src");
    let mut sources = Vec::new();
    for layer in Layer::ALL {
        let dir = src_dir.join(layer.dir());
        if dir.is_dir() {
            collect_sources(&src_dir, &dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Lint in-memory sources.
///
/// # Errors
///
/// Returns [`ArchitectureLintError`] when a file sits outside a known layer,
/// fails to parse, or breaks a rule.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        let layer = Layer::from_path(&source.file).ok_or_else(|| ArchitectureLintError::Parse {
            file: source.file.clone(),
            message: "file is not under domain/, inbound/ or outbound/".to_owned(),
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(check_file(&source.file, layer, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

fn check_file(file: &Path, layer: Layer, parsed: &syn::File) -> Vec<Violation> {
    let rule = layer.rule();
    let mut collector = PathCollector::default();
    collector.visit_file(parsed);

    let mut messages = BTreeSet::new();
    for segments in &collector.paths {
        match classify(segments) {
            Some(PathRoot::Module(root)) if rule.forbids_module(root) => {
                messages.insert(format!("{} must not depend on crate::{root}", layer.dir()));
            }
            Some(PathRoot::Crate(root)) if rule.forbids_crate(root) => {
                messages.insert(format!(
                    "{} must not depend on external crate `{root}`",
                    layer.dir()
                ));
            }
            _ => {}
        }
    }

    messages
        .into_iter()
        .map(|message| Violation {
            file: file.to_path_buf(),
            message,
        })
        .collect()
}

enum PathRoot<'a> {
    Module(&'a str),
    Crate(&'a str),
}

/// Decide whether a path names a backend module or an external crate.
fn classify(segments: &[String]) -> Option<PathRoot<'_>> {
    let first = segments.first()?.as_str();
    if Layer::ALL.iter().any(|layer| layer.dir() == first) {
        return Some(PathRoot::Module(first));
    }
    match first {
        "crate" | "self" | "super" => segments
            .iter()
            .map(String::as_str)
            .find(|segment| !matches!(*segment, "crate" | "self" | "super"))
            .map(PathRoot::Module),
        BACKEND_CRATE => segments.get(1).map(|segment| PathRoot::Module(segment.as_str())),
        _ => Some(PathRoot::Crate(first)),
    }
}

#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, mut prefix: Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use_tree(&path.tree, prefix);
            }
            syn::UseTree::Name(name) => {
                prefix.push(name.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Rename(rename) => {
                prefix.push(rename.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Glob(_) => {
                prefix.push("*".to_owned());
                self.paths.insert(prefix);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix.clone());
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
        self.record_use_tree(&node.tree, Vec::new());
    }
}

fn collect_sources(
    src_root: &Path,
    current: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    for entry in fs::read_dir(current)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_sources(src_root, &path, sources)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let relative = path
                .strip_prefix(src_root)
                .map_err(|err| ArchitectureLintError::Parse {
                    file: path.clone(),
                    message: err.to_string(),
                })?
                .to_path_buf();
            let contents = fs::read_to_string(&path)?;
            sources.push(LintSource::new(relative, contents));
        }
    }
    Ok(())
}
