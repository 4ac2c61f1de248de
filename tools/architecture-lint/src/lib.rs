//! Layer boundary lint for the dashboard crate.
//!
//! `dashboard/src` is split into three layers. `domain` holds rules and
//! port traits, `inbound` holds view models and `outbound` holds platform
//! adapters. Each layer may only reach the others through the directions
//! below:
//!
//! | layer      | must not name                                              |
//! |------------|------------------------------------------------------------|
//! | `domain`   | `inbound`, `outbound`, `config`, `wiring`, HTTP and config crates |
//! | `inbound`  | `outbound`, `reqwest`, `serde_json`                        |
//! | `outbound` | `inbound`                                                  |
//!
//! Every path in a file counts: `use` trees, qualified expressions, types
//! and macro invocations.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::{self, Visit};
use thiserror::Error;

/// Path prefixes that never name an external crate.
const RELATIVE_ROOTS: [&str; 4] = ["crate", "self", "super", "dashboard"];

/// A top-level directory of `dashboard/src`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Entities, services and ports.
    Domain,
    /// View models.
    Inbound,
    /// Platform adapters.
    Outbound,
}

impl Layer {
    const ALL: [Self; 3] = [Self::Domain, Self::Inbound, Self::Outbound];

    /// Layer owning a file, given its path relative to `src/`.
    pub fn of(relative: &Path) -> Option<Self> {
        let top = relative.components().next()?.as_os_str().to_str()?;
        Self::ALL.into_iter().find(|layer| layer.dir() == top)
    }

    /// Directory name under `src/`.
    pub const fn dir(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    const fn denied_modules(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &["config", "inbound", "outbound", "wiring"],
            Self::Inbound => &["outbound"],
            Self::Outbound => &["inbound"],
        }
    }

    const fn denied_crates(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &["ortho_config", "reqwest", "tracing_subscriber"],
            Self::Inbound => &["reqwest", "serde_json"],
            Self::Outbound => &[],
        }
    }

    fn check(self, path: &[String]) -> Option<Target> {
        let first = path.first()?.as_str();
        let module = if RELATIVE_ROOTS.contains(&first) {
            path.iter()
                .map(String::as_str)
                .find(|segment| !RELATIVE_ROOTS.contains(segment))?
        } else if Self::ALL.iter().any(|layer| layer.dir() == first) {
            first
        } else {
            return self
                .denied_crates()
                .iter()
                .copied()
                .find(|denied| *denied == first)
                .map(Target::Crate);
        };
        self.denied_modules()
            .iter()
            .copied()
            .find(|denied| *denied == module)
            .map(Target::Module)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir())
    }
}

/// What a forbidden path reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Target {
    /// A sibling module of the crate.
    Module(&'static str),
    /// An external crate.
    Crate(&'static str),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module(name) => write!(f, "crate::{name}"),
            Self::Crate(name) => write!(f, "external crate `{name}`"),
        }
    }
}

/// One forbidden reference, reported once per file and target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `src/`.
    pub file: PathBuf,
    /// Layer the file belongs to.
    pub layer: Layer,
    /// What the file reaches.
    pub target: Target,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} code must not depend on {}",
            self.file.display(),
            self.layer,
            self.target
        )
    }
}

/// Why a lint run failed.
#[derive(Debug, Error)]
pub enum LintError {
    /// A source file or directory could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// A source file is not valid Rust.
    #[error("cannot parse {}: {message}", .file.display())]
    Parse {
        /// File path relative to `src/`.
        file: PathBuf,
        /// Parser message.
        message: String,
    },
    /// A source file sits outside every layer.
    #[error("{} is not under domain/, inbound/ or outbound/", .file.display())]
    Unlayered {
        /// File path relative to `src/`.
        file: PathBuf,
    },
    /// Boundaries were crossed.
    #[error("layer boundary violations:\n{}", list(.0))]
    Violations(Vec<Violation>),
}

fn list(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("- {violation}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A source file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// File path relative to `src/`.
    pub file: PathBuf,
    /// Full file contents.
    pub contents: String,
}

/// Lint the layered sources of the crate rooted at `crate_dir`.
///
/// # Errors
///
/// Returns [`LintError`] when a file cannot be read or parsed, or when a
/// boundary is crossed.
pub fn lint_dashboard_sources(crate_dir: &Path) -> Result<(), LintError> {
    let src = crate_dir.join("src");
    let mut sources = Vec::new();
    for layer in Layer::ALL {
        let dir = src.join(layer.dir());
        if dir.is_dir() {
            gather(&src, &dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Lint in-memory sources.
///
/// # Errors
///
/// Same as [`lint_dashboard_sources`], minus filesystem failures.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), LintError> {
    let mut violations = Vec::new();
    for source in sources {
        let layer = Layer::of(&source.file).ok_or_else(|| LintError::Unlayered {
            file: source.file.clone(),
        })?;
        let syntax = syn::parse_file(&source.contents).map_err(|err| LintError::Parse {
            file: source.file.clone(),
            message: err.to_string(),
        })?;
        let mut references = References::default();
        references.visit_file(&syntax);
        let targets: BTreeSet<Target> = references
            .paths
            .iter()
            .filter_map(|path| layer.check(path))
            .collect();
        violations.extend(targets.into_iter().map(|target| Violation {
            file: source.file.clone(),
            layer,
            target,
        }));
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(LintError::Violations(violations))
    }
}

/// Every path a file names, as identifier segments.
#[derive(Default)]
struct References {
    paths: BTreeSet<Vec<String>>,
}

impl References {
    fn flatten_use(&mut self, tree: &syn::UseTree, prefix: &mut Vec<String>) {
        match tree {
            syn::UseTree::Path(step) => {
                prefix.push(step.ident.to_string());
                self.flatten_use(&step.tree, prefix);
                prefix.pop();
            }
            syn::UseTree::Name(leaf) => self.record_with(prefix, &leaf.ident),
            syn::UseTree::Rename(leaf) => self.record_with(prefix, &leaf.ident),
            syn::UseTree::Glob(_) => {
                self.paths.insert(prefix.clone());
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.flatten_use(item, prefix);
                }
            }
        }
    }

    fn record_with(&mut self, prefix: &[String], last: &syn::Ident) {
        let mut path = prefix.to_vec();
        path.push(last.to_string());
        self.paths.insert(path);
    }
}

impl<'ast> Visit<'ast> for References {
    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.flatten_use(&node.tree, &mut Vec::new());
    }

    fn visit_path(&mut self, node: &'ast syn::Path) {
        let path: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !path.is_empty() {
            self.paths.insert(path);
        }
        visit::visit_path(self, node);
    }
}

fn gather(src: &Path, dir: &Path, sources: &mut Vec<LintSource>) -> Result<(), LintError> {
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source| LintError::Io { path, source }
    };
    let mut entries = fs::read_dir(dir)
        .map_err(io_error(dir))?
        .map(|entry| entry.map(|found| found.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error(dir))?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            gather(src, &path, sources)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let contents = fs::read_to_string(&path).map_err(io_error(&path))?;
            let file = path.strip_prefix(src).unwrap_or(&path).to_path_buf();
            sources.push(LintSource { file, contents });
        }
    }
    Ok(())
}
