//! Ignore rules for directory scans.
//!
//! An ordered pattern list loaded from a `.merkleignore` file at the snapshot
//! root (blank lines and `#` comments skipped). Three pattern classes:
//!
//! - directory patterns (trailing `/`): match the directory itself and
//!   everything beneath it, or any path component of that name;
//! - glob patterns (containing `*`, `?`, or `[`): matched against the full
//!   relative path and against the basename;
//! - bare names: match any path component or the exact relative path.
//!
//! The scanner only consumes the single `should_ignore(rel_path, is_dir)`
//! query; editing the ignore file is left to the user.

use globset::{Glob, GlobMatcher};
use std::path::Path;
use tracing::warn;

/// Default ignore file name, looked up at the snapshot root.
pub const DEFAULT_IGNORE_FILE: &str = ".merkleignore";

/// Curated ignore presets by category, appended to loaded rules when the
/// caller opts in (CLI `--common-ignores`).
pub const COMMON_IGNORE_GROUPS: &[(&str, &[&str])] = &[
    (
        "Operating System",
        &[".DS_Store", "Thumbs.db", "desktop.ini", "Icon?", "ehthumbs.db"],
    ),
    (
        "Editors & IDEs",
        &[
            ".vscode/",
            ".idea/",
            "*.sublime-project",
            "*.sublime-workspace",
            "*~",
            ".#*",
            "*.swp",
            "*.swo",
            "Session.vim",
            ".metadata/",
        ],
    ),
    (
        "Python",
        &[
            "__pycache__/",
            "*.py[cod]",
            "*$py.class",
            "*.pyo",
            "*.pyd",
            "venv/",
            "env/",
            ".venv/",
            "pip-wheel-metadata/",
            "*.egg-info/",
            ".eggs/",
        ],
    ),
    (
        "Node.js",
        &[
            "node_modules/",
            "npm-debug.log*",
            "yarn-debug.log*",
            "yarn-error.log*",
            "pnpm-debug.log*",
            "package-lock.json",
            "yarn.lock",
            "pnpm-lock.yaml",
        ],
    ),
    (
        "Java / JVM",
        &["*.class", "*.jar", "*.war", "*.ear", "target/", "build/", "*.iml"],
    ),
    ("Rust / Cargo", &["target/", "**/*.rlib", "Cargo.lock"]),
    ("Go", &["bin/", "*.exe", "*.test"]),
    (".NET", &["bin/", "obj/", "*.user", "*.suo", "*.cache"]),
    ("C/C++", &["*.o", "*.obj", "*.so", "*.exe", "build/"]),
    (
        "Build, Packaging & CI",
        &[
            "dist/",
            "build/",
            "out/",
            "coverage/",
            ".coverage",
            "coverage.xml",
            "htmlcov/",
            ".pytest_cache/",
            ".tox/",
            ".nox/",
            "/.cache",
            "pip-wheel-metadata/",
        ],
    ),
    (
        "Container / Docker",
        &["docker-compose.override.yml", "Dockerfile.*.local", "*.dockerfile"],
    ),
    (
        "Archives, Backups & Large Files",
        &[
            "*.zip", "*.tar", "*.tar.gz", "*.tgz", "*.rar", "*.7z", "*.gz", "*.bak", "*.old",
            "*.backup",
        ],
    ),
    ("Logs & Temp", &["*.log", "logs/", "*.tmp", "*.temp", "tmp/"]),
    ("Git", &[".git/", ".gitignore"]),
];

/// Flat, sorted, deduplicated list of all common ignore patterns.
pub fn all_common_patterns() -> Vec<String> {
    let mut patterns: Vec<String> = COMMON_IGNORE_GROUPS
        .iter()
        .flat_map(|(_, group)| group.iter().map(|p| (*p).to_string()))
        .collect();
    patterns.sort();
    patterns.dedup();
    patterns
}

enum CompiledPattern {
    /// Trailing-slash pattern; stored without the slash.
    Directory(String),
    /// Wildcard pattern compiled for full-path and basename matching.
    Glob(GlobMatcher),
    /// Bare name, matched against path components.
    Name(String),
}

/// Ordered ignore rules answering the scanner's single query.
#[derive(Default)]
pub struct IgnoreRules {
    patterns: Vec<CompiledPattern>,
    sources: Vec<String>,
}

impl IgnoreRules {
    /// Compile an ordered list of raw pattern strings.
    pub fn from_patterns(patterns: Vec<String>) -> Self {
        let mut rules = Self::default();
        rules.extend(patterns);
        rules
    }

    /// Load rules from `<root>/.merkleignore`.
    ///
    /// A missing or unreadable ignore file yields empty rules; scanning must
    /// not fail because the ignore file does.
    pub fn load(root: &Path) -> Self {
        Self::load_named(root, DEFAULT_IGNORE_FILE)
    }

    /// Load rules from a custom ignore file name under `root`.
    pub fn load_named(root: &Path, file_name: &str) -> Self {
        let ignore_path = root.join(file_name);
        if !ignore_path.is_file() {
            return Self::default();
        }
        let contents = match std::fs::read_to_string(&ignore_path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %ignore_path.display(), error = %e, "Cannot read ignore file, continuing without it");
                return Self::default();
            }
        };
        let patterns = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self::from_patterns(patterns)
    }

    /// Append additional patterns, preserving order.
    pub fn extend(&mut self, patterns: impl IntoIterator<Item = String>) {
        for raw in patterns {
            self.patterns.push(compile_pattern(&raw));
            self.sources.push(raw);
        }
    }

    /// The raw pattern strings, in evaluation order.
    pub fn patterns(&self) -> &[String] {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Decide whether a scan entry should be skipped entirely.
    ///
    /// `rel_path` is the POSIX-style path relative to the snapshot root.
    pub fn should_ignore(&self, rel_path: &str, is_dir: bool) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let basename = rel_path.rsplit('/').next().unwrap_or(rel_path);

        for pattern in &self.patterns {
            match pattern {
                CompiledPattern::Directory(name) => {
                    if rel_path == name && is_dir {
                        return true;
                    }
                    if rel_path.starts_with(&format!("{}/", name))
                        || rel_path.split('/').any(|part| part == name)
                    {
                        return true;
                    }
                }
                CompiledPattern::Glob(matcher) => {
                    if matcher.is_match(rel_path) || matcher.is_match(basename) {
                        return true;
                    }
                }
                CompiledPattern::Name(name) => {
                    if rel_path == name || rel_path.split('/').any(|part| part == name) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

fn compile_pattern(raw: &str) -> CompiledPattern {
    if let Some(stripped) = raw.strip_suffix('/') {
        return CompiledPattern::Directory(stripped.to_string());
    }
    if raw.contains('*') || raw.contains('?') || raw.contains('[') {
        match Glob::new(raw) {
            Ok(glob) => return CompiledPattern::Glob(glob.compile_matcher()),
            Err(e) => {
                warn!(pattern = raw, error = %e, "Invalid glob pattern, matching as literal name");
            }
        }
    }
    CompiledPattern::Name(raw.to_string())
}
