use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use storyboard_types::{Category, ComponentRecord, Dimensions, to_forward_slashes};
use walkdir::WalkDir;

use crate::dimensions::infer_dimensions;
use crate::{Error, Result};

/// Directory segment that marks reusable components
pub const COMPONENTS_SEGMENT: &str = "components";

static NAMED_EXPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bexport\s+(?:var|const|let|function|class)\s+([A-Za-z_$][\w$]*)").unwrap()
});

static DEFAULT_EXPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bexport\s+default\s+(?:(?:async\s+)?function\s*\*?\s+|class\s+)?([A-Za-z_$][\w$]*)")
        .unwrap()
});

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:var|const|let|function|class)\s+([A-Za-z_$][\w$]*)").unwrap()
});

static MARKUP_RETURN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\breturn|=>)\s*\(?\s*<").unwrap());

static DESTRUCTURING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[^}]*\}").unwrap());

/// File selection and sizing rules for one scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Case-insensitive substrings; a match on the base name or relative path skips the file
    pub ignore_keywords: Vec<String>,
    /// Case-insensitive substrings of the base name that override `ignore_keywords`
    pub force_include: Vec<String>,
    /// Accepted extensions, without the dot
    pub extensions: Vec<String>,
    /// Infer preview sizes for files below a `components` directory
    pub auto_size: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            ignore_keywords: [
                "index",
                "utils",
                "router",
                "spec",
                "mock",
                "helpers",
                "constants",
                "types",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            force_include: Vec::new(),
            extensions: ["jsx", "js", "tsx", "ts"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            auto_size: true,
        }
    }
}

impl ScanOptions {
    fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }

    /// `true` when the file should be skipped
    pub fn is_ignored(&self, base_name: &str, relative_path: &str) -> bool {
        let base = base_name.to_lowercase();
        let relative = relative_path.to_lowercase();

        let ignored = self.ignore_keywords.iter().any(|keyword| {
            let keyword = keyword.to_lowercase();
            base.contains(&keyword) || relative.contains(&keyword)
        });
        if !ignored {
            return false;
        }

        !self
            .force_include
            .iter()
            .any(|keyword| base.contains(&keyword.to_lowercase()))
    }
}

/// Walk `root` depth-first (entries in file-name order) and collect every UI component.
///
/// Unreadable files are logged and skipped; only a missing root is an error.
pub fn scan_components(root: &Path, options: &ScanOptions) -> Result<Vec<ComponentRecord>> {
    if !root.is_dir() {
        return Err(Error::RootNotFound(root.to_path_buf()));
    }

    let mut collector = Collector::default();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };

        if !entry.file_type().is_file() || !options.accepts_extension(entry.path()) {
            continue;
        }

        let path = entry.path();
        let relative_path = match path.strip_prefix(root) {
            Ok(rel) => to_forward_slashes(rel),
            Err(_) => continue,
        };
        let base_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        if options.is_ignored(&base_name, &relative_path) {
            tracing::debug!(file = %relative_path, "skipping ignored file");
            continue;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(file = %relative_path, error = %err, "skipping unreadable file");
                continue;
            }
        };

        let source = SourceFile {
            path,
            relative_path: &relative_path,
            content: &content,
        };
        collector.collect(&source, options);
    }

    Ok(collector.components)
}

/// Components of a single file, in the order they are discovered:
/// named exports first, then the declaration behind `export default`.
pub fn extract_components(content: &str) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for caps in NAMED_EXPORT.captures_iter(content) {
        let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let end = caps.get(0).map(|m| m.end()).unwrap_or_default();
        candidates.push(Candidate {
            name: name.to_string(),
            params: parameters_after(content, end),
        });
    }

    if let Some(default_name) = default_export_names(content).last() {
        for caps in DECLARATION.captures_iter(content) {
            let Some(name) = caps.get(1) else { continue };
            if name.as_str() != default_name {
                continue;
            }
            let end = caps.get(0).map(|m| m.end()).unwrap_or_default();
            candidates.push(Candidate {
                name: default_name.clone(),
                params: parameters_after(content, end),
            });
        }
    }

    candidates
}

/// Identifiers referenced by `export default ...` statements, in source order.
pub fn default_export_names(content: &str) -> Vec<String> {
    DEFAULT_EXPORT
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !matches!(*name, "function" | "class" | "async"))
        .map(str::to_string)
        .collect()
}

/// Does the text look like it renders UI at all?
pub fn has_ui_signal(content: &str) -> bool {
    (content.contains('<') && (content.contains("/>") || content.contains("</")))
        || content.contains("import React")
        || content.contains("import * as React")
        || content.contains("extends React.Component")
        || content.contains("extends Component")
        || content.contains("useState")
        || content.contains("useEffect")
        || content.contains("useContext")
        || MARKUP_RETURN.is_match(content)
}

/// Whether a parameter list can take a style override
pub fn accepts_external_style(params: &str) -> bool {
    params.contains("style")
        || params.contains("props")
        || params.contains("...")
        || DESTRUCTURING.is_match(params)
}

/// Classify a file by where it sits relative to the source root.
pub fn categorize(relative_path: &str) -> (Category, String) {
    let mut segments: Vec<&str> = relative_path.split('/').collect();
    segments.pop();

    match segments.iter().position(|s| *s == COMPONENTS_SEGMENT) {
        Some(idx) => match segments.get(idx + 1) {
            Some(folder) => (Category::SubfolderComponent, folder.to_string()),
            None => (Category::Component, String::new()),
        },
        None => (Category::Page, String::new()),
    }
}

/// Declared name plus the raw text of its parameter list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub params: String,
}

struct SourceFile<'a> {
    path: &'a Path,
    relative_path: &'a str,
    content: &'a str,
}

#[derive(Default)]
struct Collector {
    components: Vec<ComponentRecord>,
    seen: HashSet<String>,
}

impl Collector {
    fn collect(&mut self, source: &SourceFile<'_>, options: &ScanOptions) {
        let candidates = extract_components(source.content);
        if candidates.is_empty() {
            return;
        }

        let ui_signal = has_ui_signal(source.content);
        let default_exports = default_export_names(source.content);
        let (category, sub_folder) = categorize(source.relative_path);
        let mut file_dimensions: Option<Option<Dimensions>> = None;

        for candidate in candidates {
            if !starts_uppercase(&candidate.name) || !ui_signal {
                continue;
            }
            if self.seen.contains(&candidate.name) {
                tracing::debug!(
                    component = %candidate.name,
                    file = %source.relative_path,
                    "dropping duplicate component name"
                );
                continue;
            }

            let dimensions = *file_dimensions.get_or_insert_with(|| {
                (options.auto_size && category != Category::Page).then(|| {
                    let file_name = source
                        .path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    infer_dimensions(source.content, &file_name)
                })
            });

            self.seen.insert(candidate.name.clone());
            self.components.push(ComponentRecord {
                default_export: default_exports.contains(&candidate.name),
                accepts_external_style: accepts_external_style(&candidate.params),
                name: candidate.name,
                relative_path: source.relative_path.to_string(),
                full_path: source.path.to_path_buf(),
                category,
                sub_folder: sub_folder.clone(),
                dimensions,
            });
        }
    }
}

fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Parameter list of the declaration whose head ends at `pos`.
///
/// Handles `= (a, b) =>`, `= async (..)`, `= function (..)`, `= props =>`,
/// `function Name(..)` and TypeScript annotations such as `: FC<Props> = (..)`.
/// Anything else (`React.memo(...)`, classes) has no parameter list.
fn parameters_after(content: &str, pos: usize) -> String {
    let rest = content[pos..].trim_start();

    if rest.starts_with('(') || rest.starts_with('<') {
        return balanced_group(rest).unwrap_or_default();
    }

    let rest = match rest.strip_prefix(':') {
        Some(annotated) => match skip_type_annotation(annotated) {
            Some(after) => after,
            None => return String::new(),
        },
        None => rest,
    };

    let Some(rest) = rest.strip_prefix('=') else {
        return String::new();
    };
    if rest.starts_with('>') || rest.starts_with('=') {
        return String::new();
    }

    let mut rest = rest.trim_start();
    if let Some(after) = rest.strip_prefix("async") {
        rest = after.trim_start();
    }
    if let Some(after) = rest.strip_prefix("function") {
        rest = after.trim_start_matches(|c: char| c.is_whitespace() || c == '*');
        rest = rest.trim_start_matches(|c: char| c.is_alphanumeric() || c == '_' || c == '$');
        rest = rest.trim_start();
    }

    if rest.starts_with('(') || rest.starts_with('<') {
        return balanced_group(rest).unwrap_or_default();
    }

    // Single bare parameter: `props => ...`
    let ident_len = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(rest.len());
    if ident_len > 0 && rest[ident_len..].trim_start().starts_with("=>") {
        return rest[..ident_len].to_string();
    }

    String::new()
}

/// Skip a `: Type` annotation up to the `=` that starts the initializer.
fn skip_type_annotation(s: &str) -> Option<&str> {
    let mut depth = 0i32;
    for (idx, c) in s.char_indices() {
        match c {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth -= 1,
            '=' if depth == 0 => {
                let next = s[idx + 1..].chars().next();
                if next != Some('>') {
                    return Some(&s[idx..]);
                }
            }
            ';' | '\n' if depth == 0 => return None,
            _ => {}
        }
    }
    None
}

/// Inner text of the parenthesised group that starts at (or after a generic
/// `<...>` clause at) the beginning of `s`. String literals are skipped so a
/// `')'` inside a default value does not close the group.
fn balanced_group(s: &str) -> Option<String> {
    let s = if s.starts_with('<') {
        let close = s.find('>')?;
        s[close + 1..].trim_start()
    } else {
        s
    };
    if !s.starts_with('(') {
        return None;
    }

    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, c) in s.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(s[1..idx].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
