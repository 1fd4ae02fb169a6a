use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Coarse placement class of a discovered component, derived from where its file lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// File sits directly inside a `components` directory
    Component,
    /// File sits in a named folder below a `components` directory
    SubfolderComponent,
    /// Anything outside `components`
    Page,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Component => "component",
            Category::SubfolderComponent => "subfolder-component",
            Category::Page => "page",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Preview size in integer pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: i64,
    pub height: i64,
}

impl Dimensions {
    /// Size used whenever inference fails outright
    pub const FALLBACK: Dimensions = Dimensions::new(700, 700);

    /// Largest side, in pixels, accepted from sources or a previous output
    pub const MAX_SIDE: i64 = 100_000;

    pub const fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    /// A side that can be laid out: positive and at most `MAX_SIDE`.
    pub fn side_in_range(side: i64) -> bool {
        (1..=Self::MAX_SIDE).contains(&side)
    }

    pub fn in_range(&self) -> bool {
        Self::side_in_range(self.width) && Self::side_in_range(self.height)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One UI component found in the source tree.
///
/// Built once per run by the scanner and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub name: String,

    /// Path relative to the source root, always with forward slashes
    pub relative_path: String,

    /// Absolute location on disk (only reported in verbose mode)
    pub full_path: PathBuf,

    pub category: Category,

    /// Folder name below `components/`; empty unless `category` is `SubfolderComponent`
    #[serde(default)]
    pub sub_folder: String,

    /// Parameter list looks like it takes a `style` override or spreads props
    pub accepts_external_style: bool,

    /// Source file contains `export default <name>`
    pub default_export: bool,

    /// Inferred preview size; `None` when auto-sizing did not apply
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
}

impl ComponentRecord {
    /// Scene id this component is expected to own in the storyboard.
    pub fn scene_id(&self) -> String {
        crate::scene_id_for(&self.name)
    }

    /// Import specifier without the file extension, e.g. `components/primitives/Button`.
    pub fn module_path(&self) -> &str {
        match self.relative_path.rfind('.') {
            Some(dot) if !self.relative_path[dot..].contains('/') => &self.relative_path[..dot],
            _ => &self.relative_path,
        }
    }
}
