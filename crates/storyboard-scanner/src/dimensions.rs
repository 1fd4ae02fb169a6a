use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use storyboard_types::Dimensions;

use crate::heuristics::{ComponentKind, SizeDefaults, classify_component, parse_style_value};

static PREFERRED_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@preferred-size\s+(\d+)x(\d+)").unwrap());

/// Style fragments, scanned in this order: inline JSX attributes,
/// `style = {...}` assignments, `style: {...}` object properties.
static STYLE_FRAGMENTS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"style=\s*\{(?:[^{}]|\{[^{}]*\})*\}\s*>").unwrap(),
        Regex::new(r"style\s*=\s*\{(?:[^{}]|\{[^{}]*\})*\}").unwrap(),
        Regex::new(r"style\s*:\s*\{(?:[^{}]|\{[^{}]*\})*\}").unwrap(),
    ]
});

static STYLED_CONTAINER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(?:div|section|main|article|aside)\s+[^>]*style\s*=\s*\{(?:[^{}]|\{[^{}]*\})*\}")
        .unwrap()
});

static WIDTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"width\s*:\s*['"]?([^'",}]+)"#).unwrap());
static HEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"height\s*:\s*['"]?([^'",}]+)"#).unwrap());
static MAX_WIDTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"maxWidth\s*:\s*['"]?([^'",}]+)"#).unwrap());

/// Which rule of the priority chain produced a size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSource {
    /// `@preferred-size WxH` comment
    Annotation,
    /// Both sides read from declared styles
    Styles,
    /// One side declared, the other derived from the kind's aspect ratio
    AspectRatio(ComponentKind),
    /// Nothing declared; kind default
    KindDefault(ComponentKind),
    /// Inference failed
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inference {
    pub dimensions: Dimensions,
    pub source: SizeSource,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// Aspect-ratio back-fill left the integer range
    Overflow { known: i64, aspect_ratio: f64 },
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceError::Overflow {
                known,
                aspect_ratio,
            } => write!(
                f,
                "aspect ratio {} applied to {} is out of range",
                aspect_ratio, known
            ),
        }
    }
}

impl std::error::Error for InferenceError {}

/// Infer a preview size for a component file. Never fails: any internal
/// error yields [`Dimensions::FALLBACK`].
pub fn infer_dimensions(content: &str, file_name: &str) -> Dimensions {
    infer_with_source(content, file_name).dimensions
}

/// Same as [`infer_dimensions`], also reporting which rule decided.
pub fn infer_with_source(content: &str, file_name: &str) -> Inference {
    match resolve(content, file_name) {
        Ok(inference) => {
            tracing::debug!(
                file = file_name,
                size = %inference.dimensions,
                source = ?inference.source,
                "inferred component size"
            );
            inference
        }
        Err(err) => {
            tracing::warn!(file = file_name, error = %err, "size inference failed, using fallback");
            Inference {
                dimensions: Dimensions::FALLBACK,
                source: SizeSource::Fallback,
            }
        }
    }
}

fn resolve(content: &str, file_name: &str) -> Result<Inference, InferenceError> {
    if let Some(dimensions) = preferred_size(content) {
        return Ok(Inference {
            dimensions,
            source: SizeSource::Annotation,
        });
    }

    let declared = DeclaredSize::scan(content);
    let width = declared.width.or(declared.max_width);

    if let (Some(width), Some(height)) = (width, declared.height) {
        return Ok(Inference {
            dimensions: Dimensions::new(width, height),
            source: SizeSource::Styles,
        });
    }

    let kind = classify_component(content, file_name);
    let defaults = kind.defaults();

    let dimensions = match (width, declared.height) {
        (Some(width), None) => {
            let height = backfill(width, width as f64 / defaults.aspect_ratio, defaults)?;
            Dimensions::new(width, height)
        }
        (None, Some(height)) => {
            let width = backfill(height, height as f64 * defaults.aspect_ratio, defaults)?;
            Dimensions::new(width, height)
        }
        _ => {
            return Ok(Inference {
                dimensions: Dimensions::new(defaults.width, defaults.height),
                source: SizeSource::KindDefault(kind),
            });
        }
    };

    Ok(Inference {
        dimensions,
        source: SizeSource::AspectRatio(kind),
    })
}

fn preferred_size(content: &str) -> Option<Dimensions> {
    let caps = PREFERRED_SIZE.captures(content)?;
    let width = caps[1].parse::<i64>().ok()?;
    let height = caps[2].parse::<i64>().ok()?;
    let size = Dimensions::new(width, height);
    if !size.in_range() {
        tracing::debug!(%size, "ignoring out-of-range @preferred-size annotation");
        return None;
    }
    Some(size)
}

/// Round a derived side to whole pixels; rounds half away from zero, never truncates.
fn backfill(known: i64, derived: f64, defaults: SizeDefaults) -> Result<i64, InferenceError> {
    let value = derived.round();
    if !value.is_finite() || value <= 0.0 || value > Dimensions::MAX_SIDE as f64 {
        return Err(InferenceError::Overflow {
            known,
            aspect_ratio: defaults.aspect_ratio,
        });
    }
    Ok(value as i64)
}

/// First width/height/maxWidth found across all style fragments
#[derive(Debug, Default)]
struct DeclaredSize {
    width: Option<i64>,
    height: Option<i64>,
    max_width: Option<i64>,
}

impl DeclaredSize {
    fn scan(content: &str) -> Self {
        let mut size = DeclaredSize::default();

        for pattern in STYLE_FRAGMENTS.iter() {
            for fragment in pattern.find_iter(content) {
                size.absorb(fragment.as_str());
            }
        }
        for container in STYLED_CONTAINER.find_iter(content) {
            size.absorb(container.as_str());
        }

        size
    }

    /// Fill whichever values are still unknown from one fragment.
    fn absorb(&mut self, fragment: &str) {
        if self.width.is_none() {
            self.width = first_length(&WIDTH, fragment);
        }
        if self.height.is_none() {
            self.height = first_length(&HEIGHT, fragment);
        }
        if self.max_width.is_none() {
            self.max_width = first_length(&MAX_WIDTH, fragment);
        }
    }
}

/// Only the first occurrence of the property in a fragment counts; lengths
/// outside `1..=MAX_SIDE` are treated as unknown.
fn first_length(property: &Regex, fragment: &str) -> Option<i64> {
    let caps = property.captures(fragment)?;
    parse_style_value(&caps[1]).filter(|v| Dimensions::side_in_range(*v))
}
