use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static LIST_MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<(ul|ol)\b").unwrap());

/// Visual kind guessed from a component's file name and source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    Button,
    Card,
    Tag,
    Nav,
    Layout,
    Input,
    Modal,
    Icon,
    Menu,
    Form,
    List,
    Table,
    FullWidth,
    Generic,
}

/// Default preview size and width/height ratio of a [`ComponentKind`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeDefaults {
    pub width: i64,
    pub height: i64,
    pub aspect_ratio: f64,
}

impl SizeDefaults {
    const fn new(width: i64, height: i64, aspect_ratio: f64) -> Self {
        Self {
            width,
            height,
            aspect_ratio,
        }
    }
}

impl ComponentKind {
    pub fn defaults(&self) -> SizeDefaults {
        match self {
            ComponentKind::Button => SizeDefaults::new(120, 40, 3.0),
            ComponentKind::Tag => SizeDefaults::new(110, 44, 2.5),
            ComponentKind::Nav => SizeDefaults::new(800, 80, 10.0),
            ComponentKind::Card => SizeDefaults::new(350, 400, 0.875),
            ComponentKind::Layout => SizeDefaults::new(600, 400, 1.5),
            ComponentKind::Input => SizeDefaults::new(240, 40, 6.0),
            ComponentKind::Modal => SizeDefaults::new(500, 300, 1.67),
            ComponentKind::Icon => SizeDefaults::new(32, 32, 1.0),
            ComponentKind::Menu => SizeDefaults::new(200, 300, 0.67),
            ComponentKind::Form => SizeDefaults::new(400, 500, 0.8),
            ComponentKind::List => SizeDefaults::new(300, 400, 0.75),
            ComponentKind::Table => SizeDefaults::new(600, 400, 1.5),
            ComponentKind::FullWidth => SizeDefaults::new(800, 600, 1.33),
            ComponentKind::Generic => SizeDefaults::new(400, 300, 1.33),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Button => "button",
            ComponentKind::Card => "card",
            ComponentKind::Tag => "tag",
            ComponentKind::Nav => "nav",
            ComponentKind::Layout => "layout",
            ComponentKind::Input => "input",
            ComponentKind::Modal => "modal",
            ComponentKind::Icon => "icon",
            ComponentKind::Menu => "menu",
            ComponentKind::Form => "form",
            ComponentKind::List => "list",
            ComponentKind::Table => "table",
            ComponentKind::FullWidth => "full-width",
            ComponentKind::Generic => "generic",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a component. Rules are checked in order and the first hit wins,
/// so a `ButtonCard.jsx` is a button.
pub fn classify_component(content: &str, file_name: &str) -> ComponentKind {
    let lower = file_name.to_lowercase();
    let name_has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    if name_has(&["button"]) || content.contains("<button") || content.contains("role=\"button\"")
    {
        ComponentKind::Button
    } else if name_has(&["card"]) || content.contains("card") || content.contains("Card") {
        ComponentKind::Card
    } else if name_has(&["tag", "badge"]) {
        ComponentKind::Tag
    } else if name_has(&["nav", "header"]) {
        ComponentKind::Nav
    } else if name_has(&["layout", "page", "container"]) {
        ComponentKind::Layout
    } else if name_has(&["input", "field"]) {
        ComponentKind::Input
    } else if name_has(&["modal", "dialog"]) {
        ComponentKind::Modal
    } else if name_has(&["icon"]) {
        ComponentKind::Icon
    } else if name_has(&["menu", "dropdown"]) {
        ComponentKind::Menu
    } else if name_has(&["form"]) {
        ComponentKind::Form
    } else if name_has(&["list"]) || LIST_MARKUP.is_match(content) {
        ComponentKind::List
    } else if name_has(&["table"]) || content.contains("<table") {
        ComponentKind::Table
    } else if content.contains("width: '100%'")
        || content.contains("width: \"100%\"")
        || content.contains("width: 100%")
        || content.contains("maxWidth")
    {
        ComponentKind::FullWidth
    } else {
        ComponentKind::Generic
    }
}

/// Convert a CSS length as written in JSX into pixels.
///
/// `None` means "unknown": relative keywords, percentages, expressions, or
/// anything that does not start with an integer. Conversions that would
/// overflow are also unknown.
pub fn parse_style_value(raw: &str) -> Option<i64> {
    let value: String = raw.trim().chars().filter(|c| *c != '\'' && *c != '"').collect();
    let value = value.as_str();

    if matches!(value, "100%" | "auto" | "inherit" | "initial") {
        return None;
    }

    if let Some(number) = value.strip_suffix("px") {
        leading_int(number)
    } else if let Some(number) = value.strip_suffix("rem") {
        leading_int(number)?.checked_mul(16)
    } else if let Some(number) = value.strip_suffix("em") {
        leading_int(number)?.checked_mul(16)
    } else if let Some(number) = value.strip_suffix("vh") {
        leading_int(number)?.checked_mul(8)
    } else if let Some(number) = value.strip_suffix("vw") {
        leading_int(number)?.checked_mul(12)
    } else if !value.is_empty() && value.parse::<f64>().is_ok() {
        leading_int(value)
    } else {
        None
    }
}

/// Integer prefix of a string (`"12.5"` -> 12), ignoring leading whitespace.
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| n * sign)
}
