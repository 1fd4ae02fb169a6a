use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Dimensions;

/// Suffix appended to the lowercased component name to form a scene id
pub const SCENE_ID_SUFFIX: &str = "-scene";

/// Derive the scene id owned by a component name.
pub fn scene_id_for(component_name: &str) -> String {
    format!("{}{}", component_name.to_lowercase(), SCENE_ID_SUFFIX)
}

/// Absolute placement of a scene on the storyboard canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneBox {
    pub width: i64,
    pub height: i64,
    pub left: i64,
    pub top: i64,
}

impl SceneBox {
    /// Largest distance from the origin accepted for `left` and `top`
    pub const MAX_COORDINATE: i64 = 10_000_000;

    pub fn coordinate_in_range(value: i64) -> bool {
        (-Self::MAX_COORDINATE..=Self::MAX_COORDINATE).contains(&value)
    }

    pub fn new(size: Dimensions, left: i64, top: i64) -> Self {
        Self {
            width: size.width,
            height: size.height,
            left,
            top,
        }
    }

    pub fn bottom(&self) -> i64 {
        self.top.saturating_add(self.height)
    }
}

impl fmt::Display for SceneBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} @ ({},{})",
            self.width, self.height, self.left, self.top
        )
    }
}

/// One preview entry of the storyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneRecord {
    pub id: String,

    #[serde(rename = "box")]
    pub scene_box: SceneBox,

    pub label: String,

    /// Component the scene renders, when it could be read back from the scene body
    pub component_name: Option<String>,

    /// Raw inner content between `>` and `</Scene>` as found in a parsed file.
    /// Empty for scenes that were never parsed.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
}

impl SceneRecord {
    pub fn is_resolvable(&self) -> bool {
        self.component_name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_id_is_lowercased_with_suffix() {
        assert_eq!(scene_id_for("CaseStudyCard"), "casestudycard-scene");
        assert_eq!(scene_id_for("App"), "app-scene");
    }

    #[test]
    fn test_scene_box_bottom() {
        let b = SceneBox::new(Dimensions::new(120, 40), 212, 1584);
        assert_eq!(b.bottom(), 1624);
        assert_eq!(b.to_string(), "120x40 @ (212,1584)");
    }

    #[test]
    fn test_scene_box_bottom_saturates() {
        let b = SceneBox::new(Dimensions::new(10, i64::MAX - 5), 212, 1584);
        assert_eq!(b.bottom(), i64::MAX);
    }

    #[test]
    fn test_coordinate_range() {
        assert!(SceneBox::coordinate_in_range(-200));
        assert!(SceneBox::coordinate_in_range(SceneBox::MAX_COORDINATE));
        assert!(!SceneBox::coordinate_in_range(SceneBox::MAX_COORDINATE + 1));
    }
}
