use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use storyboard_types::{Dimensions, SceneBox, SceneRecord};

static SCENE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"<Scene[^>]*id='([^']+)'[^>]*commentId='([^']+)'[^>]*style=\{\{([^}]*)\}\}[^>]*data-label='([^']+)'[^>]*>([\s\S]*?)</Scene>",
    )
    .unwrap()
});

static COMPONENT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Z][a-zA-Z0-9_]*)[ \t\n>]").unwrap());

static WRAPPED_COMPONENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"component=\{([A-Z][a-zA-Z0-9_]*)\}").unwrap());

static COMPONENT_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^import\s+(?:\{\s*([A-Z][\w$]*)\s*\}|([A-Z][\w$]*))\s+from\s+'[^']*'[ \t]*;?[ \t]*$")
        .unwrap()
});

static WIDTH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"width:\s*(\d+)").unwrap());
static HEIGHT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"height:\s*(\d+)").unwrap());
static LEFT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"left:\s*(-?\d+)").unwrap());
static TOP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"top:\s*(-?\d+)").unwrap());

/// Tags that wrap the previewed component instead of being it
const WRAPPER_TAGS: [&str; 3] = ["Scene", "Storyboard", "SafeComponentWrapper"];

/// `import X from '...'` or `import { X } from '...'` line of a previous output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLine {
    pub name: String,
    pub line: String,
}

/// Everything recovered from a previously generated storyboard, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorStoryboard {
    pub scenes: Vec<SceneRecord>,
    pub imports: Vec<ImportLine>,
}

impl PriorStoryboard {
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn get(&self, id: &str) -> Option<&SceneRecord> {
        self.scenes.iter().find(|scene| scene.id == id)
    }

    pub fn import_for(&self, name: &str) -> Option<&ImportLine> {
        self.imports.iter().find(|import| import.name == name)
    }
}

/// Parse a previously generated storyboard.
///
/// Blocks whose style lacks any of width/height/left/top are dropped.
/// When an id repeats, the first block wins.
pub fn parse_storyboard(text: &str) -> PriorStoryboard {
    let mut prior = PriorStoryboard::default();
    let mut seen = HashSet::new();

    for caps in SCENE_BLOCK.captures_iter(text) {
        let id = &caps[1];
        let style = &caps[3];
        let label = &caps[4];
        let body = &caps[5];

        let Some(scene_box) = parse_scene_box(style) else {
            tracing::debug!(scene = id, "skipping scene with incomplete style");
            continue;
        };
        if !seen.insert(id.to_string()) {
            tracing::debug!(scene = id, "skipping duplicate scene id");
            continue;
        }

        let component_name = component_in_body(body);
        tracing::debug!(
            scene = id,
            label,
            component = component_name.as_deref().unwrap_or("<unknown>"),
            "found existing scene"
        );

        prior.scenes.push(SceneRecord {
            id: id.to_string(),
            scene_box,
            label: label.to_string(),
            component_name,
            body: body.to_string(),
        });
    }

    for caps in COMPONENT_IMPORT.captures_iter(text) {
        let Some(name) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };
        if prior.import_for(name.as_str()).is_some() {
            continue;
        }
        prior.imports.push(ImportLine {
            name: name.as_str().to_string(),
            line: caps[0].trim_end().to_string(),
        });
    }

    prior
}

/// Component rendered by a scene body: the first capitalized tag, looking
/// through wrapper tags via their `component={Name}` attribute.
pub fn component_in_body(body: &str) -> Option<String> {
    let tag = COMPONENT_TAG.captures(body)?.get(1)?.as_str();

    if WRAPPER_TAGS.contains(&tag)
        && let Some(wrapped) = WRAPPED_COMPONENT.captures(body).and_then(|c| c.get(1))
    {
        return Some(wrapped.as_str().to_string());
    }

    Some(tag.to_string())
}

/// Every capitalized tag or wrapped component referenced by a scene body, in order.
pub fn referenced_components(body: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let tags = COMPONENT_TAG.captures_iter(body).filter_map(|c| c.get(1));
    let wrapped = WRAPPED_COMPONENT.captures_iter(body).filter_map(|c| c.get(1));

    for name in tags.chain(wrapped).map(|m| m.as_str()) {
        if WRAPPER_TAGS.contains(&name) || names.iter().any(|n| n == name) {
            continue;
        }
        names.push(name.to_string());
    }
    names
}

/// All four values are required; sizes and coordinates past the canvas bounds
/// make the box unreadable.
fn parse_scene_box(style: &str) -> Option<SceneBox> {
    let size = Dimensions::new(style_int(&WIDTH, style)?, style_int(&HEIGHT, style)?);
    let left = style_int(&LEFT, style)?;
    let top = style_int(&TOP, style)?;

    if !size.in_range()
        || !SceneBox::coordinate_in_range(left)
        || !SceneBox::coordinate_in_range(top)
    {
        return None;
    }
    Some(SceneBox::new(size, left, top))
}

fn style_int(property: &Regex, style: &str) -> Option<i64> {
    property.captures(style)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIOR: &str = r#"import * as React from 'react'
import { Scene, Storyboard } from 'utopia-api'
import Spinner from '../src/components/Spinner'
import { Tag } from '../src/components/primitives/Tag'

export var storyboard = (
  <Storyboard>
    <Scene
      id='spinner-scene'
      commentId='spinner-scene'
      style={{
        width: 16,
        height: 16,
        position: 'absolute',
        left: 212,
        top: 1584,
      }}
      data-label='Spinner'
    >
      <Spinner />
    </Scene>
    <Scene
      id='tag-scene'
      commentId='tag-scene'
      style={{
        width: 110,
        height: 44,
        position: 'absolute',
        left: 1148,
        top: 1584,
      }}
      data-label='Tag (primitives)'
    >
      <Tag>Tag label</Tag>
    </Scene>
  </Storyboard>
)
"#;

    #[test]
    fn test_parse_scenes_in_file_order() {
        let prior = parse_storyboard(PRIOR);
        assert_eq!(prior.len(), 2);

        let spinner = &prior.scenes[0];
        assert_eq!(spinner.id, "spinner-scene");
        assert_eq!(spinner.scene_box, SceneBox { width: 16, height: 16, left: 212, top: 1584 });
        assert_eq!(spinner.label, "Spinner");
        assert_eq!(spinner.component_name.as_deref(), Some("Spinner"));
        assert_eq!(spinner.body, "\n      <Spinner />\n    ");

        let tag = prior.get("tag-scene").unwrap();
        assert_eq!(tag.label, "Tag (primitives)");
        assert_eq!(tag.component_name.as_deref(), Some("Tag"));
    }

    #[test]
    fn test_parse_component_imports_only() {
        let prior = parse_storyboard(PRIOR);
        let names: Vec<&str> = prior.imports.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Spinner", "Tag"]);
        assert_eq!(
            prior.import_for("Tag").unwrap().line,
            "import { Tag } from '../src/components/primitives/Tag'"
        );
    }

    #[test]
    fn test_incomplete_style_drops_scene() {
        let text = PRIOR.replace("        top: 1584,\n      }}\n      data-label='Spinner'", "      }}\n      data-label='Spinner'");
        let prior = parse_storyboard(&text);
        let ids: Vec<&str> = prior.scenes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["tag-scene"]);
    }

    #[test]
    fn test_zero_coordinates_are_kept() {
        let text = PRIOR.replace("left: 212", "left: 0");
        let prior = parse_storyboard(&text);
        assert_eq!(prior.scenes[0].scene_box.left, 0);
    }

    #[test]
    fn test_negative_coordinates_are_kept() {
        let text = PRIOR.replace("left: 212,\n        top: 1584,", "left: -200,\n        top: -40,");
        let prior = parse_storyboard(&text);
        let spinner = prior.get("spinner-scene").unwrap();
        assert_eq!((spinner.scene_box.left, spinner.scene_box.top), (-200, -40));
    }

    #[test]
    fn test_out_of_range_box_drops_scene() {
        let huge_top = PRIOR.replace("top: 1584,\n      }}\n      data-label='Spinner'", "top: 9223372036854775000,\n      }}\n      data-label='Spinner'");
        assert_eq!(parse_storyboard(&huge_top).len(), 1);

        let huge_height = PRIOR.replace("height: 16,", "height: 9223372036854775000,");
        let prior = parse_storyboard(&huge_height);
        let ids: Vec<&str> = prior.scenes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["tag-scene"]);
    }

    #[test]
    fn test_duplicate_ids_first_wins() {
        let text = PRIOR.replace("id='tag-scene'", "id='spinner-scene'");
        let prior = parse_storyboard(&text);
        assert_eq!(prior.len(), 1);
        assert_eq!(prior.scenes[0].label, "Spinner");
    }

    #[test]
    fn test_wrapper_tags_resolve_component_attribute() {
        let body = "\n      <SafeComponentWrapper component={CaseStudyCard} title='x' />\n    ";
        assert_eq!(component_in_body(body).as_deref(), Some("CaseStudyCard"));

        let body = "\n      <Scene component={Header}>\n    ";
        assert_eq!(component_in_body(body).as_deref(), Some("Header"));
    }

    #[test]
    fn test_body_without_component_is_unresolvable() {
        let body = "\n      <>\n        <div style={{ padding: '20px' }}>hi</div>\n      </>\n    ";
        assert_eq!(component_in_body(body), None);
        assert!(referenced_components(body).is_empty());
    }

    #[test]
    fn test_referenced_components_deduplicates() {
        let body = "<FlexCol><Button>a</Button><Button>b</Button><SafeComponentWrapper component={Link} /></FlexCol>";
        assert_eq!(referenced_components(body), vec!["FlexCol", "Button", "Link"]);
    }

    #[test]
    fn test_garbage_is_empty() {
        assert!(parse_storyboard("not a storyboard at all").is_empty());
        assert!(parse_storyboard("").imports.is_empty());
    }
}
