use std::collections::HashMap;
use std::fmt::Write;
use storyboard_types::ComponentRecord;

use crate::layout::PlacedScene;

const HEADER: &str = "import * as React from 'react'\nimport { Scene, Storyboard } from 'utopia-api'\n";

/// Indentation of the lines inside a scene body
const BODY_INDENT: &str = "      ";

/// What goes between `<Scene ...>` and `</Scene>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneTemplate {
    /// Static description of the routed app instead of the app itself
    App,
    PageLayout,
    Tag,
    Button,
    CaseStudyDetail,
    Playground,
    /// `<Name style={{}} />`
    Styled(String),
    /// `<Name />`
    Bare(String),
    /// Body of a retained scene, re-emitted untouched
    Verbatim(String),
}

impl SceneTemplate {
    pub fn for_component(component: &ComponentRecord) -> Self {
        match component.name.as_str() {
            "App" => SceneTemplate::App,
            "PageLayout" => SceneTemplate::PageLayout,
            "Tag" => SceneTemplate::Tag,
            "Button" => SceneTemplate::Button,
            "CaseStudyDetail" => SceneTemplate::CaseStudyDetail,
            "Playground" => SceneTemplate::Playground,
            name if component.accepts_external_style => SceneTemplate::Styled(name.to_string()),
            name => SceneTemplate::Bare(name.to_string()),
        }
    }

    /// Inner scene text, starting after `>` and ending right before `</Scene>`.
    pub fn render(&self) -> String {
        let lines: Vec<String> = match self {
            SceneTemplate::Verbatim(body) => return body.clone(),
            SceneTemplate::App => APP_PREVIEW.iter().map(|l| l.to_string()).collect(),
            SceneTemplate::PageLayout => vec![
                "<PageLayout style={{}} title=\"Sample Title\">".to_string(),
                "  <div>Sample content</div>".to_string(),
                "</PageLayout>".to_string(),
            ],
            SceneTemplate::Tag => vec!["<Tag>Tag label</Tag>".to_string()],
            SceneTemplate::Button => vec![
                "<Button style={{}} onClick={() => {}}>".to_string(),
                "  Click Me".to_string(),
                "</Button>".to_string(),
            ],
            SceneTemplate::CaseStudyDetail => {
                vec!["<CaseStudyDetail slug=\"sample-case-study\" />".to_string()]
            }
            SceneTemplate::Playground => vec![
                "<Playground style={{}}>".to_string(),
                "  Playground Content".to_string(),
                "</Playground>".to_string(),
            ],
            SceneTemplate::Styled(name) => vec![format!("<{} style={{{{}}}} />", name)],
            SceneTemplate::Bare(name) => vec![format!("<{} />", name)],
        };

        let mut body = String::from("\n");
        for line in lines {
            body.push_str(BODY_INDENT);
            body.push_str(&line);
            body.push('\n');
        }
        body.push_str("    ");
        body
    }
}

const APP_PREVIEW: &[&str] = &[
    "<>",
    "  {/* Simplified App preview for storyboard */}",
    "  <div style={{ padding: '20px', height: '100%', overflow: 'auto' }}>",
    "    <div style={{ border: '1px dashed #ccc', padding: '15px', borderRadius: '4px', marginBottom: '15px' }}>",
    "      <h3 style={{ margin: '0 0 10px 0' }}>App Component</h3>",
    "      <p style={{ margin: '0 0 10px 0' }}>This component contains a Router with the following routes:</p>",
    "      <ul style={{ margin: '0', paddingLeft: '20px' }}>",
    "        <li>/ → AboutPage</li>",
    "        <li>/portfolio → PortfolioPage</li>",
    "        <li>/portfolio/:slug → CaseStudyDetail</li>",
    "        <li>/contact → ContactPage</li>",
    "      </ul>",
    "    </div>",
    "  </div>",
    "</>",
];

/// Import statement for one discovered component.
pub fn import_line(component: &ComponentRecord, import_prefix: &str) -> String {
    let specifier = format!(
        "{}/{}",
        import_prefix.trim_end_matches('/'),
        component.module_path()
    );
    if component.default_export {
        format!("import {} from '{}'", component.name, specifier)
    } else {
        format!("import {{ {} }} from '{}'", component.name, specifier)
    }
}

/// Serialize the final scene list into storyboard source text.
///
/// Live scenes render from their component's template; retained orphans
/// re-emit the body they were parsed with.
pub fn render_storyboard(
    scenes: &[PlacedScene],
    components: &[ComponentRecord],
    import_prefix: &str,
    retained_imports: &[String],
) -> String {
    let by_name: HashMap<&str, &ComponentRecord> =
        components.iter().map(|c| (c.name.as_str(), c)).collect();

    let mut out = String::from(HEADER);
    for component in components {
        out.push_str(&import_line(component, import_prefix));
        out.push('\n');
    }
    for line in retained_imports {
        out.push_str(line);
        out.push('\n');
    }

    out.push_str("\nexport var storyboard = (\n  <Storyboard>\n");

    for placed in scenes {
        let template = match placed
            .component
            .as_deref()
            .and_then(|name| by_name.get(name))
        {
            Some(component) => SceneTemplate::for_component(component),
            None => SceneTemplate::Verbatim(placed.scene.body.clone()),
        };
        write_scene(&mut out, placed, &template);
    }

    out.push_str("  </Storyboard>\n)\n");
    out
}

fn write_scene(out: &mut String, placed: &PlacedScene, template: &SceneTemplate) {
    let scene = &placed.scene;
    let b = &scene.scene_box;

    // Writing to a String never fails
    let _ = write!(
        out,
        "    <Scene\n      id='{id}'\n      commentId='{id}'\n      style={{{{\n        width: {w},\n        height: {h},\n        position: 'absolute',\n        left: {l},\n        top: {t},\n      }}}}\n      data-label='{label}'\n    >",
        id = scene.id,
        w = b.width,
        h = b.height,
        l = b.left,
        t = b.top,
        label = scene.label,
    );
    out.push_str(&template.render());
    out.push_str("</Scene>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use storyboard_types::Category;

    fn component(name: &str, path: &str, style: bool, default_export: bool) -> ComponentRecord {
        ComponentRecord {
            name: name.to_string(),
            relative_path: path.to_string(),
            full_path: PathBuf::from("/src").join(path),
            category: Category::Component,
            sub_folder: String::new(),
            accepts_external_style: style,
            default_export,
            dimensions: None,
        }
    }

    #[test]
    fn test_import_lines() {
        let spinner = component("Spinner", "components/Spinner.jsx", false, true);
        assert_eq!(
            import_line(&spinner, "../src"),
            "import Spinner from '../src/components/Spinner'"
        );
        let tag = component("Tag", "components/primitives/Tag.jsx", true, false);
        assert_eq!(
            import_line(&tag, "../src/"),
            "import { Tag } from '../src/components/primitives/Tag'"
        );
        assert_eq!(
            import_line(&tag, "."),
            "import { Tag } from './components/primitives/Tag'"
        );
    }

    #[test]
    fn test_template_selection() {
        let generic = component("Header", "components/Header.jsx", true, false);
        assert_eq!(
            SceneTemplate::for_component(&generic),
            SceneTemplate::Styled("Header".to_string())
        );
        let bare = component("Spinner", "components/Spinner.jsx", false, true);
        assert_eq!(
            SceneTemplate::for_component(&bare),
            SceneTemplate::Bare("Spinner".to_string())
        );
        let button = component("Button", "components/primitives/Button.jsx", false, false);
        assert_eq!(SceneTemplate::for_component(&button), SceneTemplate::Button);
    }

    #[test]
    fn test_rendered_bodies() {
        assert_eq!(
            SceneTemplate::Styled("Header".to_string()).render(),
            "\n      <Header style={{}} />\n    "
        );
        assert_eq!(
            SceneTemplate::Button.render(),
            "\n      <Button style={{}} onClick={() => {}}>\n        Click Me\n      </Button>\n    "
        );
        assert_eq!(
            SceneTemplate::Verbatim("\n  <Old />\n".to_string()).render(),
            "\n  <Old />\n"
        );
    }

    #[test]
    fn test_app_preview_mentions_routes() {
        let body = SceneTemplate::App.render();
        assert!(body.starts_with("\n      <>\n"));
        assert!(body.contains("<li>/portfolio/:slug → CaseStudyDetail</li>"));
        assert!(body.ends_with("      </>\n    "));
    }
}
