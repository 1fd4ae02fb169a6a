use std::collections::HashSet;
use std::path::PathBuf;
use storyboard_engine::{
    LayoutSettings, ReconcileOptions, SceneOrigin, generate, parse_storyboard,
};
use storyboard_types::{Category, ComponentRecord, Dimensions};

fn record(name: &str, path: &str, category: Category) -> ComponentRecord {
    let sub_folder = match category {
        Category::SubfolderComponent => path.split('/').nth(1).unwrap_or_default().to_string(),
        _ => String::new(),
    };
    ComponentRecord {
        name: name.to_string(),
        relative_path: path.to_string(),
        full_path: PathBuf::from("/project/src").join(path),
        category,
        sub_folder,
        accepts_external_style: false,
        default_export: false,
        dimensions: None,
    }
}

fn portfolio() -> Vec<ComponentRecord> {
    let mut header = record("Header", "components/Header.jsx", Category::Component);
    header.accepts_external_style = true;
    header.dimensions = Some(Dimensions::new(800, 80));

    let mut spinner = record("Spinner", "components/Spinner.jsx", Category::Component);
    spinner.default_export = true;
    spinner.dimensions = Some(Dimensions::new(16, 16));

    let mut tag = record("Tag", "components/primitives/Tag.jsx", Category::SubfolderComponent);
    tag.accepts_external_style = true;
    tag.dimensions = Some(Dimensions::new(110, 44));

    let mut about = record("AboutPage", "pages/AboutPage.jsx", Category::Page);
    about.default_export = true;

    vec![header, spinner, tag, about]
}

fn run(components: &[ComponentRecord], previous: Option<&str>, options: &ReconcileOptions) -> String {
    generate(
        components,
        previous,
        options,
        &LayoutSettings::default(),
        "../src",
    )
    .text
}

fn position(text: &str, id: &str) -> Option<(i64, i64)> {
    parse_storyboard(text)
        .get(id)
        .map(|scene| (scene.scene_box.left, scene.scene_box.top))
}

#[test]
fn test_fresh_storyboard_text() {
    let text = run(&portfolio(), None, &ReconcileOptions::default());
    insta::assert_snapshot!(text, @r#"
import * as React from 'react'
import { Scene, Storyboard } from 'utopia-api'
import { Header } from '../src/components/Header'
import Spinner from '../src/components/Spinner'
import { Tag } from '../src/components/primitives/Tag'
import AboutPage from '../src/pages/AboutPage'

export var storyboard = (
  <Storyboard>
    <Scene
      id='header-scene'
      commentId='header-scene'
      style={{
        width: 800,
        height: 80,
        position: 'absolute',
        left: 212,
        top: 1584,
      }}
      data-label='Header'
    >
      <Header style={{}} />
    </Scene>
    <Scene
      id='spinner-scene'
      commentId='spinner-scene'
      style={{
        width: 16,
        height: 16,
        position: 'absolute',
        left: 212,
        top: 1884,
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
    <Scene
      id='aboutpage-scene'
      commentId='aboutpage-scene'
      style={{
        width: 700,
        height: 700,
        position: 'absolute',
        left: 212,
        top: 128,
      }}
      data-label='AboutPage'
    >
      <AboutPage />
    </Scene>
  </Storyboard>
)
"#);
}

#[test]
fn test_second_run_is_byte_identical() {
    let components = portfolio();
    let options = ReconcileOptions::default();
    let first = run(&components, None, &options);
    let second = run(&components, Some(&first), &options);
    assert_eq!(first, second);
}

#[test]
fn test_manual_positions_survive() {
    let components = portfolio();
    let options = ReconcileOptions::default();
    let first = run(&components, None, &options);

    let edited = first.replace("left: 1148,", "left: 4000,");
    let second = run(&components, Some(&edited), &options);
    assert_eq!(position(&second, "tag-scene"), Some((4000, 1584)));
}

#[test]
fn test_prune_with_and_without_flag() {
    let mut components = portfolio();
    components.push(record("Legacy", "components/Legacy.jsx", Category::Component));
    let first = run(&components, None, &ReconcileOptions::default());
    assert!(position(&first, "legacy-scene").is_some());

    components.pop();
    let pruned = run(&components, Some(&first), &ReconcileOptions::default());
    assert_eq!(position(&pruned, "legacy-scene"), None);
    assert!(!pruned.contains("import { Legacy }"));

    let options = ReconcileOptions {
        prune: false,
        ..ReconcileOptions::default()
    };
    let kept = run(&components, Some(&first), &options);
    assert_eq!(position(&kept, "legacy-scene"), position(&first, "legacy-scene"));
    assert!(kept.contains("import { Legacy } from '../src/components/Legacy'\n"));
    assert!(kept.contains("      <Legacy />\n    </Scene>"));
}

#[test]
fn test_compaction_after_removed_page() {
    let pages = vec![
        record("Home", "pages/Home.jsx", Category::Page),
        record("Work", "pages/Work.jsx", Category::Page),
        record("Contact", "pages/Contact.jsx", Category::Page),
    ];
    let first = run(&pages, None, &ReconcileOptions::default());
    assert_eq!(position(&first, "home-scene"), Some((212, 128)));
    assert_eq!(position(&first, "work-scene"), Some((1028, 128)));
    assert_eq!(position(&first, "contact-scene"), Some((1844, 128)));

    let spread = first.replace("left: 1844,", "left: 3000,");
    let remaining = vec![pages[0].clone(), pages[2].clone()];
    let generation = generate(
        &remaining,
        Some(&spread),
        &ReconcileOptions::default(),
        &LayoutSettings::default(),
        "../src",
    );

    assert_eq!(position(&generation.text, "home-scene"), Some((212, 128)));
    assert_eq!(position(&generation.text, "contact-scene"), Some((1028, 128)));
    assert_eq!(position(&generation.text, "work-scene"), None);
    assert_eq!(generation.layout.relocations.len(), 1);
    assert_eq!(generation.layout.relocations[0].from, (3000, 128));
}

#[test]
fn test_unresolvable_scene_is_preserved_verbatim() {
    let first = run(&portfolio(), None, &ReconcileOptions::default());
    let freeform = "    <Scene\n      id='notes-scene'\n      commentId='notes-scene'\n      style={{\n        width: 300,\n        height: 200,\n        position: 'absolute',\n        left: 5000,\n        top: 5000,\n      }}\n      data-label='Notes'\n    >\n      <div>Remember to add a footer</div>\n    </Scene>\n";
    let with_notes = first.replace("  </Storyboard>", &format!("{}  </Storyboard>", freeform));

    let generation = generate(
        &[],
        Some(&with_notes),
        &ReconcileOptions::default(),
        &LayoutSettings::default(),
        "../src",
    );
    assert_eq!(generation.plan.pruned.len(), 4);
    assert_eq!(generation.layout.scenes.len(), 1);
    assert_eq!(generation.layout.scenes[0].origin, SceneOrigin::Retained);
    assert!(generation.text.contains(freeform));
}

#[test]
fn test_no_preserve_rebuilds_positions() {
    let components = portfolio();
    let first = run(&components, None, &ReconcileOptions::default());
    let edited = first.replace("left: 1148,", "left: 4000,");

    let options = ReconcileOptions {
        preserve_existing: false,
        ..ReconcileOptions::default()
    };
    assert_eq!(run(&components, Some(&edited), &options), first);
}

#[test]
fn test_scene_ids_are_unique() {
    let components = vec![
        record("Card", "components/Card.jsx", Category::Component),
        record("CARD", "components/legacy/CARD.jsx", Category::SubfolderComponent),
        record("Home", "pages/Home.jsx", Category::Page),
    ];
    let options = ReconcileOptions::default();
    let first = generate(
        &components,
        None,
        &options,
        &LayoutSettings::default(),
        "../src",
    );

    let ids: Vec<&str> = first.layout.scenes.iter().map(|p| p.scene.id.as_str()).collect();
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len());
    assert_eq!(ids, vec!["card-scene", "card-scene-2", "home-scene"]);

    let second = run(&components, Some(&first.text), &options);
    assert_eq!(second, first.text);
}

#[test]
fn test_garbage_previous_output_is_empty_baseline() {
    let components = portfolio();
    let options = ReconcileOptions::default();
    let fresh = run(&components, None, &options);
    assert_eq!(run(&components, Some("}{ not a storyboard"), &options), fresh);
}
