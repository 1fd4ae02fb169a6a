//! Custom assertions over generated storyboard text.
//!
//! Provides high-level assertions that make tests more readable:
//! - Scene position checks
//! - Scene id uniqueness
//! - Import presence

use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashSet};
use storyboard_engine::parse_storyboard;

/// Scene id -> (left, top) for every scene in the text.
pub fn scene_positions(text: &str) -> BTreeMap<String, (i64, i64)> {
    parse_storyboard(text)
        .scenes
        .into_iter()
        .map(|scene| (scene.id, (scene.scene_box.left, scene.scene_box.top)))
        .collect()
}

/// Scene ids in file order.
pub fn scene_ids(text: &str) -> Vec<String> {
    parse_storyboard(text)
        .scenes
        .into_iter()
        .map(|scene| scene.id)
        .collect()
}

/// Assert that a scene exists at the given position.
pub fn assert_scene_at(text: &str, id: &str, left: i64, top: i64) -> Result<()> {
    let positions = scene_positions(text);
    let actual = positions
        .get(id)
        .with_context(|| format!("Scene {} not found in {:?}", id, positions.keys()))?;

    if *actual != (left, top) {
        anyhow::bail!(
            "Scene {} is at {:?}, expected ({}, {})",
            id,
            actual,
            left,
            top
        );
    }
    Ok(())
}

/// Assert that no scene with the id exists.
pub fn assert_no_scene(text: &str, id: &str) -> Result<()> {
    if scene_positions(text).contains_key(id) {
        anyhow::bail!("Scene {} should not be present", id);
    }
    Ok(())
}

/// Assert that the `id='...'` attribute of every scene block is unique.
pub fn assert_unique_scene_ids(text: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for line in text.lines() {
        let Some(id) = line.trim().strip_prefix("id='") else {
            continue;
        };
        let id = id.trim_end_matches('\'');
        if !seen.insert(id.to_string()) {
            anyhow::bail!("Scene id {} appears more than once", id);
        }
    }
    Ok(())
}

/// Assert that the storyboard imports the component.
pub fn assert_imports(text: &str, component: &str) -> Result<()> {
    let named = format!("import {{ {} }} from ", component);
    let default = format!("import {} from ", component);
    let found = text
        .lines()
        .any(|line| line.starts_with(&named) || line.starts_with(&default));

    if !found {
        anyhow::bail!("Expected an import for {}", component);
    }
    Ok(())
}
