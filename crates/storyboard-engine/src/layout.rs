use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use storyboard_types::{Category, ComponentRecord, Dimensions, SceneBox, SceneRecord};

use crate::reconcile::ReconcilePlan;

pub const PLAYGROUND: &str = "Playground";
pub const APP: &str = "App";

/// Canvas geometry used when placing new scenes and compacting the top row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Horizontal distance reserved per top-row scene
    pub spacing: i64,
    pub default_scene: Dimensions,
    pub top_row: i64,
    pub component_column_left: i64,
    pub component_column_top: i64,
    pub vertical_spacing: i64,
    pub sub_folder_column_left: i64,
    pub column_spacing: i64,
    /// Minimum free space kept before the next top-row scene when filling a gap
    pub gap_margin: i64,
    pub playground_size: Dimensions,
    pub playground_left: i64,
    pub app_size: Dimensions,
    /// App position when a Playground is present; without one it takes `playground_left`
    pub app_left: i64,
    pub app_label: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            spacing: 816,
            default_scene: Dimensions::new(700, 700),
            top_row: 128,
            component_column_left: 212,
            component_column_top: 1584,
            vertical_spacing: 220,
            sub_folder_column_left: 1148,
            column_spacing: 936,
            gap_margin: 20,
            playground_size: Dimensions::new(700, 759),
            playground_left: 212,
            app_size: Dimensions::new(744, 1133),
            app_left: 992,
            app_label: "My App".to_string(),
        }
    }
}

/// How a scene came to be in the final storyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneOrigin {
    /// Existing scene bound to a live component
    Kept,
    /// New scene for a pending component
    Placed,
    /// Orphan carried over from the previous output
    Retained,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedScene {
    pub scene: SceneRecord,
    pub origin: SceneOrigin,
    /// Live component the scene renders; `None` for retained orphans
    pub component: Option<String>,
    /// Position read from the previous output
    pub previous: Option<SceneBox>,
}

/// An existing scene that ended up somewhere else than the previous output had it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relocation {
    pub id: String,
    pub from: (i64, i64),
    pub to: (i64, i64),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutResult {
    /// Live scenes in discovery order, then retained orphans in prior order
    pub scenes: Vec<PlacedScene>,
    pub relocations: Vec<Relocation>,
    /// Scenes whose left changed during compaction, new ones included
    pub repositioned: usize,
}

/// Assign coordinates to every pending component, then compact the top row.
pub fn place(
    plan: &ReconcilePlan,
    components: &[ComponentRecord],
    settings: &LayoutSettings,
) -> LayoutResult {
    let mut layout = Layout::new(plan, components, settings);
    layout.place_anchors();
    layout.place_pages();
    layout.place_components();
    layout.place_sub_folders();
    layout.finish()
}

struct Layout<'a> {
    settings: &'a LayoutSettings,
    components: &'a [ComponentRecord],
    by_name: HashMap<&'a str, &'a ComponentRecord>,
    /// Positions for live components, keyed by name
    assigned: HashMap<String, PlacedScene>,
    retained: Vec<PlacedScene>,
    pending: Vec<&'a ComponentRecord>,
}

impl<'a> Layout<'a> {
    fn new(
        plan: &ReconcilePlan,
        components: &'a [ComponentRecord],
        settings: &'a LayoutSettings,
    ) -> Self {
        let by_name: HashMap<&str, &ComponentRecord> =
            components.iter().map(|c| (c.name.as_str(), c)).collect();

        let assigned = plan
            .kept
            .iter()
            .map(|bound| {
                let placed = PlacedScene {
                    scene: bound.scene.clone(),
                    origin: SceneOrigin::Kept,
                    component: Some(bound.component.clone()),
                    previous: Some(bound.scene.scene_box),
                };
                (bound.component.clone(), placed)
            })
            .collect();

        let retained = plan
            .retained
            .iter()
            .map(|scene| PlacedScene {
                scene: scene.clone(),
                origin: SceneOrigin::Retained,
                component: None,
                previous: Some(scene.scene_box),
            })
            .collect();

        let pending = plan
            .pending
            .iter()
            .filter_map(|name| by_name.get(name.as_str()).copied())
            .collect();

        Self {
            settings,
            components,
            by_name,
            assigned,
            retained,
            pending,
        }
    }

    fn all_scenes(&self) -> impl Iterator<Item = &PlacedScene> {
        self.assigned.values().chain(self.retained.iter())
    }

    fn is_top_row(&self, placed: &PlacedScene) -> bool {
        placed.scene.scene_box.top == self.settings.top_row
            || placed
                .component
                .as_deref()
                .and_then(|name| self.by_name.get(name))
                .is_some_and(|c| c.category == Category::Page)
    }

    fn take_pending(&mut self, predicate: impl Fn(&ComponentRecord) -> bool) -> Vec<&'a ComponentRecord> {
        let (taken, rest) = self.pending.iter().partition(|c| predicate(c));
        self.pending = rest;
        taken
    }

    fn assign(&mut self, component: &ComponentRecord, scene_box: SceneBox, label: String) {
        tracing::info!(
            component = %component.name,
            left = scene_box.left,
            top = scene_box.top,
            "added new scene"
        );
        let placed = PlacedScene {
            scene: SceneRecord {
                id: component.scene_id(),
                scene_box,
                label,
                component_name: Some(component.name.clone()),
                body: String::new(),
            },
            origin: SceneOrigin::Placed,
            component: Some(component.name.clone()),
            previous: None,
        };
        self.assigned.insert(component.name.clone(), placed);
    }

    fn size_of(&self, component: &ComponentRecord) -> Dimensions {
        component.dimensions.unwrap_or(self.settings.default_scene)
    }

    fn place_anchors(&mut self) {
        let settings = self.settings;
        let has_playground = self.by_name.contains_key(PLAYGROUND);

        for component in self.take_pending(|c| c.name == PLAYGROUND) {
            let scene_box =
                SceneBox::new(settings.playground_size, settings.playground_left, settings.top_row);
            self.assign(component, scene_box, PLAYGROUND.to_string());
        }

        for component in self.take_pending(|c| c.name == APP) {
            let left = if has_playground {
                settings.app_left
            } else {
                settings.playground_left
            };
            let scene_box = SceneBox::new(settings.app_size, left, settings.top_row);
            self.assign(component, scene_box, settings.app_label.clone());
        }
    }

    fn place_pages(&mut self) {
        let settings = self.settings;
        let pages = self.take_pending(|c| c.category == Category::Page);
        if pages.is_empty() {
            return;
        }

        let used: BTreeSet<i64> = self
            .all_scenes()
            .filter(|placed| self.is_top_row(placed))
            .map(|placed| placed.scene.scene_box.left)
            .collect();

        let mut gaps = find_gaps(&used, settings);
        if !gaps.is_empty() {
            tracing::debug!(gaps = gaps.len(), "found gaps between existing scenes");
        }
        let mut next_left = used.last().copied().unwrap_or(0).saturating_add(settings.spacing);

        for page in pages {
            let size = self.size_of(page);
            let fitting = gaps
                .iter()
                .position(|gap| gap.left + size.width + settings.gap_margin <= gap.end);

            let left = match fitting {
                Some(idx) => {
                    let gap = gaps.remove(idx);
                    tracing::debug!(component = %page.name, left = gap.left, "filling gap");
                    gap.left
                }
                None => {
                    let left = next_left;
                    next_left = next_left.saturating_add(settings.spacing);
                    left
                }
            };

            let scene_box = SceneBox::new(size, left, settings.top_row);
            self.assign(page, scene_box, page.name.clone());
        }
    }

    fn place_components(&mut self) {
        let settings = self.settings;
        let column = self.take_pending(|c| c.category == Category::Component);
        if column.is_empty() {
            return;
        }

        let mut top = self.column_cursor(settings.component_column_left);
        for component in column {
            let size = self.size_of(component);
            let scene_box = SceneBox::new(size, settings.component_column_left, top);
            top = scene_box.bottom().saturating_add(settings.vertical_spacing);
            self.assign(component, scene_box, component.name.clone());
        }
    }

    fn place_sub_folders(&mut self) {
        let settings = self.settings;

        let mut folders: Vec<&str> = Vec::new();
        for component in self.components {
            if component.category == Category::SubfolderComponent
                && !folders.contains(&component.sub_folder.as_str())
            {
                folders.push(component.sub_folder.as_str());
            }
        }

        for (index, folder) in folders.into_iter().enumerate() {
            let members = self.take_pending(|c| {
                c.category == Category::SubfolderComponent && c.sub_folder == folder
            });
            if members.is_empty() {
                continue;
            }

            let left = settings.sub_folder_column_left + index as i64 * settings.column_spacing;
            tracing::debug!(folder, left, "placing sub-folder column");

            let mut top = self.column_cursor(left);
            for component in members {
                let size = self.size_of(component);
                let scene_box = SceneBox::new(size, left, top);
                top = scene_box.bottom().saturating_add(settings.vertical_spacing);
                let label = format!("{} ({})", component.name, folder);
                self.assign(component, scene_box, label);
            }
        }
    }

    /// First free top in a column: the column top, or below its deepest scene.
    fn column_cursor(&self, left: i64) -> i64 {
        let settings = self.settings;
        self.all_scenes()
            .map(|placed| placed.scene.scene_box)
            .filter(|b| b.left == left && b.top >= settings.component_column_top)
            .map(|b| b.bottom().saturating_add(settings.vertical_spacing))
            .fold(settings.component_column_top, i64::max)
    }

    fn finish(mut self) -> LayoutResult {
        let repositioned = self.compact();

        let mut scenes = Vec::with_capacity(self.assigned.len() + self.retained.len());
        for component in self.components {
            if let Some(placed) = self.assigned.remove(&component.name) {
                scenes.push(placed);
            }
        }
        scenes.append(&mut self.retained);
        dedup_ids(&mut scenes);

        let relocations: Vec<Relocation> = scenes
            .iter()
            .filter_map(|placed| {
                let before = placed.previous?;
                let after = placed.scene.scene_box;
                ((before.left, before.top) != (after.left, after.top)).then(|| Relocation {
                    id: placed.scene.id.clone(),
                    from: (before.left, before.top),
                    to: (after.left, after.top),
                })
            })
            .collect();

        for relocation in &relocations {
            tracing::info!(
                scene = %relocation.id,
                from = ?relocation.from,
                to = ?relocation.to,
                "relocated scene"
            );
        }

        LayoutResult {
            scenes,
            relocations,
            repositioned,
        }
    }

    /// Close gaps in the top row: anchors go to their fixed slots, every other
    /// top-row scene follows one spacing unit apart in left order.
    fn compact(&mut self) -> usize {
        let settings = self.settings;

        let mut row: Vec<(i64, RowSlot)> = Vec::new();
        for (name, placed) in &self.assigned {
            if self.is_top_row(placed) {
                row.push((placed.scene.scene_box.left, RowSlot::Live(name.clone())));
            }
        }
        for (index, placed) in self.retained.iter().enumerate() {
            if self.is_top_row(placed) {
                row.push((placed.scene.scene_box.left, RowSlot::Retained(index)));
            }
        }
        // Live scenes in discovery order, orphans after, so ties sort stably
        let order: HashMap<&str, usize> = self
            .components
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.as_str(), i))
            .collect();
        row.sort_by_key(|(left, slot)| {
            let rank = match slot {
                RowSlot::Live(name) => order.get(name.as_str()).copied().unwrap_or(usize::MAX),
                RowSlot::Retained(index) => self.components.len() + index,
            };
            (*left, rank)
        });

        let slots: Vec<RowSlot> = row.into_iter().map(|(_, slot)| slot).collect();
        let kinds: Vec<Anchor> = slots.iter().map(|slot| self.anchor_kind(slot)).collect();

        let mut cursor = settings.playground_left;
        let has_playground = kinds.contains(&Anchor::Playground);
        let mut moved = 0;

        if let Some(idx) = kinds.iter().position(|k| *k == Anchor::Playground) {
            moved += self.move_to(&slots[idx], settings.playground_left);
            cursor = settings.playground_left + settings.spacing;
        }
        if let Some(idx) = kinds.iter().position(|k| *k == Anchor::App) {
            let left = if has_playground {
                settings.app_left
            } else {
                settings.playground_left
            };
            moved += self.move_to(&slots[idx], left);
            cursor = left + settings.spacing;
        }

        for (slot, kind) in slots.iter().zip(&kinds) {
            if *kind != Anchor::None {
                continue;
            }
            moved += self.move_to(slot, cursor);
            cursor += settings.spacing;
        }

        if moved > 0 {
            tracing::info!(scenes = moved, "repositioned scenes to close gaps");
        } else {
            tracing::debug!("no scene repositioning needed");
        }
        moved
    }

    fn anchor_kind(&self, slot: &RowSlot) -> Anchor {
        let placed = match slot {
            RowSlot::Live(name) => &self.assigned[name],
            RowSlot::Retained(index) => &self.retained[*index],
        };
        let component = placed.component.as_deref();
        let label = placed.scene.label.as_str();

        if component == Some(PLAYGROUND) || label == PLAYGROUND {
            Anchor::Playground
        } else if component == Some(APP)
            || label == APP
            || label == self.settings.app_label
        {
            Anchor::App
        } else {
            Anchor::None
        }
    }

    /// Returns 1 when the scene actually moved.
    fn move_to(&mut self, slot: &RowSlot, left: i64) -> usize {
        let placed = match slot {
            RowSlot::Live(name) => self.assigned.get_mut(name),
            RowSlot::Retained(index) => self.retained.get_mut(*index),
        };
        let Some(placed) = placed else { return 0 };

        let from = placed.scene.scene_box.left;
        if from == left {
            return 0;
        }
        tracing::debug!(scene = %placed.scene.id, from, to = left, "repositioning scene");
        placed.scene.scene_box.left = left;
        1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RowSlot {
    Live(String),
    Retained(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Playground,
    App,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Gap {
    left: i64,
    /// Left of the next occupied slot
    end: i64,
}

/// Later scenes sharing an id get a numeric suffix (`card-scene-2`).
fn dedup_ids(scenes: &mut [PlacedScene]) {
    let mut taken: HashSet<String> = scenes.iter().map(|p| p.scene.id.clone()).collect();
    let mut seen = HashSet::new();

    for placed in scenes.iter_mut() {
        if seen.insert(placed.scene.id.clone()) {
            continue;
        }
        let mut n = 2;
        let id = loop {
            let candidate = format!("{}-{}", placed.scene.id, n);
            if !taken.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        tracing::warn!(scene = %placed.scene.id, renamed = %id, "scene id already in use");
        taken.insert(id.clone());
        seen.insert(id.clone());
        placed.scene.id = id;
    }
}

/// Free top-row slots between consecutive occupied positions.
fn find_gaps(used: &BTreeSet<i64>, settings: &LayoutSettings) -> Vec<Gap> {
    let positions: Vec<i64> = used.iter().copied().collect();
    let mut gaps = Vec::new();
    if settings.spacing <= 0 {
        return gaps;
    }

    for pair in positions.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let width = end.saturating_sub(start);
        if width < settings.spacing {
            continue;
        }
        for j in 0..width / settings.spacing {
            let left = start + settings.spacing * (j + 1);
            if left + settings.default_scene.width + settings.gap_margin <= end {
                gaps.push(Gap { left, end });
            }
        }
    }

    gaps
}
