use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use storyboard_types::{ComponentRecord, SceneRecord};

use crate::parser::{PriorStoryboard, referenced_components};

/// Switches that decide how a previous storyboard is merged with a fresh scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileOptions {
    /// Keep positions of scenes from the previous output
    pub preserve_existing: bool,
    /// Drop scenes whose component no longer exists
    pub prune: bool,
    /// Report components whose scene is missing from the previous output
    pub force_regen_missing: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            preserve_existing: true,
            prune: true,
            force_regen_missing: true,
        }
    }
}

/// A prior scene re-associated with a live component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundScene {
    pub component: String,
    pub scene: SceneRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrunedScene {
    pub id: String,
    pub component: String,
}

/// Result of merging discovered components with the prior storyboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// Prior scenes bound to live components, in discovery order
    pub kept: Vec<BoundScene>,
    /// Orphans that stay in the storyboard, in prior file order
    pub retained: Vec<SceneRecord>,
    /// Names of components that still need a position, in discovery order
    pub pending: Vec<String>,
    pub pruned: Vec<PrunedScene>,
    /// Orphans dropped because their component already owns another scene
    pub superseded: Vec<String>,
    /// Components whose derived id was absent from the prior output
    pub missing: Vec<String>,
    /// Prior import lines still needed by retained orphans
    pub retained_imports: Vec<String>,
}

impl ReconcilePlan {
    pub fn kept_scene(&self, component: &str) -> Option<&SceneRecord> {
        self.kept
            .iter()
            .find(|bound| bound.component == component)
            .map(|bound| &bound.scene)
    }
}

/// Decide, for every discovered component and every prior scene, whether it is
/// kept, retained, pruned, or still needs placement.
pub fn reconcile(
    components: &[ComponentRecord],
    prior: PriorStoryboard,
    options: &ReconcileOptions,
) -> ReconcilePlan {
    let mut plan = ReconcilePlan::default();

    if options.force_regen_missing {
        for component in components {
            let expected = component.scene_id();
            if prior.get(&expected).is_none() {
                tracing::info!(
                    component = %component.name,
                    scene = %expected,
                    "component has no scene yet, will generate one"
                );
                plan.missing.push(component.name.clone());
            }
        }
    }

    let prior = if options.preserve_existing {
        prior
    } else {
        if !prior.is_empty() {
            tracing::info!(
                scenes = prior.len(),
                "ignoring existing scene positions, creating a fresh storyboard"
            );
        }
        PriorStoryboard::default()
    };

    let mut claims: Vec<Option<usize>> = vec![None; components.len()];
    let mut claimed = vec![false; prior.scenes.len()];

    // Derived id first, so a name match never steals another component's scene
    for (idx, component) in components.iter().enumerate() {
        let expected = component.scene_id();
        let found = prior
            .scenes
            .iter()
            .enumerate()
            .find(|(i, scene)| !claimed[*i] && scene.id.eq_ignore_ascii_case(&expected));
        if let Some((i, _)) = found {
            claimed[i] = true;
            claims[idx] = Some(i);
        }
    }

    // Derived ids already owned through an id match
    let owned: HashSet<String> = components
        .iter()
        .zip(&claims)
        .filter(|(_, claim)| claim.is_some())
        .map(|(component, _)| component.scene_id())
        .collect();

    for (idx, component) in components.iter().enumerate() {
        if claims[idx].is_some() {
            continue;
        }
        let found = prior.scenes.iter().enumerate().find(|(i, scene)| {
            !claimed[*i] && scene.component_name.as_deref() == Some(component.name.as_str())
        });
        if let Some((i, scene)) = found {
            tracing::debug!(
                component = %component.name,
                scene = %scene.id,
                "adopting scene by component name"
            );
            claimed[i] = true;
            claims[idx] = Some(i);
        }
    }

    let live: HashSet<&str> = components.iter().map(|c| c.name.as_str()).collect();

    for (component, claim) in components.iter().zip(&claims) {
        match claim {
            Some(i) => {
                let mut scene = prior.scenes[*i].clone();
                let expected = component.scene_id();
                // Names differing only in case share a derived id; the adopted scene keeps its own
                if scene.id.eq_ignore_ascii_case(&expected) || !owned.contains(&expected) {
                    scene.id = expected;
                }
                scene.component_name = Some(component.name.clone());
                tracing::debug!(
                    component = %component.name,
                    scene = %scene.id,
                    position = %scene.scene_box,
                    "keeping existing scene"
                );
                plan.kept.push(BoundScene {
                    component: component.name.clone(),
                    scene,
                });
            }
            None => plan.pending.push(component.name.clone()),
        }
    }

    for (scene, _) in prior
        .scenes
        .iter()
        .zip(&claimed)
        .filter(|(_, claimed)| !**claimed)
    {
        match scene.component_name.as_deref() {
            None => {
                tracing::info!(scene = %scene.id, "preserving scene (could not identify component)");
                plan.retained.push(scene.clone());
            }
            Some(name) if live.contains(name) => {
                tracing::info!(
                    scene = %scene.id,
                    component = name,
                    "dropping duplicate scene, component already has one"
                );
                plan.superseded.push(scene.id.clone());
            }
            Some(name) if options.prune => {
                tracing::info!(
                    scene = %scene.id,
                    component = name,
                    "pruning scene for removed component"
                );
                plan.pruned.push(PrunedScene {
                    id: scene.id.clone(),
                    component: name.to_string(),
                });
            }
            Some(name) => {
                tracing::info!(
                    scene = %scene.id,
                    component = name,
                    "keeping scene for removed component (pruning disabled)"
                );
                plan.retained.push(scene.clone());
            }
        }
    }

    plan.retained_imports = retained_imports(&prior, &plan.retained, &live);
    plan
}

/// Import lines of the prior file for components that retained orphans
/// still render and no live component provides.
fn retained_imports(
    prior: &PriorStoryboard,
    retained: &[SceneRecord],
    live: &HashSet<&str>,
) -> Vec<String> {
    let referenced: HashSet<String> = retained
        .iter()
        .flat_map(|scene| referenced_components(&scene.body))
        .collect();

    prior
        .imports
        .iter()
        .filter(|import| referenced.contains(&import.name) && !live.contains(import.name.as_str()))
        .map(|import| import.line.clone())
        .collect()
}
