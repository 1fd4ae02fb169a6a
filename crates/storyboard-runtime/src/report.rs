use serde::Serialize;
use std::path::PathBuf;
use storyboard_engine::{Generation, PrunedScene, Relocation, SceneOrigin};

/// What one run did, for the summary printed by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub source_root: PathBuf,
    pub output: PathBuf,
    /// Components found by the scanner
    pub discovered: usize,
    /// Scenes kept from the previous output
    pub kept: usize,
    /// Scenes created in this run
    pub placed: Vec<String>,
    pub pruned: Vec<PrunedScene>,
    /// Orphan scenes carried over unchanged
    pub retained: Vec<String>,
    /// Duplicate scenes dropped because their component owns another one
    pub superseded: Vec<String>,
    pub relocated: Vec<Relocation>,
    /// Components that had no scene in the previous output
    pub missing: Vec<String>,
    pub written: bool,
    pub dry_run: bool,
}

impl RunReport {
    pub(crate) fn new(
        source_root: PathBuf,
        output: PathBuf,
        discovered: usize,
        generation: &Generation,
    ) -> Self {
        let ids_with = |origin: SceneOrigin| {
            generation
                .layout
                .scenes
                .iter()
                .filter(|placed| placed.origin == origin)
                .map(|placed| placed.scene.id.clone())
                .collect::<Vec<_>>()
        };

        Self {
            source_root,
            output,
            discovered,
            kept: generation.plan.kept.len(),
            placed: ids_with(SceneOrigin::Placed),
            pruned: generation.plan.pruned.clone(),
            retained: ids_with(SceneOrigin::Retained),
            superseded: generation.plan.superseded.clone(),
            relocated: generation.layout.relocations.clone(),
            missing: generation.plan.missing.clone(),
            written: false,
            dry_run: false,
        }
    }

    /// Nothing about the storyboard changed besides possibly new scenes
    pub fn is_clean(&self) -> bool {
        self.pruned.is_empty() && self.superseded.is_empty() && self.relocated.is_empty()
    }
}
