// Engine module - reconciliation, layout and serialization of the storyboard
// This layer sits between the scanner's component records and the runtime's file IO

pub mod emit;
pub mod layout;
pub mod parser;
pub mod reconcile;

pub use emit::{SceneTemplate, import_line, render_storyboard};
pub use layout::{LayoutResult, LayoutSettings, PlacedScene, Relocation, SceneOrigin, place};
pub use parser::{ImportLine, PriorStoryboard, parse_storyboard};
pub use reconcile::{BoundScene, PrunedScene, ReconcileOptions, ReconcilePlan, reconcile};

use storyboard_types::ComponentRecord;

// Façade API - Stable public interface for the runtime layer

/// Everything one generation pass produces
#[derive(Debug, Clone)]
pub struct Generation {
    pub plan: ReconcilePlan,
    pub layout: LayoutResult,
    pub text: String,
}

/// Merge `components` with the previous storyboard text (if any), lay out
/// new scenes and render the result.
pub fn generate(
    components: &[ComponentRecord],
    previous: Option<&str>,
    options: &ReconcileOptions,
    settings: &LayoutSettings,
    import_prefix: &str,
) -> Generation {
    let prior = previous.map(parse_storyboard).unwrap_or_default();
    let plan = reconcile(components, prior, options);
    let layout = place(&plan, components, settings);
    let text = render_storyboard(
        &layout.scenes,
        components,
        import_prefix,
        &plan.retained_imports,
    );
    Generation { plan, layout, text }
}
