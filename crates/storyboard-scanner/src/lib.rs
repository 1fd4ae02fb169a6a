// Error types
pub mod error;

// Pure text heuristics (component kind, CSS lengths)
pub mod heuristics;

// Preview size inference
pub mod dimensions;

// Source tree walking and component extraction
pub mod discovery;

pub use dimensions::{Inference, InferenceError, SizeSource, infer_dimensions, infer_with_source};
pub use discovery::{
    COMPONENTS_SEGMENT, Candidate, ScanOptions, accepts_external_style, categorize,
    default_export_names, extract_components, has_ui_signal, scan_components,
};
pub use heuristics::{ComponentKind, SizeDefaults, classify_component, parse_style_value};

pub use error::{Error, Result};
