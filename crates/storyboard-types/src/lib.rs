pub mod component;
pub mod scene;
mod util;

pub use component::*;
pub use scene::*;
pub use util::*;
