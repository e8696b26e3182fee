//! Circular "roulette" selection: pick one label from a flat list, or spin
//! down through nested categories to a leaf.

pub mod clock;
pub mod error;
pub mod geometry;
pub mod hover;
pub mod interaction;
mod macros;
pub mod options;
pub mod render;
pub mod spin;
pub mod text;
pub mod theme;
pub mod widget;

pub use error::{Error, Result};
pub use geometry::{Geometry, Point};
pub use interaction::{Hub, Interaction, Response, Schedule, Selection, Variant};
pub use options::{Label, OptionSet};
pub use render::{Surface, View};
pub use theme::{Font, ThemeColors};
pub use widget::{Roulette, RouletteOptions};
