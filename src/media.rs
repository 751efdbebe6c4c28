//! Media descriptors: locator parsing, classification, metadata
//! normalization and presentation order.

mod kind;
pub mod locator;
mod model;
mod normalize;
pub mod ordering;
mod placeholder;

pub use kind::{KindFilter, MediaKind};
pub use model::{Media, MediaHandle, MediaRecord};
pub use normalize::{MetaField, Metadata, Normalizer};
pub use placeholder::{BuiltinPlaceholders, Category, Placeholders};
