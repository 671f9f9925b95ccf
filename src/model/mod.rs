//! Setting value model
//!
//! Declared value types, concrete values, the "Option" wrapper and the
//! catalogs (colors, fonts) that pickers draw their options from.

pub mod color;
pub mod fonts;
pub mod option_wrapper;
pub mod value;

pub use fonts::{FixedFontCatalog, FontCatalog};
pub use option_wrapper::OptionWrapper;
pub use value::{ConversionError, EnumType, SettingValue, ValueType};
