//! Installed font families
//!
//! The font picker lists every family the host reports. Hosts supply the
//! list through `FontCatalog`.

/// Source of the font families installed on the host
pub trait FontCatalog {
    /// All installed family names, in display order
    fn families(&self) -> Vec<String>;
}

/// A catalog backed by a fixed list of family names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedFontCatalog {
    families: Vec<String>,
}

impl FixedFontCatalog {
    /// Build a catalog, sorting names and dropping duplicates
    pub fn new(families: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut families: Vec<String> = families.into_iter().map(Into::into).collect();
        families.sort();
        families.dedup();
        Self { families }
    }
}

impl Default for FixedFontCatalog {
    fn default() -> Self {
        Self::new([
            "Arial",
            "Consolas",
            "Courier New",
            "DejaVu Sans",
            "DejaVu Sans Mono",
            "Georgia",
            "Liberation Mono",
            "Segoe UI",
            "Tahoma",
            "Times New Roman",
            "Verdana",
        ])
    }
}

impl FontCatalog for FixedFontCatalog {
    fn families(&self) -> Vec<String> {
        self.families.clone()
    }
}
