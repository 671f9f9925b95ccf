//! Type classification
//!
//! Maps a property's declared store type to the kind of editor that can
//! represent every value of that type.

use crate::config::TreeViewOptions;
use crate::model::fonts::FontCatalog;
use crate::model::value::ValueType;
use crate::source::StoreType;

/// Numeric spinner constraints, in whole units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinnerPlan {
    pub min: i128,
    pub max: i128,
    pub step: i128,
    pub decimal_places: u32,
}

/// The editor chosen for a setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetPlan {
    Toggle,
    Spinner(SpinnerPlan),
    EnumPicker {
        options: Vec<String>,
        requires_color_swatch: bool,
    },
    FontPicker {
        options: Vec<String>,
    },
    FreeText,
    /// The setting cannot be edited and is left out of the view
    Unsupported {
        reason: String,
    },
}

impl WidgetPlan {
    pub fn is_supported(&self) -> bool {
        !matches!(self, WidgetPlan::Unsupported { .. })
    }
}

/// Classify a declared store type.
///
/// Wrapped values are classified by their inner type, except that a wrapper
/// around a type with no known editor is unsupported rather than free text.
pub fn classify(
    store_type: &StoreType,
    options: &TreeViewOptions,
    fonts: &dyn FontCatalog,
) -> WidgetPlan {
    match store_type {
        StoreType::Plain { value_type } => classify_value(value_type, options, fonts),
        StoreType::Option {
            inner: ValueType::Other { name },
        } => WidgetPlan::Unsupported {
            reason: format!("Option<{name}> has no editor"),
        },
        StoreType::Option { inner } => classify_value(inner, options, fonts),
        StoreType::Generic { name } => WidgetPlan::Unsupported {
            reason: format!("generic type {name} is not editable"),
        },
    }
}

/// Classify a value type
pub fn classify_value(
    value_type: &ValueType,
    options: &TreeViewOptions,
    fonts: &dyn FontCatalog,
) -> WidgetPlan {
    match value_type {
        ValueType::I8
        | ValueType::I16
        | ValueType::I32
        | ValueType::I64
        | ValueType::U8
        | ValueType::U16
        | ValueType::U32
        | ValueType::U64 => {
            let (min, max) = value_type.integer_bounds().unwrap_or((0, 0));
            WidgetPlan::Spinner(SpinnerPlan {
                min,
                max,
                step: 1,
                decimal_places: 0,
            })
        }
        // Floating domains have no natural bounds; use the i64 range
        ValueType::F32 | ValueType::F64 => WidgetPlan::Spinner(SpinnerPlan {
            min: i64::MIN as i128,
            max: i64::MAX as i128,
            step: 1,
            decimal_places: options.floating_point_decimal_places,
        }),
        ValueType::Bool => WidgetPlan::Toggle,
        ValueType::Enum(e) => WidgetPlan::EnumPicker {
            options: e.members.clone(),
            requires_color_swatch: e.is_named_color(),
        },
        ValueType::FontFamily => WidgetPlan::FontPicker {
            options: fonts.families(),
        },
        ValueType::Text | ValueType::Other { .. } => WidgetPlan::FreeText,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::color::named_color_type;
    use crate::model::fonts::FixedFontCatalog;
    use crate::model::value::EnumType;

    fn plain(value_type: ValueType) -> WidgetPlan {
        classify(
            &StoreType::Plain { value_type },
            &TreeViewOptions::default(),
            &FixedFontCatalog::default(),
        )
    }

    fn spinner(plan: WidgetPlan) -> SpinnerPlan {
        match plan {
            WidgetPlan::Spinner(s) => s,
            other => panic!("Expected spinner, got {other:?}"),
        }
    }

    #[test]
    fn test_integer_spinners_use_natural_bounds() {
        let cases = [
            (ValueType::I8, -127, 127),
            (ValueType::I16, -32_768, 32_767),
            (ValueType::I32, -2_147_483_648, 2_147_483_647),
            (ValueType::I64, i64::MIN as i128, i64::MAX as i128),
            (ValueType::U8, 0, 255),
            (ValueType::U16, 0, 65_535),
            (ValueType::U32, 0, 4_294_967_295),
            (ValueType::U64, 0, u64::MAX as i128),
        ];
        for (value_type, min, max) in cases {
            let plan = spinner(plain(value_type.clone()));
            assert_eq!((plan.min, plan.max), (min, max), "{value_type:?}");
            assert_eq!(plan.step, 1);
            assert_eq!(plan.decimal_places, 0);
        }
    }

    #[test]
    fn test_float_spinner_uses_configured_decimals() {
        let options = TreeViewOptions {
            floating_point_decimal_places: 3,
            ..TreeViewOptions::default()
        };
        let plan = classify_value(&ValueType::F32, &options, &FixedFontCatalog::default());
        let plan = spinner(plan);
        assert_eq!(plan.decimal_places, 3);
        assert_eq!(plan.min, i64::MIN as i128);
        assert_eq!(plan.max, i64::MAX as i128);
    }

    #[test]
    fn test_bool_is_toggle() {
        assert_eq!(plain(ValueType::Bool), WidgetPlan::Toggle);
    }

    #[test]
    fn test_enum_picker_lists_members() {
        let plan = plain(ValueType::Enum(EnumType::new("Level", ["Low", "High"])));
        assert_eq!(
            plan,
            WidgetPlan::EnumPicker {
                options: vec!["Low".to_string(), "High".to_string()],
                requires_color_swatch: false,
            }
        );
    }

    #[test]
    fn test_named_colors_need_swatch() {
        let plan = plain(ValueType::Enum(named_color_type()));
        assert!(matches!(
            plan,
            WidgetPlan::EnumPicker {
                requires_color_swatch: true,
                ..
            }
        ));
    }

    #[test]
    fn test_font_picker_lists_catalog() {
        let fonts = FixedFontCatalog::new(["Arial", "Consolas"]);
        let plan = classify_value(&ValueType::FontFamily, &TreeViewOptions::default(), &fonts);
        assert_eq!(
            plan,
            WidgetPlan::FontPicker {
                options: vec!["Arial".to_string(), "Consolas".to_string()]
            }
        );
    }

    #[test]
    fn test_other_plain_types_are_free_text() {
        let plan = plain(ValueType::Other {
            name: "DateTime".to_string(),
        });
        assert_eq!(plan, WidgetPlan::FreeText);
        assert_eq!(plain(ValueType::Text), WidgetPlan::FreeText);
    }

    #[test]
    fn test_unknown_wrapped_and_generic_types_are_unsupported() {
        let options = TreeViewOptions::default();
        let fonts = FixedFontCatalog::default();

        let wrapped = StoreType::Option {
            inner: ValueType::Other {
                name: "Point".to_string(),
            },
        };
        assert!(!classify(&wrapped, &options, &fonts).is_supported());

        let generic = StoreType::Generic {
            name: "List".to_string(),
        };
        assert!(!classify(&generic, &options, &fonts).is_supported());

        let wrapped_int = StoreType::Option {
            inner: ValueType::I32,
        };
        assert!(classify(&wrapped_int, &options, &fonts).is_supported());
    }
}
