//! Grouping order and display labels
//!
//! Settings are ordered by tree label, then group label, then discovery
//! sequence. Display transforms only change what is shown; sorting always
//! uses the raw labels.

use super::schema::SettingDescriptor;
use crate::config::TreeViewOptions;
use std::cmp::Ordering;

/// Total order over descriptors: tree, group, then sequence.
/// Labels compare byte by byte, so uppercase sorts before lowercase.
pub fn compare(a: &SettingDescriptor, b: &SettingDescriptor) -> Ordering {
    a.tree_label
        .cmp(&b.tree_label)
        .then_with(|| a.group_label.cmp(&b.group_label))
        .then_with(|| a.sequence.cmp(&b.sequence))
}

/// Sort descriptors into display order
pub fn order(mut descriptors: Vec<SettingDescriptor>) -> Vec<SettingDescriptor> {
    descriptors.sort_by(compare);
    descriptors
}

/// Part of `text` after its first underscore, or all of it when there is none
pub fn after_separator(text: &str) -> &str {
    text.split_once('_').map_or(text, |(_, rest)| rest)
}

/// Insert spaces between camel-case words.
///
/// A space goes before an uppercase letter followed by a lowercase one, and
/// before an uppercase letter preceded by a lowercase one. With `on_digits`
/// the same rules treat digits as word characters, so `Abc123DefGhi` becomes
/// `Abc 123 Def Ghi`. Text of two characters or fewer is returned unchanged.
pub fn split_camel_case(text: &str, on_digits: bool) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= 2 {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && starts_word(chars[i - 1], c, chars.get(i + 1).copied(), on_digits) {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

fn starts_word(prev: char, c: char, next: Option<char>, on_digits: bool) -> bool {
    if on_digits {
        let upper_then_word =
            c.is_ascii_uppercase() && next.is_some_and(|n| n.is_ascii_lowercase() || n.is_ascii_digit());
        let after_lower = prev.is_ascii_lowercase() && (c.is_ascii_uppercase() || c.is_ascii_digit());
        let upper_after_digit = prev.is_ascii_digit() && c.is_ascii_uppercase();
        upper_then_word || after_lower || upper_after_digit
    } else {
        let upper_then_lower = c.is_ascii_uppercase() && next.is_some_and(|n| n.is_ascii_lowercase());
        let upper_after_lower = prev.is_ascii_lowercase() && c.is_ascii_uppercase();
        upper_then_lower || upper_after_lower
    }
}

/// Applies the configured display transforms to labels
#[derive(Debug, Clone, Copy)]
pub struct LabelFormatter<'a> {
    options: &'a TreeViewOptions,
}

impl<'a> LabelFormatter<'a> {
    pub fn new(options: &'a TreeViewOptions) -> Self {
        Self { options }
    }

    /// Text of a navigation node
    pub fn tree_text(&self, tree_label: &str) -> String {
        if self.options.tree_sort_before_separator {
            after_separator(tree_label).to_string()
        } else {
            tree_label.to_string()
        }
    }

    /// Title of a group frame
    pub fn group_text(&self, group_label: &str) -> String {
        let text = if self.options.group_sort_before_separator {
            after_separator(group_label)
        } else {
            group_label
        };
        if self.options.camel_case_split_group_name {
            split_camel_case(text, self.options.camel_case_split_on_digits)
        } else {
            text.to_string()
        }
    }

    /// Text of a setting's row label
    pub fn label_text(&self, name: &str) -> String {
        if self.options.camel_case_split_label_name {
            split_camel_case(name, self.options.camel_case_split_on_digits)
        } else {
            name.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::value::{SettingValue, ValueType};
    use crate::view::settings::classify::WidgetPlan;

    fn descriptor(name: &str, tree: &str, group: &str, sequence: u32) -> SettingDescriptor {
        SettingDescriptor {
            name: name.to_string(),
            value: SettingValue::I32(0),
            value_type: ValueType::I32,
            wrapped: false,
            tree_label: tree.to_string(),
            group_label: group.to_string(),
            description: None,
            sequence,
            plan: WidgetPlan::FreeText,
        }
    }

    fn names(descriptors: &[SettingDescriptor]) -> Vec<&str> {
        descriptors.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_order_by_tree_group_sequence() {
        let sorted = order(vec![
            descriptor("Timeout", "Network", "Limits", 1),
            descriptor("Theme", "Display", "Default", 2),
            descriptor("Retries", "Network", "Limits", 0),
            descriptor("Proxy", "Network", "Address", 3),
        ]);
        assert_eq!(names(&sorted), vec!["Theme", "Proxy", "Retries", "Timeout"]);
    }

    #[test]
    fn test_sorting_uses_full_label_not_display_text() {
        let sorted = order(vec![
            descriptor("B", "2_Advanced", "", 0),
            descriptor("A", "1_General", "", 1),
        ]);
        assert_eq!(names(&sorted), vec!["A", "B"]);

        let options = TreeViewOptions {
            tree_sort_before_separator: true,
            ..TreeViewOptions::default()
        };
        let formatter = LabelFormatter::new(&options);
        assert_eq!(formatter.tree_text(&sorted[0].tree_label), "General");
    }

    #[test]
    fn test_labels_sort_by_byte_value() {
        let sorted = order(vec![
            descriptor("Mic", "audio", "", 0),
            descriptor("Level", "Zoom", "", 1),
            descriptor("Font", "Editor", "", 2),
        ]);
        assert_eq!(names(&sorted), vec!["Font", "Level", "Mic"]);
    }

    #[test]
    fn test_after_separator() {
        assert_eq!(after_separator("1_General"), "General");
        assert_eq!(after_separator("a_b_c"), "b_c");
        assert_eq!(after_separator("Plain"), "Plain");
    }

    #[test]
    fn test_split_camel_case() {
        assert_eq!(split_camel_case("MaxRetryCount", false), "Max Retry Count");
        assert_eq!(split_camel_case("HTTPServer", false), "HTTP Server");
        assert_eq!(split_camel_case("Abc123DefGhi", false), "Abc123 Def Ghi");
        assert_eq!(split_camel_case("Abc123DefGhi", true), "Abc 123 Def Ghi");
        assert_eq!(split_camel_case("Ab", false), "Ab");
        assert_eq!(split_camel_case("lower", false), "lower");
    }

    #[test]
    fn test_formatter_respects_toggles() {
        let options = TreeViewOptions {
            camel_case_split_label_name: false,
            group_sort_before_separator: true,
            ..TreeViewOptions::default()
        };
        let formatter = LabelFormatter::new(&options);
        assert_eq!(formatter.label_text("MaxRetryCount"), "MaxRetryCount");
        assert_eq!(formatter.group_text("1_ConnectionLimits"), "Connection Limits");
        assert_eq!(formatter.tree_text("1_Network"), "1_Network");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn descriptors_strategy() -> impl Strategy<Value = Vec<SettingDescriptor>> {
            prop::collection::vec(("[A-C]{1,2}", "[a-c]{0,2}"), 1..24).prop_map(|labels| {
                labels
                    .into_iter()
                    .enumerate()
                    .map(|(i, (tree, group))| {
                        descriptor(&format!("S{i}"), &tree, &group, i as u32)
                    })
                    .collect()
            })
        }

        proptest! {
            /// Ordering the same input twice, in any arrival order, gives the same sequence
            #[test]
            fn prop_order_is_deterministic(descriptors in descriptors_strategy()) {
                let first = order(descriptors.clone());
                let mut reversed = descriptors;
                reversed.reverse();
                let second = order(reversed);
                prop_assert_eq!(names(&first), names(&second));
            }

            /// Within a (tree, group) bucket descriptors keep discovery order
            #[test]
            fn prop_order_keeps_sequence_within_bucket(descriptors in descriptors_strategy()) {
                let sorted = order(descriptors);
                for pair in sorted.windows(2) {
                    prop_assert_ne!(compare(&pair[0], &pair[1]), Ordering::Greater);
                    if pair[0].tree_label == pair[1].tree_label
                        && pair[0].group_label == pair[1].group_label
                    {
                        prop_assert!(pair[0].sequence < pair[1].sequence);
                    }
                }
            }

            /// Splitting only inserts spaces
            #[test]
            fn prop_split_only_adds_spaces(text in "[A-Za-z0-9]{0,16}", on_digits in any::<bool>()) {
                let split = split_camel_case(&text, on_digits);
                prop_assert_eq!(split.replace(' ', ""), text);
            }
        }
    }
}
