//! Typed deep merge.
//!
//! Options records are trees of `Option` fields. Merging walks both trees
//! together:
//!
//! - a record merged with a record recurses field by field;
//! - an absent overlay value (`None`, or `null` in untyped JSON) never
//!   overwrites the base;
//! - any other value, including a whole `Vec`, replaces the base outright.
//!
//! [`deep_merge`] leaves the base untouched and returns a new value;
//! [`merge_into`] rewrites the base in place for callers that no longer
//! need the original.
//!
//! ```
//! use neighbor_theme::merge::deep_merge;
//! use serde_json::json;
//!
//! let merged = deep_merge(&json!({"a": {"b": 1, "c": 2}}), json!({"a": {"b": 9}}));
//! assert_eq!(merged, json!({"a": {"b": 9, "c": 2}}));
//! ```

use std::collections::BTreeMap;

use serde_json::Value;

/// Combines an overlay onto `self`, overlay values winning.
///
/// The overlay type defaults to `Self`. Resolved theme records also accept
/// their partial options record as an overlay.
pub trait Merge<Overlay = Self> {
    /// Merges `overlay` into `self`.
    fn merge_from(&mut self, overlay: Overlay);
}

/// Returns a fresh value with `overlay` merged onto a copy of `base`.
pub fn deep_merge<T>(base: &T, overlay: T) -> T
where
    T: Merge + Clone,
{
    let mut merged = base.clone();
    merged.merge_from(overlay);
    merged
}

/// Merges `overlay` onto `base` without copying it first.
pub fn merge_into<T, O>(base: &mut T, overlay: O)
where
    T: Merge<O>,
{
    base.merge_from(overlay);
}

impl<T: Merge> Merge for Option<T> {
    fn merge_from(&mut self, overlay: Self) {
        let Some(overlay) = overlay else {
            return;
        };
        match self {
            Some(base) => base.merge_from(overlay),
            None => *self = Some(overlay),
        }
    }
}

impl<T> Merge for Vec<T> {
    fn merge_from(&mut self, overlay: Self) {
        *self = overlay;
    }
}

impl<K: Ord, V: Merge> Merge for BTreeMap<K, V> {
    fn merge_from(&mut self, overlay: Self) {
        for (key, value) in overlay {
            match self.get_mut(&key) {
                Some(base) => base.merge_from(value),
                None => {
                    self.insert(key, value);
                }
            }
        }
    }
}

impl Merge for Value {
    fn merge_from(&mut self, overlay: Self) {
        match (self, overlay) {
            (_, Value::Null) => {}
            (Value::Object(base), Value::Object(overlay)) => {
                for (key, value) in overlay {
                    if value.is_null() {
                        continue;
                    }
                    match base.get_mut(&key) {
                        Some(slot) => slot.merge_from(value),
                        None => {
                            base.insert(key, value);
                        }
                    }
                }
            }
            (base, overlay) => *base = overlay,
        }
    }
}

/// Implements [`Merge`] as plain replacement for leaf types.
macro_rules! replace_on_merge {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::merge::Merge for $ty {
                fn merge_from(&mut self, overlay: Self) {
                    *self = overlay;
                }
            }
        )*
    };
}

/// Implements field-wise [`Merge`] for an options record whose fields all
/// implement `Merge` themselves.
macro_rules! merge_fields {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::merge::Merge for $ty {
            fn merge_from(&mut self, overlay: Self) {
                $( $crate::merge::Merge::merge_from(&mut self.$field, overlay.$field); )*
            }
        }
    };
}

pub(crate) use {merge_fields, replace_on_merge};

replace_on_merge!(bool, u16, u32, f64, String);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Inner {
        b: Option<u32>,
        c: Option<u32>,
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Outer {
        a: Option<Inner>,
        list: Option<Vec<u32>>,
        label: Option<String>,
    }

    merge_fields!(Inner { b, c });
    merge_fields!(Outer { a, list, label });

    #[test]
    fn test_nested_records_recurse() {
        let base = Outer {
            a: Some(Inner {
                b: Some(1),
                c: Some(2),
            }),
            ..Outer::default()
        };
        let overlay = Outer {
            a: Some(Inner {
                b: Some(9),
                c: None,
            }),
            ..Outer::default()
        };
        let merged = deep_merge(&base, overlay);
        assert_eq!(
            merged.a,
            Some(Inner {
                b: Some(9),
                c: Some(2)
            })
        );
        assert_eq!(base.a.unwrap().b, Some(1));
    }

    #[test]
    fn test_vectors_are_replaced() {
        let base = Outer {
            list: Some(vec![1, 2]),
            ..Outer::default()
        };
        let overlay = Outer {
            list: Some(vec![3]),
            ..Outer::default()
        };
        assert_eq!(deep_merge(&base, overlay).list, Some(vec![3]));
    }

    #[test]
    fn test_absent_values_do_not_overwrite() {
        let mut base = Outer {
            label: Some("base".into()),
            ..Outer::default()
        };
        merge_into(&mut base, Outer::default());
        assert_eq!(base.label.as_deref(), Some("base"));
    }

    #[test]
    fn test_json_objects_merge_and_arrays_replace() {
        let merged = deep_merge(&json!({"a": {"b": 1, "c": 2}}), json!({"a": {"b": 9}}));
        assert_eq!(merged, json!({"a": {"b": 9, "c": 2}}));

        let merged = deep_merge(&json!({"a": [1, 2]}), json!({"a": [3]}));
        assert_eq!(merged, json!({"a": [3]}));
    }

    #[test]
    fn test_json_null_is_absent() {
        let merged = deep_merge(&json!({"a": 1, "b": 2}), json!({"a": null, "c": 3}));
        assert_eq!(merged, json!({"a": 1, "b": 2, "c": 3}));
    }

    #[test]
    fn test_json_scalar_replaces_record() {
        let merged = deep_merge(&json!({"a": {"b": 1}}), json!({"a": "flat"}));
        assert_eq!(merged, json!({"a": "flat"}));
    }

    #[test]
    fn test_maps_merge_per_key() {
        let mut base = BTreeMap::from([("xs".to_string(), 0.0), ("sm".to_string(), 600.0)]);
        merge_into(&mut base, BTreeMap::from([("sm".to_string(), 640.0)]));
        assert_eq!(base["sm"], 640.0);
        assert_eq!(base["xs"], 0.0);
    }
}
