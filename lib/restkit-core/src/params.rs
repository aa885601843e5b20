//! Projection of loosely-typed call-site data into ordered name/value pairs.
//!
//! Query parameters, headers, and path segments all start life as a
//! [`ToNameValues`] source: either a [`Params`] mapping the caller populates,
//! or a record type with an exporter impl (hand-written or generated with
//! [`export_params!`](crate::export_params)). There is no runtime reflection;
//! every source states its fields explicitly.
//!
//! # Example
//!
//! ```
//! use restkit_core::{Params, ToNameValues, export_params};
//!
//! struct Search {
//!     q: String,
//!     page: Option<u32>,
//!     tags: Vec<String>,
//! }
//! export_params!(Search { q, page, tags });
//!
//! let search = Search {
//!     q: "rust".to_string(),
//!     page: None,
//!     tags: vec!["http".to_string(), "client".to_string()],
//! };
//! let pairs = search.to_name_values().expect("project");
//! assert_eq!(pairs.len(), 2); // `page` is absent and skipped
//! assert_eq!(pairs[1].value.as_deref(), Some("http,client"));
//! ```

use crate::{Error, Result};

/// An ordered pair of a parameter name and its optional string value.
///
/// The name is never empty; an absent value means the parameter was present
/// but carried no value (a bare query key, or a mapping entry set to absent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameValue {
    /// Parameter name.
    pub name: String,
    /// Parameter value, or `None` when absent.
    pub value: Option<String>,
}

impl NameValue {
    /// Create a pair with a present value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Create a pair with an absent value.
    #[must_use]
    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

// ============================================================================
// Field value rendering
// ============================================================================

/// String rendering of a single parameter value.
///
/// `render` returns `None` when the value is absent: `Option::None`, or an
/// empty collection. Record projection skips absent fields entirely.
///
/// Ordered collections render as one comma-joined value. Nested types are
/// never expanded recursively; implement this trait (usually via `Display`)
/// to opt a custom type in.
pub trait ParamValue {
    /// Render the value to its string form, or `None` when absent.
    fn render(&self) -> Option<String>;
}

macro_rules! impl_param_value_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ParamValue for $ty {
                fn render(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )+
    };
}

impl_param_value_display!(
    bool, char, str, String, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32,
    f64,
);

impl<T: ParamValue + ?Sized> ParamValue for &T {
    fn render(&self) -> Option<String> {
        (**self).render()
    }
}

impl<T: ParamValue> ParamValue for Option<T> {
    fn render(&self) -> Option<String> {
        self.as_ref().and_then(ParamValue::render)
    }
}

impl<T: ParamValue> ParamValue for [T] {
    fn render(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let values: Vec<String> = self.iter().filter_map(ParamValue::render).collect();
        Some(values.join(","))
    }
}

impl<T: ParamValue> ParamValue for Vec<T> {
    fn render(&self) -> Option<String> {
        self.as_slice().render()
    }
}

impl<T: ParamValue, const N: usize> ParamValue for [T; N] {
    fn render(&self) -> Option<String> {
        self.as_slice().render()
    }
}

// ============================================================================
// Projection trait
// ============================================================================

/// Types that project into an ordered sequence of [`NameValue`] pairs.
///
/// Implemented by [`Params`] for mapping-shaped input and by record types via
/// [`export_params!`](crate::export_params) or a hand-written impl.
pub trait ToNameValues {
    /// Project into name/value pairs, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyParamName`] for a mapping entry with an empty
    /// name. Record exporters never fail.
    fn to_name_values(&self) -> Result<Vec<NameValue>>;

    /// Project, restricted to the named fields when `allowed` is non-empty.
    ///
    /// Mapping-shaped sources ([`Params`]) ignore the allow-list.
    ///
    /// # Errors
    ///
    /// Same contract as [`ToNameValues::to_name_values`].
    fn to_name_values_filtered(&self, allowed: &[&str]) -> Result<Vec<NameValue>> {
        let mut pairs = self.to_name_values()?;
        if !allowed.is_empty() {
            pairs.retain(|nv| allowed.contains(&nv.name.as_str()));
        }
        Ok(pairs)
    }
}

/// Insertion-ordered parameter mapping.
///
/// The mapping analogue of a record source: entries keep insertion order, and
/// a value may be explicitly absent (rendered as a bare query key, rejected
/// for headers and path segments).
///
/// # Example
///
/// ```
/// use restkit_core::Params;
///
/// let params = Params::new().set("page", 1).set("q", "c d");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Params {
    entries: Vec<(String, Option<String>)>,
}

impl Params {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. The value is stored absent when it renders absent
    /// (e.g. `Option::None`).
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl ParamValue) -> Self {
        self.entries.push((name.into(), value.render()));
        self
    }

    /// Append an entry with an explicitly absent value.
    #[must_use]
    pub fn set_absent(mut self, name: impl Into<String>) -> Self {
        self.entries.push((name.into(), None));
        self
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the mapping has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ToNameValues for Params {
    fn to_name_values(&self) -> Result<Vec<NameValue>> {
        self.entries
            .iter()
            .map(|(name, value)| {
                if name.is_empty() {
                    return Err(Error::EmptyParamName);
                }
                Ok(NameValue {
                    name: name.clone(),
                    value: value.clone(),
                })
            })
            .collect()
    }

    // Allow-lists only restrict record-shaped sources.
    fn to_name_values_filtered(&self, _allowed: &[&str]) -> Result<Vec<NameValue>> {
        self.to_name_values()
    }
}

/// Implements [`ToNameValues`] for a record type, exporting the listed fields
/// in the listed order.
///
/// Fields rendering absent (see [`ParamValue`]) are skipped; collections
/// render as a single comma-joined value.
///
/// # Example
///
/// ```
/// use restkit_core::{ToNameValues, export_params};
///
/// struct Paging {
///     page: u32,
///     per_page: Option<u32>,
/// }
/// export_params!(Paging { page, per_page });
/// ```
#[macro_export]
macro_rules! export_params {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::ToNameValues for $ty {
            fn to_name_values(
                &self,
            ) -> $crate::Result<::std::vec::Vec<$crate::NameValue>> {
                let mut pairs = ::std::vec::Vec::new();
                $(
                    if let ::std::option::Option::Some(value) =
                        $crate::ParamValue::render(&self.$field)
                    {
                        pairs.push($crate::NameValue::new(::std::stringify!($field), value));
                    }
                )+
                ::std::result::Result::Ok(pairs)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use assert2::let_assert;

    use super::*;
    use crate::Error;

    #[test]
    fn param_value_scalars() {
        assert_eq!(42_u32.render(), Some("42".to_string()));
        assert_eq!(true.render(), Some("true".to_string()));
        assert_eq!("text".render(), Some("text".to_string()));
        assert_eq!(2.5_f64.render(), Some("2.5".to_string()));
    }

    #[test]
    fn param_value_option() {
        assert_eq!(Some(7).render(), Some("7".to_string()));
        assert_eq!(None::<u32>.render(), None);
    }

    #[test]
    fn param_value_collections() {
        assert_eq!(
            vec![1, 2, 3].render(),
            Some("1,2,3".to_string()),
            "collections join with commas"
        );
        assert_eq!(Vec::<u32>::new().render(), None, "empty collection is absent");
        assert_eq!(["a", "b"].render(), Some("a,b".to_string()));
    }

    #[test]
    fn params_keeps_insertion_order() {
        let params = Params::new().set("b", 2).set("a", 1).set("c", 3);
        let pairs = params.to_name_values().expect("project");

        let names: Vec<&str> = pairs.iter().map(|nv| nv.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn params_empty_name_is_rejected() {
        let params = Params::new().set("", 1);
        let_assert!(Err(Error::EmptyParamName) = params.to_name_values());
    }

    #[test]
    fn params_preserves_absent_values() {
        let params = Params::new().set("flag", None::<&str>).set_absent("bare");
        let pairs = params.to_name_values().expect("project");

        assert_eq!(pairs.len(), 2, "mapping entries are kept even when absent");
        assert_eq!(pairs.first().expect("flag").value, None);
        assert_eq!(pairs.get(1).expect("bare").value, None);
    }

    #[test]
    fn params_ignores_allow_list() {
        let params = Params::new().set("a", 1).set("b", 2);
        let pairs = params.to_name_values_filtered(&["a"]).expect("project");
        assert_eq!(pairs.len(), 2);
    }

    struct Search {
        q: String,
        page: Option<u32>,
        tags: Vec<String>,
    }
    export_params!(Search { q, page, tags });

    #[test]
    fn record_skips_absent_fields() {
        let search = Search {
            q: "rust".to_string(),
            page: None,
            tags: Vec::new(),
        };
        let pairs = search.to_name_values().expect("project");

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs.first().expect("q").name, "q");
    }

    #[test]
    fn record_joins_collections() {
        let search = Search {
            q: "rust".to_string(),
            page: Some(2),
            tags: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        };
        let pairs = search.to_name_values().expect("project");

        assert_eq!(pairs.len(), 3);
        let tags = pairs.get(2).expect("tags");
        assert_eq!(tags.name, "tags");
        assert_eq!(tags.value.as_deref(), Some("a,b,c"));
    }

    #[test]
    fn record_allow_list_restricts_fields() {
        let search = Search {
            q: "rust".to_string(),
            page: Some(1),
            tags: vec!["x".to_string()],
        };

        let pairs = search.to_name_values_filtered(&["q", "page"]).expect("project");
        let names: Vec<&str> = pairs.iter().map(|nv| nv.name.as_str()).collect();
        assert_eq!(names, vec!["q", "page"]);

        // Empty allow-list means no restriction
        let pairs = search.to_name_values_filtered(&[]).expect("project");
        assert_eq!(pairs.len(), 3);
    }
}
