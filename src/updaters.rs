//! Update-if-changed helpers.
//!
//! Useful for records that track their own modification metadata (a
//! dirty flag, "modified by/on" columns): writing an unchanged value
//! would still bump that metadata, so these helpers only write when the
//! value actually differs and report whether they did.
//!
//! Combine them with the non-short-circuiting `|` so every field is
//! visited:
//!
//! ```
//! use tiercache::updaters::{update, update_str};
//!
//! struct Address { line1: Option<String>, zip: u32 }
//!
//! let mut target = Address { line1: Some("1 Main St".into()), zip: 10001 };
//! let changed = update_str(&mut target.line1, Some(" 1 Main St ")) | update(&mut target.zip, 10002);
//!
//! assert!(changed);
//! assert_eq!(target.zip, 10002);
//! ```

use chrono::{DateTime, NaiveDate, Utc};

/// Write `value` into `field` if it differs. Returns whether a write happened.
pub fn update<V: PartialEq>(field: &mut V, value: V) -> bool {
    if *field != value {
        *field = value;
        true
    } else {
        false
    }
}

/// String variant of [`update`]: the candidate is trimmed first.
pub fn update_str(field: &mut Option<String>, value: Option<&str>) -> bool {
    let value = value.map(|v| v.trim().to_string());
    update(field, value)
}

/// Like [`update`], going through explicit accessors on `target`.
pub fn compare_and_set<T, V, G, S>(target: &mut T, get: G, set: S, candidate: V) -> bool
where
    V: PartialEq,
    G: Fn(&T) -> &V,
    S: FnOnce(&mut T, V),
{
    if *get(target) == candidate {
        return false;
    }
    set(target, candidate);
    true
}

/// Parse `text` into the field's type and [`update`] with it.
///
/// Unparseable text leaves the field untouched and returns `false`.
pub fn parse_update<V: ParseValue + PartialEq>(field: &mut V, text: &str) -> bool {
    match V::parse_value(text) {
        Some(value) => update(field, value),
        None => false,
    }
}

/// Parse `text` as `T`, or `None` if it is not a valid `T`.
pub fn try_parse<T: ParseValue>(text: &str) -> Option<T> {
    T::parse_value(text)
}

/// Types that can be parsed from loosely formatted text.
pub trait ParseValue: Sized {
    fn parse_value(text: &str) -> Option<Self>;
}

macro_rules! parse_trimmed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ParseValue for $ty {
                fn parse_value(text: &str) -> Option<Self> {
                    text.trim().parse().ok()
                }
            }
        )*
    };
}

parse_trimmed!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl ParseValue for bool {
    fn parse_value(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

/// Tri-state flag: blank or `"0"` is `Some(false)`, anything else `Some(true)`.
impl ParseValue for Option<bool> {
    fn parse_value(text: &str) -> Option<Self> {
        let unset = text.trim().is_empty() || text == "0";
        Some(Some(!unset))
    }
}

impl ParseValue for char {
    fn parse_value(text: &str) -> Option<Self> {
        let mut chars = text.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl ParseValue for String {
    fn parse_value(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

impl ParseValue for NaiveDate {
    fn parse_value(text: &str) -> Option<Self> {
        NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
    }
}

impl ParseValue for DateTime<Utc> {
    fn parse_value(text: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(text.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
