//! The dynamic value runtime.
//!
//! A [DynamicValue] is exactly one of a string, a boolean, a number, an ordered map or an array.
//! Member and element access through the `_mut` accessors auto-vivifies: the receiver is coerced
//! to the required container kind and missing entries are created (arrays are backfilled with
//! empty values). Coercions that can't succeed yield a default value rather than an error.
use crate::iter::Iter;
use crate::number::{self, Number};
use crate::writer::JsonWriter;
use indexmap::IndexMap;
use log::trace;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};

/// Map storage: unique keys, iterated in insertion order
pub type Map = IndexMap<String, DynamicValue>;

/// Returned by read-only indexing for missing members and elements
static EMPTY: DynamicValue = DynamicValue::String(String::new());

/// Enumeration of the different kinds of [DynamicValue]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Boolean,
    Number,
    Map,
    Array,
}

impl Kind {
    /// A human readable description of the kind
    pub fn description(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::Map => "map",
            Kind::Array => "array",
        }
    }

    /// Work out whether some text holds a number or is just a string
    pub fn determine(text: &str) -> Kind {
        match number::parse_text(text) {
            Some(_) => Kind::Number,
            None => Kind::String,
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// A self-describing dynamic value
#[derive(Debug, Clone)]
pub enum DynamicValue {
    /// Text value
    String(String),
    /// Boolean value
    Boolean(bool),
    /// Numeric value
    Number(Number),
    /// Map of values keyed by name
    Map(Map),
    /// Ordered sequence of values
    Array(Vec<DynamicValue>),
}

impl Default for DynamicValue {
    /// The default value is the empty string
    fn default() -> Self {
        DynamicValue::String(String::new())
    }
}

/// Translate a possibly negative index into an array slot. Negative indices count back from the
/// end; anything before the start lands on the next free slot.
fn slot(len: usize, index: isize) -> usize {
    if index >= 0 {
        index as usize
    } else {
        len.checked_sub(index.unsigned_abs()).unwrap_or(len)
    }
}

/// Get a mutable reference to a given array slot, backfilling with empty values as needed
fn fill_to(array: &mut Vec<DynamicValue>, slot: usize) -> &mut DynamicValue {
    if slot >= array.len() {
        array.resize_with(slot + 1, DynamicValue::default);
    }
    &mut array[slot]
}

impl DynamicValue {
    /// Create a new, empty string value
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the zero value for a given [Kind]
    pub fn with_kind(kind: Kind) -> Self {
        match kind {
            Kind::String => DynamicValue::String(String::new()),
            Kind::Boolean => DynamicValue::Boolean(false),
            Kind::Number => DynamicValue::Number(Number::default()),
            Kind::Map => DynamicValue::Map(Map::new()),
            Kind::Array => DynamicValue::Array(Vec::new()),
        }
    }

    /// The [Kind] of the value
    pub fn kind(&self) -> Kind {
        match self {
            DynamicValue::String(_) => Kind::String,
            DynamicValue::Boolean(_) => Kind::Boolean,
            DynamicValue::Number(_) => Kind::Number,
            DynamicValue::Map(_) => Kind::Map,
            DynamicValue::Array(_) => Kind::Array,
        }
    }

    /// True for maps and arrays
    pub fn is_container(&self) -> bool {
        matches!(self, DynamicValue::Map(_) | DynamicValue::Array(_))
    }

    /// Coerce the value to a given [Kind]. Scalars are converted, anything converted into a
    /// container becomes an empty container. Coercing to the current kind is a no-op.
    pub fn set_kind(&mut self, kind: Kind) {
        if self.kind() == kind {
            return;
        }
        *self = match kind {
            Kind::String => DynamicValue::String(self.as_string()),
            Kind::Boolean => DynamicValue::Boolean(self.as_bool()),
            Kind::Number => DynamicValue::Number(self.as_number()),
            container => DynamicValue::with_kind(container),
        };
    }

    /// Replace the value
    pub fn set<V: Into<DynamicValue>>(&mut self, value: V) {
        *self = value.into();
    }

    /// The canonical string form of the value. Containers have no string form and yield an
    /// empty string
    pub fn as_string(&self) -> String {
        match self {
            DynamicValue::String(s) => s.clone(),
            DynamicValue::Boolean(b) => b.to_string(),
            DynamicValue::Number(n) => n.to_string(),
            DynamicValue::Map(_) | DynamicValue::Array(_) => String::new(),
        }
    }

    /// Borrow the text of a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DynamicValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a boolean. Strings are true only when they read `"true"`, numbers only when
    /// they equal 1
    pub fn as_bool(&self) -> bool {
        match self {
            DynamicValue::Boolean(b) => *b,
            DynamicValue::String(s) => s == "true",
            DynamicValue::Number(n) => n.as_i32() == 1,
            DynamicValue::Map(_) | DynamicValue::Array(_) => false,
        }
    }

    /// The value as a [Number]. Strings that don't hold a number, and containers, yield zero
    pub fn as_number(&self) -> Number {
        match self {
            DynamicValue::Number(n) => *n,
            DynamicValue::String(s) => number::parse_text(s).unwrap_or_else(|| {
                trace!("non-numeric string {:?} coerced to 0", s);
                Number::default()
            }),
            DynamicValue::Boolean(b) => Number::Int(i64::from(*b)),
            DynamicValue::Map(_) | DynamicValue::Array(_) => Number::default(),
        }
    }

    pub fn as_i32(&self) -> i32 {
        self.as_number().as_i32()
    }

    pub fn as_u32(&self) -> u32 {
        self.as_number().as_u32()
    }

    pub fn as_i64(&self) -> i64 {
        self.as_number().as_i64()
    }

    pub fn as_u64(&self) -> u64 {
        self.as_number().as_u64()
    }

    pub fn as_f64(&self) -> f64 {
        self.as_number().as_f64()
    }

    fn map_mut(&mut self) -> &mut Map {
        self.set_kind(Kind::Map);
        match self {
            DynamicValue::Map(map) => map,
            _ => unreachable!("value was just coerced to a map"),
        }
    }

    fn array_mut(&mut self) -> &mut Vec<DynamicValue> {
        self.set_kind(Kind::Array);
        match self {
            DynamicValue::Array(array) => array,
            _ => unreachable!("value was just coerced to an array"),
        }
    }

    /// Look up a map member without modifying the value
    pub fn member(&self, name: &str) -> Option<&DynamicValue> {
        match self {
            DynamicValue::Map(map) => map.get(name),
            _ => None,
        }
    }

    /// Get a map member, coercing the value to a map and creating the member if necessary
    pub fn member_mut(&mut self, name: &str) -> &mut DynamicValue {
        self.map_mut().entry(name.to_string()).or_default()
    }

    /// Set a map member, coercing the value to a map if necessary
    pub fn set_member<K: Into<String>, V: Into<DynamicValue>>(&mut self, name: K, value: V) {
        self.map_mut().insert(name.into(), value.into());
    }

    /// Whether the value is a map holding a given member
    pub fn has_member(&self, name: &str) -> bool {
        match self {
            DynamicValue::Map(map) => map.contains_key(name),
            _ => false,
        }
    }

    /// Remove a member from a map, preserving the order of the remaining members
    pub fn remove_member(&mut self, name: &str) -> Option<DynamicValue> {
        match self {
            DynamicValue::Map(map) => map.shift_remove(name),
            _ => None,
        }
    }

    /// Look up an array element without modifying the value. Negative indices count back from
    /// the end
    pub fn element(&self, index: isize) -> Option<&DynamicValue> {
        match self {
            DynamicValue::Array(array) => array.get(slot(array.len(), index)),
            _ => None,
        }
    }

    /// Get an array element, coercing the value to an array and growing it if necessary
    pub fn element_mut(&mut self, index: isize) -> &mut DynamicValue {
        let array = self.array_mut();
        let slot = slot(array.len(), index);
        fill_to(array, slot)
    }

    /// Set an array element, coercing the value to an array and growing it if necessary
    pub fn set_element<V: Into<DynamicValue>>(&mut self, index: isize, value: V) {
        *self.element_mut(index) = value.into();
    }

    /// Append a new empty element to an array and return it
    pub fn append(&mut self) -> &mut DynamicValue {
        let array = self.array_mut();
        let slot = array.len();
        fill_to(array, slot)
    }

    /// Append a value to an array
    pub fn push<V: Into<DynamicValue>>(&mut self, value: V) {
        self.array_mut().push(value.into());
    }

    /// Reset the value to the zero value of its current kind
    pub fn clear(&mut self) {
        match self {
            DynamicValue::String(s) => s.clear(),
            DynamicValue::Boolean(b) => *b = false,
            DynamicValue::Number(n) => *n = Number::default(),
            DynamicValue::Map(map) => map.clear(),
            DynamicValue::Array(array) => array.clear(),
        }
    }

    /// The length of the value: characters for strings, 1 for booleans, the byte width (8) for
    /// numbers and the number of children for containers
    pub fn length(&self) -> usize {
        match self {
            DynamicValue::String(s) => s.chars().count(),
            DynamicValue::Boolean(_) => 1,
            DynamicValue::Number(_) => 8,
            DynamicValue::Map(map) => map.len(),
            DynamicValue::Array(array) => array.len(),
        }
    }

    /// Iterate over the children of the value
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// The first child in iteration order. Scalars are their own first child
    pub fn first(&self) -> Option<&DynamicValue> {
        match self {
            DynamicValue::Map(map) => map.first().map(|(_, v)| v),
            DynamicValue::Array(array) => array.first(),
            scalar => Some(scalar),
        }
    }

    /// The last child in iteration order. Scalars are their own last child
    pub fn last(&self) -> Option<&DynamicValue> {
        match self {
            DynamicValue::Map(map) => map.last().map(|(_, v)| v),
            DynamicValue::Array(array) => array.last(),
            scalar => Some(scalar),
        }
    }

    /// The index of the first array element equal to `needle`
    pub fn index_of(&self, needle: &DynamicValue) -> Option<usize> {
        match self {
            DynamicValue::Array(array) => array.iter().position(|v| v == needle),
            _ => None,
        }
    }

    /// Reverse the characters of a string or the elements of an array
    pub fn reverse(&mut self) {
        match self {
            DynamicValue::String(s) => *s = s.chars().rev().collect(),
            DynamicValue::Array(array) => array.reverse(),
            _ => (),
        }
    }

    /// Sort the elements of an array using a comparison function
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&DynamicValue, &DynamicValue) -> Ordering,
    {
        if let DynamicValue::Array(array) = self {
            array.sort_by(compare)
        }
    }

    /// Merge another value into this one. Scalars overwrite, maps are merged member by member
    /// (recursively), arrays are merged element by element either from index 0 or, when
    /// `append` is set, from the current end of this array
    pub fn merge(&mut self, other: &DynamicValue, append: bool) {
        match other {
            DynamicValue::Map(members) => {
                let map = self.map_mut();
                for (name, value) in members {
                    map.entry(name.clone()).or_default().merge(value, append);
                }
            }
            DynamicValue::Array(elements) => {
                let array = self.array_mut();
                let offset = if append { array.len() } else { 0 };
                for (index, value) in elements.iter().enumerate() {
                    fill_to(array, offset + index).merge(value, append);
                }
            }
            scalar => *self = scalar.clone(),
        }
    }

    /// Whether this map is a subset of another map: every member here exists there with an
    /// equal value (nested maps are compared as subsets)
    pub fn is_subset(&self, other: &DynamicValue) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match (self, other) {
            (DynamicValue::Map(left), DynamicValue::Map(right)) if left.len() <= right.len() => {
                left.iter().all(|(name, l)| match (l, right.get(name)) {
                    (DynamicValue::Map(_), Some(r @ DynamicValue::Map(_))) => l.is_subset(r),
                    (_, Some(r)) => l == r,
                    (_, None) => false,
                })
            }
            _ => false,
        }
    }

    /// Produce a report of the differences between this value and a target, or [None] when
    /// they're the same. Scalar changes are reported as a map carrying `type` (`typeChanged` or
    /// `valueChanged`), `source` and `target`. Map and array changes are reported as an array of
    /// per-member (`key`) or per-element (`index`) entries tagged `changed`, `removed` or
    /// `added`.
    pub fn diff(&self, target: &DynamicValue) -> Option<DynamicValue> {
        match (self, target) {
            (DynamicValue::Map(source), DynamicValue::Map(target)) => map_diff(source, target),
            (DynamicValue::Array(source), DynamicValue::Array(target)) => {
                array_diff(source, target)
            }
            (source, target) if source.kind() != target.kind() => {
                Some(scalar_change("typeChanged", source, target))
            }
            (source, target) if source != target => {
                Some(scalar_change("valueChanged", source, target))
            }
            _ => None,
        }
    }
}

fn scalar_change(change: &str, source: &DynamicValue, target: &DynamicValue) -> DynamicValue {
    let mut report = DynamicValue::with_kind(Kind::Map);
    report.set_member("type", change);
    report.set_member("source", source.clone());
    report.set_member("target", target.clone());
    report
}

fn change_entry<L: Into<DynamicValue>>(
    locator: &str,
    at: L,
    change: &str,
    value: DynamicValue,
) -> DynamicValue {
    let mut entry = DynamicValue::with_kind(Kind::Map);
    entry.set_member(locator, at);
    entry.set_member(change, value);
    entry
}

fn map_diff(source: &Map, target: &Map) -> Option<DynamicValue> {
    let mut changes = vec![];
    for (name, value) in source {
        match target.get(name) {
            Some(other) => {
                if let Some(d) = value.diff(other) {
                    changes.push(change_entry("key", name.as_str(), "changed", d));
                }
            }
            None => changes.push(change_entry("key", name.as_str(), "removed", value.clone())),
        }
    }
    for (name, value) in target {
        if !source.contains_key(name) {
            changes.push(change_entry("key", name.as_str(), "added", value.clone()));
        }
    }
    if changes.is_empty() {
        None
    } else {
        Some(DynamicValue::Array(changes))
    }
}

fn array_diff(source: &[DynamicValue], target: &[DynamicValue]) -> Option<DynamicValue> {
    let mut changes = vec![];
    for (index, value) in source.iter().enumerate() {
        match target.get(index) {
            Some(other) => {
                if let Some(d) = value.diff(other) {
                    changes.push(change_entry("index", index, "changed", d));
                }
            }
            None => changes.push(change_entry("index", index, "removed", value.clone())),
        }
    }
    for (index, value) in target.iter().enumerate().skip(source.len()) {
        changes.push(change_entry("index", index, "added", value.clone()));
    }
    if changes.is_empty() {
        None
    } else {
        Some(DynamicValue::Array(changes))
    }
}

impl PartialEq for DynamicValue {
    /// Structural equality. Scalars of different kinds compare via their string forms, so
    /// `Number(1)` equals `String("1")`
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match (self, other) {
            (DynamicValue::String(a), DynamicValue::String(b)) => a == b,
            (DynamicValue::Boolean(a), DynamicValue::Boolean(b)) => a == b,
            (DynamicValue::Number(a), DynamicValue::Number(b)) => a == b,
            (DynamicValue::Map(a), DynamicValue::Map(b)) => a == b,
            (DynamicValue::Array(a), DynamicValue::Array(b)) => a == b,
            (a, b) if !a.is_container() && !b.is_container() => a.as_string() == b.as_string(),
            _ => false,
        }
    }
}

impl Display for DynamicValue {
    /// Compact JSON
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match JsonWriter::default().write_to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(std::fmt::Error),
        }
    }
}

impl<'a> Index<&'a str> for DynamicValue {
    type Output = DynamicValue;

    fn index(&self, name: &'a str) -> &Self::Output {
        self.member(name).unwrap_or(&EMPTY)
    }
}

impl<'a> IndexMut<&'a str> for DynamicValue {
    fn index_mut(&mut self, name: &'a str) -> &mut Self::Output {
        self.member_mut(name)
    }
}

impl Index<usize> for DynamicValue {
    type Output = DynamicValue;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            DynamicValue::Array(array) => array.get(index).unwrap_or(&EMPTY),
            _ => &EMPTY,
        }
    }
}

impl IndexMut<usize> for DynamicValue {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        fill_to(self.array_mut(), index)
    }
}

impl From<&str> for DynamicValue {
    fn from(value: &str) -> Self {
        DynamicValue::String(value.to_string())
    }
}

impl From<String> for DynamicValue {
    fn from(value: String) -> Self {
        DynamicValue::String(value)
    }
}

impl From<bool> for DynamicValue {
    fn from(value: bool) -> Self {
        DynamicValue::Boolean(value)
    }
}

impl From<Number> for DynamicValue {
    fn from(value: Number) -> Self {
        DynamicValue::Number(value)
    }
}

macro_rules! numeric_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for DynamicValue {
                fn from(value: $t) -> Self {
                    DynamicValue::Number(Number::from(value))
                }
            }
        )*
    };
}

numeric_from!(i32, u32, i64, u64, usize, f64);

impl From<Vec<DynamicValue>> for DynamicValue {
    fn from(value: Vec<DynamicValue>) -> Self {
        DynamicValue::Array(value)
    }
}

impl From<Map> for DynamicValue {
    fn from(value: Map) -> Self {
        DynamicValue::Map(value)
    }
}
