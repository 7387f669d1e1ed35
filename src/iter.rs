//! Iteration over the children of a [DynamicValue]. Maps yield their entries in insertion order
//! together with the entry key, arrays yield their elements together with the element index, and
//! scalars yield themselves exactly once.
use crate::value::DynamicValue;
use std::fmt::{Display, Formatter};

/// Where the current iteration item lives within its parent
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Position<'a> {
    /// The key of a map entry
    Key(&'a str),
    /// The index of an array element (always 0 for a scalar)
    Index(usize),
}

impl<'a> Position<'a> {
    /// The map key, if iterating a map
    pub fn key(&self) -> Option<&'a str> {
        match self {
            Position::Key(k) => Some(*k),
            Position::Index(_) => None,
        }
    }

    /// The array index, if iterating an array or a scalar
    pub fn index(&self) -> Option<usize> {
        match self {
            Position::Key(_) => None,
            Position::Index(i) => Some(*i),
        }
    }
}

impl<'a> Display for Position<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Key(k) => write!(f, "{}", k),
            Position::Index(i) => write!(f, "[{}]", i),
        }
    }
}

enum Inner<'a> {
    Map(indexmap::map::Iter<'a, String, DynamicValue>),
    Array(std::iter::Enumerate<std::slice::Iter<'a, DynamicValue>>),
    Scalar(Option<&'a DynamicValue>),
}

/// A lazy, finite iterator over the children of a [DynamicValue]
pub struct Iter<'a> {
    inner: Inner<'a>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(value: &'a DynamicValue) -> Self {
        let inner = match value {
            DynamicValue::Map(map) => Inner::Map(map.iter()),
            DynamicValue::Array(array) => Inner::Array(array.iter().enumerate()),
            scalar => Inner::Scalar(Some(scalar)),
        };
        Iter { inner }
    }

    /// Whether another item remains
    pub fn has_next(&self) -> bool {
        self.len() > 0
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (Position<'a>, &'a DynamicValue);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Map(entries) => entries.next().map(|(k, v)| (Position::Key(k.as_str()), v)),
            Inner::Array(elements) => elements.next().map(|(i, v)| (Position::Index(i), v)),
            Inner::Scalar(value) => value.take().map(|v| (Position::Index(0), v)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match &self.inner {
            Inner::Map(entries) => entries.len(),
            Inner::Array(elements) => elements.len(),
            Inner::Scalar(value) => usize::from(value.is_some()),
        };
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}

impl<'a> IntoIterator for &'a DynamicValue {
    type Item = (Position<'a>, &'a DynamicValue);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}
