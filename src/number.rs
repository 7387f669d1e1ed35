//! Numeric storage for [crate::DynamicValue]. A number keeps track of whether it was produced
//! from an integral (signed or unsigned) or a floating point representation, so that integral
//! values survive a round trip without passing through a double.
use std::fmt::{Display, Formatter};

/// A numeric value
#[derive(Debug, Copy, Clone)]
pub enum Number {
    /// Signed integer value
    Int(i64),
    /// Unsigned integer value
    UInt(u64),
    /// Floating point value
    Float(f64),
}

impl Default for Number {
    fn default() -> Self {
        Number::Int(0)
    }
}

impl Number {
    /// View as a 64 bit float
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(i) => i as f64,
            Number::UInt(u) => u as f64,
            Number::Float(f) => f,
        }
    }

    /// View as a signed 64 bit integer. Floats are truncated (and saturate)
    pub fn as_i64(&self) -> i64 {
        match *self {
            Number::Int(i) => i,
            Number::UInt(u) => u as i64,
            Number::Float(f) => f as i64,
        }
    }

    /// View as an unsigned 64 bit integer. Floats are truncated (and saturate)
    pub fn as_u64(&self) -> u64 {
        match *self {
            Number::Int(i) => i as u64,
            Number::UInt(u) => u,
            Number::Float(f) => f as u64,
        }
    }

    /// View as a signed 32 bit integer
    pub fn as_i32(&self) -> i32 {
        self.as_i64() as i32
    }

    /// View as an unsigned 32 bit integer
    pub fn as_u32(&self) -> u32 {
        self.as_u64() as u32
    }

    /// Whether the number is held in an integral representation
    pub fn is_integral(&self) -> bool {
        !matches!(self, Number::Float(_))
    }

    /// Whether the number can be written as a JSON numeric literal
    pub fn is_finite(&self) -> bool {
        match self {
            Number::Float(f) => f.is_finite(),
            _ => true,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (Number::UInt(a), Number::UInt(b)) => a == b,
            (Number::Int(a), Number::UInt(b)) | (Number::UInt(b), Number::Int(a)) => {
                i128::from(a) == i128::from(b)
            }
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::UInt(u) => write!(f, "{}", u),
            Number::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(i64::from(value))
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::UInt(u64::from(value))
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Number::UInt(value)
    }
}

impl From<usize> for Number {
    fn from(value: usize) -> Self {
        Number::UInt(value as u64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

/// Parse a numeric literal that has already been validated by the reader automaton. `integral`
/// is set when the literal carries no fraction or exponent.
pub(crate) fn parse_literal(text: &[u8], integral: bool) -> Option<Number> {
    if integral {
        if let Some(n) = parse_integral(text) {
            return Some(n);
        }
    }
    parse_float(text)
}

/// Classify and parse free-form text: unsigned, then signed, then floating point. Text with
/// leading whitespace, and text naming a non-finite value (`nan`, `inf`), is never a number.
pub(crate) fn parse_text(text: &str) -> Option<Number> {
    match text.as_bytes().first() {
        None => None,
        Some(b) if b.is_ascii_whitespace() => None,
        Some(_) => parse_integral(text.as_bytes())
            .or_else(|| parse_float(text.as_bytes()))
            .filter(Number::is_finite),
    }
}

#[cfg(feature = "mixed_numerics")]
fn parse_integral(text: &[u8]) -> Option<Number> {
    if text.first() == Some(&b'-') {
        lexical::parse::<i64, _>(text).ok().map(Number::Int)
    } else {
        lexical::parse::<u64, _>(text).ok().map(Number::UInt)
    }
}

#[cfg(not(feature = "mixed_numerics"))]
fn parse_integral(_text: &[u8]) -> Option<Number> {
    None
}

fn parse_float(text: &[u8]) -> Option<Number> {
    fast_float::parse::<f64, _>(text).ok().map(Number::Float)
}
