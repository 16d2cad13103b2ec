// Copyright 2015 Axel Rasmussen
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::duration::{format_duration, parse_duration};
use crate::error::*;
use std::convert::TryFrom;
use std::fmt;
use std::time::Duration;

/// Kind identifies which scalar type a flag holds. It is fixed when the flag
/// is defined, and it decides both how values are parsed and how the flag is
/// described in usage text.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    /// A boolean flag, which doesn't consume a following argument.
    Bool,
    /// A pointer-sized signed integer.
    Int,
    /// A 64-bit signed integer.
    Int64,
    /// A pointer-sized unsigned integer.
    Uint,
    /// A 64-bit unsigned integer.
    Uint64,
    /// A 64-bit floating point number.
    Float64,
    /// A span of time, like "1m30s".
    Duration,
    /// Free-form text.
    String,
}

impl Kind {
    /// Boolean flags may be given without any value ("-v" means "-v=true").
    pub fn is_boolean(&self) -> bool {
        *self == Kind::Bool
    }

    /// The type name shown in usage text. Boolean flags have none, since
    /// their value is implied.
    pub fn type_name(&self) -> &'static str {
        match *self {
            Kind::Bool => "",
            Kind::Int | Kind::Int64 => "int",
            Kind::Uint | Kind::Uint64 => "uint",
            Kind::Float64 => "float",
            Kind::Duration => "duration",
            Kind::String => "string",
        }
    }

    /// The textual form of this kind's zero value.
    pub(crate) fn zero_text(&self) -> &'static str {
        match *self {
            Kind::Bool => "false",
            Kind::Duration => "0s",
            Kind::String => "",
            _ => "0",
        }
    }
}

/// Value is the current value of a flag. Each variant corresponds to exactly
/// one Kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A boolean value.
    Bool(bool),
    /// A pointer-sized signed integer.
    Int(isize),
    /// A 64-bit signed integer.
    Int64(i64),
    /// A pointer-sized unsigned integer.
    Uint(usize),
    /// A 64-bit unsigned integer.
    Uint64(u64),
    /// A floating point number.
    Float64(f64),
    /// A span of time.
    Duration(Duration),
    /// Free-form text.
    String(String),
}

impl Value {
    /// Returns the Kind of this value.
    pub fn kind(&self) -> Kind {
        match *self {
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Int64(_) => Kind::Int64,
            Value::Uint(_) => Kind::Uint,
            Value::Uint64(_) => Kind::Uint64,
            Value::Float64(_) => Kind::Float64,
            Value::Duration(_) => Kind::Duration,
            Value::String(_) => Kind::String,
        }
    }

    /// Parse the given text according to this value's Kind, and replace the
    /// current value with the result. On error the current value is left
    /// untouched.
    pub fn set(&mut self, s: &str) -> ValueResult<()> {
        *self = match *self {
            Value::Bool(_) => Value::Bool(parse_bool(s)?),
            Value::Int(_) => {
                Value::Int(isize::try_from(parse_int(s)?).map_err(|_| ValueError::Range)?)
            }
            Value::Int64(_) => Value::Int64(parse_int(s)?),
            Value::Uint(_) => {
                Value::Uint(usize::try_from(parse_uint(s)?).map_err(|_| ValueError::Range)?)
            }
            Value::Uint64(_) => Value::Uint64(parse_uint(s)?),
            Value::Float64(_) => Value::Float64(s.parse::<f64>().map_err(|_| ValueError::Syntax)?),
            Value::Duration(_) => Value::Duration(parse_duration(s)?),
            Value::String(_) => Value::String(s.to_owned()),
        };
        Ok(())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Uint(v) => write!(f, "{}", v),
            Value::Uint64(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::Duration(ref v) => write!(f, "{}", format_duration(v)),
            Value::String(ref v) => write!(f, "{}", v),
        }
    }
}

/// Scalar is implemented by every Rust type which can be the value of a flag.
/// It connects the type to its Kind, so typed handles can get their values
/// back out of a FlagSet.
pub trait Scalar: Clone {
    /// The Kind of flag this type is stored as.
    const KIND: Kind;

    /// Wrap this value up as a dynamically typed Value.
    fn into_value(self) -> Value;

    /// Extract a value of this type, if the Value is of the matching Kind.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_scalar {
    ($t:ty, $variant:ident) => {
        impl Scalar for $t {
            const KIND: Kind = Kind::$variant;

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match *value {
                    Value::$variant(ref v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

impl_scalar!(bool, Bool);
impl_scalar!(isize, Int);
impl_scalar!(i64, Int64);
impl_scalar!(usize, Uint);
impl_scalar!(u64, Uint64);
impl_scalar!(f64, Float64);
impl_scalar!(Duration, Duration);
impl_scalar!(String, String);

/// Return the boolean interpretation of a string. The accepted spellings are
/// 1, 0, t, f, T, F, true, false, TRUE, FALSE, True and False.
pub fn parse_bool(s: &str) -> ValueResult<bool> {
    match s {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(ValueError::Boolean),
    }
}

/// Parse an unsigned integer with no sign, detecting the radix from its
/// prefix: 0x for hex, 0o or a bare leading 0 for octal, 0b for binary.
fn parse_magnitude(s: &str) -> ValueResult<u64> {
    let lower = s.get(..2).map(|p| p.to_ascii_lowercase());
    let (digits, radix) = match lower.as_ref().map(|p| p.as_str()) {
        Some("0x") => (&s[2..], 16),
        Some("0o") => (&s[2..], 8),
        Some("0b") => (&s[2..], 2),
        _ if s.len() > 1 && s.starts_with('0') => (&s[1..], 8),
        _ => (s, 10),
    };
    // from_str_radix tolerates a leading '+', which we don't.
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValueError::Syntax);
    }
    u64::from_str_radix(digits, radix).map_err(|_| {
        // With only valid digits, the only remaining failure is overflow.
        match digits.chars().all(|c| c.is_digit(radix)) {
            true => ValueError::Range,
            false => ValueError::Syntax,
        }
    })
}

/// Parse a signed 64-bit integer literal.
pub fn parse_int(s: &str) -> ValueResult<i64> {
    let (negative, magnitude) = match s.strip_prefix('-') {
        Some(m) => (true, m),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let magnitude = parse_magnitude(magnitude)?;
    if negative {
        if magnitude > i64::MAX as u64 + 1 {
            return Err(ValueError::Range);
        }
        Ok((magnitude as i64).wrapping_neg())
    } else {
        i64::try_from(magnitude).map_err(|_| ValueError::Range)
    }
}

/// Parse an unsigned 64-bit integer literal. Signs are not accepted.
pub fn parse_uint(s: &str) -> ValueResult<u64> {
    parse_magnitude(s)
}
