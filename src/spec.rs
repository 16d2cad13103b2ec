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

use crate::value::{Kind, Scalar, Value};
use std::fmt;
use std::marker::PhantomData;

/// Positional flags are given internal names with this prefix, followed by
/// their ordinal and a closing brace, e.g. "{noname#1}".
pub(crate) const POSITIONAL_PREFIX: &str = "{noname#";

/// Returns the internal name of the n'th (1-based) positional flag.
pub(crate) fn positional_name(ordinal: usize) -> String {
    format!("{}{}}}", POSITIONAL_PREFIX, ordinal)
}

/// Returns true if the given name is (or looks like) an internal positional
/// flag name.
pub(crate) fn is_positional_name(name: &str) -> bool {
    name.starts_with(POSITIONAL_PREFIX)
}

/// FlagSpec describes one logically distinct flag: all of its names, its
/// current value, and the metadata used to print usage text.
#[derive(Clone, Debug)]
pub struct FlagSpec {
    /// The name this flag was first defined with.
    name: String,
    /// Every name which refers to this flag, in definition order. The first
    /// entry is always `name`.
    synonyms: Vec<String>,
    /// The human-readable name shown in usage text, e.g. "count".
    label: String,
    /// Whether or not parsing fails if this flag isn't given.
    required: bool,
    /// The help string to print out for this flag.
    usage: String,
    /// The flag's default value, as text, captured when it was defined.
    default_text: String,
    value: Value,
}

impl FlagSpec {
    pub(crate) fn new(name: &str, label: &str, value: Value, required: bool, usage: &str) -> Self {
        FlagSpec {
            name: name.to_owned(),
            synonyms: vec![name.to_owned()],
            label: label.to_owned(),
            required: required,
            usage: usage.to_owned(),
            default_text: value.to_string(),
            value: value,
        }
    }

    /// Returns the name this flag was originally defined with. For positional
    /// flags this is an internal generated name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns all of the names this flag can be referred to by, in the order
    /// they were defined.
    pub fn synonyms(&self) -> &[String] {
        self.synonyms.as_slice()
    }

    /// Returns the human-readable label shown in usage text.
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns true if parsing fails when this flag is absent.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the help text for this flag.
    pub fn usage(&self) -> &str {
        self.usage.as_str()
    }

    /// Returns the flag's default value, rendered as text.
    pub fn default_text(&self) -> &str {
        self.default_text.as_str()
    }

    /// Returns the flag's current value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Returns the scalar Kind of this flag.
    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    /// Returns true if this flag is matched by argument position rather than
    /// by name.
    pub fn is_positional(&self) -> bool {
        is_positional_name(&self.name)
    }

    pub(crate) fn add_synonym(&mut self, name: &str) {
        self.synonyms.push(name.to_owned());
    }

    /// Returns this flag's names joined in "f|flag" format.
    pub fn synonyms_text(&self) -> String {
        self.synonyms.join("|")
    }

    /// Returns the name prefix shown in usage text, like "-f|flag=". This is
    /// empty for positional flags.
    pub fn show_name(&self) -> String {
        match self.is_positional() {
            true => String::new(),
            false => format!("-{}=", self.synonyms_text()),
        }
    }

    /// Returns true if this flag's default value is its type's zero value,
    /// in which case usage text doesn't bother mentioning it.
    pub fn has_zero_default(&self) -> bool {
        self.default_text == self.kind().zero_text()
            || match self.default_text.as_str() {
                "" | "0" | "false" => true,
                _ => false,
            }
    }
}

impl fmt::Display for FlagSpec {
    /// Formats this flag the way it is referred to in usage and error text,
    /// e.g. "-c|count=<count>" or "<host>".
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}<{}>", self.show_name(), self.label)
    }
}

/// Handle is a typed reference to a flag defined on a particular FlagSet. It
/// is returned when a flag is defined, and it can be used to get the flag's
/// value after parsing, or to define additional names for the same value.
pub struct Handle<T: Scalar> {
    pub(crate) set_id: usize,
    pub(crate) index: usize,
    _type: PhantomData<fn() -> T>,
}

impl<T: Scalar> Handle<T> {
    pub(crate) fn new(set_id: usize, index: usize) -> Self {
        Handle {
            set_id: set_id,
            index: index,
            _type: PhantomData,
        }
    }
}

// Clone and Copy cannot be derived in this case, since derive would add
// needless T: Clone / T: Copy bounds.
impl<T: Scalar> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Scalar> Copy for Handle<T> {}

impl<T: Scalar> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Handle")
            .field("set_id", &self.set_id)
            .field("index", &self.index)
            .field("kind", &T::KIND)
            .finish()
    }
}
