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

use crate::error::*;
use crate::metadata::replace_tags;
use crate::spec::{is_positional_name, positional_name, FlagSpec, Handle};
use crate::value::Scalar;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

static NEXT_SET_ID: AtomicUsize = AtomicUsize::new(1);

/// A function which renders custom usage text for a FlagSet.
pub type UsageFn = Box<dyn Fn(&FlagSet) -> String + Send>;

/// ErrorHandling defines how FlagSet::parse behaves if parsing fails.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorHandling {
    /// Return a descriptive error to the caller.
    ContinueOnError,
    /// Exit the process with status 2.
    ExitOnError,
    /// Panic with a descriptive error.
    PanicOnError,
}

/// FlagSet is a set of defined flags, for a single command. Flags are defined
/// on it first, then it parses a list of arguments, and finally the parsed
/// values can be read back with the handles returned when the flags were
/// defined.
pub struct FlagSet {
    name: String,
    error_handling: ErrorHandling,
    id: usize,

    /// Every distinct flag, in definition order.
    pub(crate) specs: Vec<FlagSpec>,
    /// Every name (including synonyms and generated positional names) mapped
    /// to an index into `specs`.
    pub(crate) formal: BTreeMap<String, usize>,
    /// The flags set during the last parse, keyed by the name they were set
    /// with.
    pub(crate) actual: BTreeMap<String, usize>,
    /// Arguments left over after flag parsing stopped.
    pub(crate) args: Vec<String>,
    pub(crate) parsed: bool,
    /// How many positional arguments the current parse has consumed.
    pub(crate) auto_id: usize,

    summary: String,
    copyright: String,
    details: String,

    output: Option<Box<dyn Write + Send>>,
    usage: Option<UsageFn>,
}

impl FlagSet {
    /// Construct a new, empty FlagSet. The name is used in diagnostics, and
    /// the error handling policy decides what parse does on failure.
    pub fn new(name: &str, error_handling: ErrorHandling) -> Self {
        FlagSet {
            name: name.to_owned(),
            error_handling: error_handling,
            id: NEXT_SET_ID.fetch_add(1, Ordering::Relaxed),
            specs: vec![],
            formal: BTreeMap::new(),
            actual: BTreeMap::new(),
            args: vec![],
            parsed: false,
            auto_id: 0,
            summary: String::new(),
            copyright: String::new(),
            details: String::new(),
            output: None,
            usage: None,
        }
    }

    /// Change the name and error handling policy of this FlagSet.
    pub fn init(&mut self, name: &str, error_handling: ErrorHandling) {
        self.name = name.to_owned();
        self.error_handling = error_handling;
    }

    /// Returns the name this FlagSet was constructed with.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns this FlagSet's error handling policy.
    pub fn error_handling(&self) -> ErrorHandling {
        self.error_handling
    }

    /// Set the destination for usage and error messages. By default, they
    /// are written to stderr.
    pub fn set_output<W: Write + Send + 'static>(&mut self, output: W) {
        self.output = Some(Box::new(output));
    }

    /// Replace the usage text printed when help is requested or parsing
    /// fails. The function is given this FlagSet, so it can still call
    /// `get_usage` to build on the default text. Returns the previous
    /// function, if any.
    pub fn set_usage(&mut self, usage: UsageFn) -> Option<UsageFn> {
        self.usage.replace(usage)
    }

    pub(crate) fn usage_fn(&self) -> Option<&UsageFn> {
        self.usage.as_ref()
    }

    /// Write the given text to this FlagSet's output. Failures are logged,
    /// but otherwise ignored.
    pub(crate) fn write_output(&mut self, text: &str) {
        let res = match self.output.as_mut() {
            Some(o) => o.write_all(text.as_bytes()).and_then(|_| o.flush()),
            None => io::stderr().write_all(text.as_bytes()),
        };
        if let Err(e) = res {
            warn!("{}: failed to write output: {}", self.name, e);
        }
    }

    fn configuration_error(&mut self, msg: String) -> ! {
        let err = Error::Configuration(match self.name.is_empty() {
            true => msg,
            false => format!("{} {}", self.name, msg),
        });
        self.write_output(&format!("{}\n", err));
        panic!("{}", err);
    }

    /// Positional flags are named by their ordinal among positional flags,
    /// which is also how parse names positional arguments.
    fn auto_name(&self, name: &str) -> String {
        if name.is_empty() || is_positional_name(name) {
            let defined = self.specs.iter().filter(|s| s.is_positional()).count();
            return positional_name(defined + 1);
        }
        name.to_owned()
    }

    /// Define a new flag, returning a handle to its value. An empty name
    /// defines a positional flag, which is matched against non-flag arguments
    /// in the order positional flags were defined.
    ///
    /// Defining two flags with the same name is a programming error, and it
    /// panics.
    pub fn flag<T: Scalar>(
        &mut self,
        name: &str,
        label: &str,
        default_value: T,
        required: bool,
        usage: &str,
    ) -> Handle<T> {
        let name = self.auto_name(name);
        if self.formal.contains_key(&name) {
            self.configuration_error(format!("flag redefined: {}", name));
        }

        let index = self.specs.len();
        self.specs.push(FlagSpec::new(
            &name,
            label,
            default_value.into_value(),
            required,
            usage,
        ));
        self.formal.insert(name, index);
        Handle::new(self.id, index)
    }

    /// Define an additional name for an existing flag's value. Setting either
    /// name sets the same value, and usage text lists the names together.
    pub fn var<T: Scalar>(&mut self, handle: Handle<T>, name: &str) {
        self.check_handle(&handle);
        if name.is_empty() || is_positional_name(name) {
            let msg = format!(
                "positional flags cannot be synonyms of -{}",
                self.specs[handle.index].name()
            );
            self.configuration_error(msg);
        }
        if self.formal.contains_key(name) {
            self.configuration_error(format!("flag redefined: {}", name));
        }

        self.specs[handle.index].add_synonym(name);
        self.formal.insert(name.to_owned(), handle.index);
    }

    /// Add `new_name` as a synonym for the already defined flag `existing`.
    /// Panics if `new_name` is already taken or `existing` is undefined.
    pub fn alias(&mut self, new_name: &str, existing: &str) {
        if new_name.is_empty() || is_positional_name(new_name) {
            self.configuration_error(format!("alias name '{}' is not allowed", new_name));
        }
        if self.formal.contains_key(new_name) {
            self.configuration_error(format!("flag redefined: {}", new_name));
        }
        let index = match self.formal.get(existing).copied() {
            Some(index) => index,
            None => self.configuration_error(format!("alias target {} is not defined", existing)),
        };

        self.specs[index].add_synonym(new_name);
        self.formal.insert(new_name.to_owned(), index);
        debug!("{}: -{} is now a synonym of -{}", self.name, new_name, existing);
    }

    fn check_handle<T: Scalar>(&self, handle: &Handle<T>) {
        if handle.set_id != self.id || handle.index >= self.specs.len() {
            panic!("{:?} was not created by FlagSet '{}'", handle, self.name);
        }
    }

    /// Return the current value of the flag the given handle refers to.
    pub fn get<T: Scalar>(&self, handle: Handle<T>) -> T {
        self.check_handle(&handle);
        let spec = &self.specs[handle.index];
        match T::from_value(spec.value()) {
            Some(v) => v,
            None => panic!("flag {} does not hold a {:?} value", spec, T::KIND),
        }
    }

    /// Look up a flag by any of its names.
    pub fn lookup(&self, name: &str) -> Option<&FlagSpec> {
        self.formal.get(name).map(|&i| &self.specs[i])
    }

    /// A flag counts as seen if it was set under any of its names.
    pub(crate) fn is_seen(&self, spec: &FlagSpec) -> bool {
        spec.synonyms().iter().any(|n| self.actual.contains_key(n))
    }

    /// Returns true if the named flag was set during the last parse (or with
    /// `set`), under any of its names.
    pub fn is_set(&self, name: &str) -> bool {
        self.lookup(name).map_or(false, |spec| self.is_seen(spec))
    }

    /// Set the value of the named flag, just as if it had been given on the
    /// command line.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let index = match self.formal.get(name) {
            Some(&index) => index,
            None => return Err(Error::UnknownFlag(name.to_owned())),
        };
        self.specs[index]
            .value_mut()
            .set(value)
            .map_err(|e| Error::InvalidValue {
                flag: format!("-{}", name),
                value: value.to_owned(),
                source: e,
            })?;
        self.actual.insert(name.to_owned(), index);
        Ok(())
    }

    /// Visit every defined flag in lexicographical order of its names. A flag
    /// with synonyms is visited once per name; the name is passed along.
    pub fn visit_all<F: FnMut(&str, &FlagSpec)>(&self, mut f: F) {
        for (name, &index) in self.formal.iter() {
            f(name.as_str(), &self.specs[index]);
        }
    }

    /// Visit the flags which were set, in lexicographical order, passing the
    /// name each one was set with.
    pub fn visit<F: FnMut(&str, &FlagSpec)>(&self, mut f: F) {
        for (name, &index) in self.actual.iter() {
            f(name.as_str(), &self.specs[index]);
        }
    }

    /// Iterate over every distinct flag exactly once, ordered by where its
    /// original name sorts.
    pub(crate) fn distinct_specs(&self) -> impl Iterator<Item = &FlagSpec> {
        let specs = &self.specs;
        self.formal
            .iter()
            .map(move |(name, &index)| (name, &specs[index]))
            .filter(|(name, spec)| name.as_str() == spec.name())
            .map(|(_, spec)| spec)
    }

    /// Returns whether or not parse has been called.
    pub fn parsed(&self) -> bool {
        self.parsed
    }

    /// Returns the arguments left over after flag parsing stopped.
    pub fn args(&self) -> &[String] {
        self.args.as_slice()
    }

    /// Returns the i'th left over argument, if there is one.
    pub fn arg(&self, i: usize) -> Option<&str> {
        self.args.get(i).map(|a| a.as_str())
    }

    /// Returns the number of left over arguments.
    pub fn narg(&self) -> usize {
        self.args.len()
    }

    /// Returns the number of flags set during the last parse, counting each
    /// name used separately.
    pub fn nflag(&self) -> usize {
        self.actual.len()
    }

    /// Set the summary shown at the top of usage text, returning the previous
    /// one. Tags like <thiscmd> are replaced immediately.
    pub fn set_summary(&mut self, summary: &str) -> String {
        mem::replace(&mut self.summary, replace_tags(summary))
    }

    /// Set the details shown at the bottom of usage text, returning the
    /// previous value.
    pub fn set_details(&mut self, details: &str) -> String {
        mem::replace(&mut self.details, replace_tags(details))
    }

    /// Set the copyright notice shown in usage text, returning the previous
    /// value.
    pub fn set_copyright(&mut self, copyright: &str) -> String {
        mem::replace(&mut self.copyright, replace_tags(copyright))
    }

    /// Returns the current summary text.
    pub fn summary(&self) -> &str {
        self.summary.as_str()
    }

    /// Returns the current details text.
    pub fn details(&self) -> &str {
        self.details.as_str()
    }

    /// Returns the current copyright notice.
    pub fn copyright(&self) -> &str {
        self.copyright.as_str()
    }
}

macro_rules! typed_flag_fns {
    ($($fn_name:ident: $t:ty),*) => {
        impl FlagSet {
            $(
                #[doc = concat!("Define a `", stringify!($t), "` flag. See `FlagSet::flag`.")]
                pub fn $fn_name(
                    &mut self,
                    name: &str,
                    label: &str,
                    default_value: $t,
                    required: bool,
                    usage: &str,
                ) -> Handle<$t> {
                    self.flag(name, label, default_value, required, usage)
                }
            )*
        }
    };
}

typed_flag_fns!(
    bool: bool,
    int: isize,
    int64: i64,
    uint: usize,
    uint64: u64,
    float64: f64,
    duration: Duration,
    string: String
);
