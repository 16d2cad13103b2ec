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

//! The process-wide default FlagSet, and free functions which operate on it.
//! This is the most convenient interface for programs which only need one
//! set of flags.

use crate::error::*;
use crate::flag_set::{ErrorHandling, FlagSet, UsageFn};
use crate::metadata;
use crate::spec::{FlagSpec, Handle};
use crate::value::Scalar;
use lazy_static::lazy_static;
use std::env;
use std::io::Write;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

lazy_static! {
    static ref COMMAND_LINE: Mutex<FlagSet> = Mutex::new(FlagSet::new(
        &metadata::command_name(),
        ErrorHandling::ExitOnError
    ));
}

/// Lock and return the default FlagSet, for operations which have no free
/// function equivalent. Don't hold on to the guard while calling any other
/// function in this module.
pub fn command_line() -> MutexGuard<'static, FlagSet> {
    // The default set is still consistent after a PanicOnError parse failure.
    COMMAND_LINE.lock().unwrap_or_else(|e| e.into_inner())
}

/// Define a flag on the default FlagSet. See `FlagSet::flag`.
pub fn flag<T: Scalar>(
    name: &str,
    label: &str,
    default_value: T,
    required: bool,
    usage: &str,
) -> Handle<T> {
    command_line().flag(name, label, default_value, required, usage)
}

macro_rules! typed_flag_fns {
    ($($fn_name:ident: $t:ty),*) => {
        $(
            #[doc = concat!("Define a `", stringify!($t), "` flag on the default FlagSet.")]
            pub fn $fn_name(
                name: &str,
                label: &str,
                default_value: $t,
                required: bool,
                usage: &str,
            ) -> Handle<$t> {
                flag(name, label, default_value, required, usage)
            }
        )*
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

/// Define an additional name for an existing flag. See `FlagSet::var`.
pub fn var<T: Scalar>(handle: Handle<T>, name: &str) {
    command_line().var(handle, name)
}

/// Add `new_name` as a synonym for the flag `existing`. See `FlagSet::alias`.
pub fn alias(new_name: &str, existing: &str) {
    command_line().alias(new_name, existing)
}

/// Parse the process's command-line arguments (excluding the program name)
/// with the default FlagSet. Since the default set exits on error, this only
/// ever returns Error::HelpRequested, unless its policy was changed with
/// `init`.
pub fn parse() -> Result<()> {
    parse_from(env::args().skip(1))
}

/// Parse the given arguments with the default FlagSet.
pub fn parse_from<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    command_line().parse(args)
}

/// Rename the default FlagSet and change its error handling policy.
pub fn init(name: &str, error_handling: ErrorHandling) {
    command_line().init(name, error_handling)
}

/// Redirect the default FlagSet's usage and error output.
pub fn set_output<W: Write + Send + 'static>(output: W) {
    command_line().set_output(output)
}

/// Replace the usage text the default FlagSet prints on help and errors.
pub fn set_usage(usage: UsageFn) -> Option<UsageFn> {
    command_line().set_usage(usage)
}

/// Return the current value of a flag on the default FlagSet.
pub fn get<T: Scalar>(handle: Handle<T>) -> T {
    command_line().get(handle)
}

/// Look up a flag by any of its names, returning a snapshot of it.
pub fn lookup(name: &str) -> Option<FlagSpec> {
    command_line().lookup(name).cloned()
}

/// Set a flag's value by name. See `FlagSet::set`.
pub fn set(name: &str, value: &str) -> Result<()> {
    command_line().set(name, value)
}

/// Returns true if the named flag was given.
pub fn is_set(name: &str) -> bool {
    command_line().is_set(name)
}

/// Visit every flag which was set. The default FlagSet is locked meanwhile.
pub fn visit<F: FnMut(&str, &FlagSpec)>(f: F) {
    command_line().visit(f)
}

/// Visit every defined flag. The default FlagSet is locked meanwhile.
pub fn visit_all<F: FnMut(&str, &FlagSpec)>(f: F) {
    command_line().visit_all(f)
}

/// Returns whether the default FlagSet has been parsed.
pub fn parsed() -> bool {
    command_line().parsed()
}

/// Returns the arguments left over after parsing.
pub fn args() -> Vec<String> {
    command_line().args().to_vec()
}

/// Returns the i'th left over argument.
pub fn arg(i: usize) -> Option<String> {
    command_line().arg(i).map(|a| a.to_owned())
}

/// Returns the number of left over arguments.
pub fn narg() -> usize {
    command_line().narg()
}

/// Returns the number of flags that were set.
pub fn nflag() -> usize {
    command_line().nflag()
}

/// Returns the default FlagSet's usage text.
pub fn get_usage() -> String {
    command_line().get_usage()
}

/// Write the default FlagSet's usage text to its output.
pub fn print_defaults() {
    command_line().print_defaults()
}

/// Set the summary shown in usage text, returning the previous one.
pub fn set_summary(summary: &str) -> String {
    command_line().set_summary(summary)
}

/// Set the details shown in usage text, returning the previous value.
pub fn set_details(details: &str) -> String {
    command_line().set_details(details)
}

/// Set the copyright notice shown in usage text, returning the previous
/// value.
pub fn set_copyright(copyright: &str) -> String {
    command_line().set_copyright(copyright)
}

/// Returns the current summary text.
pub fn summary() -> String {
    command_line().summary().to_owned()
}

/// Returns the current details text.
pub fn details() -> String {
    command_line().details().to_owned()
}

/// Returns the current copyright notice.
pub fn copyright() -> String {
    command_line().copyright().to_owned()
}
