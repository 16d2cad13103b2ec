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

#![deny(
    anonymous_parameters,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![warn(bare_trait_objects, unreachable_pub, unused_qualifications)]

//! cmdline is a command-line flag parser. On top of the usual named flags, it
//! supports human-readable labels for usage text, required flags, synonyms
//! (several names for one value), and positional flags, which are filled in
//! from non-flag arguments in the order they were defined.
//!
//! ```
//! use cmdline::{ErrorHandling, FlagSet};
//!
//! let mut flags = FlagSet::new("ping", ErrorHandling::ContinueOnError);
//! let count = flags.int("c", "count", 4, false, "stop after `count` replies");
//! flags.alias("count", "c");
//! let host = flags.string("", "host", String::new(), true, "host ip or name");
//!
//! flags.parse(cmdline::split_line("--count = 2 127.0.0.1")).unwrap();
//! assert_eq!(2, flags.get(count));
//! assert_eq!("127.0.0.1", flags.get(host));
//! ```

/// command_line provides a default FlagSet for the whole process.
pub mod command_line;
/// duration parses and formats the textual form of time spans.
pub mod duration;
/// error defines the errors which can come up while defining or parsing
/// flags.
pub mod error;
/// flag_set defines FlagSet, the registry of defined flags.
pub mod flag_set;
/// help renders usage text.
pub mod help;
/// io provides a shareable Write adapter, useful for capturing output.
pub mod io;
/// logging provides a Logger implementation which can be configured with a
/// flag.
#[cfg(feature = "logging")]
pub mod logging;
/// metadata holds process-wide information about the running program, which
/// is substituted into usage text.
pub mod metadata;
/// parse implements flag parsing and validation for FlagSet.
pub mod parse;
/// spec describes individual flags.
pub mod spec;
/// split_line splits a raw command line into arguments.
pub mod split_line;
/// value defines the types flags can hold, and how they're parsed.
pub mod value;

pub use crate::error::{Error, Result, ValueError};
pub use crate::flag_set::{ErrorHandling, FlagSet, UsageFn};
pub use crate::spec::{FlagSpec, Handle};
pub use crate::split_line::split_line;
pub use crate::value::{Kind, Scalar, Value};

// Tests exercise the logging module, so don't bother running them unless all
// features are enabled.
#[cfg(feature = "logging")]
#[cfg(test)]
mod tests;
