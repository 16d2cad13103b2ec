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

use thiserror::Error;

/// ValueError describes why a piece of command-line text could not be
/// converted into a flag's value type.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ValueError {
    /// The text is not a valid literal for the flag's type.
    #[error("invalid syntax")]
    Syntax,
    /// The text is a valid literal, but it doesn't fit in the flag's type.
    #[error("value out of range")]
    Range,
    /// The text is not one of the accepted boolean spellings.
    #[error("invalid boolean")]
    Boolean,
    /// Durations are unsigned, so negative durations are rejected.
    #[error("negative durations are not supported")]
    NegativeDuration,
}

/// A Result type which uses ValueError.
pub type ValueResult<T> = std::result::Result<T, ValueError>;

/// Error represents the various errors which can come up while defining or
/// parsing command-line flags.
#[derive(Debug, Error)]
pub enum Error {
    /// A flag-looking argument was malformed (e.g. "-=1" or "---x").
    #[error("bad flag syntax: {0}")]
    Syntax(String),
    /// A named flag was given which was never defined.
    #[error("flag provided but not defined: -{0}")]
    UnknownFlag(String),
    /// A positional argument was given, but all positional flags were already
    /// consumed.
    #[error("unexpected positional argument: '{0}'")]
    UnexpectedArgument(String),
    /// A value-taking flag ran out of arguments before finding its value.
    #[error("flag needs an argument: -{0}")]
    MissingValue(String),
    /// The value given for a flag couldn't be converted to the flag's type.
    #[error("invalid value \"{value}\" for flag {flag}: {source}")]
    InvalidValue {
        /// The flag, as it appeared on the command line.
        flag: String,
        /// The offending value text.
        value: String,
        /// Why the conversion failed.
        source: ValueError,
    },
    /// A flag marked as required was not given.
    #[error("required but missing flag {flag}<{label}>")]
    MissingRequired {
        /// The flag's names, as they are shown in usage text.
        flag: String,
        /// The flag's human-readable label.
        label: String,
    },
    /// -help, -h or -? was given without being defined. Usage has already
    /// been printed; this is a signal, not a failure.
    #[error("help requested")]
    HelpRequested,
    /// Flags were defined incorrectly (duplicate names, bad aliases). This is
    /// a programmer error, and it is never returned from parsing.
    #[error("{0}")]
    Configuration(String),
    /// Errors akin to EINVAL - essentially, an argument passed into a function
    /// was invalid in some way.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// An error encountered while trying to interact with environment
    /// variables.
    #[error("{0}")]
    EnvVar(#[from] std::env::VarError),
    /// An I/O error, generally encountered when writing usage text.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// An error encountered in parsing a logging filter's regular expression.
    #[cfg(feature = "logging")]
    #[error("{0}")]
    Regex(#[from] regex::Error),
    /// An error encountered when attempting to set the global Logger
    /// implementation.
    #[cfg(feature = "logging")]
    #[error("{0}")]
    SetLogger(#[from] log::SetLoggerError),
}

impl Error {
    /// Returns true if this "error" is really just the signal that the user
    /// asked for help, and usage was already printed.
    pub fn is_help_requested(&self) -> bool {
        match *self {
            Error::HelpRequested => true,
            _ => false,
        }
    }
}

/// A Result type which uses cmdline's internal Error type.
pub type Result<T> = std::result::Result<T, Error>;
