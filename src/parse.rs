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
use crate::flag_set::{ErrorHandling, FlagSet};
use crate::spec::positional_name;
use log::debug;
use std::collections::VecDeque;
use std::process;

/// The exit code used when parsing fails under ErrorHandling::ExitOnError.
pub(crate) const EXIT_PARSE_FAILURE: i32 = 2;

/// Names which print usage instead of failing, unless a flag by that name was
/// actually defined.
const HELP_NAMES: &[&str] = &["help", "h", "?"];

fn is_flag_prefix(c: char) -> bool {
    c == '-' || c == '/'
}

/// Split a flag argument like "--name=value" into its name and inline value.
/// One or two leading dashes, or a single slash, are removed. The value is
/// empty if there is no '='.
fn split_flag(arg: &str) -> (&str, &str) {
    let trimmed = match arg.starts_with("--") {
        true => &arg[2..],
        false => &arg[1..],
    };
    match trimmed.find('=') {
        None => (trimmed, ""),
        Some(eq) => (&trimmed[..eq], &trimmed[eq + 1..]),
    }
}

impl FlagSet {
    /// Parse flag values from the given arguments, which should not include
    /// the command name. Flags and positional arguments may be interleaved in
    /// any order; positional arguments fill positional flags in the order the
    /// flags were defined. Parsing stops at the first "-", "--" or "/"
    /// argument (or an empty one), and that argument and the rest are
    /// available via `args`.
    ///
    /// Once all arguments are consumed, every required flag must have been
    /// given. Errors are handled according to this FlagSet's ErrorHandling,
    /// except for Error::HelpRequested, which is always returned.
    pub fn parse<I, S>(&mut self, arguments: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parsed = true;
        self.actual.clear();
        self.auto_id = 0;

        let mut args: VecDeque<String> = arguments.into_iter().map(|a| a.into()).collect();
        let mut res = Ok(());
        loop {
            match self.parse_one(&mut args) {
                Ok(true) => continue,
                Ok(false) => break,
                Err(e) => {
                    res = Err(e);
                    break;
                }
            }
        }
        self.args = args.into_iter().collect();

        if let Err(e) = res.and_then(|_| self.check_required()) {
            if e.is_help_requested() {
                return Err(e);
            }
            return Err(self.handle_error(e));
        }

        debug!(
            "{}: parsed {} flag(s), {} argument(s) left over",
            self.name(),
            self.actual.len(),
            self.args.len()
        );
        Ok(())
    }

    /// Consume the next flag (and possibly its value) from the front of the
    /// argument list. Returns false if there are no more flags to parse.
    fn parse_one(&mut self, args: &mut VecDeque<String>) -> Result<bool> {
        let arg: String = match args.front() {
            None => return Ok(false),
            Some(a) => a.clone(),
        };
        match arg.as_str() {
            "" | "-" | "--" | "/" => return Ok(false),
            _ => {}
        }

        let positional = !arg.starts_with(is_flag_prefix);
        let (name, mut value): (String, String) = match positional {
            true => {
                self.auto_id += 1;
                (positional_name(self.auto_id), arg.clone())
            }
            false => {
                let (name, value) = split_flag(&arg);
                (name.to_owned(), value.to_owned())
            }
        };
        if name.is_empty() || name.starts_with(is_flag_prefix) || name.starts_with('=') {
            return Err(Error::Syntax(arg));
        }
        args.pop_front();

        let index = match self.formal.get(&name).copied() {
            Some(index) => index,
            None if positional => return Err(Error::UnexpectedArgument(arg)),
            None if HELP_NAMES.contains(&name.as_str()) => {
                let usage = self.usage_text();
                self.write_output(&usage);
                return Err(Error::HelpRequested);
            }
            None => return Err(Error::UnknownFlag(name)),
        };

        if self.specs[index].kind().is_boolean() {
            // Boolean flags never take the next argument as their value.
            if value.is_empty() {
                value = "true".to_owned();
            }
        } else {
            // Tolerate "-f =x", "-f= x" and "-f = x" by skipping over empty
            // and bare "=" pieces.
            while !args.is_empty() && (value.is_empty() || value == "=") {
                let next = args.pop_front().unwrap_or_default();
                value = match next.strip_prefix('=') {
                    Some(v) => v.to_owned(),
                    None => next,
                };
            }
            if value.is_empty() || value == "=" {
                return Err(Error::MissingValue(name));
            }
        }

        let flag = match positional {
            true => format!("<{}>", self.specs[index].label()),
            false => format!("-{}", name),
        };
        if let Err(e) = self.specs[index].value_mut().set(&value) {
            return Err(Error::InvalidValue {
                flag: flag,
                value: value,
                source: e,
            });
        }
        debug!("{}: {} = {}", self.name(), flag, self.specs[index].value());

        self.actual.insert(name, index);
        Ok(true)
    }

    /// Check that every required flag was given. Synonyms are checked once,
    /// together, and only the first missing flag (in name order) is reported.
    pub(crate) fn check_required(&self) -> Result<()> {
        match self
            .distinct_specs()
            .find(|spec| spec.is_required() && !self.is_seen(spec))
        {
            None => Ok(()),
            Some(spec) => Err(Error::MissingRequired {
                flag: spec.show_name(),
                label: spec.label().to_owned(),
            }),
        }
    }

    /// Report a parse failure, then deal with it according to this
    /// FlagSet's ErrorHandling. Only returns under ContinueOnError.
    fn handle_error(&mut self, err: Error) -> Error {
        let report = format!("[error] {}\n{}", err, self.usage_text());
        self.write_output(&report);
        match self.error_handling() {
            ErrorHandling::ContinueOnError => err,
            ErrorHandling::ExitOnError => process::exit(EXIT_PARSE_FAILURE),
            ErrorHandling::PanicOnError => panic!("{}", err),
        }
    }
}
