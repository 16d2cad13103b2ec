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
use crate::flag_set::FlagSet;
use crate::io::SharedWriter;
use crate::spec::Handle;
use log::{LevelFilter, Log, Metadata, Record};
use regex::Regex;
use std::env::{self, VarError};
use std::io::{self, Write};
use std::str::FromStr;

const RUST_LOG_ENV_VAR: &str = "RUST_LOG";

/// The name of the flag LogFlags declares.
pub const LOG_FLAG_NAME: &str = "log";

/// A function which returns a handle to write log output to.
pub type LogOutputFactory = Box<dyn Fn() -> Box<dyn Write> + Send + Sync>;

/// Parse a LevelFilter from its name, ignoring case and surrounding
/// whitespace.
pub fn parse_log_level_filter(s: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(s.trim())
        .map_err(|_| Error::InvalidArgument(format!("invalid log level '{}'", s)))
}

/// LogFilter sets the maximum enabled level for some set of modules.
#[derive(Debug)]
pub struct LogFilter {
    /// This LogFilter applies to any modules which match this regular
    /// expression. If this is None, it applies to *all* modules.
    pub module: Option<Regex>,

    /// The LevelFilter which should be applied to matching modules.
    pub level: LevelFilter,
}

impl LogFilter {
    /// The LevelFilter this LogFilter applies to the given module, or None if
    /// it doesn't match the module at all.
    pub fn max_level_for(&self, module_path: &str) -> Option<LevelFilter> {
        match self.module {
            None => Some(self.level),
            Some(ref module) => match module.is_match(module_path) {
                false => None,
                true => Some(self.level),
            },
        }
    }
}

impl FromStr for LogFilter {
    type Err = Error;

    /// Parse a filter like "module=level" (where module is a regex anchored
    /// at the start of the module path), or just "level".
    fn from_str(s: &str) -> Result<LogFilter> {
        match s.rfind('=') {
            None => Ok(LogFilter {
                module: None,
                level: parse_log_level_filter(s)?,
            }),
            Some(eq_pos) => Ok(LogFilter {
                module: Some(Regex::new(&format!("^{}", &s[..eq_pos]))?),
                level: parse_log_level_filter(&s[eq_pos + 1..])?,
            }),
        }
    }
}

/// LogFilters is a list of LogFilter, separated by ';' in text form.
#[derive(Debug)]
pub struct LogFilters(pub Vec<LogFilter>);

impl LogFilters {
    /// Returns the LevelFilter for the given module. If several filters match,
    /// the most restrictive one wins. If none do, everything is enabled.
    pub fn max_level_for(&self, module_path: &str) -> LevelFilter {
        self.0
            .iter()
            .filter_map(|f| f.max_level_for(module_path))
            .min()
            .unwrap_or(LevelFilter::Trace)
    }
}

impl FromStr for LogFilters {
    type Err = Error;

    fn from_str(s: &str) -> Result<LogFilters> {
        let filters: Result<Vec<LogFilter>> = s
            .split(';')
            .filter(|f| !f.trim().is_empty())
            .map(|f| f.parse())
            .collect();
        Ok(LogFilters(filters?))
    }
}

/// Options configures a Logger.
pub struct Options {
    /// Filters controlling which log statements are enabled.
    pub filters: LogFilters,
    /// The highest level enabled by any of `filters`.
    pub max_level: LevelFilter,
    /// Where to write log output to.
    pub output_factory: LogOutputFactory,
    /// If true, call flush() after every log statement.
    pub always_flush: bool,
}

/// OptionsBuilder constructs Options, filling in defaults for anything left
/// unspecified.
#[derive(Default)]
pub struct OptionsBuilder {
    filters: Option<LogFilters>,
    output_factory: Option<LogOutputFactory>,
    always_flush: Option<bool>,
}

impl OptionsBuilder {
    /// Construct a builder with nothing specified.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given filters, instead of reading RUST_LOG.
    pub fn set_filters(mut self, filters: LogFilters) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Write log output using the given factory, instead of to stderr.
    pub fn set_output_factory(mut self, output_factory: LogOutputFactory) -> Self {
        self.output_factory = Some(output_factory);
        self
    }

    /// Write log output to the given writer, instead of to stderr.
    pub fn set_output_to<T: Write + Send + 'static>(self, output_writer: T) -> Self {
        let writer = SharedWriter::new(output_writer);
        self.set_output_factory(Box::new(move || -> Box<dyn Write> { Box::new(writer.clone()) }))
    }

    /// Flush after every log statement.
    pub fn set_always_flush(mut self, always_flush: bool) -> Self {
        self.always_flush = Some(always_flush);
        self
    }

    /// Build the Options. Without explicit filters, they are read from the
    /// RUST_LOG environment variable; if that isn't set either, every log
    /// statement is enabled.
    pub fn build(self) -> Result<Options> {
        let filters: LogFilters = match self.filters {
            Some(filters) => filters,
            None => match env::var(RUST_LOG_ENV_VAR) {
                Ok(filters) => filters.parse()?,
                Err(VarError::NotPresent) => LogFilters(vec![]),
                Err(e) => return Err(e.into()),
            },
        };
        let max_level: LevelFilter = filters
            .0
            .iter()
            .map(|f| f.level)
            .max()
            .unwrap_or(LevelFilter::Trace);

        Ok(Options {
            filters: filters,
            max_level: max_level,
            output_factory: self
                .output_factory
                .unwrap_or_else(|| Box::new(|| -> Box<dyn Write> { Box::new(io::stderr()) })),
            always_flush: self.always_flush.unwrap_or(false),
        })
    }
}

/// Format a log record as a single line, prefixed with a UTC timestamp and
/// the source location.
pub fn format_log_record(record: &Record) -> String {
    format!(
        "[{} {}:{}] {} - {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        record.file().unwrap_or("UNKNOWN_FILE"),
        record
            .line()
            .map_or("UNKNOWN_LINE".to_owned(), |l| l.to_string()),
        record.level(),
        record.args()
    )
}

/// Logger is a log::Log implementation configured with Options.
pub struct Logger {
    options: Options,
}

impl Logger {
    /// Construct a new Logger. It still has to be installed with try_init.
    pub fn new(options: Options) -> Self {
        Logger { options: options }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.options.max_level
    }

    fn log(&self, record: &Record) {
        let module = record.module_path().unwrap_or("");
        if record.level() > self.options.filters.max_level_for(module) {
            return;
        }

        // Logging must never take the program down, so failures are dropped.
        let _ = writeln!((self.options.output_factory)(), "{}", format_log_record(record));
        if self.options.always_flush {
            self.flush();
        }
    }

    fn flush(&self) {
        let _ = (self.options.output_factory)().flush();
    }
}

/// Install a Logger with the given options as the global logger. This fails
/// if some logger was already installed.
pub fn try_init(options: Options) -> Result<()> {
    let logger = Logger::new(options);
    log::set_max_level(logger.options.max_level);
    log::set_boxed_logger(Box::new(logger))?;
    Ok(())
}

/// LogFlags adds a flag to a FlagSet which configures logging, so programs
/// get "-log=<filters>" for free.
#[derive(Clone, Copy, Debug)]
pub struct LogFlags {
    filters: Handle<String>,
}

impl LogFlags {
    /// Define the optional "-log" flag on the given FlagSet.
    pub fn declare(flag_set: &mut FlagSet) -> Self {
        LogFlags {
            filters: flag_set.string(
                LOG_FLAG_NAME,
                "filters",
                String::new(),
                false,
                "log `filters` like 'module=level;level' (overrides RUST_LOG)",
            ),
        }
    }

    /// Build logging options from the parsed flag. If it was left empty,
    /// filters come from RUST_LOG as usual.
    pub fn options(&self, flag_set: &FlagSet) -> Result<Options> {
        let filters = flag_set.get(self.filters);
        let builder = match filters.trim().is_empty() {
            true => OptionsBuilder::new(),
            false => OptionsBuilder::new().set_filters(filters.parse()?),
        };
        builder.build()
    }
}
