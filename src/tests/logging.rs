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

use crate::flag_set::{ErrorHandling, FlagSet};
use crate::io::SharedWriter;
use crate::logging::*;
use log::{Level, LevelFilter, Log, Metadata, Record};

#[test]
fn test_parse_log_level_filter() {
    assert_eq!(LevelFilter::Off, parse_log_level_filter(" OfF ").unwrap());
    assert_eq!(LevelFilter::Error, parse_log_level_filter(" eRroR ").unwrap());
    assert_eq!(LevelFilter::Warn, parse_log_level_filter(" wArN ").unwrap());
    assert_eq!(LevelFilter::Info, parse_log_level_filter(" InFo ").unwrap());
    assert_eq!(LevelFilter::Debug, parse_log_level_filter(" dEbUg ").unwrap());
    assert_eq!(LevelFilter::Trace, parse_log_level_filter(" tRaCe ").unwrap());

    assert!(parse_log_level_filter("foobar").is_err());
    assert!(parse_log_level_filter("").is_err());
    assert!(parse_log_level_filter("   ").is_err());
}

fn assert_log_filter_level(filter: &str, module_path: &str, expected_level: Option<LevelFilter>) {
    let filter: LogFilter = filter.parse().unwrap();
    assert_eq!(expected_level, filter.max_level_for(module_path));
}

#[test]
fn test_log_filter() {
    assert_log_filter_level("info", "main", Some(LevelFilter::Info));
    assert_log_filter_level("main=info", "main::submodule", Some(LevelFilter::Info));
    assert_log_filter_level("foo::bar=debug", "foo", None);
    assert_log_filter_level("foo::bar=debug", "foo::bar::baz", Some(LevelFilter::Debug));
    assert!("foo=nope".parse::<LogFilter>().is_err());
    assert!("(=info".parse::<LogFilter>().is_err());
}

#[test]
fn test_log_filters() {
    let filters: LogFilters = "main=info;foo::bar=debug".parse().unwrap();
    assert_eq!(2, filters.0.len());
    assert_eq!(LevelFilter::Info, filters.max_level_for("main::submodule"));
    assert_eq!(LevelFilter::Debug, filters.max_level_for("foo::bar"));
    assert_eq!(LevelFilter::Trace, filters.max_level_for("other"));

    // When several filters match, the most restrictive one wins.
    let filters: LogFilters = "main=info;warn".parse().unwrap();
    assert_eq!(LevelFilter::Warn, filters.max_level_for("main"));

    let filters: LogFilters = "".parse().unwrap();
    assert_eq!(LevelFilter::Trace, filters.max_level_for("anything"));
}

#[test]
fn test_logger_enabled() {
    let options = OptionsBuilder::new()
        .set_filters("error".parse().unwrap())
        .build()
        .unwrap();
    let logger = Logger::new(options);
    assert!(logger.enabled(&Metadata::builder().level(Level::Error).build()));
    assert!(!logger.enabled(&Metadata::builder().level(Level::Warn).build()));

    let options = OptionsBuilder::new()
        .set_filters("info".parse().unwrap())
        .build()
        .unwrap();
    let logger = Logger::new(options);
    assert!(logger.enabled(&Metadata::builder().level(Level::Warn).build()));
    assert!(logger.enabled(&Metadata::builder().level(Level::Info).build()));
    assert!(!logger.enabled(&Metadata::builder().level(Level::Debug).build()));
}

#[test]
fn test_logger_enabled_ignores_module_filters() {
    // Module filters apply to a record's module path in log(); enabled()
    // only knows the target, so it goes by the overall maximum level.
    let output = SharedWriter::in_memory();
    let options = OptionsBuilder::new()
        .set_filters("quiet=error;info".parse().unwrap())
        .set_output_to(output.clone())
        .build()
        .unwrap();
    let logger = Logger::new(options);
    let metadata = Metadata::builder().level(Level::Warn).target("quiet").build();
    assert!(logger.enabled(&metadata));
    assert!(!logger.enabled(&Metadata::builder().level(Level::Debug).target("quiet").build()));

    logger.log(
        &Record::builder()
            .args(format_args!("suppressed"))
            .level(Level::Warn)
            .target("elsewhere")
            .module_path(Some("quiet"))
            .build(),
    );
    assert_eq!("", output.contents());
}

#[test]
fn test_logger_output() {
    let output = SharedWriter::in_memory();
    let options = OptionsBuilder::new()
        .set_filters("quiet=error;info".parse().unwrap())
        .set_output_to(output.clone())
        .set_always_flush(true)
        .build()
        .unwrap();
    let logger = Logger::new(options);

    logger.log(
        &Record::builder()
            .args(format_args!("hello {}", 42))
            .level(Level::Info)
            .target("noisy")
            .module_path(Some("noisy"))
            .file(Some("noisy.rs"))
            .line(Some(7))
            .build(),
    );
    logger.log(
        &Record::builder()
            .args(format_args!("suppressed"))
            .level(Level::Warn)
            .target("quiet")
            .module_path(Some("quiet"))
            .build(),
    );

    let contents = output.contents();
    assert!(contents.ends_with(" noisy.rs:7] INFO - hello 42\n"), "{}", contents);
    assert_eq!(1, contents.lines().count());
}

#[test]
fn test_log_flags() {
    let mut flag_set = FlagSet::new("test", ErrorHandling::ContinueOnError);
    flag_set.set_output(SharedWriter::in_memory());
    let log_flags = LogFlags::declare(&mut flag_set);
    assert!(flag_set.lookup(LOG_FLAG_NAME).is_some());

    flag_set
        .parse(vec!["-log=foo=debug;bar=warn"])
        .unwrap();
    let options = log_flags.options(&flag_set).unwrap();
    assert_eq!(LevelFilter::Debug, options.max_level);
    assert_eq!(LevelFilter::Debug, options.filters.max_level_for("foo::x"));
    assert_eq!(LevelFilter::Warn, options.filters.max_level_for("bar"));

    flag_set.parse(vec!["-log=foo=loud"]).unwrap();
    assert!(log_flags.options(&flag_set).is_err());
}
