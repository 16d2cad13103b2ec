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
use crate::flag_set::*;
use crate::io::SharedWriter;
use crate::metadata;
use crate::value::{Kind, Value};
use std::time::Duration;

fn new_flag_set() -> FlagSet {
    let mut flag_set = FlagSet::new("test", ErrorHandling::ContinueOnError);
    flag_set.set_output(SharedWriter::in_memory());
    flag_set
}

#[test]
fn test_defaults() {
    let mut flag_set = new_flag_set();
    let b = flag_set.bool("b", "bool", true, false, "");
    let i = flag_set.int("i", "int", -1, false, "");
    let i64_ = flag_set.int64("i64", "int64", -2, false, "");
    let u = flag_set.uint("u", "uint", 3, false, "");
    let u64_ = flag_set.uint64("u64", "uint64", 4, false, "");
    let f = flag_set.float64("f", "float", 0.5, false, "");
    let d = flag_set.duration("d", "duration", Duration::from_secs(5), false, "");
    let s = flag_set.string("s", "string", "x".to_owned(), false, "");

    assert!(flag_set.get(b));
    assert_eq!(-1, flag_set.get(i));
    assert_eq!(-2, flag_set.get(i64_));
    assert_eq!(3, flag_set.get(u));
    assert_eq!(4, flag_set.get(u64_));
    assert_eq!(0.5, flag_set.get(f));
    assert_eq!(Duration::from_secs(5), flag_set.get(d));
    assert_eq!("x", flag_set.get(s));

    assert!(!flag_set.parsed());
    assert_eq!(0, flag_set.nflag());
    assert_eq!("5s", flag_set.lookup("d").unwrap().default_text());
    assert_eq!(Kind::Duration, flag_set.lookup("d").unwrap().kind());
}

#[test]
fn test_synonyms() {
    let mut flag_set = new_flag_set();
    let n = flag_set.int("n", "count", 0, false, "");
    flag_set.var(n, "number");
    flag_set.alias("c", "number");

    let spec = flag_set.lookup("c").unwrap();
    assert_eq!(vec!["n", "number", "c"], spec.synonyms());
    assert_eq!("n", spec.name());
    assert_eq!("-n|number|c=", spec.show_name());
    assert_eq!("-n|number|c=<count>", spec.to_string());

    flag_set.set("c", "7").unwrap();
    assert_eq!(7, flag_set.get(n));
    assert!(flag_set.is_set("n"));
    assert!(flag_set.is_set("number"));
    assert_eq!(1, flag_set.nflag());
}

#[test]
fn test_positional_flags() {
    let mut flag_set = new_flag_set();
    flag_set.string("", "host", String::new(), true, "");
    flag_set.string("", "host2", String::new(), false, "");

    let host = flag_set.lookup("{noname#1}").unwrap();
    assert!(host.is_positional());
    assert_eq!("", host.show_name());
    assert_eq!("<host>", host.to_string());
    assert_eq!("host2", flag_set.lookup("{noname#2}").unwrap().label());
}

#[test]
#[should_panic(expected = "flag redefined: n")]
fn test_redefinition_panics() {
    let mut flag_set = new_flag_set();
    flag_set.int("n", "n", 0, false, "");
    flag_set.string("n", "n", String::new(), false, "");
}

#[test]
#[should_panic(expected = "flag redefined: m")]
fn test_synonym_redefinition_panics() {
    let mut flag_set = new_flag_set();
    let n = flag_set.int("n", "n", 0, false, "");
    flag_set.int("m", "m", 0, false, "");
    flag_set.var(n, "m");
}

#[test]
#[should_panic(expected = "alias target x is not defined")]
fn test_alias_of_undefined_flag_panics() {
    let mut flag_set = new_flag_set();
    flag_set.alias("y", "x");
}

#[test]
#[should_panic(expected = "positional flags cannot be synonyms")]
fn test_positional_synonym_panics() {
    let mut flag_set = new_flag_set();
    let n = flag_set.int("n", "n", 0, false, "");
    flag_set.var(n, "");
}

#[test]
#[should_panic(expected = "was not created by FlagSet")]
fn test_foreign_handle_panics() {
    let mut a = new_flag_set();
    let mut b = new_flag_set();
    let n = a.int("n", "n", 0, false, "");
    b.int("n", "n", 0, false, "");
    b.get(n);
}

#[test]
fn test_configuration_error_is_reported() {
    let output = SharedWriter::in_memory();
    let out = output.clone();
    let res = ::std::panic::catch_unwind(move || {
        let mut flag_set = FlagSet::new("test", ErrorHandling::ContinueOnError);
        flag_set.set_output(out);
        flag_set.alias("", "x");
    });
    assert!(res.is_err());
    assert_eq!("test alias name '' is not allowed\n", output.contents());
}

#[test]
fn test_set() {
    let mut flag_set = new_flag_set();
    let n = flag_set.int("n", "n", 0, false, "");

    match flag_set.set("zz", "1") {
        Err(Error::UnknownFlag(name)) => assert_eq!("zz", name),
        r => panic!("unexpected result {:?}", r),
    }

    let err = flag_set.set("n", "x").unwrap_err();
    assert_eq!("invalid value \"x\" for flag -n: invalid syntax", err.to_string());
    assert_eq!(0, flag_set.get(n));
    assert!(!flag_set.is_set("n"));

    flag_set.set("n", "0x20").unwrap();
    assert_eq!(32, flag_set.get(n));
    assert_eq!(&Value::Int(32), flag_set.lookup("n").unwrap().value());
}

#[test]
fn test_visit() {
    let mut flag_set = new_flag_set();
    let b = flag_set.bool("b", "b", false, false, "");
    flag_set.var(b, "a");
    flag_set.int("c", "c", 0, false, "");
    flag_set.string("", "pos", String::new(), false, "");
    flag_set.set("a", "true").unwrap();

    let mut all: Vec<String> = vec![];
    flag_set.visit_all(|name, _| all.push(name.to_owned()));
    assert_eq!(vec!["a", "b", "c", "{noname#1}"], all);

    let mut set: Vec<(String, String)> = vec![];
    flag_set.visit(|name, spec| set.push((name.to_owned(), spec.name().to_owned())));
    assert_eq!(vec![("a".to_owned(), "b".to_owned())], set);
}

#[test]
fn test_zero_defaults() {
    let mut flag_set = new_flag_set();
    flag_set.bool("b", "b", false, false, "");
    flag_set.int("i", "i", 0, false, "");
    flag_set.duration("d", "d", Duration::from_secs(0), false, "");
    flag_set.string("s", "s", String::new(), false, "");
    flag_set.float64("f", "f", 0.0, false, "");
    flag_set.int("j", "j", 1, false, "");

    for name in &["b", "i", "d", "s", "f"] {
        assert!(flag_set.lookup(name).unwrap().has_zero_default(), "{}", name);
    }
    assert!(!flag_set.lookup("j").unwrap().has_zero_default());
}

#[test]
fn test_free_text_swaps() {
    let mut flag_set = new_flag_set();
    assert_eq!("", flag_set.set_summary("first"));
    assert_eq!("first", flag_set.set_summary("<thiscmd> does things"));
    assert_eq!(
        format!("{} does things", metadata::command_name()),
        flag_set.summary()
    );

    assert_eq!("", flag_set.set_copyright("(c) nobody"));
    assert_eq!("(c) nobody", flag_set.copyright());
    assert_eq!("", flag_set.set_details("details"));
    assert_eq!("details", flag_set.set_details(""));
    assert_eq!("", flag_set.details());
}

#[test]
fn test_init() {
    let mut flag_set = new_flag_set();
    flag_set.init("renamed", ErrorHandling::PanicOnError);
    assert_eq!("renamed", flag_set.name());
    assert_eq!(ErrorHandling::PanicOnError, flag_set.error_handling());
}
