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

use crate::duration::*;
use crate::error::*;
use std::time::Duration;

#[test]
fn test_parse_duration() {
    assert_eq!(Ok(Duration::from_secs(0)), parse_duration("0"));
    assert_eq!(Ok(Duration::from_secs(0)), parse_duration("-0"));
    assert_eq!(Ok(Duration::from_millis(300)), parse_duration("300ms"));
    assert_eq!(Ok(Duration::from_secs(5400)), parse_duration("1.5h"));
    assert_eq!(Ok(Duration::from_secs(9900)), parse_duration("2h45m"));
    assert_eq!(Ok(Duration::from_millis(3_723_500)), parse_duration("1h2m3.5s"));
    assert_eq!(Ok(Duration::from_millis(500)), parse_duration(".5s"));
    assert_eq!(Ok(Duration::from_secs(1)), parse_duration("+1s"));
    assert_eq!(Ok(Duration::from_nanos(100)), parse_duration("100ns"));
    assert_eq!(Ok(Duration::from_micros(1)), parse_duration("1us"));
    assert_eq!(Ok(Duration::from_micros(2)), parse_duration("2\u{b5}s"));
    assert_eq!(Ok(Duration::from_micros(3)), parse_duration("3\u{3bc}s"));
}

#[test]
fn test_parse_duration_errors() {
    assert_eq!(Err(ValueError::Syntax), parse_duration(""));
    assert_eq!(Err(ValueError::Syntax), parse_duration("1"));
    assert_eq!(Err(ValueError::Syntax), parse_duration("s"));
    assert_eq!(Err(ValueError::Syntax), parse_duration("1x"));
    assert_eq!(Err(ValueError::Syntax), parse_duration("1h 2m"));
    assert_eq!(Err(ValueError::NegativeDuration), parse_duration("-1s"));
    assert_eq!(Err(ValueError::Range), parse_duration("9999999999h"));
}

#[test]
fn test_format_duration() {
    assert_eq!("0s", format_duration(&Duration::from_secs(0)));
    assert_eq!("1ns", format_duration(&Duration::from_nanos(1)));
    assert_eq!("1.5\u{b5}s", format_duration(&Duration::from_nanos(1500)));
    assert_eq!("1.5ms", format_duration(&Duration::from_micros(1500)));
    assert_eq!("2s", format_duration(&Duration::from_secs(2)));
    assert_eq!("1m30s", format_duration(&Duration::from_secs(90)));
    assert_eq!("1h0m0s", format_duration(&Duration::from_secs(3600)));
    assert_eq!("1h2m3.5s", format_duration(&Duration::from_millis(3_723_500)));
}

#[test]
fn test_formatted_duration_parses_back() {
    let d = Duration::from_nanos(98_765_432_101_234);
    assert_eq!(Ok(d), parse_duration(&format_duration(&d)));
}
