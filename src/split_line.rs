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

use log::trace;

fn is_space(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

fn is_quote(c: u8) -> bool {
    c == b'\'' || c == b'"'
}

fn is_quote_char(c: char) -> bool {
    c == '\'' || c == '"'
}

/// Strip a single quote character from each end of the token, if that is
/// what it starts or ends with. Interior quotes are left alone.
fn strip_boundary_quotes(token: &str) -> &str {
    let token = token.strip_prefix(is_quote_char).unwrap_or(token);
    token.strip_suffix(is_quote_char).unwrap_or(token)
}

/// Split a raw command line into argv-style tokens.
///
/// Tokens are separated by runs of spaces and tabs. Either kind of quote
/// character toggles a quoted span, inside of which whitespace doesn't split;
/// an unbalanced quote makes the rest of the line one token. A quote which is
/// the very first or very last character of a token is removed from it.
///
/// An explicitly quoted empty argument (`""` or `''`) becomes an empty token.
/// FlagSet::parse treats an empty argument as the end of flags, and a
/// value-taking flag skips over it, so `-s "" -n=1` gives -s the value
/// "-n=1".
///
/// ```
/// assert_eq!(
///     vec!["ping", "-n=", "2", " --x = 5 ", "a"],
///     cmdline::split_line("ping  -n= \t2 \" --x = 5 \" a")
/// );
/// ```
pub fn split_line(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut tokens: Vec<&str> = vec![];
    let mut in_quotes = false;
    let mut start: Option<usize> = None;

    // Quotes and whitespace are ASCII, so every index we slice at is a char
    // boundary.
    for (i, &c) in bytes.iter().enumerate() {
        if is_quote(c) {
            in_quotes = !in_quotes;
        }

        if !in_quotes && is_space(c) {
            if let Some(s) = start.take() {
                tokens.push(strip_boundary_quotes(&line[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(strip_boundary_quotes(&line[s..]));
    }

    trace!("split {:?} into {:?}", line, tokens);
    tokens
}
