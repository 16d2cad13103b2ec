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

use crate::flag_set::FlagSet;
use crate::metadata;
use crate::spec::FlagSpec;
use crate::value::Kind;
use std::fmt::Write;

const SECTION_INDENT: &str = "    ";
const FLAG_HELP_INDENT: &str = "      ";

/// Re-indent every line of the given text: leading whitespace is dropped, and
/// the given head is prepended instead. Empty text stays empty.
pub fn format_line_head(text: &str, head: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", head, line.trim_start()))
        .collect::<Vec<String>>()
        .join("\n")
}

/// Extract a back-quoted name from a flag's help text, returning it along
/// with the help text sans back quotes. Given "a `file` to read" this returns
/// ("file", "a file to read"). Without back quotes, the name is the flag's
/// type name (which is empty for boolean flags).
pub fn unquote_usage(spec: &FlagSpec) -> (String, String) {
    let usage = spec.usage();
    if let Some(start) = usage.find('`') {
        if let Some(len) = usage[start + 1..].find('`') {
            let name = &usage[start + 1..start + 1 + len];
            let unquoted = format!("{}{}{}", &usage[..start], name, &usage[start + len + 2..]);
            return (name.to_owned(), unquoted);
        }
    }
    (spec.kind().type_name().to_owned(), usage.to_owned())
}

fn write_flag_help(out: &mut String, spec: &FlagSpec) {
    let (type_name, usage) = unquote_usage(spec);
    let _ = write!(out, "  {}", spec);
    if spec.is_required() {
        out.push_str("  required");
    }
    if !type_name.is_empty() {
        let _ = write!(out, "  {}", type_name);
    }
    if !spec.has_zero_default() {
        let _ = match spec.kind() {
            Kind::String => write!(out, " (default {:?})", spec.default_text()),
            _ => write!(out, " (default {})", spec.default_text()),
        };
    }
    out.push('\n');
    if !usage.is_empty() {
        out.push_str(&format_line_head(&usage, FLAG_HELP_INDENT));
        out.push('\n');
    }
}

impl FlagSet {
    /// Render the full usage text for this FlagSet: a header, the summary,
    /// a one-line synopsis, help for each flag, and finally the copyright and
    /// details sections. Flags with synonyms are only listed once.
    pub fn get_usage(&self) -> String {
        let md = metadata::metadata();
        // Writing to a String can't fail, so write! results are ignored.
        let mut out = String::new();
        let _ = writeln!(out, "Usage of ([{}] Build {}):", md.command, md.build_time);
        if !self.summary().is_empty() {
            let _ = write!(
                out,
                "  Summary:\n{}\n\n",
                format_line_head(self.summary(), SECTION_INDENT)
            );
        }

        let _ = write!(out, "  Usage:\n{}{}", SECTION_INDENT, md.command);
        for spec in self.distinct_specs() {
            let _ = match spec.is_required() {
                true => write!(out, " {}", spec),
                false => write!(out, " [{}]", spec),
            };
        }
        out.push('\n');

        for spec in self.distinct_specs() {
            write_flag_help(&mut out, spec);
        }

        if !self.copyright().is_empty() {
            let _ = write!(
                out,
                "\n  CopyRight:\n{}\n",
                format_line_head(self.copyright(), SECTION_INDENT)
            );
        }
        if !self.details().is_empty() {
            let _ = write!(
                out,
                "\n  Details:\n{}\n",
                format_line_head(self.details(), SECTION_INDENT)
            );
        }
        out
    }

    /// The usage text shown on help requests and parse failures: the custom
    /// text from `set_usage`, if any, or else `get_usage`.
    pub(crate) fn usage_text(&self) -> String {
        match self.usage_fn() {
            Some(usage) => usage(self),
            None => self.get_usage(),
        }
    }

    /// Write this FlagSet's usage text to its output.
    pub fn print_defaults(&mut self) {
        let usage = self.get_usage();
        self.write_output(&usage);
    }
}
