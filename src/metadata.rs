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

use lazy_static::lazy_static;
use std::env;
use std::mem;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

const UNKNOWN: &str = "unknown";

/// Metadata describes the running program. Its fields are substituted for
/// the <thiscmd>, <version> and <buildtime> tags in free text like a
/// FlagSet's summary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Metadata {
    /// The command's name, by default derived from the executable's path.
    pub command: String,
    /// The program's version string.
    pub version: String,
    /// When the program was built, in whatever format the caller prefers.
    pub build_time: String,
}

impl Metadata {
    /// Replace every tag in the given string with the corresponding field.
    pub fn replace_tags(&self, s: &str) -> String {
        s.replace("<thiscmd>", &self.command)
            .replace("<buildtime>", &self.build_time)
            .replace("<version>", &self.version)
    }
}

/// Derive a command name from a program path: its file name, without any
/// extension (so "/usr/bin/ping.exe" becomes "ping").
pub fn command_from_path(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map_or_else(|| path.to_owned(), |s| s.to_string_lossy().into_owned())
}

lazy_static! {
    static ref METADATA: RwLock<Metadata> = RwLock::new(Metadata {
        command: env::args_os()
            .next()
            .map_or_else(String::new, |a| command_from_path(&a.to_string_lossy())),
        version: UNKNOWN.to_owned(),
        build_time: option_env!("CMDLINE_BUILD_TIME")
            .unwrap_or(UNKNOWN)
            .to_owned(),
    });

    // Empty if the working directory couldn't be determined.
    static ref WORK_DIR: PathBuf = env::current_dir().unwrap_or_default();
}

// Nothing panics while holding these locks, but recover from poisoning
// anyway since the data is plain strings.
fn read() -> RwLockReadGuard<'static, Metadata> {
    METADATA.read().unwrap_or_else(|e| e.into_inner())
}

fn write() -> RwLockWriteGuard<'static, Metadata> {
    METADATA.write().unwrap_or_else(|e| e.into_inner())
}

/// Returns a snapshot of the process-wide metadata.
pub fn metadata() -> Metadata {
    read().clone()
}

/// Returns the current command name.
pub fn command_name() -> String {
    read().command.clone()
}

/// Set the command name, returning the previous one.
pub fn set_command_name(command: &str) -> String {
    mem::replace(&mut write().command, command.to_owned())
}

/// Returns the current version string.
pub fn version() -> String {
    read().version.clone()
}

/// Set the version string, returning the previous one.
pub fn set_version(version: &str) -> String {
    mem::replace(&mut write().version, version.to_owned())
}

/// Returns the current build time string.
pub fn build_time() -> String {
    read().build_time.clone()
}

/// Set the build time string, returning the previous one.
pub fn set_build_time(build_time: &str) -> String {
    mem::replace(&mut write().build_time, build_time.to_owned())
}

/// Returns the process's working directory, as it was the first time this
/// was called. Later changes to the working directory are not reflected.
pub fn work_dir() -> &'static Path {
    WORK_DIR.as_path()
}

/// Replace <thiscmd>, <version> and <buildtime> tags in the given string,
/// using the process-wide metadata.
pub fn replace_tags(s: &str) -> String {
    read().replace_tags(s)
}
