//! # Permission Attributes
//!
//! A 12-bit permission flag set attached to rendered file and directory
//! entries: owner/group/other × read/write/execute, plus the setuid, setgid,
//! and sticky bits. The composition core consumes this attribute opaquely:
//! it never computes permissions, only carries them through serialization
//! and applies them during disk writes.
//!
//! The symbolic rendering follows the conventional `ls -l` form
//! (`"rwxr-xr-x"`), substituting `s`/`S` for setuid and setgid and `t`/`T`
//! for sticky, with the uppercase form used when the corresponding execute
//! bit is clear.

use serde::{Deserialize, Serialize};
use std::fmt;

const SETUID: u32 = 0o4000;
const SETGID: u32 = 0o2000;
const STICKY: u32 = 0o1000;

/// A 12-bit Unix-style permission set.
///
/// Serializes as the raw mode number. Deserialization routes through
/// [`Permissions::from_mode`], so file-type bits above the 12 permission
/// bits are discarded on interchange as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Permissions(u32);

impl Permissions {
    /// Default permissions for files: `rw-r--r--`.
    pub const FILE_DEFAULT: Permissions = Permissions(0o644);

    /// Default permissions for directories: `rwxr-xr-x`.
    pub const DIRECTORY_DEFAULT: Permissions = Permissions(0o755);

    /// Common permissions for executable files: `rwxr-xr-x`.
    pub const EXECUTABLE: Permissions = Permissions(0o755);

    /// Create permissions from a raw mode, keeping only the low 12 bits.
    pub fn from_mode(mode: u32) -> Self {
        Self(mode & 0o7777)
    }

    /// The raw 12-bit mode.
    pub fn mode(&self) -> u32 {
        self.0
    }

    /// Whether any execute bit is set.
    pub fn is_executable(&self) -> bool {
        self.0 & 0o111 != 0
    }

    /// The symbolic nine-character rendering, e.g. `"rwxr-xr-x"`.
    pub fn symbolic(&self) -> String {
        let mut out = String::with_capacity(9);
        out.push(if self.0 & 0o400 != 0 { 'r' } else { '-' });
        out.push(if self.0 & 0o200 != 0 { 'w' } else { '-' });
        out.push(execute_char(self.0 & 0o100 != 0, self.0 & SETUID != 0, 's', 'S'));
        out.push(if self.0 & 0o040 != 0 { 'r' } else { '-' });
        out.push(if self.0 & 0o020 != 0 { 'w' } else { '-' });
        out.push(execute_char(self.0 & 0o010 != 0, self.0 & SETGID != 0, 's', 'S'));
        out.push(if self.0 & 0o004 != 0 { 'r' } else { '-' });
        out.push(if self.0 & 0o002 != 0 { 'w' } else { '-' });
        out.push(execute_char(self.0 & 0o001 != 0, self.0 & STICKY != 0, 't', 'T'));
        out
    }
}

/// Pick the execute-position character, honoring a special bit.
fn execute_char(execute: bool, special: bool, with_execute: char, without_execute: char) -> char {
    match (execute, special) {
        (true, true) => with_execute,
        (false, true) => without_execute,
        (true, false) => 'x',
        (false, false) => '-',
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::FILE_DEFAULT
    }
}

impl From<u32> for Permissions {
    fn from(mode: u32) -> Self {
        Self::from_mode(mode)
    }
}

impl From<Permissions> for u32 {
    fn from(permissions: Permissions) -> Self {
        permissions.mode()
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbolic())
    }
}
