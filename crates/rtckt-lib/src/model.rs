//! Core data types for rtckt-lib.
//!
//! A ticket file holds exactly one [`Ticket`]; its `status` is written as
//! the integer codes 0 (open), 1 (blocked) and 2 (closed).

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TicketError};

/// Extension of every ticket file.
pub const TICKET_EXTENSION: &str = "json";

/// Ticket lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Open,
    Blocked,
    Closed,
}

impl Status {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Blocked => "blocked",
            Self::Closed => "closed",
        }
    }

    /// Integer code used in ticket files.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Blocked => 1,
            Self::Closed => 2,
        }
    }

    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Open),
            1 => Some(Self::Blocked),
            2 => Some(Self::Closed),
            _ => None,
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let code = i64::deserialize(deserializer)?;
        Self::from_code(code).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown status code {code}, expected 0, 1 or 2"))
        })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" | "0" => Ok(Self::Open),
            "blocked" | "1" => Ok(Self::Blocked),
            "closed" | "2" => Ok(Self::Closed),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

/// A ticket record.
///
/// `name` is both the identity and the filename stem within the
/// containing project directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ticket {
    pub name: String,

    /// Names of sibling tickets that must close first. Order and
    /// duplicates carry no meaning.
    #[serde(default)]
    pub dependencies: Vec<String>,

    pub status: Status,

    #[serde(default)]
    pub detail: String,
}

impl Ticket {
    /// Build a new ticket, deriving its initial status.
    ///
    /// The status is `Blocked` when any dependency is given and `Open`
    /// otherwise. This is the only place status is derived from
    /// dependencies; afterwards it changes only through a close cascade.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        detail: impl Into<String>,
        dependencies: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut deps: Vec<String> = Vec::new();
        for dep in dependencies {
            let dep = dep.into();
            if !deps.contains(&dep) {
                deps.push(dep);
            }
        }

        let status = if deps.is_empty() {
            Status::Open
        } else {
            Status::Blocked
        };

        Self {
            name: name.into(),
            dependencies: deps,
            status,
            detail: detail.into(),
        }
    }

    /// Filename this ticket is stored under.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{TICKET_EXTENSION}", self.name)
    }

    #[must_use]
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.iter().any(|dep| dep == name)
    }

    /// Remove every occurrence of `name` from the dependency list.
    ///
    /// Removal swaps the last element into the freed slot, so the
    /// remaining order is not preserved. Returns how many entries were
    /// removed; removing an absent name is a no-op.
    pub fn remove_dependency(&mut self, name: &str) -> usize {
        let mut removed = 0;
        let mut i = 0;
        while i < self.dependencies.len() {
            if self.dependencies[i] == name {
                self.dependencies.swap_remove(i);
                removed += 1;
            } else {
                i += 1;
            }
        }
        removed
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == Status::Closed
    }
}

/// Check that a ticket name can be used as a filename stem.
///
/// # Errors
///
/// Returns `InvalidName` if the name is empty, `.` or `..`, or contains a
/// path separator or NUL byte.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(TicketError::invalid_name(name, "cannot be empty"));
    }
    if name == "." || name == ".." {
        return Err(TicketError::invalid_name(name, "reserved path component"));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(TicketError::invalid_name(
            name,
            "cannot contain path separators",
        ));
    }
    Ok(())
}
