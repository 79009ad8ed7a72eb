//! Typed value paths.
//!
//! A path addresses one slot in a record's value tree:
//! `basic_information.tags.0.value` is the `value` key of the first element
//! of the `tags` array in the `basic_information` section. Segments are typed
//! (field name or array index) rather than raw string fragments, so index
//! arithmetic and key lookups cannot be confused.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use eduforge_core::DomainError;

/// One step into the value tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

/// An ordered list of segments, starting at the section key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ValuePath(Vec<PathSegment>);

impl ValuePath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    /// Root-level path `section.field`.
    pub fn field(section_key: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self(vec![
            PathSegment::Field(section_key.into()),
            PathSegment::Field(field_name.into()),
        ])
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.0.push(PathSegment::Field(name.into()));
        next
    }

    pub fn element(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.0.push(PathSegment::Index(index));
        next
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            fmt::Display::fmt(segment, f)?;
        }
        Ok(())
    }
}

impl FromStr for ValuePath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DomainError::validation("value path cannot be empty"));
        }
        let mut segments = Vec::new();
        for part in s.split('.') {
            if part.is_empty() {
                return Err(DomainError::validation(format!(
                    "value path \"{s}\" has an empty segment"
                )));
            }
            // All-digit segments are array indices.
            if part.chars().all(|c| c.is_ascii_digit()) {
                let index = part
                    .parse::<usize>()
                    .map_err(|_| DomainError::validation(format!("index segment \"{part}\" out of range")))?;
                segments.push(PathSegment::Index(index));
            } else {
                segments.push(PathSegment::Field(part.to_string()));
            }
        }
        Ok(Self(segments))
    }
}

impl Serialize for ValuePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ValuePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
