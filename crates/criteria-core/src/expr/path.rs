use crate::value::ValueKind;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;

///
/// Path
///
/// Ordered, non-empty list of attribute names from the record root to the
/// constrained attribute (`address.city`).
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Single-segment path.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// Extend this path with a nested attribute name.
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());

        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment: the attribute's own name.
    #[must_use]
    pub fn name(&self) -> &str {
        // constructors never produce an empty path
        self.segments.last().map_or("", String::as_str)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

// Deserialized paths keep the non-empty guarantee of the constructors.
impl<'de> Deserialize<'de> for Path {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawPath {
            segments: Vec<String>,
        }

        let raw = RawPath::deserialize(deserializer)?;
        if raw.segments.is_empty() {
            return Err(de::Error::custom("attribute path has no segments"));
        }

        Ok(Self {
            segments: raw.segments,
        })
    }
}

impl From<&str> for Path {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

///
/// AttributeRef
///
/// Identifies the constrained attribute and its declared value kind.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct AttributeRef {
    pub path: Path,
    pub kind: ValueKind,
}

impl AttributeRef {
    #[must_use]
    pub fn new(path: impl Into<Path>, kind: ValueKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl fmt::Display for AttributeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}
