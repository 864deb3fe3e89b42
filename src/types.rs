use std::fmt;

/// One segment of a path.
///
/// The two root sentinels stand for a path that starts with exactly one or exactly
/// two separators. They compare by tag, so `RootSlash` never equals a
/// `Literal("/")`.
///
/// Sentinels order before literals; literals order by their bytes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Component {
    /// A leading `/`.
    RootSlash,
    /// A leading `//`, which POSIX leaves implementation-defined.
    RootDoubleSlash,
    /// A plain path segment.
    Literal(String),
}

impl Component {
    pub fn is_root(&self) -> bool {
        matches!(self, Component::RootSlash | Component::RootDoubleSlash)
    }

    /// The literal text, with sentinels turned back into `/` and `//`.
    pub fn as_str(&self) -> &str {
        match self {
            Component::RootSlash => "/",
            Component::RootDoubleSlash => "//",
            Component::Literal(text) => text,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Component {
    fn from(text: &str) -> Self {
        Component::Literal(text.to_string())
    }
}
