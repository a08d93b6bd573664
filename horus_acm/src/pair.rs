//! Canonical link pairs
//!
//! An allowed collision is symmetric, so every pair of link names is stored
//! in one canonical orientation: the lexicographically smaller name first.

use std::fmt;

/// Unordered pair of link names, stored as `(min, max)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkPair {
    first: String,
    second: String,
}

impl LinkPair {
    /// Create a canonical pair from two link names in any order
    pub fn new(link_name1: impl Into<String>, link_name2: impl Into<String>) -> Self {
        let link_name1 = link_name1.into();
        let link_name2 = link_name2.into();

        if link_name1 <= link_name2 {
            Self {
                first: link_name1,
                second: link_name2,
            }
        } else {
            Self {
                first: link_name2,
                second: link_name1,
            }
        }
    }

    /// Lexicographically smaller link name
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Lexicographically larger link name
    pub fn second(&self) -> &str {
        &self.second
    }

    /// True if either side of the pair is `link_name`
    pub fn contains(&self, link_name: &str) -> bool {
        self.first == link_name || self.second == link_name
    }

    /// The other side of the pair, if `link_name` is one of its members
    pub fn partner(&self, link_name: &str) -> Option<&str> {
        if self.first == link_name {
            Some(&self.second)
        } else if self.second == link_name {
            Some(&self.first)
        } else {
            None
        }
    }

    /// Both names refer to the same link
    pub fn is_self_pair(&self) -> bool {
        self.first == self.second
    }

    /// Consume the pair into `(first, second)`
    pub fn into_names(self) -> (String, String) {
        (self.first, self.second)
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for LinkPair {
    fn from((a, b): (A, B)) -> Self {
        Self::new(a, b)
    }
}

impl fmt::Display for LinkPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}
