//! Path codec: fixed-width node-id tokens concatenated into path strings.
//!
//! Every node id has exactly [`ID_LENGTH`] ascii characters, which is what
//! makes path splitting unambiguous without delimiters. The empty path
//! addresses the root.

use std::fmt;
use std::str::FromStr;

use crate::errors::{TreeError, TreeResult};

/// Fixed token width shared by every id in a tree.
pub const ID_LENGTH: usize = 2;

/// Sibling-unique node identifier, exactly [`ID_LENGTH`] ascii characters.
///
/// Ids are not unique tree-wide; uniqueness is only required among the
/// children of one parent.
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId([u8; ID_LENGTH]);

impl NodeId {
    pub fn new(token: &str) -> TreeResult<Self> {
        let bytes = token.as_bytes();
        if bytes.len() != ID_LENGTH || !token.is_ascii() {
            return Err(TreeError::MalformedId {
                token: token.to_string(),
                expected: ID_LENGTH,
            });
        }
        let mut id = [0u8; ID_LENGTH];
        id.copy_from_slice(bytes);
        Ok(Self(id))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self)
    }
}

impl FromStr for NodeId {
    type Err = TreeError;

    fn from_str(s: &str) -> TreeResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for NodeId {
    type Error = TreeError;

    fn try_from(s: String) -> TreeResult<Self> {
        Self::new(&s)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}

/// Token-concatenated address of a node relative to the root.
///
/// Validated on construction: the length must be a multiple of
/// [`ID_LENGTH`]. All codec operations are pure string slicing.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct TreePath(String);

impl TreePath {
    /// The empty path, addressing the root itself.
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn new(path: impl Into<String>) -> TreeResult<Self> {
        let path = path.into();
        if path.len() % ID_LENGTH != 0 || !path.is_ascii() {
            return Err(TreeError::MalformedPath {
                path,
                expected: ID_LENGTH,
            });
        }
        Ok(Self(path))
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// First token, or `None` for the empty path. The `None` sentinel is
    /// what terminates every traversal loop.
    pub fn head(&self) -> Option<NodeId> {
        self.tokens().next()
    }

    /// Everything after the first token.
    pub fn tail(&self) -> TreePath {
        Self(self.0[ID_LENGTH.min(self.0.len())..].to_string())
    }

    /// Everything but the last token.
    pub fn init(&self) -> TreePath {
        Self(self.0[..self.0.len().saturating_sub(ID_LENGTH)].to_string())
    }

    /// Last token, or `None` for the empty path.
    pub fn last(&self) -> Option<NodeId> {
        self.tokens().last()
    }

    pub fn append(&self, id: NodeId) -> TreePath {
        Self(format!("{}{}", self.0, id))
    }

    pub fn token_count(&self) -> usize {
        self.0.len() / ID_LENGTH
    }

    /// Zero-allocation iterator over the path's tokens, in root-to-leaf
    /// order. This is the workhorse behind all tree traversals.
    pub fn tokens(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.as_bytes().chunks(ID_LENGTH).map(|chunk| {
            let mut id = [0u8; ID_LENGTH];
            id.copy_from_slice(chunk);
            NodeId(id)
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TreePath({:?})", self.0)
    }
}

impl FromStr for TreePath {
    type Err = TreeError;

    fn from_str(s: &str) -> TreeResult<Self> {
        Self::new(s)
    }
}
