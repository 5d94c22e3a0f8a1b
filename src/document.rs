//! Document abstraction the render lifecycle mutates.

use crate::error::DocumentError;

/// The document operations a [`Renderable`](crate::Renderable) relies on.
///
/// Implement this trait to attach views to your document model (a browser
/// DOM, a server-side tree, a test double, etc.). The lifecycle calls exactly
/// these operations and nothing else.
///
/// Node handles are cheap references into the document; the document owns the
/// nodes. Two handles compare equal when they refer to the same node.
///
/// Appending or replacing with a fragment moves the fragment's children into
/// the target position and leaves the fragment empty.
pub trait Document {
    type Node: Clone + PartialEq;

    /// Create a detached, empty fragment.
    fn create_fragment(&self) -> Result<Self::Node, DocumentError>;

    /// Create a detached element with the given tag name.
    fn create_element(&self, tag: &str) -> Result<Self::Node, DocumentError>;

    /// Parse `markup` and make the result the children of `node`.
    fn set_inner_markup(&self, node: &Self::Node, markup: &str) -> Result<(), DocumentError>;

    /// The first element child of `node`, skipping text and comments.
    fn first_element_child(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Number of element children of `node`.
    fn element_child_count(&self, node: &Self::Node) -> usize;

    /// Assign the element identifier of `node`.
    fn set_id(&self, node: &Self::Node, id: &str) -> Result<(), DocumentError>;

    /// Append `child` as the last child of `parent`.
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), DocumentError>;

    /// Put `new` where `old` is under `parent`, detaching `old`.
    fn replace_child(
        &self,
        parent: &Self::Node,
        new: &Self::Node,
        old: &Self::Node,
    ) -> Result<(), DocumentError>;

    /// Detach `child` from `parent`.
    fn remove_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), DocumentError>;

    /// Find the attached element whose identifier is `id`.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
}

/// The container a view renders into.
///
/// `Collection` covers the wrapped-collection handles some DOM wrappers pass
/// around; it is unwrapped to its first element.
#[derive(Debug, Clone, PartialEq)]
pub enum Parent<N> {
    Node(N),
    Collection(Vec<N>),
}

impl<N> Parent<N> {
    /// Normalize to a raw node handle.
    ///
    /// An empty collection yields `None`; the lifecycle keeps such a parent
    /// as configured but unusable.
    pub fn into_node(self) -> Option<N> {
        match self {
            Parent::Node(node) => Some(node),
            Parent::Collection(nodes) => nodes.into_iter().next(),
        }
    }
}
