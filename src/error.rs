//! Error taxonomy for the render lifecycle.

use thiserror::Error;

/// Errors surfaced by [`Renderable`](crate::Renderable) operations.
///
/// Only [`RenderError::MissingParent`] is a pure caller error. Every other
/// variant is also routed through [`Renderable::report`](crate::Renderable::report)
/// before it is returned.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template key was not found in the registry at construction.
    #[error("missing template `{key}`")]
    TemplateResolution { key: String },

    /// `render` was called on an instance that has no parent.
    #[error("cannot render without a parent, use rendered_string instead")]
    MissingParent,

    /// Producing markup or mutating the document failed.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl RenderError {
    /// Whether this error came from markup production or tree mutation.
    pub fn is_execution(&self) -> bool {
        matches!(self, RenderError::Execution(_))
    }
}

/// Failures while turning data into an attached element.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The template could not be resolved when the instance was constructed.
    #[error("template `{key}` is not available")]
    TemplateUnavailable { key: String },

    #[error("template invocation failed: {0}")]
    Template(#[from] TemplateError),

    /// The rendered markup did not contain an element to track.
    #[error("rendered markup has no root element")]
    NoRootElement,

    /// The rendered markup has more than one top-level element.
    #[error("rendered markup has {count} root elements, expected one")]
    MultipleRootElements { count: usize },

    /// The parent was a wrapped collection with no element in it.
    #[error("parent collection is empty")]
    EmptyParentCollection,

    #[error("document operation failed: {0}")]
    Document(#[from] DocumentError),

    /// The inserted element could not be found again by its id.
    #[error("element `{id}` not found after insertion")]
    ElementNotFound { id: String },
}

/// A template failed to compile or to render its data.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TemplateError {
    message: String,
}

impl TemplateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<minijinja::Error> for TemplateError {
    fn from(error: minijinja::Error) -> Self {
        Self::new(error.to_string())
    }
}

/// Errors raised by a [`Document`](crate::Document) implementation.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Markup could not be parsed into nodes.
    #[error("malformed markup: {0}")]
    Parse(String),

    /// The operation needs an element but got another kind of node.
    #[error("node is not an element")]
    NotAnElement,

    /// The node to replace or remove is not a child of the given parent.
    #[error("node is not a child of the given parent")]
    NotAChild,

    /// The node handle does not belong to this document.
    #[error("unknown node")]
    UnknownNode,

    /// An exception raised by the host environment.
    #[error("host error: {0}")]
    Host(String),
}
