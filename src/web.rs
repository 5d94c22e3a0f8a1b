//! Browser DOM binding.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Node};

use crate::error::DocumentError;
use crate::Document;

/// A [`Document`] backed by the browser's DOM through `web-sys`.
///
/// Only available with the `web` feature. JavaScript exceptions raised by
/// the DOM surface as [`DocumentError::Host`].
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// The document of the current window, if there is one.
    pub fn from_window() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    /// The document's `<body>` as a node handle.
    pub fn body(&self) -> Option<Node> {
        self.document.body().map(Node::from)
    }
}

impl Document for WebDocument {
    type Node = Node;

    fn create_fragment(&self) -> Result<Node, DocumentError> {
        Ok(self.document.create_document_fragment().into())
    }

    fn create_element(&self, tag: &str) -> Result<Node, DocumentError> {
        self.document
            .create_element(tag)
            .map(Node::from)
            .map_err(host_error)
    }

    fn set_inner_markup(&self, node: &Node, markup: &str) -> Result<(), DocumentError> {
        as_element(node)?.set_inner_html(markup);
        Ok(())
    }

    fn first_element_child(&self, node: &Node) -> Option<Node> {
        node.dyn_ref::<Element>()?
            .first_element_child()
            .map(Node::from)
    }

    fn element_child_count(&self, node: &Node) -> usize {
        node.dyn_ref::<Element>()
            .map_or(0, |element| element.child_element_count() as usize)
    }

    fn set_id(&self, node: &Node, id: &str) -> Result<(), DocumentError> {
        as_element(node)?.set_id(id);
        Ok(())
    }

    fn append_child(&self, parent: &Node, child: &Node) -> Result<(), DocumentError> {
        parent.append_child(child).map(drop).map_err(host_error)
    }

    fn replace_child(&self, parent: &Node, new: &Node, old: &Node) -> Result<(), DocumentError> {
        parent.replace_child(new, old).map(drop).map_err(host_error)
    }

    fn remove_child(&self, parent: &Node, child: &Node) -> Result<(), DocumentError> {
        parent.remove_child(child).map(drop).map_err(host_error)
    }

    fn element_by_id(&self, id: &str) -> Option<Node> {
        self.document.get_element_by_id(id).map(Node::from)
    }
}

fn as_element(node: &Node) -> Result<&Element, DocumentError> {
    node.dyn_ref::<Element>().ok_or(DocumentError::NotAnElement)
}

fn host_error(error: JsValue) -> DocumentError {
    DocumentError::Host(format!("{error:?}"))
}
