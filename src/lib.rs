//! A small render lifecycle that binds a named template to a region of a document.
//!
//! A [`View`] supplies data and a template key. A [`Renderable`] wraps the view
//! and owns its identity, its render state and the render/re-render/remove
//! protocol against a [`Document`]. Templates come from an injected
//! [`TemplateRegistry`] and ids from an injected [`IdGenerator`].
//!
//! ## Example
//!
//! ```rust
//! use renderable::{
//!     Document, MemoryDocument, MiniJinjaRegistry, Parent, Renderable, UuidIdGenerator, View,
//! };
//! use serde_json::{json, Value};
//!
//! struct Message {
//!     message: String,
//! }
//!
//! impl View for Message {
//!     fn template_key(&self) -> &str {
//!         "view"
//!     }
//!
//!     fn data(&self, _id: &str) -> Value {
//!         json!({ "message": self.message })
//!     }
//! }
//!
//! let mut registry = MiniJinjaRegistry::new();
//! registry.add_template("view", "<div>{{ message }}</div>").unwrap();
//!
//! let document = MemoryDocument::new();
//! let mut view = Renderable::new(
//!     Message { message: "hello world".into() },
//!     document.clone(),
//!     Some(Parent::Node(document.body())),
//!     &registry,
//!     &UuidIdGenerator::new(),
//! );
//!
//! let element = view.render().unwrap();
//!
//! assert!(view.id().starts_with("renderable-"));
//! assert_eq!(
//!     document.inner_markup(document.body()),
//!     format!("<div id=\"{}\">hello world</div>", view.id())
//! );
//! assert_eq!(document.element_by_id(view.id()), Some(element));
//!
//! view.remove().unwrap();
//! assert!(!view.is_rendered());
//! ```
//!
//! ## Features
//!
//! - `testing`: exports [`MemoryDocument`], an in-memory document for tests.
//! - `web`: exports `WebDocument`, a binding to the browser DOM via `web-sys`.
//!
//! ## Logging
//!
//! Failures are logged through [`tracing`] at `error` level; lifecycle
//! transitions are logged at `debug`. No subscriber is installed.

// Module declarations
mod document;
mod error;
mod id;
mod renderable;
mod template;
mod view;

#[cfg(any(test, feature = "testing"))]
mod memory;
#[cfg(feature = "web")]
mod web;

// Public re-exports
pub use document::{Document, Parent};
pub use error::{DocumentError, ExecutionError, RenderError, TemplateError};
pub use id::{IdGenerator, UuidIdGenerator, DEFAULT_ID_PREFIX};
pub use renderable::{RenderState, Renderable};
pub use template::{MiniJinjaRegistry, Template, TemplateRegistry};
pub use view::View;

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use memory::{MemoryDocument, NodeId};

#[cfg(feature = "web")]
pub use web::WebDocument;
