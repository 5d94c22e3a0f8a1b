//! View trait supplying the data and template of a render instance.

use serde_json::{json, Value};

/// A view: domain data plus the name of the template that renders it.
///
/// Views hold no render state. Wrap one in a [`Renderable`](crate::Renderable)
/// to get the render/re-render/remove lifecycle.
///
/// # Example
///
/// ```rust
/// use renderable::View;
/// use serde_json::{json, Value};
///
/// struct Greeting {
///     message: String,
/// }
///
/// impl View for Greeting {
///     fn template_key(&self) -> &str {
///         "view"
///     }
///
///     fn data(&self, _id: &str) -> Value {
///         json!({ "message": self.message })
///     }
/// }
///
/// let greeting = Greeting { message: "hello world".into() };
/// assert_eq!(greeting.data("unused")["message"], "hello world");
/// ```
pub trait View {
    /// Key of the template in the registry.
    fn template_key(&self) -> &str;

    /// Produce the object handed to the template.
    ///
    /// `id` is the identifier of the render instance. The default returns
    /// `{ "id": id }`; views override it with their own data, merging the id
    /// in when their template needs it.
    fn data(&self, id: &str) -> Value {
        json!({ "id": id })
    }

    /// A pre-assigned identifier.
    ///
    /// When `None`, the instance asks its [`IdGenerator`](crate::IdGenerator).
    fn id(&self) -> Option<String> {
        None
    }
}
