//! The render lifecycle that binds a view to a region of a document.

use core::any::type_name;

use tracing::{debug, error, warn};

use crate::error::{ExecutionError, RenderError};
use crate::{Document, IdGenerator, Parent, Template, TemplateRegistry, View};

/// Tag of the detached element markup is parsed into before insertion.
const STAGING_TAG: &str = "body";

/// Where a [`Renderable`] stands in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderState<N> {
    /// Constructed or removed; nothing is attached.
    Unattached,
    /// The tracked element is attached under the parent.
    Attached(N),
    /// Markup was produced as a string only; nothing is attached.
    StringOnly,
}

/// The parent as configured at construction.
#[derive(Debug, Clone)]
enum Container<N> {
    None,
    Node(N),
    /// A wrapped collection with no element to unwrap.
    EmptyCollection,
}

/// Render lifecycle for a single view instance.
///
/// A `Renderable` owns a [`View`] and a [`Document`] handle. It:
/// 1. Assigns an id, from [`View::id`] or the [`IdGenerator`]
/// 2. Resolves the view's template once, at construction
/// 3. Renders [`View::data`] through the template and attaches the result
///    under the parent, replacing the previous element on re-render
/// 4. Detaches the element again on [`remove`](Self::remove)
///
/// Failures other than [`RenderError::MissingParent`] are reported through
/// [`report`](Self::report) before being returned.
///
/// See the [crate-level documentation](crate) for a complete example.
///
/// # Type Parameters
///
/// * `V` - The view supplying data and the template key
/// * `D` - The document the view is attached to
pub struct Renderable<V, D>
where
    V: View,
    D: Document,
{
    view: V,
    document: D,
    id: String,
    parent: Container<D::Node>,
    template_key: String,
    template: Option<Template>,
    state: RenderState<D::Node>,
}

impl<V, D> Renderable<V, D>
where
    V: View,
    D: Document,
{
    /// Create a new render instance.
    ///
    /// Nothing is rendered until [`render`](Self::render) or
    /// [`rendered_string`](Self::rendered_string) is called. An unknown
    /// template key is reported, not returned: the instance is still built
    /// but every render attempt fails.
    ///
    /// # Arguments
    ///
    /// * `view` - Supplies the data and the template key
    /// * `document` - Document the view is rendered into
    /// * `parent` - Container to render into, `None` for string rendering only
    /// * `registry` - Resolves the view's template key
    /// * `ids` - Generates the id when the view does not pre-assign one
    pub fn new<R, G>(
        view: V,
        document: D,
        parent: Option<Parent<D::Node>>,
        registry: &R,
        ids: &G,
    ) -> Self
    where
        R: TemplateRegistry + ?Sized,
        G: IdGenerator + ?Sized,
    {
        let id = view.id().unwrap_or_else(|| ids.generate());

        let parent = match parent.map(Parent::into_node) {
            Some(Some(node)) => Container::Node(node),
            Some(None) => Container::EmptyCollection,
            None => Container::None,
        };

        let template_key = view.template_key().to_string();
        let template = registry.lookup(&template_key);

        let renderable = Renderable {
            view,
            document,
            id,
            parent,
            template_key,
            template,
            state: RenderState::Unattached,
        };

        if renderable.template.is_none() {
            renderable.report(&RenderError::TemplateResolution {
                key: renderable.template_key.clone(),
            });
        }

        renderable
    }

    /// Render the view into the parent.
    ///
    /// The first call appends the element as the last child of the parent.
    /// Later calls swap the previous element for the new one in place, so
    /// the parent never holds more than one element per instance.
    ///
    /// Returns the attached element. On failure the state is left as it was
    /// at the failing step. A parent given as an empty collection is
    /// configured but unusable, so it fails as an execution error.
    pub fn render(&mut self) -> Result<D::Node, RenderError> {
        let parent = match &self.parent {
            Container::Node(node) => node.clone(),
            Container::EmptyCollection => {
                return Err(self.fail(ExecutionError::EmptyParentCollection))
            }
            Container::None => return Err(RenderError::MissingParent),
        };
        self.attach(&parent).map_err(|error| self.fail(error))
    }

    /// Render the view to markup without touching the document.
    ///
    /// An unattached instance moves to [`RenderState::StringOnly`].
    pub fn rendered_string(&mut self) -> Result<String, RenderError> {
        let markup = self.markup().map_err(|error| self.fail(error))?;
        if self.state == RenderState::Unattached {
            self.state = RenderState::StringOnly;
        }
        Ok(markup)
    }

    /// Detach the rendered element from the parent.
    ///
    /// A no-op unless the instance is rendered. Leaving
    /// [`RenderState::StringOnly`] does not touch the document.
    pub fn remove(&mut self) -> Result<(), RenderError> {
        match &self.state {
            RenderState::Unattached => return Ok(()),
            RenderState::StringOnly => {}
            RenderState::Attached(element) => {
                if let Container::Node(parent) = &self.parent {
                    self.document
                        .remove_child(parent, element)
                        .map_err(ExecutionError::from)?;
                }
                debug!(id = %self.id, "removed");
            }
        }
        self.state = RenderState::Unattached;
        Ok(())
    }

    /// Log `error` against this instance.
    ///
    /// The event names the concrete view type and the instance id.
    pub fn report(&self, error: &RenderError) {
        error!(view = type_name::<V>(), id = %self.id, error = %error, "render error");
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn template_key(&self) -> &str {
        &self.template_key
    }

    /// The unwrapped parent node, if one is usable.
    pub fn parent(&self) -> Option<&D::Node> {
        match &self.parent {
            Container::Node(node) => Some(node),
            Container::None | Container::EmptyCollection => None,
        }
    }

    /// The attached element, if any.
    pub fn element(&self) -> Option<&D::Node> {
        match &self.state {
            RenderState::Attached(element) => Some(element),
            _ => None,
        }
    }

    /// Whether the view has been rendered, as an element or as a string.
    pub fn is_rendered(&self) -> bool {
        self.state != RenderState::Unattached
    }

    pub fn state(&self) -> &RenderState<D::Node> {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view, e.g. to change its data before re-rendering.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    fn markup(&self) -> Result<String, ExecutionError> {
        let template = self
            .template
            .as_ref()
            .ok_or_else(|| ExecutionError::TemplateUnavailable {
                key: self.template_key.clone(),
            })?;
        Ok(template.render(&self.view.data(&self.id))?)
    }

    fn attach(&mut self, parent: &D::Node) -> Result<D::Node, ExecutionError> {
        let markup = self.markup()?;

        let fragment = self.document.create_fragment()?;
        let staging = self.document.create_element(STAGING_TAG)?;
        self.document.set_inner_markup(&staging, &markup)?;
        let child = self
            .document
            .first_element_child(&staging)
            .ok_or(ExecutionError::NoRootElement)?;
        let roots = self.document.element_child_count(&staging);
        if roots > 1 {
            return Err(ExecutionError::MultipleRootElements { count: roots });
        }
        self.document.set_id(&child, &self.id)?;
        self.document.append_child(&fragment, &child)?;

        match &self.state {
            RenderState::Attached(previous) => {
                self.document.replace_child(parent, &fragment, previous)?;
                debug!(id = %self.id, "re-rendered in place");
            }
            RenderState::Unattached | RenderState::StringOnly => {
                self.document.append_child(parent, &fragment)?;
                debug!(id = %self.id, "rendered");
            }
        }

        let found = self
            .document
            .element_by_id(&self.id)
            .ok_or_else(|| ExecutionError::ElementNotFound {
                id: self.id.clone(),
            })?;
        let element = if found == child {
            found
        } else {
            warn!(id = %self.id, "another element already uses this id");
            child
        };

        self.state = RenderState::Attached(element.clone());
        Ok(element)
    }

    fn fail(&self, error: ExecutionError) -> RenderError {
        let error = RenderError::from(error);
        self.report(&error);
        error
    }
}
