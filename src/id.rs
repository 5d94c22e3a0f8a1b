//! Identifier generation for render instances.

use uuid::Uuid;

/// Prefix used by [`UuidIdGenerator::new`].
pub const DEFAULT_ID_PREFIX: &str = "renderable";

/// Produces a fresh element identifier for each new instance.
///
/// Closures and function items implement this trait via the blanket
/// implementation, which keeps fakes in tests to a single line:
///
/// ```rust
/// use renderable::IdGenerator;
///
/// let ids = || "fixed-id".to_string();
/// assert_eq!(ids.generate(), "fixed-id");
/// ```
pub trait IdGenerator {
    fn generate(&self) -> String;
}

impl<F> IdGenerator for F
where
    F: Fn() -> String,
{
    fn generate(&self) -> String {
        self()
    }
}

/// Generates `"<prefix>-<uuid v4>"` identifiers.
#[derive(Debug, Clone)]
pub struct UuidIdGenerator {
    prefix: String,
}

impl UuidIdGenerator {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ID_PREFIX)
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for UuidIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> String {
        format!("{}-{}", self.prefix, Uuid::new_v4())
    }
}
