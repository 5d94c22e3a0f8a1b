use renderable::View;
use serde_json::{json, Value};

pub(crate) struct MessageView {
    pub(crate) template_key: String,
    pub(crate) id: Option<String>,
    pub(crate) source: Box<dyn MessageSource>,
}

#[cfg_attr(test, mockall::automock)]
pub(crate) trait MessageSource {
    fn message(&self) -> String;
}

impl View for MessageView {
    fn template_key(&self) -> &str {
        &self.template_key
    }

    fn data(&self, id: &str) -> Value {
        json!({
            "id": id,
            "message": self.source.message(),
        })
    }

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}
