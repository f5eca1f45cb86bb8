//! Page renderer: one record in, one HTML document out

use tracing::debug;

use crate::provider::{resolve_record, RecordProvider};
use crate::record::{ProjectId, ProjectRecord};
use crate::template::Template;
use crate::Result;

/// Renders project records through a fixed template
#[derive(Debug, Clone)]
pub struct PageRenderer {
    template: Template,
}

impl PageRenderer {
    pub fn new(template: Template) -> Self {
        Self { template }
    }

    /// Bind `record` to the template and produce the document
    ///
    /// Fails with `MissingField` if the record lacks any field the template
    /// requires; nothing is emitted in that case.
    pub fn render(&self, record: &ProjectRecord) -> Result<String> {
        let bindings = record.bindings();
        let html = self.template.bind(&bindings)?.render();
        debug!(
            fields = self.template.required_fields().len(),
            bytes = html.len(),
            "Rendered project page"
        );
        Ok(html)
    }

    /// Look up `id` through `provider`, then render it
    pub async fn render_for(&self, provider: &dyn RecordProvider, id: ProjectId) -> Result<String> {
        let record = resolve_record(provider, id).await?;
        self.render(&record)
    }
}
