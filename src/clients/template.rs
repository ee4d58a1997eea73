use anyhow::{Error, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::models::template::{
    CreateTemplate, MessageTemplate, RenderContext, TemplateType, default_templates,
};

/// Read side of the template collaborator, plus the default-flag switch
/// that must stay atomic.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// The active template flagged default for `template_type`.
    async fn select_default(
        &self,
        template_type: TemplateType,
    ) -> Result<Option<MessageTemplate>, Error>;

    async fn list_by_type(&self, template_type: TemplateType)
    -> Result<Vec<MessageTemplate>, Error>;

    /// Inserting a default template clears the flag on its siblings.
    async fn insert(&self, template: CreateTemplate) -> Result<MessageTemplate, Error>;

    /// Makes `id` the only default of its type; other types are untouched.
    async fn set_default(&self, id: i64) -> Result<MessageTemplate, Error>;
}

/// Renders the default template of a type, if one is configured.
pub async fn render_default(
    store: &dyn TemplateStore,
    template_type: TemplateType,
    context: &RenderContext,
) -> Result<Option<String>, Error> {
    let Some(template) = store.select_default(template_type).await? else {
        debug!(template_type = %template_type, "No default template configured");
        return Ok(None);
    };

    let missing = template.missing_variables(context);
    if !missing.is_empty() {
        warn!(
            template_id = template.id,
            missing = ?missing,
            "Template rendered with unresolved placeholders"
        );
    }

    Ok(Some(template.render(context)))
}

/// Inserts the seed templates for every type that has no template yet.
pub async fn seed_defaults(store: &dyn TemplateStore) -> Result<usize, Error> {
    let mut inserted = 0;

    for template in default_templates() {
        if store.list_by_type(template.template_type).await?.is_empty() {
            store.insert(template).await?;
            inserted += 1;
        }
    }

    Ok(inserted)
}
