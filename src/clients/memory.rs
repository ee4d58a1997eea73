//! In-process implementations of the store traits, used by tests and when
//! the gateway runs without a database.

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;

use crate::{
    clients::{delivery_log::DeliveryLog, integration::IntegrationStore, template::TemplateStore},
    models::{
        audit::{CreateDeliveryLog, DeliveryLogEntry},
        integration::{ConnectionTestResult, IntegrationConfig},
        template::{CreateTemplate, MessageTemplate, TemplateType},
    },
};

fn guard<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, Error> {
    mutex.lock().map_err(|_| anyhow!("{} lock poisoned", what))
}

#[derive(Clone, Default)]
pub struct MemoryDeliveryLog {
    entries: Arc<Mutex<Vec<DeliveryLogEntry>>>,
    reject_writes: bool,
}

impl MemoryDeliveryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log whose every write fails, for exercising best-effort logging.
    pub fn rejecting() -> Self {
        Self {
            reject_writes: true,
            ..Self::default()
        }
    }

    pub fn entries(&self) -> Vec<DeliveryLogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DeliveryLog for MemoryDeliveryLog {
    async fn append(&self, log: &CreateDeliveryLog) -> Result<DeliveryLogEntry, Error> {
        if self.reject_writes {
            return Err(anyhow!("Delivery log is not accepting writes"));
        }

        let mut entries = guard(&self.entries, "delivery log")?;

        if let Some(existing) = entries.iter().find(|entry| entry.id == log.id) {
            return Ok(existing.clone());
        }

        let entry = log.clone().into_entry();
        entries.push(entry.clone());

        Ok(entry)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<DeliveryLogEntry>, Error> {
        let entries = guard(&self.entries, "delivery log")?;
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }
}

#[derive(Clone, Default)]
pub struct MemoryTemplateStore {
    templates: Arc<Mutex<Vec<MessageTemplate>>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<MessageTemplate> {
        self.templates
            .lock()
            .map(|templates| templates.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn select_default(
        &self,
        template_type: TemplateType,
    ) -> Result<Option<MessageTemplate>, Error> {
        let templates = guard(&self.templates, "template store")?;

        Ok(templates
            .iter()
            .find(|t| t.template_type == template_type && t.is_active && t.is_default)
            .cloned())
    }

    async fn list_by_type(
        &self,
        template_type: TemplateType,
    ) -> Result<Vec<MessageTemplate>, Error> {
        let templates = guard(&self.templates, "template store")?;

        Ok(templates
            .iter()
            .filter(|t| t.template_type == template_type)
            .cloned()
            .collect())
    }

    async fn insert(&self, template: CreateTemplate) -> Result<MessageTemplate, Error> {
        let mut templates = guard(&self.templates, "template store")?;

        if template.is_default {
            for sibling in templates
                .iter_mut()
                .filter(|t| t.template_type == template.template_type)
            {
                sibling.is_default = false;
            }
        }

        let id = templates.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let created = MessageTemplate {
            id,
            name: template.name,
            template_type: template.template_type,
            subject: template.subject,
            body: template.body,
            variables: template.variables,
            is_default: template.is_default,
            is_active: template.is_active,
        };
        templates.push(created.clone());

        Ok(created)
    }

    async fn set_default(&self, id: i64) -> Result<MessageTemplate, Error> {
        let mut templates = guard(&self.templates, "template store")?;

        let template_type = templates
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.template_type)
            .ok_or_else(|| anyhow!("Template {} not found", id))?;

        for template in templates
            .iter_mut()
            .filter(|t| t.template_type == template_type)
        {
            template.is_default = template.id == id;
        }

        templates
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| anyhow!("Template {} not found", id))
    }
}

#[derive(Clone, Default)]
pub struct MemoryIntegrationStore {
    config: Arc<Mutex<Option<IntegrationConfig>>>,
    last_test: Arc<Mutex<Option<ConnectionTestResult>>>,
}

impl MemoryIntegrationStore {
    pub fn new(config: Option<IntegrationConfig>) -> Self {
        Self {
            config: Arc::new(Mutex::new(config)),
            last_test: Arc::default(),
        }
    }

    pub fn last_test(&self) -> Option<ConnectionTestResult> {
        self.last_test
            .lock()
            .map(|last| last.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl IntegrationStore for MemoryIntegrationStore {
    async fn fetch(&self) -> Result<Option<IntegrationConfig>, Error> {
        Ok(guard(&self.config, "integration store")?.clone())
    }

    async fn record_test_result(&self, result: &ConnectionTestResult) -> Result<(), Error> {
        *guard(&self.last_test, "integration store")? = Some(result.clone());
        Ok(())
    }
}
