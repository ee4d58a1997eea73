use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Variable name to value, supplied per notification.
pub type RenderContext = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    Invoice,
    Reminder,
    Suspension,
    Voucher,
    Custom,
}

impl TemplateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Invoice => "invoice",
            TemplateType::Reminder => "reminder",
            TemplateType::Suspension => "suspension",
            TemplateType::Voucher => "voucher",
            TemplateType::Custom => "custom",
        }
    }
}

impl Display for TemplateType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invoice" => Ok(TemplateType::Invoice),
            "reminder" => Ok(TemplateType::Reminder),
            "suspension" => Ok(TemplateType::Suspension),
            "voucher" => Ok(TemplateType::Voucher),
            "custom" => Ok(TemplateType::Custom),
            other => Err(anyhow::anyhow!("Unknown template type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub id: i64,
    pub name: String,
    pub template_type: TemplateType,
    pub subject: Option<String>,
    pub body: String,
    pub variables: Vec<String>,
    pub is_default: bool,
    pub is_active: bool,
}

impl MessageTemplate {
    pub fn render(&self, context: &RenderContext) -> String {
        render_body(&self.body, context)
    }

    /// Renders the body with the fixed sample data shown in the admin preview.
    pub fn preview(&self, app_name: &str) -> String {
        self.render(&sample_context(app_name))
    }

    /// Declared variables the context does not provide.
    pub fn missing_variables<'a>(&'a self, context: &RenderContext) -> Vec<&'a str> {
        self.variables
            .iter()
            .filter(|name| !context.contains_key(name.as_str()))
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemplate {
    pub name: String,
    pub template_type: TemplateType,
    pub subject: Option<String>,
    pub body: String,
    pub variables: Vec<String>,
    pub is_default: bool,
    pub is_active: bool,
}

impl CreateTemplate {
    pub fn new(name: &str, template_type: TemplateType, body: &str) -> Self {
        Self {
            name: name.to_string(),
            template_type,
            subject: None,
            body: body.to_string(),
            variables: Vec::new(),
            is_default: false,
            is_active: true,
        }
    }

    pub fn with_subject(mut self, subject: &str) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub fn with_variables(mut self, variables: &[&str]) -> Self {
        self.variables = variables.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Substitutes every `{name}` whose name is a key of `context`.
///
/// Single pass and literal: unknown placeholders stay as written, substituted
/// values are never scanned again and nothing is escaped.
pub fn render_body(body: &str, context: &RenderContext) -> String {
    let mut rendered = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(start) = rest.find('{') {
        rendered.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(end) = after.find('}') else {
            rendered.push_str(&rest[start..]);
            return rendered;
        };

        match context.get(&after[..end]) {
            Some(value) => {
                rendered.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                rendered.push('{');
                rest = after;
            }
        }
    }

    rendered.push_str(rest);
    rendered
}

/// Parses a comma separated variable list as typed into the template form.
pub fn parse_variable_list(raw: &str) -> Vec<String> {
    let mut variables: Vec<String> = Vec::new();

    for name in raw.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        if !variables.iter().any(|existing| existing == name) {
            variables.push(name.to_string());
        }
    }

    variables
}

pub fn sample_context(app_name: &str) -> RenderContext {
    RenderContext::from([
        ("nama".to_string(), "John Doe".to_string()),
        ("invoice".to_string(), "INV-2024-001".to_string()),
        ("paket".to_string(), "Internet Premium 20Mbps".to_string()),
        ("amount".to_string(), "150000".to_string()),
        ("due_date".to_string(), "15 Desember 2024".to_string()),
        ("app_name".to_string(), app_name.to_string()),
    ])
}

/// Seed templates: one active default each for invoice, reminder and suspension.
pub fn default_templates() -> Vec<CreateTemplate> {
    vec![
        CreateTemplate::new(
            "Invoice Notification",
            TemplateType::Invoice,
            "📄 *Pemberitahuan Invoice*\n\nHalo *{nama}*,\n\nInvoice baru telah dibuat untuk layanan Anda:\n\n📋 *Detail Invoice:*\n• Nomor Invoice: {invoice}\n• Paket: {paket}\n• Jumlah: Rp {amount}\n• Jatuh Tempo: {due_date}\n\nSilakan lakukan pembayaran sebelum tanggal jatuh tempo untuk menghindari penangguhan layanan.\n\n*{app_name}*",
        )
        .with_subject("Pemberitahuan Invoice")
        .with_variables(&["nama", "invoice", "paket", "amount", "due_date", "app_name"])
        .as_default(),
        CreateTemplate::new(
            "Payment Reminder",
            TemplateType::Reminder,
            "⏰ *Pengingat Pembayaran*\n\nHalo *{nama}*,\n\nKami ingin mengingatkan Anda bahwa invoice berikut belum dibayar:\n\n📋 *Detail Invoice:*\n• Nomor Invoice: {invoice}\n• Jumlah: Rp {amount}\n• Jatuh Tempo: {due_date}\n\nMohon segera lakukan pembayaran untuk menghindari penangguhan layanan.\n\n*{app_name}*",
        )
        .with_subject("Pengingat Pembayaran")
        .with_variables(&["nama", "invoice", "amount", "due_date", "app_name"])
        .as_default(),
        CreateTemplate::new(
            "Suspension Notice",
            TemplateType::Suspension,
            "🚫 *Pemberitahuan Penangguhan Layanan*\n\nHalo *{nama}*,\n\nLayanan internet Anda telah ditangguhkan karena tunggakan pembayaran.\n\nSilakan hubungi kami atau lakukan pembayaran untuk mengaktifkan kembali layanan Anda.\n\n*{app_name}*",
        )
        .with_subject("Pemberitahuan Penangguhan")
        .with_variables(&["nama", "app_name"])
        .as_default(),
    ]
}
