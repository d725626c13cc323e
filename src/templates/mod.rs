//! Page templates
//!
//! Renders the form and result pages with Tera. The templates live in
//! `templates/` and are embedded into the binary, so the server needs no
//! files beside it at runtime.

use rust_embed::RustEmbed;
use serde::Serialize;
use std::error::Error as StdError;
use tera::{Context as TeraContext, Tera};

use crate::models::{AuthMethod, ContractRequest, ExportFormat, GeneratedContract};

mod error;

pub use error::TemplateError;

#[derive(RustEmbed)]
#[folder = "templates/"]
#[include = "*.html"]
struct TemplateAssets;

pub const FORM_TEMPLATE: &str = "form.html";
pub const RESULT_TEMPLATE: &str = "result.html";

/// One option of the authentication select
#[derive(Debug, Serialize)]
struct AuthOption {
    label: &'static str,
    selected: bool,
}

/// One download button on the result page
#[derive(Debug, Serialize)]
struct DownloadLink {
    format: &'static str,
    label: &'static str,
}

/// Tera-backed renderer for the application's pages
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    /// Load the embedded templates.
    pub fn new() -> Result<Self, TemplateError> {
        let mut templates = Vec::new();
        for name in TemplateAssets::iter() {
            let file = TemplateAssets::get(&name)
                .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
            let content = String::from_utf8(file.data.into_owned())
                .map_err(|_| TemplateError::InvalidEncoding(name.to_string()))?;
            templates.push((name.to_string(), content));
        }
        Self::from_templates(templates)
    }

    /// Build a renderer from `(name, source)` pairs.
    pub fn from_templates(mut templates: Vec<(String, String)>) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        // Base templates first so children can resolve their parent
        templates.sort_by(|a, b| {
            let a_is_base = a.0 == "base.html" || a.0.ends_with("/base.html");
            let b_is_base = b.0 == "base.html" || b.0.ends_with("/base.html");
            b_is_base.cmp(&a_is_base)
        });

        for (name, content) in templates {
            tera.add_raw_template(&name, &content)
                .map_err(|e| TemplateError::Render(format!("Failed to add template {}: {}", name, e)))?;
        }

        tera.build_inheritance_chains()
            .map_err(|e| TemplateError::Render(format!("Failed to build template inheritance: {}", e)))?;

        tracing::debug!("Loaded {} page templates", tera.get_template_names().count());
        Ok(Self { tera })
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|t| t == name)
    }

    /// Render a template, flattening Tera's error chain into the message.
    pub fn render(&self, template: &str, context: &TeraContext) -> Result<String, TemplateError> {
        self.tera.render(template, context).map_err(|e| {
            let mut error_msg = format!("Failed to render '{}': {}", template, e);
            let mut source = e.source();
            while let Some(s) = source {
                error_msg.push_str(&format!("\n  Caused by: {}", s));
                source = s.source();
            }
            TemplateError::Render(error_msg)
        })
    }

    /// The input form, pre-filled with `request`.
    ///
    /// `error` is shown above the form as `Error: <message>`.
    pub fn render_form(&self, request: &ContractRequest, error: Option<&str>) -> Result<String, TemplateError> {
        let auth_options: Vec<AuthOption> = AuthMethod::ALL
            .into_iter()
            .map(|method| AuthOption {
                label: method.label(),
                selected: method == request.auth_method,
            })
            .collect();

        let mut context = TeraContext::new();
        context.insert("request", request);
        context.insert("auth_options", &auth_options);
        context.insert("error", &error);
        self.render(FORM_TEMPLATE, &context)
    }

    /// The result page: success banner, preview and download forms.
    ///
    /// `preview_html` is inserted unescaped; it must come from the markdown
    /// renderer, which never passes raw HTML through.
    pub fn render_result(&self, contract: &GeneratedContract, preview_html: &str) -> Result<String, TemplateError> {
        let downloads = [
            DownloadLink {
                format: ExportFormat::Pdf.extension(),
                label: "Download PDF",
            },
            DownloadLink {
                format: ExportFormat::Docx.extension(),
                label: "Download Word",
            },
        ];

        let mut context = TeraContext::new();
        context.insert("content", &contract.content);
        context.insert("success", &contract.success);
        context.insert("preview_html", preview_html);
        context.insert("downloads", &downloads);
        self.render(RESULT_TEMPLATE, &context)
    }
}
