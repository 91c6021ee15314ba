//! Template export to a standalone HTML email document.
//!
//! The document is derived straight from the [`Template`]: the body markup
//! comes from the export render walk and is wrapped in a fixed XHTML shell
//! with an embedded, email-client-safe stylesheet.

use std::io::Write;

use mailcraft_core::Template;

use crate::error::{RenderError, RenderResult};
use crate::html::escape_attr;
use crate::render::{render_template, RenderMode};

/// File name offered for downloaded exports.
pub const DEFAULT_FILE_NAME: &str = "email-template.html";

/// Strict XHTML doctype every export starts with.
pub const DOCTYPE: &str = "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\">";

/// Configuration for template export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Maximum width of the `.container` wrapper in pixels (default: 600).
    pub max_width_px: u32,
    /// Viewport width below which the container goes full width (default: 620).
    pub breakpoint_px: u32,
    /// Webfont stylesheet to link, if any (default: Roboto).
    pub font_url: Option<String>,
    /// CSS font stack.
    pub font_family: String,
    /// Page background behind the container.
    pub page_background: String,
    /// Link and button accent color.
    pub accent_color: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            max_width_px: 600,
            breakpoint_px: 620,
            font_url: Some("https://fonts.googleapis.com/css?family=Roboto".to_string()),
            font_family: "'Roboto', Arial, sans-serif".to_string(),
            page_background: "#f8f8f8".to_string(),
            accent_color: "#0c7bbf".to_string(),
        }
    }
}

impl ExportConfig {
    /// Check that every value can be embedded in the stylesheet safely.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidConfig`] for a zero width or a CSS value
    /// that could break out of its declaration.
    pub fn validate(&self) -> RenderResult<()> {
        if self.max_width_px == 0 {
            return Err(RenderError::InvalidConfig(
                "max width must be positive".to_string(),
            ));
        }
        if self.breakpoint_px == 0 {
            return Err(RenderError::InvalidConfig(
                "breakpoint must be positive".to_string(),
            ));
        }
        for (name, value) in [
            ("font family", &self.font_family),
            ("page background", &self.page_background),
            ("accent color", &self.accent_color),
        ] {
            if value.trim().is_empty() || value.contains(['<', '>', '{', '}', ';']) {
                return Err(RenderError::InvalidConfig(format!(
                    "{name} is not a plain CSS value: {value:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Exports a [`Template`] to a standalone HTML document.
#[derive(Debug, Clone)]
pub struct HtmlExporter {
    config: ExportConfig,
}

impl HtmlExporter {
    /// Create a new exporter with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(config: ExportConfig) -> RenderResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            config: ExportConfig::default(),
        }
    }

    /// Render the cleaned body markup without the document shell.
    #[must_use]
    pub fn export_fragment(&self, template: &Template) -> String {
        let mut body = String::with_capacity(4096);
        render_template(&mut body, template, RenderMode::Export);
        body
    }

    /// Render the complete HTML document.
    #[must_use]
    pub fn export(&self, template: &Template) -> String {
        let body = self.export_fragment(template);
        let document = self.wrap_document(&body);
        tracing::debug!(
            "Exported {} sections, {} bytes",
            template.sections().len(),
            document.len()
        );
        document
    }

    /// Render the complete document into a writer and flush it. Returns the
    /// number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] if writing or flushing fails.
    pub fn write_document(
        &self,
        template: &Template,
        mut writer: impl Write,
    ) -> RenderResult<usize> {
        let document = self.export(template);
        writer.write_all(document.as_bytes())?;
        writer.flush()?;
        Ok(document.len())
    }

    fn wrap_document(&self, body: &str) -> String {
        let config = &self.config;
        let mut doc = String::with_capacity(body.len() + 2048);
        doc.push_str(DOCTYPE);
        doc.push_str("\n<html xmlns=\"http://www.w3.org/1999/xhtml\">\n<head>\n");
        doc.push_str(
            "<meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\" />\n",
        );
        doc.push_str("<meta name=\"viewport\" content=\"width=device-width\" />\n");
        if let Some(font_url) = &config.font_url {
            doc.push_str(&format!(
                "<link href=\"{}\" rel=\"stylesheet\" type=\"text/css\" />\n",
                escape_attr(font_url)
            ));
        }
        doc.push_str("<style type=\"text/css\">\n");
        doc.push_str(&self.stylesheet());
        doc.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n");
        doc.push_str(body);
        doc.push_str("</div>\n</body>\n</html>\n");
        doc
    }

    fn stylesheet(&self) -> String {
        let ExportConfig {
            max_width_px,
            breakpoint_px,
            font_family,
            page_background,
            accent_color,
            ..
        } = &self.config;
        format!(
            "* {{ margin: 0; padding: 0; font-size: 100%; font-family: {font_family}; }}
body {{ width: 100% !important; height: 100%; background: {page_background}; color: #000000; line-height: 1.5; }}
table {{ border-spacing: 0; border-collapse: collapse; width: 100%; }}
td {{ padding: 0; vertical-align: top; }}
img {{ max-width: 100%; margin: 0 auto; display: block; }}
a {{ color: {accent_color}; text-decoration: none; }}
a:hover {{ text-decoration: underline; }}
.container {{ max-width: {max_width_px}px; margin: 0 auto; }}
.column {{ padding: 8px; vertical-align: top; }}
.element {{ margin-bottom: 8px; padding: 4px; }}
.button {{ display: inline-block; color: white; background: {accent_color}; border: none; padding: 10px 20px; font-weight: bold; border-radius: 4px; text-decoration: none; }}
.button:hover {{ text-decoration: none; }}
@media only screen and (max-width: {breakpoint_px}px) {{
  .container {{ width: 100% !important; }}
}}
"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcraft_core::{ColumnId, ElementPath, ElementType, ElementUpdate};

    #[test]
    fn test_empty_template_is_complete_document() {
        let html = HtmlExporter::with_defaults().export(&Template::new());
        assert!(html.starts_with(DOCTYPE));
        assert!(html.contains("<div class=\"container\">\n</div>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_config_changes_shell() {
        let exporter = HtmlExporter::new(ExportConfig {
            max_width_px: 720,
            breakpoint_px: 740,
            font_url: None,
            ..ExportConfig::default()
        })
        .expect("valid config");
        let html = exporter.export(&Template::new());
        assert!(html.contains("max-width: 720px"));
        assert!(html.contains("(max-width: 740px)"));
        assert!(!html.contains("<link"));
    }

    #[test]
    fn test_config_validation() {
        assert!(HtmlExporter::new(ExportConfig {
            max_width_px: 0,
            ..ExportConfig::default()
        })
        .is_err());
        assert!(matches!(
            ExportConfig {
                accent_color: "red;}</style><script>".to_string(),
                ..ExportConfig::default()
            }
            .validate(),
            Err(RenderError::InvalidConfig(_))
        ));
        assert!(ExportConfig::default().validate().is_ok());
    }

    #[test]
    fn test_export_does_not_touch_template() {
        let mut template = Template::new();
        let section = template.add_section();
        let id = template
            .drop_element(section, ColumnId(0), ElementType::TextArea)
            .expect("drop");
        template
            .update_element(
                ElementPath::new(section, ColumnId(0), id),
                ElementUpdate {
                    content: Some("one\n\ntwo".to_string()),
                    ..ElementUpdate::default()
                },
            )
            .expect("update");
        let before = template.clone();
        let exporter = HtmlExporter::with_defaults();
        let first = exporter.export(&template);
        let second = exporter.export(&template);
        assert_eq!(template, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_document() {
        let mut buffer = Vec::new();
        let bytes = HtmlExporter::with_defaults()
            .write_document(&Template::new(), &mut buffer)
            .expect("write");
        assert_eq!(bytes, buffer.len());
        let written = String::from_utf8(buffer).expect("utf8");
        assert!(written.starts_with(DOCTYPE));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_document_reports_io_error() {
        let result = HtmlExporter::with_defaults().write_document(&Template::new(), BrokenPipe);
        assert!(matches!(result, Err(RenderError::Io(e)) if e.kind() == std::io::ErrorKind::BrokenPipe));
    }
}
