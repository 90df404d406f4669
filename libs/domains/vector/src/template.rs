//! HTML page that renders a sample of the index client-side.

use std::path::Path;

use crate::error::{VectorError, VectorResult};
use crate::models::VisualPoint;

/// Token in the page replaced by the serialized sample.
pub const PLACEHOLDER: &str = "// const vectorData = [...];";

const EMBEDDED_TEMPLATE: &str = include_str!("../templates/visualization.html");

/// A static HTML document with exactly one [`PLACEHOLDER`].
#[derive(Debug, Clone)]
pub struct VisualizationTemplate {
    html: String,
}

impl VisualizationTemplate {
    /// The page compiled into the binary.
    pub fn embedded() -> VectorResult<Self> {
        Self::from_string(EMBEDDED_TEMPLATE)
    }

    pub fn from_file(path: impl AsRef<Path>) -> VectorResult<Self> {
        let path = path.as_ref();
        let html = std::fs::read_to_string(path).map_err(|e| {
            VectorError::Config(format!(
                "cannot read visualization template {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_string(html)
    }

    pub fn from_string(html: impl Into<String>) -> VectorResult<Self> {
        let html = html.into();
        match html.matches(PLACEHOLDER).count() {
            1 => Ok(Self { html }),
            n => Err(VectorError::Config(format!(
                "visualization template must contain the placeholder exactly once, found {}",
                n
            ))),
        }
    }

    /// Substitutes `const vectorData = <json>;` for the placeholder.
    pub fn render(&self, points: &[VisualPoint]) -> VectorResult<String> {
        // `</` inside the literal would end the surrounding <script> element.
        let json = serde_json::to_string(points)?.replace("</", "<\\/");
        Ok(self
            .html
            .replacen(PLACEHOLDER, &format!("const vectorData = {};", json), 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Metadata;
    use serde_json::json;

    fn point(id: &str, text: &str) -> VisualPoint {
        let mut metadata = Metadata::new();
        metadata.insert("text".into(), json!(text));
        VisualPoint {
            id: id.into(),
            embedding: vec![0.5, -0.5],
            metadata,
        }
    }

    #[test]
    fn test_embedded_template_is_valid() {
        let template = VisualizationTemplate::embedded().unwrap();
        let html = template.render(&[]).unwrap();

        assert!(html.contains("const vectorData = [];"));
        assert!(!html.contains(PLACEHOLDER));
    }

    #[test]
    fn test_embedded_template_handles_points_without_values() {
        let template = VisualizationTemplate::embedded().unwrap();
        let bare = VisualPoint {
            id: "doc_0".into(),
            embedding: Vec::new(),
            metadata: Metadata::new(),
        };
        let html = template.render(&[bare]).unwrap();

        assert!(html.contains(r#"const vectorData = [{"id":"doc_0","embedding":[],"metadata":{}}];"#));
        // The empty-state branch keys off the plottable points, not the raw sample.
        assert!(html.contains("if (usable.length === 0) {"));
        assert!(!html.contains("if (points.length === 0) {"));
    }

    #[test]
    fn test_render_embeds_points() {
        let template = VisualizationTemplate::from_string(format!("<script>{}</script>", PLACEHOLDER)).unwrap();
        let html = template.render(&[point("doc_0", "hello")]).unwrap();

        assert_eq!(
            html,
            r#"<script>const vectorData = [{"id":"doc_0","embedding":[0.5,-0.5],"metadata":{"text":"hello"}}];</script>"#
        );
    }

    #[test]
    fn test_render_escapes_script_close() {
        let template = VisualizationTemplate::from_string(PLACEHOLDER).unwrap();
        let html = template.render(&[point("x", "</script><b>")]).unwrap();

        assert!(!html.contains("</script>"));
        assert!(html.contains(r"<\/script>"));
    }

    #[test]
    fn test_placeholder_must_appear_once() {
        assert!(matches!(
            VisualizationTemplate::from_string("<html></html>"),
            Err(VectorError::Config(_))
        ));
        assert!(matches!(
            VisualizationTemplate::from_string(PLACEHOLDER.repeat(2)),
            Err(VectorError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        assert!(matches!(
            VisualizationTemplate::from_file("/nonexistent/visualization.html"),
            Err(VectorError::Config(_))
        ));
    }
}
