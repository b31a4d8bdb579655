//! Gallery index page

use crate::render::escape_html;
use crate::services::gallery::{GalleryEntry, GalleryFailure};

/// Heading and `<title>` of the index page
pub const INDEX_TITLE: &str = "Transistor IV Plot Gallery";

const INDEX_STYLE: &str = r#"<style>
body { font-family: Arial, sans-serif; margin: 20px; }
h1 { text-align: center; }
.nav-list { line-height: 1.7; }
.plot-container { margin-top: 60px; border-top: 2px solid #aaa; padding-top: 20px; }
.preview { display: block; margin-bottom: 12px; border: 1px solid #ddd; }
iframe { width: 100%; height: 900px; border: none; }
.back-to-top { margin-top: 10px; }
.failures { margin-top: 60px; border-top: 2px solid #c33; padding-top: 20px; color: #822; }
</style>"#;

/// Render the index: a jump list, one section per entry, and failures
///
/// Entry links are relative to the index, which sits next to the documents.
pub fn render_index(entries: &[GalleryEntry], failures: &[GalleryFailure]) -> String {
    let mut lines = vec![
        "<!DOCTYPE html>".to_string(),
        "<html>".to_string(),
        "<head>".to_string(),
        "<meta charset=\"utf-8\">".to_string(),
        format!("<title>{}</title>", INDEX_TITLE),
        INDEX_STYLE.to_string(),
        "</head>".to_string(),
        "<body>".to_string(),
        format!("<h1>{}</h1>", INDEX_TITLE),
    ];

    if !entries.is_empty() {
        lines.push("<h2>Jump to transistor:</h2>".to_string());
        lines.push("<ul class=\"nav-list\">".to_string());
        for entry in entries {
            lines.push(format!(
                "<li><a href=\"#{}\">{}</a></li>",
                escape_html(&entry.anchor),
                escape_html(&entry.name)
            ));
        }
        lines.push("</ul>".to_string());
        lines.push("<hr>".to_string());
    }

    for entry in entries {
        let document = escape_html(&entry.document_name);
        lines.push(format!(
            "<div class=\"plot-container\" id=\"{}\">",
            escape_html(&entry.anchor)
        ));
        lines.push(format!("<h2>{}</h2>", escape_html(&entry.name)));
        if let Some(preview) = &entry.preview_name {
            lines.push(format!(
                "<a href=\"{}\"><img class=\"preview\" src=\"{}\" alt=\"{}\"></a>",
                document,
                escape_html(preview),
                escape_html(&entry.name)
            ));
        }
        lines.push(format!("<iframe src=\"{}\" loading=\"lazy\"></iframe>", document));
        lines.push("<div class=\"back-to-top\"><a href=\"#\">Back to top</a></div>".to_string());
        lines.push("</div>".to_string());
    }

    if !failures.is_empty() {
        lines.push("<div class=\"failures\">".to_string());
        lines.push(format!("<h2>Failed datasets ({})</h2>", failures.len()));
        lines.push("<ul>".to_string());
        for failure in failures {
            lines.push(format!(
                "<li><strong>{}</strong>: {}</li>",
                escape_html(&failure.name),
                escape_html(&failure.reason)
            ));
        }
        lines.push("</ul>".to_string());
        lines.push("</div>".to_string());
    }

    lines.push("</body>".to_string());
    lines.push("</html>".to_string());
    lines.join("\n")
}
