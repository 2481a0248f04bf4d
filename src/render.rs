use crate::config::RenderConfig;
use crate::ir::ActivityNode;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Glyph shown in a node's header. Unrecognized names get a wrench,
/// independent of the parser's unsupported flag.
pub fn icon_for(node_name: &str) -> &'static str {
    match node_name {
        "Assign" | "WriteCsvFile" | "AppendCsvFile" => "📝",
        "MessageBox" | "TypeInto" => "💬",
        "ReadTextFile" => "📄",
        "Comment" => "💡",
        "Sequence" => "🔽",
        "If" => "↔️",
        "If.Then" => "✅",
        "If.Else" => "❌",
        "ReadCsvFile" => "👓",
        "Click" => "🐭",
        "InvokeWorkflowFile" => "↗️",
        _ => "🔧",
    }
}

/// Render one node and its subtree as an HTML fragment, depth-first
/// pre-order. Pure: the same tree always produces byte-identical output.
///
/// Attribute and text values come from untrusted uploads, so everything
/// interpolated here goes through `escape_html`.
pub fn render_fragment(node: &ActivityNode, depth: usize, config: &RenderConfig) -> String {
    if node.is_error() {
        let message = node.annotation.as_deref().unwrap_or("unknown failure");
        return format!(
            "<div class=\"error\">Error rendering node: {}</div>",
            escape_html(message)
        );
    }

    let mut html = String::new();
    let indent = depth as f32 * config.indent_step;
    html.push_str(&format!(
        "<div class=\"component\" style=\"margin-left: {indent}px;\">"
    ));

    html.push_str(&format!(
        "<div class=\"header\">{} {}",
        icon_for(&node.node_name),
        escape_html(&node.node_name)
    ));
    if !node.display_name.is_empty() {
        html.push_str(&format!(" ({})", escape_html(&node.display_name)));
    }
    html.push_str("</div>");

    if node.unsupported {
        html.push_str(
            "<div class=\"warning\">This Activity is not supported by this code preview and may be displayed incorrectly.</div>",
        );
    }

    if let Some(annotation) = &node.annotation {
        html.push_str(&format!(
            "<div class=\"annotation\">{}</div>",
            escape_html(annotation)
        ));
    }

    if !node.main_args.is_empty() {
        html.push_str("<div class=\"main-arg\">");
        for arg in &node.main_args {
            html.push_str(&format!(
                "<div class=\"main-arg-item\"><span class=\"main-arg-label\">{}:</span><div class=\"main-arg-value\">{}</div></div>",
                escape_html(&arg.name),
                escape_html(&arg.value)
            ));
        }
        html.push_str("</div>");
    }

    if !node.arguments.is_empty() {
        html.push_str(
            "<div class=\"declared-arguments\"><table><tr><th>Activity</th><th>Direction</th><th>Name</th><th>Type</th></tr>",
        );
        for entry in &node.arguments {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&entry.slot),
                escape_html(&entry.kind),
                escape_html(&entry.name),
                escape_html(&entry.value)
            ));
        }
        html.push_str("</table></div>");
    }

    if !node.in_args.is_empty() || !node.out_args.is_empty() {
        html.push_str(&format!(
            "<div class=\"workflow-arguments\"><table><tr><th>In</th><th>Out</th></tr><tr><td>{}</td><td>{}</td></tr></table></div>",
            join_argument_cell(&node.in_args),
            join_argument_cell(&node.out_args)
        ));
    }

    if !node.images.is_empty() {
        html.push_str("<div class=\"images\">");
        for image in &node.images {
            html.push_str(&format!(
                "<figure><img src=\"{}\" alt=\"{}\"/><figcaption>{}</figcaption></figure>",
                escape_html(&image.value),
                escape_html(&image.name),
                escape_html(&image.name)
            ));
        }
        html.push_str("</div>");
    }

    if !node.attributes.is_empty() {
        html.push_str("<div class=\"arguments\">");
        for attr in &node.attributes {
            html.push_str(&format!(
                "<div>{}: {}</div>",
                escape_html(&attr.name),
                escape_html(&attr.value)
            ));
        }
        html.push_str("</div>");
    }

    if !node.children.is_empty() {
        html.push_str("<div class=\"children\">");
        for child in &node.children {
            html.push_str(&render_fragment(child, depth + 1, config));
        }
        html.push_str("</div>");
    }

    html.push_str("</div>");
    html
}

fn join_argument_cell(args: &[String]) -> String {
    if args.is_empty() {
        return "-".to_string();
    }
    args.iter()
        .map(|arg| escape_html(arg))
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Wrap the root fragment with the stylesheet and viewport container. The
/// result is self-contained: images are inlined data URIs and nothing
/// references an external resource.
pub fn render_document(node: &ActivityNode, theme: &Theme, config: &RenderConfig) -> String {
    format!(
        "<style>{}</style><div class=\"workflow-visualization\">{}</div>",
        stylesheet(theme, config),
        render_fragment(node, 0, config)
    )
}

fn stylesheet(theme: &Theme, config: &RenderConfig) -> String {
    let mut css = String::new();

    css.push_str(&format!(
        ".workflow-visualization {{ font-family: {}; font-size: {}px; background-color: {}; color: {}; padding: 15px; border-radius: 8px; overflow-y: auto; height: {}px; box-shadow: 0px 4px 8px rgba(0, 0, 0, 0.3); }}",
        theme.font_family, theme.font_size, theme.background, theme.text_color, config.viewport_height
    ));

    css.push_str(&format!(
        ".component {{ border: 1px solid {}; padding: 10px; margin: 8px 5px; border-radius: 8px; background-color: {}; box-shadow: 0px 3px 6px rgba(0, 0, 0, 0.4); position: relative; max-width: 98%; box-sizing: border-box; }}",
        theme.border_color, theme.surface
    ));

    css.push_str(&format!(
        ".header {{ font-weight: 600; background: linear-gradient(135deg, {}, {}); color: white; padding: 12px; border-radius: 6px; display: flex; align-items: center; gap: 8px; width: 100%; box-sizing: border-box; margin-bottom: 8px; }}",
        theme.header_start, theme.header_end
    ));

    css.push_str(&format!(
        ".children {{ border-left: 2px solid {}; padding-left: 5px; margin-top: 10px; }}",
        theme.border_color
    ));

    css.push_str(
        ".arguments, .main-arg, .annotation, .workflow-arguments, .declared-arguments, .images { margin: 10px 0; padding: 12px; border-radius: 6px; }",
    );

    css.push_str(&format!(
        ".arguments {{ border-left: 5px solid {}; background: {}; }} .arguments:before {{ content: \"🏷️ Arguments\"; font-weight: bold; display: block; margin-bottom: 6px; color: {}; }} .arguments div {{ margin: 4px 0; padding-left: 10px; overflow-wrap: break-word; }}",
        theme.attribute_accent, theme.attribute_background, theme.attribute_heading
    ));

    css.push_str(&format!(
        ".annotation {{ border-left: 5px solid {}; background: {}; font-style: italic; color: {}; }} .annotation:before {{ content: \"💡 Annotation\"; font-weight: bold; display: block; margin-bottom: 6px; }}",
        theme.annotation_accent, theme.annotation_background, theme.annotation_text
    ));

    css.push_str(&format!(
        ".main-arg {{ display: flex; flex-wrap: wrap; gap: 10px; border-left: 5px solid {}; background: {}; max-width: 100%; box-sizing: border-box; }} .main-arg:before {{ content: \"📊 Main Arguments\"; font-weight: bold; display: block; margin-bottom: 8px; color: {}; width: 100%; }}",
        theme.main_arg_accent, theme.main_arg_background, theme.main_arg_label
    ));

    css.push_str(&format!(
        ".main-arg-item {{ display: flex; flex-direction: column; flex: 1 1 45%; min-width: 150px; }} .main-arg-label {{ font-weight: bold; margin-bottom: 6px; color: {}; }} .main-arg-value {{ width: 100%; padding: 8px; border: 1px solid {}; border-radius: 6px; background: {}; text-align: left; box-shadow: inset 0px 1px 3px rgba(0, 0, 0, 0.3); overflow-wrap: break-word; box-sizing: border-box; }}",
        theme.main_arg_label, theme.border_color, theme.main_arg_value_background
    ));

    css.push_str(&format!(
        ".warning {{ border-left: 5px solid {}; background-color: {}; color: {}; padding: 10px; margin: 10px 0; border-radius: 6px; font-weight: bold; }} .warning:before {{ content: \"⚠️ Warning\"; display: block; margin-bottom: 5px; }}",
        theme.warning_accent, theme.warning_background, theme.warning_accent
    ));

    css.push_str(&format!(
        ".workflow-arguments {{ background: {}; border-left: 5px solid {}; padding: 15px; }} .workflow-arguments:before {{ content: \"🔗 Workflow Arguments\"; font-weight: bold; display: block; margin-bottom: 10px; color: {}; }}",
        theme.table_background, theme.table_accent, theme.table_accent
    ));

    css.push_str(&format!(
        ".declared-arguments {{ background: {}; border-left: 5px solid {}; padding: 15px; }} .declared-arguments:before {{ content: \"📥 Declared Arguments\"; font-weight: bold; display: block; margin-bottom: 10px; color: {}; }}",
        theme.table_background, theme.table_accent, theme.table_accent
    ));

    css.push_str(&format!(
        ".workflow-arguments table, .declared-arguments table {{ width: 100%; border-collapse: collapse; border-spacing: 0; border-radius: 8px; overflow: hidden; margin-top: 8px; }} .workflow-arguments th, .declared-arguments th {{ font-weight: bold; color: {}; padding: 12px; text-align: left; background-color: {}; }} .workflow-arguments td, .declared-arguments td {{ padding: 10px; border-bottom: 1px solid {}; background-color: {}; text-align: left; }} .workflow-arguments tr:last-child td, .declared-arguments tr:last-child td {{ border-bottom: none; }}",
        theme.table_heading, theme.table_header_background, theme.border_color, theme.surface
    ));

    css.push_str(&format!(
        ".images {{ border-left: 5px solid {}; background: {}; }} .images:before {{ content: \"🖼️ Embedded Images\"; font-weight: bold; display: block; margin-bottom: 6px; color: {}; }} .images img {{ max-width: 100%; border-radius: 6px; border: 1px solid {}; }} .images figcaption {{ color: {}; margin-top: 4px; }}",
        theme.attribute_accent,
        theme.attribute_background,
        theme.attribute_heading,
        theme.border_color,
        theme.text_color
    ));

    css.push_str(&format!(
        ".error {{ background-color: {}; color: {}; padding: 15px; border-radius: 6px; margin: 10px 0; border-left: 5px solid {}; }}",
        theme.error_background, theme.error_text, theme.error_accent
    ));

    css
}

pub fn write_output(html: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, html)?;
        }
        None => {
            print!("{}", html);
        }
    }
    Ok(())
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ActivityNode, Attribute, EmbeddedImage};

    fn config() -> RenderConfig {
        RenderConfig::default()
    }

    #[test]
    fn untrusted_values_are_escaped() {
        let mut node = ActivityNode::new("Comment");
        node.main_args
            .push(Attribute::new("Text", "<script>alert(1)</script>"));
        let html = render_fragment(&node, 0, &config());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn unsupported_node_gets_warning_block() {
        let mut node = ActivityNode::new("Foo");
        node.unsupported = true;
        let html = render_fragment(&node, 0, &config());
        assert!(html.contains("class=\"warning\""));
        assert!(html.contains("🔧"));
    }

    #[test]
    fn empty_regions_are_omitted() {
        let node = ActivityNode::new("Click");
        let html = render_fragment(&node, 0, &config());
        assert!(!html.contains("class=\"arguments\""));
        assert!(!html.contains("class=\"main-arg\""));
        assert!(!html.contains("class=\"children\""));
        assert!(!html.contains("class=\"workflow-arguments\""));
        assert!(!html.contains("class=\"images\""));
    }

    #[test]
    fn children_indent_with_depth() {
        let mut root = ActivityNode::new("Sequence");
        root.children.push(ActivityNode::new("Click"));
        let html = render_fragment(&root, 0, &config());
        assert!(html.contains("margin-left: 0px;"));
        assert!(html.contains("margin-left: 20px;"));
    }

    #[test]
    fn error_node_renders_inline_block_and_preserves_siblings() {
        let mut root = ActivityNode::new("Sequence");
        root.children.push(ActivityNode::error("bad subtree"));
        root.children.push(ActivityNode::new("Click"));
        let html = render_fragment(&root, 0, &config());
        assert!(html.contains("class=\"error\""));
        assert!(html.contains("bad subtree"));
        assert!(html.contains("Click"));
    }

    #[test]
    fn workflow_arguments_use_dash_for_empty_side() {
        let mut node = ActivityNode::new("InvokeWorkflowFile");
        node.in_args.push("x:String: name".to_string());
        let html = render_fragment(&node, 0, &config());
        assert!(html.contains("<td>x:String: name</td><td>-</td>"));
    }

    #[test]
    fn images_render_as_inline_figures() {
        let mut node = ActivityNode::new("Click");
        node.images.push(EmbeddedImage {
            name: "InformativeScreenshot".to_string(),
            value: "data:image/png;base64,AAAA".to_string(),
        });
        let html = render_fragment(&node, 0, &config());
        assert!(html.contains("src=\"data:image/png;base64,AAAA\""));
        assert!(html.contains("InformativeScreenshot"));
    }

    #[test]
    fn document_is_self_contained_and_deterministic() {
        let mut root = ActivityNode::new("Sequence");
        root.display_name = "Main".to_string();
        root.children.push(ActivityNode::new("Click"));
        let theme = Theme::dark();
        let first = render_document(&root, &theme, &config());
        let second = render_document(&root, &theme, &config());
        assert_eq!(first, second);
        assert!(first.starts_with("<style>"));
        assert!(first.contains("class=\"workflow-visualization\""));
        assert!(first.contains("(Main)"));
    }
}
