use std::path::Path;

use xaml_rs_renderer::{RenderConfig, Theme, parse_xaml, render_document};

fn assert_valid_document(html: &str, fixture: &str) {
    assert!(html.starts_with("<style>"), "{fixture}: missing stylesheet");
    assert!(
        html.contains("class=\"workflow-visualization\""),
        "{fixture}: missing container"
    );
    assert!(html.ends_with("</div>"), "{fixture}: truncated document");
    assert!(
        !html.contains("{x:Null}"),
        "{fixture}: null sentinel leaked into output"
    );
}

fn render_fixture(path: &Path) -> String {
    let input = std::fs::read_to_string(path).expect("fixture read failed");
    let tree = parse_xaml(&input).expect("parse failed");
    render_document(&tree, &Theme::dark(), &RenderConfig::default())
}

fn fixture_path(rel: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel)
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "basic_sequence.xaml",
        "branching.xaml",
        "invoke_workflow.xaml",
        "csv_pipeline.xaml",
        "custom_activities.xaml",
        "bare_activity.xaml",
    ];

    for rel in candidates {
        let path = fixture_path(rel);
        assert!(path.exists(), "fixture missing: {}", rel);
        let html = render_fixture(&path);
        assert_valid_document(&html, rel);
    }
}

#[test]
fn rendering_is_deterministic() {
    let path = fixture_path("basic_sequence.xaml");
    assert_eq!(render_fixture(&path), render_fixture(&path));
}

#[test]
fn basic_sequence_shows_promoted_fields() {
    let html = render_fixture(&fixture_path("basic_sequence.xaml"));
    assert!(html.contains("Reads a name and greets the user"));
    assert!(html.contains("Assign To"));
    assert!(html.contains("[greeting]"));
    assert!(!html.contains("VirtualizedContainerService"));
}

#[test]
fn invoke_workflow_shows_argument_table() {
    let html = render_fixture(&fixture_path("invoke_workflow.xaml"));
    assert!(html.contains("class=\"workflow-arguments\""));
    assert!(html.contains("x:String: invoicePath"));
    assert!(html.contains("x:Int32: processedRows"));
    assert!(html.contains("ProcessInvoice.xaml"));
}

#[test]
fn custom_activities_flag_unsupported_and_inline_images() {
    let html = render_fixture(&fixture_path("custom_activities.xaml"));
    assert!(html.contains("class=\"warning\""));
    assert!(html.contains("class=\"declared-arguments\""));
    assert!(html.contains("src=\"data:image/png;base64,iVBORw0KGgo"));
    // Body wrappers never surface as components of their own.
    assert!(!html.contains("RetryScope.Body"));
}

#[test]
fn bare_activity_renders_from_the_root_element() {
    let html = render_fixture(&fixture_path("bare_activity.xaml"));
    assert!(html.contains("Activity"));
    assert!(html.contains("(Degenerate document)"));
}
