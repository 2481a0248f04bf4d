use crate::ir::{ActivityNode, ArgumentEntry, Attribute, EmbeddedImage};
use once_cell::sync::Lazy;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

const DISPLAY_NAME_ATTR: &str = "DisplayName";
const ANNOTATION_MARKER: &str = "Annotation.AnnotationText";
const LAYOUT_PREFIXES: [&str; 2] = ["sap:", "sap2010:"];
const VIEW_STATE_PREFIX: &str = "WorkflowViewStateService";
const NULL_LITERAL: &str = "{x:Null}";

/// Conversion depth at which a subtree degrades into an inline `Error` node
/// instead of recursing further.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Hard cap on raw element nesting while reading the markup. Crafted input
/// deeper than this is rejected outright rather than turned into a tree.
const RAW_DEPTH_LIMIT: usize = 512;

/// Activity vocabulary the viewer knows how to display. Anything else is
/// rendered generically and flagged as unsupported.
pub const RECOGNIZED_ACTIVITIES: [&str; 14] = [
    "Assign",
    "MessageBox",
    "ReadTextFile",
    "Comment",
    "Sequence",
    "If",
    "If.Then",
    "If.Else",
    "ReadCsvFile",
    "WriteCsvFile",
    "AppendCsvFile",
    "Click",
    "TypeInto",
    "InvokeWorkflowFile",
];

pub fn is_recognized(node_name: &str) -> bool {
    RECOGNIZED_ACTIVITIES.contains(&node_name)
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed markup: {0}")]
    MalformedMarkup(String),
    #[error("no Activity root element found")]
    MissingRoot,
}

/// Parse a UiPath XAML document into an activity tree.
///
/// Top-level structural failures (unparseable XML, no `Activity` root) are
/// reported as `ParseError`; failures inside a single subtree degrade into
/// inline `Error` nodes so the rest of the document still renders.
pub fn parse_xaml(markup: &str) -> Result<ActivityNode, ParseError> {
    parse_xaml_with_limit(markup, DEFAULT_MAX_DEPTH)
}

pub fn parse_xaml_with_limit(markup: &str, max_depth: usize) -> Result<ActivityNode, ParseError> {
    let document = read_element_tree(markup)?;
    let activity = find_by_local_name(&document, "Activity").ok_or(ParseError::MissingRoot)?;
    // Degenerate documents without a top-level Sequence are traversed from
    // the Activity element itself.
    let start = activity
        .children
        .iter()
        .find_map(|child| find_by_local_name(child, "Sequence"))
        .unwrap_or(activity);
    Ok(convert_node(start, 0, max_depth))
}

#[derive(Debug, Default)]
struct XmlElement {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<XmlElement>,
    text: String,
}

fn malformed(err: impl std::fmt::Display) -> ParseError {
    ParseError::MalformedMarkup(err.to_string())
}

/// Read the markup into a raw element tree with an explicit stack, preserving
/// attribute and child document order.
fn read_element_tree(markup: &str) -> Result<XmlElement, ParseError> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().check_end_names = true;

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(start) => {
                if stack.len() >= RAW_DEPTH_LIMIT {
                    return Err(ParseError::MalformedMarkup(format!(
                        "element nesting exceeds {RAW_DEPTH_LIMIT} levels"
                    )));
                }
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ParseError::MalformedMarkup("unexpected closing tag".into()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text.unescape().map_err(malformed)?);
                }
            }
            Event::CData(cdata) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ParseError::MalformedMarkup("unclosed element".into()));
    }
    root.ok_or_else(|| ParseError::MalformedMarkup("no root element".into()))
}

fn element_from_start(start: &BytesStart) -> Result<XmlElement, ParseError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(malformed)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(malformed)?.into_owned();
        attrs.push((key, value));
    }
    Ok(XmlElement {
        name,
        attrs,
        children: Vec::new(),
        text: String::new(),
    })
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(ParseError::MalformedMarkup("multiple root elements".into()));
    }
    *root = Some(element);
    Ok(())
}

fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

fn find_by_local_name<'a>(element: &'a XmlElement, target: &str) -> Option<&'a XmlElement> {
    if local_name(&element.name) == target {
        return Some(element);
    }
    element
        .children
        .iter()
        .find_map(|child| find_by_local_name(child, target))
}

fn attr_value(element: &XmlElement, name: &str) -> Option<String> {
    element
        .attrs
        .iter()
        .find(|(attr_name, _)| attr_name == name)
        .map(|(_, value)| value.clone())
}

fn find_child<'a>(element: &'a XmlElement, target: &str) -> Option<&'a XmlElement> {
    element
        .children
        .iter()
        .find(|child| local_name(&child.name) == target)
}

/// Text content of an element including its descendants, document order.
fn deep_text(element: &XmlElement, out: &mut String) {
    out.push_str(&element.text);
    for child in &element.children {
        deep_text(child, out);
    }
}

fn convert_node(element: &XmlElement, depth: usize, max_depth: usize) -> ActivityNode {
    if depth > max_depth {
        return ActivityNode::error(format!("maximum nesting depth of {max_depth} exceeded"));
    }

    let mut node = ActivityNode::new(local_name(&element.name));

    if let Some(display_name) = attr_value(element, DISPLAY_NAME_ATTR) {
        node.display_name = display_name;
    }

    // First annotation attribute wins, scan order = document order.
    node.annotation = element
        .attrs
        .iter()
        .find(|(name, _)| name.contains(ANNOTATION_MARKER))
        .map(|(_, value)| value.clone());

    for (name, value) in &element.attrs {
        if name == DISPLAY_NAME_ATTR
            || LAYOUT_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
            || name.starts_with(VIEW_STATE_PREFIX)
            || value == NULL_LITERAL
        {
            continue;
        }
        if looks_like_embedded_image(value) {
            node.images.push(EmbeddedImage {
                name: name.clone(),
                value: normalize_image_value(value),
            });
        } else {
            node.attributes.push(Attribute::new(name.clone(), value.clone()));
        }
    }

    for child in &element.children {
        let child_local = local_name(&child.name);
        if child_local.starts_with(VIEW_STATE_PREFIX) {
            continue;
        }
        if child.name == "Variables" || child.name == "Sequence.Variables" {
            continue;
        }
        if child_local.contains(".Body") {
            // Body wrappers scope a single child activity and carry no
            // meaning of their own; splice their children in directly.
            for inner in &child.children {
                node.children.push(convert_node(inner, depth + 1, max_depth));
            }
            continue;
        }
        if child_local.ends_with(".Argument") {
            if let Some(entry) = argument_entry(child_local, child) {
                node.arguments.push(entry);
            }
            continue;
        }
        node.children.push(convert_node(child, depth + 1, max_depth));
    }

    if let Some(extract) = EXTRACTORS.get(node.node_name.as_str()) {
        extract(element, &mut node);
    }
    node.unsupported = !is_recognized(&node.node_name);

    node
}

fn argument_entry(child_local: &str, element: &XmlElement) -> Option<ArgumentEntry> {
    let slot = child_local
        .strip_suffix(".Argument")
        .unwrap_or(child_local)
        .to_string();
    let inner = element.children.first()?;
    Some(ArgumentEntry {
        slot,
        kind: local_name(&inner.name).to_string(),
        name: attr_value(inner, "Name").unwrap_or_default(),
        value: attr_value(inner, "x:TypeArguments").unwrap_or_default(),
    })
}

type Extractor = fn(&XmlElement, &mut ActivityNode);

/// Node-type-specific extraction rules, dispatched by namespace-stripped tag
/// name. Names absent from this table keep the generic conversion result.
static EXTRACTORS: Lazy<HashMap<&'static str, Extractor>> = Lazy::new(|| {
    let mut table: HashMap<&'static str, Extractor> = HashMap::new();
    table.insert("Assign", extract_assign);
    table.insert("MessageBox", extract_message);
    table.insert("Comment", extract_message);
    table.insert("ReadTextFile", extract_read_text_file);
    table.insert("TypeInto", extract_type_into);
    table.insert("If", extract_if);
    table.insert("ReadCsvFile", extract_read_csv);
    table.insert("WriteCsvFile", extract_write_csv);
    table.insert("AppendCsvFile", extract_write_csv);
    table.insert("InvokeWorkflowFile", extract_invoke_workflow);
    table.insert("Click", extract_click);
    table
});

/// Promote an attribute into `main_args` under `label`, falling back to
/// `default` when absent, and drop it from the generic attribute list.
fn promote(element: &XmlElement, node: &mut ActivityNode, attr: &str, label: &str, default: &str) {
    let value = attr_value(element, attr).unwrap_or_else(|| default.to_string());
    node.main_args.push(Attribute::new(label, value));
    node.remove_attributes(&[attr]);
}

fn extract_assign(element: &XmlElement, node: &mut ActivityNode) {
    for (target, label) in [("Assign.To", "Assign To"), ("Assign.Value", "Assign Value")] {
        let mut text = String::new();
        if let Some(child) = find_child(element, target) {
            deep_text(child, &mut text);
        }
        node.main_args.push(Attribute::new(label, text.trim()));
    }
    // An Assign has no nested activities.
    node.children.clear();
}

fn extract_message(element: &XmlElement, node: &mut ActivityNode) {
    promote(element, node, "Text", "Text", "No Message");
}

fn extract_read_text_file(element: &XmlElement, node: &mut ActivityNode) {
    promote(element, node, "FileName", "File Name", "FILE NOT SELECTED");
}

fn extract_type_into(element: &XmlElement, node: &mut ActivityNode) {
    promote(element, node, "Text", "Text", "Text not Specified");
    node.children.clear();
}

fn extract_if(element: &XmlElement, node: &mut ActivityNode) {
    promote(element, node, "Condition", "Condition", "Condition not Specified");
}

fn extract_read_csv(element: &XmlElement, node: &mut ActivityNode) {
    promote(element, node, "FilePath", "FilePath", "FilePath not Specified");
    promote(element, node, "DataTable", "Output to", "Output not Specified");
}

fn extract_write_csv(element: &XmlElement, node: &mut ActivityNode) {
    promote(element, node, "FilePath", "Write to what file", "FilePath not Specified");
    promote(element, node, "DataTable", "Write from", "Datatable not Specified");
}

fn extract_invoke_workflow(element: &XmlElement, node: &mut ActivityNode) {
    promote(element, node, "WorkflowFileName", "Workflow", "Workflow not Specified");
    if let Some(args) = find_child(element, "InvokeWorkflowFile.Arguments") {
        for arg in &args.children {
            let arg_type = attr_value(arg, "x:TypeArguments").unwrap_or_else(|| "Unknown".into());
            let key = attr_value(arg, "x:Key").unwrap_or_else(|| "Unnamed".into());
            let arg_local = local_name(&arg.name);
            if arg_local.contains("InArgument") {
                node.in_args.push(format!("{arg_type}: {key}"));
            } else if arg_local.contains("OutArgument") {
                node.out_args.push(format!("{arg_type}: {key}"));
            }
        }
    }
    node.children.clear();
}

fn extract_click(_element: &XmlElement, node: &mut ActivityNode) {
    // Terminal UI-interaction activity.
    node.children.clear();
}

const IMAGE_MAGIC_PREFIXES: [&str; 4] = ["iVBORw0KGgo", "/9j/", "R0lGOD", "UEsDB"];

static BASE64_BODY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9+/]+={0,2}$").unwrap());

/// Heuristic test for attribute values carrying embedded image data: a data
/// URI, a known magic-byte base64 prefix (PNG/JPEG/GIF/ZIP containers), or a
/// long pure-base64 string. The length fallback can misclassify generic
/// base64 blobs; that imprecision is accepted.
pub fn looks_like_embedded_image(value: &str) -> bool {
    if value.starts_with("data:image/") {
        return true;
    }
    if IMAGE_MAGIC_PREFIXES.iter().any(|prefix| value.starts_with(prefix)) {
        return true;
    }
    value.len() > 100 && BASE64_BODY_RE.is_match(value)
}

/// Normalize a matched value to a data URI, defaulting the format to PNG
/// when the raw payload carries no `data:image/` prefix.
pub fn normalize_image_value(value: &str) -> String {
    if value.starts_with("data:image/") {
        value.to_string()
    } else {
        format!("data:image/png;base64,{value}")
    }
}
