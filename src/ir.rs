use serde::Serialize;

/// Node name used for synthetic nodes standing in for a subtree that failed
/// to convert. Rendered as an inline error block instead of the normal layout.
pub const ERROR_NODE: &str = "Error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One row of the declared-arguments table, extracted from a `*.Argument`
/// wrapper element: `slot` is the wrapper's tag segment before `.Argument`,
/// the rest comes from the wrapper's first inner element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentEntry {
    #[serde(rename = "type")]
    pub slot: String,
    #[serde(rename = "argType")]
    pub kind: String,
    pub name: String,
    pub value: String,
}

/// An attribute value recognized as embedded binary image data, normalized
/// to a `data:image/<fmt>;base64,` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddedImage {
    pub name: String,
    pub value: String,
}

/// A single typed activity in the workflow tree.
///
/// Produced once per parse from an immutable markup string and never mutated
/// afterwards; children are owned exclusively by their parent, so the tree
/// has no aliasing and no cycles.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityNode {
    pub node_name: String,
    pub display_name: String,
    pub annotation: Option<String>,
    pub attributes: Vec<Attribute>,
    pub main_args: Vec<Attribute>,
    pub in_args: Vec<String>,
    pub out_args: Vec<String>,
    #[serde(rename = "argumentsTable")]
    pub arguments: Vec<ArgumentEntry>,
    #[serde(rename = "base64Images")]
    pub images: Vec<EmbeddedImage>,
    #[serde(rename = "isUnsupported")]
    pub unsupported: bool,
    pub children: Vec<ActivityNode>,
}

impl ActivityNode {
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            display_name: String::new(),
            annotation: None,
            attributes: Vec::new(),
            main_args: Vec::new(),
            in_args: Vec::new(),
            out_args: Vec::new(),
            arguments: Vec::new(),
            images: Vec::new(),
            unsupported: false,
            children: Vec::new(),
        }
    }

    /// Synthetic node replacing a subtree whose conversion failed. The
    /// failure message travels in the annotation slot.
    pub fn error(message: impl Into<String>) -> Self {
        let mut node = Self::new(ERROR_NODE);
        node.annotation = Some(message.into());
        node
    }

    pub fn is_error(&self) -> bool {
        self.node_name == ERROR_NODE
    }

    /// Drop any generic attribute whose name is in `names`. The extraction
    /// rules call this after promoting an attribute into `main_args` so the
    /// same key never appears in both places.
    pub fn remove_attributes(&mut self, names: &[&str]) {
        self.attributes
            .retain(|attr| !names.contains(&attr.name.as_str()));
    }
}
