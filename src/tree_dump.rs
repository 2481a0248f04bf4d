use crate::ir::ActivityNode;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Serializable snapshot of a parsed tree plus summary counters, used by the
/// CLI's `json` output format and by structural assertions in tests.
#[derive(Debug, Serialize)]
pub struct TreeDump<'a> {
    pub stats: TreeStats,
    pub root: &'a ActivityNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub nodes: usize,
    pub max_depth: usize,
    pub unsupported: usize,
    pub errors: usize,
}

impl<'a> TreeDump<'a> {
    pub fn from_node(root: &'a ActivityNode) -> Self {
        Self {
            stats: collect_stats(root, 0),
            root,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn collect_stats(node: &ActivityNode, depth: usize) -> TreeStats {
    let mut stats = TreeStats {
        nodes: 1,
        max_depth: depth,
        unsupported: usize::from(node.unsupported),
        errors: usize::from(node.is_error()),
    };
    for child in &node.children {
        let child_stats = collect_stats(child, depth + 1);
        stats.nodes += child_stats.nodes;
        stats.max_depth = stats.max_depth.max(child_stats.max_depth);
        stats.unsupported += child_stats.unsupported;
        stats.errors += child_stats.errors;
    }
    stats
}

pub fn write_tree_dump(root: &ActivityNode, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &TreeDump::from_node(root))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_xaml;

    #[test]
    fn stats_count_nodes_depth_and_flags() {
        let root = parse_xaml(
            "<Activity><Sequence><If Condition=\"[a]\"><If.Then><Foo/></If.Then></If></Sequence></Activity>",
        )
        .expect("parse failed");
        let dump = TreeDump::from_node(&root);
        assert_eq!(dump.stats.nodes, 4);
        assert_eq!(dump.stats.max_depth, 3);
        assert_eq!(dump.stats.unsupported, 1);
        assert_eq!(dump.stats.errors, 0);
    }

    #[test]
    fn json_dump_uses_original_field_spelling() {
        let root = parse_xaml("<Activity><Sequence><Foo/></Sequence></Activity>")
            .expect("parse failed");
        let json = TreeDump::from_node(&root).to_json().expect("serialize failed");
        assert!(json.contains("\"nodeName\""));
        assert!(json.contains("\"isUnsupported\""));
        assert!(json.contains("\"mainArgs\""));
    }
}
