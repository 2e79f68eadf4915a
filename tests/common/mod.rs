//! Shared helpers for integration tests
//!
//! Parses XML text with roxmltree and replays it into a `TreeBuilder`.

#![allow(dead_code)]

use std::sync::Arc;

use tinytree::{BuilderConfig, NamePool, QName, TreeBuilder, TreeStore};

/// Build a document tree from XML text with an isolated name pool
pub fn build(xml: &str) -> (Arc<NamePool>, Arc<TreeStore>) {
    let pool = Arc::new(NamePool::new());
    let tree = build_with(xml, BuilderConfig::default().with_name_pool(Arc::clone(&pool)));
    (pool, tree)
}

pub fn build_with(xml: &str, config: BuilderConfig) -> Arc<TreeStore> {
    let doc = roxmltree::Document::parse(xml).expect("test XML parses");
    let mut builder = TreeBuilder::with_config(config);
    builder.start_document().unwrap();
    for child in doc.root().children() {
        replay(&mut builder, child);
    }
    builder.end_document().unwrap();
    builder.finish().unwrap()
}

fn replay(b: &mut TreeBuilder, node: roxmltree::Node<'_, '_>) {
    match node.node_type() {
        roxmltree::NodeType::Element => {
            let tag = node.tag_name();
            let uri = tag.namespace().unwrap_or("");
            let prefix = node.lookup_prefix(uri).unwrap_or("");
            b.start_element(QName::new(prefix, uri, tag.name())).unwrap();
            for ns in declared_namespaces(node) {
                b.namespace(ns.0, ns.1).unwrap();
            }
            for attr in node.attributes() {
                let uri = attr.namespace().unwrap_or("");
                let prefix = if uri.is_empty() {
                    ""
                } else {
                    node.lookup_prefix(uri).unwrap_or("")
                };
                b.attribute(QName::new(prefix, uri, attr.name()), attr.value())
                    .unwrap();
            }
            for child in node.children() {
                replay(b, child);
            }
            b.end_element().unwrap();
        }
        roxmltree::NodeType::Text => b.characters(node.text().unwrap_or("")).unwrap(),
        roxmltree::NodeType::Comment => b.comment(node.text().unwrap_or("")).unwrap(),
        roxmltree::NodeType::PI => {
            let pi = node.pi().expect("PI node");
            b.processing_instruction(pi.target, pi.value.unwrap_or(""))
                .unwrap();
        }
        roxmltree::NodeType::Root => {}
    }
}

/// Namespaces that roxmltree reports in scope on `node` but not on its parent
fn declared_namespaces<'a>(node: roxmltree::Node<'a, '_>) -> Vec<(&'a str, &'a str)> {
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();
    node.namespaces()
        .filter(|ns| ns.name() != Some("xml"))
        .filter(|ns| !inherited.contains(&(ns.name(), ns.uri())))
        .map(|ns| (ns.name().unwrap_or(""), ns.uri()))
        .collect()
}

/// Local names of element handles, `#text` etc. for other kinds
pub fn names<I: Iterator<Item = tinytree::NodeHandle>>(nodes: I) -> Vec<String> {
    nodes
        .map(|n| match n.kind() {
            tinytree::NodeKind::Element => n.display_name(),
            kind => format!("#{kind}"),
        })
        .collect()
}

/// Element with the given local name, searched in document order
pub fn element(tree: &Arc<TreeStore>, local: &str) -> tinytree::NodeHandle {
    (0..tree.len() as u32)
        .filter_map(|nr| tree.node(nr))
        .find(|n| {
            n.kind() == tinytree::NodeKind::Element && n.local_name().as_deref() == Some(local)
        })
        .unwrap_or_else(|| panic!("no element named {local}"))
}
