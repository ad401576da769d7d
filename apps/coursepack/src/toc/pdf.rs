//! lopdf collaborator. Reads a PDF's `/Outlines` tree into a [`RawOutline`]
//! and resolves bookmark destinations to page indices.
//!
//! Outline nodes are linked with `/First` (children) and `/Next` (siblings).
//! Each node becomes an `Entry`, followed by a `Children` group when it has
//! descendants, which is the shape the extractor expects.

use std::collections::{HashMap, HashSet};

use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, warn};

use crate::toc::outline::{OutlineItem, PageResolver, RawOutline, MAX_OUTLINE_DEPTH};

/// Safety limit on siblings at one outline level.
const MAX_SIBLINGS: usize = 10_000;
/// Safety limit on `/Kids` nesting in a name tree.
const MAX_NAME_TREE_DEPTH: usize = 32;

/// Where a bookmark points, as far as can be told without the page tree.
#[derive(Debug, Clone, PartialEq)]
pub enum OutlineTarget {
    /// Explicit destination on a page object.
    Page(ObjectId),
    /// Named destination, looked up in `/Names/Dests` or `/Dests`.
    Named(String),
    /// No usable destination (missing, remote, or malformed).
    Unknown,
}

/// Resolves [`OutlineTarget`]s against the document's page tree.
pub struct PdfPageResolver<'a> {
    doc: &'a Document,
    page_index: HashMap<ObjectId, usize>,
}

impl<'a> PdfPageResolver<'a> {
    pub fn new(doc: &'a Document) -> Self {
        // lopdf numbers pages from 1
        let page_index = doc
            .get_pages()
            .into_iter()
            .map(|(number, id)| (id, number.saturating_sub(1) as usize))
            .collect();
        Self { doc, page_index }
    }
}

impl PageResolver<OutlineTarget> for PdfPageResolver<'_> {
    fn resolve_page_index(&self, location: &OutlineTarget) -> Option<usize> {
        match location {
            OutlineTarget::Page(id) => self.page_index.get(id).copied(),
            OutlineTarget::Named(name) => {
                let dest = lookup_named_dest(self.doc, name)?;
                // A named destination must resolve to an explicit one.
                match target_from_dest(self.doc, dest) {
                    OutlineTarget::Page(id) => self.page_index.get(&id).copied(),
                    _ => None,
                }
            }
            OutlineTarget::Unknown => None,
        }
    }
}

/// Reads the document outline. A document without bookmarks yields an empty outline.
pub fn read_outline(doc: &Document) -> RawOutline<OutlineTarget> {
    let first = catalog(doc)
        .and_then(|catalog| catalog.get(b"Outlines").ok())
        .and_then(|obj| deref(doc, obj))
        .and_then(|obj| obj.as_dict().ok())
        .and_then(|outlines| reference(outlines, b"First"));

    let Some(first) = first else {
        debug!("Document has no outline");
        return Vec::new();
    };

    let mut visited = HashSet::new();
    read_siblings(doc, first, 0, &mut visited)
}

fn read_siblings(
    doc: &Document,
    first: ObjectId,
    depth: usize,
    visited: &mut HashSet<ObjectId>,
) -> RawOutline<OutlineTarget> {
    let mut items = Vec::new();
    if depth >= MAX_OUTLINE_DEPTH {
        warn!("Outline nesting exceeds {MAX_OUTLINE_DEPTH} levels; deeper bookmarks ignored");
        return items;
    }

    let mut current = Some(first);
    let mut siblings = 0;

    while let Some(node_id) = current {
        // Circular /Next or /First links
        if !visited.insert(node_id) || siblings >= MAX_SIBLINGS {
            break;
        }
        siblings += 1;

        let Some(node) = doc.get_object(node_id).ok().and_then(|o| o.as_dict().ok()) else {
            break;
        };

        let title = node
            .get(b"Title")
            .ok()
            .and_then(|obj| deref(doc, obj))
            .and_then(text_string)
            .unwrap_or_default();

        items.push(OutlineItem::entry(title, node_target(doc, node)));

        if let Some(child) = reference(node, b"First") {
            let children = read_siblings(doc, child, depth + 1, visited);
            if !children.is_empty() {
                items.push(OutlineItem::Children(children));
            }
        }

        current = reference(node, b"Next");
    }

    items
}

/// Destination of an outline node: `/Dest` first, then a `/A` GoTo action.
fn node_target(doc: &Document, node: &Dictionary) -> OutlineTarget {
    if let Some(dest) = node.get(b"Dest").ok().and_then(|obj| deref(doc, obj)) {
        return target_from_dest(doc, dest);
    }

    let action = node
        .get(b"A")
        .ok()
        .and_then(|obj| deref(doc, obj))
        .and_then(|obj| obj.as_dict().ok());

    if let Some(action) = action {
        let is_goto = matches!(action.get(b"S"), Ok(Object::Name(kind)) if kind.as_slice() == b"GoTo");
        if is_goto {
            if let Some(dest) = action.get(b"D").ok().and_then(|obj| deref(doc, obj)) {
                return target_from_dest(doc, dest);
            }
        }
    }

    OutlineTarget::Unknown
}

fn target_from_dest(doc: &Document, dest: &Object) -> OutlineTarget {
    match dest {
        // [page_ref /Fit ...]
        Object::Array(parts) => match parts.first() {
            Some(Object::Reference(page)) => OutlineTarget::Page(*page),
            _ => OutlineTarget::Unknown,
        },
        Object::String(bytes, _) => OutlineTarget::Named(decode_text(bytes)),
        Object::Name(name) => OutlineTarget::Named(String::from_utf8_lossy(name).into_owned()),
        // Values in /Dests may be wrapped as << /D [...] >>
        Object::Dictionary(dict) => match dict.get(b"D").ok().and_then(|obj| deref(doc, obj)) {
            Some(Object::Array(parts)) => match parts.first() {
                Some(Object::Reference(page)) => OutlineTarget::Page(*page),
                _ => OutlineTarget::Unknown,
            },
            _ => OutlineTarget::Unknown,
        },
        _ => OutlineTarget::Unknown,
    }
}

/// Looks up a named destination in the `/Names/Dests` name tree, then the
/// legacy catalog `/Dests` dictionary.
fn lookup_named_dest<'a>(doc: &'a Document, name: &str) -> Option<&'a Object> {
    let catalog = catalog(doc)?;

    let tree = catalog
        .get(b"Names")
        .ok()
        .and_then(|obj| deref(doc, obj))
        .and_then(|obj| obj.as_dict().ok())
        .and_then(|names| names.get(b"Dests").ok())
        .and_then(|obj| deref(doc, obj))
        .and_then(|obj| obj.as_dict().ok());

    if let Some(found) = tree.and_then(|tree| lookup_name_tree(doc, tree, name, 0)) {
        return Some(found);
    }

    catalog
        .get(b"Dests")
        .ok()
        .and_then(|obj| deref(doc, obj))
        .and_then(|obj| obj.as_dict().ok())
        .and_then(|dests| dests.get(name.as_bytes()).ok())
        .and_then(|obj| deref(doc, obj))
}

fn lookup_name_tree<'a>(
    doc: &'a Document,
    node: &'a Dictionary,
    name: &str,
    depth: usize,
) -> Option<&'a Object> {
    if depth >= MAX_NAME_TREE_DEPTH {
        return None;
    }

    if let Some(Object::Array(pairs)) = node.get(b"Names").ok().and_then(|obj| deref(doc, obj)) {
        for pair in pairs.chunks(2) {
            if let [key, value] = pair {
                let matches = deref(doc, key)
                    .and_then(text_string)
                    .is_some_and(|key| key == name);
                if matches {
                    return deref(doc, value);
                }
            }
        }
    }

    if let Some(Object::Array(kids)) = node.get(b"Kids").ok().and_then(|obj| deref(doc, obj)) {
        for kid in kids {
            let Some(kid) = deref(doc, kid).and_then(|obj| obj.as_dict().ok()) else {
                continue;
            };
            if let Some(found) = lookup_name_tree(doc, kid, name, depth + 1) {
                return Some(found);
            }
        }
    }

    None
}

fn catalog(doc: &Document) -> Option<&Dictionary> {
    let root = doc.trailer.get(b"Root").ok()?;
    deref(doc, root)?.as_dict().ok()
}

fn deref<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn reference(dict: &Dictionary, key: &[u8]) -> Option<ObjectId> {
    match dict.get(key) {
        Ok(Object::Reference(id)) => Some(*id),
        _ => None,
    }
}

fn text_string(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_text(bytes)),
        _ => None,
    }
}

/// Decodes a PDF text string: UTF-16BE when it carries a BOM, otherwise UTF-8,
/// falling back to Latin-1.
fn decode_text(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::{dictionary, StringFormat};

    use crate::toc::outline::{parse_outline, TocNode};

    /// Three pages; outline:
    ///   Chapter 1          -> page 1 (explicit /Dest)
    ///     Section 1.1      -> page 3 (/A GoTo)
    ///   Appendix           -> page 2 (named destination)
    ///   Notes              -> no destination
    pub(crate) fn sample_document() -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let page_ids: Vec<ObjectId> = (0..3)
            .map(|_| doc.add_object(dictionary! { "Type" => "Page", "Parent" => pages_id }))
            .collect();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
                "Count" => 3,
            }),
        );

        let outlines_id = doc.new_object_id();
        let chapter_id = doc.new_object_id();
        let section_id = doc.new_object_id();
        let appendix_id = doc.new_object_id();
        let notes_id = doc.new_object_id();

        doc.objects.insert(
            chapter_id,
            Object::Dictionary(dictionary! {
                "Title" => Object::string_literal("Chapter 1"),
                "Parent" => outlines_id,
                "First" => section_id,
                "Last" => section_id,
                "Next" => appendix_id,
                "Dest" => vec![Object::Reference(page_ids[0]), "Fit".into()],
            }),
        );
        doc.objects.insert(
            section_id,
            Object::Dictionary(dictionary! {
                "Title" => Object::string_literal("Section 1.1"),
                "Parent" => chapter_id,
                "A" => dictionary! {
                    "S" => "GoTo",
                    "D" => vec![Object::Reference(page_ids[2]), "XYZ".into(), Object::Null, Object::Null, Object::Null],
                },
            }),
        );
        doc.objects.insert(
            appendix_id,
            Object::Dictionary(dictionary! {
                "Title" => Object::string_literal("Appendix"),
                "Parent" => outlines_id,
                "Prev" => chapter_id,
                "Next" => notes_id,
                "Dest" => Object::string_literal("appendix"),
            }),
        );
        doc.objects.insert(
            notes_id,
            Object::Dictionary(dictionary! {
                "Title" => Object::string_literal("Notes"),
                "Parent" => outlines_id,
                "Prev" => appendix_id,
            }),
        );
        doc.objects.insert(
            outlines_id,
            Object::Dictionary(dictionary! {
                "Type" => "Outlines",
                "First" => chapter_id,
                "Last" => notes_id,
                "Count" => 4,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
            "Outlines" => outlines_id,
            "Names" => dictionary! {
                "Dests" => dictionary! {
                    "Kids" => vec![Object::Dictionary(dictionary! {
                        "Names" => vec![
                            Object::string_literal("appendix"),
                            Object::Array(vec![Object::Reference(page_ids[1]), "Fit".into()]),
                        ],
                    })],
                },
            },
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    #[test]
    fn test_read_outline_emits_children_after_their_parent() {
        let doc = sample_document();
        let outline = read_outline(&doc);

        assert_eq!(outline.len(), 4);
        assert!(matches!(&outline[0], OutlineItem::Entry(e) if e.title == "Chapter 1"));
        assert!(matches!(&outline[1], OutlineItem::Children(c) if c.len() == 1));
        assert!(matches!(&outline[2], OutlineItem::Entry(e) if e.title == "Appendix"));
        assert!(
            matches!(&outline[3], OutlineItem::Entry(e) if e.title == "Notes" && e.location == OutlineTarget::Unknown)
        );
    }

    #[test]
    fn test_explicit_action_and_named_destinations_resolve() {
        let doc = sample_document();
        let resolver = PdfPageResolver::new(&doc);
        let toc = parse_outline(&read_outline(&doc), &resolver).unwrap();

        assert_eq!(
            toc,
            vec![
                TocNode {
                    title: "Chapter 1".to_string(),
                    page: 1,
                    children: vec![TocNode {
                        title: "Section 1.1".to_string(),
                        page: 3,
                        children: vec![],
                    }],
                },
                TocNode {
                    title: "Appendix".to_string(),
                    page: 2,
                    children: vec![],
                },
                TocNode {
                    title: "Notes".to_string(),
                    page: 0,
                    children: vec![],
                },
            ]
        );
    }

    #[test]
    fn test_unknown_named_destination_is_unresolved() {
        let doc = sample_document();
        let resolver = PdfPageResolver::new(&doc);
        let target = OutlineTarget::Named("missing".to_string());
        assert_eq!(resolver.resolve_page_index(&target), None);
    }

    #[test]
    fn test_document_without_outline_is_empty() {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.add_object(dictionary! { "Type" => "Pages", "Kids" => Vec::<Object>::new(), "Count" => 0 });
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);

        assert!(read_outline(&doc).is_empty());
    }

    #[test]
    fn test_circular_sibling_link_terminates() {
        let mut doc = Document::with_version("1.5");
        let outlines_id = doc.new_object_id();
        let item_id = doc.new_object_id();
        doc.objects.insert(
            item_id,
            Object::Dictionary(dictionary! {
                "Title" => Object::string_literal("Loop"),
                "Parent" => outlines_id,
                "Next" => item_id,
            }),
        );
        doc.objects.insert(
            outlines_id,
            Object::Dictionary(dictionary! { "Type" => "Outlines", "First" => item_id }),
        );
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Outlines" => outlines_id });
        doc.trailer.set("Root", catalog_id);

        let outline = read_outline(&doc);
        assert_eq!(outline.len(), 1);
    }

    /// `len` outline nodes, each linked to the next through `link`
    /// ("First" nests them, "Next" makes them siblings).
    fn chained_outline(len: usize, link: &str) -> Document {
        let mut doc = Document::with_version("1.5");
        let outlines_id = doc.new_object_id();
        let ids: Vec<ObjectId> = (0..len).map(|_| doc.new_object_id()).collect();
        for (i, id) in ids.iter().enumerate() {
            let mut node = dictionary! { "Title" => Object::string_literal(format!("Node {i}")) };
            if let Some(next) = ids.get(i + 1) {
                node.set(link, *next);
            }
            doc.objects.insert(*id, Object::Dictionary(node));
        }
        doc.objects.insert(
            outlines_id,
            Object::Dictionary(dictionary! { "Type" => "Outlines", "First" => ids[0] }),
        );
        let pages_id = doc.add_object(dictionary! { "Type" => "Pages", "Kids" => Vec::<Object>::new(), "Count" => 0 });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
            "Outlines" => outlines_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    fn nesting_levels(items: &[OutlineItem<OutlineTarget>]) -> usize {
        items
            .iter()
            .map(|item| match item {
                OutlineItem::Children(children) => 1 + nesting_levels(children),
                OutlineItem::Entry(_) => 1,
            })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_deep_outline_is_cut_at_max_depth_and_still_parses() {
        let doc = chained_outline(MAX_OUTLINE_DEPTH + 10, "First");
        let outline = read_outline(&doc);
        assert_eq!(nesting_levels(&outline), MAX_OUTLINE_DEPTH);

        let resolver = PdfPageResolver::new(&doc);
        let toc = parse_outline(&outline, &resolver).unwrap();

        let mut levels = 1;
        let mut node = &toc[0];
        while let Some(child) = node.children.first() {
            node = child;
            levels += 1;
        }
        assert_eq!(levels, MAX_OUTLINE_DEPTH);
        assert_eq!(node.title, format!("Node {}", MAX_OUTLINE_DEPTH - 1));
    }

    #[test]
    fn test_long_sibling_chain_is_capped() {
        let doc = chained_outline(MAX_SIBLINGS + 5, "Next");
        let outline = read_outline(&doc);
        assert_eq!(outline.len(), MAX_SIBLINGS);
        assert!(outline.iter().all(|item| matches!(item, OutlineItem::Entry(_))));

        let resolver = PdfPageResolver::new(&doc);
        let toc = parse_outline(&outline, &resolver).unwrap();
        assert_eq!(toc.len(), MAX_SIBLINGS);
        assert!(toc.iter().all(|node| node.page == 0));
    }

    #[test]
    fn test_decode_text_handles_utf16_with_bom() {
        let bytes = [0xFE, 0xFF, 0x00, 0x53, 0x00, 0x49, 0x00, 0x43, 0x00, 0x50];
        assert_eq!(decode_text(&bytes), "SICP");
        let obj = Object::String(bytes.to_vec(), StringFormat::Hexadecimal);
        assert_eq!(text_string(&obj).as_deref(), Some("SICP"));
    }

    #[test]
    fn test_decode_text_falls_back_to_latin1() {
        assert_eq!(decode_text(b"Caf\xe9"), "Café");
        assert_eq!(decode_text("Café".as_bytes()), "Café");
    }
}
