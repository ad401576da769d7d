//! Outline tree extraction: turns a raw bookmark outline into a typed TOC tree.
//!
//! A raw outline is a flat sequence where a child group immediately following
//! an entry holds that entry's children. Parsing is a single left-to-right
//! pass per nesting level; page lookups go through a [`PageResolver`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum nesting depth accepted from an outline. Bookmarks are untrusted input.
pub const MAX_OUTLINE_DEPTH: usize = 64;

/// A single bookmark supplied by the document collaborator.
/// `L` is the collaborator's opaque location type.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry<L> {
    pub title: String,
    pub location: L,
}

/// One element of a raw outline: either a bookmark or the children of the
/// bookmark immediately before it.
#[derive(Debug, Clone, PartialEq)]
pub enum OutlineItem<L> {
    Entry(OutlineEntry<L>),
    Children(Vec<OutlineItem<L>>),
}

impl<L> OutlineItem<L> {
    pub fn entry(title: impl Into<String>, location: L) -> Self {
        OutlineItem::Entry(OutlineEntry {
            title: title.into(),
            location,
        })
    }
}

/// A raw outline as produced by the document collaborator.
pub type RawOutline<L> = Vec<OutlineItem<L>>;

/// A node of the extracted table of contents.
/// `page` is one-based; `0` means the location could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocNode {
    pub title: String,
    pub page: u32,
    pub children: Vec<TocNode>,
}

/// Translates an outline location into a zero-based page index.
pub trait PageResolver<L> {
    fn resolve_page_index(&self, location: &L) -> Option<usize>;
}

impl<L, F> PageResolver<L> for F
where
    F: Fn(&L) -> Option<usize>,
{
    fn resolve_page_index(&self, location: &L) -> Option<usize> {
        self(location)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutlineError {
    #[error("child group at depth {depth}, position {position} has no preceding entry")]
    OrphanedChildren { depth: usize, position: usize },

    #[error("entry '{title}' at depth {depth} is followed by more than one child group")]
    DuplicateChildren { depth: usize, title: String },

    #[error("outline nesting exceeds {max} levels")]
    TooDeep { max: usize },
}

/// Parses a raw outline into an ordered tree of [`TocNode`]s.
pub fn parse_outline<L, R>(
    entries: &[OutlineItem<L>],
    resolver: &R,
) -> Result<Vec<TocNode>, OutlineError>
where
    R: PageResolver<L> + ?Sized,
{
    parse_level(entries, resolver, 0)
}

fn parse_level<L, R>(
    entries: &[OutlineItem<L>],
    resolver: &R,
    depth: usize,
) -> Result<Vec<TocNode>, OutlineError>
where
    R: PageResolver<L> + ?Sized,
{
    if depth >= MAX_OUTLINE_DEPTH {
        return Err(OutlineError::TooDeep {
            max: MAX_OUTLINE_DEPTH,
        });
    }

    let mut result: Vec<TocNode> = Vec::with_capacity(entries.len());
    // Whether the last node already received its child group.
    let mut last_has_group = false;

    for (position, item) in entries.iter().enumerate() {
        match item {
            OutlineItem::Children(group) => {
                let parent = result
                    .last_mut()
                    .ok_or(OutlineError::OrphanedChildren { depth, position })?;
                if last_has_group {
                    return Err(OutlineError::DuplicateChildren {
                        depth,
                        title: parent.title.clone(),
                    });
                }
                parent.children = parse_level(group, resolver, depth + 1)?;
                last_has_group = true;
            }
            OutlineItem::Entry(entry) => {
                let page = resolver
                    .resolve_page_index(&entry.location)
                    .and_then(one_based_page)
                    .unwrap_or(0);
                result.push(TocNode {
                    title: entry.title.clone(),
                    page,
                    children: Vec::new(),
                });
                last_has_group = false;
            }
        }
    }

    Ok(result)
}

/// Zero-based index to one-based page. Indices past `u32` count as unresolved.
fn one_based_page(index: usize) -> Option<u32> {
    u32::try_from(index).ok()?.checked_add(1)
}
