//! Page tree manipulation shared by merge and split.
//!
//! Both operations move leaf pages between page trees. A leaf page can
//! inherit `Resources`, `MediaBox`, `CropBox` and `Rotate` from its
//! ancestors, so those attributes are copied onto the page before it is
//! re-parented. Otherwise a moved page would lose its fonts or its size.

use lopdf::{Document, Object, ObjectId};
use std::collections::HashSet;

use crate::error::{PdfManagerError, Result};

/// Page attributes a leaf may inherit from its ancestors.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Parent chains deeper than this are treated as cyclic.
const MAX_TREE_DEPTH: usize = 64;

/// Page extractor for moving pages between documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageExtractor;

impl PageExtractor {
    /// Create a new page extractor.
    pub fn new() -> Self {
        Self
    }

    /// Build a document holding exactly `pages` (1-based, in the given order).
    ///
    /// A page listed more than once is duplicated, so the result has one
    /// leaf per entry. Objects no longer reachable are pruned and the
    /// outline is dropped, since its destinations may point at removed
    /// pages.
    ///
    /// # Errors
    ///
    /// Returns [`PdfManagerError::PageOutOfRange`] if a page number does not
    /// exist, or an error if the page tree is malformed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfmanager::pages::PageExtractor;
    /// # use lopdf::Document;
    /// # fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
    /// let extracted = PageExtractor::new().extract_pages(&doc, &[3, 1])?;
    /// assert_eq!(extracted.get_pages().len(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn extract_pages(&self, doc: &Document, pages: &[u32]) -> Result<Document> {
        if pages.is_empty() {
            return Err(PdfManagerError::other("No pages requested"));
        }

        let page_map = doc.get_pages();
        let mut new_doc = doc.clone();
        self.flatten_all(&mut new_doc)?;
        let root = root_pages_id(&new_doc)?;

        let mut used = HashSet::new();
        let mut kids = Vec::with_capacity(pages.len());

        for &number in pages {
            let page_id = *page_map
                .get(&number)
                .ok_or_else(|| PdfManagerError::PageOutOfRange {
                    token: number.to_string(),
                    page_count: page_map.len(),
                })?;

            let kid_id = if used.insert(page_id) {
                page_id
            } else {
                let copy = new_doc.get_object(page_id)?.clone();
                new_doc.add_object(copy)
            };

            set_parent(&mut new_doc, kid_id, root)?;
            kids.push(Object::Reference(kid_id));
        }

        let count = kids.len() as i64;
        let pages_dict = new_doc.get_dictionary_mut(root)?;
        pages_dict.set("Kids", kids);
        pages_dict.set("Count", Object::Integer(count));

        if let Ok(catalog) = new_doc.catalog_mut() {
            catalog.remove(b"Outlines");
        }

        new_doc.prune_objects();
        Ok(new_doc)
    }

    /// Append every page of `source` to the end of `target`'s page tree.
    ///
    /// `source` objects are renumbered past `target.max_id` before they are
    /// moved over. Returns the number of pages appended.
    ///
    /// # Errors
    ///
    /// Returns an error if either page tree is malformed.
    pub fn append_document(&self, target: &mut Document, mut source: Document) -> Result<usize> {
        self.flatten_all(&mut source)?;
        source.renumber_objects_with(target.max_id + 1);

        let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();
        target.max_id = target.max_id.max(source.max_id);
        target.objects.extend(source.objects);

        let root = root_pages_id(target)?;
        for &page_id in &page_ids {
            set_parent(target, page_id, root)?;
        }

        let pages_dict = target.get_dictionary_mut(root)?;
        let kids = pages_dict
            .get_mut(b"Kids")
            .and_then(Object::as_array_mut)
            .map_err(|e| PdfManagerError::other(format!("Pages node has no Kids array: {e}")))?;
        kids.extend(page_ids.iter().map(|&id| Object::Reference(id)));

        let current = pages_dict
            .get(b"Count")
            .and_then(Object::as_i64)
            .unwrap_or(0);
        pages_dict.set("Count", Object::Integer(current + page_ids.len() as i64));

        Ok(page_ids.len())
    }

    /// Copy inherited attributes onto every leaf page of `doc`.
    pub fn flatten_all(&self, doc: &mut Document) -> Result<()> {
        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        for page_id in page_ids {
            self.flatten_page(doc, page_id)?;
        }
        Ok(())
    }

    /// Copy inherited attributes onto a single leaf page.
    ///
    /// Attributes the page already defines are left alone.
    pub fn flatten_page(&self, doc: &mut Document, page_id: ObjectId) -> Result<()> {
        let page = doc.get_dictionary(page_id)?;
        let inherited: Vec<(&[u8], Object)> = INHERITABLE
            .iter()
            .filter(|key| !page.has(key))
            .filter_map(|&key| inherited_attribute(doc, page_id, key).map(|value| (key, value)))
            .collect();

        if inherited.is_empty() {
            return Ok(());
        }

        let page = doc.get_dictionary_mut(page_id)?;
        for (key, value) in inherited {
            page.set(key, value);
        }
        Ok(())
    }
}

/// Object id of the document's root `Pages` node.
pub fn root_pages_id(doc: &Document) -> Result<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| PdfManagerError::other(format!("Document has no page tree: {e}")))
}

fn set_parent(doc: &mut Document, page_id: ObjectId, parent: ObjectId) -> Result<()> {
    let page = doc.get_dictionary_mut(page_id)?;
    page.set("Parent", Object::Reference(parent));
    Ok(())
}

/// Value of a page attribute, taken from the page itself or the nearest
/// ancestor that defines it.
pub fn page_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let page = doc.get_dictionary(page_id).ok()?;
    match page.get(key) {
        Ok(value) => Some(value.clone()),
        Err(_) => inherited_attribute(doc, page_id, key),
    }
}

/// Walk up the `Parent` chain looking for `key`.
fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_TREE_DEPTH {
        let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent_id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
    }

    None
}
