//! Post-pass consistency check: every document link must resolve.

use crate::model::{DocRef, GeneratedDocument};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingLink {
    pub from: DocRef,
    pub label: String,
    pub to: DocRef,
}

/// Links whose target reference is not among `documents`.
pub fn check_links(documents: &[(DocRef, GeneratedDocument)]) -> Vec<DanglingLink> {
    let known: BTreeSet<&DocRef> = documents.iter().map(|(r, _)| r).collect();

    let mut out = Vec::new();
    for (from, doc) in documents {
        for (label, to) in doc.linked_refs() {
            if !known.contains(to) {
                out.push(DanglingLink {
                    from: from.clone(),
                    label: label.to_string(),
                    to: to.clone(),
                });
            }
        }
    }
    out
}
