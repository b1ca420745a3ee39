//! In-memory menu documents. Built once, never mutated afterwards.

use crate::input::GroupAddress;
use crate::model::DocRef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Another generated document.
    Document(DocRef),
    /// Absolute action URL, handled by the gateway.
    Action(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub target: Target,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub title: String,
    pub entries: Vec<MenuEntry>,
}

impl GeneratedDocument {
    /// (label, reference) of every entry that links another document.
    pub fn linked_refs(&self) -> impl Iterator<Item = (&str, &DocRef)> {
        self.entries.iter().filter_map(|e| match &e.target {
            Target::Document(r) => Some((e.label.as_str(), r)),
            Target::Action(_) => None,
        })
    }
}

/// Build a navigation menu. Entry order is preserved.
pub fn build_menu(
    title: impl Into<String>,
    entries: impl IntoIterator<Item = (String, DocRef)>,
) -> GeneratedDocument {
    GeneratedDocument {
        title: title.into(),
        entries: entries
            .into_iter()
            .map(|(label, r)| MenuEntry {
                label,
                target: Target::Document(r),
            })
            .collect(),
    }
}

/// Build a leaf action document from (label, url) pairs; None if there are none.
pub fn build_actions(
    title: impl Into<String>,
    action_pairs: impl IntoIterator<Item = (String, String)>,
) -> Option<GeneratedDocument> {
    let entries: Vec<MenuEntry> = action_pairs
        .into_iter()
        .map(|(label, url)| MenuEntry {
            label,
            target: Target::Action(url),
        })
        .collect();
    if entries.is_empty() {
        return None;
    }
    Some(GeneratedDocument {
        title: title.into(),
        entries,
    })
}

/// "{root}{main}/{middle}/{sub}{suffix}"
pub fn action_url(root: &str, address: &GroupAddress, suffix: &str) -> String {
    format!("{}{}{}", root, address, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn menu_keeps_entry_order() {
        let doc = build_menu(
            "KNX",
            vec![
                ("Garden".to_string(), DocRef::Main("2".into())),
                ("House".to_string(), DocRef::Main("1".into())),
            ],
        );
        let labels: Vec<_> = doc.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Garden", "House"]);
        assert_eq!(
            doc.linked_refs().map(|(_, r)| r.clone()).collect::<Vec<_>>(),
            vec![DocRef::Main("2".into()), DocRef::Main("1".into())]
        );
    }

    #[test]
    fn no_actions_no_document() {
        assert_eq!(build_actions("Light", Vec::new()), None);
    }

    #[test]
    fn action_document_links_urls() {
        let ga = GroupAddress::parse("1/2/3").unwrap();
        let doc = build_actions(
            "Light",
            vec![("on".to_string(), action_url("http://gw:1234/", &ga, "-an"))],
        )
        .unwrap();
        assert_eq!(doc.title, "Light");
        assert_eq!(
            doc.entries,
            vec![MenuEntry {
                label: "on".into(),
                target: Target::Action("http://gw:1234/1/2/3-an".into()),
            }]
        );
        assert_eq!(doc.linked_refs().count(), 0);
    }
}
