use serde::Deserialize;

use super::Identified;

/// Wire shape of a reference to another record.
///
/// Depending on how far the server populated the document, a reference
/// arrives as a lookup array, a single embedded object, or a bare id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Linked<T> {
    Many(Vec<T>),
    One(T),
    Id(String),
}

impl<T: Identified> Linked<T> {
    /// Collapses the reference into `(id, resolved object)`.
    pub(crate) fn resolve(self) -> (Option<String>, Option<T>) {
        match self {
            Linked::Many(items) => match items.into_iter().next() {
                Some(item) => (Some(item.id().to_string()), Some(item)),
                None => (None, None),
            },
            Linked::One(item) => (Some(item.id().to_string()), Some(item)),
            Linked::Id(id) => (Some(id), None),
        }
    }
}

/// Merges a primary reference (`deviceId`) with a populated sibling
/// (`device`) into the canonical pair. The id is taken from whichever side
/// provides one; the populated sibling wins for the object.
pub(crate) fn merge_links<T: Identified>(
    primary: Option<Linked<T>>,
    populated: Option<Linked<T>>,
) -> (String, Option<T>) {
    let (primary_id, primary_obj) = primary.map(Linked::resolve).unwrap_or((None, None));
    let (populated_id, populated_obj) = populated.map(Linked::resolve).unwrap_or((None, None));
    let id = primary_id.or(populated_id).unwrap_or_default();
    (id, populated_obj.or(primary_obj))
}
