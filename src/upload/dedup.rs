use super::store::FileStore;
use super::types::PickedFile;
use std::collections::HashSet;

/// Keeps the picked files whose name is not tracked yet, in selection order.
///
/// A name repeated inside one selection is kept once.
pub fn deduplicate(selection: &[PickedFile], store: &FileStore) -> Vec<PickedFile> {
    let mut seen = store.identities();
    let mut fresh = Vec::with_capacity(selection.len());
    for file in selection {
        if seen.insert(file.name.as_str()) {
            fresh.push(file.clone());
        }
    }
    fresh
}

/// Names that were dropped by [`deduplicate`], for logging.
pub fn skipped_names<'a>(selection: &'a [PickedFile], kept: &[PickedFile]) -> Vec<&'a str> {
    let kept: HashSet<&str> = kept.iter().map(|f| f.name.as_str()).collect();
    let mut reported = HashSet::new();
    selection
        .iter()
        .map(|f| f.name.as_str())
        .filter(|name| !kept.contains(name) && reported.insert(*name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::types::TrackedFile;

    fn picked(names: &[&str]) -> Vec<PickedFile> {
        names
            .iter()
            .map(|n| PickedFile {
                name: n.to_string(),
                path: format!("/tmp/{}", n).into(),
            })
            .collect()
    }

    #[test]
    fn drops_tracked_names_and_keeps_order() {
        let mut store = FileStore::new();
        store.append([TrackedFile::failed("b.pdf")]);

        let selection = picked(&["c.pdf", "b.pdf", "a.pdf"]);
        let fresh = deduplicate(&selection, &store);
        let names: Vec<_> = fresh.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["c.pdf", "a.pdf"]);
        assert_eq!(skipped_names(&selection, &fresh), ["b.pdf"]);
    }

    #[test]
    fn collapses_repeats_inside_one_selection() {
        let store = FileStore::new();
        let fresh = deduplicate(&picked(&["a.pdf", "a.pdf", "b.pdf"]), &store);
        assert_eq!(fresh.len(), 2);
    }

    #[test]
    fn everything_tracked_yields_nothing() {
        let mut store = FileStore::new();
        store.append([TrackedFile::failed("a.pdf")]);
        assert!(deduplicate(&picked(&["a.pdf"]), &store).is_empty());
    }
}
