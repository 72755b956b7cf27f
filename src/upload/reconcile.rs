use super::types::TrackedFile;
use std::collections::HashMap;

/// Replaces each entry whose identity has an outcome, leaving the rest as-is.
///
/// Success wins if an identity appears in both maps. Order is preserved and
/// no entry is added or removed.
pub fn reconcile(
    entries: Vec<TrackedFile>,
    succeeded: &HashMap<String, TrackedFile>,
    failed: &HashMap<String, TrackedFile>,
) -> Vec<TrackedFile> {
    entries
        .into_iter()
        .map(|entry| {
            if let Some(done) = succeeded.get(&entry.identity) {
                done.clone()
            } else if let Some(broken) = failed.get(&entry.identity) {
                broken.clone()
            } else {
                entry
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::types::BatchId;

    #[test]
    fn replaces_only_matching_entry_in_place() {
        let entries = vec![
            TrackedFile::failed("A"),
            TrackedFile::uploading("B", BatchId(1)),
            TrackedFile::succeeded("C", "3", "u3"),
        ];
        let updated = TrackedFile::succeeded("B", "2", "u2");
        let succeeded = HashMap::from([("B".to_string(), updated.clone())]);

        let merged = reconcile(entries.clone(), &succeeded, &HashMap::new());
        assert_eq!(merged, vec![entries[0].clone(), updated, entries[2].clone()]);
    }

    #[test]
    fn failures_applied_and_unknown_keys_ignored() {
        let entries = vec![
            TrackedFile::uploading("A", BatchId(1)),
            TrackedFile::uploading("B", BatchId(1)),
        ];
        let failed: HashMap<_, _> = ["A", "B", "Z"]
            .iter()
            .map(|n| (n.to_string(), TrackedFile::failed(*n)))
            .collect();

        let merged = reconcile(entries, &HashMap::new(), &failed);
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|f| f.state == crate::upload::FileState::Failed));
    }
}
