use notecards_core::{
    note_cards, IntentOutcome, JsonFileNoteRepository, Note, NoteIntent, NoteStore,
    NoteStoreError, NoteTarget,
};
use std::path::Path;

fn open_store(dir: &Path) -> NoteStore<JsonFileNoteRepository> {
    NoteStore::open(JsonFileNoteRepository::new(dir.join("n.json"))).unwrap()
}

fn add(title: &str, content: &str) -> NoteIntent {
    NoteIntent::AddNote {
        title: title.to_string(),
        content: content.to_string(),
    }
}

#[test]
fn add_intent_reports_position_and_id() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path());

    store.apply(add("a", "")).unwrap();
    let outcome = store.apply(add("b", "")).unwrap();

    match outcome {
        IntentOutcome::Added { index, id } => {
            assert_eq!(index, 1);
            assert_eq!(store.get(1).unwrap().id, id);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn blank_add_intent_is_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path());

    let outcome = store.apply(add("  ", "")).unwrap();

    assert_eq!(outcome, IntentOutcome::Unchanged);
    assert!(!outcome.changed());
}

#[test]
fn checked_edit_applies_when_card_is_current() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path());
    store.apply(add("a", "1")).unwrap();
    let card = note_cards(store.entries()).remove(0);

    let outcome = store
        .apply(NoteIntent::EditNote {
            target: NoteTarget::checked(card.index, card.id),
            title: "a".to_string(),
            content: "2".to_string(),
        })
        .unwrap();

    assert_eq!(
        outcome,
        IntentOutcome::Edited {
            index: 0,
            previous: Note::new("a", "1"),
        }
    );
    assert_eq!(store.notes(), vec![Note::new("a", "2")]);
}

#[test]
fn stale_card_delete_is_rejected_without_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("n.json");
    let mut store = NoteStore::open(JsonFileNoteRepository::new(&path)).unwrap();
    for title in ["a", "b", "c"] {
        store.apply(add(title, "")).unwrap();
    }
    let rendered = note_cards(store.entries());

    // First dialog deletes "a"; a second dialog still holds the old card for "b".
    store
        .apply(NoteIntent::DeleteNote {
            target: NoteTarget::checked(rendered[0].index, rendered[0].id),
        })
        .unwrap();
    let bytes_before = std::fs::read(&path).unwrap();

    let err = store
        .apply(NoteIntent::DeleteNote {
            target: NoteTarget::checked(rendered[1].index, rendered[1].id),
        })
        .unwrap_err();

    assert!(matches!(err, NoteStoreError::StaleNote { index: 1, .. }));
    assert_eq!(store.notes(), vec![Note::new("b", ""), Note::new("c", "")]);
    assert_eq!(std::fs::read(&path).unwrap(), bytes_before);
}

#[test]
fn unchecked_delete_follows_positional_identity() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(dir.path());
    for title in ["a", "b"] {
        store.apply(add(title, "")).unwrap();
    }

    let outcome = store
        .apply(NoteIntent::DeleteNote {
            target: NoteTarget::at(1),
        })
        .unwrap();

    assert_eq!(
        outcome,
        IntentOutcome::Deleted {
            index: 1,
            removed: Note::new("b", ""),
        }
    );
    let err = store
        .apply(NoteIntent::DeleteNote {
            target: NoteTarget::at(1),
        })
        .unwrap_err();
    assert!(matches!(err, NoteStoreError::IndexOutOfRange { index: 1, len: 1 }));
}
