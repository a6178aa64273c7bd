use notedesk_core::db::migrations::latest_version;
use notedesk_core::db::open_db_in_memory;
use notedesk_core::{
    NoteDraft, NoteId, NotePatch, NoteRepository, RepoError, SqliteNoteRepository,
};
use rusqlite::{params, Connection};
use std::collections::HashSet;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let draft = NoteDraft {
        name: "Buy milk".to_string(),
        description: "weekly groceries".to_string(),
        url: "https://example.com/list".to_string(),
        comment: "before friday".to_string(),
    };
    let created = repo.create_note(&draft).unwrap();

    let loaded = repo.get_note(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.name, "Buy milk");
    assert_eq!(loaded.description, "weekly groceries");
    assert_eq!(loaded.url, "https://example.com/list");
    assert_eq!(loaded.comment, "before friday");
    assert_eq!(loaded.created_by, "user");
    assert_eq!(loaded.updated_by, "user");
}

#[test]
fn create_with_defaults_sets_empty_fields_and_equal_timestamps() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let created = repo.create_note(&NoteDraft::new("Buy milk")).unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(created.description, "");
    assert_eq!(created.url, "");
    assert_eq!(created.comment, "");
    assert_eq!(created.created_at, created.updated_at);
}

#[test]
fn create_assigns_unique_previously_unseen_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let mut seen: HashSet<NoteId> = HashSet::new();
    for n in 0..5 {
        let created = repo.create_note(&NoteDraft::new(format!("note {n}"))).unwrap();
        assert!(seen.insert(created.id), "id {} reused", created.id);
    }

    // AUTOINCREMENT keeps ids of deleted rows retired.
    let last = *seen.iter().max().unwrap();
    repo.delete_note(last).unwrap();
    let fresh = repo.create_note(&NoteDraft::new("after delete")).unwrap();
    assert!(seen.insert(fresh.id), "id {} reused after delete", fresh.id);
}

#[test]
fn create_with_empty_name_fails_and_inserts_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let err = repo.create_note(&NoteDraft::new("   ")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(note_count(&conn), 0);
}

#[test]
fn partial_update_changes_only_supplied_fields_and_refreshes_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let created = repo.create_note(&NoteDraft::new("Buy milk")).unwrap();
    pin_timestamps(&conn, created.id, 1_000_000_000_000);

    let patch = NotePatch {
        comment: Some("urgent".to_string()),
        ..NotePatch::default()
    };
    let updated = repo.update_note(created.id, &patch).unwrap();

    assert_eq!(updated.name, "Buy milk");
    assert_eq!(updated.comment, "urgent");
    assert_eq!(updated.description, "");
    assert_eq!(updated.created_at, 1_000_000_000_000);
    assert!(
        updated.updated_at > 1_000_000_000_000,
        "updated_at was not refreshed"
    );
}

#[test]
fn update_with_empty_patch_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let created = repo.create_note(&NoteDraft::new("unchanged")).unwrap();
    pin_timestamps(&conn, created.id, 1_000_000_000_000);
    let before = repo.get_note(created.id).unwrap().unwrap();

    let after = repo.update_note(created.id, &NotePatch::default()).unwrap();

    assert_eq!(after, before);
    assert_eq!(after.updated_at, 1_000_000_000_000);
}

#[test]
fn update_missing_note_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let patch = NotePatch {
        name: Some("renamed".to_string()),
        ..NotePatch::default()
    };
    let err = repo.update_note(42, &patch).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
}

#[test]
fn update_with_empty_name_fails_and_leaves_record_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let created = repo.create_note(&NoteDraft::new("keep me")).unwrap();
    let patch = NotePatch {
        name: Some("  ".to_string()),
        comment: Some("ignored".to_string()),
        ..NotePatch::default()
    };

    let err = repo.update_note(created.id, &patch).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let loaded = repo.get_note(created.id).unwrap().unwrap();
    assert_eq!(loaded.name, "keep me");
    assert_eq!(loaded.comment, "");
}

#[test]
fn delete_removes_row_permanently() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let created = repo.create_note(&NoteDraft::new("short-lived")).unwrap();
    repo.delete_note(created.id).unwrap();

    assert!(repo.get_note(created.id).unwrap().is_none());
    assert_eq!(note_count(&conn), 0);
}

#[test]
fn delete_missing_note_returns_not_found_and_mutates_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    repo.create_note(&NoteDraft::new("survivor")).unwrap();
    let err = repo.delete_note(999).unwrap_err();

    assert!(matches!(err, RepoError::NotFound(999)));
    assert_eq!(note_count(&conn), 1);
}

#[test]
fn list_orders_by_updated_at_descending() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let a = repo.create_note(&NoteDraft::new("a")).unwrap();
    let b = repo.create_note(&NoteDraft::new("b")).unwrap();
    let c = repo.create_note(&NoteDraft::new("c")).unwrap();
    pin_timestamps(&conn, a.id, 1_000);
    pin_timestamps(&conn, b.id, 3_000);
    pin_timestamps(&conn, c.id, 2_000);

    let listed = repo.list_notes().unwrap();
    let ids: Vec<_> = listed.iter().map(|note| note.id).collect();
    assert_eq!(ids, vec![b.id, c.id, a.id]);
}

#[test]
fn list_after_creates_and_deletes_returns_exact_survivors() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let mut ids = Vec::new();
    for n in 0..5 {
        ids.push(repo.create_note(&NoteDraft::new(format!("note {n}"))).unwrap().id);
    }
    repo.delete_note(ids[1]).unwrap();
    repo.delete_note(ids[3]).unwrap();

    let listed = repo.list_notes().unwrap();
    assert_eq!(listed.len(), 3);
    let listed_ids: HashSet<_> = listed.iter().map(|note| note.id).collect();
    assert_eq!(listed_ids, HashSet::from([ids[0], ids[2], ids[4]]));
}

#[test]
fn read_rejects_persisted_empty_name() {
    let conn = open_db_in_memory().unwrap();
    conn.execute("INSERT INTO notes (name) VALUES ('');", [])
        .unwrap();

    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let err = repo.list_notes().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteNoteRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_notes_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteNoteRepository::try_new(&conn);
    assert!(matches!(result, Err(RepoError::MissingRequiredTable("notes"))));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteNoteRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "notes",
            column: "description"
        })
    ));
}

fn note_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))
        .unwrap()
}

fn pin_timestamps(conn: &Connection, id: NoteId, epoch_ms: i64) {
    conn.execute(
        "UPDATE notes SET created_at = ?1, updated_at = ?1 WHERE id = ?2;",
        params![epoch_ms, id],
    )
    .unwrap();
}
