use chrono::{NaiveDate, NaiveDateTime};
use clerk_core::db::open_db_in_memory;
use clerk_core::{
    resolve, EntityRef, ErrorCategory, RepoError, Render, SqliteTaskRepository, TaskRepository,
    TaskStatus,
};

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 9, 20)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

#[test]
fn add_then_list_returns_open_task() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let id = repo.add_task("buy milk", "2%", at(15, 0)).unwrap();

    let tasks = repo.list_tasks().unwrap();
    assert_eq!(tasks.len(), 1);
    let task = &tasks[0];
    assert_eq!(task.id, id);
    assert_eq!(task.name, "buy milk");
    assert_eq!(task.contents, "2%");
    assert_eq!(task.created_at, Some(at(15, 0)));
    assert_eq!(task.status(), TaskStatus::Open);
}

#[test]
fn list_is_ordered_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let first = repo.add_task("zeta", "", at(9, 0)).unwrap();
    let second = repo.add_task("alpha", "", at(8, 0)).unwrap();

    let ids: Vec<i64> = repo.list_tasks().unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![first, second]);
}

#[test]
fn get_by_id_and_by_name_resolve_same_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let id = repo.add_task("buy milk", "2%", at(15, 0)).unwrap();

    let by_id = repo.get_task(&resolve(&format!("#{id}"))).unwrap();
    let by_name = repo.get_task(&resolve("buy milk")).unwrap();
    assert_eq!(by_id, by_name);
}

#[test]
fn edit_replaces_contents_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let id = repo.add_task("buy milk", "2%", at(15, 0)).unwrap();

    let edited = repo.edit_task(&resolve("buy milk"), "whole").unwrap();
    assert_eq!(edited, id);

    let task = repo.get_task(&EntityRef::id(id)).unwrap();
    assert_eq!(task.name, "buy milk");
    assert_eq!(task.contents, "whole");
    assert_eq!(task.created_at, Some(at(15, 0)));
    assert!(task.completed_at.is_none());
}

#[test]
fn complete_sets_timestamp_and_second_call_moves_it() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let id = repo.add_task("buy milk", "", at(15, 0)).unwrap();

    repo.complete_task(&EntityRef::id(id), at(16, 0)).unwrap();
    let task = repo.get_task(&EntityRef::id(id)).unwrap();
    assert_eq!(task.completed_at, Some(at(16, 0)));
    assert!(task.is_completed());

    repo.complete_task(&EntityRef::id(id), at(17, 30)).unwrap();
    let task = repo.get_task(&EntityRef::id(id)).unwrap();
    assert_eq!(task.completed_at, Some(at(17, 30)));
}

#[test]
fn delete_removes_only_the_referenced_task() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let keep = repo.add_task("keep", "", at(9, 0)).unwrap();
    let drop = repo.add_task("drop", "", at(9, 1)).unwrap();

    assert_eq!(repo.delete_task(&EntityRef::id(drop)).unwrap(), drop);

    let tasks = repo.list_tasks().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, keep);
}

#[test]
fn missing_references_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    repo.add_task("present", "", at(9, 0)).unwrap();

    for token in ["#999", "absent", "#abc", "#"] {
        let reference = resolve(token);
        let err = repo.get_task(&reference).unwrap_err();
        assert!(
            matches!(err, RepoError::NotFound(_)),
            "{token} should be not found, got {err:?}"
        );
        assert_eq!(err.category(), ErrorCategory::NotFound);

        assert!(matches!(
            repo.edit_task(&reference, "x"),
            Err(RepoError::NotFound(_))
        ));
        assert!(matches!(
            repo.delete_task(&reference),
            Err(RepoError::NotFound(_))
        ));
        assert!(matches!(
            repo.complete_task(&reference, at(10, 0)),
            Err(RepoError::NotFound(_))
        ));
    }

    assert_eq!(repo.list_tasks().unwrap().len(), 1);
}

#[test]
fn duplicate_names_are_ambiguous_and_untouched() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let first = repo.add_task("same", "one", at(9, 0)).unwrap();
    let second = repo.add_task("same", "two", at(9, 1)).unwrap();

    let err = repo.delete_task(&resolve("same")).unwrap_err();
    assert!(matches!(err, RepoError::Ambiguous { matches: 2, .. }));
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert_eq!(repo.list_tasks().unwrap().len(), 2);

    repo.edit_task(&resolve(&format!("#{second}")), "changed")
        .unwrap();
    assert_eq!(
        repo.get_task(&EntityRef::id(first)).unwrap().contents,
        "one"
    );
}

#[test]
fn name_with_leading_hash_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    for name in ["#1", "", "   "] {
        let err = repo.add_task(name, "", at(9, 0)).unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)), "{name:?}");
    }
    assert!(repo.list_tasks().unwrap().is_empty());
}

#[test]
fn legacy_empty_completed_at_reads_as_open() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO tasks (name, contents, created_at, completed_at)
         VALUES ('legacy', '', '2020-09-20 15:00', '');",
        [],
    )
    .unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let task = repo.get_task(&resolve("legacy")).unwrap();
    assert_eq!(task.status(), TaskStatus::Open);
}

#[test]
fn unreadable_legacy_rows_do_not_hide_healthy_ones() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO tasks (name, contents, created_at) VALUES ('bad', '', 'yesterday');
         INSERT INTO tasks (name, contents, created_at) VALUES ('blank', '', '');",
    )
    .unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let healthy = repo.add_task("healthy", "ok", at(9, 0)).unwrap();

    let tasks = repo.list_tasks().unwrap();
    assert_eq!(tasks.len(), 3);
    assert!(tasks[0].created_at.is_none());
    assert!(tasks[1].created_at.is_none());
    assert_eq!(tasks[2].id, healthy);
    assert_eq!(tasks[2].created_at, Some(at(9, 0)));
    assert_eq!(tasks[0].render(), "- id: 1 | name: bad");
}

#[test]
fn null_text_columns_read_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");
    let legacy = rusqlite::Connection::open(&path).unwrap();
    legacy
        .execute_batch(
            "CREATE TABLE tasks (
                id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(64),
                contents TEXT,
                created_at VARCHAR(64),
                completed_at VARCHAR(64)
            );
            INSERT INTO tasks (name, contents, created_at, completed_at)
            VALUES ('nulls', NULL, NULL, NULL);",
        )
        .unwrap();
    drop(legacy);

    let conn = clerk_core::db::open_db(&path).unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let task = repo.get_task(&resolve("nulls")).unwrap();
    assert_eq!(task.contents, "");
    assert!(task.created_at.is_none());
    assert_eq!(task.status(), TaskStatus::Open);
}

#[test]
fn buy_milk_lifecycle() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let id = repo.add_task("buy milk", "2%, whole", at(15, 0)).unwrap();
    let tasks = repo.list_tasks().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "buy milk");
    assert_eq!(tasks[0].contents, "2%, whole");
    assert!(tasks[0].completed_at.is_none());

    repo.complete_task(&resolve(&format!("#{id}")), at(15, 30))
        .unwrap();
    let tasks = repo.list_tasks().unwrap();
    assert_eq!(tasks[0].completed_at, Some(at(15, 30)));

    repo.delete_task(&resolve(&format!("#{id}"))).unwrap();
    assert!(repo.list_tasks().unwrap().is_empty());
}
