use chrono::Utc;
use moodjournal_core::db::open_db_in_memory;
use moodjournal_core::{
    EntryListQuery, EntryRepository, EntryScope, EntryService, EntryServiceError, EntrySortKey,
    JournalEntry, Location, Mood, NewEntryRequest, SortOrder, SqliteEntryRepository,
    SqliteTagRepository, TagRepository, TagService,
};
use rusqlite::Connection;
use uuid::Uuid;

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

fn entry_service(conn: &Connection) -> EntryService<SqliteEntryRepository<'_>, SqliteTagRepository<'_>> {
    EntryService::new(
        SqliteEntryRepository::try_new(conn).unwrap(),
        SqliteTagRepository::try_new(conn).unwrap(),
    )
}

fn seed_catalog(conn: &Connection) {
    TagService::new(SqliteTagRepository::try_new(conn).unwrap())
        .seed_predefined_catalog()
        .unwrap();
}

fn set_created_at(conn: &Connection, entry: &JournalEntry, created_at: i64) {
    conn.execute(
        "UPDATE journal_entries SET created_at = ?1, updated_at = ?1 WHERE id = ?2;",
        rusqlite::params![created_at, entry.id.to_string()],
    )
    .unwrap();
}

#[test]
fn repository_insert_and_get_roundtrip_preserves_location() {
    let conn = setup();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let location = Location::try_new("Riverside", 48.85, 2.35).unwrap();
    let entry = JournalEntry::new("picnic", Mood::Excellent, Some(location.clone()));
    let id = repo.insert_entry(&entry).unwrap();

    let loaded = repo.get_entry(id, false).unwrap().unwrap();
    assert_eq!(loaded, entry);
    assert_eq!(loaded.location, Some(location));
}

#[test]
fn update_missing_entry_returns_not_found() {
    let conn = setup();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let entry = JournalEntry::new("ghost", Mood::Okay, None);
    let err = repo.update_entry(&entry).unwrap_err();
    assert!(matches!(err, moodjournal_core::RepoError::EntryNotFound(id) if id == entry.id));
}

#[test]
fn end_to_end_create_list_and_stats() {
    let conn = setup();
    let service = entry_service(&conn);

    let older = service
        .create_entry(NewEntryRequest::new("yesterday", Mood::Bad))
        .unwrap();
    set_created_at(&conn, &older, older.created_at - 60_000);

    let created = service
        .create_entry(NewEntryRequest::new("Walked the dog", Mood::Good))
        .unwrap();
    assert_eq!(created.word_count(), 3);
    assert_eq!(created.tag_names(), vec!["Text"]);

    let listed = service
        .list_active(EntrySortKey::CreatedAt, SortOrder::Descending)
        .unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, created.id);

    let stats = service.stats(&Utc::now()).unwrap();
    assert_eq!(stats.total_entries, 2);
    assert_eq!(stats.entries_this_week, 2);
    assert_eq!(stats.average_mood, Some(3.0));
    assert_eq!(stats.distribution[3].count, 1);
}

#[test]
fn automatic_text_tag_is_shared_and_skipped_for_blank_content() {
    let conn = setup();
    let service = entry_service(&conn);

    let first = service
        .create_entry(NewEntryRequest::new("one", Mood::Okay))
        .unwrap();
    let second = service
        .create_entry(NewEntryRequest::new("two", Mood::Okay))
        .unwrap();
    assert_eq!(first.tags[0].id, second.tags[0].id);

    let blank = service
        .create_entry(NewEntryRequest::new("   ", Mood::Okay))
        .unwrap();
    assert!(blank.tags.is_empty());

    let mut untagged = NewEntryRequest::new("quiet", Mood::Okay);
    untagged.auto_tag = false;
    assert!(service.create_entry(untagged).unwrap().tags.is_empty());

    let tag_repo = SqliteTagRepository::try_new(&conn).unwrap();
    let automatic: Vec<_> = tag_repo
        .list_tags()
        .unwrap()
        .into_iter()
        .filter(|tag| tag.is_automatic)
        .collect();
    assert_eq!(automatic.len(), 1);
}

#[test]
fn create_attaches_location_tag_and_selected_predefined_tags() {
    let conn = setup();
    seed_catalog(&conn);
    let service = entry_service(&conn);

    let mut request = NewEntryRequest::new("beach day", Mood::Excellent);
    request.location = Some(Location::try_new("Beach", 36.0, -5.6).unwrap());
    request.tag_names = vec![
        "sunny".to_string(),
        "Friends".to_string(),
        "Sunny".to_string(),
        "Skydiving".to_string(),
    ];
    let created = service.create_entry(request).unwrap();

    let mut names = created.tag_names();
    names.sort_unstable();
    assert_eq!(names, vec!["Friends", "Location", "Sunny", "Text"]);
    assert!(created
        .tags
        .iter()
        .filter(|tag| tag.name == "Sunny" || tag.name == "Friends")
        .all(|tag| tag.is_predefined && tag.category_id.is_some()));
}

#[test]
fn update_entry_replaces_content_and_mood() {
    let conn = setup();
    let service = entry_service(&conn);
    let created = service
        .create_entry(NewEntryRequest::new("draft", Mood::Okay))
        .unwrap();

    let updated = service
        .update_entry(created.id, "final words", Mood::Excellent)
        .unwrap();
    assert_eq!(updated.content, "final words");
    assert_eq!(updated.mood, Mood::Excellent);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(updated.tags, created.tags);

    let emptied = service.update_content(created.id, "").unwrap();
    assert!(!emptied.has_text());
    let remooded = service.update_mood(created.id, Mood::Terrible).unwrap();
    assert_eq!(remooded.mood, Mood::Terrible);
}

#[test]
fn trash_hides_entry_and_restore_brings_it_back() {
    let conn = setup();
    let service = entry_service(&conn);
    let created = service
        .create_entry(NewEntryRequest::new("hide me", Mood::Bad))
        .unwrap();
    let before = service
        .list_active(EntrySortKey::CreatedAt, SortOrder::Descending)
        .unwrap();

    let trashed = service.move_to_trash(created.id).unwrap();
    assert!(trashed.is_deleted);
    assert!(trashed.deleted_at.is_some());
    assert!(service.get_entry(created.id).unwrap().is_none());
    assert!(service
        .list_active(EntrySortKey::CreatedAt, SortOrder::Descending)
        .unwrap()
        .is_empty());
    assert_eq!(service.list_trashed().unwrap().len(), 1);
    assert_eq!(service.count_active().unwrap(), 0);

    let trashed_again = service.move_to_trash(created.id).unwrap();
    assert_eq!(trashed_again.deleted_at, trashed.deleted_at);

    let restored = service.restore(created.id).unwrap();
    assert!(restored.is_active());
    assert_eq!(restored.deleted_at, None);
    let after = service
        .list_active(EntrySortKey::CreatedAt, SortOrder::Descending)
        .unwrap();
    assert_eq!(after, before);

    let restored_again = service.restore(created.id).unwrap();
    assert_eq!(restored_again, restored);
}

#[test]
fn editing_trashed_entry_is_rejected() {
    let conn = setup();
    let service = entry_service(&conn);
    let created = service
        .create_entry(NewEntryRequest::new("gone", Mood::Okay))
        .unwrap();
    service.move_to_trash(created.id).unwrap();

    let err = service
        .update_entry(created.id, "edit", Mood::Good)
        .unwrap_err();
    assert!(matches!(err, EntryServiceError::EntryNotFound(id) if id == created.id));
}

#[test]
fn permanently_delete_erases_entry_and_associations_but_keeps_tags() {
    let conn = setup();
    let service = entry_service(&conn);
    let created = service
        .create_entry(NewEntryRequest::new("forget this", Mood::Terrible))
        .unwrap();
    service.move_to_trash(created.id).unwrap();

    service.permanently_delete(created.id).unwrap();

    let repo = SqliteEntryRepository::try_new(&conn).unwrap();
    assert!(repo.get_entry(created.id, true).unwrap().is_none());
    assert_eq!(repo.count_entries(EntryScope::All).unwrap(), 0);
    let links: i64 = conn
        .query_row("SELECT COUNT(*) FROM entry_tags;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(links, 0);
    let tags = SqliteTagRepository::try_new(&conn).unwrap().list_tags().unwrap();
    assert_eq!(tags.len(), 1);

    let err = service.permanently_delete(created.id).unwrap_err();
    assert!(matches!(err, EntryServiceError::EntryNotFound(_)));
}

#[test]
fn empty_trash_removes_only_trashed_entries() {
    let conn = setup();
    let service = entry_service(&conn);
    let keep = service
        .create_entry(NewEntryRequest::new("keep", Mood::Good))
        .unwrap();
    for content in ["a", "b"] {
        let entry = service
            .create_entry(NewEntryRequest::new(content, Mood::Bad))
            .unwrap();
        service.move_to_trash(entry.id).unwrap();
    }

    assert_eq!(service.empty_trash().unwrap(), 2);
    assert!(service.list_trashed().unwrap().is_empty());
    assert!(service.get_entry(keep.id).unwrap().is_some());
}

#[test]
fn set_entry_tags_replaces_full_set() {
    let conn = setup();
    seed_catalog(&conn);
    let service = entry_service(&conn);
    let tag_repo = SqliteTagRepository::try_new(&conn).unwrap();
    let weather = tag_repo.find_category_by_name("Weather", true).unwrap().unwrap();
    let rainy = tag_repo.find_tag_in_category(weather.id, "Rainy").unwrap().unwrap();
    let windy = tag_repo.find_tag_in_category(weather.id, "Windy").unwrap().unwrap();

    let created = service
        .create_entry(NewEntryRequest::new("storm", Mood::Bad))
        .unwrap();
    let tagged = service
        .set_entry_tags(created.id, &[windy.id, rainy.id, rainy.id])
        .unwrap();
    assert_eq!(tagged.tag_names(), vec!["Rainy", "Windy"]);

    let err = service
        .set_entry_tags(created.id, &[Uuid::new_v4()])
        .unwrap_err();
    assert!(matches!(err, EntryServiceError::TagNotFound(_)));
    let unchanged = service.get_entry(created.id).unwrap().unwrap();
    assert_eq!(unchanged.tag_names(), vec!["Rainy", "Windy"]);
}

#[test]
fn deleting_a_tag_keeps_entries() {
    let conn = setup();
    let service = entry_service(&conn);
    let created = service
        .create_entry(NewEntryRequest::new("with text", Mood::Okay))
        .unwrap();

    let tag_repo = SqliteTagRepository::try_new(&conn).unwrap();
    tag_repo.delete_tag(created.tags[0].id).unwrap();

    let loaded = service.get_entry(created.id).unwrap().unwrap();
    assert!(loaded.tags.is_empty());
}

#[test]
fn list_supports_sort_keys_tag_filter_and_pagination() {
    let conn = setup();
    let service = entry_service(&conn);
    let moods = [Mood::Okay, Mood::Terrible, Mood::Excellent];
    let mut created = Vec::new();
    for (index, mood) in moods.into_iter().enumerate() {
        let mut request = NewEntryRequest::new(format!("entry {index}"), mood);
        request.auto_tag = index != 1;
        let entry = service.create_entry(request).unwrap();
        set_created_at(&conn, &entry, 1_000 * (index as i64 + 1));
        created.push(entry);
    }

    let by_mood = service
        .list_active(EntrySortKey::Mood, SortOrder::Ascending)
        .unwrap();
    let mood_order: Vec<_> = by_mood.iter().map(|entry| entry.mood).collect();
    assert_eq!(mood_order, vec![Mood::Terrible, Mood::Okay, Mood::Excellent]);

    let oldest_first = service
        .list_active(EntrySortKey::CreatedAt, SortOrder::Ascending)
        .unwrap();
    assert_eq!(oldest_first[0].id, created[0].id);

    let text_tag = created[0].tags[0].id;
    let tagged = service
        .list_entries(&EntryListQuery {
            tag_id: Some(text_tag),
            ..EntryListQuery::default()
        })
        .unwrap();
    let tagged_ids: Vec<_> = tagged.iter().map(|entry| entry.id).collect();
    assert_eq!(tagged_ids, vec![created[2].id, created[0].id]);

    let page = service
        .list_entries(&EntryListQuery {
            limit: Some(1),
            offset: 1,
            ..EntryListQuery::default()
        })
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, created[1].id);
}

#[test]
fn daily_summaries_reflect_active_entries() {
    let conn = setup();
    let service = entry_service(&conn);
    let first = service
        .create_entry(NewEntryRequest::new("a", Mood::Good))
        .unwrap();
    let second = service
        .create_entry(NewEntryRequest::new("b", Mood::Bad))
        .unwrap();
    set_created_at(&conn, &first, 1_700_000_000_000);
    set_created_at(&conn, &second, 1_700_000_000_000 + 86_400_000);

    let summaries = service.daily_summaries(&Utc).unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].dominant_mood, Mood::Good);
    assert_eq!(summaries[1].dominant_mood, Mood::Bad);

    service.move_to_trash(second.id).unwrap();
    assert_eq!(service.daily_summaries(&Utc).unwrap().len(), 1);
}

#[test]
fn equal_timestamps_list_newest_insert_first() {
    let conn = setup();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let mut inserted = Vec::new();
    for index in 0..20 {
        let mut entry = JournalEntry::new(format!("same instant {index}"), Mood::Okay, None);
        entry.created_at = 1_700_000_000_000;
        entry.updated_at = 1_700_000_000_000;
        inserted.push(repo.insert_entry(&entry).unwrap());
    }

    let newest_first = repo.list_entries(&EntryListQuery::default()).unwrap();
    let ids: Vec<_> = newest_first.iter().map(|entry| entry.id).collect();
    let expected: Vec<_> = inserted.iter().rev().copied().collect();
    assert_eq!(ids, expected);

    let oldest_first = repo
        .list_entries(&EntryListQuery::active(
            EntrySortKey::CreatedAt,
            SortOrder::Ascending,
        ))
        .unwrap();
    assert_eq!(oldest_first[0].id, inserted[0]);
}

#[test]
fn trash_lists_most_recently_trashed_first() {
    let conn = setup();
    let service = entry_service(&conn);
    let edited_late = service
        .create_entry(NewEntryRequest::new("trashed first", Mood::Bad))
        .unwrap();
    let edited_early = service
        .create_entry(NewEntryRequest::new("trashed second", Mood::Good))
        .unwrap();
    service.move_to_trash(edited_late.id).unwrap();
    service.move_to_trash(edited_early.id).unwrap();

    let timestamps = [(&edited_late, 9_000, 2_000), (&edited_early, 1_000, 3_000)];
    for (entry, updated_at, deleted_at) in timestamps {
        conn.execute(
            "UPDATE journal_entries
             SET created_at = 500, updated_at = ?1, deleted_at = ?2
             WHERE id = ?3;",
            rusqlite::params![updated_at, deleted_at, entry.id.to_string()],
        )
        .unwrap();
    }

    let trashed = service.list_trashed().unwrap();
    let ids: Vec<_> = trashed.iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![edited_early.id, edited_late.id]);
}
