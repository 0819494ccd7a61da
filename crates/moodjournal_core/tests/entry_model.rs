use moodjournal_core::{
    EntryValidationError, JournalEntry, Location, LocationError, Mood, MoodColor,
};
use uuid::Uuid;

#[test]
fn entry_new_sets_defaults() {
    let entry = JournalEntry::new("hello", Mood::Okay, None);

    assert!(!entry.id.is_nil());
    assert_eq!(entry.content, "hello");
    assert_eq!(entry.mood, Mood::Okay);
    assert_eq!(entry.created_at, entry.updated_at);
    assert!(entry.is_active());
    assert_eq!(entry.deleted_at, None);
    assert!(entry.tags.is_empty());
    assert!(!entry.has_location());
}

#[test]
fn has_text_tracks_trimmed_content() {
    let mut entry = JournalEntry::new(" \n\t ", Mood::Bad, None);
    assert!(!entry.has_text());

    entry.update_content("  rain again ");
    assert!(entry.has_text());

    entry.update_content("");
    assert!(!entry.has_text());
}

#[test]
fn edits_bump_updated_at_only() {
    let mut entry = JournalEntry::new("draft", Mood::Okay, None);
    entry.created_at = 1_000;
    entry.updated_at = 1_000;

    entry.update_content("final");
    assert_eq!(entry.created_at, 1_000);
    assert!(entry.updated_at > 1_000);

    let after_content = entry.updated_at;
    entry.update_mood(Mood::Excellent);
    assert_eq!(entry.mood, Mood::Excellent);
    assert!(entry.updated_at >= after_content);
}

#[test]
fn trash_is_idempotent_and_restore_round_trips() {
    let mut entry = JournalEntry::new("walk", Mood::Good, None);
    let original = entry.clone();

    entry.move_to_trash();
    assert!(entry.is_deleted);
    let first_deleted_at = entry.deleted_at.expect("trash sets deleted_at");

    entry.move_to_trash();
    assert_eq!(entry.deleted_at, Some(first_deleted_at));

    entry.restore();
    assert_eq!(entry, original);

    entry.restore();
    assert_eq!(entry, original);
}

#[test]
fn preview_text_truncates_long_content() {
    let short = JournalEntry::new("Walked the dog", Mood::Good, None);
    assert_eq!(short.preview_text(), "Walked the dog");

    let long_content = "x".repeat(150);
    let long = JournalEntry::new(long_content.clone(), Mood::Good, None);
    assert_eq!(long.preview_text(), format!("{}...", &long_content[..100]));

    let emoji = JournalEntry::new("\u{1F642}".repeat(101), Mood::Good, None);
    let preview = emoji.preview_text();
    assert_eq!(preview.chars().count(), 103);
    assert!(preview.ends_with("..."));
}

#[test]
fn word_count_counts_whitespace_tokens() {
    assert_eq!(JournalEntry::new("Walked the dog", Mood::Good, None).word_count(), 3);
    assert_eq!(JournalEntry::new("  one\n\ntwo  ", Mood::Good, None).word_count(), 2);
    assert_eq!(JournalEntry::new("", Mood::Good, None).word_count(), 0);
}

#[test]
fn location_requires_every_part() {
    let location = Location::from_parts(Some("Park".to_string()), Some(52.5), Some(13.4))
        .unwrap()
        .expect("complete location");
    assert_eq!(location.name(), "Park");
    assert_eq!(location.latitude(), 52.5);
    assert_eq!(location.longitude(), 13.4);

    assert_eq!(Location::from_parts(Some("Park".to_string()), None, Some(13.4)), Ok(None));
    assert_eq!(Location::from_parts(None, Some(52.5), Some(13.4)), Ok(None));
    assert_eq!(Location::from_parts(None, None, None), Ok(None));
    assert_eq!(
        Location::from_parts(Some("  ".to_string()), Some(1.0), Some(1.0)),
        Err(LocationError::BlankName)
    );
    assert_eq!(
        Location::from_parts(Some("Pole".to_string()), Some(120.0), Some(1.0)),
        Err(LocationError::LatitudeOutOfRange(120.0))
    );

    let entry = JournalEntry::new("x", Mood::Okay, Some(location));
    assert!(entry.has_location());
}

#[test]
fn location_rejects_out_of_range_coordinates() {
    assert_eq!(
        Location::try_new("North", 91.0, 0.0).unwrap_err(),
        LocationError::LatitudeOutOfRange(91.0)
    );
    assert_eq!(
        Location::try_new("East", 0.0, -180.5).unwrap_err(),
        LocationError::LongitudeOutOfRange(-180.5)
    );
    assert!(Location::try_new("Nowhere", f64::NAN, 0.0).is_err());
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = JournalEntry::with_id(Uuid::nil(), "x", Mood::Okay, None).unwrap_err();
    assert_eq!(err, EntryValidationError::NilId);
}

#[test]
fn validate_rejects_inconsistent_trash_state() {
    let mut entry = JournalEntry::new("x", Mood::Okay, None);
    entry.is_deleted = true;
    assert_eq!(
        entry.validate().unwrap_err(),
        EntryValidationError::DeletedFlagWithoutDeletedAt
    );

    entry.is_deleted = false;
    entry.deleted_at = Some(5);
    assert_eq!(
        entry.validate().unwrap_err(),
        EntryValidationError::DeletedAtWithoutDeletedFlag
    );
}

#[test]
fn mood_metadata_matches_scale() {
    assert_eq!(Mood::Terrible.display_name(), "Terrible");
    assert_eq!(Mood::Good.numeric_value(), 4);
    assert_eq!(Mood::Excellent.color(), MoodColor::Blue);
    assert_eq!(Mood::Okay.emoji(), "\u{1F610}");
    assert_eq!(Mood::default(), Mood::Okay);
}

#[test]
fn entry_serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let location = Location::try_new("Home", 35.0, 139.0).unwrap();
    let entry = JournalEntry::with_id(id, "tea", Mood::Excellent, Some(location)).unwrap();

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["mood"], "excellent");
    assert_eq!(json["is_deleted"], false);
    assert_eq!(json["location"]["name"], "Home");

    let decoded: JournalEntry = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, entry);
}

#[test]
fn deserialize_rejects_invalid_location() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "content": "x",
        "mood": "good",
        "created_at": 1,
        "updated_at": 1,
        "is_deleted": false,
        "deleted_at": null,
        "location": { "name": "Pole", "latitude": 120.0, "longitude": 0.0 }
    });

    let err = serde_json::from_value::<JournalEntry>(value).unwrap_err();
    assert!(
        err.to_string().contains("latitude 120 must be within"),
        "unexpected error: {err}"
    );
}
