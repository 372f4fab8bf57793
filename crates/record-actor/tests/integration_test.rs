use record_actor::{Inserted, RecordActor, RecordEntity, SnapshotFile, StoreError};
use serde::{Deserialize, Serialize};

// --- Test Record ---

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Contact {
    key: String,
    phone: String,
}

#[derive(Debug, thiserror::Error)]
#[error("contact rejected: {0}")]
struct ContactError(String);

impl RecordEntity for Contact {
    type Key = String;
    type Draft = String;
    type Error = ContactError;

    fn from_draft(key: String, phone: String) -> Result<Self, Self::Error> {
        if phone.is_empty() {
            return Err(ContactError("empty phone".into()));
        }
        Ok(Self { key, phone })
    }
}

// --- Tests ---

#[tokio::test]
async fn test_record_lifecycle_in_memory() {
    let (actor, client) = RecordActor::<Contact>::new(10);
    let handle = tokio::spawn(actor.run());

    // 1. Insert
    let inserted = client.insert("1".into(), "201000".into()).await.unwrap();
    assert!(inserted.is_created());

    // 2. Second insert under the same key keeps the first record
    let again = client.insert("1".into(), "209999".into()).await.unwrap();
    assert_eq!(
        again,
        Inserted::Existing(Contact {
            key: "1".into(),
            phone: "201000".into()
        })
    );

    // 3. Get
    let contact = client.get("1".into()).await.unwrap().unwrap();
    assert_eq!(contact.phone, "201000");

    // 4. Remove returns the record, then nothing
    let removed = client.remove("1".into()).await.unwrap();
    assert_eq!(removed.map(|c| c.phone), Some("201000".to_string()));
    assert!(client.remove("1".into()).await.unwrap().is_none());
    assert!(client.get("1".into()).await.unwrap().is_none());

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_rejected_draft_is_not_stored() {
    let (actor, client) = RecordActor::<Contact>::new(10);
    tokio::spawn(actor.run());

    let result = client.insert("7".into(), String::new()).await;
    assert!(matches!(result, Err(StoreError::Entity(_))));
    assert!(client.get("7".into()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_snapshot_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");

    // First run: insert two, remove one
    let (actor, client) = RecordActor::<Contact>::with_snapshot(10, SnapshotFile::new(&path))
        .await
        .unwrap();
    let handle = tokio::spawn(actor.run());
    client.insert("a".into(), "2011".into()).await.unwrap();
    client.insert("b".into(), "2022".into()).await.unwrap();
    client.remove("a".into()).await.unwrap();
    drop(client);
    handle.await.unwrap();

    // Second run sees what the first one left behind
    let (actor, client) = RecordActor::<Contact>::with_snapshot(10, SnapshotFile::new(&path))
        .await
        .unwrap();
    tokio::spawn(actor.run());
    assert!(client.get("a".into()).await.unwrap().is_none());
    assert_eq!(
        client.get("b".into()).await.unwrap().map(|c| c.phone),
        Some("2022".to_string())
    );
}

#[tokio::test]
async fn test_failed_snapshot_write_rolls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    let (actor, client) = RecordActor::<Contact>::with_snapshot(10, SnapshotFile::new(&path))
        .await
        .unwrap();
    tokio::spawn(actor.run());

    // A directory squatting on the temp file name makes every write fail
    std::fs::create_dir(dir.path().join("contacts.json.tmp")).unwrap();

    let result = client.insert("a".into(), "2011".into()).await;
    assert!(matches!(result, Err(StoreError::Snapshot(_))));
    assert!(client.get("a".into()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_closed_actor_reports_error() {
    let (actor, client) = RecordActor::<Contact>::new(10);
    drop(actor);

    let result = client.get("a".into()).await;
    assert!(matches!(result, Err(StoreError::ActorClosed)));
}
