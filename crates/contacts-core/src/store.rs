//! Contact store
//!
//! The `Store` owns the SQLite connection holding every contact record.
//! It assigns IDs and creation timestamps, and runs the shared validation
//! rules before every write, so nothing invalid is ever persisted.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open(&config)?;
//!
//! let contact = store.create(&ContactFields::new("Ann Lee", "ann@example.com", "9876543210"))?;
//! let all = store.list()?; // newest first
//! ```

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::models::{Contact, ContactFields};
use crate::storage::schema::{init_schema, needs_init};
use crate::storage::{StoreError, StoreResult};
use crate::validation::validate;

const SELECT_CONTACT: &str =
    "SELECT id, name, email, phone, message, created_at FROM contacts";

/// Persistent collection of contacts
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create the database under the configured data directory
    pub fn open(config: &Config) -> StoreResult<Self> {
        std::fs::create_dir_all(&config.data_dir)
            .map_err(|e| StoreError::from_io(e, config.data_dir.clone()))?;

        let path = config.sqlite_path();
        let conn = Connection::open(&path)?;

        if needs_init(&conn) {
            init_schema(&conn)?;
        }

        info!("Opened contact store at {:?}", path);
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Validate and insert a new contact
    ///
    /// The store assigns the ID and creation time.
    pub fn create(&mut self, fields: &ContactFields) -> StoreResult<Contact> {
        let valid = validate(fields)?;

        let contact = Contact {
            id: Uuid::new_v4(),
            name: valid.name,
            email: valid.email,
            phone: valid.phone,
            message: valid.message,
            created_at: now_millis(),
        };

        self.conn.execute(
            "INSERT INTO contacts (id, name, email, phone, message, created_at) VALUES (?, ?, ?, ?, ?, ?)",
            params![
                contact.id.to_string(),
                contact.name,
                contact.email,
                contact.phone,
                contact.message,
                contact.created_at.timestamp_millis(),
            ],
        )?;

        info!(id = %contact.id, "Created contact");
        Ok(contact)
    }

    /// All contacts, newest first
    pub fn list(&self) -> StoreResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_CONTACT} ORDER BY created_at DESC, rowid DESC"))?;

        let rows = stmt.query_map([], ContactRow::from_row)?;

        let mut contacts = Vec::new();
        for row in rows {
            contacts.push(row?.hydrate()?);
        }

        debug!(count = contacts.len(), "Listed contacts");
        Ok(contacts)
    }

    /// Get a contact by ID
    pub fn get(&self, id: Uuid) -> StoreResult<Option<Contact>> {
        find_contact(&self.conn, id)
    }

    /// Apply `fields` on top of the stored contact
    ///
    /// Absent fields keep their stored value. The merged record is validated
    /// as a whole; on any violation nothing is written.
    pub fn update(&mut self, id: Uuid, fields: &ContactFields) -> StoreResult<Contact> {
        let tx = self.conn.transaction()?;

        let existing = find_contact(&tx, id)?.ok_or(StoreError::NotFound(id))?;
        let valid = validate(&fields.merged_onto(&existing))?;

        tx.execute(
            "UPDATE contacts SET name = ?, email = ?, phone = ?, message = ? WHERE id = ?",
            params![
                valid.name,
                valid.email,
                valid.phone,
                valid.message,
                id.to_string()
            ],
        )?;
        tx.commit()?;

        info!(id = %id, "Updated contact");
        Ok(Contact {
            id,
            name: valid.name,
            email: valid.email,
            phone: valid.phone,
            message: valid.message,
            created_at: existing.created_at,
        })
    }

    /// Permanently remove a contact
    pub fn delete(&mut self, id: Uuid) -> StoreResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?", params![id.to_string()])?;

        if removed == 0 {
            return Err(StoreError::NotFound(id));
        }

        info!(id = %id, "Deleted contact");
        Ok(())
    }

    /// Number of stored contacts
    pub fn count(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn find_contact(conn: &Connection, id: Uuid) -> StoreResult<Option<Contact>> {
    let mut stmt = conn.prepare(&format!("{SELECT_CONTACT} WHERE id = ?"))?;
    let mut rows = stmt.query(params![id.to_string()])?;

    match rows.next()? {
        Some(row) => Ok(Some(ContactRow::from_row(row)?.hydrate()?)),
        None => Ok(None),
    }
}

/// Current time truncated to what the database keeps
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Raw row from the contacts table
struct ContactRow {
    id: String,
    name: String,
    email: String,
    phone: String,
    message: String,
    created_at: i64,
}

impl ContactRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
            message: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    fn hydrate(self) -> StoreResult<Contact> {
        let id = Uuid::parse_str(&self.id).map_err(|e| StoreError::CorruptRecord {
            id: self.id.clone(),
            details: e.to_string(),
        })?;
        let created_at = DateTime::from_timestamp_millis(self.created_at).ok_or_else(|| {
            StoreError::CorruptRecord {
                id: self.id.clone(),
                details: format!("timestamp out of range: {}", self.created_at),
            }
        })?;

        Ok(Contact {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Field, EMAIL_INVALID, NAME_REQUIRED, PHONE_LENGTH};
    use tempfile::TempDir;

    fn ann() -> ContactFields {
        ContactFields::new("Ann Lee", "Ann.Lee@Example.com", "9876543210")
    }

    #[test]
    fn test_open_creates_database() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: temp_dir.path().join("data"),
            ..Config::default()
        };

        let store = Store::open(&config).unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(config.sqlite_path().exists());
    }

    #[test]
    fn test_reopen_keeps_contacts() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        };

        let id = {
            let mut store = Store::open(&config).unwrap();
            store.create(&ann()).unwrap().id
        };

        let store = Store::open(&config).unwrap();
        let contact = store.get(id).unwrap().unwrap();
        assert_eq!(contact.name, "Ann Lee");
    }

    #[test]
    fn test_create_then_list_round_trip() {
        let mut store = Store::open_in_memory().unwrap();

        let created = store.create(&ann()).unwrap();
        assert_eq!(created.email, "ann.lee@example.com");
        assert_eq!(created.message, "");

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], created);
    }

    #[test]
    fn test_create_rejects_invalid() {
        let mut store = Store::open_in_memory().unwrap();

        let err = store
            .create(&ContactFields::new("", "not-an-email", "12"))
            .unwrap_err();
        match err {
            StoreError::Validation(v) => {
                assert_eq!(v.messages(), vec![NAME_REQUIRED, EMAIL_INVALID, PHONE_LENGTH]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_list_is_newest_first() {
        let mut store = Store::open_in_memory().unwrap();

        let first = store
            .create(&ContactFields::new("First", "first@example.com", "0000000001"))
            .unwrap();
        let second = store
            .create(&ContactFields::new("Second", "second@example.com", "0000000002"))
            .unwrap();
        let third = store
            .create(&ContactFields::new("Third", "third@example.com", "0000000003"))
            .unwrap();

        let ids: Vec<Uuid> = store.list().unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[test]
    fn test_update_merges_and_keeps_created_at() {
        let mut store = Store::open_in_memory().unwrap();
        let created = store.create(&ann()).unwrap();

        let patch = ContactFields {
            message: Some("Met at the conference".to_string()),
            email: Some("ANN@WORK.IO".to_string()),
            ..Default::default()
        };
        let updated = store.update(created.id, &patch).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Ann Lee");
        assert_eq!(updated.email, "ann@work.io");
        assert_eq!(updated.phone, "9876543210");
        assert_eq!(updated.message, "Met at the conference");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(store.get(created.id).unwrap().unwrap(), updated);
    }

    #[test]
    fn test_update_invalid_leaves_record_unchanged() {
        let mut store = Store::open_in_memory().unwrap();
        let created = store.create(&ann()).unwrap();

        let patch = ContactFields {
            name: Some("Annie".to_string()),
            phone: Some("123".to_string()),
            email: Some("broken@".to_string()),
            ..Default::default()
        };
        let err = store.update(created.id, &patch).unwrap_err();

        match err {
            StoreError::Validation(v) => {
                assert!(v.has(Field::Email));
                assert!(v.has(Field::Phone));
                assert!(!v.has(Field::Name));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(store.get(created.id).unwrap().unwrap(), created);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut store = Store::open_in_memory().unwrap();
        let id = Uuid::new_v4();

        let err = store.update(id, &ann()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(missing) if missing == id));
    }

    #[test]
    fn test_delete_then_delete_again() {
        let mut store = Store::open_in_memory().unwrap();
        let created = store.create(&ann()).unwrap();
        let other = store
            .create(&ContactFields::new("Bo", "bo@example.com", "1112223333"))
            .unwrap();

        store.delete(created.id).unwrap();
        let remaining = store.list().unwrap();
        assert_eq!(remaining, vec![other.clone()]);

        let err = store.delete(created.id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(store.list().unwrap(), vec![other]);
    }

    #[test]
    fn test_corrupt_row_is_reported() {
        let store = Store::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO contacts (id, name, email, phone, message, created_at) VALUES ('nope', 'A', 'a@b.co', '0123456789', '', 0)",
                [],
            )
            .unwrap();

        let err = store.list().unwrap_err();
        assert!(matches!(err, StoreError::CorruptRecord { .. }));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn valid_contact_comes_back_from_list(
                name in "[A-Za-z][A-Za-z ]{0,20}",
                local in "[A-Za-z0-9_]{1,8}",
                domain in "[a-z0-9]{1,8}\\.[a-z]{2,3}",
                phone in "[0-9]{10}",
                message in proptest::option::of("[ -~]{0,40}"),
            ) {
                let mut store = Store::open_in_memory().unwrap();
                let email = format!("{}@{}", local, domain);
                let mut fields = ContactFields::new(&name, &email, &phone);
                if let Some(message) = &message {
                    fields = fields.with_message(message);
                }

                let created = store.create(&fields).unwrap();
                let listed = store.list().unwrap();
                prop_assert_eq!(listed.len(), 1);
                prop_assert_eq!(&listed[0], &created);
                prop_assert_eq!(listed[0].name.as_str(), name.trim());
                prop_assert_eq!(listed[0].email.clone(), email.to_lowercase());
                prop_assert_eq!(listed[0].phone.as_str(), phone.as_str());
                prop_assert_eq!(listed[0].message.clone(), message.unwrap_or_default());
            }
        }
    }
}
