use async_trait::async_trait;
use regex::RegexBuilder;
use shared_types::Contact;
use tokio::sync::Mutex;

use crate::database::{ContactStore, StoreError, StoreResult};

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: Vec<(i64, Contact)>,
}

/// Process-local store with the same observable behaviour as the Postgres one.
///
/// Rows keep insertion order. Search patterns use the `regex` crate syntax,
/// which agrees with POSIX extended regular expressions for the common cases
/// (anchors, classes, alternation, repetition).
#[derive(Default)]
pub struct MemoryContactStore {
    table: Mutex<Table>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn delete_where<F>(&self, predicate: F) -> u64
    where
        F: Fn(&Contact) -> bool + Send,
    {
        let mut table = self.table.lock().await;
        let before = table.rows.len();
        table.rows.retain(|(_, contact)| !predicate(contact));
        (before - table.rows.len()) as u64
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        let table = self.table.lock().await;
        Ok(table.rows.iter().map(|(_, c)| c.clone()).collect())
    }

    async fn insert_contact(&self, contact: &Contact) -> StoreResult<i64> {
        let mut table = self.table.lock().await;
        table.next_id += 1;
        let id = table.next_id;
        table.rows.push((id, contact.clone()));
        Ok(id)
    }

    async fn delete_contacts_by_phone_number(&self, phone_number: &str) -> StoreResult<u64> {
        Ok(self.delete_where(|c| c.phone_number == phone_number).await)
    }

    async fn delete_contacts_by_full_name(&self, full_name: &str) -> StoreResult<u64> {
        Ok(self.delete_where(|c| c.full_name == full_name).await)
    }

    async fn delete_all_contacts(&self) -> StoreResult<u64> {
        Ok(self.delete_where(|_| true).await)
    }

    async fn search_contacts_by_full_name(&self, pattern: &str) -> StoreResult<Vec<Contact>> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| StoreError::InvalidPattern(e.to_string()))?;

        let table = self.table.lock().await;
        Ok(table
            .rows
            .iter()
            .filter(|(_, c)| regex.is_match(&c.full_name))
            .map(|(_, c)| c.clone())
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
