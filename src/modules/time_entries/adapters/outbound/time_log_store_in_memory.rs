use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Datelike;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::modules::time_entries::adapters::outbound::time_log_store::{
    DateOrder, EntryQuery, StoreError, StoreTransaction, TimeLogStore,
};
use crate::modules::time_entries::core::project::{Project, ProjectBilling};
use crate::modules::time_entries::core::time_entry::{NewTimeEntry, TimeEntry};

#[derive(Debug, Default)]
struct Tables {
    projects: BTreeMap<String, Project>,
    entries: Vec<TimeEntry>,
}

#[derive(Debug, Default)]
pub struct InMemoryTimeLogStore {
    tables: Arc<RwLock<Tables>>,
    sequence: Arc<AtomicU64>,
    reads: Arc<AtomicUsize>,
    is_offline: bool,
}

impl InMemoryTimeLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Number of read calls served so far, through the store or a transaction.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Projects are created by administrators outside this service.
    pub async fn add_project(&self, project: Project) {
        self.tables
            .write()
            .await
            .projects
            .insert(project.id.clone(), project);
    }

    /// Stores an entry as already committed, bypassing hooks.
    pub async fn add_time_entry(&self, entry: TimeEntry) {
        self.tables.write().await.entries.push(entry);
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.is_offline {
            return Err(StoreError::Backend("Time log store offline".into()));
        }
        Ok(())
    }

    fn count_read(&self) -> Result<(), StoreError> {
        self.ensure_online()?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn select(entries: impl Iterator<Item = TimeEntry>, query: &EntryQuery) -> Vec<TimeEntry> {
    let mut selected: Vec<TimeEntry> = entries.filter(|entry| query.matches(entry)).collect();
    match query.order {
        DateOrder::Ascending => selected.sort_by(|a, b| a.log_date.cmp(&b.log_date)),
        DateOrder::Descending => selected.sort_by(|a, b| b.log_date.cmp(&a.log_date)),
    }
    if let Some(limit) = query.limit {
        selected.truncate(limit);
    }
    selected
}

#[async_trait]
impl TimeLogStore for InMemoryTimeLogStore {
    async fn project(&self, id: &str) -> Result<Option<Project>, StoreError> {
        self.count_read()?;
        Ok(self.tables.read().await.projects.get(id).cloned())
    }

    async fn project_exists(&self, id: &str) -> Result<bool, StoreError> {
        self.count_read()?;
        Ok(self.tables.read().await.projects.contains_key(id))
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        self.count_read()?;
        Ok(self.tables.read().await.projects.values().cloned().collect())
    }

    async fn time_entry(&self, name: &str) -> Result<Option<TimeEntry>, StoreError> {
        self.count_read()?;
        let guard = self.tables.read().await;
        Ok(guard.entries.iter().find(|entry| entry.name == name).cloned())
    }

    async fn list_time_entries(&self, query: &EntryQuery) -> Result<Vec<TimeEntry>, StoreError> {
        self.count_read()?;
        let guard = self.tables.read().await;
        Ok(select(guard.entries.iter().cloned(), query))
    }

    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StoreError> {
        self.ensure_online()?;
        Ok(Box::new(InMemoryTransaction {
            tables: self.tables.clone(),
            sequence: self.sequence.clone(),
            reads: self.reads.clone(),
            inserted: Vec::new(),
            hours: HashMap::new(),
            billing: HashMap::new(),
            finished: false,
        }))
    }
}

pub struct InMemoryTransaction {
    tables: Arc<RwLock<Tables>>,
    sequence: Arc<AtomicU64>,
    reads: Arc<AtomicUsize>,
    inserted: Vec<TimeEntry>,
    hours: HashMap<String, Decimal>,
    billing: HashMap<String, ProjectBilling>,
    finished: bool,
}

impl InMemoryTransaction {
    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.finished {
            return Err(StoreError::TransactionFinished);
        }
        Ok(())
    }

    fn overlay(&self, mut entry: TimeEntry) -> TimeEntry {
        if let Some(hours) = self.hours.get(&entry.name) {
            entry.hours = *hours;
        }
        entry
    }
}

#[async_trait]
impl StoreTransaction for InMemoryTransaction {
    async fn project(&mut self, id: &str) -> Result<Option<Project>, StoreError> {
        self.ensure_open()?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut project = self.tables.read().await.projects.get(id).cloned();
        if let (Some(project), Some(billing)) = (project.as_mut(), self.billing.get(id)) {
            project.billed_hours = billing.billed_hours;
            project.billed_amount = billing.billed_amount;
        }
        Ok(project)
    }

    async fn insert_time_entry(&mut self, entry: NewTimeEntry) -> Result<TimeEntry, StoreError> {
        self.ensure_open()?;
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let inserted = TimeEntry {
            name: format!("TL-{}-{:05}", entry.created_at.year(), sequence),
            project: entry.project,
            hours: entry.hours,
            log_date: entry.log_date,
            logged_by: entry.logged_by,
            description: entry.description,
            cancelled: false,
            created_at: entry.created_at,
        };
        self.inserted.push(inserted.clone());
        Ok(inserted)
    }

    async fn update_time_entry_hours(
        &mut self,
        name: &str,
        hours: Decimal,
    ) -> Result<TimeEntry, StoreError> {
        self.ensure_open()?;
        if let Some(staged) = self.inserted.iter_mut().find(|entry| entry.name == name) {
            staged.hours = hours;
            return Ok(staged.clone());
        }
        let committed = self
            .tables
            .read()
            .await
            .entries
            .iter()
            .find(|entry| entry.name == name)
            .cloned()
            .ok_or_else(|| StoreError::UnknownTimeLog(name.to_string()))?;
        self.hours.insert(name.to_string(), hours);
        Ok(self.overlay(committed))
    }

    async fn list_time_entries(&mut self, query: &EntryQuery) -> Result<Vec<TimeEntry>, StoreError> {
        self.ensure_open()?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        let committed = self.tables.read().await.entries.clone();
        let visible = committed
            .into_iter()
            .map(|entry| self.overlay(entry))
            .chain(self.inserted.iter().cloned());
        Ok(select(visible, query))
    }

    async fn set_project_billing(
        &mut self,
        project: &str,
        billing: ProjectBilling,
    ) -> Result<(), StoreError> {
        self.ensure_open()?;
        self.billing.insert(project.to_string(), billing);
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), StoreError> {
        self.ensure_open()?;
        let mut tables = self.tables.write().await;

        // Check everything first so a failed commit leaves no partial state.
        for name in self.hours.keys() {
            if !tables.entries.iter().any(|entry| &entry.name == name) {
                return Err(StoreError::UnknownTimeLog(name.clone()));
            }
        }
        for project in self.billing.keys() {
            if !tables.projects.contains_key(project) {
                return Err(StoreError::UnknownProject(project.clone()));
            }
        }

        for entry in tables.entries.iter_mut() {
            if let Some(hours) = self.hours.get(&entry.name) {
                entry.hours = *hours;
            }
        }
        tables.entries.append(&mut self.inserted);
        for (id, billing) in self.billing.drain() {
            if let Some(project) = tables.projects.get_mut(&id) {
                project.billed_hours = billing.billed_hours;
                project.billed_amount = billing.billed_amount;
            }
        }
        self.hours.clear();
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod in_memory_time_log_store_tests {
    use super::*;
    use crate::shared::core::params::Period;
    use crate::tests::fixtures::time_entries::{NewTimeEntryBuilder, TimeEntryBuilder};
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    #[fixture]
    async fn store() -> InMemoryTimeLogStore {
        let store = InMemoryTimeLogStore::new();
        store
            .add_project(Project::new("PROJ-001", "Website").with_billing_rate(dec!(10)))
            .await;
        store
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_hide_staged_entries_until_commit(#[future] store: InMemoryTimeLogStore) {
        let store = store.await;
        let mut transaction = store.begin().await.unwrap();
        let entry = transaction
            .insert_time_entry(NewTimeEntryBuilder::new().build())
            .await
            .unwrap();

        let outside = store
            .list_time_entries(&EntryQuery::for_project("PROJ-001"))
            .await
            .unwrap();
        assert!(outside.is_empty());
        let inside = transaction
            .list_time_entries(&EntryQuery::for_project("PROJ-001"))
            .await
            .unwrap();
        assert_eq!(inside, vec![entry.clone()]);

        transaction.commit().await.unwrap();
        assert_eq!(store.time_entry(&entry.name).await.unwrap(), Some(entry));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_discard_a_dropped_transaction(#[future] store: InMemoryTimeLogStore) {
        let store = store.await;
        {
            let mut transaction = store.begin().await.unwrap();
            transaction
                .insert_time_entry(NewTimeEntryBuilder::new().build())
                .await
                .unwrap();
        }
        let all = store.list_time_entries(&EntryQuery::default()).await.unwrap();
        assert!(all.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_name_entries_by_creation_year_and_sequence(
        #[future] store: InMemoryTimeLogStore,
    ) {
        let store = store.await;
        let mut transaction = store.begin().await.unwrap();
        let first = transaction
            .insert_time_entry(NewTimeEntryBuilder::new().build())
            .await
            .unwrap();
        let second = transaction
            .insert_time_entry(NewTimeEntryBuilder::new().build())
            .await
            .unwrap();
        assert_eq!(first.name, "TL-2024-00001");
        assert_eq!(second.name, "TL-2024-00002");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_apply_hour_updates_on_commit(#[future] store: InMemoryTimeLogStore) {
        let store = store.await;
        let entry = TimeEntryBuilder::new().name("TL-2024-00042").hours(dec!(2)).build();
        store.add_time_entry(entry.clone()).await;

        let mut transaction = store.begin().await.unwrap();
        let updated = transaction
            .update_time_entry_hours("TL-2024-00042", dec!(6))
            .await
            .unwrap();
        assert_eq!(updated.hours, dec!(6));
        assert_eq!(
            store.time_entry("TL-2024-00042").await.unwrap().unwrap().hours,
            dec!(2)
        );

        transaction.commit().await.unwrap();
        assert_eq!(
            store.time_entry("TL-2024-00042").await.unwrap().unwrap().hours,
            dec!(6)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_to_update_an_unknown_entry(#[future] store: InMemoryTimeLogStore) {
        let store = store.await;
        let mut transaction = store.begin().await.unwrap();
        let result = transaction.update_time_entry_hours("TL-missing", dec!(1)).await;
        assert!(matches!(result, Err(StoreError::UnknownTimeLog(name)) if name == "TL-missing"));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_write_the_billing_snapshot_on_commit(#[future] store: InMemoryTimeLogStore) {
        let store = store.await;
        let billing = ProjectBilling {
            billed_hours: dec!(5),
            billed_amount: dec!(50),
        };
        let mut transaction = store.begin().await.unwrap();
        transaction.set_project_billing("PROJ-001", billing).await.unwrap();
        let staged = transaction.project("PROJ-001").await.unwrap().unwrap();
        assert_eq!(staged.billed_amount, dec!(50));
        transaction.commit().await.unwrap();

        let project = store.project("PROJ-001").await.unwrap().unwrap();
        assert_eq!(project.billed_hours, dec!(5));
        assert_eq!(project.billed_amount, dec!(50));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_billing_for_an_unknown_project_without_partial_writes(
        #[future] store: InMemoryTimeLogStore,
    ) {
        let store = store.await;
        let mut transaction = store.begin().await.unwrap();
        transaction
            .insert_time_entry(NewTimeEntryBuilder::new().build())
            .await
            .unwrap();
        transaction
            .set_project_billing(
                "PROJ-404",
                ProjectBilling {
                    billed_hours: dec!(1),
                    billed_amount: dec!(1),
                },
            )
            .await
            .unwrap();

        let result = transaction.commit().await;
        assert!(matches!(result, Err(StoreError::UnknownProject(_))));
        assert!(store.list_time_entries(&EntryQuery::default()).await.unwrap().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_work_on_a_finished_transaction(
        #[future] store: InMemoryTimeLogStore,
    ) {
        let store = store.await;
        let mut transaction = store.begin().await.unwrap();
        transaction.commit().await.unwrap();
        let result = transaction.commit().await;
        assert!(matches!(result, Err(StoreError::TransactionFinished)));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_filter_by_period_and_skip_cancelled_entries(
        #[future] store: InMemoryTimeLogStore,
    ) {
        let store = store.await;
        for (name, log_date, cancelled) in [
            ("TL-1", date(2024, 3, 31), false),
            ("TL-2", date(2024, 4, 1), false),
            ("TL-3", date(2024, 4, 30), true),
            ("TL-4", date(2024, 4, 15), false),
            ("TL-5", date(2024, 5, 1), false),
        ] {
            store
                .add_time_entry(
                    TimeEntryBuilder::new()
                        .name(name)
                        .log_date(log_date)
                        .cancelled(cancelled)
                        .build(),
                )
                .await;
        }

        let april = Period::new(4, 2024).unwrap().date_range();
        let names: Vec<String> = store
            .list_time_entries(&EntryQuery::for_project("PROJ-001").within(april))
            .await
            .unwrap()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        assert_eq!(names, vec!["TL-2", "TL-4"]);

        let newest: Vec<String> = store
            .list_time_entries(&EntryQuery::for_project("PROJ-001").newest_first().limit(2))
            .await
            .unwrap()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        assert_eq!(newest, vec!["TL-5", "TL-4"]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_when_offline(#[future] store: InMemoryTimeLogStore) {
        let mut store = store.await;
        store.toggle_offline();
        let result = store.project("PROJ-001").await;
        assert!(matches!(result, Err(StoreError::Backend(message)) if message.contains("offline")));
        assert!(store.begin().await.is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_count_reads(#[future] store: InMemoryTimeLogStore) {
        let store = store.await;
        assert_eq!(store.read_count(), 0);
        store.project_exists("PROJ-001").await.unwrap();
        store.list_projects().await.unwrap();
        assert_eq!(store.read_count(), 2);
    }
}
