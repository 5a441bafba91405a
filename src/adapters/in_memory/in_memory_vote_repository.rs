// In memory implementation of the VoteRepository port.
//
// Purpose
// - Support handler tests and local development without a database.
//
// Responsibilities
// - Store aggregates in a flat table keyed by id.
// - Keep a unique index on (location_id, window_start).
// - Perform find-or-create and ballot application under a single write lock each, so neither
//   can interleave with another writer.

use crate::core::meetup::event::{EventId, LocationId};
use crate::core::meetup::vote_aggregate::{
    Ballot, FindOrCreate, NewVoteAggregate, VoteAggregate, VoteId,
};
use crate::core::ports::{RepositoryError, VoteRepository};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

const NAME: &str = "Vote repository";

#[derive(Default)]
struct VoteTables {
    rows: HashMap<VoteId, VoteAggregate>,
    by_window: HashMap<(LocationId, i64), VoteId>,
}

#[derive(Default)]
pub struct InMemoryVoteRepository {
    inner: RwLock<VoteTables>,
    is_offline: bool,
}

impl InMemoryVoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn ensure_online(&self) -> Result<(), RepositoryError> {
        if self.is_offline {
            return Err(RepositoryError::Offline(NAME));
        }
        Ok(())
    }

    fn sorted(mut items: Vec<VoteAggregate>) -> Vec<VoteAggregate> {
        items.sort_by_key(|row| (row.created_at, row.id));
        items
    }
}

#[async_trait::async_trait]
impl VoteRepository for InMemoryVoteRepository {
    async fn find_or_create(
        &self,
        seed: NewVoteAggregate,
    ) -> Result<FindOrCreate, RepositoryError> {
        self.ensure_online()?;
        let mut guard = self.inner.write().await;
        let tables = &mut *guard;
        let key = (seed.location_id, seed.window.start);

        if let Some(id) = tables.by_window.get(&key) {
            let existing = tables
                .rows
                .get(id)
                .cloned()
                .ok_or_else(|| RepositoryError::Backend(format!("dangling window index {id}")))?;
            return Ok(FindOrCreate::Found(existing));
        }

        // Same occurrence opened under an earlier lead time: same end, creation inside this window.
        let created_inside = tables
            .rows
            .values()
            .filter(|row| {
                row.location_id == seed.location_id
                    && row.window().end == seed.window.end
                    && seed.window.contains(row.created_at)
            })
            .min_by_key(|row| (row.created_at, row.id))
            .cloned();
        if let Some(existing) = created_inside {
            tables.by_window.insert(key, existing.id);
            return Ok(FindOrCreate::Found(existing));
        }

        let aggregate = VoteAggregate::create(Uuid::now_v7(), seed);
        tables.by_window.insert(key, aggregate.id);
        tables.rows.insert(aggregate.id, aggregate.clone());
        Ok(FindOrCreate::Created(aggregate))
    }

    async fn apply_ballot(
        &self,
        id: VoteId,
        ballot: &Ballot,
    ) -> Result<VoteAggregate, RepositoryError> {
        self.ensure_online()?;
        let mut guard = self.inner.write().await;
        let row = guard.rows.get_mut(&id).ok_or(RepositoryError::NotFound(id))?;
        row.apply_ballot(ballot);
        Ok(row.clone())
    }

    async fn find_by_location_and_time_range(
        &self,
        location_id: LocationId,
        time_begin: i64,
        time_end: i64,
    ) -> Result<Vec<VoteAggregate>, RepositoryError> {
        self.ensure_online()?;
        let guard = self.inner.read().await;
        let items = guard
            .rows
            .values()
            .filter(|row| {
                row.location_id == location_id
                    && (time_begin..=time_end).contains(&row.created_at)
            })
            .cloned()
            .collect();
        Ok(Self::sorted(items))
    }

    async fn find_by_event_and_time_range(
        &self,
        event_id: EventId,
        time_begin: i64,
        time_end: i64,
        limit: usize,
    ) -> Result<Vec<VoteAggregate>, RepositoryError> {
        self.ensure_online()?;
        let guard = self.inner.read().await;
        let items = guard
            .rows
            .values()
            .filter(|row| {
                row.event_id == event_id && (time_begin..=time_end).contains(&row.created_at)
            })
            .cloned()
            .collect();
        let mut items = Self::sorted(items);
        items.truncate(limit);
        Ok(items)
    }

    async fn find_by_id(&self, id: VoteId) -> Result<Option<VoteAggregate>, RepositoryError> {
        self.ensure_online()?;
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }
}
