// Read side of the vote tally.
//
// Responsibilities
// - List an event's aggregates created within a time range, oldest first, capped.
// - Fetch a single aggregate by id.
// - Pure reads. Safe to run in parallel with writers and to retry.

use crate::application::errors::ApplicationError;
use crate::core::meetup::event::EventId;
use crate::core::meetup::vote_aggregate::{VoteAggregateView, VoteId};
use crate::core::ports::VoteRepository;
use std::sync::Arc;

pub const DEFAULT_MAX_RESULTS: usize = 100;

#[derive(Clone)]
pub struct VoteQueries<TRepository>
where
    TRepository: VoteRepository + 'static,
{
    repository: Arc<TRepository>,
    max_results: usize,
}

impl<TRepository> VoteQueries<TRepository>
where
    TRepository: VoteRepository + 'static,
{
    pub fn new(repository: Arc<TRepository>, max_results: usize) -> Self {
        Self {
            repository,
            max_results,
        }
    }

    pub async fn votes_for_event_in_range(
        &self,
        event_id: EventId,
        time_begin: i64,
        time_end: i64,
    ) -> Result<Vec<VoteAggregateView>, ApplicationError> {
        let rows = self
            .repository
            .find_by_event_and_time_range(event_id, time_begin, time_end, self.max_results)
            .await?;
        Ok(rows.iter().map(VoteAggregateView::from).collect())
    }

    pub async fn vote_by_id(&self, id: VoteId) -> Result<VoteAggregateView, ApplicationError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(VoteAggregateView::from)
            .ok_or(ApplicationError::VoteNotFound(id))
    }
}
