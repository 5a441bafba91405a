use crate::adapters::clock::SystemClock;
use crate::adapters::in_memory::in_memory_directory::InMemoryDirectory;
use crate::adapters::in_memory::in_memory_vote_repository::InMemoryVoteRepository;
use crate::application::command_handlers::cast_vote_handler::CastVoteHandler;
use crate::application::command_handlers::presence_handler::PresenceHandler;
use crate::application::notifier::dispatcher::{NotificationDispatcher, QueuedTransport};
use crate::application::notifier::event_notifications::EventNotifications;
use crate::application::presence_registry::PresenceRegistry;
use crate::application::query_handlers::member_queries::MemberQueries;
use crate::application::query_handlers::vote_queries::VoteQueries;
use crate::shell::config::AppConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<InMemoryDirectory>,
    pub registry: Arc<PresenceRegistry>,
    pub cast_vote_handler:
        Arc<CastVoteHandler<InMemoryDirectory, InMemoryVoteRepository, SystemClock>>,
    pub presence_handler: Arc<PresenceHandler<InMemoryDirectory>>,
    pub vote_queries: Arc<VoteQueries<InMemoryVoteRepository>>,
    pub member_queries: Arc<MemberQueries<InMemoryDirectory, PresenceRegistry>>,
}

impl AppState {
    /// Wires the in memory adapters. The returned dispatcher must be spawned for
    /// notifications to reach anyone.
    pub fn build(config: &AppConfig) -> (Self, NotificationDispatcher) {
        let directory = Arc::new(InMemoryDirectory::new());
        let repository = Arc::new(InMemoryVoteRepository::new());
        let registry = Arc::new(PresenceRegistry::new(config.mailbox_capacity));
        let (transport, rx) = QueuedTransport::new(config.dispatch_queue_capacity);
        let notifications = EventNotifications::new(Arc::new(transport));

        let state = Self {
            directory: directory.clone(),
            registry: registry.clone(),
            cast_vote_handler: Arc::new(CastVoteHandler::new(
                directory.clone(),
                repository.clone(),
                Arc::new(SystemClock),
                notifications.clone(),
                config.weekday_offset,
            )),
            presence_handler: Arc::new(PresenceHandler::new(
                directory.clone(),
                registry.clone(),
                notifications,
            )),
            vote_queries: Arc::new(VoteQueries::new(repository, config.max_query_results)),
            member_queries: Arc::new(MemberQueries::new(directory, registry.clone())),
        };
        (state, NotificationDispatcher::new(rx, registry))
    }
}
