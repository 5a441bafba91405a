// Crate entry point. Re-export modules so tests and binaries can import them easily.
//
// Responsibilities
// - Only declare and expose modules. No business logic here.
//
// How it is used
// - Tests import modules from this crate root to reach the code under test.

pub mod core {
    pub mod meetup;
    pub mod ports;
}

pub mod application {
    pub mod errors;
    pub mod presence_registry;
    pub mod command_handlers {
        pub mod cast_vote_handler;
        pub mod presence_handler;
    }
    pub mod query_handlers {
        pub mod member_queries;
        pub mod vote_queries;
    }
    pub mod notifier {
        pub mod dispatcher;
        pub mod event_notifications;
    }
}

pub mod adapters {
    pub mod clock;
    pub mod in_memory {
        pub mod in_memory_directory;
        pub mod in_memory_transport;
        pub mod in_memory_vote_repository;
    }
}

pub mod shell;
