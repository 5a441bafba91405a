// Composition root for the meetup voting core.
//
// Responsibilities
// - Read config from the environment.
// - Instantiate concrete adapters and wire them into the handlers.
// - Spawn background workers (notification dispatcher).

pub mod config;
pub mod logging;
pub mod state;
