// Shared AppState for HTTP tests: fixed clock, in-memory scheduler, caller-provided backend.

use crate::modules::projects::adapters::outbound::notifications::NotificationScheduler;
use crate::modules::projects::adapters::outbound::notifications_in_memory::InMemoryNotificationScheduler;
use crate::shared::core::clock::{Clock, FixedClock};
use crate::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
use crate::shell::state::AppState;
use std::sync::Arc;

// 2025-01-01T00:00:00Z
pub const FIXTURE_NOW: i64 = 1_735_689_600_000;

pub fn app_state_over(backend: InMemoryKeyValueStore, max_projects: usize) -> AppState {
    let scheduler: Arc<dyn NotificationScheduler> = Arc::new(InMemoryNotificationScheduler::new());
    AppState::new(
        Arc::new(backend),
        Arc::new(FixedClock::new(FIXTURE_NOW)) as Arc<dyn Clock>,
        Some(scheduler),
        max_projects,
    )
}
