use crate::domain::model::DiscoveryStatus;
use crate::domain::ports::ProgressReporter;
use std::collections::HashMap;
use std::sync::RwLock;

/// Ticket → latest status, shared between a discovery run and whoever polls it.
#[derive(Debug, Default)]
pub struct TicketStore {
    statuses: RwLock<HashMap<String, DiscoveryStatus>>,
}

impl TicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, ticket: &str) -> Option<DiscoveryStatus> {
        // 鎖中毒時仍讀取既有內容
        let statuses = self.statuses.read().unwrap_or_else(|e| e.into_inner());
        statuses.get(ticket).copied()
    }

    pub fn remove(&self, ticket: &str) -> Option<DiscoveryStatus> {
        let mut statuses = self.statuses.write().unwrap_or_else(|e| e.into_inner());
        statuses.remove(ticket)
    }
}

impl ProgressReporter for TicketStore {
    fn report(&self, ticket: &str, status: DiscoveryStatus) {
        let mut statuses = self.statuses.write().unwrap_or_else(|e| e.into_inner());
        statuses.insert(ticket.to_string(), status);
    }
}

/// Writes each checkpoint to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report(&self, ticket: &str, status: DiscoveryStatus) {
        tracing::info!("📍 [{}] {}", ticket, status.as_str());
    }
}
