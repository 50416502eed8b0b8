use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ===== Ticket SLA State =====

/// SLA-relevant slice of a ticket. Persistence, authorization and rendering
/// of the full ticket live with the caller; this type only carries what the
/// due-date engine and the hold/resume workflow read and write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketSla {
    pub id: String,
    pub is_vip: bool,
    pub ticket_type: String,
    pub created_at: NaiveDateTime,
    pub due_at: Option<NaiveDateTime>,
    pub sla_status: SlaStatus,
    pub clock_stopped_at: Option<NaiveDateTime>,
    pub pause_reason: Option<String>,
}

impl TicketSla {
    pub fn new(is_vip: bool, ticket_type: String, created_at: NaiveDateTime) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            is_vip,
            ticket_type,
            created_at,
            due_at: None,
            sla_status: SlaStatus::Running,
            clock_stopped_at: None,
            pause_reason: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.sla_status == SlaStatus::Paused
    }
}

// ===== SLA Clock Status =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlaStatus {
    Running,
    Paused,
}

impl std::fmt::Display for SlaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlaStatus::Running => write!(f, "running"),
            SlaStatus::Paused => write!(f, "paused"),
        }
    }
}

impl std::str::FromStr for SlaStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "running" => Ok(SlaStatus::Running),
            "paused" => Ok(SlaStatus::Paused),
            _ => Err(format!("Invalid SLA status: {}", s)),
        }
    }
}

// ===== Ticket Kind =====

/// Recognized ticket types. Classification is deliberately permissive:
/// anything that does not parse is treated as a request, so this enum only
/// names the kinds the SLA table distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketKind {
    Incident,
    Request,
}

impl std::fmt::Display for TicketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketKind::Incident => write!(f, "INC"),
            TicketKind::Request => write!(f, "REQ"),
        }
    }
}

impl std::str::FromStr for TicketKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INC" => Ok(TicketKind::Incident),
            "REQ" => Ok(TicketKind::Request),
            _ => Err(format!("Invalid ticket kind: {}", s)),
        }
    }
}
