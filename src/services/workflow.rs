use crate::errors::SlaError;
use crate::models::{SlaPolicy, SlaStatus, TicketSla};
use crate::services::engine::SlaEngine;
use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Invalid SLA clock transition from {from} to {to}")]
    InvalidTransition { from: SlaStatus, to: SlaStatus },
    #[error("Ticket {0} is paused without a recorded stop time")]
    MissingStopTime(String),
    #[error(transparent)]
    Sla(#[from] SlaError),
}

/// Validates if an SLA clock transition is allowed. The clock is a strict
/// running/paused toggle; pausing a paused ticket or resuming a running one
/// is rejected.
pub fn validate_transition(from: SlaStatus, to: SlaStatus) -> Result<(), WorkflowError> {
    use SlaStatus::*;

    match (from, to) {
        (Running, Paused) => Ok(()),
        (Paused, Running) => Ok(()),
        _ => Err(WorkflowError::InvalidTransition { from, to }),
    }
}

/// Ticket-side SLA workflow: classifies tickets under the policy, stamps
/// due dates and drives the hold/resume toggle. Owns no storage; callers
/// persist the mutated ticket state.
#[derive(Debug, Clone)]
pub struct SlaWorkflow {
    engine: SlaEngine,
    policy: SlaPolicy,
}

impl SlaWorkflow {
    pub fn new(engine: SlaEngine, policy: SlaPolicy) -> Self {
        Self { engine, policy }
    }

    pub fn engine(&self) -> &SlaEngine {
        &self.engine
    }

    /// Classify the ticket under the policy and stamp its due date from the
    /// creation instant.
    pub fn apply_sla(&self, ticket: &mut TicketSla) -> Result<NaiveDateTime, WorkflowError> {
        let minutes = self
            .policy
            .required_minutes(ticket.is_vip, &ticket.ticket_type)?;
        let due = self
            .engine
            .calculate_due_date_minutes(ticket.created_at, minutes)?;
        ticket.due_at = Some(due);

        info!(
            "Applied SLA to ticket {} (vip: {}, type: {}, due: {})",
            ticket.id, ticket.is_vip, ticket.ticket_type, due
        );
        Ok(due)
    }

    /// Stop the SLA clock, recording the stop time and the free-text reason.
    pub fn pause(
        &self,
        ticket: &mut TicketSla,
        reason: &str,
        now: NaiveDateTime,
    ) -> Result<(), WorkflowError> {
        validate_transition(ticket.sla_status, SlaStatus::Paused)?;

        ticket.sla_status = SlaStatus::Paused;
        ticket.clock_stopped_at = Some(now);
        ticket.pause_reason = Some(reason.to_string());

        info!(
            "Paused SLA clock for ticket {} at {} ({})",
            ticket.id, now, reason
        );
        Ok(())
    }

    /// Restart the SLA clock. The due date, when one is stamped, shifts
    /// forward by the working time that elapsed during the hold; a hold that
    /// spanned only nights or weekends leaves it unchanged.
    pub fn resume(
        &self,
        ticket: &mut TicketSla,
        now: NaiveDateTime,
    ) -> Result<Option<NaiveDateTime>, WorkflowError> {
        validate_transition(ticket.sla_status, SlaStatus::Running)?;

        let paused_at = ticket
            .clock_stopped_at
            .ok_or_else(|| WorkflowError::MissingStopTime(ticket.id.clone()))?;

        let new_due = match ticket.due_at {
            Some(due) => Some(self.engine.resume_due_date(due, paused_at, now)?),
            None => None,
        };

        ticket.sla_status = SlaStatus::Running;
        ticket.clock_stopped_at = None;
        ticket.pause_reason = None;
        if let Some(due) = new_due {
            ticket.due_at = Some(due);
        }

        info!(
            "Resumed SLA clock for ticket {} at {} (due: {:?})",
            ticket.id, now, ticket.due_at
        );
        Ok(new_due)
    }
}
