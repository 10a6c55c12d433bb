/// Normalized orchestrator output
use crate::{
    identity::PlayerIdentity,
    messaging::Delivery,
    orchestrator::ActionKind,
    restriction::{RestrictionDuration, RestrictionRecord},
};
use serde::Serialize;

/// Restriction state as classified for status queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum RestrictionStatus {
    /// Upstream definitively holds no active restriction
    Clean,
    /// An active restriction is on record
    Restricted { record: RestrictionRecord },
    /// Upstream could not be asked. Never to be shown as clean.
    Indeterminate { reason: String },
}

impl RestrictionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RestrictionStatus::Clean => "clean",
            RestrictionStatus::Restricted { .. } => "restricted",
            RestrictionStatus::Indeterminate { .. } => "indeterminate",
        }
    }
}

/// Details of a completed action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActionReport {
    Banned {
        player: PlayerIdentity,
        duration: RestrictionDuration,
        reason: String,
        moderator: String,
        record: RestrictionRecord,
        notification: Delivery,
    },
    Unbanned {
        player: PlayerIdentity,
        moderator: String,
        notification: Delivery,
    },
    Kicked {
        player: PlayerIdentity,
        reason: String,
        moderator: String,
        notification: Delivery,
    },
    Whitelisted {
        player: PlayerIdentity,
        moderator: String,
        notification: Delivery,
    },
    Unwhitelisted {
        player: PlayerIdentity,
        moderator: String,
        notification: Delivery,
    },
    Announced {
        message: String,
        moderator: String,
        notification: Delivery,
    },
    ShutdownInitiated {
        reason: String,
        moderator: String,
        notification: Delivery,
    },
    Status {
        player: PlayerIdentity,
        status: RestrictionStatus,
    },
    Lookup {
        player: PlayerIdentity,
        status: RestrictionStatus,
    },
}

impl ActionReport {
    /// Live notification outcome, for actions that publish
    pub fn notification(&self) -> Option<&Delivery> {
        match self {
            ActionReport::Banned { notification, .. }
            | ActionReport::Unbanned { notification, .. }
            | ActionReport::Kicked { notification, .. }
            | ActionReport::Whitelisted { notification, .. }
            | ActionReport::Unwhitelisted { notification, .. }
            | ActionReport::Announced { notification, .. }
            | ActionReport::ShutdownInitiated { notification, .. } => Some(notification),
            ActionReport::Status { .. } | ActionReport::Lookup { .. } => None,
        }
    }

    pub fn status(&self) -> Option<&RestrictionStatus> {
        match self {
            ActionReport::Status { status, .. } | ActionReport::Lookup { status, .. } => {
                Some(status)
            }
            _ => None,
        }
    }
}

/// Terminal state of one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ActionResult {
    /// The invoker lacks permission; nothing was sent upstream
    Denied { action: ActionKind },
    /// The authoritative call failed; no notification was published
    Failed {
        action: ActionKind,
        player: Option<PlayerIdentity>,
        /// Upstream message when it had one
        message: String,
    },
    Succeeded {
        action: ActionKind,
        report: ActionReport,
    },
}

impl ActionResult {
    pub fn action(&self) -> ActionKind {
        match self {
            ActionResult::Denied { action }
            | ActionResult::Failed { action, .. }
            | ActionResult::Succeeded { action, .. } => *action,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Succeeded { .. })
    }

    /// Metric label. Status queries report their classification.
    pub fn outcome_label(&self) -> &'static str {
        match self {
            ActionResult::Denied { .. } => "denied",
            ActionResult::Failed { .. } => "failed",
            ActionResult::Succeeded { report, .. } => match report.status() {
                Some(status) => status.label(),
                None => "succeeded",
            },
        }
    }
}
