/// Moderation Action Orchestrator
///
/// Sequences one operator action: permission check, identity resolution,
/// the authoritative restriction call (ban/unban only), then the
/// best-effort live notification. Holds no state between invocations.

pub mod action;
pub mod result;

pub use action::{ActionKind, ModerationAction};
pub use result::{ActionReport, ActionResult, RestrictionStatus};

use crate::{
    error::RelayError,
    identity::{IdentityResolver, PlayerId, PlayerIdentity},
    messaging::{Announcement, CommandEnvelope, Delivery, Envelope, MessagePublisher},
    metrics,
    permission::{Invoker, PermissionGate},
    restriction::{QueryOutcome, RestrictionApi, RestrictionDuration},
};
use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Coordinates the authoritative and live paths for each action
#[derive(Clone)]
pub struct ModerationOrchestrator {
    gate: PermissionGate,
    identities: IdentityResolver,
    restrictions: Arc<dyn RestrictionApi>,
    publisher: Arc<dyn MessagePublisher>,
}

impl ModerationOrchestrator {
    pub fn new(
        gate: PermissionGate,
        identities: IdentityResolver,
        restrictions: Arc<dyn RestrictionApi>,
        publisher: Arc<dyn MessagePublisher>,
    ) -> Self {
        Self {
            gate,
            identities,
            restrictions,
            publisher,
        }
    }

    pub fn gate(&self) -> &PermissionGate {
        &self.gate
    }

    /// Run one action to its terminal state. Never fails: every error
    /// becomes a `Failed` result or an `Indeterminate` status.
    pub async fn execute(&self, invoker: &Invoker, action: ModerationAction) -> ActionResult {
        let kind = action.kind();
        let span = info_span!(
            "moderation",
            invocation = %Uuid::new_v4(),
            action = kind.as_str(),
            invoker = %invoker.tag,
        );

        let result = self.run(invoker, action).instrument(span).await;
        metrics::record_moderation_action(kind.as_str(), result.outcome_label());
        result
    }

    async fn run(&self, invoker: &Invoker, action: ModerationAction) -> ActionResult {
        let kind = action.kind();

        if !self.gate.authorize(invoker, kind.required_privilege()) {
            warn!("{} ({}) lacks permission for {}", invoker.tag, invoker.id, kind.as_str());
            return ActionResult::Denied { action: kind };
        }

        let moderator = invoker.tag.clone();

        let report = match action {
            ModerationAction::Ban {
                player_id,
                reason,
                duration_minutes,
            } => {
                let player = self.identities.resolve(player_id).await;
                let duration = RestrictionDuration::from_minutes(duration_minutes);

                let record = match self
                    .restrictions
                    .apply(
                        player_id,
                        &reason,
                        duration_minutes.saturating_mul(60),
                        &moderator,
                    )
                    .await
                {
                    Ok(record) => record,
                    Err(e) => return failed(kind, Some(player), e),
                };
                info!("Restriction applied to {} ({})", player_id, duration);

                let notification = self
                    .notify(CommandEnvelope::Ban {
                        user_id: player_id,
                        reason: reason.clone(),
                        duration: duration.envelope_seconds(),
                        moderator: moderator.clone(),
                    })
                    .await;

                ActionReport::Banned {
                    player,
                    duration,
                    reason,
                    moderator,
                    record,
                    notification,
                }
            }
            ModerationAction::Unban { player_id } => {
                let player = self.identities.resolve(player_id).await;

                if let Err(e) = self.restrictions.clear(player_id).await {
                    return failed(kind, Some(player), e);
                }
                info!("Restriction cleared for {}", player_id);

                let notification = self
                    .notify(CommandEnvelope::Unban {
                        user_id: player_id,
                        moderator: moderator.clone(),
                    })
                    .await;

                ActionReport::Unbanned {
                    player,
                    moderator,
                    notification,
                }
            }
            ModerationAction::Kick { player_id, reason } => {
                let player = self.identities.resolve(player_id).await;
                let notification = self
                    .notify(CommandEnvelope::Kick {
                        user_id: player_id,
                        reason: reason.clone(),
                        moderator: moderator.clone(),
                    })
                    .await;

                ActionReport::Kicked {
                    player,
                    reason,
                    moderator,
                    notification,
                }
            }
            ModerationAction::Whitelist { player_id } => {
                let player = self.identities.resolve(player_id).await;
                let notification = self
                    .notify(CommandEnvelope::Whitelist {
                        user_id: player_id,
                        moderator: moderator.clone(),
                    })
                    .await;

                ActionReport::Whitelisted {
                    player,
                    moderator,
                    notification,
                }
            }
            ModerationAction::Unwhitelist { player_id } => {
                let player = self.identities.resolve(player_id).await;
                let notification = self
                    .notify(CommandEnvelope::Unwhitelist {
                        user_id: player_id,
                        moderator: moderator.clone(),
                    })
                    .await;

                ActionReport::Unwhitelisted {
                    player,
                    moderator,
                    notification,
                }
            }
            ModerationAction::Announce { message } => {
                let notification = self
                    .notify(Announcement {
                        message: message.clone(),
                        moderator: moderator.clone(),
                    })
                    .await;

                ActionReport::Announced {
                    message,
                    moderator,
                    notification,
                }
            }
            ModerationAction::Shutdown { reason } => {
                let notification = self
                    .notify(CommandEnvelope::Shutdown {
                        reason: reason.clone(),
                        moderator: moderator.clone(),
                    })
                    .await;

                ActionReport::ShutdownInitiated {
                    reason,
                    moderator,
                    notification,
                }
            }
            ModerationAction::CheckStatus { player_id } => {
                let (player, status) = self.inspect(player_id).await;
                ActionReport::Status { player, status }
            }
            ModerationAction::Lookup { player_id } => {
                let (player, status) = self.inspect(player_id).await;
                ActionReport::Lookup { player, status }
            }
        };

        ActionResult::Succeeded {
            action: kind,
            report,
        }
    }

    /// Resolve identity and classify the current restriction
    async fn inspect(&self, player_id: PlayerId) -> (PlayerIdentity, RestrictionStatus) {
        let player = self.identities.resolve(player_id).await;

        let status = match self.restrictions.query(player_id).await {
            Ok(QueryOutcome::NotFound) => RestrictionStatus::Clean,
            Ok(QueryOutcome::Found(record)) if record.active => {
                RestrictionStatus::Restricted { record }
            }
            Ok(QueryOutcome::Found(_)) => RestrictionStatus::Clean,
            Err(e) => {
                warn!("Could not determine restriction for {}: {}", player_id, e);
                RestrictionStatus::Indeterminate {
                    reason: e.to_string(),
                }
            }
        };

        (player, status)
    }

    /// Publish once and report how it went. A failed publish is expected
    /// when no servers are running; the result is recorded, never raised.
    async fn notify(&self, envelope: impl Into<Envelope>) -> Delivery {
        let envelope = envelope.into();
        let topic = envelope.topic();

        match self.publisher.publish(topic, &envelope).await {
            Ok(()) => Delivery::Published,
            Err(e) => {
                warn!("Live notification on {} topic dropped: {}", topic.label(), e);
                metrics::record_notification_dropped(topic.label());
                Delivery::Dropped(e.to_string())
            }
        }
    }
}

fn failed(kind: ActionKind, player: Option<PlayerIdentity>, err: RelayError) -> ActionResult {
    error!("{} failed: {}", kind.as_str(), err);
    ActionResult::Failed {
        action: kind,
        player,
        message: err.to_string(),
    }
}
