/// Command catalog and execution endpoints
use crate::{
    api::{auth::RelayAuth, render::{render, Reply}},
    context::AppContext,
    error::{RelayError, RelayResult},
    identity::PlayerId,
    orchestrator::{ActionKind, ModerationAction},
    permission::Invoker,
};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// Build command routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/commands", get(list_commands))
        .route("/commands/:name", post(execute_command))
}

/// Option value type in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Integer,
    String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: OptionType,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub options: Vec<OptionSpec>,
}

fn user_id_option(description: &'static str) -> OptionSpec {
    OptionSpec {
        name: "userid",
        kind: OptionType::Integer,
        description,
        required: true,
    }
}

fn reason_option(description: &'static str) -> OptionSpec {
    OptionSpec {
        name: "reason",
        kind: OptionType::String,
        description,
        required: false,
    }
}

/// Describe one command for front-end registration
pub fn command_spec(kind: ActionKind) -> CommandSpec {
    let (description, options) = match kind {
        ActionKind::Ban => (
            "Ban a player from the game",
            vec![
                user_id_option("User ID to ban"),
                reason_option("Reason for the ban"),
                OptionSpec {
                    name: "duration",
                    kind: OptionType::Integer,
                    description: "Ban duration in minutes (0 = permanent)",
                    required: false,
                },
            ],
        ),
        ActionKind::Unban => (
            "Unban a player from the game",
            vec![user_id_option("User ID to unban")],
        ),
        ActionKind::Kick => (
            "Kick a player from all game servers",
            vec![
                user_id_option("User ID to kick"),
                reason_option("Reason for the kick"),
            ],
        ),
        ActionKind::Announce => (
            "Send an announcement to all game servers",
            vec![OptionSpec {
                name: "message",
                kind: OptionType::String,
                description: "Announcement message",
                required: true,
            }],
        ),
        ActionKind::Whitelist => (
            "Whitelist a player (skip anticheat checks)",
            vec![user_id_option("User ID to whitelist")],
        ),
        ActionKind::Unwhitelist => (
            "Remove a player from the whitelist",
            vec![user_id_option("User ID to unwhitelist")],
        ),
        ActionKind::CheckStatus => (
            "Check if a player is currently banned",
            vec![user_id_option("User ID to check")],
        ),
        ActionKind::Shutdown => (
            "Shutdown all game servers",
            vec![reason_option("Reason for shutdown")],
        ),
        ActionKind::Lookup => (
            "Look up a player by their ID",
            vec![user_id_option("User ID")],
        ),
    };

    CommandSpec {
        name: kind.as_str(),
        description,
        options,
    }
}

/// Arguments supplied with a command
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandOptions {
    pub userid: Option<i64>,
    pub reason: Option<String>,
    /// Minutes; 0 or absent means permanent
    pub duration: Option<i64>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub invoker: Invoker,
    #[serde(default)]
    pub options: CommandOptions,
}

fn required_player(options: &CommandOptions) -> RelayResult<PlayerId> {
    let raw = options
        .userid
        .ok_or_else(|| RelayError::Validation("Missing required option: userid".to_string()))?;
    PlayerId::new(raw)
}

/// Map a command name and its options onto a typed action
pub fn parse_action(name: &str, options: CommandOptions) -> RelayResult<ModerationAction> {
    let kind = ActionKind::from_str(name)?;

    let action = match kind {
        ActionKind::Ban => {
            ModerationAction::ban(required_player(&options)?, options.reason, options.duration)
        }
        ActionKind::Unban => ModerationAction::Unban {
            player_id: required_player(&options)?,
        },
        ActionKind::Kick => ModerationAction::kick(required_player(&options)?, options.reason),
        ActionKind::Announce => {
            let message = options.message.ok_or_else(|| {
                RelayError::Validation("Missing required option: message".to_string())
            })?;
            ModerationAction::announce(message)?
        }
        ActionKind::Whitelist => ModerationAction::Whitelist {
            player_id: required_player(&options)?,
        },
        ActionKind::Unwhitelist => ModerationAction::Unwhitelist {
            player_id: required_player(&options)?,
        },
        ActionKind::CheckStatus => ModerationAction::CheckStatus {
            player_id: required_player(&options)?,
        },
        ActionKind::Shutdown => ModerationAction::shutdown(options.reason),
        ActionKind::Lookup => ModerationAction::Lookup {
            player_id: required_player(&options)?,
        },
    };

    Ok(action)
}

/// List the command catalog
async fn list_commands() -> Json<Vec<CommandSpec>> {
    Json(ActionKind::ALL.into_iter().map(command_spec).collect())
}

/// Execute one command and return its rendered reply
async fn execute_command(
    State(ctx): State<AppContext>,
    _auth: RelayAuth,
    Path(name): Path<String>,
    Json(req): Json<CommandRequest>,
) -> RelayResult<Json<Reply>> {
    let action = parse_action(&name, req.options)?;
    let result = ctx.orchestrator.execute(&req.invoker, action).await;
    Ok(Json(render(&result)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(userid: Option<i64>) -> CommandOptions {
        CommandOptions {
            userid,
            ..Default::default()
        }
    }

    #[test]
    fn test_catalog_covers_every_action() {
        let names: Vec<_> = ActionKind::ALL
            .into_iter()
            .map(|k| command_spec(k).name)
            .collect();
        assert_eq!(
            names,
            vec![
                "ban", "unban", "kick", "announce", "whitelist", "unwhitelist", "checkban",
                "shutdown", "lookup"
            ]
        );
    }

    #[test]
    fn test_ban_missing_duration_is_permanent() {
        let action = parse_action("ban", options(Some(5))).unwrap();
        assert!(matches!(
            action,
            ModerationAction::Ban { duration_minutes: 0, .. }
        ));
    }

    #[test]
    fn test_checkban_maps_to_status_query() {
        let action = parse_action("checkban", options(Some(5))).unwrap();
        assert_eq!(action.kind(), ActionKind::CheckStatus);
    }

    #[test]
    fn test_missing_userid_rejected() {
        assert!(matches!(
            parse_action("kick", options(None)),
            Err(RelayError::Validation(_))
        ));
    }

    #[test]
    fn test_non_positive_userid_rejected() {
        assert!(parse_action("lookup", options(Some(0))).is_err());
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(parse_action("mute", options(Some(5))).is_err());
    }

    #[test]
    fn test_announce_requires_message() {
        assert!(parse_action("announce", CommandOptions::default()).is_err());
        let action = parse_action(
            "announce",
            CommandOptions {
                message: Some("Restart soon".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(
            action,
            ModerationAction::Announce {
                message: "Restart soon".to_string()
            }
        );
    }

    #[test]
    fn test_shutdown_needs_no_player() {
        let action = parse_action("shutdown", CommandOptions::default()).unwrap();
        assert_eq!(action.kind(), ActionKind::Shutdown);
    }
}
