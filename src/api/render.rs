/// Reply rendering for the chat front end
use crate::{
    identity::PlayerIdentity,
    messaging::Delivery,
    orchestrator::{ActionReport, ActionResult, RestrictionStatus},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

const BIO_LIMIT: usize = 200;
const DENIED_MESSAGE: &str = "❌ You don't have permission to use this command.";
const WHITELIST_FOOTER: &str = "Anticheat checks skipped for this player (current session only)";
const UNDELIVERED_NOTE: &str = "⚠️ No live servers reached";

fn ban_footer() -> String {
    format!("Native Ban API • Sentinel Relay v{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    fn inline(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline: true,
        }
    }

    fn block(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline: false,
        }
    }
}

/// Rich message body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub title: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Embed {
    fn new(title: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            color,
            description: None,
            url: None,
            thumbnail: None,
            fields: Vec::new(),
            footer: None,
            timestamp: Utc::now(),
        }
    }

    fn field(mut self, field: EmbedField) -> Self {
        self.fields.push(field);
        self
    }

    fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    fn thumbnail(mut self, player: &PlayerIdentity) -> Self {
        self.thumbnail = player.avatar_url.clone();
        self
    }

    /// Append a note when the live notification did not go out
    fn delivery(mut self, notification: &Delivery) -> Self {
        if !notification.is_published() {
            self.footer = Some(match self.footer.take() {
                Some(footer) => format!("{} • {}", footer, UNDELIVERED_NOTE),
                None => UNDELIVERED_NOTE.to_string(),
            });
        }
        self
    }
}

/// What the front end shows the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    /// False for every negative acknowledgment
    pub ok: bool,
    /// Shown only to the invoking operator
    pub ephemeral: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed: Option<Embed>,
}

impl Reply {
    fn failure(content: String, ephemeral: bool) -> Self {
        Self {
            ok: false,
            ephemeral,
            content: Some(content),
            embed: None,
        }
    }

    fn embed(embed: Embed) -> Self {
        Self {
            ok: true,
            ephemeral: false,
            content: None,
            embed: Some(embed),
        }
    }
}

fn player_field(player: &PlayerIdentity) -> EmbedField {
    EmbedField::inline("Player", format!("{} (`{}`)", player.name, player.player_id))
}

fn truncate_bio(bio: &str) -> String {
    if bio.chars().count() > BIO_LIMIT {
        let cut: String = bio.chars().take(BIO_LIMIT).collect();
        format!("{}...", cut)
    } else {
        bio.to_string()
    }
}

/// Render an action result
pub fn render(result: &ActionResult) -> Reply {
    match result {
        ActionResult::Denied { .. } => Reply::failure(DENIED_MESSAGE.to_string(), true),
        ActionResult::Failed {
            action, message, ..
        } => Reply::failure(
            format!("❌ Failed to {}: {}", action.failure_phrase(), message),
            false,
        ),
        ActionResult::Succeeded { report, .. } => render_report(report),
    }
}

fn render_report(report: &ActionReport) -> Reply {
    let embed = match report {
        ActionReport::Banned {
            player,
            duration,
            reason,
            moderator,
            record,
            notification,
        } => Embed::new("🔨 Player Banned", 0x8b0000)
            .thumbnail(player)
            .field(player_field(player))
            .field(EmbedField::inline("Duration", duration.to_string()))
            .field(EmbedField::block("Reason", reason.as_str()))
            .field(EmbedField::inline("Moderator", moderator.as_str()))
            .field(EmbedField::inline(
                "Alt Ban",
                if record.exclude_alt_accounts {
                    "❌ Disabled"
                } else {
                    "✅ Enabled"
                },
            ))
            .footer(ban_footer())
            .delivery(notification),
        ActionReport::Unbanned {
            player,
            moderator,
            notification,
        } => Embed::new("✅ Player Unbanned", 0x00ff00)
            .field(player_field(player))
            .field(EmbedField::inline("Moderator", moderator.as_str()))
            .delivery(notification),
        ActionReport::Kicked {
            player,
            reason,
            moderator,
            notification,
        } => Embed::new("👢 Player Kicked", 0xffa500)
            .field(player_field(player))
            .field(EmbedField::block("Reason", reason.as_str()))
            .field(EmbedField::inline("Moderator", moderator.as_str()))
            .delivery(notification),
        ActionReport::Whitelisted {
            player,
            moderator,
            notification,
        } => Embed::new("🛡️ Player Whitelisted", 0x00ff88)
            .field(player_field(player))
            .field(EmbedField::inline("Moderator", moderator.as_str()))
            .footer(WHITELIST_FOOTER)
            .delivery(notification),
        ActionReport::Unwhitelisted {
            player,
            moderator,
            notification,
        } => Embed::new("🔓 Whitelist Removed", 0xff6600)
            .field(player_field(player))
            .field(EmbedField::inline("Moderator", moderator.as_str()))
            .delivery(notification),
        ActionReport::Announced {
            message,
            moderator,
            notification,
        } => {
            let mut embed = Embed::new("📢 Announcement Sent", 0x3498db)
                .field(EmbedField::inline("Sent By", moderator.as_str()))
                .delivery(notification);
            embed.description = Some(message.clone());
            embed
        }
        ActionReport::ShutdownInitiated {
            reason,
            moderator,
            notification,
        } => Embed::new("⚠️ Server Shutdown Initiated", 0xff0000)
            .field(EmbedField::block("Reason", reason.as_str()))
            .field(EmbedField::inline("Initiated By", moderator.as_str()))
            .delivery(notification),
        ActionReport::Status { player, status } => return render_status(player, status),
        ActionReport::Lookup { player, status } => render_lookup(player, status),
    };

    Reply::embed(embed)
}

fn render_status(player: &PlayerIdentity, status: &RestrictionStatus) -> Reply {
    match status {
        RestrictionStatus::Clean => {
            let mut embed = Embed::new("✅ Not Banned", 0x00ff00).thumbnail(player);
            embed.description = Some(format!(
                "**{}** (`{}`) is not banned.",
                player.name, player.player_id
            ));
            Reply::embed(embed)
        }
        RestrictionStatus::Restricted { record } => Reply::embed(
            Embed::new("🔨 Player is Banned", 0xff0000)
                .thumbnail(player)
                .field(player_field(player))
                .field(EmbedField::inline("Duration", record.duration_text()))
                .field(EmbedField::block(
                    "Display Reason",
                    record.display_reason.as_deref().unwrap_or("No reason"),
                ))
                .field(EmbedField::block(
                    "Private Reason",
                    record.private_reason.as_deref().unwrap_or("N/A"),
                ))
                .footer(ban_footer()),
        ),
        RestrictionStatus::Indeterminate { reason } => {
            Reply::failure(format!("❌ Failed to check ban status: {}", reason), false)
        }
    }
}

fn render_lookup(player: &PlayerIdentity, status: &RestrictionStatus) -> Embed {
    let (color, ban_status) = match status {
        RestrictionStatus::Clean => (0x3498db, "✅ Clean"),
        RestrictionStatus::Restricted { .. } => (0xff0000, "🔨 Banned"),
        RestrictionStatus::Indeterminate { .. } => (0x95a5a6, "❓ Unknown"),
    };

    let created = player
        .created
        .map(|c| c.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    let mut embed = Embed::new(format!("🔍 {}", player.name), color)
        .thumbnail(player)
        .field(EmbedField::inline("Display Name", player.shown_name()))
        .field(EmbedField::inline("User ID", format!("`{}`", player.player_id)))
        .field(EmbedField::inline("Account Created", created))
        .field(EmbedField::inline("Ban Status", ban_status));
    embed.url = Some(player.player_id.profile_url());

    if let Some(bio) = &player.bio {
        embed = embed.field(EmbedField::block("Bio", truncate_bio(bio)));
    }

    if let RestrictionStatus::Restricted { record } = status {
        if let Some(reason) = &record.display_reason {
            embed = embed.field(EmbedField::block("Ban Reason", reason.as_str()));
        }
    }

    embed
}
