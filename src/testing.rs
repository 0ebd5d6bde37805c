//! In-memory doubles for the Discord and database seams.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use poise::serenity_prelude::{ChannelId, GuildId, MessageId, RoleId, UserId};

use crate::config::Settings;
use crate::db::{LanguageRole, LanguageRoleSource};
use crate::discord::actions::GuildActions;
use crate::discord::components::{Confirmation, RoleMenu};
use crate::discord::embeds::Announcement;
use crate::error::AppError;
use crate::members::MemberInfo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Text {
        channel: ChannelId,
        content: String,
    },
    Announcement {
        channel: ChannelId,
        announcement: Announcement,
    },
    Reaction {
        channel: ChannelId,
        message: MessageId,
        emoji: String,
    },
    AddRole {
        guild: GuildId,
        user: UserId,
        role: RoleId,
        reason: String,
    },
    RemoveRole {
        guild: GuildId,
        user: UserId,
        role: RoleId,
        reason: String,
    },
    Nickname {
        guild: GuildId,
        user: UserId,
        nickname: String,
    },
    DirectMessage {
        user: UserId,
        content: String,
    },
    Confirm {
        channel: ChannelId,
        content: String,
    },
    RoleMenu {
        channel: ChannelId,
        content: String,
        roles: Vec<RoleId>,
    },
}

impl Call {
    pub fn is_role_mutation(&self) -> bool {
        matches!(
            self,
            Call::AddRole { .. } | Call::RemoveRole { .. } | Call::Nickname { .. }
        )
    }
}

/// Records every outbound call. Unanswered prompts resolve as timed out.
#[derive(Debug, Default)]
pub struct RecordingActions {
    calls: Mutex<Vec<Call>>,
    channels: HashSet<ChannelId>,
    roles: HashMap<RoleId, String>,
    answers: Mutex<VecDeque<Option<Confirmation>>>,
    member_roles: Option<Vec<RoleId>>,
    fail_dm: bool,
    next_message: AtomicU64,
}

impl RecordingActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Knows every channel and role named in the settings.
    pub fn for_settings(settings: &Settings) -> Self {
        let channels = &settings.channels;
        Self::new()
            .with_channels([
                channels.welcome,
                channels.mod_log,
                channels.admin,
                channels.general,
                channels.tutorial,
            ])
            .with_role(settings.roles.developer, "Developer")
            .with_role(settings.roles.vip_guest, "Guest")
    }

    pub fn with_channels(mut self, channels: impl IntoIterator<Item = ChannelId>) -> Self {
        self.channels.extend(channels);
        self
    }

    pub fn without_channel(mut self, channel: ChannelId) -> Self {
        self.channels.remove(&channel);
        self
    }

    pub fn with_role(mut self, role: RoleId, name: &str) -> Self {
        self.roles.insert(role, name.to_string());
        self
    }

    pub fn without_role(mut self, role: RoleId) -> Self {
        self.roles.remove(&role);
        self
    }

    pub fn with_answers(self, answers: impl IntoIterator<Item = Option<Confirmation>>) -> Self {
        self.answers.lock().unwrap().extend(answers);
        self
    }

    pub fn with_member_roles(mut self, roles: Vec<RoleId>) -> Self {
        self.member_roles = Some(roles);
        self
    }

    pub fn with_failing_dm(mut self) -> Self {
        self.fail_dm = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn texts_to(&self, channel: ChannelId) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Text { channel: c, content } if c == channel => Some(content),
                _ => None,
            })
            .collect()
    }

    pub fn role_mutations(&self) -> usize {
        self.calls().iter().filter(|c| c.is_role_mutation()).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn message_id(&self) -> MessageId {
        MessageId::new(self.next_message.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

#[async_trait]
impl GuildActions for RecordingActions {
    fn channel_exists(&self, channel_id: ChannelId) -> bool {
        self.channels.contains(&channel_id)
    }

    fn role_name(&self, _guild_id: GuildId, role_id: RoleId) -> Option<String> {
        self.roles.get(&role_id).cloned()
    }

    async fn member_roles(&self, _guild_id: GuildId, _user_id: UserId) -> Option<Vec<RoleId>> {
        self.member_roles.clone()
    }

    async fn send_text(
        &self,
        channel_id: ChannelId,
        content: String,
    ) -> Result<MessageId, AppError> {
        self.record(Call::Text {
            channel: channel_id,
            content,
        });
        Ok(self.message_id())
    }

    async fn send_announcement(
        &self,
        channel_id: ChannelId,
        announcement: &Announcement,
    ) -> Result<MessageId, AppError> {
        self.record(Call::Announcement {
            channel: channel_id,
            announcement: announcement.clone(),
        });
        Ok(self.message_id())
    }

    async fn react(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<(), AppError> {
        self.record(Call::Reaction {
            channel: channel_id,
            message: message_id,
            emoji: emoji.to_string(),
        });
        Ok(())
    }

    async fn add_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), AppError> {
        self.record(Call::AddRole {
            guild: guild_id,
            user: user_id,
            role: role_id,
            reason: reason.to_string(),
        });
        Ok(())
    }

    async fn remove_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), AppError> {
        self.record(Call::RemoveRole {
            guild: guild_id,
            user: user_id,
            role: role_id,
            reason: reason.to_string(),
        });
        Ok(())
    }

    async fn set_nickname(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        nickname: &str,
    ) -> Result<(), AppError> {
        self.record(Call::Nickname {
            guild: guild_id,
            user: user_id,
            nickname: nickname.to_string(),
        });
        Ok(())
    }

    async fn direct_message(&self, user_id: UserId, content: String) -> Result<(), AppError> {
        if self.fail_dm {
            return Err(AppError::Config("DMs closed".into()));
        }
        self.record(Call::DirectMessage {
            user: user_id,
            content,
        });
        Ok(())
    }

    async fn confirm(
        &self,
        channel_id: ChannelId,
        content: String,
    ) -> Result<Option<Confirmation>, AppError> {
        self.record(Call::Confirm {
            channel: channel_id,
            content,
        });
        Ok(self.answers.lock().unwrap().pop_front().flatten())
    }

    async fn offer_roles(
        &self,
        channel_id: ChannelId,
        content: String,
        menu: RoleMenu,
    ) -> Result<(), AppError> {
        self.record(Call::RoleMenu {
            channel: channel_id,
            content,
            roles: menu.buttons().iter().map(|b| b.role_id).collect(),
        });
        Ok(())
    }
}

/// Fixed language board.
pub struct StaticLanguageRoles {
    roles: Vec<LanguageRole>,
}

impl StaticLanguageRoles {
    pub fn new(roles: &[(i64, &str, &str)]) -> Self {
        Self {
            roles: roles
                .iter()
                .map(|&(role_id, name, emoji)| LanguageRole {
                    role_id,
                    role_name: name.to_string(),
                    emoji_repr: emoji.to_string(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl LanguageRoleSource for StaticLanguageRoles {
    async fn language_roles(&self) -> Result<Vec<LanguageRole>, AppError> {
        Ok(self.roles.clone())
    }

    async fn language_role_ids_by_name(&self) -> Result<Vec<RoleId>, AppError> {
        let mut roles = self.roles.clone();
        roles.sort_by(|a, b| a.role_name.cmp(&b.role_name));
        Ok(roles.iter().filter_map(LanguageRole::role).collect())
    }
}

/// A human member named `Member <id>` without roles.
pub fn member(id: u64, guild_id: GuildId) -> MemberInfo {
    MemberInfo {
        id: UserId::new(id),
        guild_id,
        name: format!("member{id}"),
        display_name: format!("Member {id}"),
        discriminator: None,
        avatar_url: None,
        bot: false,
        roles: Vec::new(),
    }
}
