use std::{
    cmp::Reverse,
    sync::atomic::{AtomicBool, Ordering},
};

use chrono::{DateTime, Utc};
use parking_lot::{RwLock, RwLockReadGuard};

use cordial_shared::{
    check_verification, AccountType, ChannelSnapshot, ChannelType, Emote, EmoteSnapshot,
    GuildData, GuildSnapshot, Identifiable, Member, MemberSnapshot, Role, RoleSnapshot, Snowflake,
    TextChannel, User, VerificationInput, VerificationLevel, VoiceChannel,
};

use crate::cache::{
    entity_map::{EntityMap, Handle, ReconcileReport},
    set_diff::reconcile_set,
};

/// A guild scope: its scalar data plus the child entities it exclusively
/// owns. Dropping the scope from the cache drops every owned entry with it.
pub struct Guild {
    id: Snowflake,
    data: RwLock<GuildData>,
    roles: EntityMap<Role>,
    text_channels: EntityMap<TextChannel>,
    voice_channels: EntityMap<VoiceChannel>,
    members: EntityMap<Member>,
    emotes: EntityMap<Emote>,
    // cleared whenever the verification level changes
    can_send_verification: AtomicBool,
}

impl Guild {
    pub fn new(snapshot: &GuildSnapshot) -> Self {
        let guild = Self {
            id: snapshot.id,
            data: RwLock::new(GuildData::new(snapshot)),
            roles: EntityMap::new(),
            text_channels: EntityMap::new(),
            voice_channels: EntityMap::new(),
            members: EntityMap::new(),
            emotes: EntityMap::new(),
            can_send_verification: AtomicBool::new(false),
        };
        guild.sync_children(snapshot);
        guild
    }

    /// Brings an existing scope in line with a fresh full snapshot, keeping
    /// the handles of every child that survives.
    pub fn sync(&self, snapshot: &GuildSnapshot) -> GuildSyncReport {
        let level_changed = {
            let mut data = self.data.write();
            let old_level = data.verification_level;
            *data = GuildData::new(snapshot);
            old_level != data.verification_level
        };
        if level_changed {
            self.can_send_verification.store(false, Ordering::Release);
        }
        self.sync_children(snapshot)
    }

    fn sync_children(&self, snapshot: &GuildSnapshot) -> GuildSyncReport {
        let guild_id = self.id;

        let roles = self.roles.reconcile(
            &snapshot.roles,
            |role| role.id,
            |role| Role::new(guild_id, role),
            update_role,
        );

        let text: Vec<ChannelSnapshot> = snapshot
            .channels
            .iter()
            .filter(|channel| channel.kind == ChannelType::Text)
            .cloned()
            .collect();
        let text_channels = self.text_channels.reconcile(
            &text,
            |channel| channel.id,
            |channel| TextChannel::new(guild_id, channel),
            |current, channel| replace_if_changed(current, TextChannel::new(guild_id, channel)),
        );

        let voice: Vec<ChannelSnapshot> = snapshot
            .channels
            .iter()
            .filter(|channel| channel.kind == ChannelType::Voice)
            .cloned()
            .collect();
        let voice_channels = self.voice_channels.reconcile(
            &voice,
            |channel| channel.id,
            |channel| VoiceChannel::new(guild_id, channel),
            |current, channel| replace_if_changed(current, VoiceChannel::new(guild_id, channel)),
        );

        let members = self.members.reconcile(
            &snapshot.members,
            |member| member.user.id,
            |member| Member::new(guild_id, member),
            update_member,
        );

        let emotes = self.emotes.reconcile(
            &snapshot.emojis,
            |emote| emote.id,
            |emote| {
                let mut created = Emote::new(guild_id, emote.id);
                update_emote(&mut created, emote);
                created
            },
            update_emote,
        );

        GuildSyncReport {
            roles,
            text_channels,
            voice_channels,
            members,
            emotes,
        }
    }

    pub fn data(&self) -> RwLockReadGuard<'_, GuildData> {
        self.data.read()
    }

    pub fn name(&self) -> String {
        self.data.read().name.clone()
    }

    pub fn owner_id(&self) -> Snowflake {
        self.data.read().owner_id
    }

    pub fn is_available(&self) -> bool {
        self.data.read().available
    }

    pub fn set_available(&self, available: bool) {
        self.data.write().available = available;
    }

    pub fn member_count(&self) -> usize {
        self.data.read().member_count
    }

    pub fn verification_level(&self) -> VerificationLevel {
        self.data.read().verification_level
    }

    pub fn set_verification_level(&self, level: VerificationLevel) {
        self.data.write().verification_level = level;
        self.can_send_verification.store(false, Ordering::Release);
    }

    // Owned collections

    pub fn roles_map(&self) -> &EntityMap<Role> {
        &self.roles
    }

    pub fn text_channels_map(&self) -> &EntityMap<TextChannel> {
        &self.text_channels
    }

    pub fn voice_channels_map(&self) -> &EntityMap<VoiceChannel> {
        &self.voice_channels
    }

    pub fn members_map(&self) -> &EntityMap<Member> {
        &self.members
    }

    pub fn emotes_map(&self) -> &EntityMap<Emote> {
        &self.emotes
    }

    // Lookups

    pub fn role(&self, id: &Snowflake) -> Option<Handle<Role>> {
        self.roles.get(id)
    }

    /// The `@everyone` role, which shares the guild's id.
    pub fn public_role(&self) -> Option<Handle<Role>> {
        self.roles.get(&self.id)
    }

    /// The default text channel, if it is still cached.
    pub fn public_channel(&self) -> Option<Handle<TextChannel>> {
        let id = self.data.read().public_channel_id;
        self.text_channels.get(&id)
    }

    /// Roles ordered from highest to lowest position.
    pub fn roles(&self) -> Vec<Handle<Role>> {
        let mut roles = self.roles.values();
        roles.sort_by_key(|role| {
            let role = role.read();
            Reverse((role.position(), role.id()))
        });
        roles
    }

    pub fn text_channel(&self, id: &Snowflake) -> Option<Handle<TextChannel>> {
        self.text_channels.get(id)
    }

    /// Text channels in display order.
    pub fn text_channels(&self) -> Vec<Handle<TextChannel>> {
        let mut channels = self.text_channels.values();
        channels.sort_by_key(|channel| {
            let channel = channel.read();
            (channel.position(), channel.id())
        });
        channels
    }

    pub fn voice_channel(&self, id: &Snowflake) -> Option<Handle<VoiceChannel>> {
        self.voice_channels.get(id)
    }

    pub fn voice_channels(&self) -> Vec<Handle<VoiceChannel>> {
        let mut channels = self.voice_channels.values();
        channels.sort_by_key(|channel| {
            let channel = channel.read();
            (channel.position(), channel.id())
        });
        channels
    }

    pub fn member(&self, user_id: &Snowflake) -> Option<Handle<Member>> {
        self.members.get(user_id)
    }

    pub fn is_member(&self, user_id: &Snowflake) -> bool {
        self.members.contains(user_id)
    }

    pub fn members(&self) -> Vec<Handle<Member>> {
        self.members.values()
    }

    /// Members holding every one of `role_ids`. Returns `None` if any id is
    /// not a role of this guild.
    pub fn members_with_roles(&self, role_ids: &[Snowflake]) -> Option<Vec<Handle<Member>>> {
        if role_ids.iter().any(|id| !self.roles.contains(id)) {
            return None;
        }
        Some(
            self.members
                .values()
                .into_iter()
                .filter(|member| {
                    let member = member.read();
                    role_ids.iter().all(|id| member.has_role(id))
                })
                .collect(),
        )
    }

    pub fn emote(&self, id: &Snowflake) -> Option<Handle<Emote>> {
        self.emotes.get(id)
    }

    pub fn emotes(&self) -> Vec<Handle<Emote>> {
        self.emotes.values()
    }

    /// Resolves weak role ids, skipping any that are no longer cached.
    pub fn resolve_roles<'a, I>(&self, ids: I) -> Vec<Handle<Role>>
    where
        I: IntoIterator<Item = &'a Snowflake>,
    {
        ids.into_iter().filter_map(|id| self.roles.get(id)).collect()
    }

    /// Whether the self account may send messages here under the guild's
    /// verification level. A pass is remembered until the level changes.
    pub fn check_verification(
        &self,
        account_type: AccountType,
        self_user: &User,
        now: DateTime<Utc>,
    ) -> bool {
        if self.can_send_verification.load(Ordering::Acquire) {
            return true;
        }
        let self_joined_at = self
            .members
            .get(&self_user.id())
            .map(|member| member.read().joined_at());
        let input = VerificationInput {
            account_type,
            level: self.verification_level(),
            self_verified: self_user.is_verified(),
            self_created_at: self_user.creation_time(),
            self_joined_at,
            now,
        };
        let passed = check_verification(&input);
        if passed && account_type != AccountType::Bot {
            self.can_send_verification.store(true, Ordering::Release);
        }
        passed
    }
}

impl Identifiable for Guild {
    fn id(&self) -> Snowflake {
        self.id
    }
}

/// Per-collection reports from [`Guild::sync`].
pub struct GuildSyncReport {
    pub roles: ReconcileReport<Role>,
    pub text_channels: ReconcileReport<TextChannel>,
    pub voice_channels: ReconcileReport<VoiceChannel>,
    pub members: ReconcileReport<Member>,
    pub emotes: ReconcileReport<Emote>,
}

fn replace_if_changed<T: PartialEq>(current: &mut T, next: T) -> bool {
    if *current == next {
        return false;
    }
    *current = next;
    true
}

pub(crate) fn update_role(role: &mut Role, snapshot: &RoleSnapshot) -> bool {
    let before = role.clone();
    role.update(snapshot);
    *role != before
}

pub(crate) fn update_member(member: &mut Member, snapshot: &MemberSnapshot) -> bool {
    let nick_changed = member.nickname() != snapshot.nick.as_deref();
    if nick_changed {
        member.set_nickname(snapshot.nick.clone());
    }
    let roles = reconcile_set(member.roles_mut(), snapshot.roles.iter().copied());
    nick_changed || !roles.is_empty()
}

pub(crate) fn update_emote(emote: &mut Emote, snapshot: &EmoteSnapshot) -> bool {
    let name_changed = emote.name() != snapshot.name;
    emote.set_name(&snapshot.name);
    let managed_changed = emote.is_managed() != snapshot.managed;
    emote.set_managed(snapshot.managed);
    let roles = reconcile_set(emote.roles_mut(), snapshot.roles.iter().copied());
    name_changed || managed_changed || !roles.is_empty()
}
