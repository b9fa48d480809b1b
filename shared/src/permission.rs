use serde::{Deserialize, Serialize};

/// Named capabilities a member may hold in a guild. The discriminant is the
/// bit offset in the raw permission mask.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    CreateInstantInvite = 0,
    KickMembers = 1,
    BanMembers = 2,
    Administrator = 3,
    ManageChannel = 4,
    ManageServer = 5,
    MessageAddReaction = 6,
    ViewAuditLogs = 7,

    MessageRead = 10,
    MessageWrite = 11,
    MessageTts = 12,
    MessageManage = 13,
    MessageEmbedLinks = 14,
    MessageAttachFiles = 15,
    MessageHistory = 16,
    MessageMentionEveryone = 17,
    MessageExtEmoji = 18,

    VoiceConnect = 20,
    VoiceSpeak = 21,
    VoiceMuteOthers = 22,
    VoiceDeafOthers = 23,
    VoiceMoveOthers = 24,
    VoiceUseVad = 25,

    NicknameChange = 26,
    NicknameManage = 27,
    ManageRoles = 28,
    ManageWebhooks = 29,
    ManageEmotes = 30,
}

impl Permission {
    pub const ALL: [Permission; 28] = [
        Permission::CreateInstantInvite,
        Permission::KickMembers,
        Permission::BanMembers,
        Permission::Administrator,
        Permission::ManageChannel,
        Permission::ManageServer,
        Permission::MessageAddReaction,
        Permission::ViewAuditLogs,
        Permission::MessageRead,
        Permission::MessageWrite,
        Permission::MessageTts,
        Permission::MessageManage,
        Permission::MessageEmbedLinks,
        Permission::MessageAttachFiles,
        Permission::MessageHistory,
        Permission::MessageMentionEveryone,
        Permission::MessageExtEmoji,
        Permission::VoiceConnect,
        Permission::VoiceSpeak,
        Permission::VoiceMuteOthers,
        Permission::VoiceDeafOthers,
        Permission::VoiceMoveOthers,
        Permission::VoiceUseVad,
        Permission::NicknameChange,
        Permission::NicknameManage,
        Permission::ManageRoles,
        Permission::ManageWebhooks,
        Permission::ManageEmotes,
    ];

    pub const fn offset(self) -> u32 {
        self as u32
    }

    pub const fn raw(self) -> u64 {
        1 << self.offset()
    }

    pub fn is_set(self, raw: u64) -> bool {
        raw & self.raw() != 0
    }

    pub fn from_raw(raw: u64) -> Vec<Permission> {
        Self::ALL
            .iter()
            .copied()
            .filter(|permission| permission.is_set(raw))
            .collect()
    }

    pub fn to_raw(permissions: &[Permission]) -> u64 {
        permissions
            .iter()
            .fold(0, |raw, permission| raw | permission.raw())
    }
}
