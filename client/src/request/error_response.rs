use serde_json::Value;

/// Classified failure codes carried in the JSON body of a rejected request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorResponse {
    UnknownAccount,
    UnknownChannel,
    UnknownGuild,
    UnknownIntegration,
    UnknownInvite,
    UnknownMember,
    UnknownMessage,
    UnknownOverride,
    UnknownProvider,
    UnknownRole,
    UnknownToken,
    UnknownUser,
    UnknownEmoji,
    NoUserWithTag,
    BotsNotAllowed,
    OnlyBotsAllowed,
    MaxGuilds,
    MaxFriends,
    MaxPins,
    MaxRoles,
    MaxReactions,
    Unauthorized,
    MissingAccess,
    InvalidAccountType,
    CannotExecuteOnDm,
    EmbedDisabled,
    CannotEditOtherUsersMessage,
    CannotSendEmptyMessage,
    CannotMessageUser,
    CannotSendInVoiceChannel,
    VerificationError,
    MissingPermissions,
    InvalidAuthenticationToken,
    NoteTooLong,
    InvalidBulkDeleteMessageCount,
    InvalidMfaLevel,
    InvalidPassword,
    InvalidPin,
    InvalidMessageTarget,
    InvalidBulkDelete,
    InvalidFormBody,
    ReactionBlocked,
    /// A code this table does not know
    Unknown(u32),
    /// The body carried no code at all
    Unclassified,
}

impl ErrorResponse {
    pub fn from_code(code: u32) -> Self {
        match code {
            10001 => Self::UnknownAccount,
            10003 => Self::UnknownChannel,
            10004 => Self::UnknownGuild,
            10005 => Self::UnknownIntegration,
            10006 => Self::UnknownInvite,
            10007 => Self::UnknownMember,
            10008 => Self::UnknownMessage,
            10009 => Self::UnknownOverride,
            10010 => Self::UnknownProvider,
            10011 => Self::UnknownRole,
            10012 => Self::UnknownToken,
            10013 => Self::UnknownUser,
            10014 => Self::UnknownEmoji,
            20001 => Self::BotsNotAllowed,
            20002 => Self::OnlyBotsAllowed,
            30001 => Self::MaxGuilds,
            30002 => Self::MaxFriends,
            30003 => Self::MaxPins,
            30005 => Self::MaxRoles,
            30010 => Self::MaxReactions,
            40001 => Self::Unauthorized,
            50001 => Self::MissingAccess,
            50002 => Self::InvalidAccountType,
            50003 => Self::CannotExecuteOnDm,
            50004 => Self::EmbedDisabled,
            50005 => Self::CannotEditOtherUsersMessage,
            50006 => Self::CannotSendEmptyMessage,
            50007 => Self::CannotMessageUser,
            50008 => Self::CannotSendInVoiceChannel,
            50009 => Self::VerificationError,
            50013 => Self::MissingPermissions,
            50014 => Self::InvalidAuthenticationToken,
            50015 => Self::NoteTooLong,
            50016 => Self::InvalidBulkDeleteMessageCount,
            50017 => Self::InvalidMfaLevel,
            50018 => Self::InvalidPassword,
            50019 => Self::InvalidPin,
            50020 => Self::InvalidMessageTarget,
            50034 => Self::InvalidBulkDelete,
            50035 => Self::InvalidFormBody,
            90001 => Self::ReactionBlocked,
            80004 => Self::NoUserWithTag,
            other => Self::Unknown(other),
        }
    }

    pub fn code(&self) -> Option<u32> {
        let code = match self {
            Self::UnknownAccount => 10001,
            Self::UnknownChannel => 10003,
            Self::UnknownGuild => 10004,
            Self::UnknownIntegration => 10005,
            Self::UnknownInvite => 10006,
            Self::UnknownMember => 10007,
            Self::UnknownMessage => 10008,
            Self::UnknownOverride => 10009,
            Self::UnknownProvider => 10010,
            Self::UnknownRole => 10011,
            Self::UnknownToken => 10012,
            Self::UnknownUser => 10013,
            Self::UnknownEmoji => 10014,
            Self::BotsNotAllowed => 20001,
            Self::OnlyBotsAllowed => 20002,
            Self::MaxGuilds => 30001,
            Self::MaxFriends => 30002,
            Self::MaxPins => 30003,
            Self::MaxRoles => 30005,
            Self::MaxReactions => 30010,
            Self::Unauthorized => 40001,
            Self::MissingAccess => 50001,
            Self::InvalidAccountType => 50002,
            Self::CannotExecuteOnDm => 50003,
            Self::EmbedDisabled => 50004,
            Self::CannotEditOtherUsersMessage => 50005,
            Self::CannotSendEmptyMessage => 50006,
            Self::CannotMessageUser => 50007,
            Self::CannotSendInVoiceChannel => 50008,
            Self::VerificationError => 50009,
            Self::MissingPermissions => 50013,
            Self::InvalidAuthenticationToken => 50014,
            Self::NoteTooLong => 50015,
            Self::InvalidBulkDeleteMessageCount => 50016,
            Self::InvalidMfaLevel => 50017,
            Self::InvalidPassword => 50018,
            Self::InvalidPin => 50019,
            Self::InvalidMessageTarget => 50020,
            Self::InvalidBulkDelete => 50034,
            Self::InvalidFormBody => 50035,
            Self::NoUserWithTag => 80004,
            Self::ReactionBlocked => 90001,
            Self::Unknown(code) => *code,
            Self::Unclassified => return None,
        };
        Some(code)
    }

    /// Whether the request referenced an entity the remote no longer has.
    pub fn is_unknown_entity(&self) -> bool {
        matches!(self.code(), Some(10001..=10014))
    }

    /// Classifies a rejection body of the form `{"code": .., "message": ..}`.
    pub fn from_body(body: &Value) -> (Self, String) {
        let error = body
            .get("code")
            .and_then(Value::as_u64)
            .and_then(|code| u32::try_from(code).ok())
            .map(Self::from_code)
            .unwrap_or(Self::Unclassified);
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        (error, message)
    }
}
