use chrono::{DateTime, Utc};
use log::debug;
use serde::Deserialize;

/// Minimum membership age before a HIGH verification guild accepts messages.
pub const HIGH_MEMBERSHIP_MINUTES: i64 = 10;
/// Minimum account age before a MEDIUM verification guild accepts messages.
pub const MEDIUM_ACCOUNT_MINUTES: i64 = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum VerificationLevel {
    None,
    Low,
    Medium,
    High,
    Unknown(u8),
}

impl VerificationLevel {
    pub fn none() -> Self {
        Self::None
    }
}

impl From<u8> for VerificationLevel {
    fn from(raw: u8) -> Self {
        match raw {
            0 => Self::None,
            1 => Self::Low,
            2 => Self::Medium,
            3 => Self::High,
            other => Self::Unknown(other),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccountType {
    Bot,
    Client,
}

/// Everything the verification gate looks at, captured at one instant.
#[derive(Clone, Debug)]
pub struct VerificationInput {
    pub account_type: AccountType,
    pub level: VerificationLevel,
    pub self_verified: bool,
    pub self_created_at: DateTime<Utc>,
    pub self_joined_at: Option<DateTime<Utc>>,
    pub now: DateTime<Utc>,
}

/// Whether the self account may currently send messages in a guild.
///
/// The levels form a fallthrough chain: HIGH checks membership age and then
/// everything MEDIUM checks, MEDIUM checks account age and then everything
/// LOW checks, LOW checks that the account is verified. Unknown levels never
/// pass.
pub fn check_verification(input: &VerificationInput) -> bool {
    if input.account_type == AccountType::Bot {
        return true;
    }

    let minutes_since = |then: DateTime<Utc>| (input.now - then).num_minutes();

    let mut level = input.level;
    loop {
        match level {
            VerificationLevel::High => {
                let Some(joined_at) = input.self_joined_at else {
                    debug!("Verification HIGH not met: self is not a member");
                    return false;
                };
                if minutes_since(joined_at) < HIGH_MEMBERSHIP_MINUTES {
                    debug!("Verification HIGH not met: member for less than {} minutes", HIGH_MEMBERSHIP_MINUTES);
                    return false;
                }
                level = VerificationLevel::Medium;
            }
            VerificationLevel::Medium => {
                if minutes_since(input.self_created_at) < MEDIUM_ACCOUNT_MINUTES {
                    debug!("Verification MEDIUM not met: account younger than {} minutes", MEDIUM_ACCOUNT_MINUTES);
                    return false;
                }
                level = VerificationLevel::Low;
            }
            VerificationLevel::Low => {
                if !input.self_verified {
                    debug!("Verification LOW not met: account is not verified");
                    return false;
                }
                level = VerificationLevel::None;
            }
            VerificationLevel::None => return true,
            VerificationLevel::Unknown(_) => return false,
        }
    }
}
