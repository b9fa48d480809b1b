pub mod channel;
pub mod emote;
pub mod guild;
pub mod invite;
pub mod member;
pub mod reaction;
pub mod role;
pub mod user;
pub mod webhook;
