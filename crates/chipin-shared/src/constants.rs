//! Application-wide constants

pub const APP_NAME: &str = "ChipIn";
pub const DEFAULT_MAIL_FROM_NAME: &str = "ChipIn";
pub const INVITE_EMAIL_PARAM: &str = "email";
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 900;
