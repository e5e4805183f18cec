// lib/src/store/keys.rs

//! Keys of the local key-value store. Values are plain JSON with no version tag.

/// The saved session (`User` with its role).
pub const USER: &str = "mediverse_user";
/// The family circle (`Vec<FamilyContact>`).
pub const FAMILY: &str = "mediverse_family";
/// The last dispatch answer shown in the tracking panel (`EmergencyResult`).
pub const EMERGENCY: &str = "mediverse_emergency";
/// Streak count. Stored per user as `mv_streak:<owner>`.
pub const STREAK: &str = "mv_streak";
/// Date of the last streak mark, `YYYY-MM-DD`. Stored per user as
/// `mv_last_date:<owner>`; the bare key is a device-wide leftover.
pub const LAST_DATE: &str = "mv_last_date";
/// Older device-wide name for `LAST_DATE`.
pub const LEGACY_LAST_DATE: &str = "last_streak_date";

/// Device-wide streak keys written before streaks were kept per user.
pub const UNSCOPED_STREAK_KEYS: [&str; 3] = [STREAK, LAST_DATE, LEGACY_LAST_DATE];

/// `mv_streak:<owner>`
pub fn streak_for(owner: &str) -> String {
    format!("{}:{}", STREAK, owner)
}

/// `mv_last_date:<owner>`
pub fn last_date_for(owner: &str) -> String {
    format!("{}:{}", LAST_DATE, owner)
}
