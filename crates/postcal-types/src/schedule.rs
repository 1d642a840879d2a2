use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::post::PostId;
use crate::user::UserId;

/// Unique identifier for a scheduled assignment, wrapping a UUID v7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleId(pub Uuid);

impl ScheduleId {
    /// Create a new ScheduleId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a ScheduleId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ScheduleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ScheduleId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// One of the eight fixed two-hour bands a day is divided into.
///
/// The band order is the canonical sort order for calendar rendering;
/// [`TimeSlot::band_index`] exposes it numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeSlot {
    SevenToNine,
    NineToEleven,
    ElevenToThirteen,
    ThirteenToFifteen,
    FifteenToSeventeen,
    SeventeenToNineteen,
    NineteenToTwentyOne,
    TwentyOneToTwentyThree,
}

impl TimeSlot {
    /// All slots in band order.
    pub const ALL: [TimeSlot; 8] = [
        TimeSlot::SevenToNine,
        TimeSlot::NineToEleven,
        TimeSlot::ElevenToThirteen,
        TimeSlot::ThirteenToFifteen,
        TimeSlot::FifteenToSeventeen,
        TimeSlot::SeventeenToNineteen,
        TimeSlot::NineteenToTwentyOne,
        TimeSlot::TwentyOneToTwentyThree,
    ];

    /// Position of this slot within the day, 0..=7.
    pub fn band_index(&self) -> u8 {
        match self {
            TimeSlot::SevenToNine => 0,
            TimeSlot::NineToEleven => 1,
            TimeSlot::ElevenToThirteen => 2,
            TimeSlot::ThirteenToFifteen => 3,
            TimeSlot::FifteenToSeventeen => 4,
            TimeSlot::SeventeenToNineteen => 5,
            TimeSlot::NineteenToTwentyOne => 6,
            TimeSlot::TwentyOneToTwentyThree => 7,
        }
    }

    /// The wire/storage label for this slot (e.g. "7:00-9:00").
    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::SevenToNine => "7:00-9:00",
            TimeSlot::NineToEleven => "9:00-11:00",
            TimeSlot::ElevenToThirteen => "11:00-13:00",
            TimeSlot::ThirteenToFifteen => "13:00-15:00",
            TimeSlot::FifteenToSeventeen => "15:00-17:00",
            TimeSlot::SeventeenToNineteen => "17:00-19:00",
            TimeSlot::NineteenToTwentyOne => "19:00-21:00",
            TimeSlot::TwentyOneToTwentyThree => "21:00-23:00",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "7:00-9:00" => Ok(TimeSlot::SevenToNine),
            "9:00-11:00" => Ok(TimeSlot::NineToEleven),
            "11:00-13:00" => Ok(TimeSlot::ElevenToThirteen),
            "13:00-15:00" => Ok(TimeSlot::ThirteenToFifteen),
            "15:00-17:00" => Ok(TimeSlot::FifteenToSeventeen),
            "17:00-19:00" => Ok(TimeSlot::SeventeenToNineteen),
            "19:00-21:00" => Ok(TimeSlot::NineteenToTwentyOne),
            "21:00-23:00" => Ok(TimeSlot::TwentyOneToTwentyThree),
            other => Err(format!("invalid time slot: '{other}'")),
        }
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.label().to_string()
    }
}

/// Lifecycle state of a scheduled assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Scheduled,
}

impl Default for ScheduleStatus {
    fn default() -> Self {
        ScheduleStatus::Scheduled
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleStatus::Scheduled => write!(f, "scheduled"),
        }
    }
}

impl FromStr for ScheduleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(ScheduleStatus::Scheduled),
            other => Err(format!("invalid schedule status: '{other}'")),
        }
    }
}

/// The binding of one post to one (date, slot) coordinate for one user.
///
/// Invariant: at most one assignment exists per (date, slot, user); the
/// storage layer enforces it with a unique constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPost {
    pub id: ScheduleId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub status: ScheduleStatus,
    pub created_at: DateTime<Utc>,
}

impl ScheduledPost {
    /// Build a new assignment at (date, slot) for `user_id`.
    pub fn new(post_id: PostId, user_id: UserId, date: NaiveDate, slot: TimeSlot) -> Self {
        Self {
            id: ScheduleId::new(),
            post_id,
            user_id,
            date,
            slot,
            status: ScheduleStatus::default(),
            created_at: Utc::now(),
        }
    }
}

/// A scheduled assignment joined with its post content, as rendered on the
/// calendar. Field names match the original wire shape (`day`, `time`,
/// `isScheduled`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPostView {
    pub id: ScheduleId,
    pub content: String,
    pub topic: String,
    pub day: NaiveDate,
    pub time: TimeSlot,
    pub is_scheduled: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_slots_parse_their_own_label() {
        for slot in TimeSlot::ALL {
            let parsed: TimeSlot = slot.label().parse().unwrap();
            assert_eq!(parsed, slot);
        }
    }

    #[test]
    fn test_band_order_matches_all_array() {
        for (i, slot) in TimeSlot::ALL.iter().enumerate() {
            assert_eq!(slot.band_index() as usize, i);
        }
    }

    #[test]
    fn test_invalid_slot_label_rejected() {
        assert!("8:00-10:00".parse::<TimeSlot>().is_err());
        assert!("".parse::<TimeSlot>().is_err());
    }

    #[test]
    fn test_slot_serde_uses_label() {
        let json = serde_json::to_string(&TimeSlot::NineToEleven).unwrap();
        assert_eq!(json, "\"9:00-11:00\"");
        let back: TimeSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TimeSlot::NineToEleven);
    }

    #[test]
    fn test_view_serializes_original_field_names() {
        let view = ScheduledPostView {
            id: ScheduleId::new(),
            content: "hi".into(),
            topic: "General".into(),
            day: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            time: TimeSlot::NineToEleven,
            is_scheduled: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["day"], "2025-03-10");
        assert_eq!(json["time"], "9:00-11:00");
        assert_eq!(json["isScheduled"], true);
    }
}
