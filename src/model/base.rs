//! Identity and timestamps shared by every entity.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Base {
    id: String,
    #[serde(with = "timestamp")]
    create_time: DateTime<Utc>,
    #[serde(with = "timestamp")]
    update_time: DateTime<Utc>,
}

/// Fixed-width RFC 3339 with microseconds, so stored text sorts chronologically.
mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}

fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

impl Base {
    /// Fresh identity: random UUID, both timestamps set to now.
    pub fn new() -> Self {
        let ts = now();
        Base {
            id: Uuid::new_v4().to_string(),
            create_time: ts,
            update_time: ts,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn create_time(&self) -> DateTime<Utc> {
        self.create_time
    }

    pub fn update_time(&self) -> DateTime<Utc> {
        self.update_time
    }

    /// Refresh `update_time`. Never moves backwards.
    pub fn touch(&mut self) {
        self.update_time = now().max(self.update_time);
    }
}

impl Default for Base {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_assigns_uuid_and_equal_timestamps() {
        let base = Base::new();
        assert!(Uuid::parse_str(base.id()).is_ok());
        assert_eq!(base.create_time(), base.update_time());
    }

    #[test]
    fn touch_keeps_id_and_create_time() {
        let mut base = Base::new();
        let before = base.clone();
        std::thread::sleep(std::time::Duration::from_millis(5));
        base.touch();
        assert_eq!(base.id(), before.id());
        assert_eq!(base.create_time(), before.create_time());
        assert!(base.update_time() > before.update_time());
    }

    #[test]
    fn serializes_timestamps_as_iso_strings() {
        let base = Base::new();
        let value = serde_json::to_value(&base).unwrap();
        let created = value["create_time"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(created).is_ok());
        assert_eq!(created.len(), "2024-01-01T00:00:00.000000Z".len());
        let back: Base = serde_json::from_value(value).unwrap();
        assert_eq!(back, base);
    }
}
