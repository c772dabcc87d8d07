use chrono::{DateTime, Utc};

// イベントの時間帯。終了時刻は含まない [starts_at, ends_at)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl Schedule {
    pub fn new(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        Self { starts_at, ends_at }
    }

    pub fn is_valid(&self) -> bool {
        self.starts_at < self.ends_at
    }

    // 一方の終了時刻ちょうどに他方が始まる場合は重ならない
    pub fn overlaps(&self, other: &Schedule) -> bool {
        self.starts_at < other.ends_at && other.starts_at < self.ends_at
    }
}
