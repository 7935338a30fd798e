//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//! 时间字段统一以 UTC 微秒级时间戳存储。

pub mod assignments;
pub mod group_members;
pub mod groups;
pub mod submissions;
pub mod users;

use chrono::{DateTime, Utc};

/// 微秒时间戳转换为 UTC 时间
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_micros(ts).unwrap_or_default()
}

/// UTC 时间转换为微秒时间戳
pub(crate) fn to_timestamp(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_micros()
}

/// 当前时间的微秒时间戳
pub(crate) fn now_timestamp() -> i64 {
    to_timestamp(Utc::now())
}

/// 更新时间戳，保证严格晚于上一次写入
pub(crate) fn advance_timestamp(previous: i64) -> i64 {
    now_timestamp().max(previous.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_keeps_sub_second_precision() {
        let dt = DateTime::parse_from_rfc3339("2025-03-01T08:00:00.123456Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(to_datetime(to_timestamp(dt)), dt);
    }

    #[test]
    fn test_advance_timestamp_is_strictly_later() {
        let future = now_timestamp() + 60_000_000;
        assert_eq!(advance_timestamp(future), future + 1);

        let past = to_timestamp(DateTime::<Utc>::from_timestamp(0, 0).unwrap());
        assert!(advance_timestamp(past) > past + 1);
    }
}
