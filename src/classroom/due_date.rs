//! 截止时间归一化
//!
//! 上游把截止时间拆成结构化的日期与时刻两个字段，且两者都可能缺失或不完整。
//! 这里统一成 `YYYY-MM-DDTHH:MM:SS`（无时区后缀，沿用上游的本地时间语义）。
//! 未给出时刻时默认当天结束 23:59:00，而不是零点。

use serde::Deserialize;

/// 上游结构化日期，三个字段都可能缺失
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DueDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// 上游结构化时刻，小时与分钟各自独立缺省
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DueTime {
    pub hours: Option<u32>,
    pub minutes: Option<u32>,
}

/// 归一化截止时间；全函数无 panic 路径
///
/// - 无日期 -> None
/// - 日期缺年/月/日任意一项 -> None
/// - 无时刻 -> 默认 `23:59:00`
/// - 有时刻但缺小时 -> 小时取 23；缺分钟 -> 分钟取 59（两者独立缺省）
pub fn format_due_date(date: Option<&DueDate>, time: Option<&DueTime>) -> Option<String> {
    let date = date?;
    let (year, month, day) = (date.year?, date.month?, date.day?);

    let (hours, minutes) = match time {
        Some(t) => (t.hours.unwrap_or(23), t.minutes.unwrap_or(59)),
        None => (23, 59),
    };

    Some(format!(
        "{year}-{month:02}-{day:02}T{hours:02}:{minutes:02}:00"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> DueDate {
        DueDate {
            year: Some(year),
            month: Some(month),
            day: Some(day),
        }
    }

    #[test]
    fn test_no_date_yields_none() {
        assert_eq!(format_due_date(None, None), None);
        assert_eq!(
            format_due_date(None, Some(&DueTime { hours: Some(9), minutes: Some(0) })),
            None
        );
    }

    #[test]
    fn test_date_without_time_defaults_to_end_of_day() {
        assert_eq!(
            format_due_date(Some(&date(2024, 3, 5)), None),
            Some("2024-03-05T23:59:00".to_string())
        );
    }

    #[test]
    fn test_date_with_full_time() {
        assert_eq!(
            format_due_date(
                Some(&date(2024, 3, 5)),
                Some(&DueTime { hours: Some(9), minutes: Some(30) })
            ),
            Some("2024-03-05T09:30:00".to_string())
        );
    }

    #[test]
    fn test_hour_and_minute_default_independently() {
        // 只给小时：分钟缺省为 59
        assert_eq!(
            format_due_date(
                Some(&date(2024, 12, 1)),
                Some(&DueTime { hours: Some(14), minutes: None })
            ),
            Some("2024-12-01T14:59:00".to_string())
        );
        // 只给分钟：小时缺省为 23
        assert_eq!(
            format_due_date(
                Some(&date(2024, 12, 1)),
                Some(&DueTime { hours: None, minutes: Some(15) })
            ),
            Some("2024-12-01T23:15:00".to_string())
        );
        // 空时刻对象：等价于未给出时刻
        assert_eq!(
            format_due_date(Some(&date(2024, 12, 1)), Some(&DueTime::default())),
            Some("2024-12-01T23:59:00".to_string())
        );
    }

    #[test]
    fn test_incomplete_date_yields_none() {
        let missing_day = DueDate {
            year: Some(2024),
            month: Some(3),
            day: None,
        };
        assert_eq!(format_due_date(Some(&missing_day), None), None);

        let missing_year = DueDate {
            year: None,
            month: Some(3),
            day: Some(5),
        };
        assert_eq!(format_due_date(Some(&missing_year), None), None);
    }

    #[test]
    fn test_month_and_day_are_zero_padded() {
        assert_eq!(
            format_due_date(Some(&date(2025, 1, 9)), None),
            Some("2025-01-09T23:59:00".to_string())
        );
    }
}
