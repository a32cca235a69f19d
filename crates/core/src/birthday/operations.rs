use super::types::{Birthday, MonthDayFilter};

/// Sorts birthdays by month, then day, then uid.
pub fn sort_by_month_day(birthdays: &mut [Birthday]) {
    birthdays.sort_by_key(|b| (b.month, b.day, b.uid));
}

/// Returns the birthdays matching a month/day filter, ordered by month and day.
pub fn filter_by_month_day<'a>(
    birthdays: impl IntoIterator<Item = &'a Birthday>,
    filter: MonthDayFilter,
) -> Vec<Birthday> {
    let mut matched: Vec<Birthday> = birthdays
        .into_iter()
        .filter(|b| filter.matches(b))
        .copied()
        .collect();
    sort_by_month_day(&mut matched);
    matched
}

/// Returns the birthdays whose month is in `months`, ordered by month and day.
pub fn filter_by_months<'a>(
    birthdays: impl IntoIterator<Item = &'a Birthday>,
    months: &[u32],
) -> Vec<Birthday> {
    let mut matched: Vec<Birthday> = birthdays
        .into_iter()
        .filter(|b| months.contains(&b.month))
        .copied()
        .collect();
    sort_by_month_day(&mut matched);
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Birthday> {
        vec![
            Birthday { uid: 4, month: 12, day: 20 },
            Birthday { uid: 1, month: 6, day: 1 },
            Birthday { uid: 2, month: 1, day: 5 },
            Birthday { uid: 3, month: 6, day: 15 },
            Birthday { uid: 5, month: 3, day: 1 },
        ]
    }

    #[test]
    fn test_sort_by_month_day() {
        let mut birthdays = sample();
        sort_by_month_day(&mut birthdays);
        let uids: Vec<u32> = birthdays.iter().map(|b| b.uid).collect();
        assert_eq!(uids, vec![2, 5, 1, 3, 4]);
    }

    #[test]
    fn test_sort_uses_uid_as_tiebreaker() {
        let mut birthdays = vec![
            Birthday { uid: 9, month: 7, day: 4 },
            Birthday { uid: 3, month: 7, day: 4 },
        ];
        sort_by_month_day(&mut birthdays);
        assert_eq!(birthdays[0].uid, 3);
    }

    #[test]
    fn test_filter_by_month_day_all() {
        let birthdays = sample();
        let matched = filter_by_month_day(&birthdays, MonthDayFilter::all());
        assert_eq!(matched.len(), 5);
        assert_eq!(matched[0].uid, 2);
    }

    #[test]
    fn test_filter_by_month_day_month() {
        let birthdays = sample();
        let matched = filter_by_month_day(&birthdays, MonthDayFilter::new(6, 0).unwrap());
        let uids: Vec<u32> = matched.iter().map(|b| b.uid).collect();
        assert_eq!(uids, vec![1, 3]);
    }

    #[test]
    fn test_filter_by_month_day_day() {
        let birthdays = sample();
        let matched = filter_by_month_day(&birthdays, MonthDayFilter::new(0, 1).unwrap());
        let uids: Vec<u32> = matched.iter().map(|b| b.uid).collect();
        assert_eq!(uids, vec![5, 1]);
    }

    #[test]
    fn test_filter_by_months() {
        let birthdays = sample();
        let matched = filter_by_months(&birthdays, &[12, 1]);
        let uids: Vec<u32> = matched.iter().map(|b| b.uid).collect();
        assert_eq!(uids, vec![2, 4]);
    }

    #[test]
    fn test_filter_by_months_empty_set() {
        let birthdays = sample();
        assert!(filter_by_months(&birthdays, &[]).is_empty());
    }
}
