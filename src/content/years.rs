/// Tick positions of the year filter. The last entry is the open-ended
/// "now" position that shows every word.
pub const YEAR_PERIODS: [(&str, i32); 7] = [
    ("", -2000),
    ("1700", 1700),
    ("1800", 1800),
    ("1850", 1850),
    ("1900", 1900),
    ("1950", 1950),
    ("Now", 2025),
];

pub const PERIOD_COUNT: usize = YEAR_PERIODS.len() - 1;

/// Index of the colour period a year falls in. Years before the first
/// boundary and missing years use period 0.
pub fn period_index(year: Option<i32>) -> usize {
    let Some(year) = year else {
        return 0;
    };

    (0..PERIOD_COUNT)
        .rev()
        .find(|&index| year >= YEAR_PERIODS[index].1)
        .unwrap_or(0)
}

/// Words without a year stay visible at every cutoff.
pub fn visible_at_cutoff(year: Option<i32>, cutoff_index: usize) -> bool {
    let cutoff_index = cutoff_index.min(YEAR_PERIODS.len() - 1);
    match year {
        Some(year) => year <= YEAR_PERIODS[cutoff_index].1,
        None => true,
    }
}
