use chrono::Weekday;

/// Number of columns in every grid.
pub const DAYS_PER_WEEK: usize = 7;

/// Canonical column order of the week view.
pub const WEEK: [Weekday; DAYS_PER_WEEK] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Display labels for the seven columns, Monday first.
///
/// The provider numbers days 1 (Monday) through 7 (Sunday). Any other code
/// is unrecognized and the sample carrying it is left out of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTable {
    labels: [String; DAYS_PER_WEEK],
}

impl DayTable {
    pub fn new(labels: [String; DAYS_PER_WEEK]) -> Self {
        Self { labels }
    }

    /// Short Russian labels, `Пн` .. `Вс`.
    pub fn russian() -> Self {
        Self::from_strs(["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"])
    }

    /// Short English labels, `Mon` .. `Sun`.
    pub fn english() -> Self {
        Self::from_strs(["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"])
    }

    fn from_strs(labels: [&str; DAYS_PER_WEEK]) -> Self {
        Self::new(labels.map(str::to_string))
    }

    /// Maps a provider day code to its weekday, or `None` when the code is
    /// outside 1..=7.
    pub fn normalize(&self, code: i64) -> Option<Weekday> {
        if !(1..=DAYS_PER_WEEK as i64).contains(&code) {
            return None;
        }
        WEEK.get((code - 1) as usize).copied()
    }

    /// Column index of a weekday, 0 for Monday.
    pub fn column(&self, day: Weekday) -> usize {
        day.num_days_from_monday() as usize
    }

    pub fn label(&self, day: Weekday) -> &str {
        &self.labels[self.column(day)]
    }

    /// Labels in column order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl Default for DayTable {
    fn default() -> Self {
        Self::russian()
    }
}
