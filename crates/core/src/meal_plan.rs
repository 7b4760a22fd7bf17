//! Calendar-week math and the meal plan grid.
//!
//! A meal plan page always shows one ISO week (Monday to Sunday). The week is
//! addressed by a key of the form `YYYY-Www` (ISO week-numbering year and
//! week), the same format browsers emit for `<input type="week">`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of days past a week boundary used to land inside the adjacent week.
const NEIGHBOUR_SHIFT_DAYS: u64 = 3;

/// Days from Monday to Sunday of the same week.
const WEEK_SPAN_DAYS: u64 = 6;

// ---------------------------------------------------------------------------
// Meal types
// ---------------------------------------------------------------------------

/// Category a plan entry is grouped under. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Other,
}

impl MealType {
    pub const ALL: &'static [MealType] = &[
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Other => "other",
        }
    }

    /// Human-readable label shown as the row heading.
    pub fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MealType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown meal type '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Week keys
// ---------------------------------------------------------------------------

/// An ISO week identifier such as `2024-W10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekKey {
    year: i32,
    week: u32,
}

impl WeekKey {
    /// Build a key, rejecting weeks that do not exist in `year`
    /// (e.g. week 53 of a 52-week year).
    pub fn new(year: i32, week: u32) -> Result<Self, CoreError> {
        if NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).is_none() {
            return Err(CoreError::Validation(format!(
                "Week {week} does not exist in year {year}"
            )));
        }
        Ok(Self { year, week })
    }

    /// The ISO week containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn week(self) -> u32 {
        self.week
    }

    /// Monday of this week.
    pub fn monday(self) -> NaiveDate {
        // Construction guarantees the week exists.
        NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon)
            .unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

impl FromStr for WeekKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::Validation(format!("Invalid week '{s}'. Expected YYYY-Www"));

        let (year, week) = s.trim().split_once('-').ok_or_else(invalid)?;
        let week = week
            .strip_prefix('W')
            .or_else(|| week.strip_prefix('w'))
            .ok_or_else(invalid)?;

        if year.len() != 4 || week.is_empty() || week.len() > 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let week: u32 = week.parse().map_err(|_| invalid())?;

        WeekKey::new(year, week)
    }
}

impl Serialize for WeekKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Week ranges
// ---------------------------------------------------------------------------

/// The concrete Monday-to-Sunday span of a week plus its neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekRange {
    pub key: WeekKey,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub next: WeekKey,
    pub prev: WeekKey,
}

impl WeekRange {
    pub fn resolve(key: WeekKey) -> Self {
        let first_day = key.monday();
        let last_day = first_day + Days::new(WEEK_SPAN_DAYS);

        let next = WeekKey::containing(last_day + Days::new(NEIGHBOUR_SHIFT_DAYS));
        let prev = WeekKey::containing(first_day - Days::new(NEIGHBOUR_SHIFT_DAYS));

        Self {
            key,
            first_day,
            last_day,
            next,
            prev,
        }
    }

    /// Every day from `first_day` to `last_day`, inclusive.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.first_day
            .iter_days()
            .take_while(|d| *d <= self.last_day)
            .collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Entries planned for a single day within one meal-type row.
#[derive(Debug, Clone, Serialize)]
pub struct DayCell<T> {
    pub date: NaiveDate,
    pub entries: Vec<T>,
}

/// One meal-type row of the grid.
#[derive(Debug, Clone, Serialize)]
pub struct MealRow<T> {
    pub meal_type: MealType,
    pub type_name: &'static str,
    pub days: Vec<DayCell<T>>,
}

/// Meal type → day → entries for a single week.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct MealPlanGrid<T> {
    rows: Vec<MealRow<T>>,
}

impl<T> MealPlanGrid<T> {
    /// An empty grid with a row per meal type and a cell per day.
    pub fn new(range: &WeekRange) -> Self {
        let days = range.days();
        let rows = MealType::ALL
            .iter()
            .map(|&meal_type| MealRow {
                meal_type,
                type_name: meal_type.label(),
                days: days
                    .iter()
                    .map(|&date| DayCell {
                        date,
                        entries: Vec::new(),
                    })
                    .collect(),
            })
            .collect();
        Self { rows }
    }

    /// Place an entry in its cell. Returns `false` (and drops the entry) if
    /// `date` lies outside the grid's week.
    pub fn insert(&mut self, meal_type: MealType, date: NaiveDate, entry: T) -> bool {
        let cell = self
            .rows
            .iter_mut()
            .find(|row| row.meal_type == meal_type)
            .and_then(|row| row.days.iter_mut().find(|cell| cell.date == date));

        match cell {
            Some(cell) => {
                cell.entries.push(entry);
                true
            }
            None => false,
        }
    }

    pub fn rows(&self) -> &[MealRow<T>] {
        &self.rows
    }

    /// Total number of entries across all cells.
    pub fn len(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.days.iter())
            .map(|cell| cell.entries.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sort plan entries by meal type display order, keeping the relative order
/// of entries that share a meal type.
pub fn order_by_meal_type<T>(entries: &mut [T], meal_type: impl Fn(&T) -> MealType) {
    entries.sort_by_key(|e| meal_type(e));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
