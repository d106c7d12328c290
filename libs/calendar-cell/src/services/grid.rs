use chrono::Datelike;

use crate::models::{CalendarView, GridCell};

pub fn days_in_month(view: CalendarView) -> u32 {
    let first = view.first_day();
    let next = view.next().first_day();
    if next <= first {
        // Only reachable on the last representable month.
        return 31;
    }
    next.signed_duration_since(first).num_days() as u32
}

/// Zero-based weekday of the 1st, Sunday = 0.
pub fn first_weekday(view: CalendarView) -> u32 {
    view.first_day().weekday().num_days_from_sunday()
}

/// Month laid out in weeks of seven cells, Sunday first. Leading blanks
/// align day 1 under its weekday; trailing blanks complete the last week.
pub fn month_grid(view: CalendarView) -> Vec<GridCell> {
    let pad_start = first_weekday(view) as usize;
    let total_days = days_in_month(view);

    let mut cells = Vec::with_capacity(42);
    cells.extend(std::iter::repeat(GridCell::Blank).take(pad_start));
    cells.extend((1..=total_days).map(GridCell::Day));
    while cells.len() % 7 != 0 {
        cells.push(GridCell::Blank);
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(year: i32, month: u32) -> CalendarView {
        CalendarView::new(year, month).unwrap()
    }

    #[test]
    fn january_2025_starts_on_wednesday() {
        let grid = month_grid(view(2025, 0));

        assert_eq!(first_weekday(view(2025, 0)), 3);
        assert_eq!(grid.len(), 35);
        assert_eq!(&grid[..3], &[GridCell::Blank; 3]);
        assert_eq!(grid[3], GridCell::Day(1));
        assert_eq!(grid[33], GridCell::Day(31));
        assert_eq!(grid[34], GridCell::Blank);
    }

    #[test]
    fn february_lengths() {
        assert_eq!(days_in_month(view(2024, 1)), 29);
        assert_eq!(days_in_month(view(2025, 1)), 28);
        assert_eq!(days_in_month(view(1900, 1)), 28);
        assert_eq!(days_in_month(view(2000, 1)), 29);
    }

    #[test]
    fn december_uses_next_year_for_length() {
        assert_eq!(days_in_month(view(2024, 11)), 31);
    }

    #[test]
    fn month_starting_on_sunday_has_no_leading_blanks() {
        // 1 June 2025 is a Sunday.
        let grid = month_grid(view(2025, 5));
        assert_eq!(grid[0], GridCell::Day(1));
        assert_eq!(grid.len(), 35);
    }

    #[test]
    fn six_week_month() {
        // 1 March 2025 is a Saturday, 31 days -> 6 + 31 = 37 -> 42 cells.
        let grid = month_grid(view(2025, 2));
        assert_eq!(grid.len(), 42);
        assert_eq!(grid[6], GridCell::Day(1));
    }

    #[test]
    fn four_week_february() {
        // February 2015 starts on Sunday and has 28 days.
        assert_eq!(month_grid(view(2015, 1)).len(), 28);
    }
}
