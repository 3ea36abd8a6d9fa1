//! Pagination metrics and wheel normalization.

use crate::state::EngineState;
use crate::util::range;

/// Pagination numbers derived from a state snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Zero-based index of the visible page.
    pub current_page: usize,
    /// Pages in the filtered set; 0 while the filtered count is unknown.
    pub page_count: usize,
    pub start: usize,
    pub length: usize,
    /// One-based index of the first visible row (0 when nothing is visible).
    pub display_start: usize,
    /// One-based index of the last visible row.
    pub display_end: usize,
    pub records_total: Option<usize>,
    pub records_filtered: Option<usize>,
}

impl PageInfo {
    pub fn from_state(state: &EngineState) -> Self {
        let shown = state.data.len();
        let display_start = if shown == 0 { 0 } else { state.start + 1 };
        Self {
            current_page: state.current_page(),
            page_count: state.page_count(),
            start: state.start,
            length: state.length,
            display_start,
            display_end: state.start + shown,
            records_total: state.records_total,
            records_filtered: state.records_filtered,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.page_count
    }

    /// Whether a search currently hides some records.
    pub fn is_filtered(&self) -> bool {
        matches!(
            (self.records_filtered, self.records_total),
            (Some(filtered), Some(total)) if filtered < total
        )
    }
}

/// An entry of the numbered pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    Page(usize),
    Ellipsis,
}

/// Numbered buttons for `page_count` pages around `current`.
///
/// At most `max_buttons` entries are produced. The first and last pages are
/// always reachable; gaps are shown as ellipses.
///
/// ```
/// use datagrid::{PageButton::*, page_buttons};
///
/// assert_eq!(
///     page_buttons(5, 10, 7),
///     vec![Page(0), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(9)],
/// );
/// ```
pub fn page_buttons(current: usize, page_count: usize, max_buttons: usize) -> Vec<PageButton> {
    let max_buttons = max_buttons.max(5);
    if page_count <= max_buttons {
        return range(0, page_count).into_iter().map(PageButton::Page).collect();
    }

    let half = max_buttons / 2;
    let last = page_count - 1;
    let mut buttons = Vec::with_capacity(max_buttons);

    if current <= half {
        buttons.extend(range(0, max_buttons - 2).into_iter().map(PageButton::Page));
        buttons.push(PageButton::Ellipsis);
        buttons.push(PageButton::Page(last));
    } else if current >= last - half {
        buttons.push(PageButton::Page(0));
        buttons.push(PageButton::Ellipsis);
        buttons.extend(
            range(page_count - (max_buttons - 2), page_count)
                .into_iter()
                .map(PageButton::Page),
        );
    } else {
        let side = (max_buttons - 5) / 2;
        buttons.push(PageButton::Page(0));
        buttons.push(PageButton::Ellipsis);
        buttons.extend(
            range(current - side, current + side + 1)
                .into_iter()
                .map(PageButton::Page),
        );
        buttons.push(PageButton::Ellipsis);
        buttons.push(PageButton::Page(last));
    }
    buttons
}

/// Largest multiple of `length` not above `start`.
pub fn align_start(start: usize, length: usize) -> usize {
    let length = length.max(1);
    (start / length) * length
}

/// Unit of a wheel delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDeltaMode {
    Pixel,
    Line,
    Page,
}

/// Pixels that make up one wheel tick.
const PIXELS_PER_TICK: f64 = 100.0;
/// Lines that make up one wheel tick.
const LINES_PER_TICK: f64 = 3.0;

/// Convert a raw wheel delta into ticks (positive = towards later pages).
pub fn wheel_ticks(delta: f64, mode: WheelDeltaMode) -> f64 {
    match mode {
        WheelDeltaMode::Pixel => delta / PIXELS_PER_TICK,
        WheelDeltaMode::Line => delta / LINES_PER_TICK,
        WheelDeltaMode::Page => delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageButton::*;

    #[test]
    fn test_page_math() {
        let mut state = EngineState::new(10);
        state.records_filtered = Some(57);
        state.start = 50;
        let info = PageInfo::from_state(&state);
        assert_eq!(info.page_count, 6);
        assert_eq!(info.current_page, 5);
        assert!(!info.has_next());
        assert!(info.has_previous());
    }

    #[test]
    fn test_unknown_filtered_count_has_no_pages() {
        let state = EngineState::new(10);
        assert_eq!(PageInfo::from_state(&state).page_count, 0);
    }

    #[test]
    fn test_display_range() {
        let mut state = EngineState::new(10);
        state.start = 20;
        state.data = vec![serde_json::json!([]); 5];
        let info = PageInfo::from_state(&state);
        assert_eq!((info.display_start, info.display_end), (21, 25));
    }

    #[test]
    fn test_page_buttons_small_count_lists_all() {
        assert_eq!(page_buttons(1, 3, 7), vec![Page(0), Page(1), Page(2)]);
        assert!(page_buttons(0, 0, 7).is_empty());
    }

    #[test]
    fn test_page_buttons_edges() {
        assert_eq!(
            page_buttons(0, 20, 7),
            vec![Page(0), Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(19)]
        );
        assert_eq!(
            page_buttons(19, 20, 7),
            vec![Page(0), Ellipsis, Page(15), Page(16), Page(17), Page(18), Page(19)]
        );
    }

    #[test]
    fn test_align_start() {
        assert_eq!(align_start(37, 10), 30);
        assert_eq!(align_start(37, 25), 25);
        assert_eq!(align_start(5, 0), 5);
    }

    #[test]
    fn test_wheel_ticks() {
        assert_eq!(wheel_ticks(100.0, WheelDeltaMode::Pixel), 1.0);
        assert_eq!(wheel_ticks(-3.0, WheelDeltaMode::Line), -1.0);
        assert_eq!(wheel_ticks(1.0, WheelDeltaMode::Page), 1.0);
    }
}
