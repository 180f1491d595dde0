use {
    serde::{Deserialize, Serialize},
    strum_macros::Display,
};

use crate::config::{ANALYSIS, DF};

/// Where a fresh selector lands once the series length is first known.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum DefaultRange {
    #[default]
    Full,
    Trailing365,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DragHandle {
    Start,
    End,
}

/// Inclusive index range into the view's series.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    pub fn span(&self) -> usize {
        self.end - self.start
    }

    pub fn day_count(&self) -> usize {
        self.span() + 1
    }
}

/// Two-handle window over a date-indexed series.
///
/// Once initialized, `0 <= start <= end <= len - 1` and `end - start >= min_window`, where the
/// minimum shrinks to `len - 1` for series too short to hold it.
#[derive(Debug, Clone)]
pub struct RangeSelector {
    policy: DefaultRange,
    min_window: usize,
    len: usize,
    range: Option<SelectionRange>,
    dragging: Option<DragHandle>,
}

impl RangeSelector {
    pub fn new(policy: DefaultRange) -> Self {
        Self::with_min_window(policy, ANALYSIS.range.min_window)
    }

    pub fn with_min_window(policy: DefaultRange, min_window: usize) -> Self {
        Self {
            policy,
            min_window,
            len: 0,
            range: None,
            dragging: None,
        }
    }

    pub fn policy(&self) -> DefaultRange {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_initialized(&self) -> bool {
        self.range.is_some()
    }

    pub fn range(&self) -> Option<SelectionRange> {
        self.range
    }

    pub fn dragging(&self) -> Option<DragHandle> {
        self.dragging
    }

    /// Minimum handle gap for the current series length.
    pub fn effective_min_window(&self) -> usize {
        self.min_window.min(self.len.saturating_sub(1))
    }

    fn default_range(&self) -> SelectionRange {
        let last = self.len.saturating_sub(1);
        let start = match self.policy {
            DefaultRange::Full => 0,
            DefaultRange::Trailing365 => self.len.saturating_sub(ANALYSIS.range.trailing_window),
        };
        SelectionRange {
            start: start.min(last.saturating_sub(self.effective_min_window())),
            end: last,
        }
    }

    /// Tell the selector how long the series is. The first non-empty length initializes the
    /// range from the default policy; later lengths clamp the existing range without resetting it.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            return;
        }

        let next = match self.range {
            None => self.default_range(),
            Some(current) => {
                let gap = self.effective_min_window();
                let mut end = current.end.min(len - 1);
                let mut start = current.start.min(end.saturating_sub(gap));
                // A series that grew can raise the minimum past the old gap
                if end - start < gap {
                    end = (start + gap).min(len - 1);
                    start = start.min(end - gap);
                }
                SelectionRange { start, end }
            }
        };

        #[cfg(debug_assertions)]
        if DF.log_range_selector && self.range != Some(next) {
            log::info!("RANGE: len={} {:?} -> {:?}", len, self.range, next);
        }

        self.range = Some(next);
    }

    /// Index under a fractional track position; `fraction` is clamped to [0, 1].
    pub fn index_at_fraction(&self, fraction: f64) -> usize {
        let idx = (fraction.clamp(0.0, 1.0) * self.len as f64).floor() as usize;
        idx.min(self.len.saturating_sub(1))
    }

    pub fn begin_drag(&mut self, handle: DragHandle) {
        if self.range.is_some() {
            self.dragging = Some(handle);
        }
    }

    pub fn end_drag(&mut self) {
        self.dragging = None;
    }

    /// Moves the handle being dragged. Returns true when the range changed.
    pub fn drag_to_fraction(&mut self, fraction: f64) -> bool {
        match self.dragging {
            Some(handle) => self.move_handle(handle, self.index_at_fraction(fraction)),
            None => false,
        }
    }

    /// Start: `min(index, end - gap)`. End: `min(len - 1, max(index, start + gap))`.
    pub fn move_handle(&mut self, handle: DragHandle, index: usize) -> bool {
        let Some(current) = self.range else {
            return false;
        };
        let gap = self.effective_min_window();
        let last = self.len.saturating_sub(1);

        let next = match handle {
            DragHandle::Start => SelectionRange {
                start: index.min(current.end.saturating_sub(gap)),
                end: current.end,
            },
            DragHandle::End => SelectionRange {
                start: current.start,
                end: index.max(current.start + gap).min(last),
            },
        };

        if next == current {
            return false;
        }

        #[cfg(debug_assertions)]
        if DF.log_range_selector {
            log::info!("RANGE: drag {} to {} -> {:?}", handle, index, next);
        }

        self.range = Some(next);
        true
    }

    /// Track position of an index, in percent; the denominator is `max(len - 1, 1)`.
    pub fn position_pct(&self, index: usize) -> f64 {
        index as f64 / self.len.saturating_sub(1).max(1) as f64 * 100.0
    }

    /// The windowed sub-slice. Before initialization this is the default window.
    pub fn window<'a, T>(&self, series: &'a [T]) -> &'a [T] {
        if series.is_empty() {
            return series;
        }
        let range = match self.range {
            Some(range) if self.len == series.len() => range,
            _ => {
                let mut fresh = self.clone();
                fresh.len = series.len();
                fresh.range = None;
                fresh.default_range()
            }
        };
        let end = range.end.min(series.len() - 1);
        &series[range.start.min(end)..=end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(policy: DefaultRange, len: usize) -> RangeSelector {
        let mut s = RangeSelector::new(policy);
        s.set_len(len);
        s
    }

    #[test]
    fn uninitialized_until_length_known() {
        let mut s = RangeSelector::new(DefaultRange::Full);
        assert!(!s.is_initialized());
        s.set_len(0);
        assert!(!s.is_initialized());
        s.set_len(10);
        assert_eq!(s.range(), Some(SelectionRange { start: 0, end: 9 }));
    }

    #[test]
    fn trailing_default() {
        let s = selector(DefaultRange::Trailing365, 500);
        assert_eq!(s.range(), Some(SelectionRange { start: 135, end: 499 }));

        let short = selector(DefaultRange::Trailing365, 200);
        assert_eq!(short.range(), Some(SelectionRange { start: 0, end: 199 }));
    }

    #[test]
    fn end_drag_respects_min_window() {
        let mut s = selector(DefaultRange::Full, 500);
        s.begin_drag(DragHandle::End);
        assert!(s.drag_to_fraction(10.0 / 500.0));
        assert_eq!(s.range(), Some(SelectionRange { start: 0, end: 30 }));
    }

    #[test]
    fn start_drag_cannot_cross_end() {
        let mut s = selector(DefaultRange::Full, 500);
        s.begin_drag(DragHandle::Start);
        s.drag_to_fraction(1.0);
        assert_eq!(s.range(), Some(SelectionRange { start: 469, end: 499 }));
    }

    #[test]
    fn fraction_outside_track_is_clamped() {
        let mut s = selector(DefaultRange::Full, 100);
        s.begin_drag(DragHandle::End);
        s.drag_to_fraction(1.7);
        assert_eq!(s.range().unwrap().end, 99);
        s.end_drag();
        s.begin_drag(DragHandle::Start);
        s.drag_to_fraction(-0.5);
        assert_eq!(s.range().unwrap().start, 0);
    }

    #[test]
    fn drag_without_handle_is_noop() {
        let mut s = selector(DefaultRange::Full, 100);
        assert!(!s.drag_to_fraction(0.5));
        s.begin_drag(DragHandle::Start);
        s.end_drag();
        assert!(!s.drag_to_fraction(0.5));
        assert_eq!(s.range(), Some(SelectionRange { start: 0, end: 99 }));
    }

    #[test]
    fn short_series_shrinks_gap() {
        let s = selector(DefaultRange::Full, 10);
        assert_eq!(s.effective_min_window(), 9);
        assert_eq!(s.range(), Some(SelectionRange { start: 0, end: 9 }));

        let one = selector(DefaultRange::Trailing365, 1);
        assert_eq!(one.range(), Some(SelectionRange { start: 0, end: 0 }));
    }

    #[test]
    fn new_length_clamps_instead_of_resetting() {
        let mut s = selector(DefaultRange::Full, 500);
        s.move_handle(DragHandle::Start, 100);
        s.move_handle(DragHandle::End, 400);

        s.set_len(600);
        assert_eq!(s.range(), Some(SelectionRange { start: 100, end: 400 }));

        s.set_len(300);
        assert_eq!(s.range(), Some(SelectionRange { start: 100, end: 299 }));

        s.set_len(110);
        assert_eq!(s.range(), Some(SelectionRange { start: 79, end: 109 }));
    }

    #[test]
    fn growing_series_widens_short_range() {
        let mut s = selector(DefaultRange::Full, 10);
        assert_eq!(s.range(), Some(SelectionRange { start: 0, end: 9 }));

        s.set_len(500);
        assert_eq!(s.effective_min_window(), 30);
        assert_eq!(s.range(), Some(SelectionRange { start: 0, end: 30 }));
    }

    #[test]
    fn relength_up_then_down_keeps_min_gap() {
        let mut s = selector(DefaultRange::Full, 20);
        s.move_handle(DragHandle::Start, 19);
        assert_eq!(s.range(), Some(SelectionRange { start: 0, end: 19 }));

        s.set_len(40);
        assert_eq!(s.range(), Some(SelectionRange { start: 0, end: 30 }));

        s.move_handle(DragHandle::End, 39);
        s.move_handle(DragHandle::Start, 9);
        assert_eq!(s.range(), Some(SelectionRange { start: 9, end: 39 }));
        s.set_len(35);
        assert_eq!(s.range(), Some(SelectionRange { start: 4, end: 34 }));
    }

    #[test]
    fn percent_positions() {
        let s = selector(DefaultRange::Full, 101);
        assert_eq!(s.position_pct(50), 50.0);
        let single = selector(DefaultRange::Full, 1);
        assert_eq!(single.position_pct(0), 0.0);
    }

    #[test]
    fn window_slices_inclusive() {
        let data: Vec<usize> = (0..500).collect();
        let mut s = selector(DefaultRange::Full, 500);
        s.move_handle(DragHandle::Start, 10);
        s.move_handle(DragHandle::End, 50);
        let w = s.window(&data);
        assert_eq!(w.first(), Some(&10));
        assert_eq!(w.last(), Some(&50));
        assert_eq!(w.len(), 41);
    }

    #[test]
    fn window_before_init_uses_default() {
        let data: Vec<usize> = (0..400).collect();
        let s = RangeSelector::new(DefaultRange::Trailing365);
        assert_eq!(s.window(&data).len(), 365);
        assert!(s.window::<usize>(&[]).is_empty());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn handle() -> impl Strategy<Value = DragHandle> {
            prop_oneof![Just(DragHandle::Start), Just(DragHandle::End)]
        }

        proptest! {
            #[test]
            fn drags_keep_range_ordered_and_wide(
                len in 1usize..800,
                drags in prop::collection::vec((handle(), -0.5..1.5f64), 0..40),
            ) {
                let mut s = selector(DefaultRange::Trailing365, len);
                for (h, frac) in drags {
                    s.begin_drag(h);
                    s.drag_to_fraction(frac);
                    s.end_drag();

                    let r = s.range().unwrap();
                    prop_assert!(r.start <= r.end);
                    prop_assert!(r.end < len);
                    prop_assert!(r.end - r.start >= s.effective_min_window());
                }
            }

            #[test]
            fn relength_preserves_invariants(
                first in 1usize..600,
                second in 1usize..600,
                at in 0.0..1.0f64,
            ) {
                let mut s = selector(DefaultRange::Full, first);
                s.begin_drag(DragHandle::Start);
                s.drag_to_fraction(at);
                s.set_len(second);

                let r = s.range().unwrap();
                prop_assert!(r.end < second);
                prop_assert!(r.end - r.start >= s.effective_min_window());
            }

            #[test]
            fn relength_sequences_keep_invariants(
                lens in prop::collection::vec(1usize..600, 1..8),
            ) {
                let mut s = RangeSelector::new(DefaultRange::Trailing365);
                for len in lens {
                    s.set_len(len);
                    let r = s.range().unwrap();
                    prop_assert!(r.start <= r.end);
                    prop_assert!(r.end < len);
                    prop_assert!(r.end - r.start >= s.effective_min_window());
                }
            }
        }
    }
}
