use crate::config::DF;

/// Index of the hovered element in the current view, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    index: Option<usize>,
}

impl HoverState {
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Returns true when the hovered index changed.
    pub fn set(&mut self, index: Option<usize>) -> bool {
        if self.index == index {
            return false;
        }
        #[cfg(debug_assertions)]
        if DF.log_hover {
            log::info!("HOVER: {:?} -> {:?}", self.index, index);
        }
        self.index = index;
        true
    }

    pub fn clear(&mut self) {
        self.set(None);
    }

    /// Drop a hover that points past the end of a shrunk collection.
    pub fn retain_within(&mut self, len: usize) {
        if self.index.is_some_and(|i| i >= len) {
            self.clear();
        }
    }
}

/// Nearest point to `target` after scaling each axis by the given extents, within `max_dist`
/// (in the same scaled units).
pub fn nearest_point(
    points: impl IntoIterator<Item = [f64; 2]>,
    target: [f64; 2],
    scale: [f64; 2],
    max_dist: f64,
) -> Option<usize> {
    let sx = if scale[0] > 0.0 { scale[0] } else { 1.0 };
    let sy = if scale[1] > 0.0 { scale[1] } else { 1.0 };
    points
        .into_iter()
        .enumerate()
        .map(|(i, [x, y])| {
            let dx = (x - target[0]) / sx;
            let dy = (y - target[1]) / sy;
            (i, dx * dx + dy * dy)
        })
        .filter(|(_, d2)| *d2 <= max_dist * max_dist)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Category slot under an x coordinate for plots that place item `i` at `x = i`.
pub fn category_at(x: f64, count: usize) -> Option<usize> {
    let slot = x.round();
    if slot < 0.0 || slot >= count as f64 {
        return None;
    }
    Some(slot as usize)
}
