//! Circular slide index, independent of the DOM.

/// Navigation step requested by a control or key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub const fn step(self) -> isize {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }

    /// Maps a signed delta from JS onto a direction; zero means "stay".
    pub fn from_delta(delta: i32) -> Option<Self> {
        match delta.signum() {
            -1 => Some(Self::Previous),
            1 => Some(Self::Next),
            _ => None,
        }
    }

    /// `KeyboardEvent.key` values that navigate.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::Previous),
            "ArrowRight" => Some(Self::Next),
            _ => None,
        }
    }
}

/// Index of the active slide among `count` slides.
///
/// With `count == 0` every navigation is a no-op and no slide is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideState {
    index: usize,
    count: usize,
}

impl SlideState {
    pub fn new(count: usize) -> Self {
        Self { index: 0, count }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn advance(&mut self, direction: Direction) -> usize {
        self.go_to(self.index as isize + direction.step())
    }

    /// Jumps to `index`, wrapping out-of-range values in both directions.
    pub fn go_to(&mut self, index: isize) -> usize {
        if self.count > 0 {
            self.index = index.rem_euclid(self.count as isize) as usize;
        }
        self.index
    }

    pub fn is_active(&self, slide: usize) -> bool {
        self.count > 0 && slide == self.index
    }

    /// Active flag for every slide, in order.
    pub fn flags(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.count).map(move |slide| self.is_active(slide))
    }
}
