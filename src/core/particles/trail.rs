use glam::DVec2;
use std::collections::VecDeque;

/// Bounded history of recent positions, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trail {
    points: VecDeque<DVec2>,
    cap: usize,
}

impl Trail {
    pub fn new(cap: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Append the newest point, evicting the oldest once over the cap
    pub fn push(&mut self, point: DVec2) {
        if self.cap == 0 {
            return;
        }
        self.points.push_back(point);
        while self.points.len() > self.cap {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn newest(&self) -> Option<DVec2> {
        self.points.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DVec2> {
        self.points.iter()
    }

    /// Consecutive point pairs, oldest segment first
    pub fn segments(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .map(|(a, b)| (*a, *b))
    }
}
