//! Stroke eraser.
//!
//! Removes every element whose stroked outline passes within the eraser
//! radius. Each element is removed at most once per eraser stroke.

use crate::shapes::{Element, ElementId};
use kurbo::Point;
use std::collections::HashSet;

/// Eraser state for one continuous stroke.
#[derive(Debug, Clone, Default)]
pub struct Eraser {
    erased: HashSet<ElementId>,
}

impl Eraser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget elements erased by the previous stroke.
    pub fn begin_stroke(&mut self) {
        self.erased.clear();
    }

    /// Remove every element hit at `point` and return how many were removed.
    ///
    /// The radius is `stroke_width * radius_factor`; each element widens it by
    /// half its own stroke width.
    pub fn erase_at(
        &mut self,
        elements: &mut Vec<Element>,
        point: Point,
        stroke_width: f64,
        radius_factor: f64,
    ) -> usize {
        let radius = stroke_width * radius_factor;
        let before = elements.len();
        let erased = &mut self.erased;

        elements.retain(|element| {
            if erased.contains(element.id()) || !element.hit_test(point, radius) {
                return true;
            }
            log::debug!("Erased {} element {}", element.kind(), element.id());
            erased.insert(element.id().clone());
            false
        });

        before - elements.len()
    }

    /// Number of elements removed during the current stroke.
    pub fn erased_count(&self) -> usize {
        self.erased.len()
    }

    /// Finish the stroke, returning whether anything was removed.
    pub fn end_stroke(&mut self) -> bool {
        let changed = !self.erased.is_empty();
        self.erased.clear();
        changed
    }
}
