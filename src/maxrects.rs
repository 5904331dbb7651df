use crate::geometry::{clip, contains, subtract};
use crate::score::{Heuristic, Score, score_fit};
use crate::types::{FreeRect, Rect};

const EDGE_EPSILON: f64 = 1e-6;

/// Placement of an input piece, referenced by its index in the solver's
/// piece list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub piece: usize,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub rotated: bool,
}

/// One sheet under construction. `free_rects` always holds every maximal
/// empty rectangle and none contained in another.
#[derive(Debug, Clone)]
pub struct MaxRectsBin {
    stock: Rect,
    kerf: f64,
    used_area: f64,
    pub free_rects: Vec<FreeRect>,
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub free_idx: usize,
    pub rotated: bool,
    pub score: Score,
}

impl MaxRectsBin {
    pub fn new(stock: Rect, kerf: f64) -> Self {
        Self {
            stock,
            kerf,
            used_area: 0.0,
            free_rects: vec![FreeRect::new(0.0, 0.0, stock.w, stock.h)],
            placements: Vec::new(),
        }
    }

    /// Sum of placed piece areas, kerf excluded.
    pub fn used_area(&self) -> f64 {
        self.used_area
    }

    /// Room a piece may occupy inside `free`. A free rectangle that stops
    /// short of the sheet edge borders another footprint there, so the
    /// piece's trailing kerf has to fit inside it too.
    fn usable(&self, free: &FreeRect) -> FreeRect {
        let w = if free.right() >= self.stock.w - EDGE_EPSILON {
            free.w
        } else {
            free.w - self.kerf
        };
        let h = if free.bottom() >= self.stock.h - EDGE_EPSILON {
            free.h
        } else {
            free.h - self.kerf
        };
        FreeRect::new(free.x, free.y, w, h)
    }

    /// Best free rectangle and orientation for a `piece` under `heuristic`.
    /// Both orientations are scored against every free rectangle.
    pub fn find_best(&self, piece: Rect, heuristic: Heuristic) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        let orientations: &[bool] = if piece.w != piece.h {
            &[false, true]
        } else {
            &[false]
        };

        for (idx, free) in self.free_rects.iter().enumerate() {
            let room = self.usable(free);
            for &rotated in orientations {
                let oriented = if rotated { piece.rotated() } else { piece };
                let score = score_fit(&room, oriented.w, oriented.h, heuristic, self.stock.w);
                let Some(score) = score else {
                    continue;
                };
                if best.is_none_or(|b| score < b.score) {
                    best = Some(Candidate {
                        free_idx: idx,
                        rotated,
                        score,
                    });
                }
            }
        }

        best
    }

    pub fn place(&mut self, candidate: Candidate, piece_idx: usize, piece: Rect) -> Placement {
        let free = self.free_rects[candidate.free_idx];
        let placed = if candidate.rotated {
            piece.rotated()
        } else {
            piece
        };

        let placement = Placement {
            piece: piece_idx,
            x: free.x,
            y: free.y,
            w: placed.w,
            h: placed.h,
            rotated: candidate.rotated,
        };

        self.insert_placement(free.x, free.y, placed.w, placed.h);
        self.used_area += placed.area();
        self.placements.push(placement);
        placement
    }

    /// Consumes `[x, x+w+kerf) x [y, y+h+kerf)`, clipped to the sheet, from
    /// every free rectangle it touches, then prunes contained rectangles.
    pub fn insert_placement(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let used = clip(
            &FreeRect::new(x, y, w + self.kerf, h + self.kerf),
            self.stock,
        );

        let mut next = Vec::with_capacity(self.free_rects.len() + 4);
        for free in &self.free_rects {
            match subtract(free, &used) {
                Some(parts) => next.extend(parts),
                None => next.push(*free),
            }
        }
        self.free_rects = next;
        self.prune();
    }

    /// Drops every free rectangle contained in another. Of two identical
    /// rectangles only the first is kept.
    fn prune(&mut self) {
        let mut i = 0;
        while i < self.free_rects.len() {
            let mut j = i + 1;
            let mut removed_i = false;
            while j < self.free_rects.len() {
                if contains(&self.free_rects[j], &self.free_rects[i])
                    && self.free_rects[i] != self.free_rects[j]
                {
                    self.free_rects.remove(i);
                    removed_i = true;
                    break;
                }
                if contains(&self.free_rects[i], &self.free_rects[j]) {
                    self.free_rects.remove(j);
                } else {
                    j += 1;
                }
            }
            if !removed_i {
                i += 1;
            }
        }
    }
}
