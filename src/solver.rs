use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::maxrects::{Candidate, MaxRectsBin};
use crate::score::Heuristic;
use crate::suggest::suggest;
use crate::types::{PackingResult, Piece, PlacedPiece, Rect, Sheet, Unplaced, UnplacedReason};

/// Orders in which pieces are fed to the strategy runner. Sorts are stable,
/// so ties keep input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Area descending, longest side breaks ties.
    AreaDesc,
    PerimeterDesc,
    LongSideDesc,
    /// Longest side descending, shortest side breaks ties.
    LongThenShortSideDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::AreaDesc,
        SortOrder::PerimeterDesc,
        SortOrder::LongSideDesc,
        SortOrder::LongThenShortSideDesc,
    ];

    /// Indices into `pieces`, highest priority first.
    pub fn sort(&self, pieces: &[Piece]) -> Vec<usize> {
        let long = |p: &Piece| p.width.max(p.height);
        let short = |p: &Piece| p.width.min(p.height);

        let mut order: Vec<usize> = (0..pieces.len()).collect();
        order.sort_by(|&a, &b| {
            let (a, b) = (&pieces[a], &pieces[b]);
            match self {
                SortOrder::AreaDesc => b
                    .area()
                    .total_cmp(&a.area())
                    .then_with(|| long(b).total_cmp(&long(a))),
                SortOrder::PerimeterDesc => {
                    (b.width + b.height).total_cmp(&(a.width + a.height))
                }
                SortOrder::LongSideDesc => long(b).total_cmp(&long(a)),
                SortOrder::LongThenShortSideDesc => long(b)
                    .total_cmp(&long(a))
                    .then_with(|| short(b).total_cmp(&short(a))),
            }
        });
        order
    }
}

/// Outcome of one full packing run.
#[derive(Debug, Clone)]
struct Attempt {
    order: SortOrder,
    heuristic: Heuristic,
    bins: Vec<MaxRectsBin>,
    unplaced: Vec<(usize, UnplacedReason)>,
}

impl Attempt {
    fn used_area(&self) -> f64 {
        self.bins.iter().map(MaxRectsBin::used_area).sum()
    }

    fn waste_ratio(&self, stock_area: f64) -> f64 {
        if self.bins.is_empty() {
            return 0.0;
        }
        1.0 - self.used_area() / (self.bins.len() as f64 * stock_area)
    }

    /// Fewer unplaced, then fewer sheets, then less waste.
    fn is_better_than(&self, other: &Attempt, stock_area: f64) -> bool {
        let ord = self
            .unplaced
            .len()
            .cmp(&other.unplaced.len())
            .then(self.bins.len().cmp(&other.bins.len()))
            .then_with(|| {
                self.waste_ratio(stock_area)
                    .total_cmp(&other.waste_ratio(stock_area))
            });
        ord == Ordering::Less
    }
}

pub struct Solver {
    stock: Rect,
    kerf: f64,
    max_sheets: usize,
    pieces: Vec<Piece>,
}

impl Solver {
    /// Validates the caller contract: positive sheet dimensions, a
    /// non-negative kerf, a sheet cap of at least one and positive piece
    /// dimensions.
    pub fn new(stock: Rect, kerf: f64, max_sheets: usize, pieces: Vec<Piece>) -> Result<Self> {
        if !(stock.w.is_finite() && stock.h.is_finite() && stock.w > 0.0 && stock.h > 0.0) {
            return Err(Error::InvalidStock(stock.w, stock.h));
        }
        if !(kerf.is_finite() && kerf >= 0.0) {
            return Err(Error::InvalidKerf(kerf));
        }
        if max_sheets == 0 {
            return Err(Error::InvalidSheetCap);
        }
        if let Some(p) = pieces.iter().find(|p| {
            !(p.width.is_finite() && p.height.is_finite() && p.width > 0.0 && p.height > 0.0)
        }) {
            return Err(Error::InvalidPiece {
                label: p.label.clone(),
                width: p.width,
                height: p.height,
            });
        }

        Ok(Self {
            stock,
            kerf,
            max_sheets,
            pieces,
        })
    }

    pub fn solve(&self) -> PackingResult {
        if self.pieces.is_empty() {
            return PackingResult {
                stock: self.stock,
                kerf: self.kerf,
                sheets: vec![],
                unplaced: vec![],
                suggestions: vec![],
            };
        }

        let best = self.select_best();
        tracing::debug!(
            order = ?best.order,
            heuristic = best.heuristic.short_name(),
            sheets = best.bins.len(),
            unplaced = best.unplaced.len(),
            "selected strategy"
        );

        let bins = self.consolidate(best.bins);
        let sheets: Vec<Sheet> = bins.into_iter().map(|b| self.to_sheet(b)).collect();
        let unplaced = best
            .unplaced
            .into_iter()
            .map(|(idx, reason)| Unplaced {
                piece: self.pieces[idx].clone(),
                reason,
            })
            .collect();
        let suggestions = suggest(self.stock, &sheets);

        let result = PackingResult {
            stock: self.stock,
            kerf: self.kerf,
            sheets,
            unplaced,
            suggestions,
        };
        tracing::info!(
            pieces = self.pieces.len(),
            sheets = result.sheet_count(),
            unplaced = result.unplaced.len(),
            waste_percent = result.total_waste_percent(),
            "packing finished"
        );
        result
    }

    /// Runs every sort order against every heuristic and keeps the best.
    /// Earlier grid entries win exact ties.
    fn select_best(&self) -> Attempt {
        let stock_area = self.stock.area();
        let mut best: Option<Attempt> = None;

        for order in SortOrder::ALL {
            let sequence = order.sort(&self.pieces);
            for heuristic in Heuristic::ALL {
                let attempt = self.run_strategy(order, &sequence, heuristic);
                tracing::debug!(
                    order = ?order,
                    heuristic = heuristic.short_name(),
                    sheets = attempt.bins.len(),
                    unplaced = attempt.unplaced.len(),
                    waste = attempt.waste_ratio(stock_area),
                    "strategy attempt"
                );
                if best
                    .as_ref()
                    .is_none_or(|b| attempt.is_better_than(b, stock_area))
                {
                    best = Some(attempt);
                }
            }
        }

        best.unwrap_or(Attempt {
            order: SortOrder::AreaDesc,
            heuristic: Heuristic::BestShortSideFit,
            bins: vec![],
            unplaced: vec![],
        })
    }

    /// Greedy pass: each piece goes to the best-scoring spot over all open
    /// sheets, and a new sheet is opened only when none fits.
    fn run_strategy(&self, order: SortOrder, sequence: &[usize], heuristic: Heuristic) -> Attempt {
        let mut bins: Vec<MaxRectsBin> = Vec::new();
        let mut unplaced = Vec::new();

        for &idx in sequence {
            let piece = self.pieces[idx].rect();
            if !piece.fits_in(&self.stock) && !piece.rotated().fits_in(&self.stock) {
                unplaced.push((idx, UnplacedReason::TooLargeForSheet));
                continue;
            }

            let mut best: Option<(usize, Candidate)> = None;
            for (bi, bin) in bins.iter().enumerate() {
                if let Some(candidate) = bin.find_best(piece, heuristic)
                    && best.is_none_or(|(_, b)| candidate.score < b.score)
                {
                    best = Some((bi, candidate));
                }
            }

            if let Some((bi, candidate)) = best {
                bins[bi].place(candidate, idx, piece);
                continue;
            }

            if bins.len() >= self.max_sheets {
                unplaced.push((idx, UnplacedReason::NoSheetsRemaining));
                continue;
            }

            let mut bin = MaxRectsBin::new(self.stock, self.kerf);
            match bin.find_best(piece, heuristic) {
                Some(candidate) => {
                    bin.place(candidate, idx, piece);
                    bins.push(bin);
                }
                None => {
                    tracing::warn!(
                        piece = %self.pieces[idx].label,
                        size = %piece,
                        "piece failed to fit an empty sheet"
                    );
                    unplaced.push((idx, UnplacedReason::CouldNotPlace));
                }
            }
        }

        Attempt {
            order,
            heuristic,
            bins,
            unplaced,
        }
    }

    /// Repeatedly moves pieces off the sparsest sheet into earlier sheets.
    /// A sheet whose pieces all moved is dropped; otherwise it is repacked
    /// from scratch with the pieces that stayed. Stops after a pass that
    /// moves nothing.
    fn consolidate(&self, mut bins: Vec<MaxRectsBin>) -> Vec<MaxRectsBin> {
        let heuristic = Heuristic::BestShortSideFit;
        let mut pass = 0;

        while bins.len() > 1 {
            pass += 1;
            bins.sort_by(|a, b| b.used_area().total_cmp(&a.used_area()));

            let mut next = bins.clone();
            let Some(last) = next.pop() else { break };

            let mut stayed = Vec::new();
            for p in &last.placements {
                let piece = self.pieces[p.piece].rect();
                let target = next
                    .iter()
                    .enumerate()
                    .find_map(|(bi, b)| b.find_best(piece, heuristic).map(|c| (bi, c)));
                match target {
                    Some((bi, candidate)) => {
                        next[bi].place(candidate, p.piece, piece);
                    }
                    None => stayed.push(p.piece),
                }
            }

            let moved = last.placements.len() - stayed.len();
            tracing::debug!(pass, moved, stayed = stayed.len(), "consolidation pass");
            if moved == 0 {
                break;
            }

            if !stayed.is_empty() {
                let mut rebuilt = MaxRectsBin::new(self.stock, self.kerf);
                for &idx in &stayed {
                    let piece = self.pieces[idx].rect();
                    let Some(candidate) = rebuilt.find_best(piece, heuristic) else {
                        tracing::debug!(
                            pass,
                            "repack of sparsest sheet failed, keeping previous layout"
                        );
                        return bins;
                    };
                    rebuilt.place(candidate, idx, piece);
                }
                next.push(rebuilt);
            }
            bins = next;
        }

        bins
    }

    fn to_sheet(&self, bin: MaxRectsBin) -> Sheet {
        let used = bin.used_area();
        let placements = bin
            .placements
            .iter()
            .map(|p| PlacedPiece {
                piece: self.pieces[p.piece].clone(),
                x: p.x,
                y: p.y,
                w: p.w,
                h: p.h,
                rotated: p.rotated,
            })
            .collect();
        Sheet::new(self.stock, placements, bin.free_rects, used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{clip, intersects};
    use crate::types::FreeRect;

    fn pieces(sizes: &[(f64, f64, u32)]) -> Vec<Piece> {
        let mut out = Vec::new();
        for &(w, h, qty) in sizes {
            for _ in 0..qty {
                let id = out.len() as u32;
                out.push(Piece::new(id, format!("p{id}"), w, h));
            }
        }
        out
    }

    /// Validates a complete result:
    /// 1. Every placement lies within the sheet
    /// 2. No two kerf-inflated footprints on a sheet overlap
    /// 3. Orientation matches the piece and the `rotated` flag
    /// 4. `used_area` is the exact sum of placed piece areas
    /// 5. Every input piece is either placed or unplaced, exactly once
    fn assert_result_valid(res: &PackingResult, input: &[Piece], max_sheets: usize) {
        let stock = res.stock;
        assert!(res.sheet_count() <= max_sheets);
        assert_eq!(res.placed_count() + res.unplaced.len(), input.len());

        let mut seen: Vec<u32> = res
            .sheets
            .iter()
            .flat_map(|s| &s.placements)
            .map(|p| p.piece.id)
            .chain(res.unplaced.iter().map(|u| u.piece.id))
            .collect();
        seen.sort_unstable();
        let mut expected: Vec<u32> = input.iter().map(|p| p.id).collect();
        expected.sort_unstable();
        assert_eq!(seen, expected);

        for (si, sheet) in res.sheets.iter().enumerate() {
            assert!(!sheet.placements.is_empty(), "sheet {si} is empty");
            for (pi, p) in sheet.placements.iter().enumerate() {
                assert!(
                    p.x >= 0.0 && p.y >= 0.0 && p.x + p.w <= stock.w && p.y + p.h <= stock.h,
                    "sheet {si}, piece {pi} ({}x{} @ ({},{})) exceeds stock {stock}",
                    p.w,
                    p.h,
                    p.x,
                    p.y
                );
                if p.rotated {
                    assert_eq!((p.w, p.h), (p.piece.height, p.piece.width));
                } else {
                    assert_eq!((p.w, p.h), (p.piece.width, p.piece.height));
                }
            }

            let footprints: Vec<FreeRect> = sheet
                .placements
                .iter()
                .map(|p| clip(&FreeRect::new(p.x, p.y, p.w + res.kerf, p.h + res.kerf), stock))
                .collect();
            for i in 0..footprints.len() {
                for j in (i + 1)..footprints.len() {
                    assert!(
                        !intersects(&footprints[i], &footprints[j]),
                        "sheet {si}: piece {i} {:?} overlaps piece {j} {:?}",
                        footprints[i],
                        footprints[j]
                    );
                }
            }

            let sum: f64 = sheet.placements.iter().map(|p| p.w * p.h).sum();
            assert!((sheet.used_area - sum).abs() < 1e-6);
            assert!(sheet.used_area <= stock.area());
        }
    }

    fn bin_with(solver: &Solver, indices: &[usize]) -> MaxRectsBin {
        let mut bin = MaxRectsBin::new(solver.stock, solver.kerf);
        for &idx in indices {
            let piece = solver.pieces[idx].rect();
            let c = bin.find_best(piece, Heuristic::BestShortSideFit).unwrap();
            bin.place(c, idx, piece);
        }
        bin
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert_eq!(
            Solver::new(Rect::new(0.0, 100.0), 0.0, 1, vec![]).err(),
            Some(Error::InvalidStock(0.0, 100.0))
        );
        assert_eq!(
            Solver::new(Rect::new(100.0, 100.0), -1.0, 1, vec![]).err(),
            Some(Error::InvalidKerf(-1.0))
        );
        assert_eq!(
            Solver::new(Rect::new(100.0, 100.0), 0.0, 0, vec![]).err(),
            Some(Error::InvalidSheetCap)
        );
        assert!(matches!(
            Solver::new(
                Rect::new(100.0, 100.0),
                0.0,
                1,
                vec![Piece::new(0, "bad", 10.0, 0.0)]
            ),
            Err(Error::InvalidPiece { .. })
        ));
    }

    #[test]
    fn test_no_pieces() {
        let solver = Solver::new(Rect::new(100.0, 100.0), 0.0, 3, vec![]).unwrap();
        let res = solver.solve();
        assert_eq!(res.sheet_count(), 0);
        assert!(res.unplaced.is_empty());
        assert!(res.suggestions.is_empty());
    }

    #[test]
    fn test_one_large_four_small_on_one_sheet() {
        let input = pieces(&[(400.0, 400.0, 1), (300.0, 300.0, 4)]);
        let solver = Solver::new(Rect::new(1000.0, 1000.0), 0.0, 5, input.clone()).unwrap();
        let res = solver.solve();
        assert_result_valid(&res, &input, 5);
        assert_eq!(res.sheet_count(), 1);
        assert_eq!(res.placed_count(), 5);
        assert!(res.unplaced.is_empty());
        assert_eq!(res.sheets[0].used_area, 520_000.0);
    }

    #[test]
    fn test_too_large_for_sheet() {
        let input = pieces(&[(1200.0, 400.0, 1)]);
        let solver = Solver::new(Rect::new(1000.0, 500.0), 0.0, 1, input.clone()).unwrap();
        let res = solver.solve();
        assert_result_valid(&res, &input, 1);
        assert_eq!(res.sheet_count(), 0);
        assert_eq!(res.unplaced.len(), 1);
        assert_eq!(res.unplaced[0].reason, UnplacedReason::TooLargeForSheet);
    }

    #[test]
    fn test_no_sheets_remaining() {
        let input = pieces(&[(400.0, 400.0, 2)]);
        let solver = Solver::new(Rect::new(500.0, 500.0), 0.0, 1, input.clone()).unwrap();
        let res = solver.solve();
        assert_result_valid(&res, &input, 1);
        assert_eq!(res.sheet_count(), 1);
        assert_eq!(res.placed_count(), 1);
        assert_eq!(res.unplaced.len(), 1);
        assert_eq!(res.unplaced[0].reason, UnplacedReason::NoSheetsRemaining);
    }

    #[test]
    fn test_rotation_helps() {
        let input = pieces(&[(50.0, 100.0, 1)]);
        let solver = Solver::new(Rect::new(100.0, 50.0), 0.0, 1, input.clone()).unwrap();
        let res = solver.solve();
        assert_result_valid(&res, &input, 1);
        assert!(res.sheets[0].placements[0].rotated);
    }

    #[test]
    fn test_kerf_reduces_capacity() {
        let input = pieces(&[(50.0, 100.0, 2)]);

        let solver = Solver::new(Rect::new(100.0, 100.0), 0.0, 5, input.clone()).unwrap();
        let res = solver.solve();
        assert_result_valid(&res, &input, 5);
        assert_eq!(res.sheet_count(), 1);

        // 50 + 5 + 50 > 100
        let solver = Solver::new(Rect::new(100.0, 100.0), 5.0, 5, input.clone()).unwrap();
        let res = solver.solve();
        assert_result_valid(&res, &input, 5);
        assert_eq!(res.sheet_count(), 2);
    }

    #[test]
    fn test_kerf_past_sheet_edge_is_clipped() {
        // Exact-fit pieces still fit once the kerf margin runs off the sheet.
        let input = pieces(&[(100.0, 100.0, 1)]);
        let solver = Solver::new(Rect::new(100.0, 100.0), 4.0, 1, input.clone()).unwrap();
        let res = solver.solve();
        assert_result_valid(&res, &input, 1);
        assert!(res.unplaced.is_empty());
        assert!(res.sheets[0].free_rects.is_empty());
        assert_eq!(res.sheets[0].waste_percent, 0.0);
    }

    #[test]
    fn test_small_piece_tops_off_sheet() {
        let input = pieces(&[(100.0, 80.0, 2), (100.0, 20.0, 1)]);
        let solver = Solver::new(Rect::new(100.0, 100.0), 0.0, 5, input.clone()).unwrap();
        let res = solver.solve();
        assert_result_valid(&res, &input, 5);
        assert_eq!(res.sheet_count(), 2);
        assert_eq!(res.sheets[0].used_area, 10_000.0);
    }

    #[test]
    fn test_sort_orders() {
        let input = vec![
            Piece::new(0, "a", 10.0, 10.0),
            Piece::new(1, "b", 30.0, 2.0),
            Piece::new(2, "c", 5.0, 20.0),
            Piece::new(3, "d", 30.0, 3.0),
        ];
        // c outranks a on its longer side.
        assert_eq!(SortOrder::AreaDesc.sort(&input), vec![2, 0, 3, 1]);
        assert_eq!(SortOrder::PerimeterDesc.sort(&input), vec![3, 1, 2, 0]);
        // Stable: b stays ahead of d.
        assert_eq!(SortOrder::LongSideDesc.sort(&input), vec![1, 3, 2, 0]);
        assert_eq!(SortOrder::LongThenShortSideDesc.sort(&input), vec![3, 1, 2, 0]);
    }

    fn attempt(solver: &Solver, unplaced: usize, widths: &[f64]) -> Attempt {
        let bins = widths
            .iter()
            .map(|&w| {
                let mut bin = MaxRectsBin::new(solver.stock, solver.kerf);
                let piece = Rect::new(w, 100.0);
                let c = bin.find_best(piece, Heuristic::BestShortSideFit).unwrap();
                bin.place(c, 0, piece);
                bin
            })
            .collect();
        Attempt {
            order: SortOrder::AreaDesc,
            heuristic: Heuristic::BestShortSideFit,
            bins,
            unplaced: (0..unplaced)
                .map(|i| (i, UnplacedReason::NoSheetsRemaining))
                .collect(),
        }
    }

    #[test]
    fn test_attempt_ordering() {
        let solver = Solver::new(Rect::new(100.0, 100.0), 0.0, 5, vec![]).unwrap();
        let area = solver.stock.area();

        // Fewer unplaced beats fewer sheets.
        let a = attempt(&solver, 0, &[10.0, 10.0, 10.0]);
        let b = attempt(&solver, 1, &[90.0]);
        assert!(a.is_better_than(&b, area));
        assert!(!b.is_better_than(&a, area));

        // Same unplaced: fewer sheets beats lower waste.
        let a = attempt(&solver, 1, &[10.0]);
        let b = attempt(&solver, 1, &[100.0, 100.0]);
        assert!(a.is_better_than(&b, area));
        assert!(!b.is_better_than(&a, area));

        // Same unplaced and sheets: lower waste wins.
        let a = attempt(&solver, 0, &[80.0, 70.0]);
        let b = attempt(&solver, 0, &[80.0, 60.0]);
        assert!((a.waste_ratio(area) - 0.25).abs() < 1e-9);
        assert!(a.is_better_than(&b, area));
        assert!(!b.is_better_than(&a, area));

        // Exact ties are not better, so the earlier grid entry is kept.
        let a = attempt(&solver, 0, &[50.0]);
        let b = attempt(&solver, 0, &[50.0]);
        assert!(!a.is_better_than(&b, area));
        assert!(!b.is_better_than(&a, area));

        let empty = attempt(&solver, 2, &[]);
        assert_eq!(empty.waste_ratio(area), 0.0);
    }

    #[test]
    fn test_kerf_respected_in_gaps_left_and_above() {
        // Seeded mixed-size jobs that leave free space on the leading side
        // of placed pieces.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move |n: u64| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed % n
        };

        for _ in 0..60 {
            let count = 5 + next(25) as usize;
            let input: Vec<Piece> = (0..count)
                .map(|i| {
                    let w = 50.0 * (1 + next(10)) as f64;
                    let h = 50.0 * (1 + next(10)) as f64;
                    Piece::new(i as u32, format!("p{i}"), w, h)
                })
                .collect();
            let solver =
                Solver::new(Rect::new(1000.0, 1000.0), 5.0, 20, input.clone()).unwrap();
            let res = solver.solve();
            assert_result_valid(&res, &input, 20);
        }
    }

    #[test]
    fn test_consolidate_merges_sparse_sheets() {
        let input = pieces(&[(1000.0, 400.0, 1), (500.0, 350.0, 2)]);
        let solver = Solver::new(Rect::new(1000.0, 1000.0), 0.0, 5, input).unwrap();
        let bins = vec![bin_with(&solver, &[0]), bin_with(&solver, &[1, 2])];

        let bins = solver.consolidate(bins);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].placements.len(), 3);
        assert_eq!(bins[0].used_area(), 750_000.0);
    }

    #[test]
    fn test_consolidate_repacks_partially_emptied_sheet() {
        let input = pieces(&[(1000.0, 720.0, 1), (900.0, 250.0, 1), (700.0, 700.0, 1)]);
        let solver = Solver::new(Rect::new(1000.0, 1000.0), 0.0, 5, input).unwrap();
        let before = bin_with(&solver, &[1, 2]);
        assert_eq!((before.placements[1].x, before.placements[1].y), (0.0, 250.0));

        let bins = solver.consolidate(vec![bin_with(&solver, &[0]), before]);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].placements.len(), 2);
        assert_eq!(bins[1].placements.len(), 1);
        let p = bins[1].placements[0];
        assert_eq!(p.piece, 2);
        // Fresh repack, not an in-place edit.
        assert_eq!((p.x, p.y), (0.0, 0.0));
    }

    #[test]
    fn test_consolidate_never_adds_sheets() {
        let input = pieces(&[(600.0, 600.0, 3)]);
        let solver = Solver::new(Rect::new(1000.0, 1000.0), 0.0, 5, input).unwrap();
        let bins = vec![
            bin_with(&solver, &[0]),
            bin_with(&solver, &[1]),
            bin_with(&solver, &[2]),
        ];
        assert_eq!(solver.consolidate(bins).len(), 3);
    }

    #[test]
    fn test_deterministic() {
        let input = pieces(&[
            (800.0, 600.0, 3),
            (400.0, 300.0, 5),
            (1200.0, 600.0, 2),
            (300.0, 200.0, 4),
        ]);
        let solver = Solver::new(Rect::new(2440.0, 1220.0), 3.0, 10, input).unwrap();
        let a = solver.solve();
        let b = solver.solve();
        assert_eq!(a.sheet_count(), b.sheet_count());
        for (sa, sb) in a.sheets.iter().zip(&b.sheets) {
            assert_eq!(sa.placements, sb.placements);
            assert_eq!(sa.free_rects, sb.free_rects);
        }
        assert_eq!(a.suggestions, b.suggestions);
    }

    /// 30 pieces, 6 different sizes, standard plywood sheet 2440x1220, no kerf.
    #[test]
    fn test_complex_mixed_sizes_no_kerf() {
        let input = pieces(&[
            (800.0, 600.0, 5),
            (400.0, 300.0, 8),
            (600.0, 400.0, 4),
            (1200.0, 600.0, 3),
            (300.0, 200.0, 6),
            (500.0, 500.0, 4),
        ]);
        assert_eq!(input.len(), 30);
        let stock = Rect::new(2440.0, 1220.0);
        let solver = Solver::new(stock, 0.0, 20, input.clone()).unwrap();
        let res = solver.solve();
        assert_result_valid(&res, &input, 20);
        assert!(res.unplaced.is_empty());
        assert!(res.sheet_count() >= res.min_sheets());
    }

    /// 35 pieces, 7 different sizes, with kerf=3.
    #[test]
    fn test_complex_mixed_sizes_with_kerf() {
        let input = pieces(&[
            (700.0, 500.0, 6),
            (350.0, 250.0, 5),
            (1000.0, 400.0, 3),
            (450.0, 450.0, 4),
            (600.0, 300.0, 7),
            (250.0, 150.0, 5),
            (800.0, 400.0, 5),
        ]);
        assert_eq!(input.len(), 35);
        let solver = Solver::new(Rect::new(2440.0, 1220.0), 3.0, 20, input.clone()).unwrap();
        let res = solver.solve();
        assert_result_valid(&res, &input, 20);
        assert!(res.unplaced.is_empty());
    }

    /// Small stock with a tight cap: some pieces must be left over.
    #[test]
    fn test_complex_small_stock_capped() {
        let input = pieces(&[
            (200.0, 150.0, 8),
            (300.0, 200.0, 6),
            (150.0, 100.0, 7),
            (250.0, 180.0, 5),
            (400.0, 300.0, 6),
            (600.0, 100.0, 2),
        ]);
        let solver = Solver::new(Rect::new(500.0, 400.0), 2.0, 4, input.clone()).unwrap();
        let res = solver.solve();
        assert_result_valid(&res, &input, 4);
        assert!(
            res.unplaced
                .iter()
                .filter(|u| u.reason == UnplacedReason::TooLargeForSheet)
                .count()
                == 2
        );
        assert!(
            res.unplaced
                .iter()
                .any(|u| u.reason == UnplacedReason::NoSheetsRemaining)
        );
    }
}
