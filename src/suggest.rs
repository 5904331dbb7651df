//! Advisory hints derived from finished sheets. Read-only: nothing here
//! feeds back into placement.

use crate::types::{FreeRect, Rect, Sheet, Suggestion, SuggestionKind, min_sheets};

const FILL_GAP_WASTE_PERCENT: f64 = 15.0;
const CONSOLIDATE_WASTE_PERCENT: f64 = 30.0;
const FUTURE_USE_WASTE_PERCENT: f64 = 20.0;
const MIN_GAP_SIDE: f64 = 200.0;
const MAX_GAPS: usize = 3;

pub fn suggest(stock: Rect, sheets: &[Sheet]) -> Vec<Suggestion> {
    let mut out = Vec::new();
    let last = sheets.len().saturating_sub(1);

    for (i, sheet) in sheets.iter().enumerate() {
        let n = i + 1;

        if sheet.waste_percent > FILL_GAP_WASTE_PERCENT {
            let gaps = usable_gaps(&sheet.free_rects);
            if !gaps.is_empty() {
                let sizes: Vec<String> = gaps
                    .iter()
                    .map(|g| Rect::new(g.w, g.h).to_string())
                    .collect();
                out.push(Suggestion {
                    kind: SuggestionKind::FillGap,
                    sheet: Some(i),
                    message: format!(
                        "Sheet {n} is {}% waste; extra pieces could fill {}",
                        sheet.waste_percent,
                        sizes.join(", ")
                    ),
                    rects: gaps,
                });
            }
        }

        if i != last && sheet.waste_percent > CONSOLIDATE_WASTE_PERCENT {
            out.push(Suggestion {
                kind: SuggestionKind::Consolidate,
                sheet: Some(i),
                message: format!(
                    "Sheet {n} is {}% waste; reordering or resizing pieces may free a sheet",
                    sheet.waste_percent
                ),
                rects: vec![],
            });
        }

        if i == last
            && sheet.waste_percent > FUTURE_USE_WASTE_PERCENT
            && sheet.largest_free_rect.area() > 0.0
        {
            let r = sheet.largest_free_rect;
            out.push(Suggestion {
                kind: SuggestionKind::FutureUse,
                sheet: Some(i),
                message: format!(
                    "Last sheet has a {} offcut at ({}, {}) worth keeping for future jobs",
                    Rect::new(r.w, r.h),
                    r.x,
                    r.y
                ),
                rects: vec![r],
            });
        }
    }

    let used: f64 = sheets.iter().map(|s| s.used_area).sum();
    let minimum = min_sheets(used, stock.area());
    if sheets.len() > minimum {
        out.push(Suggestion {
            kind: SuggestionKind::Efficiency,
            sheet: None,
            message: format!(
                "{} sheets used where {minimum} would hold the material; consider adjusting piece sizes",
                sheets.len()
            ),
            rects: vec![],
        });
    }

    out
}

/// Largest free rectangles with both sides at least [`MIN_GAP_SIDE`], one
/// per distinct size.
fn usable_gaps(free_rects: &[FreeRect]) -> Vec<FreeRect> {
    let mut candidates: Vec<FreeRect> = free_rects
        .iter()
        .copied()
        .filter(|r| r.w >= MIN_GAP_SIDE && r.h >= MIN_GAP_SIDE)
        .collect();
    candidates.sort_by(|a, b| b.area().total_cmp(&a.area()));

    let mut gaps: Vec<FreeRect> = Vec::with_capacity(MAX_GAPS);
    for r in candidates {
        if gaps.iter().any(|g| g.w == r.w && g.h == r.h) {
            continue;
        }
        gaps.push(r);
        if gaps.len() == MAX_GAPS {
            break;
        }
    }
    gaps
}
