use crate::types::FreeRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::enum_variant_names)]
pub enum Heuristic {
    BestShortSideFit,
    BestLongSideFit,
    BestAreaFit,
}

impl Heuristic {
    pub const ALL: [Heuristic; 3] = [
        Heuristic::BestShortSideFit,
        Heuristic::BestLongSideFit,
        Heuristic::BestAreaFit,
    ];

    pub fn short_name(&self) -> &'static str {
        match self {
            Heuristic::BestShortSideFit => "BSSF",
            Heuristic::BestLongSideFit => "BLSF",
            Heuristic::BestAreaFit => "BAF",
        }
    }
}

/// Lexicographic fit score, lower is better. `position` is the final
/// tiebreak and favours free rectangles near the sheet origin.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Score {
    pub primary: f64,
    pub secondary: f64,
    pub position: f64,
}

/// Scores placing a `w` x `h` piece (already oriented) at the origin of
/// `free`. Returns `None` if it does not fit.
pub fn score_fit(
    free: &FreeRect,
    w: f64,
    h: f64,
    heuristic: Heuristic,
    sheet_width: f64,
) -> Option<Score> {
    if w > free.w || h > free.h {
        return None;
    }

    let leftover_w = free.w - w;
    let leftover_h = free.h - h;
    let short = leftover_w.min(leftover_h);
    let long = leftover_w.max(leftover_h);

    let (primary, secondary) = match heuristic {
        Heuristic::BestShortSideFit => (short, long),
        Heuristic::BestLongSideFit => (long, short),
        // The linear term keeps thin slivers from tying squarer remainders.
        Heuristic::BestAreaFit => (leftover_w * leftover_h + leftover_w + leftover_h, short),
    };

    Some(Score {
        primary,
        secondary,
        position: free.y * sheet_width + free.x,
    })
}
