use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    pub fn rotated(&self) -> Self {
        Self {
            w: self.h,
            h: self.w,
        }
    }

    pub fn fits_in(&self, other: &Rect) -> bool {
        self.w <= other.w && self.h <= other.h
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// A part to be cut. Immutable once handed to the solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub label: String,
    /// Group the piece belongs to, e.g. the furniture item it is cut for.
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub color: String,
    pub width: f64,
    pub height: f64,
}

impl Piece {
    pub fn new(id: u32, label: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id,
            label: label.into(),
            group: String::new(),
            color: String::new(),
            width,
            height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.width, self.height)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A piece line with a quantity, as entered on the command line or posted to
/// the server.
#[derive(Debug, Clone)]
pub struct Demand {
    pub label: String,
    pub group: String,
    pub color: String,
    pub rect: Rect,
    pub qty: u32,
}

/// Expands demands into individual pieces, numbering ids in input order.
pub fn expand_demands(demands: &[Demand]) -> Vec<Piece> {
    let mut pieces = Vec::new();
    for d in demands {
        for n in 0..d.qty {
            let label = if d.qty > 1 {
                format!("{}#{}", d.label, n + 1)
            } else {
                d.label.clone()
            };
            pieces.push(Piece {
                id: pieces.len() as u32,
                label,
                group: d.group.clone(),
                color: d.color.clone(),
                width: d.rect.w,
                height: d.rect.h,
            });
        }
    }
    pieces
}

/// An empty region of a sheet. Free rectangles of one sheet may overlap.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FreeRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl FreeRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedPiece {
    pub piece: Piece,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub rotated: bool,
}

/// A finished sheet. Never mutated once the result is built.
#[derive(Debug, Clone, Serialize)]
pub struct Sheet {
    pub placements: Vec<PlacedPiece>,
    pub free_rects: Vec<FreeRect>,
    pub used_area: f64,
    pub largest_free_rect: FreeRect,
    pub free_area: f64,
    pub waste_percent: f64,
}

impl Sheet {
    pub fn new(
        stock: Rect,
        placements: Vec<PlacedPiece>,
        free_rects: Vec<FreeRect>,
        used_area: f64,
    ) -> Self {
        let largest_free_rect = free_rects
            .iter()
            .copied()
            .fold(FreeRect::default(), |best, f| {
                if f.area() > best.area() { f } else { best }
            });
        let free_area = free_rects.iter().map(FreeRect::area).sum();
        Self {
            placements,
            free_rects,
            used_area,
            largest_free_rect,
            free_area,
            waste_percent: waste_percent(used_area, stock.area()),
        }
    }
}

/// `(1 - used/stock) * 100`, rounded to one decimal.
pub fn waste_percent(used_area: f64, stock_area: f64) -> f64 {
    if stock_area <= 0.0 {
        return 0.0;
    }
    ((1.0 - used_area / stock_area) * 1000.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnplacedReason {
    /// Neither orientation fits the raw sheet dimensions.
    TooLargeForSheet,
    /// No open sheet had room and the sheet cap was reached.
    NoSheetsRemaining,
    /// The piece failed to fit a fresh, empty sheet. Indicates broken
    /// free-space bookkeeping.
    CouldNotPlace,
}

impl std::fmt::Display for UnplacedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UnplacedReason::TooLargeForSheet => "too large for sheet",
            UnplacedReason::NoSheetsRemaining => "no sheets remaining",
            UnplacedReason::CouldNotPlace => "could not place",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unplaced {
    pub piece: Piece,
    pub reason: UnplacedReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    FillGap,
    Consolidate,
    FutureUse,
    Efficiency,
}

/// Advisory hint derived from the finished sheets. Only `kind` is meant for
/// programmatic use; `message` is display text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    /// Zero-based sheet index, when the hint concerns one sheet.
    pub sheet: Option<usize>,
    pub message: String,
    pub rects: Vec<FreeRect>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PackingResult {
    pub stock: Rect,
    pub kerf: f64,
    pub sheets: Vec<Sheet>,
    pub unplaced: Vec<Unplaced>,
    pub suggestions: Vec<Suggestion>,
}

impl PackingResult {
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn placed_count(&self) -> usize {
        self.sheets.iter().map(|s| s.placements.len()).sum()
    }

    pub fn total_used_area(&self) -> f64 {
        self.sheets.iter().map(|s| s.used_area).sum()
    }

    pub fn total_waste_percent(&self) -> f64 {
        let total_stock_area = self.stock.area() * self.sheets.len() as f64;
        if total_stock_area == 0.0 {
            return 0.0;
        }
        waste_percent(self.total_used_area(), total_stock_area)
    }

    /// Lower bound on the sheet count from area alone.
    pub fn min_sheets(&self) -> usize {
        min_sheets(self.total_used_area(), self.stock.area())
    }
}

pub fn min_sheets(total_used_area: f64, stock_area: f64) -> usize {
    if stock_area <= 0.0 {
        return 0;
    }
    (total_used_area / stock_area).ceil() as usize
}
