use crate::types::{FreeRect, Rect};

/// Remainders thinner than this are dropped.
pub const MIN_FREE_SIZE: f64 = 0.5;

pub fn contains(outer: &FreeRect, inner: &FreeRect) -> bool {
    inner.x >= outer.x
        && inner.y >= outer.y
        && inner.right() <= outer.right()
        && inner.bottom() <= outer.bottom()
}

/// True when the interiors overlap. Touching edges do not count.
pub fn intersects(a: &FreeRect, b: &FreeRect) -> bool {
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

pub fn is_degenerate(r: &FreeRect) -> bool {
    r.w < MIN_FREE_SIZE || r.h < MIN_FREE_SIZE
}

/// Clips `r` to the sheet `[0, stock.w] x [0, stock.h]`.
pub fn clip(r: &FreeRect, stock: Rect) -> FreeRect {
    let x = r.x.max(0.0);
    let y = r.y.max(0.0);
    let right = r.right().min(stock.w);
    let bottom = r.bottom().min(stock.h);
    FreeRect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
}

/// Splits `free` around `used` into up to four maximal remainders (left,
/// right, above, below). Remainders may overlap each other; degenerate ones
/// are discarded. Returns `None` when the two do not intersect.
pub fn subtract(free: &FreeRect, used: &FreeRect) -> Option<Vec<FreeRect>> {
    if !intersects(free, used) {
        return None;
    }

    let mut out = Vec::with_capacity(4);
    if used.x > free.x {
        out.push(FreeRect::new(free.x, free.y, used.x - free.x, free.h));
    }
    if used.right() < free.right() {
        out.push(FreeRect::new(
            used.right(),
            free.y,
            free.right() - used.right(),
            free.h,
        ));
    }
    if used.y > free.y {
        out.push(FreeRect::new(free.x, free.y, free.w, used.y - free.y));
    }
    if used.bottom() < free.bottom() {
        out.push(FreeRect::new(
            free.x,
            used.bottom(),
            free.w,
            free.bottom() - used.bottom(),
        ));
    }
    out.retain(|r| !is_degenerate(r));
    Some(out)
}
