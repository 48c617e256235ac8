//! Preview size computation.

/// Computes an aspect-preserving preview size no larger than `max_dim`.
///
/// `out_w` and `out_h` are the requested output dimensions as given on the
/// command line. If either is not a positive integer, `fallback` is returned.
/// Sizes already within `max_dim` are returned unchanged; otherwise the
/// larger side becomes `max_dim` and the other is scaled to match, rounded
/// half to even and never below 1.
#[must_use]
pub fn compute_preview_dimensions(
    out_w: &str,
    out_h: &str,
    max_dim: u32,
    fallback: (u32, u32),
) -> (u32, u32) {
    let (Some(w), Some(h)) = (parse_dimension(out_w), parse_dimension(out_h)) else {
        return fallback;
    };

    if w.max(h) <= u64::from(max_dim) {
        // Both fit in u32 since they are bounded by max_dim.
        return (w as u32, h as u32);
    }

    let max = f64::from(max_dim);
    if w >= h {
        (max_dim, scale_side(h, w, max))
    } else {
        (scale_side(w, h, max), max_dim)
    }
}

fn scale_side(side: u64, longest: u64, max: f64) -> u32 {
    let scaled = (side as f64 * max / longest as f64).round_ties_even();
    (scaled as u32).max(1)
}

fn parse_dimension(raw: &str) -> Option<u64> {
    raw.trim().parse::<i64>().ok().filter(|&v| v > 0).map(|v| v as u64)
}
