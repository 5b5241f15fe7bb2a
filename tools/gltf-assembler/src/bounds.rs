//! Position bounds for accessor min/max

/// Component-wise (min, max) over `positions`.
///
/// Returns `None` for an empty slice: glTF accessors must not carry
/// sentinel or NaN bounds, so callers omit min/max instead.
pub fn compute_bounds(positions: &[[f32; 3]]) -> Option<([f32; 3], [f32; 3])> {
    let (first, rest) = positions.split_first()?;
    let mut min = *first;
    let mut max = *first;

    for pos in rest {
        for i in 0..3 {
            min[i] = min[i].min(pos[i]);
            max[i] = max[i].max(pos[i]);
        }
    }

    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_bounds_simple() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 2.0, 3.0], [-1.0, -2.0, -3.0]];
        let (min, max) = compute_bounds(&positions).unwrap();
        assert_eq!(min, [-1.0, -2.0, -3.0]);
        assert_eq!(max, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_compute_bounds_single_point() {
        let (min, max) = compute_bounds(&[[4.0, -5.0, 6.0]]).unwrap();
        assert_eq!(min, max);
    }

    #[test]
    fn test_compute_bounds_empty() {
        assert!(compute_bounds(&[]).is_none());
    }
}
