/// Duration scaling for a tuplet of `n` notes.
///
/// A tuplet takes the time of the nearest smaller power-of-two grouping:
/// a triplet fits in the time of two, five to seven notes in the time of
/// four, anything larger in the time of eight. Groups of two or fewer are
/// not scaled.
pub fn tuplet_ratio(n: u32) -> f64 {
    match n {
        3 => 2.0 / 3.0,
        4..=7 => 4.0 / n as f64,
        8.. => 8.0 / n as f64,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triplet() {
        assert_eq!(tuplet_ratio(3), 2.0 / 3.0);
    }

    #[test]
    fn test_time_of_four() {
        assert_eq!(tuplet_ratio(4), 1.0);
        assert_eq!(tuplet_ratio(5), 0.8);
        assert_eq!(tuplet_ratio(6), 4.0 / 6.0);
        assert_eq!(tuplet_ratio(7), 4.0 / 7.0);
    }

    #[test]
    fn test_time_of_eight() {
        assert_eq!(tuplet_ratio(8), 1.0);
        assert_eq!(tuplet_ratio(9), 8.0 / 9.0);
        assert_eq!(tuplet_ratio(12), 8.0 / 12.0);
    }

    #[test]
    fn test_no_scaling_for_small_groups() {
        assert_eq!(tuplet_ratio(0), 1.0);
        assert_eq!(tuplet_ratio(1), 1.0);
        assert_eq!(tuplet_ratio(2), 1.0);
    }
}
