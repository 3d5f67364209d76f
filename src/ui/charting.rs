use itertools::{Itertools, MinMaxResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub min_secs: f64,
    pub max_secs: f64,
    pub max_wpm: f64,
}

/// X (seconds) and Y (wpm) bounds for the results chart
pub fn compute_chart_params(wpm_coords: &[(f64, f64)], elapsed: u32) -> ChartBounds {
    let (min_secs, max_secs) = match wpm_coords.iter().map(|&(t, _)| t).minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => (0.0, elapsed as f64),
        MinMaxResult::OneElement(t) => (t, t),
        MinMaxResult::MinMax(lo, hi) => (lo, hi),
    };
    // keep the x range at least one second wide
    let max_secs = max_secs.max(min_secs + 1.0);

    let max_wpm = wpm_coords
        .iter()
        .map(|&(_, wpm)| wpm)
        .fold(0.0, f64::max)
        .round();

    ChartBounds {
        min_secs,
        max_secs,
        max_wpm,
    }
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_chart_params_empty() {
        let bounds = compute_chart_params(&[], 5);
        assert_eq!(bounds.min_secs, 0.0);
        assert_eq!(bounds.max_secs, 5.0);
        assert_eq!(bounds.max_wpm, 0.0);
    }

    #[test]
    fn test_compute_chart_params_single_point() {
        let bounds = compute_chart_params(&[(2.0, 18.0)], 2);
        assert_eq!(bounds.min_secs, 2.0);
        assert_eq!(bounds.max_secs, 3.0);
        assert_eq!(bounds.max_wpm, 18.0);
    }

    #[test]
    fn test_compute_chart_params_series() {
        let bounds = compute_chart_params(&[(1.0, 12.0), (2.0, 30.0), (3.0, 24.0)], 3);
        assert_eq!(bounds.min_secs, 1.0);
        assert_eq!(bounds.max_secs, 3.0);
        assert_eq!(bounds.max_wpm, 30.0);
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(1.0), "1");
        assert_eq!(format_label(1.2345), "1.23");
    }
}
