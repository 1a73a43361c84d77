use super::value_objects::{AxisRange, Point};

/// Upper bound on value-axis ticks regardless of surface height
pub const MAX_VALUE_TICKS: usize = 11;
/// Vertical pixels reserved per value-axis tick
pub const PIXELS_PER_TICK: f64 = 40.0;

/// Tick count that fits a value axis of `axis_length` pixels
pub fn max_ticks_for(axis_length: f64) -> usize {
    ((axis_length / PIXELS_PER_TICK).floor() as usize).clamp(2, MAX_VALUE_TICKS)
}

/// Smallest 1/2/5 × 10^k step giving at most `max_ticks` intervals over `span`
pub fn nice_step(span: f64, max_ticks: usize) -> f64 {
    let raw = span / max_ticks.max(1) as f64;
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Value-axis ticks: both bounds plus every step multiple lying at least
/// half a step away from them. Ascending.
pub fn value_ticks(range: &AxisRange, max_ticks: usize) -> (Vec<f64>, f64) {
    let step = nice_step(range.span(), max_ticks);
    let half = step / 2.0;
    let first = (range.min / step).ceil();

    let mut ticks = vec![range.min];
    // a nice step never yields more than max_ticks + 1 multiples inside the range
    for i in 0..=max_ticks + 1 {
        let value = (first + i as f64) * step;
        if value >= range.max {
            break;
        }
        if value - range.min >= half && range.max - value >= half {
            ticks.push(value);
        }
    }
    ticks.push(range.max);
    (ticks, step)
}

/// Decimal places implied by a tick step
pub fn step_decimals(step: f64) -> usize {
    if step >= 1.0 || step <= 0.0 {
        0
    } else {
        ((-step.log10() - 1e-9).ceil() as usize).min(6)
    }
}

/// Tick label with thousands separators and just enough decimals to be exact.
pub fn format_tick(value: f64, step: f64) -> String {
    let base = step_decimals(step);
    let widest = base.max(2);
    let tolerance = 1e-9 * value.abs().max(1.0);
    let decimals = (base..=widest)
        .find(|d| {
            let factor = 10f64.powi(*d as i32);
            ((value * factor).round() / factor - value).abs() < tolerance
        })
        .unwrap_or(widest);
    let value = if value == 0.0 { 0.0 } else { value };
    group_thousands(&format!("{:.*}", decimals, value))
}

/// `1234567.5` -> `1,234,567.5`
pub fn group_thousands(number: &str) -> String {
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(number.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

/// Show every n-th category label so that neighbours never overlap
pub fn label_stride(label_widths: &[f64], available: f64, gap: f64) -> usize {
    let count = label_widths.len();
    if count <= 1 || available <= 0.0 {
        return 1;
    }
    let widest = label_widths.iter().cloned().fold(0.0, f64::max);
    let slot = available / (count - 1) as f64;
    ((widest + gap) / slot).ceil().max(1.0) as usize
}

/// Bézier handles around one point of a smoothed line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoints {
    pub previous: Point,
    pub next: Point,
}

/// Handles for a line through `points`, scaled by `tension`.
///
/// Each handle lies on the line parallel to the neighbour chord, split
/// by the distances to the neighbours. End points use themselves as the
/// missing neighbour. Tension 0 collapses every handle onto its point.
pub fn spline_control_points(points: &[Point], tension: f64) -> Vec<ControlPoints> {
    let last = points.len().saturating_sub(1);
    points
        .iter()
        .enumerate()
        .map(|(i, current)| {
            let previous = if i == 0 { current } else { &points[i - 1] };
            let next = if i == last { current } else { &points[i + 1] };

            let d01 = previous.distance_to(current);
            let d12 = current.distance_to(next);
            let total = d01 + d12;
            let (s01, s12) = if total > 0.0 { (d01 / total, d12 / total) } else { (0.0, 0.0) };

            let fa = tension * s01;
            let fb = tension * s12;
            let dx = next.x - previous.x;
            let dy = next.y - previous.y;

            ControlPoints {
                previous: Point::new(current.x - fa * dx, current.y - fa * dy),
                next: Point::new(current.x + fb * dx, current.y + fb * dy),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_step_picks_one_two_five() {
        assert_eq!(nice_step(10.0, 10), 1.0);
        assert_eq!(nice_step(15.0, 10), 2.0);
        assert_eq!(nice_step(20.5, 5), 5.0);
        assert_eq!(nice_step(70.0, 10), 10.0);
    }

    #[test]
    fn ticks_keep_bounds_and_drop_crowded_neighbours() {
        let range = AxisRange { min: 95.0, max: 115.5 };
        let (ticks, step) = value_ticks(&range, 5);
        assert_eq!(step, 5.0);
        assert_eq!(ticks, vec![95.0, 100.0, 105.0, 110.0, 115.5]);
    }

    #[test]
    fn tick_labels_are_grouped() {
        assert_eq!(format_tick(105_000.0, 1000.0), "105,000");
        assert_eq!(format_tick(115.5, 5.0), "115.5");
        assert_eq!(format_tick(-1234.25, 0.25), "-1,234.25");
        assert_eq!(group_thousands("999"), "999");
    }

    #[test]
    fn stride_is_one_when_labels_fit() {
        assert_eq!(label_stride(&[30.0; 5], 400.0, 10.0), 1);
        assert_eq!(label_stride(&[60.0; 101], 500.0, 10.0), 14);
    }

    #[test]
    fn zero_tension_handles_sit_on_points() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 5.0), Point::new(20.0, 0.0)];
        for (cp, point) in spline_control_points(&points, 0.0).iter().zip(points.iter()) {
            assert_eq!(cp.previous, *point);
            assert_eq!(cp.next, *point);
        }
    }
}
