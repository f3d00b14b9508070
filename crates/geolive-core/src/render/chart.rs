//! ASCII line chart in the style of asciichart.
//!
//! ```text
//!  450.00 ┤    ╭─
//!  225.00 ┤  ╭─╯
//!    0.00 ┼──╯
//! ```

/// Fixed width of the value-axis labels
pub const LABEL_WIDTH: usize = 7;

/// Columns reserved left of the series: label, separator and axis
pub const AXIS_MARGIN: usize = LABEL_WIDTH + 2;

const CROSS: char = '┼';
const AXIS: char = '┤';
const FLAT: char = '─';
const DOWN_START: char = '╮';
const DOWN_END: char = '╰';
const UP_START: char = '╯';
const UP_END: char = '╭';
const VERTICAL: char = '│';

/// Number of points that fit a terminal `columns` wide next to the axis labels
pub fn plot_width(columns: usize) -> usize {
    columns.saturating_sub(AXIS_MARGIN).max(1)
}

/// Format an axis label: two decimals, right-aligned, keeping the last
/// [`LABEL_WIDTH`] characters when longer.
pub fn format_label(value: f64) -> String {
    // normalise -0.0
    let value = if value == 0.0 { 0.0 } else { value };
    let text = format!("{:.2}", value);
    if text.len() > LABEL_WIDTH {
        text[text.len() - LABEL_WIDTH..].to_string()
    } else {
        format!("{:>width$}", text, width = LABEL_WIDTH)
    }
}

/// Half rounds toward +inf, matching how the chart has always been scaled
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Plot `series` as a line chart roughly `height` rows tall.
///
/// Returns the rows top first; the result has `rows + 1` lines where `rows`
/// is the scaled distance between the series minimum and maximum (so a flat
/// series collapses to a single line).
pub fn plot(series: &[f64], height: usize) -> Vec<String> {
    let Some(&first) = series.first() else {
        return Vec::new();
    };

    let (min, max) = series
        .iter()
        .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = (max - min).abs();
    let ratio = if range != 0.0 {
        height as f64 / range
    } else {
        1.0
    };
    let min2 = round_half_up(min * ratio);
    let max2 = round_half_up(max * ratio);
    let rows = (max2 - min2).unsigned_abs() as usize;

    // Row index (0 = top) of a value
    let row_of = |value: f64| rows - (round_half_up(value * ratio) - min2) as usize;

    // Column 0 is the axis, column x + 1 holds the segment from point x to x + 1
    let mut grid = vec![vec![' '; series.len()]; rows + 1];
    for (i, row) in grid.iter_mut().enumerate() {
        row[0] = if max2 - i as i64 == 0 { CROSS } else { AXIS };
    }
    grid[row_of(first)][0] = CROSS;

    for (x, pair) in series.windows(2).enumerate() {
        let (from, to) = (row_of(pair[0]), row_of(pair[1]));
        let col = x + 1;

        if from == to {
            grid[from][col] = FLAT;
            continue;
        }

        // Smaller row index means higher value
        let falling = to > from;
        grid[to][col] = if falling { DOWN_END } else { UP_END };
        grid[from][col] = if falling { DOWN_START } else { UP_START };
        for row in grid.iter_mut().take(from.max(to)).skip(from.min(to) + 1) {
            row[col] = VERTICAL;
        }
    }

    grid.into_iter()
        .enumerate()
        .map(|(i, cells)| {
            let value = if rows > 0 {
                max - i as f64 * range / rows as f64
            } else {
                max2 as f64
            };
            let mut line = format_label(value);
            line.push(' ');
            line.extend(cells);
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(0.0), "   0.00");
        assert_eq!(format_label(-0.0), "   0.00");
        assert_eq!(format_label(450.0), " 450.00");
        assert_eq!(format_label(1234.567), "1234.57");
        assert_eq!(format_label(123456.78), "3456.78");
    }

    #[test]
    fn test_plot_width() {
        assert_eq!(plot_width(100), 91);
        assert_eq!(plot_width(AXIS_MARGIN), 1);
        assert_eq!(plot_width(3), 1);
    }

    #[test]
    fn test_flat_series_is_one_line() {
        assert_eq!(plot(&[0.0, 0.0, 0.0], 10), vec!["   0.00 ┼──"]);
    }

    #[test]
    fn test_rising_series() {
        assert_eq!(
            plot(&[0.0, 2.0], 2),
            vec!["   2.00 ┤╭", "   1.00 ┤│", "   0.00 ┼╯"]
        );
    }

    #[test]
    fn test_falling_series() {
        assert_eq!(
            plot(&[2.0, 0.0], 2),
            vec!["   2.00 ┼╮", "   1.00 ┤│", "   0.00 ┼╰"]
        );
    }

    #[test]
    fn test_row_count_follows_height() {
        let lines = plot(&[0.0, 0.0, 450.0, 300.0, 900.0], 10);
        assert_eq!(lines.len(), 11);
        assert!(lines[0].starts_with(" 900.00 ┤"));
        assert!(lines[10].starts_with("   0.00 ┼"));
        // label + separator + one cell per point
        for line in &lines {
            assert_eq!(line.chars().count(), LABEL_WIDTH + 1 + 5);
        }
    }

    #[test]
    fn test_empty_series() {
        assert!(plot(&[], 10).is_empty());
    }
}
