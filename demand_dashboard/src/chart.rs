//! Text line chart of a daily sales series

use chrono::NaiveDate;

const POINT: char = '*';
const LINK: char = '.';

/// Average consecutive values down to at most `width` buckets
pub fn bucket_means(values: &[f64], width: usize) -> Vec<f64> {
    if values.len() <= width || width == 0 {
        return values.to_vec();
    }
    (0..width)
        .map(|c| {
            let start = c * values.len() / width;
            let end = ((c + 1) * values.len() / width).max(start + 1);
            let bucket = &values[start..end];
            bucket.iter().sum::<f64>() / bucket.len() as f64
        })
        .collect()
}

/// Render `series` as a `height`-row chart at most `width` columns wide.
///
/// Returns an empty string for an empty series.
pub fn line_chart(series: &[(NaiveDate, f64)], width: usize, height: usize) -> String {
    let (Some(&(first, _)), Some(&(last, _))) = (series.first(), series.last()) else {
        return String::new();
    };
    let height = height.max(2);

    let sales: Vec<f64> = series.iter().map(|&(_, s)| s).collect();
    let columns = bucket_means(&sales, width.max(1));
    let low = columns.iter().copied().fold(f64::INFINITY, f64::min);
    let high = columns.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let level = |v: f64| -> usize {
        if high > low {
            (((v - low) / (high - low)) * (height - 1) as f64).round() as usize
        } else {
            0
        }
    };

    let mut grid = vec![vec![' '; columns.len()]; height];
    let mut previous: Option<usize> = None;
    for (c, &value) in columns.iter().enumerate() {
        let l = level(value);
        if let Some(p) = previous {
            // vertical link between neighbouring points
            for row in p.min(l) + 1..p.max(l) {
                grid[row][c] = LINK;
            }
        }
        grid[l][c] = POINT;
        previous = Some(l);
    }

    let top_label = format!("{:.0}", high);
    let bottom_label = format!("{:.0}", low);
    let label_width = top_label.len().max(bottom_label.len());

    let mut out = String::new();
    for (i, row) in grid.iter().enumerate().rev() {
        let label = if i == height - 1 {
            top_label.as_str()
        } else if i == 0 {
            bottom_label.as_str()
        } else {
            ""
        };
        let line: String = row.iter().collect();
        out.push_str(&format!("{:>w$} |{}\n", label, line.trim_end(), w = label_width));
    }
    out.push_str(&format!(
        "{:>w$} +{}\n",
        "",
        "-".repeat(columns.len()),
        w = label_width
    ));

    let first_label = first.to_string();
    let last_label = last.to_string();
    let gap = columns
        .len()
        .saturating_sub(first_label.len() + last_label.len())
        .max(1);
    if first == last {
        out.push_str(&format!("{:>w$}  {}\n", "", first_label, w = label_width));
    } else {
        out.push_str(&format!(
            "{:>w$}  {}{}{}\n",
            "",
            first_label,
            " ".repeat(gap),
            last_label,
            w = label_width
        ));
    }
    out
}
