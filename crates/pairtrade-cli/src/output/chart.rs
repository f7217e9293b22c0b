use colored::Colorize;

use pairtrade_core::chart::{ChartSink, ChartSpec, Curve};

/// Terminal renderer for the two evaluation curves. The z-score panel
/// draws dashed rules at the ±entry-threshold bands.
#[derive(Debug, Clone)]
pub struct AsciiChart {
    pub width: usize,
    pub height: usize,
}

impl Default for AsciiChart {
    fn default() -> Self {
        Self {
            width: 72,
            height: 12,
        }
    }
}

impl AsciiChart {
    fn plot_curve(&self, curve: &Curve, rules: &[f64]) {
        println!("{}", curve.name.bold());
        if curve.values.is_empty() {
            println!("  (no data)");
            return;
        }

        let cols = self.width.min(curve.values.len()).max(1);
        let per_col = curve.values.len() as f64 / cols as f64;

        // Downsample by bucket mean so long series fit the terminal.
        let sampled: Vec<f64> = (0..cols)
            .map(|c| {
                let lo = (c as f64 * per_col) as usize;
                let hi = (((c + 1) as f64 * per_col) as usize)
                    .max(lo + 1)
                    .min(curve.values.len());
                curve.values[lo..hi].iter().sum::<f64>() / (hi - lo) as f64
            })
            .collect();

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in sampled.iter().chain(rules) {
            min = min.min(*v);
            max = max.max(*v);
        }
        if max - min < 1e-12 {
            max = min + 1.0;
        }

        let rows = self.height.max(2);
        let row_of = |v: f64| -> usize {
            let frac = (v - min) / (max - min);
            ((1.0 - frac) * (rows - 1) as f64).round() as usize
        };

        let mut grid = vec![vec![' '; cols]; rows];
        for rule in rules {
            let r = row_of(*rule);
            for cell in &mut grid[r] {
                *cell = '-';
            }
        }
        for (c, v) in sampled.iter().enumerate() {
            grid[row_of(*v)][c] = '*';
        }

        for (i, row) in grid.iter().enumerate() {
            let label = if i == 0 {
                format!("{:>10.4}", max)
            } else if i == rows - 1 {
                format!("{:>10.4}", min)
            } else {
                " ".repeat(10)
            };
            println!("{} | {}", label, row.iter().collect::<String>());
        }

        if let (Some(first), Some(last)) = (curve.dates.first(), curve.dates.last()) {
            println!("{} {} .. {}", " ".repeat(10), first, last);
        }
        println!();
    }
}

impl ChartSink for AsciiChart {
    fn render(&mut self, spec: &ChartSpec) {
        self.plot_curve(
            &spec.z_score,
            &[spec.entry_threshold, -spec.entry_threshold],
        );
        self.plot_curve(&spec.cumulative_return, &[]);
    }
}
