use std::path::Path;

use plotters::prelude::*;

#[inline(always)]
pub fn max(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, f64::max)
}

/// Index of the first maximal value.
#[inline(always)]
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut result: Option<usize> = None;
    for (i, v) in values.iter().enumerate() {
        match result {
            Some(best) if values[best] >= *v => {}
            _ => result = Some(i),
        }
    }
    result
}

/// Indices of every value tied with the maximum.
pub fn argmax_all(values: &[f64]) -> Vec<usize> {
    let best = max(values.iter().copied());
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v == best)
        .map(|(i, _)| i)
        .collect()
}

pub fn moving_average(window: usize, vector: &[f64]) -> Vec<f64> {
    let window = window.max(1);
    let mut aux: usize = 0;
    let mut result: Vec<f64> = vec![];
    while aux < vector.len() {
        let end: usize = if aux + window < vector.len() {
            aux + window
        } else {
            vector.len()
        };
        let slice: &[f64] = &vector[aux..end];
        let r: f64 = slice.iter().sum();
        result.push(r / slice.len() as f64);
        aux = end;
    }
    result
}

pub fn plot_moving_average(
    values: &[Vec<f64>],
    legends: &[&str],
    title: &str,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let colors: [RGBColor; 6] = [BLUE, GREEN, CYAN, RED, YELLOW, MAGENTA];
    let x_max = values.iter().map(|v| v.len()).max().unwrap_or(1).max(1);
    let mut y_min = values.iter().flatten().copied().fold(f64::INFINITY, f64::min);
    let mut y_max = max(values.iter().flatten().copied());
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = 0.0;
        y_max = 1.0;
    }
    if y_min == y_max {
        y_max += 1.0;
    }

    let root = BitMapBackend::new(path, (1280, 720)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max as f64, y_min..y_max)?;
    chart.configure_mesh().draw()?;

    for (i, data) in values.iter().enumerate() {
        let color = colors[i % colors.len()];
        chart
            .draw_series(LineSeries::new(
                data.iter().enumerate().map(|(x, y)| (x as f64, *y)),
                &color,
            ))?
            .label(legends.get(i).copied().unwrap_or(""))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}
