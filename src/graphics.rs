//! Plot sinks: where `plot` sends the points it sampled.

use plotters::prelude::*;

use crate::InterpreterError;

pub(crate) const DEFAULT_WIDTH: u32 = 480;
pub(crate) const DEFAULT_HEIGHT: u32 = 300;
const MARKER_SIZE: u32 = 3;

/// Receiver of sampled plots.
pub trait PlotSink {
  /// Draw one scatter plot. `xs` and `ys` are the coordinates of the
  /// points, in sampling order.
  fn draw_scatter_plot(
    &mut self,
    title: &str,
    x_label: &str,
    y_label: &str,
    xs: &[f64],
    ys: &[f64],
  ) -> Result<(), InterpreterError>;
}

/// One plot as received by a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
  pub title: String,
  pub x_label: String,
  pub y_label: String,
  pub points: Vec<(f64, f64)>,
}

impl ScatterPlot {
  fn new(
    title: &str,
    x_label: &str,
    y_label: &str,
    xs: &[f64],
    ys: &[f64],
  ) -> Result<Self, InterpreterError> {
    if xs.len() != ys.len() {
      return Err(InterpreterError::EvaluationError(format!(
        "Plot: {} x values but {} y values",
        xs.len(),
        ys.len()
      )));
    }
    Ok(Self {
      title: title.to_string(),
      x_label: x_label.to_string(),
      y_label: y_label.to_string(),
      points: xs.iter().copied().zip(ys.iter().copied()).collect(),
    })
  }
}

/// Keeps every plot it receives.
#[derive(Debug, Default, Clone)]
pub struct RecordingPlotter {
  plots: Vec<ScatterPlot>,
}

impl RecordingPlotter {
  pub fn plots(&self) -> &[ScatterPlot] {
    &self.plots
  }

  pub fn take_plots(&mut self) -> Vec<ScatterPlot> {
    std::mem::take(&mut self.plots)
  }
}

impl PlotSink for RecordingPlotter {
  fn draw_scatter_plot(
    &mut self,
    title: &str,
    x_label: &str,
    y_label: &str,
    xs: &[f64],
    ys: &[f64],
  ) -> Result<(), InterpreterError> {
    self
      .plots
      .push(ScatterPlot::new(title, x_label, y_label, xs, ys)?);
    Ok(())
  }
}

/// A plot rendered to an SVG document.
#[derive(Debug, Clone)]
pub struct RenderedPlot {
  pub title: String,
  pub svg: String,
}

/// Renders each plot to SVG with plotters and keeps the documents until
/// they are taken.
#[derive(Debug, Clone)]
pub struct SvgPlotter {
  width: u32,
  height: u32,
  rendered: Vec<RenderedPlot>,
}

impl Default for SvgPlotter {
  fn default() -> Self {
    Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
  }
}

impl SvgPlotter {
  pub fn new(width: u32, height: u32) -> Self {
    Self {
      width,
      height,
      rendered: Vec::new(),
    }
  }

  pub fn rendered(&self) -> &[RenderedPlot] {
    &self.rendered
  }

  pub fn take_rendered(&mut self) -> Vec<RenderedPlot> {
    std::mem::take(&mut self.rendered)
  }
}

impl PlotSink for SvgPlotter {
  fn draw_scatter_plot(
    &mut self,
    title: &str,
    x_label: &str,
    y_label: &str,
    xs: &[f64],
    ys: &[f64],
  ) -> Result<(), InterpreterError> {
    let plot = ScatterPlot::new(title, x_label, y_label, xs, ys)?;
    let svg = generate_scatter_svg(&plot, self.width, self.height)?;
    self.rendered.push(RenderedPlot {
      title: plot.title,
      svg,
    });
    Ok(())
  }
}

/// Range covering all finite values, widened when degenerate.
fn axis_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
  let (min, max) = values
    .filter(|v| v.is_finite())
    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
      (lo.min(v), hi.max(v))
    });
  if min > max {
    (0.0, 1.0)
  } else if min == max {
    (min - 1.0, max + 1.0)
  } else {
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
  }
}

/// Format a tick value, dropping the trailing ".0" for integers.
fn format_tick(v: f64) -> String {
  if (v - v.round()).abs() < 1e-9 {
    format!("{}", v.round() as i64)
  } else {
    format!("{v:.1}")
  }
}

fn plot_error<E: std::fmt::Display>(e: E) -> InterpreterError {
  InterpreterError::EvaluationError(format!("Plot: {e}"))
}

/// Render a scatter plot to an SVG string.
pub(crate) fn generate_scatter_svg(
  plot: &ScatterPlot,
  svg_width: u32,
  svg_height: u32,
) -> Result<String, InterpreterError> {
  let x_range = axis_range(plot.points.iter().map(|&(x, _)| x));
  let y_range = axis_range(plot.points.iter().map(|&(_, y)| y));
  let dark_gray = RGBColor(0x66, 0x66, 0x66);
  let blue = RGBColor(0x5E, 0x81, 0xB5);

  let mut buf = String::new();
  {
    let root = SVGBackend::with_string(&mut buf, (svg_width, svg_height))
      .into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
      .caption(&plot.title, ("sans-serif", 14.0).into_font())
      .margin(10)
      .x_label_area_size(35)
      .y_label_area_size(45)
      .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
      .map_err(plot_error)?;

    chart
      .configure_mesh()
      .disable_mesh()
      .x_desc(plot.x_label.as_str())
      .y_desc(plot.y_label.as_str())
      .x_label_formatter(&|v: &f64| format_tick(*v))
      .y_label_formatter(&|v: &f64| format_tick(*v))
      .axis_style(dark_gray.stroke_width(1))
      .label_style(("sans-serif", 11.0).into_font().color(&dark_gray))
      .draw()
      .map_err(plot_error)?;

    chart
      .draw_series(
        plot
          .points
          .iter()
          .copied()
          .filter(|(x, y)| x.is_finite() && y.is_finite())
          .map(|(x, y)| Circle::new((x, y), MARKER_SIZE, blue.filled())),
      )
      .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
  }

  Ok(buf)
}
