use std::path::Path;

use anyhow::{Context, Result};
use plotly::color::Rgb;
use plotly::common::{AxisSide, DashType, Line, Mode, Title, Visible};
use plotly::layout::themes::PLOTLY_WHITE;
use plotly::layout::{Axis, HoverMode, Layout, Legend, Margin, RangeSlider};
use plotly::{Plot, Scatter};

use super::menus::{build_menus, secondary_axis_title};
use super::visibility::{TraceGroup, TraceIndex};
use crate::color::generate_palette;
use crate::data::model::{ClassifiedChannels, DerivedSeries, EcgUnit};

// ---------------------------------------------------------------------------
// Scene: traces + layout + menus
// ---------------------------------------------------------------------------

/// A fully built chart, ready to serialise.
pub struct Scene {
    pub plot: Plot,
    pub index: TraceIndex,
    /// Visibility each trace is created with.
    pub initial_visibility: Vec<bool>,
}

impl Scene {
    /// Build the chart for one recording.
    pub fn build(time: &[f64], channels: &ClassifiedChannels, title: &str) -> Self {
        let index = TraceIndex::from_channels(channels);
        let initial_visibility = index.initial_visibility();
        let use_secondary = channels.ecg_raw_count() + channels.reference.len() > 0;

        let series: Vec<&DerivedSeries> = channels
            .eeg
            .iter()
            .chain(&channels.reference)
            .chain(&channels.ecg_mv)
            .chain(&channels.ecg_uv)
            .collect();
        let palette = generate_palette(series.len());

        let mut plot = Plot::new();
        for (i, (s, color)) in series.into_iter().zip(palette).enumerate() {
            let group = index.group(i).unwrap_or(TraceGroup::Eeg);
            plot.add_trace(signal_trace(time, s, group, initial_visibility[i], color));
        }

        let mut layout = Layout::new()
            .title(Title::with_text(title))
            .legend(Legend::new().title(Title::with_text("Channels (click to toggle)")))
            .hover_mode(HoverMode::XUnified)
            .template(&*PLOTLY_WHITE)
            .margin(Margin::new().left(60).right(60).top(80).bottom(40))
            .x_axis(
                Axis::new()
                    .title(Title::with_text("Time (s)"))
                    .range_slider(RangeSlider::new().visible(true)),
            )
            .y_axis(Axis::new().title(Title::with_text("EEG & CM (μV)")))
            .update_menus(build_menus(&index, &initial_visibility));

        if use_secondary {
            layout = layout.y_axis2(
                Axis::new()
                    .title(Title::with_text(secondary_axis_title(EcgUnit::MilliVolt).as_str()))
                    .overlaying("y")
                    .side(AxisSide::Right)
                    .show_grid(false),
            );
        }
        plot.set_layout(layout);

        Scene {
            plot,
            index,
            initial_visibility,
        }
    }

    /// Standalone HTML document; plotly.js is pulled from the CDN.
    pub fn to_html(&self) -> String {
        self.plot.to_html()
    }

    pub fn write_html(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_html())
            .with_context(|| format!("writing HTML to {}", path.display()))
    }
}

/// One line trace. EEG goes on the left axis, everything else on the right;
/// the reference is dotted.
fn signal_trace(
    time: &[f64],
    series: &DerivedSeries,
    group: TraceGroup,
    visible: bool,
    color: Rgb,
) -> Box<Scatter<f64, f64>> {
    let mut line = Line::new().color(color);
    if group == TraceGroup::Reference {
        line = line.dash(DashType::Dot);
    }

    let trace = Scatter::new(time.to_vec(), series.values.clone())
        .name(&series.label)
        .mode(Mode::Lines)
        .line(line)
        .visible(if visible { Visible::True } else { Visible::False });

    match group {
        TraceGroup::Eeg => trace,
        _ => trace.y_axis("y2"),
    }
}
