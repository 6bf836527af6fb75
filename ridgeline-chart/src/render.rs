use arrow::record_batch::RecordBatch;
use tracing::debug;

use crate::config::RidgelineConfig;
use crate::dataset::RidgelineColumns;
use crate::error::RidgelineChartError;
use crate::figure::{Annotation, FillBetween, Figure};
use crate::transform::{transform, RidgelineFrame};

/// Edge drawn around every ridge
const EDGE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const EDGE_WIDTH: f32 = 1.0;

/// Draws smoothed, vertically offset area series per group onto a [`Figure`]
#[derive(Debug, Clone, Default)]
pub struct RidgelineRenderer {
    config: RidgelineConfig,
}

impl RidgelineRenderer {
    pub fn new(config: RidgelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RidgelineConfig {
        &self.config
    }

    /// Compute the derived rows without drawing anything
    pub fn transform(
        &self,
        dataset: &RecordBatch,
        columns: &RidgelineColumns,
    ) -> Result<RidgelineFrame, RidgelineChartError> {
        transform(dataset, columns, &self.config)
    }

    /// Draw one filled area and one label per group into the figure's axes.
    ///
    /// Groups are painted from the highest rank down so lower lanes overlap
    /// the ones above them. The figure is left untouched when the
    /// configuration or the dataset is rejected.
    #[tracing::instrument(skip_all)]
    pub fn render(
        &self,
        dataset: &RecordBatch,
        columns: &RidgelineColumns,
        figure: &mut Figure,
    ) -> Result<RidgelineFrame, RidgelineChartError> {
        let frame = self.transform(dataset, columns)?;
        let axes = figure.axes_mut();

        for group in &frame.draw_order {
            let rows: Vec<_> = frame.group_rows(group).collect();
            let (Some(first), Some(color)) = (rows.first(), frame.color(group)) else {
                continue;
            };
            let offset = first.offset;
            let min_time = rows.iter().map(|r| r.time).fold(f64::INFINITY, f64::min);
            let [red, green, blue, _] = color;

            axes.fill_between(FillBetween {
                name: group.clone(),
                x: rows.iter().map(|r| r.time).collect(),
                y: rows.iter().map(|r| r.top).collect(),
                y2: vec![offset; rows.len()],
                fill: [red, green, blue, self.config.alpha],
                edge_color: EDGE_COLOR,
                edge_width: EDGE_WIDTH,
            });
            axes.annotate(Annotation::new(
                group.clone(),
                (min_time, offset),
                [self.config.label_offset, 0.0],
            ));
        }

        axes.set_y_visible(false);
        axes.set_frame_visible(false);
        axes.set_xlim(frame.time_domain);
        axes.set_x_kind(frame.time_kind);
        axes.set_x_format(self.config.time_format.clone());
        debug!("drew {} groups", frame.draw_order.len());
        Ok(frame)
    }
}
