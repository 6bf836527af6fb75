pub mod config;
pub mod dataset;
pub mod error;
pub mod figure;
pub mod render;
pub mod sink;
pub mod transform;

pub use config::{Normalization, RidgelineConfig};
pub use dataset::{RidgelineColumns, TimeKind};
pub use error::RidgelineChartError;
pub use figure::{Figure, TitleLocation};
pub use render::RidgelineRenderer;
pub use sink::{save_figure, FigureSink, PngSink, SvgSink};
pub use transform::{RidgelineFrame, RidgelineRow};
