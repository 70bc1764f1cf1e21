pub mod batch;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod label;
pub mod layout;
pub mod pool;
pub mod region;
pub mod render;
pub mod text_metrics;
pub mod theme;

pub use batch::{BatchRequest, OutputFormat, generate_batch};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, load_config};
pub use error::{LayoutError, LayoutResult};
pub use label::LabelNode;
pub use layout::{LayoutGenerator, Strategy};
pub use pool::ImagePool;
pub use region::{Bounds, Region, RegionKind, RegionType};
pub use render::render_svg;
pub use theme::Theme;
