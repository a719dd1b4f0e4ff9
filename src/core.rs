pub mod estimate;
pub mod forecast;
pub mod history;
pub mod mode;
pub mod point;
pub mod rate;
pub mod reference;
pub mod sample;
pub mod settings;
pub mod summary;

pub use self::{
    estimate::Estimate,
    mode::Mode,
    point::{Measurement, Point, Snapshot},
    sample::Sample,
    settings::Settings,
    summary::Summary,
};
