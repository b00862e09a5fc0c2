//! Report artifacts written for presentation consumers.

pub mod json;
pub mod series_csv;
pub mod time_series;
pub mod traits;

pub use json::JsonRenderer;
pub use series_csv::SimilarityCsvRenderer;
pub use time_series::TimeSeriesRenderer;
pub use traits::Renderer;

/// Every built-in renderer.
pub fn all_renderers() -> Vec<Box<dyn Renderer>> {
    vec![
        Box::new(TimeSeriesRenderer),
        Box::new(SimilarityCsvRenderer),
        Box::new(JsonRenderer),
    ]
}
