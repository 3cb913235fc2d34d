pub mod data_point;
pub mod audio_data;
pub mod geo_fix;
pub mod results;

pub use data_point::DataPoint;
pub use audio_data::AudioData;
pub use geo_fix::GeoFix;
pub use results::AnalysisResult;
