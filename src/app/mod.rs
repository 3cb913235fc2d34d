pub mod app_events;
pub mod sensor_app;
pub mod state;
pub mod ui;

pub use sensor_app::SensorFusionApp;
