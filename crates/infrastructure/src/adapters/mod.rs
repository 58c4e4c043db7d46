//! Adapters - Implementations of application ports

mod weather_adapter;

pub use weather_adapter::WeatherAdapter;
