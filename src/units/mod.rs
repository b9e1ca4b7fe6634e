//! 단위 정의 및 변환 모듈 모음.

pub mod length;
pub mod temperature;

pub use length::{convert_length, LengthUnit};
pub use temperature::{convert_temperature, TemperatureUnit};
