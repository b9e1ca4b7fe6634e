use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::conversion::ConversionError;
use crate::quantity::Category;

/// 켈빈과 섭씨 사이의 오프셋.
pub const KELVIN_OFFSET: f64 = 273.15;

/// 온도 단위를 정의한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 3] = [
        TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Kelvin,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "Celsius",
            TemperatureUnit::Fahrenheit => "Fahrenheit",
            TemperatureUnit::Kelvin => "Kelvin",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemperatureUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" | "celsius" | "°c" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" | "°f" => Ok(TemperatureUnit::Fahrenheit),
            "k" | "kelvin" => Ok(TemperatureUnit::Kelvin),
            _ => Err(ConversionError::UnknownUnit {
                category: Category::Temperature,
                unit: s.to_string(),
            }),
        }
    }
}

/// 주어진 값을 섭씨로 변환한다.
pub fn to_celsius(value: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => value,
        TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        TemperatureUnit::Kelvin => value - KELVIN_OFFSET,
    }
}

/// 섭씨 값을 원하는 단위로 변환한다.
pub fn from_celsius(value_c: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => value_c,
        TemperatureUnit::Fahrenheit => value_c * 9.0 / 5.0 + 32.0,
        TemperatureUnit::Kelvin => value_c + KELVIN_OFFSET,
    }
}

/// 온도를 서로 다른 단위로 변환한다.
///
/// 음수 켈빈 검사는 호출 측(`conversion::validate`)에서 수행한다.
pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    if from == to {
        return value;
    }
    let c = to_celsius(value, from);
    from_celsius(c, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn parses_symbols() {
        assert_eq!("°C".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Celsius);
        assert_eq!("k".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Kelvin);
        assert!("rankine".parse::<TemperatureUnit>().is_err());
    }

    #[test]
    fn minus_forty_is_shared() {
        assert_abs_diff_eq!(
            convert_temperature(-40.0, TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit),
            -40.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn fahrenheit_to_kelvin_goes_through_celsius() {
        assert_abs_diff_eq!(
            convert_temperature(212.0, TemperatureUnit::Fahrenheit, TemperatureUnit::Kelvin),
            373.15,
            epsilon = 1e-9
        );
    }
}
