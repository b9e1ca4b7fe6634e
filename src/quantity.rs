use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::conversion::ConversionError;
use crate::units::{LengthUnit, TemperatureUnit};

/// 변환 가능한 물리량 종류를 나타낸다.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Category {
    #[default]
    Length,
    Temperature,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Length, Category::Temperature];

    pub const fn name(self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Temperature => "Temperature",
        }
    }

    /// 해당 물리량에서 선택 가능한 단위 이름을 표시 순서대로 반환한다.
    pub fn unit_names(self) -> Vec<&'static str> {
        match self {
            Category::Length => LengthUnit::ALL.iter().map(|u| u.name()).collect(),
            Category::Temperature => TemperatureUnit::ALL.iter().map(|u| u.name()).collect(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "length" | "len" | "l" => Ok(Category::Length),
            "temperature" | "temp" | "t" => Ok(Category::Temperature),
            _ => Err(ConversionError::UnknownCategory(s.to_string())),
        }
    }
}

/// 카테고리별로 파싱이 끝난 단위 쌍.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitPair {
    Length { from: LengthUnit, to: LengthUnit },
    Temperature { from: TemperatureUnit, to: TemperatureUnit },
}

impl UnitPair {
    pub fn category(&self) -> Category {
        match self {
            UnitPair::Length { .. } => Category::Length,
            UnitPair::Temperature { .. } => Category::Temperature,
        }
    }

    pub fn from_name(&self) -> &'static str {
        match self {
            UnitPair::Length { from, .. } => from.name(),
            UnitPair::Temperature { from, .. } => from.name(),
        }
    }

    pub fn to_name(&self) -> &'static str {
        match self {
            UnitPair::Length { to, .. } => to.name(),
            UnitPair::Temperature { to, .. } => to.name(),
        }
    }

    /// 어느 한쪽이라도 켈빈이면 참.
    pub fn touches_kelvin(&self) -> bool {
        matches!(
            self,
            UnitPair::Temperature { from: TemperatureUnit::Kelvin, .. }
                | UnitPair::Temperature { to: TemperatureUnit::Kelvin, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_round_trip() {
        for c in Category::ALL {
            assert_eq!(c.name().parse::<Category>().unwrap(), c);
        }
        assert!(matches!(
            "mass".parse::<Category>(),
            Err(ConversionError::UnknownCategory(_))
        ));
    }

    #[test]
    fn kelvin_detection() {
        let pair = UnitPair::Temperature {
            from: TemperatureUnit::Celsius,
            to: TemperatureUnit::Kelvin,
        };
        assert!(pair.touches_kelvin());
        let pair = UnitPair::Length {
            from: LengthUnit::Meters,
            to: LengthUnit::Feet,
        };
        assert!(!pair.touches_kelvin());
    }
}
