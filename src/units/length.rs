use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::conversion::ConversionError;
use crate::quantity::Category;

/// 길이 단위. 내부 기준은 미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Meters,
    Kilometers,
    Centimeters,
    Millimeters,
    Miles,
    Yards,
    Feet,
    Inches,
}

impl LengthUnit {
    /// 화면 표시 순서대로 정렬된 전체 단위 목록.
    pub const ALL: [LengthUnit; 8] = [
        LengthUnit::Meters,
        LengthUnit::Kilometers,
        LengthUnit::Centimeters,
        LengthUnit::Millimeters,
        LengthUnit::Miles,
        LengthUnit::Yards,
        LengthUnit::Feet,
        LengthUnit::Inches,
    ];

    /// 이 단위 1개가 몇 미터인지를 반환한다.
    pub const fn meters_per_unit(self) -> f64 {
        match self {
            LengthUnit::Meters => 1.0,
            LengthUnit::Kilometers => 1000.0,
            LengthUnit::Centimeters => 0.01,
            LengthUnit::Millimeters => 0.001,
            LengthUnit::Miles => 1609.34,
            LengthUnit::Yards => 0.9144,
            LengthUnit::Feet => 0.3048,
            LengthUnit::Inches => 0.0254,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            LengthUnit::Meters => "meters",
            LengthUnit::Kilometers => "kilometers",
            LengthUnit::Centimeters => "centimeters",
            LengthUnit::Millimeters => "millimeters",
            LengthUnit::Miles => "miles",
            LengthUnit::Yards => "yards",
            LengthUnit::Feet => "feet",
            LengthUnit::Inches => "inches",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LengthUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(LengthUnit::Meters),
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => {
                Ok(LengthUnit::Kilometers)
            }
            "cm" | "centimeter" | "centimeters" => Ok(LengthUnit::Centimeters),
            "mm" | "millimeter" | "millimeters" => Ok(LengthUnit::Millimeters),
            "mi" | "mile" | "miles" => Ok(LengthUnit::Miles),
            "yd" | "yard" | "yards" => Ok(LengthUnit::Yards),
            "ft" | "foot" | "feet" => Ok(LengthUnit::Feet),
            "in" | "inch" | "inches" => Ok(LengthUnit::Inches),
            _ => Err(ConversionError::UnknownUnit {
                category: Category::Length,
                unit: s.to_string(),
            }),
        }
    }
}

fn to_meter(value: f64, unit: LengthUnit) -> f64 {
    value * unit.meters_per_unit()
}

fn from_meter(value_m: f64, unit: LengthUnit) -> f64 {
    value_m / unit.meters_per_unit()
}

/// 길이를 다른 단위로 변환한다.
///
/// 같은 단위끼리는 부동소수 오차 없이 입력값을 그대로 돌려준다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    if from == to {
        return value;
    }
    let m = to_meter(value, from);
    from_meter(m, to)
}
