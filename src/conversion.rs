use thiserror::Error;
use tracing::debug;

use crate::i18n::{self, keys, Translator};
use crate::quantity::{Category, UnitPair};
use crate::units::*;

/// 결과 문자열의 기본 소수점 자리수.
pub const DEFAULT_DECIMALS: usize = 2;
const MAX_DECIMALS: usize = 10;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// 켈빈이 포함된 변환에 음수 값이 들어옴
    #[error("켈빈 온도는 음수일 수 없습니다")]
    NegativeKelvin,
    /// 해당 물리량에 없는 단위 문자열
    #[error("알 수 없는 {category} 단위: {unit}")]
    UnknownUnit { category: Category, unit: String },
    /// 지원하지 않는 물리량
    #[error("알 수 없는 물리량: {0}")]
    UnknownCategory(String),
    /// NaN 또는 무한대 입력
    #[error("유한한 숫자가 아닌 값: {0}")]
    NonFiniteValue(f64),
}

/// 사용자 동작 한 번에 해당하는 변환 요청.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest {
    pub value: f64,
    pub units: UnitPair,
}

impl ConversionRequest {
    /// 문자열 단위명을 카테고리에 맞는 enum으로 파싱해 요청을 만든다.
    ///
    /// 단위 문자열 예시는 `meters`, `ft`, `mi`, `C`, `Kelvin` 등을 사용할 수 있다.
    pub fn parse(
        category: Category,
        value: f64,
        from_unit: &str,
        to_unit: &str,
    ) -> Result<Self, ConversionError> {
        let units = match category {
            Category::Length => UnitPair::Length {
                from: from_unit.parse()?,
                to: to_unit.parse()?,
            },
            Category::Temperature => UnitPair::Temperature {
                from: from_unit.parse()?,
                to: to_unit.parse()?,
            },
        };
        Ok(Self { value, units })
    }
}

/// 변환 결과. 요청과 계산값을 함께 보관한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionResult {
    pub request: ConversionRequest,
    pub value: f64,
}

impl ConversionResult {
    /// `{value} {from} = {result} {to}` 형식의 결과 문자열을 만든다.
    pub fn render(&self, decimals: usize) -> String {
        let d = decimals.min(MAX_DECIMALS);
        format!(
            "{:.*} {} = {:.*} {}",
            d,
            self.request.value,
            self.request.units.from_name(),
            d,
            self.value,
            self.request.units.to_name(),
        )
    }
}

/// 변환 전에 입력값을 검사한다. 켈빈이 양쪽 중 하나라도 포함되면 음수를 거부한다.
pub fn validate(request: &ConversionRequest) -> Result<(), ConversionError> {
    if !request.value.is_finite() {
        return Err(ConversionError::NonFiniteValue(request.value));
    }
    if request.value < 0.0 && request.units.touches_kelvin() {
        return Err(ConversionError::NegativeKelvin);
    }
    Ok(())
}

/// 검사를 통과한 요청만 해당 카테고리의 변환기로 넘긴다.
pub fn convert(request: ConversionRequest) -> Result<ConversionResult, ConversionError> {
    if let Err(e) = validate(&request) {
        debug!(?request, error = %e, "conversion rejected");
        return Err(e);
    }
    let value = match request.units {
        UnitPair::Length { from, to } => convert_length(request.value, from, to),
        UnitPair::Temperature { from, to } => convert_temperature(request.value, from, to),
    };
    debug!(?request, result = value, "converted");
    Ok(ConversionResult { request, value })
}

/// 문자열 입력을 파싱, 검사, 변환까지 한 번에 처리한다.
pub fn convert_str(
    category: Category,
    value: f64,
    from_unit: &str,
    to_unit: &str,
) -> Result<ConversionResult, ConversionError> {
    let request = ConversionRequest::parse(category, value, from_unit, to_unit)?;
    convert(request)
}

/// 오류를 사용자에게 보여줄 문장으로 바꾼다. 음수 켈빈은 전용 문구를 사용한다.
pub fn describe_error(err: &ConversionError, tr: &Translator) -> String {
    match err {
        ConversionError::NegativeKelvin => tr.t(keys::ERROR_NEGATIVE_KELVIN),
        ConversionError::UnknownUnit { unit, .. } => {
            i18n::fill_template(&tr.t(keys::ERROR_UNKNOWN_UNIT), &[("unit", unit.clone())])
        }
        ConversionError::UnknownCategory(name) => format!(
            "{}: {}",
            tr.t(keys::ERROR_PREFIX),
            i18n::fill_template(&tr.t(keys::ERROR_UNKNOWN_CATEGORY), &[("category", name.clone())])
        ),
        ConversionError::NonFiniteValue(v) => format!(
            "{}: {}",
            tr.t(keys::ERROR_PREFIX),
            i18n::fill_template(&tr.t(keys::ERROR_NON_FINITE), &[("value", v.to_string())])
        ),
    }
}

/// 변환 결과나 오류를 화면에 표시할 한 줄로 만든다.
pub fn describe_outcome(
    outcome: &Result<ConversionResult, ConversionError>,
    decimals: usize,
    tr: &Translator,
) -> String {
    match outcome {
        Ok(res) => res.render(decimals),
        Err(e) => describe_error(e, tr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_unit_from_other_category() {
        let err = ConversionRequest::parse(Category::Length, 1.0, "Kelvin", "meters").unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnknownUnit {
                category: Category::Length,
                unit: "Kelvin".into()
            }
        );
    }

    #[test]
    fn negative_length_is_allowed() {
        let res = convert_str(Category::Length, -2.0, "m", "cm").unwrap();
        assert!((res.value + 200.0).abs() < 1e-9);
    }

    #[test]
    fn negative_celsius_to_fahrenheit_is_allowed() {
        assert!(convert_str(Category::Temperature, -10.0, "C", "F").is_ok());
    }

    #[test]
    fn nan_is_rejected() {
        let err = convert_str(Category::Length, f64::NAN, "m", "cm").unwrap_err();
        assert!(matches!(err, ConversionError::NonFiniteValue(_)));
    }

    #[test]
    fn render_clamps_decimals() {
        let res = convert_str(Category::Length, 1.0, "m", "m").unwrap();
        assert_eq!(res.render(0), "1 meters = 1 meters");
        assert_eq!(res.render(99), "1.0000000000 meters = 1.0000000000 meters");
    }

    #[test]
    fn describe_error_uses_dedicated_kelvin_message() {
        let tr = Translator::new("en");
        assert_eq!(
            describe_error(&ConversionError::NegativeKelvin, &tr),
            "Temperature in Kelvin cannot be negative!"
        );
        let msg = describe_error(&ConversionError::UnknownCategory("mass".into()), &tr);
        assert_eq!(msg, "Error: unknown category: mass");
    }

    #[test]
    fn non_finite_message_follows_language() {
        let err = convert_str(Category::Length, f64::INFINITY, "m", "cm").unwrap_err();
        assert_eq!(
            describe_error(&err, &Translator::new("en")),
            "Error: value is not a finite number: inf"
        );
        assert_eq!(
            describe_error(&err, &Translator::new("ko")),
            "오류: 유한한 숫자가 아닌 값: inf"
        );
    }

    #[derive(Clone, Default)]
    struct LogBuf(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn rejected_input_stays_below_info() {
        let buf = LogBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            assert!(convert_str(Category::Temperature, -5.0, "K", "C").is_err());
            assert!(convert_str(Category::Length, f64::NAN, "m", "ft").is_err());
        });
        let logged = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(logged.is_empty(), "{logged}");
    }
}
