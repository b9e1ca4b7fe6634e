use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::conversion;
use crate::i18n::{self, keys, Translator};
use crate::quantity::Category;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Convert,
    ListUnits,
    Settings,
    Exit,
}

/// 프롬프트 입출력을 묶는다. 실제 실행은 stdin/stdout, 테스트는 메모리 버퍼를 쓴다.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// 한 줄을 출력한다.
    pub fn say(&mut self, line: &str) -> Result<(), AppError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// 프롬프트를 출력하고 한 줄을 읽는다. 입력이 끝나면 `EndOfInput`.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(AppError::EndOfInput);
        }
        Ok(buf.trim().to_string())
    }

    fn read_f64(&mut self, prompt: &str, tr: &Translator) -> Result<f64, AppError> {
        loop {
            let s = self.read_line(prompt)?;
            match s.parse::<f64>() {
                Ok(v) => return Ok(v),
                Err(_) => self.say(&tr.t(keys::ERROR_INVALID_NUMBER))?,
            }
        }
    }
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    tr: &Translator,
) -> Result<MenuChoice, AppError> {
    console.say(&tr.t(keys::MAIN_MENU_TITLE))?;
    console.say(&tr.t(keys::MAIN_MENU_CONVERT))?;
    console.say(&tr.t(keys::MAIN_MENU_LIST_UNITS))?;
    console.say(&tr.t(keys::MAIN_MENU_SETTINGS))?;
    console.say(&tr.t(keys::MAIN_MENU_EXIT))?;
    loop {
        let sel = console.read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.as_str() {
            "1" => return Ok(MenuChoice::Convert),
            "2" => return Ok(MenuChoice::ListUnits),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => console.say(&tr.t(keys::INVALID_SELECTION_RETRY))?,
        }
    }
}

fn map_category(sel: &str) -> Option<Category> {
    match sel {
        "1" => Some(Category::Length),
        "2" => Some(Category::Temperature),
        other => other.parse().ok(),
    }
}

/// 단위 변환 메뉴를 처리한다. 변환 오류는 여기서 메시지로 보여주고 끝낸다.
pub fn handle_conversion<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    tr: &Translator,
    cfg: &Config,
) -> Result<(), AppError> {
    console.say(&tr.t(keys::CONVERT_HEADING))?;
    console.say(&tr.t(keys::CONVERT_CATEGORY_OPTIONS))?;
    let category = loop {
        let sel = console.read_line(&tr.t(keys::CONVERT_PROMPT_CATEGORY))?;
        if sel.is_empty() {
            break cfg.default_category;
        }
        if let Some(category) = map_category(&sel) {
            break category;
        }
        console.say(&tr.t(keys::INVALID_SELECTION_RETRY))?;
    };
    console.say(&format!(
        "{} {}",
        tr.t(keys::CONVERT_AVAILABLE_UNITS),
        category.unit_names().join(", ")
    ))?;
    let value = console.read_f64(&tr.t(keys::CONVERT_PROMPT_VALUE), tr)?;
    let (default_from, default_to) = cfg.default_units.names_for(category);
    let from_unit = read_unit(console, &tr.t(keys::CONVERT_PROMPT_FROM_UNIT), default_from)?;
    let to_unit = read_unit(console, &tr.t(keys::CONVERT_PROMPT_TO_UNIT), default_to)?;

    let outcome = conversion::convert_str(category, value, &from_unit, &to_unit);
    console.say(&conversion::describe_outcome(&outcome, cfg.decimals, tr))?;
    Ok(())
}

/// 빈 입력이면 기본 단위를 사용한다.
fn read_unit<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
    default: &str,
) -> Result<String, AppError> {
    let unit = console.read_line(&format!("{prompt}[{default}] "))?;
    if unit.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(unit)
    }
}

/// 카테고리별 사용 가능한 단위를 출력한다.
pub fn handle_list_units<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    tr: &Translator,
) -> Result<(), AppError> {
    console.say(&tr.t(keys::UNITS_HEADING))?;
    for category in Category::ALL {
        console.say(&format!(
            "{}: {}",
            i18n::category_label(category, tr),
            category.unit_names().join(", ")
        ))?;
    }
    Ok(())
}

/// 설정 메뉴를 처리한다. 값이 바뀌었으면 true를 반환한다.
pub fn handle_settings<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    tr: &Translator,
    cfg: &mut Config,
) -> Result<bool, AppError> {
    console.say(&tr.t(keys::SETTINGS_HEADING))?;
    console.say(&i18n::fill_template(
        &tr.t(keys::SETTINGS_CURRENT),
        &[
            ("language", cfg.language.clone()),
            ("decimals", cfg.decimals.to_string()),
        ],
    ))?;
    console.say(&tr.t(keys::SETTINGS_OPTIONS))?;
    let sel = console.read_line(&tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    match sel.as_str() {
        "" => Ok(false),
        "1" => {
            let lang = console.read_line(&tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
            if lang.is_empty() {
                console.say(&tr.t(keys::SETTINGS_INVALID))?;
                return Ok(false);
            }
            cfg.language = lang.to_lowercase();
            Ok(true)
        }
        "2" => {
            let input = console.read_line(&tr.t(keys::SETTINGS_PROMPT_DECIMALS))?;
            match input.parse::<usize>() {
                Ok(d) if d <= 10 => {
                    cfg.decimals = d;
                    Ok(true)
                }
                _ => {
                    console.say(&tr.t(keys::SETTINGS_INVALID))?;
                    Ok(false)
                }
            }
        }
        _ => {
            console.say(&tr.t(keys::SETTINGS_INVALID))?;
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_conversion(script: &str) -> String {
        let tr = Translator::new("en");
        let mut console = Console::new(Cursor::new(script.to_string()), Vec::new());
        handle_conversion(&mut console, &tr, &Config::default()).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn converts_miles_to_meters() {
        let out = run_conversion("1\n1\nmiles\nmeters\n");
        assert!(out.contains("1.00 miles = 1609.34 meters"), "{out}");
    }

    #[test]
    fn retries_bad_number_then_converts() {
        let out = run_conversion("2\nabc\n100\nC\nF\n");
        assert!(out.contains("Please enter a number."), "{out}");
        assert!(out.contains("100.00 Celsius = 212.00 Fahrenheit"), "{out}");
    }

    #[test]
    fn empty_units_use_configured_defaults() {
        let out = run_conversion("\n1\n\n\n");
        assert!(out.contains("1.00 meters = 3.28 feet"), "{out}");
    }

    #[test]
    fn negative_kelvin_reports_domain_error() {
        let out = run_conversion("temperature\n-1\nKelvin\nCelsius\n");
        assert!(out.contains("Temperature in Kelvin cannot be negative!"), "{out}");
        assert!(!out.contains(" = "), "{out}");
    }

    #[test]
    fn unknown_unit_is_reported_not_fatal() {
        let out = run_conversion("1\n5\nparsecs\nmeters\n");
        assert!(out.contains("Unknown unit: parsecs"), "{out}");
    }

    #[test]
    fn end_of_input_stops_the_prompt() {
        let tr = Translator::new("en");
        let mut console = Console::new(Cursor::new(String::new()), Vec::new());
        assert!(matches!(
            main_menu(&mut console, &tr),
            Err(AppError::EndOfInput)
        ));
    }

    #[test]
    fn settings_rejects_out_of_range_decimals() {
        let tr = Translator::new("en");
        let mut cfg = Config::default();
        let mut console = Console::new(Cursor::new("2\n42\n".to_string()), Vec::new());
        assert!(!handle_settings(&mut console, &tr, &mut cfg).unwrap());
        assert_eq!(cfg.decimals, 2);

        let mut console = Console::new(Cursor::new("2\n4\n".to_string()), Vec::new());
        assert!(handle_settings(&mut console, &tr, &mut cfg).unwrap());
        assert_eq!(cfg.decimals, 4);
    }
}
