use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

use crate::quantity::Category;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_CONVERT: &str = "main_menu.convert";
    pub const MAIN_MENU_LIST_UNITS: &str = "main_menu.list_units";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const CONVERT_HEADING: &str = "convert.heading";
    pub const CONVERT_CATEGORY_OPTIONS: &str = "convert.category_options";
    pub const CONVERT_PROMPT_CATEGORY: &str = "convert.prompt_category";
    pub const CONVERT_PROMPT_VALUE: &str = "convert.prompt_value";
    pub const CONVERT_PROMPT_FROM_UNIT: &str = "convert.prompt_from_unit";
    pub const CONVERT_PROMPT_TO_UNIT: &str = "convert.prompt_to_unit";
    pub const CONVERT_AVAILABLE_UNITS: &str = "convert.available_units";

    pub const UNITS_HEADING: &str = "units.heading";

    pub const CATEGORY_LENGTH: &str = "category.length";
    pub const CATEGORY_TEMPERATURE: &str = "category.temperature";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_PROMPT_DECIMALS: &str = "settings.prompt_decimals";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_NEGATIVE_KELVIN: &str = "error.negative_kelvin";
    pub const ERROR_UNKNOWN_UNIT: &str = "error.unknown_unit";
    pub const ERROR_UNKNOWN_CATEGORY: &str = "error.unknown_category";
    pub const ERROR_NON_FINITE: &str = "error.non_finite";

    pub const GUI_TITLE: &str = "gui.title";
    pub const GUI_CATEGORY: &str = "gui.category";
    pub const GUI_VALUE: &str = "gui.value";
    pub const GUI_FROM: &str = "gui.from";
    pub const GUI_TO: &str = "gui.to";
    pub const GUI_SWAP: &str = "gui.swap";
    pub const GUI_CONVERT: &str = "gui.convert";
    pub const GUI_SETTINGS: &str = "gui.settings";
    pub const GUI_LANGUAGE: &str = "gui.language";
    pub const GUI_DECIMALS: &str = "gui.decimals";
    pub const GUI_SAVE: &str = "gui.save";
    pub const GUI_SAVED: &str = "gui.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        if overrides.is_some() {
            tracing::info!(lang = lang_code, "language pack loaded");
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 번역 → 영어 순으로 찾는다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let builtin = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        builtin.unwrap_or("[missing translation]").to_string()
    }
}

/// 물리량의 현지화된 이름.
pub fn category_label(category: Category, tr: &Translator) -> String {
    match category {
        Category::Length => tr.t(keys::CATEGORY_LENGTH),
        Category::Temperature => tr.t(keys::CATEGORY_TEMPERATURE),
    }
}

/// `{name}` 자리표시자를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" | "ko-kr" => Some(c),
        "en" | "en-us" => Some(c),
        "en-uk" | "en-gb" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LC_ALL", "LANG"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵 또는 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = match toml::from_str(src) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed language pack");
            return None;
        }
    };
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Unit Converter ===",
        MAIN_MENU_CONVERT => "1) 단위 변환",
        MAIN_MENU_LIST_UNITS => "2) 단위 목록",
        MAIN_MENU_SETTINGS => "3) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        CONVERT_HEADING => "\n-- 단위 변환 --",
        CONVERT_CATEGORY_OPTIONS => "1) 길이  2) 온도",
        CONVERT_PROMPT_CATEGORY => "항목 번호를 입력: ",
        CONVERT_PROMPT_VALUE => "값 입력: ",
        CONVERT_PROMPT_FROM_UNIT => "입력 단위: ",
        CONVERT_PROMPT_TO_UNIT => "변환 단위: ",
        CONVERT_AVAILABLE_UNITS => "사용 가능한 단위:",
        UNITS_HEADING => "\n-- 단위 목록 --",
        CATEGORY_LENGTH => "길이",
        CATEGORY_TEMPERATURE => "온도",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT => "현재 언어: {language}, 소수점 자리수: {decimals}",
        SETTINGS_OPTIONS => "1) 언어  2) 소수점 자리수",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_PROMPT_LANGUAGE => "언어 코드(auto/ko/en-us): ",
        SETTINGS_PROMPT_DECIMALS => "소수점 자리수(0-10): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 저장되었습니다.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_NEGATIVE_KELVIN => "켈빈 온도는 음수일 수 없습니다!",
        ERROR_UNKNOWN_UNIT => "알 수 없는 단위입니다: {unit}",
        ERROR_UNKNOWN_CATEGORY => "알 수 없는 물리량: {category}",
        ERROR_NON_FINITE => "유한한 숫자가 아닌 값: {value}",
        GUI_TITLE => "단위 변환기",
        GUI_CATEGORY => "물리량",
        GUI_VALUE => "값",
        GUI_FROM => "입력 단위",
        GUI_TO => "변환 단위",
        GUI_SWAP => "⇄ 단위 바꾸기",
        GUI_CONVERT => "변환",
        GUI_SETTINGS => "설정",
        GUI_LANGUAGE => "언어",
        GUI_DECIMALS => "소수점 자리수",
        GUI_SAVE => "저장",
        GUI_SAVED => "저장되었습니다. 언어 변경은 다시 시작하면 적용됩니다.",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Unit Converter ===",
        MAIN_MENU_CONVERT => "1) Convert",
        MAIN_MENU_LIST_UNITS => "2) List units",
        MAIN_MENU_SETTINGS => "3) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        CONVERT_HEADING => "\n-- Unit Conversion --",
        CONVERT_CATEGORY_OPTIONS => "1) Length  2) Temperature",
        CONVERT_PROMPT_CATEGORY => "Enter item number: ",
        CONVERT_PROMPT_VALUE => "Value: ",
        CONVERT_PROMPT_FROM_UNIT => "From unit: ",
        CONVERT_PROMPT_TO_UNIT => "To unit: ",
        CONVERT_AVAILABLE_UNITS => "Available units:",
        UNITS_HEADING => "\n-- Units --",
        CATEGORY_LENGTH => "Length",
        CATEGORY_TEMPERATURE => "Temperature",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Current language: {language}, decimal places: {decimals}",
        SETTINGS_OPTIONS => "1) Language  2) Decimal places",
        SETTINGS_PROMPT_CHANGE => "Number to change (Enter to cancel): ",
        SETTINGS_PROMPT_LANGUAGE => "Language code (auto/ko/en-us): ",
        SETTINGS_PROMPT_DECIMALS => "Decimal places (0-10): ",
        SETTINGS_INVALID => "Invalid input, nothing changed.",
        SETTINGS_SAVED => "Settings saved.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_NEGATIVE_KELVIN => "Temperature in Kelvin cannot be negative!",
        ERROR_UNKNOWN_UNIT => "Unknown unit: {unit}",
        ERROR_UNKNOWN_CATEGORY => "unknown category: {category}",
        ERROR_NON_FINITE => "value is not a finite number: {value}",
        GUI_TITLE => "Unit Converter",
        GUI_CATEGORY => "Category",
        GUI_VALUE => "Value",
        GUI_FROM => "From unit",
        GUI_TO => "To unit",
        GUI_SWAP => "⇄ Swap units",
        GUI_CONVERT => "Convert",
        GUI_SETTINGS => "Settings",
        GUI_LANGUAGE => "Language",
        GUI_DECIMALS => "Decimal places",
        GUI_SAVE => "Save",
        GUI_SAVED => "Saved. Language changes apply after restart.",
        _ => return None,
    })
}
