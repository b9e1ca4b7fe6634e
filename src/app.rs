use std::io::{BufRead, Write};
use std::path::Path;
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::i18n::{keys, Translator};
use crate::ui_cli::{self, Console, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
///
/// 변환 오류는 사용자 동작 단위에서 처리되므로 여기까지 올라오지 않는다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 터미널 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 입력 스트림이 끝남
    #[error("입력이 종료되었습니다")]
    EndOfInput,
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &mut Config,
    config_path: &Path,
    tr: &Translator,
) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(console, tr)? {
            MenuChoice::Convert => ui_cli::handle_conversion(console, tr, config)?,
            MenuChoice::ListUnits => ui_cli::handle_list_units(console, tr)?,
            MenuChoice::Settings => {
                if ui_cli::handle_settings(console, tr, config)? {
                    config.save_to(config_path)?;
                    console.say(&tr.t(keys::SETTINGS_SAVED))?;
                }
            }
            MenuChoice::Exit => {
                console.say(&tr.t(keys::APP_EXIT))?;
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn settings_change_is_saved_before_exit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let tr = Translator::new("en");
        let mut cfg = Config::default();
        let mut console = Console::new(Cursor::new("3\n2\n4\n0\n".to_string()), Vec::new());

        run(&mut console, &mut cfg, &path, &tr).unwrap();

        assert_eq!(cfg.decimals, 4);
        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains("decimals = 4"), "{saved}");
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("Settings saved."), "{out}");
        assert!(out.trim_end().ends_with("Exiting application."), "{out}");
    }

    #[test]
    fn cancelled_settings_do_not_touch_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let tr = Translator::new("en");
        let mut cfg = Config::default();
        let mut console = Console::new(Cursor::new("3\n\n0\n".to_string()), Vec::new());

        run(&mut console, &mut cfg, &path, &tr).unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn conversion_then_exit() {
        let dir = tempfile::tempdir().unwrap();
        let tr = Translator::new("en");
        let mut cfg = Config::default();
        let script = "1\n1\n1000\nmeters\nkilometers\n0\n";
        let mut console = Console::new(Cursor::new(script.to_string()), Vec::new());

        run(&mut console, &mut cfg, &dir.path().join("config.toml"), &tr).unwrap();

        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("1000.00 meters = 1.00 kilometers"), "{out}");
    }
}
