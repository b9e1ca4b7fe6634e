use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use unit_converter::app::{self, AppError};
use unit_converter::conversion;
use unit_converter::i18n::{self, Translator};
use unit_converter::quantity::Category;
use unit_converter::ui_cli::Console;
use unit_converter::{config, logging};

/// 길이/온도 단위 변환기 (터미널 버전).
#[derive(Debug, Parser)]
#[command(name = "unit_converter_cli", version, about)]
struct Cli {
    /// 표시 언어 (auto/ko/en-us)
    #[arg(short = 'L', long, global = true, default_value = "auto")]
    lang: String,

    /// 디버그 로그 출력
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 한 번만 변환하고 결과를 출력한다.
    Convert {
        category: Category,
        #[arg(allow_negative_numbers = true)]
        value: f64,
        from: String,
        to: String,
    },
    /// 사용 가능한 단위를 출력한다.
    Units { category: Option<Category> },
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match try_run(cli) {
        Ok(code) => code,
        Err(AppError::EndOfInput) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("오류: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<ExitCode, AppError> {
    let mut cfg = config::load_or_default()?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    tracing::info!(lang = %lang, "starting");

    match cli.command {
        None => {
            let mut console = Console::stdio();
            app::run(&mut console, &mut cfg, Path::new(config::CONFIG_FILE), &tr)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Convert {
            category,
            value,
            from,
            to,
        }) => match convert_once(category, value, &from, &to, cfg.decimals, &tr) {
            Ok(line) => {
                println!("{line}");
                Ok(ExitCode::SUCCESS)
            }
            Err(msg) => {
                eprintln!("{msg}");
                Ok(ExitCode::FAILURE)
            }
        },
        Some(Command::Units { category }) => {
            let categories = match category {
                Some(c) => vec![c],
                None => Category::ALL.to_vec(),
            };
            for c in categories {
                println!(
                    "{}: {}",
                    i18n::category_label(c, &tr),
                    c.unit_names().join(", ")
                );
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// `convert` 서브커맨드 한 번을 처리한다. 성공이면 결과 줄, 실패면 사용자용 오류 문장.
fn convert_once(
    category: Category,
    value: f64,
    from: &str,
    to: &str,
    decimals: usize,
    tr: &Translator,
) -> Result<String, String> {
    conversion::convert_str(category, value, from, to)
        .map(|res| res.render(decimals))
        .map_err(|e| conversion::describe_error(&e, tr))
}
