#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use eframe::{egui, App, Frame};
use image::GenericImageView;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use unit_converter::{
    config,
    conversion::{self, ConversionError, ConversionResult},
    i18n::{self, keys},
    logging,
    quantity::Category,
};

/// 길이/온도 단위 변환기 (GUI 버전).
#[derive(Debug, Parser)]
#[command(name = "unit_converter", version, about)]
struct GuiArgs {
    /// 이번 실행에만 쓸 표시 언어 (auto/ko/en-us). 설정 파일에는 저장하지 않는다.
    #[arg(short = 'L', long)]
    lang: Option<String>,

    /// 디버그 로그 출력
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), eframe::Error> {
    let args = GuiArgs::parse();
    logging::init(args.verbose);

    let app_cfg = config::load_or_default().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unavailable, using defaults");
        config::Config::default()
    });

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([480.0, 360.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let app = GuiApp::new(app_cfg, PathBuf::from(config::CONFIG_FILE), args.lang);
    let title = app.tr.t(keys::GUI_TITLE);
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                tracing::warn!("font setup: {e}");
            }
            Box::new(app)
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글을 표시하기 위해 디스크에서 폰트를 찾아 우선 적용한다.
/// 1) assets/fonts/
/// 2) 운영체제 기본 한글 폰트
/// 모두 실패하면 egui 기본 폰트를 유지하고 Err를 반환한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<PathBuf> = vec![
        PathBuf::from("assets/fonts/malgun.ttf"),
        PathBuf::from("assets/fonts/NotoSansKR-Regular.ttf"),
        PathBuf::from("/System/Library/Fonts/AppleSDGothicNeo.ttc"),
        PathBuf::from("/usr/share/fonts/truetype/nanum/NanumGothic.ttf"),
        PathBuf::from("/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc"),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].iter().map(|f| fonts.join(f)));
    }
    let p = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or_else(|| "no Korean-capable font found, keeping default fonts".to_string())?;
    let bytes = fs::read(p).map_err(|e| format!("failed to read font ({}): {e}", p.display()))?;
    apply_font_bytes(ctx, bytes, "korean_font");
    tracing::debug!(path = %p.display(), "font loaded");
    Ok(())
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn unit_combo(ui: &mut egui::Ui, id: &str, value: &mut String, options: &[&'static str]) {
    egui::ComboBox::from_id_source(id)
        .selected_text(value.as_str())
        .show_ui(ui, |ui| {
            for name in options {
                ui.selectable_value(value, name.to_string(), *name);
            }
        });
}

struct GuiApp {
    config: config::Config,
    config_path: PathBuf,
    tr: i18n::Translator,
    category: Category,
    value: f64,
    from_unit: String,
    to_unit: String,
    outcome: Option<Result<ConversionResult, ConversionError>>,
    show_settings: bool,
    lang_input: String,
    decimals_input: usize,
    settings_status: Option<String>,
}

impl GuiApp {
    /// `lang_override`는 화면 언어만 바꾸고 `config.language`(저장 대상)는 건드리지 않는다.
    fn new(config: config::Config, config_path: PathBuf, lang_override: Option<String>) -> Self {
        let lang_code = i18n::resolve_language(
            lang_override.as_deref().unwrap_or("auto"),
            Some(config.language.as_str()),
        );
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        tracing::info!(lang = %lang_code, "GUI language resolved");
        let category = config.default_category;
        let (from, to) = config.default_units.names_for(category);
        Self {
            lang_input: config.language.clone(),
            decimals_input: config.decimals,
            config,
            config_path,
            tr,
            category,
            value: 0.0,
            from_unit: from.into(),
            to_unit: to.into(),
            outcome: None,
            show_settings: false,
            settings_status: None,
        }
    }

    /// 카테고리를 바꾸면 단위를 해당 카테고리의 기본값으로 되돌린다.
    fn set_category(&mut self, category: Category) {
        if self.category == category {
            return;
        }
        self.category = category;
        let (from, to) = self.config.default_units.names_for(category);
        self.from_unit = from.into();
        self.to_unit = to.into();
        self.outcome = None;
    }

    fn swap_units(&mut self) {
        std::mem::swap(&mut self.from_unit, &mut self.to_unit);
    }

    fn run_conversion(&mut self) {
        self.outcome = Some(conversion::convert_str(
            self.category,
            self.value,
            &self.from_unit,
            &self.to_unit,
        ));
    }

    /// 표시할 결과 문장과 오류 여부.
    fn result_line(&self) -> Option<(String, bool)> {
        self.outcome.as_ref().map(|o| {
            (
                conversion::describe_outcome(o, self.config.decimals, &self.tr),
                o.is_err(),
            )
        })
    }

    fn save_settings(&mut self) {
        self.config.language = self.lang_input.trim().to_lowercase();
        self.config.decimals = self.decimals_input.min(10);
        self.config.default_category = self.category;
        self.settings_status = Some(match self.config.save_to(&self.config_path) {
            Ok(()) => self.tr.t(keys::GUI_SAVED),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }

    fn ui_form(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::GUI_TITLE));
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("conv_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(tr.t(keys::GUI_CATEGORY));
                    let mut selected = self.category;
                    egui::ComboBox::from_id_source("conv_category")
                        .selected_text(i18n::category_label(selected, &tr))
                        .show_ui(ui, |ui| {
                            for c in Category::ALL {
                                ui.selectable_value(&mut selected, c, i18n::category_label(c, &tr));
                            }
                        });
                    self.set_category(selected);
                    ui.end_row();

                    ui.label(tr.t(keys::GUI_VALUE));
                    ui.add(egui::DragValue::new(&mut self.value).speed(0.1));
                    ui.end_row();

                    let units = self.category.unit_names();
                    label_with_tip(ui, &tr.t(keys::GUI_FROM), &units.join(", "));
                    unit_combo(ui, "conv_from", &mut self.from_unit, &units);
                    ui.end_row();

                    label_with_tip(ui, &tr.t(keys::GUI_TO), &units.join(", "));
                    unit_combo(ui, "conv_to", &mut self.to_unit, &units);
                    ui.end_row();
                });
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button(tr.t(keys::GUI_CONVERT)).clicked() || enter {
                    self.run_conversion();
                }
                if ui.button(tr.t(keys::GUI_SWAP)).clicked() {
                    self.swap_units();
                }
            });
            if let Some((line, is_err)) = self.result_line() {
                ui.add_space(6.0);
                if is_err {
                    ui.colored_label(egui::Color32::from_rgb(220, 80, 80), line);
                } else {
                    ui.label(egui::RichText::new(line).strong().size(18.0));
                }
            }
        });
    }

    fn ui_settings(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        egui::Grid::new("settings_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label(tr.t(keys::GUI_LANGUAGE));
                ui.text_edit_singleline(&mut self.lang_input);
                ui.end_row();

                ui.label(tr.t(keys::GUI_DECIMALS));
                ui.add(egui::Slider::new(&mut self.decimals_input, 0..=10));
                ui.end_row();
            });
        if ui.button(tr.t(keys::GUI_SAVE)).clicked() {
            self.save_settings();
        }
        if let Some(status) = &self.settings_status {
            ui.small(status.as_str());
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(self.tr.t(keys::GUI_SETTINGS)).clicked() {
                    self.show_settings = !self.show_settings;
                }
            });
        });

        if self.show_settings {
            let mut open = true;
            egui::Window::new(self.tr.t(keys::GUI_SETTINGS))
                .collapsible(false)
                .resizable(false)
                .open(&mut open)
                .show(ctx, |ui| self.ui_settings(ui));
            if !open {
                self.show_settings = false;
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui_form(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> GuiApp {
        GuiApp::new(config::Config::default(), PathBuf::from("unused.toml"), None)
    }

    #[test]
    fn starts_with_configured_length_defaults() {
        let app = app();
        assert_eq!(app.category, Category::Length);
        assert_eq!(app.from_unit, "meters");
        assert_eq!(app.to_unit, "feet");
        assert!(app.result_line().is_none());
    }

    #[test]
    fn switching_category_resets_units_and_result() {
        let mut app = app();
        app.value = 3.0;
        app.run_conversion();
        app.set_category(Category::Temperature);
        assert_eq!(app.from_unit, "Celsius");
        assert_eq!(app.to_unit, "Fahrenheit");
        assert!(app.outcome.is_none());
    }

    #[test]
    fn negative_kelvin_shows_error_line() {
        let mut app = app();
        app.set_category(Category::Temperature);
        app.value = -1.0;
        app.from_unit = "Kelvin".into();
        app.to_unit = "Celsius".into();
        app.run_conversion();
        let (_, is_err) = app.result_line().unwrap();
        assert!(is_err);
        assert!(matches!(app.outcome, Some(Err(ConversionError::NegativeKelvin))));
    }

    #[test]
    fn swap_then_convert() {
        let mut app = app();
        app.value = 1000.0;
        app.to_unit = "kilometers".into();
        app.swap_units();
        assert_eq!(app.from_unit, "kilometers");
        app.swap_units();
        app.run_conversion();
        let res = app.outcome.clone().unwrap().unwrap();
        assert!((res.value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn save_settings_writes_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut app = GuiApp::new(config::Config::default(), path.clone(), None);
        app.decimals_input = 4;
        app.lang_input = " KO ".into();
        app.save_settings();
        let saved = config::load_from(&path).unwrap();
        assert_eq!(saved.decimals, 4);
        assert_eq!(saved.language, "ko");
    }

    #[test]
    fn lang_override_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut app = GuiApp::new(config::Config::default(), path.clone(), Some("ko".into()));
        assert_eq!(app.tr.language(), i18n::Language::Ko);
        assert_eq!(app.lang_input, "auto");
        app.decimals_input = 3;
        app.save_settings();
        let saved = config::load_from(&path).unwrap();
        assert_eq!(saved.decimals, 3);
        assert_eq!(saved.language, "auto");
    }

    #[test]
    fn gui_args_accept_lang_and_verbose() {
        let args = GuiArgs::try_parse_from(["unit_converter", "--lang=ko", "-v"]).unwrap();
        assert_eq!(args.lang.as_deref(), Some("ko"));
        assert!(args.verbose);
        let args = GuiArgs::try_parse_from(["unit_converter", "-L", "en-us"]).unwrap();
        assert_eq!(args.lang.as_deref(), Some("en-us"));
        assert!(!args.verbose);
        assert!(GuiArgs::try_parse_from(["unit_converter"]).unwrap().lang.is_none());
    }
}
