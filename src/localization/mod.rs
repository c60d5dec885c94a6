use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

type Bundle = FluentBundle<FluentResource>;

#[derive(
    strum::EnumIter, strum::Display, Debug, Clone, Copy, PartialEq, Eq, Default,
)]
pub enum SupportedLang {
    #[default]
    #[strum(serialize = "en")]
    English,
    #[strum(serialize = "ru")]
    Russian,
}

impl SupportedLang {
    pub fn code(&self) -> &'static str {
        match self {
            SupportedLang::English => "en",
            SupportedLang::Russian => "ru",
        }
    }

    /// Matches the primary subtag: "ru_RU.UTF-8" -> Russian, "de" -> None.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.to_ascii_lowercase();
        match code.split(['-', '_', '.']).next().unwrap_or_default() {
            "en" => Some(SupportedLang::English),
            "ru" => Some(SupportedLang::Russian),
            _ => None,
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            SupportedLang::English => "English",
            SupportedLang::Russian => "Русский",
        }
    }
}

const SUPPORTED_LANGS: [&str; 2] = ["en", "ru"];
const FALLBACK_LANG: &str = "en";

fn load_ftl_source(lang: &str) -> &'static str {
    match lang {
        "ru" => include_str!("resources/ru.ftl"),
        _ => include_str!("resources/en.ftl"),
    }
}

fn parse_lang(lang_code: &str) -> LanguageIdentifier {
    lang_code
        .parse::<LanguageIdentifier>()
        .unwrap_or_default()
}

// "ru_RU.UTF-8" -> "ru"; unknown -> fallback
fn normalize_lang(mut code: String) -> String {
    code.make_ascii_lowercase();
    let sep = code.find(['-', '_', '.']).unwrap_or(code.len());
    let short = &code[..sep];
    if SUPPORTED_LANGS.contains(&short) {
        short.to_string()
    } else {
        FALLBACK_LANG.to_string()
    }
}

fn detect_system_lang() -> String {
    let sys = sys_locale::get_locale().unwrap_or_default();
    normalize_lang(sys)
}

/// Dotted keys (`date_ranges.start_date.tooltip`) map to Fluent ids with `-`.
fn message_id(key: &str) -> String {
    key.replace('.', "-")
}

struct LocalizationManager {
    current: String,
    fallback: String,
    bundles: HashMap<String, Bundle>,
}

impl LocalizationManager {
    fn new() -> Self {
        let mut bundles: HashMap<String, Bundle> = HashMap::new();
        for &code in SUPPORTED_LANGS.iter() {
            match build_bundle(code) {
                Ok(bundle) => {
                    bundles.insert(code.to_string(), bundle);
                }
                Err(e) => log::error!("{e}"),
            }
        }
        Self {
            current: FALLBACK_LANG.to_string(),
            fallback: FALLBACK_LANG.to_string(),
            bundles,
        }
    }

    fn set_current(&mut self, code: &str) -> Result<(), LocalizationError> {
        let code = normalize_lang(code.to_string());
        if !self.bundles.contains_key(&code) {
            return Err(LocalizationError::UnsupportedLanguage(code));
        }
        self.current = code;
        Ok(())
    }

    fn set_auto(&mut self) -> Result<(), LocalizationError> {
        let detected = detect_system_lang();
        self.set_current(&detected)
    }

    fn format_in(&self, code: &str, id: &str, args: Option<&FluentArgs>) -> Option<String> {
        let bundle = self.bundles.get(code)?;
        let pattern = bundle.get_message(id)?.value()?;
        let mut errors = vec![];
        let s = bundle.format_pattern(pattern, args, &mut errors).to_string();
        if !errors.is_empty() {
            log::warn!("Fluent errors formatting {id} ({code}): {errors:?}");
        }
        Some(s)
    }

    fn format_with_args(&self, key: &str, args: Option<&FluentArgs>) -> String {
        let id = message_id(key);
        self.format_in(&self.current, &id, args)
            .or_else(|| self.format_in(&self.fallback, &id, args))
            .unwrap_or_else(|| format!("[missing: {}]", key))
    }
}

fn build_bundle(code: &str) -> Result<Bundle, LocalizationError> {
    let mut bundle: Bundle = FluentBundle::new(vec![parse_lang(code)]);
    // Plain text in the UI; no bidi isolation marks around placeables.
    bundle.set_use_isolating(false);
    let res = FluentResource::try_new(load_ftl_source(code).to_string())
        .map_err(|_| LocalizationError::InitError(format!("cannot parse {code}.ftl")))?;
    bundle
        .add_resource(res)
        .map_err(|_| LocalizationError::InitError(format!("duplicate messages in {code}.ftl")))?;
    Ok(bundle)
}

thread_local! {
    static LOCALIZATION: RefCell<LocalizationManager> = RefCell::new(LocalizationManager::new());
}

#[derive(Debug, Error)]
pub enum LocalizationError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("Initialization error: {0}")]
    InitError(String),
}

/// Initialize localization. `None` uses the system locale; unsupported
/// languages fall back to English.
pub fn initialize_localization(preferred: Option<SupportedLang>) -> Result<(), LocalizationError> {
    LOCALIZATION.with(|cell| {
        let mut mgr = cell.borrow_mut();
        match preferred {
            Some(lang) => mgr.set_current(lang.code()),
            None => mgr.set_auto().or_else(|_| mgr.set_current(FALLBACK_LANG)),
        }
    })
}

pub fn set_current_language(lang: SupportedLang) -> Result<(), LocalizationError> {
    LOCALIZATION.with(|cell| cell.borrow_mut().set_current(lang.code()))
}

pub fn get_current_language() -> SupportedLang {
    LOCALIZATION.with(|cell| SupportedLang::from_code(&cell.borrow().current).unwrap_or_default())
}

/// Translate a message without arguments.
pub fn translate(key: &str) -> String {
    LOCALIZATION.with(|cell| cell.borrow().format_with_args(key, None))
}

/// Translate a message with arguments given as (&str, String) pairs.
pub fn translate_with(key: &str, args: &[(&str, String)]) -> String {
    let mut fargs = FluentArgs::new();
    for (k, v) in args {
        fargs.set(*k, v.clone());
    }
    LOCALIZATION.with(|cell| cell.borrow().format_with_args(key, Some(&fargs)))
}
