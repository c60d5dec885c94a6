// Settings store: data types, global state, load/save.

use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::localization::SupportedLang;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppSettings {
    // UI language (None = auto/system). Stored as "en"/"ru" or null.
    #[serde(
        default,
        serialize_with = "serialize_language_opt",
        deserialize_with = "deserialize_language_opt"
    )]
    pub language: Option<SupportedLang>,
    // Disclosure expansion per section, keyed "disclosure.<id>.expanded"
    #[serde(default)]
    pub disclosures: BTreeMap<String, bool>,
}

impl AppSettings {
    pub fn disclosure_key(section_id: &str) -> String {
        format!("disclosure.{section_id}.expanded")
    }

    pub fn disclosure_expanded(&self, section_id: &str) -> Option<bool> {
        self.disclosures
            .get(&Self::disclosure_key(section_id))
            .copied()
    }

    pub fn set_disclosure_expanded(&mut self, section_id: &str, expanded: bool) {
        self.disclosures
            .insert(Self::disclosure_key(section_id), expanded);
    }

    pub fn load_from_file(path: &std::path::Path) -> std::io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let s: AppSettings = serde_json::from_str(&data)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(s)
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let data = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, data)
    }
}

fn deserialize_language_opt<'de, D>(deserializer: D) -> Result<Option<SupportedLang>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(match opt.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("en") => Some(SupportedLang::English),
        Some("ru") => Some(SupportedLang::Russian),
        // "auto" or anything unknown
        _ => None,
    })
}

fn serialize_language_opt<S>(value: &Option<SupportedLang>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(lang) => serializer.serialize_some(lang.code()),
        None => serializer.serialize_none(),
    }
}

lazy_static! {
    pub static ref APP_SETTINGS: RwLock<AppSettings> = RwLock::new(AppSettings::default());
    // Disabled in tests so toggling sections does not write app_settings.json.
    static ref PERSIST: RwLock<bool> = RwLock::new(!cfg!(test));
}

fn settings_file_path() -> PathBuf {
    if let Ok(p) = std::env::var("MAP_DATA_SETTINGS_PATH") {
        return PathBuf::from(p);
    }
    PathBuf::from("app_settings.json")
}

pub fn load_settings_from_disk() {
    let path = settings_file_path();
    match AppSettings::load_from_file(&path) {
        Ok(s) => {
            if let Ok(mut st) = APP_SETTINGS.write() {
                *st = s;
            }
            log::info!("Loaded settings from {}", path.to_string_lossy());
        }
        Err(e) => {
            // Keep defaults if missing/unreadable
            log::info!(
                "Using default settings; cannot load {}: {}",
                path.to_string_lossy(),
                e
            );
        }
    }
}

pub fn save_settings_to_disk() {
    if !PERSIST.read().map(|g| *g).unwrap_or(false) {
        return;
    }
    let path = settings_file_path();
    let Ok(st) = APP_SETTINGS.read().map(|g| g.clone()) else {
        return;
    };
    if let Err(e) = st.save_to_file(&path) {
        log::error!(
            "Failed to save settings to {}: {}",
            path.to_string_lossy(),
            e
        );
    } else {
        log::info!("Saved settings to {}", path.to_string_lossy());
    }
}
