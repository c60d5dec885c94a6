// Settings: persisted UI preferences (language, disclosure state).

pub mod store;

pub use store::{load_settings_from_disk, save_settings_to_disk, AppSettings, APP_SETTINGS};

/// Read settings through a closure; a poisoned lock yields defaults.
pub fn with_settings<F, R>(f: F) -> R
where
    F: FnOnce(&AppSettings) -> R,
{
    match APP_SETTINGS.read() {
        Ok(st) => f(&st),
        Err(_) => f(&AppSettings::default()),
    }
}

/// Modify settings through a closure and persist them.
pub fn with_settings_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut AppSettings) -> R,
{
    let r = match APP_SETTINGS.write() {
        Ok(mut st) => f(&mut st),
        Err(poisoned) => f(&mut poisoned.into_inner()),
    };
    save_settings_to_disk();
    r
}
