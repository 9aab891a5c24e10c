use jukebox_core::NAV_MIN;
use web_sys as web;

/// Local-storage key for the persisted frame index.
pub const STORAGE_KEY_CURRENT: &str = "current";

fn local_storage() -> Option<web::Storage> {
    web::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Read the persisted frame index; anything missing or unparsable reads as
/// the first frame. Range snapping is the cursor's job.
pub fn read_current() -> u32 {
    local_storage()
        .and_then(|s| s.get_item(STORAGE_KEY_CURRENT).ok().flatten())
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(NAV_MIN)
}

/// Persist the frame index after a navigation step. Write failures
/// (private browsing, quota) only cost the cursor position across reloads.
pub fn write_current(value: u32) {
    if let Some(s) = local_storage() {
        if s.set_item(STORAGE_KEY_CURRENT, &value.to_string()).is_err() {
            log::warn!("[storage] could not persist frame index {value}");
        }
    }
}
