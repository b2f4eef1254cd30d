pub(super) const fn default_true() -> bool {
    true
}

pub(super) fn default_position() -> String {
    "bottom".to_string()
}

pub(super) const fn default_queue_bound() -> usize {
    64
}

pub(super) fn default_desktop_appname() -> String {
    "Toaster".to_string()
}

pub(super) const fn default_seen_cache_size() -> usize {
    256
}
