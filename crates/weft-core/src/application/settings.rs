//! Composer settings: base directory and cache toggle.

/// Mutable settings of one composer instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    base_dir: String,
    cache_enabled: bool,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory prefix for template reads, always empty or ending in `/`.
    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    pub fn set_base_dir(&mut self, dir: impl Into<String>) {
        self.base_dir = normalize_base_dir(dir.into());
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    pub fn set_cache_enabled(&mut self, enabled: bool) {
        self.cache_enabled = enabled;
    }

    /// Path handed to the template source for `name`.
    ///
    /// Plain concatenation; names are not cleaned or checked.
    pub fn resolve(&self, name: &str) -> String {
        format!("{}{}", self.base_dir, name)
    }
}

/// Append a separator unless `dir` is empty or already ends with one.
pub fn normalize_base_dir(mut dir: String) -> String {
    if !dir.is_empty() && !dir.ends_with('/') && !dir.ends_with(std::path::MAIN_SEPARATOR) {
        dir.push('/');
    }
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty_and_uncached() {
        let s = Settings::new();
        assert_eq!(s.base_dir(), "");
        assert!(!s.cache_enabled());
    }

    #[test]
    fn base_dir_gains_trailing_separator() {
        let mut s = Settings::new();
        s.set_base_dir("./templates");
        assert_eq!(s.base_dir(), "./templates/");
    }

    #[test]
    fn base_dir_keeps_existing_separator() {
        let mut s = Settings::new();
        s.set_base_dir("views/");
        assert_eq!(s.base_dir(), "views/");
    }

    #[test]
    fn empty_base_dir_stays_empty() {
        let mut s = Settings::new();
        s.set_base_dir("views");
        s.set_base_dir("");
        assert_eq!(s.base_dir(), "");
        assert_eq!(s.resolve("a.html"), "a.html");
    }

    #[test]
    fn resolve_concatenates() {
        let mut s = Settings::new();
        s.set_base_dir("views");
        assert_eq!(s.resolve("partials/nav.html"), "views/partials/nav.html");
    }
}
