//! Classification of application-internal pages.
//!
//! Internal pages are rendered by the browser itself, so they never report
//! network load progress and the toolbar progress bar stays hidden for them.

use url::Url;

pub mod constants {
    pub const CHROME_SCHEME: &str = "chrome";
    pub const CHROME_NATIVE_SCHEME: &str = "chrome-native";
    pub const ABOUT_SCHEME: &str = "about";

    pub const NTP_HOST: &str = "newtab";
    pub const BOOKMARKS_HOST: &str = "bookmarks";
    pub const RECENT_TABS_HOST: &str = "recent-tabs";
    pub const HISTORY_HOST: &str = "history";
    pub const DOWNLOADS_HOST: &str = "downloads";
    pub const MANAGEMENT_HOST: &str = "management";

    pub const NTP_URL: &str = "chrome-native://newtab/";
    pub const NTP_NON_NATIVE_URL: &str = "chrome://newtab/";
    pub const NTP_ABOUT_URL: &str = "about:newtab";

    /// Hosts served by native pages under the `chrome` scheme.
    pub const NATIVE_HOSTS: &[&str] = &[
        NTP_HOST,
        BOOKMARKS_HOST,
        RECENT_TABS_HOST,
        HISTORY_HOST,
        DOWNLOADS_HOST,
        MANAGEMENT_HOST,
    ];
}

pub trait PageClassifier {
    /// True for pages rendered by the application rather than loaded from the web.
    fn is_internal_page(&self, url: &Url, is_private: bool) -> bool;

    fn is_ntp_url(&self, url: &Url) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NativePageClassifier;

impl NativePageClassifier {
    fn is_about_newtab(url: &Url) -> bool {
        url.scheme() == constants::ABOUT_SCHEME && url.path() == constants::NTP_HOST
    }
}

impl PageClassifier for NativePageClassifier {
    fn is_internal_page(&self, url: &Url, is_private: bool) -> bool {
        if Self::is_about_newtab(url) {
            return true;
        }
        match url.scheme() {
            constants::CHROME_NATIVE_SCHEME => true,
            constants::CHROME_SCHEME => match url.host_str() {
                // Private browsing shows the web history page instead.
                Some(constants::HISTORY_HOST) => !is_private,
                Some(host) => constants::NATIVE_HOSTS.contains(&host),
                None => false,
            },
            _ => false,
        }
    }

    fn is_ntp_url(&self, url: &Url) -> bool {
        if Self::is_about_newtab(url) {
            return true;
        }
        matches!(
            url.scheme(),
            constants::CHROME_SCHEME | constants::CHROME_NATIVE_SCHEME
        ) && url.host_str() == Some(constants::NTP_HOST)
    }
}
