use chrono_tz::Tz;
use log::warn;

#[cfg(debug_assertions)]
pub fn default_webhook_url() -> &'static str {
    "http://localhost:3001/webhook/join"  // Local echo server while developing
}

#[cfg(not(debug_assertions))]
pub fn default_webhook_url() -> &'static str {
    "https://hooks.designcircle.community/webhook/join"
}

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Kolkata;

/// Everything the site reads from its build environment.
///
/// WASM bundles have no process environment, so values are baked in at
/// compile time through `option_env!` and handed to [`SiteConfig::from_lookup`].
#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub webhook_url: String,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub analytics_id: Option<String>,
    pub display_tz: Tz,
}

impl SiteConfig {
    pub fn load() -> Self {
        Self::from_lookup(|key| match key {
            "LEAD_WEBHOOK_URL" => option_env!("LEAD_WEBHOOK_URL"),
            "SUPABASE_URL" => option_env!("SUPABASE_URL"),
            "SUPABASE_ANON_KEY" => option_env!("SUPABASE_ANON_KEY"),
            "GA_TRACKING_ID" => option_env!("GA_TRACKING_ID"),
            "DISPLAY_TIMEZONE" => option_env!("DISPLAY_TIMEZONE"),
            _ => None,
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<&'static str>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let display_tz = match read("DISPLAY_TIMEZONE") {
            Some(name) => name.parse::<Tz>().unwrap_or_else(|_| {
                warn!("Unknown DISPLAY_TIMEZONE '{}', using {}", name, DEFAULT_TIMEZONE);
                DEFAULT_TIMEZONE
            }),
            None => DEFAULT_TIMEZONE,
        };

        Self {
            webhook_url: read("LEAD_WEBHOOK_URL").unwrap_or_else(|| default_webhook_url().to_string()),
            supabase_url: read("SUPABASE_URL").map(|u| u.trim_end_matches('/').to_string()),
            supabase_anon_key: read("SUPABASE_ANON_KEY"),
            analytics_id: read("GA_TRACKING_ID"),
            display_tz,
        }
    }

    /// Store credentials, only when both halves are present.
    pub fn store_credentials(&self) -> Option<(&str, &str)> {
        match (&self.supabase_url, &self.supabase_anon_key) {
            (Some(url), Some(key)) => Some((url.as_str(), key.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_environment_uses_defaults() {
        let config = SiteConfig::from_lookup(|_| None);
        assert_eq!(config.webhook_url, default_webhook_url());
        assert_eq!(config.display_tz, DEFAULT_TIMEZONE);
        assert!(config.analytics_id.is_none());
        assert!(config.store_credentials().is_none());
    }

    #[test]
    fn blank_values_count_as_missing() {
        let config = SiteConfig::from_lookup(|key| match key {
            "GA_TRACKING_ID" => Some("   "),
            "SUPABASE_URL" => Some("https://abc.supabase.co/"),
            _ => None,
        });
        assert!(config.analytics_id.is_none());
        assert_eq!(config.supabase_url.as_deref(), Some("https://abc.supabase.co"));
        // url without a key is still unconfigured
        assert!(config.store_credentials().is_none());
    }

    #[test]
    fn reads_credentials_and_timezone() {
        let config = SiteConfig::from_lookup(|key| match key {
            "SUPABASE_URL" => Some("https://abc.supabase.co"),
            "SUPABASE_ANON_KEY" => Some("anon"),
            "DISPLAY_TIMEZONE" => Some("Europe/Helsinki"),
            "GA_TRACKING_ID" => Some("G-TEST123"),
            _ => None,
        });
        assert_eq!(config.store_credentials(), Some(("https://abc.supabase.co", "anon")));
        assert_eq!(config.display_tz, chrono_tz::Europe::Helsinki);
        assert_eq!(config.analytics_id.as_deref(), Some("G-TEST123"));
    }

    #[test]
    fn bad_timezone_falls_back() {
        let config = SiteConfig::from_lookup(|key| match key {
            "DISPLAY_TIMEZONE" => Some("Mars/Olympus"),
            _ => None,
        });
        assert_eq!(config.display_tz, DEFAULT_TIMEZONE);
    }
}
