use std::rc::Rc;

use crate::analytics::Analytics;
use crate::config::SiteConfig;
use crate::events::catalog::EventCatalog;
use crate::events::store::store_from_config;
use crate::lead::submit::WebhookClient;

/// Collaborators shared by every page, provided once at the app root.
#[derive(Clone)]
pub struct SiteContext {
    pub config: Rc<SiteConfig>,
    pub catalog: Rc<EventCatalog>,
    pub webhook: Rc<WebhookClient>,
    pub analytics: Analytics,
}

impl SiteContext {
    pub fn from_config(config: SiteConfig) -> Self {
        let catalog = EventCatalog::new(store_from_config(&config), config.display_tz);
        let webhook = WebhookClient::new(config.webhook_url.clone());
        let analytics = Analytics::new(config.analytics_id.clone());
        Self {
            config: Rc::new(config),
            catalog: Rc::new(catalog),
            webhook: Rc::new(webhook),
            analytics,
        }
    }
}

impl PartialEq for SiteContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::query::EventFilterCriteria;
    use futures::executor::block_on;

    #[test]
    fn unconfigured_store_yields_empty_lists() {
        let site = SiteContext::from_config(SiteConfig::from_lookup(|_| None));
        assert!(block_on(site.catalog.list_events(&EventFilterCriteria::default())).is_empty());
        assert!(!site.analytics.is_enabled());
    }

    #[test]
    fn equality_is_identity() {
        let site = SiteContext::from_config(SiteConfig::from_lookup(|_| None));
        let other = SiteContext::from_config(SiteConfig::from_lookup(|_| None));
        assert!(site == site.clone());
        assert!(site != other);
    }
}
