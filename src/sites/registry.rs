use crate::config::Config;
use crate::sites::base::SiteAdapter;
use crate::sites::beta191::Beta191;
use crate::sites::god855::God855;
use crate::sites::nex855::Nex855;
use crate::sites::siam212::Siam212;
use std::sync::Arc;

pub struct SiteRegistry {
    sites: Vec<Arc<dyn SiteAdapter>>,
}

impl SiteRegistry {
    pub fn new(config: Arc<Config>) -> Self {
        let sites: Vec<Arc<dyn SiteAdapter>> = vec![
            Arc::new(Siam212::new(config.clone())),
            Arc::new(God855::new(config.clone())),
            Arc::new(Nex855::new(config.clone())),
            Arc::new(Beta191::new(config)),
        ];

        Self { sites }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SiteAdapter>> {
        self.sites
            .iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.sites.iter().map(|s| s.name()).collect()
    }
}
