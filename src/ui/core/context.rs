use std::sync::Arc;

use crate::{
    backend::{Backend, ReferenceData},
    config::Config,
    icons::IconService,
    logger::Logger,
    ui::components::task_modal::SessionIdentity,
};

/// Services and shared data handed to the application component
pub struct AppContext {
    pub backend: Arc<dyn Backend>,
    pub reference: Arc<ReferenceData>,
    pub config: Config,
    pub session: SessionIdentity,
    pub icons: IconService,
    pub logger: Logger,
}

impl AppContext {
    pub fn new(backend: Arc<dyn Backend>, config: Config, logger: Logger) -> Self {
        let session = SessionIdentity::from_config(&config.session);
        let icons = IconService::new(config.display.icon_theme);
        Self {
            backend,
            reference: Arc::new(ReferenceData::default()),
            config,
            session,
            icons,
            logger,
        }
    }
}
