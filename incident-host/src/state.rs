use incident_core::ticker::SharedDashboard;
use incident_core::{Dashboard, DashboardConfig};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct AppState {
    pub dashboard: SharedDashboard,
}

impl AppState {
    pub fn mount(config: DashboardConfig) -> Self {
        Self {
            dashboard: Arc::new(Mutex::new(Dashboard::mount(config))),
        }
    }
}
