mod incident_list;
mod map_view;
mod notification_panel;
mod report_form;
mod stats_panel;

pub use incident_list::IncidentList;
pub use map_view::{MapFilters, MapView};
pub use notification_panel::NotificationPanel;
pub use report_form::ReportForm;
pub use stats_panel::StatsPanel;
