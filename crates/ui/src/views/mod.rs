mod dashboard;
mod quiz;
mod state;
mod stats_panel;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use dashboard::DashboardView;
pub use quiz::QuizView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use stats_panel::StatsPanel;
