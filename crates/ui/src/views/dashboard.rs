use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::stats::TrackerState;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{StatsPanel, ViewError, ViewState, view_state_from_resource};
use crate::vm::StatsVm;

#[derive(Clone, Debug, PartialEq)]
struct DashboardData {
    stats: StatsVm,
    from_cache: bool,
}

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let stats = ctx.stats();
    let offline = ctx.is_offline();

    let resource = use_resource(move || {
        let stats = stats.clone();
        async move {
            // Before any quiz is loaded, show what the last run left behind.
            let data = match stats.state() {
                TrackerState::Active => DashboardData {
                    stats: StatsVm::from(&stats.snapshot()),
                    from_cache: false,
                },
                TrackerState::Uninitialized => match stats.cached_snapshot().await {
                    Some(cached) => DashboardData {
                        stats: StatsVm::from(&cached),
                        from_cache: true,
                    },
                    None => DashboardData {
                        stats: StatsVm::default(),
                        from_cache: false,
                    },
                },
            };
            Ok::<_, ViewError>(data)
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Dashboard" }
            if offline {
                p { class: "stats-note", "Offline mode: using the built-in quiz." }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    StatsPanel { stats: data.stats }
                    if data.from_cache {
                        p { class: "stats-note", "From your last session" }
                    }
                    Link { class: "cta", to: Route::Quiz {}, "Take a quiz" }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}
