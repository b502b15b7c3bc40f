use dioxus::prelude::*;

use crate::vm::StatsVm;

#[component]
pub fn StatsPanel(stats: StatsVm) -> Element {
    rsx! {
        dl { class: "stats",
            div { class: "stat",
                dt { "Correct" }
                dd { id: "stat-correct", "{stats.correct_str}" }
            }
            div { class: "stat",
                dt { "Answered" }
                dd { id: "stat-answered", "{stats.answered_str}" }
            }
            div { class: "stat",
                dt { "Avg. time" }
                dd { id: "stat-avg-time", "{stats.average_time_str}" }
            }
            div { class: "stat",
                dt { "Best score" }
                dd { id: "stat-best-score", "{stats.best_score_str}" }
            }
        }
    }
}
