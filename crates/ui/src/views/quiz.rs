use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{StatsPanel, ViewError, ViewState, view_state_from_resource};
use crate::vm::{FeedbackVm, OptionVm, QuizIntent, QuizVm, StatsVm, start_quiz};

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz();
    let backend = ctx.backend();

    let vm = use_signal(|| None::<QuizVm>);
    let stats = use_signal(StatsVm::default);
    let busy = use_signal(|| false);

    let resource = use_resource({
        let quiz = quiz.clone();
        let backend = backend.clone();
        move || {
            let quiz = quiz.clone();
            let backend = backend.clone();
            let mut vm = vm;
            let mut stats = stats;
            async move {
                let started = start_quiz(&quiz, backend.as_deref()).await;
                stats.set(StatsVm::from(&quiz.stats().snapshot()));
                vm.set(Some(started));
                Ok::<_, ViewError>(())
            }
        }
    });

    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut vm = vm;
        let mut stats = stats;
        let mut busy = busy;

        match intent {
            QuizIntent::Select(letter) => {
                if let Some(vm) = vm.write().as_mut() {
                    vm.select(letter);
                }
            }
            QuizIntent::Next => {
                if let Some(vm) = vm.write().as_mut() {
                    vm.next(&quiz);
                }
            }
            QuizIntent::Previous => {
                if let Some(vm) = vm.write().as_mut() {
                    vm.previous(&quiz);
                }
            }
            QuizIntent::Submit => {
                if busy() {
                    return;
                }
                let quiz = quiz.clone();
                let backend = backend.clone();
                spawn(async move {
                    let Some(mut vm_value) = vm.write().take() else {
                        return;
                    };
                    busy.set(true);
                    let updated = vm_value.submit(&quiz, backend.as_deref()).await;
                    vm.set(Some(vm_value));
                    busy.set(false);
                    if let Some(snapshot) = updated {
                        stats.set(StatsVm::from(&snapshot));
                    }
                });
            }
        }
    });

    let state = view_state_from_resource(&resource);
    let current = vm.read().clone();
    let body = match state {
        ViewState::Idle => rsx! {
            p { "Idle" }
        },
        ViewState::Loading => rsx! {
            p { "Loading quiz..." }
        },
        ViewState::Ready(()) => match current {
            Some(current) => rsx! {
                QuizBody { vm: current, busy: busy(), on_intent: dispatch }
            },
            None => rsx! {
                p { "Checking answer..." }
            },
        },
        ViewState::Error(err) => rsx! {
            p { "{err.message()}" }
        },
    };

    rsx! {
        div { class: "page",
            h2 { "Quiz" }
            StatsPanel { stats: stats() }

            {body}
        }
    }
}

#[component]
fn QuizBody(vm: QuizVm, busy: bool, on_intent: Callback<QuizIntent>) -> Element {
    let Some(question) = vm.question() else {
        return rsx! {
            p { "No questions available." }
        };
    };
    let feedback = vm.feedback().cloned();

    rsx! {
        section { class: "question",
            p { class: "question-meta", "{question.counter} · {question.subject} · {question.kind}" }
            h3 { "{question.text}" }
            div { class: "options",
                for option in question.options {
                    OptionRow {
                        key: "{option.letter}",
                        option: option.clone(),
                        on_select: move |letter: String| on_intent.call(QuizIntent::Select(letter)),
                    }
                }
            }
            if let Some(feedback) = feedback {
                Feedback { feedback }
            }
            if let Some(notice) = vm.notice() {
                p { class: "notice", "{notice}" }
            }
            div { class: "quiz-actions",
                button {
                    id: "quiz-prev",
                    onclick: move |_| on_intent.call(QuizIntent::Previous),
                    "Previous"
                }
                button {
                    id: "quiz-submit",
                    disabled: busy,
                    onclick: move |_| on_intent.call(QuizIntent::Submit),
                    "Submit"
                }
                button {
                    id: "quiz-next",
                    onclick: move |_| on_intent.call(QuizIntent::Next),
                    "Next"
                }
            }
        }
    }
}

#[component]
fn OptionRow(option: OptionVm, on_select: EventHandler<String>) -> Element {
    let letter = option.letter.clone();
    rsx! {
        button {
            class: "{option.class}",
            onclick: move |_| on_select.call(letter.clone()),
            span { class: "option-letter", "{option.letter}." }
            span { "{option.text}" }
        }
    }
}

#[component]
fn Feedback(feedback: FeedbackVm) -> Element {
    rsx! {
        div { class: "{feedback.class()}",
            p { "{feedback.message()}" }
            if let Some(explanation) = feedback.explanation.as_deref() {
                p { class: "explanation", "{explanation}" }
            }
        }
    }
}
