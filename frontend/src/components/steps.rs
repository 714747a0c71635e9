//! Step indicator

use devpay_core::WorkflowStep;
use leptos::*;

#[component]
pub fn StepIndicator(#[prop(into)] step: Signal<WorkflowStep>) -> impl IntoView {
    view! {
        <ol class="steps">
            {WorkflowStep::ALL
                .into_iter()
                .map(|s| {
                    view! {
                        <li
                            class="step"
                            class:active=move || step.get() == s
                            class:done={move || step.get() > s}
                        >
                            <span class="step-index">{s.index() + 1}</span>
                            <span class="step-title">{s.title()}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ol>
    }
}
