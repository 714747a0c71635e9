//! DevPay - Frontend Rust/Leptos Application
//!
//! A WebAssembly checkout: pick a payment method, pay, upload the proof.
//! All navigation goes through the shared [`Workflow`]; this crate only
//! renders its current stage.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  StepIndicator                                               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Checkout (matches on Stage)                                 │
//! │  ├── MethodSelector   (Selection)                            │
//! │  ├── PaymentDetails   (Detail)                               │
//! │  ├── UploadSection    (Proof)                                │
//! │  └── CompletionCard   (Complete)                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - Relay endpoint and receiving accounts
//! - [`components`] - UI components
//! - [`services`] - Relay communication

use devpay_core::{PaymentMethod, Stage, Workflow, WorkflowResult, WorkflowStep};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod components;
pub mod config;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 DevPay - Starting Leptos App");

    // Mount the application
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=Checkout/>
                </Routes>
            </main>
        </Router>
    }
}

/// Editor-tab name shown for each step.
pub fn active_file(step: WorkflowStep) -> &'static str {
    match step {
        WorkflowStep::Selection => "profile.config.js",
        WorkflowStep::Detail => "payment.env",
        WorkflowStep::Proof => "deploy.sh",
        WorkflowStep::Complete => "build.log",
    }
}

/// Apply a workflow action, logging refused transitions.
fn apply(workflow: RwSignal<Workflow>, action: impl FnOnce(&mut Workflow) -> WorkflowResult<()>) {
    workflow.update(|w| {
        if let Err(e) = action(w) {
            log::warn!("⚠️ {}", e);
        }
    });
}

#[component]
fn Checkout() -> impl IntoView {
    let workflow = create_rw_signal(Workflow::new());
    let stage = create_memo(move |_| workflow.with(|w| w.stage().clone()));
    let step = Signal::derive(move || stage.with(Stage::step));
    let selected = Signal::derive(move || workflow.with(Workflow::selected_method));

    let on_select = Callback::new(move |method: PaymentMethod| apply(workflow, |w| w.select_method(method)));
    let on_confirm = Callback::new(move |_: ()| apply(workflow, Workflow::confirm_detail));
    let on_back = Callback::new(move |_: ()| apply(workflow, Workflow::back));
    let on_new = Callback::new(move |_: ()| apply(workflow, Workflow::reset));

    view! {
        <Title text=move || format!("{} - DevPayment", active_file(step.get()))/>

        <div class="container">
            <StepIndicator step=step/>

            {move || match stage.get() {
                Stage::Selection => view! {
                    <div class="screen">
                        <div class="comment">"// Initializing developer profile configuration..."</div>
                        <MethodSelector selected=selected on_select=on_select/>
                    </div>
                }
                .into_view(),
                Stage::Detail(method) => view! {
                    <PaymentDetails method=method on_confirm=on_confirm on_back=on_back/>
                }
                .into_view(),
                Stage::Proof(_) => view! { <UploadSection workflow=workflow on_back=on_back/> }.into_view(),
                Stage::Complete(summary) => view! { <CompletionCard summary=summary on_new=on_new/> }.into_view(),
            }}
        </div>
    }
}
