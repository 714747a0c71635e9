//! Composant de sélection du moyen de paiement

use devpay_core::PaymentMethod;
use leptos::*;

#[component]
pub fn MethodSelector(
    #[prop(into)] selected: Signal<Option<PaymentMethod>>,
    #[prop(into)] on_select: Callback<PaymentMethod>,
) -> impl IntoView {
    view! {
        <div class="method-selector">
            <div class="comment">"// Select a payment provider to inject:"</div>
            <div class="method-grid">
                {PaymentMethod::ALL
                    .into_iter()
                    .map(|method| {
                        view! {
                            <div
                                class="method-card"
                                class:selected=move || selected.get() == Some(method)
                                on:click=move |_| on_select.call(method)
                            >
                                <div class="method-head">
                                    <span class="method-handle">{method.handle()}</span>
                                    <span class="method-label">{method.label()}</span>
                                </div>
                                <div class="method-description">{method.description()}</div>
                                <div class="method-install">
                                    "$ npm install " <span class="method-id">{method.id()}</span>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
