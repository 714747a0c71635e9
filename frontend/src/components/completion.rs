//! Composant de fin de transaction

use devpay_core::TransactionSummary;
use leptos::*;

#[component]
pub fn CompletionCard(summary: TransactionSummary, #[prop(into)] on_new: Callback<()>) -> impl IntoView {
    view! {
        <div class="completion-card">
            <div class="completion-icon">"✔"</div>
            <h2>"SUCCESSFULLY"</h2>
            <p class="comment">"Proof of transaction has been sent. Thank you for transacting with me!"</p>

            <div class="summary">
                <div><span class="summary-key">"Time:"</span> <span>{summary.completed_at_display()}</span></div>
                <div><span class="summary-key">"Product:"</span> <span class="keyword">{summary.product_name}</span></div>
                <div><span class="summary-key">"Status:"</span> <span class="success">"Success"</span></div>
            </div>

            <button class="primary-button" on:click=move |_| on_new.call(())>"NEW_TRANSACTION()"</button>
        </div>
    }
}
