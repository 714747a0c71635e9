//! Payment instructions for the selected method.
//!
//! The wallet number starts masked and can be revealed or copied; the QR
//! image is saved as `QRIS_PAYMENT.jpg`.

use devpay_core::{PaymentInstructions, PaymentMethod, QR_DOWNLOAD_NAME};
use gloo_timers::future::TimeoutFuture;
use leptos::*;

use crate::config::{payment_directory, COPY_FEEDBACK_MS};
use crate::services::{copy_label, download_image, download_label};

#[component]
pub fn PaymentDetails(
    method: PaymentMethod,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_back: Callback<()>,
) -> impl IntoView {
    let directory = payment_directory();
    let (reveal, set_reveal) = create_signal(false);
    let (copied, set_copied) = create_signal(false);
    let (downloading, set_downloading) = create_signal(false);

    let body = match directory.instructions(method) {
        PaymentInstructions::Wallet(wallet) => {
            let masked = wallet.masked_number();
            let number = wallet.number.clone();
            let full_number = wallet.number.clone();
            let on_copy = move |_| {
                if let Some(window) = web_sys::window() {
                    let _ = window.navigator().clipboard().write_text(&full_number);
                }
                set_copied.set(true);
                spawn_local(async move {
                    TimeoutFuture::new(COPY_FEEDBACK_MS).await;
                    set_copied.try_set(false);
                });
            };
            view! {
                <div class="config-block">
                    <div class="comment">"// .env.production - Payment Gateway Configuration"</div>
                    <div class="config-row">
                        <span class="key">"provider:"</span>
                        <span class="string">"\"" {wallet.provider.clone()} "\""</span>
                    </div>
                    <div class="config-row">
                        <span class="key">"account:"</span>
                        <span class="number" class:masked=move || !reveal.get()>
                            {move || if reveal.get() { number.clone() } else { masked.clone() }}
                        </span>
                        <button class="inline-action" on:click=move |_| set_reveal.update(|r| *r = !*r)>
                            {move || if reveal.get() { "HIDE" } else { "REVEAL" }}
                        </button>
                        <button class="inline-action" class:copied=move || copied.get() title="Copy Value" on:click=on_copy>
                            {move || copy_label(copied.get())}
                        </button>
                    </div>
                    <div class="config-row">
                        <span class="key">"owner:"</span>
                        <span class="string">"\"" {wallet.owner.clone()} "\""</span>
                        <span class="comment">"// Verified"</span>
                    </div>
                </div>
            }
            .into_view()
        }
        PaymentInstructions::Qris(qris) => {
            let image_url = qris.image_url.clone();
            let on_download = move |_| {
                if downloading.get_untracked() {
                    return;
                }
                set_downloading.set(true);
                let url = image_url.clone();
                spawn_local(async move {
                    download_image(&url, QR_DOWNLOAD_NAME).await;
                    set_downloading.try_set(false);
                });
            };
            view! {
                <div class="qris-block">
                    <div class="qris-head">"SCANNER_CODE_QRIS"</div>
                    <img class="qris-image" src=qris.image_url.clone() alt="QRIS"/>
                    <div class="qris-meta">
                        <div><span class="comment">"NMID "</span><span class="number">{qris.nmid.clone()}</span></div>
                        <div><span class="comment">"MERCHANT "</span><span class="string">"\"" {qris.merchant.clone()} "\""</span></div>
                    </div>
                    <button class="download-link" disabled=move || downloading.get() on:click=on_download>
                        {move || download_label(downloading.get())}
                    </button>
                </div>
            }
            .into_view()
        }
    };

    view! {
        <div class="payment-details">
            <button class="back-button" on:click=move |_| on_back.call(())>"^BACK^"</button>
            <div class="comment">"# LOADED: " {method.label()} "_CONFIG " <span class="private">"[PRIVATE]"</span></div>
            {body}
            <button class="primary-button" on:click=move |_| on_confirm.call(())>
                "VERIFY_PEMBAYARAN()"
            </button>
        </div>
    }
}
