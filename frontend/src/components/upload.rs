//! Proof upload form.
//!
//! Binds the CLI-style inputs to an [`UploadForm`] created by the workflow,
//! and submits it through the relay. While a submission is in flight the
//! button is disabled and shows `EXECUTING...`; the in-flight flag itself is
//! shared with the workflow, so `^BACK^` is refused until it clears.
//!
//! Files over [`MAX_PROOF_SIZE`] are refused when picked, so an oversize
//! image never reaches the network.

use devpay_core::{check_file_size, FormError, FormField, UploadForm, Workflow};
use leptos::*;
use web_sys::{Event, File, HtmlInputElement};

use crate::config::{MAX_PROOF_SIZE, NOTIFY_ENDPOINT};
use crate::services::FormDataSubmitter;

/// Error line for a picked file of `size` bytes, if it cannot be attached.
fn oversize_notice(size: f64) -> Option<String> {
    check_file_size(size as u64, MAX_PROOF_SIZE)
        .err()
        .and_then(|e| FormError::from(e).notice())
}

#[component]
pub fn UploadSection(workflow: RwSignal<Workflow>, #[prop(into)] on_back: Callback<()>) -> impl IntoView {
    let form = match workflow.with_untracked(|w| w.upload_form::<File>()) {
        Ok(form) => store_value(form),
        Err(e) => {
            log::error!("❌ {}", e);
            return view! { <div class="error-message">{e.to_string()}</div> }.into_view();
        }
    };

    let (submitting, set_submitting) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);
    let (file_name, set_file_name) = create_signal(None::<String>);

    let bind = move |field: FormField| {
        move |ev: Event| {
            let value = event_target_value(&ev);
            form.update_value(|f| f.set_field(field, value));
        }
    };

    // Handler pour le changement de fichier
    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            if let Some(notice) = oversize_notice(file.size()) {
                log::warn!("⚠️ {} refused: {}", file.name(), notice);
                set_error.set(Some(notice));
                return;
            }
            set_error.set(None);
            set_file_name.set(Some(file.name()));
            form.update_value(|f| f.attach(file));
        }
    };

    let on_submit = move |_| {
        if form.with_value(UploadForm::is_submitting) {
            return;
        }
        let snapshot = form.get_value();
        set_error.set(None);
        set_submitting.set(true);

        spawn_local(async move {
            let client = FormDataSubmitter::new(NOTIFY_ENDPOINT);
            let result = snapshot.submit(&client).await;
            // Busy leaves the flag to the attempt that holds it
            set_submitting.try_set(snapshot.is_submitting());

            match result {
                Ok(summary) => workflow.update(|w| {
                    if let Err(e) = w.submission_succeeded(summary) {
                        log::error!("❌ {}", e);
                    }
                }),
                Err(e) => {
                    if let Some(notice) = e.notice() {
                        set_error.try_set(Some(notice));
                    }
                }
            }
        });
    };

    view! {
        <div class="upload-section">
            <button
                class="back-button"
                disabled=move || submitting.get()
                on:click=move |_| on_back.call(())
            >
                "^BACK^" <span class="hint">"(cancel process)"</span>
            </button>

            <div class="terminal">
                <div class="terminal-title">"VERIFIKASI_PEMBAYARAN()"</div>
                <div class="comment">"User Input Stream"</div>

                <CliInput arg="--product" placeholder="Contoh ( SCRIPT BUG )" on_input=bind(FormField::ProductName)/>
                <CliInput arg="--amount" placeholder="Contoh ( 20.000 )" on_input=bind(FormField::Amount)/>
                <CliInput arg="--name" placeholder="Contoh ( MAUL GANTENG )" on_input=bind(FormField::Note)/>

                <div class="cli-input">
                    <span class="prompt">"$"</span>
                    <span class="arg">"--attachment"</span>
                    <span class="operator">"="</span>
                    <label class="file-picker" class:attached=move || file_name.get().is_some()>
                        {move || file_name.get().unwrap_or_else(|| "Select_File.jpg/png".to_string())}
                        <input type="file" accept="image/*" style="display:none" on:change=on_file_change/>
                    </label>
                </div>
            </div>

            <Show when=move || error.get().is_some() fallback=|| view! {}>
                <div class="error-message">{move || error.get().unwrap_or_default()}</div>
            </Show>

            <button class="primary-button" disabled=move || submitting.get() on:click=on_submit>
                {move || if submitting.get() { "EXECUTING..." } else { "KIRIM BUKTI TRANSAKSI" }}
            </button>
        </div>
    }
    .into_view()
}

/// `$ --arg = "value"` input row.
#[component]
fn CliInput<H>(arg: &'static str, placeholder: &'static str, on_input: H) -> impl IntoView
where
    H: Fn(Event) + 'static,
{
    view! {
        <div class="cli-input">
            <span class="prompt">"$"</span>
            <span class="arg">{arg}</span>
            <span class="operator">"="</span>
            <span class="string">"\""</span>
            <input type="text" autocomplete="off" placeholder=placeholder on:input=on_input/>
            <span class="string">"\""</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversize_file_is_refused_locally() {
        assert_eq!(oversize_notice(1024.0), None);
        assert_eq!(oversize_notice(MAX_PROOF_SIZE as f64), None);

        let notice = oversize_notice(MAX_PROOF_SIZE as f64 + 1.0).unwrap();
        assert!(notice.starts_with("[ERROR] Attachment too large"));
    }
}
