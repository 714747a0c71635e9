//! Terminal checkout.
//!
//! Two ways of walking the workflow from a terminal:
//!
//! - [`run_checkout`] - non-interactive, all fields given up front
//! - [`run_wizard`] - interactive, one screen at a time with `back`
//!
//! Both drive the same [`Workflow`] and [`UploadForm`](devpay_core::UploadForm)
//! as the web frontend; only the rendering differs.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use devpay_core::{
    FormError, FormField, PaymentDirectory, PaymentInstructions, PaymentMethod, ProofSubmitter,
    Stage, TransactionSummary, Workflow,
};

use crate::error::CheckoutResult;
use crate::proof::ProofFile;

// =============================================================================
// Rendering
// =============================================================================

/// Print the selectable methods.
pub fn render_methods(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "// Select a payment provider to inject:")?;
    for (i, method) in PaymentMethod::ALL.iter().enumerate() {
        writeln!(out, "  [{}] {:<14} {:<5} {}", i + 1, method.handle(), method.label(), method.description())?;
    }
    Ok(())
}

/// Print the payment instructions for `method`.
pub fn render_instructions(
    out: &mut impl Write,
    directory: &PaymentDirectory,
    method: PaymentMethod,
    reveal: bool,
) -> std::io::Result<()> {
    match directory.instructions(method) {
        PaymentInstructions::Wallet(wallet) => {
            let number = if reveal { wallet.number.clone() } else { wallet.masked_number() };
            writeln!(out, "# LOADED: {}_CONFIG", method.label())?;
            writeln!(out, "  provider: \"{}\"", wallet.provider)?;
            writeln!(out, "  account:  {}", number)?;
            writeln!(out, "  owner:    \"{}\"", wallet.owner)?;
        }
        PaymentInstructions::Qris(qris) => {
            writeln!(out, "# LOADED: {}_CONFIG", method.label())?;
            writeln!(out, "  qr image: {}", qris.image_url)?;
            writeln!(out, "  NMID:     {}", qris.nmid)?;
            writeln!(out, "  MERCHANT: \"{}\"", qris.merchant)?;
        }
    }
    Ok(())
}

/// Print the completion card.
pub fn render_summary(out: &mut impl Write, summary: &TransactionSummary) -> std::io::Result<()> {
    writeln!(out, "SUCCESSFULLY")?;
    writeln!(out, "Proof of transaction has been sent. Thank you for transacting with me!")?;
    writeln!(out, "  Time:    {}", summary.completed_at_display())?;
    writeln!(out, "  Product: {}", summary.product_name)?;
    writeln!(out, "  Status:  Success")?;
    Ok(())
}

// =============================================================================
// Non-interactive checkout
// =============================================================================

/// Everything `devpay submit` needs.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub method: PaymentMethod,
    pub product_name: String,
    pub amount: String,
    pub note: Option<String>,
    pub attachment: PathBuf,
}

/// Walk Selection → Detail → Proof → Complete in one go.
pub async fn run_checkout<S>(
    out: &mut impl Write,
    directory: &PaymentDirectory,
    client: &S,
    request: CheckoutRequest,
) -> CheckoutResult<TransactionSummary>
where
    S: ProofSubmitter<File = ProofFile>,
{
    let mut workflow = Workflow::new();

    workflow.select_method(request.method)?;
    render_instructions(out, directory, request.method, false)?;
    workflow.confirm_detail()?;

    let mut form = workflow.upload_form()?;
    form.set_field(FormField::ProductName, request.product_name);
    form.set_field(FormField::Amount, request.amount);
    if let Some(note) = request.note {
        form.set_field(FormField::Note, note);
    }
    let proof = ProofFile::from_path(request.attachment);
    if !proof.is_image() {
        log::warn!("⚠️  Attachment '{}' does not look like an image", proof.file_name());
    }
    form.attach(proof);

    writeln!(out, "EXECUTING...")?;
    let summary = form.submit(client).await?;
    workflow.submission_succeeded(summary.clone())?;

    render_summary(out, &summary)?;
    Ok(summary)
}

// =============================================================================
// Interactive wizard
// =============================================================================

/// Read one trimmed line; `None` on end of input.
fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> CheckoutResult<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn is_back(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("back") || answer == "^"
}

fn is_quit(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("q") || answer.eq_ignore_ascii_case("quit")
}

/// Interactive checkout. Returns the summaries of every completed transaction.
///
/// Typing `back` retreats one step, `q` quits. Ends at end of input or when
/// the user declines a new transaction on the completion screen.
pub async fn run_wizard<S>(
    input: &mut impl BufRead,
    out: &mut impl Write,
    directory: &PaymentDirectory,
    client: &S,
) -> CheckoutResult<Vec<TransactionSummary>>
where
    S: ProofSubmitter<File = ProofFile>,
{
    let mut workflow = Workflow::new();
    let mut completed = Vec::new();
    let mut reveal = false;

    loop {
        match workflow.stage().clone() {
            Stage::Selection => {
                render_methods(out)?;
                let Some(answer) = prompt(input, out, "method> ")? else { break };
                if is_quit(&answer) {
                    break;
                }
                let choice = match answer.as_str() {
                    "1" => Ok(PaymentMethod::Dana),
                    "2" => Ok(PaymentMethod::Qris),
                    other => other.parse::<PaymentMethod>(),
                };
                match choice {
                    Ok(method) => {
                        reveal = false;
                        workflow.select_method(method)?;
                    }
                    Err(e) => writeln!(out, "[ERROR] {}", e)?,
                }
            }
            Stage::Detail(method) => {
                render_instructions(out, directory, method, reveal)?;
                let Some(answer) = prompt(input, out, "[enter] VERIFY_PEMBAYARAN() | reveal | back > ")? else { break };
                if is_quit(&answer) {
                    break;
                } else if is_back(&answer) {
                    workflow.back()?;
                } else if answer.eq_ignore_ascii_case("reveal") {
                    reveal = !reveal;
                } else {
                    workflow.confirm_detail()?;
                }
            }
            Stage::Proof(_) => {
                match proof_step(input, out, &mut workflow, client).await? {
                    StepOutcome::Continue => {}
                    StepOutcome::Quit => break,
                }
            }
            Stage::Complete(summary) => {
                render_summary(out, &summary)?;
                completed.push(summary);
                let Some(answer) = prompt(input, out, "NEW_TRANSACTION()? [y/N] ")? else { break };
                if answer.eq_ignore_ascii_case("y") {
                    workflow.reset()?;
                } else {
                    break;
                }
            }
        }
    }

    log::debug!("Wizard ended on step {}", workflow.step());
    Ok(completed)
}

enum StepOutcome {
    Continue,
    Quit,
}

/// Collect the form on the proof step and submit until success, back, or quit.
async fn proof_step<S>(
    input: &mut impl BufRead,
    out: &mut impl Write,
    workflow: &mut Workflow,
    client: &S,
) -> CheckoutResult<StepOutcome>
where
    S: ProofSubmitter<File = ProofFile>,
{
    let mut form = workflow.upload_form()?;
    writeln!(out, "VERIFIKASI_PEMBAYARAN()  (type 'back' to cancel)")?;

    let fields = [
        (FormField::ProductName, "$ --product    = "),
        (FormField::Amount, "$ --amount     = "),
        (FormField::Note, "$ --name       = "),
    ];
    for (field, label) in fields {
        let Some(answer) = prompt(input, out, label)? else { return Ok(StepOutcome::Quit) };
        if is_quit(&answer) {
            return Ok(StepOutcome::Quit);
        }
        if is_back(&answer) {
            workflow.back()?;
            return Ok(StepOutcome::Continue);
        }
        form.set_field(field, answer);
    }
    let Some(path) = prompt(input, out, "$ --attachment = ")? else { return Ok(StepOutcome::Quit) };
    if is_quit(&path) {
        return Ok(StepOutcome::Quit);
    }
    if is_back(&path) {
        workflow.back()?;
        return Ok(StepOutcome::Continue);
    }
    if !path.is_empty() {
        form.attach(ProofFile::from_path(path));
    }

    loop {
        writeln!(out, "EXECUTING...")?;
        match form.submit(client).await {
            Ok(summary) => {
                workflow.submission_succeeded(summary)?;
                return Ok(StepOutcome::Continue);
            }
            Err(FormError::Busy) => return Ok(StepOutcome::Continue),
            Err(e @ FormError::Validation(_)) => {
                writeln!(out, "{}", e.notice().unwrap_or_default())?;
                return Ok(StepOutcome::Continue);
            }
            Err(e @ FormError::Transport(_)) => {
                writeln!(out, "{}", e.notice().unwrap_or_default())?;
                let Some(answer) = prompt(input, out, "retry? [Y/n/back] ")? else { return Ok(StepOutcome::Quit) };
                if is_back(&answer) {
                    workflow.back()?;
                    return Ok(StepOutcome::Continue);
                }
                if answer.eq_ignore_ascii_case("n") {
                    return Ok(StepOutcome::Continue);
                }
            }
        }
    }
}
