//! Terminal shell for the sign-up wizard.
//!
//! Drives the orchestrator with typed commands and renders the state after
//! every transition. `help` lists the commands. Input is read
//! asynchronously; rendering goes straight to synchronous stdout.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use sf_app::WizardOrchestrator;
use sf_core::ports::WizardEventPort;
use sf_core::wizard::{WizardState, WizardStep, CODE_LEN};
use sf_core::{autocomplete_addresses, password_requirements};
use sf_infra::{LoggingNavigator, StubAccountBackend, WizardTicker};

const HOME_URL: &str = "https://www.pamperedchef.com";

struct LogEventPort;

#[async_trait]
impl WizardEventPort for LogEventPort {
    async fn emit_wizard_state_changed(&self, state: WizardState) {
        debug!(step = ?state.step, "wizard state changed");
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let backend = Arc::new(StubAccountBackend::new());
    let orchestrator = Arc::new(WizardOrchestrator::new(
        backend,
        Arc::new(LogEventPort),
        Arc::new(LoggingNavigator),
        HOME_URL,
    ));
    let ticker = WizardTicker::start(orchestrator.clone());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    render(&orchestrator.get_state().await);
    prompt()?;

    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let line = line.trim();
        if line.is_empty() {
            prompt()?;
            continue;
        }
        let (command, arg) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        let outcome = match command {
            "quit" | "exit" => break,
            "help" => {
                print_help();
                prompt()?;
                continue;
            }
            "state" => Ok(orchestrator.get_state().await),
            "email" => {
                let state = orchestrator.set_email(arg.to_string()).await;
                if let Ok(state) = &state {
                    show_suggestions(&state.email);
                }
                state
            }
            "continue" => orchestrator.continue_with_email().await,
            "first" => orchestrator.set_first_name(arg.to_string()).await,
            "last" => orchestrator.set_last_name(arg.to_string()).await,
            "phone" => orchestrator.set_phone(arg.to_string()).await,
            "pass" => orchestrator.set_password(arg.to_string()).await,
            "submit" => orchestrator.submit_account().await,
            "signin" => orchestrator.submit_sign_in(arg.to_string()).await,
            "code" => enter_code(&orchestrator, arg).await,
            "erase" => match arg.parse::<usize>() {
                Ok(slot) if slot < CODE_LEN => orchestrator.erase_code_digit(slot).await,
                _ => {
                    println!("usage: erase <0-{}>", CODE_LEN - 1);
                    prompt()?;
                    continue;
                }
            },
            "verify" => orchestrator.verify().await,
            "resend" => orchestrator.resend_code().await,
            "back" => orchestrator.back().await,
            _ => {
                println!("unknown command: {command} (try `help`)");
                prompt()?;
                continue;
            }
        };

        match outcome {
            Ok(state) => render(&state),
            Err(err) => println!("error: {err}"),
        }
        prompt()?;
    }

    ticker.stop();
    Ok(())
}

async fn enter_code(
    orchestrator: &WizardOrchestrator,
    digits: &str,
) -> Result<WizardState, sf_app::WizardOrchestratorError> {
    let start = orchestrator.get_state().await.focused_slot;
    let mut state = orchestrator.get_state().await;
    for (offset, ch) in digits.chars().enumerate() {
        let slot = start + offset;
        if slot >= CODE_LEN {
            break;
        }
        state = orchestrator.enter_code_digit(slot, ch).await?;
    }
    Ok(state)
}

fn show_suggestions(email: &str) {
    let suggestions = autocomplete_addresses(email);
    if !suggestions.is_empty() {
        println!("  suggestions: {}", suggestions.join(", "));
    }
}

fn render(state: &WizardState) {
    match state.step {
        WizardStep::EmailEntry => {
            println!("-- Email --");
            println!("  email: {}", state.email);
            if state.is_checking_email {
                println!("  checking account...");
            }
            print_error(state.email_error.as_ref());
        }
        WizardStep::SignIn => {
            println!("-- Sign In ({}) --", state.email);
            if state.is_signing_in {
                println!("  signing in...");
            }
            print_error(state.sign_in_error.as_ref());
        }
        WizardStep::AccountCreate => {
            println!("-- Create Account ({}) --", state.email);
            println!("  first: {}", state.first_name);
            print_error(state.first_name_error.as_ref());
            println!("  last:  {}", state.last_name);
            print_error(state.last_name_error.as_ref());
            println!("  phone: {}", state.phone_digits);
            print_error(state.phone_error.as_ref());
            let met = password_requirements(&state.password);
            println!(
                "  password: {} [8-100 chars: {}] [upper+lower: {}] [digit/special: {}]",
                "*".repeat(state.password.len()),
                check(met.length),
                check(met.case),
                check(met.special),
            );
            print_error(state.password_error.as_ref());
        }
        WizardStep::Verify => {
            println!("-- Verify ({}) --", state.email);
            let slots: String = state
                .code_slots
                .iter()
                .map(|slot| slot.unwrap_or('_'))
                .collect();
            println!("  code: {slots}");
            if state.is_verifying {
                println!("  verifying...");
            }
            if state.verification_failed {
                println!("  ! Invalid verification code. Please try again.");
            }
            if state.resend_countdown_secs > 0 {
                println!("  resend available in {}s", state.resend_countdown_secs);
            } else {
                println!("  resend available");
            }
        }
        WizardStep::Success => {
            println!("-- Welcome! --");
            println!("  redirecting in {}s...", state.redirect_countdown_secs);
        }
    }
}

fn check(met: bool) -> &'static str {
    if met {
        "ok"
    } else {
        "--"
    }
}

fn print_error(error: Option<&sf_core::wizard::FieldError>) {
    if let Some(error) = error {
        println!("  ! {error}");
    }
}

fn prompt() -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(b"> ")?;
    stdout.flush()?;
    Ok(())
}

fn print_help() {
    print!(
        "\
commands:
  email <addr>     set the email field (shows autocomplete suggestions)
  continue         submit the email step
  first <name>     set first name
  last <name>      set last name
  phone <number>   set phone number
  pass <password>  set password
  submit           submit the account form
  signin <pass>    sign in with an existing account
  code <digits>    type verification digits at the focused slot
  erase <slot>     erase one code slot
  verify           submit the verification code
  resend           resend the verification code
  back             go back one step
  state            re-render the current step
  quit             exit
"
    );
}
