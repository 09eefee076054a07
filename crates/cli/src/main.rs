#![deny(warnings)]

mod terminal;

use anyhow::Context;
use clap::Parser;
use lingo_client_core::config::{
    resolve_endpoint, resolve_request_timeout, AppConfig, Env, StdEnv,
};
use lingo_client_core::controller::TranslationController;
use lingo_client_core::language::{Language, DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG};
use lingo_client_core::session::SessionState;
use lingo_client_core::translate::HttpTranslator;
use std::io::IsTerminal;
use terminal::{Osc52Clipboard, StderrNotifier};
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lingo")]
#[command(about = "Translate text through a remote translation service")]
struct Args {
    /// Text to translate. Omit to read piped stdin or start an interactive session.
    text: Option<String>,

    /// Base URL of the translation service.
    #[arg(long)]
    api_url: Option<String>,

    #[arg(long, default_value_t = DEFAULT_SOURCE_LANG)]
    source: Language,

    #[arg(long, default_value_t = DEFAULT_TARGET_LANG)]
    target: Language,

    #[arg(long)]
    timeout_secs: Option<u64>,

    #[arg(long, default_value = "warn")]
    log_level: String,
}

type Controller = TranslationController<HttpTranslator, Osc52Clipboard, StderrNotifier>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let env = StdEnv;
    let text = args.text.clone();
    let cfg = build_config(args, &env)?;

    tracing::info!(
        endpoint = %cfg.endpoint.as_str(),
        source_lang = %cfg.source_lang,
        target_lang = %cfg.target_lang,
        timeout_secs = cfg.request_timeout.secs,
        "config loaded"
    );

    let translator = HttpTranslator::from_config(&cfg).context("failed to build HTTP client")?;
    let controller = TranslationController::new(
        translator,
        Osc52Clipboard::stdout(),
        StderrNotifier,
        SessionState::new(cfg.source_lang, cfg.target_lang),
    );

    match text {
        Some(text) => run_once(&controller, text).await,
        None if std::io::stdin().is_terminal() => terminal::run_interactive(&controller).await,
        None => {
            let mut piped = String::new();
            tokio::io::stdin()
                .read_to_string(&mut piped)
                .await
                .context("failed to read stdin")?;
            run_once(&controller, strip_line_terminator(piped)).await
        }
    }
}

async fn run_once(controller: &Controller, text: String) -> anyhow::Result<()> {
    controller.set_input_text(text);
    match controller.submit_translation().await {
        Ok(outcome) => {
            println!("{}", outcome.display_text());
            Ok(())
        }
        Err(e) => Err(anyhow::Error::new(e).context("nothing was translated")),
    }
}

/// Drops the single newline that ends line-terminated input, so piped text
/// matches what the interactive prompt would send. Other whitespace is kept.
fn strip_line_terminator(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn build_config(args: Args, env: &impl Env) -> anyhow::Result<AppConfig> {
    let endpoint = resolve_endpoint(args.api_url, env);
    let request_timeout = resolve_request_timeout(args.timeout_secs, env)?;

    Ok(AppConfig {
        endpoint,
        source_lang: args.source,
        target_lang: args.target,
        request_timeout,
    })
}
