use anyhow::Context;
use clap::Parser;
use fs_err as fs;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use copygen::cli::Args;
use copygen::config::Config;
use copygen::format;
use copygen::log;
use copygen::provider::{GeminiRequester, HttpTransport};
use copygen::session::Session;
use copygen::ux;

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("copygen=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    let mut cfg = match &args.config {
        Some(path) => Config::load(Path::new(path))?,
        None => Config::default(),
    };
    args.apply_to(&mut cfg);

    // Credential check happens once, before any input is collected.
    let api_key = cfg.api_key()?;

    let details = args.product_details(ux::ask);
    let requester = GeminiRequester::new(Arc::new(HttpTransport::new()), api_key, &cfg);
    let session = Session::new(requester);

    let run = log::RunInfo::start(&cfg.model);

    let pb = ux::spinner("Generating description...");
    let view = session.generate(&details).await;
    pb.finish_and_clear();

    // A fresh session is never busy.
    let Some(view) = view else {
        return Ok(());
    };

    if args.save_request || args.save_response {
        let outcome = match (&view.raw, &view.error) {
            (Some(text), _) => Ok(text.as_str()),
            (None, Some(e)) => Err(e.as_str()),
            (None, None) => Err(""),
        };
        let req = GeminiRequester::request_body(&details).ok();
        let saved = log::save_run(
            Path::new(&cfg.out_dir),
            &run,
            req.as_ref(),
            outcome,
            args.save_request,
            args.save_response,
        )?;
        if args.debug {
            log::print_saved_paths(&saved);
        }
    }

    if let Some(e) = &view.error {
        ux::print_error(e);
        std::process::exit(1);
    }

    if args.raw {
        println!("{}", view.raw.as_deref().unwrap_or_default());
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&view.blocks)?);
    } else {
        ux::print_description(&view.blocks);
    }

    if let Some(out) = &args.output {
        fs::write(out, format::plain_text(&view.blocks))
            .with_context(|| format!("writing description to {out}"))?;
        eprintln!("description written to {out}");
    }

    Ok(())
}
