use chrono::{DateTime, Utc};
use fs_err as fs;
use serde::Serialize;
use serde_json::to_string_pretty;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use crate::wire::GenerateRequest;

pub struct SavedPaths {
    pub dir: PathBuf,
    pub request: Option<PathBuf>,
    pub response: Option<PathBuf>,
}

/// Identity of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunInfo {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub model: String,
}

impl RunInfo {
    pub fn start(model: &str) -> Self {
        Self { id: Uuid::new_v4(), started_at: Utc::now(), model: model.to_string() }
    }
}

#[derive(Serialize)]
struct RunMeta<'a> {
    #[serde(flatten)]
    run: &'a RunInfo,
    ok: bool,
}

pub fn run_dir(out_dir: &Path, run: Uuid) -> PathBuf {
    out_dir.join("runs").join(run.to_string())
}

/// Persist the request body and the raw response of one run.
///
/// `meta.json` is always written. `request.json` needs the flag and a body
/// (runs rejected by validation have none); `response.txt` needs its flag.
pub fn save_run(
    out_dir: &Path,
    run: &RunInfo,
    req: Option<&GenerateRequest>,
    resp: Result<&str, &str>,
    save_request: bool,
    save_response: bool,
) -> anyhow::Result<SavedPaths> {
    let dir = run_dir(out_dir, run.id);
    fs::create_dir_all(&dir)?;

    let meta = RunMeta { run, ok: resp.is_ok() };
    fs::write(dir.join("meta.json"), to_string_pretty(&meta)?)?;

    let mut request_path = None;
    let mut response_path = None;

    if let (true, Some(req)) = (save_request, req) {
        let p = dir.join("request.json");
        fs::write(&p, to_string_pretty(req)?)?;
        request_path = Some(p);
    }

    if save_response {
        let p = dir.join("response.txt");
        let body = match resp {
            Ok(text) => text,
            Err(message) => message,
        };
        fs::write(&p, body)?;
        response_path = Some(p);
    }

    info!(dir = %dir.display(), "run artifacts saved");
    Ok(SavedPaths { dir, request: request_path, response: response_path })
}

pub fn print_saved_paths(saved: &SavedPaths) {
    eprintln!("artifacts directory: {}", saved.dir.display());
    if let Some(p) = &saved.request {
        eprintln!("request saved at: {}", p.display());
    }
    if let Some(p) = &saved.response {
        eprintln!("response saved at: {}", p.display());
    }
}
