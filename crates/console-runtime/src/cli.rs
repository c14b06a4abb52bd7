//! # Console CLI
//!
//! Each command dispatches one intent, waits for it to settle, and reports
//! the slice it touched.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use sf_04_effect_orchestrator::DispatchError;
use shared_bus::SyncEvent;
use shared_types::{
    EntityKind, Intent, MediaFile, MediaRef, Outcome, PaginationRequest, Record, ReferenceData,
    StoreId, SubmitMode,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::{ConsoleConfig, MediaConfig};
use crate::engine::EngineHandle;

/// Payload field holding an entity's logo reference.
pub const LOGO_FIELD: &str = "logo";

#[derive(Debug, Parser)]
#[command(name = "sf-console", version, about = "Storefront admin console sync engine")]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, env = "SF_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Sign in and persist the session token.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "SF_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Drop the session and reset every slice.
    Logout,
    /// Fetch one page of a collection.
    List {
        kind: EntityKind,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Fetch one entity.
    Show { kind: EntityKind, id: String },
    /// Change an entity's status field.
    SetStatus {
        kind: EntityKind,
        id: String,
        status: String,
    },
    /// Create an entity from a JSON file, or update it with `--id`.
    Submit {
        kind: EntityKind,
        file: PathBuf,
        #[arg(long)]
        id: Option<String>,
        /// Upload this image first and store its reference as the logo.
        #[arg(long)]
        logo: Option<PathBuf>,
    },
    /// Upload a media file.
    Upload { file: PathBuf },
    /// Fetch the country list.
    Countries,
    /// Fetch the currency list.
    Currencies,
}

impl Command {
    /// Build the intent this command dispatches.
    pub fn intent(
        &self,
        scope: Option<StoreId>,
        page_size: impl Fn(EntityKind) -> u32,
    ) -> Result<Intent> {
        let intent = match self {
            Self::Login { username, password } => Intent::Login {
                username: username.clone(),
                password: password.clone(),
            },
            Self::Logout => Intent::Logout,
            Self::List {
                kind,
                page,
                page_size: size,
            } => {
                let size = size.unwrap_or_else(|| page_size(*kind));
                Intent::FetchList {
                    kind: *kind,
                    page: PaginationRequest::new(require_scope(scope)?, size, *page)?,
                }
            }
            Self::Show { kind, id } => Intent::FetchDetail {
                kind: *kind,
                scope: require_scope(scope)?,
                id: id.clone(),
            },
            Self::SetStatus { kind, id, status } => Intent::UpdateStatus {
                kind: *kind,
                scope: require_scope(scope)?,
                id: id.clone(),
                status: status.clone(),
            },
            Self::Submit { kind, file, id, .. } => Intent::Submit {
                kind: *kind,
                scope: require_scope(scope)?,
                mode: id
                    .clone()
                    .map_or(SubmitMode::Create, |id| SubmitMode::Update { id }),
                payload: read_payload(file)?,
            },
            Self::Upload { file } => Intent::UploadMedia {
                file: read_media(file)?,
            },
            Self::Countries => Intent::FetchReference {
                data: ReferenceData::Countries,
            },
            Self::Currencies => Intent::FetchReference {
                data: ReferenceData::Currencies,
            },
        };
        Ok(intent)
    }
}

/// Refuse what the configured media mode does not allow.
///
/// Without local storage nothing is uploaded, and a logo must be pasted as an
/// absolute URL.
fn check_media_mode(command: &Command, intent: &Intent, media: &MediaConfig) -> Result<()> {
    if media.save_media_file_local {
        return Ok(());
    }
    if matches!(
        command,
        Command::Upload { .. } | Command::Submit { logo: Some(_), .. }
    ) {
        bail!(
            "media uploads are disabled (media.save_media_file_local = false); \
             put an absolute image URL in the payload's `{LOGO_FIELD}` field instead"
        );
    }
    if let Intent::Submit { payload, .. } = intent {
        if let Some(logo) = payload.get_str(LOGO_FIELD) {
            if !MediaRef::new(logo).is_external() {
                bail!("`{LOGO_FIELD}` must be an absolute http(s) URL when media is not stored locally");
            }
        }
    }
    Ok(())
}

/// Upload `path` and return the reference the server assigned.
async fn upload_logo(engine: &EngineHandle, path: &Path) -> Result<MediaRef> {
    let file = read_media(path)?;
    let settled = engine
        .dispatch_and_wait(Intent::UploadMedia { file })
        .await
        .context("logo upload could not be dispatched")?;
    match settled {
        SyncEvent::MediaUploaded {
            outcome: Outcome::Success(media),
            ..
        } => Ok(media),
        SyncEvent::MediaUploaded {
            outcome: Outcome::Failure(reason),
            ..
        } => bail!("logo upload failed: {reason}"),
        _ => bail!("logo upload was refused; run `sf-console login` again"),
    }
}

fn require_scope(scope: Option<StoreId>) -> Result<StoreId> {
    scope.context("not logged in; run `sf-console login` first")
}

fn read_payload(path: &Path) -> Result<Record> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    Record::from_value(value)
        .with_context(|| format!("{} must hold a JSON object", path.display()))
}

fn read_media(path: &Path) -> Result<MediaFile> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .context("upload path has no file name")?
        .to_string();
    Ok(MediaFile {
        content_type: content_type(path).map(str::to_string),
        file_name,
        bytes,
    })
}

fn content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Run one command against a started engine and return what to print.
pub async fn execute(
    command: Command,
    engine: &EngineHandle,
    config: &ConsoleConfig,
) -> Result<Value> {
    if matches!(command, Command::Login { .. }) {
        engine.enter_login().context("failed to drop the previous session")?;
    }

    let mut intent = command.intent(engine.scope(), |kind| engine.page_size(kind))?;
    check_media_mode(&command, &intent, &config.media)?;

    if let (Command::Submit { logo: Some(path), .. }, Intent::Submit { payload, .. }) =
        (&command, &mut intent)
    {
        let media = upload_logo(engine, path).await?;
        info!(path = %media.path, "Logo uploaded");
        payload.insert(LOGO_FIELD, media.path.as_str());
    }

    let kind = intent.kind();
    info!(op = ?intent.operation(), kind = ?kind, "Dispatching");

    match engine.dispatch_and_wait(intent).await {
        Ok(_) => {}
        Err(DispatchError::Validation(error)) => bail!(error),
        Err(other) => return Err(other).context("intent could not be dispatched"),
    }

    let store = engine.snapshot();
    if engine.guard().invalidations() > 0 {
        warn!("Session expired; run `sf-console login` again");
    }

    let view = match command {
        Command::Login { .. } | Command::Logout => serde_json::to_value(&store.auth)?,
        Command::Upload { .. } => match &store.public.uploaded_file {
            Some(media) => json!({
                "path": media.path,
                "url": media.resolve(&config.media.media_file_domain),
            }),
            None => json!({ "status": store.public.status }),
        },
        Command::Countries => json!({
            "status": store.public.status,
            "items": store.public.reference(ReferenceData::Countries),
        }),
        Command::Currencies => json!({
            "status": store.public.status,
            "items": store.public.reference(ReferenceData::Currencies),
        }),
        Command::List { .. } | Command::SetStatus { .. } => {
            let slice = kind.and_then(|kind| store.slice(kind));
            serde_json::to_value(slice)?
        }
        Command::Show { .. } | Command::Submit { .. } => {
            let slice = kind.and_then(|kind| store.slice(kind));
            let stored = slice
                .and_then(|slice| slice.detail.record())
                .and_then(|record| record.get_str(LOGO_FIELD));
            let logo_url = config
                .media
                .logo_url(stored, store.public.uploaded_file.as_ref());

            let mut view = serde_json::to_value(slice)?;
            if let (Value::Object(fields), Some(url)) = (&mut view, logo_url) {
                fields.insert("logoUrl".to_string(), Value::String(url));
            }
            view
        }
    };
    Ok(view)
}
