use log::{info, warn};
use serde::Serialize;

use crate::config::settings::{AppConfig, UploadSettings};
use crate::database::{self, DbPool, TournamentRecord};
use crate::errors::UploadError;
use crate::parsing::{parse_csv, RawRow};
use crate::session::{digest, Session};
use crate::stats::{detect_kind, merge_roster, normalize, NormalizedBatch, StatKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReport {
    pub tournament_id: i64,
    pub kind: StatKind,
    pub rows_accepted: usize,
    pub players_added: usize,
    pub players_updated: usize,
    pub fingerprint: String,
}

/// Validates an uploaded CSV and merges it into a tournament's roster
pub struct UploadService {
    pool: DbPool,
    settings: UploadSettings,
}

impl UploadService {
    pub fn new(pool: DbPool, config: &AppConfig) -> Self {
        Self {
            pool,
            settings: config.upload.clone(),
        }
    }

    /// Every check runs before the stored roster is touched; a rejected file
    /// leaves the tournament exactly as it was.
    pub fn ingest(
        &self,
        session: &Session,
        tournament_id: i64,
        filename: &str,
        content: &[u8],
    ) -> Result<UploadReport, UploadError> {
        session.require_authorized()?;
        validate_file(filename, content.len(), &self.settings)?;

        let text = String::from_utf8_lossy(content);
        let batch = prepare_upload(&text)?;
        let fingerprint = digest(content);

        let mut conn = database::get_connection(&self.pool).map_err(UploadError::Storage)?;
        let tournament = database::tournaments::find_by_id(&mut conn, tournament_id)
            .map_err(UploadError::Storage)?
            .ok_or(UploadError::TournamentNotFound(tournament_id))?;

        if tournament.has_fingerprint(&fingerprint) {
            warn!(
                "Rejected duplicate upload '{}' for tournament {}",
                filename, tournament_id
            );
            return Err(UploadError::DuplicateFile);
        }

        let rows_accepted = batch.len();
        let kind = batch.kind();
        let (merged, added, updated) = merge_batch(tournament, batch, fingerprint.clone());

        database::tournaments::save_rosters(
            &mut conn,
            merged.id,
            &merged.batting,
            &merged.pitching,
            &merged.file_hashes,
        )
        .map_err(UploadError::Storage)?;

        info!(
            "Merged {} {} rows into tournament {} ({} added, {} updated)",
            rows_accepted, kind, tournament_id, added, updated
        );

        Ok(UploadReport {
            tournament_id,
            kind,
            rows_accepted,
            players_added: added,
            players_updated: updated,
            fingerprint,
        })
    }
}

/// Name and size checks; nothing is parsed yet
pub fn validate_file(filename: &str, size: usize, settings: &UploadSettings) -> Result<(), UploadError> {
    if !filename.trim().to_lowercase().ends_with(".csv") {
        return Err(UploadError::InvalidFileType(filename.to_string()));
    }
    if size > settings.max_upload_bytes {
        return Err(UploadError::FileTooLarge {
            size,
            limit: settings.max_upload_bytes,
        });
    }
    Ok(())
}

/// Parse, check the header shape, drop unnamed rows and normalize
pub fn prepare_upload(text: &str) -> Result<NormalizedBatch, UploadError> {
    let parsed = parse_csv(text);
    if parsed.headers.is_empty() || parsed.is_empty() {
        return Err(UploadError::NoDataRows);
    }

    let kind = detect_kind(&parsed.headers)?;
    let named: Vec<&RawRow> = parsed
        .rows
        .iter()
        .filter(|row| row.text("Name").is_some())
        .collect();
    if named.is_empty() {
        return Err(UploadError::NoDataRows);
    }

    Ok(normalize(&named, kind))
}

fn merge_batch(
    mut tournament: TournamentRecord,
    batch: NormalizedBatch,
    fingerprint: String,
) -> (TournamentRecord, usize, usize) {
    let (added, updated) = match batch {
        NormalizedBatch::Batting(incoming) => {
            let outcome = merge_roster(std::mem::take(&mut tournament.batting), incoming);
            tournament.batting = outcome.roster;
            (outcome.added, outcome.updated)
        }
        NormalizedBatch::Pitching(incoming) => {
            let outcome = merge_roster(std::mem::take(&mut tournament.pitching), incoming);
            tournament.pitching = outcome.roster;
            (outcome.added, outcome.updated)
        }
    };
    tournament.file_hashes.push(fingerprint);
    (tournament, added, updated)
}
