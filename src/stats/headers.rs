use std::collections::HashSet;

use super::models::StatKind;
use crate::errors::UploadError;

/// Decide whether an upload is a pitching or batting export.
///
/// An exact, in-order match wins first. Otherwise any permutation that holds
/// every required column is accepted. When neither shape is complete the
/// error names the missing columns of the closer shape.
pub fn detect_kind(headers: &[String]) -> Result<StatKind, UploadError> {
    if let Some(kind) = StatKind::ALL.into_iter().find(|kind| is_exact(headers, *kind)) {
        return Ok(kind);
    }

    let present: HashSet<&str> = headers.iter().map(|h| h.trim()).collect();

    let mut closest: Option<(StatKind, Vec<String>)> = None;
    for kind in StatKind::ALL {
        let missing = missing_columns(&present, kind);
        if missing.is_empty() {
            return Ok(kind);
        }
        let is_closer = closest
            .as_ref()
            .is_none_or(|(_, best)| missing.len() < best.len());
        if is_closer {
            closest = Some((kind, missing));
        }
    }

    match closest {
        Some((kind, missing)) => Err(UploadError::MissingColumns { kind, missing }),
        None => Err(UploadError::NoDataRows),
    }
}

fn is_exact(headers: &[String], kind: StatKind) -> bool {
    let expected = kind.headers();
    headers.len() == expected.len()
        && headers.iter().zip(expected).all(|(given, want)| given.trim() == *want)
}

fn missing_columns(present: &HashSet<&str>, kind: StatKind) -> Vec<String> {
    kind.headers()
        .iter()
        .filter(|column| !present.contains(*column))
        .map(|column| column.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::models::{BATTING_HEADERS, PITCHING_HEADERS};

    fn owned(headers: &[&str]) -> Vec<String> {
        headers.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn exact_shapes_are_detected() {
        assert_eq!(detect_kind(&owned(&PITCHING_HEADERS)).unwrap(), StatKind::Pitching);
        assert_eq!(detect_kind(&owned(&BATTING_HEADERS)).unwrap(), StatKind::Batting);
    }

    #[test]
    fn permutations_are_accepted() {
        let mut headers = owned(&BATTING_HEADERS);
        headers.reverse();
        headers.push("Extra".to_string());

        assert_eq!(detect_kind(&headers).unwrap(), StatKind::Batting);
    }

    #[test]
    fn permutation_missing_one_column_names_it() {
        let mut headers = owned(&PITCHING_HEADERS);
        headers.reverse();
        headers.retain(|h| h != "WHIP");

        match detect_kind(&headers) {
            Err(UploadError::MissingColumns { kind, missing }) => {
                assert_eq!(kind, StatKind::Pitching);
                assert_eq!(missing, vec!["WHIP".to_string()]);
            }
            other => panic!("expected missing columns, got {:?}", other),
        }
    }

    #[test]
    fn unrelated_headers_report_the_closer_shape() {
        let headers = owned(&["title", "num", "starttime"]);

        match detect_kind(&headers) {
            Err(UploadError::MissingColumns { kind, missing }) => {
                assert_eq!(kind, StatKind::Pitching);
                assert_eq!(missing.len(), PITCHING_HEADERS.len());
            }
            other => panic!("expected missing columns, got {:?}", other),
        }
    }
}
