//! Parallel matchup runs over a granule links file.

use anyhow::{Context, Result};
use matchup::{FieldPoint, MatchupEngine, MatchupError, MatchupSink, MatchupSummary};
use rayon::prelude::*;
use std::path::Path;
use swath_common::SwathSource;
use tracing::{info, instrument};

use crate::field_table::FieldTable;

/// One (field id, granule id) pair from a links file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GranuleLink {
    pub id: String,
    pub granule: String,
}

/// Read a headerless links CSV: column 0 is the field id, column 1 the
/// granule id. Further columns are ignored; blank lines are skipped.
pub fn read_links<R: std::io::Read>(reader: R) -> Result<Vec<GranuleLink>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut links = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("bad links row {}", line + 1))?;
        let id = record.get(0).map(str::trim).unwrap_or_default();
        let granule = record.get(1).map(str::trim).unwrap_or_default();
        if id.is_empty() && granule.is_empty() {
            continue;
        }
        if id.is_empty() || granule.is_empty() {
            anyhow::bail!("links row {} needs both a field id and a granule id", line + 1);
        }
        links.push(GranuleLink {
            id: id.to_string(),
            granule: granule.to_string(),
        });
    }
    Ok(links)
}

pub fn read_links_file(path: &Path) -> Result<Vec<GranuleLink>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open links file {}", path.display()))?;
    read_links(file).with_context(|| format!("failed to read links file {}", path.display()))
}

/// Resolve every link to a field point up front, so a bad id fails the
/// batch before any output is written.
pub fn resolve_links(table: &FieldTable, links: &[GranuleLink]) -> Result<Vec<FieldPoint>> {
    links
        .iter()
        .map(|link| table.field_point(&link.id, &link.granule))
        .collect()
}

/// Run every field point as an independent matchup on `jobs` threads.
#[instrument(skip_all, fields(pairs = fields.len(), jobs = jobs))]
pub fn run_batch<S, K>(
    engine: &MatchupEngine,
    fields: &[FieldPoint],
    source: &S,
    sink: &K,
    jobs: usize,
) -> Result<MatchupSummary>
where
    S: SwathSource + ?Sized,
    K: MatchupSink + ?Sized,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("failed to build worker pool")?;

    let summary = pool.install(|| {
        fields
            .par_iter()
            .try_fold(MatchupSummary::default, |mut summary, field| {
                let outcome = engine.run(field, source, sink)?;
                summary.record(&outcome);
                Ok::<_, MatchupError>(summary)
            })
            .try_reduce(MatchupSummary::default, |a, b| Ok(a.merge(b)))
    })?;

    info!(
        total = summary.total(),
        accepted = summary.accepted,
        fie = summary.file_import_errors,
        nav = summary.navigation_invalid,
        beyond_distance = summary.beyond_distance,
        "Batch complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_links() {
        let csv = "s001,A2019123174500,https://example.com/a.L1A,-70,43,-69,44\n\
                   \n\
                   s002,T2019123150000\n";
        let links = read_links(csv.as_bytes()).unwrap();
        assert_eq!(
            links,
            vec![
                GranuleLink {
                    id: "s001".to_string(),
                    granule: "A2019123174500".to_string()
                },
                GranuleLink {
                    id: "s002".to_string(),
                    granule: "T2019123150000".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_read_links_rejects_half_rows() {
        assert!(read_links("s001\n".as_bytes()).is_err());
    }
}
