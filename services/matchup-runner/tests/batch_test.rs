//! Batch runs over a field table and links file.

use matchup::{FileSink, MatchupEngine, MemorySink};
use matchup_runner::batch::{read_links, resolve_links, run_batch};
use matchup_runner::config::RunnerConfig;
use matchup_runner::field_table::FieldTable;
use test_utils::fixtures::granules;
use test_utils::{
    create_swath, create_unnavigable_swath, temp_test_dir, write_test_file, MemorySwathSource,
    SwathSpec,
};

/// Field table with one sample near pixel (20, 20), one far away and one on
/// an unnavigable granule.
fn setup() -> (FieldTable, MemorySwathSource) {
    let spec = SwathSpec::new(40, 40, 1.2);
    let (near_lat, near_lon) = spec.point_north_of(20, 20, 0.3);
    let csv = format!(
        ",ID,Latitude_uw,Longitude_uw,cruise\n\
         0,near,{near_lat},{near_lon},GNATS\n\
         1,far,10.0,10.0,AMT\n\
         2,cloud,43.1,-69.9,GNATS\n"
    );
    let table = FieldTable::from_reader(csv.as_bytes(), &RunnerConfig::default()).unwrap();

    let source = MemorySwathSource::new()
        .with_swath(create_swath(granules::AQUA, &spec))
        .with_swath(create_unnavigable_swath(granules::TERRA, 40, 40));
    (table, source)
}

#[test]
fn test_batch_summary() {
    let (table, source) = setup();
    let links = read_links(
        "near,A2019123174500\nfar,A2019123174500\ncloud,T2019123150000\nnear,V2020366181200\n"
            .as_bytes(),
    )
    .unwrap();
    let fields = resolve_links(&table, &links).unwrap();

    let sink = MemorySink::new();
    let summary = run_batch(&MatchupEngine::default(), &fields, &source, &sink, 3).unwrap();

    assert_eq!(summary.total(), 4);
    assert_eq!(summary.accepted, 1);
    assert_eq!(summary.beyond_distance, 1);
    assert_eq!(summary.navigation_invalid, 1);
    assert_eq!(summary.file_import_errors, 1);

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].field.attribute("cruise"), Some("GNATS"));
    assert_eq!((records[0].pixel.row, records[0].pixel.col), (20, 20));

    let mut log: Vec<String> = sink.exclusions().iter().map(|e| e.log_line().unwrap()).collect();
    log.sort();
    assert_eq!(
        log,
        vec![
            "cloud,T2019123150000,Nav\n",
            "far,A2019123174500,1km\n",
            "near,V2020366181200,FIE\n",
        ]
    );
}

#[test]
fn test_blank_latitude_excludes_only_that_pair() {
    let spec = SwathSpec::new(40, 40, 1.2);
    let (near_lat, near_lon) = spec.point_north_of(20, 20, 0.3);
    let csv = format!(
        "ID,Latitude_uw,Longitude_uw\n\
         near,{near_lat},{near_lon}\n\
         nofix,,{near_lon}\n"
    );
    let table = FieldTable::from_reader(csv.as_bytes(), &RunnerConfig::default()).unwrap();
    let source = MemorySwathSource::new().with_swath(create_swath(granules::AQUA, &spec));

    let links = read_links("nofix,A2019123174500\nnear,A2019123174500\n".as_bytes()).unwrap();
    let fields = resolve_links(&table, &links).unwrap();
    let sink = MemorySink::new();
    let summary = run_batch(&MatchupEngine::default(), &fields, &source, &sink, 2).unwrap();

    assert_eq!(summary.accepted, 1);
    assert_eq!(summary.navigation_invalid, 1);
    assert_eq!(sink.exclusion_log().unwrap(), "nofix,A2019123174500,Nav\n");
}

#[test]
fn test_unknown_id_fails_before_running() {
    let (table, _) = setup();
    let links = read_links("ghost,A2019123174500\n".as_bytes()).unwrap();
    assert!(resolve_links(&table, &links).is_err());
}

#[test]
fn test_batch_to_files() {
    let (table, source) = setup();
    let dir = temp_test_dir();
    let links = read_links("near,A2019123174500\nfar,A2019123174500\n".as_bytes()).unwrap();
    let fields = resolve_links(&table, &links).unwrap();

    let sink = FileSink::new(dir.path().join("matchups"), dir.path().join("excluded.csv"));
    run_batch(&MatchupEngine::default(), &fields, &source, &sink, 2).unwrap();

    let record = std::fs::read_to_string(dir.path().join("matchups/near_A2019123174500.csv")).unwrap();
    let header = record.lines().next().unwrap();
    assert!(header.starts_with("ID,Latitude_uw,Longitude_uw,cruise,granid,Pixel_row"));
    assert!(header.ends_with(",Location_Flag"));

    let excluded = std::fs::read_to_string(dir.path().join("excluded.csv")).unwrap();
    assert_eq!(excluded, "far,A2019123174500,1km\n");
}

#[test]
fn test_config_file() {
    let dir = temp_test_dir();
    let path = write_test_file(
        dir.path(),
        "runner.yaml",
        "matchup:\n  max_distance_km: 20000.0\nextension: nc\n",
    );
    let config = RunnerConfig::load(Some(path.as_path())).unwrap();
    assert_eq!(config.extension, "nc");

    // The far sample is accepted under a huge threshold.
    let (table, source) = setup();
    let links = read_links("far,A2019123174500\n".as_bytes()).unwrap();
    let fields = resolve_links(&table, &links).unwrap();
    let engine = MatchupEngine::new(config.matchup).unwrap();
    let summary = run_batch(&engine, &fields, &source, &MemorySink::new(), 1).unwrap();
    assert_eq!(summary.accepted, 1);
}
