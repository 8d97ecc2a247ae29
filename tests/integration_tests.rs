use chrono::NaiveDate;
use ltop_gnss::models::{Point, PointMap};
use ltop_gnss::utils::FixedEnvironment;
use ltop_gnss::{ConversionError, ConversionOptions, CoordinateAggregator};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn test_env() -> FixedEnvironment {
    let timestamp = NaiveDate::from_ymd_opt(2023, 7, 15)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap();
    FixedEnvironment::new(timestamp, "geometer")
}

fn create_campaign(root: &Path) {
    let session = root.join("session_01");
    fs::create_dir_all(&session).unwrap();
    fs::write(
        session.join("session_01_MN95_RAN95.txt"),
        "# Point\tE\tN\tH\n\
         % exported 2023-07-15\n\
         P0\t1.0\t2.0\n\
         P1\t100.0\t200.0\t300.0\n\
         P2\t150.5\t250.5\t350.5\n",
    )
    .unwrap();
}

#[test]
fn test_round_trip_default_options() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root = temp_dir.path();
    create_campaign(root);

    let result = CoordinateAggregator::new(ConversionOptions::default())
        .with_environment(test_env())
        .run(root, None)
        .unwrap();

    assert_eq!(result.coordinates.len(), 1);
    assert_eq!(result.coordinates["session_01"].len(), 2);
    assert_eq!(result.reports["session_01"].dropped_records, 1);

    let mes = fs::read_to_string(root.join("GNSS.MES")).unwrap();
    let lines: Vec<&str> = mes.lines().collect();
    assert_eq!(lines[0], "**File created 15.07.23 14:30:00 @geometer");
    assert_eq!(lines[1], "$$ME");
    assert_eq!(lines.iter().filter(|l| l.starts_with("SL")).count(), 1);
    let codes: Vec<&str> = lines[3..9].iter().map(|l| &l[..4]).collect();
    assert_eq!(codes, vec!["LYP1", "LXP1", "LZP1", "LYP2", "LXP2", "LZP2"]);
    assert_eq!(lines[9], "*".repeat(50));

    let koo = fs::read_to_string(root.join("GNSS.KOO")).unwrap();
    let point_lines: Vec<&str> = koo.lines().filter(|l| l.ends_with("LV")).collect();
    assert_eq!(point_lines.len(), 2);
    assert!(point_lines[0].starts_with("P1 "));
    assert!(point_lines[1].starts_with("P2 "));
    assert!(koo.contains("**ATTENTION"));
}

#[test]
fn test_height_uncertainty_is_three_times_planar() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_campaign(root);

    CoordinateAggregator::new(ConversionOptions::default().with_koo(false))
        .with_environment(test_env())
        .run(root, None)
        .unwrap();

    let mes = fs::read_to_string(root.join("GNSS.MES")).unwrap();
    for line in mes.lines().filter(|l| l.starts_with('L')) {
        let uncertainty: f64 = line[36..].trim().parse().unwrap();
        if line.starts_with("LZ") {
            assert_eq!(uncertainty, 6.0);
        } else {
            assert_eq!(uncertainty, 2.0);
        }
    }
}

#[test]
fn test_fixed_points_win_in_registry() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    for (session, content) in [
        ("session_01", "A\t9.0\t9.0\t9.0\nB\t2.0\t2.0\t2.0\n"),
        ("session_02", "B\t7.0\t7.0\t7.0\nC\t3.0\t3.0\t3.0\n"),
    ] {
        let dir = root.join(session);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}_MN95_RAN95.txt", session)), content).unwrap();
    }

    let mut fixed = PointMap::new();
    fixed.insert("A".to_string(), Point::new(1.0, 1.0, 1.0));

    CoordinateAggregator::new(ConversionOptions::default().with_mes(false).with_fixed_points(fixed))
        .with_environment(test_env())
        .run(root, None)
        .unwrap();

    let koo = fs::read_to_string(root.join("GNSS.KOO")).unwrap();
    let expected = "\
**File created 15.07.23 14:30:00 @geometer
$$PK
A                                     1.0000      1.0000        1.0000    LV
B                                     2.0000      2.0000        2.0000    LV
C                                     3.0000      3.0000        3.0000    LV
";
    assert_eq!(koo, expected);
}

#[test]
fn test_rerun_is_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_campaign(root);

    let aggregator =
        CoordinateAggregator::new(ConversionOptions::default()).with_environment(test_env());
    aggregator.run(root, None).unwrap();
    let first = (
        fs::read(root.join("GNSS.MES")).unwrap(),
        fs::read(root.join("GNSS.KOO")).unwrap(),
    );

    aggregator.run(root, None).unwrap();
    let second = (
        fs::read(root.join("GNSS.MES")).unwrap(),
        fs::read(root.join("GNSS.KOO")).unwrap(),
    );

    assert_eq!(first, second);
}

#[test]
fn test_options_file_drives_conversion() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("campaign");
    create_campaign(&root);

    let koo_path = temp_dir.path().join("network.KOO");
    let options_path = temp_dir.path().join("ltop.json");
    fs::write(
        &options_path,
        format!(
            r#"{{"MES": false, "path_KOO": {:?}, "unknown_key": 1}}"#,
            koo_path.to_string_lossy()
        ),
    )
    .unwrap();

    let options = ConversionOptions::from_file(&options_path).unwrap();
    let result = CoordinateAggregator::new(options)
        .with_environment(test_env())
        .run(&root, None)
        .unwrap();

    assert_eq!(result.written, vec![koo_path.clone()]);
    assert!(koo_path.exists());
    assert!(!root.join("GNSS.MES").exists());
}

#[test]
fn test_missing_root_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let result = CoordinateAggregator::new(ConversionOptions::default())
        .run(&temp_dir.path().join("nowhere"), None);

    assert!(matches!(result, Err(ConversionError::MissingRoot { .. })));
}
