use std::fs;
use tempfile::TempDir;
use threatfeed_etl::{
    ConvertConfig, EtlEngine, EtlError, FeedPipeline, LocalStorage, RejectReason, UrlCanonicalizer,
};

fn run(config: ConvertConfig) -> threatfeed_etl::Result<threatfeed_etl::EtlReport> {
    let pipeline = FeedPipeline::new(LocalStorage::default(), config, UrlCanonicalizer::new());
    EtlEngine::new(pipeline).run()
}

#[test]
fn test_end_to_end_conversion() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("malwaredomains.txt");
    let destination = temp_dir.path().join("release-json").join("out.json");

    fs::write(
        &source,
        "example.com\tmalware\n\
         %3Aexample.com\t\n\
         http://evil.com/path\tphishing\n\
         \n\
         evil.org:8080\tphishing\n\
         Mixed.Case.NET/Login.php\tphishing\n\
         no-tag.info\n",
    )?;

    let report = run(ConvertConfig::new(&source, &destination))?;

    assert_eq!(report.summary.total_lines, 7);
    assert_eq!(report.summary.kept, 4);
    assert_eq!(report.summary.rejected[&RejectReason::EncodedColon], 1);
    assert_eq!(report.summary.rejected[&RejectReason::Empty], 1);
    assert_eq!(report.summary.rejected[&RejectReason::MalformedScheme], 1);

    let written = fs::read_to_string(&destination)?;
    assert_eq!(
        written,
        concat!(
            r#"[{"u":"example.com","m":2},"#,
            r#"{"u":"evil.com\/path","m":1},"#,
            r#"{"u":"mixed.case.net\/Login.php","m":1},"#,
            r#"{"u":"no-tag.info","m":0}]"#
        )
    );

    Ok(())
}

#[test]
fn test_output_round_trips_to_canonical_urls() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("feed.txt");
    let destination = temp_dir.path().join("feed.json");
    fs::write(&source, "https://a.com/x/y\tmalware\nb.net/\tphishing\n")?;

    run(ConvertConfig::new(&source, &destination))?;

    let written = fs::read_to_string(&destination)?;
    assert!(!written.contains("a.com/x"));

    let parsed: serde_json::Value = serde_json::from_str(&written.replace("\\/", "/"))?;
    assert_eq!(parsed[0]["u"], "a.com/x/y");
    assert_eq!(parsed[0]["m"], 2);
    assert_eq!(parsed[1]["u"], "b.net/");
    assert_eq!(parsed[1]["m"], 1);

    Ok(())
}

#[test]
fn test_windows_line_endings() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("feed.txt");
    let destination = temp_dir.path().join("feed.json");
    fs::write(&source, "a.com\tmalware\r\nb.com\tphishing\r\n")?;

    run(ConvertConfig::new(&source, &destination))?;

    assert_eq!(
        fs::read_to_string(&destination)?,
        r#"[{"u":"a.com","m":2},{"u":"b.com","m":1}]"#
    );
    Ok(())
}

#[test]
fn test_destination_is_overwritten() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("feed.txt");
    let destination = temp_dir.path().join("feed.json");
    fs::write(&source, "a.com\n")?;
    fs::write(&destination, "stale content that is much longer than the new output")?;

    run(ConvertConfig::new(&source, &destination))?;

    assert_eq!(fs::read_to_string(&destination)?, r#"[{"u":"a.com","m":0}]"#);
    Ok(())
}

#[test]
fn test_missing_source_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let destination = temp_dir.path().join("out.json");

    let result = run(ConvertConfig::new(temp_dir.path().join("missing.txt"), &destination));

    assert!(matches!(result, Err(EtlError::IoError(_))));
    assert!(!destination.exists());
}

#[test]
fn test_unwritable_destination_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("feed.txt");
    fs::write(&source, "a.com\n").unwrap();

    // A directory cannot be opened for writing as a file.
    let result = run(ConvertConfig::new(&source, temp_dir.path()));

    assert!(matches!(result, Err(EtlError::IoError(_))));
}

#[test]
fn test_skip_and_strict_modes() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("feed.txt");
    let destination = temp_dir.path().join("feed.json");
    fs::write(&source, "good.com\tmalware\nbad<host>.com\tphishing\nfine.org\tphishing\n")?;

    let report = run(ConvertConfig::new(&source, &destination))?;
    assert_eq!(report.summary.failed, 1);
    assert_eq!(
        fs::read_to_string(&destination)?,
        r#"[{"u":"good.com","m":2},{"u":"fine.org","m":1}]"#
    );

    let strict_destination = temp_dir.path().join("strict.json");
    let result = run(ConvertConfig::new(&source, &strict_destination).with_strict(true));
    assert!(matches!(result, Err(EtlError::CanonicalizeError { .. })));
    assert!(!strict_destination.exists());

    Ok(())
}

#[test]
fn test_dedupe_is_opt_in() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("feed.txt");
    let destination = temp_dir.path().join("feed.json");
    fs::write(&source, "a.com\tphishing\nhttp://a.com\tmalware\n")?;

    let report = run(ConvertConfig::new(&source, &destination))?;
    assert_eq!(report.summary.kept, 2);
    assert_eq!(report.summary.written, 2);

    let report = run(ConvertConfig::new(&source, &destination).with_dedupe(true))?;
    assert_eq!(report.summary.duplicates_removed, 1);
    assert_eq!(report.summary.written, 1);
    assert_eq!(fs::read_to_string(&destination)?, r#"[{"u":"a.com","m":1}]"#);

    Ok(())
}
