//! Hadoop configuration resolution tests.

use hdfs_bridge_config::{
    CORE_SITE_FILE, Configuration, FlinkConfig, HDFS_DEFAULT_CONFIG, HDFS_SITE_CONFIG,
    HDFS_SITE_FILE, PATH_HADOOP_CONFIG, ResolveOptions, ResolvedHadoopConf, ResourceOrigin,
    resolve_with_report,
};
use hdfs_bridge_test_utils::{RecordingObserver, env_map, write_site_xml};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

fn resolve(
    process: &FlinkConfig,
    env: &HashMap<String, String>,
    observer: &RecordingObserver,
) -> ResolvedHadoopConf {
    resolve_with_report(
        ResolveOptions::new(process)
            .with_env(env)
            .with_observer(observer),
    )
}

fn origins(resolved: &ResolvedHadoopConf) -> Vec<ResourceOrigin> {
    resolved
        .resources
        .iter()
        .map(|resource| resource.origin)
        .collect()
}

fn default_fs(conf: &Configuration) -> Option<String> {
    conf.get("fs.defaultFS").expect("get")
}

/// Nothing configured: built-in defaults and a single diagnostic note.
#[test]
fn falls_back_to_builtin_defaults() {
    let observer = RecordingObserver::new();
    let resolved = resolve(&FlinkConfig::new(), &HashMap::new(), &observer);

    assert!(!resolved.found());
    assert_eq!(
        resolved.configuration.resources(),
        Configuration::hdfs().resources()
    );
    assert_eq!(default_fs(&resolved.configuration), Some("file:///".to_string()));
    let fallbacks = observer
        .notes()
        .into_iter()
        .filter(|note| note.contains("could not find hadoop configuration"))
        .count();
    assert_eq!(fallbacks, 1);
}

/// The later-precedence candidate wins on key collision.
#[test]
fn hadoop_conf_dir_overrides_hadoop_home() {
    let temp = TempDir::new().expect("tmp");
    let hadoop_home = temp.path().join("opt/hadoop");
    let conf_dir = temp.path().join("etc/hadoop2");
    write_site_xml(
        &hadoop_home.join("etc/hadoop"),
        CORE_SITE_FILE,
        &[("fs.defaultFS", "hdfs://a")],
    );
    write_site_xml(&conf_dir, CORE_SITE_FILE, &[("fs.defaultFS", "hdfs://b")]);

    let env = env_map(&[
        ("HADOOP_HOME", hadoop_home.to_str().expect("utf8")),
        ("HADOOP_CONF_DIR", conf_dir.to_str().expect("utf8")),
    ]);
    let observer = RecordingObserver::new();
    let resolved = resolve(&FlinkConfig::new(), &env, &observer);

    assert_eq!(default_fs(&resolved.configuration), Some("hdfs://b".to_string()));
    assert_eq!(
        origins(&resolved),
        vec![ResourceOrigin::HadoopHomeEtc, ResourceOrigin::HadoopConfDir]
    );
}

/// Every candidate slot defines the same key; the fallback directory is last.
#[test]
fn candidate_precedence_is_fixed() {
    let temp = TempDir::new().expect("tmp");
    let hadoop_home = temp.path().join("home");
    let conf_dir = temp.path().join("conf-dir");
    let flink_dir = temp.path().join("flink-dir");
    write_site_xml(&hadoop_home.join("conf"), CORE_SITE_FILE, &[("k", "home-conf")]);
    write_site_xml(&hadoop_home.join("etc/hadoop"), CORE_SITE_FILE, &[("k", "home-etc")]);
    write_site_xml(&conf_dir, CORE_SITE_FILE, &[("k", "conf-dir")]);
    write_site_xml(&flink_dir, CORE_SITE_FILE, &[("k", "flink-dir")]);

    let env = env_map(&[
        ("HADOOP_HOME", hadoop_home.to_str().expect("utf8")),
        ("HADOOP_CONF_DIR", conf_dir.to_str().expect("utf8")),
    ]);
    let process = FlinkConfig::new().with(PATH_HADOOP_CONFIG, flink_dir.to_str().expect("utf8"));
    let observer = RecordingObserver::new();
    let resolved = resolve(&process, &env, &observer);

    assert_eq!(
        origins(&resolved),
        vec![
            ResourceOrigin::HadoopHomeConf,
            ResourceOrigin::HadoopHomeEtc,
            ResourceOrigin::HadoopConfDir,
            ResourceOrigin::ProcessConfigDir,
        ]
    );
    assert_eq!(
        resolved.configuration.get("k").expect("get"),
        Some("flink-dir".to_string())
    );

    let without_fallback = resolve(&FlinkConfig::new(), &env, &observer);
    assert_eq!(
        without_fallback.configuration.get("k").expect("get"),
        Some("conf-dir".to_string())
    );
}

/// Without HADOOP_HOME its derived slots contribute nothing, even when
/// HADOOP_CONF_DIR points at the same directory.
#[test]
fn unset_hadoop_home_contributes_nothing() {
    let temp = TempDir::new().expect("tmp");
    let etc_hadoop = temp.path().join("hadoop/etc/hadoop");
    write_site_xml(&etc_hadoop, CORE_SITE_FILE, &[("fs.defaultFS", "hdfs://nn")]);

    let env = env_map(&[("HADOOP_CONF_DIR", etc_hadoop.to_str().expect("utf8"))]);
    let observer = RecordingObserver::new();
    let resolved = resolve(&FlinkConfig::new(), &env, &observer);

    assert_eq!(origins(&resolved), vec![ResourceOrigin::HadoopConfDir]);
    assert_eq!(default_fs(&resolved.configuration), Some("hdfs://nn".to_string()));
}

/// core-site.xml and hdfs-site.xml are probed independently, core first.
#[test]
fn both_site_files_are_added_from_one_directory() {
    let temp = TempDir::new().expect("tmp");
    let dir = temp.path().join("conf");
    let core = write_site_xml(&dir, CORE_SITE_FILE, &[("shared", "core"), ("core.only", "1")]);
    let hdfs = write_site_xml(&dir, HDFS_SITE_FILE, &[("shared", "hdfs")]);

    let env = env_map(&[("HADOOP_CONF_DIR", dir.to_str().expect("utf8"))]);
    let observer = RecordingObserver::new();
    let resolved = resolve(&FlinkConfig::new(), &env, &observer);

    let paths: Vec<PathBuf> = resolved
        .resources
        .iter()
        .map(|resource| resource.path.clone())
        .collect();
    assert_eq!(paths, vec![core, hdfs]);
    assert_eq!(
        resolved.configuration.get("shared").expect("get"),
        Some("hdfs".to_string())
    );
    assert_eq!(
        resolved.configuration.get("core.only").expect("get"),
        Some("1".to_string())
    );
}

/// A directory holding only hdfs-site.xml still contributes it.
#[test]
fn directory_with_single_site_file_contributes_it() {
    let temp = TempDir::new().expect("tmp");
    let dir = temp.path().join("conf");
    write_site_xml(&dir, HDFS_SITE_FILE, &[("dfs.replication", "1")]);

    let process = FlinkConfig::new().with(PATH_HADOOP_CONFIG, dir.to_str().expect("utf8"));
    let observer = RecordingObserver::new();
    let resolved = resolve(&process, &HashMap::new(), &observer);

    assert_eq!(origins(&resolved), vec![ResourceOrigin::ProcessConfigDir]);
    assert_eq!(
        resolved.configuration.get("dfs.replication").expect("get"),
        Some("1".to_string())
    );
}

/// Missing candidate directories are skipped with a note.
#[test]
fn missing_candidate_directory_is_skipped() {
    let temp = TempDir::new().expect("tmp");
    let missing = temp.path().join("nope");
    let env = env_map(&[("HADOOP_CONF_DIR", missing.to_str().expect("utf8"))]);
    let observer = RecordingObserver::new();
    let resolved = resolve(&FlinkConfig::new(), &env, &observer);

    assert!(!resolved.found());
    assert!(observer.contains("skipping missing hadoop conf dir"));
}

/// Explicit default/site paths are added even when the files do not exist;
/// only candidate directories are existence-checked.
#[test]
fn explicit_paths_are_added_without_existence_check() {
    let temp = TempDir::new().expect("tmp");
    let missing_default = temp.path().join("missing-default.xml");
    let missing_site = temp.path().join("missing-site.xml");
    let process = FlinkConfig::new()
        .with(HDFS_DEFAULT_CONFIG, missing_default.to_str().expect("utf8"))
        .with(HDFS_SITE_CONFIG, missing_site.to_str().expect("utf8"));
    let observer = RecordingObserver::new();
    let resolved = resolve(&process, &HashMap::new(), &observer);

    assert!(resolved.found());
    assert_eq!(
        origins(&resolved),
        vec![ResourceOrigin::ProcessDefaultFile, ResourceOrigin::ProcessSiteFile]
    );
    assert_eq!(
        resolved.configuration.resources().last().and_then(|r| r.path()),
        Some(missing_site.as_path())
    );
    assert!(!observer.contains("could not find hadoop configuration"));
    // The store skips the missing files quietly.
    assert_eq!(
        resolved.configuration.get("dfs.replication").expect("get"),
        Some("3".to_string())
    );
}

/// Explicit files are applied before every candidate directory.
#[test]
fn candidate_directories_override_explicit_files() {
    let temp = TempDir::new().expect("tmp");
    let site = write_site_xml(
        &temp.path().join("explicit"),
        "custom-site.xml",
        &[("fs.defaultFS", "hdfs://explicit"), ("explicit.only", "yes")],
    );
    let conf_dir = temp.path().join("conf-dir");
    write_site_xml(&conf_dir, CORE_SITE_FILE, &[("fs.defaultFS", "hdfs://conf-dir")]);

    let process = FlinkConfig::new().with(HDFS_SITE_CONFIG, site.to_str().expect("utf8"));
    let env = env_map(&[("HADOOP_CONF_DIR", conf_dir.to_str().expect("utf8"))]);
    let observer = RecordingObserver::new();
    let resolved = resolve(&process, &env, &observer);

    assert_eq!(
        default_fs(&resolved.configuration),
        Some("hdfs://conf-dir".to_string())
    );
    assert_eq!(
        resolved.configuration.get("explicit.only").expect("get"),
        Some("yes".to_string())
    );
}

/// The explicit default file is applied before the explicit site file.
#[test]
fn explicit_site_overrides_explicit_default() {
    let temp = TempDir::new().expect("tmp");
    let default = write_site_xml(temp.path(), "d.xml", &[("dfs.replication", "2")]);
    let site = write_site_xml(temp.path(), "s.xml", &[("dfs.replication", "4")]);
    let process = FlinkConfig::new()
        .with(HDFS_DEFAULT_CONFIG, default.to_str().expect("utf8"))
        .with(HDFS_SITE_CONFIG, site.to_str().expect("utf8"));
    let observer = RecordingObserver::new();
    let resolved = resolve(&process, &HashMap::new(), &observer);

    assert_eq!(
        resolved.configuration.get("dfs.replication").expect("get"),
        Some("4".to_string())
    );
    assert!(observer.contains(HDFS_DEFAULT_CONFIG));
}

/// A site file can clear a built-in default with an empty value element.
#[test]
fn empty_site_value_clears_builtin_default() {
    let temp = TempDir::new().expect("tmp");
    let conf_dir = temp.path().join("conf");
    write_site_xml(&conf_dir, CORE_SITE_FILE, &[("fs.defaultFS", "")]);

    let env = env_map(&[("HADOOP_CONF_DIR", conf_dir.to_str().expect("utf8"))]);
    let observer = RecordingObserver::new();
    let resolved = resolve(&FlinkConfig::new(), &env, &observer);

    assert_eq!(default_fs(&resolved.configuration), Some(String::new()));
}
