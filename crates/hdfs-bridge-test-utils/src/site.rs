use std::fs;
use std::path::{Path, PathBuf};

/// Render a Hadoop `*-site.xml` document holding `pairs`.
pub fn site_xml(pairs: &[(&str, &str)]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<configuration>\n");
    for (name, value) in pairs {
        xml.push_str(&format!(
            "  <property>\n    <name>{name}</name>\n    <value>{value}</value>\n  </property>\n"
        ));
    }
    xml.push_str("</configuration>\n");
    xml
}

/// Write `dir/file_name` with `pairs`, creating `dir` if needed.
pub fn write_site_xml(dir: &Path, file_name: &str, pairs: &[(&str, &str)]) -> PathBuf {
    fs::create_dir_all(dir).expect("dir");
    let path = dir.join(file_name);
    fs::write(&path, site_xml(pairs)).expect("write");
    path
}
