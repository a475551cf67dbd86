//! Configuration resources and the Hadoop XML property format.

use crate::ConfigError;
use log::{debug, warn};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the built-in HDFS default resource.
pub const HDFS_DEFAULT_RESOURCE: &str = "hdfs-default.xml";
/// Name of the built-in HDFS site resource.
pub const HDFS_SITE_RESOURCE: &str = "hdfs-site.xml";

const HDFS_DEFAULT_XML: &str = include_str!("../../resources/hdfs-default.xml");
const HDFS_SITE_XML: &str = include_str!("../../resources/hdfs-site.xml");

/// A named source of properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// XML bundled into the crate.
    Builtin {
        name: &'static str,
        contents: &'static str,
    },
    /// XML file on disk, read when the configuration is loaded.
    File(PathBuf),
    /// XML supplied in memory under a caller-chosen name.
    Inline { name: String, contents: String },
}

impl Resource {
    /// Built-in HDFS defaults.
    pub fn hdfs_default() -> Self {
        Self::Builtin {
            name: HDFS_DEFAULT_RESOURCE,
            contents: HDFS_DEFAULT_XML,
        }
    }

    /// Built-in HDFS site settings.
    pub fn hdfs_site() -> Self {
        Self::Builtin {
            name: HDFS_SITE_RESOURCE,
            contents: HDFS_SITE_XML,
        }
    }

    /// In-memory XML resource.
    pub fn inline(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self::Inline {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Label used for provenance and diagnostics.
    pub fn name(&self) -> String {
        match self {
            Self::Builtin { name, .. } => (*name).to_string(),
            Self::File(path) => path.display().to_string(),
            Self::Inline { name, .. } => name.clone(),
        }
    }

    /// Path on disk, for file resources.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            _ => None,
        }
    }

    /// Parse the resource. A missing file yields `None` in quiet mode.
    pub(super) fn load(&self, quiet: bool) -> Result<Option<Vec<XmlProperty>>, ConfigError> {
        match self {
            Self::Builtin { name, contents } => parse_properties(contents, name).map(Some),
            Self::Inline { name, contents } => parse_properties(contents, name).map(Some),
            Self::File(path) => {
                if !path.is_file() {
                    if quiet {
                        debug!("skipping missing resource (path={})", path.display());
                        return Ok(None);
                    }
                    return Err(ConfigError::MissingResource(path.clone()));
                }
                let contents = fs::read_to_string(path)?;
                parse_properties(&contents, &path.display().to_string()).map(Some)
            }
        }
    }
}

impl From<PathBuf> for Resource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for Resource {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

/// A single `<property>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct XmlProperty {
    pub(super) name: String,
    pub(super) value: String,
    pub(super) is_final: bool,
}

#[derive(Debug, Default)]
struct PartialProperty {
    name: Option<String>,
    value: Option<String>,
    is_final: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Name,
    Value,
    Final,
}

impl PartialProperty {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::Value => &mut self.value,
            Field::Final => &mut self.is_final,
        }
    }
}

/// Parse `<configuration><property><name/><value/><final/></property></configuration>`.
///
/// Properties without a name or value are skipped; unknown child elements such
/// as `<description>` are ignored. Names and the final flag are trimmed, values
/// are kept as written.
pub(super) fn parse_properties(contents: &str, resource: &str) -> Result<Vec<XmlProperty>, ConfigError> {
    let mut reader = Reader::from_str(contents);

    let mut properties = Vec::new();
    let mut saw_root = false;
    let mut depth = 0usize;
    let mut current: Option<PartialProperty> = None;
    let mut field: Option<Field> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|err| xml_error(resource, err))?;
        match event {
            Event::Start(start) => {
                depth += 1;
                match start.name().as_ref() {
                    b"configuration" if depth == 1 => saw_root = true,
                    _ if depth == 1 => return Err(not_configuration_root(resource)),
                    b"property" => current = Some(PartialProperty::default()),
                    tag => {
                        field = match tag {
                            b"name" => Some(Field::Name),
                            b"value" => Some(Field::Value),
                            b"final" => Some(Field::Final),
                            _ => None,
                        };
                        // `<value></value>` holds an empty value, not a missing one.
                        if let (Some(property), Some(field)) = (current.as_mut(), field) {
                            property.slot(field).get_or_insert_with(String::new);
                        }
                    }
                }
            }
            Event::Empty(empty) => match empty.name().as_ref() {
                b"configuration" if depth == 0 => saw_root = true,
                _ if depth == 0 => return Err(not_configuration_root(resource)),
                b"value" => {
                    if let Some(property) = current.as_mut() {
                        property.value.get_or_insert_with(String::new);
                    }
                }
                _ => {}
            },
            Event::Text(text) => {
                if let (Some(property), Some(field)) = (current.as_mut(), field) {
                    let text = text.unescape().map_err(|err| xml_error(resource, err))?;
                    property.slot(field).get_or_insert_with(String::new).push_str(&text);
                }
            }
            Event::CData(data) => {
                if let (Some(property), Some(field)) = (current.as_mut(), field) {
                    let text = String::from_utf8_lossy(&data);
                    property.slot(field).get_or_insert_with(String::new).push_str(&text);
                }
            }
            Event::End(end) => {
                depth = depth.saturating_sub(1);
                match end.name().as_ref() {
                    b"property" => {
                        if let Some(property) = current.take() {
                            push_property(&mut properties, property, resource);
                        }
                    }
                    b"name" | b"value" | b"final" => field = None,
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(not_configuration_root(resource));
    }
    debug!(
        "parsed resource (name={resource}, properties={})",
        properties.len()
    );
    Ok(properties)
}

fn push_property(properties: &mut Vec<XmlProperty>, property: PartialProperty, resource: &str) {
    let Some(name) = property
        .name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
    else {
        warn!("ignoring property without a name (resource={resource})");
        return;
    };
    let Some(value) = property.value else {
        debug!("ignoring property without a value (resource={resource}, name={name})");
        return;
    };
    let is_final = property
        .is_final
        .is_some_and(|flag| flag.trim().eq_ignore_ascii_case("true"));
    properties.push(XmlProperty {
        name,
        value,
        is_final,
    });
}

fn xml_error(resource: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::XmlFailed {
        resource: resource.to_string(),
        message: err.to_string(),
    }
}

fn not_configuration_root(resource: &str) -> ConfigError {
    xml_error(resource, "top-level element is not <configuration>")
}
