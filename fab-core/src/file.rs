use std::{
    fmt,
    fs,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use indexmap::IndexMap;

/// Identity of a generated source artifact: a namespace plus a simple name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceName {
    namespace: String,
    simple_name: String,
}

impl SourceName {
    pub fn new(namespace: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            simple_name: simple_name.into(),
        }
    }

    /// The dotted namespace. Empty for the unnamed namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// `namespace.SimpleName`, or just the simple name in the unnamed namespace.
    pub fn qualified(&self) -> String {
        if self.namespace.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}.{}", self.namespace, self.simple_name)
        }
    }

    /// Path of the artifact relative to an output root, with namespace
    /// segments as directories.
    pub fn relative_path(&self, extension: &str) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.namespace.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.{}", self.simple_name, extension));
        path
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified())
    }
}

/// Creates output artifacts for generated sources.
///
/// The returned writer owns the artifact for as long as it lives; dropping it
/// finalizes the artifact whether or not writing completed.
pub trait Filer {
    /// Create (or truncate) the artifact for `name`.
    fn create_source(&mut self, name: &SourceName) -> io::Result<Box<dyn Write + '_>>;
}

/// Filer that writes under a root directory on disk.
#[derive(Debug, Clone)]
pub struct FsFiler {
    root: PathBuf,
    extension: String,
}

impl FsFiler {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// Full path the artifact for `name` is written to.
    pub fn path_of(&self, name: &SourceName) -> PathBuf {
        self.root.join(name.relative_path(&self.extension))
    }
}

impl Filer for FsFiler {
    fn create_source(&mut self, name: &SourceName) -> io::Result<Box<dyn Write + '_>> {
        let path = self.path_of(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(&path)?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

/// Filer that keeps artifacts in memory, in creation order.
///
/// Used for previews and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryFiler {
    files: IndexMap<SourceName, String>,
}

impl MemoryFiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of the artifact for `name`, if one was created.
    pub fn get(&self, name: &SourceName) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    /// Look up an artifact by its qualified name.
    pub fn get_qualified(&self, qualified: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|(name, _)| name.qualified() == qualified)
            .map(|(_, content)| content.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SourceName, &str)> {
        self.files.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn into_files(self) -> IndexMap<SourceName, String> {
        self.files
    }
}

impl Filer for MemoryFiler {
    fn create_source(&mut self, name: &SourceName) -> io::Result<Box<dyn Write + '_>> {
        Ok(Box::new(MemorySink {
            files: &mut self.files,
            name: name.clone(),
            buffer: Vec::new(),
        }))
    }
}

/// Writer for a [`MemoryFiler`] artifact; commits its buffer on drop.
struct MemorySink<'a> {
    files: &'a mut IndexMap<SourceName, String>,
    name: SourceName,
    buffer: Vec<u8>,
}

impl Write for MemorySink<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for MemorySink<'_> {
    fn drop(&mut self) {
        let content = String::from_utf8_lossy(&self.buffer).into_owned();
        self.files.insert(self.name.clone(), content);
    }
}
