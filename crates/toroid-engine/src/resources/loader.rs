use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::thread;

use futures::channel::oneshot;

use crate::error::ResourceError;

/// Asynchronous source of named byte blobs (shader sources).
pub trait ByteLoader: Send + Sync {
    fn load(&self, name: &str) -> impl Future<Output = Result<Vec<u8>, ResourceError>> + Send;
}

/// Reads files under a root directory, one short-lived thread per read.
#[derive(Debug, Clone)]
pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ByteLoader for FileLoader {
    fn load(&self, name: &str) -> impl Future<Output = Result<Vec<u8>, ResourceError>> + Send {
        let path = self.root.join(name);
        let name = name.to_string();
        let (tx, rx) = oneshot::channel::<io::Result<Vec<u8>>>();

        let spawned = thread::Builder::new()
            .name(format!("load {name}"))
            .spawn(move || {
                // Receiver gone means the load was abandoned.
                let _ = tx.send(std::fs::read(&path));
            });

        async move {
            spawned.map_err(ResourceError::Spawn)?;

            match rx.await {
                Ok(Ok(bytes)) => {
                    log::debug!("loaded '{name}' ({} bytes)", bytes.len());
                    Ok(bytes)
                }
                Ok(Err(e)) if e.kind() == io::ErrorKind::NotFound => Err(ResourceError::NotFound(name)),
                Ok(Err(source)) => Err(ResourceError::Load { name, source }),
                Err(oneshot::Canceled) => Err(ResourceError::Disconnected),
            }
        }
    }
}

/// In-memory loader.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    entries: HashMap<String, &'static [u8]>,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader preloaded with the engine's WGSL shaders under their default names.
    pub fn builtin() -> Self {
        Self::new()
            .with("scene.vert.wgsl", include_bytes!("shaders/scene.vert.wgsl"))
            .with("scene.frag.wgsl", include_bytes!("shaders/scene.frag.wgsl"))
            .with("screen.frag.wgsl", include_bytes!("shaders/screen.frag.wgsl"))
    }

    pub fn with(mut self, name: impl Into<String>, bytes: &'static [u8]) -> Self {
        self.entries.insert(name.into(), bytes);
        self
    }
}

impl ByteLoader for StaticLoader {
    fn load(&self, name: &str) -> impl Future<Output = Result<Vec<u8>, ResourceError>> + Send {
        let found = self
            .entries
            .get(name)
            .map(|bytes| bytes.to_vec())
            .ok_or_else(|| ResourceError::NotFound(name.to_string()));
        std::future::ready(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;

    #[test]
    fn builtin_ships_all_shader_stages() {
        let loader = StaticLoader::builtin();
        for name in ["scene.vert.wgsl", "scene.frag.wgsl", "screen.frag.wgsl"] {
            let bytes = block_on(loader.load(name)).unwrap();
            assert!(!bytes.is_empty(), "{name} is empty");
        }
    }

    #[test]
    fn static_missing_name_is_not_found() {
        let err = block_on(StaticLoader::new().load("nope.wgsl")).unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(name) if name == "nope.wgsl"));
    }

    #[test]
    fn file_loader_reads_from_root() {
        let dir = std::env::temp_dir().join(format!("toroid-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.wgsl"), b"// hello").unwrap();

        let loader = FileLoader::new(&dir);
        let bytes = block_on(loader.load("a.wgsl")).unwrap();
        assert_eq!(bytes, b"// hello");

        let missing = block_on(loader.load("b.wgsl")).unwrap_err();
        assert!(matches!(missing, ResourceError::NotFound(_)));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
