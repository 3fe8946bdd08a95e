//! Content store - loads posts of one domain from its content directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::{Document, Domain, Metadata, ParseError, Post, SchemaError};
use crate::config::InvalidContentPolicy;
use crate::Site;

/// Errors raised while loading content
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("cannot read content directory {path:?}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid header in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("invalid metadata in {path:?}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },
}

impl ContentError {
    /// File or directory the error is about
    pub fn path(&self) -> &Path {
        match self {
            ContentError::Directory { path, .. }
            | ContentError::Read { path, .. }
            | ContentError::Parse { path, .. }
            | ContentError::Schema { path, .. } => path,
        }
    }
}

/// Reads content files on every call, nothing is cached
pub struct ContentStore<'a> {
    site: &'a Site,
}

impl<'a> ContentStore<'a> {
    /// Create a new content store
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Load every post of the domain `M` belongs to, in file-name order.
    ///
    /// A missing directory is always an error. Invalid files are skipped
    /// with a warning or abort the listing, depending on `on_invalid`.
    pub fn list<M: Metadata>(&self) -> Result<Vec<Post<M>>, ContentError> {
        let files = self.content_files(M::DOMAIN)?;
        let mut posts = Vec::with_capacity(files.len());

        for path in files {
            match self.load_post(&path) {
                Ok(post) => posts.push(post),
                Err(e) => match self.site.config.on_invalid {
                    InvalidContentPolicy::Skip => {
                        tracing::warn!("Skipping {}: {}", path.display(), e);
                    }
                    InvalidContentPolicy::Abort => return Err(e),
                },
            }
        }

        tracing::debug!("Loaded {} {}", posts.len(), M::DOMAIN);
        Ok(posts)
    }

    /// Look up a single post by slug. No match is `Ok(None)`.
    pub fn find<M: Metadata>(&self, slug: &str) -> Result<Option<Post<M>>, ContentError> {
        Ok(self.list::<M>()?.into_iter().find(|post| post.slug == slug))
    }

    /// Load every file and report all failures, regardless of `on_invalid`
    pub fn check<M: Metadata>(&self) -> Result<Vec<ContentError>, ContentError> {
        let failures = self
            .content_files(M::DOMAIN)?
            .iter()
            .filter_map(|path| self.load_post::<M>(path).err())
            .collect();
        Ok(failures)
    }

    /// Content files directly inside the domain directory, sorted by name
    pub fn content_files(&self, domain: Domain) -> Result<Vec<PathBuf>, ContentError> {
        let dir = self.site.content_dir(domain);
        let directory_error = |source: io::Error| ContentError::Directory {
            path: dir.clone(),
            source,
        };

        let metadata = fs::metadata(&dir).map_err(directory_error)?;
        if !metadata.is_dir() {
            return Err(directory_error(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a directory",
            )));
        }

        let extension = self.site.config.content_extension();
        let mut files = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| directory_error(e.into()))?;
            let path = entry.path();
            if path.is_file() && has_extension(path, extension) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    /// Load a single post from a file
    pub fn load_post<M: Metadata>(&self, path: &Path) -> Result<Post<M>, ContentError> {
        let raw = fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let document = Document::parse(&raw).map_err(|source| ContentError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Slug comes from the file name, never from the header
        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let post = Post::from_document(slug, document).map_err(|source| ContentError::Schema {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Loaded {:?}", path);
        Ok(post)
    }
}

/// Check whether a path ends in the given extension
fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == extension)
        .unwrap_or(false)
}
