//! Static page generation.
//!
//! The homepage is rendered once with askama and written to disk, then
//! served by the router under `/static` like any other asset.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use askama::Template;

use storefront_app::ports::PagePublisher;
use storefront_domain::error::StorefrontError;
use storefront_domain::homepage::{ChannelGroup, Content, Homepage};

/// File name of the generated homepage inside the output directory.
pub const INDEX_FILE: &str = "index.html";

/// Index page template.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    groups: &'a [ChannelGroup],
    contents: &'a BTreeMap<String, Vec<Content>>,
}

impl<'a> IndexTemplate<'a> {
    #[must_use]
    pub fn new(homepage: &'a Homepage) -> Self {
        Self {
            groups: &homepage.groups,
            contents: &homepage.contents,
        }
    }
}

/// Errors raised while publishing a page.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("unable to render page: {0}")]
    Render(#[from] askama::Error),
    #[error("unable to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<PublishError> for StorefrontError {
    fn from(err: PublishError) -> Self {
        StorefrontError::upstream(err)
    }
}

/// Writes rendered pages into a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct StaticPagePublisher {
    output_dir: PathBuf,
}

impl StaticPagePublisher {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Replace `name` in the output directory with `body`.
    ///
    /// The file is written next to its destination and renamed over it, so
    /// readers never see a partial page.
    async fn write_atomically(&self, name: &str, body: &str) -> Result<PathBuf, PublishError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| PublishError::Io { path, source }
        };

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(io_err(&self.output_dir))?;

        let target = self.output_dir.join(name);
        let staging = self.output_dir.join(format!(".{name}.tmp"));
        tokio::fs::write(&staging, body)
            .await
            .map_err(io_err(&staging))?;
        tokio::fs::rename(&staging, &target)
            .await
            .map_err(io_err(&target))?;
        Ok(target)
    }
}

impl PagePublisher for StaticPagePublisher {
    async fn publish(&self, homepage: &Homepage) -> Result<(), StorefrontError> {
        let html = IndexTemplate::new(homepage)
            .render()
            .map_err(PublishError::from)?;
        let path = self.write_atomically(INDEX_FILE, &html).await?;
        tracing::debug!(path = %path.display(), bytes = html.len(), "page published");
        Ok(())
    }
}
