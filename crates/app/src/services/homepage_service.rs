//! Homepage service: assemble and publish the static index page.

use storefront_domain::error::StorefrontError;
use storefront_domain::homepage::Homepage;

use crate::ports::{HomepageSource, PagePublisher};

/// Application service regenerating the homepage.
pub struct HomepageService<S, P> {
    source: S,
    publisher: P,
}

impl<S: HomepageSource, P: PagePublisher> HomepageService<S, P> {
    pub fn new(source: S, publisher: P) -> Self {
        Self { source, publisher }
    }

    /// Load channels, categories and contents, assemble them and publish the
    /// result. Returns what was published.
    ///
    /// # Errors
    ///
    /// Propagates source and publisher failures; nothing is published then.
    #[tracing::instrument(skip(self))]
    pub async fn generate(&self) -> Result<Homepage, StorefrontError> {
        let channels = self.source.channels().await?;
        let categories = self.source.categories().await?;
        let contents = self.source.contents().await?;

        let homepage = Homepage::assemble(channels, &categories, contents);
        self.publisher.publish(&homepage).await?;
        tracing::info!(groups = homepage.groups.len(), "homepage generated");
        Ok(homepage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::{RecordingPublisher, StaticHomepageSource};
    use storefront_domain::homepage::{Category, Channel, Content};
    use storefront_domain::id::{CategoryId, ContentId};

    fn cat(id: i64, name: &str, parent: Option<i64>) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            name: name.to_string(),
            parent_id: parent.map(|p| CategoryId::new(p).unwrap()),
        }
    }

    #[tokio::test]
    async fn should_publish_assembled_homepage() {
        let source = StaticHomepageSource {
            channels: vec![Channel {
                group_id: 1,
                category_id: CategoryId::new(1).unwrap(),
                url: "http://shouji.example.com".to_string(),
                sequence: 1,
            }],
            categories: vec![
                cat(1, "Phones", None),
                cat(2, "Handsets", Some(1)),
                cat(3, "Smartphones", Some(2)),
            ],
            contents: vec![Content {
                id: ContentId::new(1).unwrap(),
                category_key: "index_lbt".to_string(),
                title: "Sale".to_string(),
                url: "http://sale".to_string(),
                image: None,
                text: None,
                sequence: 1,
                status: true,
            }],
        };
        let svc = HomepageService::new(source, RecordingPublisher::default());

        let homepage = svc.generate().await.unwrap();
        assert_eq!(homepage.groups.len(), 1);
        assert_eq!(homepage.groups[0].sub_cats[0].sub_cats[0].name, "Smartphones");
        assert_eq!(homepage.contents["index_lbt"].len(), 1);

        let published = svc.publisher.published.lock().unwrap();
        assert_eq!(published.as_slice(), &[homepage]);
    }

    #[tokio::test]
    async fn should_publish_empty_page_without_source_rows() {
        let svc = HomepageService::new(
            StaticHomepageSource::default(),
            RecordingPublisher::default(),
        );
        let homepage = svc.generate().await.unwrap();
        assert!(homepage.groups.is_empty());
        assert_eq!(svc.publisher.published.lock().unwrap().len(), 1);
    }
}
