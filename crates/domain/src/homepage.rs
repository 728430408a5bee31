//! Homepage: navigation channels, category tree, and advertising slots
//! assembled into the data a static index page is rendered from.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::id::{CategoryId, ContentId};

/// A node of the three-level category tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub parent_id: Option<CategoryId>,
}

/// A navigation channel pointing at a top-level category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub group_id: u32,
    pub category_id: CategoryId,
    pub url: String,
    pub sequence: i32,
}

/// An advertising content item placed in a named slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    pub id: ContentId,
    /// Slot key, e.g. `index_lbt` for the carousel.
    pub category_key: String,
    pub title: String,
    pub url: String,
    pub image: Option<String>,
    pub text: Option<String>,
    pub sequence: i32,
    pub status: bool,
}

/// Link to a channel's top-level category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelLink {
    pub id: CategoryId,
    pub name: String,
    pub url: String,
}

/// Second-level category with its third-level children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubCategory {
    pub id: CategoryId,
    pub name: String,
    pub sub_cats: Vec<Category>,
}

/// All channels sharing a `group_id`, in sequence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChannelGroup {
    pub group_id: u32,
    pub channels: Vec<ChannelLink>,
    pub sub_cats: Vec<SubCategory>,
}

/// Everything the index page shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Homepage {
    pub groups: Vec<ChannelGroup>,
    pub contents: BTreeMap<String, Vec<Content>>,
}

impl Homepage {
    /// Build the homepage from flat source rows.
    ///
    /// Channels whose category is unknown are skipped. Only contents with
    /// `status == true` are kept.
    #[must_use]
    pub fn assemble(
        mut channels: Vec<Channel>,
        categories: &[Category],
        contents: Vec<Content>,
    ) -> Self {
        channels.sort_by_key(|channel| (channel.group_id, channel.sequence));

        let children = |parent: CategoryId| {
            categories
                .iter()
                .filter(move |cat| cat.parent_id == Some(parent))
        };

        let mut groups: Vec<ChannelGroup> = Vec::new();
        for channel in channels {
            let Some(top) = categories.iter().find(|cat| cat.id == channel.category_id) else {
                continue;
            };

            if groups.last().is_none_or(|g| g.group_id != channel.group_id) {
                groups.push(ChannelGroup {
                    group_id: channel.group_id,
                    ..ChannelGroup::default()
                });
            }
            let Some(group) = groups.last_mut() else {
                continue;
            };

            group.channels.push(ChannelLink {
                id: top.id,
                name: top.name.clone(),
                url: channel.url,
            });
            group
                .sub_cats
                .extend(children(top.id).map(|cat2| SubCategory {
                    id: cat2.id,
                    name: cat2.name.clone(),
                    sub_cats: children(cat2.id).cloned().collect(),
                }));
        }

        let mut slots: BTreeMap<String, Vec<Content>> = BTreeMap::new();
        for content in contents.into_iter().filter(|content| content.status) {
            slots
                .entry(content.category_key.clone())
                .or_default()
                .push(content);
        }
        for items in slots.values_mut() {
            items.sort_by_key(|content| content.sequence);
        }

        Self {
            groups,
            contents: slots,
        }
    }
}
