use crate::client::KlaviyoClient;
use crate::error::SyncError;
use ksync_cache::{CacheStore, CacheTtl, DEFAULT_BUCKET};
use ksync_domain::{ListOptions, MarketingList};
use ksync_klaviyo::MarketingApi;
use std::sync::Arc;
use tracing::{debug, warn};

/// Cache key of the list options view.
pub const LIST_OPTIONS_CACHE_KEY: &str = "klaviyo:list_options";

/// Cached `listType:id -> name` view of the remote lists.
#[derive(Debug)]
pub struct ListCache<A, C> {
    client: KlaviyoClient<A>,
    cache: Arc<C>,
}

impl<A, C> Clone for ListCache<A, C> {
    fn clone(&self) -> Self {
        Self { client: self.client.clone(), cache: Arc::clone(&self.cache) }
    }
}

impl<A: MarketingApi, C: CacheStore> ListCache<A, C> {
    pub const fn new(client: KlaviyoClient<A>, cache: Arc<C>) -> Self {
        Self { client, cache }
    }

    /// List options, fetched from the remote API on a cache miss.
    ///
    /// An empty or unreadable cached value counts as a miss. Failed fetches are not cached.
    ///
    /// # Errors
    /// Returns [`SyncError::Remote`] when a miss cannot be filled.
    pub async fn cached_list_options(&self) -> Result<ListOptions, SyncError> {
        if let Some(options) = self.cached() {
            debug!(count = options.len(), "List options cache hit");
            return Ok(options);
        }

        debug!("List options cache miss");
        let lists = self.client.lists().await?;
        let options = build_options(&lists);

        match serde_json::to_value(&options) {
            Ok(value) => {
                self.cache.set(LIST_OPTIONS_CACHE_KEY, value, DEFAULT_BUCKET, CacheTtl::Temporary);
            },
            Err(e) => warn!(error = %e, "List options not cached"),
        }
        Ok(options)
    }

    /// Creates a list remotely, then drops the cached options.
    ///
    /// # Errors
    /// Returns [`SyncError::Remote`] on failure; the cache is left untouched.
    pub async fn create_list(&self, name: &str) -> Result<MarketingList, SyncError> {
        let list = self.client.create_list(name).await?;
        self.invalidate();
        Ok(list)
    }

    pub fn invalidate(&self) {
        self.cache.clear(LIST_OPTIONS_CACHE_KEY, DEFAULT_BUCKET);
    }

    /// `"listType:id"` for a list.
    #[must_use]
    pub fn full_list_id(list: &MarketingList) -> String {
        list.full_id()
    }

    /// Splits a known full list id into `(type, id)`.
    ///
    /// Ids missing from the list options yield `("", "")`.
    ///
    /// # Errors
    /// Returns [`SyncError::Remote`] when the options cannot be loaded.
    pub async fn parse_full_list_id(&self, full_id: &str) -> Result<(String, String), SyncError> {
        let options = self.cached_list_options().await?;
        Ok(split_full_id(&options, full_id))
    }

    /// The list addressed by a full id, if it is among the list options.
    ///
    /// # Errors
    /// Returns [`SyncError::Remote`] when the options cannot be loaded.
    pub async fn resolve_list(&self, full_id: &str) -> Result<Option<MarketingList>, SyncError> {
        let options = self.cached_list_options().await?;
        let (list_type, id) = split_full_id(&options, full_id);
        if list_type.is_empty() && id.is_empty() {
            return Ok(None);
        }
        let name = options.get(full_id).unwrap_or_default().to_owned();
        Ok(Some(MarketingList { id, list_type, name }))
    }

    fn cached(&self) -> Option<ListOptions> {
        let value = self.cache.get(LIST_OPTIONS_CACHE_KEY, DEFAULT_BUCKET)?;
        serde_json::from_value::<ListOptions>(value).ok().filter(|options| !options.is_empty())
    }
}

fn build_options(lists: &[MarketingList]) -> ListOptions {
    let mut options = ListOptions::new();
    for list in lists {
        options.insert(list.full_id(), escape_html(&list.name));
    }
    options
}

fn split_full_id(options: &ListOptions, full_id: &str) -> (String, String) {
    if !options.contains(full_id) {
        return (String::new(), String::new());
    }
    match full_id.split_once(':') {
        Some((list_type, id)) => (list_type.to_owned(), id.to_owned()),
        None => (full_id.to_owned(), String::new()),
    }
}

/// Escapes text for inclusion in HTML.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn names_are_escaped() {
        assert_eq!(escape_html(r#"Tom & "Jerry's" <list>"#), "Tom &amp; &quot;Jerry&#039;s&quot; &lt;list&gt;");
    }

    #[test]
    fn ids_without_a_separator_keep_an_empty_id() {
        let mut options = ListOptions::new();
        options.insert("orphan", "Orphan");
        assert_eq!(split_full_id(&options, "orphan"), ("orphan".to_owned(), String::new()));
    }

    #[test]
    fn only_the_first_separator_splits() {
        let mut options = ListOptions::new();
        options.insert("segment:a:b", "Odd");
        assert_eq!(split_full_id(&options, "segment:a:b"), ("segment".to_owned(), "a:b".to_owned()));
    }

    proptest! {
        #[test]
        fn escaped_text_has_no_markup(text in ".*") {
            let escaped = escape_html(&text);
            prop_assert!(!escaped.contains(['<', '>', '"', '\'']));
        }

        #[test]
        fn unknown_ids_parse_to_empty_pair(full_id in "[a-z]{1,8}:[0-9]{1,4}") {
            prop_assert_eq!(split_full_id(&ListOptions::new(), &full_id), (String::new(), String::new()));
        }
    }
}
