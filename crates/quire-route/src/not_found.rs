//! Not-found page synthesis.

use quire_config::{SiteConfig, TocSetting};
use quire_content::{
    ContentEntry, ContentStore, DOCS_COLLECTION, EditUrl, EntryData, Hero, Template,
};

use crate::i18n::TranslationLookup;
use crate::routing::{LocaleMeta, Route};

/// Id of the not-found entry.
pub const NOT_FOUND_ID: &str = "404";

/// Route for the not-found page in the default locale.
///
/// Uses the user's `404` docs entry when there is one, otherwise a built-in
/// splash page whose tagline is the localized `404.text` string. A failing
/// store lookup also yields the built-in page.
pub fn not_found_route(
    config: &SiteConfig,
    store: &dyn ContentStore,
    translations: &dyn TranslationLookup,
) -> Route {
    let meta = LocaleMeta::default_locale(config);
    let entry = match store.get(DOCS_COLLECTION, NOT_FOUND_ID) {
        Ok(Some(entry)) => entry,
        Ok(None) => fallback_entry(config, &meta.lang, translations),
        Err(e) => {
            tracing::debug!(error = %e, "Not-found entry lookup failed, using built-in page");
            fallback_entry(config, &meta.lang, translations)
        }
    };

    Route {
        id: entry.id.clone(),
        slug: entry.slug.clone(),
        entry,
        entry_meta: meta.clone(),
        meta,
        is_fallback: false,
    }
}

/// Built-in not-found entry.
fn fallback_entry(
    config: &SiteConfig,
    lang: &str,
    translations: &dyn TranslationLookup,
) -> ContentEntry {
    let collection_path = config.collection_path();
    let file_path = if collection_path.is_empty() {
        format!("{NOT_FOUND_ID}.md")
    } else {
        format!("{collection_path}/{NOT_FOUND_ID}.md")
    };

    ContentEntry {
        id: NOT_FOUND_ID.to_owned(),
        slug: NOT_FOUND_ID.to_owned(),
        collection: DOCS_COLLECTION.to_owned(),
        data: EntryData {
            title: NOT_FOUND_ID.to_owned(),
            template: Template::Splash,
            edit_url: EditUrl::Disabled,
            table_of_contents: Some(TocSetting::Disabled),
            hero: Some(Hero {
                title: None,
                tagline: Some(translations.translate(lang, "404.text")),
                actions: Vec::new(),
            }),
            pagefind: false,
            ..Default::default()
        },
        body: String::new(),
        file_path,
    }
}
