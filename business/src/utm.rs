//! Campaign link composition.
//!
//! The user types a page URL and a source label; [`ComposedUrl`] keeps the page URL
//! with `utm_source` set to that label, or nothing while the page URL does not parse.

use std::any::{Any, TypeId};

use log::debug;
use source_states::{
    Compute, ComputeDeps, Dep, State, Updater, assign_impl, state_assign_impl,
};
use thiserror::Error;
use url::Url;

/// Query parameter carrying the source label.
pub const UTM_SOURCE_PARAM: &str = "utm_source";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error("page URL is empty")]
    Empty,
    #[error("page URL is not an absolute URL: {0}")]
    Parse(#[from] url::ParseError),
}

/// Parses `page_url` and sets `utm_source` to `source`.
///
/// The first existing `utm_source` keeps its position and gets the new value, later
/// duplicates are dropped; without one the parameter is appended. Every other query
/// pair is kept in order. An empty `source` is a valid value.
pub fn try_compose_utm_url(page_url: &str, source: &str) -> Result<Url, ComposeError> {
    if page_url.is_empty() {
        return Err(ComposeError::Empty);
    }

    let mut url = Url::parse(page_url)?;

    let mut replaced = false;
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter_map(|(key, value)| {
            if key != UTM_SOURCE_PARAM {
                return Some((key.into_owned(), value.into_owned()));
            }
            if replaced {
                return None;
            }
            replaced = true;
            Some((key.into_owned(), source.to_owned()))
        })
        .collect();
    if !replaced {
        pairs.push((UTM_SOURCE_PARAM.to_owned(), source.to_owned()));
    }

    url.query_pairs_mut().clear().extend_pairs(pairs);

    Ok(url)
}

/// [`try_compose_utm_url`] serialized, `None` when the page URL does not parse.
pub fn compose_utm_url(page_url: &str, source: &str) -> Option<String> {
    match try_compose_utm_url(page_url, source) {
        Ok(url) => Some(url.into()),
        Err(err) => {
            debug!("No campaign link for {page_url:?}: {err}");
            None
        }
    }
}

/// Raw text of the two form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtmInput {
    pub page_url: String,
    pub source: String,
}

impl State for UtmInput {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

/// The campaign link derived from [`UtmInput`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposedUrl {
    url: Option<String>,
}

impl ComposedUrl {
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl Compute for ComposedUrl {
    fn deps(&self) -> ComputeDeps {
        const STATE_IDS: [TypeId; 1] = [TypeId::of::<UtmInput>()];
        (&STATE_IDS, &[])
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        let input = deps.get_state_ref::<UtmInput>();
        let url = compose_utm_url(&input.page_url, &input.source);

        if url != self.url {
            debug!("Campaign link changed to {url:?}");
            updater.set(ComposedUrl { url });
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) -> bool {
        assign_impl(self, new_self)
    }
}
