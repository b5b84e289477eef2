//! The client-side add/remove protocol, modelled as explicit state.
//!
//! In the browser the widget's row count lives implicitly in the DOM;
//! here a [`Session`] owns the ordered list of live row indices and
//! derives every visibility rule from it.  Index assignment reads that
//! state and registers the new row in the same step, so two adds can
//! never race for the same index.
//!
//! The network side stays a collaborator: [`RowFetcher`] models the
//! asynchronous GET against the row-fetch endpoint as a blocking call,
//! matching the single-threaded, event-driven execution of a browsing
//! context.  Fetch failures are surfaced as
//! [`Error::Fetch`](crate::Error::Fetch), never swallowed.

mod fragment;

use crate::config::Config;
use crate::{Error, Result};

/// A failure reported by a [`RowFetcher`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The endpoint answered with a non-success HTTP status.
    #[error("endpoint returned HTTP status {0}")]
    Status(u16),
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),
}

/// One row-fetch request, ready to be issued as a GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// The configured row-fetch endpoint URL.
    pub url: String,
    /// The index assigned to the new row.
    pub index: usize,
    /// Query parameters: the configured view data plus `index`.
    pub params: Vec<(String, String)>,
}

impl FetchRequest {
    /// Render the query parameters as a percent-encoded query string.
    pub fn query_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.params {
            if !out.is_empty() {
                out.push('&');
            }
            out.push_str(&urlencoding::encode(key));
            out.push('=');
            out.push_str(&urlencoding::encode(value));
        }
        out
    }
}

/// Fetches new row markup from the row-fetch endpoint.
///
/// The response must be the row's interior markup only; the session
/// wraps it in a row tag and appends the remove control and hidden
/// index field itself.  Implementations issue a GET for
/// `request.url` with [`FetchRequest::query_string`] and must bypass
/// any response cache; every row is rendered fresh for its index.
pub trait RowFetcher {
    /// Issue the request and return the fragment body.
    fn fetch(&mut self, request: &FetchRequest) -> std::result::Result<String, FetchError>;
}

impl<F> RowFetcher for F
where
    F: FnMut(&FetchRequest) -> std::result::Result<String, FetchError>,
{
    fn fetch(&mut self, request: &FetchRequest) -> std::result::Result<String, FetchError> {
        self(request)
    }
}

/// A row added by [`Session::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedRow {
    /// The index assigned to the row.
    pub index: usize,
    /// The composed row markup, ready to append to the input container.
    pub html: String,
}

/// Outcome of [`Session::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The row was removed.
    Removed,
    /// The confirmation prompt declined; nothing changed.
    Declined,
}

/// A live widget session: the explicit counterpart of the in-browser
/// add/remove script.
///
/// Visibility accessors are derived from the session state, so they are
/// consistent after every operation without any toggling step.
pub struct Session<'a, F: RowFetcher> {
    config: &'a Config,
    fetcher: F,
    indices: Vec<usize>,
    confirm: Option<Box<dyn FnMut(&str) -> bool + 'a>>,
    after_add: Option<Box<dyn FnMut(&AddedRow) + 'a>>,
    after_remove: Option<Box<dyn FnMut(usize) + 'a>>,
}

impl<'a, F: RowFetcher> Session<'a, F> {
    /// Start a session with no rows.
    pub fn new(config: &'a Config, fetcher: F) -> Session<'a, F> {
        Session {
            config,
            fetcher,
            indices: Vec::new(),
            confirm: None,
            after_add: None,
            after_remove: None,
        }
    }

    /// Start a session reflecting an initial render of `model_count`
    /// models: indices `0..model_count`, truncated to the input limit.
    pub fn seeded(config: &'a Config, fetcher: F, model_count: usize) -> Session<'a, F> {
        let count = match config.input_limit {
            Some(limit) => model_count.min(limit),
            None => model_count,
        };
        let mut session = Session::new(config, fetcher);
        session.indices = (0..count).collect();
        session
    }

    /// Install the confirmation prompt consulted when the config has a
    /// remove-confirmation message.  Without a prompt, removal proceeds
    /// as if confirmed.
    pub fn confirm_with(mut self, prompt: impl FnMut(&str) -> bool + 'a) -> Session<'a, F> {
        self.confirm = Some(Box::new(prompt));
        self
    }

    /// Install a callback invoked after each successful add.
    pub fn on_add(mut self, callback: impl FnMut(&AddedRow) + 'a) -> Session<'a, F> {
        self.after_add = Some(Box::new(callback));
        self
    }

    /// Install a callback invoked after each successful remove, with
    /// the removed row's index.
    pub fn on_remove(mut self, callback: impl FnMut(usize) + 'a) -> Session<'a, F> {
        self.after_remove = Some(Box::new(callback));
        self
    }

    /// The number of live rows.
    pub fn row_count(&self) -> usize {
        self.indices.len()
    }

    /// The live row indices, in row order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// True when the add control should be shown: no input limit, or
    /// fewer rows than the limit.
    pub fn add_control_visible(&self) -> bool {
        match self.config.input_limit {
            Some(limit) => self.indices.len() < limit,
            None => true,
        }
    }

    /// True when hide-on-single elements should be shown: more than one
    /// row.
    pub fn hide_on_single_visible(&self) -> bool {
        self.indices.len() > 1
    }

    /// True when the header should be shown: at least one row.
    pub fn header_visible(&self) -> bool {
        !self.indices.is_empty()
    }

    /// The index the next add will assign: `0` with no live rows,
    /// otherwise one past the highest live index.  Gaps left by removed
    /// rows are never refilled.
    pub fn next_index(&self) -> usize {
        match self.indices.iter().max() {
            Some(&max) => max + 1,
            None => 0,
        }
    }

    /// Add a row.
    ///
    /// Computes the next index, fetches the row interior from the
    /// endpoint, validates it, composes the full row markup and
    /// registers the index.  Nothing is recorded until the fragment has
    /// been accepted, so a failed add leaves the session untouched.
    pub fn add(&mut self) -> Result<AddedRow> {
        if let Some(limit) = self.config.input_limit {
            if self.indices.len() >= limit {
                return Err(Error::InputLimitReached(limit));
            }
        }
        let index = self.next_index();

        let mut params = self.config.view_data.clone();
        params.push(("index".into(), index.to_string()));
        let request = FetchRequest {
            url: self.config.input_url.clone(),
            index,
            params,
        };
        widget_trace!("fetching row {} from {}", index, request.url);

        let interior = self.fetcher.fetch(&request)?;
        fragment::check(&interior).map_err(Error::Fragment)?;

        let row = AddedRow {
            index,
            html: self.config.compose_row(index, &interior),
        };
        self.indices.push(index);
        widget_trace_quiet!("row {} added, count now {}", index, self.indices.len());

        if let Some(callback) = &mut self.after_add {
            callback(&row);
        }
        Ok(row)
    }

    /// Remove the row with `index`.
    ///
    /// When a remove-confirmation message is configured the installed
    /// prompt is consulted first; a declined prompt aborts with no side
    /// effects.
    pub fn remove(&mut self, index: usize) -> Result<Removal> {
        let position = self
            .indices
            .iter()
            .position(|&i| i == index)
            .ok_or(Error::UnknownRow(index))?;

        if let Some(message) = &self.config.remove_confirmation {
            if let Some(confirm) = &mut self.confirm {
                if !confirm(message) {
                    return Ok(Removal::Declined);
                }
            }
        }

        self.indices.remove(position);
        widget_trace_quiet!("row {} removed, count now {}", index, self.indices.len());

        if let Some(callback) = &mut self.after_remove {
            callback(index);
        }
        Ok(Removal::Removed)
    }
}
