//! Server side of the row-fetch contract.
//!
//! The add control issues a GET whose query string carries the widget's
//! view data plus the `index` assigned to the new row.  A
//! [`RowEndpoint`] answers it: it builds a fresh (default) model and
//! renders the row's interior markup through the same [`RowTemplate`]
//! used for the initial render.  The response excludes the row tag,
//! remove control and index field, which the client composes itself.

use std::marker::PhantomData;

use crate::{Error, Result, RowTemplate, ViewData};

/// Handles row-fetch requests for one widget.
///
/// The endpoint is stateless: it cannot know how many rows a client
/// currently holds, so the input limit stays a session concern.  Row
/// indices grow past the limit over a session's lifetime (removals
/// leave gaps), which is why no index bound is checked here.
pub struct RowEndpoint<M, T> {
    template: T,
    _model: PhantomData<fn() -> M>,
}

impl<M: Default, T: RowTemplate<M>> RowEndpoint<M, T> {
    /// Create an endpoint rendering rows with `template`.
    pub fn new(template: T) -> RowEndpoint<M, T> {
        RowEndpoint {
            template,
            _model: PhantomData,
        }
    }

    /// Handle a decoded query, returning the row's interior markup.
    ///
    /// The query must carry an integer `index`; every other pair is
    /// passed through to the template as view data.
    pub fn handle(&self, query: &ViewData) -> Result<String> {
        let raw_index = query
            .iter()
            .find(|(key, _)| key == "index")
            .map(|(_, value)| value.as_str())
            .ok_or(Error::MissingIndex)?;
        let index: usize = raw_index
            .parse()
            .map_err(|_| Error::InvalidIndex(raw_index.to_string()))?;

        let view_data: ViewData = query
            .iter()
            .filter(|(key, _)| key != "index")
            .cloned()
            .collect();

        widget_trace!("rendering endpoint row {}", index);
        self.template.render_row(&M::default(), index, &view_data)
    }

    /// Handle a raw (still percent-encoded) query string.
    pub fn handle_raw(&self, query: &str) -> Result<String> {
        self.handle(&parse_query(query))
    }
}

/// Decode a query string into ordered key/value pairs.
///
/// Pairs without `=` decode to an empty value.  Percent sequences that
/// are not valid UTF-8 are kept verbatim rather than rejected.
pub fn parse_query(raw: &str) -> ViewData {
    raw.split('&')
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            let (key, value) = match piece.split_once('=') {
                Some((key, value)) => (key, value),
                None => (piece, ""),
            };
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(text: &str) -> String {
    match urlencoding::decode(text) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => text.to_string(),
    }
}
