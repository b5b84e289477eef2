//! Render HTML widgets for variable-length ("tabular") form input.
//!
//! A tabular input widget manages a repeating group of form inputs: one
//! row per data model, each row carrying a remove control and a hidden
//! index field, plus an add control which fetches new row markup from a
//! server endpoint.  This crate renders the widget's initial markup,
//! models the client add/remove protocol as an explicit state machine
//! ([`protocol::Session`]), and implements the server side of the
//! row-fetch contract ([`endpoint::RowEndpoint`]).
//!
//! The host application stays abstract: row interiors come from a
//! [`RowTemplate`] collaborator, and the page renderer in [`page`] takes
//! URL building and asset resolution as traits.
//!
//! # Examples
//!
//! ```rust
//! use tabular_input::{config, Result, RowTemplate, ViewData};
//!
//! struct Person { name: &'static str }
//!
//! struct PersonRow;
//! impl RowTemplate<Person> for PersonRow {
//!     fn render_row(&self, model: &Person, index: usize, _view: &ViewData) -> Result<String> {
//!         Ok(format!(
//!             "<input name=\"Person[{}][name]\" value=\"{}\" />",
//!             index, model.name
//!         ))
//!     }
//! }
//!
//! let people = vec![Person { name: "Ada" }, Person { name: "Brendan" }];
//! let html = config::unstyled()
//!     .id("people")
//!     .input_url("/person/row")
//!     .render_to_string(&people, &PersonRow)?;
//! assert!(html.starts_with("<div id=\"people\" class=\"tabular-container\">"));
//! # Ok::<(), tabular_input::Error>(())
//! ```
//!
//! A couple of demonstration programs are included under `demos/`:
//!
//! ```sh
//! $ cargo run --example person-form -- --table
//! $ cargo run --example session
//! ```

#![deny(missing_docs)]

#[macro_use]
mod macros;

pub mod endpoint;
pub mod markup;
pub mod page;
pub mod protocol;

use thiserror::Error;

pub use protocol::{AddedRow, FetchError, FetchRequest, Removal, RowFetcher, Session};

/// Auxiliary view data passed to row templates and forwarded to the
/// row-fetch endpoint as query parameters.  Order is preserved.
pub type ViewData = Vec<(String, String)>;

/// Errors produced while rendering widgets or driving a session.
#[derive(Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A row template could not render its interior markup.
    #[error("row template failed for index {index}: {reason}")]
    Template {
        /// Index of the row being rendered.
        index: usize,
        /// Template-supplied description of the failure.
        reason: String,
    },
    /// The row-fetch collaborator reported a failure.  Never swallowed:
    /// the session is left exactly as it was before the add.
    #[error("row fetch failed: {0}")]
    Fetch(#[from] FetchError),
    /// The fetched fragment would corrupt the widget markup if spliced
    /// into a row.
    #[error("bad row fragment: {0}")]
    Fragment(String),
    /// An add was attempted with the configured input limit already
    /// reached.
    #[error("input limit of {0} reached")]
    InputLimitReached(usize),
    /// A remove named an index with no live row.
    #[error("no row with index {0}")]
    UnknownRow(usize),
    /// A row request carried no `index` parameter.
    #[error("missing index parameter in row request")]
    MissingIndex,
    /// A row request carried an unparseable `index` parameter.
    #[error("invalid index parameter: {0:?}")]
    InvalidIndex(String),
}

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Renders the interior markup of one row.
///
/// The widget treats the model as opaque; everything it knows about the
/// row's contents comes from this trait.  Implementations must namespace
/// field names by `index` (for example `Person[3][name]`) so that form
/// submissions group correctly by row.
pub trait RowTemplate<M> {
    /// Render the interior markup for `model` at `index`.
    ///
    /// The returned fragment excludes the row tag, the remove control
    /// and the hidden index field; the widget appends those itself.
    fn render_row(&self, model: &M, index: usize, view_data: &ViewData) -> Result<String>;
}

impl<M, F> RowTemplate<M> for F
where
    F: Fn(&M, usize, &ViewData) -> Result<String>,
{
    fn render_row(&self, model: &M, index: usize, view_data: &ViewData) -> Result<String> {
        self(model, index, view_data)
    }
}

pub mod config {
    //! Configure widget rendering using the [`Config`] type, constructed
    //! with one of the functions in this module.

    use crate::markup::{self, Attrs};
    use crate::{Result, RowTemplate};

    /// Configuration for one tabular input widget.
    ///
    /// Every field has a documented default; construct with
    /// [`unstyled`] or [`table`] and override with the builder methods.
    pub struct Config {
        pub(crate) id: String,
        pub(crate) input_url: String,
        pub(crate) input_limit: Option<usize>,
        pub(crate) header: Option<String>,
        pub(crate) remove_confirmation: Option<String>,
        pub(crate) add_template: Option<String>,
        pub(crate) remove_template: Option<String>,
        pub(crate) add_label: String,
        pub(crate) remove_label: String,
        pub(crate) container_tag: String,
        pub(crate) input_container_tag: String,
        pub(crate) header_tag: String,
        pub(crate) input_tag: String,
        pub(crate) container_attrs: Attrs,
        pub(crate) input_container_attrs: Attrs,
        pub(crate) header_attrs: Attrs,
        pub(crate) input_attrs: Attrs,
        pub(crate) add_attrs: Attrs,
        pub(crate) remove_attrs: Attrs,
        pub(crate) container_class: String,
        pub(crate) input_container_class: String,
        pub(crate) input_class: String,
        pub(crate) index_class: String,
        pub(crate) header_class: String,
        pub(crate) remove_class: String,
        pub(crate) add_class: String,
        pub(crate) hide_on_single_class: String,
        pub(crate) view_data: crate::ViewData,
    }

    /// Return a `Config` with the default `div` layout.
    pub fn unstyled() -> Config {
        Config {
            id: "tabular-input".into(),
            input_url: "#".into(),
            input_limit: None,
            header: None,
            remove_confirmation: None,
            add_template: None,
            remove_template: None,
            add_label: "Add".into(),
            remove_label: "Remove".into(),
            container_tag: "div".into(),
            input_container_tag: "div".into(),
            header_tag: "div".into(),
            input_tag: "div".into(),
            container_attrs: Attrs::new(),
            input_container_attrs: Attrs::new(),
            header_attrs: Attrs::new(),
            input_attrs: Attrs::new(),
            add_attrs: Attrs::new(),
            remove_attrs: Attrs::new(),
            container_class: "tabular-container".into(),
            input_container_class: "tabular-input-container".into(),
            input_class: "tabular-input".into(),
            index_class: "tabular-input-index".into(),
            header_class: "tabular-header".into(),
            remove_class: "tabular-input-remove".into(),
            add_class: "tabular-input-add".into(),
            hide_on_single_class: "tabular-hide-on-single".into(),
            view_data: Vec::new(),
        }
    }

    /// Return a `Config` preset for a table layout: the container is a
    /// `table`, the header a `thead`, the input container a `tbody` and
    /// each row a `tr`.  Row templates are expected to emit `td` cells.
    pub fn table() -> Config {
        unstyled()
            .container_tag("table")
            .header_tag("thead")
            .input_container_tag("tbody")
            .input_tag("tr")
    }

    impl Config {
        /// Set the widget id (also the container element's `id` unless
        /// the container attributes carry their own).
        pub fn id(mut self, id: &str) -> Config {
            self.id = id.into();
            self
        }

        /// Set the row-fetch endpoint URL used by the add control.
        pub fn input_url(mut self, url: &str) -> Config {
            self.input_url = url.into();
            self
        }

        /// Bound the number of concurrent rows.  Unbounded by default.
        pub fn input_limit(mut self, limit: usize) -> Config {
            self.input_limit = Some(limit);
            self
        }

        /// Set header markup, rendered before the input container and
        /// hidden while the widget has no rows.
        pub fn header(mut self, header: &str) -> Config {
            self.header = Some(header.into());
            self
        }

        /// Require interactive confirmation before a row is removed.
        pub fn remove_confirmation(mut self, message: &str) -> Config {
            self.remove_confirmation = Some(message.into());
            self
        }

        /// Wrap the add control in a template containing one `{link}`
        /// token.
        pub fn add_template(mut self, template: &str) -> Config {
            self.add_template = Some(template.into());
            self
        }

        /// Wrap each remove control in a template containing one
        /// `{link}` token.
        pub fn remove_template(mut self, template: &str) -> Config {
            self.remove_template = Some(template.into());
            self
        }

        /// Set the add control's label.  Emitted verbatim, so markup is
        /// allowed.
        pub fn add_label(mut self, label: &str) -> Config {
            self.add_label = label.into();
            self
        }

        /// Set the remove controls' label.  Emitted verbatim.
        pub fn remove_label(mut self, label: &str) -> Config {
            self.remove_label = label.into();
            self
        }

        /// Set the container tag name (default `div`).
        pub fn container_tag(mut self, tag: &str) -> Config {
            self.container_tag = tag.into();
            self
        }

        /// Set the input container tag name (default `div`).
        pub fn input_container_tag(mut self, tag: &str) -> Config {
            self.input_container_tag = tag.into();
            self
        }

        /// Set the header tag name (default `div`).
        pub fn header_tag(mut self, tag: &str) -> Config {
            self.header_tag = tag.into();
            self
        }

        /// Set the row tag name (default `div`).
        pub fn input_tag(mut self, tag: &str) -> Config {
            self.input_tag = tag.into();
            self
        }

        /// Add an attribute to the container element.
        pub fn container_attr(mut self, name: &str, value: &str) -> Config {
            self.container_attrs.set(name, value);
            self
        }

        /// Add an attribute to the input container element.
        pub fn input_container_attr(mut self, name: &str, value: &str) -> Config {
            self.input_container_attrs.set(name, value);
            self
        }

        /// Add an attribute to the header element.
        pub fn header_attr(mut self, name: &str, value: &str) -> Config {
            self.header_attrs.set(name, value);
            self
        }

        /// Add an attribute to each row element.
        pub fn input_attr(mut self, name: &str, value: &str) -> Config {
            self.input_attrs.set(name, value);
            self
        }

        /// Add an attribute to the add control.
        pub fn add_attr(mut self, name: &str, value: &str) -> Config {
            self.add_attrs.set(name, value);
            self
        }

        /// Add an attribute to each remove control.
        pub fn remove_attr(mut self, name: &str, value: &str) -> Config {
            self.remove_attrs.set(name, value);
            self
        }

        /// Override the container CSS class.
        pub fn container_class(mut self, class: &str) -> Config {
            self.container_class = class.into();
            self
        }

        /// Override the input container CSS class.
        pub fn input_container_class(mut self, class: &str) -> Config {
            self.input_container_class = class.into();
            self
        }

        /// Override the row CSS class.
        pub fn input_class(mut self, class: &str) -> Config {
            self.input_class = class.into();
            self
        }

        /// Override the hidden index field's CSS class.
        pub fn index_class(mut self, class: &str) -> Config {
            self.index_class = class.into();
            self
        }

        /// Override the header CSS class.
        pub fn header_class(mut self, class: &str) -> Config {
            self.header_class = class.into();
            self
        }

        /// Override the remove control CSS class.
        pub fn remove_class(mut self, class: &str) -> Config {
            self.remove_class = class.into();
            self
        }

        /// Override the add control CSS class.
        pub fn add_class(mut self, class: &str) -> Config {
            self.add_class = class.into();
            self
        }

        /// Override the hide-on-single CSS class.
        pub fn hide_on_single_class(mut self, class: &str) -> Config {
            self.hide_on_single_class = class.into();
            self
        }

        /// Append a view-data pair, passed to row templates and
        /// forwarded to the row-fetch endpoint as a query parameter.
        pub fn view_data(mut self, key: &str, value: &str) -> Config {
            self.view_data.push((key.into(), value.into()));
            self
        }

        /// The effective widget id: a caller-supplied container `id`
        /// attribute wins over the configured id.
        pub fn widget_id(&self) -> &str {
            self.container_attrs.get("id").unwrap_or(&self.id)
        }

        /// The configured hide-on-single CSS class.
        ///
        /// The widget never stamps this class itself; templates and
        /// control markup put it on elements that should only show
        /// while more than one row exists (see
        /// [`Session::hide_on_single_visible`](crate::Session::hide_on_single_visible)).
        pub fn hide_on_single_css_class(&self) -> &str {
            &self.hide_on_single_class
        }

        /// Render the widget's initial markup for `models`.
        ///
        /// Rows get indices `0..models.len()` in order; rows beyond the
        /// configured input limit are never rendered.  The add control
        /// is emitted hidden when the limit is already reached, and the
        /// header (if any) is emitted hidden when no rows render.
        pub fn render_to_string<M, T>(&self, models: &[M], template: &T) -> Result<String>
        where
            T: RowTemplate<M>,
        {
            let rendered = match self.input_limit {
                Some(limit) => models.len().min(limit),
                None => models.len(),
            };

            let mut cattrs = self.container_attrs.clone();
            if cattrs.get("id").is_none() {
                cattrs.set("id", &self.id);
            }
            cattrs.append_class(&self.container_class);

            let mut out = markup::open_tag(&self.container_tag, &cattrs);

            if let Some(header) = &self.header {
                let mut hattrs = self.header_attrs.clone();
                hattrs.append_class(&self.header_class);
                if rendered == 0 {
                    hattrs.set("style", "display:none");
                }
                out.push_str(&markup::tag(&self.header_tag, &hattrs, header));
            }

            let mut icattrs = self.input_container_attrs.clone();
            icattrs.append_class(&self.input_container_class);
            out.push_str(&markup::open_tag(&self.input_container_tag, &icattrs));
            for (index, model) in models.iter().take(rendered).enumerate() {
                let interior = template.render_row(model, index, &self.view_data)?;
                out.push_str(&self.compose_row(index, &interior));
            }
            out.push_str(&markup::close_tag(&self.input_container_tag));

            out.push_str(&self.add_control(rendered));
            out.push_str(&markup::close_tag(&self.container_tag));

            widget_trace!(
                "rendered widget {} with {} of {} rows",
                self.widget_id(),
                rendered,
                models.len()
            );
            Ok(out)
        }

        /// Wrap an interior fragment into a complete row: row tag,
        /// interior, remove control, hidden index field.
        pub(crate) fn compose_row(&self, index: usize, interior: &str) -> String {
            let mut iattrs = self.input_attrs.clone();
            iattrs.append_class(&self.input_class);
            let mut out = markup::open_tag(&self.input_tag, &iattrs);
            out.push_str(interior);
            out.push_str(&self.remove_control(index));
            out.push_str(&markup::close_tag(&self.input_tag));
            out
        }

        /// The remove control plus the hidden index field, wrapped in
        /// the remove template.
        pub(crate) fn remove_control(&self, index: usize) -> String {
            let mut rattrs = self.remove_attrs.clone();
            rattrs.append_class(&self.remove_class);
            let mut link = markup::link(&self.remove_label, "#", &rattrs);
            link.push_str(&markup::hidden_input(&self.index_class, &index.to_string()));
            markup::apply_link_template(self.remove_template.as_deref(), &link)
        }

        /// The add control, wrapped in the add template.  Hidden inline
        /// when `row_count` has reached the input limit.
        fn add_control(&self, row_count: usize) -> String {
            let mut aattrs = self.add_attrs.clone();
            aattrs.append_class(&self.add_class);
            if let Some(limit) = self.input_limit {
                if row_count >= limit {
                    aattrs.set("style", "display:none");
                }
            }
            let link = markup::link(&self.add_label, &self.input_url, &aattrs);
            markup::apply_link_template(self.add_template.as_deref(), &link)
        }
    }
}

pub use config::Config;
