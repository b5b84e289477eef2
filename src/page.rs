//! Rendering for page-menu article views.
//!
//! A menu is a titled, ordered collection of CMS articles.  The
//! renderer produces the page body plus the out-of-band pieces the host
//! layout needs (title, breadcrumbs, stylesheet), and takes URL routing
//! and asset resolution as collaborator traits so no framework is baked
//! in.  Article and menu content is CMS-authored HTML and is emitted
//! verbatim; titles are escaped.

use crate::markup::{self, push_escaped, Attrs};

/// One article within a menu.
#[derive(Debug, Clone)]
pub struct Article {
    /// Stable id, used for routing and anchors.
    pub id: u64,
    /// Article title (plain text).
    pub title: String,
    /// Article body (CMS HTML).
    pub content: String,
}

/// A page menu: a title, optional side content and its articles.
#[derive(Debug, Clone)]
pub struct Menu {
    /// Stable id, used for routing.
    pub id: u64,
    /// Menu title (plain text).
    pub title: String,
    /// Optional side content (CMS HTML).
    pub content: Option<String>,
    /// Articles, in display order.
    pub articles: Vec<Article>,
}

impl Menu {
    /// The number of articles under this menu.
    pub fn article_count(&self) -> usize {
        self.articles.len()
    }
}

/// Builds application URLs from routes and parameters.
pub trait UrlBuilder {
    /// Build the URL for `route` with `params`.
    fn build(&self, route: &str, params: &[(&str, String)]) -> String;
}

/// Resolves a published asset path to a URL.
pub trait AssetPublisher {
    /// Resolve `path` (for example `/images/update.png`).
    fn resolve(&self, path: &str) -> String;
}

/// Stylesheet policy for rendered pages.
#[derive(Debug, Clone, Default)]
pub enum PageCss {
    /// Resolve the module's own `/css/page.css` through the asset
    /// publisher.
    #[default]
    Default,
    /// Use this URL verbatim.
    Custom(String),
    /// No stylesheet.
    None,
}

/// Everything a page render needs from the host application.
pub struct PageContext<U, A> {
    /// Application name, used in the page title.
    pub app_name: String,
    /// URL building collaborator.
    pub urls: U,
    /// Asset resolution collaborator.
    pub assets: A,
    /// Whether the current user gets the admin action links.
    pub admin: bool,
    /// Stylesheet policy.
    pub css: PageCss,
}

/// A rendered page and the out-of-band pieces the layout consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Window/page title.
    pub title: String,
    /// Breadcrumb trail.
    pub breadcrumbs: Vec<String>,
    /// Stylesheet URL, if any.
    pub stylesheet: Option<String>,
    /// The page body fragment.
    pub body: String,
}

/// Render the article view for `menu`.
pub fn render_menu<U, A>(menu: &Menu, ctx: &PageContext<U, A>) -> RenderedPage
where
    U: UrlBuilder,
    A: AssetPublisher,
{
    let stylesheet = match &ctx.css {
        PageCss::Default => Some(ctx.assets.resolve("/css/page.css")),
        PageCss::Custom(url) => Some(url.clone()),
        PageCss::None => None,
    };

    let many = menu.article_count() > 1;
    let mut body = String::from("<div class=\"page-wrapper\">\n");

    body.push_str("<h1 class=\"page-article-title\">");
    push_escaped(&mut body, &menu.title);
    if ctx.admin {
        let update = ctx.urls.build("menu/update", &[("id", menu.id.to_string())]);
        body.push_str(&image_link(ctx, &update, "/images/update.png", "Update Menu"));
        let admin = ctx
            .urls
            .build("article/admin", &[("menuId", menu.id.to_string())]);
        body.push_str(&image_link(ctx, &admin, "/images/admin.png", "Manage Articles"));
        let create = ctx
            .urls
            .build("article/create", &[("menuId", menu.id.to_string())]);
        body.push_str(&image_link(ctx, &create, "/images/new.png", "New Article"));
    }
    body.push_str("</h1>\n");

    if let Some(content) = &menu.content {
        body.push_str("<div class=\"page-article-side-content\">");
        body.push_str(content);
        body.push_str("</div>\n");
    }

    if many {
        body.push_str("<div class=\"page-article-sub-nav\">\n<ol>\n");
        for article in &menu.articles {
            body.push_str("<li>");
            body.push_str(&markup::link(
                &markup::escape(&article.title),
                &format!("#article{}", article.id),
                &Attrs::new(),
            ));
            body.push_str("</li>\n");
        }
        body.push_str("</ol>\n</div>\n");
    }

    for article in &menu.articles {
        body.push_str("<h2 class=\"page-article-subtitle\">");
        if many {
            let anchor = Attrs::new().with("id", &format!("article{}", article.id));
            body.push_str(&markup::tag("span", &anchor, &markup::escape(&article.title)));
        }
        if ctx.admin {
            let mut update = ctx
                .urls
                .build("article/update", &[("id", article.id.to_string())]);
            update.push_str(&format!("#article{}", article.id));
            body.push_str(&image_link(ctx, &update, "/images/update.png", "Update Article"));
        }
        body.push_str("</h2>\n");
        body.push_str("<div class=\"page-article-body\">\n");
        body.push_str(&article.content);
        body.push_str("\n<div class=\"separator\"></div>\n</div>\n");
    }

    body.push_str("</div>");

    RenderedPage {
        title: format!("{} - {}", ctx.app_name, menu.title),
        breadcrumbs: vec![menu.title.clone()],
        stylesheet,
        body,
    }
}

/// An icon link: the admin action pattern of image wrapped in anchor.
fn image_link<U, A>(ctx: &PageContext<U, A>, href: &str, asset: &str, label: &str) -> String
where
    A: AssetPublisher,
{
    let mut img = String::from("<img src=\"");
    push_escaped(&mut img, &ctx.assets.resolve(asset));
    img.push_str("\" alt=\"");
    push_escaped(&mut img, label);
    img.push_str("\" />");
    markup::link(&img, href, &Attrs::new())
}
