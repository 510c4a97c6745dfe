//! Server-rendered HTML for the views.
//!
//! Templates are compiled into the binary and loaded once at startup. Autoescaping is on for every
//! template because they all end in `.html`, so attribute values come out entity-encoded.

use minijinja::{Environment, context};

use crate::errors::{Error, Result};
use crate::views::{
    dashboard::{DASHBOARD_PATH, DashboardScreen},
    landing::LandingScreen,
    navigation::bottom_navigation,
};

const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("templates/base.html")),
    ("loading.html", include_str!("templates/loading.html")),
    ("landing.html", include_str!("templates/landing.html")),
    ("dashboard.html", include_str!("templates/dashboard.html")),
];

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> std::result::Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map_err(|e| Error::Internal {
                operation: format!("render {name}: {e:#}"),
            })
    }

    /// Landing page. A redirect screen has no HTML; callers redirect before rendering.
    pub fn landing(&self, screen: &LandingScreen) -> Result<String> {
        match screen {
            LandingScreen::Loading => self.render("loading.html", context! {}),
            LandingScreen::Content(content) => self.render("landing.html", context! { content }),
            LandingScreen::Redirect { to } => Err(Error::Internal {
                operation: format!("render landing page that redirects to {to}"),
            }),
        }
    }

    /// Dashboard page, with the bottom navigation highlighted on Home.
    pub fn dashboard(&self, screen: &DashboardScreen) -> Result<String> {
        let navigation = bottom_navigation(DASHBOARD_PATH);
        match screen {
            DashboardScreen::Loading => self.render("loading.html", context! { navigation }),
            DashboardScreen::Ready(view) => self.render("dashboard.html", context! { view, navigation }),
        }
    }
}
