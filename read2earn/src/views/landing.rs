//! Landing page for signed-out visitors.
//!
//! The page has no data dependencies. Resolving it only needs to know whether the auth check has
//! finished and whether it found a session.

use serde::Serialize;
use utoipa::ToSchema;

use crate::{auth::session::Session, views::dashboard::DASHBOARD_PATH};

pub const AUTH_PATH: &str = "/auth";

/// Outcome of the auth check the landing page waits on.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Loading,
    SignedIn(Session),
    SignedOut,
}

impl From<Option<Session>> for AuthState {
    fn from(session: Option<Session>) -> Self {
        match session {
            Some(session) => AuthState::SignedIn(session),
            None => AuthState::SignedOut,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LandingScreen {
    /// Spinner only
    Loading,
    /// Signed-in visitors go straight to their dashboard
    Redirect { to: String },
    Content(LandingContent),
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CallToAction {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Hero {
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub cta: CallToAction,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Feature {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ClosingSection {
    pub title: String,
    pub description: String,
    pub cta: CallToAction,
    pub sign_in: CallToAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LandingContent {
    pub hero: Hero,
    pub stats: Vec<Stat>,
    pub features_title: String,
    pub features: Vec<Feature>,
    pub closing: ClosingSection,
}

fn to_auth(label: &str) -> CallToAction {
    CallToAction {
        label: label.to_string(),
        href: AUTH_PATH.to_string(),
    }
}

impl LandingContent {
    pub fn new() -> Self {
        let stats = [("10+", "Points per article"), ("$5", "Minimum withdrawal"), ("50", "Daily articles")]
            .into_iter()
            .map(|(value, label)| Stat {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect();

        let features = [
            ("coins", "Earn Points", "Get 10 points for every article you read"),
            ("trending-up", "Convert to USDT", "1000 points = 1 USDT"),
            ("book-open", "Quality News", "Read latest news from trusted sources"),
            ("shield", "Secure Payments", "Safe and reliable withdrawal system"),
            ("users", "Referral Bonus", "Earn extra by referring friends"),
            ("globe", "Global Content", "News from around the world"),
        ]
        .into_iter()
        .map(|(icon, title, description)| Feature {
            icon: icon.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        })
        .collect();

        Self {
            hero: Hero {
                title: "Read2Earn".to_string(),
                tagline: "Turn Your Reading Into Earnings".to_string(),
                description: "Join thousands of users earning money by reading news and staying informed".to_string(),
                cta: to_auth("Start Earning Now"),
                note: "Free to join • No credit card required".to_string(),
            },
            stats,
            features_title: "How It Works".to_string(),
            features,
            closing: ClosingSection {
                title: "Ready to Start Earning?".to_string(),
                description: "Join our community and start earning money by reading news today".to_string(),
                cta: to_auth("Create Free Account"),
                sign_in: to_auth("Sign in here"),
            },
        }
    }

    /// Every call to action on the page, in display order.
    pub fn calls_to_action(&self) -> [&CallToAction; 3] {
        [&self.hero.cta, &self.closing.cta, &self.closing.sign_in]
    }
}

impl Default for LandingContent {
    fn default() -> Self {
        Self::new()
    }
}

/// What the landing route shows for a given auth state.
pub fn resolve_landing(auth: &AuthState) -> LandingScreen {
    match auth {
        AuthState::Loading => LandingScreen::Loading,
        AuthState::SignedIn(_) => LandingScreen::Redirect {
            to: DASHBOARD_PATH.to_string(),
        },
        AuthState::SignedOut => LandingScreen::Content(LandingContent::new()),
    }
}
