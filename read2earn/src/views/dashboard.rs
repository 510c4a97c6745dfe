//! Signed-in home screen.
//!
//! The dashboard issues two independent reads for the identified user: the profile summary and the
//! latest articles. Each result lands in its own [`Slot`], so the outcome does not depend on which
//! read finishes first. The two failure paths differ on purpose:
//!
//! - a failed profile read (including a user with no profile row) adds one destructive
//!   [`Notification`] and leaves the counters at zero
//! - a failed article read is only logged; the screen shows the empty-list placeholder
//!
//! Until both slots are filled the screen is [`DashboardScreen::Loading`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, instrument, warn};
use utoipa::ToSchema;

use crate::{
    auth::session::Session,
    backend::Backend,
    db::{
        errors::Result as DbResult,
        models::{articles::Article, profiles::ProfileSummary},
    },
    points::{self, LATEST_ARTICLES_LIMIT, PlanType},
    types::{ArticleId, abbrev_uuid},
    views::navigation::{NavItem, bottom_navigation},
};

pub const DASHBOARD_PATH: &str = "/dashboard";

/// Result of one outstanding read.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Slot<T> {
    #[default]
    Pending,
    Ready(T),
}

impl<T> Slot<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Slot::Pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// A user-visible toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn profile_load_failed() -> Self {
        Self {
            title: "Error".to_string(),
            description: "Failed to load profile data".to_string(),
            variant: NotificationVariant::Destructive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ArticleCard {
    #[schema(value_type = String, format = "uuid")]
    pub id: ArticleId,
    pub title: String,
    pub summary: Option<String>,
    pub category: String,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    /// `/article/{id}`
    pub href: String,
    /// Static "+10 points"; the reward itself is granted by the backend
    pub reward_label: String,
}

impl From<Article> for ArticleCard {
    fn from(article: Article) -> Self {
        Self {
            href: format!("/article/{}", article.id),
            id: article.id,
            title: article.title,
            summary: article.summary,
            category: article.category,
            image_url: article.image_url,
            published_at: article.published_at,
            reward_label: points::reward_label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct QuickAction {
    pub label: String,
    pub description: String,
    pub href: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EmptyState {
    pub title: String,
    pub description: String,
}

/// Everything the ready dashboard displays.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardView {
    pub points: i32,
    /// Points ÷ 1000 with two decimals
    pub usdt_equivalent: String,
    pub articles_read_today: i32,
    pub daily_article_limit: i32,
    pub total_articles_read: i32,
    pub plan_type: PlanType,
    pub quick_actions: Vec<QuickAction>,
    pub articles: Vec<ArticleCard>,
    /// Present exactly when `articles` is empty
    pub empty_state: Option<EmptyState>,
    pub notifications: Vec<Notification>,
    pub navigation: Vec<NavItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardScreen {
    /// Spinner only
    Loading,
    Ready(DashboardView),
}

fn quick_actions() -> Vec<QuickAction> {
    vec![
        QuickAction {
            label: "Withdraw".to_string(),
            description: "Cash out earnings".to_string(),
            href: "/withdraw".to_string(),
            icon: "trending-up".to_string(),
        },
        QuickAction {
            label: "Upgrade".to_string(),
            description: "Premium plan".to_string(),
            href: "/profile".to_string(),
            icon: "award".to_string(),
        },
    ]
}

/// Dashboard state while its reads resolve.
#[derive(Debug, Clone, Default)]
pub struct DashboardModel {
    /// `Ready(None)` after a failed read; the counters then show their defaults
    profile: Slot<Option<ProfileSummary>>,
    articles: Slot<Vec<ArticleCard>>,
    notifications: Vec<Notification>,
}

impl DashboardModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.profile.is_pending() || self.articles.is_pending()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Fill the profile slot. Each failed attempt raises exactly one notification.
    pub fn apply_profile(&mut self, result: DbResult<ProfileSummary>) {
        match result {
            Ok(summary) => self.profile = Slot::Ready(Some(summary)),
            Err(e) => {
                warn!("Error fetching profile: {e:#}");
                metrics::counter!("read2earn_dashboard_fetch_failures_total", "slot" => "profile").increment(1);
                self.notifications.push(Notification::profile_load_failed());
                self.profile = Slot::Ready(None);
            }
        }
    }

    /// Fill the articles slot, newest first and capped. Failures are logged and read as empty.
    pub fn apply_articles(&mut self, result: DbResult<Vec<Article>>) {
        let mut articles = match result {
            Ok(articles) => articles,
            Err(e) => {
                error!("Error fetching articles: {e:#}");
                metrics::counter!("read2earn_dashboard_fetch_failures_total", "slot" => "articles").increment(1);
                Vec::new()
            }
        };
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        articles.truncate(LATEST_ARTICLES_LIMIT);
        self.articles = Slot::Ready(articles.into_iter().map(ArticleCard::from).collect());
    }

    pub fn render(&self) -> DashboardScreen {
        let (Slot::Ready(profile), Slot::Ready(articles)) = (&self.profile, &self.articles) else {
            return DashboardScreen::Loading;
        };

        let points = profile.as_ref().map_or(0, |p| p.points);
        let plan_type = profile.as_ref().map(|p| p.plan_type.as_str());
        let empty_state = articles.is_empty().then(|| EmptyState {
            title: "No articles available".to_string(),
            description: "Check back later for new articles to read and earn points.".to_string(),
        });

        DashboardScreen::Ready(DashboardView {
            points,
            usdt_equivalent: points::format_usdt(i64::from(points)),
            articles_read_today: profile.as_ref().map_or(0, |p| p.articles_read_today),
            daily_article_limit: points::daily_article_limit(plan_type),
            total_articles_read: profile.as_ref().map_or(0, |p| p.total_articles_read),
            plan_type: PlanType::parse(plan_type),
            quick_actions: quick_actions(),
            articles: articles.clone(),
            empty_state,
            notifications: self.notifications.clone(),
            navigation: bottom_navigation(DASHBOARD_PATH),
        })
    }
}

/// Run both dashboard reads concurrently for the session's user.
#[instrument(skip(backend, session), fields(user_id = %abbrev_uuid(&session.user_id)))]
pub async fn load_dashboard(backend: &dyn Backend, session: &Session) -> DashboardModel {
    let (profile, articles) = tokio::join!(
        backend.profile_summary(session.user_id),
        backend.latest_articles(LATEST_ARTICLES_LIMIT)
    );

    let mut model = DashboardModel::new();
    model.apply_profile(profile);
    model.apply_articles(articles);
    model
}
