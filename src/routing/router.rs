//! Request classification.
//!
//! # Responsibilities
//! - Recognise the distinguished verb on the health-check path
//! - Map known resource paths to their routes
//! - Return an explicit `NotFound` or `MethodNotAllowed` otherwise
//!
//! # Design Decisions
//! - Immutable after construction, no locks
//! - Escalator check runs first, before any resource route
//! - Deterministic: same (method, path) always yields the same route

use axum::http::Method;

use crate::config::RoutingConfig;
use crate::routing::matcher::{AndMatcher, ExactPathMatcher, Matcher, MethodMatcher, PathPrefixMatcher};

pub const ARTICLES_PATH: &str = "/api/articles";
pub const ARTICLE_PATH: &str = "/api/article";
pub const ARTICLE_ITEM_PREFIX: &str = "/api/article/";
pub const USER_PATH: &str = "/api/user";
pub const USERS_PATH: &str = "/api/users";

/// Where a request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Escalator,
    HealthCheck,
    ListArticles,
    CreateArticle,
    /// Raw id segment; parsing is the handler's job.
    DeleteArticle { id: String },
    CreateUser,
    ListUsers,
    MethodNotAllowed,
    NotFound,
}

impl Route {
    /// Short name for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Escalator => "escalator",
            Route::HealthCheck => "health_check",
            Route::ListArticles => "list_articles",
            Route::CreateArticle => "create_article",
            Route::DeleteArticle { .. } => "delete_article",
            Route::CreateUser => "create_user",
            Route::ListUsers => "list_users",
            Route::MethodNotAllowed => "method_not_allowed",
            Route::NotFound => "not_found",
        }
    }
}

/// Maps (method, path) to a [`Route`].
#[derive(Debug)]
pub struct Dispatcher {
    escalator: AndMatcher,
    health_check_path: String,
    article_delete: AndMatcher,
    article_item: PathPrefixMatcher,
}

/// Error for a verb that is not a valid method token.
#[derive(Debug, thiserror::Error)]
#[error("invalid escalator verb: {0}")]
pub struct InvalidVerb(pub String);

impl Dispatcher {
    /// Build from routing config. Fails if the verb is not a method token.
    pub fn from_config(config: &RoutingConfig) -> Result<Self, InvalidVerb> {
        let verb = Method::from_bytes(config.escalator_verb.as_bytes())
            .map_err(|_| InvalidVerb(config.escalator_verb.clone()))?;

        Ok(Self {
            escalator: AndMatcher::new(vec![
                Box::new(MethodMatcher::new(verb)),
                Box::new(ExactPathMatcher::new(config.health_check_path.clone())),
            ]),
            health_check_path: config.health_check_path.clone(),
            article_delete: AndMatcher::new(vec![
                Box::new(MethodMatcher::new(Method::DELETE)),
                Box::new(PathPrefixMatcher::new(ARTICLE_ITEM_PREFIX)),
            ]),
            article_item: PathPrefixMatcher::new(ARTICLE_ITEM_PREFIX),
        })
    }

    /// Classify a request. The escalator check runs before the path table.
    pub fn classify(&self, method: &Method, path: &str) -> Route {
        if self.escalator.matches(method, path) {
            return Route::Escalator;
        }

        match path {
            ARTICLES_PATH => only(method, Method::GET, Route::ListArticles),
            ARTICLE_PATH => only(method, Method::POST, Route::CreateArticle),
            USER_PATH => only(method, Method::POST, Route::CreateUser),
            USERS_PATH => only(method, Method::GET, Route::ListUsers),
            p if p == self.health_check_path => only(method, Method::GET, Route::HealthCheck),
            _ if self.article_delete.matches(method, path) => {
                match self.article_item.strip(path) {
                    Some(id) if !id.is_empty() => Route::DeleteArticle { id: id.to_string() },
                    _ => Route::NotFound,
                }
            }
            _ => Route::NotFound,
        }
    }
}

fn only(method: &Method, allowed: Method, route: Route) -> Route {
    if *method == allowed {
        route
    } else {
        Route::MethodNotAllowed
    }
}
