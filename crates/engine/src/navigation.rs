//! Screen routes and back-navigation history

use loyalty_core::{ProgramId, TierId};
use serde::Serialize;
use std::fmt;

/// A screen the console can show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "camelCase")]
pub enum Route {
    Home,
    Tiers,
    AddTier { free: bool },
    /// The external screen that starts coupon creation
    Program { program_id: ProgramId },
    AddCoupon { program_id: ProgramId },
    /// Referenced from the tier cards; there is no edit screen
    EditTier { tier_id: TierId },
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("home"),
            Route::Tiers => f.write_str("tiers"),
            Route::AddTier { free: true } => f.write_str("add-tier (free)"),
            Route::AddTier { free: false } => f.write_str("add-tier"),
            Route::Program { program_id } => write!(f, "program {}", program_id),
            Route::AddCoupon { program_id } => write!(f, "add-coupon (program {})", program_id),
            Route::EditTier { tier_id } => write!(f, "edit-tier/{}", tier_id),
        }
    }
}

/// Navigation history; `back` never pops the root
#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<Route>,
}

impl Navigator {
    pub fn new(root: Route) -> Self {
        Self {
            history: vec![root],
        }
    }

    /// Start from `Home` with `path` already visited
    pub fn with_history(path: impl IntoIterator<Item = Route>) -> Self {
        let mut nav = Self::new(Route::Home);
        for route in path {
            nav.navigate(route);
        }
        nav
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::debug!("navigate -> {}", route);
        self.history.push(route);
    }

    /// Go back one step and return the screen now shown
    pub fn back(&mut self) -> &Route {
        if self.history.len() > 1 {
            self.history.pop();
        }
        tracing::debug!("back -> {}", self.current());
        self.current()
    }

    pub fn current(&self) -> &Route {
        // history always holds the root
        &self.history[self.history.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_pops_one_step() {
        let mut nav = Navigator::with_history([Route::Tiers, Route::AddTier { free: true }]);
        assert_eq!(nav.depth(), 3);
        assert_eq!(nav.back(), &Route::Tiers);
        assert_eq!(nav.back(), &Route::Home);
    }

    #[test]
    fn test_back_keeps_root() {
        let mut nav = Navigator::default();
        assert_eq!(nav.back(), &Route::Home);
        assert_eq!(nav.depth(), 1);
    }
}
