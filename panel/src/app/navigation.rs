//! # Navigation
//!
//! Tab selection for the panel. Navigation is pure UI state: it reads nothing from the
//! providers.

/// Panel tabs in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    /// Open listings by other players
    #[default]
    Market,
    /// The signer's own open listings
    MyListings,
    /// Transactions the signer submitted this session
    MyOrders,
    /// The signer's planets
    MyPlanets,
    /// How the market works
    Guide,
}

impl Tab {
    /// Get all tabs in navigation order
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Market,
            Tab::MyListings,
            Tab::MyOrders,
            Tab::MyPlanets,
            Tab::Guide,
        ]
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Market => "Market",
            Tab::MyListings => "My Listings",
            Tab::MyOrders => "My Orders",
            Tab::MyPlanets => "My Planets",
            Tab::Guide => "Guide",
        }
    }

    fn index(self) -> usize {
        Tab::all().iter().position(|&t| t == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Navigation {
    active: Tab,
}

impl Navigation {
    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn select(&mut self, tab: Tab) {
        if self.active != tab {
            tracing::debug!(from = self.active.title(), to = tab.title(), "Tab changed");
        }
        self.active = tab;
    }

    /// Move to the next tab, wrapping after the last one
    pub fn next(&mut self) {
        let tabs = Tab::all();
        self.select(tabs[(self.active.index() + 1) % tabs.len()]);
    }

    /// Move to the previous tab, wrapping before the first one
    pub fn previous(&mut self) {
        let tabs = Tab::all();
        let idx = self.active.index();
        let prev = if idx == 0 { tabs.len() - 1 } else { idx - 1 };
        self.select(tabs[prev]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_market() {
        assert_eq!(Navigation::default().active(), Tab::Market);
    }

    #[test]
    fn test_next_wraps() {
        let mut nav = Navigation::default();
        nav.select(Tab::Guide);
        nav.next();
        assert_eq!(nav.active(), Tab::Market);
    }

    #[test]
    fn test_previous_wraps() {
        let mut nav = Navigation::default();
        nav.previous();
        assert_eq!(nav.active(), Tab::Guide);
        nav.previous();
        assert_eq!(nav.active(), Tab::MyPlanets);
    }

    #[test]
    fn test_titles() {
        let titles: Vec<&str> = Tab::all().iter().map(|t| t.title()).collect();
        assert_eq!(
            titles,
            vec!["Market", "My Listings", "My Orders", "My Planets", "Guide"]
        );
    }
}
