//! Guide tab.

use serde::Serialize;

/// Static help shown on the Guide tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuideView {
    pub title: &'static str,
    pub sections: &'static [(&'static str, &'static str)],
}

const SECTIONS: &[(&str, &str)] = &[
    (
        "Listing a planet",
        "Pick a planet on My Planets and set a price. The listing appears on the market once its transaction confirms.",
    ),
    (
        "Buying",
        "Accept any open listing on the Market tab. Your own listings are not shown there.",
    ),
    (
        "Cancelling",
        "Cancel an open listing from My Listings. Cancelling is a transaction too; until it confirms the listing stays open.",
    ),
    (
        "Orders",
        "My Orders lists every transaction you sent this session, newest first, as pending, confirmed or failed.",
    ),
];

impl Default for GuideView {
    fn default() -> Self {
        Self {
            title: "Planet Market Guide",
            sections: SECTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guide_has_content() {
        let guide = GuideView::default();
        assert!(!guide.sections.is_empty());
        assert!(guide.sections.iter().all(|(heading, body)| !heading.is_empty() && !body.is_empty()));
    }
}
