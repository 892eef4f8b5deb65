use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

// ============================================================================
// Portfolio Gallery
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub image: String,
    pub link: String,
}

impl GalleryItem {
    #[must_use]
    pub fn new(image: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            link: link.into(),
        }
    }
}

/// Fixed, non-empty list of portfolio pieces with a cursor that wraps both ways.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioGallery {
    items: Vec<GalleryItem>,
    index: usize,
}

impl PortfolioGallery {
    pub fn new(items: Vec<GalleryItem>) -> Result<Self> {
        if items.is_empty() {
            bail!("portfolio gallery needs at least one item");
        }
        Ok(Self { items, index: 0 })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn current(&self) -> &GalleryItem {
        &self.items[self.index]
    }

    #[must_use]
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub const fn reset(&mut self) {
        self.index = 0;
    }

    pub fn show_next(&mut self) -> usize {
        self.index = (self.index + 1) % self.items.len();
        self.index
    }

    pub fn show_previous(&mut self) -> usize {
        self.index = (self.index + self.items.len() - 1) % self.items.len();
        self.index
    }
}

// ============================================================================
// Default Portfolio
// ============================================================================

const PORTFOLIO_SITE: &str = "https://nihaalnazeer.myportfolio.com/";

const DEFAULT_PIECES: [(&str, &str); 20] = [
    ("homepage.png", ""),
    ("originalmachines.png", "original-machines-branding"),
    ("visionprofootball.png", "football-on-the-vision-pro"),
    ("visionpronetflix.png", "immersive-netflix-for-apples-vision-pro"),
    ("butterflygarden.png", "butterfly-garden-ui-designanimation"),
    ("visionproinstagram.png", "apple-vision-instagram-redesign"),
    ("memorypalace.png", "memory-palace-blender-animation"),
    ("ehteraz.png", "ehteraz-covid-app-redesign"),
    ("shortfilm.png", "mind-of-a-designer-short-film"),
    ("telephone.png", "telephone-publication-design"),
    ("posters.png", "typographic-posters"),
    ("fortuneteller.png", "fortune-teller-interactive-pamphlet"),
    ("advocate.png", "mental-health-advocate"),
    ("lightdark.png", "light-and-dark-animation"),
    ("greenprint.png", "green-print-app-design"),
    ("lean.png", "lean-website-design"),
    ("escaperoom.png", "escape-room-game-design"),
    ("staticaction.png", "static-action-animation"),
    ("rgfc.png", "rgfc-jersey-design"),
    ("serione.png", "silklon-and-serione-branding-design"),
];

#[must_use]
pub fn default_gallery_items() -> Vec<GalleryItem> {
    DEFAULT_PIECES
        .iter()
        .map(|(image, slug)| GalleryItem::new(*image, format!("{PORTFOLIO_SITE}{slug}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery() -> PortfolioGallery {
        PortfolioGallery::new(default_gallery_items()).expect("default gallery is not empty")
    }

    #[test]
    fn empty_gallery_is_rejected() {
        assert!(PortfolioGallery::new(Vec::new()).is_err());
    }

    #[test]
    fn next_wraps_from_last_to_first() {
        let mut gallery = gallery();
        assert_eq!(gallery.len(), 20);
        for _ in 0..19 {
            gallery.show_next();
        }
        assert_eq!(gallery.index(), 19);
        assert_eq!(gallery.show_next(), 0);
    }

    #[test]
    fn previous_wraps_from_first_to_last() {
        let mut gallery = gallery();
        assert_eq!(gallery.show_previous(), 19);
        assert_eq!(gallery.current().image, "serione.png");
    }

    #[test]
    fn index_stays_in_range_over_long_walks() {
        let mut gallery = gallery();
        for step in 0..137 {
            if step % 3 == 0 {
                gallery.show_previous();
            } else {
                gallery.show_next();
            }
            assert!(gallery.index() < gallery.len());
        }
    }

    #[test]
    fn single_item_gallery_stays_put() {
        let mut gallery = PortfolioGallery::new(vec![GalleryItem::new("a.png", "https://a")]).expect("one item");
        assert_eq!(gallery.show_next(), 0);
        assert_eq!(gallery.show_previous(), 0);
    }

    #[test]
    fn default_links_point_at_the_portfolio() {
        let gallery = gallery();
        assert_eq!(gallery.current().link, PORTFOLIO_SITE);
        assert!(gallery.items()[1].link.ends_with("original-machines-branding"));
    }
}
