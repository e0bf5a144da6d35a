//! The fixed set of page types the generation endpoints accept.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Page kinds with a dedicated data-collection and fallback shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Products,
    Search,
    ProductDetail,
    Faq,
    Claims,
}

impl PageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PageKind::Home => "home",
            PageKind::Products => "products",
            PageKind::Search => "search",
            PageKind::ProductDetail => "product_detail",
            PageKind::Faq => "faq",
            PageKind::Claims => "claims",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(PageKind::Home),
            "products" => Ok(PageKind::Products),
            "search" => Ok(PageKind::Search),
            "product_detail" => Ok(PageKind::ProductDetail),
            "faq" | "faqs" => Ok(PageKind::Faq),
            "claims" | "claim" => Ok(PageKind::Claims),
            other => Err(CoreError::UnsupportedPage(other.to_string())),
        }
    }
}
