pub mod html;
pub mod text;

#[cfg(test)]
mod tests;

pub use html::extract;

use scraper::Html;

/// One named way of pulling a value out of a page
pub struct Strategy<T> {
    pub name: &'static str,
    pub run: fn(&Html) -> Option<T>,
}

impl<T> Strategy<T> {
    pub const fn new(name: &'static str, run: fn(&Html) -> Option<T>) -> Self {
        Self { name, run }
    }
}

/// Try strategies in order and return the first hit.
///
/// A strategy returning `None` means "not applicable here"; the next one is
/// tried.
pub fn first_match<T>(doc: &Html, strategies: &[Strategy<T>]) -> Option<T> {
    strategies.iter().find_map(|strategy| {
        let found = (strategy.run)(doc);
        if found.is_some() {
            ::log::trace!("Extraction strategy '{}' matched", strategy.name);
        }
        found
    })
}
