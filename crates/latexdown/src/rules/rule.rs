//! User rules: a [`Filter`] selecting element kinds and a replacement
//! closure that receives the element with its already rendered children.

use crate::node::{Element, ElementKind};
use crate::service::LatexOptions;

pub type ReplacementFn = Box<dyn Fn(&Element, &str, &LatexOptions) -> String + Send + Sync>;

pub type PredicateFn = Box<dyn Fn(&Element, &LatexOptions) -> bool + Send + Sync>;

/// Selects the elements a rule or remove filter applies to
pub enum Filter {
    /// Exactly this kind
    Kind(ElementKind),
    /// Any of these kinds
    AnyOf(Vec<ElementKind>),
    /// Arbitrary test on the element, e.g. on its attributes
    Predicate(PredicateFn),
}

impl Filter {
    pub fn kind(kind: ElementKind) -> Self {
        Filter::Kind(kind)
    }

    pub fn any_of<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = ElementKind>,
    {
        Filter::AnyOf(kinds.into_iter().collect())
    }

    /// Kind looked up by tag name, so `"blockquote"` selects
    /// `Generic("blockquote")` and `"img"` selects `Image`
    pub fn named(name: &str) -> Self {
        Filter::Kind(ElementKind::from_name(name))
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Element, &LatexOptions) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    pub fn matches(&self, element: &Element, options: &LatexOptions) -> bool {
        match self {
            Filter::Kind(kind) => element.kind == *kind,
            Filter::AnyOf(kinds) => kinds.contains(&element.kind),
            Filter::Predicate(f) => f(element, options),
        }
    }
}

impl From<ElementKind> for Filter {
    fn from(kind: ElementKind) -> Self {
        Filter::Kind(kind)
    }
}

/// Custom rendering for the elements its filter selects
pub struct Rule {
    pub filter: Filter,
    pub replacement: ReplacementFn,
}

impl Rule {
    pub fn new<F>(filter: impl Into<Filter>, replacement: F) -> Self
    where
        F: Fn(&Element, &str, &LatexOptions) -> String + Send + Sync + 'static,
    {
        Self {
            filter: filter.into(),
            replacement: Box::new(replacement),
        }
    }

    /// `content` is the rendered children, already escaped
    pub fn apply(&self, element: &Element, content: &str, options: &LatexOptions) -> String {
        (self.replacement)(element, content, options)
    }
}
