//! Hash-fragment routing.
//!
//! Routes are plain values derived from the location hash; a shell decides
//! what to render for each. The favorites view is the only protected one.

/// A parsed route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Favorites,
    /// Book detail view, carrying the percent-decoded book id.
    Book(String),
    /// Anything unrecognized, carrying the offending segment.
    NotFound(String),
}

impl Route {
    /// Parse a location hash like `#/book/abc%2F1` into a route.
    ///
    /// A missing or empty hash means home. The parameter tail (everything
    /// after the first segment) is percent-decoded; undecodable input is
    /// kept as-is.
    #[must_use]
    pub fn parse(hash: &str) -> Self {
        let hash = if hash.is_empty() { "#/home" } else { hash };
        let path = hash.strip_prefix("#/").unwrap_or(hash);

        let (segment, param) = match path.split_once('/') {
            Some((first, rest)) => (first, rest),
            None => (path, ""),
        };
        let param = percent_decode(param);

        match segment {
            "" | "home" => Self::Home,
            "login" => Self::Login,
            "favorites" => Self::Favorites,
            "book" => Self::Book(param),
            other => Self::NotFound(other.to_string()),
        }
    }

    /// Apply route protection: favorites without a session routes to login.
    #[must_use]
    pub fn protect(self, logged_in: bool) -> Self {
        match self {
            Self::Favorites if !logged_in => Self::Login,
            route => route,
        }
    }
}

fn percent_decode(s: &str) -> String {
    urlencoding::decode(s).map_or_else(|_| s.to_string(), |decoded| decoded.into_owned())
}
