// SPDX-License-Identifier: GPL-3.0-only

/// Identifies a page in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// The Pokémon list, `/`
    Home,
    /// A single Pokémon, `/pokemon/:id`. The id may also be a name.
    Detail { id: String },
}

/// The result of resolving a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Matched(Page),
    /// Unknown paths land on the home page
    Redirect(Page),
}

impl Route {
    pub fn page(&self) -> &Page {
        match self {
            Route::Matched(page) | Route::Redirect(page) => page,
        }
    }

    pub fn into_page(self) -> Page {
        match self {
            Route::Matched(page) | Route::Redirect(page) => page,
        }
    }
}

impl Page {
    pub fn name(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Detail { .. } => "Detail",
        }
    }

    /// The canonical path of this page
    pub fn path(&self) -> String {
        match self {
            Page::Home => String::from("/"),
            Page::Detail { id } => format!("/pokemon/{id}"),
        }
    }
}

/// Maps a path to the page that renders it.
///
/// Query strings and fragments are ignored, as are repeated and trailing slashes.
pub fn resolve(path: &str) -> Route {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => Route::Matched(Page::Home),
        ["pokemon", id] => Route::Matched(Page::Detail {
            id: (*id).to_string(),
        }),
        _ => Route::Redirect(Page::Home),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: &str) -> Page {
        Page::Detail { id: id.to_string() }
    }

    #[test]
    fn resolves_known_paths() {
        assert_eq!(resolve("/"), Route::Matched(Page::Home));
        assert_eq!(resolve(""), Route::Matched(Page::Home));
        assert_eq!(resolve("/pokemon/25"), Route::Matched(detail("25")));
        assert_eq!(resolve("/pokemon/pikachu/"), Route::Matched(detail("pikachu")));
        assert_eq!(resolve("/pokemon/1?tab=moves"), Route::Matched(detail("1")));
    }

    #[test]
    fn unknown_paths_redirect_home() {
        for path in ["/pokemon", "/pokemon/1/moves", "/items/1", "/about"] {
            assert_eq!(resolve(path), Route::Redirect(Page::Home), "{path}");
        }
    }

    #[test]
    fn pages_round_trip_through_their_path() {
        for page in [Page::Home, detail("7")] {
            assert_eq!(resolve(&page.path()).into_page(), page);
        }
    }

    #[test]
    fn pages_are_named() {
        assert_eq!(Page::Home.name(), "Home");
        assert_eq!(detail("1").name(), "Detail");
    }
}
