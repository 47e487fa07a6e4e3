//! Text rendering of stories and the signed-in user.

use std::fmt;
use std::io::{self, Write};

use crate::domain::{Story, User};

/// Leading symbol on a story line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Marker {
    Favorite,
    NotFavorite,
    Own,
    Plain,
}

impl Marker {
    /// Star state of `story` for `user`; plain when nobody is logged in.
    pub(crate) fn for_viewer(user: Option<&User>, story: &Story) -> Self {
        match user {
            Some(user) if user.is_favorite(story.id()) => Self::Favorite,
            Some(_) => Self::NotFavorite,
            None => Self::Plain,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Favorite => "★ ",
            Self::NotFavorite => "☆ ",
            Self::Own => "✎ ",
            Self::Plain => "",
        })
    }
}

pub(crate) fn story_line(story: &Story, marker: Marker) -> String {
    format!(
        "{marker}{title} ({host}) by {author}, posted by {username} [{id}]",
        title = story.title(),
        host = story.hostname(),
        author = story.author(),
        username = story.username(),
        id = story.id(),
    )
}

pub(crate) fn write_stories<'a, W, I>(
    out: &mut W,
    stories: I,
    empty: &str,
    marker: impl Fn(&Story) -> Marker,
) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Story>,
{
    let mut any = false;
    for story in stories {
        any = true;
        writeln!(out, "{}", story_line(story, marker(story)))?;
    }
    if !any {
        writeln!(out, "{empty}")?;
    }
    Ok(())
}

pub(crate) fn write_identity<W: Write>(out: &mut W, user: &User) -> io::Result<()> {
    writeln!(out, "{} ({})", user.username(), user.name())?;
    writeln!(out, "favorites: {}", user.favorites().len())?;
    writeln!(out, "stories: {}", user.own_stories().len())?;
    writeln!(
        out,
        "member since: {}",
        user.created_at().format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::fixtures::{signed_in_user, story};
    use rstest::rstest;

    #[rstest]
    #[case(Marker::Favorite, "★ ")]
    #[case(Marker::Own, "✎ ")]
    #[case(Marker::Plain, "")]
    fn story_line_shows_marker_host_and_credit(#[case] marker: Marker, #[case] prefix: &str) {
        let expected = format!("{prefix}Story s1 (example.com) by bob author, posted by bob [s1]");
        assert_eq!(story_line(&story("s1", "bob"), marker), expected);
    }

    #[rstest]
    fn viewer_marker_reflects_favorites() {
        let user = signed_in_user("ada", vec![story("f1", "bob")], vec![]);
        assert_eq!(
            Marker::for_viewer(Some(&user), &story("f1", "bob")),
            Marker::Favorite
        );
        assert_eq!(
            Marker::for_viewer(Some(&user), &story("x", "bob")),
            Marker::NotFavorite
        );
        assert_eq!(Marker::for_viewer(None, &story("x", "bob")), Marker::Plain);
    }

    #[rstest]
    fn empty_listing_prints_placeholder() {
        let mut out = Vec::new();
        let empty: &[Story] = &[];
        write_stories(&mut out, empty, "Nothing here.", |_| Marker::Plain).expect("write to vec");
        assert_eq!(String::from_utf8(out).expect("utf-8"), "Nothing here.\n");
    }
}
