// src/scrape/sessions.rs
//
// Reads the main-conference program page: session headings, each followed
// by a table of papers. The page is not parsed as a tree; its rows sit at
// fixed line distances from the heading, so this is tied to that markup and
// everything positional lives in `ProgramLayout`.

use crate::config::consts::{
    END_CHECK_OFFSET, FIRST_TITLE_OFFSET, SESSION_END_MARKER, SESSION_MARKER, TITLE_STRIDE,
};
use crate::core::html::strip_tags;
use crate::core::sanitize::{is_safe_component, normalize_title, session_folder_name};
use crate::error::ScrapeError;

/// Line geometry of the program page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgramLayout {
    /// Substring that marks a session heading line.
    pub session_marker: &'static str,
    /// Substring, seen `end_check_offset` lines after a title, that closes the session.
    pub end_marker: &'static str,
    /// Lines from the heading to the first title.
    pub first_title_offset: usize,
    /// Lines between consecutive titles.
    pub title_stride: usize,
    pub end_check_offset: usize,
}

impl Default for ProgramLayout {
    fn default() -> Self {
        Self {
            session_marker: SESSION_MARKER,
            end_marker: SESSION_END_MARKER,
            first_title_offset: FIRST_TITLE_OFFSET,
            title_stride: TITLE_STRIDE,
            end_check_offset: END_CHECK_OFFSET,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Folder-safe session name.
    pub name: String,
    /// Normalized expected titles, in page order.
    pub titles: Vec<String>,
}

/// Sessions in order of first appearance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionMap {
    sessions: Vec<Session>,
}

impl SessionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a session. A repeated name keeps its original position and
    /// takes the new titles.
    pub fn insert(&mut self, name: String, titles: Vec<String>) {
        match self.sessions.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.titles = titles,
            None => self.sessions.push(Session { name, titles }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.sessions
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.titles.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn title_count(&self) -> usize {
        self.sessions.iter().map(|s| s.titles.len()).sum()
    }
}

impl FromIterator<(String, Vec<String>)> for SessionMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut map = SessionMap::new();
        for (name, titles) in iter {
            map.insert(name, titles);
        }
        map
    }
}

pub fn parse_sessions(page: &str) -> Result<SessionMap, ScrapeError> {
    parse_sessions_with(page, &ProgramLayout::default())
}

pub fn parse_sessions_with(page: &str, layout: &ProgramLayout) -> Result<SessionMap, ScrapeError> {
    let lines: Vec<&str> = page.lines().collect();
    let line_at = |i: usize, what: &str| {
        lines.get(i).copied().ok_or_else(|| {
            ScrapeError::Structure(format!("page ends before {what} (line {})", i + 1))
        })
    };

    let mut map = SessionMap::new();
    let mut cur = 0usize;

    while cur < lines.len() {
        let line = lines[cur];
        let Some(at) = line.find(layout.session_marker) else {
            cur += 1;
            continue;
        };

        // Heading text runs from the marker to the next tag
        let raw = line[at + layout.session_marker.len()..]
            .split('<')
            .next()
            .unwrap_or_default();
        let name = session_folder_name(raw);
        if !is_safe_component(&name) {
            return Err(ScrapeError::Structure(format!(
                "session heading on line {} has no usable name",
                cur + 1
            )));
        }

        cur += layout.first_title_offset;
        let mut titles = Vec::new();
        loop {
            let title = normalize_title(&strip_tags(line_at(cur, "a paper title")?));
            if title.is_empty() {
                return Err(ScrapeError::Structure(format!(
                    "expected a paper title in session `{name}` on line {}",
                    cur + 1
                )));
            }
            titles.push(title);

            if line_at(cur + layout.end_check_offset, "the end of a session")?
                .contains(layout.end_marker)
            {
                cur += layout.end_check_offset;
                break;
            }
            cur += layout.title_stride;
        }

        log::debug!("Session {name}: {} titles", titles.len());
        map.insert(name, titles);
    }

    if map.is_empty() {
        return Err(ScrapeError::Structure(format!(
            "no `{}` headings on the program page",
            layout.session_marker
        )));
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Small geometry so fixtures stay readable
    const LAYOUT: ProgramLayout = ProgramLayout {
        session_marker: "Session:",
        end_marker: "tbody",
        first_title_offset: 2,
        title_stride: 3,
        end_check_offset: 1,
    };

    fn program(sessions: &[(&str, &[&str])]) -> String {
        let mut lines = vec![s!("<html>"), s!("<body>")];
        for (name, titles) in sessions {
            lines.push(format!("<h3><b>Session: {name}</b></h3>"));
            lines.push(s!("<table><tbody>"));
            for (i, t) in titles.iter().enumerate() {
                lines.push(format!("<tr><td>{t}</td>"));
                if i + 1 == titles.len() {
                    lines.push(s!("</tr></tbody></table>"));
                } else {
                    lines.push(s!("<td>authors</td></tr>"));
                    lines.push(s!("<tr>"));
                }
            }
        }
        lines.push(s!("</body></html>"));
        lines.join("\n")
    }

    #[test]
    fn parses_sessions_in_page_order() {
        let doc = program(&[
            ("Oral 1.1A&nbsp;Recognition (1)", &["Deep Nets: A Study", "Wide Nets"]),
            ("Posters", &["Only One"]),
        ]);
        let map = parse_sessions_with(&doc, &LAYOUT).unwrap();

        let names: Vec<_> = map.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Oral_1.1A_Recognition", "Posters"]);
        assert_eq!(
            map.get("Oral_1.1A_Recognition").unwrap(),
            &["deep nets a study".to_string(), "wide nets".to_string()]
        );
        assert_eq!(map.get("Posters").unwrap(), &["only one".to_string()]);
        assert_eq!(map.title_count(), 3);
    }

    #[test]
    fn repeated_session_keeps_first_position() {
        let doc = program(&[("A", &["one"]), ("B", &["two"]), ("A", &["three"])]);
        let map = parse_sessions_with(&doc, &LAYOUT).unwrap();
        let names: Vec<_> = map.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(map.get("A").unwrap(), &["three".to_string()]);
    }

    #[test]
    fn page_without_sessions_is_unrecognized() {
        let err = parse_sessions_with("<html>\n<body>nothing</body>\n</html>", &LAYOUT).unwrap_err();
        assert!(matches!(err, ScrapeError::Structure(_)));
    }

    #[test]
    fn truncated_session_is_unrecognized() {
        let doc = "<h3>Session: Cut</h3>\n<table>\n<tr><td>Title</td>";
        let err = parse_sessions_with(doc, &LAYOUT).unwrap_err();
        assert!(matches!(err, ScrapeError::Structure(_)));
    }

    #[test]
    fn default_layout_uses_program_page_geometry() {
        let l = ProgramLayout::default();
        assert_eq!((l.first_title_offset, l.title_stride, l.end_check_offset), (24, 8, 4));
        assert_eq!(l.session_marker, "Session:");
    }
}
