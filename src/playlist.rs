use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use url::Url;

/// Ordered list of URIs with a cursor on the item being played.
///
/// The list is never empty and the cursor always addresses a valid entry.
/// Prev/next availability is derived from the cursor position.
pub struct Playlist {
    uris: Vec<String>,
    cursor: usize,
}

impl Playlist {
    /// Build a playlist from at least one URI, cursor on the first item.
    pub fn new(uris: Vec<String>) -> Result<Self> {
        if uris.is_empty() {
            return Err(anyhow!("playlist needs at least one URI"));
        }
        Ok(Self { uris, cursor: 0 })
    }

    /// URI under the cursor.
    pub fn current(&self) -> &str {
        &self.uris[self.cursor]
    }

    pub fn has_prev(&self) -> bool {
        self.cursor > 0
    }

    pub fn has_next(&self) -> bool {
        self.cursor + 1 < self.uris.len()
    }

    /// Move to the next item and return it, or `None` at the end of the list.
    pub fn advance(&mut self) -> Option<&str> {
        if !self.has_next() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Move to the previous item and return it, or `None` at the start.
    pub fn retreat(&mut self) -> Option<&str> {
        if !self.has_prev() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Jump to an arbitrary index and return its URI, `None` if out of range.
    pub fn select(&mut self, index: usize) -> Option<&str> {
        if index >= self.uris.len() {
            return None;
        }
        self.cursor = index;
        Some(self.current())
    }

    /// Append a URI at the end and return its index.
    pub fn push(&mut self, uri: String) -> usize {
        self.uris.push(uri);
        self.uris.len() - 1
    }

    pub fn len(&self) -> usize {
        self.uris.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }
}

/// Turn a command-line argument into a playable URI.
///
/// Arguments that already carry a URI scheme pass through untouched; anything
/// else is treated as a file path (existing or not) and converted to a
/// `file://` URI, with relative paths resolved against the current directory.
pub fn uri_from_input(input: &str) -> Result<String> {
    if let Ok(url) = Url::parse(input) {
        // One-letter schemes are drive letters or stray paths, not URIs.
        if url.scheme().len() > 1 {
            return Ok(input.to_owned());
        }
    }

    let path = Path::new(input);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };
    Url::from_file_path(&absolute)
        .map(String::from)
        .map_err(|_| anyhow!("`{input}` is neither a URI nor a file path"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(len: usize) -> Playlist {
        let uris = (0..len).map(|i| format!("file:///media/{i}.mkv")).collect();
        Playlist::new(uris).unwrap()
    }

    #[test]
    fn starts_on_first_item() {
        let list = playlist(3);
        assert_eq!(list.current(), "file:///media/0.mkv");
        assert!(!list.has_prev());
        assert!(list.has_next());
    }

    #[test]
    fn single_item_has_no_neighbours() {
        let list = playlist(1);
        assert!(!list.has_prev());
        assert!(!list.has_next());
    }

    #[test]
    fn advance_walks_in_insertion_order() {
        let mut list = playlist(3);
        assert_eq!(list.advance(), Some("file:///media/1.mkv"));
        assert_eq!(list.advance(), Some("file:///media/2.mkv"));
        assert_eq!(list.advance(), None);
        // The cursor stays on the last item after hitting the end.
        assert_eq!(list.current(), "file:///media/2.mkv");
        assert!(!list.has_next());
        assert!(list.has_prev());
    }

    #[test]
    fn retreat_stops_at_first_item() {
        let mut list = playlist(2);
        assert_eq!(list.retreat(), None);
        list.advance();
        assert_eq!(list.retreat(), Some("file:///media/0.mkv"));
        assert_eq!(list.retreat(), None);
        assert_eq!(list.current(), "file:///media/0.mkv");
    }

    #[test]
    fn select_rejects_out_of_range() {
        let mut list = playlist(2);
        assert_eq!(list.select(1), Some("file:///media/1.mkv"));
        assert_eq!(list.select(2), None);
        assert_eq!(list.current(), "file:///media/1.mkv");
    }

    #[test]
    fn push_appends_at_the_end() {
        let mut list = playlist(1);
        let index = list.push("file:///media/extra.mkv".to_owned());
        assert_eq!(index, 1);
        assert!(list.has_next());
        assert_eq!(list.select(index), Some("file:///media/extra.mkv"));
    }

    #[test]
    fn empty_playlist_is_rejected() {
        assert!(Playlist::new(Vec::new()).is_err());
    }

    #[test]
    fn uris_pass_through_untouched() {
        let uri = uri_from_input("https://example.com/stream.m3u8").unwrap();
        assert_eq!(uri, "https://example.com/stream.m3u8");
        // No re-serialization: the player sees the argument spelling.
        let uri = uri_from_input("HTTPS://Example.COM").unwrap();
        assert_eq!(uri, "HTTPS://Example.COM");
    }

    #[test]
    fn one_letter_schemes_resolve_as_paths() {
        // Parses as scheme "c", but is a path, not a URI.
        let uri = uri_from_input("c:videos/movie.mkv").unwrap();
        assert!(uri.starts_with("file:///"));
        assert!(uri.ends_with("/c:videos/movie.mkv"));
    }

    #[test]
    fn absolute_paths_become_file_uris() {
        let uri = uri_from_input("/media/movie.mkv").unwrap();
        assert_eq!(uri, "file:///media/movie.mkv");
    }

    #[test]
    fn relative_paths_resolve_against_cwd() {
        let uri = uri_from_input("movie.mkv").unwrap();
        assert!(uri.starts_with("file:///"));
        assert!(uri.ends_with("/movie.mkv"));
    }

    #[test]
    fn missing_files_still_convert() {
        let uri = uri_from_input("/no/such/file.webm").unwrap();
        assert_eq!(uri, "file:///no/such/file.webm");
    }
}
