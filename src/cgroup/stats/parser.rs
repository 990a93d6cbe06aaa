//! Parsing of the two content shapes found under the memory controller mount.
//!
//! - Single-value files such as `memory.usage_in_bytes` hold one number,
//!   usually followed by a newline.
//! - `memory.stat` holds one `<key> <value>` pair per line.
//!
//! Values are parsed as `f64` since they are exported as gauges.
//!
//! # Example
//!
//! ```rust
//! use cgroup_memory_exporter::cgroup::stats::{for_each_stat_pair, parse_single_value};
//!
//! assert_eq!(parse_single_value("4096\n").unwrap(), 4096.0);
//!
//! let mut pairs = Vec::new();
//! let data = "rss 100\nhierarchical_memory_limit\ncache 200\n";
//! for_each_stat_pair(&mut data.as_bytes(), |_, key, value| {
//!     pairs.push((key.to_owned(), value.to_owned()));
//! })
//! .unwrap();
//! assert_eq!(pairs.len(), 2);
//! ```

use std::io::BufRead;

use super::StatParseError;

/// Parses the content of a single-value file.
///
/// Surrounding whitespace, including the trailing newline written by the
/// kernel, is ignored.
///
/// # Errors
///
/// Returns [`StatParseError::InvalidValue`] if the trimmed content is not a number.
pub fn parse_single_value(content: &str) -> Result<f64, StatParseError> {
    let value = content.trim();
    value
        .parse::<f64>()
        .map_err(|source| StatParseError::InvalidValue {
            value: value.to_string(),
            line: 1,
            source,
        })
}

/// Splits a stat line into its key and value tokens.
///
/// Returns `None` unless the line has exactly two whitespace-separated fields.
pub fn split_stat_line(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Some((key, value)),
        _ => None,
    }
}

/// Parses the value token of a stat line.
///
/// # Errors
///
/// Returns [`StatParseError::InvalidKeyValue`] if `value` is not a number.
pub fn parse_stat_value(key: &str, value: &str, lineno: usize) -> Result<f64, StatParseError> {
    value
        .parse::<f64>()
        .map_err(|source| StatParseError::InvalidKeyValue {
            key: key.to_string(),
            value: value.to_string(),
            line: lineno,
            source,
        })
}

/// Reads `buf` line by line and calls `on_pair` with the 1-based line number,
/// key and value of every line made of exactly two fields.
///
/// Lines with any other number of fields, and lines that are not valid UTF-8,
/// are skipped.
///
/// # Errors
///
/// Returns [`StatParseError::Io`] if reading fails. Pairs seen before the
/// failure have already been passed to `on_pair`.
pub fn for_each_stat_pair<R: BufRead>(
    buf: &mut R,
    mut on_pair: impl FnMut(usize, &str, &str),
) -> Result<(), StatParseError> {
    let mut line = Vec::new();
    let mut lineno = 0;

    while buf.read_until(b'\n', &mut line)? != 0 {
        lineno += 1;
        match std::str::from_utf8(&line) {
            Ok(text) => {
                if let Some((key, value)) = split_stat_line(text) {
                    on_pair(lineno, key, value);
                }
            }
            Err(err) => log::debug!("skipping line {lineno}: {err}"),
        }
        line.clear();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_value() {
        assert_eq!(parse_single_value("12345\n").unwrap(), 12345.0);
        assert_eq!(parse_single_value("  42  \n\n").unwrap(), 42.0);
        assert_eq!(
            parse_single_value("9223372036854771712\n").unwrap(),
            9223372036854771712.0
        );
    }

    #[test]
    fn test_parse_invalid_single_value() {
        let err = parse_single_value("N/A\n").unwrap_err();
        match err {
            StatParseError::InvalidValue { value, line, .. } => {
                assert_eq!(value, "N/A");
                assert_eq!(line, 1);
            }
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_parse_empty_single_value() {
        let err = parse_single_value("").unwrap_err();
        match err {
            StatParseError::InvalidValue { value, .. } => assert_eq!(value, ""),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_split_stat_line() {
        assert_eq!(split_stat_line("rss 100\n"), Some(("rss", "100")));
        assert_eq!(split_stat_line("   cache\t\t200  "), Some(("cache", "200")));
        assert_eq!(split_stat_line(""), None);
        assert_eq!(split_stat_line("\n"), None);
        assert_eq!(split_stat_line("bogus_header\n"), None);
        assert_eq!(split_stat_line("rss 100 extra\n"), None);
    }

    #[test]
    fn test_parse_stat_value() {
        assert_eq!(parse_stat_value("rss", "100", 1).unwrap(), 100.0);

        let err = parse_stat_value("rss", "abc", 3).unwrap_err();
        match err {
            StatParseError::InvalidKeyValue {
                key, value, line, ..
            } => {
                assert_eq!(key, "rss");
                assert_eq!(value, "abc");
                assert_eq!(line, 3);
            }
            _ => panic!("Expected InvalidKeyValue error"),
        }
    }

    #[test]
    fn test_for_each_stat_pair() {
        let data = "\
rss 100
cache 200
bogus_header

total_rss 300 400
total_cache 500
";
        let mut pairs = Vec::new();
        for_each_stat_pair(&mut data.as_bytes(), |lineno, key, value| {
            pairs.push((lineno, key.to_string(), value.to_string()));
        })
        .unwrap();

        assert_eq!(
            pairs,
            vec![
                (1, "rss".to_string(), "100".to_string()),
                (2, "cache".to_string(), "200".to_string()),
                (6, "total_cache".to_string(), "500".to_string()),
            ]
        );
    }

    #[test]
    fn test_for_each_stat_pair_without_trailing_newline() {
        let mut pairs = Vec::new();
        for_each_stat_pair(&mut "rss 1\ncache 2".as_bytes(), |_, key, _| {
            pairs.push(key.to_string());
        })
        .unwrap();
        assert_eq!(pairs, ["rss", "cache"]);
    }

    #[test]
    fn test_for_each_stat_pair_skips_invalid_utf8() {
        let data: &[u8] = b"rss 1\n\xff\xfe 2\ncache 3\n";
        let mut pairs = Vec::new();
        for_each_stat_pair(&mut &data[..], |lineno, key, _| {
            pairs.push((lineno, key.to_string()));
        })
        .unwrap();
        assert_eq!(pairs, [(1, "rss".to_string()), (3, "cache".to_string())]);
    }

    #[test]
    fn test_for_each_stat_pair_read_error() {
        struct FailingReader;

        impl std::io::Read for FailingReader {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("device gone"))
            }
        }

        let mut reader = std::io::BufReader::new(FailingReader);
        let err = for_each_stat_pair(&mut reader, |_, _, _| {}).unwrap_err();
        assert!(matches!(err, StatParseError::Io(_)));
    }
}
