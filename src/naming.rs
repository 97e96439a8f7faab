//! Centralized filename parsing for the `NNN_name` ordinal convention.
//!
//! Documents and folders share one naming pattern: an optional numeric
//! prefix followed by an underscore, then the name. The prefix is a manual
//! sort key and never leaks into derived identifiers:
//!
//! - `2_Setup/` → order 2, name "Setup"
//! - `1_Intro.md` → order 1, name "Intro"
//! - `_Index.md` → no order, name "_Index" (empty prefix is not a number)
//!
//! Every caller goes through [`parse_ordinal`]; swapping the convention means
//! changing this module only.

/// Result of parsing a name like `020_Getting_Started`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Ordinal prefix if present (e.g., `20` from `020_Getting_Started`)
    pub ordinal: Option<i32>,
    /// Remainder after the first underscore, or the full input when there is
    /// no ordinal. Empty for `3_`.
    pub name: String,
}

/// Split a file-system name on its first underscore and read the ordinal.
///
/// - `"020_Getting_Started"` → ordinal=Some(20), name="Getting_Started"
/// - `"3_"` → ordinal=Some(3), name=""
/// - `"_Index"` → ordinal=None, name="_Index"
/// - `"v2_Notes"` → ordinal=None, name="v2_Notes"
/// - `"Intro"` → ordinal=None, name="Intro"
///
/// Only plain ASCII digits count; signs and values beyond `i32::MAX` mean
/// "no ordinal", never an error.
pub fn parse_ordinal(name: &str) -> ParsedName {
    if let Some((prefix, rest)) = name.split_once('_')
        && !prefix.is_empty()
        && prefix.bytes().all(|b| b.is_ascii_digit())
        && let Ok(num) = prefix.parse::<i32>()
    {
        return ParsedName {
            ordinal: Some(num),
            name: rest.to_string(),
        };
    }
    ParsedName {
        ordinal: None,
        name: name.to_string(),
    }
}

/// Turn a display name into a C# identifier.
///
/// Characters outside `[A-Za-z0-9_]` become `_`, and a leading digit gets an
/// `_` prefix. Non-ASCII letters are kept since C# accepts them.
pub fn to_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// True if `name` is a (possibly dotted) identifier that needs no sanitizing.
pub fn is_identifier_path(name: &str) -> bool {
    !name.is_empty()
        && name
            .split('.')
            .all(|part| !part.is_empty() && to_identifier(part) == part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_name() {
        let p = parse_ordinal("1_Intro");
        assert_eq!(p.ordinal, Some(1));
        assert_eq!(p.name, "Intro");
    }

    #[test]
    fn only_first_underscore_splits() {
        let p = parse_ordinal("020_Getting_Started");
        assert_eq!(p.ordinal, Some(20));
        assert_eq!(p.name, "Getting_Started");
    }

    #[test]
    fn number_with_trailing_underscore() {
        let p = parse_ordinal("3_");
        assert_eq!(p.ordinal, Some(3));
        assert_eq!(p.name, "");
    }

    #[test]
    fn index_name_has_no_ordinal() {
        let p = parse_ordinal("_Index");
        assert_eq!(p.ordinal, None);
        assert_eq!(p.name, "_Index");
    }

    #[test]
    fn non_numeric_prefix_is_not_an_ordinal() {
        let p = parse_ordinal("v2_Notes");
        assert_eq!(p.ordinal, None);
        assert_eq!(p.name, "v2_Notes");
    }

    #[test]
    fn signed_prefix_is_not_an_ordinal() {
        assert_eq!(parse_ordinal("+1_Intro").ordinal, None);
        assert_eq!(parse_ordinal("-1_Intro").ordinal, None);
    }

    #[test]
    fn overflowing_prefix_is_not_an_ordinal() {
        let p = parse_ordinal("99999999999_Big");
        assert_eq!(p.ordinal, None);
        assert_eq!(p.name, "99999999999_Big");
    }

    #[test]
    fn no_underscore_keeps_name() {
        let p = parse_ordinal("Intro");
        assert_eq!(p.ordinal, None);
        assert_eq!(p.name, "Intro");

        let p = parse_ordinal("42");
        assert_eq!(p.ordinal, None);
        assert_eq!(p.name, "42");
    }

    #[test]
    fn zero_prefix() {
        let p = parse_ordinal("000_First");
        assert_eq!(p.ordinal, Some(0));
        assert_eq!(p.name, "First");
    }

    #[test]
    fn stripping_is_idempotent() {
        for raw in ["1_Intro", "Intro", "_Index", "12_Widgets", "3_Getting-Started"] {
            let once = parse_ordinal(raw).name;
            let twice = parse_ordinal(&once).name;
            assert_eq!(once, twice, "stripping '{raw}' twice changed it");
        }
    }

    #[test]
    fn identifier_replaces_invalid_chars() {
        assert_eq!(to_identifier("Getting-Started"), "Getting_Started");
        assert_eq!(to_identifier("Q&A"), "Q_A");
        assert_eq!(to_identifier("Intro"), "Intro");
    }

    #[test]
    fn identifier_guards_leading_digit() {
        assert_eq!(to_identifier("3D"), "_3D");
    }

    #[test]
    fn identifier_path_check() {
        assert!(is_identifier_path("Ivy.Views"));
        assert!(is_identifier_path("ViewBase"));
        assert!(!is_identifier_path("Ivy..Views"));
        assert!(!is_identifier_path("my-view"));
        assert!(!is_identifier_path(""));
    }
}
