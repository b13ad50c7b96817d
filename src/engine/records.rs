//! Wire formats handed to and taken back from callers.
//!
//! - [`EncapsulationRecord`]: JSON object `{"id","groupId","keyword","y"}`
//! - [`TrapdoorToken`]: `"<trapdoorId>|<groupId>|<keyword>"`
//!
//! Only the encapsulation id is read back from a record; it is located by
//! scanning for the literal `"id"` key rather than by full JSON parsing, so
//! any text carrying that key followed by a quoted value is accepted.

use serde::{Deserialize, Serialize};

use crate::{errors::Error, serde_impl::decimal, BackendError, FieldElement};

/// Separator between the fields of a trapdoor token.
pub const TOKEN_SEPARATOR: char = '|';

/// Encapsulated keyword as returned to callers.
///
/// `y` is the masked value `Y` printed in decimal. The point `X` never
/// leaves the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncapsulationRecord {
    pub id: String,
    pub group_id: String,
    pub keyword: String,
    pub y: String,
}

impl EncapsulationRecord {
    pub(crate) fn new<F: FieldElement>(id: String, group_id: &str, keyword: &str, y: &F) -> Self {
        Self {
            id,
            group_id: group_id.to_owned(),
            keyword: keyword.to_owned(),
            y: decimal::to_string(y),
        }
    }

    /// Serializes the record as a compact JSON object with `id` first.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(|e| BackendError::Other(e.to_string()).into())
    }

    /// Parses a record from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::MalformedInput(e.to_string()))
    }

    /// Decodes the masked value `Y`.
    pub fn mask<F: FieldElement>(&self) -> Result<F, Error> {
        Ok(decimal::from_str(&self.y)?)
    }
}

/// Extracts the encapsulation id from serialized record text.
///
/// Finds the first `"id"`, then the first `:` after it, then the quoted
/// string after that.
///
/// ```rust
/// use edgematch::engine::parse_encapsulation_id;
///
/// let id = parse_encapsulation_id(r#"{"id":"enc_1","groupId":"g"}"#).unwrap();
/// assert_eq!(id, "enc_1");
/// assert!(parse_encapsulation_id("{}").is_err());
/// ```
pub fn parse_encapsulation_id(record: &str) -> Result<&str, Error> {
    const KEY: &str = "\"id\"";

    let malformed = |what: &str| Error::MalformedInput(format!("encapsulation record: {what}"));

    let key_at = record.find(KEY).ok_or_else(|| malformed("missing \"id\" key"))?;
    let rest = &record[key_at + KEY.len()..];
    let colon_at = rest.find(':').ok_or_else(|| malformed("missing ':' after \"id\""))?;
    let rest = &rest[colon_at + 1..];
    let open_at = rest.find('"').ok_or_else(|| malformed("missing id value"))?;
    let rest = &rest[open_at + 1..];
    let close_at = rest.find('"').ok_or_else(|| malformed("unterminated id value"))?;
    Ok(&rest[..close_at])
}

/// Parsed trapdoor token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapdoorToken<'a> {
    pub trapdoor_id: &'a str,
    pub group_id: &'a str,
    pub keyword: &'a str,
}

impl<'a> TrapdoorToken<'a> {
    /// Splits `"<trapdoorId>|<groupId>|<keyword>"`.
    ///
    /// Exactly two separators are required. Fields may be empty; they are
    /// resolved against the caches afterwards.
    ///
    /// ```rust
    /// use edgematch::engine::TrapdoorToken;
    ///
    /// let token = TrapdoorToken::parse("td_1|g7|observe").unwrap();
    /// assert_eq!(token.group_id, "g7");
    /// assert!(TrapdoorToken::parse("not-a-trapdoor").is_err());
    /// assert!(TrapdoorToken::parse("a|b|c|d").is_err());
    /// ```
    pub fn parse(token: &'a str) -> Result<Self, Error> {
        let mut parts = token.split(TOKEN_SEPARATOR);
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(trapdoor_id), Some(group_id), Some(keyword), None) => Ok(Self {
                trapdoor_id,
                group_id,
                keyword,
            }),
            _ => Err(Error::MalformedInput(format!(
                "trapdoor token must have exactly two '{TOKEN_SEPARATOR}' separators"
            ))),
        }
    }

    /// Formats the token.
    pub fn format(trapdoor_id: &str, group_id: &str, keyword: &str) -> String {
        format!("{trapdoor_id}{TOKEN_SEPARATOR}{group_id}{TOKEN_SEPARATOR}{keyword}")
    }
}

#[cfg(all(test, feature = "blst"))]
mod tests {
    use super::*;
    use crate::Fr;

    #[test]
    fn record_json_puts_id_first() {
        let record = EncapsulationRecord::new(
            "enc_17000000001".into(),
            "17000000002",
            "observe",
            &Fr::from(99u64),
        );
        let json = record.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"id":"enc_17000000001","groupId":"17000000002","keyword":"observe","y":"99"}"#
        );
        assert_eq!(parse_encapsulation_id(&json).unwrap(), "enc_17000000001");
        assert_eq!(EncapsulationRecord::from_json(&json).unwrap(), record);
        assert_eq!(record.mask::<Fr>().unwrap(), Fr::from(99u64));
    }

    #[test]
    fn id_scan_tolerates_whitespace_and_order() {
        let text = r#"{ "keyword": "x", "id" :  "enc_5" }"#;
        assert_eq!(parse_encapsulation_id(text).unwrap(), "enc_5");
    }

    #[test]
    fn id_scan_rejects_truncated_text() {
        for text in ["", "garbage", r#"{"id"}"#, r#"{"id": 5}"#, r#"{"id":"enc_5"#] {
            assert!(
                matches!(parse_encapsulation_id(text), Err(Error::MalformedInput(_))),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn token_requires_exactly_two_separators() {
        let token = TrapdoorToken::format("td_1", "g", "observe");
        assert_eq!(token, "td_1|g|observe");
        let parsed = TrapdoorToken::parse(&token).unwrap();
        assert_eq!(parsed.trapdoor_id, "td_1");
        assert_eq!(parsed.keyword, "observe");

        assert!(TrapdoorToken::parse("").is_err());
        assert!(TrapdoorToken::parse("td_1|g").is_err());
        assert!(TrapdoorToken::parse("td_1|g|a|b").is_err());
        assert!(TrapdoorToken::parse("||").is_ok());
    }

    #[test]
    fn record_rejects_bad_mask() {
        let mut record = EncapsulationRecord::new("enc_1".into(), "g", "k", &Fr::from(1u64));
        record.y = "abc".into();
        assert!(matches!(record.mask::<Fr>(), Err(Error::Backend(_))));
        assert!(EncapsulationRecord::from_json("{").is_err());
    }
}
