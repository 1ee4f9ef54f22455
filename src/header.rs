use crate::core_parser::CoreParser;
use crate::errors::ParseError;
use crate::models::SessionType;
use crate::parsing_utils::{decode_str, format_version};

pub(crate) const LINE_FEED: u8 = 0x0a;
pub(crate) const SIGNATURE: &[u8; 4] = b"IRSR";

/// Intermediate parsing structure for the header
#[derive(Debug, PartialEq)]
pub struct Header {
    pub identifier: String,
    pub format_version: String,
}

/// Intermediate parsing structure for the session metadata that follows the header
#[derive(Debug, PartialEq)]
pub struct Metadata {
    pub format_marker: String,
    pub mod_info: String,
    pub scenario_filename: String,
    pub aiw_filename: String,
    pub mod_name: String,
    pub mod_version: String,
    pub mod_uid: String,
    pub track_path: String,
    pub session_type: SessionType,
    pub is_private_session: bool,
}

/// The replay starts with free form text up to the first line feed, then the signature and
/// the format version
pub fn parse_header(rlp: &mut CoreParser) -> Result<Header, ParseError> {
    let line_feed = rlp.find(LINE_FEED).ok_or(ParseError::HeaderMismatch {
        expected: LINE_FEED,
        actual: None,
        position: rlp.bytes_read() + rlp.remaining(),
    })?;

    let identifier = rlp.take(line_feed - rlp.bytes_read(), decode_str)?;
    rlp.expect_bytes(&[LINE_FEED])?;
    rlp.expect_bytes(SIGNATURE)?;
    let format_version = format_version(rlp.take_f32()?);

    Ok(Header {
        identifier,
        format_version,
    })
}

pub fn parse_metadata(rlp: &mut CoreParser) -> Result<Metadata, ParseError> {
    let format_marker = rlp.parse_text(4)?;
    rlp.skip(4)?;
    let mod_info = rlp.parse_text(4)?;
    let scenario_filename = rlp.parse_text(4)?;
    let aiw_filename = rlp.parse_text(4)?;
    let mod_name = rlp.parse_text(2)?;
    let mod_version = rlp.parse_text(2)?;
    let mod_uid = rlp.parse_text(2)?;
    let track_path = rlp.parse_text(2)?;
    rlp.skip(1)?;
    let (session_type, is_private_session) = session_info(rlp.take_u8()?)?;
    rlp.skip(67)?;

    Ok(Metadata {
        format_marker,
        mod_info,
        scenario_filename,
        aiw_filename,
        mod_name,
        mod_version,
        mod_uid,
        track_path,
        session_type,
        is_private_session,
    })
}

/// The low nibble is the session code and the high bit flags a private session
fn session_info(byte: u8) -> Result<(SessionType, bool), ParseError> {
    let session_type = SessionType::from_code(byte & 0x0f)?;
    let is_private = (byte >> 7) & 1 == 1;
    Ok((session_type, is_private))
}
