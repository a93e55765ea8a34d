use encoding_rs::{Encoding, UTF_8};

use crate::core::errors::{Result, SampleError};

/// Label the generator resolves by default. WHATWG maps it onto GBK, whose
/// double-byte table is a superset of GB2312.
pub const DEFAULT_LABEL: &str = "gb2312";

/// Conversion between a legacy double-byte code page and Unicode.
///
/// The generator only ever sees this trait, so tests can swap the table out.
pub trait LegacyCodec {
    /// Canonical name of the code page, for diagnostics.
    fn name(&self) -> &'static str;

    /// Decode one two-byte code point into exactly one character.
    fn decode(&self, pair: [u8; 2]) -> Result<char>;

    /// Encode `text` into the legacy code page and convert those bytes to UTF-8.
    fn transcode_to_utf8(&self, text: &str) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone, Copy)]
pub struct EncodingRsCodec {
    encoding: &'static Encoding,
}

impl EncodingRsCodec {
    pub fn gb2312() -> Result<Self> {
        Self::for_label(DEFAULT_LABEL)
    }

    pub fn for_label(label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| SampleError::EncodingUnavailable(label.to_string()))?;
        // Only a code page that encodes to itself, is not UTF-8, and reads
        // both corners of the drawn block as single characters can stand in
        // as the legacy side of the conversion.
        if encoding == UTF_8
            || encoding.output_encoding() != encoding
            || !CORNER_PAIRS.iter().all(|pair| decodes_to_one_char(encoding, pair))
        {
            return Err(SampleError::EncodingUnavailable(format!(
                "{label} resolves to {}, which is not a legacy double-byte code page",
                encoding.name()
            )));
        }
        Ok(Self { encoding })
    }
}

/// First and last pairs `CodePointPair::draw` can produce.
const CORNER_PAIRS: [[u8; 2]; 2] = [[0xB0, 0xA1], [0xD6, 0xFE]];

fn decodes_to_one_char(encoding: &'static Encoding, pair: &[u8; 2]) -> bool {
    encoding
        .decode_without_bom_handling_and_without_replacement(pair)
        .map_or(false, |s| s.chars().count() == 1)
}

impl LegacyCodec for EncodingRsCodec {
    fn name(&self) -> &'static str {
        self.encoding.name()
    }

    fn decode(&self, pair: [u8; 2]) -> Result<char> {
        let unmapped = || SampleError::Unmapped {
            encoding: self.encoding.name(),
            high: pair[0],
            low: pair[1],
        };
        let decoded = self
            .encoding
            .decode_without_bom_handling_and_without_replacement(&pair)
            .ok_or_else(unmapped)?;
        let mut chars = decoded.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(unmapped()),
        }
    }

    fn transcode_to_utf8(&self, text: &str) -> Result<Vec<u8>> {
        let unrepresentable = || SampleError::Unrepresentable {
            encoding: self.encoding.name(),
        };
        let (legacy, _, had_errors) = self.encoding.encode(text);
        if had_errors {
            return Err(unrepresentable());
        }
        let unicode = self
            .encoding
            .decode_without_bom_handling_and_without_replacement(&legacy)
            .ok_or_else(unrepresentable)?;
        Ok(unicode.into_owned().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gb2312_label_resolves() {
        let codec = EncodingRsCodec::gb2312().unwrap();
        assert_eq!(codec.name(), "GBK");
    }

    #[test]
    fn unknown_label_is_unavailable() {
        let err = EncodingRsCodec::for_label("klingon-7").unwrap_err();
        assert!(matches!(err, SampleError::EncodingUnavailable(_)));
    }

    #[test]
    fn utf8_is_not_a_legacy_codec() {
        let err = EncodingRsCodec::for_label("utf-8").unwrap_err();
        assert!(matches!(err, SampleError::EncodingUnavailable(_)));
        let err = EncodingRsCodec::for_label("utf-16le").unwrap_err();
        assert!(matches!(err, SampleError::EncodingUnavailable(_)));
    }

    #[test]
    fn single_byte_code_pages_are_unavailable() {
        for label in ["latin1", "windows-1252", "koi8-r", "iso-8859-5"] {
            let err = EncodingRsCodec::for_label(label).unwrap_err();
            assert!(matches!(err, SampleError::EncodingUnavailable(_)), "{label}");
        }
    }

    #[test]
    fn other_double_byte_cjk_pages_are_accepted() {
        for label in ["gbk", "gb18030", "big5", "euc-kr"] {
            assert!(EncodingRsCodec::for_label(label).is_ok(), "{label}");
        }
        // Shift_JIS reads 0xB0 as a half-width katakana, so the pair splits.
        assert!(EncodingRsCodec::for_label("shift_jis").is_err());
    }

    #[test]
    fn decodes_first_level_one_hanzi() {
        let codec = EncodingRsCodec::gb2312().unwrap();
        // Row 16, cell 1 of GB2312.
        assert_eq!(codec.decode([0xB0, 0xA1]).unwrap(), '啊');
        // Last cell of row 54.
        assert_eq!(codec.decode([0xD6, 0xFE]).unwrap(), '筑');
    }

    #[test]
    fn ascii_pair_is_not_one_character() {
        let codec = EncodingRsCodec::gb2312().unwrap();
        let err = codec.decode([b'a', b'b']).unwrap_err();
        assert!(matches!(err, SampleError::Unmapped { high: b'a', .. }));
    }

    #[test]
    fn transcode_round_trips_through_legacy_bytes() {
        let codec = EncodingRsCodec::gb2312().unwrap();
        let bytes = codec.transcode_to_utf8("啊阿埃").unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "啊阿埃");
    }

    #[test]
    fn transcode_rejects_text_outside_code_page() {
        let codec = EncodingRsCodec::gb2312().unwrap();
        let err = codec.transcode_to_utf8("😀").unwrap_err();
        assert!(matches!(err, SampleError::Unrepresentable { encoding: "GBK" }));
    }
}
