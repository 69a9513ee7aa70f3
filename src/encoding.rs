use encoding_rs::Encoding;
use xhtmlchardet::detect;

use crate::error::Error;
use crate::settings::ReadSettings;

/// Decode raw document bytes into a string, sniffing the character set
/// from the XML declaration or byte order mark. A `charset_reader` hook in
/// the settings takes over decoding of non-UTF-8 labels.
pub(crate) fn decode(data: &[u8], settings: &ReadSettings) -> Result<String, Error> {
    let mut cursor = std::io::Cursor::new(data);
    let charsets = detect(&mut cursor, None).unwrap_or_default();
    let label = if charsets.is_empty() {
        "UTF-8".to_string()
    } else {
        charsets[0].clone()
    };

    if !label.eq_ignore_ascii_case("utf-8") {
        if let Some(reader) = &settings.charset_reader {
            let bytes = reader(&label, data)?;
            return String::from_utf8(bytes).map_err(|_| Error::UnsupportedEncoding(label));
        }
    }

    let encoding =
        Encoding::for_label(label.as_bytes()).ok_or_else(|| Error::UnsupportedEncoding(label))?;
    let (text, _, _) = encoding.decode(data);
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8() {
        let data = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?><a/>";
        let text = decode(data, &ReadSettings::default()).unwrap();
        assert_eq!(text, "<?xml version=\"1.0\" encoding=\"UTF-8\"?><a/>");
    }

    #[test]
    fn test_utf8_without_declaration() {
        let data = b"<a/>";
        let text = decode(data, &ReadSettings::default()).unwrap();
        assert_eq!(text, "<a/>");
    }

    #[test]
    fn test_iso8859_1() {
        let data = b"<?xml version=\"1.0\" encoding=\"iso-8859-1\"?><p>\xe9</p>";
        let text = decode(data, &ReadSettings::default()).unwrap();
        assert!(text.ends_with("<p>\u{e9}</p>"));
    }

    #[test]
    fn test_charset_reader_hook() {
        let mut settings = ReadSettings::default();
        settings.charset_reader = Some(std::rc::Rc::new(|_label: &str, input: &[u8]| {
            // latin-1 bytes map one to one onto code points
            Ok(input.iter().flat_map(|b| {
                let mut buf = [0; 2];
                (*b as char).encode_utf8(&mut buf).as_bytes().to_vec()
            }).collect())
        }));
        let data = b"<?xml version=\"1.0\" encoding=\"iso-8859-1\"?><p>\xe9</p>";
        let text = decode(data, &settings).unwrap();
        assert!(text.ends_with("<p>\u{e9}</p>"));
    }
}
