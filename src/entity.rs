use std::borrow::Cow;

use crate::error::Error;
use crate::settings::ReadSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EscapeMode {
    /// Escape `&`, `<`, `>`, `"` and `'`.
    Normal,
    /// Escape `&`, `<` and `>` only.
    CanonicalText,
    /// Escape `&`, `<` and `"` only.
    CanonicalAttr,
}

pub(crate) fn escape(content: &str, mode: EscapeMode) -> Cow<'_, str> {
    let mut result = String::new();
    let mut entity_seen = false;
    for c in content.chars() {
        let replacement = match c {
            '&' => Some("&amp;"),
            '<' => Some("&lt;"),
            '>' if mode != EscapeMode::CanonicalAttr => Some("&gt;"),
            '"' if mode != EscapeMode::CanonicalText => Some("&quot;"),
            '\'' if mode == EscapeMode::Normal => Some("&apos;"),
            _ => None,
        };
        match replacement {
            Some(r) => {
                entity_seen = true;
                result.push_str(r);
            }
            None => result.push(c),
        }
    }

    if !entity_seen {
        content.into()
    } else {
        result.into()
    }
}

pub(crate) fn parse_entities<'a>(
    content: &'a str,
    settings: &ReadSettings,
) -> Result<Cow<'a, str>, Error> {
    let mut result = String::new();
    let mut chars = content.chars();
    let mut entity_seen = false;
    while let Some(c) = chars.next() {
        if c == '&' {
            let mut entity = String::new();
            let mut is_complete = false;
            for c in chars.by_ref() {
                if c == ';' {
                    is_complete = true;
                    break;
                }
                entity.push(c);
            }
            if !is_complete {
                if settings.permissive {
                    result.push('&');
                    result.push_str(&entity);
                    entity_seen = true;
                    continue;
                }
                return Err(Error::UnclosedEntity(entity));
            }
            entity_seen = true;
            match entity.as_str() {
                "amp" => result.push('&'),
                "apos" => result.push('\''),
                "gt" => result.push('>'),
                "lt" => result.push('<'),
                "quot" => result.push('"'),
                _ => {
                    if let Some(rest) = entity.strip_prefix('#') {
                        result.push(parse_char_reference(&entity, rest)?);
                    } else if let Some(replacement) = settings.entity.get(&entity) {
                        result.push_str(replacement);
                    } else if settings.permissive {
                        result.push('&');
                        result.push_str(&entity);
                        result.push(';');
                    } else {
                        return Err(Error::InvalidEntity(entity));
                    }
                }
            }
        } else {
            result.push(c);
        }
    }

    if !entity_seen {
        Ok(content.into())
    } else {
        Ok(result.into())
    }
}

fn parse_char_reference(entity: &str, rest: &str) -> Result<char, Error> {
    let code = if let Some(hex) = rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
        u32::from_str_radix(hex, 16)
    } else {
        rest.parse()
    };
    code.ok()
        .and_then(char::from_u32)
        .ok_or_else(|| Error::InvalidEntity(entity.to_string()))
}
