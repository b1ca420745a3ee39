use crate::config::Encoding;
use crate::model::{GeneratedDocument, Target};

/// Element names of the phone menu format.
pub mod element {
    pub const ROOT: &str = "SnomIPPhoneMenu";
    pub const TITLE: &str = "Title";
    pub const MENU_ITEM: &str = "MenuItem";
    pub const NAME: &str = "Name";
    pub const URL: &str = "URL";
}

/// Render a document as phone menu XML, encoded for the target handset.
///
/// Document targets are turned into URLs below `menu_http_root`.
pub fn render_menu_xml(doc: &GeneratedDocument, menu_http_root: &str, encoding: Encoding) -> Vec<u8> {
    use element::*;

    let mut out = String::new();
    out.push_str(&format!(
        "<?xml version=\"1.0\" encoding=\"{}\"?>\n",
        encoding.label()
    ));
    out.push_str(&format!("<{ROOT}>\n"));
    out.push_str(&format!("<{TITLE}>{}</{TITLE}>\n", escape(&doc.title)));

    for entry in &doc.entries {
        let url = match &entry.target {
            Target::Document(r) => format!("{}{}", menu_http_root, r.file_name()),
            Target::Action(url) => url.clone(),
        };
        out.push_str(&format!(
            "<{MENU_ITEM}><{NAME}>{}</{NAME}><{URL}>{}</{URL}></{MENU_ITEM}>\n",
            escape(&entry.label),
            escape(&url)
        ));
    }
    out.push_str(&format!("</{ROOT}>\n"));

    encode(&out, encoding)
}

/// Escape markup characters. Characters XML 1.0 cannot carry at all
/// (C0 controls other than tab, LF and CR, U+FFFE, U+FFFF) are dropped.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\t' | '\n' | '\r' => out.push(c),
            '\u{0}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Encode rendered XML. Characters the encoding cannot hold become numeric
/// character references, which is only valid because markup is pure ASCII.
fn encode(xml: &str, encoding: Encoding) -> Vec<u8> {
    match encoding {
        Encoding::Utf8 => xml.as_bytes().to_vec(),
        Encoding::Iso8859_10 => {
            let mut out = Vec::with_capacity(xml.len());
            for c in xml.chars() {
                match latin6_byte(c) {
                    Some(b) => out.push(b),
                    None => out.extend_from_slice(format!("&#{};", c as u32).as_bytes()),
                }
            }
            out
        }
    }
}

/// ISO-8859-10 code points for bytes 0xA0..=0xFF.
const LATIN6_HIGH: [u16; 96] = [
    0x00A0, 0x0104, 0x0112, 0x0122, 0x012A, 0x0128, 0x0136, 0x00A7, //
    0x013B, 0x0110, 0x0160, 0x0166, 0x017D, 0x00AD, 0x016A, 0x014A, //
    0x00B0, 0x0105, 0x0113, 0x0123, 0x012B, 0x0129, 0x0137, 0x00B7, //
    0x013C, 0x0111, 0x0161, 0x0167, 0x017E, 0x2015, 0x016B, 0x014B, //
    0x0100, 0x00C1, 0x00C2, 0x00C3, 0x00C4, 0x00C5, 0x00C6, 0x012E, //
    0x010C, 0x00C9, 0x0118, 0x00CB, 0x0116, 0x00CD, 0x00CE, 0x00CF, //
    0x00D0, 0x0145, 0x014C, 0x00D3, 0x00D4, 0x00D5, 0x00D6, 0x0168, //
    0x00D8, 0x0172, 0x00DA, 0x00DB, 0x00DC, 0x00DD, 0x00DE, 0x00DF, //
    0x0101, 0x00E1, 0x00E2, 0x00E3, 0x00E4, 0x00E5, 0x00E6, 0x012F, //
    0x010D, 0x00E9, 0x0119, 0x00EB, 0x0117, 0x00ED, 0x00EE, 0x00EF, //
    0x00F0, 0x0146, 0x014D, 0x00F3, 0x00F4, 0x00F5, 0x00F6, 0x0169, //
    0x00F8, 0x0173, 0x00FA, 0x00FB, 0x00FC, 0x00FD, 0x00FE, 0x0138, //
];

fn latin6_byte(c: char) -> Option<u8> {
    if c.is_ascii() {
        return Some(c as u8);
    }
    let cp = c as u32;
    LATIN6_HIGH
        .iter()
        .position(|&x| u32::from(x) == cp)
        .map(|i| 0xA0 + i as u8)
}
