//! XML rendering of `urlset` and `sitemapindex` documents.
//!
//! Documents are written with `quick-xml`'s event writer, indented by two
//! spaces, and always start with the UTF-8 XML declaration:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2024-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use std::borrow::Cow;
use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::entry::UrlEntry;
use crate::error::RenderError;

/// Namespace of the sitemap protocol, version 0.9.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// A chunk file listed in a sitemap index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapReference {
    /// Absolute URL of the chunk file.
    pub url: String,
    /// Generation date (`YYYY-MM-DD`).
    pub last_modified: String,
}

/// Render a `<urlset>` document listing `entries` in order.
pub fn render_urlset(entries: &[&UrlEntry]) -> Result<Vec<u8>, RenderError> {
    let mut writer = document_writer()?;
    writer.write_event(Event::Start(root("urlset")))?;
    for entry in entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", entry.url())?;
        if let Some(last_modified) = entry.last_modified() {
            write_text_element(&mut writer, "lastmod", last_modified)?;
        }
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    Ok(finish(writer))
}

/// Render a `<sitemapindex>` document referencing `sitemaps` in order.
pub fn render_index(sitemaps: &[SitemapReference]) -> Result<Vec<u8>, RenderError> {
    let mut writer = document_writer()?;
    writer.write_event(Event::Start(root("sitemapindex")))?;
    for sitemap in sitemaps {
        writer.write_event(Event::Start(BytesStart::new("sitemap")))?;
        write_text_element(&mut writer, "loc", &sitemap.url)?;
        write_text_element(&mut writer, "lastmod", &sitemap.last_modified)?;
        writer.write_event(Event::End(BytesEnd::new("sitemap")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("sitemapindex")))?;
    Ok(finish(writer))
}

/// Create a writer with the XML declaration already emitted.
fn document_writer() -> Result<Writer<Vec<u8>>, RenderError> {
    let mut writer = Writer::new_with_indent(Vec::with_capacity(4096), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    Ok(writer)
}

/// Root element carrying the sitemap namespace.
fn root(name: &str) -> BytesStart<'_> {
    BytesStart::new(name).with_attributes([("xmlns", SITEMAP_NS)])
}

/// Write `<name>text</name>`, escaping the text.
fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), RenderError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(&xml_chars(text))))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Drop characters outside the XML 1.0 `Char` production.
///
/// Escaping cannot represent them, so a document containing one would not be
/// well-formed.
fn xml_chars(text: &str) -> Cow<'_, str> {
    fn allowed(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && !matches!(c, '\u{FFFE}' | '\u{FFFF}'))
    }

    if text.chars().all(allowed) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| allowed(c)).collect())
    }
}

/// Take the buffer, terminating the document with a newline.
fn finish(writer: Writer<Vec<u8>>) -> Vec<u8> {
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    bytes
}
