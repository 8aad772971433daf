//! XML document rendering for decoded metadata

use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::audio::AudioMetadata;

/// Renders the `<track>` document for one decoded file.
///
/// Child elements appear in fixed order: `format`, `channel_count`,
/// `sampling_rate`, `bit_depth`, `byte_rate` (omitted when the metadata
/// record carries none), `bit_rate`. Identical metadata renders to
/// byte-identical output. No I/O happens here; writing the text is the
/// caller's job.
pub fn render_metadata(meta: &AudioMetadata) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("track")))?;

    write_text_element(&mut writer, "format", meta.format.name())?;
    write_text_element(&mut writer, "channel_count", &meta.num_channels.to_string())?;
    write_text_element(&mut writer, "sampling_rate", &meta.sample_rate.to_string())?;
    write_text_element(&mut writer, "bit_depth", &meta.bits_per_sample.to_string())?;
    if let Some(byte_rate) = meta.byte_rate {
        write_text_element(&mut writer, "byte_rate", &byte_rate.to_string())?;
    }
    write_text_element(&mut writer, "bit_rate", &meta.bit_rate().to_string())?;

    writer.write_event(Event::End(BytesEnd::new("track")))?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| quick_xml::Error::NonDecodable(Some(e.utf8_error())))
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Output file name for an input path: base name with the extension
/// replaced by `.xml`.
pub fn xml_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}.xml", stem)
}
