use crate::error::MalformedDocument;
use crate::mpd::{AdaptationSet, Descriptor, Mpd, Period, Representation};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

// Nesting levels of the elements we care about: MPD > Period > AdaptationSet > Representation.
const MPD_LEVEL: usize = 1;
const PERIOD_LEVEL: usize = 2;
const ADAPTATION_SET_LEVEL: usize = 3;
const REPRESENTATION_LEVEL: usize = 4;

/// Parses an MPD manifest into a [`Mpd`] tree.
///
/// Elements and attributes that do not contribute to the stream summary are skipped.
/// Element names are matched without their namespace prefix.
pub fn parse_mpd(xml: &str) -> Result<Mpd, MalformedDocument> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut builder = TreeBuilder::default();

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|source| MalformedDocument::Xml { position, source })?;

        match event {
            Event::Start(ref e) => builder.open(e, position)?,
            Event::Empty(ref e) => {
                builder.open(e, position)?;
                builder.close(e.local_name().as_ref());
            }
            Event::End(ref e) => builder.close(e.local_name().as_ref()),
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    let mpd = builder.finish()?;
    debug!(
        "Parsed MPD with {} period(s) and {} adaptation set(s)",
        mpd.periods.len(),
        mpd.periods.iter().map(|p| p.adaptation_sets.len()).sum::<usize>()
    );
    Ok(mpd)
}

/// Incrementally assembles the tree from start/end events.
/// Each `Option` holds the element currently open at that level.
#[derive(Default)]
struct TreeBuilder {
    depth: usize,
    mpd: Option<Mpd>,
    finished: Option<Mpd>,
    period: Option<Period>,
    adaptation_set: Option<AdaptationSet>,
    representation: Option<Representation>,
}

impl TreeBuilder {
    fn open(&mut self, e: &BytesStart, position: u64) -> Result<(), MalformedDocument> {
        let level = self.depth + 1;
        self.depth = level;

        let name = e.local_name();
        match (level, name.as_ref()) {
            (MPD_LEVEL, _) if self.finished.is_some() => return Err(MalformedDocument::MultipleRoots),
            (MPD_LEVEL, b"MPD") => self.mpd = Some(Mpd::default()),
            (MPD_LEVEL, other) => {
                return Err(MalformedDocument::UnexpectedRoot(
                    String::from_utf8_lossy(other).into_owned(),
                ))
            }
            (PERIOD_LEVEL, b"Period") => self.period = Some(read_period(e, position)?),
            (ADAPTATION_SET_LEVEL, b"AdaptationSet") if self.period.is_some() => {
                self.adaptation_set = Some(read_adaptation_set(e, position)?);
            }
            (REPRESENTATION_LEVEL, b"Representation") if self.adaptation_set.is_some() => {
                self.representation = Some(read_representation(e, position)?);
            }
            (REPRESENTATION_LEVEL, b"AudioChannelConfiguration") => {
                if let Some(set) = self.adaptation_set.as_mut() {
                    set.audio_channel_configurations
                        .push(read_descriptor(e, position)?);
                }
            }
            (l, b"AudioChannelConfiguration") if l == REPRESENTATION_LEVEL + 1 => {
                // Only the first configuration of a representation is kept.
                if let Some(rep) = self.representation.as_mut() {
                    if rep.audio_channel_configuration.is_none() {
                        rep.audio_channel_configuration = Some(read_descriptor(e, position)?);
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        match (self.depth, name) {
            (MPD_LEVEL, b"MPD") => self.finished = self.mpd.take(),
            (PERIOD_LEVEL, b"Period") => {
                if let (Some(period), Some(mpd)) = (self.period.take(), self.mpd.as_mut()) {
                    mpd.periods.push(period);
                }
            }
            (ADAPTATION_SET_LEVEL, b"AdaptationSet") => {
                if let (Some(set), Some(period)) =
                    (self.adaptation_set.take(), self.period.as_mut())
                {
                    period.adaptation_sets.push(set);
                }
            }
            (REPRESENTATION_LEVEL, b"Representation") => {
                if let (Some(rep), Some(set)) =
                    (self.representation.take(), self.adaptation_set.as_mut())
                {
                    set.representations.push(rep);
                }
            }
            _ => {}
        }

        self.depth = self.depth.saturating_sub(1);
    }

    fn finish(self) -> Result<Mpd, MalformedDocument> {
        match (self.finished, self.mpd) {
            (Some(mpd), _) => Ok(mpd),
            (None, Some(_)) => Err(MalformedDocument::Truncated("MPD")),
            (None, None) => Err(MalformedDocument::Empty),
        }
    }
}

fn for_each_attribute<F>(e: &BytesStart, position: u64, mut f: F) -> Result<(), MalformedDocument>
where
    F: FnMut(&[u8], String) -> Result<(), MalformedDocument>,
{
    for attr in e.attributes() {
        let attr = attr?;
        let value = attr
            .unescape_value()
            .map_err(|source| MalformedDocument::Xml { position, source })?
            .into_owned();
        f(attr.key.local_name().as_ref(), value)?;
    }
    Ok(())
}

fn parse_unsigned(
    element: &'static str,
    attribute: &'static str,
    value: String,
) -> Result<u64, MalformedDocument> {
    match value.trim().parse::<u64>() {
        Ok(number) => Ok(number),
        Err(_) => Err(MalformedDocument::InvalidAttribute {
            element,
            attribute,
            value,
        }),
    }
}

fn read_period(e: &BytesStart, position: u64) -> Result<Period, MalformedDocument> {
    let mut period = Period::default();
    for_each_attribute(e, position, |key, value| {
        if key == b"id" {
            period.id = Some(value);
        }
        Ok(())
    })?;
    Ok(period)
}

fn read_adaptation_set(e: &BytesStart, position: u64) -> Result<AdaptationSet, MalformedDocument> {
    let mut set = AdaptationSet::default();
    for_each_attribute(e, position, |key, value| {
        match key {
            b"id" => set.id = Some(value),
            b"contentType" => set.content_type = Some(value),
            b"mimeType" => set.mime_type = Some(value),
            b"codecs" => set.codecs = Some(value),
            b"lang" => set.lang = Some(value),
            _ => {}
        }
        Ok(())
    })?;
    Ok(set)
}

fn read_representation(
    e: &BytesStart,
    position: u64,
) -> Result<Representation, MalformedDocument> {
    let mut rep = Representation::default();
    for_each_attribute(e, position, |key, value| {
        match key {
            b"codecs" => rep.codecs = Some(value),
            b"bandwidth" => {
                rep.bandwidth = Some(parse_unsigned("Representation", "bandwidth", value)?)
            }
            b"width" => rep.width = Some(parse_unsigned("Representation", "width", value)?),
            b"height" => rep.height = Some(parse_unsigned("Representation", "height", value)?),
            _ => {}
        }
        Ok(())
    })?;
    Ok(rep)
}

fn read_descriptor(e: &BytesStart, position: u64) -> Result<Descriptor, MalformedDocument> {
    let mut descriptor = Descriptor::default();
    for_each_attribute(e, position, |key, value| {
        match key {
            b"schemeIdUri" => descriptor.scheme_id_uri = Some(value),
            b"value" => descriptor.value = Some(value),
            _ => {}
        }
        Ok(())
    })?;
    Ok(descriptor)
}
