//! XML preset documents.
//!
//! ```xml
//! <OxidePreset name="Warm Tape" version="1.0">
//!   <Distortion drive="0.5" mix="0.4" inputGain="1.5" outputGain="0" algorithm="waveshaper"/>
//!   <Delay time="0.3" feedback="0.6" mix="0.4" pingPong="1"/>
//!   <Filter type="bandpass" frequency="1500" resonance="2"/>
//!   <Pulse mix="0.6" rate="1/4"/>
//! </OxidePreset>
//! ```
//!
//! Reading applies whatever is present on top of a base state. Missing
//! sections and attributes keep the base value, unknown enum tokens select
//! the enum default, and a number that does not parse is an error.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Error, Result};
use crate::state::ChainState;

pub const ROOT_TAG: &str = "OxidePreset";
pub const FORMAT_VERSION: &str = "1.0";

/// Serialize a named state into a preset document.
pub fn write_preset(name: &str, state: &ChainState) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new(ROOT_TAG);
    root.push_attribute(("name", name));
    root.push_attribute(("version", FORMAT_VERSION));
    writer.write_event(Event::Start(root))?;

    let d = &state.distortion;
    let distortion = element(
        "Distortion",
        &[
            ("drive", number(d.drive())),
            ("mix", number(d.mix())),
            ("inputGain", number(d.input_gain())),
            ("outputGain", number(d.output_gain())),
            ("algorithm", d.algorithm_name().to_string()),
        ],
    );
    writer.write_event(Event::Empty(distortion))?;

    let delay = element(
        "Delay",
        &[
            ("time", number(state.delay.time())),
            ("feedback", number(state.delay.feedback())),
            ("mix", number(state.delay.mix())),
            ("pingPong", if state.delay.ping_pong() { "1" } else { "0" }.to_string()),
        ],
    );
    writer.write_event(Event::Empty(delay))?;

    let filter = element(
        "Filter",
        &[
            ("type", state.filter.filter_type_name().to_string()),
            ("frequency", number(state.filter.frequency())),
            ("resonance", number(state.filter.resonance())),
        ],
    );
    writer.write_event(Event::Empty(filter))?;

    let pulse = element(
        "Pulse",
        &[
            ("mix", number(state.pulse.mix())),
            ("rate", state.pulse.rate_name().to_string()),
        ],
    );
    writer.write_event(Event::Empty(pulse))?;

    writer.write_event(Event::End(BytesEnd::new(ROOT_TAG)))?;

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| Error::InvalidPreset(format!("non UTF-8 output: {e}")))
}

/// Parse a preset document on top of `base`. Returns the preset's name
/// attribute (if any) and the resulting state.
pub fn read_preset(xml: &str, base: &ChainState) -> Result<(Option<String>, ChainState)> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut state = *base;
    let mut name = None;
    let mut in_root = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                let tag = e.name();
                let tag = tag.as_ref();

                if !in_root {
                    if tag != ROOT_TAG.as_bytes() {
                        return Err(Error::InvalidPreset(format!(
                            "expected <{ROOT_TAG}>, found <{}>",
                            String::from_utf8_lossy(tag)
                        )));
                    }
                    in_root = true;
                    for (key, value) in attributes(&e)? {
                        if key == "name" {
                            name = Some(value);
                        }
                    }
                    continue;
                }

                let section = match tag {
                    b"Distortion" => Section::Distortion,
                    b"Delay" => Section::Delay,
                    b"Filter" => Section::Filter,
                    b"Pulse" => Section::Pulse,
                    _ => continue,
                };
                for (key, value) in attributes(&e)? {
                    apply_attribute(&mut state, section, &key, &value)?;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !in_root {
        return Err(Error::InvalidPreset(format!("missing <{ROOT_TAG}> element")));
    }

    Ok((name, state))
}

#[derive(Debug, Clone, Copy)]
enum Section {
    Distortion,
    Delay,
    Filter,
    Pulse,
}

impl Section {
    fn tag(self) -> &'static str {
        match self {
            Section::Distortion => "Distortion",
            Section::Delay => "Delay",
            Section::Filter => "Filter",
            Section::Pulse => "Pulse",
        }
    }
}

fn apply_attribute(state: &mut ChainState, section: Section, key: &str, value: &str) -> Result<()> {
    let num = || parse_number(section, key, value);

    match (section, key) {
        (Section::Distortion, "drive") => state.distortion.set_drive(num()?),
        (Section::Distortion, "mix") => state.distortion.set_mix(num()?),
        (Section::Distortion, "inputGain") => state.distortion.set_input_gain(num()?),
        (Section::Distortion, "outputGain") => state.distortion.set_output_gain(num()?),
        (Section::Distortion, "algorithm") => state.distortion.set_algorithm_name(value.trim()),

        (Section::Delay, "time") => state.delay.set_time(num()?),
        (Section::Delay, "feedback") => state.delay.set_feedback(num()?),
        (Section::Delay, "mix") => state.delay.set_mix(num()?),
        (Section::Delay, "pingPong") => state.delay.set_ping_pong(parse_bool(value)),

        (Section::Filter, "type") => state.filter.set_filter_type_name(value.trim()),
        (Section::Filter, "frequency") => state.filter.set_frequency(num()?),
        (Section::Filter, "resonance") => state.filter.set_resonance(num()?),

        (Section::Pulse, "mix") => state.pulse.set_mix(num()?),
        (Section::Pulse, "rate") => state.pulse.set_rate_name(value.trim()),

        _ => {}
    }

    Ok(())
}

fn attributes(element: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
        out.push((key, value.into_owned()));
    }
    Ok(out)
}

fn element<'a>(tag: &'a str, attrs: &[(&str, String)]) -> BytesStart<'a> {
    let mut element = BytesStart::new(tag);
    for (key, value) in attrs {
        element.push_attribute((*key, value.as_str()));
    }
    element
}

fn number(value: f32) -> String {
    value.to_string()
}

fn parse_number(section: Section, key: &str, value: &str) -> Result<f32> {
    value.trim().parse::<f32>().map_err(|_| Error::InvalidNumber {
        attribute: format!("{}.{key}", section.tag()),
        value: value.to_string(),
    })
}

/// Lenient boolean: anything starting with `1`, `t` or `y` is true.
fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().chars().next(),
        Some('1' | 't' | 'T' | 'y' | 'Y')
    )
}
