//! JUnit-style XML report parsing.
//!
//! A report is rooted either at a single `<testsuite>` or at a container (usually `<testsuites>`) holding several.
//! Only direct children of the root are inspected, so test cases nested inside the suites of a container document
//! are not listed.

use std::borrow::Cow;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use jpipe_core::artifacts::{TEST_ID_SEPARATOR, report};
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::errors::{JpipeError, JpipeResult};

/// One `<testcase>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseRecord {
    pub classname: String,
    pub name: String,
    /// Markup of each child element (`<failure>`, `<error>`, `<skipped>`, ...), as written in the report.
    pub details: Vec<String>,
}

impl TestCaseRecord {
    /// `<classname>#<name>`
    pub fn id(&self) -> String {
        format!("{}{}{}", self.classname, TEST_ID_SEPARATOR, self.name)
    }

    /// A test case with no child element passed cleanly.
    pub fn is_clean(&self) -> bool {
        self.details.is_empty()
    }
}

/// What one report document contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub root_tag: String,
    pub suites: Vec<String>,
    pub cases: Vec<TestCaseRecord>,
}

struct ReportParser<'a> {
    reader: Reader<&'a [u8]>,
    origin: PathBuf,
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn is_blank(text: &BytesText<'_>) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

impl<'a> ReportParser<'a> {
    fn new(xml: &'a str, origin: &Path) -> Self {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().check_comments = true;
        Self {
            reader,
            origin: origin.to_path_buf(),
        }
    }

    fn malformed(&self, message: impl Display) -> JpipeError {
        JpipeError::Xml {
            path: self.origin.clone(),
            message: message.to_string(),
        }
    }

    fn next_event(&mut self) -> JpipeResult<Event<'a>> {
        match self.reader.read_event() {
            Ok(event) => Ok(event),
            Err(e) => Err(self.malformed(e)),
        }
    }

    /// Reject duplicate attributes, raw `<` in values and undefined or unterminated entity references.
    fn check_attributes(&self, e: &BytesStart<'_>) -> JpipeResult<()> {
        for attr in e.attributes() {
            let attr = attr.map_err(|err| self.malformed(err))?;
            if attr.value.contains(&b'<') {
                return Err(self.malformed(format!(
                    "'<' in value of attribute `{}` of <{}>",
                    String::from_utf8_lossy(attr.key.as_ref()),
                    tag_name(e)
                )));
            }
            attr.unescape_value().map_err(|err| self.malformed(err))?;
        }
        Ok(())
    }

    fn check_text(&self, text: &BytesText<'_>) -> JpipeResult<()> {
        text.unescape().map(drop).map_err(|err| self.malformed(err))
    }

    fn required_attr(
        &self,
        e: &BytesStart<'_>,
        element: &'static str,
        attribute: &'static str,
    ) -> JpipeResult<String> {
        let attr = e.try_get_attribute(attribute).map_err(|err| self.malformed(err))?;
        let Some(attr) = attr else {
            return Err(JpipeError::MissingAttribute {
                path: self.origin.clone(),
                element,
                attribute,
            });
        };
        attr.unescape_value()
            .map(|v| v.into_owned())
            .map_err(|err| self.malformed(err))
    }

    /// Consume the content of an open element up to and including its end tag, checking every event.
    ///
    /// When `out` is given, the consumed markup is copied into it. Comments and processing instructions are
    /// dropped.
    fn consume_element(&mut self, name: &str, mut out: Option<&mut Writer<Vec<u8>>>) -> JpipeResult<()> {
        let mut depth = 1usize;
        while depth > 0 {
            let event = self.next_event()?;
            match &event {
                Event::Start(e) => {
                    self.check_attributes(e)?;
                    depth += 1;
                }
                Event::Empty(e) => self.check_attributes(e)?,
                Event::End(_) => depth -= 1,
                Event::Text(t) => self.check_text(t)?,
                Event::CData(_) => {}
                Event::Comment(_) | Event::PI(_) => continue,
                Event::Eof => return Err(self.malformed(format!("unclosed <{name}>"))),
                _ => return Err(self.malformed(format!("declaration inside <{name}>"))),
            }
            if let Some(w) = out.as_deref_mut() {
                w.write_event(event).map_err(|err| self.malformed(err))?;
            }
        }
        Ok(())
    }

    /// Markup of one test case child element, as written in the report.
    fn detail_markup(&mut self, e: BytesStart<'a>, has_body: bool) -> JpipeResult<String> {
        let name = tag_name(&e);
        let mut out = Writer::new(Vec::new());
        if has_body {
            out.write_event(Event::Start(e)).map_err(|err| self.malformed(err))?;
            self.consume_element(&name, Some(&mut out))?;
        } else {
            out.write_event(Event::Empty(e)).map_err(|err| self.malformed(err))?;
        }
        Ok(String::from_utf8_lossy(&out.into_inner()).into_owned())
    }

    fn parse(mut self) -> JpipeResult<ReportDocument> {
        let (root, root_has_body) = loop {
            match self.next_event()? {
                Event::Start(e) => break (e, true),
                Event::Empty(e) => break (e, false),
                Event::Text(t) if is_blank(&t) => {}
                Event::Text(_) | Event::CData(_) => return Err(self.malformed("text before the root element")),
                Event::End(_) => return Err(self.malformed("end tag before the root element")),
                Event::Eof => return Err(self.malformed("no root element")),
                _ => {}
            }
        };
        self.check_attributes(&root)?;

        let root_tag = tag_name(&root);
        let root_is_suite = root_tag == report::TESTSUITE;
        let mut doc = ReportDocument {
            root_tag,
            suites: Vec::new(),
            cases: Vec::new(),
        };
        if root_is_suite {
            doc.suites
                .push(self.required_attr(&root, report::TESTSUITE, report::NAME)?);
        }

        if root_has_body {
            loop {
                let (child, has_body) = match self.next_event()? {
                    Event::Start(e) => (e, true),
                    Event::Empty(e) => (e, false),
                    Event::Text(t) => {
                        self.check_text(&t)?;
                        continue;
                    }
                    Event::End(_) => break,
                    Event::Eof => return Err(self.malformed(format!("unclosed <{}>", doc.root_tag))),
                    Event::CData(_) | Event::Comment(_) | Event::PI(_) => continue,
                    _ => return Err(self.malformed(format!("declaration inside <{}>", doc.root_tag))),
                };
                self.check_attributes(&child)?;
                let child_tag = tag_name(&child);

                if child_tag == report::TESTCASE {
                    doc.cases.push(self.parse_case(&child, has_body)?);
                    continue;
                }
                if child_tag == report::TESTSUITE && !root_is_suite {
                    doc.suites
                        .push(self.required_attr(&child, report::TESTSUITE, report::NAME)?);
                }
                if has_body {
                    self.consume_element(&child_tag, None)?;
                }
            }
        }

        loop {
            match self.next_event()? {
                Event::Eof => break,
                Event::Text(t) if is_blank(&t) => {}
                Event::Comment(_) | Event::PI(_) => {}
                _ => return Err(self.malformed("junk after document element")),
            }
        }

        Ok(doc)
    }

    fn parse_case(&mut self, case: &BytesStart<'a>, has_body: bool) -> JpipeResult<TestCaseRecord> {
        let classname = self.required_attr(case, report::TESTCASE, report::CLASSNAME)?;
        let name = self.required_attr(case, report::TESTCASE, report::NAME)?;
        let mut details = Vec::new();

        if has_body {
            loop {
                match self.next_event()? {
                    Event::Start(e) => {
                        self.check_attributes(&e)?;
                        details.push(self.detail_markup(e, true)?);
                    }
                    Event::Empty(e) => {
                        self.check_attributes(&e)?;
                        details.push(self.detail_markup(e, false)?);
                    }
                    Event::Text(t) => self.check_text(&t)?,
                    Event::End(_) => break,
                    Event::Eof => return Err(self.malformed(format!("unclosed <{}>", report::TESTCASE))),
                    Event::CData(_) | Event::Comment(_) | Event::PI(_) => {}
                    _ => return Err(self.malformed(format!("declaration inside <{}>", report::TESTCASE))),
                }
            }
        }

        Ok(TestCaseRecord {
            classname,
            name,
            details,
        })
    }
}

/// Encoding named by the byte-order mark or the XML declaration, UTF-8 when neither says otherwise.
fn declared_encoding(bytes: &[u8], origin: &Path) -> JpipeResult<(&'static Encoding, usize)> {
    if let Some(found) = Encoding::for_bom(bytes) {
        return Ok(found);
    }
    let mut reader = Reader::from_reader(bytes);
    let label = match reader.read_event() {
        Ok(Event::Decl(decl)) => match decl.encoding() {
            Some(Ok(label)) => label.into_owned(),
            Some(Err(err)) => {
                return Err(JpipeError::Xml {
                    path: origin.to_path_buf(),
                    message: err.to_string(),
                });
            }
            None => return Ok((UTF_8, 0)),
        },
        _ => return Ok((UTF_8, 0)),
    };
    let encoding = Encoding::for_label(&label).ok_or_else(|| JpipeError::Xml {
        path: origin.to_path_buf(),
        message: format!("unsupported encoding `{}`", String::from_utf8_lossy(&label)),
    })?;
    // A declaration readable byte by byte without a BOM rules out UTF-16.
    if encoding == UTF_16LE || encoding == UTF_16BE {
        return Ok((UTF_8, 0));
    }
    Ok((encoding, 0))
}

/// Decode raw report bytes to text using the encoding the document declares.
///
/// ## Errors
///
/// - `Xml` for an unknown encoding label or bytes that are invalid in the declared encoding.
pub fn decode_report<'b>(bytes: &'b [u8], origin: &Path) -> JpipeResult<Cow<'b, str>> {
    let (encoding, bom_len) = declared_encoding(bytes, origin)?;
    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
    if had_errors {
        return Err(JpipeError::Xml {
            path: origin.to_path_buf(),
            message: format!("invalid {} byte sequence", encoding.name()),
        });
    }
    tracing::trace!(path = %origin.display(), encoding = encoding.name(), "decoded report");
    Ok(text)
}

/// Read, decode and parse the report at `path`.
pub fn read_report(path: &Path) -> JpipeResult<ReportDocument> {
    let bytes = fs::read(path).map_err(|e| JpipeError::io("read test report", path, e))?;
    let xml = decode_report(&bytes, path)?;
    parse_report(&xml, path)
}

/// Parse one report document. `origin` is only used to name the file in errors.
///
/// ## Errors
///
/// - `Xml` for malformed markup.
/// - `MissingAttribute` when a suite lacks `name` or a test case lacks `classname`/`name`.
pub fn parse_report(xml: &str, origin: &Path) -> JpipeResult<ReportDocument> {
    ReportParser::new(xml, origin).parse()
}
