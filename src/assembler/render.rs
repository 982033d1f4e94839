use std::io::{self, Write};

/// Static text written above the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub intro: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub anchor: String,
    pub body: String,
}

/// Header plus sections in source-file order. TOC entries are derived from
/// the same list, so both always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub header: Header,
    pub sections: Vec<Section>,
}

impl Document {
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_header(out, &self.header)?;
        write_toc(out, &self.sections)?;
        for section in &self.sections {
            write_section(out, section)?;
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.render(&mut buf)?;
        Ok(buf)
    }
}

fn write_header<W: Write>(out: &mut W, header: &Header) -> io::Result<()> {
    write!(out, "# {}\n\n", header.title)?;
    if let Some(intro) = &header.intro {
        write!(out, "{}\n\n", intro)?;
    }
    Ok(())
}

fn write_toc<W: Write>(out: &mut W, sections: &[Section]) -> io::Result<()> {
    out.write_all(b"# TOC\n\n")?;
    for section in sections {
        writeln!(out, "* [{}](#{})", section.title, section.anchor)?;
    }
    out.write_all(b"\n\n")
}

fn write_section<W: Write>(out: &mut W, section: &Section) -> io::Result<()> {
    write!(out, "\n\n# {}\n\n", section.title)?;
    out.write_all(section.body.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, anchor: &str, body: &str) -> Section {
        Section {
            title: title.into(),
            anchor: anchor.into(),
            body: body.into(),
        }
    }

    fn header(intro: Option<&str>) -> Header {
        Header {
            title: "Go Best Practices".into(),
            intro: intro.map(String::from),
        }
    }

    fn render(doc: &Document) -> String {
        String::from_utf8(doc.to_bytes().unwrap()).unwrap()
    }

    #[test]
    fn empty_document_has_header_and_empty_toc() {
        let doc = Document {
            header: header(None),
            sections: vec![],
        };
        assert_eq!(render(&doc), "# Go Best Practices\n\n# TOC\n\n\n\n");
    }

    #[test]
    fn intro_goes_between_title_and_toc() {
        let doc = Document {
            header: header(Some("Here is a link to the [discussion video](https://example.com).")),
            sections: vec![],
        };
        assert_eq!(
            render(&doc),
            "# Go Best Practices\n\n\
             Here is a link to the [discussion video](https://example.com).\n\n\
             # TOC\n\n\n\n"
        );
    }

    #[test]
    fn two_sections_layout() {
        let doc = Document {
            header: header(None),
            sections: vec![
                section("Alpha", "alpha", "content A\n"),
                section("Beta", "beta", "content B\n"),
            ],
        };
        assert_eq!(
            render(&doc),
            "# Go Best Practices\n\n\
             # TOC\n\n\
             * [Alpha](#alpha)\n\
             * [Beta](#beta)\n\
             \n\n\
             \n\n# Alpha\n\ncontent A\n\
             \n\n# Beta\n\ncontent B\n"
        );
    }

    #[test]
    fn body_written_verbatim() {
        let body = "  indented\r\n\ttabbed   \n\n\n# nested heading\nno trailing newline";
        let doc = Document {
            header: header(None),
            sections: vec![section("Raw", "raw", body)],
        };
        assert!(render(&doc).ends_with(&format!("\n\n# Raw\n\n{}", body)));
    }
}
