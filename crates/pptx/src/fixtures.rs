//! In-memory PPTX builders for tests.

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

const NAMESPACES: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#,
);

const SLIDE_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const MASTER_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";

/// An inline equation: Office Math in the choice branch, a plain run in
/// the fallback.
pub(crate) const EQUATION_PARAGRAPH: &str = concat!(
    r#"<a:p><a:r><a:t>du</a:t></a:r><a:r><a:t> und </a:t></a:r>"#,
    r#"<mc:AlternateContent xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006">"#,
    r#"<mc:Choice xmlns:a14="http://schemas.microsoft.com/office/drawing/2010/main" Requires="a14">"#,
    r#"<a14:m><m:oMathPara xmlns:m="http://schemas.openxmlformats.org/officeDocument/2006/math"><m:oMath>"#,
    r#"<m:r><a:rPr lang="de-DE"><a:latin typeface="Cambria Math"/></a:rPr><m:t>du</m:t></m:r>"#,
    r#"</m:oMath></m:oMathPara></a14:m></mc:Choice>"#,
    r#"<mc:Fallback><a:r><a:t>x</a:t></a:r></mc:Fallback></mc:AlternateContent></a:p>"#,
);

/// Wrap shape markup in a slide part.
pub(crate) fn slide_xml(shapes: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld {}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld></p:sld>"#,
        NAMESPACES, shapes
    )
}

/// A text box shape with the given paragraph markup.
pub(crate) fn text_shape(name: &str, paragraphs: &str) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="{}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody></p:sp>"#,
        name, paragraphs
    )
}

/// Build a PPTX archive whose slides are listed in the given order.
///
/// Each entry is `(file name under ppt/slides/, slide xml)`.
pub(crate) fn build_pptx(slides: &[(&str, &str)]) -> Vec<u8> {
    let mut rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    rels.push_str(&format!(
        r#"<Relationship Id="rId1" Type="{}" Target="slideMasters/slideMaster1.xml"/>"#,
        MASTER_REL
    ));
    let mut ids = String::new();
    for (idx, (name, _)) in slides.iter().enumerate() {
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{}" Target="slides/{}"/>"#,
            idx + 2,
            SLIDE_REL,
            name
        ));
        ids.push_str(&format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + idx, idx + 2));
    }
    rels.push_str("</Relationships>");

    let presentation = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation {}><p:sldIdLst>{}</p:sldIdLst></p:presentation>"#,
        NAMESPACES, ids
    );

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();
    let mut add = |name: &str, content: &str| {
        writer.start_file(name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    };

    add("[Content_Types].xml", r#"<?xml version="1.0"?><Types/>"#);
    add("ppt/presentation.xml", &presentation);
    add("ppt/_rels/presentation.xml.rels", &rels);
    for (name, xml) in slides {
        add(&format!("ppt/slides/{}", name), xml);
    }
    writer.add_directory("ppt/media/", options).unwrap();

    writer.finish().unwrap().into_inner()
}
