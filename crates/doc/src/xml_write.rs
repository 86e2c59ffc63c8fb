//! Serializes an arena [`Document`] back into the template XML dialect.

use crate::arena::{Document, NodeId};
use crate::error::DocError;
use crate::node::NodeKind;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use labelgrid_types::Length;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

type XmlWriter = Writer<Vec<u8>>;

impl Document {
    /// Serializes the document (everything reachable from the root) as XML.
    pub fn to_xml(&self) -> Result<String, DocError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write_node(self, self.root(), &mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(|e| DocError::XmlWrite(e.to_string()))
    }
}

fn emit(writer: &mut XmlWriter, event: Event) -> Result<(), DocError> {
    writer
        .write_event(event)
        .map_err(|e| DocError::XmlWrite(e.to_string()))
}

fn pt(points: f32) -> String {
    Length::pt(points).to_string()
}

fn write_node(doc: &Document, id: NodeId, writer: &mut XmlWriter) -> Result<(), DocError> {
    let Some(kind) = doc.kind(id) else {
        return Err(DocError::NodeNotFound(id));
    };
    let mut el = BytesStart::new(kind.tag());

    match kind {
        NodeKind::Text(text) => {
            if text.is_empty() {
                return emit(writer, Event::Empty(el));
            }
            if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
                el.push_attribute(("xml:space", "preserve"));
            }
            emit(writer, Event::Start(el))?;
            emit(writer, Event::Text(BytesText::new(text)))?;
            return emit(writer, Event::End(BytesEnd::new("t")));
        }
        NodeKind::Grid(grid) => {
            emit(writer, Event::Start(el))?;
            for width in &grid.columns {
                let mut col = BytesStart::new("col");
                col.push_attribute(("width", pt(*width).as_str()));
                emit(writer, Event::Empty(col))?;
            }
            return emit(writer, Event::End(BytesEnd::new("grid")));
        }
        NodeKind::Document | NodeKind::Break | NodeKind::Tab | NodeKind::PageBreak => {}
        NodeKind::Page { index } => {
            el.push_attribute(("index", index.to_string().as_str()));
        }
        NodeKind::Table(props) => {
            if let Some(style) = &props.style_name {
                el.push_attribute(("style", style.as_str()));
            }
            if let Some(width) = props.width {
                el.push_attribute(("width", pt(width).as_str()));
            }
            if let Some(border) = &props.borders {
                el.push_attribute(("border", border.to_string().as_str()));
            }
            if let Some(margin) = props.cell_margin {
                el.push_attribute(("cell-margin", pt(margin).as_str()));
            }
        }
        NodeKind::Row(props) => {
            if let Some(height) = props.height {
                el.push_attribute(("height", pt(height).as_str()));
            }
        }
        NodeKind::Cell(props) => {
            if let Some(width) = props.width {
                el.push_attribute(("width", pt(width).as_str()));
            }
            if let Some(shading) = &props.shading {
                el.push_attribute(("shading", shading.to_hex().as_str()));
            }
            if let Some(border) = &props.borders {
                el.push_attribute(("border", border.to_string().as_str()));
            }
            if let Some(v_align) = props.v_align {
                el.push_attribute(("valign", v_align.as_str()));
            }
        }
        NodeKind::Paragraph(style) => {
            if let Some(align) = style.align {
                el.push_attribute(("align", align.as_str()));
            }
            if let Some(spacing) = style.line_spacing {
                el.push_attribute(("line-spacing", spacing.to_string().as_str()));
            }
            if let Some(after) = style.space_after {
                el.push_attribute(("space-after", pt(after).as_str()));
            }
            if !style.tab_stops.is_empty() {
                let tabs = style
                    .tab_stops
                    .iter()
                    .map(|t| format!("{}:{}", t.align.as_str(), pt(t.position)))
                    .collect::<Vec<_>>()
                    .join(" ");
                el.push_attribute(("tabs", tabs.as_str()));
            }
        }
        NodeKind::Run(style) => {
            if let Some(font) = &style.font_family {
                el.push_attribute(("font", font.as_str()));
            }
            if let Some(size) = style.font_size {
                el.push_attribute(("size", pt(size).as_str()));
            }
            if let Some(weight) = style.weight {
                el.push_attribute(("weight", weight.numeric_value().to_string().as_str()));
            }
            if let Some(font_style) = style.style {
                el.push_attribute(("italic", if font_style.is_italic() { "true" } else { "false" }));
            }
            if let Some(color) = &style.color {
                el.push_attribute(("color", color.to_hex().as_str()));
            }
        }
        NodeKind::Image(image) => {
            if let Some(src) = &image.src {
                el.push_attribute(("src", src.as_str()));
            }
            if let Some(content_type) = &image.content_type {
                el.push_attribute(("type", content_type.as_str()));
            }
            el.push_attribute(("width", pt(image.width).as_str()));
            el.push_attribute(("height", pt(image.height).as_str()));
            if let Some(alt) = &image.alt {
                el.push_attribute(("alt", alt.as_str()));
            }
            if let Some(data) = &image.data {
                el.push_attribute(("data", STANDARD.encode(data.as_slice()).as_str()));
            }
        }
    }

    let children = doc.children(id);
    if children.is_empty() {
        return emit(writer, Event::Empty(el));
    }
    emit(writer, Event::Start(el))?;
    for child in children {
        write_node(doc, *child, writer)?;
    }
    emit(writer, Event::End(BytesEnd::new(kind.tag())))
}
